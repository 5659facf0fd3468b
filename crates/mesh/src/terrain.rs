use bytemuck::{Pod, Zeroable};
use gridwalk_common::GridConfig;

/// Fixed terrain hue for every vertex.
const TERRAIN_COLOR: [u8; 4] = [130, 224, 30, 255];

/// Wireframe sampling stride, in cells, along both axes.
const LINE_STRIDE: usize = 16;

/// Vertices emitted per grid cell (the four cell corners, unshared).
const VERTS_PER_CELL: usize = 4;

/// Triangle indices emitted per interior (fan-pivoting) cell.
const INDICES_PER_FAN: usize = 24;

/// One terrain vertex: position at height 0, flat per-vertex color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub color: [u8; 4],
}

/// CPU-side terrain buffers, built once at startup.
///
/// `triangle_indices` draws the shaded surface as a triangle list;
/// `line_indices` draws a decimated wireframe overlay as a line list.
/// Both reference the same vertex buffer.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub triangle_indices: Vec<u16>,
    pub line_indices: Vec<u16>,
}

impl TerrainMesh {
    /// Build the mesh for the given grid. Pure; the same config always
    /// produces identical buffers.
    ///
    /// Grids with fewer than 2 cells on either axis yield empty index
    /// buffers (no interior cell can pivot a fan). Callers that need a
    /// non-empty terrain validate with [`GridConfig::validate`] upstream.
    pub fn build(config: &GridConfig) -> Self {
        let width = config.width_cells as usize;
        let length = config.length_cells as usize;

        let vertices = emit_vertices(width, length);
        let triangle_indices = stitch_fans(width, length);
        let line_indices = decimate_lines(width, length, &triangle_indices);

        tracing::debug!(
            width,
            length,
            vertices = vertices.len(),
            triangles = triangle_indices.len() / 3,
            line_segments = line_indices.len() / 2,
            "terrain mesh built"
        );

        Self {
            vertices,
            triangle_indices,
            line_indices,
        }
    }
}

/// Emit 4 corner vertices per cell in row-major order, all at height 0.
/// Adjacent cells duplicate coincident corners as separate entries.
fn emit_vertices(width: usize, length: usize) -> Vec<TerrainVertex> {
    let mut vertices = Vec::with_capacity(width * length * VERTS_PER_CELL);

    for z in 0..length {
        let z0 = z as f32;
        let z1 = z0 + 1.0;

        for x in 0..width {
            let x0 = x as f32;
            let x1 = x0 + 1.0;

            for position in [
                [x0, 0.0, z0],
                [x1, 0.0, z0],
                [x0, 0.0, z1],
                [x1, 0.0, z1],
            ] {
                vertices.push(TerrainVertex {
                    position,
                    color: TERRAIN_COLOR,
                });
            }
        }
    }

    vertices
}

/// Emit an 8-triangle fan for every interior cell.
///
/// The fan pivots on the cell's top-right corner and walks the corners of
/// the cell itself, the next cell along x, and both cells in the next row,
/// tiling the patch the four surrounding cells share with the pivot.
/// Boundary cells (last row/column) never pivot; they are only referenced
/// as neighbors, which is why iteration stops at `count - 2` per axis.
fn stitch_fans(width: usize, length: usize) -> Vec<u16> {
    if width < 2 || length < 2 {
        return Vec::new();
    }

    let verts_per_row = width * VERTS_PER_CELL;
    let mut indices = Vec::with_capacity((width - 1) * (length - 1) * INDICES_PER_FAN);

    for z in 0..length - 1 {
        for x in 0..width - 1 {
            // First vertex of this cell's 4-vertex block.
            let i = (z * verts_per_row + x * VERTS_PER_CELL) as u16;
            let row = verts_per_row as u16;

            let pivot = i + 3; // this cell's top-right corner
            let right = i + 4; // next cell along x, bottom-left
            let right_top = i + 6; // next cell along x, top-left
            let below = i + row; // cell in the next row, bottom-left
            let below_right = below + 1;
            let diag = below + 4; // next row, next column, bottom-left

            #[rustfmt::skip]
            indices.extend_from_slice(&[
                pivot, i + 1, i,
                pivot, right, i + 1,
                pivot, right_top, right,
                pivot, diag, right_top,
                pivot, below_right, diag,
                pivot, below, below_right,
                pivot, i + 2, below,
                pivot, i, i + 2,
            ]);
        }
    }

    indices
}

/// Sample interior cells at `LINE_STRIDE` intervals and record the first
/// two edges of each of the sampled cell's 8 fan triangles as line
/// segments. Indices are copied from the triangle buffer, never
/// recomputed, so the overlay is a strict subset of the surface indices.
fn decimate_lines(width: usize, length: usize, triangle_indices: &[u16]) -> Vec<u16> {
    if width < 2 || length < 2 {
        return Vec::new();
    }

    let indices_per_row = (width - 1) * INDICES_PER_FAN;
    let mut lines = Vec::new();

    for z in (0..length - 1).step_by(LINE_STRIDE) {
        for x in (0..width - 1).step_by(LINE_STRIDE) {
            let start = z * indices_per_row + x * INDICES_PER_FAN;

            for tri in (start..start + INDICES_PER_FAN).step_by(3) {
                let [a, b, c] = [
                    triangle_indices[tri],
                    triangle_indices[tri + 1],
                    triangle_indices[tri + 2],
                ];
                lines.extend_from_slice(&[a, b, b, c]);
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mesh(width: u32, length: u32) -> TerrainMesh {
        TerrainMesh::build(&GridConfig::new(width, length))
    }

    #[test]
    fn vertex_count_is_four_per_cell() {
        let m = mesh(5, 7);
        assert_eq!(m.vertices.len(), 4 * 5 * 7);
    }

    #[test]
    fn vertices_sit_on_unit_cell_corners_at_height_zero() {
        let m = mesh(2, 2);
        // First cell: (0,0),(1,0),(0,1),(1,1) in xz.
        assert_eq!(m.vertices[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(m.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(m.vertices[2].position, [0.0, 0.0, 1.0]);
        assert_eq!(m.vertices[3].position, [1.0, 0.0, 1.0]);
        assert!(m.vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(m.vertices.iter().all(|v| v.color == TERRAIN_COLOR));
    }

    #[test]
    fn two_by_two_grid_has_one_fan() {
        let m = mesh(2, 2);
        assert_eq!(m.triangle_indices.len(), 24);
    }

    #[test]
    fn three_by_three_grid_has_four_fans() {
        let m = mesh(3, 3);
        assert_eq!(m.triangle_indices.len(), 96);
    }

    #[test]
    fn triangle_indices_stay_in_vertex_range() {
        for (w, l) in [(2, 2), (3, 3), (2, 9), (17, 4), (66, 66)] {
            let m = mesh(w, l);
            let max = (4 * w * l) as u16;
            assert!(
                m.triangle_indices.iter().all(|&i| i < max),
                "index out of range for {w}x{l}"
            );
        }
    }

    #[test]
    fn line_indices_are_subset_of_triangle_indices() {
        for (w, l) in [(2, 2), (17, 17), (66, 66)] {
            let m = mesh(w, l);
            let tris: HashSet<u16> = m.triangle_indices.iter().copied().collect();
            assert!(m.line_indices.iter().all(|i| tris.contains(i)));
        }
    }

    #[test]
    fn sampled_cell_contributes_two_edges_per_fan_triangle() {
        // One sampled cell: 8 triangles, 2 segments each, 2 indices per segment.
        let m = mesh(2, 2);
        assert_eq!(m.line_indices.len(), 32);
        // Segments are (v0,v1) and (v1,v2) of each triangle.
        assert_eq!(m.line_indices[0], m.triangle_indices[0]);
        assert_eq!(m.line_indices[1], m.triangle_indices[1]);
        assert_eq!(m.line_indices[2], m.triangle_indices[1]);
        assert_eq!(m.line_indices[3], m.triangle_indices[2]);
    }

    #[test]
    fn decimation_strides_sixteen_cells() {
        // 18x18: interior cells 0..17 per axis, samples at 0 and 16 → 4 cells.
        let m = mesh(18, 18);
        assert_eq!(m.line_indices.len(), 4 * 32);
    }

    #[test]
    fn degenerate_grid_yields_empty_index_buffers() {
        for (w, l) in [(0, 0), (1, 1), (1, 8), (8, 1)] {
            let m = mesh(w, l);
            assert!(m.triangle_indices.is_empty());
            assert!(m.line_indices.is_empty());
            assert_eq!(m.vertices.len(), (4 * w * l) as usize);
        }
    }

    #[test]
    fn fans_cover_the_interior_grid_exactly() {
        // Summed doubled triangle area in the xz plane equals the interior
        // cell area: fans tile with no gaps or overlaps.
        let (w, l) = (5, 4);
        let m = mesh(w, l);
        let doubled_area: f32 = m
            .triangle_indices
            .chunks_exact(3)
            .map(|t| {
                let [a, b, c] = [
                    m.vertices[t[0] as usize].position,
                    m.vertices[t[1] as usize].position,
                    m.vertices[t[2] as usize].position,
                ];
                ((b[0] - a[0]) * (c[2] - a[2]) - (b[2] - a[2]) * (c[0] - a[0])).abs()
            })
            .sum();
        let interior = ((w - 1) * (l - 1)) as f32;
        assert!((doubled_area / 2.0 - interior).abs() < 1e-4);
    }

    #[test]
    fn build_is_deterministic() {
        let a = mesh(9, 9);
        let b = mesh(9, 9);
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.triangle_indices, b.triangle_indices);
        assert_eq!(a.line_indices, b.line_indices);
    }
}
