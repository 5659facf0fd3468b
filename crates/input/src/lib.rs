//! Input aggregation: three input modalities mapped to one motion model.
//!
//! # Invariants
//! - Event handling only does bookkeeping; accumulated state is read once
//!   per frame via [`Aggregator::poll`], never reacted to synchronously.
//! - Combined discrete directions are renormalized to unit length, so
//!   diagonals move no faster than a single direction.
//! - A lifted or canceled touch contributes exactly zero from the next
//!   poll onward.

pub mod action;
pub mod aggregator;
pub mod event;

pub use action::Action;
pub use aggregator::{Aggregator, Intent};
pub use event::InputEvent;
