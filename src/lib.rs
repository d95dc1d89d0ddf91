//! Layer-3 traffic-engineering simulation.
//!
//! A [`Model`] holds nodes, interfaces, demands and RSVP-style LSPs. One call
//! to [`Model::update_simulation`] signals every LSP with bandwidth admission
//! control, routes every demand over ECMP shortest paths (or over the LSPs
//! between its endpoints) and accumulates traffic on each interface.

pub mod types;
pub mod graph;
pub mod model;
pub mod router;
pub mod signaling;
pub mod failure;
pub mod validation;
pub mod utils;

#[cfg(any(test, feature = "test"))]
pub mod test_helpers;

pub use model::{Model, ModelError};
pub use validation::{ValidationReport, Violation};
