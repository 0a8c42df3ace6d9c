// src/graph/mod.rs

//! Graph store for the achievement chart.
//!
//! - [`node`] defines nodes, positions and borrowed edge views.
//! - [`store`] holds the nodes, answers lookups and applies raw status
//!   writes. It performs no transition checks; those live in
//!   [`crate::engine`].
//! - [`layout`] maps normalized positions onto a fixed viewport.

pub mod layout;
pub mod node;
pub mod store;

pub use layout::{ControlPoint, Point, Viewport};
pub use node::{Edge, Node, NodeId, Position};
pub use store::{GraphStore, StatusCounts};
