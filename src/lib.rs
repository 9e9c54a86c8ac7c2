//! Domain core for a personal task manager.
//!
//! Actions (tasks) are grouped by life domain, carry due dates, projects,
//! labels, and a priority, and move through a status lifecycle computed by
//! [`ops::status`]. The [`attrs`] module provides a schema-driven generic
//! editor that diffs and applies arbitrary field edits; [`store`] defines the
//! persistence collaborator the host wires a real backend into.
//!
//! The UI layer lives elsewhere. This crate only computes values and hands
//! them to its collaborators.

pub mod attrs;
pub mod model;
pub mod ops;
pub mod parse;
pub mod store;
