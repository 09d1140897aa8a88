//! Integration tests for the entity core.
//!
//! Per-module unit tests live next to the code they cover; this module
//! holds the cross-module suites:
//!
//! - `integration.rs`: end-to-end flight, pursuit, collision, and
//!   lifecycle scenarios driven through [`World::tick`](crate::World::tick)
//! - `helpers.rs`: factory functions for scenario setup

mod helpers;

pub use helpers::*;
