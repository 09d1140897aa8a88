//! # Starfall Core
//!
//! Entity core for Starfall's 2D arcade combat simulation.
//!
//! This crate models the per-frame physics, damage, and lifecycle behavior of
//! movable game entities (ships, missiles, debris) owned by a [`World`]:
//!
//! - **Angle**: degree-valued rotation scalar, never wrap-normalized
//! - **Entity**: kinematic state, rotation controller, damage state machine
//! - **Registry**: collision membership with scoped registration handles
//! - **World**: spawn/despawn lifecycle, tick orchestration, collision sweep
//!
//! ## Execution model
//!
//! The simulation is single-threaded and cooperative: the owning game loop
//! calls [`World::tick`] once per frame with the elapsed time, and all entity
//! mutation happens inside that call or inside the synchronous collision
//! callbacks it dispatches. Nothing here blocks, suspends, or locks.
//!
//! ## Usage
//!
//! ```
//! use starfall_core::{CollisionKind, World};
//!
//! let mut world = World::new();
//! let ship = world.spawn("ship", CollisionKind::Ship);
//! world.get_mut(ship).unwrap().set_speed(40.0);
//! world.tick(1.0 / 60.0);
//! assert!(world.get(ship).unwrap().position().y > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod angle;
pub mod entity;
pub mod registry;
pub mod world;

pub use angle::Angle;
pub use entity::{
    CollisionKind, Contact, Entity, EntityId, RotationMode, SpawnParams, StatusFlags,
};
pub use registry::{CollisionRegistry, Registration};
pub use world::{World, WorldError};

#[cfg(test)]
mod tests;
