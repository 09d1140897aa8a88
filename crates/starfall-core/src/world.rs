//! World: the owning container for entities and their registry membership.
//!
//! The `World` is the single mutation point of the simulation. It owns:
//!
//! - entity storage in a `BTreeMap` for deterministic iteration order
//! - the [`CollisionRegistry`] and every live [`Registration`] handle
//! - monotonic id allocation
//!
//! # Tick phases
//!
//! [`World::tick`] runs a fixed phase order:
//!
//! 1. clamp negative `dt` to zero (a tick never runs time backwards);
//! 2. update every entity in id order, resolving each tracking target by
//!    key against the live map at that entity's turn (a despawned target
//!    resolves to nothing);
//! 3. sync collision footprints from post-integration positions;
//! 4. sweep overlapping pairs and dispatch [`Entity::on_collision`] to
//!    both members of each pair, in pair order.
//!
//! # Registration discipline
//!
//! A spawned entity with a collision kind other than `None` is registered
//! immediately, and its [`Registration`] is held next to it. Every
//! despawn path ([`World::despawn`], [`World::clear`]) releases the
//! handle exactly once; there is no reliance on drop-time cleanup.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::entity::{CollisionKind, Contact, Entity, EntityId, SpawnParams};
use crate::registry::{CollisionRegistry, Registration};

/// Errors surfaced by world operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The referenced entity is not (or no longer) in the world.
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
}

/// Owning container for all simulation entities.
///
/// # Example
///
/// ```
/// use starfall_core::{CollisionKind, SpawnParams, World};
/// use glam::Vec2;
///
/// let mut world = World::new();
/// let ship = world.spawn("ship", CollisionKind::Ship);
/// world.get_mut(ship).unwrap().set_speed(5.0);
///
/// let missile = world
///     .spawn_child(ship, "missile", CollisionKind::Projectile, SpawnParams {
///         size: Vec2::new(1.0, 4.0),
///         speed: 3.0,
///         inherit_speed: true,
///     })
///     .unwrap();
///
/// assert_eq!(world.get(missile).unwrap().speed(), 8.0);
/// assert!(world.is_collidable(missile));
/// ```
#[derive(Debug, Default)]
pub struct World {
    /// Monotonically increasing id source.
    next_id: u64,
    /// Entity storage with deterministic iteration order.
    entities: BTreeMap<EntityId, Entity>,
    /// Live registration handles, one per registered entity.
    registrations: BTreeMap<EntityId, Registration>,
    /// Collision membership and broad phase.
    registry: CollisionRegistry,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a fresh entity with default state.
    ///
    /// Registers it with the collision registry iff `kind` is not
    /// [`CollisionKind::None`] and seeds its footprint from the default
    /// transform.
    pub fn spawn(&mut self, name: impl Into<String>, kind: CollisionKind) -> EntityId {
        let id = self.allocate_id();
        self.insert_entity(Entity::new(id, name, kind))
    }

    /// Spawns a child of `parent` with inherited attributes.
    ///
    /// Applies [`Entity::inherit_from`] (allegiance, position, rotation,
    /// size, speed, depth), then inserts and registers the child like
    /// [`Self::spawn`]. Returns the child's id for further configuration.
    ///
    /// # Errors
    ///
    /// [`WorldError::UnknownEntity`] when `parent` is not in the world.
    pub fn spawn_child(
        &mut self,
        parent: EntityId,
        name: impl Into<String>,
        kind: CollisionKind,
        params: SpawnParams,
    ) -> Result<EntityId, WorldError> {
        let parent = self
            .entities
            .get(&parent)
            .ok_or(WorldError::UnknownEntity(parent))?;

        let id = self.next_id; // allocated below, after the fallible lookup
        let mut child = Entity::new(EntityId::new(id), name, kind);
        child.inherit_from(parent, params);

        self.next_id += 1;
        Ok(self.insert_entity(child))
    }

    /// Removes an entity, releasing its registration exactly once.
    ///
    /// Returns the removed entity, if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        if let Some(registration) = self.registrations.remove(&id) {
            registration.release(&mut self.registry);
        }
        tracing::debug!(id = %id, name = %entity.name(), "despawned entity");
        Some(entity)
    }

    /// Removes every entity, releasing all registrations. The teardown
    /// path for ending a battle early.
    pub fn clear(&mut self) {
        for (_, registration) in std::mem::take(&mut self.registrations) {
            registration.release(&mut self.registry);
        }
        self.entities.clear();
    }

    /// Returns a reference to an entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns a mutable reference to an entity.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Entity ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// True when no entities are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The collision registry, for membership queries.
    #[must_use]
    pub fn registry(&self) -> &CollisionRegistry {
        &self.registry
    }

    /// Live registry membership for `id`. Delegates to the registry;
    /// never a cached flag.
    #[must_use]
    pub fn is_collidable(&self, id: EntityId) -> bool {
        self.registry.contains(id)
    }

    /// Advances the simulation by `dt` seconds. See the module docs for
    /// the phase order. Negative `dt` is clamped to zero.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        // Update in id order. Tracking targets resolve against the live
        // map at each entity's turn, so earlier movers are seen at their
        // new positions.
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        for id in ids {
            let Some(entity) = self.entities.get(&id) else {
                continue;
            };
            let tracking_pos = entity
                .tracking_target()
                .and_then(|target| self.entities.get(&target))
                .map(Entity::position);
            if let Some(entity) = self.entities.get_mut(&id) {
                entity.update(dt, tracking_pos);
            }
        }

        self.sync_footprints();
        self.dispatch_collisions();
    }

    /// Syncs every registered member's footprint from its entity.
    fn sync_footprints(&mut self) {
        for (id, entity) in &self.entities {
            self.registry.update_footprint(
                *id,
                entity.position(),
                footprint_radius(entity),
            );
        }
    }

    /// Sweeps the registry and calls `on_collision` on both members of
    /// every overlapping pair. Contacts are snapshotted before dispatch
    /// so both sides observe pre-callback state.
    fn dispatch_collisions(&mut self) {
        for (a, b) in self.registry.overlapping_pairs() {
            let (Some(contact_a), Some(contact_b)) = (self.contact(a), self.contact(b)) else {
                continue;
            };
            if let Some(entity) = self.entities.get_mut(&a) {
                entity.on_collision(&contact_b);
            }
            if let Some(entity) = self.entities.get_mut(&b) {
                entity.on_collision(&contact_a);
            }
        }
    }

    fn contact(&self, id: EntityId) -> Option<Contact> {
        self.entities.get(&id).map(|entity| Contact {
            id,
            kind: entity.collision_kind(),
            position: entity.position(),
        })
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert_entity(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        if entity.collision_kind() != CollisionKind::None {
            let registration = self.registry.register(id, entity.collision_kind());
            self.registrations.insert(id, registration);
            self.registry
                .update_footprint(id, entity.position(), footprint_radius(&entity));
        }
        tracing::debug!(
            id = %id,
            name = %entity.name(),
            kind = %entity.collision_kind(),
            "spawned entity"
        );
        self.entities.insert(id, entity);
        id
    }
}

/// Collision footprint radius: half the larger sprite extent.
fn footprint_radius(entity: &Entity) -> f32 {
    entity.transform.size.max_element() / 2.0
}
