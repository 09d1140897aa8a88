//! Collision registry: membership, footprints, and the overlap sweep.
//!
//! The registry answers one question ("which registered entities overlap
//! right now?") and tracks membership as a scoped resource:
//!
//! - [`CollisionRegistry::register`] returns a [`Registration`] handle;
//! - the owning container holds the handle and calls
//!   [`Registration::release`] exactly once when the entity leaves the
//!   simulation;
//! - a handle dropped without release logs a warning; release is always
//!   explicit and never relies on drop order.
//!
//! # Footprint synchronization
//!
//! Footprints are NOT automatically synchronized when entities move. After
//! integrating positions, the owner must call
//! [`CollisionRegistry::update_footprint`] for each member before sweeping.
//! This keeps the sweep a pure read and allows batch updates.
//!
//! # Broad phase
//!
//! The sweep is a deliberately simple reference implementation: a full
//! pairwise scan with circle overlap over each member's footprint. Pairs
//! come back ordered `(low id, high id)` and sorted, so dispatch order is
//! deterministic. A production build would swap in a spatial hash or
//! quadtree behind the same contract.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{CollisionKind, EntityId};

/// A registered member's collision footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Collision taxonomy kind recorded at registration.
    pub kind: CollisionKind,
    /// Footprint center, synced by the owner after integration.
    pub center: Vec2,
    /// Footprint radius (half the larger sprite extent).
    pub radius: f32,
}

/// Scoped membership handle returned by [`CollisionRegistry::register`].
///
/// Consuming [`Registration::release`] removes the membership; because it
/// takes `self`, a double release does not compile. The owning container
/// is expected to hold the handle alongside the entity and release it on
/// every despawn path.
#[derive(Debug)]
#[must_use = "hold the registration and release it when the entity despawns"]
pub struct Registration {
    id: EntityId,
    released: bool,
}

impl Registration {
    /// The registered entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Removes the membership from `registry`. Consumes the handle.
    pub fn release(mut self, registry: &mut CollisionRegistry) {
        registry.members.remove(&self.id);
        self.released = true;
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!(
                id = %self.id,
                "registration dropped without release; stale registry entry"
            );
        }
    }
}

/// Broad-phase collision membership service.
///
/// Membership is keyed by [`EntityId`] in a `BTreeMap`: sweep order feeds
/// back into simulation state (collision callbacks mutate entities), so
/// iteration must be deterministic.
///
/// # Example
///
/// ```
/// use starfall_core::{CollisionKind, CollisionRegistry, EntityId};
/// use glam::Vec2;
///
/// let mut registry = CollisionRegistry::new();
/// let id = EntityId::new(1);
/// let registration = registry.register(id, CollisionKind::Ship);
///
/// registry.update_footprint(id, Vec2::ZERO, 4.0);
/// assert!(registry.contains(id));
///
/// registration.release(&mut registry);
/// assert!(!registry.contains(id));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionRegistry {
    members: BTreeMap<EntityId, Member>,
}

impl CollisionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
        }
    }

    /// Adds a member and returns its scoped handle.
    ///
    /// The footprint starts at the origin with zero radius until the first
    /// [`Self::update_footprint`]. Registering an id twice is a caller
    /// error (construct-once/destroy-once precondition); the later write
    /// wins and the earlier handle will remove the later membership.
    pub fn register(&mut self, id: EntityId, kind: CollisionKind) -> Registration {
        self.members.insert(
            id,
            Member {
                kind,
                center: Vec2::ZERO,
                radius: 0.0,
            },
        );
        Registration {
            id,
            released: false,
        }
    }

    /// Live membership query.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains_key(&id)
    }

    /// Returns a member's recorded footprint, if registered.
    #[must_use]
    pub fn member(&self, id: EntityId) -> Option<&Member> {
        self.members.get(&id)
    }

    /// Syncs a member's footprint after its position changed.
    ///
    /// Returns true if the member was found and updated. No-op for
    /// unregistered ids.
    pub fn update_footprint(&mut self, id: EntityId, center: Vec2, radius: f32) -> bool {
        match self.members.get_mut(&id) {
            Some(member) => {
                member.center = center;
                member.radius = radius;
                true
            }
            None => false,
        }
    }

    /// All overlapping member pairs, each ordered `(low, high)` and the
    /// whole list ascending.
    ///
    /// Overlap is circle-vs-circle on recorded footprints, boundary
    /// inclusive.
    #[must_use]
    pub fn overlapping_pairs(&self) -> Vec<(EntityId, EntityId)> {
        let mut pairs = Vec::new();
        for (&a, member_a) in &self.members {
            for (&b, member_b) in self.members.range(a..).skip(1) {
                let reach = member_a.radius + member_b.radius;
                if member_a.center.distance_squared(member_b.center) <= reach * reach {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    /// Number of registered members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
