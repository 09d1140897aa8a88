//! Entity types for the combat simulation.
//!
//! An [`Entity`] is a movable simulated object (ship, missile, debris)
//! owned by a [`World`](crate::world::World). It combines:
//!
//! - a [`TransformState`] (position, rotation, size, depth)
//! - a [`KinematicState`] (speed and rotation speed with symmetric clamps)
//! - a [`CombatState`] (hit points, one-way kill machine)
//! - a [`SteeringState`] (rotation controller mode and targets)
//!
//! plus an identity ([`EntityId`], name, allegiance) and a
//! [`CollisionKind`] that determines registry membership.
//!
//! # Tick contract
//!
//! [`Entity::update`] performs exactly one frame of steering and motion.
//! The step order is normative: the rotation controller runs against the
//! rotation read at tick start, then displacement integrates with that
//! same rotation before the new rotation speed is applied.
//!
//! # Example
//!
//! ```
//! use starfall_core::{CollisionKind, Entity, EntityId, RotationMode};
//!
//! let mut missile = Entity::new(EntityId::new(7), "missile", CollisionKind::Projectile);
//! missile.set_speed(120.0);
//! missile.set_rotation_mode(RotationMode::Tracking);
//! missile.set_tracking_target(Some(EntityId::new(1)));
//!
//! assert_eq!(missile.speed(), 120.0);
//! assert!(!missile.is_killed());
//! ```

pub mod components;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::registry::CollisionRegistry;

pub use components::{CombatState, KinematicState, StatusFlags, SteeringState, TransformState};

/// Unique identifier for an entity.
///
/// A newtype over `u64`. IDs are assigned monotonically by the owning
/// world and ordered numerically, which keeps iteration and collision
/// sweep order deterministic.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an `EntityId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Rotation controller mode.
///
/// - `Manual`: rotation speed is whatever external code last set
/// - `TargetRotation`: rotation speed is driven toward a fixed target angle
/// - `Tracking`: the target angle is recomputed each tick from another
///   entity's position
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationMode {
    /// No automatic rotation changes.
    #[default]
    Manual,
    /// Converge on the stored target angle.
    TargetRotation,
    /// Continuously re-aim at a tracked entity.
    Tracking,
}

/// Collision taxonomy owned by the registry.
///
/// `None` entities never register; `Projectile` entities die on any
/// overlap. The remaining kinds carry no base-policy reaction; layered
/// game logic decides what a ship/debris contact means.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Not collidable; never enters the registry.
    #[default]
    None,
    /// A vessel. No automatic contact reaction.
    Ship,
    /// An in-flight weapon; destroyed by any contact.
    Projectile,
    /// Drifting wreckage. No automatic contact reaction.
    Debris,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Ship => write!(f, "Ship"),
            Self::Projectile => write!(f, "Projectile"),
            Self::Debris => write!(f, "Debris"),
        }
    }
}

/// Snapshot of the other party in a collision, passed to
/// [`Entity::on_collision`].
///
/// The base policy ignores it; it exists for layered combat logic
/// (damage transfer, friendly-fire checks via a world lookup by `id`).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// The other entity.
    pub id: EntityId,
    /// The other entity's collision kind.
    pub kind: CollisionKind,
    /// The other entity's position at sweep time.
    pub position: Vec2,
}

/// Parameters for child spawning. See [`Entity::inherit_from`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Size assigned to the child.
    pub size: Vec2,
    /// Base speed for the child.
    pub speed: f32,
    /// When true, the parent's current speed is added to `speed`.
    pub inherit_speed: bool,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            size: Vec2::ONE,
            speed: 0.0,
            inherit_speed: true,
        }
    }
}

/// A movable simulated object with kinematic, damage, and collision state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    name: String,
    allegiance: String,
    /// Spatial placement.
    pub transform: TransformState,
    /// Speed state with clamped setters.
    pub kinematics: KinematicState,
    /// Hit points and status flags.
    pub combat: CombatState,
    /// Rotation controller configuration.
    pub steering: SteeringState,
    collision_kind: CollisionKind,
}

impl Entity {
    /// Creates an entity with default state.
    ///
    /// Defaults: origin transform, `Manual` steering, zero speed with
    /// unlimited caps, 100/100 hp, empty allegiance.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>, collision_kind: CollisionKind) -> Self {
        Self {
            id,
            name: name.into(),
            allegiance: String::new(),
            transform: TransformState::default(),
            kinematics: KinematicState::default(),
            combat: CombatState::default(),
            steering: SteeringState::default(),
            collision_kind,
        }
    }

    /// The entity's unique identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's display name, used as the allegiance label for its
    /// children.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the entity.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The allegiance label. External combat logic uses it to tell friend
    /// from foe; this core only stores and propagates it.
    #[must_use]
    pub fn allegiance(&self) -> &str {
        &self.allegiance
    }

    /// Sets the allegiance label.
    pub fn set_allegiance(&mut self, allegiance: impl Into<String>) {
        self.allegiance = allegiance.into();
    }

    /// The collision taxonomy kind given at construction.
    #[must_use]
    pub const fn collision_kind(&self) -> CollisionKind {
        self.collision_kind
    }

    /// Changes the collision kind.
    ///
    /// Registry membership is established at spawn and is NOT reconciled
    /// here: mutating the kind on a live entity without re-registering is
    /// a precondition violation. [`Self::is_collidable`] will keep
    /// reporting the registry's actual state.
    pub fn set_collision_kind(&mut self, kind: CollisionKind) {
        self.collision_kind = kind;
    }

    // -------------------------------------------------------------------------
    // Transform accessors
    // -------------------------------------------------------------------------

    /// World position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.transform.position
    }

    /// Moves the entity.
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.position = position;
    }

    /// Current rotation. Unwrapped; may exceed a full turn.
    #[must_use]
    pub const fn rotation(&self) -> Angle {
        self.transform.rotation
    }

    /// Sets the rotation.
    pub fn set_rotation(&mut self, rotation: Angle) {
        self.transform.rotation = rotation;
    }

    // -------------------------------------------------------------------------
    // Kinematics
    // -------------------------------------------------------------------------

    /// Current speed.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.kinematics.speed()
    }

    /// Sets the speed, clamped into `[-max_speed, max_speed]`.
    pub fn set_speed(&mut self, speed: f32) {
        self.kinematics.set_speed(speed);
    }

    /// Current rotation speed.
    #[must_use]
    pub const fn rotation_speed(&self) -> Angle {
        self.kinematics.rotation_speed()
    }

    /// Sets the rotation speed, clamped against `max_rotation_speed`.
    pub fn set_rotation_speed(&mut self, rotation_speed: Angle) {
        self.kinematics.set_rotation_speed(rotation_speed);
    }

    // -------------------------------------------------------------------------
    // Steering
    // -------------------------------------------------------------------------

    /// Active rotation controller mode.
    #[must_use]
    pub const fn rotation_mode(&self) -> RotationMode {
        self.steering.mode
    }

    /// Switches the rotation controller mode.
    pub fn set_rotation_mode(&mut self, mode: RotationMode) {
        self.steering.mode = mode;
    }

    /// The rotation target driving `TargetRotation` and `Tracking`.
    #[must_use]
    pub const fn rotation_target(&self) -> Angle {
        self.steering.target
    }

    /// Sets the rotation target.
    pub fn set_rotation_target(&mut self, target: Angle) {
        self.steering.target = target;
    }

    /// The tracked entity key, if any.
    #[must_use]
    pub const fn tracking_target(&self) -> Option<EntityId> {
        self.steering.tracking
    }

    /// Sets or clears the tracked entity key. The key is resolved against
    /// the live world each tick; a despawned target resolves to nothing.
    pub fn set_tracking_target(&mut self, target: Option<EntityId>) {
        self.steering.tracking = target;
    }

    // -------------------------------------------------------------------------
    // Damage / lifecycle
    // -------------------------------------------------------------------------

    /// Exposed hit points, floored at zero.
    #[must_use]
    pub fn hp(&self) -> f32 {
        self.combat.hp()
    }

    /// Writes hit points (capped at `max_hp`); drives the kill transition
    /// when the stored value reaches zero or below.
    pub fn set_hp(&mut self, hp: f32) {
        let was_killed = self.combat.is_killed();
        self.combat.set_hp(hp);
        if !was_killed && self.combat.is_killed() {
            tracing::debug!(id = %self.id, name = %self.name, hp, "entity killed");
        }
    }

    /// Marks the entity killed. Idempotent.
    pub fn kill(&mut self, dhp: f32) {
        if !self.combat.is_killed() {
            tracing::debug!(id = %self.id, name = %self.name, dhp, "entity killed");
        }
        self.combat.kill(dhp);
    }

    /// Whether the entity has been killed.
    #[must_use]
    pub const fn is_killed(&self) -> bool {
        self.combat.is_killed()
    }

    /// Whether the invulnerability marker is set.
    #[must_use]
    pub const fn is_invulnerable(&self) -> bool {
        self.combat.is_invulnerable()
    }

    /// Toggles the invulnerability marker. Does not gate [`Self::set_hp`].
    pub fn set_invulnerable(&mut self, invulnerable: bool) {
        self.combat.set_invulnerable(invulnerable);
    }

    // -------------------------------------------------------------------------
    // Per-tick update
    // -------------------------------------------------------------------------

    /// Advances the entity by one tick.
    ///
    /// `tracking_pos` is the resolved position of the tracking target, or
    /// `None` when no target is set or the target has despawned; callers
    /// going through [`World::tick`](crate::world::World::tick) never pass
    /// it by hand.
    ///
    /// Step order is normative:
    ///
    /// 1. read the current rotation;
    /// 2. run the rotation controller against that rotation;
    /// 3. integrate displacement `(speed·dt·sin(rot), speed·dt·cos(rot))`
    ///    using that same rotation, then add `rotation_speed·dt` to the
    ///    rotation.
    ///
    /// Position and rotation are never clamped or wrapped here. `dt` is
    /// trusted; the world boundary applies the negative-`dt` policy.
    pub fn update(&mut self, dt: f32, tracking_pos: Option<Vec2>) {
        let rotation = self.transform.rotation;

        if self.steering.mode == RotationMode::Tracking {
            if let Some(target_pos) = tracking_pos {
                let bearing = Angle::bearing_between(self.transform.position, target_pos);
                // Aim half a turn off the raw bearing; of the two unwrapped
                // candidates, take the one nearer the current rotation
                // (strict comparison: a tie picks the low candidate).
                let high = bearing + Angle::HALF_TURN;
                let low = bearing - Angle::HALF_TURN;
                self.steering.target = if (rotation - high).abs() < (rotation - low).abs() {
                    high
                } else {
                    low
                };
            }
        }
        if matches!(
            self.steering.mode,
            RotationMode::TargetRotation | RotationMode::Tracking
        ) {
            self.kinematics
                .set_rotation_speed(self.steering.target - rotation);
        }

        let effective_speed = self.kinematics.speed() * dt;
        let dx = effective_speed * rotation.sin();
        let dy = effective_speed * rotation.cos();
        let effective_rotation_speed = self.kinematics.rotation_speed() * dt;
        self.transform.position += Vec2::new(dx, dy);
        self.transform.rotation += effective_rotation_speed;
    }

    // -------------------------------------------------------------------------
    // Collision
    // -------------------------------------------------------------------------

    /// Reaction to an overlap reported by the registry sweep.
    ///
    /// Base policy: a `Projectile` dies on any contact (`set_hp(0)`).
    /// Every other kind takes no automatic action; damage transfer and
    /// friendly-fire rules are layered on by the calling game logic.
    pub fn on_collision(&mut self, _other: &Contact) {
        if self.collision_kind == CollisionKind::Projectile {
            self.set_hp(0.0);
        }
    }

    /// Live registry membership query. Never cached.
    #[must_use]
    pub fn is_collidable(&self, registry: &CollisionRegistry) -> bool {
        registry.contains(self.id)
    }

    // -------------------------------------------------------------------------
    // Spawn inheritance
    // -------------------------------------------------------------------------

    /// Applies parent-to-child attribute inheritance onto `self`.
    ///
    /// Sets allegiance to the parent's name, copies the parent's position
    /// and rotation, assigns `params.size`, sets speed to
    /// `params.speed + parent.speed` when inheriting (clamped by the
    /// speed setter), and renders one depth layer behind the parent.
    ///
    /// This is the keep-the-child path; use
    /// [`World::spawn_child`](crate::world::World::spawn_child) to insert
    /// the child into the simulation in the same motion.
    pub fn inherit_from(&mut self, parent: &Entity, params: SpawnParams) {
        self.allegiance = parent.name.clone();
        self.transform.position = parent.transform.position;
        self.transform.rotation = parent.transform.rotation;
        self.transform.size = params.size;
        let speed = if params.inherit_speed {
            params.speed + parent.kinematics.speed()
        } else {
            params.speed
        };
        self.kinematics.set_speed(speed);
        self.transform.depth = parent.transform.depth - 1;
    }
}
