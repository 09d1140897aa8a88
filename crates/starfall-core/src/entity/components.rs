//! Component state structs for entities.
//!
//! Each struct owns one slice of an entity's state:
//!
//! - [`TransformState`]: position, rotation, size, render depth
//! - [`KinematicState`]: speed and rotation speed with symmetric clamps
//! - [`CombatState`]: hit points and the one-way kill machine
//! - [`SteeringState`]: rotation controller mode and targets
//!
//! The clamp invariants live in the setters, never in the getters: an
//! out-of-range write stores the boundary value, and a later change to the
//! cap does not retroactively re-clamp stored state.

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::angle::Angle;

bitflags! {
    /// Boolean status markers for an entity.
    ///
    /// A closed flag set: `KILLED` is terminal and never cleared by this
    /// crate; `INVULNERABLE` is freely toggled and is *not* consulted by
    /// the damage machine; gating damage on it is the calling combat
    /// layer's responsibility.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct StatusFlags: u8 {
        /// Terminal state: the entity has been killed.
        const KILLED = 1 << 0;
        /// Marker consumed by external combat logic before applying damage.
        const INVULNERABLE = 1 << 1;
    }
}

/// Spatial placement of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// World position.
    pub position: Vec2,
    /// Current rotation. Grows unbounded under integration; never wrapped.
    pub rotation: Angle,
    /// Sprite extent, used for the collision footprint.
    pub size: Vec2,
    /// Render depth (z-order). Children spawn at `parent.depth - 1`.
    pub depth: i32,
}

impl TransformState {
    /// Creates a transform at the given position and rotation.
    #[must_use]
    pub fn at_position(position: Vec2, rotation: Angle) -> Self {
        Self {
            position,
            rotation,
            ..Self::default()
        }
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: Angle::ZERO,
            size: Vec2::ONE,
            depth: 0,
        }
    }
}

/// Linear and angular speed with symmetric caps.
///
/// `speed` and `rotation_speed` are private so that every write goes
/// through the clamping setters. The caps themselves are plain public
/// fields: raising or lowering a cap affects future writes only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    speed: f32,
    /// Symmetric cap for [`Self::set_speed`]. Defaults to `f32::MAX`.
    pub max_speed: f32,
    rotation_speed: Angle,
    /// Symmetric cap for [`Self::set_rotation_speed`]. Defaults to [`Angle::MAX`].
    pub max_rotation_speed: Angle,
}

impl KinematicState {
    /// Current speed, in world units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Sets the speed, clamped into `[-max_speed, max_speed]`.
    ///
    /// An out-of-range value stores the boundary, not the original.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(-self.max_speed, self.max_speed);
    }

    /// Current rotation speed, in degrees per second.
    #[must_use]
    pub const fn rotation_speed(&self) -> Angle {
        self.rotation_speed
    }

    /// Sets the rotation speed, clamped symmetrically against
    /// `max_rotation_speed`.
    pub fn set_rotation_speed(&mut self, rotation_speed: Angle) {
        self.rotation_speed = rotation_speed.clamp_symmetric(self.max_rotation_speed);
    }
}

impl Default for KinematicState {
    fn default() -> Self {
        Self {
            speed: 0.0,
            max_speed: f32::MAX,
            rotation_speed: Angle::ZERO,
            max_rotation_speed: Angle::MAX,
        }
    }
}

/// Hit points and the kill state machine.
///
/// Stored hp may go negative; the exposed value is floored at zero. The
/// `KILLED` flag is set the first time stored hp reaches zero or below and
/// is never cleared; later hp writes can raise the exposed value again
/// but cannot resurrect the entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    hp: f32,
    /// Upper bound applied to every hp write.
    pub max_hp: f32,
    /// Status markers. See [`StatusFlags`].
    pub flags: StatusFlags,
}

impl CombatState {
    /// Exposed hit points: `max(0, stored)`.
    #[must_use]
    pub fn hp(&self) -> f32 {
        self.hp.max(0.0)
    }

    /// Stores `min(hp, max_hp)`; transitions to killed when the stored
    /// value is zero or below.
    pub fn set_hp(&mut self, hp: f32) {
        self.hp = hp.min(self.max_hp);
        if self.hp <= 0.0 {
            self.kill(hp);
        }
    }

    /// Marks the entity killed. Idempotent; the triggering hp delta is
    /// accepted for diagnostics and otherwise unused.
    pub fn kill(&mut self, _dhp: f32) {
        self.flags.insert(StatusFlags::KILLED);
    }

    /// Whether the kill transition has happened.
    #[must_use]
    pub const fn is_killed(&self) -> bool {
        self.flags.contains(StatusFlags::KILLED)
    }

    /// Whether the invulnerability marker is set.
    #[must_use]
    pub const fn is_invulnerable(&self) -> bool {
        self.flags.contains(StatusFlags::INVULNERABLE)
    }

    /// Sets or clears the invulnerability marker. Independent of the kill
    /// machine in both directions.
    pub fn set_invulnerable(&mut self, invulnerable: bool) {
        self.flags.set(StatusFlags::INVULNERABLE, invulnerable);
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self {
            hp: 100.0,
            max_hp: 100.0,
            flags: StatusFlags::empty(),
        }
    }
}

/// Rotation controller configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SteeringState {
    /// Active controller mode.
    pub mode: super::RotationMode,
    /// Aim point for `TargetRotation`; recomputed each tick in `Tracking`.
    pub target: Angle,
    /// Tracked entity, held as a key and resolved against the live world
    /// each tick. A despawned target simply stops resolving.
    pub tracking: Option<super::EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod kinematic_tests {
        use super::*;

        #[test]
        fn default_caps_are_unlimited() {
            let k = KinematicState::default();
            assert_eq!(k.max_speed, f32::MAX);
            assert_eq!(k.max_rotation_speed, Angle::MAX);
        }

        #[test]
        fn set_speed_stores_boundary_when_out_of_range() {
            let mut k = KinematicState {
                max_speed: 10.0,
                ..KinematicState::default()
            };

            k.set_speed(25.0);
            assert_eq!(k.speed(), 10.0);

            k.set_speed(-25.0);
            assert_eq!(k.speed(), -10.0);

            k.set_speed(7.5);
            assert_eq!(k.speed(), 7.5);
        }

        #[test]
        fn set_rotation_speed_clamps_symmetrically() {
            let mut k = KinematicState {
                max_rotation_speed: Angle::from_degrees(90.0),
                ..KinematicState::default()
            };

            k.set_rotation_speed(Angle::from_degrees(400.0));
            assert_eq!(k.rotation_speed(), Angle::from_degrees(90.0));

            k.set_rotation_speed(Angle::from_degrees(-400.0));
            assert_eq!(k.rotation_speed(), Angle::from_degrees(-90.0));
        }

        #[test]
        fn raising_cap_does_not_reclamp_stored_value() {
            let mut k = KinematicState {
                max_speed: 10.0,
                ..KinematicState::default()
            };
            k.set_speed(10.0);

            // Enforcement happens on write, never on read.
            k.max_speed = 5.0;
            assert_eq!(k.speed(), 10.0);

            k.set_speed(k.speed());
            assert_eq!(k.speed(), 5.0);
        }

        proptest! {
            #[test]
            fn speed_always_within_cap(v in -1.0e9f32..1.0e9, cap in 0.0f32..1.0e6) {
                let mut k = KinematicState { max_speed: cap, ..KinematicState::default() };
                k.set_speed(v);
                prop_assert_eq!(k.speed(), v.clamp(-cap, cap));
            }

            #[test]
            fn rotation_speed_always_within_cap(v in -1.0e9f32..1.0e9, cap in 0.0f32..1.0e6) {
                let mut k = KinematicState {
                    max_rotation_speed: Angle::from_degrees(cap),
                    ..KinematicState::default()
                };
                k.set_rotation_speed(Angle::from_degrees(v));
                prop_assert!(k.rotation_speed() >= Angle::from_degrees(-cap));
                prop_assert!(k.rotation_speed() <= Angle::from_degrees(cap));
            }
        }
    }

    mod combat_tests {
        use super::*;

        #[test]
        fn hp_is_capped_at_max() {
            let mut c = CombatState::default();
            c.set_hp(250.0);
            assert_eq!(c.hp(), 100.0);
        }

        #[test]
        fn exposed_hp_never_negative() {
            let mut c = CombatState::default();
            c.set_hp(-40.0);
            assert_eq!(c.hp(), 0.0);
        }

        #[test]
        fn zero_hp_kills() {
            let mut c = CombatState::default();
            assert!(!c.is_killed());

            c.set_hp(0.0);
            assert!(c.is_killed());
        }

        #[test]
        fn kill_is_one_way() {
            let mut c = CombatState::default();
            c.set_hp(-5.0);
            assert!(c.is_killed());

            // A later heal raises exposed hp but never clears the flag.
            c.set_hp(80.0);
            assert_eq!(c.hp(), 80.0);
            assert!(c.is_killed());
        }

        #[test]
        fn kill_is_idempotent() {
            let mut c = CombatState::default();
            c.kill(0.0);
            c.kill(-10.0);
            assert!(c.is_killed());
            assert_eq!(c.flags, StatusFlags::KILLED);
        }

        #[test]
        fn invulnerability_toggles_independently() {
            let mut c = CombatState::default();
            c.set_invulnerable(true);
            assert!(c.is_invulnerable());

            c.set_invulnerable(false);
            assert!(!c.is_invulnerable());
        }

        #[test]
        fn invulnerability_does_not_gate_damage() {
            // The base machine applies damage regardless; gating belongs to
            // the caller.
            let mut c = CombatState::default();
            c.set_invulnerable(true);
            c.set_hp(-1.0);
            assert!(c.is_killed());
            assert!(c.is_invulnerable());
        }

        proptest! {
            #[test]
            fn hp_observes_clamp_window(v in -1.0e6f32..1.0e6) {
                let mut c = CombatState::default();
                c.set_hp(v);
                prop_assert_eq!(c.hp(), v.min(c.max_hp).max(0.0));
            }

            #[test]
            fn killed_iff_stored_at_or_below_zero(v in -1.0e6f32..1.0e6) {
                let mut c = CombatState::default();
                c.set_hp(v);
                prop_assert_eq!(c.is_killed(), v.min(c.max_hp) <= 0.0);
            }
        }
    }

    mod flags_tests {
        use super::*;

        #[test]
        fn default_is_empty() {
            assert_eq!(StatusFlags::default(), StatusFlags::empty());
        }

        #[test]
        fn serialization_roundtrip() {
            let flags = StatusFlags::KILLED | StatusFlags::INVULNERABLE;
            let json = serde_json::to_string(&flags).unwrap();
            let deserialized: StatusFlags = serde_json::from_str(&json).unwrap();
            assert_eq!(flags, deserialized);
        }
    }

    #[test]
    fn component_serialization_roundtrip() {
        let transform = TransformState::at_position(Vec2::new(3.0, 4.0), Angle::from_degrees(45.0));
        let json = serde_json::to_string(&transform).unwrap();
        let deserialized: TransformState = serde_json::from_str(&json).unwrap();
        assert_eq!(transform, deserialized);

        let combat = CombatState::default();
        let json = serde_json::to_string(&combat).unwrap();
        let deserialized: CombatState = serde_json::from_str(&json).unwrap();
        assert_eq!(combat, deserialized);
    }
}
