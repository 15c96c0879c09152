//! Game state and entity types
//!
//! The whole simulation lives in one `GameState` value owned by the frame
//! driver and passed explicitly into update and draw. Entity shapes are
//! constructed at spawn and never mutated; per-tick integration only touches
//! position, velocity and heading.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::shape::Shape;
use crate::consts::*;
use crate::{rotate_vec2, screen_center};

/// Local-space outline of the player ship (nose up, origin at the hull notch)
pub const SHIP_OUTLINE: [Vec2; 4] = [
    Vec2::new(0.0, -30.0),
    Vec2::new(-15.0, 15.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(15.0, 15.0),
];

/// The player ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Per-tick thrust accumulator, reset to zero after integration
    pub acc: Vec2,
    /// Rotation applied to the shape before translation (radians)
    pub heading: f32,
    pub shape: Shape,
}

impl Player {
    fn new() -> Self {
        Self {
            pos: screen_center(),
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            heading: 0.0,
            shape: Shape::closed_polygon(&SHIP_OUTLINE),
        }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f32,
    /// Angular rate (radians/sec)
    pub spin: f32,
    pub shape: Shape,
}

/// One entry in the fixed asteroid table. Inactive slots hold no data and
/// are skipped by both update and draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AsteroidSlot {
    #[default]
    Inactive,
    Active(Asteroid),
}

impl AsteroidSlot {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, AsteroidSlot::Active(_))
    }

    pub fn as_active(&self) -> Option<&Asteroid> {
        match self {
            AsteroidSlot::Active(asteroid) => Some(asteroid),
            AsteroidSlot::Inactive => None,
        }
    }
}

/// 2D camera tracking the player. `rotation` and `zoom` are carried through
/// to the scene pass but stay at their defaults in this template.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World point shown at `offset`
    pub target: Vec2,
    /// Screen-space anchor for `target` (the screen center)
    pub offset: Vec2,
    pub rotation: f32,
    pub zoom: f32,
}

impl Camera {
    fn new(target: Vec2) -> Self {
        Self {
            target,
            offset: screen_center(),
            rotation: 0.0,
            zoom: 1.0,
        }
    }
}

/// Complete game state (deterministic for a given seed)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    pub asteroids: [AsteroidSlot; MAX_ASTEROIDS],
    pub camera: Camera,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed: player and camera at
    /// screen center, the first `START_ASTEROIDS` slots spawned.
    pub fn new(seed: u64) -> Self {
        let player = Player::new();
        let camera = Camera::new(player.pos);
        let mut state = Self {
            seed,
            player,
            asteroids: std::array::from_fn(|_| AsteroidSlot::Inactive),
            camera,
            rng: Pcg32::seed_from_u64(seed),
        };
        for _ in 0..START_ASTEROIDS {
            state.spawn_asteroid(screen_center());
        }
        state
    }

    /// Spawn an asteroid into the first inactive slot with randomized drift
    /// direction, heading and spin. Returns the slot index, or `None` when
    /// the table is full.
    pub fn spawn_asteroid(&mut self, pos: Vec2) -> Option<usize> {
        let index = self.asteroids.iter().position(|slot| !slot.is_active())?;
        let direction = self.rng.random_range(0.0..TAU);
        let asteroid = Asteroid {
            pos,
            vel: rotate_vec2(Vec2::new(0.0, -1.0), direction) * ASTEROID_SPEED,
            heading: self.rng.random_range(0.0..TAU),
            spin: self.rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN),
            shape: Shape::regular_polygon(ASTEROID_SIDES, ASTEROID_RADIUS),
        };
        self.asteroids[index] = AsteroidSlot::Active(asteroid);
        Some(index)
    }

    /// Deactivate a slot, returning the asteroid if it was active.
    pub fn despawn_asteroid(&mut self, index: usize) -> Option<Asteroid> {
        match self.asteroids.get_mut(index).map(std::mem::take)? {
            AsteroidSlot::Active(asteroid) => Some(asteroid),
            AsteroidSlot::Inactive => None,
        }
    }

    /// Iterate active asteroids in slot order
    pub fn active_asteroids(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter().filter_map(AsteroidSlot::as_active)
    }

    pub fn active_count(&self) -> usize {
        self.asteroids.iter().filter(|slot| slot.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = GameState::new(12345);
        assert_eq!(state.player.pos, screen_center());
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.acc, Vec2::ZERO);
        assert_eq!(state.player.heading, 0.0);
        assert_eq!(state.player.shape.len(), 4);

        assert_eq!(state.camera.target, screen_center());
        assert_eq!(state.camera.rotation, 0.0);
        assert_eq!(state.camera.zoom, 1.0);

        assert_eq!(state.active_count(), START_ASTEROIDS);
        // The first slots are active, the rest untouched
        for (i, slot) in state.asteroids.iter().enumerate() {
            assert_eq!(slot.is_active(), i < START_ASTEROIDS);
        }
        for asteroid in state.active_asteroids() {
            assert_eq!(asteroid.pos, screen_center());
            assert!((asteroid.vel.length() - ASTEROID_SPEED).abs() < 1e-3);
            assert!(asteroid.spin.abs() <= ASTEROID_MAX_SPIN);
            assert_eq!(asteroid.shape.len(), ASTEROID_SIDES as usize);
        }
    }

    #[test]
    fn test_spawn_fills_table_then_fails() {
        let mut state = GameState::new(1);
        for _ in START_ASTEROIDS..MAX_ASTEROIDS {
            assert!(state.spawn_asteroid(Vec2::ZERO).is_some());
        }
        assert_eq!(state.active_count(), MAX_ASTEROIDS);
        assert_eq!(state.spawn_asteroid(Vec2::ZERO), None);
    }

    #[test]
    fn test_despawn_frees_slot() {
        let mut state = GameState::new(7);
        assert!(state.despawn_asteroid(0).is_some());
        assert!(!state.asteroids[0].is_active());
        assert_eq!(state.despawn_asteroid(0), None);
        assert_eq!(state.active_count(), START_ASTEROIDS - 1);

        // The freed slot is reused first
        assert_eq!(state.spawn_asteroid(Vec2::ZERO), Some(0));
    }

    #[test]
    fn test_same_seed_same_state() {
        let a = GameState::new(99999);
        let b = GameState::new(99999);
        assert_eq!(a, b);

        let c = GameState::new(1);
        assert_ne!(a, c);
    }
}
