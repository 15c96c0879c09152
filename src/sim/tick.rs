//! Fixed timestep simulation tick
//!
//! Advances the game state deterministically. All rate-based changes scale
//! with the elapsed-time parameter, so simulation behavior does not depend
//! on the display refresh rate.

use glam::Vec2;

use super::state::{AsteroidSlot, GameState};
use crate::consts::*;
use crate::rotate_vec2;

/// Held-key input sampled once per frame (not edge-triggered; a held key
/// applies every tick).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Advance the game state by `dt` seconds.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    update_player(state, input, dt);
    update_asteroids(state, dt);
    update_camera(state, dt);
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;

    // Screen coordinates are y-down, so a negative angle turns the nose left
    if input.turn_left {
        player.heading -= SHIP_TURN_RATE * dt;
    }
    if input.turn_right {
        player.heading += SHIP_TURN_RATE * dt;
    }
    if input.thrust {
        // Thrust along the nose (local -y), rotated by the current heading
        player.acc += rotate_vec2(Vec2::new(0.0, -SHIP_THRUST), player.heading);
    }

    player.vel += player.acc * dt;
    // 0.98 per frame at the reference rate, normalized so damping strength
    // is independent of the tick length
    player.vel *= SHIP_DAMPING.powf(dt * TICK_RATE);
    player.pos += player.vel * dt;
    player.acc = Vec2::ZERO;
}

fn update_asteroids(state: &mut GameState, dt: f32) {
    for slot in &mut state.asteroids {
        if let AsteroidSlot::Active(asteroid) = slot {
            asteroid.pos += asteroid.vel * dt;
            asteroid.heading += asteroid.spin * dt;
        }
    }
}

fn update_camera(state: &mut GameState, dt: f32) {
    // Exponential smoothing toward the player, 0.1 per frame at the
    // reference rate
    let t = 1.0 - (1.0 - CAMERA_SMOOTHING).powf(dt * TICK_RATE);
    let camera = &mut state.camera;
    camera.target += (state.player.pos - camera.target) * t;
}

/// Fixed-timestep accumulator shared by the native loop and the web
/// animation-frame callback: both feed wall-clock frame deltas through
/// `advance`, which runs whole `SIM_DT` ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `frame_dt` seconds of wall time. Runs at most `MAX_SUBSTEPS`
    /// ticks and returns how many ran.
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.min(0.1);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen_center;
    use proptest::prelude::*;

    #[test]
    fn test_asteroid_position_is_linear() {
        let mut state = GameState::new(12345);
        let before: Vec<(Vec2, Vec2)> = state
            .active_asteroids()
            .map(|a| (a.pos, a.vel))
            .collect();

        tick(&mut state, &TickInput::default(), SIM_DT);

        for ((pos, vel), asteroid) in before.iter().zip(state.active_asteroids()) {
            let expected = *pos + *vel * SIM_DT;
            assert!((asteroid.pos - expected).length() < 1e-4);
            // Velocity itself never changes
            assert_eq!(asteroid.vel, *vel);
        }
    }

    #[test]
    fn test_zero_spin_keeps_heading() {
        let mut state = GameState::new(42);
        for slot in &mut state.asteroids {
            if let AsteroidSlot::Active(asteroid) = slot {
                asteroid.spin = 0.0;
            }
        }
        let headings: Vec<f32> = state.active_asteroids().map(|a| a.heading).collect();

        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        for (initial, asteroid) in headings.iter().zip(state.active_asteroids()) {
            assert_eq!(asteroid.heading, *initial);
        }
    }

    #[test]
    fn test_spin_negation_reverses_heading() {
        let mut state = GameState::new(42);
        let initial: Vec<f32> = state.active_asteroids().map(|a| a.heading).collect();

        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        for slot in &mut state.asteroids {
            if let AsteroidSlot::Active(asteroid) = slot {
                asteroid.spin = -asteroid.spin;
            }
        }
        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        for (start, asteroid) in initial.iter().zip(state.active_asteroids()) {
            assert!((asteroid.heading - start).abs() < 1e-3);
        }
    }

    #[test]
    fn test_damping_keeps_zero_velocity_zero() {
        let mut state = GameState::new(1);
        for _ in 0..1000 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.pos, screen_center());
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut state = GameState::new(1);
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        // Heading 0 points up (-y); x stays untouched
        assert!(state.player.vel.y < 0.0);
        assert!(state.player.vel.x.abs() < 1e-4);
        assert!(state.player.pos.y < screen_center().y);
        // The accumulator is cleared after integration
        assert_eq!(state.player.acc, Vec2::ZERO);
    }

    #[test]
    fn test_turn_keys_adjust_heading() {
        let mut state = GameState::new(1);
        let left = TickInput {
            turn_left: true,
            ..Default::default()
        };
        tick(&mut state, &left, SIM_DT);
        assert!((state.player.heading + SHIP_TURN_RATE * SIM_DT).abs() < 1e-5);

        let right = TickInput {
            turn_right: true,
            ..Default::default()
        };
        tick(&mut state, &right, SIM_DT);
        assert!(state.player.heading.abs() < 1e-5);
    }

    #[test]
    fn test_inactive_slots_untouched() {
        let mut state = GameState::new(5);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        for slot in &state.asteroids[START_ASTEROIDS..] {
            assert_eq!(*slot, AsteroidSlot::Inactive);
        }
    }

    #[test]
    fn test_camera_tracks_player() {
        let mut state = GameState::new(1);
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, SIM_DT);
        }
        let gap = (state.player.pos - state.camera.target).length();
        // Once the ship is moving, keep ticking without thrust: the camera
        // keeps closing the remaining distance
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let settled = (state.player.pos - state.camera.target).length();
        assert!(settled < gap);
        // Offset, rotation and zoom are never modified by the tick
        assert_eq!(state.camera.offset, screen_center());
        assert_eq!(state.camera.rotation, 0.0);
        assert_eq!(state.camera.zoom, 1.0);
    }

    #[test]
    fn test_end_to_end_first_step() {
        let state = GameState::new(777);
        let velocities: Vec<Vec2> = state.active_asteroids().map(|a| a.vel).collect();
        assert_eq!(velocities.len(), START_ASTEROIDS);

        let mut stepped = state.clone();
        tick(&mut stepped, &TickInput::default(), SIM_DT);

        for (vel, asteroid) in velocities.iter().zip(stepped.active_asteroids()) {
            let expected = screen_center() + *vel * SIM_DT;
            assert!((asteroid.pos - expected).length() < 1e-4);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let inputs = [
            TickInput {
                thrust: true,
                ..Default::default()
            },
            TickInput {
                turn_left: true,
                thrust: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                turn_right: true,
                ..Default::default()
            },
        ];

        for input in &inputs {
            for _ in 0..25 {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_frame_clock_substeps() {
        let mut clock = FrameClock::new();
        let mut state = GameState::new(3);
        let input = TickInput::default();

        // Half a tick of wall time: nothing runs yet
        assert_eq!(clock.advance(&mut state, &input, SIM_DT / 2.0), 0);
        // The other half completes one tick
        assert_eq!(clock.advance(&mut state, &input, SIM_DT / 2.0), 1);
        // A long stall is capped at MAX_SUBSTEPS
        assert_eq!(clock.advance(&mut state, &input, 10.0), MAX_SUBSTEPS);
    }

    proptest! {
        #[test]
        fn damping_never_increases_speed(vx in -500.0f32..500.0, vy in -500.0f32..500.0) {
            let mut state = GameState::new(0);
            state.player.vel = Vec2::new(vx, vy);
            let before = state.player.vel.length();
            tick(&mut state, &TickInput::default(), SIM_DT);
            prop_assert!(state.player.vel.length() <= before + 1e-4);
        }

        #[test]
        fn heading_reversible_for_any_step_count(steps in 1usize..200) {
            let mut state = GameState::new(11);
            let initial: Vec<f32> = state.active_asteroids().map(|a| a.heading).collect();

            for _ in 0..steps {
                tick(&mut state, &TickInput::default(), SIM_DT);
            }
            for slot in &mut state.asteroids {
                if let AsteroidSlot::Active(asteroid) = slot {
                    asteroid.spin = -asteroid.spin;
                }
            }
            for _ in 0..steps {
                tick(&mut state, &TickInput::default(), SIM_DT);
            }

            for (start, asteroid) in initial.iter().zip(state.active_asteroids()) {
                prop_assert!((asteroid.heading - start).abs() < 1e-2);
            }
        }
    }
}
