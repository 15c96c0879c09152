//! Vector Drift - an asteroids-style gamejam starter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (shapes, entities, fixed-timestep tick)
//! - `renderer`: WebGPU rendering (offscreen scene target + letterboxed blit)
//! - `platform`: Frame pacing helpers shared by the native and web drivers
//! - `settings`: Presentation preferences

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ScaleFilter, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Reference tick rate the per-frame tuning factors are normalized against
    pub const TICK_RATE: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical resolution; the offscreen scene target always matches this,
    /// window size only affects the final blit
    pub const SCREEN_WIDTH: u32 = 1280;
    pub const SCREEN_HEIGHT: u32 = 720;

    /// Asteroid pool size (the slot table never resizes)
    pub const MAX_ASTEROIDS: usize = 16;
    /// Slots filled at startup
    pub const START_ASTEROIDS: usize = 4;
    /// Circumradius of the octagon silhouette
    pub const ASTEROID_RADIUS: f32 = 50.0;
    pub const ASTEROID_SIDES: u32 = 8;
    /// Drift speed (pixels/sec; one pixel per frame at the reference rate)
    pub const ASTEROID_SPEED: f32 = 60.0;
    /// Spin magnitude cap (radians/sec)
    pub const ASTEROID_MAX_SPIN: f32 = 1.5;

    /// Thrust acceleration (pixels/sec²)
    pub const SHIP_THRUST: f32 = 360.0;
    /// Turn rate while a rotate key is held (radians/sec)
    pub const SHIP_TURN_RATE: f32 = 3.5;
    /// Velocity damping per frame at the reference rate
    pub const SHIP_DAMPING: f32 = 0.98;

    /// Camera smoothing factor per frame at the reference rate
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// Background dot grid spacing (pixels)
    pub const GRID_SPACING: f32 = 80.0;
}

/// Screen center in logical coordinates
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(
        consts::SCREEN_WIDTH as f32 / 2.0,
        consts::SCREEN_HEIGHT as f32 / 2.0,
    )
}

/// Rotate a vector by `angle` radians about the origin
#[inline]
pub fn rotate_vec2(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}
