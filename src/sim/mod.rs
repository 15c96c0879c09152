//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod shape;
pub mod state;
pub mod tick;

pub use shape::{Segment, Shape};
pub use state::{Asteroid, AsteroidSlot, Camera, GameState, Player, SHIP_OUTLINE};
pub use tick::{FrameClock, TickInput, tick};
