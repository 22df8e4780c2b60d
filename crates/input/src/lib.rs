//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! and mouse events into [`InputCommand`]s and provides the [`GravityClock`]
//! that paces gravity ticks from elapsed wall time.

pub mod map;
pub mod tick;

pub use blockfall_types as types;

pub use map::{map_key, map_mouse, should_quit, InputCommand};
pub use tick::GravityClock;
