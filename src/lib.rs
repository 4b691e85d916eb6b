#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Decorative page effects compiled to WebAssembly: a layered SVG wave
//! backdrop, a per-section canvas grid, scroll-driven section and nav
//! activation, lazy image placeholders, and a Three.js model viewer.
//!
//! The modules at the crate root are host-independent and unit-tested on
//! the host. Browser wiring lives in `wasm` and is compiled only for
//! `wasm32`.

pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod images;
pub mod interact;
pub mod prng;
pub mod scroll;
pub mod throttle;
pub mod viewer;
pub mod wave;

pub use config::EffectsConfig;
pub use error::{ConfigError, EffectError};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;
