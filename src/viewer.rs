//! Host-independent half of the 3D model viewer: camera and light rig
//! parameters, and the per-frame step.

use serde::{Deserialize, Serialize};
use web_time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpec {
    pub name: &'static str,
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f64,
    pub position: Option<[f64; 3]>,
    pub cast_shadow: bool,
}

/// Ambient, key, fill and rim lights. Fixed for the page's lifetime.
pub const LIGHT_RIG: [LightSpec; 4] = [
    LightSpec {
        name: "ambient",
        kind: LightKind::Ambient,
        color: 0x404040,
        intensity: 0.3,
        position: None,
        cast_shadow: false,
    },
    LightSpec {
        name: "key",
        kind: LightKind::Directional,
        color: 0xC8B78A,
        intensity: 1.0,
        position: Some([5.0, 5.0, 5.0]),
        cast_shadow: true,
    },
    LightSpec {
        name: "fill",
        kind: LightKind::Directional,
        color: 0x8A7A5C,
        intensity: 0.5,
        position: Some([-5.0, -5.0, -5.0]),
        cast_shadow: false,
    },
    LightSpec {
        name: "rim",
        kind: LightKind::Directional,
        color: 0xD9C89E,
        intensity: 0.3,
        position: Some([0.0, 0.0, 5.0]),
        cast_shadow: false,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    pub enabled: bool,
    pub model_url: String,
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    pub camera_z: f64,
    /// Radians added to the model's x/y rotation each frame.
    pub spin: [f64; 2],
    pub z_index: i32,
    pub shadow_map_size: u32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            model_url: "cube.glb".to_string(),
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 5.0,
            spin: [0.002, 0.003],
            z_index: -2,
            shadow_map_size: 2048,
        }
    }
}

/// What the host should apply this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Rotation increments for the model, once one is loaded.
    pub spin: Option<[f64; 2]>,
    /// Seconds to advance the animation mixer by, if clips are playing.
    pub mixer_delta: Option<f64>,
}

#[derive(Debug)]
pub struct ViewerState {
    spin: [f64; 2],
    model_loaded: bool,
    has_clips: bool,
    last_frame: Option<Instant>,
}

impl ViewerState {
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            spin: options.spin,
            model_loaded: false,
            has_clips: false,
            last_frame: None,
        }
    }

    pub fn model_loaded(&mut self, clip_count: u32) {
        self.model_loaded = true;
        self.has_clips = clip_count > 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.model_loaded
    }

    /// Advance the clock to `now`. The clock ticks every frame whether or
    /// not a model is present, so the first mixer step after loading only
    /// covers one frame.
    pub fn frame(&mut self, now: Instant) -> FrameStep {
        let delta = self
            .last_frame
            .map(|prev| now.saturating_duration_since(prev).as_secs_f64())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        FrameStep {
            spin: self.model_loaded.then_some(self.spin),
            mixer_delta: self.has_clips.then_some(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn no_spin_before_model() {
        let mut state = ViewerState::new(&ViewerOptions::default());
        let step = state.frame(Instant::now());
        assert_eq!(step.spin, None);
        assert_eq!(step.mixer_delta, None);
    }

    #[test]
    fn mixer_advances_by_elapsed_time() {
        let mut state = ViewerState::new(&ViewerOptions::default());
        let t0 = Instant::now();
        state.frame(t0);
        state.model_loaded(2);
        let step = state.frame(t0 + Duration::from_millis(16));
        assert_eq!(step.spin, Some([0.002, 0.003]));
        let delta = step.mixer_delta.unwrap();
        assert!((delta - 0.016).abs() < 1e-9);
    }

    #[test]
    fn model_without_clips_only_spins() {
        let mut state = ViewerState::new(&ViewerOptions::default());
        state.model_loaded(0);
        let step = state.frame(Instant::now());
        assert!(step.spin.is_some());
        assert_eq!(step.mixer_delta, None);
    }

    #[test]
    fn rig_has_one_ambient_and_one_shadow_caster() {
        assert_eq!(LIGHT_RIG.iter().filter(|l| l.kind == LightKind::Ambient).count(), 1);
        assert_eq!(LIGHT_RIG.iter().filter(|l| l.cast_shadow).count(), 1);
    }
}
