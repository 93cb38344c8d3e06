//! Platform abstraction layer
//!
//! The simulation only sees three seams:
//! - `Clock`: monotonic milliseconds
//! - `AssetGateway`: the one-time asset load before the tick loop starts
//! - `RenderGateway`: draws a finished frame
//!
//! Native implementations live here; the browser ones live in `main.rs`.

pub mod assets;

use std::time::Instant;

use crate::renderer::Scene;

pub use assets::{ASSET_MANIFEST, FsAssets};

/// Monotonic time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by `Instant`, zero at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock advanced by hand (headless runs and tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    pub now_ms: f64,
}

impl ManualClock {
    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// One-shot asset loading
pub trait AssetGateway {
    fn load_all(&mut self) -> anyhow::Result<()>;
}

/// Draws a frame built by `renderer::build_scene`
pub trait RenderGateway {
    fn present(&mut self, scene: &Scene);
}

/// Renderer for headless runs: logs HUD text when it changes
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_hud: Vec<String>,
    pub frames: u64,
}

impl RenderGateway for LogRenderer {
    fn present(&mut self, scene: &Scene) {
        self.frames += 1;
        let hud: Vec<String> = scene.texts().map(str::to_owned).collect();
        if hud != self.last_hud {
            log::debug!("frame {}: {}", self.frames, hud.join(" | "));
            self.last_hud = hud;
        }
    }
}
