//! Rendering
//!
//! `scene` builds a backend-neutral draw list; `canvas` paints it in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{Align, DrawCmd, Scene, build_scene};
