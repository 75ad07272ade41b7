//! Rendering module
//!
//! Frames are described as a draw list (see [`draw`]) built from the
//! controller's read-only snapshot. Backends only replay the list; they never
//! feed anything back into the simulation.

pub mod draw;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use draw::{DrawCmd, TextAlign};

use crate::scene::Snapshot;

/// Something that can present a frame
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// Keeps the last frame's draw list (headless runs and tests)
#[derive(Debug, Default)]
pub struct DrawListRenderer {
    pub commands: Vec<DrawCmd>,
    pub frames: u64,
}

impl Renderer for DrawListRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        self.commands = draw::build(snapshot);
        self.frames += 1;
    }
}
