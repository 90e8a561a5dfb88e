//! The first stage: a window cleared to a solid color every frame.

use glam::Vec4;
use glow::HasContext;

use super::{Controls, Scene, SceneSwitch, Stage};
use crate::other::UpdateContext;

pub struct ClearScene {
    color: Vec4,
    controls: Controls,
}

impl ClearScene {
    pub fn new(color: Vec4) -> Self {
        Self {
            color,
            controls: Controls::default(),
        }
    }
}

impl Scene for ClearScene {
    fn stage(&self) -> Stage {
        Stage::Clear
    }

    fn handle_event(&mut self, event: &sdl2::event::Event) {
        self.controls.handle_event(event);
    }

    fn update(&mut self, _ctx: &UpdateContext) -> SceneSwitch {
        self.controls.take_switch(self.stage())
    }

    fn render(&mut self, gl: &glow::Context) {
        unsafe {
            gl.clear_color(self.color.x, self.color.y, self.color.z, self.color.w);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}
