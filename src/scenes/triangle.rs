//! The second stage: a triangle bouncing left and right over a background whose color keeps
//! changing.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use glow::HasContext;

use super::{Controls, Scene, SceneSwitch, Stage};
use crate::{
    abs::{Mesh, ShaderProgram, Vertex},
    animation::TriangleAnimation,
    other::UpdateContext,
};

const VERTEX_SHADER: &str = include_str!("../shaders/triangle/vert.glsl");
const FRAGMENT_SHADER: &str = include_str!("../shaders/triangle/frag.glsl");

/// A vertex with nothing but a position.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleVertex {
    pub position: Vec3,
}

impl Vertex for TriangleVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<TriangleVertex>() as i32;
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);
        }
    }
}

pub const TRIANGLE_VERTICES: [TriangleVertex; 3] = [
    TriangleVertex {
        position: Vec3::new(-0.3, -0.4, 0.0),
    },
    TriangleVertex {
        position: Vec3::new(0.3, -0.4, 0.0),
    },
    TriangleVertex {
        position: Vec3::new(0.0, 0.4, 0.0),
    },
];

pub const TRIANGLE_INDICES: [u32; 3] = [0, 1, 2];

/// Uploads the triangle to the GPU.
pub fn triangle_mesh(gl: &Arc<glow::Context>) -> Result<Mesh, String> {
    Mesh::new(gl, &TRIANGLE_VERTICES, &TRIANGLE_INDICES, glow::TRIANGLES)
}

/// The triangle stage.
///
/// If the shader program or the mesh cannot be created the scene still runs, but only the
/// background is drawn.
pub struct TriangleScene {
    program: Option<ShaderProgram>,
    mesh: Option<Mesh>,
    animation: TriangleAnimation,
    controls: Controls,
}

impl TriangleScene {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        let program = ShaderProgram::from_sources(gl, VERTEX_SHADER, FRAGMENT_SHADER)
            .inspect_err(|e| log::error!("Triangle shader unavailable: {e}"))
            .ok();
        let mesh = triangle_mesh(gl)
            .inspect(|mesh| log::debug!("Triangle mesh uploaded, {} indices", mesh.index_count()))
            .inspect_err(|e| log::error!("Triangle mesh unavailable: {e}"))
            .ok();
        let scene = Self {
            program,
            mesh,
            animation: TriangleAnimation::default(),
            controls: Controls::default(),
        };
        if scene.is_degraded() {
            log::warn!("Triangle stage is running without the triangle");
        }
        scene
    }

    /// Whether the triangle cannot be drawn.
    pub fn is_degraded(&self) -> bool {
        self.program.is_none() || self.mesh.is_none()
    }
}

impl Scene for TriangleScene {
    fn stage(&self) -> Stage {
        Stage::Triangle
    }

    fn handle_event(&mut self, event: &sdl2::event::Event) {
        self.controls.handle_event(event);
    }

    fn update(&mut self, _ctx: &UpdateContext) -> SceneSwitch {
        self.animation.advance();
        self.controls.take_switch(self.stage())
    }

    fn render(&mut self, gl: &glow::Context) {
        let background = self.animation.clear_color();
        unsafe {
            gl.clear_color(background.x, background.y, background.z, background.w);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        if let (Some(program), Some(mesh)) = (&self.program, &self.mesh) {
            program.use_program();
            program.set_uniform("u_offset", Vec2::new(self.animation.offset.value, 0.0));
            program.set_uniform("u_color", self.animation.triangle_color());
            mesh.draw();
            unsafe {
                gl.use_program(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaders_declare_used_uniforms() {
        assert!(VERTEX_SHADER.starts_with("#version 330 core"));
        assert!(FRAGMENT_SHADER.starts_with("#version 330 core"));
        assert!(VERTEX_SHADER.contains("uniform vec2 u_offset;"));
        assert!(VERTEX_SHADER.contains("layout (location = 0) in vec3"));
        assert!(FRAGMENT_SHADER.contains("uniform vec4 u_color;"));
    }

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<TriangleVertex>(), 3 * std::mem::size_of::<f32>());
    }

    #[test]
    fn test_triangle_stays_on_screen() {
        let max_offset = TriangleAnimation::default().offset.max;
        for vertex in TRIANGLE_VERTICES {
            assert!(vertex.position.x.abs() + max_offset <= 1.0 + 1e-6);
            assert!(vertex.position.y.abs() <= 1.0);
        }
        assert!(TRIANGLE_INDICES.iter().all(|&i| (i as usize) < TRIANGLE_VERTICES.len()));
    }
}
