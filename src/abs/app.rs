//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which owns the SDL2 window, the
//! OpenGL context and the loaded [`glow::Context`].

use std::sync::Arc;

use glow::HasContext;

use crate::config::WindowConfig;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    _sdl: sdl2::Sdl,
    _video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    _gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates the window and a current OpenGL context for it.
    ///
    /// The context is created with the core profile and the forward compatible flag set, at the
    /// version requested in `config`.
    pub fn new(config: &WindowConfig) -> Result<Self, String> {
        let sdl = sdl2::init().map_err(|e| format!("SDL failed to initialize: {e}"))?;
        let video_subsystem = sdl
            .video()
            .map_err(|e| format!("SDL video subsystem failed to initialize: {e}"))?;

        let [major, minor] = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(major, minor);
        gl_attr.set_context_flags().forward_compatible().set();

        let mut builder = video_subsystem.window(&config.title, config.width, config.height);
        builder.opengl().position_centered();
        if config.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .map_err(|e| format!("Could not create main window: {e}"))?;

        let gl_context = window
            .gl_create_context()
            .map_err(|e| format!("Could not create OpenGL {major}.{minor} context: {e}"))?;
        window
            .gl_make_current(&gl_context)
            .map_err(|e| format!("Could not make OpenGL context current: {e}"))?;

        let swap_interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(swap_interval) {
            log::warn!("Could not set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl
            .event_pump()
            .map_err(|e| format!("Could not obtain SDL event pump: {e}"))?;
        let gl = Arc::new(gl);

        unsafe {
            log::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
        }

        Ok(Self {
            _sdl: sdl,
            _video_subsystem: video_subsystem,
            window,
            _gl_context: gl_context,
            gl,
            event_pump,
        })
    }

    /// The size of the drawable area in pixels. This can differ from the window size on high
    /// DPI displays.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    /// Points the viewport at the whole drawable area.
    pub fn reset_viewport(&self) {
        let (width, height) = self.framebuffer_size();
        log::debug!("Viewport set to {width}x{height}");
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    /// Swaps the front and back buffers of the window.
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}
