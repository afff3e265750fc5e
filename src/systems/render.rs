//! GPU rendering system
//!
//! Owns the render context and scene renderer and draws one frame per redraw.

use std::sync::Arc;
use winit::window::Window;
use marbles_render::{context::RenderContext, Camera, RenderError, Scene, SceneRenderer};

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    renderer: SceneRenderer,
}

impl RenderSystem {
    /// Create render system for a window
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut renderer = SceneRenderer::new(&context.device, context.config.format);
        renderer.resize(&context.device, context.config.width, context.config.height);

        Ok(Self { context, renderer })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.renderer
            .resize(&self.context.device, self.context.config.width, self.context.config.height);
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame
    pub fn render_frame(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        self.renderer
            .prepare(&self.context.device, &self.context.queue, scene, camera);

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, scene)?;

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }

    /// Width over height of the surface
    pub fn aspect_ratio(&self) -> f32 {
        self.context.aspect_ratio()
    }
}
