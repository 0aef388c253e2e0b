//! Renderer trait abstraction.

use crate::base_image::BaseImage;
use kurbo::Size;
use maskink_core::Editor;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The editor whose state is rendered.
    pub editor: &'a Editor,
    /// Decoded base image, if one is available yet. Without it the frame
    /// simply has no base layer.
    pub base_image: Option<&'a BaseImage>,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a render context sized to the editor's canvas.
    pub fn new(editor: &'a Editor) -> Self {
        Self {
            editor,
            base_image: None,
            viewport_size: editor.canvas_size(),
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
        }
    }

    /// Attach the decoded base image.
    pub fn with_base_image(mut self, image: &'a BaseImage) -> Self {
        self.base_image = Some(image);
        self
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// A backend turns the deterministic display list built by
/// [`crate::scene::build_display_list`] into its own scene or command
/// buffer; the list fixes draw order and blending, the backend owns
/// everything below that.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called once per frame; should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
