//! MaskInk Render Library
//!
//! Backend-agnostic compositor for MaskInk: the renderer contract plus the
//! deterministic display list a backend consumes. Draw order and blending
//! are fixed here; rasterization belongs to the backend.

pub mod base_image;
mod renderer;
pub mod scene;

pub use base_image::{BaseImage, BaseImageCache, BaseImageError};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{DEST_OUT, DisplayList, DrawOp, SRC_OVER, build_display_list};
