//! Thin, owning wrappers around SDL2
//!
//! Every native object (window, renderer, texture, surface, font) is owned by
//! a Rust value that releases it exactly once. Failures reported by SDL come
//! back as `SdlError` carrying the name of the failing call and SDL's error
//! string.
//!
//! Everything here is single threaded: none of the wrappers are `Send`.

// Pixel and size conversions between SDL's C ints and Rust sizes are all over
// the place and always bounded by the native API
#![allow(clippy::cast_lossless)]
// Lots of r, g, b and x, y, w, h
#![allow(clippy::many_single_char_names)]
// Raw SDL handles are exposed on purpose and only dereferenced by SDL itself
#![allow(clippy::not_unsafe_ptr_arg_deref)]

mod color;
mod context;
mod error;
mod flags;
#[cfg(feature = "ttf")]
mod font;
pub mod geometry;
mod handle;
mod pixels;
mod renderer;
mod settings;
mod surface;
mod texture;
mod window;

pub use color::Color;
pub use context::Context;
#[cfg(feature = "image")]
pub use context::image::{ImageContext, ImageFormats};
#[cfg(feature = "ttf")]
pub use context::ttf::TtfContext;
pub use error::{last_error, SdlError, SdlResult};
pub use flags::{Flip, InitFlags, RendererFlags, WindowFlags};
#[cfg(feature = "ttf")]
pub use font::{Font, FontStyle, GlyphMetrics, Hinting};
pub use geometry::{Point, Rect};
pub use handle::{HandleKind, Owned, RendererKind, Shared, SurfaceKind, TextureKind, WindowKind};
#[cfg(feature = "ttf")]
pub use handle::FontKind;
pub use pixels::{BlendMode, PixelFormat};
pub use renderer::{Renderer, RendererInfo};
pub use settings::{FullscreenMode, RendererSettings, WindowSettings};
pub use surface::{Surface, SurfaceLock};
pub use texture::{Texture, TextureAccess, TextureLock};
pub use window::{DisplayMode, Window, WindowPos};

/// Raw bindings, for whatever these wrappers don't cover
pub use sdl2::sys;
