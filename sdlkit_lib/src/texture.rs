//! GPU-side images owned by a renderer.

mod lock;

use std::ffi::c_int;
use std::rc::Rc;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use sdl2::sys;
use serde::{Deserialize, Serialize};
use tracing::trace;
use crate::color::Color;
use crate::error::{check, check_inside, to_c_int, SdlError, SdlResult};
use crate::geometry::{opt_ptr, Point, Rect};
use crate::handle::{Owned, TextureKind};
use crate::pixels::{read_blend_mode, BlendMode, PixelFormat};
use crate::renderer::RendererHandle;
use crate::surface::Surface;

pub use lock::TextureLock;

/// How a texture's contents may change after creation
#[derive(Serialize, Deserialize, FromPrimitive, ToPrimitive, Copy, Clone, PartialEq, Eq, Debug)]
pub enum TextureAccess {
    /// Rarely changes, updated with `Texture::update`
    Static = 0,
    /// Changes often, can be locked
    Streaming = 1,
    /// Can be used as a render target
    Target = 2,
}

impl TextureAccess {
    pub fn from_raw(raw: c_int) -> SdlResult<TextureAccess> {
        TextureAccess::from_i32(raw).ok_or(SdlError::UnknownTextureAccess(raw))
    }
}

pub struct Texture {
    // Destroyed before the renderer it belongs to
    texture: Owned<TextureKind>,
    _renderer: Rc<RendererHandle>,
}

struct Query {
    format: u32,
    access: c_int,
    w: c_int,
    h: c_int,
}

impl Texture {
    pub(crate) fn new(texture: Owned<TextureKind>, renderer: Rc<RendererHandle>) -> Texture {
        Texture {
            texture,
            _renderer: renderer,
        }
    }

    /// Load an image file into a texture for `renderer`
    #[cfg(feature = "image")]
    pub fn load<P: AsRef<std::path::Path>>(renderer: &crate::renderer::Renderer, path: P) -> SdlResult<Texture> {
        renderer.load_texture(path)
    }

    pub fn as_ptr(&self) -> *mut sys::SDL_Texture {
        self.texture.as_ptr()
    }

    fn query(&self) -> SdlResult<Query> {
        let mut q = Query {
            format: 0,
            access: 0,
            w: 0,
            h: 0,
        };

        check(
            unsafe { sys::SDL_QueryTexture(self.as_ptr(), &mut q.format, &mut q.access, &mut q.w, &mut q.h) },
            "SDL_QueryTexture",
        )?;
        Ok(q)
    }

    pub fn format(&self) -> SdlResult<PixelFormat> {
        Ok(PixelFormat(self.query()?.format))
    }

    pub fn access(&self) -> SdlResult<TextureAccess> {
        TextureAccess::from_raw(self.query()?.access)
    }

    pub fn width(&self) -> SdlResult<i32> {
        Ok(self.query()?.w)
    }

    pub fn height(&self) -> SdlResult<i32> {
        Ok(self.query()?.h)
    }

    pub fn size(&self) -> SdlResult<Point> {
        let q = self.query()?;
        Ok(Point::new(q.w, q.h))
    }

    /// Width and height addressed by `rect`, the whole texture if `None`
    fn extent(q: &Query, rect: Option<Rect>) -> (i32, usize) {
        let (w, h) = match rect {
            Some(r) => (r.w, r.h),
            None => (q.w, q.h),
        };
        (w.max(0), h.max(0) as usize)
    }

    /// Replace the pixels in `rect` (the whole texture if `None`). `pixels`
    /// is in the texture's format with `pitch` bytes per row.
    pub fn update(&mut self, rect: Option<Rect>, pixels: &[u8], pitch: usize) -> SdlResult<&mut Self> {
        let q = self.query()?;
        let format = PixelFormat(q.format);
        let (w, rows) = Texture::extent(&q, rect);

        // SDL copies whole rows of the given rect from `pixels`
        if pitch < format.min_pitch(w) {
            return Err(SdlError::OutOfRange {
                what: "texture update pitch",
                value: pitch as i64,
            });
        }
        if pixels.len() < format.buffer_len(pitch, rows) {
            return Err(SdlError::OutOfRange {
                what: "texture update buffer length",
                value: pixels.len() as i64,
            });
        }

        let rect = rect.map(sys::SDL_Rect::from);
        let pitch = to_c_int(pitch, "pitch")?;

        check(
            unsafe { sys::SDL_UpdateTexture(self.as_ptr(), opt_ptr(&rect), pixels.as_ptr().cast(), pitch) },
            "SDL_UpdateTexture",
        )?;
        Ok(self)
    }

    /// Upload `surface` into `rect` (the whole texture if `None`), clipped to
    /// the surface size. The surface is converted to the texture format
    /// first if needed.
    pub fn update_surface(&mut self, rect: Option<Rect>, surface: &Surface) -> SdlResult<&mut Self> {
        let q = self.query()?;
        let format = PixelFormat(q.format);

        let mut area = rect.unwrap_or(Rect::new(0, 0, q.w, q.h));
        area.w = area.w.min(surface.width());
        area.h = area.h.min(surface.height());

        if surface.format() == format {
            let lock = surface.lock()?;
            self.update(Some(area), lock.pixels(), lock.pitch())
        } else {
            trace!("Converting {:?} surface for {:?} texture", surface.format(), format);

            let converted = surface.convert(format)?;
            let lock = converted.lock()?;
            self.update(Some(area), lock.pixels(), lock.pitch())
        }
    }

    /// Replace the pixels of a planar YUV (YV12 or IYUV) texture
    #[allow(clippy::too_many_arguments)]
    pub fn update_yuv(
        &mut self,
        rect: Option<Rect>,
        y_plane: &[u8],
        y_pitch: usize,
        u_plane: &[u8],
        u_pitch: usize,
        v_plane: &[u8],
        v_pitch: usize,
    ) -> SdlResult<&mut Self> {
        let q = self.query()?;
        let (w, rows) = Texture::extent(&q, rect);
        let (w, chroma_w) = (w as usize, (w as usize).div_ceil(2));
        let chroma_rows = rows.div_ceil(2);

        for (what, plane, pitch, row_bytes, rows) in [
            ("Y plane", y_plane, y_pitch, w, rows),
            ("U plane", u_plane, u_pitch, chroma_w, chroma_rows),
            ("V plane", v_plane, v_pitch, chroma_w, chroma_rows),
        ] {
            if pitch < row_bytes {
                return Err(SdlError::OutOfRange {
                    what,
                    value: pitch as i64,
                });
            }
            if plane.len() < pitch * rows {
                return Err(SdlError::OutOfRange {
                    what,
                    value: plane.len() as i64,
                });
            }
        }

        let rect = rect.map(sys::SDL_Rect::from);

        check(
            unsafe {
                sys::SDL_UpdateYUVTexture(
                    self.as_ptr(),
                    opt_ptr(&rect),
                    y_plane.as_ptr(),
                    to_c_int(y_pitch, "Y pitch")?,
                    u_plane.as_ptr(),
                    to_c_int(u_pitch, "U pitch")?,
                    v_plane.as_ptr(),
                    to_c_int(v_pitch, "V pitch")?,
                )
            },
            "SDL_UpdateYUVTexture",
        )?;
        Ok(self)
    }

    /// Write-only access to `rect` (the whole texture if `None`) of a
    /// streaming texture. Changes are uploaded when the lock is dropped.
    ///
    /// The locked slice spans `pitch` bytes per row, except that the last
    /// row of a sub-rect stops at the rect's right edge.
    pub fn lock(&mut self, rect: Option<Rect>) -> SdlResult<TextureLock<'_>> {
        let q = self.query()?;
        let format = PixelFormat(q.format);

        // SDL hands back a pointer offset into the texture without clipping
        if let Some(r) = rect {
            check_inside("texture lock rect", r, Rect::new(0, 0, q.w, q.h))?;
        }

        let (w, rows) = Texture::extent(&q, rect);
        let row_bytes = rect.map(|_| w as usize * format.bytes_per_pixel() as usize);

        TextureLock::new(self, rect, rows, row_bytes)
    }

    pub fn blend_mode(&self) -> SdlResult<BlendMode> {
        read_blend_mode("SDL_GetTextureBlendMode", |mode| unsafe {
            sys::SDL_GetTextureBlendMode(self.as_ptr(), mode)
        })
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetTextureBlendMode(self.as_ptr(), mode.to_sdl()) },
            "SDL_SetTextureBlendMode",
        )?;
        Ok(self)
    }

    pub fn alpha_mod(&self) -> SdlResult<u8> {
        let mut alpha = 0;

        check(
            unsafe { sys::SDL_GetTextureAlphaMod(self.as_ptr(), &mut alpha) },
            "SDL_GetTextureAlphaMod",
        )?;
        Ok(alpha)
    }

    pub fn set_alpha_mod(&mut self, alpha: u8) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetTextureAlphaMod(self.as_ptr(), alpha) },
            "SDL_SetTextureAlphaMod",
        )?;
        Ok(self)
    }

    pub fn color_mod(&self) -> SdlResult<(u8, u8, u8)> {
        let (mut r, mut g, mut b) = (0, 0, 0);

        check(
            unsafe { sys::SDL_GetTextureColorMod(self.as_ptr(), &mut r, &mut g, &mut b) },
            "SDL_GetTextureColorMod",
        )?;
        Ok((r, g, b))
    }

    pub fn set_color_mod(&mut self, r: u8, g: u8, b: u8) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetTextureColorMod(self.as_ptr(), r, g, b) },
            "SDL_SetTextureColorMod",
        )?;
        Ok(self)
    }

    pub fn color_and_alpha_mod(&self) -> SdlResult<Color> {
        let (r, g, b) = self.color_mod()?;
        Ok(Color::rgba(r, g, b, self.alpha_mod()?))
    }

    pub fn set_color_and_alpha_mod(&mut self, color: Color) -> SdlResult<&mut Self> {
        self.set_color_mod(color.r, color.g, color.b)?
            .set_alpha_mod(color.a)
    }
}

#[cfg(test)]
mod test;
