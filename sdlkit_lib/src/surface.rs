//! CPU-side pixel buffers.

mod lock;

use std::cell::Cell;
use std::ffi::c_int;
use std::rc::Rc;
use sdl2::sys;
use tracing::debug;
use crate::color::Color;
use crate::error::{check, to_c_int, SdlError, SdlResult};
use crate::geometry::{opt_ptr, Point, Rect};
use crate::handle::{Owned, SurfaceKind};
use crate::pixels::{read_blend_mode, BlendMode, PixelFormat};

pub use lock::SurfaceLock;

/// Native surface plus the pixel memory it may have been created over
pub(crate) struct SurfaceHandle {
    // Freed before `_pixels`
    surface: Owned<SurfaceKind>,
    _pixels: Option<Box<[u8]>>,
    // A `SurfaceLock` is handing out the pixels
    locked: Cell<bool>,
    // Software renderers drawing into the surface
    renderers: Cell<usize>,
}

impl SurfaceHandle {
    fn as_ptr(&self) -> *mut sys::SDL_Surface {
        self.surface.as_ptr()
    }

    /// Fail if a lock is live, SDL would touch pixels someone holds a slice of
    fn ensure_unlocked(&self, operation: &'static str) -> SdlResult<()> {
        if self.locked.get() {
            return Err(SdlError::SurfaceInUse(operation));
        }
        Ok(())
    }

    fn acquire_lock(&self) -> SdlResult<()> {
        self.ensure_unlocked("lock")?;
        if self.renderers.get() > 0 {
            return Err(SdlError::SurfaceInUse("lock"));
        }
        self.locked.set(true);
        Ok(())
    }

    fn release_lock(&self) {
        self.locked.set(false);
    }
}

/// A software renderer's hold on the surface it draws into. No lock can be
/// taken while one exists.
pub(crate) struct RenderTarget {
    handle: Rc<SurfaceHandle>,
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        self.handle.renderers.set(self.handle.renderers.get() - 1);
    }
}

/// An SDL surface.
///
/// Lock handles and software renderers hold on to the native surface, so
/// it is only freed once the last of them and the `Surface` itself is gone.
pub struct Surface {
    handle: Rc<SurfaceHandle>,
}

impl Surface {
    fn from_owned(surface: Owned<SurfaceKind>, pixels: Option<Box<[u8]>>) -> Surface {
        Surface {
            handle: Rc::new(SurfaceHandle {
                surface,
                _pixels: pixels,
                locked: Cell::new(false),
                renderers: Cell::new(0),
            }),
        }
    }

    /// Take ownership of a surface returned by `function`
    ///
    /// # Safety
    ///
    /// A non-null `raw` must be a surface nothing else frees.
    pub(crate) unsafe fn from_raw(raw: *mut sys::SDL_Surface, function: &'static str) -> SdlResult<Surface> {
        let surface = unsafe { Owned::from_raw(raw, function) }?;
        Ok(Surface::from_owned(surface, None))
    }

    /// Surface with the pixel layout given by `depth` and channel masks
    #[allow(clippy::too_many_arguments)]
    pub fn new_rgb(
        flags: u32,
        w: i32,
        h: i32,
        depth: i32,
        r_mask: u32,
        g_mask: u32,
        b_mask: u32,
        a_mask: u32,
    ) -> SdlResult<Surface> {
        unsafe {
            Surface::from_raw(
                sys::SDL_CreateRGBSurface(flags, w, h, depth, r_mask, g_mask, b_mask, a_mask),
                "SDL_CreateRGBSurface",
            )
        }
    }

    pub fn with_format(w: i32, h: i32, format: PixelFormat) -> SdlResult<Surface> {
        let depth = format.bits_per_pixel() as c_int;

        unsafe {
            Surface::from_raw(
                sys::SDL_CreateRGBSurfaceWithFormat(0, w, h, depth, format.raw()),
                "SDL_CreateRGBSurfaceWithFormat",
            )
        }
    }

    /// Surface over existing pixel data, which it keeps until dropped
    pub fn from_pixels(pixels: Vec<u8>, w: i32, h: i32, pitch: usize, format: PixelFormat) -> SdlResult<Surface> {
        if w < 0 || h < 0 {
            return Err(SdlError::OutOfRange {
                what: "surface size",
                value: i64::from(w.min(h)),
            });
        }
        // SDL takes the pitch as given, even zero
        if pitch < format.min_pitch(w) {
            return Err(SdlError::OutOfRange {
                what: "surface pitch",
                value: pitch as i64,
            });
        }

        let needed = pitch * h as usize;
        if pixels.len() < needed {
            return Err(SdlError::OutOfRange {
                what: "surface pixel buffer length",
                value: pixels.len() as i64,
            });
        }

        let mut pixels = pixels.into_boxed_slice();
        let depth = format.bits_per_pixel() as c_int;
        let pitch = to_c_int(pitch, "pitch")?;

        let raw = unsafe {
            sys::SDL_CreateRGBSurfaceWithFormatFrom(
                pixels.as_mut_ptr().cast(),
                w,
                h,
                depth,
                pitch,
                format.raw(),
            )
        };
        let surface = unsafe { Owned::from_raw(raw, "SDL_CreateRGBSurfaceWithFormatFrom") }?;

        Ok(Surface::from_owned(surface, Some(pixels)))
    }

    /// Decode an image file
    #[cfg(feature = "image")]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> SdlResult<Surface> {
        let path = crate::error::path_to_cstring(path.as_ref())?;

        let surface = unsafe { Surface::from_raw(sys::image::IMG_Load(path.as_ptr()), "IMG_Load") }?;
        debug!("Loaded {}x{} image {:?}", surface.width(), surface.height(), path);

        Ok(surface)
    }

    pub fn as_ptr(&self) -> *mut sys::SDL_Surface {
        self.handle.as_ptr()
    }

    /// Hold the surface for a software renderer drawing into it
    pub(crate) fn render_target(&self) -> SdlResult<RenderTarget> {
        self.handle.ensure_unlocked("render into")?;
        self.handle.renderers.set(self.handle.renderers.get() + 1);

        Ok(RenderTarget {
            handle: Rc::clone(&self.handle),
        })
    }

    /// Fail while a lock is handing out this surface's pixels
    pub(crate) fn ensure_unlocked(&self, operation: &'static str) -> SdlResult<()> {
        self.handle.ensure_unlocked(operation)
    }

    fn raw(&self) -> &sys::SDL_Surface {
        // SAFETY: the surface stays alive as long as `self`
        unsafe { &*self.as_ptr() }
    }

    /// Copy converted to `format`
    pub fn convert(&self, format: PixelFormat) -> SdlResult<Surface> {
        self.ensure_unlocked("convert")?;
        debug!("Converting {:?} surface to {:?}", self.format(), format);

        unsafe {
            Surface::from_raw(
                sys::SDL_ConvertSurfaceFormat(self.as_ptr(), format.raw(), 0),
                "SDL_ConvertSurfaceFormat",
            )
        }
    }

    /// Copy `src` (everything if `None`) onto `dst` at `dst_rect`'s origin.
    /// The size of `dst_rect` is ignored.
    pub fn blit(&self, src: Option<Rect>, dst: &mut Surface, dst_rect: Rect) -> SdlResult<()> {
        self.ensure_unlocked("blit from")?;
        dst.ensure_unlocked("blit into")?;

        let src = src.map(sys::SDL_Rect::from);
        let mut dst_rect = sys::SDL_Rect::from(dst_rect);

        check(
            unsafe { sys::SDL_UpperBlit(self.as_ptr(), opt_ptr(&src), dst.as_ptr(), &mut dst_rect) },
            "SDL_BlitSurface",
        )
    }

    /// Copy `src` onto `dst`, scaled to fill `dst_rect` (all of `dst` if
    /// `None`)
    pub fn blit_scaled(&self, src: Option<Rect>, dst: &mut Surface, dst_rect: Option<Rect>) -> SdlResult<()> {
        self.ensure_unlocked("blit from")?;
        dst.ensure_unlocked("blit into")?;

        let src = src.map(sys::SDL_Rect::from);
        let mut dst_rect = dst_rect.map(sys::SDL_Rect::from);

        let dst_ptr = match dst_rect.as_mut() {
            Some(r) => r as *mut sys::SDL_Rect,
            None => std::ptr::null_mut(),
        };

        check(
            unsafe { sys::SDL_UpperBlitScaled(self.as_ptr(), opt_ptr(&src), dst.as_ptr(), dst_ptr) },
            "SDL_BlitScaled",
        )
    }

    /// Direct access to the pixels, locking the surface if SDL requires it.
    ///
    /// Only one lock may be live at a time, and none while a software
    /// renderer draws into the surface. Fills, blits and conversions fail
    /// until the lock is dropped.
    pub fn lock(&self) -> SdlResult<SurfaceLock> {
        SurfaceLock::new(Rc::clone(&self.handle))
    }

    pub fn color_key(&self) -> SdlResult<u32> {
        let mut key = 0;

        check(
            unsafe { sys::SDL_GetColorKey(self.as_ptr(), &mut key) },
            "SDL_GetColorKey",
        )?;
        Ok(key)
    }

    /// Make pixels of value `key` transparent, or stop doing so
    pub fn set_color_key(&mut self, enabled: bool, key: u32) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetColorKey(self.as_ptr(), enabled as c_int, key) },
            "SDL_SetColorKey",
        )?;
        Ok(self)
    }

    pub fn alpha_mod(&self) -> SdlResult<u8> {
        let mut alpha = 0;

        check(
            unsafe { sys::SDL_GetSurfaceAlphaMod(self.as_ptr(), &mut alpha) },
            "SDL_GetSurfaceAlphaMod",
        )?;
        Ok(alpha)
    }

    pub fn set_alpha_mod(&mut self, alpha: u8) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetSurfaceAlphaMod(self.as_ptr(), alpha) },
            "SDL_SetSurfaceAlphaMod",
        )?;
        Ok(self)
    }

    pub fn blend_mode(&self) -> SdlResult<BlendMode> {
        read_blend_mode("SDL_GetSurfaceBlendMode", |mode| unsafe {
            sys::SDL_GetSurfaceBlendMode(self.as_ptr(), mode)
        })
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetSurfaceBlendMode(self.as_ptr(), mode.to_sdl()) },
            "SDL_SetSurfaceBlendMode",
        )?;
        Ok(self)
    }

    /// Color modulation, `(255, 255, 255)` when disabled
    pub fn color_mod(&self) -> SdlResult<(u8, u8, u8)> {
        let (mut r, mut g, mut b) = (0, 0, 0);

        check(
            unsafe { sys::SDL_GetSurfaceColorMod(self.as_ptr(), &mut r, &mut g, &mut b) },
            "SDL_GetSurfaceColorMod",
        )?;
        Ok((r, g, b))
    }

    pub fn set_color_mod(&mut self, r: u8, g: u8, b: u8) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetSurfaceColorMod(self.as_ptr(), r, g, b) },
            "SDL_SetSurfaceColorMod",
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

    pub fn clip_rect(&self) -> Rect {
        let mut rect = sys::SDL_Rect { x: 0, y: 0, w: 0, h: 0 };
        unsafe { sys::SDL_GetClipRect(self.as_ptr(), &mut rect) };
        rect.into()
    }

    /// Restrict blits into this surface to `rect`, `None` resets it to the
    /// whole surface
    pub fn set_clip_rect(&mut self, rect: Option<Rect>) -> SdlResult<&mut Self> {
        let rect = rect.map(sys::SDL_Rect::from);

        let set = unsafe { sys::SDL_SetClipRect(self.as_ptr(), opt_ptr(&rect)) };
        if set != sys::SDL_bool::SDL_TRUE {
            return Err(SdlError::last("SDL_SetClipRect"));
        }
        Ok(self)
    }

    /// Toggle run-length encoding, which speeds up color keyed blits
    pub fn set_rle(&mut self, enabled: bool) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetSurfaceRLE(self.as_ptr(), enabled as c_int) },
            "SDL_SetSurfaceRLE",
        )?;
        Ok(self)
    }

    /// Fill `rect` (the whole surface if `None`) with a pixel value, see
    /// `map_rgba`
    pub fn fill_rect(&mut self, rect: Option<Rect>, color: u32) -> SdlResult<&mut Self> {
        self.ensure_unlocked("fill")?;
        let rect = rect.map(sys::SDL_Rect::from);

        check(
            unsafe { sys::SDL_FillRect(self.as_ptr(), opt_ptr(&rect), color) },
            "SDL_FillRect",
        )?;
        Ok(self)
    }

    pub fn fill_rects(&mut self, rects: &[Rect], color: u32) -> SdlResult<&mut Self> {
        self.ensure_unlocked("fill")?;
        let rects: Vec<sys::SDL_Rect> = rects.iter().map(|&r| r.into()).collect();
        let count = to_c_int(rects.len(), "rect count")?;

        check(
            unsafe { sys::SDL_FillRects(self.as_ptr(), rects.as_ptr(), count, color) },
            "SDL_FillRects",
        )?;
        Ok(self)
    }

    /// Pixel value of `color` in this surface's format
    pub fn map_rgba(&self, color: Color) -> u32 {
        unsafe { sys::SDL_MapRGBA(self.raw().format, color.r, color.g, color.b, color.a) }
    }

    pub fn width(&self) -> i32 {
        self.raw().w
    }

    pub fn height(&self) -> i32 {
        self.raw().h
    }

    pub fn size(&self) -> Point {
        Point::new(self.width(), self.height())
    }

    pub fn format(&self) -> PixelFormat {
        // SAFETY: every surface has a format
        PixelFormat(unsafe { (*self.raw().format).format })
    }

    /// Whether the surface is run-length encoded and has to be locked for
    /// direct pixel access
    pub fn must_lock(&self) -> bool {
        must_lock(self.raw())
    }
}

pub(crate) fn must_lock(surface: &sys::SDL_Surface) -> bool {
    surface.flags & sys::SDL_RLEACCEL != 0
}
