use std::ffi::{c_int, CStr};
use std::mem::MaybeUninit;
#[cfg(feature = "image")]
use std::path::Path;
use std::rc::Rc;
use sdl2::sys;
use tracing::{debug, trace};
use crate::color::Color;
use crate::error::{check, to_c_int, SdlError, SdlResult};
#[cfg(feature = "image")]
use crate::error::path_to_cstring;
use crate::flags::{Flip, RendererFlags};
use crate::geometry::tiling::plan_fill;
use crate::geometry::{opt_ptr, Point, Rect};
use crate::handle::{Owned, RendererKind, Shared, WindowKind};
use crate::pixels::{read_blend_mode, BlendMode, PixelFormat};
use crate::settings::RendererSettings;
use crate::surface::{RenderTarget, Surface};
use crate::texture::{Texture, TextureAccess};
use crate::window::Window;

#[allow(clashing_extern_declarations)]
unsafe extern "C" {
    // `SDL_RendererFlip` has no variant for flipping both ways even though
    // SDL accepts the combined bits, so bind the call with a plain integer.
    #[link_name = "SDL_RenderCopyEx"]
    fn render_copy_ex(
        renderer: *mut sys::SDL_Renderer,
        texture: *mut sys::SDL_Texture,
        srcrect: *const sys::SDL_Rect,
        dstrect: *const sys::SDL_Rect,
        angle: f64,
        center: *const sys::SDL_Point,
        flip: u32,
    ) -> c_int;
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RendererInfo {
    pub name: String,
    pub flags: RendererFlags,
    pub texture_formats: Vec<PixelFormat>,
    pub max_texture_width: i32,
    pub max_texture_height: i32,
}

/// What the renderer draws into. Held only to keep it alive.
enum Target {
    Window(#[allow(dead_code)] Shared<WindowKind>),
    Surface(#[allow(dead_code)] RenderTarget),
}

/// Native renderer together with what it draws into. Textures hold this
/// too, so the target can't go away before the renderer does.
pub(crate) struct RendererHandle {
    // Must be destroyed before the target
    renderer: Owned<RendererKind>,
    _target: Target,
}

impl RendererHandle {
    pub(crate) fn as_ptr(&self) -> *mut sys::SDL_Renderer {
        self.renderer.as_ptr()
    }
}

/// 2D renderer bound to a window or a software surface.
///
/// Textures created by a renderer keep it alive, and the renderer keeps its
/// window or surface alive, so dropping them in any order is fine.
pub struct Renderer {
    handle: Rc<RendererHandle>,
}

impl Renderer {
    /// Create a renderer for `window`. `index` selects the driver, `None`
    /// takes the first one supporting `flags`.
    pub fn new(window: &Window, index: Option<u32>, flags: RendererFlags) -> SdlResult<Renderer> {
        let index = match index {
            Some(i) => to_c_int(i as usize, "renderer index")?,
            None => -1,
        };

        let raw = unsafe { sys::SDL_CreateRenderer(window.as_ptr(), index, flags.bits()) };
        let renderer = unsafe { Owned::from_raw(raw, "SDL_CreateRenderer") }?;

        debug!("Created renderer {:?} for window {}", flags, window.id());

        Ok(Renderer {
            handle: Rc::new(RendererHandle {
                renderer,
                _target: Target::Window(window.keep_alive()),
            }),
        })
    }

    pub fn from_settings(window: &Window, settings: &RendererSettings) -> SdlResult<Renderer> {
        Renderer::new(window, settings.driver_index, settings.flags())
    }

    /// Software renderer drawing straight into `surface`
    pub fn software(surface: &Surface) -> SdlResult<Renderer> {
        let target = surface.render_target()?;
        let raw = unsafe { sys::SDL_CreateSoftwareRenderer(surface.as_ptr()) };
        let renderer = unsafe { Owned::from_raw(raw, "SDL_CreateSoftwareRenderer") }?;

        Ok(Renderer {
            handle: Rc::new(RendererHandle {
                renderer,
                _target: Target::Surface(target),
            }),
        })
    }

    pub fn as_ptr(&self) -> *mut sys::SDL_Renderer {
        self.handle.as_ptr()
    }

    pub fn present(&mut self) -> &mut Self {
        unsafe { sys::SDL_RenderPresent(self.as_ptr()) };
        self
    }

    pub fn clear(&mut self) -> SdlResult<&mut Self> {
        check(unsafe { sys::SDL_RenderClear(self.as_ptr()) }, "SDL_RenderClear")?;
        Ok(self)
    }

    pub fn info(&self) -> SdlResult<RendererInfo> {
        let mut info = MaybeUninit::<sys::SDL_RendererInfo>::uninit();

        check(
            unsafe { sys::SDL_GetRendererInfo(self.as_ptr(), info.as_mut_ptr()) },
            "SDL_GetRendererInfo",
        )?;
        let info = unsafe { info.assume_init() };

        let name = if info.name.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(info.name) }.to_string_lossy().into_owned()
        };

        let count = (info.num_texture_formats as usize).min(info.texture_formats.len());

        Ok(RendererInfo {
            name,
            flags: RendererFlags::from_bits_truncate(info.flags),
            texture_formats: info.texture_formats[..count].iter().map(|&f| PixelFormat(f)).collect(),
            max_texture_width: info.max_texture_width,
            max_texture_height: info.max_texture_height,
        })
    }

    /// Copy `src` of `texture` (all of it if `None`) to `dst` (the whole
    /// target if `None`), scaling as needed
    pub fn copy(&mut self, texture: &Texture, src: Option<Rect>, dst: Option<Rect>) -> SdlResult<&mut Self> {
        let src = src.map(sys::SDL_Rect::from);
        let dst = dst.map(sys::SDL_Rect::from);

        check(
            unsafe { sys::SDL_RenderCopy(self.as_ptr(), texture.as_ptr(), opt_ptr(&src), opt_ptr(&dst)) },
            "SDL_RenderCopy",
        )?;
        Ok(self)
    }

    /// Unscaled copy with its top-left corner at `dst`
    pub fn copy_to(&mut self, texture: &Texture, src: Option<Rect>, dst: Point) -> SdlResult<&mut Self> {
        let dst = self.unscaled_dst(texture, src, dst)?;
        self.copy(texture, src, Some(dst))
    }

    /// Copy with rotation by `angle` degrees clockwise around `center`
    /// (relative to `dst`, its middle if `None`) and optional mirroring
    pub fn copy_ex(
        &mut self,
        texture: &Texture,
        src: Option<Rect>,
        dst: Option<Rect>,
        angle: f64,
        center: Option<Point>,
        flip: Flip,
    ) -> SdlResult<&mut Self> {
        let src = src.map(sys::SDL_Rect::from);
        let dst = dst.map(sys::SDL_Rect::from);
        let center = center.map(sys::SDL_Point::from);

        check(
            unsafe {
                render_copy_ex(
                    self.as_ptr(),
                    texture.as_ptr(),
                    opt_ptr(&src),
                    opt_ptr(&dst),
                    angle,
                    opt_ptr(&center),
                    flip.bits(),
                )
            },
            "SDL_RenderCopyEx",
        )?;
        Ok(self)
    }

    pub fn copy_ex_to(
        &mut self,
        texture: &Texture,
        src: Option<Rect>,
        dst: Point,
        angle: f64,
        center: Option<Point>,
        flip: Flip,
    ) -> SdlResult<&mut Self> {
        let dst = self.unscaled_dst(texture, src, dst)?;
        self.copy_ex(texture, src, Some(dst), angle, center, flip)
    }

    fn unscaled_dst(&self, texture: &Texture, src: Option<Rect>, dst: Point) -> SdlResult<Rect> {
        let size = match src {
            Some(r) => r.size(),
            None => texture.size()?,
        };
        Ok(Rect::from_point_size(dst, size))
    }

    /// Tile `src` of `texture` over `dst`, with the tile grid shifted by
    /// `offset`. `None` stands for the whole texture and the whole output
    /// respectively.
    pub fn fill_copy(
        &mut self,
        texture: &Texture,
        src: Option<Rect>,
        dst: Option<Rect>,
        offset: Point,
        flip: Flip,
    ) -> SdlResult<&mut Self> {
        let src = match src {
            Some(r) => r,
            None => Rect::from_point_size(Point::default(), texture.size()?),
        };
        let dst = match dst {
            Some(r) => r,
            None => Rect::from_point_size(Point::default(), self.output_size()?),
        };

        let tiles = plan_fill(src, dst, offset, flip);
        trace!("fill_copy: {} tiles of {} over {}", tiles.len(), src, dst);

        for tile in tiles {
            if flip.is_empty() {
                self.copy(texture, Some(tile.src), Some(tile.dst))?;
            } else {
                self.copy_ex(texture, Some(tile.src), Some(tile.dst), 0.0, None, flip)?;
            }
        }

        Ok(self)
    }

    pub fn set_draw_color(&mut self, color: Color) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetRenderDrawColor(self.as_ptr(), color.r, color.g, color.b, color.a) },
            "SDL_SetRenderDrawColor",
        )?;
        Ok(self)
    }

    pub fn draw_color(&self) -> SdlResult<Color> {
        let mut c = Color::default();

        check(
            unsafe { sys::SDL_GetRenderDrawColor(self.as_ptr(), &mut c.r, &mut c.g, &mut c.b, &mut c.a) },
            "SDL_GetRenderDrawColor",
        )?;
        Ok(c)
    }

    /// Draw to `texture` from now on. It must have been created with
    /// `TextureAccess::Target`.
    pub fn set_target(&mut self, texture: &Texture) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetRenderTarget(self.as_ptr(), texture.as_ptr()) },
            "SDL_SetRenderTarget",
        )?;
        Ok(self)
    }

    /// Draw to the window (or surface) again
    pub fn reset_target(&mut self) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetRenderTarget(self.as_ptr(), std::ptr::null_mut()) },
            "SDL_SetRenderTarget",
        )?;
        Ok(self)
    }

    pub fn target_supported(&self) -> bool {
        unsafe { sys::SDL_RenderTargetSupported(self.as_ptr()) == sys::SDL_bool::SDL_TRUE }
    }

    pub fn set_draw_blend_mode(&mut self, mode: BlendMode) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetRenderDrawBlendMode(self.as_ptr(), mode.to_sdl()) },
            "SDL_SetRenderDrawBlendMode",
        )?;
        Ok(self)
    }

    pub fn draw_blend_mode(&self) -> SdlResult<BlendMode> {
        read_blend_mode("SDL_GetRenderDrawBlendMode", |mode| unsafe {
            sys::SDL_GetRenderDrawBlendMode(self.as_ptr(), mode)
        })
    }

    pub fn draw_point(&mut self, p: Point) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_RenderDrawPoint(self.as_ptr(), p.x, p.y) },
            "SDL_RenderDrawPoint",
        )?;
        Ok(self)
    }

    pub fn draw_points(&mut self, points: &[Point]) -> SdlResult<&mut Self> {
        let points: Vec<sys::SDL_Point> = points.iter().map(|&p| p.into()).collect();
        let count = to_c_int(points.len(), "point count")?;

        check(
            unsafe { sys::SDL_RenderDrawPoints(self.as_ptr(), points.as_ptr(), count) },
            "SDL_RenderDrawPoints",
        )?;
        Ok(self)
    }

    pub fn draw_line(&mut self, start: Point, end: Point) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_RenderDrawLine(self.as_ptr(), start.x, start.y, end.x, end.y) },
            "SDL_RenderDrawLine",
        )?;
        Ok(self)
    }

    /// Connected line strip through `points`
    pub fn draw_lines(&mut self, points: &[Point]) -> SdlResult<&mut Self> {
        let points: Vec<sys::SDL_Point> = points.iter().map(|&p| p.into()).collect();
        let count = to_c_int(points.len(), "point count")?;

        check(
            unsafe { sys::SDL_RenderDrawLines(self.as_ptr(), points.as_ptr(), count) },
            "SDL_RenderDrawLines",
        )?;
        Ok(self)
    }

    pub fn draw_rect(&mut self, rect: Rect) -> SdlResult<&mut Self> {
        let rect = sys::SDL_Rect::from(rect);

        check(
            unsafe { sys::SDL_RenderDrawRect(self.as_ptr(), &rect) },
            "SDL_RenderDrawRect",
        )?;
        Ok(self)
    }

    /// Outline the rect with inclusive corners `top_left` and `bottom_right`
    pub fn draw_rect_corners(&mut self, top_left: Point, bottom_right: Point) -> SdlResult<&mut Self> {
        self.draw_rect(Rect::from_corner_points(top_left, bottom_right))
    }

    pub fn draw_rects(&mut self, rects: &[Rect]) -> SdlResult<&mut Self> {
        let rects: Vec<sys::SDL_Rect> = rects.iter().map(|&r| r.into()).collect();
        let count = to_c_int(rects.len(), "rect count")?;

        check(
            unsafe { sys::SDL_RenderDrawRects(self.as_ptr(), rects.as_ptr(), count) },
            "SDL_RenderDrawRects",
        )?;
        Ok(self)
    }

    pub fn fill_rect(&mut self, rect: Rect) -> SdlResult<&mut Self> {
        let rect = sys::SDL_Rect::from(rect);

        check(
            unsafe { sys::SDL_RenderFillRect(self.as_ptr(), &rect) },
            "SDL_RenderFillRect",
        )?;
        Ok(self)
    }

    pub fn fill_rect_corners(&mut self, top_left: Point, bottom_right: Point) -> SdlResult<&mut Self> {
        self.fill_rect(Rect::from_corner_points(top_left, bottom_right))
    }

    pub fn fill_rects(&mut self, rects: &[Rect]) -> SdlResult<&mut Self> {
        let rects: Vec<sys::SDL_Rect> = rects.iter().map(|&r| r.into()).collect();
        let count = to_c_int(rects.len(), "rect count")?;

        check(
            unsafe { sys::SDL_RenderFillRects(self.as_ptr(), rects.as_ptr(), count) },
            "SDL_RenderFillRects",
        )?;
        Ok(self)
    }

    /// Read back `rect` (the whole viewport if `None`) converted to `format`.
    /// `pixels` must hold `pitch` bytes for every row of the area.
    pub fn read_pixels(
        &self,
        rect: Option<Rect>,
        format: PixelFormat,
        pixels: &mut [u8],
        pitch: usize,
    ) -> SdlResult<()> {
        let area = match rect {
            Some(r) => r,
            None => self.viewport(),
        };

        let (w, h) = (area.w.max(0) as usize, area.h.max(0) as usize);
        let row = w * format.bytes_per_pixel() as usize;

        if pitch < row {
            return Err(SdlError::OutOfRange {
                what: "read_pixels pitch",
                value: pitch as i64,
            });
        }
        if pixels.len() < pitch * h {
            return Err(SdlError::OutOfRange {
                what: "read_pixels buffer length",
                value: pixels.len() as i64,
            });
        }

        let rect = rect.map(sys::SDL_Rect::from);
        let pitch = to_c_int(pitch, "pitch")?;

        check(
            unsafe {
                sys::SDL_RenderReadPixels(
                    self.as_ptr(),
                    opt_ptr(&rect),
                    format.raw(),
                    pixels.as_mut_ptr().cast(),
                    pitch,
                )
            },
            "SDL_RenderReadPixels",
        )
    }

    /// Restrict drawing to `rect`, `None` disables clipping
    pub fn set_clip_rect(&mut self, rect: Option<Rect>) -> SdlResult<&mut Self> {
        let rect = rect.map(sys::SDL_Rect::from);

        check(
            unsafe { sys::SDL_RenderSetClipRect(self.as_ptr(), opt_ptr(&rect)) },
            "SDL_RenderSetClipRect",
        )?;
        Ok(self)
    }

    /// Current clip rect, `None` when clipping is disabled
    pub fn clip_rect(&self) -> Option<Rect> {
        let mut rect = sys::SDL_Rect { x: 0, y: 0, w: 0, h: 0 };
        unsafe { sys::SDL_RenderGetClipRect(self.as_ptr(), &mut rect) };

        let rect = Rect::from(rect);
        if rect.is_empty() { None } else { Some(rect) }
    }

    pub fn is_clip_enabled(&self) -> bool {
        unsafe { sys::SDL_RenderIsClipEnabled(self.as_ptr()) == sys::SDL_bool::SDL_TRUE }
    }

    /// Device independent resolution, scaled to the output by SDL
    pub fn set_logical_size(&mut self, w: i32, h: i32) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_RenderSetLogicalSize(self.as_ptr(), w, h) },
            "SDL_RenderSetLogicalSize",
        )?;
        Ok(self)
    }

    pub fn logical_size(&self) -> Point {
        let (mut w, mut h) = (0, 0);
        unsafe { sys::SDL_RenderGetLogicalSize(self.as_ptr(), &mut w, &mut h) };
        Point::new(w, h)
    }

    pub fn logical_width(&self) -> i32 {
        self.logical_size().x
    }

    pub fn logical_height(&self) -> i32 {
        self.logical_size().y
    }

    pub fn set_scale(&mut self, x: f32, y: f32) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_RenderSetScale(self.as_ptr(), x, y) },
            "SDL_RenderSetScale",
        )?;
        Ok(self)
    }

    pub fn scale(&self) -> (f32, f32) {
        let (mut x, mut y) = (0.0, 0.0);
        unsafe { sys::SDL_RenderGetScale(self.as_ptr(), &mut x, &mut y) };
        (x, y)
    }

    pub fn x_scale(&self) -> f32 {
        self.scale().0
    }

    pub fn y_scale(&self) -> f32 {
        self.scale().1
    }

    /// Drawing area within the target, `None` resets it to the whole target
    pub fn set_viewport(&mut self, rect: Option<Rect>) -> SdlResult<&mut Self> {
        let rect = rect.map(sys::SDL_Rect::from);

        check(
            unsafe { sys::SDL_RenderSetViewport(self.as_ptr(), opt_ptr(&rect)) },
            "SDL_RenderSetViewport",
        )?;
        Ok(self)
    }

    pub fn viewport(&self) -> Rect {
        let mut rect = sys::SDL_Rect { x: 0, y: 0, w: 0, h: 0 };
        unsafe { sys::SDL_RenderGetViewport(self.as_ptr(), &mut rect) };
        rect.into()
    }

    pub fn output_size(&self) -> SdlResult<Point> {
        let (mut w, mut h) = (0, 0);

        check(
            unsafe { sys::SDL_GetRendererOutputSize(self.as_ptr(), &mut w, &mut h) },
            "SDL_GetRendererOutputSize",
        )?;
        Ok(Point::new(w, h))
    }

    pub fn output_width(&self) -> SdlResult<i32> {
        Ok(self.output_size()?.x)
    }

    pub fn output_height(&self) -> SdlResult<i32> {
        Ok(self.output_size()?.y)
    }

    pub fn create_texture(
        &self,
        format: PixelFormat,
        access: TextureAccess,
        w: i32,
        h: i32,
    ) -> SdlResult<Texture> {
        let raw = unsafe { sys::SDL_CreateTexture(self.as_ptr(), format.raw(), access as c_int, w, h) };
        let texture = unsafe { Owned::from_raw(raw, "SDL_CreateTexture") }?;

        Ok(Texture::new(texture, Rc::clone(&self.handle)))
    }

    pub fn create_texture_from_surface(&self, surface: &Surface) -> SdlResult<Texture> {
        surface.ensure_unlocked("create a texture from")?;
        let raw = unsafe { sys::SDL_CreateTextureFromSurface(self.as_ptr(), surface.as_ptr()) };
        let texture = unsafe { Owned::from_raw(raw, "SDL_CreateTextureFromSurface") }?;

        Ok(Texture::new(texture, Rc::clone(&self.handle)))
    }

    /// Load an image file straight into a texture
    #[cfg(feature = "image")]
    pub fn load_texture<P: AsRef<Path>>(&self, path: P) -> SdlResult<Texture> {
        let path = path_to_cstring(path.as_ref())?;

        let raw = unsafe { sys::image::IMG_LoadTexture(self.as_ptr(), path.as_ptr()) };
        let texture = unsafe { Owned::from_raw(raw, "IMG_LoadTexture") }?;

        Ok(Texture::new(texture, Rc::clone(&self.handle)))
    }
}

#[cfg(test)]
pub(crate) mod test;
