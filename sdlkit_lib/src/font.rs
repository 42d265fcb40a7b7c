//! TrueType fonts through SDL2_ttf.

use std::ffi::{c_int, c_long, CStr, CString};
use std::marker::PhantomData;
use std::path::Path;
use std::ptr;
use bitflags::bitflags;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use sdl2::sys;
use sdl2::sys::ttf;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::color::Color;
use crate::context::ttf::TtfContext;
use crate::error::{check, path_to_cstring, SdlError, SdlResult};
use crate::geometry::{Point, Rect};
use crate::handle::{FontKind, Owned};
use crate::surface::Surface;

bitflags! {
    #[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
    pub struct FontStyle: c_int {
        const NORMAL = 0x00;
        const BOLD = 0x01;
        const ITALIC = 0x02;
        const UNDERLINE = 0x04;
        const STRIKETHROUGH = 0x08;
    }
}

#[derive(Serialize, Deserialize, FromPrimitive, ToPrimitive, Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Hinting {
    #[default]
    Normal = 0,
    Light = 1,
    Mono = 2,
    None = 3,
    LightSubpixel = 4,
}

/// Bounding box and advance of a single glyph, in pixels relative to the
/// glyph origin on the baseline
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct GlyphMetrics {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub advance: i32,
}

impl GlyphMetrics {
    pub fn rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x - self.min_x, self.max_y - self.min_y)
    }
}

/// An open font face. Cannot outlive the SDL2_ttf context it was opened
/// with.
pub struct Font<'ttf> {
    font: Owned<FontKind>,
    _ttf: PhantomData<&'ttf TtfContext>,
}

/// NUL terminated UTF-16 for the `*UNICODE` calls
fn to_ucs2(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(Some(0)).collect()
}

impl<'ttf> Font<'ttf> {
    /// Open face `index` of the font file at `path`, scaled to `ptsize`
    /// points
    pub fn open<P: AsRef<Path>>(_ttf: &'ttf TtfContext, path: P, ptsize: i32, index: i64) -> SdlResult<Font<'ttf>> {
        let file = path_to_cstring(path.as_ref())?;
        let index = c_long::try_from(index).map_err(|_| SdlError::OutOfRange {
            what: "font face index",
            value: index,
        })?;

        let raw = unsafe { ttf::TTF_OpenFontIndex(file.as_ptr(), ptsize, index) };
        let font = unsafe { Owned::from_raw(raw, "TTF_OpenFontIndex") }?;

        debug!("Opened font {:?} at {}pt, face {}", file, ptsize, index);

        Ok(Font {
            font,
            _ttf: PhantomData,
        })
    }

    pub fn as_ptr(&self) -> *mut ttf::TTF_Font {
        self.font.as_ptr()
    }

    pub fn style(&self) -> FontStyle {
        FontStyle::from_bits_retain(unsafe { ttf::TTF_GetFontStyle(self.as_ptr()) })
    }

    pub fn set_style(&mut self, style: FontStyle) -> &mut Self {
        unsafe { ttf::TTF_SetFontStyle(self.as_ptr(), style.bits()) };
        self
    }

    pub fn outline(&self) -> i32 {
        unsafe { ttf::TTF_GetFontOutline(self.as_ptr()) }
    }

    pub fn set_outline(&mut self, outline: i32) -> &mut Self {
        unsafe { ttf::TTF_SetFontOutline(self.as_ptr(), outline) };
        self
    }

    pub fn hinting(&self) -> SdlResult<Hinting> {
        let raw = unsafe { ttf::TTF_GetFontHinting(self.as_ptr()) };
        Hinting::from_i32(raw).ok_or(SdlError::OutOfRange {
            what: "font hinting",
            value: raw.into(),
        })
    }

    pub fn set_hinting(&mut self, hinting: Hinting) -> &mut Self {
        unsafe { ttf::TTF_SetFontHinting(self.as_ptr(), hinting as c_int) };
        self
    }

    pub fn kerning(&self) -> bool {
        unsafe { ttf::TTF_GetFontKerning(self.as_ptr()) > 0 }
    }

    pub fn set_kerning(&mut self, allowed: bool) -> &mut Self {
        unsafe { ttf::TTF_SetFontKerning(self.as_ptr(), allowed as c_int) };
        self
    }

    /// Maximum pixel height of all glyphs
    pub fn height(&self) -> i32 {
        unsafe { ttf::TTF_FontHeight(self.as_ptr()) }
    }

    pub fn ascent(&self) -> i32 {
        unsafe { ttf::TTF_FontAscent(self.as_ptr()) }
    }

    /// Negative for glyphs reaching below the baseline
    pub fn descent(&self) -> i32 {
        unsafe { ttf::TTF_FontDescent(self.as_ptr()) }
    }

    /// Recommended distance between two lines of text
    pub fn line_skip(&self) -> i32 {
        unsafe { ttf::TTF_FontLineSkip(self.as_ptr()) }
    }

    pub fn num_faces(&self) -> i64 {
        unsafe { ttf::TTF_FontFaces(self.as_ptr()) }.into()
    }

    pub fn is_mono(&self) -> bool {
        unsafe { ttf::TTF_FontFaceIsFixedWidth(self.as_ptr()) > 0 }
    }

    pub fn family_name(&self) -> Option<String> {
        owned_str(unsafe { ttf::TTF_FontFaceFamilyName(self.as_ptr()) })
    }

    pub fn style_name(&self) -> Option<String> {
        owned_str(unsafe { ttf::TTF_FontFaceStyleName(self.as_ptr()) })
    }

    pub fn is_glyph_provided(&self, ch: u16) -> bool {
        unsafe { ttf::TTF_GlyphIsProvided(self.as_ptr(), ch) != 0 }
    }

    pub fn glyph_metrics(&self, ch: u16) -> SdlResult<GlyphMetrics> {
        let mut m = GlyphMetrics::default();

        check(
            unsafe {
                ttf::TTF_GlyphMetrics(
                    self.as_ptr(),
                    ch,
                    &mut m.min_x,
                    &mut m.max_x,
                    &mut m.min_y,
                    &mut m.max_y,
                    &mut m.advance,
                )
            },
            "TTF_GlyphMetrics",
        )?;
        Ok(m)
    }

    pub fn glyph_rect(&self, ch: u16) -> SdlResult<Rect> {
        Ok(self.glyph_metrics(ch)?.rect())
    }

    pub fn glyph_advance(&self, ch: u16) -> SdlResult<i32> {
        let mut advance = 0;

        check(
            unsafe {
                ttf::TTF_GlyphMetrics(
                    self.as_ptr(),
                    ch,
                    ptr::null_mut(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                    ptr::null_mut(),
                    &mut advance,
                )
            },
            "TTF_GlyphMetrics",
        )?;
        Ok(advance)
    }

    fn size_with(
        &self,
        function: &'static str,
        size: impl FnOnce(*mut c_int, *mut c_int) -> c_int,
    ) -> SdlResult<Point> {
        let (mut w, mut h) = (0, 0);
        check(size(&mut w, &mut h), function)?;
        Ok(Point::new(w, h))
    }

    /// Size of `text` rendered, with `text` taken as Latin-1
    pub fn size_of_text(&self, text: &[u8]) -> SdlResult<Point> {
        let text = CString::new(text)?;
        self.size_with("TTF_SizeText", |w, h| unsafe {
            ttf::TTF_SizeText(self.as_ptr(), text.as_ptr(), w, h)
        })
    }

    pub fn size_of_utf8(&self, text: &str) -> SdlResult<Point> {
        let text = CString::new(text)?;
        self.size_with("TTF_SizeUTF8", |w, h| unsafe {
            ttf::TTF_SizeUTF8(self.as_ptr(), text.as_ptr(), w, h)
        })
    }

    /// Like `size_of_utf8`, going through SDL2_ttf's UTF-16 entry point
    pub fn size_of_unicode(&self, text: &str) -> SdlResult<Point> {
        let text = to_ucs2(text);
        self.size_with("TTF_SizeUNICODE", |w, h| unsafe {
            ttf::TTF_SizeUNICODE(self.as_ptr(), text.as_ptr(), w, h)
        })
    }

    fn render(&self, function: &'static str, raw: *mut sys::SDL_Surface) -> SdlResult<Surface> {
        unsafe { Surface::from_raw(raw, function) }
    }

    /// Fast, aliased rendering onto an 8-bit palettized surface with a
    /// transparent background
    pub fn render_text_solid(&self, text: &[u8], fg: Color) -> SdlResult<Surface> {
        let text = CString::new(text)?;
        self.render("TTF_RenderText_Solid", unsafe {
            ttf::TTF_RenderText_Solid(self.as_ptr(), text.as_ptr(), fg.into())
        })
    }

    pub fn render_utf8_solid(&self, text: &str, fg: Color) -> SdlResult<Surface> {
        let text = CString::new(text)?;
        self.render("TTF_RenderUTF8_Solid", unsafe {
            ttf::TTF_RenderUTF8_Solid(self.as_ptr(), text.as_ptr(), fg.into())
        })
    }

    pub fn render_unicode_solid(&self, text: &str, fg: Color) -> SdlResult<Surface> {
        let text = to_ucs2(text);
        self.render("TTF_RenderUNICODE_Solid", unsafe {
            ttf::TTF_RenderUNICODE_Solid(self.as_ptr(), text.as_ptr(), fg.into())
        })
    }

    pub fn render_glyph_solid(&self, ch: u16, fg: Color) -> SdlResult<Surface> {
        self.render("TTF_RenderGlyph_Solid", unsafe {
            ttf::TTF_RenderGlyph_Solid(self.as_ptr(), ch, fg.into())
        })
    }

    /// Antialiased rendering onto an 8-bit surface filled with `bg`
    pub fn render_text_shaded(&self, text: &[u8], fg: Color, bg: Color) -> SdlResult<Surface> {
        let text = CString::new(text)?;
        self.render("TTF_RenderText_Shaded", unsafe {
            ttf::TTF_RenderText_Shaded(self.as_ptr(), text.as_ptr(), fg.into(), bg.into())
        })
    }

    pub fn render_utf8_shaded(&self, text: &str, fg: Color, bg: Color) -> SdlResult<Surface> {
        let text = CString::new(text)?;
        self.render("TTF_RenderUTF8_Shaded", unsafe {
            ttf::TTF_RenderUTF8_Shaded(self.as_ptr(), text.as_ptr(), fg.into(), bg.into())
        })
    }

    pub fn render_unicode_shaded(&self, text: &str, fg: Color, bg: Color) -> SdlResult<Surface> {
        let text = to_ucs2(text);
        self.render("TTF_RenderUNICODE_Shaded", unsafe {
            ttf::TTF_RenderUNICODE_Shaded(self.as_ptr(), text.as_ptr(), fg.into(), bg.into())
        })
    }

    pub fn render_glyph_shaded(&self, ch: u16, fg: Color, bg: Color) -> SdlResult<Surface> {
        self.render("TTF_RenderGlyph_Shaded", unsafe {
            ttf::TTF_RenderGlyph_Shaded(self.as_ptr(), ch, fg.into(), bg.into())
        })
    }

    /// Antialiased rendering onto a 32-bit surface with per-pixel alpha
    pub fn render_text_blended(&self, text: &[u8], fg: Color) -> SdlResult<Surface> {
        let text = CString::new(text)?;
        self.render("TTF_RenderText_Blended", unsafe {
            ttf::TTF_RenderText_Blended(self.as_ptr(), text.as_ptr(), fg.into())
        })
    }

    pub fn render_utf8_blended(&self, text: &str, fg: Color) -> SdlResult<Surface> {
        let text = CString::new(text)?;
        self.render("TTF_RenderUTF8_Blended", unsafe {
            ttf::TTF_RenderUTF8_Blended(self.as_ptr(), text.as_ptr(), fg.into())
        })
    }

    pub fn render_unicode_blended(&self, text: &str, fg: Color) -> SdlResult<Surface> {
        let text = to_ucs2(text);
        self.render("TTF_RenderUNICODE_Blended", unsafe {
            ttf::TTF_RenderUNICODE_Blended(self.as_ptr(), text.as_ptr(), fg.into())
        })
    }

    pub fn render_glyph_blended(&self, ch: u16, fg: Color) -> SdlResult<Surface> {
        self.render("TTF_RenderGlyph_Blended", unsafe {
            ttf::TTF_RenderGlyph_Blended(self.as_ptr(), ch, fg.into())
        })
    }
}

fn owned_str(s: *const std::ffi::c_char) -> Option<String> {
    if s.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned())
    }
}

#[test]
fn glyph_rect_from_metrics() {
    let m = GlyphMetrics {
        min_x: 1,
        max_x: 9,
        min_y: -2,
        max_y: 12,
        advance: 10,
    };

    assert_eq!(m.rect(), Rect::new(1, -2, 8, 14));
}

#[test]
fn ucs2_is_nul_terminated() {
    assert_eq!(to_ucs2("hé"), vec![0x68, 0xe9, 0]);
    assert_eq!(to_ucs2("\u{1F600}").len(), 3);
    assert_eq!(to_ucs2(""), vec![0]);
}

#[test]
fn hinting_values_match_sdl_ttf() {
    assert_eq!(Hinting::from_i32(ttf::TTF_HINTING_LIGHT_SUBPIXEL as i32), Some(Hinting::LightSubpixel));
    assert_eq!(Hinting::Mono as c_int, ttf::TTF_HINTING_MONO as c_int);
    assert_eq!(FontStyle::STRIKETHROUGH.bits(), ttf::TTF_STYLE_STRIKETHROUGH as c_int);
}

#[test]
fn missing_font_file() {
    let ttf = TtfContext::new().unwrap();

    let e = Font::open(&ttf, "/nonexistent/font.ttf", 12, 0).err().unwrap();
    assert_eq!(e.function(), Some("TTF_OpenFontIndex"));
}
