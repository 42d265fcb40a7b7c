use std::fmt;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use sdl2::sys::{SDL_BlendMode, SDL_PixelFormatEnum};
use serde::{Deserialize, Serialize};
use crate::error::{SdlError, SdlResult};

/// SDL pixel format word (`SDL_PIXELFORMAT_*`).
///
/// Kept as a raw `u32` because SDL may hand back formats this crate has no
/// name for.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct PixelFormat(pub u32);

impl PixelFormat {
    pub const UNKNOWN: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_UNKNOWN as u32);
    pub const INDEX8: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_INDEX8 as u32);
    pub const RGB565: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_RGB565 as u32);
    pub const RGB24: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_RGB24 as u32);
    pub const BGR24: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_BGR24 as u32);
    pub const RGB888: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_XRGB8888 as u32);
    pub const ARGB8888: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_ARGB8888 as u32);
    pub const RGBA8888: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_RGBA8888 as u32);
    pub const ABGR8888: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_ABGR8888 as u32);
    pub const BGRA8888: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_BGRA8888 as u32);
    pub const YV12: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_YV12 as u32);
    pub const IYUV: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_IYUV as u32);
    pub const YUY2: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_YUY2 as u32);
    pub const UYVY: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_UYVY as u32);
    pub const YVYU: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_YVYU as u32);
    pub const NV12: PixelFormat = PixelFormat(SDL_PixelFormatEnum::SDL_PIXELFORMAT_NV12 as u32);

    /// Byte-order independent 32bit RGBA, i.e. bytes in memory are `R G B A`
    #[cfg(target_endian = "little")]
    pub const RGBA32: PixelFormat = PixelFormat::ABGR8888;
    #[cfg(target_endian = "big")]
    pub const RGBA32: PixelFormat = PixelFormat::RGBA8888;

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// FourCC (YUV and friends) formats don't follow the packed layout
    pub const fn is_fourcc(self) -> bool {
        self.0 != 0 && (self.0 >> 28) & 0x0f != 1
    }

    pub const fn bits_per_pixel(self) -> u32 {
        if self.is_fourcc() {
            return 0;
        }
        (self.0 >> 8) & 0xff
    }

    pub const fn bytes_per_pixel(self) -> u32 {
        if self.is_fourcc() {
            if self.0 == PixelFormat::YUY2.0 || self.0 == PixelFormat::UYVY.0 || self.0 == PixelFormat::YVYU.0 {
                2
            } else {
                1
            }
        } else {
            self.0 & 0xff
        }
    }
}

impl PixelFormat {
    /// Planar YUV: a full size Y plane followed by two half size chroma planes
    /// (or one interleaved one)
    pub const fn is_planar(self) -> bool {
        self.0 == PixelFormat::YV12.0
            || self.0 == PixelFormat::IYUV.0
            || self.0 == PixelFormat::NV12.0
            || self.0 == SDL_PixelFormatEnum::SDL_PIXELFORMAT_NV21 as u32
    }

    /// Smallest pitch holding a row of `w` pixels (of the Y plane for planar
    /// formats)
    pub fn min_pitch(self, w: i32) -> usize {
        let w = w.max(0) as usize;

        if self.is_planar() {
            w
        } else if self.is_fourcc() {
            // Packed YUV stores pixel pairs in 4 bytes
            w.div_ceil(2) * 4
        } else {
            (w * self.bits_per_pixel() as usize).div_ceil(8)
        }
    }

    /// Bytes SDL reads for `rows` rows at `pitch`, chroma planes included
    pub fn buffer_len(self, pitch: usize, rows: usize) -> usize {
        if self.is_planar() {
            pitch * rows + 2 * pitch.div_ceil(2) * rows.div_ceil(2)
        } else {
            pitch * rows
        }
    }
}

impl fmt::Debug for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PixelFormat({:#010x})", self.0)
    }
}

#[derive(Serialize, Deserialize, FromPrimitive, ToPrimitive, Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u32)]
pub enum BlendMode {
    #[default]
    None = 0,
    Blend = 1,
    Add = 2,
    Mod = 4,
    Mul = 8,
}

impl BlendMode {
    /// Convert a mode read back from SDL. Custom modes built with
    /// `SDL_ComposeCustomBlendMode` are reported as errors.
    pub fn from_raw(raw: u32) -> SdlResult<BlendMode> {
        BlendMode::from_u32(raw).ok_or(SdlError::UnknownBlendMode(raw))
    }

    pub fn to_sdl(self) -> SDL_BlendMode {
        match self {
            BlendMode::None => SDL_BlendMode::SDL_BLENDMODE_NONE,
            BlendMode::Blend => SDL_BlendMode::SDL_BLENDMODE_BLEND,
            BlendMode::Add => SDL_BlendMode::SDL_BLENDMODE_ADD,
            BlendMode::Mod => SDL_BlendMode::SDL_BLENDMODE_MOD,
            BlendMode::Mul => SDL_BlendMode::SDL_BLENDMODE_MUL,
        }
    }

    pub fn raw(self) -> u32 {
        self.to_u32().unwrap_or(0)
    }
}

/// Read a blend mode through one of the `SDL_Get*BlendMode` calls.
///
/// SDL may store a composed custom mode that is not a valid
/// `SDL_BlendMode` variant, so the value goes through a plain integer.
pub(crate) fn read_blend_mode(
    function: &'static str,
    get: impl FnOnce(*mut SDL_BlendMode) -> std::ffi::c_int,
) -> SdlResult<BlendMode> {
    let mut raw: u32 = 0;

    crate::error::check(get(&mut raw as *mut u32 as *mut SDL_BlendMode), function)?;

    BlendMode::from_raw(raw)
}

#[test]
fn packed_format_sizes() {
    assert_eq!(PixelFormat::ARGB8888.bits_per_pixel(), 32);
    assert_eq!(PixelFormat::ARGB8888.bytes_per_pixel(), 4);
    assert_eq!(PixelFormat::RGB24.bytes_per_pixel(), 3);
    assert_eq!(PixelFormat::RGB565.bits_per_pixel(), 16);
    assert!(!PixelFormat::RGBA8888.is_fourcc());
}

#[test]
fn fourcc_format_sizes() {
    assert!(PixelFormat::IYUV.is_fourcc());
    assert_eq!(PixelFormat::IYUV.bytes_per_pixel(), 1);
    assert_eq!(PixelFormat::YUY2.bytes_per_pixel(), 2);
    assert!(!PixelFormat::UNKNOWN.is_fourcc());
}

#[test]
fn blend_mode_conversion() {
    assert_eq!(BlendMode::from_raw(1).unwrap(), BlendMode::Blend);
    assert_eq!(BlendMode::from_raw(8).unwrap(), BlendMode::Mul);
    assert_eq!(BlendMode::Mod.raw(), 4);
    assert_eq!(BlendMode::from_raw(3), Err(SdlError::UnknownBlendMode(3)));
}

#[test]
fn row_and_buffer_sizes() {
    assert_eq!(PixelFormat::ARGB8888.min_pitch(4), 16);
    assert_eq!(PixelFormat::RGB24.min_pitch(3), 9);
    assert_eq!(PixelFormat::INDEX8.min_pitch(5), 5);
    assert_eq!(PixelFormat::YUY2.min_pitch(3), 8);
    assert_eq!(PixelFormat::IYUV.min_pitch(5), 5);
    assert_eq!(PixelFormat::ARGB8888.min_pitch(-2), 0);

    assert_eq!(PixelFormat::ARGB8888.buffer_len(16, 3), 48);
    assert_eq!(PixelFormat::IYUV.buffer_len(4, 4), 24);
    assert_eq!(PixelFormat::NV12.buffer_len(5, 3), 15 + 2 * 3 * 2);
    assert!(PixelFormat::YV12.is_planar());
    assert!(!PixelFormat::YUY2.is_planar());
}
