use std::ffi::c_void;
use std::ptr;
use std::slice;
use sdl2::sys;
use tracing::trace;
use crate::error::{check, SdlResult};
use crate::geometry::{opt_ptr, Rect};
use super::Texture;

/// Locked area of a streaming texture.
///
/// The contents are not guaranteed to be the previous pixels, write every
/// byte that matters. The texture is unlocked and updated on drop.
pub struct TextureLock<'a> {
    texture: &'a mut Texture,
    pixels: *mut u8,
    pitch: usize,
    len: usize,
}

impl<'a> TextureLock<'a> {
    /// `row_bytes` is the width of the locked area in bytes, `None` when the
    /// whole texture is locked
    pub(super) fn new(
        texture: &'a mut Texture,
        rect: Option<Rect>,
        rows: usize,
        row_bytes: Option<usize>,
    ) -> SdlResult<TextureLock<'a>> {
        let rect = rect.map(sys::SDL_Rect::from);
        let mut pixels: *mut c_void = ptr::null_mut();
        let mut pitch = 0;

        check(
            unsafe { sys::SDL_LockTexture(texture.as_ptr(), opt_ptr(&rect), &mut pixels, &mut pitch) },
            "SDL_LockTexture",
        )?;
        trace!("Locked texture {:p}, pitch {}", texture.as_ptr(), pitch);

        let pitch = pitch.max(0) as usize;
        // A sub-rect's last row ends before the padding of the buffer row
        let len = match (rows, row_bytes) {
            (0, _) => 0,
            (_, None) => pitch * rows,
            (_, Some(row)) => pitch * (rows - 1) + row.min(pitch),
        };

        Ok(TextureLock {
            texture,
            pixels: pixels.cast(),
            pitch,
            len,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        if self.pixels.is_null() {
            return &[];
        }
        unsafe { slice::from_raw_parts(self.pixels, self.len) }
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        if self.pixels.is_null() {
            return &mut [];
        }
        unsafe { slice::from_raw_parts_mut(self.pixels, self.len) }
    }

    /// Distance in bytes between the starts of two rows
    pub fn pitch(&self) -> usize {
        self.pitch
    }
}

impl Drop for TextureLock<'_> {
    fn drop(&mut self) {
        unsafe { sys::SDL_UnlockTexture(self.texture.as_ptr()) };
    }
}
