use std::rc::Rc;
use std::slice;
use sdl2::sys;
use tracing::trace;
use crate::error::{check, SdlResult};
use crate::pixels::PixelFormat;
use super::{must_lock, SurfaceHandle};

/// Direct access to a surface's pixels.
///
/// Holds its own reference to the surface, so the pixels stay valid even if
/// the `Surface` it came from is dropped first. While it lives nothing else
/// writes to or reads from the pixels through the wrappers.
pub struct SurfaceLock {
    handle: Rc<SurfaceHandle>,
    // SDL_LockSurface was needed and succeeded
    sdl_locked: bool,
}

impl SurfaceLock {
    pub(super) fn new(handle: Rc<SurfaceHandle>) -> SdlResult<SurfaceLock> {
        handle.acquire_lock()?;

        // SAFETY: `handle` keeps the surface alive
        let sdl_locked = must_lock(unsafe { &*handle.as_ptr() });

        if sdl_locked {
            if let Err(e) = check(unsafe { sys::SDL_LockSurface(handle.as_ptr()) }, "SDL_LockSurface") {
                handle.release_lock();
                return Err(e);
            }
            trace!("Locked surface {:p}", handle.as_ptr());
        }

        Ok(SurfaceLock { handle, sdl_locked })
    }

    fn raw(&self) -> &sys::SDL_Surface {
        unsafe { &*self.handle.as_ptr() }
    }

    fn len(&self) -> usize {
        let raw = self.raw();
        raw.pitch.max(0) as usize * raw.h.max(0) as usize
    }

    /// All rows, `pitch()` bytes each
    pub fn pixels(&self) -> &[u8] {
        let raw = self.raw();
        if raw.pixels.is_null() {
            return &[];
        }
        unsafe { slice::from_raw_parts(raw.pixels as *const u8, self.len()) }
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        let (pixels, len) = (self.raw().pixels, self.len());
        if pixels.is_null() {
            return &mut [];
        }
        unsafe { slice::from_raw_parts_mut(pixels as *mut u8, len) }
    }

    /// Bytes per row, including padding
    pub fn pitch(&self) -> usize {
        self.raw().pitch.max(0) as usize
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat(unsafe { (*self.raw().format).format })
    }

    pub fn width(&self) -> i32 {
        self.raw().w
    }

    pub fn height(&self) -> i32 {
        self.raw().h
    }
}

impl Drop for SurfaceLock {
    fn drop(&mut self) {
        if self.sdl_locked {
            unsafe { sys::SDL_UnlockSurface(self.handle.as_ptr()) };
            trace!("Unlocked surface {:p}", self.handle.as_ptr());
        }
        self.handle.release_lock();
    }
}
