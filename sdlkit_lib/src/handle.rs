//! Ownership of native SDL handles.
//!
//! Each kind of native object is released by exactly one SDL function. A
//! `HandleKind` names that function, `Owned` calls it once when dropped and
//! `Shared` defers the call until the last clone goes away.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::rc::Rc;
use sdl2::sys;
use tracing::{debug, trace};
use crate::error::{SdlError, SdlResult};

pub trait HandleKind {
    type Raw;

    /// Human readable name used in logs
    const NAME: &'static str;

    /// Release the native object.
    ///
    /// # Safety
    ///
    /// `raw` must be a live handle of this kind, released at most once.
    unsafe fn release(raw: *mut Self::Raw);
}

/// Exclusive owner of a native handle
pub struct Owned<K: HandleKind> {
    raw: NonNull<K::Raw>,
    _kind: PhantomData<K>,
}

/// Reference-counted owner of a native handle
pub type Shared<K> = Rc<Owned<K>>;

impl<K: HandleKind> Owned<K> {
    /// Take ownership of `raw` as returned by `function`. A NULL pointer is
    /// SDL's failure signal and is turned into an error carrying SDL's
    /// message.
    ///
    /// # Safety
    ///
    /// A non-null `raw` must be a live handle of kind `K` that nothing else
    /// releases.
    pub unsafe fn from_raw(raw: *mut K::Raw, function: &'static str) -> SdlResult<Owned<K>> {
        match NonNull::new(raw) {
            Some(raw) => {
                debug!("{}: acquired {:p} from {}", K::NAME, raw, function);
                Ok(Owned {
                    raw,
                    _kind: PhantomData,
                })
            }
            None => Err(SdlError::last(function)),
        }
    }

    pub fn as_ptr(&self) -> *mut K::Raw {
        self.raw.as_ptr()
    }

    pub fn into_shared(self) -> Shared<K> {
        Rc::new(self)
    }
}

impl<K: HandleKind> Drop for Owned<K> {
    fn drop(&mut self) {
        trace!("{}: releasing {:p}", K::NAME, self.raw);
        // SAFETY: `raw` was live when we took it and we're the only owner
        unsafe { K::release(self.raw.as_ptr()) }
    }
}

impl<K: HandleKind> fmt::Debug for Owned<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:p})", K::NAME, self.raw)
    }
}

pub struct WindowKind;

impl HandleKind for WindowKind {
    type Raw = sys::SDL_Window;
    const NAME: &'static str = "Window";

    /// Also drops the video subsystem reference taken by `Window::new`
    unsafe fn release(raw: *mut sys::SDL_Window) {
        unsafe {
            sys::SDL_DestroyWindow(raw);
            sys::SDL_QuitSubSystem(sys::SDL_INIT_VIDEO);
        }
    }
}

pub struct RendererKind;

impl HandleKind for RendererKind {
    type Raw = sys::SDL_Renderer;
    const NAME: &'static str = "Renderer";

    unsafe fn release(raw: *mut sys::SDL_Renderer) {
        unsafe { sys::SDL_DestroyRenderer(raw) }
    }
}

pub struct TextureKind;

impl HandleKind for TextureKind {
    type Raw = sys::SDL_Texture;
    const NAME: &'static str = "Texture";

    unsafe fn release(raw: *mut sys::SDL_Texture) {
        unsafe { sys::SDL_DestroyTexture(raw) }
    }
}

pub struct SurfaceKind;

impl HandleKind for SurfaceKind {
    type Raw = sys::SDL_Surface;
    const NAME: &'static str = "Surface";

    unsafe fn release(raw: *mut sys::SDL_Surface) {
        unsafe { sys::SDL_FreeSurface(raw) }
    }
}

#[cfg(feature = "ttf")]
pub struct FontKind;

#[cfg(feature = "ttf")]
impl HandleKind for FontKind {
    type Raw = sys::ttf::TTF_Font;
    const NAME: &'static str = "Font";

    unsafe fn release(raw: *mut sys::ttf::TTF_Font) {
        unsafe { sys::ttf::TTF_CloseFont(raw) }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use super::*;

    thread_local! {
        static RELEASED: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    }

    struct CountingKind;

    impl HandleKind for CountingKind {
        type Raw = u32;
        const NAME: &'static str = "Counting";

        unsafe fn release(raw: *mut u32) {
            RELEASED.with(|r| r.borrow_mut().push(raw as usize));
            // The test handles are leaked boxes, reclaim them
            drop(unsafe { Box::from_raw(raw) });
        }
    }

    fn released() -> Vec<usize> {
        RELEASED.with(|r| r.borrow().clone())
    }

    fn make(v: u32) -> (Owned<CountingKind>, usize) {
        let raw = Box::into_raw(Box::new(v));
        let owned = unsafe { Owned::from_raw(raw, "make") }.unwrap();
        (owned, raw as usize)
    }

    #[test]
    fn owned_releases_once_on_drop() {
        let (a, addr) = make(1);
        assert_eq!(a.as_ptr() as usize, addr);
        assert!(released().is_empty());

        drop(a);
        assert_eq!(released(), vec![addr]);
    }

    #[test]
    fn moved_owner_releases_once() {
        let (a, addr) = make(2);
        let b = a;
        let v = vec![b];
        drop(v);

        assert_eq!(released(), vec![addr]);
    }

    #[test]
    fn shared_release_waits_for_last_clone() {
        let (a, addr) = make(3);
        let s1 = a.into_shared();
        let s2 = Rc::clone(&s1);
        let s3 = Rc::clone(&s2);

        drop(s1);
        drop(s3);
        assert!(released().is_empty());
        assert_eq!(unsafe { *s2.as_ptr() }, 3);

        drop(s2);
        assert_eq!(released(), vec![addr]);
    }

    #[test]
    fn null_is_an_error_and_releases_nothing() {
        crate::error::set_error("out of memory");

        let r = unsafe { Owned::<CountingKind>::from_raw(std::ptr::null_mut(), "SDL_CreateThing") };
        let e = r.unwrap_err();

        assert_eq!(e.to_string(), "SDL_CreateThing failed: out of memory");
        assert!(released().is_empty());
    }
}
