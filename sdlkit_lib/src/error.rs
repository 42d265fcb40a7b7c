use std::ffi::{c_int, CStr, NulError};
use sdl2::sys;
use thiserror::Error;
use crate::geometry::Rect;

pub type SdlResult<T> = ::std::result::Result<T, SdlError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdlError {
    /// A native call failed. `message` is SDL's last-error string captured
    /// right after the failure.
    #[error("{function} failed: {message}")]
    Sdl {
        function: &'static str,
        message: String,
    },
    #[error("String contains an interior NUL byte: {0}")]
    InvalidString(#[from] NulError),
    #[error("Unknown blend mode: {0:#x}")]
    UnknownBlendMode(u32),
    #[error("Unknown texture access: {0}")]
    UnknownTextureAccess(i32),
    #[error("Value out of range for {what}: {value}")]
    OutOfRange {
        what: &'static str,
        value: i64,
    },
    /// A rect reaching outside the object it addresses
    #[error("{what} {rect:?} is outside {bounds:?}")]
    OutOfBounds {
        what: &'static str,
        rect: Rect,
        bounds: Rect,
    },
    /// The surface's pixels are borrowed by a lock or a software renderer
    #[error("Surface is in use, cannot {0}")]
    SurfaceInUse(&'static str),
}

impl SdlError {
    /// Build an error for `function` from SDL's current error string.
    pub fn last(function: &'static str) -> SdlError {
        SdlError::Sdl {
            function,
            message: last_error(),
        }
    }

    /// Name of the native function that failed, if this is a native failure
    pub fn function(&self) -> Option<&'static str> {
        match self {
            SdlError::Sdl { function, .. } => Some(function),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SdlError::Sdl { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Read SDL's thread-local error string
pub fn last_error() -> String {
    // SAFETY: SDL_GetError never returns NULL, at worst an empty string
    unsafe {
        let msg = sys::SDL_GetError();
        if msg.is_null() {
            return String::new();
        }
        CStr::from_ptr(msg).to_string_lossy().into_owned()
    }
}

/// Map SDL's "0 on success, negative on failure" convention
pub(crate) fn check(code: c_int, function: &'static str) -> SdlResult<()> {
    if code < 0 {
        Err(SdlError::last(function))
    } else {
        Ok(())
    }
}

/// Convert a size/count coming from Rust into a C int
pub(crate) fn to_c_int(value: usize, what: &'static str) -> SdlResult<c_int> {
    c_int::try_from(value).map_err(|_| SdlError::OutOfRange {
        what,
        value: value as i64,
    })
}

/// Fail unless `rect` lies entirely within `bounds`. Empty rects are fine
/// as long as their origin is inside.
pub(crate) fn check_inside(what: &'static str, rect: Rect, bounds: Rect) -> SdlResult<()> {
    let (x, y, w, h) = (i64::from(rect.x), i64::from(rect.y), i64::from(rect.w), i64::from(rect.h));
    let (bx, by, bw, bh) = (i64::from(bounds.x), i64::from(bounds.y), i64::from(bounds.w), i64::from(bounds.h));

    if w < 0 || h < 0 || x < bx || y < by || x + w > bx + bw || y + h > by + bh {
        return Err(SdlError::OutOfBounds { what, rect, bounds });
    }
    Ok(())
}

#[cfg(any(feature = "image", feature = "ttf"))]
pub(crate) fn path_to_cstring(path: &std::path::Path) -> SdlResult<std::ffi::CString> {
    Ok(std::ffi::CString::new(path.to_string_lossy().as_bytes())?)
}

#[cfg(test)]
pub(crate) fn set_error(msg: &str) {
    let msg = std::ffi::CString::new(msg).unwrap();
    unsafe {
        sys::SDL_SetError(c"%s".as_ptr(), msg.as_ptr());
    }
}

#[test]
fn display_names_function_and_message() {
    let e = SdlError::Sdl {
        function: "SDL_CreateWindow",
        message: "No available video device".to_string(),
    };

    assert_eq!(e.to_string(), "SDL_CreateWindow failed: No available video device");
    assert_eq!(e.function(), Some("SDL_CreateWindow"));
    assert_eq!(e.message(), Some("No available video device"));
}

#[test]
fn last_captures_sdl_error_string() {
    set_error("texture is locked");

    let e = SdlError::last("SDL_LockTexture");
    assert_eq!(e.function(), Some("SDL_LockTexture"));
    assert_eq!(e.message(), Some("texture is locked"));
}

#[test]
fn check_maps_negative_codes() {
    set_error("bad things");

    assert!(check(0, "SDL_RenderClear").is_ok());
    assert!(check(3, "SDL_RenderClear").is_ok());

    let e = check(-1, "SDL_RenderClear").unwrap_err();
    assert_eq!(e.to_string(), "SDL_RenderClear failed: bad things");
}

#[test]
fn non_native_errors_have_no_function() {
    let e = SdlError::UnknownBlendMode(0x42);
    assert_eq!(e.function(), None);
    assert_eq!(e.message(), None);
    assert!(to_c_int(usize::MAX, "points").is_err());
    assert_eq!(to_c_int(12, "points").unwrap(), 12);
}

#[test]
fn inside_checks_every_edge() {
    let bounds = Rect::new(0, 0, 4, 4);

    assert!(check_inside("rect", Rect::new(0, 0, 4, 4), bounds).is_ok());
    assert!(check_inside("rect", Rect::new(3, 3, 1, 1), bounds).is_ok());
    assert!(check_inside("rect", Rect::new(2, 2, 0, 0), bounds).is_ok());

    for rect in [
        Rect::new(-1, 0, 2, 2),
        Rect::new(0, -1, 2, 2),
        Rect::new(3, 0, 2, 2),
        Rect::new(0, 0, 4, 8),
        Rect::new(1, 1, -1, 2),
        Rect::new(i32::MAX, 0, i32::MAX, 1),
    ] {
        let e = check_inside("rect", rect, bounds).unwrap_err();
        assert_eq!(e, SdlError::OutOfBounds { what: "rect", rect, bounds });
    }
}
