use std::ffi::{c_int, CStr, CString};
use std::mem::MaybeUninit;
use std::rc::Rc;
use sdl2::sys;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::error::{check, SdlError, SdlResult};
use crate::flags::WindowFlags;
use crate::geometry::Point;
use crate::handle::{Owned, Shared, WindowKind};
use crate::pixels::PixelFormat;
use crate::settings::WindowSettings;
use crate::surface::Surface;

/// Initial window coordinate on one axis
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum WindowPos {
    #[default]
    Undefined,
    Centered,
    At(i32),
}

impl WindowPos {
    pub fn to_raw(self) -> c_int {
        match self {
            WindowPos::Undefined => sys::SDL_WINDOWPOS_UNDEFINED_MASK as c_int,
            WindowPos::Centered => sys::SDL_WINDOWPOS_CENTERED_MASK as c_int,
            WindowPos::At(v) => v,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DisplayMode {
    pub format: PixelFormat,
    pub w: i32,
    pub h: i32,
    /// In Hz, 0 if unknown
    pub refresh_rate: i32,
}

impl From<sys::SDL_DisplayMode> for DisplayMode {
    fn from(m: sys::SDL_DisplayMode) -> DisplayMode {
        DisplayMode {
            format: PixelFormat(m.format),
            w: m.w,
            h: m.h,
            refresh_rate: m.refresh_rate,
        }
    }
}

/// An SDL window.
///
/// The native window is reference counted internally so that renderers
/// created for it can keep it alive. From the outside a `Window` is still a
/// single, non-clonable owner.
pub struct Window {
    window: Shared<WindowKind>,
}

fn read_pair(f: impl FnOnce(*mut c_int, *mut c_int)) -> Point {
    let (mut a, mut b) = (0, 0);
    f(&mut a, &mut b);
    Point::new(a, b)
}

impl Window {
    pub fn new(title: &str, x: WindowPos, y: WindowPos, w: i32, h: i32, flags: WindowFlags) -> SdlResult<Window> {
        let title = CString::new(title)?;

        // Released along with the window, see `WindowKind`
        check(unsafe { sys::SDL_InitSubSystem(sys::SDL_INIT_VIDEO) }, "SDL_InitSubSystem")?;

        let raw = unsafe { sys::SDL_CreateWindow(title.as_ptr(), x.to_raw(), y.to_raw(), w, h, flags.bits()) };
        let window = match unsafe { Owned::from_raw(raw, "SDL_CreateWindow") } {
            Ok(window) => window,
            Err(e) => {
                unsafe { sys::SDL_QuitSubSystem(sys::SDL_INIT_VIDEO) };
                return Err(e);
            }
        };

        debug!("Created {}x{} window {:?}", w, h, title);

        Ok(Window {
            window: window.into_shared(),
        })
    }

    pub fn from_settings(settings: &WindowSettings) -> SdlResult<Window> {
        Window::new(
            &settings.title,
            settings.x,
            settings.y,
            settings.width,
            settings.height,
            settings.flags(),
        )
    }

    pub fn as_ptr(&self) -> *mut sys::SDL_Window {
        self.window.as_ptr()
    }

    /// Handle keeping the native window alive
    pub(crate) fn keep_alive(&self) -> Shared<WindowKind> {
        Rc::clone(&self.window)
    }

    pub fn id(&self) -> u32 {
        unsafe { sys::SDL_GetWindowID(self.as_ptr()) }
    }

    pub fn size(&self) -> Point {
        read_pair(|w, h| unsafe { sys::SDL_GetWindowSize(self.as_ptr(), w, h) })
    }

    pub fn width(&self) -> i32 {
        self.size().x
    }

    pub fn height(&self) -> i32 {
        self.size().y
    }

    /// Size in pixels of the drawable area, which differs from `size` on
    /// high-DPI displays
    pub fn drawable_size(&self) -> Point {
        read_pair(|w, h| unsafe { sys::SDL_GL_GetDrawableSize(self.as_ptr(), w, h) })
    }

    pub fn drawable_width(&self) -> i32 {
        self.drawable_size().x
    }

    pub fn drawable_height(&self) -> i32 {
        self.drawable_size().y
    }

    pub fn set_size(&mut self, size: Point) -> &mut Self {
        unsafe { sys::SDL_SetWindowSize(self.as_ptr(), size.x, size.y) };
        self
    }

    pub fn title(&self) -> String {
        let title = unsafe { sys::SDL_GetWindowTitle(self.as_ptr()) };
        if title.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(title) }.to_string_lossy().into_owned()
    }

    pub fn set_title(&mut self, title: &str) -> SdlResult<&mut Self> {
        let title = CString::new(title)?;
        unsafe { sys::SDL_SetWindowTitle(self.as_ptr(), title.as_ptr()) };
        Ok(self)
    }

    pub fn maximize(&mut self) -> &mut Self {
        unsafe { sys::SDL_MaximizeWindow(self.as_ptr()) };
        self
    }

    pub fn minimize(&mut self) -> &mut Self {
        unsafe { sys::SDL_MinimizeWindow(self.as_ptr()) };
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        unsafe { sys::SDL_HideWindow(self.as_ptr()) };
        self
    }

    pub fn restore(&mut self) -> &mut Self {
        unsafe { sys::SDL_RestoreWindow(self.as_ptr()) };
        self
    }

    pub fn raise(&mut self) -> &mut Self {
        unsafe { sys::SDL_RaiseWindow(self.as_ptr()) };
        self
    }

    pub fn show(&mut self) -> &mut Self {
        unsafe { sys::SDL_ShowWindow(self.as_ptr()) };
        self
    }

    /// Switch between windowed (empty flags), `FULLSCREEN` and
    /// `FULLSCREEN_DESKTOP`
    pub fn set_fullscreen(&mut self, flags: WindowFlags) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetWindowFullscreen(self.as_ptr(), flags.bits()) },
            "SDL_SetWindowFullscreen",
        )?;
        Ok(self)
    }

    pub fn brightness(&self) -> f32 {
        unsafe { sys::SDL_GetWindowBrightness(self.as_ptr()) }
    }

    pub fn set_brightness(&mut self, brightness: f32) -> SdlResult<&mut Self> {
        check(
            unsafe { sys::SDL_SetWindowBrightness(self.as_ptr(), brightness) },
            "SDL_SetWindowBrightness",
        )?;
        Ok(self)
    }

    pub fn position(&self) -> Point {
        read_pair(|x, y| unsafe { sys::SDL_GetWindowPosition(self.as_ptr(), x, y) })
    }

    pub fn set_position(&mut self, x: WindowPos, y: WindowPos) -> &mut Self {
        unsafe { sys::SDL_SetWindowPosition(self.as_ptr(), x.to_raw(), y.to_raw()) };
        self
    }

    pub fn minimum_size(&self) -> Point {
        read_pair(|w, h| unsafe { sys::SDL_GetWindowMinimumSize(self.as_ptr(), w, h) })
    }

    pub fn set_minimum_size(&mut self, size: Point) -> &mut Self {
        unsafe { sys::SDL_SetWindowMinimumSize(self.as_ptr(), size.x, size.y) };
        self
    }

    pub fn maximum_size(&self) -> Point {
        read_pair(|w, h| unsafe { sys::SDL_GetWindowMaximumSize(self.as_ptr(), w, h) })
    }

    pub fn set_maximum_size(&mut self, size: Point) -> &mut Self {
        unsafe { sys::SDL_SetWindowMaximumSize(self.as_ptr(), size.x, size.y) };
        self
    }

    pub fn grab(&self) -> bool {
        unsafe { sys::SDL_GetWindowGrab(self.as_ptr()) == sys::SDL_bool::SDL_TRUE }
    }

    pub fn set_grab(&mut self, grabbed: bool) -> &mut Self {
        unsafe { sys::SDL_SetWindowGrab(self.as_ptr(), sdl_bool(grabbed)) };
        self
    }

    pub fn display_index(&self) -> SdlResult<i32> {
        let index = unsafe { sys::SDL_GetWindowDisplayIndex(self.as_ptr()) };
        if index < 0 {
            return Err(SdlError::last("SDL_GetWindowDisplayIndex"));
        }
        Ok(index)
    }

    /// Display mode used when the window is fullscreen
    pub fn display_mode(&self) -> SdlResult<DisplayMode> {
        let mut mode = MaybeUninit::<sys::SDL_DisplayMode>::uninit();

        check(
            unsafe { sys::SDL_GetWindowDisplayMode(self.as_ptr(), mode.as_mut_ptr()) },
            "SDL_GetWindowDisplayMode",
        )?;

        Ok(unsafe { mode.assume_init() }.into())
    }

    pub fn flags(&self) -> WindowFlags {
        WindowFlags::from_bits_retain(unsafe { sys::SDL_GetWindowFlags(self.as_ptr()) })
    }

    pub fn set_icon(&mut self, icon: &Surface) -> SdlResult<&mut Self> {
        icon.ensure_unlocked("use as window icon")?;
        unsafe { sys::SDL_SetWindowIcon(self.as_ptr(), icon.as_ptr()) };
        Ok(self)
    }

    pub fn set_bordered(&mut self, bordered: bool) -> &mut Self {
        unsafe { sys::SDL_SetWindowBordered(self.as_ptr(), sdl_bool(bordered)) };
        self
    }
}

pub(crate) fn sdl_bool(b: bool) -> sys::SDL_bool {
    if b {
        sys::SDL_bool::SDL_TRUE
    } else {
        sys::SDL_bool::SDL_FALSE
    }
}

#[test]
fn window_positions() {
    assert_eq!(WindowPos::At(-20).to_raw(), -20);
    assert_eq!(WindowPos::Centered.to_raw() as u32, 0x2FFF_0000);
    assert_eq!(WindowPos::Undefined.to_raw() as u32, 0x1FFF_0000);
}
