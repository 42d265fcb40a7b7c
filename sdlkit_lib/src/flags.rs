use bitflags::bitflags;
use sdl2::sys;
use sdl2::sys::{SDL_RendererFlags, SDL_RendererFlip, SDL_WindowFlags};

bitflags! {
    /// Subsystems passed to `SDL_Init` and friends
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InitFlags: u32 {
        const TIMER = sys::SDL_INIT_TIMER;
        const AUDIO = sys::SDL_INIT_AUDIO;
        const VIDEO = sys::SDL_INIT_VIDEO;
        const JOYSTICK = sys::SDL_INIT_JOYSTICK;
        const HAPTIC = sys::SDL_INIT_HAPTIC;
        const GAMECONTROLLER = sys::SDL_INIT_GAMECONTROLLER;
        const EVENTS = sys::SDL_INIT_EVENTS;
        const SENSOR = sys::SDL_INIT_SENSOR;
        const EVERYTHING = sys::SDL_INIT_EVERYTHING;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const FULLSCREEN = SDL_WindowFlags::SDL_WINDOW_FULLSCREEN as u32;
        const OPENGL = SDL_WindowFlags::SDL_WINDOW_OPENGL as u32;
        const SHOWN = SDL_WindowFlags::SDL_WINDOW_SHOWN as u32;
        const HIDDEN = SDL_WindowFlags::SDL_WINDOW_HIDDEN as u32;
        const BORDERLESS = SDL_WindowFlags::SDL_WINDOW_BORDERLESS as u32;
        const RESIZABLE = SDL_WindowFlags::SDL_WINDOW_RESIZABLE as u32;
        const MINIMIZED = SDL_WindowFlags::SDL_WINDOW_MINIMIZED as u32;
        const MAXIMIZED = SDL_WindowFlags::SDL_WINDOW_MAXIMIZED as u32;
        const MOUSE_GRABBED = SDL_WindowFlags::SDL_WINDOW_MOUSE_GRABBED as u32;
        const INPUT_FOCUS = SDL_WindowFlags::SDL_WINDOW_INPUT_FOCUS as u32;
        const MOUSE_FOCUS = SDL_WindowFlags::SDL_WINDOW_MOUSE_FOCUS as u32;
        /// Fullscreen at the desktop resolution. Includes `FULLSCREEN`.
        const FULLSCREEN_DESKTOP = SDL_WindowFlags::SDL_WINDOW_FULLSCREEN_DESKTOP as u32;
        const FOREIGN = SDL_WindowFlags::SDL_WINDOW_FOREIGN as u32;
        const ALLOW_HIGHDPI = SDL_WindowFlags::SDL_WINDOW_ALLOW_HIGHDPI as u32;
        const MOUSE_CAPTURE = SDL_WindowFlags::SDL_WINDOW_MOUSE_CAPTURE as u32;
        const ALWAYS_ON_TOP = SDL_WindowFlags::SDL_WINDOW_ALWAYS_ON_TOP as u32;
        const SKIP_TASKBAR = SDL_WindowFlags::SDL_WINDOW_SKIP_TASKBAR as u32;
        const UTILITY = SDL_WindowFlags::SDL_WINDOW_UTILITY as u32;
        const TOOLTIP = SDL_WindowFlags::SDL_WINDOW_TOOLTIP as u32;
        const POPUP_MENU = SDL_WindowFlags::SDL_WINDOW_POPUP_MENU as u32;
        const KEYBOARD_GRABBED = SDL_WindowFlags::SDL_WINDOW_KEYBOARD_GRABBED as u32;
        const VULKAN = SDL_WindowFlags::SDL_WINDOW_VULKAN as u32;
        const METAL = SDL_WindowFlags::SDL_WINDOW_METAL as u32;

        // SDL may report bits we don't know about
        const _ = !0;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RendererFlags: u32 {
        const SOFTWARE = SDL_RendererFlags::SDL_RENDERER_SOFTWARE as u32;
        const ACCELERATED = SDL_RendererFlags::SDL_RENDERER_ACCELERATED as u32;
        const PRESENTVSYNC = SDL_RendererFlags::SDL_RENDERER_PRESENTVSYNC as u32;
        const TARGETTEXTURE = SDL_RendererFlags::SDL_RENDERER_TARGETTEXTURE as u32;
    }
}

bitflags! {
    /// Mirroring applied by `Renderer::copy_ex` and `Renderer::fill_copy`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flip: u32 {
        const HORIZONTAL = SDL_RendererFlip::SDL_FLIP_HORIZONTAL as u32;
        const VERTICAL = SDL_RendererFlip::SDL_FLIP_VERTICAL as u32;
    }
}

#[test]
fn fullscreen_desktop_implies_fullscreen() {
    assert!(WindowFlags::FULLSCREEN_DESKTOP.contains(WindowFlags::FULLSCREEN));
}

#[test]
fn unknown_window_bits_are_kept() {
    let f = WindowFlags::from_bits_retain(0x4000_0000 | WindowFlags::SHOWN.bits());

    assert!(f.contains(WindowFlags::SHOWN));
    assert_eq!(f.bits() & 0x4000_0000, 0x4000_0000);
}

#[test]
fn everything_covers_video() {
    assert!(InitFlags::EVERYTHING.contains(InitFlags::VIDEO | InitFlags::EVENTS));
    assert_eq!((Flip::HORIZONTAL | Flip::VERTICAL).bits(), 3);
}
