use serde::{Deserialize, Serialize};
use crate::flags::{RendererFlags, WindowFlags};
use crate::window::WindowPos;

/// How to open a window
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct WindowSettings {
    pub title: String,
    pub x: WindowPos,
    pub y: WindowPos,
    pub width: i32,
    pub height: i32,
    pub resizable: bool,
    pub fullscreen: FullscreenMode,
    pub borderless: bool,
    pub hidden: bool,
    pub high_dpi: bool,
}

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FullscreenMode {
    #[default]
    Windowed,
    /// Change the display mode to the window size
    Exclusive,
    /// Borderless window covering the desktop
    Desktop,
}

impl Default for WindowSettings {
    fn default() -> WindowSettings {
        WindowSettings {
            title: "sdlkit".to_string(),
            x: WindowPos::Centered,
            y: WindowPos::Centered,
            width: 800,
            height: 600,
            resizable: false,
            fullscreen: FullscreenMode::Windowed,
            borderless: false,
            hidden: false,
            high_dpi: false,
        }
    }
}

impl WindowSettings {
    pub fn flags(&self) -> WindowFlags {
        let mut flags = if self.hidden {
            WindowFlags::HIDDEN
        } else {
            WindowFlags::SHOWN
        };

        flags.set(WindowFlags::RESIZABLE, self.resizable);
        flags.set(WindowFlags::BORDERLESS, self.borderless);
        flags.set(WindowFlags::ALLOW_HIGHDPI, self.high_dpi);

        match self.fullscreen {
            FullscreenMode::Windowed => (),
            FullscreenMode::Exclusive => flags |= WindowFlags::FULLSCREEN,
            FullscreenMode::Desktop => flags |= WindowFlags::FULLSCREEN_DESKTOP,
        }

        flags
    }
}

/// How to create a renderer for a window
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Debug)]
pub struct RendererSettings {
    /// Rendering driver, `None` picks the first one supporting the flags
    pub driver_index: Option<u32>,
    pub software: bool,
    pub vsync: bool,
    pub target_texture: bool,
}

impl Default for RendererSettings {
    fn default() -> RendererSettings {
        RendererSettings {
            driver_index: None,
            software: false,
            vsync: true,
            target_texture: false,
        }
    }
}

impl RendererSettings {
    pub fn flags(&self) -> RendererFlags {
        let mut flags = if self.software {
            RendererFlags::SOFTWARE
        } else {
            RendererFlags::ACCELERATED
        };

        flags.set(RendererFlags::PRESENTVSYNC, self.vsync);
        flags.set(RendererFlags::TARGETTEXTURE, self.target_texture);

        flags
    }
}

#[test]
fn default_window_flags() {
    let settings = WindowSettings::default();

    assert_eq!(settings.flags(), WindowFlags::SHOWN);
}

#[test]
fn window_flags_follow_settings() {
    let settings = WindowSettings {
        hidden: true,
        resizable: true,
        fullscreen: FullscreenMode::Desktop,
        ..Default::default()
    };

    let flags = settings.flags();
    assert!(flags.contains(WindowFlags::HIDDEN | WindowFlags::RESIZABLE | WindowFlags::FULLSCREEN_DESKTOP));
    assert!(!flags.contains(WindowFlags::SHOWN));
    assert!(!flags.contains(WindowFlags::BORDERLESS));
}

#[test]
fn renderer_flags_follow_settings() {
    assert_eq!(
        RendererSettings::default().flags(),
        RendererFlags::ACCELERATED | RendererFlags::PRESENTVSYNC
    );

    let software = RendererSettings {
        software: true,
        vsync: false,
        target_texture: true,
        ..Default::default()
    };
    assert_eq!(software.flags(), RendererFlags::SOFTWARE | RendererFlags::TARGETTEXTURE);
}
