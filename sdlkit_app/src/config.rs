use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use ini::{Ini, Properties};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use sdlkit_lib::{Flip, FullscreenMode, RendererSettings, WindowPos, WindowSettings};
use tracing::{info, warn};
use crate::error::{AppError, Result};

/// Mirroring of the scrolling tiles, stored as a number in the config file
#[derive(FromPrimitive, Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FlipMode {
    #[default]
    None = 0,
    Horizontal = 1,
    Vertical = 2,
    Both = 3,
}

impl FlipMode {
    pub fn flip(self) -> Flip {
        match self {
            FlipMode::None => Flip::empty(),
            FlipMode::Horizontal => Flip::HORIZONTAL,
            FlipMode::Vertical => Flip::VERTICAL,
            FlipMode::Both => Flip::HORIZONTAL | Flip::VERTICAL,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct DemoSettings {
    /// Edge of one checkerboard square, in pixels
    pub tile_size: i32,
    /// Pixels the tiling moves per frame
    pub scroll_speed: i32,
    pub flip: FlipMode,
    /// Run time before quitting on its own, `None` runs until the window closes
    pub duration: Option<Duration>,
    pub font: Option<PathBuf>,
    pub font_size: i32,
}

impl Default for DemoSettings {
    fn default() -> DemoSettings {
        DemoSettings {
            tile_size: 32,
            scroll_speed: 1,
            flip: FlipMode::None,
            duration: None,
            font: None,
            font_size: 24,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Config {
    pub window: WindowSettings,
    pub renderer: RendererSettings,
    pub demo: DemoSettings,
}

impl Config {
    /// Read `path`, falling back to defaults when there is no such file
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            warn!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        info!("Loading config from {}", path.display());
        let ini = Ini::load_from_file(path)?;
        Config::from_ini(&ini)
    }

    pub fn from_ini(ini: &Ini) -> Result<Config> {
        let mut config = Config::default();

        if let Some(sec) = ini.section(Some("Window")) {
            let window = &mut config.window;

            if let Some(title) = sec.get("Title") {
                window.title = title.to_string();
            }
            window.x = position(sec, "X")?.unwrap_or(window.x);
            window.y = position(sec, "Y")?.unwrap_or(window.y);
            window.width = value(sec, "Window", "Width")?.unwrap_or(window.width);
            window.height = value(sec, "Window", "Height")?.unwrap_or(window.height);
            window.resizable = value(sec, "Window", "Resizable")?.unwrap_or(window.resizable);
            window.borderless = value(sec, "Window", "Borderless")?.unwrap_or(window.borderless);
            window.high_dpi = value(sec, "Window", "HighDpi")?.unwrap_or(window.high_dpi);

            if let Some(mode) = sec.get("Fullscreen") {
                window.fullscreen = match mode {
                    "Windowed" => FullscreenMode::Windowed,
                    "Exclusive" => FullscreenMode::Exclusive,
                    "Desktop" => FullscreenMode::Desktop,
                    _ => {
                        warn!("Unknown fullscreen mode in config: Fullscreen = {}", mode);
                        FullscreenMode::Windowed
                    }
                };
            }
        }

        if let Some(sec) = ini.section(Some("Renderer")) {
            let renderer = &mut config.renderer;

            renderer.driver_index = value(sec, "Renderer", "Driver")?;
            renderer.software = value(sec, "Renderer", "Software")?.unwrap_or(renderer.software);
            renderer.vsync = value(sec, "Renderer", "VSync")?.unwrap_or(renderer.vsync);
        }

        if let Some(sec) = ini.section(Some("Demo")) {
            let demo = &mut config.demo;

            demo.tile_size = value(sec, "Demo", "TileSize")?.unwrap_or(demo.tile_size);
            if demo.tile_size <= 0 {
                return Err(bad("Demo", "TileSize", demo.tile_size.to_string()));
            }
            demo.scroll_speed = value(sec, "Demo", "ScrollSpeed")?.unwrap_or(demo.scroll_speed);

            if let Some(flip) = value::<u32>(sec, "Demo", "Flip")? {
                demo.flip = FlipMode::from_u32(flip).ok_or_else(|| bad("Demo", "Flip", flip.to_string()))?;
            }

            // Zero seconds means no limit
            demo.duration = value::<u64>(sec, "Demo", "Duration")?
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs);

            demo.font = sec.get("Font").filter(|f| !f.is_empty()).map(PathBuf::from);
            demo.font_size = value(sec, "Demo", "FontSize")?.unwrap_or(demo.font_size);
        }

        Ok(config)
    }
}

fn bad(section: &'static str, key: &'static str, value: String) -> AppError {
    AppError::Config { section, key, value }
}

fn value<T: FromStr>(sec: &Properties, section: &'static str, key: &'static str) -> Result<Option<T>> {
    match sec.get(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| bad(section, key, raw.to_string())),
    }
}

fn position(sec: &Properties, key: &'static str) -> Result<Option<WindowPos>> {
    match sec.get(key).map(str::trim) {
        None => Ok(None),
        Some("Centered") => Ok(Some(WindowPos::Centered)),
        Some("Undefined") => Ok(Some(WindowPos::Undefined)),
        Some(_) => Ok(value(sec, "Window", key)?.map(WindowPos::At)),
    }
}

#[test]
fn empty_config_is_default() {
    let ini = Ini::load_from_str("").unwrap();

    assert_eq!(Config::from_ini(&ini).unwrap(), Config::default());
}

#[test]
fn reads_all_sections() {
    let ini = Ini::load_from_str(
        "[Window]\n\
         Title = tiles\n\
         X = Centered\n\
         Y = 40\n\
         Width = 320\n\
         Height = 200\n\
         Resizable = true\n\
         Fullscreen = Desktop\n\
         [Renderer]\n\
         Software = true\n\
         VSync = false\n\
         Driver = 1\n\
         [Demo]\n\
         TileSize = 8\n\
         ScrollSpeed = -3\n\
         Flip = 3\n\
         Duration = 5\n\
         Font = fonts/mono.ttf\n",
    )
    .unwrap();

    let config = Config::from_ini(&ini).unwrap();

    assert_eq!(config.window.title, "tiles");
    assert_eq!(config.window.x, WindowPos::Centered);
    assert_eq!(config.window.y, WindowPos::At(40));
    assert_eq!((config.window.width, config.window.height), (320, 200));
    assert!(config.window.resizable);
    assert_eq!(config.window.fullscreen, FullscreenMode::Desktop);

    assert!(config.renderer.software);
    assert!(!config.renderer.vsync);
    assert_eq!(config.renderer.driver_index, Some(1));

    assert_eq!(config.demo.tile_size, 8);
    assert_eq!(config.demo.scroll_speed, -3);
    assert_eq!(config.demo.flip.flip(), Flip::HORIZONTAL | Flip::VERTICAL);
    assert_eq!(config.demo.duration, Some(Duration::from_secs(5)));
    assert_eq!(config.demo.font, Some(PathBuf::from("fonts/mono.ttf")));
    assert_eq!(config.demo.font_size, 24);
}

#[test]
fn zero_duration_runs_forever() {
    let ini = Ini::load_from_str("[Demo]\nDuration = 0\nFont =\n").unwrap();
    let config = Config::from_ini(&ini).unwrap();

    assert_eq!(config.demo.duration, None);
    assert_eq!(config.demo.font, None);
}

#[test]
fn unknown_fullscreen_mode_falls_back() {
    let ini = Ini::load_from_str("[Window]\nFullscreen = Sometimes\n").unwrap();

    assert_eq!(Config::from_ini(&ini).unwrap().window.fullscreen, FullscreenMode::Windowed);
}

#[test]
fn malformed_values_are_errors() {
    let ini = Ini::load_from_str("[Window]\nWidth = wide\n").unwrap();
    let e = Config::from_ini(&ini).unwrap_err();
    assert!(matches!(e, AppError::Config { key: "Width", .. }));

    let ini = Ini::load_from_str("[Demo]\nFlip = 4\n").unwrap();
    let e = Config::from_ini(&ini).unwrap_err();
    assert!(matches!(e, AppError::Config { key: "Flip", .. }));

    let ini = Ini::load_from_str("[Demo]\nTileSize = 0\n").unwrap();
    assert!(Config::from_ini(&ini).is_err());
}

#[test]
fn missing_file_uses_defaults() {
    let config = Config::load(Path::new("does/not/exist.ini")).unwrap();

    assert_eq!(config, Config::default());
}
