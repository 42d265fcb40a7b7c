use std::time::{Duration, Instant};
#[cfg(feature = "ttf")]
use sdlkit_lib::{Font, TtfContext};
use sdlkit_lib::{
    Color, Context, InitFlags, PixelFormat, Point, Rect, Renderer, Texture, TextureAccess, Window,
};
#[cfg(not(feature = "ttf"))]
use tracing::warn;
use tracing::{debug, info};
use crate::config::Config;
use crate::error::Result;

const FRAME_TIME: Duration = Duration::from_nanos(16_666_667); // ~60 FPS
const BACKGROUND: Color = Color::rgb(24, 24, 32);
const MARGIN: i32 = 16;

const LIGHT: u32 = 0xffd0_d0d0;
const DARK: u32 = 0xff50_5060;

/// Scrolls a tiled checkerboard inside a framed area until the window closes
pub struct App {
    config: Config,
    renderer: Renderer,
    window: Window,
    pub running: bool,
    // Dropped last, after everything created under it
    ctx: Context,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let ctx = Context::new(InitFlags::VIDEO)?;
        let window = Window::from_settings(&config.window)?;
        let renderer = Renderer::from_settings(&window, &config.renderer)?;

        let info = renderer.info()?;
        info!("Using renderer {} with {} texture formats", info.name, info.texture_formats.len());

        Ok(App {
            config,
            renderer,
            window,
            running: true,
            ctx,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let tile = self.config.demo.tile_size;
        let speed = self.config.demo.scroll_speed;
        let checker = self.checkerboard(tile)?;

        #[cfg(feature = "ttf")]
        let label = self.label()?;
        #[cfg(not(feature = "ttf"))]
        let label: Option<Texture> = {
            if let Some(font) = &self.config.demo.font {
                warn!("Built without ttf support, ignoring font {} ({}pt)", font.display(), self.config.demo.font_size);
            }
            None
        };

        info!("Running {}", self.window.title());
        let started = Instant::now();
        let mut offset = Point::new(0, 0);
        let mut frames = 0u64;

        // Main loop
        while self.running {
            let frame_start = Instant::now();

            if self.ctx.poll_quit() {
                info!("Quit requested");
                self.running = false;
                break;
            }
            if self.config.demo.duration.is_some_and(|limit| started.elapsed() >= limit) {
                info!("Run time elapsed");
                self.running = false;
                break;
            }

            self.draw_frame(&checker, label.as_ref(), offset)?;

            // One period of the checkerboard is two tiles
            offset.x = (offset.x + speed).rem_euclid(tile * 2);
            offset.y = (offset.y + speed / 2).rem_euclid(tile * 2);
            frames += 1;

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_TIME {
                std::thread::sleep(FRAME_TIME - elapsed);
            }
        }

        info!("Drew {} frames in {:?}", frames, started.elapsed());
        Ok(())
    }

    fn draw_frame(&mut self, checker: &Texture, label: Option<&Texture>, offset: Point) -> Result<()> {
        let size = self.renderer.output_size()?;
        let area = Rect::new(MARGIN, MARGIN, size.x - 2 * MARGIN, size.y - 2 * MARGIN);

        self.renderer.set_draw_color(BACKGROUND)?.clear()?;

        if !area.is_empty() {
            self.renderer
                .fill_copy(checker, None, Some(area), offset, self.config.demo.flip.flip())?
                .set_draw_color(Color::WHITE)?
                .draw_rect(area.extension_all(1))?;
        }

        if let Some(label) = label {
            let at = Point::new(MARGIN * 2, MARGIN * 2);
            let size = label.size()?;

            self.renderer
                .set_draw_color(Color::BLACK)?
                .fill_rect(Rect::new(at.x - 4, at.y - 4, size.x + 8, size.y + 8))?
                .copy_to(label, None, at)?;
        }

        self.renderer.present();
        Ok(())
    }

    /// Two by two tiles of `tile` pixels each, ready for `fill_copy`
    fn checkerboard(&self, tile: i32) -> Result<Texture> {
        let edge = tile * 2;
        let pixels: Vec<u32> = (0..edge)
            .flat_map(|y| (0..edge).map(move |x| if (x < tile) == (y < tile) { LIGHT } else { DARK }))
            .collect();

        let mut texture = self
            .renderer
            .create_texture(PixelFormat::ARGB8888, TextureAccess::Static, edge, edge)?;

        let pitch = edge as usize * size_of::<u32>(); // bytes per row
        let pixel_bytes: &[u8] = bytemuck::cast_slice(pixels.as_slice());
        texture.update(None, pixel_bytes, pitch)?;

        debug!("Checkerboard texture {}x{}", edge, edge);
        Ok(texture)
    }

    /// The window title rendered with the configured font, if there is one
    #[cfg(feature = "ttf")]
    fn label(&self) -> Result<Option<Texture>> {
        let Some(path) = &self.config.demo.font else {
            return Ok(None);
        };

        let ttf = TtfContext::new()?;
        let font = Font::open(&ttf, path, self.config.demo.font_size, 0)?;
        info!("Loaded font {:?} from {}", font.family_name(), path.display());

        let surface = font.render_utf8_blended(&self.window.title(), Color::WHITE)?;
        Ok(Some(self.renderer.create_texture_from_surface(&surface)?))
    }
}
