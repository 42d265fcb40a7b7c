//! Runs against SDL's dummy video driver so no display is needed. Kept in
//! one test since `Context` owns process-wide SDL state.

use sdlkit_lib::{
    sys, Color, Context, InitFlags, PixelFormat, Point, Rect, Renderer, RendererSettings, TextureAccess, Window,
    WindowFlags, WindowPos, WindowSettings,
};
use tracing_subscriber::filter::LevelFilter;

fn window_exists(id: u32) -> bool {
    !unsafe { sys::SDL_GetWindowFromID(id) }.is_null()
}

fn video_running() -> bool {
    (unsafe { sys::SDL_WasInit(sys::SDL_INIT_VIDEO) }) != 0
}

fn push_quit() {
    let mut event: sys::SDL_Event = unsafe { std::mem::zeroed() };
    event.type_ = sys::SDL_EventType::SDL_QUIT as u32;

    assert_eq!(unsafe { sys::SDL_PushEvent(&mut event) }, 1);
}

#[test]
fn dummy_video_session() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::TRACE)
        .try_init();

    unsafe { sys::SDL_SetHint(c"SDL_VIDEODRIVER".as_ptr(), c"dummy".as_ptr()) };

    let ctx = Context::new(InitFlags::VIDEO).unwrap();
    assert!(ctx.was_init(InitFlags::VIDEO).contains(InitFlags::VIDEO));
    assert!(!ctx.was_init(InitFlags::AUDIO).contains(InitFlags::AUDIO));

    ctx.init_subsystem(InitFlags::TIMER).unwrap();
    assert!(ctx.was_init(InitFlags::TIMER).contains(InitFlags::TIMER));
    ctx.quit_subsystem(InitFlags::TIMER);

    // Nothing pending yet
    assert!(!ctx.poll_quit());
    push_quit();
    assert!(ctx.poll_quit());
    assert!(!ctx.poll_quit());

    let settings = WindowSettings {
        title: "video test".to_string(),
        x: WindowPos::At(10),
        y: WindowPos::At(20),
        width: 64,
        height: 48,
        hidden: true,
        ..Default::default()
    };
    let mut window = Window::from_settings(&settings).unwrap();

    let window_id = window.id();
    assert_ne!(window_id, 0);
    assert_eq!(window.title(), "video test");
    assert_eq!(window.size(), Point::new(64, 48));
    assert!(window.flags().contains(WindowFlags::HIDDEN));

    window.set_title("renamed").unwrap();
    assert_eq!(window.title(), "renamed");
    assert!(window.set_title("bad\0title").is_err());

    window.set_minimum_size(Point::new(16, 16)).set_maximum_size(Point::new(640, 480));
    assert_eq!(window.minimum_size(), Point::new(16, 16));
    assert_eq!(window.maximum_size(), Point::new(640, 480));

    assert_eq!(window.display_index().unwrap(), 0);
    assert!(window.display_mode().is_ok());

    let renderer_settings = RendererSettings {
        software: true,
        vsync: false,
        ..Default::default()
    };
    let mut renderer = Renderer::from_settings(&window, &renderer_settings).unwrap();
    assert_eq!(renderer.output_size().unwrap(), Point::new(64, 48));

    // The renderer keeps the native window alive
    drop(window);
    assert!(window_exists(window_id));

    renderer.set_draw_color(Color::rgb(10, 20, 30)).unwrap().clear().unwrap();
    renderer.fill_rect_corners(Point::new(4, 4), Point::new(8, 8)).unwrap();

    let mut pixel = [0u8; 4];
    renderer
        .read_pixels(Some(Rect::new(0, 0, 1, 1)), PixelFormat::ARGB8888, &mut pixel, 4)
        .unwrap();
    assert_eq!(u32::from_ne_bytes(pixel), 0xff0a_141e);
    renderer.present();

    // A texture outlives both, and the renderer is destroyed before its window
    let texture = renderer.create_texture(PixelFormat::ARGB8888, TextureAccess::Static, 4, 4).unwrap();
    drop(renderer);
    assert!(window_exists(window_id));
    assert_eq!(texture.size().unwrap(), Point::new(4, 4));
    drop(texture);
    assert!(!window_exists(window_id));

    // Windows keep video up after the context goes
    let mut late = Window::new("late", WindowPos::Undefined, WindowPos::Undefined, 8, 8, WindowFlags::HIDDEN).unwrap();
    drop(ctx);
    assert!(video_running());
    assert!(window_exists(late.id()));
    late.set_title("still here").unwrap();
    assert_eq!(late.title(), "still here");

    drop(late);
    assert!(!video_running());
}
