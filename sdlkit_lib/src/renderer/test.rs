use super::*;

const RED: u32 = 0xffff_0000;
const GREEN: u32 = 0xff00_ff00;
const BLUE: u32 = 0xff00_00ff;
const WHITE: u32 = 0xffff_ffff;

/// Software renderer drawing into a fresh ARGB surface
pub(crate) fn canvas(w: i32, h: i32) -> Renderer {
    let surface = Surface::with_format(w, h, PixelFormat::ARGB8888).unwrap();
    Renderer::software(&surface).unwrap()
}

/// Whole output as ARGB words, row by row
pub(crate) fn read_back(renderer: &Renderer) -> Vec<u32> {
    let size = renderer.output_size().unwrap();
    let pitch = size.x as usize * 4;
    let mut buf = vec![0u8; pitch * size.y as usize];

    renderer.read_pixels(None, PixelFormat::ARGB8888, &mut buf, pitch).unwrap();

    buf.chunks_exact(4)
        .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

/// Static ARGB texture holding `pixels`, `w` per row
pub(crate) fn texture_of(renderer: &Renderer, w: i32, pixels: &[u32]) -> Texture {
    let h = pixels.len() as i32 / w;
    let mut t = renderer.create_texture(PixelFormat::ARGB8888, TextureAccess::Static, w, h).unwrap();

    let bytes: Vec<u8> = pixels.iter().flat_map(|p| p.to_ne_bytes()).collect();
    t.update(None, &bytes, w as usize * 4).unwrap();
    t
}

#[test]
fn software_renderer_info() {
    let r = canvas(8, 4);
    let info = r.info().unwrap();

    assert_eq!(info.name, "software");
    assert!(info.flags.contains(RendererFlags::SOFTWARE));
    assert!(r.target_supported());
    assert_eq!(r.output_size().unwrap(), Point::new(8, 4));
    assert_eq!(r.output_width().unwrap(), 8);
}

#[test]
fn renderer_keeps_surface_alive() {
    let r = {
        let surface = Surface::with_format(2, 2, PixelFormat::ARGB8888).unwrap();
        Renderer::software(&surface).unwrap()
    };

    assert_eq!(r.output_size().unwrap(), Point::new(2, 2));
}

#[test]
fn clear_with_draw_color() {
    let mut r = canvas(3, 2);

    r.set_draw_color(Color::rgb(255, 0, 0)).unwrap().clear().unwrap();

    assert_eq!(r.draw_color().unwrap(), Color::rgb(255, 0, 0));
    assert_eq!(read_back(&r), vec![RED; 6]);
}

#[test]
fn draw_blend_mode_round_trip() {
    let mut r = canvas(1, 1);

    assert_eq!(r.draw_blend_mode().unwrap(), BlendMode::None);
    r.set_draw_blend_mode(BlendMode::Blend).unwrap();
    assert_eq!(r.draw_blend_mode().unwrap(), BlendMode::Blend);
}

#[test]
fn primitives() {
    let mut r = canvas(4, 4);

    r.set_draw_color(Color::BLACK).unwrap().clear().unwrap();
    r.set_draw_color(Color::WHITE).unwrap()
        .fill_rect(Rect::new(0, 0, 2, 2)).unwrap()
        .draw_point(Point::new(3, 3)).unwrap()
        .draw_points(&[Point::new(3, 0)]).unwrap();

    let px = read_back(&r);
    assert_eq!(px[0], WHITE);
    assert_eq!(px[5], WHITE);
    assert_eq!(px[2], 0xff00_0000);
    assert_eq!(px[3], WHITE);
    assert_eq!(px[15], WHITE);
}

#[test]
fn outlined_rect_leaves_inside_untouched() {
    let mut r = canvas(4, 4);

    r.set_draw_color(Color::BLACK).unwrap().clear().unwrap();
    r.set_draw_color(Color::WHITE).unwrap()
        .draw_rect_corners(Point::new(0, 0), Point::new(3, 3)).unwrap();

    let px = read_back(&r);
    assert_eq!(px[0], WHITE);
    assert_eq!(px[15], WHITE);
    assert_eq!(px[5], 0xff00_0000);
    assert_eq!(px[10], 0xff00_0000);
}

#[test]
fn lines() {
    let mut r = canvas(4, 2);

    r.set_draw_color(Color::BLACK).unwrap().clear().unwrap();
    r.set_draw_color(Color::WHITE).unwrap()
        .draw_line(Point::new(0, 0), Point::new(3, 0)).unwrap();

    let px = read_back(&r);
    assert_eq!(&px[..4], &[WHITE; 4]);
    assert_eq!(&px[4..], &[0xff00_0000; 4]);
}

#[test]
fn clip_rect_none_when_disabled() {
    let mut r = canvas(4, 4);

    assert_eq!(r.clip_rect(), None);
    assert!(!r.is_clip_enabled());

    r.set_clip_rect(Some(Rect::new(1, 1, 2, 2))).unwrap();
    assert_eq!(r.clip_rect(), Some(Rect::new(1, 1, 2, 2)));
    assert!(r.is_clip_enabled());

    r.set_draw_color(Color::WHITE).unwrap().clear().unwrap();
    let px = read_back(&r);
    assert_eq!(px[0], 0);
    assert_eq!(px[5], WHITE);

    r.set_clip_rect(None).unwrap();
    assert_eq!(r.clip_rect(), None);
}

#[test]
fn viewport_scale_and_logical_size() {
    let mut r = canvas(8, 6);

    assert_eq!(r.viewport(), Rect::new(0, 0, 8, 6));
    r.set_viewport(Some(Rect::new(2, 2, 4, 4))).unwrap();
    assert_eq!(r.viewport(), Rect::new(2, 2, 4, 4));
    r.set_viewport(None).unwrap();
    assert_eq!(r.viewport(), Rect::new(0, 0, 8, 6));

    assert_eq!(r.scale(), (1.0, 1.0));
    r.set_scale(2.0, 3.0).unwrap();
    assert_eq!((r.x_scale(), r.y_scale()), (2.0, 3.0));

    assert_eq!(r.logical_size(), Point::new(0, 0));
}

#[test]
fn read_pixels_checks_buffer() {
    let r = canvas(4, 4);
    let mut buf = vec![0u8; 4 * 4 * 4];

    let short_pitch = r.read_pixels(None, PixelFormat::ARGB8888, &mut buf, 8);
    assert!(matches!(short_pitch, Err(SdlError::OutOfRange { value: 8, .. })));

    let short_buf = r.read_pixels(None, PixelFormat::ARGB8888, &mut buf[..63], 16);
    assert!(matches!(short_buf, Err(SdlError::OutOfRange { value: 63, .. })));

    let mut small = vec![0u8; 2 * 4];
    assert!(r.read_pixels(Some(Rect::new(1, 1, 2, 1)), PixelFormat::ARGB8888, &mut small, 8).is_ok());
}

#[test]
fn copy_scales_and_positions() {
    let mut r = canvas(4, 4);
    let t = texture_of(&r, 1, &[RED]);

    r.copy(&t, None, Some(Rect::new(1, 1, 2, 2))).unwrap();

    let px = read_back(&r);
    assert_eq!(px[0], 0);
    assert_eq!(px[5], RED);
    assert_eq!(px[10], RED);
    assert_eq!(px[15], 0);
}

#[test]
fn copy_to_keeps_source_size() {
    let mut r = canvas(4, 2);
    let t = texture_of(&r, 2, &[RED, GREEN, BLUE, WHITE]);

    r.copy_to(&t, None, Point::new(2, 0)).unwrap();
    r.copy_to(&t, Some(Rect::new(1, 1, 1, 1)), Point::new(0, 0)).unwrap();

    let px = read_back(&r);
    assert_eq!(px, vec![WHITE, 0, RED, GREEN, 0, 0, BLUE, WHITE]);
}

#[test]
fn copy_ex_flips() {
    let mut r = canvas(2, 2);
    let t = texture_of(&r, 2, &[RED, GREEN, BLUE, WHITE]);

    r.copy_ex(&t, None, None, 0.0, None, Flip::HORIZONTAL).unwrap();
    assert_eq!(read_back(&r), vec![GREEN, RED, WHITE, BLUE]);

    r.copy_ex_to(&t, None, Point::new(0, 0), 0.0, None, Flip::HORIZONTAL | Flip::VERTICAL).unwrap();
    assert_eq!(read_back(&r), vec![WHITE, BLUE, GREEN, RED]);
}

#[test]
fn fill_copy_tiles_output() {
    let mut r = canvas(4, 4);
    let t = texture_of(&r, 2, &[RED, GREEN, BLUE, WHITE]);

    r.fill_copy(&t, None, None, Point::new(0, 0), Flip::empty()).unwrap();

    let px = read_back(&r);
    assert_eq!(&px[0..4], &[RED, GREEN, RED, GREEN]);
    assert_eq!(&px[4..8], &[BLUE, WHITE, BLUE, WHITE]);
    assert_eq!(&px[8..12], &[RED, GREEN, RED, GREEN]);
}

#[test]
fn fill_copy_offset_shifts_grid() {
    let mut r = canvas(3, 1);
    let t = texture_of(&r, 2, &[RED, GREEN]);

    r.fill_copy(&t, None, None, Point::new(1, 0), Flip::empty()).unwrap();

    assert_eq!(read_back(&r), vec![GREEN, RED, GREEN]);
}

#[test]
fn fill_copy_inside_destination() {
    let mut r = canvas(4, 1);
    let t = texture_of(&r, 2, &[RED, GREEN]);

    r.fill_copy(&t, Some(Rect::new(0, 0, 1, 1)), Some(Rect::new(1, 0, 2, 1)), Point::new(0, 0), Flip::empty())
        .unwrap();

    assert_eq!(read_back(&r), vec![0, RED, RED, 0]);
}

#[test]
fn fill_copy_with_flip() {
    let mut r = canvas(4, 1);
    let t = texture_of(&r, 2, &[RED, GREEN]);

    r.fill_copy(&t, None, None, Point::new(0, 0), Flip::HORIZONTAL).unwrap();

    assert_eq!(read_back(&r), vec![GREEN, RED, GREEN, RED]);
}

#[test]
fn render_to_texture() {
    let mut r = canvas(2, 2);
    let target = r.create_texture(PixelFormat::ARGB8888, TextureAccess::Target, 2, 2).unwrap();

    r.set_target(&target).unwrap();
    r.set_draw_color(Color::rgb(0, 255, 0)).unwrap().clear().unwrap();
    r.reset_target().unwrap();

    r.set_draw_color(Color::BLACK).unwrap().clear().unwrap();
    r.copy(&target, None, None).unwrap();

    assert_eq!(read_back(&r), vec![GREEN; 4]);
}

#[test]
fn texture_outlives_renderer() {
    let t = {
        let r = canvas(2, 2);
        texture_of(&r, 1, &[RED])
    };

    assert_eq!(t.size().unwrap(), Point::new(1, 1));
    assert_eq!(t.format().unwrap(), PixelFormat::ARGB8888);
}

#[test]
fn texture_from_surface() {
    let r = canvas(2, 2);
    let surface = Surface::with_format(3, 1, PixelFormat::ABGR8888).unwrap();

    let t = r.create_texture_from_surface(&surface).unwrap();

    assert_eq!(t.size().unwrap(), Point::new(3, 1));
    assert_eq!(t.access().unwrap(), TextureAccess::Static);
}
