use crate::renderer::test::{canvas, read_back, texture_of};
use super::*;

const RED: u32 = 0xffff_0000;
const GREEN: u32 = 0xff00_ff00;

fn words(pixels: &[u32]) -> Vec<u8> {
    pixels.iter().flat_map(|p| p.to_ne_bytes()).collect()
}

#[test]
fn unknown_access_is_an_error() {
    assert_eq!(TextureAccess::from_raw(1).unwrap(), TextureAccess::Streaming);
    assert_eq!(TextureAccess::from_raw(7), Err(SdlError::UnknownTextureAccess(7)));
}

#[test]
fn query() {
    let r = canvas(2, 2);
    let t = r.create_texture(PixelFormat::ABGR8888, TextureAccess::Streaming, 5, 3).unwrap();

    assert_eq!(t.format().unwrap(), PixelFormat::ABGR8888);
    assert_eq!(t.access().unwrap(), TextureAccess::Streaming);
    assert_eq!((t.width().unwrap(), t.height().unwrap()), (5, 3));
    assert_eq!(t.size().unwrap(), Point::new(5, 3));
}

#[test]
fn short_update_is_rejected() {
    let r = canvas(2, 2);
    let mut t = texture_of(&r, 2, &[RED; 4]);

    let e = t.update(None, &[0; 15], 8).err().unwrap();
    assert!(matches!(e, SdlError::OutOfRange { value: 15, .. }));

    // A single row only needs one pitch worth of bytes
    assert!(t.update(Some(Rect::new(0, 1, 2, 1)), &words(&[GREEN; 2]), 8).is_ok());
}

#[test]
fn update_pitch_must_cover_a_row() {
    let r = canvas(1, 1);
    let mut t = r.create_texture(PixelFormat::ARGB8888, TextureAccess::Static, 64, 64).unwrap();

    // Plenty of bytes for 64 rows of one byte, but a row is 256 bytes
    let e = t.update(None, &[0u8; 64], 1).err().unwrap();
    assert_eq!(e, SdlError::OutOfRange { what: "texture update pitch", value: 1 });

    let e = t.update(Some(Rect::new(0, 0, 2, 1)), &[0u8; 4], 4).err().unwrap();
    assert_eq!(e, SdlError::OutOfRange { what: "texture update pitch", value: 4 });
    assert!(t.update(Some(Rect::new(0, 0, 1, 1)), &[0u8; 4], 4).is_ok());
}

#[test]
fn planar_update_needs_chroma_planes() {
    let r = canvas(1, 1);
    let mut t = r.create_texture(PixelFormat::IYUV, TextureAccess::Streaming, 4, 4).unwrap();

    let e = t.update(None, &[0u8; 16], 4).err().unwrap();
    assert_eq!(e, SdlError::OutOfRange { what: "texture update buffer length", value: 16 });
    assert!(t.update(None, &[0u8; 24], 4).is_ok());
}

#[test]
fn update_from_surface_of_same_format() {
    let mut r = canvas(2, 1);
    let mut t = r.create_texture(PixelFormat::ARGB8888, TextureAccess::Static, 2, 1).unwrap();

    let mut s = Surface::with_format(2, 1, PixelFormat::ARGB8888).unwrap();
    let red = s.map_rgba(Color::rgb(255, 0, 0));
    let green = s.map_rgba(Color::rgb(0, 255, 0));
    s.fill_rect(None, red).unwrap().fill_rect(Some(Rect::new(1, 0, 1, 1)), green).unwrap();

    t.update_surface(None, &s).unwrap();
    r.copy(&t, None, None).unwrap();

    assert_eq!(read_back(&r), vec![RED, GREEN]);
}

#[test]
fn update_from_surface_converts() {
    let mut r = canvas(1, 1);
    let mut t = r.create_texture(PixelFormat::ARGB8888, TextureAccess::Static, 1, 1).unwrap();

    let mut s = Surface::with_format(1, 1, PixelFormat::ABGR8888).unwrap();
    let green = s.map_rgba(Color::rgb(0, 255, 0));
    s.fill_rect(None, green).unwrap();

    t.update_surface(None, &s).unwrap();
    r.copy(&t, None, None).unwrap();

    assert_eq!(read_back(&r), vec![GREEN]);
}

#[test]
fn update_from_smaller_surface_is_clamped() {
    let mut r = canvas(4, 1);
    let mut t = texture_of(&r, 4, &[GREEN; 4]);

    let mut s = Surface::with_format(2, 1, PixelFormat::ARGB8888).unwrap();
    let red = s.map_rgba(Color::rgb(255, 0, 0));
    s.fill_rect(None, red).unwrap();

    t.update_surface(None, &s).unwrap();
    r.copy(&t, None, None).unwrap();

    assert_eq!(read_back(&r), vec![RED, RED, GREEN, GREEN]);
}

#[test]
fn streaming_lock() {
    let mut r = canvas(2, 2);
    let mut t = r.create_texture(PixelFormat::ARGB8888, TextureAccess::Streaming, 2, 2).unwrap();

    {
        let mut lock = t.lock(None).unwrap();
        let pitch = lock.pitch();
        assert!(pitch >= 8);
        assert_eq!(lock.pixels().len(), pitch * 2);

        let pixels = lock.pixels_mut();
        for row in 0..2 {
            pixels[row * pitch..row * pitch + 8].copy_from_slice(&words(&[RED, GREEN]));
        }
    }

    r.copy(&t, None, None).unwrap();
    assert_eq!(read_back(&r), vec![RED, GREEN, RED, GREEN]);
}

#[test]
fn sub_rect_lock_stops_at_right_edge() {
    let r = canvas(1, 1);
    let mut t = r.create_texture(PixelFormat::ARGB8888, TextureAccess::Streaming, 4, 4).unwrap();

    let lock = t.lock(Some(Rect::new(2, 1, 2, 3))).unwrap();
    assert_eq!(lock.pixels().len(), lock.pitch() * 2 + 8);
}

#[test]
fn lock_rect_must_stay_inside_texture() {
    let r = canvas(1, 1);
    let mut t = r.create_texture(PixelFormat::ARGB8888, TextureAccess::Streaming, 4, 4).unwrap();

    for rect in [Rect::new(0, 0, 4, 8), Rect::new(2, 0, 3, 1), Rect::new(-1, 0, 1, 1), Rect::new(0, 0, -2, 2)] {
        let e = t.lock(Some(rect)).err().unwrap();
        assert!(matches!(e, SdlError::OutOfBounds { what: "texture lock rect", .. }), "{rect:?}");
    }

    let mut lock = t.lock(Some(Rect::new(0, 0, 4, 4))).unwrap();
    assert_eq!(lock.pixels_mut().len(), lock.pitch() * 4);
}

#[test]
fn static_textures_cannot_be_locked() {
    let r = canvas(1, 1);
    let mut t = texture_of(&r, 1, &[RED]);

    let e = t.lock(None).err().unwrap();
    assert_eq!(e.function(), Some("SDL_LockTexture"));
}

#[test]
fn modulation_state() {
    let r = canvas(1, 1);
    let mut t = texture_of(&r, 1, &[RED]);

    assert_eq!(t.color_and_alpha_mod().unwrap(), Color::WHITE);

    t.set_color_and_alpha_mod(Color::rgba(1, 2, 3, 4)).unwrap();
    assert_eq!(t.color_mod().unwrap(), (1, 2, 3));
    assert_eq!(t.alpha_mod().unwrap(), 4);

    t.set_blend_mode(BlendMode::Mod).unwrap();
    assert_eq!(t.blend_mode().unwrap(), BlendMode::Mod);
}

#[test]
fn yuv_update_checks_planes() {
    let r = canvas(1, 1);
    let mut t = r.create_texture(PixelFormat::IYUV, TextureAccess::Streaming, 4, 4).unwrap();

    let y = [16u8; 16];
    let uv = [128u8; 4];

    assert!(t.update_yuv(None, &y, 4, &uv, 2, &uv, 2).is_ok());

    let e = t.update_yuv(None, &y, 4, &uv[..3], 2, &uv, 2).err().unwrap();
    assert!(matches!(e, SdlError::OutOfRange { what: "U plane", value: 3 }));

    // Chroma rows are half as wide, rounded up
    let e = t.update_yuv(None, &y, 4, &uv, 2, &[128u8; 8], 1).err().unwrap();
    assert!(matches!(e, SdlError::OutOfRange { what: "V plane", value: 1 }));

    let e = t.update_yuv(None, &[16u8; 64], 3, &uv, 2, &uv, 2).err().unwrap();
    assert!(matches!(e, SdlError::OutOfRange { what: "Y plane", value: 3 }));
}
