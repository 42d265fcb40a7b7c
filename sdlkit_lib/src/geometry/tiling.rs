//! Tile placement for `Renderer::fill_copy`.
//!
//! A source rectangle of a texture is repeated over a destination area,
//! shifted by an offset. Planning is pure integer arithmetic so it lives here,
//! away from the renderer.

use crate::flags::Flip;
use super::{Point, Rect};

/// One blit of the plan: copy `src` of the texture to `dst` on the target.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Tile {
    pub src: Rect,
    pub dst: Rect,
}

/// Bring a tile origin into `(-size, 0]` while keeping it congruent to
/// `offset` modulo `size`, so that the first tile always touches the
/// top/left edge of the destination.
pub fn normalize_tile_origin(offset: i32, size: i32) -> i32 {
    if size <= 0 {
        return offset;
    }

    let (mut o, s) = (i64::from(offset), i64::from(size));

    if o + s <= 0 {
        o += (-o) / s * s;
    }
    if o > 0 {
        o -= (o + s - 1) / s * s;
    }

    o as i32
}

/// Compute every visible tile needed to cover `dst` with copies of `src`,
/// starting at `offset` relative to the destination origin.
///
/// Tiles straddling the destination border are cut down on both sides so
/// that `tile.src` and `tile.dst` always have the same size. With `flip` the
/// source sub-rect is mirrored inside `src`, so the flipped blit shows the
/// right part of the texture.
pub fn plan_fill(src: Rect, dst: Rect, offset: impl Into<Point>, flip: Flip) -> Vec<Tile> {
    let offset = offset.into();
    let mut tiles = Vec::new();

    if src.w <= 0 || src.h <= 0 {
        return tiles;
    }

    // Wide positions, a tile past a destination near `i32::MAX` must not wrap
    let start_x = i64::from(normalize_tile_origin(offset.x, src.w));
    let start_y = i64::from(normalize_tile_origin(offset.y, src.h));

    let mut y = start_y;
    while y < i64::from(dst.h) {
        let mut x = start_x;
        while x < i64::from(dst.w) {
            tiles.push(clip_tile(src, dst, x, y, flip));
            x += i64::from(src.w);
        }
        y += i64::from(src.h);
    }

    tiles
}

/// The part of the tile placed at `(x, y)` inside `dst` that is visible
fn clip_tile(src: Rect, dst: Rect, x: i64, y: i64, flip: Flip) -> Tile {
    let (x0, x1) = (x.max(0), (x + i64::from(src.w)).min(i64::from(dst.w)));
    let (y0, y1) = (y.max(0), (y + i64::from(src.h)).min(i64::from(dst.h)));
    let (w, h) = (x1 - x0, y1 - y0);

    // Offset of the visible part inside `src`
    let mut sx = x0 - x;
    let mut sy = y0 - y;

    if flip.contains(Flip::HORIZONTAL) {
        sx = i64::from(src.w) - sx - w;
    }
    if flip.contains(Flip::VERTICAL) {
        sy = i64::from(src.h) - sy - h;
    }

    Tile {
        src: Rect::new(narrow(i64::from(src.x) + sx), narrow(i64::from(src.y) + sy), narrow(w), narrow(h)),
        dst: Rect::new(narrow(i64::from(dst.x) + x0), narrow(i64::from(dst.y) + y0), narrow(w), narrow(h)),
    }
}

fn narrow(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[test]
fn origin_normalization() {
    for size in [1, 3, 4, 17] {
        for offset in -60..60 {
            let o = normalize_tile_origin(offset, size);

            assert!(o > -size && o <= 0, "offset {} size {} gave {}", offset, size, o);
            assert_eq!((offset - o).rem_euclid(size), 0);
        }
    }

    assert_eq!(normalize_tile_origin(8, 4), 0);
    assert_eq!(normalize_tile_origin(-4, 4), 0);
    assert_eq!(normalize_tile_origin(1, 4), -3);
    assert_eq!(normalize_tile_origin(-5, 4), -1);
}

#[test]
fn tiles_cover_destination_once() {
    let src = Rect::new(0, 0, 4, 4);
    let dst = Rect::new(10, 20, 10, 6);

    for offset in [(0, 0), (1, 0), (-3, 2), (7, -9)] {
        let tiles = plan_fill(src, dst, offset, Flip::empty());

        let mut area = 0;
        for t in &tiles {
            assert!(!t.dst.is_empty());
            assert_eq!(t.src.size(), t.dst.size());
            assert!(dst.contains_rect(&t.dst));
            assert!(src.contains_rect(&t.src));
            area += t.dst.w * t.dst.h;
        }
        assert_eq!(area, dst.w * dst.h);

        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                assert!(!a.dst.intersects(&b.dst));
            }
        }
    }
}

#[test]
fn aligned_tiles() {
    let tiles = plan_fill(Rect::new(0, 0, 4, 4), Rect::new(10, 20, 10, 6), (0, 0), Flip::empty());

    assert_eq!(tiles.len(), 6);
    assert_eq!(tiles[0].dst, Rect::new(10, 20, 4, 4));
    assert_eq!(tiles[2].src, Rect::new(0, 0, 2, 4));
    assert_eq!(tiles[2].dst, Rect::new(18, 20, 2, 4));
    assert_eq!(tiles[5].dst, Rect::new(18, 24, 2, 2));
}

#[test]
fn offset_cuts_first_tile() {
    let tiles = plan_fill(Rect::new(0, 0, 4, 4), Rect::new(0, 0, 8, 4), (1, 0), Flip::empty());

    assert_eq!(tiles.len(), 3);
    assert_eq!(tiles[0].src, Rect::new(3, 0, 1, 4));
    assert_eq!(tiles[0].dst, Rect::new(0, 0, 1, 4));
    assert_eq!(tiles[1].dst, Rect::new(1, 0, 4, 4));
    assert_eq!(tiles[2].src, Rect::new(0, 0, 3, 4));
}

#[test]
fn flip_mirrors_inside_source() {
    let src = Rect::new(8, 16, 4, 4);
    let tiles = plan_fill(src, Rect::new(0, 0, 8, 4), (1, 1), Flip::HORIZONTAL | Flip::VERTICAL);

    // Unflipped, the first tile would be the last column and row of `src`
    assert_eq!(tiles[0].dst, Rect::new(0, 0, 1, 1));
    assert_eq!(tiles[0].src, Rect::new(8, 16, 1, 1));

    for t in &tiles {
        assert!(src.contains_rect(&t.src));
    }
}

#[test]
fn degenerate_source_plans_nothing() {
    assert!(plan_fill(Rect::new(0, 0, 0, 4), Rect::new(0, 0, 8, 8), (0, 0), Flip::empty()).is_empty());
    assert!(plan_fill(Rect::new(0, 0, 4, 4), Rect::new(0, 0, 0, 8), (0, 0), Flip::empty()).is_empty());
}

#[test]
fn huge_destination_does_not_wrap() {
    let half = i32::MAX / 2 + 1;
    let tiles = plan_fill(Rect::new(0, 0, half, 1), Rect::new(0, 0, i32::MAX, 1), (0, 0), Flip::empty());

    assert_eq!(tiles.len(), 2);
    assert_eq!(tiles[0].dst, Rect::new(0, 0, half, 1));
    assert_eq!(tiles[1].dst, Rect::new(half, 0, i32::MAX - half, 1));
    assert_eq!(tiles[1].src, Rect::new(0, 0, i32::MAX - half, 1));
}
