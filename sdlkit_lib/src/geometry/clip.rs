//! Cohen-Sutherland line clipping against the inclusive bounds of a `Rect`.
//!
//! Gives the same results as `SDL_IntersectRectAndLine` so that lines clipped
//! here and lines clipped by SDL agree pixel for pixel.

use super::Rect;

const CODE_BOTTOM: u8 = 1;
const CODE_TOP: u8 = 2;
const CODE_LEFT: u8 = 4;
const CODE_RIGHT: u8 = 8;

fn out_code(rect: &Rect, x: i32, y: i32) -> u8 {
    let mut code = 0;

    if y < rect.y {
        code |= CODE_TOP;
    } else if i64::from(y) >= i64::from(rect.y) + i64::from(rect.h) {
        code |= CODE_BOTTOM;
    }

    if x < rect.x {
        code |= CODE_LEFT;
    } else if i64::from(x) >= i64::from(rect.x) + i64::from(rect.w) {
        code |= CODE_RIGHT;
    }

    code
}

/// Interpolate the coordinate along one axis for a known coordinate on the
/// other one. The products can overflow 32 bits for large screens.
fn lerp(a1: i32, a2: i32, b1: i32, b2: i32, b: i32) -> i32 {
    let (a1, a2, b1, b2, b) = (a1 as i64, a2 as i64, b1 as i64, b2 as i64, b as i64);

    (a1 + ((a2 - a1) * (b - b1)) / (b2 - b1)) as i32
}

/// Move the endpoint with outcode `code` onto the rect boundary
fn clip_point(rect: &Rect, code: u8, (x1, y1): (i32, i32), (x2, y2): (i32, i32)) -> (i32, i32) {
    let (left, top, right, bottom) = (rect.x, rect.y, rect.x2(), rect.y2());

    if code & CODE_TOP != 0 {
        (lerp(x1, x2, y1, y2, top), top)
    } else if code & CODE_BOTTOM != 0 {
        (lerp(x1, x2, y1, y2, bottom), bottom)
    } else if code & CODE_LEFT != 0 {
        (left, lerp(y1, y2, x1, x2, left))
    } else {
        (right, lerp(y1, y2, x1, x2, right))
    }
}

fn clamp(v: i32, lo: i32, hi: i32) -> i32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

pub(super) fn clip_line(rect: &Rect, px1: &mut i32, py1: &mut i32, px2: &mut i32, py2: &mut i32) -> bool {
    if rect.is_empty() {
        return false;
    }

    let (mut x1, mut y1, mut x2, mut y2) = (*px1, *py1, *px2, *py2);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.x2(), rect.y2());

    let inside = |x: i32, y: i32| x >= left && x <= right && y >= top && y <= bottom;

    if inside(x1, y1) && inside(x2, y2) {
        return true;
    }

    if (x1 < left && x2 < left)
        || (x1 > right && x2 > right)
        || (y1 < top && y2 < top)
        || (y1 > bottom && y2 > bottom)
    {
        return false;
    }

    if y1 == y2 {
        *px1 = clamp(x1, left, right);
        *px2 = clamp(x2, left, right);
        return true;
    }

    if x1 == x2 {
        *py1 = clamp(y1, top, bottom);
        *py2 = clamp(y2, top, bottom);
        return true;
    }

    let mut code1 = out_code(rect, x1, y1);
    let mut code2 = out_code(rect, x2, y2);

    while code1 != 0 || code2 != 0 {
        if code1 & code2 != 0 {
            return false;
        }

        if code1 != 0 {
            (x1, y1) = clip_point(rect, code1, (x1, y1), (x2, y2));
            code1 = out_code(rect, x1, y1);
        } else {
            (x2, y2) = clip_point(rect, code2, (x1, y1), (x2, y2));
            code2 = out_code(rect, x2, y2);
        }
    }

    *px1 = x1;
    *py1 = y1;
    *px2 = x2;
    *py2 = y2;

    true
}

#[test]
fn empty_rect_rejects_everything() {
    let r = Rect::new(0, 0, 0, 10);
    let (mut x1, mut y1, mut x2, mut y2) = (0, 0, 0, 5);

    assert!(!clip_line(&r, &mut x1, &mut y1, &mut x2, &mut y2));
}

#[test]
fn segment_inside_is_untouched() {
    let r = Rect::new(0, 0, 10, 10);
    let (mut x1, mut y1, mut x2, mut y2) = (1, 2, 9, 9);

    assert!(clip_line(&r, &mut x1, &mut y1, &mut x2, &mut y2));
    assert_eq!((x1, y1, x2, y2), (1, 2, 9, 9));
}

#[test]
fn horizontal_and_vertical_lines_are_clamped() {
    let r = Rect::new(0, 0, 10, 10);

    let (mut x1, mut y1, mut x2, mut y2) = (-5, 3, 20, 3);
    assert!(clip_line(&r, &mut x1, &mut y1, &mut x2, &mut y2));
    assert_eq!((x1, y1, x2, y2), (0, 3, 9, 3));

    let (mut x1, mut y1, mut x2, mut y2) = (4, 15, 4, -1);
    assert!(clip_line(&r, &mut x1, &mut y1, &mut x2, &mut y2));
    assert_eq!((x1, y1, x2, y2), (4, 9, 4, 0));
}

#[test]
fn diagonal_is_clipped_to_boundary() {
    let r = Rect::new(0, 0, 10, 10);
    let (mut x1, mut y1, mut x2, mut y2) = (-5, -5, 20, 20);

    assert!(clip_line(&r, &mut x1, &mut y1, &mut x2, &mut y2));
    assert_eq!((x1, y1, x2, y2), (0, 0, 9, 9));
}

#[test]
fn corner_miss_returns_false_and_keeps_points() {
    let r = Rect::new(0, 0, 10, 10);
    // Passes by the top-left corner without touching the rect
    let (mut x1, mut y1, mut x2, mut y2) = (-10, 5, 5, -10);

    assert!(!clip_line(&r, &mut x1, &mut y1, &mut x2, &mut y2));
    assert_eq!((x1, y1, x2, y2), (-10, 5, 5, -10));
}
