use sdl2::sys::SDL_Rect;
use super::{Point, Rect};

fn ab() -> (Rect, Rect) {
    (Rect::new(1, 1, 5, 5), Rect::new(2, 2, 6, 6))
}

#[test]
fn default_is_zero() {
    assert_eq!(Rect::default(), Rect::new(0, 0, 0, 0));
}

#[test]
fn from_sdl_rect() {
    let raw = SDL_Rect { x: 1, y: 2, w: 3, h: 4 };
    let r = Rect::from(raw);

    assert_eq!(r, Rect::new(1, 2, 3, 4));

    let back: SDL_Rect = r.into();
    assert_eq!((back.x, back.y, back.w, back.h), (1, 2, 3, 4));
}

#[test]
fn from_points() {
    let start = Point::new(6, 6);

    assert_eq!(Rect::from_point_size(start, Point::new(7, 8)), Rect::new(6, 6, 7, 8));
    assert_eq!(Rect::from_point(start, 7, 8), Rect::new(6, 6, 7, 8));
}

#[test]
fn from_center() {
    let center = Point::new(10, 10);
    let expected = Rect::new(5, 5, 10, 10);

    assert_eq!(Rect::from_center(10, 10, 10, 10), expected);
    assert_eq!(Rect::from_center_point(center, 10, 10), expected);
    assert_eq!(Rect::from_center_size(center, Point::new(10, 10)), expected);
}

#[test]
fn from_corners() {
    let r = Rect::from_corners(1, 1, 3, 3);
    assert_eq!(r, Rect::new(1, 1, 3, 3));
    assert_eq!(Rect::from_corner_points(Point::new(1, 1), Point::new(3, 3)), r);

    // Round trip through the inclusive corners
    let r = Rect::new(-4, 7, 13, 2);
    assert_eq!(Rect::from_corners(r.x, r.y, r.x2(), r.y2()), r);
}

#[test]
fn accessors() {
    let (mut a, _) = ab();

    assert_eq!(a.x(), 1);
    assert_eq!(a.x2(), 5);
    assert_eq!(a.y2(), 5);

    a.set_x(10).set_y(11).set_w(12).set_h(13);
    assert_eq!(a, Rect::new(10, 11, 12, 13));

    a.set_x2(30);
    assert_eq!(a.w, 21);
    a.set_y2(11);
    assert_eq!(a.h, 1);
}

#[test]
fn inclusive_corner_convention() {
    let r = Rect::new(1, 1, 2, 2);

    assert_eq!(r.x2(), 2);
    assert_eq!(r.y2(), 2);
    assert!(r.contains(2, 2));
    assert!(!r.contains(3, 3));
}

#[test]
fn corners_and_center() {
    let (a, _) = ab();

    assert_eq!(a.top_left(), Point::new(1, 1));
    assert_eq!(a.top_right(), Point::new(5, 1));
    assert_eq!(a.bottom_left(), Point::new(1, 5));
    assert_eq!(a.bottom_right(), Point::new(5, 5));
    assert_eq!(a.center(), Point::new(3, 3));
}

#[test]
fn contains() {
    let (a, _) = ab();

    assert!(!a.contains(-1, -1));
    assert!(!a.contains(0, 0));
    assert!(a.contains(1, 1));
    assert!(a.contains_point(Point::new(2, 2)));
    assert!(a.contains_point(Point::new(5, 5)));
    assert!(!a.contains_point(Point::new(6, 6)));

    assert!(a.contains_rect(&Rect::new(2, 2, 1, 1)));
    assert!(!a.contains_rect(&Rect::new(10, 10, 1, 1)));
}

#[test]
fn intersects() {
    let (a, b) = ab();

    assert!(a.intersects(&b));
    assert!(a.intersects(&a));
    assert!(!a.intersects(&Rect::new(7, 7, 2, 2)));
}

#[test]
fn union() {
    let (mut a, b) = ab();
    let u = a.union(&b);

    assert_eq!(u, Rect::from_corners(1, 1, 7, 7));
    assert!(u.contains_rect(&a));
    assert!(u.contains_rect(&b));

    a.make_union_with(&b);
    assert_eq!(a, u);
}

#[test]
fn intersection() {
    let (a, b) = ab();

    assert_eq!(a.intersection(&b), Some(Rect::from_corners(2, 2, 5, 5)));
    assert_eq!(a.intersection(&Rect::new(10, 10, 1, 1)), None);
}

#[test]
fn extension() {
    let (a, b) = ab();

    assert_eq!(a.extension(2, 2), Rect::new(-1, -1, 9, 9));
    assert_eq!(b.extension(1, 2), Rect::new(1, 0, 8, 10));

    let mut c = a;
    c.extend_all(3).extend_all(3);
    assert_eq!(c.w, a.w + 4 * 3);
    assert_eq!(a.extension_all(3).extension_all(3), c);
}

#[test]
fn intersects_line() {
    let (a, _) = ab();

    let (mut p1, mut p2) = (Point::new(3, 1), Point::new(4, 5));
    assert!(a.clip_line(&mut p1, &mut p2));

    let (mut x1, mut y1, mut x2, mut y2) = (3, 1, 4, 5);
    assert!(a.clip_line_coords(&mut x1, &mut y1, &mut x2, &mut y2));

    let (mut p1, mut p2) = (Point::new(100, 100), Point::new(101, 101));
    assert!(!a.clip_line(&mut p1, &mut p2));
}

#[test]
fn move_rect() {
    let (_, mut b) = ab();
    let offset = Point::new(1, 1);

    assert_eq!(b - offset, Rect::new(1, 1, 6, 6));
    assert_eq!(b + offset, Rect::new(3, 3, 6, 6));

    b += offset;
    b -= offset * 2;
    assert_eq!(b, Rect::new(1, 1, 6, 6));
}

#[test]
fn smaller_than() {
    let (a, b) = ab();

    assert!(a.smaller_than(&b));
    assert!(!b.smaller_than(&a));
    assert!(!a.smaller_than(&Rect::new(0, 0, 6, 5)));
}

#[test]
fn display() {
    assert_eq!(Rect::new(1, -2, 3, 4).to_string(), "[ x:1; y:-2; w:3; h:4 ]");
}

/// Every non-empty rect with corners in a small neighbourhood of the origin
fn small_rects() -> Vec<Rect> {
    let mut rects = Vec::new();

    for x in -1..2 {
        for y in -1..2 {
            for w in 1..4 {
                for h in 1..4 {
                    rects.push(Rect::new(x, y, w, h));
                }
            }
        }
    }

    rects
}

#[test]
fn union_contains_both() {
    let rects = small_rects();

    for a in &rects {
        for b in &rects {
            let u = a.union(b);

            assert!(u.contains_rect(a) && u.contains_rect(b), "{:?} | {:?} = {:?}", a, b, u);
            assert_eq!(u, b.union(a));
        }
    }
}

#[test]
fn intersection_is_shared_pixels() {
    let rects = small_rects();

    for a in &rects {
        for b in &rects {
            let i = a.intersection(b);
            assert_eq!(i, b.intersection(a));

            if let Some(i) = i {
                assert!(!i.is_empty());
                assert!(a.contains_rect(&i) && b.contains_rect(&i), "{:?} & {:?} = {:?}", a, b, i);
            }

            let mut shared = false;
            for py in -2..6 {
                for px in -2..6 {
                    let in_both = a.contains(px, py) && b.contains(px, py);
                    shared |= in_both;

                    assert_eq!(i.is_some_and(|i| i.contains(px, py)), in_both, "{:?} & {:?} at {} {}", a, b, px, py);
                }
            }
            assert_eq!(i.is_some(), shared);
            assert_eq!(a.intersects(b), shared);
        }
    }
}

#[test]
fn line_clipping_agrees_with_sdl() {
    let rects = [Rect::new(2, 3, 7, 5), Rect::new(0, 0, 1, 1), Rect::new(-4, -4, 3, 9)];

    for r in rects {
        let raw = SDL_Rect::from(r);

        for x1 in (-8..14).step_by(3) {
            for y1 in (-8..12).step_by(2) {
                for x2 in (-7..15).step_by(4) {
                    for y2 in (-9..13).step_by(3) {
                        let mut ours = (x1, y1, x2, y2);
                        let kept = r.clip_line_coords(&mut ours.0, &mut ours.1, &mut ours.2, &mut ours.3);

                        let mut sdl = (x1, y1, x2, y2);
                        let sdl_kept = unsafe {
                            sdl2::sys::SDL_IntersectRectAndLine(&raw, &mut sdl.0, &mut sdl.1, &mut sdl.2, &mut sdl.3)
                        } == sdl2::sys::SDL_bool::SDL_TRUE;

                        assert_eq!(kept, sdl_kept, "{:?} line {:?}", r, (x1, y1, x2, y2));
                        if kept {
                            assert_eq!(ours, sdl, "{:?} line {:?}", r, (x1, y1, x2, y2));
                        }
                    }
                }
            }
        }
    }
}
