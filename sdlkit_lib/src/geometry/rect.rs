use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use sdl2::sys::SDL_Rect;
use serde::{Deserialize, Serialize};
use super::Point;

/// Integer rectangle.
///
/// `x2()` and `y2()` are the *inclusive* bottom-right corner, i.e. `x + w - 1`
/// and `y + h - 1`. Width and height are not validated and may go to zero or
/// below while clipping.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }

    pub const fn from_point_size(start: Point, size: Point) -> Rect {
        Rect::new(start.x, start.y, size.x, size.y)
    }

    pub const fn from_point(start: Point, w: i32, h: i32) -> Rect {
        Rect::new(start.x, start.y, w, h)
    }

    pub const fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Rect {
        Rect::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub const fn from_center_point(center: Point, w: i32, h: i32) -> Rect {
        Rect::from_center(center.x, center.y, w, h)
    }

    pub const fn from_center_size(center: Point, size: Point) -> Rect {
        Rect::from_center(center.x, center.y, size.x, size.y)
    }

    /// Rect spanning the inclusive corners `(x1, y1)` and `(x2, y2)`
    pub const fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Rect {
        Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1)
    }

    pub const fn from_corner_points(top_left: Point, bottom_right: Point) -> Rect {
        Rect::from_corners(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    pub const fn x(&self) -> i32 {
        self.x
    }

    pub fn set_x(&mut self, x: i32) -> &mut Self {
        self.x = x;
        self
    }

    pub const fn y(&self) -> i32 {
        self.y
    }

    pub fn set_y(&mut self, y: i32) -> &mut Self {
        self.y = y;
        self
    }

    pub const fn w(&self) -> i32 {
        self.w
    }

    pub fn set_w(&mut self, w: i32) -> &mut Self {
        self.w = w;
        self
    }

    pub const fn h(&self) -> i32 {
        self.h
    }

    pub fn set_h(&mut self, h: i32) -> &mut Self {
        self.h = h;
        self
    }

    pub const fn x2(&self) -> i32 {
        self.x + self.w - 1
    }

    /// Move the right edge, keeping `x`
    pub fn set_x2(&mut self, x2: i32) -> &mut Self {
        self.w = x2 - self.x + 1;
        self
    }

    pub const fn y2(&self) -> i32 {
        self.y + self.h - 1
    }

    /// Move the bottom edge, keeping `y`
    pub fn set_y2(&mut self, y2: i32) -> &mut Self {
        self.h = y2 - self.y + 1;
        self
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn top_right(&self) -> Point {
        Point::new(self.x2(), self.y)
    }

    pub const fn bottom_left(&self) -> Point {
        Point::new(self.x, self.y2())
    }

    pub const fn bottom_right(&self) -> Point {
        Point::new(self.x2(), self.y2())
    }

    pub const fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub const fn size(&self) -> Point {
        Point::new(self.w, self.h)
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && py >= self.y && px <= self.x2() && py <= self.y2()
    }

    pub const fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    pub const fn contains_rect(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.x2() <= self.x2() && r.y2() <= self.y2()
    }

    pub const fn intersects(&self, r: &Rect) -> bool {
        !(r.x2() < self.x || r.y2() < self.y || r.x > self.x2() || r.y > self.y2())
    }

    /// Smallest rect containing both `self` and `r`
    pub fn union(&self, r: &Rect) -> Rect {
        Rect::from_corners(
            self.x.min(r.x),
            self.y.min(r.y),
            self.x2().max(r.x2()),
            self.y2().max(r.y2()),
        )
    }

    pub fn make_union_with(&mut self, r: &Rect) -> &mut Self {
        *self = self.union(r);
        self
    }

    pub fn intersection(&self, r: &Rect) -> Option<Rect> {
        if !self.intersects(r) {
            return None;
        }

        Some(Rect::from_corners(
            self.x.max(r.x),
            self.y.max(r.y),
            self.x2().min(r.x2()),
            self.y2().min(r.y2()),
        ))
    }

    /// Grow by `hamount` on the left and right and `vamount` on the top and
    /// bottom
    pub fn extend(&mut self, hamount: u32, vamount: u32) -> &mut Self {
        let (h, v) = (hamount as i32, vamount as i32);
        self.x -= h;
        self.y -= v;
        self.w += h * 2;
        self.h += v * 2;
        self
    }

    pub fn extend_all(&mut self, amount: u32) -> &mut Self {
        self.extend(amount, amount)
    }

    pub fn extension(&self, hamount: u32, vamount: u32) -> Rect {
        let mut r = *self;
        r.extend(hamount, vamount);
        r
    }

    pub fn extension_all(&self, amount: u32) -> Rect {
        self.extension(amount, amount)
    }

    /// True if `self` is strictly narrower *and* strictly shorter than `r`
    pub const fn smaller_than(&self, r: &Rect) -> bool {
        self.h < r.h && self.w < r.w
    }

    /// Clip the segment `p1`-`p2` to this rect. Returns false and leaves the
    /// points untouched if the segment misses the rect entirely.
    pub fn clip_line(&self, p1: &mut Point, p2: &mut Point) -> bool {
        self.clip_line_coords(&mut p1.x, &mut p1.y, &mut p2.x, &mut p2.y)
    }

    pub fn clip_line_coords(&self, x1: &mut i32, y1: &mut i32, x2: &mut i32, y2: &mut i32) -> bool {
        super::clip::clip_line(self, x1, y1, x2, y2)
    }
}

impl From<SDL_Rect> for Rect {
    fn from(r: SDL_Rect) -> Rect {
        Rect::new(r.x, r.y, r.w, r.h)
    }
}

impl From<Rect> for SDL_Rect {
    fn from(r: Rect) -> SDL_Rect {
        SDL_Rect {
            x: r.x,
            y: r.y,
            w: r.w,
            h: r.h,
        }
    }
}

impl Add<Point> for Rect {
    type Output = Rect;

    fn add(self, offset: Point) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

impl Sub<Point> for Rect {
    type Output = Rect;

    fn sub(self, offset: Point) -> Rect {
        Rect::new(self.x - offset.x, self.y - offset.y, self.w, self.h)
    }
}

impl AddAssign<Point> for Rect {
    fn add_assign(&mut self, offset: Point) {
        self.x += offset.x;
        self.y += offset.y;
    }
}

impl SubAssign<Point> for Rect {
    fn sub_assign(&mut self, offset: Point) {
        self.x -= offset.x;
        self.y -= offset.y;
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ x:{}; y:{}; w:{}; h:{} ]", self.x, self.y, self.w, self.h)
    }
}
