use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use sdl2::sys::SDL_Point;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    pub const fn x(self) -> i32 {
        self.x
    }

    pub const fn y(self) -> i32 {
        self.y
    }

    pub fn set_x(&mut self, x: i32) -> &mut Self {
        self.x = x;
        self
    }

    pub fn set_y(&mut self, y: i32) -> &mut Self {
        self.y = y;
        self
    }
}

impl From<SDL_Point> for Point {
    fn from(p: SDL_Point) -> Point {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for SDL_Point {
    fn from(p: Point) -> SDL_Point {
        SDL_Point { x: p.x, y: p.y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Point {
        Point::new(x, y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Integer division, truncating towards zero
impl Div<i32> for Point {
    type Output = Point;

    fn div(self, rhs: i32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ x:{}; y:{} ]", self.x, self.y)
    }
}

#[test]
fn arithmetic() {
    let a = Point::new(3, -7);
    let b = Point::new(-11, 5);

    assert_eq!((a + b) - b, a);
    assert_eq!(-a, Point::new(-3, 7));
    assert_eq!(a * 3, Point::new(9, -21));
    assert_eq!(a / 2, Point::new(1, -3));

    let mut c = a;
    c += b;
    assert_eq!(c, Point::new(-8, -2));
    c -= b;
    assert_eq!(c, a);
}

#[test]
fn display() {
    assert_eq!(Point::new(4, -2).to_string(), "[ x:4; y:-2 ]");
}
