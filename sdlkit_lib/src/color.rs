use std::fmt;
use sdl2::sys::{SDL_Color, SDL_ALPHA_OPAQUE};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color.
///
/// `Default` is fully transparent black, while `Color::rgb` builds opaque
/// colors.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::rgba(r, g, b, SDL_ALPHA_OPAQUE as u8)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    pub const fn red(&self) -> u8 {
        self.r
    }

    pub fn set_red(&mut self, r: u8) -> &mut Self {
        self.r = r;
        self
    }

    pub const fn green(&self) -> u8 {
        self.g
    }

    pub fn set_green(&mut self, g: u8) -> &mut Self {
        self.g = g;
        self
    }

    pub const fn blue(&self) -> u8 {
        self.b
    }

    pub fn set_blue(&mut self, b: u8) -> &mut Self {
        self.b = b;
        self
    }

    pub const fn alpha(&self) -> u8 {
        self.a
    }

    pub fn set_alpha(&mut self, a: u8) -> &mut Self {
        self.a = a;
        self
    }
}

impl From<SDL_Color> for Color {
    fn from(c: SDL_Color) -> Color {
        Color::rgba(c.r, c.g, c.b, c.a)
    }
}

impl From<Color> for SDL_Color {
    fn from(c: Color) -> SDL_Color {
        SDL_Color {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ r: {}; g: {}; b: {}; a: {} ]", self.r, self.g, self.b, self.a)
    }
}

#[test]
fn rgb_is_opaque() {
    let red = Color::rgb(255, 0, 0);

    assert_eq!(red.alpha(), 255);
    assert_ne!(red, Color::rgba(255, 0, 0, 0));
    assert_eq!(red, Color::rgba(255, 0, 0, 255));
}

#[test]
fn default_is_transparent_black() {
    assert_eq!(Color::default(), Color::TRANSPARENT);
}

#[test]
fn setters_chain() {
    let mut c = Color::BLACK;
    c.set_red(1).set_green(2).set_blue(3).set_alpha(4);

    assert_eq!(c, Color::rgba(1, 2, 3, 4));
    assert_eq!(c.to_string(), "[ r: 1; g: 2; b: 3; a: 4 ]");

    let raw: SDL_Color = c.into();
    assert_eq!(Color::from(raw), c);
}
