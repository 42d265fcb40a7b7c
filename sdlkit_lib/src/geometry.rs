//! Integer geometry: points, rectangles, line clipping and tile planning.

mod clip;
mod point;
mod rect;
pub mod tiling;
#[cfg(test)]
mod test;

use std::ptr;

pub use point::Point;
pub use rect::Rect;

/// Pointer for the SDL calls where NULL stands for "everything"
pub(crate) fn opt_ptr<T>(value: &Option<T>) -> *const T {
    match value {
        Some(v) => v,
        None => ptr::null(),
    }
}
