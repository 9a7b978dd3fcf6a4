//! Rectangles and squares with area, perimeter, diagonal, an ASCII picture,
//! and a count of how many copies of one shape fit inside another.

use std::fmt;

/// Largest side [`Shape::picture`] will draw.
pub const MAX_PICTURE_SIDE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// A side exceeds [`MAX_PICTURE_SIDE`].
    TooBigForPicture { width: u32, height: u32 },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::TooBigForPicture { .. } => write!(f, "Too big for picture."),
        }
    }
}

impl std::error::Error for ShapeError {}

/// An axis-aligned shape with integer sides.
///
/// Everything except [`width`](Shape::width) and [`height`](Shape::height)
/// has a default implementation.
pub trait Shape {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    fn perimeter(&self) -> u64 {
        2 * u64::from(self.width()) + 2 * u64::from(self.height())
    }

    fn diagonal(&self) -> f64 {
        f64::from(self.width()).hypot(f64::from(self.height()))
    }

    /// One row of `*` per unit of height, each `width` long and ending in
    /// `\n`.
    ///
    /// # Errors
    /// [`ShapeError::TooBigForPicture`] if either side exceeds
    /// [`MAX_PICTURE_SIDE`].
    fn picture(&self) -> Result<String, ShapeError> {
        let (width, height) = (self.width(), self.height());
        if width > MAX_PICTURE_SIDE || height > MAX_PICTURE_SIDE {
            return Err(ShapeError::TooBigForPicture { width, height });
        }
        let row = format!("{}\n", "*".repeat(width as usize));
        Ok(row.repeat(height as usize))
    }

    /// How many copies of `inner` fit side by side inside `self` without
    /// rotating. A zero-sized `inner` fits zero times.
    fn amount_inside(&self, inner: &dyn Shape) -> u64 {
        if inner.width() == 0 || inner.height() == 0 {
            return 0;
        }
        u64::from(self.width() / inner.width()) * u64::from(self.height() / inner.height())
    }
}

/// # Examples
/// ```
/// use u_drills::shapes::{Rectangle, Shape, Square};
///
/// let rect = Rectangle::new(16, 8);
/// assert_eq!(rect.area(), 128);
/// assert_eq!(rect.amount_inside(&Square::new(4)), 8);
/// assert_eq!(rect.to_string(), "Rectangle(width=16, height=8)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    width: u32,
    height: u32,
}

impl Rectangle {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }
}

impl Shape for Rectangle {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rectangle(width={}, height={})", self.width, self.height)
    }
}

/// A rectangle whose sides always stay equal. Setting either the width or
/// the height sets both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    side: u32,
}

impl Square {
    pub fn new(side: u32) -> Self {
        Self { side }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn set_side(&mut self, side: u32) {
        self.side = side;
    }

    pub fn set_width(&mut self, width: u32) {
        self.set_side(width);
    }

    pub fn set_height(&mut self, height: u32) {
        self.set_side(height);
    }
}

impl Shape for Square {
    fn width(&self) -> u32 {
        self.side
    }

    fn height(&self) -> u32 {
        self.side
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square(side={})", self.side)
    }
}

impl From<Square> for Rectangle {
    fn from(sq: Square) -> Self {
        Rectangle::new(sq.side, sq.side)
    }
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn inner_copies_never_exceed_area(
            w in 0_u32..200, h in 0_u32..200,
            iw in 1_u32..50, ih in 1_u32..50,
        ) {
            let outer = Rectangle::new(w, h);
            let inner = Rectangle::new(iw, ih);
            prop_assert!(outer.amount_inside(&inner) * inner.area() <= outer.area());
        }

        #[test]
        fn picture_matches_area(w in 0_u32..=50, h in 0_u32..=50) {
            let pic = Rectangle::new(w, h).picture().unwrap();
            prop_assert_eq!(pic.matches('*').count() as u64, u64::from(w) * u64::from(h));
            prop_assert_eq!(pic.lines().count(), h as usize);
        }

        #[test]
        fn square_matches_equivalent_rectangle(side in 0_u32..1000) {
            let sq = Square::new(side);
            let rect = Rectangle::from(sq);
            prop_assert_eq!(sq.area(), rect.area());
            prop_assert_eq!(sq.perimeter(), rect.perimeter());
            prop_assert_eq!(sq.diagonal(), rect.diagonal());
        }
    }
}
