//! Axis-aligned rectangles, used both for image bounds and for labels.

use serde::{Deserialize, Serialize};

use super::point::Point;

/// An axis-aligned rectangle with an inclusive `min` corner and an
/// exclusive `max` corner.
///
/// Note: This type does NOT enforce that min <= max in the constructor.
/// Label files may carry malformed boxes; anything that depends on the
/// area goes through [`Rect::area`], which reports them as degenerate.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Creates a new rectangle from its corners.
    #[inline]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates a new rectangle from explicit coordinates.
    #[inline]
    pub const fn from_xyxy(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self {
            min: Point::new(xmin, ymin),
            max: Point::new(xmax, ymax),
        }
    }

    /// The rectangle `[0, width) x [0, height)`.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::from_xyxy(0, 0, to_coord(width), to_coord(height))
    }

    /// Returns the width, saturating at the `i32` bounds. May be negative
    /// if the rectangle is malformed.
    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    /// Returns the height, saturating at the `i32` bounds. May be negative
    /// if the rectangle is malformed.
    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Returns the area, or 0 for empty and malformed rectangles.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        let w = i64::from(self.max.x) - i64::from(self.min.x);
        let h = i64::from(self.max.y) - i64::from(self.min.y);
        w.saturating_mul(h)
    }

    /// Returns true if the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Returns the overlap of two rectangles.
    ///
    /// Disjoint rectangles yield the zero rectangle rather than a
    /// rectangle with inverted corners.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect::from_xyxy(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        );
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }

    /// Moves both corners by `delta`.
    #[inline]
    pub fn translate(&self, delta: Point) -> Rect {
        Rect::new(self.min + delta, self.max + delta)
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// Converts an image dimension into a coordinate, saturating at `i32::MAX`.
#[inline]
pub(crate) fn to_coord(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

// Flat corner layout, matching how label files store boxes.
impl Serialize for Rect {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Rect", 4)?;
        state.serialize_field("xmin", &self.min.x)?;
        state.serialize_field("ymin", &self.min.y)?;
        state.serialize_field("xmax", &self.max.x)?;
        state.serialize_field("ymax", &self.max.y)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Rect {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RectData {
            xmin: i32,
            ymin: i32,
            xmax: i32,
            ymax: i32,
        }
        let data = RectData::deserialize(deserializer)?;
        Ok(Rect::from_xyxy(data.xmin, data.ymin, data.xmax, data.ymax))
    }
}
