//! Geometry value types shared by every transform.
//!
//! All coordinates are integer pixels with (0, 0) at the top-left corner.
//! Rectangles are half-open: `min` is inclusive, `max` exclusive.
//!
//! # Example
//!
//! ```
//! use imgaug::geom::{IntRange, Rect, SideMask, SideRanges};
//!
//! let label = Rect::from_xyxy(26, 9, 110, 129);
//! assert_eq!(label.area(), 84 * 120);
//!
//! // 0-30 px on top and bottom, 0-10 px on left and right
//! let pad = SideRanges::new()
//!     .with(SideMask::TopBottom, IntRange::new(0, 30).unwrap())
//!     .with(SideMask::LeftRight, IntRange::new(0, 10).unwrap());
//! assert!(pad.expand().iter().all(Option::is_some));
//! ```

mod point;
mod range;
mod rect;
mod side;

pub use point::Point;
pub use range::{FloatRange, IntRange};
pub use rect::Rect;
pub(crate) use rect::to_coord;
pub use side::{Side, SideMask, SideRanges, Sides};
