//! Mirroring along either axis.

use crate::canvas::Canvas;
use crate::geom::{to_coord, Point, Rect};
use crate::labels::Labels;

/// Mirrors left-right: `[x0, x1)` becomes `[W - x1, W - x0)`.
pub(super) fn flip_horizontal<C: Canvas>(image: C, labels: Labels) -> (C, Labels) {
    let image = image.flip_horizontal();
    let width = to_coord(image.dimensions().0);
    let labels = labels.map(|r| {
        Rect::new(
            Point::new(width.saturating_sub(r.max.x), r.min.y),
            Point::new(width.saturating_sub(r.min.x), r.max.y),
        )
    });
    (image, labels)
}

/// Mirrors top-bottom: `[y0, y1)` becomes `[H - y1, H - y0)`.
pub(super) fn flip_vertical<C: Canvas>(image: C, labels: Labels) -> (C, Labels) {
    let image = image.flip_vertical();
    let height = to_coord(image.dimensions().1);
    let labels = labels.map(|r| {
        Rect::new(
            Point::new(r.min.x, height.saturating_sub(r.max.y)),
            Point::new(r.max.x, height.saturating_sub(r.min.y)),
        )
    });
    (image, labels)
}
