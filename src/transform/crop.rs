//! Cropping, with labels clipped to the kept region and filtered by the
//! configured [`BBoxPolicy`](crate::config::BBoxPolicy).

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::config::Config;
use crate::geom::{FloatRange, IntRange, Point, Rect, SideRanges, Sides};
use crate::labels::Labels;

/// How the crop rectangle is chosen for each image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropRegion {
    /// Always the same rectangle.
    Fixed(Rect),
    /// A sampled fraction of the width (left/right) or height (top/bottom)
    /// trimmed from each edge.
    Percent(SideRanges<FloatRange>),
    /// A sampled number of pixels trimmed from each edge.
    Pixels(SideRanges<IntRange>),
}

impl CropRegion {
    /// Resolves the region against the current image bounds.
    pub fn sample(&self, cfg: &mut Config, bounds: Rect) -> Rect {
        match self {
            CropRegion::Fixed(rect) => *rect,
            CropRegion::Percent(rules) => {
                let sides = rules.sample_fraction(cfg.rng(), bounds.width(), bounds.height());
                inset(bounds, sides)
            }
            CropRegion::Pixels(rules) => inset(bounds, rules.sample_pixels(cfg.rng())),
        }
    }
}

/// Shrinks `bounds` by `sides`, collapsing to an empty rectangle rather
/// than inverting when the trims overlap.
fn inset(bounds: Rect, sides: Sides) -> Rect {
    let min = bounds.min + sides.offset();
    let max = bounds.max - Point::new(sides.right, sides.bottom);
    Rect::new(min, Point::new(max.x.max(min.x), max.y.max(min.y)))
}

/// Crops the image to a sampled region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub region: CropRegion,
}

impl Crop {
    pub fn new(region: CropRegion) -> Self {
        Self { region }
    }

    pub(super) fn apply<C: Canvas>(&self, cfg: &mut Config, image: C, labels: Labels) -> (C, Labels) {
        let bounds = image.bounds();
        let rect = self.region.sample(cfg, bounds).intersect(&bounds);
        let image = image.crop(rect);

        let origin = Point::default() - rect.min;
        let before = labels.len();
        let kept: Labels = labels
            .iter()
            .map(|label| label.intersect(&rect).translate(origin))
            .filter(|clipped| cfg.keep_bbox(&rect, clipped))
            .collect();

        if kept.len() < before {
            log::debug!(
                "crop {:?} dropped {} of {} label(s)",
                rect,
                before - kept.len(),
                before
            );
        }
        (image, kept)
    }
}
