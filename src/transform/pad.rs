//! Padding onto a larger transparent canvas.

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::AugmentError;
use crate::geom::{FloatRange, IntRange, Rect, SideRanges, Sides};
use crate::labels::Labels;

/// How many pixels are added to each edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadAmount {
    Fixed(Sides),
    /// A sampled fraction of the width (left/right) or height (top/bottom).
    Percent(SideRanges<FloatRange>),
    Pixels(SideRanges<IntRange>),
}

impl PadAmount {
    /// Resolves the amounts against the current image bounds.
    pub fn sample(&self, cfg: &mut Config, bounds: Rect) -> Sides {
        match self {
            PadAmount::Fixed(sides) => *sides,
            PadAmount::Percent(rules) => {
                rules.sample_fraction(cfg.rng(), bounds.width(), bounds.height())
            }
            PadAmount::Pixels(rules) => rules.sample_pixels(cfg.rng()),
        }
    }

    fn is_non_negative(&self) -> bool {
        match self {
            PadAmount::Fixed(sides) => sides.is_non_negative(),
            PadAmount::Percent(rules) => rules.is_non_negative(),
            PadAmount::Pixels(rules) => rules.is_non_negative(),
        }
    }
}

/// Grows the image by a sampled amount on each edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PadDef")]
pub struct Pad {
    amount: PadAmount,
}

#[derive(Deserialize)]
struct PadDef {
    amount: PadAmount,
}

impl TryFrom<PadDef> for Pad {
    type Error = AugmentError;

    fn try_from(def: PadDef) -> Result<Self, Self::Error> {
        Pad::new(def.amount)
    }
}

impl Pad {
    /// Creates a pad transform, rejecting amounts that could be negative.
    pub fn new(amount: PadAmount) -> Result<Self, AugmentError> {
        if !amount.is_non_negative() {
            return Err(AugmentError::InvalidParameter(
                "pad amounts must be >= 0".to_string(),
            ));
        }
        Ok(Self { amount })
    }

    pub fn amount(&self) -> &PadAmount {
        &self.amount
    }

    pub(super) fn apply<C: Canvas>(
        &self,
        cfg: &mut Config,
        image: C,
        labels: Labels,
    ) -> Result<(C, Labels), AugmentError> {
        let sides = self.amount.sample(cfg, image.bounds());
        if sides == Sides::default() {
            return Ok((image, labels));
        }

        let (width, height) = image.dimensions();
        let grow = |dim: u32, a: i32, b: i32| -> Option<u32> {
            let extra = u32::try_from(a).ok()?.checked_add(u32::try_from(b).ok()?)?;
            dim.checked_add(extra)
        };
        let (Some(new_width), Some(new_height)) = (
            grow(width, sides.left, sides.right),
            grow(height, sides.top, sides.bottom),
        ) else {
            return Err(AugmentError::DegenerateSize {
                width: i64::from(width) + i64::from(sides.left) + i64::from(sides.right),
                height: i64::from(height) + i64::from(sides.top) + i64::from(sides.bottom),
            });
        };

        let mut canvas = C::blank(new_width, new_height);
        canvas.draw_over(&image, sides.offset());
        Ok((canvas, labels.translate(sides.offset())))
    }
}
