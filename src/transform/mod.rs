//! The transform tree.
//!
//! A [`Transform`] is either a primitive geometric operation or a
//! combinator over child transforms. Every node exposes the same call,
//! [`Transform::apply`], which consumes an image and its labels and returns
//! the transformed pair.
//!
//! # Example
//!
//! ```
//! use image::DynamicImage;
//! use imgaug::config::{BBoxPolicy, Config};
//! use imgaug::geom::{Rect, Sides};
//! use imgaug::labels::Labels;
//! use imgaug::transform::{CropRegion, PadAmount, Transform};
//!
//! let pipeline = Transform::sequential([
//!     Transform::FlipHorizontal,
//!     Transform::pad(PadAmount::Fixed(Sides::new(0, 0, 10, 0))).unwrap(),
//!     Transform::crop(CropRegion::Fixed(Rect::from_xyxy(10, 10, 140, 120))),
//! ]);
//!
//! let mut cfg = Config::new(42, BBoxPolicy::new(20, 0.1).unwrap());
//! let labels = Labels::new(vec![Rect::from_xyxy(26, 9, 106, 129)]);
//! let (image, labels) = pipeline
//!     .apply(&mut cfg, DynamicImage::new_rgb8(192, 129), labels)
//!     .unwrap();
//! assert_eq!((image.width(), image.height()), (130, 110));
//! assert_eq!(labels.bboxes, vec![Rect::from_xyxy(76, 0, 130, 110)]);
//! ```

mod combinator;
mod crop;
mod flip;
mod pad;
mod resize;

pub use crop::{Crop, CropRegion};
pub use pad::{Pad, PadAmount};
pub use resize::{Resize, TargetSize};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, ResizeAlgorithm};
use crate::config::Config;
use crate::error::AugmentError;
use crate::geom::IntRange;
use crate::labels::Labels;

/// A node of an augmentation pipeline.
///
/// Transforms hold no state between calls: applying the same tree twice
/// with the same random state gives the same result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transform {
    /// Returns its input unchanged.
    #[default]
    Noop,
    FlipHorizontal,
    FlipVertical,
    Crop(Crop),
    Pad(Pad),
    Resize(Resize),
    /// Applies every step in order.
    Sequential { steps: Vec<Transform> },
    /// Applies `then` with probability `p`.
    Sometimes { p: f64, then: Box<Transform> },
    /// Applies `count` of the choices, in random order.
    SomeOf {
        count: IntRange,
        choices: Vec<Transform>,
    },
    /// Applies exactly one of the choices.
    OneOf { choices: Vec<Transform> },
}

impl Transform {
    pub fn sequential(steps: impl IntoIterator<Item = Transform>) -> Self {
        Transform::Sequential {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn sometimes(p: f64, then: Transform) -> Self {
        Transform::Sometimes {
            p,
            then: Box::new(then),
        }
    }

    pub fn some_of(count: IntRange, choices: impl IntoIterator<Item = Transform>) -> Self {
        Transform::SomeOf {
            count,
            choices: choices.into_iter().collect(),
        }
    }

    pub fn one_of(choices: impl IntoIterator<Item = Transform>) -> Self {
        Transform::OneOf {
            choices: choices.into_iter().collect(),
        }
    }

    pub fn crop(region: CropRegion) -> Self {
        Transform::Crop(Crop::new(region))
    }

    pub fn pad(amount: PadAmount) -> Result<Self, AugmentError> {
        Pad::new(amount).map(Transform::Pad)
    }

    pub fn resize(size: TargetSize, algorithms: Vec<ResizeAlgorithm>) -> Result<Self, AugmentError> {
        Resize::new(size, algorithms).map(Transform::Resize)
    }

    /// The operation name, as written in pipeline documents.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Noop => "noop",
            Transform::FlipHorizontal => "flip_horizontal",
            Transform::FlipVertical => "flip_vertical",
            Transform::Crop(_) => "crop",
            Transform::Pad(_) => "pad",
            Transform::Resize(_) => "resize",
            Transform::Sequential { .. } => "sequential",
            Transform::Sometimes { .. } => "sometimes",
            Transform::SomeOf { .. } => "some_of",
            Transform::OneOf { .. } => "one_of",
        }
    }

    /// Applies this transform to `image` and `labels`.
    ///
    /// Randomness is drawn from `cfg` only; a failing child aborts the
    /// whole call with its error.
    pub fn apply<C: Canvas>(
        &self,
        cfg: &mut Config,
        image: C,
        labels: Labels,
    ) -> Result<(C, Labels), AugmentError> {
        log::trace!("apply {}", self.name());
        match self {
            Transform::Noop => Ok((image, labels)),
            Transform::FlipHorizontal => Ok(flip::flip_horizontal(image, labels)),
            Transform::FlipVertical => Ok(flip::flip_vertical(image, labels)),
            Transform::Crop(crop) => Ok(crop.apply(cfg, image, labels)),
            Transform::Pad(pad) => pad.apply(cfg, image, labels),
            Transform::Resize(resize) => resize.apply(cfg, image, labels),
            Transform::Sequential { steps } => combinator::sequential(steps, cfg, image, labels),
            Transform::Sometimes { p, then } => {
                combinator::sometimes(*p, then, cfg, image, labels)
            }
            Transform::SomeOf { count, choices } => {
                combinator::some_of(count, choices, cfg, image, labels)
            }
            Transform::OneOf { choices } => combinator::one_of(choices, cfg, image, labels),
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.name(), indent = depth * 2)?;
        match self {
            Transform::Crop(crop) => writeln!(f, " {}", describe_crop(&crop.region)),
            Transform::Pad(pad) => writeln!(f, " {}", describe_pad(pad.amount())),
            Transform::Resize(resize) => {
                write!(f, " {}", describe_size(resize.size()))?;
                if !resize.algorithms().is_empty() {
                    write!(f, " using {:?}", resize.algorithms())?;
                }
                writeln!(f)
            }
            Transform::Sequential { steps } => {
                writeln!(f)?;
                steps.iter().try_for_each(|t| t.fmt_tree(f, depth + 1))
            }
            Transform::Sometimes { p, then } => {
                writeln!(f, " p={}", p)?;
                then.fmt_tree(f, depth + 1)
            }
            Transform::SomeOf { count, choices } => {
                writeln!(f, " count=[{}, {})", count.min(), count.max())?;
                choices.iter().try_for_each(|t| t.fmt_tree(f, depth + 1))
            }
            Transform::OneOf { choices } => {
                writeln!(f)?;
                choices.iter().try_for_each(|t| t.fmt_tree(f, depth + 1))
            }
            Transform::Noop | Transform::FlipHorizontal | Transform::FlipVertical => writeln!(f),
        }
    }
}

/// Renders the tree one node per line, children indented under parents.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

fn describe_crop(region: &CropRegion) -> String {
    match region {
        CropRegion::Fixed(rect) => format!("fixed {:?}", rect),
        CropRegion::Percent(rules) => format!("percent {:?}", rules.iter().collect::<Vec<_>>()),
        CropRegion::Pixels(rules) => format!("pixels {:?}", rules.iter().collect::<Vec<_>>()),
    }
}

fn describe_pad(amount: &PadAmount) -> String {
    match amount {
        PadAmount::Fixed(sides) => format!(
            "fixed l={} t={} r={} b={}",
            sides.left, sides.top, sides.right, sides.bottom
        ),
        PadAmount::Percent(rules) => format!("percent {:?}", rules.iter().collect::<Vec<_>>()),
        PadAmount::Pixels(rules) => format!("pixels {:?}", rules.iter().collect::<Vec<_>>()),
    }
}

fn describe_size(size: &TargetSize) -> String {
    match size {
        TargetSize::Fixed { width, height } => format!("fixed {}x{}", width, height),
        TargetSize::Scale { width, height } => format!(
            "scale w=[{}, {}) h=[{}, {})",
            width.min(),
            width.max(),
            height.min(),
            height.max()
        ),
        TargetSize::Delta { width, height } => format!(
            "delta w=[{}, {}) h=[{}, {})",
            width.min(),
            width.max(),
            height.min(),
            height.max()
        ),
    }
}
