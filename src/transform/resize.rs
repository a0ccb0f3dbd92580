//! Resizing, with labels scaled per axis.

use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, ResizeAlgorithm};
use crate::config::Config;
use crate::error::AugmentError;
use crate::geom::{FloatRange, IntRange, Rect};
use crate::labels::Labels;

/// How the output size is chosen for each image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSize {
    Fixed { width: u32, height: u32 },
    /// Sampled multipliers of the current size.
    Scale { width: FloatRange, height: FloatRange },
    /// Sampled pixel offsets added to the current size.
    Delta { width: IntRange, height: IntRange },
}

impl TargetSize {
    /// Resolves the target for an image of `width` x `height`.
    ///
    /// Width is sampled before height.
    pub fn sample(&self, cfg: &mut Config, width: u32, height: u32) -> (i64, i64) {
        match self {
            TargetSize::Fixed { width, height } => (i64::from(*width), i64::from(*height)),
            TargetSize::Scale {
                width: sx,
                height: sy,
            } => {
                let sx = sx.sample(cfg.rng());
                let sy = sy.sample(cfg.rng());
                (
                    (f64::from(width) * sx).round() as i64,
                    (f64::from(height) * sy).round() as i64,
                )
            }
            TargetSize::Delta {
                width: dx,
                height: dy,
            } => {
                let dx = dx.sample(cfg.rng());
                let dy = dy.sample(cfg.rng());
                (
                    i64::from(width) + i64::from(dx),
                    i64::from(height) + i64::from(dy),
                )
            }
        }
    }
}

/// Resizes the image to a sampled size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResizeDef")]
pub struct Resize {
    size: TargetSize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    algorithms: Vec<ResizeAlgorithm>,
}

#[derive(Deserialize)]
struct ResizeDef {
    size: TargetSize,
    #[serde(default)]
    algorithms: Vec<ResizeAlgorithm>,
}

impl TryFrom<ResizeDef> for Resize {
    type Error = AugmentError;

    fn try_from(def: ResizeDef) -> Result<Self, Self::Error> {
        Resize::new(def.size, def.algorithms)
    }
}

impl Resize {
    /// Creates a resize transform.
    ///
    /// With several `algorithms` one is picked at random per image; an
    /// empty list means nearest-neighbour.
    pub fn new(size: TargetSize, algorithms: Vec<ResizeAlgorithm>) -> Result<Self, AugmentError> {
        if let TargetSize::Fixed { width, height } = size {
            if width == 0 || height == 0 {
                return Err(AugmentError::DegenerateSize {
                    width: i64::from(width),
                    height: i64::from(height),
                });
            }
        }
        Ok(Self { size, algorithms })
    }

    pub fn size(&self) -> &TargetSize {
        &self.size
    }

    pub fn algorithms(&self) -> &[ResizeAlgorithm] {
        &self.algorithms
    }

    fn choose_algorithm(&self, cfg: &mut Config) -> ResizeAlgorithm {
        match self.algorithms.as_slice() {
            [] => ResizeAlgorithm::default(),
            [only] => *only,
            many => many[cfg.rng().random_range(0..many.len())],
        }
    }

    pub(super) fn apply<C: Canvas>(
        &self,
        cfg: &mut Config,
        image: C,
        labels: Labels,
    ) -> Result<(C, Labels), AugmentError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(AugmentError::DegenerateSize {
                width: i64::from(width),
                height: i64::from(height),
            });
        }

        let (target_w, target_h) = self.size.sample(cfg, width, height);
        let (Ok(new_width), Ok(new_height)) = (u32::try_from(target_w), u32::try_from(target_h))
        else {
            return Err(AugmentError::DegenerateSize {
                width: target_w,
                height: target_h,
            });
        };
        if new_width == 0 || new_height == 0 {
            return Err(AugmentError::DegenerateSize {
                width: target_w,
                height: target_h,
            });
        }

        let algorithm = self.choose_algorithm(cfg);
        log::trace!(
            "resize {}x{} -> {}x{} with {:?}",
            width,
            height,
            new_width,
            new_height,
            algorithm
        );

        let image = image.resize(new_width, new_height, algorithm);
        let (out_w, out_h) = image.dimensions();
        let x_ratio = f64::from(out_w) / f64::from(width);
        let y_ratio = f64::from(out_h) / f64::from(height);
        let labels =
            labels.map(|r| Rect::new(r.min.scale(x_ratio, y_ratio), r.max.scale(x_ratio, y_ratio)));
        Ok((image, labels))
    }
}
