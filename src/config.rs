//! Per-run augmentation configuration: the seeded random source and the
//! policy deciding which cropped labels survive.

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;
use crate::geom::Rect;

/// Thresholds a cropped label must meet to be kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BBoxPolicy {
    /// Minimum visible area in pixels.
    pub min_area: i64,
    /// Minimum ratio of visible area to the crop rectangle's area.
    pub min_visibility: f64,
}

impl BBoxPolicy {
    pub fn new(min_area: i64, min_visibility: f64) -> Result<Self, AugmentError> {
        if min_area < 0 {
            return Err(AugmentError::InvalidParameter(format!(
                "min_area must be >= 0 (got {})",
                min_area
            )));
        }
        if !min_visibility.is_finite() {
            return Err(AugmentError::InvalidParameter(format!(
                "min_visibility must be finite (got {})",
                min_visibility
            )));
        }
        Ok(Self {
            min_area,
            min_visibility,
        })
    }

    /// Decides whether a clipped label is kept.
    ///
    /// `reference` is the crop rectangle, `clipped` the label after
    /// intersection. Zero areas on either side always reject.
    pub fn keep_bbox(&self, reference: &Rect, clipped: &Rect) -> bool {
        let reference_area = reference.area();
        let clipped_area = clipped.area();
        if clipped_area == 0 || reference_area == 0 || clipped_area < self.min_area {
            return false;
        }
        let ratio = clipped_area as f64 / reference_area as f64;
        ratio >= self.min_visibility
    }
}

/// The configuration shared by one pipeline invocation.
///
/// Transforms only ever advance the random source; the seed and policy are
/// fixed at construction.
#[derive(Debug)]
pub struct Config {
    seed: u64,
    rng: StdRng,
    policy: BBoxPolicy,
}

impl Config {
    /// Creates a configuration with a random source seeded from `seed`.
    pub fn new(seed: u64, policy: BBoxPolicy) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            policy,
        }
    }

    /// Derives an independent configuration for a parallel worker.
    ///
    /// The result depends only on this configuration's seed and `stream`,
    /// never on how far its random source has advanced. Distinct streams
    /// always get distinct seeds.
    pub fn fork(&self, stream: u64) -> Self {
        Self::new(self.seed ^ stream.rotate_left(32), self.policy)
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn policy(&self) -> &BBoxPolicy {
        &self.policy
    }

    /// The random source every transform draws from.
    #[inline]
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// See [`BBoxPolicy::keep_bbox`].
    #[inline]
    pub fn keep_bbox(&self, reference: &Rect, clipped: &Rect) -> bool {
        self.policy.keep_bbox(reference, clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngExt;

    fn policy() -> BBoxPolicy {
        BBoxPolicy::new(20, 0.1).expect("valid policy")
    }

    #[test]
    fn keeps_mostly_visible_label() {
        let crop = Rect::from_xyxy(25, 25, 100, 100);
        let clipped = Rect::from_xyxy(1, 0, 75, 75);
        assert!(policy().keep_bbox(&crop, &clipped));
    }

    #[test]
    fn rejects_below_min_area() {
        let crop = Rect::from_xyxy(0, 0, 10, 10);
        let clipped = Rect::from_xyxy(0, 0, 4, 4); // 16 < 20
        assert!(!policy().keep_bbox(&crop, &clipped));
    }

    #[test]
    fn rejects_below_min_visibility() {
        let crop = Rect::from_xyxy(0, 0, 100, 100);
        let clipped = Rect::from_xyxy(0, 0, 9, 9); // 81 / 10000 < 0.1
        assert!(!policy().keep_bbox(&crop, &clipped));
    }

    #[test]
    fn zero_areas_always_reject() {
        let lenient = BBoxPolicy::default();
        let crop = Rect::from_xyxy(0, 0, 100, 100);
        assert!(!lenient.keep_bbox(&crop, &Rect::default()));
        assert!(!lenient.keep_bbox(&Rect::default(), &Rect::from_xyxy(0, 0, 5, 5)));
    }

    #[test]
    fn rejects_negative_min_area() {
        assert!(BBoxPolicy::new(-1, 0.0).is_err());
        assert!(BBoxPolicy::new(0, f64::NAN).is_err());
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Config::new(42, BBoxPolicy::default());
        let mut b = Config::new(42, BBoxPolicy::default());
        let xs: Vec<u32> = (0..8).map(|_| a.rng().random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng().random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn fork_ignores_consumed_state() {
        let base = Config::new(42, BBoxPolicy::default());
        let mut advanced = Config::new(42, BBoxPolicy::default());
        let _: u64 = advanced.rng().random();

        let mut a = base.fork(1);
        let mut b = advanced.fork(1);
        let mut c = base.fork(2);
        let xa: u64 = a.rng().random();
        let xb: u64 = b.rng().random();
        let xc: u64 = c.rng().random();
        assert_eq!(xa, xb);
        assert_ne!(xa, xc);
    }

    #[test]
    fn fork_keeps_high_stream_bits() {
        let base = Config::new(42, BBoxPolicy::default());
        let streams = [0, 1, 1 << 32, 1 << 63, u64::MAX];
        let seeds: Vec<u64> = streams.iter().map(|&s| base.fork(s).seed()).collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b, "streams collided: {seeds:?}");
            }
        }
    }

    #[test]
    fn forked_configs_run_on_worker_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<Config>();
        assert_send::<crate::transform::Transform>();

        let base = Config::new(7, BBoxPolicy::default());
        let draw = |stream: u64| -> u64 { base.fork(stream).rng().random() };
        let handles: Vec<_> = (0..4)
            .map(|stream| {
                let mut cfg = base.fork(stream);
                std::thread::spawn(move || -> u64 { cfg.rng().random() })
            })
            .collect();
        let parallel: Vec<u64> = handles
            .into_iter()
            .map(|h| h.join().expect("worker"))
            .collect();
        let serial: Vec<u64> = (0..4).map(draw).collect();
        assert_eq!(parallel, serial);
    }
}
