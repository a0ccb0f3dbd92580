#![allow(dead_code)]

use image::DynamicImage;
use imgaug::geom::{Rect, Sides};
use imgaug::labels::Labels;
use imgaug::{BBoxPolicy, Config};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Largest image side generated. Images are real buffers, so keep it small.
pub const MAX_SIDE: u32 = 64;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// An image with the labels placed on it.
#[derive(Clone, Debug)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub labels: Labels,
}

impl Scene {
    pub fn image(&self) -> DynamicImage {
        DynamicImage::new_rgb8(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// A config that keeps every label with a non-empty visible part.
pub fn permissive_config(seed: u64) -> Config {
    Config::new(seed, BBoxPolicy::default())
}

pub fn arb_size() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=MAX_SIDE, 1u32..=MAX_SIDE)
}

/// A non-empty rectangle inside `[0, width) x [0, height)`.
pub fn arb_rect_within(width: u32, height: u32) -> BoxedStrategy<Rect> {
    let (w, h) = (width as i32, height as i32);
    (0..w, 0..h)
        .prop_flat_map(move |(xmin, ymin)| {
            (Just(xmin), Just(ymin), (xmin + 1)..=w, (ymin + 1)..=h)
        })
        .prop_map(|(xmin, ymin, xmax, ymax)| Rect::from_xyxy(xmin, ymin, xmax, ymax))
        .boxed()
}

pub fn arb_labels_within(width: u32, height: u32) -> BoxedStrategy<Labels> {
    prop::collection::vec(arb_rect_within(width, height), 0..6)
        .prop_map(Labels::new)
        .boxed()
}

pub fn arb_scene() -> BoxedStrategy<Scene> {
    arb_size()
        .prop_flat_map(|(width, height)| {
            arb_labels_within(width, height).prop_map(move |labels| Scene {
                width,
                height,
                labels,
            })
        })
        .boxed()
}

pub fn arb_sides(max: i32) -> impl Strategy<Value = Sides> {
    (0..=max, 0..=max, 0..=max, 0..=max)
        .prop_map(|(left, top, right, bottom)| Sides::new(left, top, right, bottom))
}
