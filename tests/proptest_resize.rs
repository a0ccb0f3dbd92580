mod proptest_helpers;

use imgaug::canvas::ResizeAlgorithm;
use imgaug::transform::TargetSize;
use imgaug::{Canvas, Transform};
use proptest::prelude::*;
use proptest_helpers::{arb_scene, permissive_config, proptest_config, Scene};

fn fixed(width: u32, height: u32) -> Transform {
    Transform::resize(TargetSize::Fixed { width, height }, vec![ResizeAlgorithm::Nearest])
        .expect("valid resize")
}

/// A scene plus an upscaled target at least as large on each axis.
fn arb_scene_and_upscale() -> impl Strategy<Value = (Scene, u32, u32)> {
    arb_scene().prop_flat_map(|scene| {
        let (w, h) = (scene.width, scene.height);
        (Just(scene), w..=w * 3, h..=h * 3)
    })
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn upscale_then_back_is_within_one_pixel((scene, tw, th) in arb_scene_and_upscale()) {
        let there_and_back = Transform::sequential([fixed(tw, th), fixed(scene.width, scene.height)]);
        let (img, labels) = there_and_back
            .apply(&mut permissive_config(0), scene.image(), scene.labels.clone())
            .expect("resize");

        prop_assert_eq!(Canvas::dimensions(&img), (scene.width, scene.height));
        prop_assert_eq!(labels.len(), scene.labels.len());
        for (before, after) in scene.labels.iter().zip(&labels) {
            prop_assert!((before.min.x - after.min.x).abs() <= 1, "{:?} vs {:?}", before, after);
            prop_assert!((before.min.y - after.min.y).abs() <= 1, "{:?} vs {:?}", before, after);
            prop_assert!((before.max.x - after.max.x).abs() <= 1, "{:?} vs {:?}", before, after);
            prop_assert!((before.max.y - after.max.y).abs() <= 1, "{:?} vs {:?}", before, after);
        }
    }

    #[test]
    fn integer_upscale_roundtrips_exactly(scene in arb_scene(), k in 1u32..=3) {
        let there_and_back = Transform::sequential([
            fixed(scene.width * k, scene.height * k),
            fixed(scene.width, scene.height),
        ]);
        let (_, labels) = there_and_back
            .apply(&mut permissive_config(0), scene.image(), scene.labels.clone())
            .expect("resize");
        prop_assert_eq!(labels, scene.labels);
    }
}
