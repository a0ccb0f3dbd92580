//! Transforms built out of other transforms.
//!
//! Every random draw comes from [`Config::rng`] in a fixed order:
//! - `sometimes`: one `f64` in `[0, 1)`, then whatever the child draws.
//! - `some_of`: the shuffle of the child indices, then the count, then the
//!   draws of each applied child in shuffled order.

use rand::seq::SliceRandom;
use rand::RngExt;

use super::Transform;
use crate::canvas::Canvas;
use crate::config::Config;
use crate::error::AugmentError;
use crate::geom::IntRange;
use crate::labels::Labels;

/// Threads the image and labels through `steps` in order.
pub(super) fn sequential<C: Canvas>(
    steps: &[Transform],
    cfg: &mut Config,
    image: C,
    labels: Labels,
) -> Result<(C, Labels), AugmentError> {
    steps
        .iter()
        .try_fold((image, labels), |(image, labels), step| {
            step.apply(cfg, image, labels)
        })
}

/// Applies `then` iff a uniform draw falls below `p`.
///
/// `p <= 0` never applies and `p >= 1` always does; the draw is consumed
/// either way.
pub(super) fn sometimes<C: Canvas>(
    p: f64,
    then: &Transform,
    cfg: &mut Config,
    image: C,
    labels: Labels,
) -> Result<(C, Labels), AugmentError> {
    let u: f64 = cfg.rng().random();
    if u < p {
        log::trace!("sometimes: {:.3} < {} -> {}", u, p, then.name());
        then.apply(cfg, image, labels)
    } else {
        log::trace!("sometimes: {:.3} >= {} -> skip", u, p);
        Ok((image, labels))
    }
}

/// Applies a random subset of `choices`, sized by `count` and ordered by a
/// shuffle.
pub(super) fn some_of<C: Canvas>(
    count: &IntRange,
    choices: &[Transform],
    cfg: &mut Config,
    image: C,
    labels: Labels,
) -> Result<(C, Labels), AugmentError> {
    let mut order: Vec<usize> = (0..choices.len()).collect();
    order.shuffle(cfg.rng());

    let n = count.sample(cfg.rng());
    let n = usize::try_from(n).unwrap_or(0).min(choices.len());
    log::trace!("some_of: applying {} of {} in order {:?}", n, choices.len(), &order[..n]);

    order[..n]
        .iter()
        .try_fold((image, labels), |(image, labels), &i| {
            choices[i].apply(cfg, image, labels)
        })
}

/// Applies exactly one of `choices`, picked uniformly.
pub(super) fn one_of<C: Canvas>(
    choices: &[Transform],
    cfg: &mut Config,
    image: C,
    labels: Labels,
) -> Result<(C, Labels), AugmentError> {
    some_of(&IntRange::ONE, choices, cfg, image, labels)
}
