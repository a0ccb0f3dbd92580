//! Rectangle edges and per-edge sampling rules.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::point::Point;
use super::range::{FloatRange, IntRange};

/// One of the four edges of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    /// Every edge, in sampling order.
    pub const ALL: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];

    #[inline]
    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Top => 1,
            Side::Right => 2,
            Side::Bottom => 3,
        }
    }

    #[inline]
    fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// A set of edges, used as the key of a per-edge rule.
///
/// The variant order is the expansion order: unions come first so that an
/// atomic edge listed next to a union containing it always wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideMask {
    All,
    LeftRight,
    TopBottom,
    Left,
    Top,
    Right,
    Bottom,
}

impl SideMask {
    pub const LEFT: u8 = 0b0001;
    pub const TOP: u8 = 0b0010;
    pub const RIGHT: u8 = 0b0100;
    pub const BOTTOM: u8 = 0b1000;

    /// The bit-flag form of the mask.
    pub fn bits(self) -> u8 {
        match self {
            SideMask::All => Self::LEFT | Self::TOP | Self::RIGHT | Self::BOTTOM,
            SideMask::LeftRight => Self::LEFT | Self::RIGHT,
            SideMask::TopBottom => Self::TOP | Self::BOTTOM,
            SideMask::Left => Self::LEFT,
            SideMask::Top => Self::TOP,
            SideMask::Right => Self::RIGHT,
            SideMask::Bottom => Self::BOTTOM,
        }
    }

    /// Returns true if the mask covers `side`.
    pub fn contains(self, side: Side) -> bool {
        let bit = match side {
            Side::Left => Self::LEFT,
            Side::Top => Self::TOP,
            Side::Right => Self::RIGHT,
            Side::Bottom => Self::BOTTOM,
        };
        self.bits() & bit != 0
    }
}

impl From<Side> for SideMask {
    fn from(side: Side) -> Self {
        match side {
            Side::Left => SideMask::Left,
            Side::Top => SideMask::Top,
            Side::Right => SideMask::Right,
            Side::Bottom => SideMask::Bottom,
        }
    }
}

/// Concrete per-edge pixel amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Sides {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Sides {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same amount on every edge.
    pub const fn uniform(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    /// The top-left offset these amounts introduce.
    #[inline]
    pub fn offset(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn get(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.left,
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
        }
    }

    fn set(&mut self, side: Side, v: i32) {
        match side {
            Side::Left => self.left = v,
            Side::Top => self.top = v,
            Side::Right => self.right = v,
            Side::Bottom => self.bottom = v,
        }
    }

    /// Returns true if no edge is negative.
    pub fn is_non_negative(&self) -> bool {
        Side::ALL.iter().all(|&s| self.get(s) >= 0)
    }
}

/// A mapping from edge masks to ranges, e.g. "0-30% on `top_bottom`,
/// 0-10% on `left_right`".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SideRanges<R>(BTreeMap<SideMask, R>);

impl<R> Default for SideRanges<R> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<R: Copy> SideRanges<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the rule for `mask`.
    pub fn with(mut self, mask: SideMask, range: R) -> Self {
        self.0.insert(mask, range);
        self
    }

    /// Iterates the configured rules in expansion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SideMask, &R)> {
        self.0.iter()
    }

    /// Resolves union keys into the four atomic edges, indexed in
    /// [`Side::ALL`] order. Later keys overwrite earlier ones.
    pub fn expand(&self) -> [Option<R>; 4] {
        let mut out = [None; 4];
        for (mask, range) in &self.0 {
            for side in Side::ALL {
                if mask.contains(side) {
                    out[side.index()] = Some(*range);
                }
            }
        }
        out
    }
}

impl SideRanges<IntRange> {
    /// Draws a pixel amount for every configured edge.
    ///
    /// Edges without a rule are 0 and consume no randomness.
    pub fn sample_pixels<G: Rng + ?Sized>(&self, rng: &mut G) -> Sides {
        let ranges = self.expand();
        let mut sides = Sides::default();
        for side in Side::ALL {
            if let Some(range) = ranges[side.index()] {
                sides.set(side, range.sample(rng));
            }
        }
        sides
    }

    /// Returns true if every configured range only yields values >= 0.
    pub fn is_non_negative(&self) -> bool {
        self.0.values().all(|r| r.min() >= 0)
    }
}

impl SideRanges<FloatRange> {
    /// Draws a fraction for every configured edge and converts it into
    /// pixels of the matching dimension (width for left/right, height for
    /// top/bottom), rounding half away from zero.
    pub fn sample_fraction<G: Rng + ?Sized>(&self, rng: &mut G, width: i32, height: i32) -> Sides {
        let ranges = self.expand();
        let mut sides = Sides::default();
        for side in Side::ALL {
            if let Some(range) = ranges[side.index()] {
                let dim = if side.is_horizontal() { width } else { height };
                let px = (range.sample(rng) * f64::from(dim)).round() as i32;
                sides.set(side, px);
            }
        }
        sides
    }

    /// Returns true if every configured range only yields values >= 0.
    pub fn is_non_negative(&self) -> bool {
        self.0.values().all(|r| r.min() >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn range(min: i32, max: i32) -> IntRange {
        IntRange::new(min, max).expect("valid range")
    }

    #[test]
    fn mask_bits_cover_unions() {
        assert!(SideMask::All.contains(Side::Bottom));
        assert!(SideMask::LeftRight.contains(Side::Right));
        assert!(!SideMask::LeftRight.contains(Side::Top));
        assert_eq!(SideMask::TopBottom.bits(), SideMask::TOP | SideMask::BOTTOM);
    }

    #[test]
    fn expand_unions_to_atomic_edges() {
        let rules = SideRanges::new()
            .with(SideMask::TopBottom, range(0, 30))
            .with(SideMask::LeftRight, range(0, 10));
        let expanded = rules.expand();
        assert_eq!(expanded[0], Some(range(0, 10)));
        assert_eq!(expanded[1], Some(range(0, 30)));
        assert_eq!(expanded[2], Some(range(0, 10)));
        assert_eq!(expanded[3], Some(range(0, 30)));
    }

    #[test]
    fn atomic_edge_wins_over_union_regardless_of_insertion_order() {
        let a = SideRanges::new()
            .with(SideMask::Left, range(5, 6))
            .with(SideMask::All, range(1, 2));
        let b = SideRanges::new()
            .with(SideMask::All, range(1, 2))
            .with(SideMask::Left, range(5, 6));
        assert_eq!(a.expand(), b.expand());
        assert_eq!(a.expand()[0], Some(range(5, 6)));
        assert_eq!(a.expand()[2], Some(range(1, 2)));
    }

    #[test]
    fn unset_edges_are_zero() {
        let rules = SideRanges::new().with(SideMask::Top, IntRange::exactly(7).expect("range"));
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(rules.sample_pixels(&mut rng), Sides::new(0, 7, 0, 0));
    }

    #[test]
    fn fraction_uses_matching_dimension() {
        let exact = FloatRange::new(0.5, 0.5 + f64::EPSILON).expect("valid range");
        let rules = SideRanges::new()
            .with(SideMask::Left, exact)
            .with(SideMask::Bottom, exact);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            rules.sample_fraction(&mut rng, 200, 100),
            Sides::new(100, 0, 0, 50)
        );
    }

    #[test]
    fn deserializes_from_yaml_map() {
        let rules: SideRanges<IntRange> =
            serde_yaml::from_str("left_right: {min: 0, max: 10}\ntop: {min: 2, max: 4}\n")
                .expect("parse side ranges");
        let expanded = rules.expand();
        assert_eq!(expanded[0], Some(range(0, 10)));
        assert_eq!(expanded[1], Some(range(2, 4)));
        assert_eq!(expanded[3], None);
    }
}
