//! The bounding-box label set that travels alongside an image.

pub mod io_json;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect};

/// Bounding boxes for one image, in the image's current pixel space.
///
/// Order is significant: transforms keep labels in insertion order, and
/// only cropping may drop entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default)]
    pub bboxes: Vec<Rect>,
}

impl Labels {
    pub fn new(bboxes: Vec<Rect>) -> Self {
        Self { bboxes }
    }

    pub fn len(&self) -> usize {
        self.bboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bboxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rect> {
        self.bboxes.iter()
    }

    /// Returns a new label set with every box mapped through `f`.
    pub fn map(&self, f: impl FnMut(&Rect) -> Rect) -> Labels {
        Labels::new(self.bboxes.iter().map(f).collect())
    }

    /// Returns a new label set with every box moved by `delta`.
    pub fn translate(&self, delta: Point) -> Labels {
        self.map(|r| r.translate(delta))
    }
}

impl From<Vec<Rect>> for Labels {
    fn from(bboxes: Vec<Rect>) -> Self {
        Self::new(bboxes)
    }
}

impl FromIterator<Rect> for Labels {
    fn from_iter<T: IntoIterator<Item = Rect>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Labels {
    type Item = &'a Rect;
    type IntoIter = std::slice::Iter<'a, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.bboxes.iter()
    }
}
