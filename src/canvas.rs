//! The image backend transforms operate on.
//!
//! Pixel work (resampling, cropping, flipping, drawing) is delegated to a
//! [`Canvas`]; transforms only do the coordinate math. The crate ships an
//! implementation for [`image::DynamicImage`].

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImage, GenericImageView, Rgba};
use serde::{Deserialize, Serialize};

use crate::geom::{to_coord, Point, Rect};
use crate::labels::Labels;

/// Resampling filter used by [`Canvas::resize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeAlgorithm {
    /// Nearest neighbour, fastest
    #[default]
    Nearest,
    /// Bilinear
    Triangle,
    /// Bicubic
    CatmullRom,
    Gaussian,
    /// Lanczos with window 3, slowest
    Lanczos3,
}

impl ResizeAlgorithm {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Triangle => FilterType::Triangle,
            ResizeAlgorithm::CatmullRom => FilterType::CatmullRom,
            ResizeAlgorithm::Gaussian => FilterType::Gaussian,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Pixel operations a transform needs from an image type.
///
/// Implementations must never modify `self` except in [`Canvas::draw_over`];
/// every other operation returns a new image.
pub trait Canvas: Sized {
    /// Returns `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Resamples to exactly `width` x `height`.
    fn resize(&self, width: u32, height: u32, algorithm: ResizeAlgorithm) -> Self;

    /// Cuts out `rect`, which callers clamp to [`Canvas::bounds`] first.
    fn crop(&self, rect: Rect) -> Self;

    fn flip_horizontal(&self) -> Self;

    fn flip_vertical(&self) -> Self;

    /// A fully transparent image of the given size.
    fn blank(width: u32, height: u32) -> Self;

    /// Copies `src` into `self` with its top-left corner at `origin`,
    /// overwriting the destination pixels it covers.
    fn draw_over(&mut self, src: &Self, origin: Point);

    /// The rectangle `[0, width) x [0, height)`.
    fn bounds(&self) -> Rect {
        let (w, h) = self.dimensions();
        Rect::from_size(w, h)
    }
}

impl Canvas for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn resize(&self, width: u32, height: u32, algorithm: ResizeAlgorithm) -> Self {
        self.resize_exact(width, height, algorithm.filter_type())
    }

    fn crop(&self, rect: Rect) -> Self {
        let rect = rect.intersect(&Canvas::bounds(self));
        self.crop_imm(
            rect.min.x as u32,
            rect.min.y as u32,
            rect.width() as u32,
            rect.height() as u32,
        )
    }

    fn flip_horizontal(&self) -> Self {
        self.fliph()
    }

    fn flip_vertical(&self) -> Self {
        self.flipv()
    }

    fn blank(width: u32, height: u32) -> Self {
        DynamicImage::new_rgba8(width, height)
    }

    fn draw_over(&mut self, src: &Self, origin: Point) {
        imageops::replace(self, src, i64::from(origin.x), i64::from(origin.y));
    }
}

/// Renders label outlines onto a copy of `image`.
pub fn draw_labels(image: &DynamicImage, labels: &Labels, color: Rgba<u8>) -> DynamicImage {
    const THICKNESS: i32 = 2;

    let mut out = DynamicImage::ImageRgba8(image.to_rgba8());
    let (w, h) = GenericImageView::dimensions(&out);
    let (w, h) = (to_coord(w), to_coord(h));

    for rect in labels {
        // Only the visible span of each edge is walked.
        let xs = rect.min.x.max(0)..rect.max.x.min(w);
        let ys = rect.min.y.max(0)..rect.max.y.min(h);
        for t in 0..THICKNESS {
            let top = rect.min.y.saturating_add(t);
            let bottom = rect.max.y.saturating_sub(1 + t);
            let left = rect.min.x.saturating_add(t);
            let right = rect.max.x.saturating_sub(1 + t);
            for x in xs.clone() {
                put_clipped(&mut out, x, top, w, h, color);
                put_clipped(&mut out, x, bottom, w, h, color);
            }
            for y in ys.clone() {
                put_clipped(&mut out, left, y, w, h, color);
                put_clipped(&mut out, right, y, w, h, color);
            }
        }
    }
    out
}

fn put_clipped(img: &mut DynamicImage, x: i32, y: i32, w: i32, h: i32, color: Rgba<u8>) {
    if (0..w).contains(&x) && (0..h).contains(&y) {
        img.put_pixel(x as u32, y as u32, color);
    }
}
