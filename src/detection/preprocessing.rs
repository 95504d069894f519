use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, equalize_histogram, threshold};

pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Spread intensities over the full range.
pub fn equalize(img: &GrayImage) -> GrayImage {
    equalize_histogram(img)
}

/// Pixels strictly brighter than `level` become 255, everything else 0.
pub fn binarize(img: &GrayImage, level: u8) -> GrayImage {
    threshold(img, level, ThresholdType::Binary)
}
