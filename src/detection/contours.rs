use std::collections::BTreeMap;

use image::{GrayImage, Luma};
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::models::Contour;

/// Bright regions of a thresholded scene, in reading order (top edge, then
/// left edge).
///
/// Diagonal neighbours join a region, so a hull drawn at an angle stays one
/// contour. `min_pixels` is a floor on the filled pixel count, not on the
/// bounding box; the ship/noise decision belongs to the area filter step and
/// callers normally pass 1 here.
pub fn find_contours(binary: &GrayImage, min_pixels: u32) -> Vec<Contour> {
    let labels = connected_components(binary, Connectivity::Eight, Luma([0]));

    let mut regions: BTreeMap<u32, Contour> = BTreeMap::new();
    for (x, y, px) in labels.enumerate_pixels() {
        let label = px[0];
        if label == 0 {
            continue;
        }
        regions
            .entry(label)
            .and_modify(|c| c.include(x, y))
            .or_insert_with(|| Contour::seed(label, x, y));
    }

    let mut contours: Vec<Contour> = regions
        .into_values()
        .filter(|c| c.pixel_count >= min_pixels)
        .collect();
    contours.sort_by_key(|c| (c.min_y, c.min_x));
    contours
}
