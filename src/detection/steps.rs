use crate::detection::{contours, preprocessing};
use crate::pipeline::{Attr, BoundingBox, Frame, PipelineContext, PipelineStep};
use anyhow::Result;
use image::{DynamicImage, GenericImageView};

/// Convert the scene to 8-bit luma
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, frames: Vec<Frame>, _context: &PipelineContext) -> Result<Vec<Frame>> {
        Ok(frames
            .iter()
            .map(|f| f.with_image(DynamicImage::ImageLuma8(preprocessing::to_grayscale(&f.image))))
            .collect())
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Histogram equalisation
pub struct EqualizeStep;

impl PipelineStep for EqualizeStep {
    fn process(&self, frames: Vec<Frame>, _context: &PipelineContext) -> Result<Vec<Frame>> {
        Ok(frames
            .iter()
            .map(|f| {
                let gray = f.image.to_luma8();
                f.with_image(DynamicImage::ImageLuma8(preprocessing::equalize(&gray)))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Histogram Equalization"
    }
}

/// Keep only bright pixels; hulls and decks stand out against water
pub struct ThresholdStep {
    pub level: u8,
}

impl PipelineStep for ThresholdStep {
    fn process(&self, frames: Vec<Frame>, _context: &PipelineContext) -> Result<Vec<Frame>> {
        Ok(frames
            .iter()
            .map(|f| {
                let gray = f.image.to_luma8();
                f.with_image(DynamicImage::ImageLuma8(preprocessing::binarize(&gray, self.level)))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Threshold"
    }
}

pub const ATTR_MIN_X: &str = "contour_min_x";
pub const ATTR_MIN_Y: &str = "contour_min_y";
pub const ATTR_MAX_X: &str = "contour_max_x";
pub const ATTR_MAX_Y: &str = "contour_max_y";
pub const ATTR_AREA: &str = "area";
pub const ATTR_ELONGATION: &str = "elongation";
pub const ATTR_IS_SHIP: &str = "is_ship";

/// Split the binary scene into one frame per bright region, cropped from
/// the source with `padding` pixels of context.
pub struct ContourDetectionStep {
    pub min_pixels: u32,
    pub padding: u32,
}

impl PipelineStep for ContourDetectionStep {
    fn process(&self, frames: Vec<Frame>, _context: &PipelineContext) -> Result<Vec<Frame>> {
        let mut result = Vec::new();

        for frame in frames {
            let binary = frame.image.to_luma8();
            let found = contours::find_contours(&binary, self.min_pixels);
            let (img_w, img_h) = frame.source.dimensions();
            tracing::debug!(count = found.len(), "Found bright regions");

            for contour in found {
                let x = contour.min_x.saturating_sub(self.padding);
                let y = contour.min_y.saturating_sub(self.padding);
                let max_x = (contour.max_x + self.padding).min(img_w - 1);
                let max_y = (contour.max_y + self.padding).min(img_h - 1);

                let bbox = BoundingBox {
                    x,
                    y,
                    width: max_x - x + 1,
                    height: max_y - y + 1,
                };
                let crop = frame.source.crop_imm(bbox.x, bbox.y, bbox.width, bbox.height);

                let mut region = Frame::from_region(crop, frame.source.clone(), bbox);
                region.set(ATTR_MIN_X, Attr::Int(contour.min_x));
                region.set(ATTR_MIN_Y, Attr::Int(contour.min_y));
                region.set(ATTR_MAX_X, Attr::Int(contour.max_x));
                region.set(ATTR_MAX_Y, Attr::Int(contour.max_y));
                region.set(ATTR_AREA, Attr::Int(contour.area()));
                region.set(ATTR_ELONGATION, Attr::Float(contour.elongation()));
                result.push(region);
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Contour Detection"
    }
}

/// Drop regions too small to be a hull (noise) or too large (land, glare).
/// Both bounds are exclusive.
pub struct AreaFilterStep {
    pub min_area: u32,
    pub max_area: u32,
}

impl PipelineStep for AreaFilterStep {
    fn process(&self, frames: Vec<Frame>, _context: &PipelineContext) -> Result<Vec<Frame>> {
        let mut result = Vec::new();

        for mut frame in frames {
            let area = frame
                .get_int(ATTR_AREA)
                .ok_or_else(|| anyhow::anyhow!("Missing {} on frame", ATTR_AREA))?;

            if area > self.min_area && area < self.max_area {
                frame.set(ATTR_IS_SHIP, Attr::Bool(true));
                result.push(frame);
            } else {
                tracing::trace!(area, "Rejected region by area");
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Area Filtering"
    }
}
