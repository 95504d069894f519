pub mod contours;
pub mod preprocessing;
pub mod steps;

use std::path::PathBuf;
use std::sync::Arc;

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::config::DetectionConfig;
use crate::models::ShipDetection;
use crate::pipeline::{Frame, Pipeline};
use steps::*;

pub const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Bright-object ship detector over optical imagery.
#[derive(Debug, Clone)]
pub struct ShipDetector {
    pub threshold: u8,
    pub min_area: u32,
    pub max_area: u32,
    pub equalize: bool,
    pub debug_dir: Option<PathBuf>,
}

impl ShipDetector {
    pub fn new() -> Self {
        Self::from_config(&DetectionConfig::default())
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self {
            threshold: config.threshold,
            min_area: config.min_area,
            max_area: config.max_area,
            equalize: config.equalize,
            debug_dir: None,
        }
    }

    pub fn with_debug(mut self, dir: PathBuf) -> Self {
        self.debug_dir = Some(dir);
        self
    }

    pub fn pipeline(&self) -> anyhow::Result<Pipeline> {
        let mut pipeline = Pipeline::new().add_step(Arc::new(GrayscaleStep));
        if self.equalize {
            pipeline = pipeline.add_step(Arc::new(EqualizeStep));
        }
        pipeline = pipeline
            .add_step(Arc::new(ThresholdStep {
                level: self.threshold,
            }))
            .add_step(Arc::new(ContourDetectionStep {
                min_pixels: 1,
                padding: 5,
            }))
            .add_step(Arc::new(AreaFilterStep {
                min_area: self.min_area,
                max_area: self.max_area,
            }));

        match &self.debug_dir {
            Some(dir) => pipeline.with_debug(dir.clone()),
            None => Ok(pipeline),
        }
    }

    /// Detections sorted top-to-bottom, then left-to-right, numbered from 1.
    pub fn detect(&self, img: &DynamicImage) -> anyhow::Result<Vec<ShipDetection>> {
        let frames = self.pipeline()?.run_with_executor(img.clone())?;

        let mut detections = frames
            .iter()
            .map(frame_to_detection)
            .collect::<anyhow::Result<Vec<_>>>()?;
        detections.sort_by_key(|d| (d.y, d.x));
        for (i, d) in detections.iter_mut().enumerate() {
            d.index = i + 1;
        }

        tracing::info!(count = detections.len(), "Ship detection finished");
        Ok(detections)
    }
}

impl Default for ShipDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn frame_to_detection(frame: &Frame) -> anyhow::Result<ShipDetection> {
    let int = |key: &str| {
        frame
            .get_int(key)
            .ok_or_else(|| anyhow::anyhow!("Missing {} on detected frame", key))
    };
    let (min_x, min_y) = (int(ATTR_MIN_X)?, int(ATTR_MIN_Y)?);
    let (max_x, max_y) = (int(ATTR_MAX_X)?, int(ATTR_MAX_Y)?);

    Ok(ShipDetection {
        index: 0,
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
        area: int(ATTR_AREA)?,
        elongation: frame
            .get_float(ATTR_ELONGATION)
            .ok_or_else(|| anyhow::anyhow!("Missing {} on detected frame", ATTR_ELONGATION))?,
    })
}

/// RGB copy of `img` with a 2px red box around each detection.
pub fn annotate(img: &DynamicImage, detections: &[ShipDetection]) -> RgbImage {
    let mut out = img.to_rgb8();
    for d in detections {
        draw_hollow_rect_mut(
            &mut out,
            Rect::at(d.x as i32, d.y as i32).of_size(d.width, d.height),
            BOX_COLOR,
        );
        // second ring just outside the first
        draw_hollow_rect_mut(
            &mut out,
            Rect::at(d.x as i32 - 1, d.y as i32 - 1).of_size(d.width + 2, d.height + 2),
            BOX_COLOR,
        );
    }
    out
}
