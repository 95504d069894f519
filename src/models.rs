use serde::Serialize;

/// A connected bright region in a thresholded image.
#[derive(Debug, Clone)]
pub struct Contour {
    pub label: u32,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub pixel_count: u32,
}

impl Contour {
    /// Region holding the single pixel `(x, y)`.
    pub fn seed(label: u32, x: u32, y: u32) -> Self {
        Self {
            label,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            pixel_count: 1,
        }
    }

    /// Grow the region by one pixel.
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.pixel_count += 1;
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Filled area in pixels.
    pub fn area(&self) -> u32 {
        self.pixel_count
    }

    /// Long side over short side; hulls seen from above are elongated.
    pub fn elongation(&self) -> f32 {
        let w = self.width() as f32;
        let h = self.height() as f32;
        w.max(h) / w.min(h)
    }
}

/// A candidate vessel found in an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipDetection {
    /// 1-based, in reading order.
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub area: u32,
    pub elongation: f32,
}

impl ShipDetection {
    pub fn label(&self) -> String {
        format!("Ship {}", self.index)
    }
}
