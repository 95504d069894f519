//! Synthetic harbour imagery for exercising the ship detector offline.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

pub const OCEAN_BLUE: Rgb<u8> = Rgb([30, 144, 255]);
pub const STEEL_BLUE: Rgb<u8> = Rgb([70, 130, 180]);
pub const FOREST_GREEN: Rgb<u8> = Rgb([34, 139, 34]);
pub const SEA_GREEN: Rgb<u8> = Rgb([46, 139, 87]);
pub const PORT_GREY: Rgb<u8> = Rgb([169, 169, 169]);
const HULL_WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const DECK_GREY: Rgb<u8> = Rgb([200, 200, 200]);
const STRUCTURE_GREY: Rgb<u8> = Rgb([100, 100, 100]);

/// A ship painted into [`port_scene`], in image pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedShip {
    pub ship_type: &'static str,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

fn fill(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    draw_filled_rect_mut(img, Rect::at(x as i32, y as i32).of_size(width, height), color);
}

/// 1000x800 harbour: open water, a green shore in the lower left and three
/// white hulls of decreasing size, two of them with a grey superstructure.
pub fn harbor_scene() -> RgbImage {
    let mut img = RgbImage::from_pixel(1000, 800, OCEAN_BLUE);

    fill(&mut img, 0, 600, 400, 200, FOREST_GREEN);

    // large
    fill(&mut img, 100, 200, 80, 20, HULL_WHITE);
    fill(&mut img, 175, 195, 10, 30, DECK_GREY);
    // medium
    fill(&mut img, 400, 300, 50, 15, HULL_WHITE);
    fill(&mut img, 445, 295, 10, 25, DECK_GREY);
    // small
    fill(&mut img, 700, 500, 30, 10, HULL_WHITE);

    img
}

/// 800x600 port with quayside structures and five typed ships. Returns the
/// ground truth alongside the image.
pub fn port_scene() -> (RgbImage, Vec<PlacedShip>) {
    let mut img = RgbImage::from_pixel(800, 600, STEEL_BLUE);

    fill(&mut img, 0, 400, 300, 200, SEA_GREEN);
    fill(&mut img, 250, 450, 50, 150, PORT_GREY);

    let ships = [
        ("Container", 100, 150, 120, 25, Rgb([255, 255, 255])),
        ("Container", 400, 200, 100, 20, Rgb([200, 200, 255])),
        ("Tanker", 250, 300, 80, 18, Rgb([255, 200, 200])),
        ("Cargo", 500, 100, 70, 15, Rgb([200, 255, 200])),
        ("Cargo", 600, 350, 65, 14, Rgb([255, 255, 200])),
    ];

    let mut placed = Vec::with_capacity(ships.len());
    for (ship_type, x, y, width, height, color) in ships {
        fill(&mut img, x, y, width, height, color);
        // bridge block at the stern, taller than the hull
        fill(&mut img, x + width - 5, y - 3, 5, height + 6, STRUCTURE_GREY);
        placed.push(PlacedShip {
            ship_type,
            x,
            y,
            width,
            height,
        });
    }

    (img, placed)
}

/// Square scene with a circular island centred on open water.
pub fn landmass_scene(size: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(size, size, OCEAN_BLUE);
    let center = (size / 2) as i32;
    // same proportion as a 447px radius on a 1000px canvas
    let radius = (size as f32 * 0.447) as i32;
    draw_filled_circle_mut(&mut img, (center, center), radius, FOREST_GREEN);
    img
}
