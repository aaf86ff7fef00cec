use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};

use crate::consts::{CENTER_MARKER_COLOR, CENTER_MARKER_RADIUS, OUTLINE_COLOR, OUTLINE_THICKNESS};
use crate::detection::CircleDetection;

/// Copy of `image` with every detection drawn as a thick outline plus a
/// filled centre marker.
pub fn annotate(image: &RgbImage, detections: &[CircleDetection]) -> RgbImage {
    let mut out = image.clone();
    let outline = Rgb(OUTLINE_COLOR);
    let marker = Rgb(CENTER_MARKER_COLOR);
    let half = OUTLINE_THICKNESS / 2;

    for det in detections {
        let center = (det.x as i32, det.y as i32);
        let radius = det.radius as i32;
        for dr in -half..=half {
            if radius + dr > 0 {
                draw_hollow_circle_mut(&mut out, center, radius + dr, outline);
            }
        }
        draw_filled_circle_mut(&mut out, center, CENTER_MARKER_RADIUS, marker);
    }

    out
}
