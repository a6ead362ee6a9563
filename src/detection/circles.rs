//! Circle detection with the Hough gradient method.
//!
//! Each edge pixel votes for possible centers along its gradient direction.
//! Well-supported local maxima become candidate centers and each center's
//! radius is the distance most edge pixels agree on.

use crate::config::ShapeConfig;
use crate::detection::preprocessing;
use image::GrayImage;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Accumulator votes of the center
    pub votes: u32,
}

/// Detect circles in a (blurred) grayscale image.
///
/// Circles come back strongest first: ordered by center votes, ties in
/// raster order of the center.
pub fn detect_circles(img: &GrayImage, config: &ShapeConfig) -> Vec<Circle> {
    let (width, height) = img.dimensions();
    if width < 3 || height < 3 || config.min_radius > config.max_radius {
        return Vec::new();
    }

    let edges = preprocessing::detect_edges(img, config.edge_threshold / 2.0, config.edge_threshold);
    let gx = horizontal_sobel(img);
    let gy = vertical_sobel(img);

    let w = width as usize;
    let mut accumulator = vec![0u32; w * height as usize];
    let mut edge_points = Vec::new();

    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        let dx = gx.get_pixel(x, y)[0] as f32;
        let dy = gy.get_pixel(x, y)[0] as f32;
        let magnitude = (dx * dx + dy * dy).sqrt();
        if magnitude == 0.0 {
            continue;
        }
        edge_points.push((x as f32, y as f32));

        let (ux, uy) = (dx / magnitude, dy / magnitude);
        // The object may be darker or brighter than its surroundings
        for sign in [1.0f32, -1.0] {
            for r in config.min_radius..=config.max_radius {
                let cx = (x as f32 + sign * ux * r as f32).round();
                let cy = (y as f32 + sign * uy * r as f32).round();
                if cx < 0.0 || cy < 0.0 || cx >= width as f32 || cy >= height as f32 {
                    break;
                }
                accumulator[cy as usize * w + cx as usize] += 1;
            }
        }
    }

    debug!("Hough: {} edge pixels voted", edge_points.len());

    let centers = find_centers(&accumulator, width, height, config.accumulator_threshold);
    debug!("Hough: {} candidate centers", centers.len());

    let min_dist_sq = config.min_center_distance * config.min_center_distance;
    let mut circles: Vec<Circle> = Vec::new();

    for (cx, cy, votes) in centers {
        let (cx, cy) = (cx as f32, cy as f32);
        let too_close = circles.iter().any(|c| {
            let (dx, dy) = (c.x - cx, c.y - cy);
            dx * dx + dy * dy < min_dist_sq
        });
        if too_close {
            continue;
        }

        if let Some(radius) = estimate_radius(cx, cy, &edge_points, config) {
            debug!("Hough: circle at ({}, {}) r={:.1} votes={}", cx, cy, radius, votes);
            circles.push(Circle { x: cx, y: cy, radius, votes });
        }
    }

    circles
}

/// Local maxima of the accumulator above `threshold`, strongest first.
fn find_centers(accumulator: &[u32], width: u32, height: u32, threshold: u32) -> Vec<(u32, u32, u32)> {
    let w = width as usize;
    let mut centers = Vec::new();

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let idx = y as usize * w + x as usize;
            let v = accumulator[idx];
            // Strict on one side and not the other so a flat peak yields one center
            if v > threshold
                && v > accumulator[idx - 1]
                && v >= accumulator[idx + 1]
                && v > accumulator[idx - w]
                && v >= accumulator[idx + w]
            {
                centers.push((x, y, v));
            }
        }
    }

    // Stable sort keeps raster order among equal votes
    centers.sort_by(|a, b| b.2.cmp(&a.2));
    centers
}

/// Most supported radius around a center, if enough edge pixels agree on it.
fn estimate_radius(cx: f32, cy: f32, edge_points: &[(f32, f32)], config: &ShapeConfig) -> Option<f32> {
    let min = config.min_radius;
    let bins = (config.max_radius - min + 1) as usize;
    let mut histogram = vec![0u32; bins];

    for &(x, y) in edge_points {
        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt().round();
        if d < min as f32 || d > config.max_radius as f32 {
            continue;
        }
        histogram[d as usize - min as usize] += 1;
    }

    // Score each radius by its bin plus both neighbours to absorb rasterisation
    let window = |i: usize| (i.saturating_sub(1), (i + 1).min(bins - 1));
    let mut best: Option<(usize, u32)> = None;
    for i in 0..bins {
        let (lo, hi) = window(i);
        let support: u32 = histogram[lo..=hi].iter().sum();
        if best.is_none_or(|(_, s)| support > s) {
            best = Some((i, support));
        }
    }

    let (i, support) = best?;
    if support < config.accumulator_threshold || support == 0 {
        return None;
    }

    // Whole pixels, like the center coordinates
    let (lo, hi) = window(i);
    let weighted: f32 = (lo..=hi)
        .map(|j| histogram[j] as f32 * (min as usize + j) as f32)
        .sum();
    Some((weighted / support as f32).round())
}
