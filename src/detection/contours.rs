use crate::config::ShapeConfig;
use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::geometry::{approximate_polygon_dp, arc_length, contour_area};
use imageproc::point::Point;
use log::debug;

/// Quadrilateral outline found in a binary image
#[derive(Debug, Clone, PartialEq)]
pub struct Quadrilateral {
    pub corners: Vec<Point<i32>>,
    /// Area enclosed by the traced contour, in pixels²
    pub area: f64,
}

/// Outer borders of top-level foreground regions, in the raster order of
/// their first pixel.
pub fn find_external_contours(binary: &GrayImage) -> Vec<Contour<i32>> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .collect()
}

/// First external contour that simplifies to four vertices and encloses more
/// than `min_banknote_area`.
pub fn find_quadrilateral(binary: &GrayImage, config: &ShapeConfig) -> Option<Quadrilateral> {
    let contours = find_external_contours(binary);
    debug!("Found {} external contours", contours.len());

    for contour in &contours {
        if contour.points.len() < 4 {
            continue;
        }
        let perimeter = arc_length(&contour.points, true);
        let polygon = approximate_polygon_dp(&contour.points, config.polygon_epsilon_ratio * perimeter, true);
        if polygon.len() != 4 {
            continue;
        }

        let area = contour_area(&contour.points).abs();
        debug!("Quadrilateral candidate: area={:.0}, perimeter={:.0}", area, perimeter);
        if area > config.min_banknote_area {
            return Some(Quadrilateral { corners: polygon, area });
        }
    }

    None
}
