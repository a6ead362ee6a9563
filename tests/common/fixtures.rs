use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const SILVER: Rgb<u8> = Rgb([140, 140, 140]);
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);

/// A featureless white photo
pub fn blank_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, WHITE))
}

/// A filled disk of `radius` pixels centered on a white background
pub fn coin_image(size: u32, radius: i32, fill: Rgb<u8>) -> DynamicImage {
    let mut img = RgbImage::from_pixel(size, size, WHITE);
    let center = (size as i32 / 2, size as i32 / 2);
    draw_filled_circle_mut(&mut img, center, radius, fill);
    DynamicImage::ImageRgb8(img)
}

/// A filled `rect_w` x `rect_h` rectangle centered on a white background
pub fn banknote_image(width: u32, height: u32, rect_w: u32, rect_h: u32, fill: Rgb<u8>) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, WHITE);
    let x = ((width - rect_w) / 2) as i32;
    let y = ((height - rect_h) / 2) as i32;
    draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(rect_w, rect_h), fill);
    DynamicImage::ImageRgb8(img)
}

/// A photo completely filled by one color
pub fn uniform_image(width: u32, height: u32, fill: Rgb<u8>) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, fill))
}

/// A disk drawn on top of a large filled rectangle, both on white
pub fn coin_on_banknote_image(radius: i32, coin: Rgb<u8>, note: Rgb<u8>) -> DynamicImage {
    let mut img = RgbImage::from_pixel(400, 300, WHITE);
    draw_filled_rect_mut(&mut img, Rect::at(30, 30).of_size(340, 240), note);
    draw_filled_circle_mut(&mut img, (200, 150), radius, coin);
    DynamicImage::ImageRgb8(img)
}
