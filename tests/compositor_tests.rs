// SPDX-License-Identifier: GPL-3.0-only

//! Compositor property tests

use framecam::pipelines::photo::compositor::composite;
use image::{DynamicImage, Rgba, RgbaImage};

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) & 0xff) as u8,
            255,
        ])
    }))
}

#[test]
fn composite_preserves_base_dimensions() {
    let base = gradient(640, 480);
    // Wildly mismatched aspect ratio is not an error, the overlay stretches
    let overlay = solid(100, 900, [1, 2, 3, 255]);

    let result = composite(&base, Some(&overlay));
    assert_eq!((result.width(), result.height()), (640, 480));
}

#[test]
fn composite_without_overlay_is_identity() {
    let base = gradient(320, 240);

    let result = composite(&base, None);
    assert_eq!(result.to_rgba8().as_raw(), base.to_rgba8().as_raw());
}

#[test]
fn composite_is_deterministic() {
    let base = gradient(200, 150);
    let overlay = solid(64, 64, [255, 0, 0, 128]);

    let first = composite(&base, Some(&overlay));
    let second = composite(&base, Some(&overlay));
    assert_eq!(first.to_rgba8().as_raw(), second.to_rgba8().as_raw());
}

#[test]
fn opaque_overlay_fully_covers_the_photo() {
    let base = solid(32, 32, [200, 10, 10, 255]);
    let overlay = solid(8, 8, [10, 200, 10, 255]);

    let result = composite(&base, Some(&overlay)).to_rgba8();
    for pixel in result.pixels() {
        assert_eq!(pixel.0, [10, 200, 10, 255]);
    }
}

#[test]
fn fully_transparent_overlay_leaves_the_photo_visible() {
    let base = gradient(48, 48);
    let overlay = solid(48, 48, [0, 0, 0, 0]);

    let result = composite(&base, Some(&overlay));
    assert_eq!(result.to_rgba8().as_raw(), base.to_rgba8().as_raw());
}
