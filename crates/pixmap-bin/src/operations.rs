/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reduce the brightness of the top left quadrant of an image
//!
//! ```text
//!    width ──────────────────────►
//! │ ┌─────────────┬─────────────┐
//! │ │  DARKENED   │             │
//! │ │  width / 2  │             │
//! │ │  height / 2 │             │
//! │ ├─────────────┘             │
//! ▼ │                           │
//!   └───────────────────────────┘
//! ```
use log::debug;
use pixmap_core::image::Image;

/// Divide every component of the top left quadrant by a divisor
pub struct Darken {
    divisor: u8
}

impl Darken {
    /// Halve brightness
    #[must_use]
    pub fn new() -> Darken {
        Darken { divisor: 2 }
    }

    pub const fn name(&self) -> &'static str {
        "Darken"
    }

    /// Divide every component of the top left `width / 2` by `height / 2` pixels
    pub fn execute(&self, image: &mut Image) {
        let (width, height) = image.dimensions();
        let (out_width, out_height) = (width / 2, height / 2);

        debug!(
            "{}: dividing {out_width}x{out_height} pixels by {}",
            self.name(),
            self.divisor
        );

        for row in image.rows_mut().take(out_height) {
            for pixel in &mut row[..out_width] {
                pixel.r /= self.divisor;
                pixel.g /= self.divisor;
                pixel.b /= self.divisor;
            }
        }
    }
}

impl Default for Darken {
    fn default() -> Self {
        Darken::new()
    }
}

#[cfg(test)]
mod tests {
    use pixmap_core::image::{Image, Pixel};

    use crate::operations::Darken;

    #[test]
    fn only_top_left_quadrant_changes() {
        let mut image = Image::fill(Pixel::new(200, 101, 7), 5, 3).unwrap();

        Darken::new().execute(&mut image);

        for y in 0..3 {
            for x in 0..5 {
                let expected = if x < 2 && y < 1 {
                    Pixel::new(100, 50, 3)
                } else {
                    Pixel::new(200, 101, 7)
                };
                assert_eq!(image.pixel(x, y), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn single_pixel_is_untouched() {
        let mut image = Image::fill(Pixel::new(9, 9, 9), 1, 1).unwrap();

        Darken::new().execute(&mut image);
        assert_eq!(image.pixel(0, 0), Pixel::new(9, 9, 9));
    }
}
