/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An owned 24-bit RGB raster
//!
//! Pixels are stored in a single contiguous buffer in row-major order,
//! rows are slices computed on demand, i.e row `y` starts at `y * width`.
//!
//! ```text
//!    width ─────────────────────►
//! │ ┌───────────────────────────┐
//! │ │ row 0                     │  pixels[0 .. width]
//! │ ├───────────────────────────┤
//! │ │ row 1                     │  pixels[width .. 2 * width]
//! │ ├───────────────────────────┤
//! ▼ │ ...                       │
//!   └───────────────────────────┘
//! ```
use core::fmt::{Debug, Display, Formatter};
use core::slice::{ChunksExact, ChunksExactMut};
use std::collections::TryReserveError;

/// Number of bytes a single pixel occupies
pub const PIXEL_SIZE: usize = 3;

/// A single RGB pixel with 8 bits per component
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

impl Pixel {
    /// Create a new pixel from its components
    pub const fn new(r: u8, g: u8, b: u8) -> Pixel {
        Pixel { r, g, b }
    }
    /// Return the components in `[r, g, b]` order
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from(value: [u8; 3]) -> Self {
        Pixel::new(value[0], value[1], value[2])
    }
}

impl From<Pixel> for [u8; 3] {
    fn from(value: Pixel) -> Self {
        value.to_array()
    }
}

/// Errors possible when creating an image
pub enum ImageErrors {
    /// Width or height was zero
    ///
    /// Arguments are the width and height requested
    ZeroDimensions(usize, usize),
    /// `width * height * 3` does not fit in a `usize`
    TooLargeDimensions(usize, usize),
    /// The allocator could not provide the requested number of bytes
    AllocationFailed(usize, TryReserveError),
    /// The pixel buffer supplied doesn't match the dimensions
    ///
    /// Arguments are the expected and found lengths
    DimensionsMisMatch(usize, usize)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ImageErrors::ZeroDimensions(width, height) => {
                writeln!(
                    f,
                    "Cannot create an image with zero dimensions, width {width} and height {height}"
                )
            }
            ImageErrors::TooLargeDimensions(width, height) => {
                writeln!(
                    f,
                    "Image dimensions {width}x{height} overflow the addressable size"
                )
            }
            ImageErrors::AllocationFailed(size, err) => {
                writeln!(f, "Could not allocate {size} bytes for image: {err}")
            }
            ImageErrors::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} elements but found {found}"
                )
            }
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for ImageErrors {}

/// Return the number of pixels an image of `width` by `height` holds,
/// rejecting empty and overflowing dimensions
fn checked_len(width: usize, height: usize) -> Result<usize, ImageErrors> {
    if width == 0 || height == 0 {
        return Err(ImageErrors::ZeroDimensions(width, height));
    }
    width
        .checked_mul(height)
        .filter(|len| len.checked_mul(PIXEL_SIZE).is_some())
        .ok_or(ImageErrors::TooLargeDimensions(width, height))
}

/// Reserve room for exactly `len` pixels
fn reserve_pixels(len: usize) -> Result<Vec<Pixel>, ImageErrors> {
    let mut pixels = Vec::new();

    pixels
        .try_reserve_exact(len)
        .map_err(|err| ImageErrors::AllocationFailed(len * PIXEL_SIZE, err))?;

    Ok(pixels)
}

/// An in memory RGB image
///
/// The image exclusively owns its pixels, dropping it (or calling
/// [`release`](Image::release)) frees all of them at once.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width:  usize,
    height: usize,
    pixels: Vec<Pixel>
}

impl Image {
    /// Allocate a new zero initialized (black) image
    ///
    /// # Errors
    /// - [`ZeroDimensions`](ImageErrors::ZeroDimensions) if either dimension is zero
    /// - [`TooLargeDimensions`](ImageErrors::TooLargeDimensions) if the size overflows
    /// - [`AllocationFailed`](ImageErrors::AllocationFailed) if memory couldn't be reserved
    ///
    /// # Example
    /// ```
    /// use pixmap_core::image::Image;
    ///
    /// let image = Image::new(10, 5).unwrap();
    /// assert_eq!(image.dimensions(), (10, 5));
    /// assert!(Image::new(0, 0).is_err());
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Image, ImageErrors> {
        Image::fill(Pixel::default(), width, height)
    }

    /// Allocate an image with every pixel set to `pixel`
    pub fn fill(pixel: Pixel, width: usize, height: usize) -> Result<Image, ImageErrors> {
        let len = checked_len(width, height)?;
        let mut pixels = reserve_pixels(len)?;

        pixels.resize(len, pixel);

        Ok(Image {
            width,
            height,
            pixels
        })
    }

    /// Create an image from already decoded pixels in row-major order
    pub fn from_pixels(
        width: usize, height: usize, pixels: Vec<Pixel>
    ) -> Result<Image, ImageErrors> {
        let len = checked_len(width, height)?;

        if pixels.len() != len {
            return Err(ImageErrors::DimensionsMisMatch(len, pixels.len()));
        }
        Ok(Image {
            width,
            height,
            pixels
        })
    }

    /// Create an image from interleaved `r,g,b` bytes in row-major order
    pub fn from_rgb_bytes(width: usize, height: usize, data: &[u8]) -> Result<Image, ImageErrors> {
        let len = checked_len(width, height)?;

        if data.len() != len * PIXEL_SIZE {
            return Err(ImageErrors::DimensionsMisMatch(
                len * PIXEL_SIZE,
                data.len()
            ));
        }
        let mut pixels = reserve_pixels(len)?;

        pixels.extend(
            data.chunks_exact(PIXEL_SIZE)
                .map(|rgb| Pixel::new(rgb[0], rgb[1], rgb[2]))
        );

        Ok(Image {
            width,
            height,
            pixels
        })
    }

    /// Free the image and all its pixels
    pub fn release(self) {
        drop(self);
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Return row `y`
    ///
    /// # Panics
    /// If `y >= height`
    pub fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    /// Return a mutable view into row `y`
    ///
    /// # Panics
    /// If `y >= height`
    pub fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Return the pixel at column `x` and row `y`
    ///
    /// # Panics
    /// If the coordinates are outside the image
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.row(y)[x]
    }

    /// Return a mutable reference to the pixel at column `x` and row `y`
    ///
    /// # Panics
    /// If the coordinates are outside the image
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut Pixel {
        &mut self.row_mut(y)[x]
    }

    /// All pixels in row-major order
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Iterate over rows from top to bottom
    pub fn rows(&self) -> ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width)
    }

    pub fn rows_mut(&mut self) -> ChunksExactMut<'_, Pixel> {
        self.pixels.chunks_exact_mut(self.width)
    }

    /// Return the pixels as interleaved `r,g,b` bytes
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|pix| pix.to_array()).collect()
    }
}

impl Debug for Image {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
