/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, IntoInnerError, Write};
use std::path::Path;

use pixmap_core::image::{Image, PIXEL_SIZE};
use pixmap_core::log::{debug, info};

use crate::errors::PpmEncodeErrors;

/// Number of pixels written per line for plain pixmaps,
/// keeps lines under 70 characters
pub const ASCII_PIXELS_PER_LINE: usize = 5;

/// The maxval written in every header
const MAX_VALUE: usize = 255;

/// Pixel data encoding of a pixmap
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PpmEncoding {
    /// `P6`, one byte per component
    Raw,
    /// `P3`, components as decimal text
    Ascii
}

impl PpmEncoding {
    /// The magic token opening the header
    pub const fn magic(self) -> &'static str {
        match self {
            Self::Raw => "P6",
            Self::Ascii => "P3"
        }
    }

    /// Match a magic token to an encoding
    pub fn from_magic(magic: &[u8]) -> Option<PpmEncoding> {
        match magic {
            b"P6" => Some(Self::Raw),
            b"P3" => Some(Self::Ascii),
            _ => None
        }
    }
}

impl Display for PpmEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.magic())
    }
}

/// A PPM encoder
///
/// # Example
/// ```
/// use pixmap_core::image::{Image, Pixel};
/// use pixmap_ppm::{PpmEncoder, PpmEncoding};
///
/// let image = Image::fill(Pixel::new(1, 2, 3), 2, 1).unwrap();
/// let mut sink = vec![];
///
/// PpmEncoder::new(&mut sink).encode(&image, PpmEncoding::Ascii).unwrap();
/// assert_eq!(sink, b"P3\n2 1\n255\n1 2 3 1 2 3 ");
/// ```
pub struct PpmEncoder<'a, W: Write> {
    writer: &'a mut W
}

impl<'a, W: Write> PpmEncoder<'a, W> {
    /// Create a new PPM encoder that writes to `writer`
    pub fn new(writer: &'a mut W) -> PpmEncoder<'a, W> {
        Self { writer }
    }

    fn write_headers(
        &mut self, encoding: PpmEncoding, width: usize, height: usize
    ) -> Result<(), PpmEncodeErrors> {
        let header = format!("{encoding}\n{width} {height}\n{MAX_VALUE}\n");

        self.writer.write_all(header.as_bytes())?;

        Ok(())
    }

    /// Encode `image` with the given encoding
    ///
    /// The writer isn't flushed.
    pub fn encode(&mut self, image: &Image, encoding: PpmEncoding) -> Result<(), PpmEncodeErrors> {
        let (width, height) = image.dimensions();

        self.write_headers(encoding, width, height)?;

        match encoding {
            PpmEncoding::Raw => {
                let mut scanline = Vec::with_capacity(width * PIXEL_SIZE);

                for row in image.rows() {
                    scanline.clear();
                    scanline.extend(row.iter().flat_map(|pix| pix.to_array()));
                    self.writer.write_all(&scanline)?;
                }
            }
            PpmEncoding::Ascii => {
                self.write_ascii_pixels(image.pixels().iter().map(|pix| pix.to_array()))?;
            }
        }
        Ok(())
    }

    /// Encode interleaved `r,g,b` bytes as a pixmap
    ///
    /// # Errors
    /// If `data.len()` isn't `width * height * 3`
    pub fn encode_rgb_bytes(
        &mut self, width: usize, height: usize, data: &[u8], encoding: PpmEncoding
    ) -> Result<(), PpmEncodeErrors> {
        if width == 0 || height == 0 {
            return Err(PpmEncodeErrors::Static(
                "Cannot encode an image with zero dimensions"
            ));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(PIXEL_SIZE))
            .ok_or(PpmEncodeErrors::Static("Image dimensions overflow"))?;

        if expected != data.len() {
            return Err(PpmEncodeErrors::DimensionsMisMatch(expected, data.len()));
        }
        self.write_headers(encoding, width, height)?;

        match encoding {
            PpmEncoding::Raw => self.writer.write_all(data)?,
            PpmEncoding::Ascii => {
                self.write_ascii_pixels(
                    data.chunks_exact(PIXEL_SIZE)
                        .map(|rgb| [rgb[0], rgb[1], rgb[2]])
                )?;
            }
        }
        Ok(())
    }

    /// Write `r g b ` per pixel, breaking the line after every
    /// [`ASCII_PIXELS_PER_LINE`] pixels
    fn write_ascii_pixels<I>(&mut self, pixels: I) -> Result<(), PpmEncodeErrors>
    where
        I: Iterator<Item = [u8; 3]>
    {
        for (count, [r, g, b]) in pixels.enumerate() {
            write!(self.writer, "{r} {g} {b} ")?;

            if (count + 1) % ASCII_PIXELS_PER_LINE == 0 {
                self.writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

/// Write `image` to `path` in the given encoding
///
/// The file is created or truncated. Success is only reported once the
/// header and all pixels were flushed and synced to disk, on failure
/// the file is left as is.
pub fn write<P: AsRef<Path>>(
    path: P, image: &Image, encoding: PpmEncoding
) -> Result<(), PpmEncodeErrors> {
    let path = path.as_ref();

    info!(
        "Writing {}x{} {encoding} image to {path:?}",
        image.width(),
        image.height()
    );

    let mut writer = BufWriter::new(File::create(path)?);

    PpmEncoder::new(&mut writer).encode(image, encoding)?;

    let file = writer.into_inner().map_err(IntoInnerError::into_error)?;
    file.sync_all()?;

    debug!("Finished writing {path:?}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use pixmap_core::image::{Image, Pixel};

    use crate::{PpmEncodeErrors, PpmEncoder, PpmEncoding};

    #[test]
    fn raw_header_and_pixels() {
        let image = Image::from_rgb_bytes(2, 1, &[10, 20, 30, 40, 50, 60]).unwrap();
        let mut sink = vec![];

        PpmEncoder::new(&mut sink)
            .encode(&image, PpmEncoding::Raw)
            .unwrap();

        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[10, 20, 30, 40, 50, 60]);

        assert_eq!(sink, expected);
    }

    #[test]
    fn ascii_wraps_after_five_pixels() {
        let pixels = (0..7).map(|i| Pixel::new(i, i, i)).collect();
        let image = Image::from_pixels(7, 1, pixels).unwrap();
        let mut sink = vec![];

        PpmEncoder::new(&mut sink)
            .encode(&image, PpmEncoding::Ascii)
            .unwrap();

        let text = String::from_utf8(sink).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            [
                "P3",
                "7 1",
                "255",
                "0 0 0 1 1 1 2 2 2 3 3 3 4 4 4 ",
                "5 5 5 6 6 6 "
            ]
        );
    }

    #[test]
    fn ascii_exact_multiple_ends_with_newline() {
        let image = Image::new(5, 1).unwrap();
        let mut sink = vec![];

        PpmEncoder::new(&mut sink)
            .encode(&image, PpmEncoding::Ascii)
            .unwrap();

        assert!(sink.ends_with(b"0 0 0 \n"));
    }

    #[test]
    fn rgb_bytes_must_match_dimensions() {
        let mut sink = vec![];
        let err = PpmEncoder::new(&mut sink)
            .encode_rgb_bytes(2, 2, &[0; 6], PpmEncoding::Raw)
            .unwrap_err();

        assert!(matches!(err, PpmEncodeErrors::DimensionsMisMatch(12, 6)));
        assert!(sink.is_empty());

        let err = PpmEncoder::new(&mut sink)
            .encode_rgb_bytes(0, 2, &[], PpmEncoding::Raw)
            .unwrap_err();
        assert!(matches!(err, PpmEncodeErrors::Static(_)));
    }

    #[test]
    fn rgb_bytes_match_image_encoding() {
        let bytes: Vec<u8> = (0..36).collect();
        let image = Image::from_rgb_bytes(4, 3, &bytes).unwrap();

        for encoding in [PpmEncoding::Raw, PpmEncoding::Ascii] {
            let mut from_image = vec![];
            let mut from_bytes = vec![];

            PpmEncoder::new(&mut from_image)
                .encode(&image, encoding)
                .unwrap();
            PpmEncoder::new(&mut from_bytes)
                .encode_rgb_bytes(4, 3, &bytes, encoding)
                .unwrap();

            assert_eq!(from_image, from_bytes);
        }
    }

    #[test]
    fn magic_tokens() {
        assert_eq!(PpmEncoding::from_magic(b"P6"), Some(PpmEncoding::Raw));
        assert_eq!(PpmEncoding::from_magic(b"P3"), Some(PpmEncoding::Ascii));
        assert_eq!(PpmEncoding::from_magic(b"P5"), None);
        assert_eq!(PpmEncoding::Ascii.to_string(), "P3");
    }
}
