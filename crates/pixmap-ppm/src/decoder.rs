/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use pixmap_core::image::{Image, PIXEL_SIZE};
use pixmap_core::log::{debug, info, trace, warn};
use pixmap_core::options::DecoderOptions;

use crate::encoder::PpmEncoding;
use crate::errors::PpmDecodeErrors;

/// Longest header line accepted, excluding the newline
pub const MAX_LINE_LENGTH: usize = 1024;

/// Header fields, only needed until pixels are decoded
#[derive(Copy, Clone, Debug)]
struct PpmHeader {
    encoding:    PpmEncoding,
    width:       usize,
    height:      usize,
    max_value:   usize,
    data_offset: usize
}

/// An instance of a PPM decoder
///
/// The decoder can decode P3 and P6 images from any buffered reader
///
/// # Example
/// ```
/// use pixmap_ppm::PpmDecoder;
///
/// let mut decoder = PpmDecoder::new(&b"P3\n1 1\n255\n10 20 30"[..]);
/// let image = decoder.decode().unwrap();
///
/// assert_eq!(image.pixel(0, 0).to_array(), [10, 20, 30]);
/// ```
pub struct PpmDecoder<R: BufRead> {
    reader:   R,
    // bytes consumed from the reader so far
    position: usize,
    header:   Option<PpmHeader>,
    options:  DecoderOptions
}

impl<R: BufRead> PpmDecoder<R> {
    /// Create a new ppm decoder with default options
    ///
    /// # Example
    /// ```
    /// use pixmap_ppm::PpmDecoder;
    /// let mut decoder = PpmDecoder::new(&b"NOT VALID PPM"[..]);
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new(reader: R) -> PpmDecoder<R> {
        PpmDecoder::new_with_options(DecoderOptions::default(), reader)
    }

    /// Create a new PPM decoder with the specified options
    pub fn new_with_options(options: DecoderOptions, reader: R) -> PpmDecoder<R> {
        PpmDecoder {
            reader,
            position: 0,
            header: None,
            options
        }
    }

    /// Read PPM headers and store them in internal state
    ///
    /// Calling this more than once is a no-op
    pub fn decode_headers(&mut self) -> Result<(), PpmDecodeErrors> {
        self.read_header()?;
        Ok(())
    }

    fn read_header(&mut self) -> Result<PpmHeader, PpmDecodeErrors> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        // counts comment lines too, only used for error messages
        let mut line_number = 0;

        let line = self.read_header_line(&mut line_number)?;
        let magic = line.trim_ascii_end();

        let encoding = PpmEncoding::from_magic(magic).ok_or_else(|| {
            PpmDecodeErrors::UnsupportedFormat(String::from_utf8_lossy(magic).into_owned())
        })?;

        let line = self.read_header_line(&mut line_number)?;
        let (width, height) = match parse_integers::<2>(&line) {
            Some([width, height]) => (width, height),
            None => {
                let msg = format!(
                    "expected width and height but found `{}`",
                    String::from_utf8_lossy(&line)
                );
                return Err(PpmDecodeErrors::InvalidHeader(line_number, msg));
            }
        };
        if width == 0 || height == 0 {
            let msg = format!("image dimensions {width}x{height} contain a zero");
            return Err(PpmDecodeErrors::InvalidHeader(line_number, msg));
        }
        if width > self.options.max_width() {
            return Err(PpmDecodeErrors::LargeDimensions(
                self.options.max_width(),
                width
            ));
        }
        if height > self.options.max_height() {
            return Err(PpmDecodeErrors::LargeDimensions(
                self.options.max_height(),
                height
            ));
        }

        let line = self.read_header_line(&mut line_number)?;
        let max_value = match parse_integers::<1>(&line) {
            Some([max_value]) => max_value,
            None => {
                let msg = format!(
                    "expected max value but found `{}`",
                    String::from_utf8_lossy(&line)
                );
                return Err(PpmDecodeErrors::InvalidHeader(line_number, msg));
            }
        };
        if max_value > usize::from(u8::MAX) {
            return Err(PpmDecodeErrors::UnsupportedDepth(max_value));
        }
        if max_value == 0 {
            let msg = String::from("max value must be greater than zero");
            return Err(PpmDecodeErrors::InvalidHeader(line_number, msg));
        }

        info!("Encoding: {encoding:?}");
        info!("Width: {width}, height: {height}");
        info!("Max value: {max_value}");
        debug!("Pixel data starts at byte {}", self.position);

        let header = PpmHeader {
            encoding,
            width,
            height,
            max_value,
            data_offset: self.position
        };
        self.header = Some(header);

        Ok(header)
    }

    /// Return image dimensions or none if headers aren't decoded
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.header.map(|h| (h.width, h.height))
    }

    /// Return the pixel encoding or none if headers aren't decoded
    pub fn encoding(&self) -> Option<PpmEncoding> {
        self.header.map(|h| h.encoding)
    }

    /// Return the max value declared in the header
    pub fn max_value(&self) -> Option<usize> {
        self.header.map(|h| h.max_value)
    }

    /// Return the offset of the first pixel byte from the start of the stream
    pub fn data_offset(&self) -> Option<usize> {
        self.header.map(|h| h.data_offset)
    }

    /// Decode the image, reading headers first if needed
    ///
    /// # Errors
    /// See [`PpmDecodeErrors`], no partially decoded image is ever returned
    pub fn decode(&mut self) -> Result<Image, PpmDecodeErrors> {
        let header = self.read_header()?;
        let mut image = Image::new(header.width, header.height)?;

        match header.encoding {
            PpmEncoding::Raw => self.decode_raw(&mut image)?,
            PpmEncoding::Ascii => self.decode_ascii(&mut image, header.max_value)?
        }
        trace!("Consumed {} bytes", self.position);

        Ok(image)
    }

    fn decode_raw(&mut self, image: &mut Image) -> Result<(), PpmDecodeErrors> {
        let (width, height) = image.dimensions();
        let expected = width * height * PIXEL_SIZE;

        let mut scanline = vec![0_u8; width * PIXEL_SIZE];
        let mut total = 0;

        for row in image.rows_mut() {
            let read = self.read_full(&mut scanline)?;
            total += read;

            for (pixel, rgb) in row.iter_mut().zip(scanline[..read].chunks(PIXEL_SIZE)) {
                pixel.r = rgb[0];

                if let Some(&g) = rgb.get(1) {
                    pixel.g = g;
                }
                if let Some(&b) = rgb.get(2) {
                    pixel.b = b;
                }
            }

            if read < scanline.len() {
                if self.options.strict_mode() {
                    return Err(PpmDecodeErrors::TruncatedData(expected, total));
                }
                warn!("Pixel data ended after {total} of {expected} bytes, remaining pixels are black");
                break;
            }
        }
        Ok(())
    }

    fn decode_ascii(&mut self, image: &mut Image, max_value: usize) -> Result<(), PpmDecodeErrors> {
        for (index, pixel) in image.pixels_mut().iter_mut().enumerate() {
            let mut rgb = [0_u8; 3];

            for component in rgb.iter_mut() {
                let value = self.read_ascii_integer(index)?;

                if value > max_value {
                    return Err(PpmDecodeErrors::ComponentOutOfRange(
                        value, max_value, index
                    ));
                }
                // max_value is at most 255
                *component = value as u8;
            }
            *pixel = rgb.into();
        }
        Ok(())
    }

    /// Read one whitespace delimited decimal integer of pixel `index`
    ///
    /// Values too large for a usize saturate, they are out of range anyway
    fn read_ascii_integer(&mut self, index: usize) -> Result<usize, PpmDecodeErrors> {
        self.skip_whitespace()?;

        let mut value = 0_usize;
        let mut digits = 0;

        loop {
            let buf = self.reader.fill_buf()?;
            let count = buf.iter().take_while(|c| c.is_ascii_digit()).count();

            for c in &buf[..count] {
                value = value
                    .saturating_mul(10)
                    .saturating_add(usize::from(c - b'0'));
            }
            let exhausted = count == buf.len() && count != 0;

            self.consume(count);
            digits += count;

            if !exhausted {
                break;
            }
        }
        if digits == 0 {
            let msg = match self.reader.fill_buf()?.first() {
                Some(c) => format!(
                    "expected a decimal integer for pixel {index} but found `{}`",
                    char::from(*c)
                ),
                None => format!("unexpected end of data at pixel {index}")
            };
            return Err(PpmDecodeErrors::InvalidPixelData(msg));
        }
        Ok(value)
    }

    /// Read a logical header line, skipping leading whitespace,
    /// blank lines and comment lines.
    ///
    /// The terminating newline is consumed but not returned.
    fn read_header_line(&mut self, line_number: &mut usize) -> Result<Vec<u8>, PpmDecodeErrors> {
        loop {
            self.skip_whitespace()?;
            *line_number += 1;

            let mut line = Vec::new();
            let limit = (MAX_LINE_LENGTH + 1) as u64;
            let read = self.reader.by_ref().take(limit).read_until(b'\n', &mut line)?;

            self.position += read;

            if line.last() == Some(&b'\n') {
                line.pop();
            } else if line.len() > MAX_LINE_LENGTH {
                let msg = format!("line is longer than {MAX_LINE_LENGTH} characters");
                return Err(PpmDecodeErrors::InvalidHeader(*line_number, msg));
            }

            if line.is_empty() {
                let msg = String::from("unexpected end of file");
                return Err(PpmDecodeErrors::InvalidHeader(*line_number, msg));
            }
            if line[0] == b'#' {
                trace!("Skipping comment on line {line_number}");
                continue;
            }
            return Ok(line);
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), PpmDecodeErrors> {
        loop {
            let buf = self.reader.fill_buf()?;

            if buf.is_empty() {
                return Ok(());
            }
            let count = buf.iter().take_while(|c| c.is_ascii_whitespace()).count();
            let exhausted = count == buf.len();

            self.consume(count);

            if !exhausted {
                return Ok(());
            }
        }
    }

    fn consume(&mut self, amount: usize) {
        self.reader.consume(amount);
        self.position += amount;
    }

    /// Fill `buf` as far as the reader allows, returning bytes read
    fn read_full(&mut self, buf: &mut [u8]) -> Result<usize, PpmDecodeErrors> {
        let mut filled = 0;

        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(PpmDecodeErrors::IoErrors(e))
            }
        }
        self.position += filled;

        Ok(filled)
    }
}

/// Parse exactly `N` whitespace separated non-negative decimal integers.
///
/// Values that overflow saturate to `usize::MAX`
fn parse_integers<const N: usize>(line: &[u8]) -> Option<[usize; N]> {
    let mut values = [0_usize; N];
    let mut tokens = line
        .split(|c| c.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    for value in values.iter_mut() {
        *value = parse_decimal(tokens.next()?)?;
    }
    if tokens.next().is_some() {
        return None;
    }
    Some(values)
}

fn parse_decimal(token: &[u8]) -> Option<usize> {
    if token.is_empty() || !token.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(token.iter().fold(0_usize, |acc, c| {
        acc.saturating_mul(10).saturating_add(usize::from(c - b'0'))
    }))
}

/// Load a P3 or P6 image from `path` with default options
///
/// # Example
/// ```no_run
/// let image = pixmap_ppm::load("image.ppm").unwrap();
/// println!("{}x{}", image.width(), image.height());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Image, PpmDecodeErrors> {
    load_with_options(path, DecoderOptions::default())
}

/// Load a P3 or P6 image from `path`
pub fn load_with_options<P: AsRef<Path>>(
    path: P, options: DecoderOptions
) -> Result<Image, PpmDecodeErrors> {
    let path = path.as_ref();

    info!("Loading {path:?}");

    let reader = BufReader::new(File::open(path)?);

    PpmDecoder::new_with_options(options, reader).decode()
}
