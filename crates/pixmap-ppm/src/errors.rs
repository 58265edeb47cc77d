/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};
use std::io;

use pixmap_core::image::ImageErrors;

/// Possible errors that may occur during decoding
pub enum PpmDecodeErrors {
    /// The file could not be opened or read
    IoErrors(io::Error),
    /// The magic line is neither `P3` nor `P6`
    UnsupportedFormat(String),
    /// A header line is malformed
    ///
    /// # Arguments
    /// - 1st argument is the line number, comments included
    /// - 2nd argument is the reason
    InvalidHeader(usize, String),
    /// maxval is greater than 255
    UnsupportedDepth(usize),
    /// Too large dimensions
    ///
    /// # Arguments
    /// - 1st argument is the configured maximum
    /// - 2nd argument is the value found in the header
    LargeDimensions(usize, usize),
    /// A plain pixel component exceeds the maxval declared in the header
    ///
    /// # Arguments
    /// - 1st argument is the value found
    /// - 2nd argument is maxval
    /// - 3rd argument is the index of the offending pixel
    ComponentOutOfRange(usize, usize, usize),
    /// Plain pixel data could not be parsed as decimal triples
    InvalidPixelData(String),
    /// Raw pixel data ended early
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes actually read
    TruncatedData(usize, usize),
    /// The image buffer could not be created
    Allocation(ImageErrors)
}

impl PpmDecodeErrors {
    /// Return true if the error originates from a file which
    /// does not follow the PPM grammar
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_)
                | Self::InvalidHeader(_, _)
                | Self::UnsupportedDepth(_)
                | Self::LargeDimensions(_, _)
                | Self::ComponentOutOfRange(_, _, _)
                | Self::InvalidPixelData(_)
        )
    }
}

impl Debug for PpmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IoErrors(err) => {
                writeln!(f, "I/O error: {err}")
            }
            Self::UnsupportedFormat(found) => {
                writeln!(
                    f,
                    "Unsupported format `{found}`, supported formats are P3 and P6"
                )
            }
            Self::InvalidHeader(line, reason) => {
                writeln!(f, "Invalid header at line {line}, reason: {reason}")
            }
            Self::UnsupportedDepth(max_value) => {
                writeln!(
                    f,
                    "Max value {max_value} is greater than 255, only 1 byte per component is supported"
                )
            }
            Self::LargeDimensions(expected, found) => {
                writeln!(
                    f,
                    "Too large dimensions, expected a value less than {expected} but found {found}"
                )
            }
            Self::ComponentOutOfRange(value, max_value, pixel) => {
                writeln!(
                    f,
                    "Component {value} of pixel {pixel} is greater than max value {max_value}"
                )
            }
            Self::InvalidPixelData(reason) => {
                writeln!(f, "Invalid pixel data, reason: {reason}")
            }
            Self::TruncatedData(expected, found) => {
                writeln!(
                    f,
                    "Insufficient data, expected {expected} bytes of pixels but stream has {found}"
                )
            }
            Self::Allocation(err) => {
                writeln!(f, "{err:?}")
            }
        }
    }
}

impl Display for PpmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for PpmDecodeErrors {}

impl From<io::Error> for PpmDecodeErrors {
    fn from(err: io::Error) -> Self {
        Self::IoErrors(err)
    }
}

impl From<ImageErrors> for PpmDecodeErrors {
    fn from(err: ImageErrors) -> Self {
        Self::Allocation(err)
    }
}

/// Errors occurring during encoding
pub enum PpmEncodeErrors {
    /// The destination could not be created or written to
    IoErrors(io::Error),
    /// Pixel data length does not match image dimensions
    ///
    /// # Arguments
    /// - 1st argument is the expected length
    /// - 2nd argument is the length found
    DimensionsMisMatch(usize, usize),
    Static(&'static str)
}

impl Debug for PpmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IoErrors(err) => {
                writeln!(f, "I/O error: {err}")
            }
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Data length does not match image dimensions, expected {expected} but found {found}"
                )
            }
            Self::Static(err) => {
                writeln!(f, "{err}")
            }
        }
    }
}

impl Display for PpmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{:?}", self)
    }
}

impl std::error::Error for PpmEncodeErrors {}

impl From<io::Error> for PpmEncodeErrors {
    fn from(err: io::Error) -> Self {
        Self::IoErrors(err)
    }
}
