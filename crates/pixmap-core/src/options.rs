/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options
//!
//! Options shared by the decoders, the same `DecoderOptions` can be reused
//! for every image that is loaded.

/// Decoder options
///
/// Setters consume and return `Self` so they can be chained
///
/// ```
/// use pixmap_core::options::DecoderOptions;
///
/// let options = DecoderOptions::default()
///     .set_max_width(1024)
///     .set_strict_mode(false);
///
/// assert_eq!(options.max_width(), 1024);
/// assert!(!options.strict_mode());
/// ```
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Whether the decoder should error out on non-conformance
    /// it could otherwise recover from, e.g pixel data that ends
    /// before all pixels were read.
    ///
    /// - Default value: true
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: true
        }
    }
}

impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    ///
    /// Together with [`max_height`](Self::max_height) this bounds the image
    /// buffer allocated right after the header is parsed, before any pixel
    /// data is read. A header alone can request `max_width * max_height * 3`
    /// bytes.
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    ///
    /// See [`max_width`](Self::max_width) for the allocation it bounds
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should error out on recoverable
    /// non-conformance
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}
