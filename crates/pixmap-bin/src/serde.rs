/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::BufRead;
use std::path::Path;

use pixmap_ppm::{PpmDecoder, PpmEncoding};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Header information of a probed file
pub struct Metadata<'a> {
    file:        &'a Path,
    size:        u64,
    encoding:    PpmEncoding,
    width:       usize,
    height:      usize,
    max_value:   usize,
    data_offset: usize
}

impl<'a> Metadata<'a> {
    /// Collect metadata from a decoder whose headers were decoded,
    /// returns `None` otherwise
    pub fn new<R: BufRead>(file: &'a Path, size: u64, decoder: &PpmDecoder<R>) -> Option<Self> {
        let (width, height) = decoder.dimensions()?;

        Some(Metadata {
            file,
            size,
            encoding: decoder.encoding()?,
            width,
            height,
            max_value: decoder.max_value()?,
            data_offset: decoder.data_offset()?
        })
    }
}

impl Serialize for Metadata<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("ImageMetadata", 7)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("format", self.encoding.magic())?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("max_value", &self.max_value)?;
        state.serialize_field("data_offset", &self.data_offset)?;

        state.end()
    }
}
