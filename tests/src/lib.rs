/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports)]

use std::path::{Path, PathBuf};

use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

#[cfg(test)]
mod ppm;

/// Outcome a manifest entry expects from decoding
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Expected {
    /// Decodes successfully
    Ok,
    /// Fails with an error in the format family
    Format,
    /// Raw pixel data ends early
    Truncated
}

#[derive(Clone, Deserialize, Debug)]
pub struct TestEntry {
    pub name:     String,
    /// Textual part of the file, usually the header
    pub header:   String,
    /// Bytes appended after the header
    #[serde(default)]
    pub data:     Vec<u8>,
    pub expected: Expected,
    /// Expected `width, height`
    pub size:     Option<(usize, usize)>,
    /// Expected pixels as interleaved `r,g,b` bytes
    pub pixels:   Option<Vec<u8>>,
    pub comment:  Option<String>
}

impl TestEntry {
    pub fn contents(&self) -> Vec<u8> {
        let mut contents = self.header.as_bytes().to_vec();
        contents.extend_from_slice(&self.data);
        contents
    }
}

pub fn manifest_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/ppm.json")
}

/// Hash used to compare decoded pixel buffers
pub fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}
