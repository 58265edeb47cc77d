/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding and encoding Portable Pixmap images
//!
//! Both flavours of 8 bit RGB pixmaps are supported
//!
//! - `P6`: raw, one byte per component
//! - `P3`: plain, components written as decimal text
//!
//! ```text
//! P6              <- magic, P3 or P6
//! # a comment     <- comment lines may precede any header line
//! 640 480         <- width height
//! 255             <- maxval, at most 255
//! <pixel data>    <- width * height r,g,b triples, row-major
//! ```
//!
//! # Example
//! ```no_run
//! use pixmap_ppm::{load, write, PpmEncoding};
//!
//! let mut image = load("input.ppm").unwrap();
//! image.row_mut(0)[0].r = 255;
//! write("output.ppm", &image, PpmEncoding::Ascii).unwrap();
//! ```
//!
//! [Format Specification](http://netpbm.sourceforge.net/doc/ppm.html)
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use pixmap_core;

mod decoder;
mod encoder;
mod errors;
