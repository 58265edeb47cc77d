/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the pixmap libraries
//!
//! It currently contains
//!
//! - An owned 24-bit RGB image buffer with row addressed access
//! - Decoder options shared by the codecs
//! - Logging macros which forward to the `log` crate when the `log`
//!   feature is enabled
//!
//! # Features
//!  - `log`: Forward [`log`] macros to the `log` facade
#![macro_use]

pub mod image;
pub mod log;
pub mod options;
