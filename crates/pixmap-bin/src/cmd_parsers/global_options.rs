/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};
use pixmap_core::options::DecoderOptions;
use pixmap_ppm::PpmEncoding;

#[derive(Debug, Copy, Clone)]
pub struct CmdOptions {
    pub encoding:    PpmEncoding,
    pub max_width:   usize,
    pub max_height:  usize,
    pub strict_mode: bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        let defaults = DecoderOptions::default();

        CmdOptions {
            encoding:    PpmEncoding::Raw,
            max_width:   defaults.max_width(),
            max_height:  defaults.max_height(),
            strict_mode: defaults.strict_mode()
        }
    }

    pub fn decoder_options(&self) -> DecoderOptions {
        DecoderOptions::default()
            .set_max_width(self.max_width)
            .set_max_height(self.max_height)
            .set_strict_mode(self.strict_mode)
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if options.get_flag("ascii") {
        info!("Writing plain text output");
        cmd_options.encoding = PpmEncoding::Ascii;
    }
    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }
    if options.get_flag("lenient") {
        info!("Tolerating truncated pixel data");
        cmd_options.strict_mode = false;
    }
    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("info") {
        Level::Info
    } else {
        // --warn and the default
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
