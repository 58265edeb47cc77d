/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::ArgMatches;
use log::info;
use pixmap_ppm::{PpmDecodeErrors, PpmDecoder};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::serde::Metadata;
use crate::workflow::WorkflowErrors;

/// Probe the input file, extract header metadata, and print it to standard output.
///
/// Returns `true` if probing was requested, in which case nothing else should run
pub fn probe_input_files(args: &ArgMatches, options: &CmdOptions) -> Result<bool, WorkflowErrors> {
    if !args.get_flag("probe") {
        return Ok(false);
    }
    let in_file = args
        .get_one::<PathBuf>("in")
        .ok_or(WorkflowErrors::MissingArgument("in"))?;

    info!("Probing {in_file:?}");

    let load_error = |err: PpmDecodeErrors| WorkflowErrors::Load(in_file.clone(), err);

    let file = File::open(in_file).map_err(|e| load_error(e.into()))?;
    let size = file.metadata().map_err(|e| load_error(e.into()))?.len();

    let mut decoder = PpmDecoder::new_with_options(options.decoder_options(), BufReader::new(file));
    decoder.decode_headers().map_err(load_error)?;

    if let Some(metadata) = Metadata::new(in_file, size, &decoder) {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    }
    Ok(true)
}
