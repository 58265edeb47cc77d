/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use clap::ArgMatches;
use log::{debug, info};
use pixmap_ppm::{load_with_options, write, PpmDecodeErrors, PpmEncodeErrors};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::operations::Darken;

/// Reasons a command line run can fail
pub enum WorkflowErrors {
    MissingArgument(&'static str),
    Load(PathBuf, PpmDecodeErrors),
    Write(PathBuf, PpmEncodeErrors),
    Json(serde_json::Error)
}

impl Debug for WorkflowErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowErrors::MissingArgument(arg) => {
                writeln!(f, "Missing argument `{arg}`")
            }
            WorkflowErrors::Load(path, err) => {
                write!(f, "Failed loading {path:?}! {err:?}")
            }
            WorkflowErrors::Write(path, err) => {
                write!(f, "Failed writing {path:?}! {err:?}")
            }
            WorkflowErrors::Json(err) => {
                writeln!(f, "Could not serialize metadata: {err}")
            }
        }
    }
}

impl Display for WorkflowErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for WorkflowErrors {}

impl From<serde_json::Error> for WorkflowErrors {
    fn from(value: serde_json::Error) -> Self {
        WorkflowErrors::Json(value)
    }
}

/// Load the input, darken it and write it to the output
pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), WorkflowErrors> {
    info!("Creating workflows from input");

    let in_file = args
        .get_one::<PathBuf>("in")
        .ok_or(WorkflowErrors::MissingArgument("in"))?;
    let out_file = args
        .get_one::<PathBuf>("out")
        .ok_or(WorkflowErrors::MissingArgument("out"))?;

    let mut image = load_with_options(in_file, cmd_opts.decoder_options())
        .map_err(|err| WorkflowErrors::Load(in_file.clone(), err))?;

    let operation = Darken::new();
    debug!("Running {}", operation.name());
    operation.execute(&mut image);

    write(out_file, &image, cmd_opts.encoding)
        .map_err(|err| WorkflowErrors::Write(out_file.clone(), err))?;

    info!("Wrote {out_file:?} as {}", cmd_opts.encoding);

    Ok(())
}
