/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::process::exit;

use crate::workflow::{create_and_exec_workflow_from_cmd, WorkflowErrors};

mod cmd_args;
mod cmd_parsers;
mod operations;
mod probe_files;
mod serde;
mod workflow;

/// Accept the historical single dash `-ascii` spelling
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-ascii" {
                OsString::from("--ascii")
            } else {
                arg
            }
        })
        .collect()
}

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches_from(normalize_args(std::env::args_os()));

    cmd_parsers::global_options::setup_logger(&options);

    let parsed_opts = cmd_parsers::global_options::parse_options(&options);

    let result = probe_files::probe_input_files(&options, &parsed_opts).and_then(|probed| {
        if probed {
            return Ok(());
        }
        create_and_exec_workflow_from_cmd(&options, &parsed_opts)
    });

    if let Err(err) = result {
        report_and_exit(&err);
    }
}

fn report_and_exit(err: &WorkflowErrors) -> ! {
    eprint!("{err}");
    exit(1);
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use crate::normalize_args;

    #[test]
    fn single_dash_ascii_is_rewritten() {
        let args = ["pixmap", "-ascii", "in.ppm", "-ascii.ppm"].map(OsString::from);
        let normalized = normalize_args(args);

        assert_eq!(normalized[1], "--ascii");
        assert_eq!(normalized[3], "-ascii.ppm");
    }
}
