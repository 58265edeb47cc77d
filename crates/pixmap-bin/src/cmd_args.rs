/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("pixmap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Load a PPM image, darken its top left quadrant and save it")
        .arg(Arg::new("in")
            .help("Input PPM file to read data from")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("out")
            .help("Output PPM file to write the data to")
            .value_parser(value_parser!(PathBuf))
            .required_unless_present("probe"))
        .arg(Arg::new("ascii")
            .long("ascii")
            .action(ArgAction::SetTrue)
            .help("Write a plain text (P3) PPM file instead of a binary (P6) one")
            .long_help("Write a plain text (P3) PPM file instead of a binary (P6) one.\nThe single dash spelling -ascii is also accepted"))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print the input header as JSON and exit"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum width of images to decode [default: 16384]")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum height of images to decode [default: 16384]")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("lenient")
            .long("lenient")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Load binary images whose pixel data ends early")
            .long_help("Load binary images whose pixel data ends early.\nMissing pixels are left black instead of failing the load"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::cmd_args::create_cmd_args;

    #[test]
    fn verify_cmd() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn positional_paths() {
        let matches = create_cmd_args()
            .try_get_matches_from(["pixmap", "--ascii", "a.ppm", "b.ppm"])
            .unwrap();

        assert_eq!(matches.get_one::<PathBuf>("in"), Some(&PathBuf::from("a.ppm")));
        assert_eq!(matches.get_one::<PathBuf>("out"), Some(&PathBuf::from("b.ppm")));
        assert!(matches.get_flag("ascii"));
    }

    #[test]
    fn output_required_unless_probing() {
        assert!(create_cmd_args()
            .try_get_matches_from(["pixmap", "a.ppm"])
            .is_err());
        assert!(create_cmd_args()
            .try_get_matches_from(["pixmap", "--probe", "a.ppm"])
            .is_ok());
    }
}
