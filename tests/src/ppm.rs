/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::{read, remove_file};

use nanorand::{Rng, WyRand};
use pixmap_core::image::Image;
use pixmap_ppm::{load, write, PpmDecodeErrors, PpmDecoder, PpmEncoder, PpmEncoding};

use crate::{hash, manifest_path, Expected, TestEntry};

fn check_entry(entry: &TestEntry) -> Result<(), String> {
    let contents = entry.contents();
    let result = PpmDecoder::new(contents.as_slice()).decode();

    match (entry.expected, result) {
        (Expected::Ok, Ok(image)) => {
            if let Some(size) = entry.size {
                if image.dimensions() != size {
                    return Err(format!(
                        "expected size {size:?} but found {:?}",
                        image.dimensions()
                    ));
                }
            }
            if let Some(pixels) = &entry.pixels {
                if &image.to_rgb_bytes() != pixels {
                    return Err(format!(
                        "pixel mismatch, expected {pixels:?} but found {:?}",
                        image.to_rgb_bytes()
                    ));
                }
            }
            Ok(())
        }
        (Expected::Format, Err(err)) if err.is_format_error() => Ok(()),
        (Expected::Truncated, Err(PpmDecodeErrors::TruncatedData(_, _))) => Ok(()),
        (expected, Ok(image)) => Err(format!("expected {expected:?} but decoded {image:?}")),
        (expected, Err(err)) => Err(format!("expected {expected:?} but got {err:?}"))
    }
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_ppm_manifest() {
    let json_file = read(manifest_path()).unwrap();
    let entries: Vec<TestEntry> = serde_json::from_slice(&json_file).unwrap();

    assert!(!entries.is_empty());

    let mut failures = Vec::new();

    for entry in &entries {
        if let Err(reason) = check_entry(entry) {
            let err = format!("{}: {}\nConfig:{:#?}", entry.name, reason, entry);
            eprintln!("{}\n", err);
            failures.push(entry.name.clone());
        }
    }
    if !failures.is_empty() {
        panic!("Errors found during test decoding\n {:#?}", failures);
    }
}

/// Encoding the same image raw and plain decodes to identical pixels
#[test]
fn test_raw_and_ascii_hashes_match() {
    let mut rand = WyRand::new_seed(0xbad_cafe);

    for _ in 0..20 {
        let width = rand.generate_range(1_usize..=64);
        let height = rand.generate_range(1_usize..=64);

        let mut bytes = vec![0_u8; width * height * 3];
        rand.fill(&mut bytes);

        let image = Image::from_rgb_bytes(width, height, &bytes).unwrap();
        let expected_hash = hash(&bytes);

        for encoding in [PpmEncoding::Raw, PpmEncoding::Ascii] {
            let mut sink = vec![];
            PpmEncoder::new(&mut sink).encode(&image, encoding).unwrap();

            let decoded = PpmDecoder::new(sink.as_slice()).decode().unwrap();

            assert_eq!(decoded.dimensions(), (width, height));
            assert_eq!(
                hash(&decoded.to_rgb_bytes()),
                expected_hash,
                "hash mismatch for {width}x{height} {encoding}"
            );
        }
    }
}

/// Files written to disk and read back are identical to the in memory encoding
#[test]
fn test_disk_matches_memory() {
    let path = std::env::temp_dir().join(format!("pixmap-tests-{}.ppm", std::process::id()));
    let image = Image::from_rgb_bytes(3, 3, &(0..27).collect::<Vec<u8>>()).unwrap();

    for encoding in [PpmEncoding::Raw, PpmEncoding::Ascii] {
        let mut sink = vec![];
        PpmEncoder::new(&mut sink).encode(&image, encoding).unwrap();

        write(&path, &image, encoding).unwrap();

        assert_eq!(hash(&read(&path).unwrap()), hash(&sink));
        assert_eq!(load(&path).unwrap(), image);
    }
    remove_file(&path).unwrap();
}
