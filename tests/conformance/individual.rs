//! Individual conformance tests - each fixture file is a separate test
//!
//! This test binary uses libtest-mimic to dynamically generate one test
//! case per .srf and .dnm file under tests/fixtures. Each file shows up as a
//! separate test in the test output.
//!
//! Run with: cargo test --test conformance_individual
//! Run only negatives: cargo test --test conformance_individual negative

#[path = "../common/mod.rs"]
mod common;

use common::{ExpectedCounts, Expectations};
use libtest_mimic::{Arguments, Failed, Trial};
use std::fs::File;
use std::path::{Path, PathBuf};
use surfdnm::parser::{parse_dnm_reader, parse_surf_reader};
use surfdnm::DnmDocument;
use walkdir::WalkDir;

/// Get all .srf and .dnm files in a directory recursively, sorted by name
fn get_test_files(dir: &str) -> Vec<PathBuf> {
    let path = format!("tests/fixtures/{}", dir);
    if !Path::new(&path).exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(&path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            matches!(
                e.path().extension().and_then(|s| s.to_str()),
                Some("srf") | Some("dnm")
            )
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Decode a fixture; a bare SURF file becomes a one-surface document
fn load(path: &Path) -> Result<surfdnm::Result<DnmDocument>, Failed> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let is_dnm = path.extension().and_then(|s| s.to_str()) == Some("dnm");

    Ok(if is_dnm {
        parse_dnm_reader(file)
    } else {
        parse_surf_reader(file, &file_name(path)).map(|surface| {
            let mut document = DnmDocument::new();
            document.surfaces.push(surface);
            document
        })
    })
}

/// Test that a positive fixture parses to the expected counts
fn test_positive_file(path: PathBuf, expectations: &Expectations) -> Result<(), Failed> {
    let name = file_name(&path);
    let expected = expectations
        .counts(&name)
        .ok_or_else(|| format!("No expected counts for {} in expected.json", name))?;

    let document = load(&path)?.map_err(|e| format!("Failed to parse: {}", e))?;
    let actual = ExpectedCounts::of(&name, &document);
    if &actual != expected {
        return Err(format!("Counts differ.\n  expected: {:?}\n  actual:   {:?}", expected, actual).into());
    }

    // Writing and re-reading must keep the counts
    let text = document
        .to_dnm_string()
        .map_err(|e| format!("Failed to write: {}", e))?;
    let reparsed = parse_dnm_reader(text.as_bytes())
        .map_err(|e| format!("Failed to re-read written output: {}", e))?;
    let again = ExpectedCounts::of(&name, &reparsed);
    if again.faces != actual.faces || again.vertices != actual.vertices {
        return Err(format!("Round trip changed counts: {:?}", again).into());
    }
    Ok(())
}

/// Test that a negative fixture fails with the expected error code
fn test_negative_file(path: PathBuf, expectations: &Expectations) -> Result<(), Failed> {
    let name = file_name(&path);
    let expected = expectations
        .error(&name)
        .ok_or_else(|| format!("No expected error for {} in expected.json", name))?;

    match load(&path)? {
        Ok(_) => Err(format!("Expected parsing to fail ({}), but it succeeded", expected.reason).into()),
        Err(e) => {
            let message = e.to_string();
            let code = format!("[{}]", expected.error_code);
            if message.contains(&code) {
                Ok(())
            } else {
                Err(format!("Expected {} ({}), got: {}", code, expected.reason, message).into())
            }
        }
    }
}

fn create_tests(kind: &'static str, expectations: &Expectations) -> Vec<Trial> {
    get_test_files(kind)
        .into_iter()
        .map(|path| {
            let test_name = format!("{}::{}", kind, file_name(&path));
            let expectations = expectations.clone();
            Trial::test(test_name, move || match kind {
                "positive" => test_positive_file(path, &expectations),
                _ => test_negative_file(path, &expectations),
            })
        })
        .collect()
}

fn main() {
    let args = Arguments::from_args();
    let expectations = Expectations::load();

    let mut tests = create_tests("positive", &expectations);
    tests.extend(create_tests("negative", &expectations));

    libtest_mimic::run(&args, tests).exit();
}
