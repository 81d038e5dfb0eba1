use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use wavelane::WavelaneError;
use wavelane_cli::{Args, run};

/// Collects all .json files from a directory
fn collect_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| {
                    path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
                })
                .collect()
        })
        .unwrap_or_default();

    // Sort for consistent test output
    files.sort();
    files
}

fn demos_dir() -> PathBuf {
    // Demos live at the workspace root, not in the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &Path, output: &Path, config: Option<&Path>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: config.map(|path| path.to_string_lossy().to_string()),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_json_files(&demos_dir());
    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();
    for demo in &demos {
        let output = temp_dir
            .path()
            .join(format!("{}.svg", demo.file_stem().unwrap().to_string_lossy()));

        match run(&args(demo, &output, None)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output).unwrap();
                assert!(svg.starts_with("<svg"), "{} is not SVG", demo.display());
                assert!(svg.contains("id=\"svgcontent_0\""));
            }
            Err(err) => failed.push((demo.clone(), err)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_json_files(&demos_dir().join("errors"));
    assert!(!demos.is_empty(), "No error demos found in demos/errors/");

    let mut succeeded = Vec::new();
    for demo in &demos {
        let output = temp_dir.path().join("error.svg");
        if run(&args(demo, &output, None)).is_ok() {
            succeeded.push(demo.clone());
        }
    }

    if !succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!("{} error demo(s) succeeded unexpectedly", succeeded.len());
    }
}

#[test]
fn e2e_config_file_applies_style() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("wavelane.toml");
    fs::write(
        &config,
        "[render]\nstrict = true\n\n[style]\nbackground_color = \"#fafafa\"\n",
    )
    .unwrap();
    let output = temp_dir.path().join("arcs.svg");

    run(&args(&demos_dir().join("arcs.json"), &output, Some(&config))).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("width=\"100%\""));
    assert!(!svg.contains("labels_0"));
}

#[test]
fn e2e_sample_glyphs_cover_clock_demo() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("wavelane.toml");
    let glyphs = demos_dir().join("skins").join("clock.svg");
    fs::write(
        &config,
        format!("[render]\nskin_defs = {:?}\n", glyphs.to_string_lossy()),
    )
    .unwrap();
    let output = temp_dir.path().join("clock.svg");

    run(&args(&demos_dir().join("clock.json"), &output, Some(&config))).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    let missing: Vec<&str> = svg
        .split("href=\"#")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter(|id| !svg.contains(&format!("id=\"{id}\"")))
        .collect();
    assert!(missing.is_empty(), "undefined glyphs: {missing:?}");
}

#[test]
fn e2e_missing_input_is_io_error() {
    let temp_dir = tempdir().unwrap();
    let err = run(&args(
        &temp_dir.path().join("absent.json"),
        &temp_dir.path().join("out.svg"),
        None,
    ))
    .unwrap_err();
    assert!(matches!(err, WavelaneError::Io(_)));
}
