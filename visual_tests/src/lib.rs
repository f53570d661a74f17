//! Golden-image regression tests for rendered backdrops.
//!
//! Each [`Scenario`] renders in-process and is compared against a PNG under
//! `references/`. Set `UPDATE_REFERENCES=1` to regenerate them; a missing
//! reference is written on first run.

mod capture;
mod compare;

pub use capture::{capture, capture_to, scenario, scenarios, Scenario};
pub use compare::{compare_images, generate_diff_image, CompareResult};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    /// Name of the scenario to render
    pub scenario: String,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
}

impl Default for VisualTestConfig {
    fn default() -> Self {
        Self {
            scenario: String::new(),
            similarity_threshold: 0.99,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Set when no reference existed and the capture became the reference
    pub created_reference: bool,
    pub captured_path: PathBuf,
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

pub fn reference_path(name: &str) -> PathBuf {
    references_dir().join(format!("{}.png", name))
}

/// Directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

pub fn captured_path(name: &str) -> PathBuf {
    output_dir().join(format!("{}_captured.png", name))
}

pub fn diff_path(name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", name))
}

/// Run a visual regression test
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    let scenario = scenario(&config.scenario)
        .ok_or_else(|| VisualTestError::UnknownScenario(config.scenario.clone()))?;

    std::fs::create_dir_all(output_dir())?;
    let ref_path = reference_path(scenario.name);
    let cap_path = captured_path(scenario.name);

    let captured = capture_to(scenario, &cap_path)?;

    if !ref_path.exists() {
        std::fs::create_dir_all(references_dir())?;
        captured.save(&ref_path)?;
        println!("Created missing reference: {}", ref_path.display());
        return Ok(VisualTestResult {
            passed: true,
            similarity: 1.0,
            created_reference: true,
            captured_path: cap_path,
            reference_path: ref_path,
            diff_path: None,
        });
    }

    let reference = image::open(&ref_path)?.to_rgba8();
    let compare_result = compare_images(&reference, &captured)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    let diff = if !passed {
        let diff_file = diff_path(scenario.name);
        generate_diff_image(&reference, &captured, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        created_reference: false,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Re-render a scenario straight into its reference image
pub fn update_reference(name: &str) -> Result<PathBuf> {
    let scenario =
        scenario(name).ok_or_else(|| VisualTestError::UnknownScenario(name.to_string()))?;
    std::fs::create_dir_all(references_dir())?;

    let ref_path = reference_path(name);
    capture_to(scenario, &ref_path)?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
