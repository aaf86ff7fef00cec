#[allow(dead_code)]
mod common;

use std::path::PathBuf;

use circlefind_core::detection::{DetectionConfig, RadiusRange};
use circlefind_core::error::CircleError;
use circlefind_core::pipeline::{BatchConfig, RenderConfig};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_default_batch_config() {
    let config = BatchConfig::default();
    assert_eq!(config.image_dir, PathBuf::from("images"));
    assert_eq!(config.output_dir, PathBuf::from("tests"));
    assert_eq!(config.render.jpeg_quality, 95);
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_detection_config() {
    let d = DetectionConfig::default();
    assert_eq!(d.blur_ksize, 11);
    assert_eq!(d.canny_threshold1, 25.0);
    assert_eq!(d.canny_threshold2, 150.0);
    assert_eq!(d.min_radius, 100);
    assert_eq!(d.max_radius, 200);
    assert_eq!(d.radius_step, 2);
    assert_eq!(d.hough_threshold_factor, 0.45);
    assert_eq!(d.min_xdistance, 40);
    assert_eq!(d.min_ydistance, 40);
    assert_eq!(d.max_circles, None);
    assert!(d.normalize_votes);
}

#[test]
fn test_default_radius_range() {
    let range = DetectionConfig::default().radius_range().unwrap();
    assert_eq!(range, RadiusRange::new(100, 200, 2).unwrap());
    assert_eq!(range.radii().len(), 50);
    assert_eq!(range.radii().last(), Some(&198));
}

#[test]
fn test_peak_params_mirror_config() {
    let mut d = common::small_detection_config();
    d.max_circles = Some(3);
    let p = d.peak_params();
    assert_eq!(p.threshold_factor, 0.45);
    assert_eq!(p.min_xdistance, 15);
    assert_eq!(p.min_ydistance, 15);
    assert_eq!(p.max_peaks, Some(3));
}

// ---------------------------------------------------------------------------
// TOML
// ---------------------------------------------------------------------------

#[test]
fn test_empty_toml_gives_defaults() {
    let config = BatchConfig::from_toml_str("").unwrap();
    assert_eq!(config, BatchConfig::default());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = BatchConfig::from_toml_str(
        r#"
image_dir = "photos"

[detection]
min_radius = 20
max_radius = 60
max_circles = 4

[render]
jpeg_quality = 80
"#,
    )
    .unwrap();

    assert_eq!(config.image_dir, PathBuf::from("photos"));
    assert_eq!(config.output_dir, PathBuf::from("tests"));
    assert_eq!(config.detection.min_radius, 20);
    assert_eq!(config.detection.max_radius, 60);
    assert_eq!(config.detection.radius_step, 2);
    assert_eq!(config.detection.max_circles, Some(4));
    assert_eq!(config.detection.blur_ksize, 11);
    assert_eq!(config.render.jpeg_quality, 80);
}

#[test]
fn test_toml_round_trip() {
    let mut config = common::batch_config(
        &PathBuf::from("in"),
        &PathBuf::from("out"),
    );
    config.detection.max_circles = Some(2);
    config.detection.normalize_votes = false;

    let text = config.to_toml_string().unwrap();
    let parsed = BatchConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_unset_max_circles_is_omitted() {
    let text = BatchConfig::default().to_toml_string().unwrap();
    assert!(!text.contains("max_circles"));
    assert!(text.contains("min_radius = 100"));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let err = BatchConfig::from_toml_str("[detection\nmin_radius = 3").unwrap_err();
    assert!(matches!(err, CircleError::ConfigParse(_)), "{err}");

    let err = BatchConfig::from_toml_str("[detection]\nmin_radius = \"big\"").unwrap_err();
    assert!(matches!(err, CircleError::ConfigParse(_)), "{err}");
}

#[test]
fn test_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("circlefind.toml");
    std::fs::write(&path, "output_dir = \"figures\"\n").unwrap();

    let config = BatchConfig::from_file(&path).unwrap();
    assert_eq!(config.output_dir, PathBuf::from("figures"));

    let err = BatchConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CircleError::Io(_)), "{err}");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_radius_ranges() {
    for (min, max, step) in [(0, 10, 1), (10, 10, 1), (20, 10, 1), (10, 20, 0)] {
        let d = DetectionConfig {
            min_radius: min,
            max_radius: max,
            radius_step: step,
            ..DetectionConfig::default()
        };
        let err = d.validate().unwrap_err();
        assert!(
            matches!(err, CircleError::InvalidRadiusRange { .. }),
            "({min}, {max}, {step}): {err}"
        );
    }
}

#[test]
fn test_threshold_factor_bounds() {
    for factor in [0.0f32, -0.1, 1.5, f32::NAN] {
        let d = DetectionConfig {
            hough_threshold_factor: factor,
            ..DetectionConfig::default()
        };
        assert!(
            matches!(d.validate(), Err(CircleError::InvalidConfig(_))),
            "factor {factor} accepted"
        );
    }
    let d = DetectionConfig {
        hough_threshold_factor: 1.0,
        ..DetectionConfig::default()
    };
    assert!(d.validate().is_ok());
}

#[test]
fn test_zero_max_circles_rejected() {
    let d = DetectionConfig {
        max_circles: Some(0),
        ..DetectionConfig::default()
    };
    assert!(matches!(d.validate(), Err(CircleError::InvalidConfig(_))));
}

#[test]
fn test_jpeg_quality_bounds() {
    assert!(RenderConfig { jpeg_quality: 0 }.validate().is_err());
    assert!(RenderConfig { jpeg_quality: 101 }.validate().is_err());
    assert!(RenderConfig { jpeg_quality: 1 }.validate().is_ok());
    assert!(RenderConfig { jpeg_quality: 100 }.validate().is_ok());
}
