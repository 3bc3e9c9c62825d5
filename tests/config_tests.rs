// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use framecam::Config;
use framecam::backends::camera::types::DevicePosition;
use framecam::pipelines::photo::EncodingQuality;
use std::io::Write;

#[test]
fn config_defaults_are_sensible() {
    let config = Config::default();

    assert_eq!(config.jpeg_quality, EncodingQuality::High);
    assert_eq!(config.startup_camera, DevicePosition::Back);
    assert!(config.output_dir.is_none());
    assert!(config.overlay_path.is_none());
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let config = Config::load_from(std::path::Path::new("/nonexistent/config.json"));
    assert_eq!(config, Config::default());
}

#[test]
fn malformed_config_file_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let config = Config::load_from(file.path());
    assert_eq!(config, Config::default());
}

#[test]
fn partial_config_overrides_only_named_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"jpeg_quality": "Maximum", "startup_camera": "front"}}"#
    )
    .unwrap();

    let config = Config::load_from(file.path());
    assert_eq!(config.jpeg_quality, EncodingQuality::Maximum);
    assert_eq!(config.startup_camera, DevicePosition::Front);
    assert!(config.output_dir.is_none());
}
