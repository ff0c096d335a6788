//! Integration tests for the health check system

use std::path::PathBuf;

use image::{Rgb, RgbImage};
use triptych::app::DecoderConfig;
use triptych::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};
use triptych::scene::Slot;

#[test]
fn test_config_check() {
    let check = ConfigCheck::new();
    let result = check.check();

    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();

    assert!(
        result.status.is_ok(),
        "Build info check failed: {}",
        result.message
    );
    assert!(!result.details.is_empty());
}

#[test]
fn test_scene_layout_check() {
    let result = SceneLayoutCheck::new().check();
    assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
}

#[test]
fn test_assets_check_warns_on_missing_image() {
    let dir = tempfile::tempdir().unwrap();
    let top = dir.path().join("view1.jpeg");
    let bottom = dir.path().join("view2.jpeg");
    RgbImage::from_pixel(16, 8, Rgb([10, 20, 30])).save(&top).unwrap();
    RgbImage::from_pixel(16, 8, Rgb([30, 20, 10])).save(&bottom).unwrap();

    let check = AssetsCheck::new(
        vec![
            (Slot::Top, top),
            (Slot::Bottom, bottom),
            (Slot::Background, dir.path().join("view3.jpeg")),
        ],
        DecoderConfig::default(),
    );
    let result = check.check();

    assert_eq!(result.status, CheckStatus::Warn);
    assert_eq!(result.message, "1 of 3 images unavailable");
    assert!(result.details.iter().any(|line| line.contains("view3.jpeg")));
}

#[test]
fn test_assets_check_passes_when_all_decode() {
    let dir = tempfile::tempdir().unwrap();
    let images: Vec<(Slot, PathBuf)> = Slot::DRAW_ORDER
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let path = dir.path().join(format!("view{}.png", i));
            RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&path).unwrap();
            (*slot, path)
        })
        .collect();

    let result = AssetsCheck::new(images, DecoderConfig::default()).check();
    assert_eq!(result.status, CheckStatus::Pass, "{:?}", result.details);
}

#[test]
fn test_assets_check_fails_without_decoder_formats() {
    let check = AssetsCheck::new(Vec::new(), DecoderConfig { formats: Vec::new() });
    assert_eq!(check.check().status, CheckStatus::Fail);
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(SceneLayoutCheck::new())
        .run();

    assert_eq!(report.total(), 2, "Expected 2 checks in report");
    assert_eq!(
        report.passed() + report.warned() + report.failed(),
        report.total()
    );
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new().add_check(ConfigCheck::new()).run();

    if report.failed() > 0 {
        assert_eq!(report.exit_code(), 1);
    } else if report.warned() > 0 {
        assert_eq!(report.exit_code(), 2);
    } else {
        assert_eq!(report.exit_code(), 0);
    }
}

#[test]
fn test_format_report_names_every_check() {
    let report = HealthCheckRunner::new()
        .add_check(SceneLayoutCheck::new())
        .add_check(BuildInfoCheck::new())
        .run();

    let text = health::format_report(&report);
    assert!(text.contains("Scene Layout"));
    assert!(text.contains("Build Info"));
}
