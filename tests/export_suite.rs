#[allow(dead_code)]
#[path = "../src/bin/export_frame.rs"]
mod export_frame;

use clap::Parser;
use std::path::PathBuf;

#[test]
fn parse_args_defaults_are_stable() {
    let args = export_frame::Cli::try_parse_from(["export_frame"]).expect("parse should succeed");

    assert_eq!(args.out, PathBuf::from("vacuum.ppm"));
    assert_eq!(args.width, 640);
    assert_eq!(args.height, 360);
    assert_eq!(args.time, 0.0);
    assert_eq!(args.mass, 1.0);
    assert_eq!(args.stiffness, 0.0);
    assert_eq!(args.redshift, 0.0);
    assert_eq!(args.lensing_strength, 1.0);
    assert_eq!(args.grid_subdivisions, 128);
}

#[test]
fn parse_args_overrides_work() {
    let args = export_frame::Cli::try_parse_from([
        "export_frame",
        "--out",
        "frames/halo.ppm",
        "--width",
        "320",
        "--height",
        "180",
        "--time",
        "4.5",
        "--mass",
        "2",
        "--stiffness",
        "1",
        "--redshift",
        "5",
        "--lensing-strength",
        "1.5",
        "--grid-subdivisions",
        "48",
    ])
    .expect("parse should succeed");

    assert_eq!(args.out, PathBuf::from("frames/halo.ppm"));
    assert_eq!(args.width, 320);
    assert_eq!(args.height, 180);
    assert_eq!(args.time, 4.5);
    let p = args.params();
    assert_eq!(p.mass, 2.0);
    assert_eq!(p.stiffness, 1.0);
    assert_eq!(p.redshift, 5.0);
    assert_eq!(p.lensing_strength, 1.5);
    assert_eq!(args.grid_subdivisions, 48);
}

#[test]
fn parse_rejects_out_of_range_physics() {
    let res = export_frame::Cli::try_parse_from(["export_frame", "--stiffness", "1.5"]);
    assert!(res.is_err());
    let res = export_frame::Cli::try_parse_from(["export_frame", "--mass", "0.05"]);
    assert!(res.is_err());
}

#[test]
fn validate_rejects_degenerate_sizes() {
    let mut args = export_frame::Cli::try_parse_from(["export_frame"]).expect("parse");
    assert!(export_frame::validate_args(&args).is_ok());

    args.width = 0;
    let err = export_frame::validate_args(&args).expect_err("zero width");
    assert!(err.to_string().contains("--width"));

    args.width = 8;
    args.height = 0;
    let err = export_frame::validate_args(&args).expect_err("zero height");
    assert!(err.to_string().contains("--height"));

    args.height = 8;
    args.grid_subdivisions = 0;
    let err = export_frame::validate_args(&args).expect_err("zero grid");
    assert!(err.to_string().contains("--grid-subdivisions"));
}

#[test]
fn validate_rejects_bad_time() {
    let mut args = export_frame::Cli::try_parse_from(["export_frame"]).expect("parse");
    args.time = f32::NAN;
    let err = export_frame::validate_args(&args).expect_err("nan time");
    assert!(err.to_string().contains("--time"));
}

#[test]
fn ppm_header_and_body() {
    let rgba = [10u8, 20, 30, 255, 40, 50, 60, 0];
    let ppm = export_frame::encode_ppm(2, 1, &rgba).expect("encode");
    let header = b"P6\n2 1\n255\n";
    assert!(ppm.starts_with(header));
    assert_eq!(&ppm[header.len()..], &[10, 20, 30, 40, 50, 60]);
}

#[test]
fn ppm_rejects_short_buffers() {
    let err = export_frame::encode_ppm(4, 4, &[0u8; 12]).expect_err("too short");
    assert!(err.to_string().contains("too short"));
}

#[test]
fn render_produces_a_full_image() {
    let args = export_frame::Cli::try_parse_from([
        "export_frame",
        "--width",
        "40",
        "--height",
        "24",
        "--grid-subdivisions",
        "16",
        "--stiffness",
        "0.9",
    ])
    .expect("parse should succeed");

    let ppm = export_frame::render(&args).expect("render");
    let header = b"P6\n40 24\n255\n";
    assert!(ppm.starts_with(header));
    let body = &ppm[header.len()..];
    assert_eq!(body.len(), 40 * 24 * 3);
    assert!(body.iter().any(|&b| b > 0));
}

#[test]
fn render_is_deterministic_for_fixed_time() {
    let args = export_frame::Cli::try_parse_from([
        "export_frame",
        "--width",
        "32",
        "--height",
        "18",
        "--grid-subdivisions",
        "16",
        "--time",
        "2",
    ])
    .expect("parse should succeed");
    let a = export_frame::render(&args).expect("render");
    let b = export_frame::render(&args).expect("render");
    assert_eq!(a, b);
}
