use assert_cmd::prelude::*;
use image::{ImageBuffer, Rgb, RgbImage};
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn sample() -> RgbImage {
    ImageBuffer::from_fn(16, 10, |x, y| {
        Rgb([
            ((x * 13 + y * 7) % 256) as u8,
            ((x * y) % 256) as u8,
            (200 - x * 5) as u8,
        ])
    })
}

#[test]
fn shrinks_and_writes_the_display_products() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let energy = dir.path().join("energy.png");
    let seams = dir.path().join("seams.png");
    sample().save(&input).unwrap();

    Command::cargo_bin("seamresize")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["--width", "12", "--height", "8"])
        .arg("--energy")
        .arg(&energy)
        .arg("--seams")
        .arg(&seams)
        .assert()
        .success();

    let result = image::open(&output).unwrap().to_rgb();
    assert_eq!(result.dimensions(), (12, 8));
    assert!(energy.exists());
    assert!(seams.exists());
}

#[test]
fn grows_the_width() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    sample().save(&input).unwrap();

    Command::cargo_bin("seamresize")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .args(&["-w", "20"])
        .assert()
        .success();

    let result = image::open(&output).unwrap().to_rgb();
    assert_eq!(result.dimensions(), (20, 10));
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("seamresize")
        .unwrap()
        .arg(dir.path().join("nope.png"))
        .arg(dir.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn zero_target_is_refused() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    sample().save(&input).unwrap();

    Command::cargo_bin("seamresize")
        .unwrap()
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .args(&["--height", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot resize to 16x0"));
}

#[test]
fn bad_number_is_refused() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.png");
    sample().save(&input).unwrap();

    Command::cargo_bin("seamresize")
        .unwrap()
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .args(&["--width", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width expects a number"));
}
