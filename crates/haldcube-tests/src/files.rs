//! File-level scenarios: image on disk → `.cube` on disk.

use haldcube_color::{generate_neutral, hald_to_cube, CubeFile};
use haldcube_core::{HaldError, HaldLevel, PixelBuffer};
use haldcube_media::{load_hald, save_cube, save_hald, HaldImageFormat};

#[test]
fn png_hald_to_cube_file() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let hald_path = tmp.path().join("NeutralHald_64.png");
    let cube_path = tmp.path().join("neutral.cube");
    let level = HaldLevel::DEFAULT;

    save_hald(&generate_neutral(level), &hald_path, HaldImageFormat::Png).unwrap();
    let hald = load_hald(&hald_path, level).unwrap();
    let cube = hald_to_cube(&hald, level, "Neutral").unwrap();
    save_cube(&cube, &cube_path).unwrap();

    let text = std::fs::read_to_string(&cube_path).unwrap();
    let parsed = CubeFile::parse(&text).unwrap();
    assert_eq!(parsed.title, "Neutral");
    assert_eq!(parsed.size, 64);
    assert!(parsed.is_identity());
}

#[test]
fn jpeg_hald_reloads_with_bounded_drift() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let path = tmp.path().join("neutral.jpg");
    let level = HaldLevel::new(4).unwrap();
    let neutral = generate_neutral(level);

    save_hald(&neutral, &path, HaldImageFormat::Jpeg).unwrap();
    let loaded = load_hald(&path, level).unwrap();

    assert_eq!(loaded.dimensions(), neutral.dimensions());

    // Lossy, so only the overall drift is bounded.
    let total: u64 = neutral
        .as_bytes()
        .iter()
        .zip(loaded.as_bytes())
        .map(|(a, b)| u64::from(a.abs_diff(*b)))
        .sum();
    let mean = total as f64 / neutral.as_bytes().len() as f64;
    assert!(mean < 24.0, "JPEG drifted by {:.2} on average", mean);
}

#[test]
fn small_image_file_is_rejected() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let path = tmp.path().join("small.png");
    save_hald(&PixelBuffer::new(256, 256), &path, HaldImageFormat::Png).unwrap();

    let err = load_hald(&path, HaldLevel::DEFAULT).unwrap_err();
    assert!(matches!(
        err,
        HaldError::InvalidDimensions {
            expected_w: 512,
            expected_h: 512,
            got_w: 256,
            got_h: 256
        }
    ));
}
