//! Neutral Hald → `.cube` scenarios at the default level.

use haldcube_color::{
    convert_to_text, generate_neutral, hald_to_cube, lattice_coords, HEADER_LINES,
};
use haldcube_core::{HaldError, HaldLevel, PixelBuffer};

// ── Helpers ────────────────────────────────────────────────────

fn parse_byte(field: &str) -> u8 {
    let v: f64 = field.parse().expect("numeric field");
    (v * 255.0).round() as u8
}

fn is_six_decimal(field: &str) -> bool {
    let b = field.as_bytes();
    b.len() == 8
        && b[0].is_ascii_digit()
        && b[1] == b'.'
        && b[2..].iter().all(u8::is_ascii_digit)
}

// ── Generator ──────────────────────────────────────────────────

#[test]
fn generator_is_deterministic() {
    let a = generate_neutral(HaldLevel::DEFAULT);
    let b = generate_neutral(HaldLevel::DEFAULT);
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn row_major_scan_equals_generation_order() {
    let level = HaldLevel::DEFAULT;
    let hald = generate_neutral(level);
    let side = level.image_side();

    let mut flat = 0usize;
    for y in 0..side {
        for x in 0..side {
            let (r, g, b) = lattice_coords(level, flat);
            let px = hald.pixel(x, y).unwrap();
            assert_eq!(
                [px[0], px[1], px[2]],
                [
                    level.channel_byte(r),
                    level.channel_byte(g),
                    level.channel_byte(b)
                ],
                "pixel ({}, {})",
                x,
                y
            );
            flat += 1;
        }
    }
    assert_eq!(flat, 64 * 64 * 64);
}

// ── Converter ──────────────────────────────────────────────────

#[test]
fn neutral_round_trips_through_cube_text() {
    let level = HaldLevel::DEFAULT;
    let hald = generate_neutral(level);
    let text = convert_to_text(&hald, level, "Neutral").unwrap();

    let data: Vec<&str> = text.lines().skip(HEADER_LINES).collect();
    assert_eq!(data.len(), 262_144);

    for (i, (line, px)) in data.iter().zip(hald.pixels()).enumerate() {
        let fields: Vec<&str> = line.split(' ').collect();
        assert_eq!(fields.len(), 3, "line {}", i);
        assert!(fields.iter().all(|f| is_six_decimal(f)), "line {}: {}", i, line);
        let bytes = [
            parse_byte(fields[0]),
            parse_byte(fields[1]),
            parse_byte(fields[2]),
        ];
        assert_eq!(bytes, [px[0], px[1], px[2]], "line {}", i);
    }
}

#[test]
fn neutral_cube_is_identity() {
    let level = HaldLevel::DEFAULT;
    let cube = hald_to_cube(&generate_neutral(level), level, "Neutral").unwrap();
    assert_eq!(cube.size, 64);
    assert!(cube.is_identity());
    assert_eq!(cube.to_bytes_rgb()[0], [0, 0, 0]);
    assert_eq!(cube.to_bytes_rgb()[262_143], [255, 255, 255]);
}

#[test]
fn header_lines_are_exact() {
    let hald = generate_neutral(HaldLevel::DEFAULT);
    let text = convert_to_text(&hald, HaldLevel::DEFAULT, "My Look").unwrap();
    let lines: Vec<&str> = text.lines().take(HEADER_LINES).collect();

    assert_eq!(lines[3], "TITLE \"My Look\"");
    assert!(lines.contains(&"LUT_3D_SIZE 64"));
    assert!(lines.contains(&"DOMAIN_MIN 0.0 0.0 0.0"));
    assert!(lines.contains(&"DOMAIN_MAX 1.0 1.0 1.0"));
    assert!(lines.iter().take(3).all(|l| l.starts_with('#')));
}

#[test]
fn black_image_converts_to_zero_rows() {
    let hald = PixelBuffer::filled(512, 512, [0, 0, 0, 255]);
    let text = convert_to_text(&hald, HaldLevel::DEFAULT, "Black").unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), HEADER_LINES + 262_144);
    assert!(lines[HEADER_LINES..]
        .iter()
        .all(|l| *l == "0.000000 0.000000 0.000000"));
}

#[test]
fn undersized_image_is_rejected() {
    let hald = PixelBuffer::filled(256, 256, [10, 10, 10, 255]);
    let err = convert_to_text(&hald, HaldLevel::DEFAULT, "Small").unwrap_err();
    assert!(matches!(err, HaldError::InvalidDimensions { .. }));
}
