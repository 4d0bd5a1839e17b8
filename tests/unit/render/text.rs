use super::*;

#[test]
fn builtin_font_loads_and_garbage_is_rejected() {
    let font = NumeralFont::builtin().unwrap();
    assert_eq!(font.bytes().len(), BUILTIN_FONT.len());

    let err = NumeralFont::from_bytes(b"definitely not a font".to_vec())
        .err()
        .unwrap();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn missing_font_file_is_reported_with_its_path() {
    let err = NumeralFont::load(&FontSource::File("target/no-such-font.ttf".into()))
        .err()
        .unwrap();
    assert!(format!("{err:#}").contains("no-such-font.ttf"));
}

#[test]
fn layout_widens_with_more_digits() {
    let font = NumeralFont::builtin().unwrap();
    let mut engine = TextLayoutEngine::new();
    let brush = TextBrushRgba8::from(Rgba8::BLACK);

    let one = engine.layout_line("5", &font, 120.0, brush).unwrap();
    let three = engine.layout_line("123", &font, 120.0, brush).unwrap();
    assert!(one.width() > 0.0);
    assert!(three.width() > 2.0 * one.width());
    assert!(engine.layout_line("5", &font, 0.0, brush).is_err());
}

#[test]
fn ink_scan_finds_tight_box() {
    // 4x3 image with two painted pixels at (1,0) and (2,2).
    let mut px = vec![0u8; 4 * 3 * 4];
    px[(1) * 4 + 3] = 255;
    px[(2 * 4 + 2) * 4 + 3] = 10;
    let ink = InkBounds::scan(&px, 4, PixelPoint::new(1, 1)).unwrap();
    assert_eq!(
        ink,
        InkBounds {
            left: 0,
            top: -1,
            width: 2,
            height: 3,
        }
    );

    assert_eq!(InkBounds::scan(&[0u8; 16], 2, PixelPoint::new(0, 0)), None);
}

#[test]
fn centered_origin_uses_floor_division() {
    let canvas = Canvas {
        width: 500,
        height: 500,
    };
    let ink = InkBounds {
        left: 3,
        top: 20,
        width: 61,
        height: 87,
    };
    // (500-61) div 2 = 219, (500-87) div 2 = 206.
    assert_eq!(ink.centered_origin(canvas), PixelPoint::new(216, 186));

    // Ink wider than the canvas floors towards negative infinity.
    let wide = InkBounds {
        left: 0,
        top: 0,
        width: 11,
        height: 1,
    };
    let tiny = Canvas {
        width: 8,
        height: 1,
    };
    assert_eq!(wide.centered_origin(tiny), PixelPoint::new(-2, 0));
}
