use super::*;

#[test]
fn countdown_is_strictly_decreasing_and_ends_at_zero() {
    let ticks: Vec<Tick> = countdown(3).collect();
    assert_eq!(ticks, vec![Tick(3), Tick(2), Tick(1), Tick(0)]);

    let ticks: Vec<Tick> = countdown(0).collect();
    assert_eq!(ticks, vec![Tick(0)]);
}

#[test]
fn canvas_center_and_ring_radius_follow_integer_rules() {
    let c = Canvas {
        width: 500,
        height: 500,
    };
    assert_eq!(c.center(), PixelPoint::new(250, 250));
    assert_eq!(c.ring_radius(), 200.0);

    let c = Canvas {
        width: 451,
        height: 550,
    };
    assert_eq!(c.center(), PixelPoint::new(225, 275));
    // 451 / 2.5 = 180.4
    assert_eq!(c.ring_radius(), 180.0);
}

#[test]
fn canvas_u16_bounds() {
    assert_eq!(
        Canvas {
            width: 65535,
            height: 1
        }
        .as_u16(),
        Some((65535, 1))
    );
    assert_eq!(
        Canvas {
            width: 65536,
            height: 1
        }
        .as_u16(),
        None
    );
}

#[test]
fn premul_round_trip_is_close() {
    let c = Rgba8::new(200, 100, 50, 128);
    let p = c.premultiplied();
    assert_eq!(p.a, 128);
    let back = p.to_straight();
    assert!((i32::from(back.r) - 200).abs() <= 2);
    assert!((i32::from(back.g) - 100).abs() <= 2);
    assert!((i32::from(back.b) - 50).abs() <= 2);

    assert_eq!(
        Rgba8::TRANSPARENT_WHITE.premultiplied(),
        Rgba8Premul::transparent()
    );
    assert_eq!(Rgba8::BLACK.premultiplied().to_straight(), Rgba8::BLACK);
}
