use super::*;

const C: PixelPoint = PixelPoint { x: 250, y: 250 };

#[test]
fn index_zero_is_at_the_top() {
    assert_eq!(dot_position(0, 12, C, 200.0), PixelPoint::new(250, 50));
    assert_eq!(dot_position(0, 1, C, 200.0), PixelPoint::new(250, 50));
}

#[test]
fn quarter_steps_follow_the_angle_formula() {
    // π/2 + π/2 = π: left of center.
    assert_eq!(dot_position(1, 4, C, 200.0), PixelPoint::new(50, 250));
    // 3π/2: bottom.
    assert_eq!(dot_position(2, 4, C, 200.0), PixelPoint::new(250, 450));
    // 2π: right.
    assert_eq!(dot_position(3, 4, C, 200.0), PixelPoint::new(450, 250));
}

#[test]
fn positions_round_to_nearest_pixel() {
    // angle = π/2 + 2π/8 = 3π/4 -> cos = -0.7071, sin = 0.7071; 100 * 0.7071 = 70.71 -> 71.
    assert_eq!(dot_position(1, 8, C, 100.0), PixelPoint::new(179, 179));
}

#[test]
fn zero_slots_falls_back_to_the_top() {
    assert_eq!(dot_position(3, 0, C, 10.0), PixelPoint::new(250, 240));
}

#[test]
fn ring_spacing_depends_on_slots_not_on_tick() {
    let ring = DotRing::for_canvas(
        Canvas {
            width: 500,
            height: 500,
        },
        30,
    );
    assert_eq!(ring.radius, 200.0);
    let all = (0..30).map(|i| ring.position(i)).collect::<Vec<_>>();
    let again = (0..10).map(|i| ring.position(i)).collect::<Vec<_>>();
    assert_eq!(&all[..10], again.as_slice());

    let mut unique = all.clone();
    unique.sort_by_key(|p| (p.x, p.y));
    unique.dedup();
    assert_eq!(unique.len(), 30);
}
