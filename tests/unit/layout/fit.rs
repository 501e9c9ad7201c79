use super::*;

fn square(side: f64) -> Rect {
    Rect::new(10.0, 20.0, 10.0 + side, 20.0 + side)
}

#[test]
fn equal_aspect_fills_both_axes_exactly() {
    let target = Rect::new(150.0, 180.0, 650.0, 820.0);
    for (w, h) in [(500u32, 640u32), (1000, 1280), (25, 32)] {
        let f = fit_contain(w, h, target).unwrap();
        assert_eq!(f.width, target.width());
        assert_eq!(f.height, target.height());
        assert_eq!(f.x, target.x0);
        assert_eq!(f.y, target.y0);
    }
}

#[test]
fn tall_source_in_square_fills_height_and_centers_horizontally() {
    let f = fit_contain(300, 600, square(400.0)).unwrap();
    assert_eq!(f.height, 400.0);
    assert_eq!(f.width, 200.0);
    assert_eq!(f.x, 10.0 + 100.0);
    assert_eq!(f.y, 20.0);
}

#[test]
fn wide_source_in_square_fills_width_and_centers_vertically() {
    let f = fit_contain(1200, 600, square(400.0)).unwrap();
    assert_eq!(f.width, 400.0);
    assert_eq!(f.height, 200.0);
    assert_eq!(f.x, 10.0);
    assert_eq!(f.y, 20.0 + 100.0);
}

#[test]
fn fit_never_overflows_target() {
    let target = Rect::new(230.0, 240.0, 530.0, 560.0);
    for (w, h) in [(1u32, 1000u32), (1000, 1), (333, 777), (4032, 3024), (7, 7)] {
        let f = fit_contain(w, h, target).unwrap();
        assert!(f.x >= target.x0 - 1e-9 && f.y >= target.y0 - 1e-9);
        assert!(f.x + f.width <= target.x1 + 1e-9);
        assert!(f.y + f.height <= target.y1 + 1e-9);
        let ratio_in = f64::from(w) / f64::from(h);
        assert!((f.width / f.height - ratio_in).abs() / ratio_in < 1e-9);
    }
}

#[test]
fn pixel_size_rounds_and_clamps_to_one() {
    let f = fit_contain(1, 10_000, square(100.0)).unwrap();
    assert_eq!(f.pixel_size(), (1, 100));
}

#[test]
fn zero_sized_inputs_are_rejected() {
    assert!(fit_contain(0, 10, square(10.0)).is_err());
    assert!(fit_contain(10, 10, Rect::new(0.0, 0.0, 0.0, 10.0)).is_err());
}
