use super::*;

#[test]
fn distance_and_angle_between_contacts() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert_eq!(a.distance_to(b), 5.0);

    let right = Point::new(10.0, 0.0);
    assert_eq!(a.angle_to(right), 0.0);
    let down = Point::new(0.0, 10.0);
    assert!((a.angle_to(down) - 90.0).abs() < 1e-4);
}

#[test]
fn centroid_of_empty_set_is_origin() {
    assert_eq!(centroid(std::iter::empty()), Point::ZERO);
    let c = centroid([Point::new(0.0, 0.0), Point::new(10.0, 20.0)]);
    assert_eq!(c, Point::new(5.0, 10.0));
}

#[test]
fn normalize_degrees_wraps_into_half_open_range() {
    assert_eq!(normalize_degrees(190.0), -170.0);
    assert_eq!(normalize_degrees(-190.0), 170.0);
    assert_eq!(normalize_degrees(180.0), 180.0);
    assert_eq!(normalize_degrees(-180.0), 180.0);
    assert_eq!(normalize_degrees(720.0 + 45.0), 45.0);
}

#[test]
fn size_orientation() {
    let s = Size::new(1920.0, 1080.0);
    assert!(s.is_landscape());
    assert_eq!(s.min_dimension(), 1080.0);
}
