use super::*;

#[test]
fn test_from_drag_forward() {
    let area = CaptureArea::from_drag(Point::new(10.0, 20.0), Point::new(110.0, 70.0), 1.0);
    assert_eq!(area.x, 10.0);
    assert_eq!(area.y, 20.0);
    assert_eq!(area.width, 100.0);
    assert_eq!(area.height, 50.0);
}

#[test]
fn test_from_drag_normalizes_reverse_direction() {
    let area = CaptureArea::from_drag(Point::new(100.0, 100.0), Point::new(10.0, 10.0), 1.0);
    assert_eq!(area.x, 10.0);
    assert_eq!(area.y, 10.0);
    assert_eq!(area.width, 90.0);
    assert_eq!(area.height, 90.0);
}

#[test]
fn test_from_drag_mixed_direction() {
    let area = CaptureArea::from_drag(Point::new(50.0, 10.0), Point::new(20.0, 60.0), 1.0);
    assert_eq!(area.x, 20.0);
    assert_eq!(area.y, 10.0);
    assert_eq!(area.width, 30.0);
    assert_eq!(area.height, 50.0);
}

#[test]
fn test_to_device_pixels_scales_by_ratio() {
    let area = CaptureArea {
        x: 10.0,
        y: 20.0,
        width: 30.0,
        height: 40.0,
        device_pixel_ratio: 2.0,
    };
    let rect = area.to_device_pixels();
    assert_eq!(rect.x, 20);
    assert_eq!(rect.y, 40);
    assert_eq!(rect.width, 60);
    assert_eq!(rect.height, 80);
}

#[test]
fn test_to_device_pixels_treats_invalid_ratio_as_one() {
    let area = CaptureArea {
        x: 5.0,
        y: 5.0,
        width: 10.0,
        height: 10.0,
        device_pixel_ratio: 0.0,
    };
    let rect = area.to_device_pixels();
    assert_eq!(rect.width, 10);
    assert_eq!(rect.height, 10);
}

#[test]
fn test_clamped_to_fits_within_image() {
    let rect = DeviceRect {
        x: 90,
        y: 90,
        width: 50,
        height: 50,
    };
    let clamped = rect.clamped_to(100, 100).unwrap();
    assert_eq!(clamped.width, 10);
    assert_eq!(clamped.height, 10);
}

#[test]
fn test_clamped_to_rejects_out_of_bounds_origin() {
    let rect = DeviceRect {
        x: 200,
        y: 0,
        width: 10,
        height: 10,
    };
    assert!(rect.clamped_to(100, 100).is_none());
}

#[test]
fn test_clamped_to_rejects_empty_result() {
    let rect = DeviceRect {
        x: 10,
        y: 10,
        width: 0,
        height: 5,
    };
    assert!(rect.clamped_to(100, 100).is_none());
}

#[test]
fn test_capture_area_serde_camel_case() {
    let area = CaptureArea {
        x: 1.0,
        y: 2.0,
        width: 3.0,
        height: 4.0,
        device_pixel_ratio: 1.5,
    };
    let json = serde_json::to_value(&area).unwrap();
    assert_eq!(json["devicePixelRatio"], 1.5);
    let parsed: CaptureArea = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, area);
}
