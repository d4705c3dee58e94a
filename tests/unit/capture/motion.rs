use super::*;

#[test]
fn progress_spans_unit_interval() {
    assert_eq!(progress(0, 1), 0.0);
    assert_eq!(progress(0, 5), 0.0);
    assert_eq!(progress(2, 5), 0.5);
    assert_eq!(progress(4, 5), 1.0);
}

#[test]
fn ease_to_stop_ends_exactly_at_rest() {
    for d in [0.0, 1.0, 10.0, 123.456, 1e6] {
        assert_eq!(MotionStyle::EaseToStop.offset(1.0, d), 0.0);
        assert_eq!(MotionStyle::EaseToStop.offset(0.0, d), -d);
    }
}

#[test]
fn pass_through_crosses_focal_point_at_half() {
    for d in [0.0, 1.0, 10.0, 123.456, 1e6] {
        assert_eq!(MotionStyle::PassThrough.offset(0.5, d), 0.0);
        assert_eq!(MotionStyle::PassThrough.offset(0.0, d), -d);
        assert_eq!(MotionStyle::PassThrough.offset(1.0, d), d);
    }
}

#[test]
fn ease_to_stop_three_frames() {
    let cam = Camera::default();
    let path = plan_path(
        3,
        10.0,
        MotionStyle::EaseToStop,
        CaptureMode::SubjectFlyby,
        &cam,
        &Transform::default(),
    );
    let offsets: Vec<f64> = path.iter().map(|s| s.subject_offset).collect();
    assert_eq!(offsets[0], -10.0);
    assert!((offsets[1] - (-10.0 + 10.0 * std::f64::consts::FRAC_1_SQRT_2)).abs() < 1e-12);
    assert!((offsets[1] + 2.93).abs() < 0.01);
    assert_eq!(offsets[2], 0.0);
}

#[test]
fn flyby_keeps_camera_fixed_and_moves_along_fixed_axis() {
    let cam = Camera::looking_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 1.0, 0.0));
    let subject = Transform {
        position: Vec3::new(5.0, 0.0, 0.0),
        yaw_deg: 90.0,
        pitch_deg: 0.0,
    };
    let path = plan_path(
        4,
        6.0,
        MotionStyle::PassThrough,
        CaptureMode::SubjectFlyby,
        &cam,
        &subject,
    );
    assert_eq!(path.len(), 4);
    for s in &path {
        assert_eq!(s.camera_position, cam.position);
        assert_eq!(s.camera_target, cam.target);
        let delta = s.subject_position - subject.position;
        assert!((delta.x - s.subject_offset).abs() < 1e-9);
        assert!(delta.y.abs() < 1e-9 && delta.z.abs() < 1e-9);
    }
    assert_eq!(path[0].subject_offset, -6.0);
    assert_eq!(path[3].subject_offset, 6.0);
}

#[test]
fn single_frame_samples_start_of_path() {
    let path = plan_path(
        1,
        10.0,
        MotionStyle::PassThrough,
        CaptureMode::SubjectFlyby,
        &Camera::default(),
        &Transform::default(),
    );
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].t, 0.0);
    assert_eq!(path[0].subject_offset, -10.0);
}

#[test]
fn dolly_moves_camera_only() {
    let subject = Transform {
        position: Vec3::new(0.5, 0.5, 0.5),
        ..Transform::default()
    };
    let path = plan_path(
        5,
        99.0,
        MotionStyle::EaseToStop,
        CaptureMode::CameraDolly {
            start_distance: 100.0,
            end_distance: 20.0,
        },
        &Camera::default(),
        &subject,
    );
    let zs: Vec<f64> = path.iter().map(|s| s.camera_position.z).collect();
    assert_eq!(zs, vec![100.0, 80.0, 60.0, 40.0, 20.0]);
    assert!(path.iter().all(|s| s.subject_offset == 0.0));
    assert!(path.iter().all(|s| s.subject_position == subject.position));
    assert!(path.iter().all(|s| s.camera_target == Vec3::zeros()));
}
