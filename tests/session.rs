use scatterview::{
    channel_view, ConfigError, Dataset, Gesture, Point, RenderError, RenderState, ScatterConfig,
    ScatterError, ScatterSession, ViewEvent, ViewTransform, ZoomBounds,
};

fn outcomes() -> Dataset {
    Dataset::new(vec![
        Point::new(0.0, 0.0, "unresolved"),
        Point::new(10.0, 10.0, "credit_collection"),
        Point::new(2.5, 7.5, "paid_full"),
        Point::new(8.0, 1.0, "dismissed"),
        Point::new(5.0, 5.0, "paid_full"),
    ])
}

fn session(dataset: Dataset) -> ScatterSession {
    ScatterSession::new(dataset, &ScatterConfig::default(), 400, 300).unwrap()
}

fn device_of(s: &ScatterSession, index: usize) -> (f64, f64) {
    s.layout().position_of(index).unwrap()
}

#[test]
fn new_session_draws_first_frame_at_identity() {
    let s = session(outcomes());
    assert_eq!(s.state(), RenderState::Idle);
    assert_eq!(s.frame_serial(), 1);
    assert_eq!(s.transform(), ViewTransform::IDENTITY);
    assert_eq!(s.viewport(), (400, 300));
    assert_eq!(s.color_table().len(), 4);
}

#[test]
fn each_handled_gesture_renders_once() {
    let mut s = session(outcomes());
    for i in 0..3 {
        let update = s
            .handle(ViewEvent::Gesture(Gesture::Pan { dx: 5.0, dy: 0.0 }))
            .unwrap();
        assert!(update.rendered);
        assert_eq!(update.transforms_applied, 1);
        assert_eq!(s.frame_serial(), 2 + i);
        assert_eq!(s.state(), RenderState::Idle);
    }
    assert_eq!(s.transform().translate_x, 15.0);
}

#[test]
fn hover_does_not_render() {
    let mut s = session(outcomes());
    let (x, y) = device_of(&s, 2);
    let update = s.handle(ViewEvent::PointerMove { x, y }).unwrap();
    assert!(!update.rendered);
    assert!(update.hover_changed);
    assert_eq!(s.frame_serial(), 1);
    assert_eq!(s.hovered().unwrap().category, "paid_full");

    let update = s.handle(ViewEvent::PointerLeave).unwrap();
    assert!(update.hover_changed);
    assert!(s.hovered().is_none());
}

#[test]
fn queued_gestures_fold_into_one_frame() {
    let mut s = session(outcomes());
    let bounds = ZoomBounds::default();
    let gestures = [
        Gesture::Pan { dx: 10.0, dy: -4.0 },
        Gesture::Zoom {
            factor: 2.0,
            anchor_x: 100.0,
            anchor_y: 80.0,
        },
        Gesture::Pan { dx: -3.0, dy: 7.0 },
    ];
    let mut expected = ViewTransform::IDENTITY;
    for g in gestures {
        expected = expected.apply_gesture(g, &bounds);
        s.submit(ViewEvent::Gesture(g));
    }

    let update = s.process_pending().unwrap();
    assert_eq!(update.events, 3);
    assert_eq!(update.transforms_applied, 3);
    assert!(update.rendered);
    assert_eq!(s.frame_serial(), 2);
    assert_eq!(s.transform(), expected);

    // nothing queued: nothing to draw
    let update = s.process_pending().unwrap();
    assert!(!update.rendered);
    assert_eq!(s.frame_serial(), 2);
}

#[test]
fn hover_follows_the_view_under_a_still_pointer() {
    let mut s = session(outcomes());
    let (x, y) = device_of(&s, 3);
    s.handle(ViewEvent::PointerMove { x, y }).unwrap();
    assert_eq!(s.hovered_hit().unwrap().index, 3);

    // a small pan keeps the point under the pointer, at its new position
    let update = s
        .handle(ViewEvent::Gesture(Gesture::Pan { dx: 2.0, dy: 0.0 }))
        .unwrap();
    assert!(!update.hover_changed);
    let hit = s.hovered_hit().unwrap();
    assert_eq!(hit.index, 3);
    assert_eq!((hit.screen_x, hit.screen_y), (x + 2.0, y));
    assert_eq!(hit.distance_px, 2.0);

    // a large one moves it away
    let update = s
        .handle(ViewEvent::Gesture(Gesture::Pan { dx: 100.0, dy: 0.0 }))
        .unwrap();
    assert!(update.hover_changed);
    assert!(s.hovered().is_none());
}

#[test]
fn queued_hover_matches_the_drawn_transform() {
    let mut s = session(outcomes());
    let (x, y) = device_of(&s, 3);
    s.submit(ViewEvent::PointerMove { x: x + 100.0, y });
    s.submit(ViewEvent::Gesture(Gesture::Pan { dx: 100.0, dy: 0.0 }));
    let update = s.process_pending().unwrap();
    assert!(update.rendered);
    assert_eq!(s.hovered().unwrap().category, "dismissed");
    assert_eq!(s.hovered_hit().unwrap().screen_x, x + 100.0);

    // after the pointer leaves, gestures no longer hover anything
    s.handle(ViewEvent::PointerLeave).unwrap();
    s.handle(ViewEvent::Gesture(Gesture::Pan { dx: -100.0, dy: 0.0 }))
        .unwrap();
    assert!(s.hovered().is_none());
}

#[test]
fn handle_applies_queued_events_first() {
    let mut s = session(outcomes());
    s.submit(ViewEvent::Gesture(Gesture::Set(ViewTransform::new(
        10.0, 20.0, 2.0,
    ))));
    let update = s
        .handle(ViewEvent::Gesture(Gesture::Pan { dx: 5.0, dy: 5.0 }))
        .unwrap();
    assert_eq!(update.events, 2);
    assert_eq!(update.transforms_applied, 2);
    assert!(update.rendered);
    assert_eq!(s.frame_serial(), 2);
    assert_eq!(s.transform(), ViewTransform::new(15.0, 25.0, 2.0));
    assert_eq!(s.state(), RenderState::Idle);
}

#[test]
fn initial_view_respects_zoom_bounds() {
    for bounds in [
        ZoomBounds { min: 2.0, max: 10.0 },
        ZoomBounds { min: 0.1, max: 0.5 },
    ] {
        let mut cfg = ScatterConfig::default();
        cfg.zoom = bounds;
        let mut s = ScatterSession::new(outcomes(), &cfg, 400, 300).unwrap();
        let initial = s.transform();
        assert!(initial.scale >= bounds.min && initial.scale <= bounds.max);
        assert_eq!((initial.translate_x, initial.translate_y), (0.0, 0.0));

        s.handle(ViewEvent::Gesture(Gesture::Reset)).unwrap();
        assert_eq!(s.transform(), initial);
    }
}

#[test]
fn zoomed_point_hit_tests_at_screen_position() {
    let mut s = session(outcomes());
    s.handle(ViewEvent::Gesture(Gesture::Set(ViewTransform::new(
        50.0, 50.0, 2.0,
    ))))
    .unwrap();
    let (dx, dy) = device_of(&s, 1);
    let (sx, sy) = (dx * 2.0 + 50.0, dy * 2.0 + 50.0);
    assert_eq!(s.find_nearest(sx, sy).unwrap().category, "credit_collection");
    assert_eq!(s.data_to_screen(10.0, 10.0), (sx, sy));
}

#[test]
fn sink_events_are_drained_in_order() {
    let mut s = session(outcomes());
    let (sink, rx) = channel_view();
    s.attach(rx);
    sink.pan(20.0, 0.0).unwrap();
    sink.zoom(4.0, 0.0, 0.0).unwrap();
    sink.set_transform(ViewTransform::new(1.0, 1.0, 3.0)).unwrap();

    let update = s.process_pending().unwrap();
    assert_eq!(update.events, 3);
    assert!(update.rendered);
    assert_eq!(s.transform(), ViewTransform::new(1.0, 1.0, 3.0));

    sink.reset().unwrap();
    s.process_pending().unwrap();
    assert_eq!(s.transform(), ViewTransform::IDENTITY);
}

#[test]
fn resize_relayouts_and_renders() {
    let mut s = session(outcomes());
    let before = device_of(&s, 1);
    let update = s
        .handle(ViewEvent::Resize {
            width: 800,
            height: 600,
        })
        .unwrap();
    assert!(update.rendered);
    assert_eq!(s.viewport(), (800, 600));
    assert_eq!(s.frame().width(), 800);
    let after = device_of(&s, 1);
    assert!((after.0 - before.0 * 2.0).abs() < 1e-9);
    assert!((after.1 - before.1 * 2.0).abs() < 1e-9);

    // same size again, or a zero-area size: nothing to do
    for (w, h) in [(800, 600), (0, 600)] {
        let update = s
            .handle(ViewEvent::Resize {
                width: w,
                height: h,
            })
            .unwrap();
        assert!(!update.rendered);
    }
    assert_eq!(s.viewport(), (800, 600));
}

#[test]
fn empty_dataset_renders_nothing_and_never_hits() {
    let mut s = session(Dataset::default());
    assert!(s.layout().is_empty());
    let update = s
        .handle(ViewEvent::Gesture(Gesture::Zoom {
            factor: 3.0,
            anchor_x: 10.0,
            anchor_y: 10.0,
        }))
        .unwrap();
    assert_eq!(update.stats.unwrap().drawn, 0);
    for (x, y) in [(0.0, 0.0), (200.0, 150.0), (399.0, 299.0)] {
        s.handle(ViewEvent::PointerMove { x, y }).unwrap();
        assert!(s.hovered().is_none());
    }
}

#[test]
fn nan_record_is_kept_but_not_projected() {
    let mut points = outcomes().points().to_vec();
    points.insert(1, Point::new(f64::NAN, 3.0, "unresolved"));
    let s = session(Dataset::new(points));
    assert_eq!(s.dataset().len(), 6);
    assert_eq!(s.layout().len(), 5);
    assert_eq!(s.layout().excluded, vec![1]);

    let clean = session(outcomes());
    assert_eq!(s.layout().x_scale, clean.layout().x_scale);
    assert_eq!(s.layout().y_scale, clean.layout().y_scale);
}

#[test]
fn setup_errors_are_terminal() {
    let err = ScatterSession::new(outcomes(), &ScatterConfig::default(), 0, 300)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ScatterError::Render(RenderError::RendererUnavailable { .. })
    ));

    let mut cfg = ScatterConfig::default();
    cfg.points.opacity = 1.5;
    let err = ScatterSession::new(outcomes(), &cfg, 400, 300).err().unwrap();
    assert!(matches!(
        err,
        ScatterError::Render(RenderError::ProgramCompile(_))
    ));

    let mut cfg = ScatterConfig::default();
    cfg.zoom = ZoomBounds { min: 10.0, max: 1.0 };
    let err = ScatterSession::new(outcomes(), &cfg, 400, 300).err().unwrap();
    assert!(matches!(err, ScatterError::Config(ConfigError::Invalid(_))));
}

#[test]
fn visible_bounds_follow_the_transform() {
    let mut s = session(outcomes());
    let (x0, x1, y0, y1) = s.visible_data_bounds();
    assert!(x0 < 0.0 && x1 > 10.0 && y0 < 0.0 && y1 > 10.0);

    s.handle(ViewEvent::Gesture(Gesture::Zoom {
        factor: 2.0,
        anchor_x: 200.0,
        anchor_y: 150.0,
    }))
    .unwrap();
    let (z0, z1, w0, w1) = s.visible_data_bounds();
    assert!(((z1 - z0) - (x1 - x0) / 2.0).abs() < 1e-9);
    assert!(((w1 - w0) - (y1 - y0) / 2.0).abs() < 1e-9);
}
