use headpanel::geometry::{self, Pos};
use headpanel::{
    BinauralPanel, EventController, EventFilter, EventKind, PanelConfig, TransmitMode,
    TransmitPayload,
};

const EPS: f32 = 1e-3;

fn panel_with_events() -> (BinauralPanel, EventController) {
    let events = EventController::new();
    let mut cfg = PanelConfig::with_size(300.0, 300.0);
    cfg.event_controller = Some(events.clone());
    (BinauralPanel::new(cfg), events)
}

fn pixel_distance(a: Pos, b: Pos) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

#[test]
fn pointer_down_at_center_creates_first_point() {
    let (mut panel, events) = panel_with_events();
    let rx = events.subscribe(EventFilter::only(EventKind::CHANGE));

    let center = panel.listener();
    assert!(panel.pointer_down(center));

    assert_eq!(panel.points().len(), 1);
    assert_eq!(panel.active_index(), Some(0));
    assert_eq!(panel.points()[0].label, "Point 1");
    match rx.try_recv().unwrap().change.unwrap() {
        TransmitPayload::Active { point_index, distance, .. } => {
            assert_eq!(point_index, 0);
            assert!(distance.abs() < EPS);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn add_point_reads_back_front_angle() {
    let (mut panel, _) = panel_with_events();
    let i = panel.add_point(2.0, 0.0, "S1", 0);
    let a = panel.point_angle(i).unwrap();
    assert!(a < EPS || a > 360.0 - EPS, "angle was {a}");
    assert!((panel.point_distance(i).unwrap() - 2.0).abs() < EPS);
    assert_eq!(panel.points()[i].label, "S1");
}

#[test]
fn add_point_round_trips_many_angles() {
    let (mut panel, _) = panel_with_events();
    for step in 0..12 {
        let angle = step as f32 * 30.0;
        let i = panel.add_point(1.5, angle, format!("S{step}"), 0);
        let back = panel.point_angle(i).unwrap();
        let diff = (back - angle).abs();
        assert!(diff < 1e-2 || (360.0 - diff) < 1e-2, "{angle} -> {back}");
    }
}

#[test]
fn drag_far_outside_lands_on_boundary() {
    let (mut panel, _) = panel_with_events();
    let center = panel.listener();
    panel.pointer_down(Pos::new(center.x + 20.0, center.y - 10.0));

    let far = Pos::new(center.x + 2000.0, center.y - 1000.0);
    let direction = geometry::angle(far, center, 0.0, false);
    panel.pointer_move(far);

    let p = panel.points()[0].pos();
    assert!((pixel_distance(p, center) - panel.boundary_radius()).abs() < EPS);
    assert!((geometry::angle(p, center, 0.0, false) - direction).abs() < 1e-2);

    // releasing does not move it again
    panel.pointer_up();
    assert!(pixel_distance(panel.points()[0].pos(), p) < EPS);
}

#[test]
fn points_never_leave_boundary_during_drag() {
    let (mut panel, _) = panel_with_events();
    let center = panel.listener();
    panel.pointer_down(center);
    for k in 0..36 {
        let theta = (k as f32 * 10.0).to_radians();
        let r = 50.0 + k as f32 * 20.0;
        panel.pointer_move(Pos::new(center.x + r * theta.cos(), center.y + r * theta.sin()));
        let p = panel.points()[0].pos();
        assert!(pixel_distance(p, center) <= panel.boundary_radius() + EPS);
    }
}

#[test]
fn active_only_without_selection_emits_nothing() {
    let (mut panel, events) = panel_with_events();
    panel.add_point(1.0, 0.0, "a", 0);
    panel.remove_point(7); // clears the selection
    panel.settings.new_points_generatable = false;

    let rx = events.subscribe(EventFilter::only(EventKind::CHANGE));
    panel.pointer_down(Pos::new(5.0, 5.0));
    panel.pointer_move(Pos::new(10.0, 10.0));
    panel.pointer_up();
    assert!(rx.try_recv().is_err());
}

#[test]
fn all_mode_sequences_track_collection() {
    let (mut panel, events) = panel_with_events();
    panel.settings.transmit_mode = TransmitMode::All;
    let rx = events.subscribe(EventFilter::only(EventKind::CHANGE));

    panel.add_point(1.0, 0.0, "a", 0);
    panel.add_point(2.0, 90.0, "b", 0);
    let b = panel.points()[1].pos();
    panel.pointer_down(Pos::new(40.0, 40.0));
    panel.pointer_up();
    panel.pointer_down(b);

    let last = rx.try_iter().last().unwrap();
    let Some(TransmitPayload::All { distances, angles }) = last.change else {
        panic!("expected all-mode payload");
    };
    assert_eq!(distances.len(), panel.points().len());
    assert_eq!(angles.len(), panel.points().len());
    for i in 0..panel.points().len() {
        assert!((distances[i] - panel.point_distance(i).unwrap()).abs() < EPS);
        assert!((angles[i] - panel.point_angle(i).unwrap()).abs() < EPS);
    }
    assert!((distances[1] - 2.0).abs() < EPS);
    assert!((angles[1] - 90.0).abs() < 1e-2);
}

#[test]
fn remove_all_leaves_no_residue() {
    let (mut panel, events) = panel_with_events();
    for k in 0..5 {
        panel.add_point(1.0, k as f32 * 60.0, format!("S{k}"), k);
    }
    assert_eq!(panel.visual_count(), 5);
    let rx = events.subscribe(EventFilter::only(EventKind::POINTS_CLEARED));

    panel.remove_all();

    assert!(panel.points().is_empty());
    assert_eq!(panel.active_index(), None);
    assert_eq!(panel.visual_count(), 0);
    assert!(rx.try_recv().is_ok());
}

#[test]
fn visuals_match_points_after_mixed_edits() {
    let (mut panel, _) = panel_with_events();
    panel.pointer_down(Pos::new(100.0, 100.0));
    panel.pointer_up();
    panel.add_point(1.0, 45.0, "b", 1);
    panel.pointer_down(Pos::new(200.0, 220.0));
    panel.pointer_move(Pos::new(210.0, 230.0));
    panel.pointer_up();
    panel.remove_point(0);
    panel.move_point(1, 0.5, 270.0);

    assert_eq!(panel.visual_count(), panel.points().len());
    for (p, v) in panel.points().iter().zip(panel.visuals().sources()) {
        assert_eq!(v.marker.center, p.pos());
        assert_eq!(v.label.text, p.label);
    }
}

#[test]
fn selecting_overlapping_points_picks_highest_index() {
    let (mut panel, _) = panel_with_events();
    panel.add_point(1.0, 0.0, "low", 0);
    panel.add_point(1.0, 0.0, "high", 0);
    panel.add_point(2.0, 180.0, "other", 0);
    let target = panel.points()[0].pos();
    panel.pointer_down(target);
    assert_eq!(panel.active_index(), Some(1));
}
