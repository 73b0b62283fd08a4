use std::time::{Duration, Instant};

use mapdemo::{
    controller::{GetUiState, Location, MapEventMessage, UiCommand, TRACKS_GROUP},
    Controller, DemoConfig,
};
use model::Positioned as _;
use overlay::{
    recording::{RecordingSurface, SurfaceCall},
    MapEvent, MapType,
};
use utility::geo::{Coordinate, Extent};

fn controller() -> (Controller<RecordingSurface>, Instant) {
    let start = Instant::now();
    let controller = Controller::new(DemoConfig::default(), RecordingSurface::new(), start).unwrap();
    (controller, start)
}

fn initialized() -> (Controller<RecordingSurface>, Instant) {
    let (mut controller, start) = controller();
    controller
        .on_map_event(MapEvent::Initialized, start)
        .unwrap();
    controller.surface_mut().take_calls();
    (controller, start)
}

fn toggle(controller: &mut Controller<RecordingSurface>, name: &str, checked: bool) {
    controller
        .on_ui(UiCommand::Toggle(name.into(), checked))
        .unwrap();
}

#[test]
fn controls_are_disabled_until_initialized() {
    let (mut controller, _) = controller();
    controller.surface_mut().take_calls();
    assert!(!controller.ui_state().controls_enabled);

    controller
        .on_ui(UiCommand::ShowLocation(Location::Castle))
        .unwrap();
    toggle(&mut controller, "harbour", true);
    assert!(controller.registry().surface().calls().is_empty());
    assert_eq!(controller.ui_state().toggles["harbour"], false);
}

#[test]
fn initialization_puts_static_overlays_on_the_map() {
    let (mut controller, start) = controller();
    controller
        .on_map_event(MapEvent::Initialized, start)
        .unwrap();

    let config = DemoConfig::default();
    let calls = controller.registry().surface().calls();
    assert!(calls.contains(&SurfaceCall::SetZoom(14.0)));
    assert!(calls.contains(&SurfaceCall::SetCenter(config.locations.harbour)));

    let overlays = controller.overlays().clone();
    let registry = controller.registry();
    for id in [
        overlays.harbour,
        overlays.castle,
        overlays.station,
        overlays.soccer,
        overlays.university,
        overlays.circle,
    ] {
        assert!(registry.is_added(id), "{} not added", id);
    }
    for id in &overlays.tracks {
        assert!(registry.is_added(*id));
    }
    assert!(!registry.is_added(overlays.click));
    // markers start hidden, the university label and the circle are shown
    assert!(!registry.is_visible(overlays.castle));
    assert!(registry.is_visible(overlays.university));
    assert!(registry.is_visible(overlays.circle));

    let ui = controller.ui_state();
    assert!(ui.controls_enabled);
    assert_eq!(ui.zoom, "zoom: 14");
}

#[test]
fn attached_labels_follow_their_markers() {
    let (mut controller, _) = initialized();
    toggle(&mut controller, "castle", true);
    let castle = controller.overlays().castle;
    let marker = controller.registry().marker(castle).unwrap();
    let label = marker.label().unwrap();
    assert_eq!(label.text(), "castle");
    assert_eq!(label.style_class(), Some("green-label"));
    assert!(label.is_visible());
    assert_eq!(label.position(), marker.position());
}

#[test]
fn location_buttons_navigate() {
    let (mut controller, _) = initialized();
    let config = DemoConfig::default();
    controller
        .on_ui(UiCommand::ShowLocation(Location::Soccer))
        .unwrap();
    controller.on_ui(UiCommand::ShowAllLocations).unwrap();
    controller.on_ui(UiCommand::ResetZoom).unwrap();
    assert_eq!(
        controller.registry().surface().calls(),
        &[
            SurfaceCall::SetCenter(config.locations.soccer),
            SurfaceCall::SetExtent(config.locations.extent().unwrap()),
            SurfaceCall::SetZoom(14.0),
        ]
    );
}

#[test]
fn showing_a_track_refits_to_all_tracks() {
    let (mut controller, _) = initialized();
    toggle(&mut controller, "magenta", true);
    toggle(&mut controller, "magenta", false);

    let tracks = controller.overlays().tracks.clone();
    let registry = controller.registry();
    let expected = Extent::for_coordinates(
        tracks
            .iter()
            .flat_map(|id| registry.get(*id).unwrap().coordinates()),
    )
    .unwrap();
    let refits: Vec<_> = registry
        .surface()
        .calls()
        .iter()
        .filter(|call| matches!(call, SurfaceCall::SetExtent(_)))
        .collect();
    assert_eq!(refits, vec![&SurfaceCall::SetExtent(expected)]);
    assert_eq!(TRACKS_GROUP, "tracks");
}

#[test]
fn visible_click_marker_follows_clicks() {
    let (mut controller, start) = initialized();
    let first = Coordinate::new(49.0, 8.4);
    let second = Coordinate::new(49.1, 8.6);

    // hidden: nothing happens
    controller
        .on_map_event(MapEvent::Clicked(first), start)
        .unwrap();
    let click = controller.overlays().click;
    assert!(!controller.registry().is_added(click));
    assert_eq!(
        controller.ui_state().event,
        "Event: map clicked at: [49, 8.4]"
    );

    toggle(&mut controller, "click", true);
    controller
        .on_map_event(MapEvent::Clicked(first), start)
        .unwrap();
    assert!(controller.registry().is_added(click));
    assert_eq!(
        controller.registry().marker(click).unwrap().position(),
        Some(first)
    );

    controller
        .on_map_event(MapEvent::Clicked(second), start)
        .unwrap();
    controller
        .on_tick(start + Duration::from_millis(500))
        .unwrap();
    let halfway = controller.registry().marker(click).unwrap().position().unwrap();
    assert!((halfway.latitude - 49.05).abs() < 1e-9);
    assert!((halfway.longitude - 8.5).abs() < 1e-9);

    controller.on_tick(start + Duration::from_secs(1)).unwrap();
    assert_eq!(
        controller.registry().marker(click).unwrap().position(),
        Some(second)
    );
    assert!(!controller.interaction().is_animating());
}

#[test]
fn drawing_mode_builds_and_discards_polygon() {
    let (mut controller, start) = initialized();
    controller.on_ui(UiCommand::DrawPolygon(true)).unwrap();
    for point in [
        Coordinate::new(49.0, 8.4),
        Coordinate::new(49.1, 8.5),
        Coordinate::new(49.0, 8.6),
    ] {
        controller
            .on_map_event(MapEvent::Clicked(point), start)
            .unwrap();
    }
    let polygon = controller.interaction().drawing().polygon().unwrap();
    let line = controller.registry().get(polygon).unwrap().as_line().unwrap();
    assert_eq!(line.len(), 3);
    assert!(line.is_closed());

    controller.on_ui(UiCommand::DrawPolygon(false)).unwrap();
    assert!(controller.registry().get(polygon).is_none());
    assert!(!controller.ui_state().drawing);
}

#[test]
fn invalid_animation_duration_is_not_applied() {
    let (mut controller, _) = initialized();
    controller
        .on_ui(UiCommand::AnimationDuration("fast".into()))
        .unwrap();
    assert!(controller.registry().surface().calls().is_empty());
    assert_eq!(controller.ui_state().animation_duration, "500");

    controller
        .on_ui(UiCommand::AnimationDuration(String::new()))
        .unwrap();
    assert_eq!(
        controller.registry().surface().calls(),
        &[SurfaceCall::SetAnimationDuration(0)]
    );
}

#[test]
fn zoom_slider_and_map_zoom_stay_in_sync() {
    let (mut controller, start) = initialized();
    controller.on_ui(UiCommand::ZoomSlider(10.0)).unwrap();
    // the surface reports the zoom it was given, the slider is already there
    controller
        .on_map_event(MapEvent::ZoomChanged(10.0), start)
        .unwrap();
    controller.on_ui(UiCommand::ZoomSlider(10.0)).unwrap();
    assert_eq!(
        controller.registry().surface().calls(),
        &[SurfaceCall::SetZoom(10.0)]
    );

    controller
        .on_map_event(MapEvent::ZoomChanged(12.0), start)
        .unwrap();
    assert_eq!(controller.ui_state().zoom_slider, 12.0);
}

#[test]
fn map_type_switch_applies_params_and_key() {
    let (mut controller, _) = initialized();
    let config = DemoConfig::default();
    controller
        .on_ui(UiCommand::BingMapsApiKey("key".into()))
        .unwrap();
    controller
        .on_ui(UiCommand::SelectMapType(MapType::Wms))
        .unwrap();
    assert_eq!(
        controller.surface_mut().take_calls(),
        vec![
            SurfaceCall::SetWmsParam(config.wms),
            SurfaceCall::SetBingMapsApiKey("key".into()),
            SurfaceCall::SetMapType(MapType::Wms),
        ]
    );

    controller
        .on_ui(UiCommand::SelectMapType(MapType::BingAerial))
        .unwrap();
    assert_eq!(
        controller.surface_mut().take_calls(),
        vec![
            SurfaceCall::SetBingMapsApiKey("key".into()),
            SurfaceCall::SetMapType(MapType::BingAerial),
        ]
    );
    assert_eq!(controller.ui_state().map_type, MapType::BingAerial);
}

#[test]
fn constrain_toggle() {
    let (mut controller, _) = initialized();
    controller.on_ui(UiCommand::Constrain(true)).unwrap();
    controller.on_ui(UiCommand::Constrain(false)).unwrap();
    let germany = DemoConfig::default().constrain_extent().unwrap();
    assert_eq!(
        controller.registry().surface().calls(),
        &[
            SurfaceCall::ConstrainExtent(germany),
            SurfaceCall::ClearConstrainExtent,
        ]
    );
}

#[test]
fn surface_events_update_status() {
    let (mut controller, start) = initialized();
    let selected =
        Extent::for_coordinates([Coordinate::new(49.0, 8.3), Coordinate::new(49.1, 8.5)]).unwrap();
    controller
        .on_map_event(MapEvent::ExtentSelected(selected), start)
        .unwrap();
    assert_eq!(
        controller.registry().surface().calls(),
        &[SurfaceCall::SetExtent(selected)]
    );

    controller
        .on_map_event(MapEvent::ExtentChanged(selected), start)
        .unwrap();
    controller
        .on_map_event(MapEvent::LabelClicked("university".into()), start)
        .unwrap();
    let ui = controller.ui_state();
    assert_eq!(ui.extent, selected.to_string());
    assert_eq!(ui.event, "Event: label clicked: university");
}

#[test]
fn missing_tracks_leave_the_demo_usable() {
    let mut config = DemoConfig::default();
    for track in &mut config.tracks {
        track.path = "/does/not/exist.csv".into();
    }
    let start = Instant::now();
    let mut controller = Controller::new(config, RecordingSurface::new(), start).unwrap();
    controller
        .on_map_event(MapEvent::Initialized, start)
        .unwrap();
    let tracks = controller.overlays().tracks.clone();
    for id in tracks {
        assert!(!controller.registry().is_added(id));
    }
    assert!(controller.ui_state().controls_enabled);
    toggle(&mut controller, "cyan", true);
    assert_eq!(
        controller
            .registry()
            .surface()
            .count(|call| matches!(call, SurfaceCall::SetExtent(_))),
        0
    );
}

#[tokio::test]
async fn controller_runs_as_actor() {
    let start = Instant::now();
    let controller = Controller::new(DemoConfig::default(), RecordingSurface::new(), start).unwrap();
    let controller = actors::run_unsupervised(controller);

    controller
        .tell(MapEventMessage {
            event: MapEvent::Initialized,
            at: start,
        })
        .await
        .unwrap();
    controller
        .ask(UiCommand::Toggle("soccer".into(), true))
        .await
        .unwrap()
        .unwrap();

    let ui = controller.ask(GetUiState).await.unwrap();
    assert!(ui.controls_enabled);
    assert_eq!(ui.toggles["soccer"], true);
}
