use std::{error::Error, fmt, time::Instant};

use actors::{
    actor::{Actor, SupervisionStrategy},
    handler::{Handler, Message},
};
use async_trait::async_trait;
use model::{
    track, MapCircle, MapLabel, Marker, MarkerIcon, OverlayError, OverlayId, PixelOffset,
    Positioned as _, ProvidedIcon,
};
use overlay::{
    drawing::PolygonStyle, rotation::RotationDriver, ClickMarker, InteractionState, MapEvent,
    MapSurface, MapType, OverlayRegistry, VisibilityBinder,
};
use utility::geo::{Extent, GeoError};

use crate::{config::DemoConfig, ui::UiState};

/// Name of the extent group formed by the tracks.
pub const TRACKS_GROUP: &str = "tracks";

#[derive(Debug)]
pub enum SetupError {
    Geo(GeoError),
    Overlay(OverlayError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geo(why) => write!(f, "invalid demo locations: {}", why),
            Self::Overlay(why) => write!(f, "can not create demo overlays: {}", why),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geo(why) => Some(why),
            Self::Overlay(why) => Some(why),
        }
    }
}

impl From<GeoError> for SetupError {
    fn from(why: GeoError) -> Self {
        Self::Geo(why)
    }
}

impl From<OverlayError> for SetupError {
    fn from(why: OverlayError) -> Self {
        Self::Overlay(why)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Harbour,
    Castle,
    Station,
    Soccer,
}

/// Input from the controls around the map.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    ShowLocation(Location),
    ShowAllLocations,
    ResetZoom,
    ZoomSlider(f64),
    AnimationDuration(String),
    BingMapsApiKey(String),
    SelectMapType(MapType),
    /// A visibility checkbox, by toggle name.
    Toggle(String, bool),
    DrawPolygon(bool),
    Constrain(bool),
}

/// Ids of the overlays the demo creates up front.
#[derive(Debug, Clone)]
pub struct DemoOverlays {
    pub harbour: OverlayId,
    pub castle: OverlayId,
    pub station: OverlayId,
    pub soccer: OverlayId,
    pub click: OverlayId,
    pub university: OverlayId,
    pub circle: OverlayId,
    pub tracks: Vec<OverlayId>,
}

/// Wires map events and UI commands to the overlay state and the surface.
///
/// All controls stay disabled until the surface reports
/// [`MapEvent::Initialized`], commands arriving before are dropped.
pub struct Controller<S: MapSurface> {
    config: DemoConfig,
    registry: OverlayRegistry<S>,
    binder: VisibilityBinder,
    interaction: InteractionState,
    overlays: DemoOverlays,
    all_locations: Extent,
    constrain_extent: Extent,
    ui: UiState,
}

impl<S: MapSurface> Controller<S> {
    /// Creates the demo overlays without putting them on the surface and loads
    /// the tracks. `started` is the reference for the marker rotation.
    pub fn new(config: DemoConfig, surface: S, started: Instant) -> Result<Self, SetupError> {
        let all_locations = config.locations.extent()?;
        let constrain_extent = config.constrain_extent()?;
        let locations = &config.locations;

        let mut registry = OverlayRegistry::new(surface);
        let harbour = registry.insert(Marker::provided(ProvidedIcon::Blue).at(locations.harbour));
        let castle = registry.insert(Marker::provided(ProvidedIcon::Green).at(locations.castle));
        let station = registry.insert(Marker::provided(ProvidedIcon::Red).at(locations.station));
        let soccer = registry.insert(
            Marker::custom(MarkerIcon::Custom("ksc.png".into()), PixelOffset::new(-20, -20))
                .at(locations.soccer),
        );
        // the click marker gets its position from the first click
        let click = registry.insert(Marker::provided(ProvidedIcon::Orange));

        registry.attach_label(
            castle,
            MapLabel::with_offset("castle", 10, -10).css_class("green-label"),
        )?;
        registry.attach_label(
            station,
            MapLabel::with_offset("station", 10, -10).css_class("red-label"),
        )?;
        registry.attach_label(
            click,
            MapLabel::with_offset("click!", 10, -10).css_class("orange-label"),
        )?;

        let university = registry.insert(
            MapLabel::new("university")
                .at(locations.university)
                .visible(true),
        );
        let circle = registry.insert(
            MapCircle::new(locations.station, config.circle_radius_meters).visible(true),
        );

        let mut binder = VisibilityBinder::new();
        for (name, id) in [
            ("harbour", harbour),
            ("castle", castle),
            ("station", station),
            ("soccer", soccer),
            ("click", click),
        ] {
            binder.bind(name, id, &registry)?;
        }

        let mut tracks = Vec::with_capacity(config.tracks.len());
        for track in &config.tracks {
            let line = track::load_track_or_empty(&track.path)
                .with_color(track.color)
                .with_width(track.width);
            log::debug!("track {} has {} points", track.name, line.len());
            let id = registry.insert(line);
            binder.bind(track.name.as_str(), id, &registry)?;
            tracks.push(id);
        }
        log::trace!("tracks loaded");
        if let Err(why) = binder.add_group(TRACKS_GROUP, tracks.clone(), &registry) {
            log::warn!("no extent for the tracks: {}", why);
        }

        let interaction = InteractionState::new(PolygonStyle::default())
            .with_click_marker(ClickMarker::new(click, config.click_animation))
            .with_rotation(RotationDriver::new(
                soccer,
                started,
                config.rotation_step,
                config.rotation_increment_degrees,
            ));

        let ui = UiState::new(config.animation_duration, config.bing_maps_api_key.clone());

        let mut controller = Self {
            overlays: DemoOverlays {
                harbour,
                castle,
                station,
                soccer,
                click,
                university,
                circle,
                tracks,
            },
            config,
            registry,
            binder,
            interaction,
            all_locations,
            constrain_extent,
            ui,
        };
        let millis = controller.config.animation_duration;
        controller
            .registry
            .surface_mut()
            .set_animation_duration(millis);
        controller.select_map_type(MapType::default());
        Ok(controller)
    }

    pub fn overlays(&self) -> &DemoOverlays {
        &self.overlays
    }

    pub fn registry(&self) -> &OverlayRegistry<S> {
        &self.registry
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.registry.surface_mut()
    }

    /// The view state including the current toggle values.
    pub fn ui_state(&self) -> UiState {
        let mut ui = self.ui.clone();
        ui.toggles = self
            .binder
            .toggles()
            .map(|(name, checked)| (name.to_owned(), checked))
            .collect();
        ui
    }

    pub fn on_map_event(&mut self, event: MapEvent, now: Instant) -> Result<(), OverlayError> {
        match event {
            MapEvent::Initialized => self.after_initialized()?,
            MapEvent::Clicked(coordinate) => {
                self.ui.set_event(format!(
                    "Event: map clicked at: {}",
                    coordinate.normalize()
                ));
                self.interaction
                    .on_click(coordinate, now, &mut self.registry)?;
            }
            MapEvent::RightClicked(coordinate) => {
                self.ui
                    .set_event(format!("Event: map right clicked at: {}", coordinate));
            }
            MapEvent::PointerMoved(coordinate) => {
                log::debug!("pointer moved to {}", coordinate);
            }
            MapEvent::ExtentChanged(extent) => self.ui.set_extent(extent),
            MapEvent::ExtentSelected(extent) => self.registry.surface_mut().set_extent(extent),
            MapEvent::ZoomChanged(zoom) => {
                self.ui.set_zoom(zoom);
            }
            MapEvent::CenterChanged(center) => self.ui.set_center(center),
            MapEvent::MarkerClicked(id) => {
                self.ui.set_event(format!("Event: marker clicked: {}", id));
            }
            MapEvent::MarkerRightClicked(id) => {
                self.ui
                    .set_event(format!("Event: marker right clicked: {}", id));
            }
            MapEvent::LabelClicked(text) => {
                self.ui.set_event(format!("Event: label clicked: {}", text));
            }
            MapEvent::LabelRightClicked(text) => {
                self.ui
                    .set_event(format!("Event: label right clicked: {}", text));
            }
        }
        Ok(())
    }

    pub fn on_ui(&mut self, command: UiCommand) -> Result<(), OverlayError> {
        if !self.ui.controls_enabled {
            log::debug!("controls disabled, dropping {:?}", command);
            return Ok(());
        }
        match command {
            UiCommand::ShowLocation(location) => {
                let locations = &self.config.locations;
                let center = match location {
                    Location::Harbour => locations.harbour,
                    Location::Castle => locations.castle,
                    Location::Station => locations.station,
                    Location::Soccer => locations.soccer,
                };
                self.registry.surface_mut().set_center(center);
            }
            UiCommand::ShowAllLocations => {
                self.registry.surface_mut().set_extent(self.all_locations);
            }
            UiCommand::ResetZoom => self.registry.surface_mut().set_zoom(self.config.zoom),
            UiCommand::ZoomSlider(zoom) => {
                if self.ui.set_zoom(zoom) {
                    self.registry.surface_mut().set_zoom(zoom);
                }
            }
            UiCommand::AnimationDuration(text) => {
                if let Some(millis) = self.ui.edit_animation_duration(&text) {
                    self.registry.surface_mut().set_animation_duration(millis);
                }
            }
            UiCommand::BingMapsApiKey(key) => self.ui.bing_maps_api_key = key,
            UiCommand::SelectMapType(map_type) => self.select_map_type(map_type),
            UiCommand::Toggle(name, checked) => {
                self.binder.toggle(&name, checked, &mut self.registry)?;
            }
            UiCommand::DrawPolygon(enabled) => {
                self.ui.drawing = enabled;
                self.interaction
                    .set_drawing_enabled(enabled, &mut self.registry);
            }
            UiCommand::Constrain(constrain) => {
                self.ui.constrain = constrain;
                if constrain {
                    self.registry
                        .surface_mut()
                        .constrain_extent(self.constrain_extent);
                } else {
                    self.registry.surface_mut().clear_constrain_extent();
                }
            }
        }
        Ok(())
    }

    pub fn on_tick(&mut self, now: Instant) -> Result<(), OverlayError> {
        self.interaction.tick(now, &mut self.registry)
    }

    fn select_map_type(&mut self, map_type: MapType) {
        log::debug!("map type toggled to {}", map_type.name());
        self.ui.map_type = map_type;
        let surface = self.registry.surface_mut();
        match map_type {
            MapType::Wms => surface.set_wms_param(&self.config.wms),
            MapType::Xyz => surface.set_xyz_param(&self.config.xyz),
            _ => {}
        }
        surface.set_bing_maps_api_key(&self.ui.bing_maps_api_key);
        surface.set_map_type(map_type);
    }

    fn after_initialized(&mut self) -> Result<(), OverlayError> {
        if self.ui.controls_enabled {
            log::warn!("map reported initialization twice");
            return Ok(());
        }
        log::trace!("map initialized");
        log::debug!("setting center and enabling controls...");
        let surface = self.registry.surface_mut();
        surface.set_zoom(self.config.zoom);
        surface.set_center(self.config.center);
        self.ui.set_zoom(self.config.zoom);
        self.ui.set_center(self.config.center);

        // the markers are still hidden, the click marker has no position yet
        let overlays = &self.overlays;
        for id in [
            overlays.harbour,
            overlays.castle,
            overlays.station,
            overlays.soccer,
            overlays.university,
        ] {
            self.registry.add(id)?;
        }
        for id in overlays.tracks.iter().copied() {
            let positioned = self
                .registry
                .get(id)
                .is_some_and(|overlay| overlay.is_positioned());
            if positioned {
                self.registry.add(id)?;
            } else {
                log::warn!("track {} is empty and stays off the map", id);
            }
        }
        self.registry.add(overlays.circle)?;

        self.ui.controls_enabled = true;
        Ok(())
    }
}

impl<S: MapSurface + 'static> Actor for Controller<S> {
    fn name(&self) -> &'static str {
        "controller"
    }

    fn on_fail(&mut self, _: Box<dyn std::any::Any + Send>) -> SupervisionStrategy {
        SupervisionStrategy::Resume
    }
}

/// A map event and the moment it arrived.
pub struct MapEventMessage {
    pub event: MapEvent,
    pub at: Instant,
}

impl MapEventMessage {
    pub fn now(event: MapEvent) -> Self {
        Self {
            event,
            at: Instant::now(),
        }
    }
}

impl Message for MapEventMessage {
    type Response = Result<(), OverlayError>;
}

impl Message for UiCommand {
    type Response = Result<(), OverlayError>;
}

pub struct Tick(pub Instant);

impl Message for Tick {
    type Response = Result<(), OverlayError>;
}

pub struct GetUiState;

impl Message for GetUiState {
    type Response = UiState;
}

fn logged(result: Result<(), OverlayError>, what: &str) -> Result<(), OverlayError> {
    if let Err(why) = &result {
        log::error!("{} failed: {}", what, why);
    }
    result
}

#[async_trait]
impl<S: MapSurface + 'static> Handler<MapEventMessage> for Controller<S> {
    async fn handle(&mut self, message: MapEventMessage) -> Result<(), OverlayError> {
        logged(self.on_map_event(message.event, message.at), "map event")
    }
}

#[async_trait]
impl<S: MapSurface + 'static> Handler<UiCommand> for Controller<S> {
    async fn handle(&mut self, message: UiCommand) -> Result<(), OverlayError> {
        logged(self.on_ui(message), "ui command")
    }
}

#[async_trait]
impl<S: MapSurface + 'static> Handler<Tick> for Controller<S> {
    async fn handle(&mut self, message: Tick) -> Result<(), OverlayError> {
        logged(self.on_tick(message.0), "tick")
    }
}

#[async_trait]
impl<S: MapSurface + 'static> Handler<GetUiState> for Controller<S> {
    async fn handle(&mut self, _: GetUiState) -> UiState {
        self.ui_state()
    }
}
