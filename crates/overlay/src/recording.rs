use indexmap::IndexMap;
use model::{Overlay, OverlayError, OverlayId, Positioned as _};
use utility::geo::{Coordinate, Extent};

use crate::surface::{MapSurface, MapType, WmsParam, XyzParam};

/// A command received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    AddOverlay(OverlayId),
    RemoveOverlay(OverlayId),
    UpdateOverlay(OverlayId),
    SetVisible(OverlayId, bool),
    SetCenter(Coordinate),
    SetExtent(Extent),
    SetZoom(f64),
    ConstrainExtent(Extent),
    ClearConstrainExtent,
    SetMapType(MapType),
    SetWmsParam(WmsParam),
    SetXyzParam(XyzParam),
    SetBingMapsApiKey(String),
    SetAnimationDuration(u32),
}

/// Headless surface that keeps the rendered overlays and records every command,
/// optionally logging each of them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    rendered: IndexMap<OverlayId, Overlay>,
    log_calls: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`RecordingSurface::new`], but every command is also logged at info
    /// level.
    pub fn logging() -> Self {
        Self {
            log_calls: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&SurfaceCall) -> bool,
    {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// The overlay as last rendered.
    pub fn rendered(&self, id: OverlayId) -> Option<&Overlay> {
        self.rendered.get(&id)
    }

    pub fn rendered_ids(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.rendered.keys().copied()
    }

    fn record(&mut self, call: SurfaceCall) {
        if self.log_calls {
            log::info!("surface: {:?}", call);
        }
        self.calls.push(call);
    }
}

impl MapSurface for RecordingSurface {
    fn add_overlay(&mut self, id: OverlayId, overlay: &Overlay) -> Result<(), OverlayError> {
        if !overlay.is_positioned() {
            return Err(OverlayError::NotPositioned(overlay.kind()));
        }
        self.rendered.insert(id, overlay.clone());
        self.record(SurfaceCall::AddOverlay(id));
        Ok(())
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        if self.rendered.shift_remove(&id).is_some() {
            self.record(SurfaceCall::RemoveOverlay(id));
        }
    }

    fn update_overlay(&mut self, id: OverlayId, overlay: &Overlay) {
        if let Some(rendered) = self.rendered.get_mut(&id) {
            *rendered = overlay.clone();
            self.record(SurfaceCall::UpdateOverlay(id));
        }
    }

    fn set_visible(&mut self, id: OverlayId, visible: bool) {
        if let Some(rendered) = self.rendered.get_mut(&id) {
            rendered.set_visible(visible);
        }
        self.record(SurfaceCall::SetVisible(id, visible));
    }

    fn set_center(&mut self, center: Coordinate) {
        self.record(SurfaceCall::SetCenter(center));
    }

    fn set_extent(&mut self, extent: Extent) {
        self.record(SurfaceCall::SetExtent(extent));
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.record(SurfaceCall::SetZoom(zoom));
    }

    fn constrain_extent(&mut self, extent: Extent) {
        self.record(SurfaceCall::ConstrainExtent(extent));
    }

    fn clear_constrain_extent(&mut self) {
        self.record(SurfaceCall::ClearConstrainExtent);
    }

    fn set_map_type(&mut self, map_type: MapType) {
        self.record(SurfaceCall::SetMapType(map_type));
    }

    fn set_wms_param(&mut self, param: &WmsParam) {
        self.record(SurfaceCall::SetWmsParam(param.clone()));
    }

    fn set_xyz_param(&mut self, param: &XyzParam) {
        self.record(SurfaceCall::SetXyzParam(param.clone()));
    }

    fn set_bing_maps_api_key(&mut self, key: &str) {
        self.record(SurfaceCall::SetBingMapsApiKey(key.to_owned()));
    }

    fn set_animation_duration(&mut self, millis: u32) {
        self.record(SurfaceCall::SetAnimationDuration(millis));
    }
}
