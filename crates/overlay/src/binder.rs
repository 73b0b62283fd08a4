use indexmap::IndexMap;
use model::{OverlayError, OverlayId, Positioned as _};
use utility::geo::{Extent, GeoError};

use crate::{registry::OverlayRegistry, surface::MapSurface};

struct Toggle {
    overlay: OverlayId,
    checked: bool,
}

/// Overlays sharing one extent, computed once when the group is created.
#[derive(Debug, Clone)]
pub struct ExtentGroup {
    name: String,
    members: Vec<OverlayId>,
    extent: Extent,
}

impl ExtentGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[OverlayId] {
        &self.members
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }
}

/// Keeps named UI toggles and overlay visibility in sync, in both directions.
///
/// A toggle flip changes the overlay's visibility, a visibility change made
/// through the binder updates every toggle bound to that overlay. Setting a
/// value that is already current does nothing on either side, so the two sides
/// can not trigger each other endlessly.
///
/// When a member of an extent group becomes visible the surface navigates to
/// the group's extent, making the shown content discoverable. Hiding a member
/// does not change the view.
#[derive(Default)]
pub struct VisibilityBinder {
    toggles: IndexMap<String, Toggle>,
    groups: Vec<ExtentGroup>,
}

impl VisibilityBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a toggle to an overlay. The toggle takes the overlay's current
    /// visibility.
    pub fn bind<S, N>(
        &mut self,
        name: N,
        overlay: OverlayId,
        registry: &OverlayRegistry<S>,
    ) -> Result<(), OverlayError>
    where
        S: MapSurface,
        N: Into<String>,
    {
        let checked = registry
            .get(overlay)
            .ok_or(OverlayError::UnknownOverlay(overlay))?
            .is_visible();
        self.toggles
            .insert(name.into(), Toggle { overlay, checked });
        Ok(())
    }

    /// Creates a group over the geometry its members have right now.
    pub fn add_group<S, N>(
        &mut self,
        name: N,
        members: Vec<OverlayId>,
        registry: &OverlayRegistry<S>,
    ) -> Result<Extent, GeoError>
    where
        S: MapSurface,
        N: Into<String>,
    {
        let coordinates = members
            .iter()
            .filter_map(|id| registry.get(*id))
            .flat_map(|overlay| overlay.coordinates());
        let extent = Extent::for_coordinates(coordinates)?;
        let name = name.into();
        log::debug!("extent group {} covers {}", name, extent);
        self.groups.push(ExtentGroup {
            name,
            members,
            extent,
        });
        Ok(extent)
    }

    pub fn group(&self, name: &str) -> Option<&ExtentGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    pub fn is_checked(&self, name: &str) -> Option<bool> {
        self.toggles.get(name).map(|toggle| toggle.checked)
    }

    pub fn toggles(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.toggles
            .iter()
            .map(|(name, toggle)| (name.as_str(), toggle.checked))
    }

    /// UI side: the toggle `name` was flipped. Returns whether the overlay's
    /// visibility changed, unknown toggles are ignored.
    pub fn toggle<S: MapSurface>(
        &mut self,
        name: &str,
        checked: bool,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<bool, OverlayError> {
        let Some(toggle) = self.toggles.get(name) else {
            log::warn!("no toggle named {}", name);
            return Ok(false);
        };
        let overlay = toggle.overlay;
        self.propagate(overlay, checked, registry)
    }

    /// Overlay side: sets the visibility and reports it to the bound toggles.
    pub fn set_visible<S: MapSurface>(
        &mut self,
        overlay: OverlayId,
        visible: bool,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<bool, OverlayError> {
        self.propagate(overlay, visible, registry)
    }

    fn propagate<S: MapSurface>(
        &mut self,
        overlay: OverlayId,
        visible: bool,
        registry: &mut OverlayRegistry<S>,
    ) -> Result<bool, OverlayError> {
        let changed = registry.set_visible(overlay, visible)?;
        for toggle in self.toggles.values_mut() {
            if toggle.overlay == overlay {
                toggle.checked = visible;
            }
        }
        if changed && visible {
            if let Some(group) = self
                .groups
                .iter()
                .find(|group| group.members.contains(&overlay))
            {
                log::debug!("{} became visible, showing {}", overlay, group.name);
                registry.surface_mut().set_extent(group.extent);
            }
        }
        Ok(changed)
    }
}
