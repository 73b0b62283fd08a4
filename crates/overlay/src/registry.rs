use indexmap::IndexMap;
use model::{
    MapLabel, Marker, Overlay, OverlayError, OverlayId, OverlayKind, Positioned as _,
};
use utility::{geo::Coordinate, id::IdSequence};

use crate::surface::MapSurface;

struct Entry {
    overlay: Overlay,
    added: bool,
}

/// Owns all overlays and decides which of them are rendered on the surface.
///
/// Overlays are first inserted, which only constructs them, and are put on the
/// surface with [`OverlayRegistry::add`]. Every change of an added overlay is
/// forwarded to the surface, changes of overlays that are not added are kept
/// and take effect when they get added.
pub struct OverlayRegistry<S: MapSurface> {
    surface: S,
    overlays: IndexMap<OverlayId, Entry>,
    ids: IdSequence<Overlay>,
}

impl<S: MapSurface> OverlayRegistry<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            overlays: IndexMap::new(),
            ids: IdSequence::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Access for view navigation (center, extent, zoom, map type). Overlays
    /// must be changed through the registry.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn insert<O: Into<Overlay>>(&mut self, overlay: O) -> OverlayId {
        let id = self.ids.next_id();
        let overlay = overlay.into();
        log::trace!("inserted {} {}", overlay.kind(), id);
        self.overlays.insert(
            id,
            Entry {
                overlay,
                added: false,
            },
        );
        id
    }

    /// Puts the overlay on the surface. Adding an added overlay does nothing.
    pub fn add(&mut self, id: OverlayId) -> Result<(), OverlayError> {
        let entry = self
            .overlays
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        if entry.added {
            return Ok(());
        }
        if !entry.overlay.is_positioned() {
            return Err(OverlayError::NotPositioned(entry.overlay.kind()));
        }
        self.surface.add_overlay(id, &entry.overlay)?;
        entry.added = true;
        log::debug!("added {} {}", entry.overlay.kind(), id);
        Ok(())
    }

    /// Takes the overlay off the surface, it stays in the registry and can be
    /// added again. Returns whether it was added.
    pub fn remove(&mut self, id: OverlayId) -> bool {
        let Some(entry) = self.overlays.get_mut(&id) else {
            return false;
        };
        if !entry.added {
            return false;
        }
        self.surface.remove_overlay(id);
        entry.added = false;
        log::debug!("removed {} {}", entry.overlay.kind(), id);
        true
    }

    /// Removes the overlay from the surface and the registry and hands it back
    /// to the caller.
    pub fn discard(&mut self, id: OverlayId) -> Option<Overlay> {
        self.remove(id);
        self.overlays.shift_remove(&id).map(|entry| entry.overlay)
    }

    pub fn is_added(&self, id: OverlayId) -> bool {
        self.overlays.get(&id).is_some_and(|entry| entry.added)
    }

    pub fn is_visible(&self, id: OverlayId) -> bool {
        self.overlays
            .get(&id)
            .is_some_and(|entry| entry.overlay.is_visible())
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id).map(|entry| &entry.overlay)
    }

    pub fn ids(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.overlays.keys().copied()
    }

    pub fn added(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.overlays
            .iter()
            .filter(|(_, entry)| entry.added)
            .map(|(id, _)| *id)
    }

    /// Shows or hides the overlay without adding or removing it. Returns whether
    /// the visibility changed.
    pub fn set_visible(&mut self, id: OverlayId, visible: bool) -> Result<bool, OverlayError> {
        let entry = self
            .overlays
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        let changed = entry.overlay.set_visible(visible);
        if changed && entry.added {
            self.surface.set_visible(id, visible);
        }
        Ok(changed)
    }

    pub fn marker(&self, id: OverlayId) -> Result<&Marker, OverlayError> {
        let overlay = self.get(id).ok_or(OverlayError::UnknownOverlay(id))?;
        overlay.as_marker().ok_or(OverlayError::WrongKind {
            id,
            expected: OverlayKind::Marker,
            actual: overlay.kind(),
        })
    }

    pub fn set_marker_position(
        &mut self,
        id: OverlayId,
        position: Coordinate,
    ) -> Result<(), OverlayError> {
        self.update_marker(id, |marker| {
            marker.set_position(position);
            true
        })
        .map(|_| ())
    }

    /// Returns whether the rotation changed, an unchanged rotation does not
    /// reach the surface.
    pub fn set_marker_rotation(&mut self, id: OverlayId, degrees: f64) -> Result<bool, OverlayError> {
        self.update_marker(id, |marker| marker.set_rotation(degrees))
    }

    pub fn attach_label(&mut self, id: OverlayId, label: MapLabel) -> Result<(), OverlayError> {
        let mut result = Ok(());
        self.update_marker(id, |marker| match marker.attach_label(label) {
            Ok(()) => true,
            Err((why, _)) => {
                result = Err(why);
                false
            }
        })?;
        result
    }

    fn update_marker<F>(&mut self, id: OverlayId, update: F) -> Result<bool, OverlayError>
    where
        F: FnOnce(&mut Marker) -> bool,
    {
        let entry = self
            .overlays
            .get_mut(&id)
            .ok_or(OverlayError::UnknownOverlay(id))?;
        let kind = entry.overlay.kind();
        let marker = entry
            .overlay
            .as_marker_mut()
            .ok_or(OverlayError::WrongKind {
                id,
                expected: OverlayKind::Marker,
                actual: kind,
            })?;
        let changed = update(marker);
        if changed && entry.added {
            self.surface.update_overlay(id, &entry.overlay);
        }
        Ok(changed)
    }
}
