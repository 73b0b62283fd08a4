//! Overlay state on top of an external map surface: which overlays are
//! rendered, how UI toggles map to their visibility, and how clicks and timer
//! ticks move them.

pub mod animation;
pub mod binder;
pub mod drawing;
pub mod interaction;
pub mod recording;
pub mod registry;
pub mod rotation;
pub mod surface;

pub use binder::VisibilityBinder;
pub use interaction::{ClickMarker, InteractionState};
pub use registry::OverlayRegistry;
pub use surface::{MapEvent, MapSurface, MapType};
