//! Headless map demo: named Karlsruhe locations, two tracks, polygon drawing
//! and an animated click marker, driven by map events and UI commands.

pub mod command;
pub mod config;
pub mod controller;
pub mod ui;

pub use config::DemoConfig;
pub use controller::Controller;
