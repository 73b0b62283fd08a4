use std::{
    env,
    error::Error,
    fmt, fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use indexmap::IndexMap;
use model::Color;
use overlay::surface::{WmsParam, XyzParam};
use serde::{Deserialize, Serialize};
use utility::geo::{Coordinate, Extent, GeoError};

/// Names the JSON file read by [`DemoConfig::from_env`].
pub const CONFIG_ENV: &str = "MAPDEMO_CONFIG";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(why) => write!(f, "can not read config: {}", why),
            Self::Json(why) => write!(f, "invalid config: {}", why),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(why) => Some(why),
            Self::Json(why) => Some(why),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(why: io::Error) -> Self {
        Self::Io(why)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(why: serde_json::Error) -> Self {
        Self::Json(why)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locations {
    pub castle: Coordinate,
    pub harbour: Coordinate,
    pub station: Coordinate,
    pub soccer: Coordinate,
    /// Position of the free label.
    pub university: Coordinate,
}

impl Locations {
    /// The locations that carry a marker.
    pub fn markers(&self) -> [Coordinate; 4] {
        [self.castle, self.harbour, self.station, self.soccer]
    }

    pub fn extent(&self) -> Result<Extent, GeoError> {
        Extent::for_coordinates(self.markers())
    }
}

impl Default for Locations {
    fn default() -> Self {
        Self {
            castle: Coordinate::new(49.013517, 8.404435),
            harbour: Coordinate::new(49.015511, 8.323497),
            station: Coordinate::new(48.993284, 8.402186),
            soccer: Coordinate::new(49.020035, 8.412975),
            university: Coordinate::new(49.011809, 8.413639),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackConfig {
    /// Name of the toggle showing the track.
    pub name: String,
    pub path: PathBuf,
    pub color: Color,
    #[serde(default = "default_track_width")]
    pub width: u32,
}

fn default_track_width() -> u32 {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DemoConfig {
    pub locations: Locations,
    /// Corners of the area the view can be constrained to.
    pub constrain_to: Vec<Coordinate>,
    pub zoom: f64,
    pub center: Coordinate,
    pub tracks: Vec<TrackConfig>,
    pub circle_radius_meters: f64,
    #[serde(with = "utility::serde::duration")]
    pub click_animation: Duration,
    #[serde(with = "utility::serde::duration")]
    pub rotation_step: Duration,
    pub rotation_increment_degrees: u32,
    #[serde(with = "utility::serde::duration")]
    pub tick_interval: Duration,
    /// Pan and zoom animation of the surface in milliseconds.
    pub animation_duration: u32,
    pub bing_maps_api_key: String,
    pub wms: WmsParam,
    pub xyz: XyzParam,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let locations = Locations::default();
        let center = locations.harbour;
        Self {
            locations,
            constrain_to: vec![
                Coordinate::new(55.05863889, 8.417527778),
                Coordinate::new(47.27166667, 10.17405556),
                Coordinate::new(51.0525, 5.866944444),
                Coordinate::new(51.27277778, 15.04361111),
            ],
            zoom: 14.0,
            center,
            tracks: vec![
                TrackConfig {
                    name: "magenta".into(),
                    path: concat!(env!("CARGO_MANIFEST_DIR"), "/resources/M1.csv").into(),
                    color: Color::MAGENTA,
                    width: default_track_width(),
                },
                TrackConfig {
                    name: "cyan".into(),
                    path: concat!(env!("CARGO_MANIFEST_DIR"), "/resources/M2.csv").into(),
                    color: Color::CYAN,
                    width: 7,
                },
            ],
            circle_radius_meters: 1_000.0,
            click_animation: Duration::from_secs(1),
            rotation_step: Duration::from_millis(100),
            rotation_increment_degrees: 9,
            tick_interval: Duration::from_millis(20),
            animation_duration: 500,
            bing_maps_api_key: String::new(),
            wms: WmsParam {
                url: "http://ows.terrestris.de/osm/service?".into(),
                params: IndexMap::from([("layers".to_owned(), "OSM-WMS".to_owned())]),
            },
            xyz: XyzParam {
                url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Topo_Map/MapServer/tile/{z}/{y}/{x}".into(),
                attributions: "'Tiles &copy; <a href=\"https://services.arcgisonline.com/ArcGIS/rest/services/World_Topo_Map/MapServer\">ArcGIS</a>'".into(),
            },
        }
    }
}

impl DemoConfig {
    /// Reads the file named by `MAPDEMO_CONFIG`, falls back to the defaults
    /// when the variable is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                log::debug!("{} not set, using default config", CONFIG_ENV);
                Ok(Self::default())
            }
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        log::info!("config loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn constrain_extent(&self) -> Result<Extent, GeoError> {
        Extent::for_coordinates(self.constrain_to.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_karlsruhe() {
        let config = DemoConfig::default();
        let extent = config.locations.extent().unwrap();
        assert_eq!(extent.min(), Coordinate::new(48.993284, 8.323497));
        assert_eq!(extent.max(), Coordinate::new(49.020035, 8.412975));
        assert_eq!(config.center, config.locations.harbour);
    }

    #[test]
    fn germany_extent() {
        let extent = DemoConfig::default().constrain_extent().unwrap();
        assert_eq!(extent.min(), Coordinate::new(47.27166667, 5.866944444));
        assert_eq!(extent.max(), Coordinate::new(55.05863889, 15.04361111));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DemoConfig = serde_json::from_str(
            r#"{
                "zoom": 12,
                "clickAnimation": "00:00:02.500",
                "bingMapsApiKey": "secret"
            }"#,
        )
        .unwrap();
        assert_eq!(config.zoom, 12.0);
        assert_eq!(config.click_animation, Duration::from_millis(2_500));
        assert_eq!(config.bing_maps_api_key, "secret");
        assert_eq!(config.rotation_step, Duration::from_millis(100));
        assert_eq!(config.tracks.len(), 2);
    }

    #[test]
    fn tracks_from_json() {
        let config: DemoConfig = serde_json::from_str(
            r##"{
                "tracks": [{ "name": "red", "path": "red.csv", "color": "#ff0000" }]
            }"##,
        )
        .unwrap();
        assert_eq!(
            config.tracks,
            vec![TrackConfig {
                name: "red".into(),
                path: "red.csv".into(),
                color: Color::rgb(0xff, 0, 0),
                width: 3,
            }]
        );
    }

    #[test]
    fn empty_constrain_area_is_rejected() {
        let config = DemoConfig {
            constrain_to: vec![],
            ..DemoConfig::default()
        };
        assert_eq!(config.constrain_extent(), Err(GeoError::EmptyInput));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = DemoConfig::from_file("/does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
