use thiserror::Error;

use crate::map::ScreenId;

/// Errors raised while loading a map layout or assembling the navigator
///
/// Runtime operations (hover, click, tick) never surface these; they log and
/// skip instead.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("IO error reading {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid map config JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Map config has no screens")]
    NoScreens,

    #[error("Screen {screen} declares marker {name:?} twice")]
    DuplicateMarker { screen: ScreenId, name: String },

    #[error("Marker {marker:?} leads to unknown screen {target}")]
    UnknownRoute { marker: String, target: ScreenId },

    #[error("Unknown screen: {0}")]
    UnknownScreen(ScreenId),

    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

/// Errors reported by a scene service when creating nodes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("Parent container for {0} does not exist")]
    MissingParent(ScreenId),

    #[error("Node limit of {0} reached")]
    Exhausted(usize),
}

impl From<MapError> for String {
    fn from(error: MapError) -> Self {
        error.to_string()
    }
}
