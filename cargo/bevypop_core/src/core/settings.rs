use crate::bail;
use crate::error::{EResult, ErrorKind};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fade timings shared by every popup instance, in seconds.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupSettings {
    #[serde(default = "default_fade_duration")]
    pub fade_in_duration: f32,
    #[serde(default = "default_fade_duration")]
    pub fade_out_duration: f32,
}

fn default_fade_duration() -> f32 {
    0.3
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            fade_in_duration: default_fade_duration(),
            fade_out_duration: default_fade_duration(),
        }
    }
}

impl PopupSettings {
    pub fn instant() -> Self {
        Self {
            fade_in_duration: 0.0,
            fade_out_duration: 0.0,
        }
    }

    pub fn from_ron(raw: &str) -> EResult<Self> {
        match ron::from_str(raw) {
            Ok(settings) => Ok(settings),
            Err(e) => bail!(ErrorKind::Parse, "POPUP_SETTINGS::LOAD::CANNOT_PARSE", e),
        }
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> EResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => bail!(ErrorKind::Io, "POPUP_SETTINGS::LOAD::CANNOT_READ_FILE", e),
        };

        Self::from_ron(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = PopupSettings::from_ron("(fade_out_duration: 0.5)").unwrap();
        assert_eq!(settings.fade_in_duration, 0.3);
        assert_eq!(settings.fade_out_duration, 0.5);
    }

    #[test]
    fn unparsable_settings_are_a_parse_error() {
        let error = PopupSettings::from_ron("(fade_in_duration: \"slow\")").unwrap_err();
        assert_eq!(error.kind, ErrorKind::Parse);
        assert_eq!(error.code, "POPUP_SETTINGS::LOAD::CANNOT_PARSE");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = PopupSettings::load_or_default("./does-not-exist/popup.ron").unwrap();
        assert_eq!(settings, PopupSettings::default());
    }
}
