// std
use std::fs::File;
use std::path::Path;
use std::time::Duration;
// crates
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
// internal
use crate::controller::DrawGuard;

pub const DEFAULT_DRAW_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_STEP_TIME: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSettings {
    #[serde(
        default = "default_draw_delay",
        deserialize_with = "deserialize_duration_with_human_time",
        serialize_with = "serialize_duration_with_human_time"
    )]
    pub draw_delay: Duration,
    #[serde(default)]
    pub draw_guard: DrawGuard,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            draw_delay: DEFAULT_DRAW_DELAY,
            draw_guard: DrawGuard::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    pub controller: ControllerSettings,
    /// Tick of the interactive event loop.
    #[serde(
        default = "default_step_time",
        deserialize_with = "deserialize_duration_with_human_time",
        serialize_with = "serialize_duration_with_human_time"
    )]
    pub step_time: Duration,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            controller: ControllerSettings::default(),
            step_time: DEFAULT_STEP_TIME,
            seed: None,
        }
    }
}

fn default_draw_delay() -> Duration {
    DEFAULT_DRAW_DELAY
}

fn default_step_time() -> Duration {
    DEFAULT_STEP_TIME
}

fn deserialize_duration_with_human_time<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}

fn serialize_duration_with_human_time<S>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&humantime::format_duration(*duration).to_string())
}

/// Generically load a json file
pub fn load_json_from_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = File::open(path)?;
    Ok(serde_json::from_reader(f)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.controller.draw_delay, Duration::from_millis(1500));
        assert_eq!(settings.controller.draw_guard, DrawGuard::Phase);
    }

    #[test]
    fn human_readable_durations() {
        let settings: Settings = serde_json::from_str(
            r#"{ "draw_delay": "2s 500ms", "step_time": "10ms", "seed": 7, "draw_guard": "flag" }"#,
        )
        .unwrap();
        assert_eq!(settings.controller.draw_delay, Duration::from_millis(2500));
        assert_eq!(settings.step_time, Duration::from_millis(10));
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.controller.draw_guard, DrawGuard::Flag);

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn rejects_bad_duration() {
        assert!(serde_json::from_str::<Settings>(r#"{ "draw_delay": "soon" }"#).is_err());
        assert!(serde_json::from_str::<Settings>(r#"{ "draw_guard": "none" }"#).is_err());
    }
}
