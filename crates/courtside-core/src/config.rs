// Configuration loading and parsing (courtside.toml).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "courtside.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub fixtures: FixturePaths,
    pub shot_chart: ShotChartConfig,
    /// Directory relative fixture paths are resolved against.
    pub base_dir: PathBuf,
}

impl Config {
    pub fn box_score_path(&self) -> PathBuf {
        self.base_dir.join(&self.fixtures.box_score)
    }

    pub fn play_by_play_path(&self) -> PathBuf {
        self.base_dir.join(&self.fixtures.play_by_play)
    }
}

/// Raw deserialization target for courtside.toml.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    fixtures: FixturePaths,
    #[serde(default)]
    shot_chart: ShotChartConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixturePaths {
    pub box_score: String,
    pub play_by_play: String,
}

/// Target canvas for shot coordinates. Feed coordinates are scaled from the
/// 280x261 court onto this size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ShotChartConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ShotChartConfig {
    fn default() -> Self {
        Self {
            width: 1500.0,
            height: 1400.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/courtside.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        fixtures: file.fixtures,
        shot_chart: file.shot_chart,
        base_dir: base_dir.to_path_buf(),
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/courtside.toml` from `defaults/` when it is missing.
/// Returns the seeded path, or `None` when the config already existed.
pub fn ensure_config_files(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let target = base_dir.join("config").join(CONFIG_FILE);

    if target.is_file() {
        return Ok(None);
    }
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no {CONFIG_FILE} under config/ or defaults/ in {}; \
                 run from the project root or pass --config-dir",
                base_dir.display()
            ),
        });
    }

    let seed_err = |what: &str, e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("{what}: {e}"),
    };
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| seed_err("cannot create config/", e))?;
    }
    let body = std::fs::read(&source).map_err(|e| seed_err("cannot read defaults", e))?;
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(file) => file,
        // lost a race with another seeder; theirs wins
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => return Err(seed_err("cannot create config file", e)),
    };
    std::io::Write::write_all(&mut dest, &body).map_err(|e| seed_err("cannot write config file", e))?;

    tracing::info!("seeded {} from defaults", target.display());
    Ok(Some(target))
}

/// Load config relative to the current working directory, seeding missing
/// files from `defaults/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_in(&cwd)
}

/// Same as [`load_config`] for an explicit base directory.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.fixtures.box_score.trim().is_empty() {
        return Err(invalid("fixtures.box_score", "must not be empty"));
    }
    if config.fixtures.play_by_play.trim().is_empty() {
        return Err(invalid("fixtures.play_by_play", "must not be empty"));
    }

    let ShotChartConfig { width, height } = config.shot_chart;
    for (field, value) in [("shot_chart.width", width), ("shot_chart.height", height)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(invalid(field, format!("expected a positive size, got {value}")));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DEFAULTS: &str = include_str!("../../../defaults/courtside.toml");

    /// Scratch project directory, removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("courtside_{name}"));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Scratch(dir)
        }

        fn with_config(name: &str, body: &str) -> Self {
            let scratch = Self::new(name);
            scratch.put("config", body);
            scratch
        }

        fn put(&self, sub: &str, body: &str) {
            fs::create_dir_all(self.0.join(sub)).unwrap();
            fs::write(self.0.join(sub).join(CONFIG_FILE), body).unwrap();
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("expected a validation failure, got: {other}"),
        }
    }

    #[test]
    fn shipped_defaults_load() {
        let dir = Scratch::with_config("cfg_defaults", DEFAULTS);
        let config = load_config_from(&dir.0).expect("shipped defaults are valid");

        assert_eq!(config.fixtures.box_score, "data/boxscore.json");
        assert_eq!(config.fixtures.play_by_play, "data/playbyplay.json");
        assert!((config.shot_chart.width - 1500.0).abs() < f64::EPSILON);
        assert!((config.shot_chart.height - 1400.0).abs() < f64::EPSILON);
        assert_eq!(config.box_score_path(), dir.0.join("data/boxscore.json"));
    }

    #[test]
    fn canvas_defaults_when_section_absent() {
        let dir = Scratch::with_config(
            "cfg_no_canvas",
            "[fixtures]\nbox_score = \"a.json\"\nplay_by_play = \"b.json\"\n",
        );
        let config = load_config_from(&dir.0).unwrap();
        assert_eq!(config.shot_chart, ShotChartConfig::default());
        assert_eq!(config.play_by_play_path(), dir.0.join("b.json"));
    }

    #[test]
    fn blank_fixture_path_is_invalid() {
        let dir = Scratch::with_config(
            "cfg_blank_path",
            "[fixtures]\nbox_score = \"  \"\nplay_by_play = \"b.json\"\n",
        );
        assert_eq!(field_of(load_config_from(&dir.0).unwrap_err()), "fixtures.box_score");
    }

    #[test]
    fn zero_or_nan_canvas_is_invalid() {
        let body = |w: &str, h: &str| {
            format!(
                "[fixtures]\nbox_score = \"a.json\"\nplay_by_play = \"b.json\"\n\
                 [shot_chart]\nwidth = {w}\nheight = {h}\n"
            )
        };
        let dir = Scratch::with_config("cfg_zero_width", &body("0.0", "1400.0"));
        assert_eq!(field_of(load_config_from(&dir.0).unwrap_err()), "shot_chart.width");

        let dir = Scratch::with_config("cfg_nan_height", &body("1500.0", "nan"));
        assert_eq!(field_of(load_config_from(&dir.0).unwrap_err()), "shot_chart.height");
    }

    #[test]
    fn missing_and_malformed_files() {
        let dir = Scratch::new("cfg_missing");
        assert!(matches!(
            load_config_from(&dir.0),
            Err(ConfigError::FileNotFound { path }) if path.ends_with(CONFIG_FILE)
        ));

        dir.put("config", "fixtures = [[[");
        assert!(matches!(
            load_config_from(&dir.0),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn seeding_copies_defaults_once() {
        let dir = Scratch::new("cfg_seed");
        dir.put("defaults", DEFAULTS);

        let seeded = ensure_config_files(&dir.0).unwrap();
        assert_eq!(seeded, Some(dir.0.join("config").join(CONFIG_FILE)));
        assert_eq!(ensure_config_files(&dir.0).unwrap(), None);

        let config = load_config_in(&dir.0).expect("seeded config loads");
        assert_eq!(config.fixtures.play_by_play, "data/playbyplay.json");
    }

    #[test]
    fn seeding_keeps_existing_config() {
        let dir = Scratch::with_config(
            "cfg_keep",
            "[fixtures]\nbox_score = \"mine.json\"\nplay_by_play = \"b.json\"\n",
        );
        dir.put("defaults", DEFAULTS);

        assert_eq!(ensure_config_files(&dir.0).unwrap(), None);
        assert_eq!(load_config_in(&dir.0).unwrap().fixtures.box_score, "mine.json");
    }

    #[test]
    fn seeding_without_defaults_or_config_fails() {
        let dir = Scratch::new("cfg_empty");
        match ensure_config_files(&dir.0) {
            Err(ConfigError::DefaultsCopyError { message }) => {
                assert!(message.contains("pass --config-dir"));
            }
            other => panic!("expected a seeding failure, got: {other:?}"),
        }
    }
}
