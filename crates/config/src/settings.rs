//! Tunable settings with file + environment layering

use serde::Deserialize;
use std::time::Duration;
use waypoint_core::Error;

/// Runtime-tunable knobs. Defaults are the production values; a TOML file
/// and `WAYPOINT_*` environment variables may override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum similarity for strict (single bare-name) resolution
    pub strict_threshold: f32,
    /// Minimum similarity for lenient (consultation bulk) resolution
    pub lenient_threshold: f32,
    /// Bounded candidate count per catalog query
    pub candidate_limit: usize,
    /// Minimum resolved places per city before supplementation stops
    pub min_city_places: usize,
    /// Deadline for answer-generation calls
    pub generation_timeout_secs: u64,
    /// Deadline for the classification call (tighter: a fallback exists)
    pub classification_timeout_secs: u64,
    /// Hard word cap for generated place descriptions
    pub description_word_cap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strict_threshold: 0.85,
            lenient_threshold: 0.7,
            candidate_limit: 20,
            min_city_places: 3,
            generation_timeout_secs: 8,
            classification_timeout_secs: 5,
            description_word_cap: 60,
        }
    }
}

impl Settings {
    /// Layer defaults, an optional TOML file and `WAYPOINT_*` environment
    /// variables (e.g. `WAYPOINT_STRICT_THRESHOLD=0.9`).
    pub fn load(file: Option<&str>) -> Result<Self, Error> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(config::Environment::with_prefix("WAYPOINT"));
        let settings: Settings = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::Configuration(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.lenient_threshold)
            || !(0.0..=1.0).contains(&self.strict_threshold)
        {
            return Err(Error::Configuration(
                "similarity thresholds must be within [0, 1]".into(),
            ));
        }
        if self.strict_threshold < self.lenient_threshold {
            return Err(Error::Configuration(
                "strict_threshold must be >= lenient_threshold".into(),
            ));
        }
        Ok(())
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn classification_timeout(&self) -> Duration {
        Duration::from_secs(self.classification_timeout_secs)
    }
}
