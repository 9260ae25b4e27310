//! Run configuration with YAML schema and validation.
//!
//! A configuration is checked in three layers:
//! - serde rejects unknown keys and wrong types
//! - `validator` enforces strict positivity of the lengths and times
//! - a semantic pass checks relations between fields
//!
//! The core constructors ([`Grid::build`], [`TimeConfig::new`],
//! [`SchemeParams::new`]) validate again, so a config built
//! programmatically can never bypass the checks.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::{Grid, Scheme, SchemeParams, TimeConfig};
use crate::error::{AdvectError, AdvectResult};

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AdvectConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Spatial domain.
    #[validate(nested)]
    pub domain: DomainConfig,

    /// Time axis.
    #[validate(nested)]
    pub time: TimeAxisConfig,

    /// Stencil selection.
    #[serde(default)]
    pub scheme: SchemeConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

/// Spatial domain `[-L, L]` sampled with step `h`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DomainConfig {
    /// Half-width `L`.
    #[validate(range(exclusive_min = 0.0))]
    pub half_width: f64,
    /// Spatial step `h`.
    #[validate(range(exclusive_min = 0.0))]
    pub spacing: f64,
}

/// Final time `T` and time step `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TimeAxisConfig {
    /// Final time `T`.
    #[validate(range(exclusive_min = 0.0))]
    pub final_time: f64,
    /// Time step `dt`.
    #[validate(range(exclusive_min = 0.0))]
    pub dt: f64,
}

/// Scheme kind and wave speed `c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemeConfig {
    /// Stencil to step with.
    #[serde(default)]
    pub kind: Scheme,
    /// Wave speed `c`. Ignored by the naive centered stencil.
    #[serde(default = "default_wave_speed")]
    pub wave_speed: f64,
}

const fn default_wave_speed() -> f64 {
    1.0
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            kind: Scheme::default(),
            wave_speed: default_wave_speed(),
        }
    }
}

impl AdvectConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> AdvectResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> AdvectResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> AdvectResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder starting from the Lax-Friedrichs reference run.
    #[must_use]
    pub fn builder() -> AdvectConfigBuilder {
        AdvectConfigBuilder::default()
    }

    /// Reference run for a scheme.
    ///
    /// All presets share `L = 5`, `h = 0.1`, `dt = 0.025`. Downwind runs to
    /// `T = 2` with `c = -2`, Lax-Friedrichs to `T = 2` with `c = 2`, and the
    /// naive centered scheme to `T = 1`.
    #[must_use]
    pub fn preset(scheme: Scheme) -> Self {
        let (final_time, wave_speed) = match scheme {
            Scheme::Downwind => (2.0, -2.0),
            Scheme::NaiveCentered => (1.0, 1.0),
            Scheme::LaxFriedrichs => (2.0, 2.0),
        };
        Self {
            schema_version: default_schema_version(),
            domain: DomainConfig {
                half_width: 5.0,
                spacing: 0.1,
            },
            time: TimeAxisConfig {
                final_time,
                dt: 0.025,
            },
            scheme: SchemeConfig {
                kind: scheme,
                wave_speed,
            },
        }
    }

    fn validate_semantic(&self) -> AdvectResult<()> {
        let width = 2.0 * self.domain.half_width;
        if self.domain.spacing > width {
            return Err(AdvectError::config(format!(
                "domain.spacing {} exceeds domain width {width}",
                self.domain.spacing
            )));
        }
        if !self.scheme.wave_speed.is_finite() {
            return Err(AdvectError::config(format!(
                "scheme.wave_speed must be finite, got {}",
                self.scheme.wave_speed
            )));
        }
        if self.time.dt > self.time.final_time {
            tracing::warn!(
                dt = self.time.dt,
                final_time = self.time.final_time,
                "time step exceeds final time, no steps will be taken"
            );
        }
        Ok(())
    }

    /// Build the spatial grid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the domain is rejected.
    pub fn grid(&self) -> AdvectResult<Grid> {
        Grid::build(self.domain.half_width, self.domain.spacing)
    }

    /// Build the time axis.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the time axis is rejected.
    pub fn time(&self) -> AdvectResult<TimeConfig> {
        TimeConfig::new(self.time.final_time, self.time.dt)
    }

    /// Derive the stencil parameters for `grid` and `time`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the wave speed is not finite.
    pub fn params(&self, grid: &Grid, time: &TimeConfig) -> AdvectResult<SchemeParams> {
        SchemeParams::new(self.scheme.wave_speed, grid, time)
    }

    /// Selected scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        self.scheme.kind
    }
}

impl Default for AdvectConfig {
    fn default() -> Self {
        Self::preset(Scheme::default())
    }
}

/// Builder for [`AdvectConfig`].
#[derive(Debug, Default)]
pub struct AdvectConfigBuilder {
    half_width: Option<f64>,
    spacing: Option<f64>,
    final_time: Option<f64>,
    dt: Option<f64>,
    scheme: Option<Scheme>,
    wave_speed: Option<f64>,
}

impl AdvectConfigBuilder {
    /// Set the domain half-width `L`.
    #[must_use]
    pub const fn half_width(mut self, half_width: f64) -> Self {
        self.half_width = Some(half_width);
        self
    }

    /// Set the spatial step `h`.
    #[must_use]
    pub const fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Set the final time `T`.
    #[must_use]
    pub const fn final_time(mut self, final_time: f64) -> Self {
        self.final_time = Some(final_time);
        self
    }

    /// Set the time step `dt`.
    #[must_use]
    pub const fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Select the scheme.
    #[must_use]
    pub const fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Set the wave speed `c`.
    #[must_use]
    pub const fn wave_speed(mut self, wave_speed: f64) -> Self {
        self.wave_speed = Some(wave_speed);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AdvectConfig {
        let mut config = AdvectConfig::default();

        if let Some(half_width) = self.half_width {
            config.domain.half_width = half_width;
        }
        if let Some(spacing) = self.spacing {
            config.domain.spacing = spacing;
        }
        if let Some(final_time) = self.final_time {
            config.time.final_time = final_time;
        }
        if let Some(dt) = self.dt {
            config.time.dt = dt;
        }
        if let Some(scheme) = self.scheme {
            config.scheme.kind = scheme;
        }
        if let Some(wave_speed) = self.wave_speed {
            config.scheme.wave_speed = wave_speed;
        }

        config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const REFERENCE_YAML: &str = r#"
schema_version: "1.0"
domain:
  half_width: 5.0
  spacing: 0.1
time:
  final_time: 2.0
  dt: 0.025
scheme:
  kind: lax-friedrichs
  wave_speed: 2.0
"#;

    #[test]
    fn test_config_defaults() {
        let config = AdvectConfig::default();
        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.scheme(), Scheme::LaxFriedrichs);
        assert_eq!(config.domain.half_width, 5.0);
        assert_eq!(config.time.dt, 0.025);
    }

    #[test]
    fn test_config_yaml_parse() {
        let config = AdvectConfig::from_yaml(REFERENCE_YAML).unwrap();
        assert_eq!(config, AdvectConfig::preset(Scheme::LaxFriedrichs));
    }

    #[test]
    fn test_config_yaml_minimal_uses_defaults() {
        let yaml = r"
domain: { half_width: 1.0, spacing: 0.5 }
time: { final_time: 1.0, dt: 0.1 }
";
        let config = AdvectConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.scheme(), Scheme::LaxFriedrichs);
        assert_eq!(config.scheme.wave_speed, 1.0);
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let yaml = r"
domain: { half_width: 1.0, spacing: 0.5, cells: 4 }
time: { final_time: 1.0, dt: 0.1 }
";
        assert!(matches!(
            AdvectConfig::from_yaml(yaml),
            Err(AdvectError::YamlParse(_))
        ));
    }

    #[test]
    fn test_config_rejects_unknown_scheme() {
        let yaml = r"
domain: { half_width: 1.0, spacing: 0.5 }
time: { final_time: 1.0, dt: 0.1 }
scheme: { kind: upwind-third-order }
";
        assert!(AdvectConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_config_rejects_non_positive() {
        for (l, h, t, dt) in [
            (0.0, 0.1, 1.0, 0.1),
            (5.0, -0.1, 1.0, 0.1),
            (5.0, 0.1, 0.0, 0.1),
            (5.0, 0.1, 1.0, 0.0),
        ] {
            let yaml = format!(
                "domain: {{ half_width: {l}, spacing: {h} }}\ntime: {{ final_time: {t}, dt: {dt} }}\n"
            );
            let err = AdvectConfig::from_yaml(&yaml).unwrap_err();
            assert!(matches!(err, AdvectError::Validation(_)), "{yaml}: {err}");
        }
    }

    #[test]
    fn test_config_semantic_spacing_too_wide() {
        let yaml = r"
domain: { half_width: 1.0, spacing: 3.0 }
time: { final_time: 1.0, dt: 0.1 }
";
        let err = AdvectConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, AdvectError::Config { .. }));
    }

    #[test]
    fn test_config_semantic_wave_speed_not_finite() {
        let yaml = r"
domain: { half_width: 1.0, spacing: 0.5 }
time: { final_time: 1.0, dt: 0.1 }
scheme: { kind: downwind, wave_speed: .inf }
";
        let err = AdvectConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, AdvectError::Config { .. }));
    }

    #[test]
    fn test_config_builder() {
        let config = AdvectConfig::builder()
            .half_width(2.0)
            .spacing(0.5)
            .final_time(1.0)
            .dt(0.05)
            .scheme(Scheme::Downwind)
            .wave_speed(-1.0)
            .build();

        assert_eq!(config.domain.half_width, 2.0);
        assert_eq!(config.domain.spacing, 0.5);
        assert_eq!(config.time.final_time, 1.0);
        assert_eq!(config.time.dt, 0.05);
        assert_eq!(config.scheme(), Scheme::Downwind);
        assert_eq!(config.scheme.wave_speed, -1.0);
    }

    #[test]
    fn test_builder_output_revalidated_by_core() {
        let config = AdvectConfig::builder().spacing(-1.0).build();
        assert!(config.grid().unwrap_err().is_parameter_error());
    }

    #[test]
    fn test_presets() {
        let downwind = AdvectConfig::preset(Scheme::Downwind);
        assert_eq!(downwind.scheme.wave_speed, -2.0);
        assert_eq!(downwind.time().unwrap().steps(), 80);

        let naive = AdvectConfig::preset(Scheme::NaiveCentered);
        assert_eq!(naive.time().unwrap().steps(), 40);

        let lf = AdvectConfig::preset(Scheme::LaxFriedrichs);
        assert_eq!(lf.scheme.wave_speed, 2.0);
        assert_eq!(lf.grid().unwrap().n(), 101);
    }

    #[test]
    fn test_params_from_config() {
        let config = AdvectConfig::preset(Scheme::LaxFriedrichs);
        let grid = config.grid().unwrap();
        let time = config.time().unwrap();
        let params = config.params(&grid, &time).unwrap();
        assert_eq!(params.gamma(), 0.025 / 0.1);
        assert_eq!(params.wave_speed(), 2.0);
    }

    #[test]
    fn test_yaml_round_trip() {
        for scheme in Scheme::ALL {
            let config = AdvectConfig::preset(scheme);
            let yaml = config.to_yaml().unwrap();
            assert_eq!(AdvectConfig::from_yaml(&yaml).unwrap(), config);
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        std::fs::write(&path, REFERENCE_YAML).unwrap();
        let config = AdvectConfig::load(&path).unwrap();
        assert_eq!(config.scheme(), Scheme::LaxFriedrichs);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AdvectConfig::load("/nonexistent/advecta.yaml").unwrap_err();
        assert!(matches!(err, AdvectError::Io(_)));
    }
}
