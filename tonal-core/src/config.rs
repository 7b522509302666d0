use std::path::{Path, PathBuf};

use serde::Deserialize;

use tonal_types::{JustFlavor, Mode, Pitch, PitchDirection, RangePolicy, TonalState};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: DefaultsConfig,
    #[serde(default)]
    linkage: LinkageConfig,
    #[serde(default)]
    approximation: ApproximationConfig,
}

/// A note given either as a number or a scientific pitch name.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
enum NoteSpec {
    Number(i32),
    Name(String),
}

impl NoteSpec {
    fn to_pitch(&self) -> Option<Pitch> {
        match self {
            NoteSpec::Number(n) => Pitch::new(*n).ok(),
            NoteSpec::Name(name) => Pitch::from_name(name),
        }
    }
}

#[derive(Deserialize, Default)]
struct DefaultsConfig {
    tonic: Option<NoteSpec>,
    mode: Option<i32>,
    direction: Option<String>,
    tuning_a4: Option<f64>,
    just_flavor: Option<String>,
}

#[derive(Deserialize, Default)]
struct LinkageConfig {
    auto_mode_tonic: Option<bool>,
    direction_linkage: Option<bool>,
    range_policy: Option<String>,
}

#[derive(Deserialize, Default)]
struct ApproximationConfig {
    tolerance: Option<f64>,
}

/// Error reading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Toml(e) => write!(f, "TOML error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    defaults: DefaultsConfig,
    linkage: LinkageConfig,
    approximation: ApproximationConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    ///
    /// A malformed or unreadable user file is logged and ignored.
    pub fn load() -> Self {
        let mut config = Self::embedded();
        if let Some(path) = user_config_path() {
            if path.exists() {
                if let Err(e) = config.merge_file(&path) {
                    log::warn!(target: "config", "ignoring config {}: {}", path.display(), e);
                }
            }
        }
        config
    }

    /// Embedded defaults merged with the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::embedded();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Embedded defaults merged with TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config = Self::embedded();
        config.merge(toml::from_str(contents)?);
        Ok(config)
    }

    fn embedded() -> Self {
        let base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!(target: "config", "embedded config.toml is malformed: {}", e);
            ConfigFile::default()
        });
        Config {
            defaults: base.defaults,
            linkage: base.linkage,
            approximation: base.approximation,
        }
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        self.merge(toml::from_str(&contents)?);
        log::info!(target: "config", "loaded {}", path.display());
        Ok(())
    }

    fn merge(&mut self, user: ConfigFile) {
        merge_defaults(&mut self.defaults, user.defaults);
        merge_linkage(&mut self.linkage, user.linkage);
        if user.approximation.tolerance.is_some() {
            self.approximation.tolerance = user.approximation.tolerance;
        }
    }

    /// The state a new session starts from.
    pub fn initial_state(&self) -> TonalState {
        let fallback = TonalState::new();
        let d = &self.defaults;
        let l = &self.linkage;
        TonalState {
            tonic: checked("tonic", d.tonic.as_ref(), NoteSpec::to_pitch, fallback.tonic),
            mode: checked("mode", d.mode.as_ref(), |m| Mode::new(*m).ok(), fallback.mode),
            direction: checked(
                "direction",
                d.direction.as_ref(),
                |s| parse_direction(s),
                fallback.direction,
            ),
            octave_shift: 0,
            auto_mode_tonic: l.auto_mode_tonic.unwrap_or(fallback.auto_mode_tonic),
            direction_linkage: l.direction_linkage.unwrap_or(fallback.direction_linkage),
            range_policy: checked(
                "range_policy",
                l.range_policy.as_ref(),
                |s| RangePolicy::from_name(s),
                fallback.range_policy,
            ),
        }
    }

    /// Approximation tolerance, falling back to the default outside `[0, 1)`.
    pub fn tolerance(&self) -> f64 {
        checked(
            "tolerance",
            self.approximation.tolerance.as_ref(),
            |t| Some(*t).filter(|t| (0.0..1.0).contains(t)),
            tonal_types::DEFAULT_TOLERANCE,
        )
    }

    /// Reference frequency for A4 (clamped to 20..20000 Hz).
    pub fn tuning_a4(&self) -> f64 {
        checked(
            "tuning_a4",
            self.defaults.tuning_a4.as_ref(),
            |hz| Some(*hz).filter(|hz| hz.is_finite()),
            tonal_types::tuning::DEFAULT_A4,
        )
        .clamp(20.0, 20_000.0)
    }

    pub fn just_flavor(&self) -> JustFlavor {
        checked(
            "just_flavor",
            self.defaults.just_flavor.as_ref(),
            |s| JustFlavor::from_name(s),
            JustFlavor::default(),
        )
    }
}

/// Parse a configured value, warning and falling back when it is invalid.
fn checked<R: std::fmt::Debug, T>(
    field: &str,
    raw: Option<&R>,
    parse: impl FnOnce(&R) -> Option<T>,
    fallback: T,
) -> T {
    match raw {
        None => fallback,
        Some(r) => parse(r).unwrap_or_else(|| {
            log::warn!(target: "config", "invalid {} {:?}, using default", field, r);
            fallback
        }),
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tonal").join("config.toml"))
}

fn merge_defaults(base: &mut DefaultsConfig, user: DefaultsConfig) {
    if user.tonic.is_some() {
        base.tonic = user.tonic;
    }
    if user.mode.is_some() {
        base.mode = user.mode;
    }
    if user.direction.is_some() {
        base.direction = user.direction;
    }
    if user.tuning_a4.is_some() {
        base.tuning_a4 = user.tuning_a4;
    }
    if user.just_flavor.is_some() {
        base.just_flavor = user.just_flavor;
    }
}

fn merge_linkage(base: &mut LinkageConfig, user: LinkageConfig) {
    if user.auto_mode_tonic.is_some() {
        base.auto_mode_tonic = user.auto_mode_tonic;
    }
    if user.direction_linkage.is_some() {
        base.direction_linkage = user.direction_linkage;
    }
    if user.range_policy.is_some() {
        base.range_policy = user.range_policy;
    }
}

fn parse_direction(s: &str) -> Option<PitchDirection> {
    PitchDirection::ALL
        .into_iter()
        .find(|d| d.name().eq_ignore_ascii_case(s))
}
