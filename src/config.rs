use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::carousel::CarouselConfig;
use crate::error::{AppError, AppResult};
use crate::sync::{ObserverConfig, ProviderKind};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub carousel: CarouselSettings,
    pub page: PageConfig,
    pub keymap: KeymapConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    pub settle_delay_ms: u64,
    pub visibility_threshold: f32,
    pub frame_interval_ms: u64,
    pub providers: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1000,
            visibility_threshold: 0.5,
            frame_interval_ms: 16,
            providers: vec!["intersection".to_string(), "scroll-offset".to_string()],
        }
    }
}

impl SyncConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn observer_config(&self) -> ObserverConfig {
        ObserverConfig {
            threshold: self.visibility_threshold,
            frame_interval: self.frame_interval(),
        }
    }

    /// Known provider ids in configured order; unknown ids are dropped.
    pub fn provider_candidates(&self) -> Vec<ProviderKind> {
        self.providers
            .iter()
            .filter_map(|id| {
                let kind = ProviderKind::parse(id);
                if kind.is_none() {
                    tracing::warn!(provider = %id, "ignoring unknown visibility provider");
                }
                kind
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CarouselSettings {
    pub tick_interval_ms: u64,
    pub override_window_ms: u64,
    pub autoplay: bool,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 4000,
            override_window_ms: 4000,
            autoplay: true,
        }
    }
}

impl CarouselSettings {
    pub fn carousel_config(&self) -> CarouselConfig {
        CarouselConfig {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            override_window: Duration::from_millis(self.override_window_ms),
            autoplay: self.autoplay,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageConfig {
    pub scroll_step: u32,
    pub scroll_animation_ms: u64,
    pub lazy_root_margin: u32,
    pub nav_retry_attempts: u32,
    pub nav_retry_backoff_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_step: 3,
            scroll_animation_ms: 400,
            lazy_root_margin: 8,
            nav_retry_attempts: 5,
            nav_retry_backoff_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.sync.settle_delay_ms = self.sync.settle_delay_ms.max(1);
        self.sync.frame_interval_ms = self.sync.frame_interval_ms.max(1);
        let threshold = self.sync.visibility_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
            self.sync.visibility_threshold = SyncConfig::default().visibility_threshold;
        }
        self.carousel.tick_interval_ms = self.carousel.tick_interval_ms.max(1);
        self.carousel.override_window_ms = self.carousel.override_window_ms.max(1);
        self.page.scroll_step = self.page.scroll_step.max(1);
        self.page.scroll_animation_ms = self.page.scroll_animation_ms.max(1);
        self.page.nav_retry_backoff_ms = self.page.nav_retry_backoff_ms.max(1);
        self
    }

    /// Settings that load fine but probably do not do what was meant.
    /// Config loads before logging is up, so the caller logs these.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.carousel.override_window_ms < self.carousel.tick_interval_ms {
            warnings.push(format!(
                "carousel override window ({}ms) is shorter than the tick interval ({}ms); manual actions will not hold autoplay",
                self.carousel.override_window_ms, self.carousel.tick_interval_ms
            ));
        }
        warnings
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("FOLIO_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("folio").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("folio")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("folio").join("config.toml"));
    }
    None
}
