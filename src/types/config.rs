//! Compile-time shell configuration.
//!
//! Everything is fixed per build and nothing is read or written at runtime:
//! the origin comes from `WEBSHELL_ORIGIN_URL` at compile time (falling back
//! to [`DEFAULT_ORIGIN_URL`]), pull-to-refresh from the `pull-to-refresh`
//! cargo feature, and the window chrome from [`WindowSettings::BUILD`].

use url::Url;

use crate::types::errors::ConfigError;

/// Origin used when no `WEBSHELL_ORIGIN_URL` is set at build time.
pub const DEFAULT_ORIGIN_URL: &str = "https://vistara.live/";

/// Origin baked into this build.
pub const BUILD_ORIGIN_URL: &str = match option_env!("WEBSHELL_ORIGIN_URL") {
    Some(url) => url,
    None => DEFAULT_ORIGIN_URL,
};

/// Configuration of one shell variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    origin_url: String,
    pull_to_refresh: bool,
}

impl ShellConfig {
    /// Validates `origin_url` and builds a config.
    ///
    /// The origin must be an absolute http(s) URL with a host. The stored
    /// value is the normalized serialization, so `https://example.com`
    /// becomes `https://example.com/`.
    pub fn new(origin_url: &str, pull_to_refresh: bool) -> Result<Self, ConfigError> {
        let parsed = Url::parse(origin_url.trim()).map_err(|e| ConfigError::InvalidOrigin {
            url: origin_url.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidOrigin {
                url: origin_url.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            origin_url: parsed.as_str().to_string(),
            pull_to_refresh,
        })
    }

    /// The configuration this binary was compiled with.
    pub fn from_build() -> Result<Self, ConfigError> {
        Self::new(BUILD_ORIGIN_URL, cfg!(feature = "pull-to-refresh"))
    }

    /// The single allowed navigation origin, also the initial load target.
    pub fn origin_url(&self) -> &str {
        &self.origin_url
    }

    pub fn pull_to_refresh(&self) -> bool {
        self.pull_to_refresh
    }
}

/// Window chrome of the shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSettings {
    pub title: &'static str,
    pub width: f64,
    pub height: f64,
    /// RGBA shown behind the page before it paints.
    pub background_color: (u8, u8, u8, u8),
    /// CSS colour of the progress bar.
    pub tint_color: &'static str,
    pub devtools: bool,
}

impl WindowSettings {
    pub const BUILD: WindowSettings = WindowSettings {
        title: "Vistara",
        width: 420.0,
        height: 860.0,
        background_color: (0, 0, 0, 255),
        tint_color: "#0a7ea4",
        devtools: cfg!(debug_assertions),
    };
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::BUILD
    }
}
