//! Configuration types for Wavelane rendering.
//!
//! All types implement [`serde::Deserialize`] so front ends can load them
//! from external sources such as TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Strict mode and external glyph definitions.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use wavelane::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(!config.render().strict());
//! assert!(config.style().background_color().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use wavelane_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Options that change what the renderer draws.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Skip extensions such as inline lane labels.
    #[serde(default)]
    strict: bool,

    /// File of SVG glyph definitions embedded into the output.
    #[serde(default)]
    skin_defs: Option<PathBuf>,
}

impl RenderConfig {
    pub fn new(strict: bool, skin_defs: Option<PathBuf>) -> Self {
        Self { strict, skin_defs }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn skin_defs(&self) -> Option<&Path> {
        self.skin_defs.as_deref()
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for diagrams, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style with the given background color string.
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
