//! Wavelane - Digital timing diagrams rendered to SVG.
//!
//! Parsing, layout, and rendering of WaveJSON-style timing diagrams: lanes
//! written in a compact per-cycle wave notation, nested groups, axis
//! annotations and arcs between named events.
//!
//! The pipeline is parse ([`wavelane_parser`]), walk and compile
//! ([`layout`], [`wave`]), render ([`Renderer`]) and export to SVG text.

pub mod config;
pub mod layout;
pub mod wave;

mod error;
mod export;
mod render;

pub use wavelane_core::{brick, color, element, semantic, skin};

pub use error::{RenderError, WavelaneError};
pub use render::Renderer;

use std::fs;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;

/// Builder for parsing and rendering Wavelane diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use wavelane::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{ "signal": [{ "name": "clk", "wave": "p...." }] }"#;
///
/// // With custom config
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Parse source to semantic model
/// let diagram = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Render semantic model to SVG
/// let svg = builder.render_svg(&diagram, 0)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including render and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse WaveJSON source into a semantic diagram.
    ///
    /// # Arguments
    ///
    /// * `source` - WaveJSON source text
    ///
    /// # Errors
    ///
    /// Returns `WavelaneError::Parse` for malformed JSON, wrong field types
    /// or unsupported diagram kinds.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelane::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// let diagram = builder
    ///     .parse(r#"{ "signal": [{ "name": "a", "wave": "01" }] }"#)
    ///     .expect("Failed to parse diagram");
    /// assert_eq!(diagram.signal().children().len(), 1);
    /// ```
    pub fn parse(&self, source: &str) -> Result<semantic::Diagram, WavelaneError> {
        info!("Parsing diagram");

        let diagram = wavelane_parser::parse(source)
            .map_err(|err| WavelaneError::new_parse_error(err, source))?;

        debug!("Diagram parsed successfully");
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Render a semantic diagram to an SVG string.
    ///
    /// `index` numbers diagrams sharing one page; only diagram `0` embeds
    /// the skin style and glyph definitions.
    ///
    /// # Arguments
    ///
    /// * `diagram` - A semantic diagram to render
    /// * `index` - Position of the diagram on its page
    ///
    /// # Errors
    ///
    /// Returns `WavelaneError` when the glyph definition file cannot be read,
    /// the configured style is invalid, or an edge names an undefined event.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavelane::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// let diagram = builder
    ///     .parse(r#"{ "signal": [{ "name": "a", "wave": "1|0" }] }"#)
    ///     .expect("Failed to parse");
    ///
    /// let svg = builder.render_svg(&diagram, 0)
    ///     .expect("Failed to render diagram");
    /// assert!(svg.contains("href=\"#gap\""));
    /// ```
    pub fn render_svg(
        &self,
        diagram: &semantic::Diagram,
        index: usize,
    ) -> Result<String, WavelaneError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(WavelaneError::Config)?;

        let render_config = self.config.render();
        let mut renderer = Renderer::new().with_strict(render_config.strict());
        if let Some(path) = render_config.skin_defs() {
            info!(path = path.display().to_string(); "Loading glyph definitions");
            renderer = renderer.with_glyph_defs(fs::read_to_string(path)?);
        }

        let root = renderer.render(diagram, index)?;

        let exporter = export::svg::SvgBuilder::new()
            .with_background_color(background)
            .build();
        let svg = exporter.export_document(&root)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }
}
