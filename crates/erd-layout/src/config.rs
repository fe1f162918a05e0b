//! Configuration types for automatic ER diagram layout.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources. Every field falls back to its default when omitted, and
//! unknown keys are ignored.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout options and view settings.
//! - [`LayoutOptions`] - Spacing and style values used by one layout run.
//! - [`ViewConfig`] - Size of the view that laid-out content is fitted into.
//!
//! # Example
//!
//! ```
//! # use erd_layout::config::LayoutOptions;
//! let options = LayoutOptions::default();
//! assert_eq!(options.entity_spacing(), 180.0);
//! assert_eq!(options.border_color(), "#1890ff");
//! ```

use serde::Deserialize;

/// Top-level configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout options section.
    #[serde(default)]
    layout: LayoutOptions,

    /// View section.
    #[serde(default)]
    view: ViewConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(layout: LayoutOptions, view: ViewConfig) -> Self {
        Self { layout, view }
    }

    /// Returns the layout options.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Returns the view configuration.
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }
}

/// Options recognized by one layout run.
///
/// Keys are snake_case; the camelCase spellings (`entitySpacing`,
/// `backgroundColor`, ...) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Minimum radius of the circle entities are placed on.
    #[serde(alias = "entitySpacing")]
    entity_spacing: f32,

    /// Base distance between an entity and its attributes.
    #[serde(alias = "attributeSpacing")]
    attribute_spacing: f32,

    #[serde(alias = "fontSize")]
    font_size: f32,

    #[serde(alias = "backgroundColor")]
    background_color: String,

    /// Node border color, also used as the link color.
    #[serde(alias = "borderColor")]
    border_color: String,

    /// Node text color, also used as the link text color.
    #[serde(alias = "textColor")]
    text_color: String,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            entity_spacing: 180.0,
            attribute_spacing: 100.0,
            font_size: 16.0,
            background_color: "#ffffff".to_string(),
            border_color: "#1890ff".to_string(),
            text_color: "#333333".to_string(),
        }
    }
}

impl LayoutOptions {
    pub fn entity_spacing(&self) -> f32 {
        self.entity_spacing
    }

    pub fn attribute_spacing(&self) -> f32 {
        self.attribute_spacing
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn border_color(&self) -> &str {
        &self.border_color
    }

    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    pub fn with_entity_spacing(mut self, spacing: f32) -> Self {
        self.entity_spacing = spacing;
        self
    }

    pub fn with_attribute_spacing(mut self, spacing: f32) -> Self {
        self.attribute_spacing = spacing;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = color.into();
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }
}

/// Size of the view that content is fitted into after a layout.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    width: f32,
    height: f32,
    /// Margin kept around the content when fitting.
    padding: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 40.0,
        }
    }
}

impl ViewConfig {
    pub fn new(width: f32, height: f32, padding: f32) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_options_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.entity_spacing(), 180.0);
        assert_eq!(options.attribute_spacing(), 100.0);
        assert_eq!(options.font_size(), 16.0);
        assert_eq!(options.background_color(), "#ffffff");
        assert_eq!(options.border_color(), "#1890ff");
        assert_eq!(options.text_color(), "#333333");
    }

    #[test]
    fn test_layout_options_builders() {
        let options = LayoutOptions::default()
            .with_entity_spacing(300.0)
            .with_attribute_spacing(40.0)
            .with_font_size(12.0)
            .with_background_color("black")
            .with_border_color("red")
            .with_text_color("white");
        assert_eq!(options.entity_spacing(), 300.0);
        assert_eq!(options.attribute_spacing(), 40.0);
        assert_eq!(options.font_size(), 12.0);
        assert_eq!(options.background_color(), "black");
        assert_eq!(options.border_color(), "red");
        assert_eq!(options.text_color(), "white");
    }

    #[test]
    fn test_view_config_defaults() {
        let view = ViewConfig::default();
        assert_eq!(view.width(), 1200.0);
        assert_eq!(view.height(), 800.0);
        assert_eq!(view.padding(), 40.0);
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.layout(), &LayoutOptions::default());
        assert_eq!(config.view(), &ViewConfig::default());
    }
}
