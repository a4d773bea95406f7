//! Document and per-page configuration.
//!
//! Configuration flows through three layers: built-in defaults, an optional
//! external defaults file, and the document's own `---` blocks (a preamble
//! block sets document-wide values, later blocks override the current page
//! only). Raw blocks are merged as YAML value trees ([`merge_values`]) and
//! the merged tree is resolved into a typed [`Config`] once per page, so no
//! formatting state is ever shared between pages.

mod color;
mod merge;

pub use color::Color;
pub use merge::{merge_values, merged};

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};

/// Named layout policy controlling where the text and image regions sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Image fills the left half of the page, text on the right.
    ImageLeftHalf,
    /// Smaller image area inside the left margins, text on the right.
    ImageLeftSmall,
    /// Image fills the right half of the page, text on the left.
    ImageRightHalf,
    /// Smaller image area inside the right margins, text on the left.
    ImageRightSmall,
    /// Image strip above vertically stacked text, both centered.
    ImageCenter,
    /// Images cover the whole page behind the text area.
    ImageFill,
}

impl Layout {
    /// All layouts, in configuration-name order.
    pub const ALL: [Layout; 6] = [
        Layout::ImageLeftHalf,
        Layout::ImageLeftSmall,
        Layout::ImageRightHalf,
        Layout::ImageRightSmall,
        Layout::ImageCenter,
        Layout::ImageFill,
    ];

    /// Parse a configuration name. `center` is accepted as an alias for the
    /// center layout; unknown names return `None`.
    pub fn parse(name: &str) -> Option<Layout> {
        match name {
            "image_left_half" => Some(Layout::ImageLeftHalf),
            "image_left_small" => Some(Layout::ImageLeftSmall),
            "image_right_half" => Some(Layout::ImageRightHalf),
            "image_right_small" => Some(Layout::ImageRightSmall),
            "image_center" | "center" => Some(Layout::ImageCenter),
            "image_fill" => Some(Layout::ImageFill),
            _ => None,
        }
    }

    /// Configuration name of this layout.
    pub fn name(&self) -> &'static str {
        match self {
            Layout::ImageLeftHalf => "image_left_half",
            Layout::ImageLeftSmall => "image_left_small",
            Layout::ImageRightHalf => "image_right_half",
            Layout::ImageRightSmall => "image_right_small",
            Layout::ImageCenter => "image_center",
            Layout::ImageFill => "image_fill",
        }
    }

    /// Center-family layouts stack the image strip above the text.
    pub fn is_center_family(&self) -> bool {
        matches!(self, Layout::ImageCenter)
    }

    /// Small layouts keep the image area inside the page margins.
    pub fn is_small(&self) -> bool {
        matches!(self, Layout::ImageLeftSmall | Layout::ImageRightSmall)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::ImageCenter
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Layout::parse(&name).unwrap_or_else(|| {
            log::warn!("unrecognized layout {:?}, falling back to image_fill", name);
            Layout::ImageFill
        }))
    }
}

/// Page margins in document units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Left margin.
    pub x0: f32,
    /// Top margin.
    pub y0: f32,
    /// Right margin.
    pub x1: f32,
    /// Bottom margin.
    pub y1: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            x0: 30.0,
            y0: 40.0,
            x1: 30.0,
            y1: 40.0,
        }
    }
}

/// Page geometry and typography sizes, all in document units.
///
/// The defaults describe a 16:9 deck at 480x270 with the type scale the
/// layout formulas were tuned against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    /// Page width.
    pub page_width: f32,
    /// Page height.
    pub page_height: f32,
    /// Page margins.
    pub page_margins: Margins,
    /// Gutter between grid cells, columns and stacked boxes.
    pub internal_margin: f32,
    /// Body font size.
    pub font_size_standard: f32,
    /// Title font size.
    pub font_size_title: f32,
    /// Subtitle font size.
    pub font_size_subtitle: f32,
    /// Footer font size.
    pub font_size_footer: f32,
    /// Body line height.
    pub em: f32,
    /// Title line height.
    pub em_title: f32,
    /// Footer line height.
    pub em_footer: f32,
    /// Distance of the footer (and logo) from the page edge.
    pub margin_footer: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            page_width: 480.0,
            page_height: 270.0,
            page_margins: Margins::default(),
            internal_margin: 10.0,
            font_size_standard: 34.0,
            font_size_title: 72.0,
            font_size_subtitle: 40.0,
            font_size_footer: 12.0,
            em: 18.0,
            em_title: 26.0,
            em_footer: 6.0,
            margin_footer: 4.0,
        }
    }
}

impl Dimensions {
    /// Drawable width between the horizontal margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - self.page_margins.x0 - self.page_margins.x1
    }

    /// Drawable height between the vertical margins.
    pub fn content_height(&self) -> f32 {
        self.page_height - self.page_margins.y0 - self.page_margins.y1
    }
}

/// Per-category font file references, resolved relative to the input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fonts {
    /// Body font.
    pub font_file_standard: Option<String>,
    /// Body italic variant.
    pub font_file_standard_italic: Option<String>,
    /// Body bold variant.
    pub font_file_standard_bold: Option<String>,
    /// Body bold-italic variant.
    pub font_file_standard_bolditalic: Option<String>,
    /// Title font (also used for subtitles).
    pub font_file_title: Option<String>,
    /// Footer font.
    pub font_file_footer: Option<String>,
}

impl Fonts {
    /// Whether any font file is configured at all.
    pub fn any_configured(&self) -> bool {
        self.font_file_standard.is_some()
            || self.font_file_standard_italic.is_some()
            || self.font_file_standard_bold.is_some()
            || self.font_file_standard_bolditalic.is_some()
            || self.font_file_title.is_some()
            || self.font_file_footer.is_some()
    }
}

/// Resolved configuration for one page (or the document defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Layout policy for the page.
    pub layout: Layout,

    /// Page geometry and type sizes.
    pub dimensions: Dimensions,

    /// Body and title text color.
    pub text_color: Color,

    /// Page background color.
    pub background_color: Color,

    /// Footer text color.
    pub footer_color: Color,

    /// Callout box border color.
    pub box_border_color: Color,

    /// Callout box fill color.
    pub box_fill_color: Color,

    /// Number of body text columns (at least 1).
    pub columns: u32,

    /// Crop images to exactly fill their grid cell ("cover") instead of
    /// fitting them inside it ("contain").
    pub crop_images: bool,

    /// Pack grid cells edge to edge with no gutters.
    pub packed_images: bool,

    /// Exclude the page from output and from the headline index.
    pub hidden: bool,

    /// Deprecated spelling of `hidden: true` (`visibility: hidden`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    /// Expand list items into cumulative reveal steps.
    pub incremental_bullets: bool,

    /// Font file references.
    pub fonts: Fonts,

    /// Footer line printed near the bottom page edge.
    #[serde(alias = "tiny_footer", skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Logo image stamped near the bottom-right corner of every page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// Full-bleed background image behind the page content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,

    /// Unrecognized keys, kept for forward compatibility and for backends
    /// that understand more than the core does.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            dimensions: Dimensions::default(),
            text_color: Color::BLACK,
            background_color: Color::WHITE,
            footer_color: Color::gray(128),
            box_border_color: Color::gray(200),
            box_fill_color: Color::rgb(230, 240, 255),
            columns: 1,
            crop_images: true,
            packed_images: true,
            hidden: false,
            visibility: None,
            incremental_bullets: false,
            fonts: Fonts::default(),
            footer: None,
            logo: None,
            background_image: None,
            extra: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Resolve a merged raw value tree into a typed configuration.
    ///
    /// `line` is the 1-indexed line number reported if the tree does not
    /// deserialize (wrong value types rather than wrong syntax).
    pub fn resolve(value: &Value, line: usize) -> Result<Config> {
        let mut config: Config =
            serde_yaml::from_value(value.clone()).map_err(|e| Error::ConfigParse {
                line,
                message: e.to_string(),
            })?;
        if config.visibility.as_deref() == Some("hidden") {
            log::warn!("\"visibility\": \"hidden\" is deprecated, use \"hidden\": true");
            config.hidden = true;
        }
        Ok(config)
    }

    /// Empty raw value tree: the starting point before any defaults file or
    /// document block is merged.
    pub fn empty_value() -> Value {
        Value::Mapping(serde_yaml::Mapping::new())
    }

    /// Load an external defaults file (same schema as an inline `---`
    /// block), to be merged beneath the document preamble.
    pub fn load_defaults_file<P: AsRef<Path>>(path: P) -> Result<Value> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_yaml::from_str(&text).map_err(|e| Error::ConfigParse {
            line: 1,
            message: format!("{}: {}", path.as_ref().display(), e),
        })?;
        match value {
            Value::Null => Ok(Config::empty_value()),
            Value::Mapping(_) => Ok(value),
            other => Err(Error::ConfigParse {
                line: 1,
                message: format!(
                    "{}: expected a key/value mapping, got {:?}",
                    path.as_ref().display(),
                    other
                ),
            }),
        }
    }

    /// Whether the page is excluded from output.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Set the layout policy.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Set the column count.
    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Set the crop policy.
    pub fn with_crop_images(mut self, crop: bool) -> Self {
        self.crop_images = crop;
        self
    }

    /// Set the packing policy.
    pub fn with_packed_images(mut self, packed: bool) -> Self {
        self.packed_images = packed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_deck() {
        let config = Config::default();
        assert_eq!(config.layout, Layout::ImageCenter);
        assert_eq!(config.dimensions.page_width, 480.0);
        assert_eq!(config.dimensions.page_height, 270.0);
        assert_eq!(config.dimensions.em_title, 26.0);
        assert!(config.crop_images);
        assert!(config.packed_images);
        assert_eq!(config.columns, 1);
    }

    #[test]
    fn test_resolve_partial_override() {
        let value: Value = serde_yaml::from_str(
            "layout: image_left_half\ndimensions:\n  page_width: 960\ncolumns: 2",
        )
        .unwrap();
        let config = Config::resolve(&value, 1).unwrap();
        assert_eq!(config.layout, Layout::ImageLeftHalf);
        assert_eq!(config.dimensions.page_width, 960.0);
        // siblings keep their defaults
        assert_eq!(config.dimensions.page_height, 270.0);
        assert_eq!(config.columns, 2);
    }

    #[test]
    fn test_resolve_type_error_reports_line() {
        let value: Value = serde_yaml::from_str("columns: lots").unwrap();
        let err = Config::resolve(&value, 12).unwrap_err();
        match err {
            Error::ConfigParse { line, .. } => assert_eq!(line, 12),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let value: Value = serde_yaml::from_str("transition: fade\nlayout: image_fill").unwrap();
        let config = Config::resolve(&value, 1).unwrap();
        assert_eq!(
            config.extra.get("transition"),
            Some(&Value::String("fade".into()))
        );
    }

    #[test]
    fn test_layout_aliases_and_fallback() {
        assert_eq!(Layout::parse("center"), Some(Layout::ImageCenter));
        assert_eq!(Layout::parse("image_fill"), Some(Layout::ImageFill));
        assert_eq!(Layout::parse("mosaic"), None);

        // unknown names fall back to image_fill at deserialization time
        let value: Value = serde_yaml::from_str("layout: mosaic").unwrap();
        let config = Config::resolve(&value, 1).unwrap();
        assert_eq!(config.layout, Layout::ImageFill);
    }

    #[test]
    fn test_deprecated_visibility_spelling() {
        let value: Value = serde_yaml::from_str("visibility: hidden").unwrap();
        let config = Config::resolve(&value, 1).unwrap();
        assert!(config.is_hidden());
    }

    #[test]
    fn test_footer_alias() {
        let value: Value = serde_yaml::from_str("tiny_footer: deckdown 2026").unwrap();
        let config = Config::resolve(&value, 1).unwrap();
        assert_eq!(config.footer.as_deref(), Some("deckdown 2026"));
    }

    #[test]
    fn test_color_normalization_in_config() {
        let value: Value =
            serde_yaml::from_str("text_color: white\nbackground_color: \"#202020\"").unwrap();
        let config = Config::resolve(&value, 1).unwrap();
        assert_eq!(config.text_color, Color::WHITE);
        assert_eq!(config.background_color, Color::rgb(32, 32, 32));
    }
}
