//! Color values for backgrounds, text, footers and callout boxes.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A color setting.
///
/// Known raw forms are normalized to an RGB triple when the configuration is
/// resolved: a named constant (`"white"`, `"darkred"`, ...), a 6-hex-digit
/// string with or without a leading `#`, a `[r, g, b]` triple, or a single
/// gray level. Any other string is kept verbatim for the backend to
/// interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// Normalized RGB triple.
    Rgb([u8; 3]),
    /// Unrecognized raw form, passed through to the backend.
    Raw(String),
}

/// Named constants accepted in configuration blocks.
const NAMED: &[(&str, [u8; 3])] = &[
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
    ("darkred", [139, 0, 0]),
    ("green", [0, 128, 0]),
    ("darkgreen", [0, 100, 0]),
    ("blue", [0, 0, 255]),
    ("darkblue", [0, 0, 139]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("lightgray", [211, 211, 211]),
    ("darkgray", [64, 64, 64]),
];

impl Color {
    /// Pure white.
    pub const WHITE: Color = Color::Rgb([255, 255, 255]);

    /// Pure black.
    pub const BLACK: Color = Color::Rgb([0, 0, 0]);

    /// Create a color from an RGB triple.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb([r, g, b])
    }

    /// Create a gray level (all three channels equal).
    pub fn gray(level: u8) -> Self {
        Color::Rgb([level, level, level])
    }

    /// Normalize a raw string form.
    ///
    /// Named constants and `RRGGBB` / `#RRGGBB` hex strings become RGB
    /// triples; everything else is passed through unchanged.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        if let Some((_, rgb)) = NAMED.iter().find(|(name, _)| *name == lower) {
            return Color::Rgb(*rgb);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
            let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
            let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
            return Color::Rgb([r, g, b]);
        }
        Color::Raw(raw.to_string())
    }

    /// Get the RGB triple if this color is normalized.
    pub fn as_rgb(&self) -> Option<[u8; 3]> {
        match self {
            Color::Rgb(rgb) => Some(*rgb),
            Color::Raw(_) => None,
        }
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Color::Rgb(rgb)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Color::Rgb(rgb) => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                for channel in rgb {
                    seq.serialize_element(channel)?;
                }
                seq.end()
            }
            Color::Raw(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Raw forms accepted during deserialization.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Triple([u8; 3]),
    Level(u8),
    Text(String),
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Triple(rgb) => Color::Rgb(rgb),
            ColorRepr::Level(level) => Color::gray(level),
            ColorRepr::Text(text) => Color::parse(&text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::parse("white"), Color::Rgb([255, 255, 255]));
        assert_eq!(Color::parse("darkred"), Color::Rgb([139, 0, 0]));
        assert_eq!(Color::parse("Grey"), Color::Rgb([128, 128, 128]));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Color::parse("ff8000"), Color::Rgb([255, 128, 0]));
        assert_eq!(Color::parse("#0000ff"), Color::Rgb([0, 0, 255]));
    }

    #[test]
    fn test_unknown_form_passes_through() {
        assert_eq!(
            Color::parse("rgba(0,0,0,0.5)"),
            Color::Raw("rgba(0,0,0,0.5)".into())
        );
    }

    #[test]
    fn test_deserialize_forms() {
        let c: Color = serde_yaml::from_str("[10, 20, 30]").unwrap();
        assert_eq!(c, Color::Rgb([10, 20, 30]));

        let c: Color = serde_yaml::from_str("200").unwrap();
        assert_eq!(c, Color::gray(200));

        let c: Color = serde_yaml::from_str("\"darkblue\"").unwrap();
        assert_eq!(c, Color::Rgb([0, 0, 139]));
    }

    #[test]
    fn test_serialize_round_trip() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");

        let json = serde_json::to_string(&Color::Raw("papayawhip".into())).unwrap();
        assert_eq!(json, "\"papayawhip\"");
    }
}
