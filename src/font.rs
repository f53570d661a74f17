//! Font family selection for rendered text.
//!
//! The UI offers a short list of families, but any name is accepted here;
//! a family the host does not have falls back to whatever the font system
//! picks.

use cosmic_text::Family;

/// A font family to shape text with.
///
/// # Examples
///
/// ```
/// use backdrop::font::FontFamily;
///
/// assert_eq!(FontFamily::from("serif"), FontFamily::Serif);
/// assert_eq!(
///     FontFamily::from("Times New Roman"),
///     FontFamily::Name("Times New Roman".into())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Sans-serif font (default system sans-serif)
    SansSerif,
    /// Serif font (default system serif)
    Serif,
    /// Monospace font (default system monospace)
    Monospace,
    Cursive,
    Fantasy,
    /// Custom font by name
    Name(String),
}

impl FontFamily {
    /// The family the composer starts with.
    pub fn roboto() -> Self {
        FontFamily::Name("Roboto".to_string())
    }

    /// Convert to cosmic-text Family type for shaping.
    pub fn to_cosmic(&self) -> Family<'_> {
        match self {
            FontFamily::SansSerif => Family::SansSerif,
            FontFamily::Serif => Family::Serif,
            FontFamily::Monospace => Family::Monospace,
            FontFamily::Cursive => Family::Cursive,
            FontFamily::Fantasy => Family::Fantasy,
            FontFamily::Name(name) => Family::Name(name),
        }
    }

    /// CSS-style name, e.g. for a `40px Roboto` font shorthand.
    pub fn css_name(&self) -> &str {
        match self {
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "monospace",
            FontFamily::Cursive => "cursive",
            FontFamily::Fantasy => "fantasy",
            FontFamily::Name(name) => name,
        }
    }
}

impl Default for FontFamily {
    fn default() -> Self {
        Self::roboto()
    }
}

impl From<&str> for FontFamily {
    fn from(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "sans-serif" => FontFamily::SansSerif,
            "serif" => FontFamily::Serif,
            "monospace" => FontFamily::Monospace,
            "cursive" => FontFamily::Cursive,
            "fantasy" => FontFamily::Fantasy,
            // An empty selection means "use the default family"
            "" => FontFamily::default(),
            _ => FontFamily::Name(trimmed.to_string()),
        }
    }
}

impl From<String> for FontFamily {
    fn from(name: String) -> Self {
        FontFamily::from(name.as_str())
    }
}

/// Build the CSS font shorthand, e.g. `40px Times New Roman`.
pub fn font_shorthand(size_px: f64, family: &FontFamily) -> String {
    format!("{}px {}", size_px, family.css_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_family_default() {
        assert_eq!(FontFamily::default(), FontFamily::Name("Roboto".into()));
    }

    #[test]
    fn generic_names_map_to_generic_families() {
        assert_eq!(FontFamily::from("Monospace"), FontFamily::Monospace);
        assert_eq!(FontFamily::from(" sans-serif "), FontFamily::SansSerif);
        assert_eq!(FontFamily::from(""), FontFamily::roboto());
    }

    #[test]
    fn any_string_is_accepted() {
        let family = FontFamily::from("Definitely Not Installed");
        assert_eq!(family.css_name(), "Definitely Not Installed");
        assert!(matches!(family.to_cosmic(), Family::Name("Definitely Not Installed")));
    }

    #[test]
    fn shorthand_matches_canvas_font_string() {
        assert_eq!(font_shorthand(40.0, &FontFamily::from("Arial")), "40px Arial");
    }
}
