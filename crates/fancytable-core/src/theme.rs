use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Named bundle of visual styling attributes.
///
/// The table stores and passes a theme through; values are CSS strings that
/// the host renders as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub background: String,
    pub header_background: String,
    pub border_color: String,
    pub text_color: String,
    pub header_text_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_row_background: Option<String>,
    pub cell_padding: String,
    pub border_radius: String,
    pub font_family: String,
    pub font_size: String,
    #[serde(default)]
    pub shadows: bool,
    #[serde(default)]
    pub gradients: bool,
    /// Background behind the table when no custom background is chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper_padding: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        default_themes()[0].clone()
    }
}

#[allow(clippy::too_many_arguments)]
fn preset(
    id: &str,
    name: &str,
    background: &str,
    header_background: &str,
    border_color: &str,
    text_color: &str,
    header_text_color: &str,
    alternate_row_background: Option<&str>,
    font_family: &str,
    wrapper_background: &str,
) -> Theme {
    Theme {
        id: id.to_string(),
        name: name.to_string(),
        background: background.to_string(),
        header_background: header_background.to_string(),
        border_color: border_color.to_string(),
        text_color: text_color.to_string(),
        header_text_color: header_text_color.to_string(),
        alternate_row_background: alternate_row_background.map(str::to_string),
        cell_padding: "12px 16px".to_string(),
        border_radius: "8px".to_string(),
        font_family: font_family.to_string(),
        font_size: "14px".to_string(),
        shadows: true,
        gradients: false,
        wrapper_background: Some(wrapper_background.to_string()),
        wrapper_padding: None,
    }
}

const MONO: &str = "'JetBrains Mono', 'Fira Code', Menlo, monospace";
const SANS: &str = "Inter, -apple-system, 'Segoe UI', sans-serif";

/// Built-in theme presets; the first entry is the default theme
pub fn default_themes() -> &'static [Theme] {
    static THEMES: OnceLock<Vec<Theme>> = OnceLock::new();
    THEMES.get_or_init(|| {
        vec![
            preset(
                "clean-light",
                "Clean Light",
                "#ffffff",
                "#f8fafc",
                "#e2e8f0",
                "#1e293b",
                "#0f172a",
                Some("#f8fafc"),
                SANS,
                "linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%)",
            ),
            preset(
                "carbon-dark",
                "Carbon Dark",
                "#1e1e1e",
                "#2d2d2d",
                "#3c3c3c",
                "#d4d4d4",
                "#ffffff",
                Some("#252526"),
                MONO,
                "linear-gradient(135deg, #434343 0%, #000000 100%)",
            ),
            preset(
                "dracula",
                "Dracula",
                "#282a36",
                "#44475a",
                "#6272a4",
                "#f8f8f2",
                "#ff79c6",
                Some("#2f3240"),
                MONO,
                "linear-gradient(135deg, #bd93f9 0%, #ff79c6 100%)",
            ),
            preset(
                "nord",
                "Nord",
                "#2e3440",
                "#3b4252",
                "#4c566a",
                "#eceff4",
                "#88c0d0",
                None,
                SANS,
                "linear-gradient(135deg, #5e81ac 0%, #88c0d0 100%)",
            ),
            Theme {
                gradients: true,
                ..preset(
                    "sunset",
                    "Sunset",
                    "#fff7ed",
                    "linear-gradient(90deg, #f97316 0%, #ec4899 100%)",
                    "#fed7aa",
                    "#431407",
                    "#ffffff",
                    Some("#ffedd5"),
                    SANS,
                    "linear-gradient(135deg, #fbd38d 0%, #f687b3 100%)",
                )
            },
        ]
    })
}

/// Look up a preset by id
pub fn find_theme(id: &str) -> Option<&'static Theme> {
    default_themes().iter().find(|t| t.id == id)
}

/// Look up a preset by id, falling back to the default theme
pub fn theme_by_id(id: &str) -> Theme {
    find_theme(id).cloned().unwrap_or_default()
}

/// Style of the table element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStyle {
    pub background: String,
    pub border_radius: String,
    pub font_family: String,
    pub font_size: String,
    pub color: String,
    pub border: String,
}

/// Style of a header cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyle {
    pub background: String,
    pub color: String,
    pub padding: String,
    pub border_color: String,
}

/// Style of a body cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    pub padding: String,
    pub border_color: String,
    pub background_color: String,
}

pub fn table_style(theme: &Theme) -> TableStyle {
    TableStyle {
        background: theme.background.clone(),
        border_radius: theme.border_radius.clone(),
        font_family: theme.font_family.clone(),
        font_size: theme.font_size.clone(),
        color: theme.text_color.clone(),
        border: format!("1px solid {}", theme.border_color),
    }
}

pub fn header_style(theme: &Theme) -> HeaderStyle {
    HeaderStyle {
        background: theme.header_background.clone(),
        color: theme.header_text_color.clone(),
        padding: theme.cell_padding.clone(),
        border_color: theme.border_color.clone(),
    }
}

/// Body cell style; odd rows use the alternate background when the theme has one
pub fn cell_style(theme: &Theme, row_index: usize) -> CellStyle {
    let background_color = match &theme.alternate_row_background {
        Some(alt) if row_index % 2 == 1 => alt.clone(),
        _ => "transparent".to_string(),
    };

    CellStyle {
        padding: theme.cell_padding.clone(),
        border_color: theme.border_color.clone(),
        background_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_first_preset() {
        assert_eq!(Theme::default(), default_themes()[0]);
    }

    #[test]
    fn test_preset_ids_unique() {
        let themes = default_themes();
        for (i, a) in themes.iter().enumerate() {
            for b in &themes[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_theme_by_id() {
        assert_eq!(theme_by_id("dracula").name, "Dracula");
        assert_eq!(theme_by_id("no-such-theme"), Theme::default());
        assert!(find_theme("no-such-theme").is_none());
    }

    #[test]
    fn test_table_style() {
        let theme = theme_by_id("carbon-dark");
        let style = table_style(&theme);
        assert_eq!(style.border, "1px solid #3c3c3c");
        assert_eq!(style.color, "#d4d4d4");
    }

    #[test]
    fn test_header_style() {
        let theme = theme_by_id("nord");
        let style = header_style(&theme);
        assert_eq!(style.background, "#3b4252");
        assert_eq!(style.color, "#88c0d0");
    }

    #[test]
    fn test_cell_style_alternates() {
        let theme = theme_by_id("clean-light");
        assert_eq!(cell_style(&theme, 0).background_color, "transparent");
        assert_eq!(cell_style(&theme, 1).background_color, "#f8fafc");
        assert_eq!(cell_style(&theme, 2).background_color, "transparent");
    }

    #[test]
    fn test_cell_style_without_alternate() {
        let theme = theme_by_id("nord");
        assert_eq!(cell_style(&theme, 1).background_color, "transparent");
    }

    #[test]
    fn test_serialization() {
        let theme = theme_by_id("sunset");
        let json = serde_json::to_string(&theme).unwrap();
        assert!(json.contains("\"headerBackground\""));
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, theme);
    }
}
