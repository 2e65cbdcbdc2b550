use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Gradient used when neither the user nor the theme picks a background
pub const DEFAULT_WRAPPER_BACKGROUND: &str = "linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%)";
pub const DEFAULT_WRAPPER_PADDING: &str = "60px";

/// What sits behind the table in the exported picture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Background {
    #[default]
    ThemeDefault,
    /// Solid color or CSS gradient
    Fill(String),
    /// Image URL, rendered with cover sizing
    Image(String),
}

/// Style of the outer wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub padding: String,
    /// Glass effect and dimming overlay are applied over images
    pub glass: bool,
}

/// Resolve the wrapper style: image beats fill beats the theme's own
/// wrapper background beats the built-in gradient.
pub fn background_style(theme: &Theme, background: &Background) -> BackgroundStyle {
    let padding = theme
        .wrapper_padding
        .clone()
        .unwrap_or_else(|| DEFAULT_WRAPPER_PADDING.to_string());

    match background {
        Background::Image(url) => BackgroundStyle {
            background: None,
            background_image: Some(format!("url({})", url)),
            padding,
            glass: true,
        },
        Background::Fill(fill) => BackgroundStyle {
            background: Some(fill.clone()),
            background_image: None,
            padding,
            glass: false,
        },
        Background::ThemeDefault => BackgroundStyle {
            background: Some(
                theme
                    .wrapper_background
                    .clone()
                    .unwrap_or_else(|| DEFAULT_WRAPPER_BACKGROUND.to_string()),
            ),
            background_image: None,
            padding,
            glass: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::theme_by_id;

    #[test]
    fn test_image_wins() {
        let theme = theme_by_id("nord");
        let style = background_style(&theme, &Background::Image("bg.png".into()));
        assert_eq!(style.background_image.as_deref(), Some("url(bg.png)"));
        assert!(style.background.is_none());
        assert!(style.glass);
    }

    #[test]
    fn test_fill() {
        let theme = theme_by_id("nord");
        let style = background_style(&theme, &Background::Fill("#123456".into()));
        assert_eq!(style.background.as_deref(), Some("#123456"));
        assert!(!style.glass);
    }

    #[test]
    fn test_theme_wrapper_background() {
        let theme = theme_by_id("dracula");
        let style = background_style(&theme, &Background::ThemeDefault);
        assert_eq!(style.background, theme.wrapper_background);
        assert_eq!(style.padding, DEFAULT_WRAPPER_PADDING);
    }

    #[test]
    fn test_builtin_gradient_fallback() {
        let mut theme = theme_by_id("dracula");
        theme.wrapper_background = None;
        theme.wrapper_padding = Some("24px".into());
        let style = background_style(&theme, &Background::ThemeDefault);
        assert_eq!(style.background.as_deref(), Some(DEFAULT_WRAPPER_BACKGROUND));
        assert_eq!(style.padding, "24px");
    }
}
