//! Display settings for terminal output.

use crate::ui::colors::Theme;

/// Holds the theme and color preference shared by all renderers.
#[derive(Debug, Clone)]
pub struct HrmsDisplay {
    /// Color theme for terminal output
    theme: Theme,
    /// Whether colors are enabled (respects NO_COLOR env var)
    colors_enabled: bool,
}

impl Default for HrmsDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl HrmsDisplay {
    /// Create a new HrmsDisplay with default settings.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            colors_enabled: Self::detect_color_support(),
        }
    }

    /// Create a HrmsDisplay with a custom theme.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            colors_enabled: Self::detect_color_support(),
        }
    }

    /// Get the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(&self) -> bool {
        self.colors_enabled
    }

    /// Enable or disable colors.
    pub fn set_colors_enabled(&mut self, enabled: bool) {
        self.colors_enabled = enabled;
    }

    /// Detect if color output should be enabled.
    ///
    /// Respects the NO_COLOR environment variable.
    fn detect_color_support() -> bool {
        std::env::var("NO_COLOR").is_err()
    }
}
