//! Notification renderer for terminal output.
//!
//! Renders notifications and form error banners as short themed panels,
//! using the color scheme from the UI module.

use owo_colors::{OwoColorize, Rgb};

use super::{Notification, NotificationKind};
use crate::ui::{HrmsDisplay, Theme};

/// Renderer for notification panels.
pub struct NotificationRenderer<'a> {
    /// Reference to the HrmsDisplay for theming
    display: &'a HrmsDisplay,
    /// Panel width (characters)
    width: usize,
}

impl<'a> NotificationRenderer<'a> {
    /// Creates a new NotificationRenderer with a reference to a HrmsDisplay.
    pub fn new(display: &'a HrmsDisplay) -> Self {
        Self { display, width: 60 }
    }

    /// Sets the panel width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn theme(&self) -> &Theme {
        self.display.theme()
    }

    fn border_line(&self) -> String {
        "─".repeat(self.width.saturating_sub(2))
    }

    /// Renders a notification as a bordered panel.
    pub fn render(&self, notification: &Notification) -> String {
        let (title, icon, color) = match notification.kind {
            NotificationKind::Success => ("Success", "✓", self.theme().success),
            NotificationKind::Error => ("Error", "✗", self.theme().error),
        };
        self.panel(color, icon, title, &notification.message)
    }

    /// Renders a form-level error banner, optionally naming the field the
    /// message was attributed to.
    pub fn render_banner(&self, message: &str, field: Option<&str>) -> String {
        let mut output = self.panel(self.theme().warning, "⚠", "Request failed", message);
        if let Some(field) = field {
            let line = format!(" field: {}", field);
            output.push('\n');
            if self.display.colors_enabled() {
                output.push_str(&format!("{}", line.color(self.theme().muted)));
            } else {
                output.push_str(&line);
            }
        }
        output
    }

    fn panel(&self, color: Rgb, icon: &str, title: &str, message: &str) -> String {
        let border = self.border_line();
        let header = format!(" {} {}", icon, title);
        let body = format!(" {}", message);

        if !self.display.colors_enabled() {
            return format!("{border}\n{header}\n{body}\n{border}");
        }

        format!(
            "{}\n{}\n{}\n{}",
            border.color(color),
            header.color(color).bold(),
            body,
            border.color(color)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationId;

    fn plain_display() -> HrmsDisplay {
        let mut display = HrmsDisplay::new();
        display.set_colors_enabled(false);
        display
    }

    #[test]
    fn test_render_success_panel() {
        let display = plain_display();
        let renderer = NotificationRenderer::new(&display).with_width(20);
        let output = renderer.render(&Notification::success(
            NotificationId(1),
            "Employee deleted successfully!",
        ));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].chars().count(), 18);
        assert_eq!(lines[1], " ✓ Success");
        assert_eq!(lines[2], " Employee deleted successfully!");
    }

    #[test]
    fn test_render_error_panel() {
        let display = plain_display();
        let renderer = NotificationRenderer::new(&display);
        let output = renderer.render(&Notification::error(NotificationId(2), "Resource not found."));
        assert!(output.contains("✗ Error"));
        assert!(output.contains("Resource not found."));
    }

    #[test]
    fn test_render_banner_with_field() {
        let display = plain_display();
        let renderer = NotificationRenderer::new(&display);
        let output = renderer.render_banner("Employee ID already exists", Some("employeeId"));
        assert!(output.contains("Request failed"));
        assert!(output.contains("Employee ID already exists"));
        assert!(output.ends_with(" field: employeeId"));

        let output = renderer.render_banner("Server error. Please try again later.", None);
        assert!(!output.contains("field:"));
    }
}
