//! The editing widget seam

use super::EditorConfig;

/// A rich-text editing widget the editor surface drives.
///
/// The widget owns editing; the surface only pushes content into it and
/// reads its serialized markup back. User edits reach the surface through
/// [`TextEditor::handle_change`](super::TextEditor::handle_change).
pub trait EditorWidget {
    /// Show `content` with the given configuration
    fn render(&mut self, content: &str, config: &EditorConfig);

    /// The markup the widget currently displays
    fn serialized_content(&self) -> String;
}

/// In-memory widget that keeps the last rendered markup
#[derive(Clone, Debug, Default)]
pub struct HeadlessWidget {
    content: String,
    config: Option<EditorConfig>,
}

impl HeadlessWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration of the last render, if any
    pub fn config(&self) -> Option<&EditorConfig> {
        self.config.as_ref()
    }
}

impl EditorWidget for HeadlessWidget {
    fn render(&mut self, content: &str, config: &EditorConfig) {
        self.content = content.to_string();
        self.config = Some(config.clone());
    }

    fn serialized_content(&self) -> String {
        self.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_widget_keeps_last_render() {
        let mut widget = HeadlessWidget::new();
        assert_eq!(widget.serialized_content(), "");
        assert!(widget.config().is_none());

        let config = EditorConfig::default().theme("bubble");
        widget.render("<p>x</p>", &config);
        assert_eq!(widget.serialized_content(), "<p>x</p>");
        assert_eq!(widget.config().map(|c| c.theme.as_str()), Some("bubble"));
    }
}
