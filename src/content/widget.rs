// src/content/widget.rs - one positioned unit of post content

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ContentError;
use super::layout::Layout;
use super::rich_text::RichDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Text,
    Image,
    Video,
}

impl WidgetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Image => "image",
            WidgetKind::Video => "video",
        }
    }

    /// Size a freshly added widget of this kind starts with.
    pub fn default_size(self) -> (u32, u32) {
        match self {
            WidgetKind::Text => (6, 4),
            WidgetKind::Image | WidgetKind::Video => (6, 8),
        }
    }
}

/// Serialized as `{"type": ..., "id": ..., "content": ..., "layout": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Widget {
    Text {
        id: String,
        content: RichDocument,
        layout: Layout,
    },
    Image {
        id: String,
        content: String,
        layout: Layout,
    },
    Video {
        id: String,
        content: String,
        layout: Layout,
    },
}

/// Payload of a widget without its id and layout.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetContent {
    Text(RichDocument),
    Image(String),
    Video(String),
}

impl WidgetContent {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetContent::Text(_) => WidgetKind::Text,
            WidgetContent::Image(_) => WidgetKind::Image,
            WidgetContent::Video(_) => WidgetKind::Video,
        }
    }

    pub fn empty(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Text => WidgetContent::Text(RichDocument::paragraph("")),
            WidgetKind::Image => WidgetContent::Image(String::new()),
            WidgetKind::Video => WidgetContent::Video(String::new()),
        }
    }
}

impl Widget {
    pub fn new(id: impl Into<String>, content: WidgetContent, layout: Layout) -> Self {
        let id = id.into();
        match content {
            WidgetContent::Text(content) => Widget::Text { id, content, layout },
            WidgetContent::Image(content) => Widget::Image { id, content, layout },
            WidgetContent::Video(content) => Widget::Video { id, content, layout },
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Widget::Text { id, .. } | Widget::Image { id, .. } | Widget::Video { id, .. } => id,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::Text { .. } => WidgetKind::Text,
            Widget::Image { .. } => WidgetKind::Image,
            Widget::Video { .. } => WidgetKind::Video,
        }
    }

    pub fn layout(&self) -> &Layout {
        match self {
            Widget::Text { layout, .. }
            | Widget::Image { layout, .. }
            | Widget::Video { layout, .. } => layout,
        }
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        match self {
            Widget::Text { layout, .. }
            | Widget::Image { layout, .. }
            | Widget::Video { layout, .. } => layout,
        }
    }

    /// Replace the payload; the new content must be of the same kind.
    pub fn set_content(&mut self, content: WidgetContent) -> Result<(), ContentError> {
        let found = content.kind();
        match (self, content) {
            (Widget::Text { content, .. }, WidgetContent::Text(doc)) => *content = doc,
            (Widget::Image { content, .. }, WidgetContent::Image(url)) => *content = url,
            (Widget::Video { content, .. }, WidgetContent::Video(url)) => *content = url,
            (widget, _) => {
                return Err(ContentError::KindMismatch {
                    id: widget.id().to_string(),
                    expected: widget.kind().as_str(),
                    found: found.as_str(),
                });
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.id().trim().is_empty() {
            return Err(ContentError::Widget {
                id: String::new(),
                reason: "widget id must not be empty".to_string(),
            });
        }
        if let Some(reason) = self.layout().bounds_violation() {
            return Err(ContentError::Widget {
                id: self.id().to_string(),
                reason,
            });
        }
        match self {
            Widget::Text { content, .. } => content.validate(),
            Widget::Image { content, .. } | Widget::Video { content, .. } => {
                if is_http_url(content) {
                    Ok(())
                } else {
                    Err(ContentError::Widget {
                        id: self.id().to_string(),
                        reason: format!("{} content must be an http(s) URL", self.kind().as_str()),
                    })
                }
            }
        }
    }
}

fn is_http_url(s: &str) -> bool {
    let s = s.trim();
    let rest = s
        .strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.contains(char::is_whitespace))
}

/// Checks every widget and the uniqueness of their ids.
pub fn validate_widgets(widgets: &[Widget]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for widget in widgets {
        widget.validate()?;
        if !seen.insert(widget.id()) {
            return Err(ContentError::DuplicateId(widget.id().to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image(id: &str, layout: Layout) -> Widget {
        Widget::new(id, WidgetContent::Image("https://cdn.example.com/a.png".into()), layout)
    }

    #[test]
    fn wire_shape_matches_stored_posts() {
        let value = json!({
            "id": "w1",
            "type": "video",
            "content": "https://www.youtube.com/embed/abc",
            "layout": {"x": 0, "y": 2, "w": 6, "h": 8}
        });
        let widget: Widget = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(widget.kind(), WidgetKind::Video);
        assert_eq!(widget.layout(), &Layout::new(0, 2, 6, 8));
        assert_eq!(serde_json::to_value(&widget).unwrap(), value);
    }

    #[test]
    fn unknown_type_is_rejected_on_input() {
        let value = json!({"id": "w", "type": "audio", "content": "x", "layout": {"x":0,"y":0,"w":2,"h":2}});
        assert!(serde_json::from_value::<Widget>(value).is_err());
    }

    #[test]
    fn negative_coordinates_do_not_deserialize() {
        let value = json!({"id": "w", "type": "image", "content": "https://a", "layout": {"x":-1,"y":0,"w":2,"h":2}});
        assert!(serde_json::from_value::<Widget>(value).is_err());
    }

    #[test]
    fn validation_checks_bounds_urls_and_ids() {
        assert!(image("a", Layout::new(0, 0, 6, 4)).validate().is_ok());
        assert!(image("a", Layout::new(0, 0, 1, 4)).validate().is_err());
        assert!(image("a", Layout::new(8, 0, 6, 4)).validate().is_err());
        assert!(image(" ", Layout::new(0, 0, 2, 2)).validate().is_err());

        let bad_url = Widget::new("v", WidgetContent::Video("javascript:alert(1)".into()), Layout::new(0, 0, 2, 2));
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let widgets = vec![image("a", Layout::new(0, 0, 2, 2)), image("a", Layout::new(2, 0, 2, 2))];
        assert_eq!(
            validate_widgets(&widgets),
            Err(ContentError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn set_content_refuses_other_kinds() {
        let mut w = image("a", Layout::new(0, 0, 2, 2));
        assert!(w.set_content(WidgetContent::Text(RichDocument::paragraph("x"))).is_err());
        w.set_content(WidgetContent::Image("https://b".into())).unwrap();
        assert!(matches!(w, Widget::Image { ref content, .. } if content == "https://b"));
    }
}
