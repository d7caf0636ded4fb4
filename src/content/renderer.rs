// src/content/renderer.rs - read-only reconstruction of a post grid from stored widget JSON

use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::layout::{GRID_COLUMNS, GridPlacement, MARGIN_PX, ROW_HEIGHT_PX};
use super::rich_text::{BlockType, Element, Node, TextLeaf};
use super::widget::{Widget, WidgetKind};
use super::{CONTENT_VERSION, ContentError};

/// Horizontal gap between columns in the public view.
const COLUMN_GAP_PX: u32 = 20;

#[derive(Debug, Clone, Serialize)]
pub struct RenderedWidget {
    pub id: String,
    pub kind: WidgetKind,
    pub placement: GridPlacement,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedPost {
    pub widgets: Vec<RenderedWidget>,
    /// Number of stored entries that could not be rendered.
    pub skipped: usize,
}

impl RenderedPost {
    pub fn to_html(&self) -> String {
        let mut out = format!(
            "<div class=\"blog-grid\" style=\"display: grid; grid-template-columns: repeat({}, 1fr); grid-auto-rows: {}px; gap: {}px {}px;\">",
            GRID_COLUMNS, ROW_HEIGHT_PX, MARGIN_PX, COLUMN_GAP_PX
        );
        for widget in &self.widgets {
            out.push_str(&format!(
                "<div class=\"blog-widget\" data-widget-id=\"{}\" style=\"{}\">{}</div>",
                escape_html(&widget.id),
                widget.placement.to_css(),
                widget.html
            ));
        }
        out.push_str("</div>");
        out
    }
}

/// Parse one stored entry; anything malformed, unknown or invalid yields `None`.
pub fn parse_stored_widget(value: &Value) -> Option<Widget> {
    match serde_json::from_value::<Widget>(value.clone()) {
        Ok(widget) => match widget.validate() {
            Ok(()) => Some(widget),
            Err(e) => {
                debug!("skipping invalid widget {}: {}", widget.id(), e);
                None
            }
        },
        Err(e) => {
            debug!(
                "skipping unreadable widget (type {:?}): {}",
                value.get("type"),
                e
            );
            None
        }
    }
}

pub fn render_widgets(stored: &[Value]) -> RenderedPost {
    let widgets: Vec<RenderedWidget> = stored
        .iter()
        .filter_map(parse_stored_widget)
        .map(|widget| render_widget(&widget))
        .collect();
    let skipped = stored.len() - widgets.len();
    RenderedPost { widgets, skipped }
}

/// Entry point for stored posts; refuses content written by a newer format.
pub fn render_post(content_version: i32, stored: &[Value]) -> Result<RenderedPost, ContentError> {
    if content_version > CONTENT_VERSION {
        return Err(ContentError::UnsupportedVersion {
            found: content_version,
            supported: CONTENT_VERSION,
        });
    }
    Ok(render_widgets(stored))
}

pub fn render_widget(widget: &Widget) -> RenderedWidget {
    let html = match widget {
        Widget::Text { content, .. } => {
            let mut html = String::from("<div class=\"blog-text\">");
            for node in content.nodes() {
                render_node(node, &mut html);
            }
            html.push_str("</div>");
            html
        }
        Widget::Image { content, .. } => format!(
            "<img src=\"{}\" alt=\"Blog Content\" class=\"blog-image\">",
            escape_html(content)
        ),
        Widget::Video { content, .. } => format!(
            "<iframe src=\"{}\" title=\"Video player\" frameborder=\"0\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen></iframe>",
            escape_html(content)
        ),
    };
    RenderedWidget {
        id: widget.id().to_string(),
        kind: widget.kind(),
        placement: widget.layout().placement(),
        html,
    }
}

fn tag_for(kind: BlockType) -> &'static str {
    match kind {
        BlockType::Paragraph => "p",
        BlockType::HeadingOne => "h1",
        BlockType::HeadingTwo => "h2",
        BlockType::BlockQuote => "blockquote",
        BlockType::BulletedList => "ul",
        BlockType::NumberedList => "ol",
        BlockType::ListItem => "li",
    }
}

fn render_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(leaf) => render_leaf(leaf, out),
        Node::Element(el) => render_element(el, out),
    }
}

fn render_element(el: &Element, out: &mut String) {
    let tag = tag_for(el.kind);
    match el.align {
        Some(align) => out.push_str(&format!(
            "<{} style=\"text-align: {}\">",
            tag,
            align.as_css()
        )),
        None => out.push_str(&format!("<{}>", tag)),
    }
    for child in &el.children {
        render_node(child, out);
    }
    out.push_str(&format!("</{}>", tag));
}

fn render_leaf(leaf: &TextLeaf, out: &mut String) {
    let mut html = escape_html(&leaf.text);
    if leaf.bold {
        html = format!("<strong>{}</strong>", html);
    }
    if leaf.code {
        html = format!("<code>{}</code>", html);
    }
    if leaf.italic {
        html = format!("<em>{}</em>", html);
    }
    if leaf.underline {
        html = format!("<u>{}</u>", html);
    }
    out.push_str(&html);
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
