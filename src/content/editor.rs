// src/content/editor.rs - authoring state of a post's grid: widgets plus container width

use serde::Deserialize;
use uuid::Uuid;

use super::ContentError;
use super::layout::{self, GRID_COLUMNS, GridPlacement, Layout};
use super::widget::{Widget, WidgetContent, WidgetKind};

pub const INITIAL_CONTAINER_WIDTH: u32 = 1200;
/// Width changes at or below this many pixels are ignored.
pub const WIDTH_CHANGE_THRESHOLD: u32 = 5;

/// Position reported by the grid for one widget when a drag or resize ends.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutItem {
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Tracks the observed container width, ignoring jitter from scrollbars toggling.
#[derive(Debug, Clone, Copy)]
pub struct WidthTracker {
    width: u32,
}

impl Default for WidthTracker {
    fn default() -> Self {
        Self {
            width: INITIAL_CONTAINER_WIDTH,
        }
    }
}

impl WidthTracker {
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns true when the observation changed the tracked width.
    pub fn observe(&mut self, new_width: u32) -> bool {
        if self.width.abs_diff(new_width) > WIDTH_CHANGE_THRESHOLD {
            self.width = new_width;
            true
        } else {
            false
        }
    }

    pub fn columns(&self) -> u32 {
        layout::columns_for_width(self.width)
    }
}

/// The widget array is the single source of truth; every operation replaces entries in it.
#[derive(Debug, Clone, Default)]
pub struct GridEditor {
    widgets: Vec<Widget>,
    width: WidthTracker,
}

impl GridEditor {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self {
            widgets,
            width: WidthTracker::default(),
        }
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn into_widgets(self) -> Vec<Widget> {
        self.widgets
    }

    pub fn observe_width(&mut self, width: u32) -> bool {
        self.width.observe(width)
    }

    pub fn columns(&self) -> u32 {
        self.width.columns()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !self.widgets.iter().any(|w| w.id() == id) {
                return id;
            }
        }
    }

    /// Append an empty widget below everything else and return its id.
    pub fn add_widget(&mut self, kind: WidgetKind) -> String {
        let (w, h) = kind.default_size();
        let y = self
            .widgets
            .iter()
            .map(|w| w.layout().bottom())
            .max()
            .unwrap_or(0);
        let id = self.fresh_id();
        self.widgets.push(Widget::new(
            id.clone(),
            WidgetContent::empty(kind),
            Layout::new(0, y, w, h),
        ));
        id
    }

    pub fn remove_widget(&mut self, id: &str) -> bool {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id() != id);
        self.widgets.len() != before
    }

    pub fn update_content(&mut self, id: &str, content: WidgetContent) -> Result<(), ContentError> {
        let widget = self
            .widgets
            .iter_mut()
            .find(|w| w.id() == id)
            .ok_or_else(|| ContentError::UnknownWidget(id.to_string()))?;
        widget.set_content(content)
    }

    /// Commit positions at the end of a drag or resize gesture.
    pub fn apply_layout(&mut self, items: &[LayoutItem]) {
        for widget in &mut self.widgets {
            if let Some(item) = items.iter().find(|item| item.id == widget.id()) {
                *widget.layout_mut() =
                    Layout::new(item.x, item.y, item.w, item.h).clamped(GRID_COLUMNS);
            }
        }
        let current: Vec<Layout> = self.widgets.iter().map(|w| *w.layout()).collect();
        for (widget, compacted) in self
            .widgets
            .iter_mut()
            .zip(layout::compact_vertical(&current))
        {
            *widget.layout_mut() = compacted;
        }
    }

    pub fn placements(&self) -> Vec<(String, GridPlacement)> {
        self.widgets
            .iter()
            .map(|w| (w.id().to_string(), w.layout().placement()))
            .collect()
    }

    /// Placements for the current container width.
    pub fn responsive_placements(&self) -> Vec<(String, GridPlacement)> {
        let layouts: Vec<Layout> = self.widgets.iter().map(|w| *w.layout()).collect();
        self.widgets
            .iter()
            .zip(layout::responsive_layouts(&layouts, self.width.width()))
            .map(|(w, l)| (w.id().to_string(), l.placement()))
            .collect()
    }
}
