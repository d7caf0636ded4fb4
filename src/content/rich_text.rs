// src/content/rich_text.rs - node tree of a text widget and the block/mark toggles applied to it

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Paragraph,
    HeadingOne,
    HeadingTwo,
    BlockQuote,
    BulletedList,
    NumberedList,
    ListItem,
}

impl BlockType {
    pub fn is_list(self) -> bool {
        matches!(self, BlockType::BulletedList | BlockType::NumberedList)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Code,
}

const HOTKEYS: &[(&str, Mark)] = &[
    ("mod+b", Mark::Bold),
    ("mod+i", Mark::Italic),
    ("mod+u", Mark::Underline),
    ("mod+`", Mark::Code),
];

impl Mark {
    pub fn from_hotkey(hotkey: &str) -> Option<Mark> {
        HOTKEYS
            .iter()
            .find(|(key, _)| *key == hotkey)
            .map(|(_, mark)| *mark)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextLeaf {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

impl TextLeaf {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Code => self.code,
        }
    }

    pub fn set_mark(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Bold => self.bold = on,
            Mark::Italic => self.italic = on,
            Mark::Underline => self.underline = on,
            Mark::Code => self.code = on,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: BlockType, children: Vec<Node>) -> Self {
        Self {
            kind,
            align: None,
            children,
        }
    }

    fn leaves_mut(&mut self) -> Vec<&mut TextLeaf> {
        let mut out = Vec::new();
        for child in &mut self.children {
            match child {
                Node::Text(leaf) => out.push(leaf),
                Node::Element(el) => out.extend(el.leaves_mut()),
            }
        }
        out
    }

    fn leaves(&self) -> Vec<&TextLeaf> {
        let mut out = Vec::new();
        for child in &self.children {
            match child {
                Node::Text(leaf) => out.push(leaf),
                Node::Element(el) => out.extend(el.leaves()),
            }
        }
        out
    }
}

/// Elements carry `type` + `children`; anything else with a `text` field is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(TextLeaf),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichDocument(pub Vec<Node>);

impl RichDocument {
    pub fn paragraph(text: impl Into<String>) -> Self {
        RichDocument(vec![Node::Element(Element::new(
            BlockType::Paragraph,
            vec![Node::Text(TextLeaf::plain(text))],
        ))])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    pub fn plain_text(&self) -> String {
        let mut blocks = Vec::new();
        for node in &self.0 {
            match node {
                Node::Text(leaf) => blocks.push(leaf.text.clone()),
                Node::Element(el) => {
                    let text: String = el.leaves().iter().map(|l| l.text.as_str()).collect();
                    blocks.push(text);
                }
            }
        }
        blocks.join("\n")
    }

    /// Structural checks: top level holds elements, lists hold list items, elements are non-empty.
    pub fn validate(&self) -> Result<(), ContentError> {
        for (i, node) in self.0.iter().enumerate() {
            match node {
                Node::Text(_) => {
                    return Err(ContentError::Document(format!(
                        "top-level node {} is a text leaf, expected a block element",
                        i
                    )));
                }
                Node::Element(el) if el.kind == BlockType::ListItem => {
                    return Err(ContentError::Document(format!(
                        "top-level node {} is a list item outside of a list",
                        i
                    )));
                }
                Node::Element(el) => validate_element(el)?,
            }
        }
        Ok(())
    }
}

fn validate_element(el: &Element) -> Result<(), ContentError> {
    if el.children.is_empty() {
        return Err(ContentError::Document(format!(
            "{:?} element has no children",
            el.kind
        )));
    }
    for child in &el.children {
        match child {
            Node::Element(inner) => {
                if el.kind.is_list() && inner.kind != BlockType::ListItem {
                    return Err(ContentError::Document(format!(
                        "{:?} may only contain list items, found {:?}",
                        el.kind, inner.kind
                    )));
                }
                if !el.kind.is_list() && inner.kind == BlockType::ListItem {
                    return Err(ContentError::Document(format!(
                        "list item inside {:?}, expected a list",
                        el.kind
                    )));
                }
                validate_element(inner)?;
            }
            Node::Text(_) if el.kind.is_list() => {
                return Err(ContentError::Document(format!(
                    "{:?} may only contain list items, found a text leaf",
                    el.kind
                )));
            }
            Node::Text(_) => {}
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ListGroup {
    kind: BlockType,
    id: usize,
    align: Option<Alignment>,
}

#[derive(Debug, Clone)]
struct Line {
    group: Option<ListGroup>,
    block: Element,
}

/// Editing surface of a text widget.
///
/// The document is held as a flat sequence of leaf blocks (list items count
/// individually); selections are ranges over that sequence.
#[derive(Debug, Clone)]
pub struct TextEditor {
    lines: Vec<Line>,
    next_group: usize,
}

impl TextEditor {
    pub fn new(doc: RichDocument) -> Self {
        let mut lines = Vec::new();
        let mut next_group = 0;

        for node in doc.0 {
            match node {
                Node::Element(el) if el.kind.is_list() => {
                    let group = ListGroup {
                        kind: el.kind,
                        id: next_group,
                        align: el.align,
                    };
                    next_group += 1;
                    for child in el.children {
                        let block = match child {
                            Node::Element(item) => item,
                            leaf @ Node::Text(_) => Element::new(BlockType::ListItem, vec![leaf]),
                        };
                        lines.push(Line {
                            group: Some(group),
                            block,
                        });
                    }
                }
                Node::Element(el) => lines.push(Line {
                    group: None,
                    block: el,
                }),
                leaf @ Node::Text(_) => lines.push(Line {
                    group: None,
                    block: Element::new(BlockType::Paragraph, vec![leaf]),
                }),
            }
        }

        Self { lines, next_group }
    }

    pub fn block_count(&self) -> usize {
        self.lines.len()
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.lines.len());
        range.start.min(end)..end
    }

    pub fn is_block_active(&self, range: Range<usize>, format: BlockType) -> bool {
        let range = self.clamp(range);
        self.lines[range].iter().any(|line| {
            if format.is_list() {
                line.group.map(|g| g.kind) == Some(format)
            } else {
                line.block.kind == format
            }
        })
    }

    pub fn is_alignment_active(&self, range: Range<usize>, align: Alignment) -> bool {
        let range = self.clamp(range);
        self.lines[range]
            .iter()
            .any(|line| line.block.align == Some(align))
    }

    pub fn is_mark_active(&self, range: Range<usize>, mark: Mark) -> bool {
        let range = self.clamp(range);
        let leaves: Vec<&TextLeaf> = self.lines[range]
            .iter()
            .flat_map(|line| line.block.leaves())
            .collect();
        !leaves.is_empty() && leaves.iter().all(|leaf| leaf.has_mark(mark))
    }

    /// Switch the selected blocks to `format`, or back to paragraphs when it is already active.
    ///
    /// Selected list items are lifted out of their list first, splitting it.
    /// `ListItem` is not a format of its own; list formats produce it.
    pub fn toggle_block(&mut self, range: Range<usize>, format: BlockType) {
        let range = self.clamp(range);
        if range.is_empty() || format == BlockType::ListItem {
            return;
        }
        let active = self.is_block_active(range.clone(), format);
        let wrap = if !active && format.is_list() {
            let group = ListGroup {
                kind: format,
                id: self.next_group,
                align: None,
            };
            self.next_group += 1;
            Some(group)
        } else {
            None
        };

        for line in &mut self.lines[range] {
            line.group = wrap;
            line.block.kind = if active {
                BlockType::Paragraph
            } else if format.is_list() {
                BlockType::ListItem
            } else {
                format
            };
        }
    }

    pub fn toggle_alignment(&mut self, range: Range<usize>, align: Alignment) {
        let range = self.clamp(range);
        let active = self.is_alignment_active(range.clone(), align);
        for line in &mut self.lines[range] {
            line.block.align = if active { None } else { Some(align) };
        }
    }

    pub fn toggle_mark(&mut self, range: Range<usize>, mark: Mark) {
        let range = self.clamp(range);
        let on = !self.is_mark_active(range.clone(), mark);
        for line in &mut self.lines[range] {
            for leaf in line.block.leaves_mut() {
                leaf.set_mark(mark, on);
            }
        }
    }

    pub fn document(&self) -> RichDocument {
        let mut nodes: Vec<Node> = Vec::new();
        let mut current: Option<(ListGroup, Vec<Node>)> = None;

        for line in &self.lines {
            let continues = matches!(
                (line.group, &current),
                (Some(g), Some((open, _))) if open.id == g.id
            );
            if continues {
                if let Some((_, items)) = current.as_mut() {
                    items.push(Node::Element(line.block.clone()));
                }
                continue;
            }
            if let Some((open, items)) = current.take() {
                nodes.push(list_node(open, items));
            }
            match line.group {
                Some(g) => current = Some((g, vec![Node::Element(line.block.clone())])),
                None => nodes.push(Node::Element(line.block.clone())),
            }
        }
        if let Some((open, items)) = current.take() {
            nodes.push(list_node(open, items));
        }
        RichDocument(nodes)
    }
}

fn list_node(group: ListGroup, items: Vec<Node>) -> Node {
    Node::Element(Element {
        kind: group.kind,
        align: group.align,
        children: items,
    })
}
