//! Toolbar layout and allowed formats handed to the editing widget

use std::fmt;

/// A format the widget is allowed to apply
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Font,
    Size,
    Bold,
    Italic,
    Underline,
    Strike,
    Color,
    Background,
    Script,
    Blockquote,
    CodeBlock,
    Header,
    List,
    Bullet,
    Align,
    Indent,
    Direction,
    Link,
    Image,
    Video,
}

impl Format {
    /// Every format, in the order the widget is configured with
    pub const ALL: [Format; 20] = [
        Format::Font,
        Format::Size,
        Format::Bold,
        Format::Italic,
        Format::Underline,
        Format::Strike,
        Format::Color,
        Format::Background,
        Format::Script,
        Format::Blockquote,
        Format::CodeBlock,
        Format::Header,
        Format::List,
        Format::Bullet,
        Format::Align,
        Format::Indent,
        Format::Direction,
        Format::Link,
        Format::Image,
        Format::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Font => "font",
            Format::Size => "size",
            Format::Bold => "bold",
            Format::Italic => "italic",
            Format::Underline => "underline",
            Format::Strike => "strike",
            Format::Color => "color",
            Format::Background => "background",
            Format::Script => "script",
            Format::Blockquote => "blockquote",
            Format::CodeBlock => "code-block",
            Format::Header => "header",
            Format::List => "list",
            Format::Bullet => "bullet",
            Format::Align => "align",
            Format::Indent => "indent",
            Format::Direction => "direction",
            Format::Link => "link",
            Format::Image => "image",
            Format::Video => "video",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Script {
    Sub,
    Super,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Bullet,
}

/// One control on the toolbar
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolbarItem {
    FontPicker,
    SizePicker,
    Bold,
    Italic,
    Underline,
    Strike,
    ColorPicker,
    BackgroundPicker,
    Script(Script),
    Blockquote,
    CodeBlock,
    Header(u8),
    List(ListKind),
    AlignPicker,
    /// Relative indent step, `-1` or `+1`
    Indent(i8),
    DirectionRtl,
    Link,
    Image,
    Video,
    Clean,
    /// Header levels offered by the picker; `None` is normal text
    HeaderPicker(Vec<Option<u8>>),
}

impl ToolbarItem {
    /// Format the control applies. `Clean` removes formats instead.
    pub fn format(&self) -> Option<Format> {
        Some(match self {
            ToolbarItem::FontPicker => Format::Font,
            ToolbarItem::SizePicker => Format::Size,
            ToolbarItem::Bold => Format::Bold,
            ToolbarItem::Italic => Format::Italic,
            ToolbarItem::Underline => Format::Underline,
            ToolbarItem::Strike => Format::Strike,
            ToolbarItem::ColorPicker => Format::Color,
            ToolbarItem::BackgroundPicker => Format::Background,
            ToolbarItem::Script(_) => Format::Script,
            ToolbarItem::Blockquote => Format::Blockquote,
            ToolbarItem::CodeBlock => Format::CodeBlock,
            ToolbarItem::Header(_) | ToolbarItem::HeaderPicker(_) => Format::Header,
            ToolbarItem::List(_) => Format::List,
            ToolbarItem::AlignPicker => Format::Align,
            ToolbarItem::Indent(_) => Format::Indent,
            ToolbarItem::DirectionRtl => Format::Direction,
            ToolbarItem::Link => Format::Link,
            ToolbarItem::Image => Format::Image,
            ToolbarItem::Video => Format::Video,
            ToolbarItem::Clean => return None,
        })
    }
}

/// Ordered groups of toolbar controls
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolbarConfig {
    pub groups: Vec<Vec<ToolbarItem>>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        use ToolbarItem as T;
        let header_levels = (1..=6).map(Some).chain(std::iter::once(None)).collect();
        Self {
            groups: vec![
                vec![T::FontPicker, T::SizePicker],
                vec![T::Bold, T::Italic, T::Underline, T::Strike],
                vec![T::ColorPicker, T::BackgroundPicker],
                vec![T::Script(Script::Sub), T::Script(Script::Super)],
                vec![T::Blockquote, T::CodeBlock],
                vec![T::Header(1), T::Header(2)],
                vec![T::List(ListKind::Ordered), T::List(ListKind::Bullet)],
                vec![T::AlignPicker],
                vec![T::Indent(-1), T::Indent(1)],
                vec![T::DirectionRtl],
                vec![T::Link, T::Image, T::Video],
                vec![T::Clean],
                vec![T::HeaderPicker(header_levels)],
            ],
        }
    }
}

impl ToolbarConfig {
    pub fn items(&self) -> impl Iterator<Item = &ToolbarItem> {
        self.groups.iter().flatten()
    }

    /// Formats the toolbar can apply, first appearance order, no duplicates
    pub fn formats(&self) -> Vec<Format> {
        let mut formats = Vec::new();
        for format in self.items().filter_map(ToolbarItem::format) {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }
}
