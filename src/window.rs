use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::schema::WindowType;

/// Number of entries in every draw-data slot.
pub const DRAW_DATA_LEN: usize = 9;

/// Callback value meaning "no callback".
pub const NO_CALLBACK: &str = "[None]";

/// Image name meaning "no image".
pub const NO_IMAGE: &str = "NoImage";

/// Opaque node identity, assigned once and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(Uuid);

impl WindowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle plus the resolution it was authored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub upper_left: Point,
    pub bottom_right: Point,
    /// `x` is the width, `y` the height.
    pub creation_resolution: Point,
}

impl ScreenRect {
    pub const fn new(upper_left: Point, bottom_right: Point, creation_resolution: Point) -> Self {
        Self {
            upper_left,
            bottom_right,
            creation_resolution,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT_WHITE: Rgba = Rgba::new(255, 255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from wire components, returning the first out-of-range one on failure.
    pub fn from_components(c: [u32; 4]) -> Result<Self, u32> {
        let channel = |v: u32| u8::try_from(v).map_err(|_| v);
        Ok(Self::new(channel(c[0])?, channel(c[1])?, channel(c[2])?, channel(c[3])?))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}

/// The six named colors of a `TEXTCOLOR` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextColors {
    pub enabled: Rgba,
    pub enabled_border: Rgba,
    pub disabled: Rgba,
    pub disabled_border: Rgba,
    pub hilite: Rgba,
    pub hilite_border: Rgba,
}

impl TextColors {
    pub const NAMES: [&'static str; 6] = [
        "ENABLED",
        "ENABLEDBORDER",
        "DISABLED",
        "DISABLEDBORDER",
        "HILITE",
        "HILITEBORDER",
    ];

    pub const fn uniform(color: Rgba) -> Self {
        Self {
            enabled: color,
            enabled_border: color,
            disabled: color,
            disabled_border: color,
            hilite: color,
            hilite_border: color,
        }
    }

    pub fn get(&self, name: &str) -> Option<Rgba> {
        match name {
            "ENABLED" => Some(self.enabled),
            "ENABLEDBORDER" => Some(self.enabled_border),
            "DISABLED" => Some(self.disabled),
            "DISABLEDBORDER" => Some(self.disabled_border),
            "HILITE" => Some(self.hilite),
            "HILITEBORDER" => Some(self.hilite_border),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawEntry {
    pub image: String,
    pub color: Rgba,
    pub border_color: Rgba,
}

impl DrawEntry {
    pub fn new(image: impl Into<String>, color: Rgba, border_color: Rgba) -> Self {
        Self {
            image: image.into(),
            color,
            border_color,
        }
    }

    /// `NoImage` with both colors set to `color`.
    pub fn blank(color: Rgba) -> Self {
        Self::new(NO_IMAGE, color, color)
    }
}

/// One texture slot: always exactly [`DRAW_DATA_LEN`] entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawData([DrawEntry; DRAW_DATA_LEN]);

impl DrawData {
    pub fn new(entries: [DrawEntry; DRAW_DATA_LEN]) -> Self {
        Self(entries)
    }

    /// Every entry a copy of `entry`.
    pub fn filled(entry: DrawEntry) -> Self {
        Self(std::array::from_fn(|_| entry.clone()))
    }

    /// Replace the entries at the given indices; indices past the end are ignored.
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = (usize, DrawEntry)>) -> Self {
        for (index, entry) in entries {
            if let Some(slot) = self.0.get_mut(index) {
                *slot = entry;
            }
        }
        self
    }

    pub fn entries(&self) -> &[DrawEntry; DRAW_DATA_LEN] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<DrawEntry>> for DrawData {
    type Error = Vec<DrawEntry>;

    fn try_from(entries: Vec<DrawEntry>) -> Result<Self, Self::Error> {
        <[DrawEntry; DRAW_DATA_LEN]>::try_from(entries).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    pub size: u32,
    pub bold: u32,
}

impl Font {
    pub fn new(name: impl Into<String>, size: u32, bold: u32) -> Self {
        Self {
            name: name.into(),
            size,
            bold,
        }
    }
}

/// A `NAME` value: the window name plus the source file tag it was saved with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowName {
    pub file: Option<String>,
    pub name: String,
}

impl WindowName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            file: None,
            name: name.into(),
        }
    }

    pub fn with_file(file: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            name: name.into(),
        }
    }

    /// Split a wire value on its first `:`.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((file, name)) => Self::with_file(file, name),
            None => Self::new(raw),
        }
    }
}

impl fmt::Display for WindowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}", file, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// One `KEY: value` sub-field of an attribute group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: i32,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: i32) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Every field of one window block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySet {
    pub window_type: WindowType,
    pub screen_rect: ScreenRect,
    pub name: WindowName,
    pub status: Vec<String>,
    pub style: Vec<String>,
    pub system_callback: String,
    pub input_callback: String,
    pub tooltip_callback: String,
    pub draw_callback: String,
    pub font: Font,
    pub header_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_delay: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub text_color: TextColors,
    /// Slot name (ends with `DRAWDATA`) to entries.
    pub textures: IndexMap<String, DrawData>,
    /// Group name (ends with `DATA`) to its ordered sub-fields.
    pub attributes: IndexMap<String, Vec<Attribute>>,
}

impl PropertySet {
    pub fn has_status(&self, flag: &str) -> bool {
        self.status.iter().any(|s| s == flag)
    }

    pub fn attribute(&self, group: &str, key: &str) -> Option<i32> {
        self.attributes
            .get(group)?
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowNode {
    pub id: WindowId,
    pub properties: PropertySet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WindowNode>,
}

impl WindowNode {
    pub fn new(id: WindowId, properties: PropertySet) -> Self {
        Self {
            id,
            properties,
            children: Vec::new(),
        }
    }

    /// Window name without its file tag.
    pub fn display_name(&self) -> &str {
        &self.properties.name.name
    }

    pub fn window_type(&self) -> WindowType {
        self.properties.window_type
    }

    pub fn find(&self, id: WindowId) -> Option<&WindowNode> {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if node.id == id {
                return Some(node);
            }
            pending.extend(node.children.iter().rev());
        }
        None
    }

    pub fn find_mut(&mut self, id: WindowId) -> Option<&mut WindowNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.find(id).is_some()
    }

    /// Equal fields and tree shape, ignoring identities.
    pub fn structurally_eq(&self, other: &WindowNode) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.properties != b.properties || a.children.len() != b.children.len() {
                return false;
            }
            pending.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}
