//! Control types and the registry of their default property sets.
//!
//! Each control type is described by one [`ControlSchema`] entry in a static
//! table. The table drives [`create_default`]; the parser never consults it,
//! so unknown but well-formed `*DATA`/`*DRAWDATA` groups still parse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ParserConfig;
use crate::error::{WndError, WndResult};
use crate::window::{
    Attribute, DrawData, DrawEntry, Font, Point, PropertySet, Rgba, ScreenRect, TextColors,
    WindowId, WindowName, WindowNode, NO_CALLBACK,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WindowType {
    User,
    PushButton,
    StaticText,
    EntryField,
    CheckBox,
    RadioButton,
    ProgressBar,
    HorzSlider,
    VertSlider,
    ScrollListBox,
    ComboBox,
}

impl WindowType {
    pub const ALL: [WindowType; 11] = [
        WindowType::User,
        WindowType::PushButton,
        WindowType::StaticText,
        WindowType::EntryField,
        WindowType::CheckBox,
        WindowType::RadioButton,
        WindowType::ProgressBar,
        WindowType::HorzSlider,
        WindowType::VertSlider,
        WindowType::ScrollListBox,
        WindowType::ComboBox,
    ];

    /// Wire token, e.g. `PUSHBUTTON`.
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowType::User => "USER",
            WindowType::PushButton => "PUSHBUTTON",
            WindowType::StaticText => "STATICTEXT",
            WindowType::EntryField => "ENTRYFIELD",
            WindowType::CheckBox => "CHECKBOX",
            WindowType::RadioButton => "RADIOBUTTON",
            WindowType::ProgressBar => "PROGRESSBAR",
            WindowType::HorzSlider => "HORZSLIDER",
            WindowType::VertSlider => "VERTSLIDER",
            WindowType::ScrollListBox => "SCROLLLISTBOX",
            WindowType::ComboBox => "COMBOBOX",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowType {
    type Err = WndError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| WndError::UnknownWindowType {
                name: s.to_string(),
            })
    }
}

// ─── Schema table ────────────────────────────────────────────────────────────

/// One non-filler draw-data entry at a fixed index.
#[derive(Debug, Clone, Copy)]
pub struct EntryTemplate {
    pub index: usize,
    pub image: &'static str,
    pub color: Rgba,
    pub border_color: Rgba,
}

#[derive(Debug, Clone, Copy)]
pub struct SlotTemplate {
    pub slot: &'static str,
    pub entries: &'static [EntryTemplate],
}

#[derive(Debug, Clone, Copy)]
pub struct GroupTemplate {
    pub group: &'static str,
    pub fields: &'static [(&'static str, i32)],
}

/// Default-value template for one control type.
#[derive(Debug, Clone, Copy)]
pub struct ControlSchema {
    pub window_type: WindowType,
    pub name: &'static str,
    pub status: &'static [&'static str],
    pub style: &'static [&'static str],
    pub header_template: &'static str,
    pub tooltip_text: Option<&'static str>,
    pub text: Option<&'static str>,
    /// Color of every entry a slot template leaves unset.
    pub filler: Rgba,
    pub textures: &'static [SlotTemplate],
    /// Slots shared with other types, appended after `textures`.
    pub shared: &'static [SlotTemplate],
    pub attributes: &'static [GroupTemplate],
}

impl ControlSchema {
    /// Slot names a fresh control of this type carries, standard slots first.
    pub fn slot_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = STANDARD_SLOTS.to_vec();
        for template in self.slot_templates() {
            if !names.contains(&template.slot) {
                names.push(template.slot);
            }
        }
        names
    }

    fn slot_templates(&self) -> impl Iterator<Item = &'static SlotTemplate> {
        self.textures.iter().chain(self.shared.iter())
    }

    fn build_slot(&self, slot: &str) -> DrawData {
        let filler = DrawData::filled(DrawEntry::blank(self.filler));
        match self.slot_templates().find(|t| t.slot == slot) {
            Some(template) => filler.with_entries(template.entries.iter().map(|e| {
                (e.index, DrawEntry::new(e.image, e.color, e.border_color))
            })),
            None => filler,
        }
    }

    /// Build the default property set described by this entry.
    pub fn properties(&self) -> PropertySet {
        let textures: IndexMap<String, DrawData> = self
            .slot_names()
            .into_iter()
            .map(|slot| (slot.to_string(), self.build_slot(slot)))
            .collect();

        let attributes = self
            .attributes
            .iter()
            .map(|g| {
                let fields = g.fields.iter().map(|(k, v)| Attribute::new(*k, *v)).collect();
                (g.group.to_string(), fields)
            })
            .collect();

        PropertySet {
            window_type: self.window_type,
            screen_rect: DEFAULT_RECT,
            name: WindowName::new(self.name),
            status: self.status.iter().map(|s| s.to_string()).collect(),
            style: self.style.iter().map(|s| s.to_string()).collect(),
            system_callback: NO_CALLBACK.to_string(),
            input_callback: NO_CALLBACK.to_string(),
            tooltip_callback: NO_CALLBACK.to_string(),
            draw_callback: NO_CALLBACK.to_string(),
            font: Font::new(DEFAULT_FONT, DEFAULT_FONT_SIZE, 0),
            header_template: self.header_template.to_string(),
            tooltip_text: self.tooltip_text.map(str::to_string),
            tooltip_delay: Some(-1),
            text: self.text.map(str::to_string),
            text_color: TextColors::uniform(Rgba::WHITE),
            textures,
            attributes,
        }
    }
}

pub const STANDARD_SLOTS: [&str; 3] = ["ENABLEDDRAWDATA", "DISABLEDDRAWDATA", "HILITEDRAWDATA"];

const DEFAULT_FONT: &str = "Times New Roman";
const DEFAULT_FONT_SIZE: u32 = 14;
const DEFAULT_RECT: ScreenRect =
    ScreenRect::new(Point::new(10, 10), Point::new(200, 100), Point::new(800, 600));

const CLEAR: Rgba = Rgba::TRANSPARENT_WHITE;

const fn c(r: u8, g: u8, b: u8, a: u8) -> Rgba {
    Rgba::new(r, g, b, a)
}

const fn e(index: usize, image: &'static str, color: Rgba, border_color: Rgba) -> EntryTemplate {
    EntryTemplate {
        index,
        image,
        color,
        border_color,
    }
}

macro_rules! slot {
    ($name:literal, $entries:expr $(,)?) => {
        SlotTemplate {
            slot: $name,
            entries: $entries,
        }
    };
}

// Scroll-bar slots shared by list boxes and combo boxes.
const LISTBOX_SCROLL_SLOTS: &[SlotTemplate] = &[
    slot!("LISTBOXENABLEDUPBUTTONDRAWDATA", &[
        e(0, "VSliderUpButtonEnabled", c(255, 0, 0, 255), c(255, 128, 128, 255)),
        e(1, "VSliderUpButtonHiliteSelected", c(255, 255, 0, 255), c(254, 254, 254, 255)),
    ]),
    slot!("LISTBOXDISABLEDUPBUTTONDRAWDATA", &[
        e(0, "VSliderUpButtonDisabled", c(255, 0, 0, 255), c(255, 128, 128, 255)),
        e(1, "NoImage", c(255, 255, 0, 255), c(254, 254, 254, 255)),
    ]),
    slot!("LISTBOXHILITEUPBUTTONDRAWDATA", &[
        e(0, "VSliderUpButtonHilite", c(255, 0, 0, 255), c(255, 128, 128, 255)),
        e(1, "VSliderUpButtonHiliteSelected", c(255, 255, 0, 255), c(254, 254, 254, 255)),
    ]),
    slot!("LISTBOXENABLEDDOWNBUTTONDRAWDATA", DOWN_BUTTON_ENABLED),
    slot!("LISTBOXDISABLEDDOWNBUTTONDRAWDATA", DOWN_BUTTON_DISABLED),
    slot!("LISTBOXHILITEDOWNBUTTONDRAWDATA", DOWN_BUTTON_HILITE),
    slot!("LISTBOXENABLEDSLIDERDRAWDATA", &[
        e(0, "VSliderEnabledTopEnd", c(255, 190, 0, 0), c(47, 55, 168, 255)),
        e(1, "VSliderEnabledBottomEnd", CLEAR, CLEAR),
        e(2, "VSliderEnabledRepeatingCenter", CLEAR, CLEAR),
        e(3, "VSliderEnabledSmallRepeatingCenter", CLEAR, CLEAR),
    ]),
    slot!("LISTBOXDISABLEDSLIDERDRAWDATA", &[
        e(0, "VSliderDisabledTopEnd", c(128, 128, 128, 0), c(148, 112, 0, 255)),
        e(1, "VSliderDisabledBottomEnd", CLEAR, CLEAR),
        e(2, "VSliderDisabledRepeatingCenter", CLEAR, CLEAR),
        e(3, "VSliderDisabledSmallRepeatingCenter", CLEAR, CLEAR),
    ]),
    slot!("LISTBOXHILITESLIDERDRAWDATA", &[
        e(0, "VSliderHiliteTopEnd", c(0, 255, 0, 0), c(49, 55, 168, 255)),
        e(1, "VSliderHiliteBottomEnd", CLEAR, CLEAR),
        e(2, "VSliderHiliteRepeatingCenter", CLEAR, CLEAR),
        e(3, "VSliderHiliteSmallRepeatingCenter", CLEAR, CLEAR),
    ]),
    slot!("SLIDERTHUMBENABLEDDRAWDATA", &[
        e(0, "ScrollBarThumbEnabled", c(255, 4, 0, 0), c(255, 243, 28, 255)),
        e(1, "ScrollBarThumbHiliteSelected", c(255, 255, 0, 255), c(254, 254, 254, 255)),
    ]),
    slot!("SLIDERTHUMBDISABLEDDRAWDATA", &[
        e(0, "ScrollBarThumbDisabled", c(128, 128, 128, 255), c(192, 192, 192, 255)),
        e(1, "NoImage", c(192, 192, 192, 255), c(254, 254, 254, 255)),
    ]),
    slot!("SLIDERTHUMBHILITEDRAWDATA", &[
        e(0, "ScrollBarThumbHilite", c(0, 255, 0, 255), c(0, 128, 0, 255)),
        e(1, "ScrollBarThumbHiliteSelected", c(254, 254, 254, 255), c(0, 128, 0, 255)),
    ]),
];

const DOWN_BUTTON_ENABLED: &[EntryTemplate] = &[
    e(0, "VSliderDownButtonEnabled", c(255, 0, 0, 255), c(255, 128, 128, 255)),
    e(1, "VSliderDownButtonHiliteSelected", c(255, 255, 0, 255), c(254, 254, 254, 255)),
];

const DOWN_BUTTON_DISABLED: &[EntryTemplate] = &[
    e(0, "VSliderDownButtonDisabled", c(128, 128, 128, 255), c(192, 192, 192, 255)),
    e(1, "NoImage", c(192, 192, 192, 255), c(254, 254, 254, 255)),
];

const DOWN_BUTTON_HILITE: &[EntryTemplate] = &[
    e(0, "VSliderDownButtonHilite", c(0, 255, 0, 255), c(0, 128, 0, 255)),
    e(1, "VSliderDownButtonHiliteSelected", c(254, 254, 254, 255), c(0, 128, 0, 255)),
];

const HILITE_SELECTED_ITEM: [EntryTemplate; 4] = [
    e(1, "ListBoxHiliteSelectedItemLeftEnd", c(254, 254, 254, 255), c(0, 128, 0, 255)),
    e(2, "ListBoxHiliteSelectedItemRightEnd", CLEAR, CLEAR),
    e(3, "ListBoxHiliteSelectedItemRepeatingCenter", CLEAR, CLEAR),
    e(4, "ListBoxHiliteSelectedItemSmallRepeatingCenter", CLEAR, CLEAR),
];

const SCROLLLISTBOX_SLOTS: &[SlotTemplate] = &[
    slot!("ENABLEDDRAWDATA", &[
        e(0, "BlackSquare", c(0, 0, 0, 126), c(49, 55, 168, 255)),
        e(1, "ListBoxHiliteItemLeftEnd", c(255, 255, 0, 255), c(254, 254, 254, 255)),
        e(2, "ListBoxHiliteItemRightEnd", CLEAR, CLEAR),
        e(3, "ListBoxHiliteItemRepeatingCenter", CLEAR, CLEAR),
        e(4, "ListBoxHiliteItemSmallRepeatingCenter", CLEAR, CLEAR),
    ]),
    slot!("DISABLEDDRAWDATA", &[
        e(0, "NoImage", c(255, 4, 0, 0), c(49, 55, 168, 255)),
        e(1, "NoImage", c(192, 192, 192, 255), c(254, 254, 254, 255)),
    ]),
    slot!("HILITEDRAWDATA", &[
        e(0, "BlackSquare", c(0, 0, 0, 126), c(49, 55, 168, 255)),
        HILITE_SELECTED_ITEM[0],
        HILITE_SELECTED_ITEM[1],
        HILITE_SELECTED_ITEM[2],
        HILITE_SELECTED_ITEM[3],
    ]),
];

const COMBOBOX_SLOTS: &[SlotTemplate] = &[
    slot!("ENABLEDDRAWDATA", &[
        e(0, "NoImage", c(255, 0, 0, 255), c(255, 128, 128, 255)),
        e(1, "NoImage", c(47, 55, 168, 255), c(254, 254, 254, 255)),
    ]),
    slot!("DISABLEDDRAWDATA", &[
        e(0, "NoImage", c(128, 128, 128, 255), c(192, 192, 192, 255)),
        e(1, "NoImage", c(192, 192, 192, 255), c(254, 254, 254, 255)),
    ]),
    slot!("HILITEDRAWDATA", &[
        e(0, "NoImage", c(0, 255, 0, 255), c(0, 128, 0, 255)),
        HILITE_SELECTED_ITEM[0],
        HILITE_SELECTED_ITEM[1],
        HILITE_SELECTED_ITEM[2],
        HILITE_SELECTED_ITEM[3],
    ]),
    slot!("COMBOBOXDROPDOWNBUTTONENABLEDDRAWDATA", DOWN_BUTTON_ENABLED),
    slot!("COMBOBOXDROPDOWNBUTTONDISABLEDDRAWDATA", DOWN_BUTTON_DISABLED),
    slot!("COMBOBOXDROPDOWNBUTTONHILITEDRAWDATA", DOWN_BUTTON_HILITE),
    slot!("COMBOBOXEDITBOXENABLEDDRAWDATA", &[
        e(0, "TextEntryEnabledLeftEnd", c(255, 0, 0, 255), c(255, 128, 128, 255)),
        e(1, "TextEntryEnabledRightEnd", c(255, 255, 0, 255), c(254, 254, 254, 255)),
        e(2, "TextEntryEnabledRepeatingCenter", CLEAR, CLEAR),
        e(3, "TextEntryEnabledSmallRepeatingCenter", CLEAR, CLEAR),
    ]),
    slot!("COMBOBOXEDITBOXDISABLEDDRAWDATA", &[
        e(0, "TextEntryDisabledLeftEnd", c(128, 128, 128, 255), c(0, 0, 0, 255)),
        e(1, "TextEntryDisabledRightEnd", c(192, 192, 192, 255), c(254, 254, 254, 255)),
        e(2, "TextEntryDisabledRepeatingCenter", CLEAR, CLEAR),
        e(3, "TextEntryDisabledSmallRepeatingCenter", CLEAR, CLEAR),
    ]),
    slot!("COMBOBOXEDITBOXHILITEDRAWDATA", &[
        e(0, "TextEntryHiliteLeftEnd", c(0, 255, 0, 255), c(0, 128, 0, 255)),
        e(1, "TextEntryHiliteRightEnd", c(254, 254, 254, 255), c(0, 128, 0, 255)),
        e(2, "TextEntryHiliteRepeatingCenter", CLEAR, CLEAR),
        e(3, "TextEntryHiliteSmallRepeatingCenter", CLEAR, CLEAR),
    ]),
    slot!("COMBOBOXLISTBOXENABLEDDRAWDATA", &[
        e(0, "BlackSquare", c(0, 0, 0, 255), c(49, 55, 168, 255)),
        e(1, "ListBoxHiliteItemLeftEnd", c(255, 255, 0, 255), c(254, 254, 254, 255)),
        e(2, "ListBoxHiliteItemRightEnd", CLEAR, CLEAR),
        e(3, "ListBoxHiliteItemRepeatingCenter", CLEAR, CLEAR),
        e(4, "ListBoxHiliteItemSmallRepeatingCenter", CLEAR, CLEAR),
    ]),
    slot!("COMBOBOXLISTBOXDISABLEDDRAWDATA", &[
        e(0, "NoImage", c(255, 4, 0, 0), c(49, 55, 168, 255)),
        e(1, "NoImage", c(192, 192, 192, 255), c(254, 254, 254, 255)),
    ]),
    slot!("COMBOBOXLISTBOXHILITEDRAWDATA", &[
        e(0, "BlackSquare", c(0, 0, 0, 255), c(49, 55, 168, 255)),
        HILITE_SELECTED_ITEM[0],
        HILITE_SELECTED_ITEM[1],
        HILITE_SELECTED_ITEM[2],
        HILITE_SELECTED_ITEM[3],
    ]),
];

static REGISTRY: [ControlSchema; 11] = [
    ControlSchema {
        window_type: WindowType::User,
        name: "user",
        status: &["ENABLED"],
        style: &["USER"],
        header_template: "[NONE]",
        tooltip_text: None,
        text: None,
        filler: CLEAR,
        shared: &[],
        textures: &[],
        attributes: &[],
    },
    ControlSchema {
        window_type: WindowType::PushButton,
        name: "Button",
        status: &["ENABLED", "IMAGE"],
        style: &["PUSHBUTTON", "MOUSETRACK"],
        header_template: "MainButton",
        tooltip_text: None,
        text: Some("Button"),
        filler: CLEAR,
        shared: &[],
        textures: &[
            slot!("ENABLEDDRAWDATA", &[
                e(0, "Buttons-Left", c(255, 0, 0, 255), c(255, 128, 128, 255)),
                e(1, "NoImage", c(47, 55, 168, 255), c(254, 254, 254, 255)),
                e(5, "Buttons-Middle", CLEAR, CLEAR),
                e(6, "Buttons-Right", CLEAR, CLEAR),
            ]),
            slot!("DISABLEDDRAWDATA", &[
                e(0, "Buttons-Disabled-Left", c(128, 128, 128, 255), c(192, 192, 192, 255)),
                e(1, "NoImage", c(192, 192, 192, 255), c(128, 128, 128, 255)),
                e(5, "Buttons-Disabled-Middle", CLEAR, CLEAR),
                e(6, "Buttons-Disabled-Right", CLEAR, CLEAR),
            ]),
            slot!("HILITEDRAWDATA", &[
                e(0, "Buttons-HiLite-Left", c(209, 253, 4, 255), c(59, 60, 52, 255)),
                e(1, "Buttons-Pushed-Left", c(47, 55, 168, 255), c(254, 254, 254, 255)),
                e(3, "Buttons-Pushed-Middle", CLEAR, CLEAR),
                e(4, "Buttons-Pushed-Right", CLEAR, CLEAR),
                e(5, "Buttons-HiLite-Middle", CLEAR, CLEAR),
                e(6, "Buttons-HiLite-Right", CLEAR, CLEAR),
            ]),
        ],
        attributes: &[],
    },
    ControlSchema {
        window_type: WindowType::StaticText,
        name: "StaticText",
        status: &["ENABLED"],
        style: &["STATICTEXT", "MOUSETRACK"],
        header_template: "LabelRegular",
        tooltip_text: None,
        text: Some("Static Text"),
        filler: CLEAR,
        shared: &[],
        textures: &[
            slot!("ENABLEDDRAWDATA", &[e(0, "StaticTextEnabled", c(255, 0, 0, 255), c(255, 128, 128, 255))]),
            slot!("DISABLEDDRAWDATA", &[e(0, "StaticTextDisabled", c(64, 64, 64, 255), c(192, 192, 192, 255))]),
            slot!("HILITEDRAWDATA", &[e(0, "StaticTextHilite", c(0, 128, 0, 255), c(128, 255, 128, 255))]),
        ],
        attributes: &[GroupTemplate {
            group: "STATICTEXTDATA",
            fields: &[("CENTERED", 0)],
        }],
    },
    ControlSchema {
        window_type: WindowType::EntryField,
        name: "TextEntry",
        status: &["ENABLED", "IMAGE"],
        style: &["ENTRYFIELD", "MOUSETRACK"],
        header_template: "TextEntry",
        tooltip_text: None,
        text: Some("Entry"),
        filler: CLEAR,
        shared: &[],
        textures: &[
            slot!("ENABLEDDRAWDATA", &[
                e(0, "TextEntryEnabledLeftEnd", c(0, 0, 0, 255), c(0, 0, 0, 255)),
                e(1, "TextEntryEnabledRightEnd", CLEAR, CLEAR),
                e(2, "TextEntryEnabledRepeatingCenter", CLEAR, CLEAR),
                e(3, "TextEntryEnabledSmallRepeatingCenter", CLEAR, CLEAR),
            ]),
            slot!("DISABLEDDRAWDATA", &[
                e(0, "TextEntryDisabledLeftEnd", c(0, 0, 128, 255), c(0, 0, 0, 255)),
                e(1, "TextEntryDisabledRightEnd", CLEAR, CLEAR),
                e(2, "TextEntryDisabledRepeatingCenter", CLEAR, CLEAR),
                e(3, "TextEntryDisabledSmallRepeatingCenter", CLEAR, CLEAR),
            ]),
            slot!("HILITEDRAWDATA", &[
                e(0, "TextEntryHiliteLeftEnd", c(0, 0, 0, 255), c(0, 0, 0, 255)),
                e(1, "TextEntryHiliteRightEnd", CLEAR, CLEAR),
                e(2, "TextEntryHiliteRepeatingCenter", CLEAR, CLEAR),
                e(3, "TextEntryHiliteSmallRepeatingCenter", CLEAR, CLEAR),
            ]),
        ],
        attributes: &[GroupTemplate {
            group: "TEXTENTRYDATA",
            fields: &[
                ("MAXLEN", 64),
                ("SECRETTEXT", 0),
                ("NUMERICALONLY", 0),
                ("ALPHANUMERICALONLY", 0),
                ("ASCIIONLY", 1),
            ],
        }],
    },
    ControlSchema {
        window_type: WindowType::CheckBox,
        name: "CheckBox",
        status: &["ENABLED", "IMAGE", "BORDER"],
        style: &["CHECKBOX", "MOUSETRACK"],
        header_template: "LabelRegular",
        tooltip_text: None,
        text: Some("CheckBox"),
        filler: CLEAR,
        shared: &[],
        textures: &[
            slot!("ENABLEDDRAWDATA", &[
                e(0, "NoImage", c(255, 0, 0, 255), c(255, 128, 128, 255)),
                e(1, "Active-Unchecked", CLEAR, c(128, 128, 255, 255)),
                e(2, "Active-Checked", c(0, 0, 255, 255), c(128, 128, 255, 255)),
            ]),
            slot!("DISABLEDDRAWDATA", &[
                e(0, "NoImage", c(128, 128, 128, 255), c(192, 192, 192, 255)),
                e(1, "Disabled-Unchecked", CLEAR, c(192, 192, 192, 255)),
                e(2, "Disabled-Checked", c(64, 64, 64, 255), c(254, 254, 254, 255)),
            ]),
            slot!("HILITEDRAWDATA", &[
                e(0, "NoImage", c(0, 255, 0, 255), c(128, 255, 128, 255)),
                e(1, "Active-HiLighted", CLEAR, c(128, 128, 255, 255)),
                e(2, "Active-Checked", c(255, 255, 0, 255), c(254, 254, 254, 255)),
            ]),
        ],
        attributes: &[],
    },
    ControlSchema {
        window_type: WindowType::RadioButton,
        name: "RadioButton",
        status: &["ENABLED", "HIDDEN", "IMAGE", "BORDER"],
        style: &["RADIOBUTTON", "MOUSETRACK"],
        header_template: "LabelRegular",
        tooltip_text: None,
        text: Some("Radio Button"),
        filler: CLEAR,
        shared: &[],
        textures: &[
            slot!("ENABLEDDRAWDATA", &RADIO_ENABLED),
            slot!("DISABLEDDRAWDATA", &[
                e(0, "RadioButtonDisabledLeft", c(128, 128, 128, 255), c(192, 192, 192, 255)),
                e(1, "RadioButtonDisabledMiddle", c(128, 128, 128, 255), c(192, 192, 192, 255)),
                e(2, "RadioButtonDisabledRight", c(64, 64, 64, 255), c(254, 254, 254, 255)),
            ]),
            slot!("HILITEDRAWDATA", &[
                RADIO_ENABLED[0],
                RADIO_ENABLED[1],
                RADIO_ENABLED[2],
                e(3, "RadioButtonHilightedLeft", c(0, 1, 0, 160), c(47, 55, 168, 255)),
                e(4, "RadioButtonHilightedMiddle", c(0, 128, 0, 0), c(128, 255, 128, 255)),
                e(5, "RadioButtonHilightedRight", c(117, 43, 0, 200), c(254, 254, 254, 0)),
            ]),
        ],
        attributes: &[GroupTemplate {
            group: "RADIOBUTTONDATA",
            fields: &[("GROUP", 1)],
        }],
    },
    ControlSchema {
        window_type: WindowType::ProgressBar,
        name: "ProgressBar",
        status: &["ENABLED", "IMAGE"],
        style: &["PROGRESSBAR", "MOUSETRACK"],
        header_template: "[NONE]",
        tooltip_text: None,
        text: None,
        filler: CLEAR,
        shared: &[],
        textures: &[
            slot!("ENABLEDDRAWDATA", &[
                e(0, "LoadingBar_L", c(255, 0, 0, 255), c(255, 128, 128, 255)),
                e(1, "LoadingBar_R", CLEAR, CLEAR),
                e(2, "LoadingBar_C", CLEAR, CLEAR),
                e(4, "NoImage", c(47, 55, 168, 255), c(254, 254, 254, 255)),
                e(5, "LoadingBar_DePowered", CLEAR, CLEAR),
                e(6, "LoadingBar_Progress", CLEAR, CLEAR),
            ]),
            slot!("DISABLEDDRAWDATA", &[
                e(0, "NoImage", c(64, 64, 64, 255), c(192, 192, 192, 255)),
                e(4, "NoImage", c(192, 192, 192, 255), c(254, 254, 254, 255)),
            ]),
            slot!("HILITEDRAWDATA", &[
                e(0, "NoImage", c(0, 255, 0, 255), c(0, 128, 0, 255)),
                e(4, "NoImage", c(47, 55, 168, 255), c(254, 254, 254, 255)),
            ]),
        ],
        attributes: &[],
    },
    ControlSchema {
        window_type: WindowType::HorzSlider,
        name: "HorzSlider",
        status: &["ENABLED", "IMAGE", "TABSTOP"],
        style: &["HORZSLIDER", "MOUSETRACK"],
        header_template: "[NONE]",
        tooltip_text: None,
        text: None,
        filler: Rgba::WHITE,
        shared: &[],
        textures: &[
            slot!("ENABLEDDRAWDATA", &[e(0, "NoImage", c(255, 0, 0, 255), c(255, 128, 128, 255))]),
            slot!("DISABLEDDRAWDATA", &[
                e(0, "hilightedbox", c(128, 128, 128, 255), c(64, 64, 64, 255)),
                e(1, "dehilightedbox", Rgba::WHITE, Rgba::WHITE),
            ]),
            slot!("HILITEDRAWDATA", &[
                e(0, "linebox", c(0, 255, 0, 255), c(0, 128, 0, 255)),
                e(1, "arrow", Rgba::WHITE, Rgba::WHITE),
            ]),
            slot!("SLIDERTHUMBENABLEDDRAWDATA", &[
                e(0, "NoImage", c(255, 128, 128, 255), c(255, 0, 0, 255)),
                e(1, "NoImage", c(128, 128, 128, 255), c(192, 192, 192, 255)),
            ]),
            slot!("SLIDERTHUMBDISABLEDDRAWDATA", &[
                e(0, "NoImage", c(64, 64, 64, 255), c(128, 128, 128, 255)),
                e(1, "NoImage", c(0, 0, 0, 255), c(64, 64, 64, 255)),
            ]),
            slot!("SLIDERTHUMBHILITEDRAWDATA", &[
                e(0, "arrow", c(0, 255, 0, 255), c(0, 128, 0, 255)),
                e(1, "arrow", c(0, 0, 255, 255), c(128, 128, 255, 255)),
            ]),
        ],
        attributes: &[SLIDER_DATA],
    },
    ControlSchema {
        window_type: WindowType::VertSlider,
        name: "VertSlider",
        status: &["ENABLED", "IMAGE", "TABSTOP"],
        style: &["VERTSLIDER", "MOUSETRACK"],
        header_template: "[NONE]",
        tooltip_text: None,
        text: None,
        filler: CLEAR,
        shared: &[],
        textures: &[
            slot!("ENABLEDDRAWDATA", &[e(0, "NoImage", c(255, 0, 0, 255), c(255, 128, 128, 255))]),
            slot!("DISABLEDDRAWDATA", &[e(0, "NoImage", c(128, 128, 128, 255), c(64, 64, 64, 255))]),
            slot!("HILITEDRAWDATA", &[e(0, "NoImage", c(0, 255, 0, 255), c(0, 128, 0, 255))]),
            slot!("SLIDERTHUMBENABLEDDRAWDATA", &[
                e(0, "WindowResizeEnabled", c(255, 0, 0, 255), c(255, 128, 128, 255)),
                e(1, "WindowResizePushed", c(128, 128, 128, 255), c(192, 192, 192, 255)),
            ]),
            slot!("SLIDERTHUMBDISABLEDDRAWDATA", &[
                e(0, "WindowResizeDisabled", c(64, 64, 64, 255), c(128, 128, 128, 255)),
                e(1, "NoImage", c(0, 0, 0, 255), c(64, 64, 64, 255)),
            ]),
            slot!("SLIDERTHUMBHILITEDRAWDATA", &[
                e(0, "WindowResizeHilite", c(0, 255, 0, 255), c(128, 255, 128, 255)),
                e(1, "WindowResizePushed", c(0, 0, 255, 255), c(128, 128, 255, 255)),
            ]),
        ],
        attributes: &[SLIDER_DATA],
    },
    ControlSchema {
        window_type: WindowType::ScrollListBox,
        name: "ListBox",
        status: &["ENABLED"],
        style: &["SCROLLLISTBOX", "MOUSETRACK"],
        header_template: "LabelRegular",
        tooltip_text: None,
        text: None,
        filler: CLEAR,
        shared: LISTBOX_SCROLL_SLOTS,
        textures: SCROLLLISTBOX_SLOTS,
        attributes: &[GroupTemplate {
            group: "LISTBOXDATA",
            fields: &[
                ("LENGTH", 100),
                ("AUTOSCROLL", 0),
                ("AUTOPURGE", 0),
                ("SCROLLBAR", 1),
                ("MULTISELECT", 0),
                ("COLUMNS", 2),
                ("COLUMNSWIDTH", 30),
                ("COLUMNSWIDTH", 20),
                ("FORCESELECT", 1),
            ],
        }],
    },
    ControlSchema {
        window_type: WindowType::ComboBox,
        name: "ComboBox",
        status: &["ENABLED", "IMAGE"],
        style: &["COMBOBOX", "MOUSETRACK"],
        header_template: "ComboBoxEntry",
        tooltip_text: Some("TOOLTIP:LanIP"),
        text: None,
        filler: CLEAR,
        shared: LISTBOX_SCROLL_SLOTS,
        textures: COMBOBOX_SLOTS,
        attributes: &[GroupTemplate {
            group: "COMBOBOXDATA",
            fields: &[
                ("ISEDITABLE", 0),
                ("MAXCHARS", 16),
                ("MAXDISPLAY", 2),
                ("ASCIIONLY", 0),
                ("LETTERSANDNUMBERS", 0),
            ],
        }],
    },
];

const RADIO_ENABLED: [EntryTemplate; 3] = [
    e(0, "RadioButtonEnabledLeft", c(1, 1, 1, 160), c(47, 55, 168, 255)),
    e(1, "RadioButtonEnabledMiddle", c(128, 0, 0, 0), c(0, 0, 0, 0)),
    e(2, "RadioButtonEnabledRight", c(117, 43, 1, 200), c(128, 128, 255, 255)),
];

const SLIDER_DATA: GroupTemplate = GroupTemplate {
    group: "SLIDERDATA",
    fields: &[("MINVALUE", 1), ("MAXVALUE", 10)],
};

// ─── Public lookup ───────────────────────────────────────────────────────────

/// Registry entry for a control type.
pub fn schema_for(window_type: WindowType) -> &'static ControlSchema {
    let index = match window_type {
        WindowType::User => 0,
        WindowType::PushButton => 1,
        WindowType::StaticText => 2,
        WindowType::EntryField => 3,
        WindowType::CheckBox => 4,
        WindowType::RadioButton => 5,
        WindowType::ProgressBar => 6,
        WindowType::HorzSlider => 7,
        WindowType::VertSlider => 8,
        WindowType::ScrollListBox => 9,
        WindowType::ComboBox => 10,
    };
    &REGISTRY[index]
}

/// New node of the named control type, populated with registry defaults.
pub fn create_default(type_name: &str, id: WindowId) -> WndResult<WindowNode> {
    let window_type = WindowType::from_str(type_name.trim())?;
    log::debug!("creating default {} control {}", window_type, id);
    Ok(WindowNode::new(id, schema_for(window_type).properties()))
}

/// Like [`create_default`], tagging the `NAME` with `config.source_file` when set.
pub fn create_default_with_config(
    type_name: &str,
    id: WindowId,
    config: &ParserConfig,
) -> WndResult<WindowNode> {
    let mut node = create_default(type_name, id)?;
    if let Some(file) = &config.source_file {
        node.properties.name.file = Some(file.clone());
    }
    Ok(node)
}
