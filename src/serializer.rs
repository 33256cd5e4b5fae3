//! Canonical text rendering of documents, windows and property sets.
//!
//! Output always parses back to an equal structure. Nested windows are indented
//! two spaces per level; continuation lines of multi-line directives line up
//! under the first value.

use crate::document::{Document, FILE_VERSION};
use crate::schema::STANDARD_SLOTS;
use crate::window::{Attribute, DrawData, PropertySet, TextColors, WindowNode};

const STEP: &str = "  ";

/// Render a whole document, trailing newline included.
pub fn serialize_document(doc: &Document) -> String {
    let mut out = String::new();

    if let Some(version) = doc.file_version() {
        push_line(&mut out, "", &format!("{} = {};", FILE_VERSION, version));
    }
    for (key, value) in doc.metadata.iter().filter(|(k, _)| *k != FILE_VERSION) {
        push_line(&mut out, "", &format!("{} = {};", key, value));
    }

    if let Some(layout) = &doc.layout {
        push_line(&mut out, "", "STARTLAYOUTBLOCK");
        for (key, value) in layout {
            push_line(&mut out, STEP, &format!("{} = {};", key, value));
        }
        push_line(&mut out, "", "ENDLAYOUTBLOCK");
    }

    for window in &doc.windows {
        write_window(&mut out, window);
    }
    out
}

/// Render one window and its subtree as a top-level block.
pub fn serialize_window(node: &WindowNode) -> String {
    let mut out = String::new();
    write_window(&mut out, node);
    out
}

/// Render only the directive lines of a property set, unindented.
///
/// The result is accepted by [`crate::parser::parse_block`].
pub fn serialize_properties(props: &PropertySet) -> String {
    let mut out = String::new();
    for directive in directives(props) {
        push_block(&mut out, "", &directive);
    }
    out
}

enum Step<'a> {
    Open(&'a WindowNode, usize),
    Child(usize),
    Close(&'a WindowNode, usize),
}

/// Explicit stack, so nesting depth does not consume call stack.
fn write_window(out: &mut String, root: &WindowNode) {
    let mut stack = vec![Step::Open(root, 0)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(node, level) => {
                let inner = STEP.repeat(level + 1);
                push_line(out, &STEP.repeat(level), "WINDOW");
                for directive in directives(&node.properties) {
                    push_block(out, &inner, &directive);
                }

                stack.push(Step::Close(node, level));
                for child in node.children.iter().rev() {
                    stack.push(Step::Open(child, level + 1));
                    stack.push(Step::Child(level + 1));
                }
            }
            Step::Child(level) => push_line(out, &STEP.repeat(level), "CHILD"),
            Step::Close(node, level) => {
                if !node.children.is_empty() {
                    push_line(out, &STEP.repeat(level + 1), "ENDALLCHILDREN");
                }
                push_line(out, &STEP.repeat(level), "END");
            }
        }
    }
}

fn push_line(out: &mut String, indent: &str, line: &str) {
    out.push_str(indent);
    out.push_str(line);
    out.push('\n');
}

fn push_block(out: &mut String, indent: &str, block: &str) {
    for line in block.lines() {
        push_line(out, indent, line);
    }
}

// ─── Directives ──────────────────────────────────────────────────────────────

/// Every directive of `props` in canonical order, one string each.
fn directives(props: &PropertySet) -> Vec<String> {
    let mut out = vec![
        format!("WINDOWTYPE = {};", props.window_type),
        screen_rect(props),
        format!("NAME = \"{}\";", props.name),
        format!("STATUS = {};", props.status.join("+")),
        format!("STYLE = {};", props.style.join("+")),
        format!("SYSTEMCALLBACK = \"{}\";", props.system_callback),
        format!("INPUTCALLBACK = \"{}\";", props.input_callback),
        format!("TOOLTIPCALLBACK = \"{}\";", props.tooltip_callback),
        format!("DRAWCALLBACK = \"{}\";", props.draw_callback),
        format!(
            "FONT = NAME: \"{}\", SIZE: {}, BOLD: {};",
            props.font.name, props.font.size, props.font.bold
        ),
        format!("HEADERTEMPLATE = \"{}\";", props.header_template),
    ];

    if let Some(text) = &props.tooltip_text {
        out.push(format!("TOOLTIPTEXT = \"{}\";", text));
    }
    if let Some(delay) = props.tooltip_delay {
        out.push(format!("TOOLTIPDELAY = {};", delay));
    }
    if let Some(text) = &props.text {
        out.push(format!("TEXT = \"{}\";", text));
    }
    out.push(text_colors(&props.text_color));

    for slot in STANDARD_SLOTS {
        if let Some(data) = props.textures.get(slot) {
            out.push(draw_data(slot, data));
        }
    }
    for (group, fields) in &props.attributes {
        out.push(attribute_group(group, fields));
    }
    for (slot, data) in &props.textures {
        if !STANDARD_SLOTS.contains(&slot.as_str()) {
            out.push(draw_data(slot, data));
        }
    }
    out
}

fn screen_rect(props: &PropertySet) -> String {
    let rect = &props.screen_rect;
    let pad = " ".repeat("SCREENRECT = ".len());
    format!(
        "SCREENRECT = UPPERLEFT: {} {},\n{pad}BOTTOMRIGHT: {} {},\n{pad}CREATIONRESOLUTION: {} {};",
        rect.upper_left.x,
        rect.upper_left.y,
        rect.bottom_right.x,
        rect.bottom_right.y,
        rect.creation_resolution.x,
        rect.creation_resolution.y,
    )
}

fn text_colors(colors: &TextColors) -> String {
    let pad = " ".repeat("TEXTCOLOR = ".len());
    format!(
        "TEXTCOLOR = ENABLED: {}, ENABLEDBORDER: {},\n\
         {pad}DISABLED: {}, DISABLEDBORDER: {},\n\
         {pad}HILITE: {}, HILITEBORDER: {};",
        colors.enabled,
        colors.enabled_border,
        colors.disabled,
        colors.disabled_border,
        colors.hilite,
        colors.hilite_border,
    )
}

fn draw_data(tag: &str, data: &DrawData) -> String {
    let lines = data.entries().iter().map(|e| {
        format!(
            "IMAGE: {}, COLOR: {}, BORDERCOLOR: {}",
            e.image, e.color, e.border_color
        )
    });
    aligned(tag, lines)
}

fn attribute_group(group: &str, fields: &[Attribute]) -> String {
    if fields.is_empty() {
        return format!("{} = ;", group);
    }
    aligned(group, fields.iter().map(|a| format!("{}: {}", a.key, a.value)))
}

/// `TAG = first,` then each further item under the first, the last ending in `;`.
fn aligned(tag: &str, items: impl Iterator<Item = String>) -> String {
    let head = format!("{} = ", tag);
    let pad = " ".repeat(head.len());
    let items: Vec<String> = items.collect();

    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        let prefix = if i == 0 { head.as_str() } else { pad.as_str() };
        let end = if i + 1 == items.len() { ';' } else { ',' };
        if i > 0 {
            out.push('\n');
        }
        out.push_str(prefix);
        out.push_str(item);
        out.push(end);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_block, parse_document};
    use crate::schema::create_default;
    use crate::window::{Point, Rgba, ScreenRect, WindowId, WindowName};
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn button() -> WindowNode {
        let mut node = create_default("PUSHBUTTON", WindowId::new()).unwrap();
        node.properties.name = WindowName::with_file("Menu.wnd", "ButtonOK");
        node
    }

    #[test]
    fn test_screen_rect_layout() {
        let mut props = button().properties;
        props.screen_rect =
            ScreenRect::new(Point::new(1, 2), Point::new(300, 40), Point::new(800, 600));
        assert_eq!(
            screen_rect(&props),
            "SCREENRECT = UPPERLEFT: 1 2,\n             BOTTOMRIGHT: 300 40,\n             CREATIONRESOLUTION: 800 600;"
        );
    }

    #[test]
    fn test_text_color_layout() {
        let mut colors = TextColors::uniform(Rgba::WHITE);
        colors.disabled = Rgba::new(1, 2, 3, 4);
        assert_eq!(
            text_colors(&colors),
            "TEXTCOLOR = ENABLED: 255 255 255 255, ENABLEDBORDER: 255 255 255 255,\n            \
             DISABLED: 1 2 3 4, DISABLEDBORDER: 255 255 255 255,\n            \
             HILITE: 255 255 255 255, HILITEBORDER: 255 255 255 255;"
        );
    }

    #[test]
    fn test_draw_data_lines_align_under_first_entry() {
        let props = button().properties;
        let text = draw_data("HILITEDRAWDATA", &props.textures["HILITEDRAWDATA"]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("HILITEDRAWDATA = IMAGE: "));
        assert!(lines[1].starts_with(&format!("{}IMAGE: ", " ".repeat(17))));
        assert!(lines[8].ends_with(';'));
        assert!(lines[..8].iter().all(|l| l.ends_with(',')));
    }

    #[test]
    fn test_attribute_groups() {
        assert_eq!(attribute_group("EMPTYDATA", &[]), "EMPTYDATA = ;");
        assert_eq!(
            attribute_group(
                "LISTBOXDATA",
                &[Attribute::new("LENGTH", 100), Attribute::new("COLUMNS", 1)]
            ),
            "LISTBOXDATA = LENGTH: 100,\n              COLUMNS: 1;"
        );
    }

    #[test]
    fn test_optional_directives_are_omitted() {
        let mut props = button().properties;
        props.tooltip_text = None;
        props.tooltip_delay = None;
        props.text = None;
        let text = serialize_properties(&props);
        assert!(!text.contains("TOOLTIPTEXT"));
        assert!(!text.contains("TOOLTIPDELAY"));
        assert!(!text.contains("\nTEXT ="));
    }

    #[test]
    fn test_nested_window_markers() {
        let mut parent = create_default("USER", WindowId::new()).unwrap();
        parent.children.push(button());
        let text = serialize_window(&parent);
        let markers: Vec<&str> = text
            .lines()
            .filter(|l| ["WINDOW", "CHILD", "ENDALLCHILDREN", "END"].contains(&l.trim()))
            .collect();
        assert_eq!(
            markers,
            vec!["WINDOW", "  CHILD", "  WINDOW", "  END", "  ENDALLCHILDREN", "END"]
        );
        assert!(text.ends_with("END\n"));
    }

    #[test]
    fn test_document_header_order() {
        let mut metadata = IndexMap::new();
        metadata.insert("AUTHOR".to_string(), "someone".to_string());
        metadata.insert(FILE_VERSION.to_string(), "2".to_string());
        let mut layout = IndexMap::new();
        layout.insert("LAYOUTINIT".to_string(), "[None]".to_string());
        let doc = Document {
            metadata,
            layout: Some(layout),
            windows: vec![button()],
        };

        let text = serialize_document(&doc);
        let head: Vec<&str> = text.lines().take(5).collect();
        assert_eq!(
            head,
            vec![
                "FILE_VERSION = 2;",
                "AUTHOR = someone;",
                "STARTLAYOUTBLOCK",
                "  LAYOUTINIT = [None];",
                "ENDLAYOUTBLOCK",
            ]
        );
    }

    #[test]
    fn test_properties_round_trip_through_parse_block() {
        let mut node = create_default("SCROLLLISTBOX", WindowId::new()).unwrap();
        node.properties.tooltip_text = Some("Pick one".into());
        let text = serialize_properties(&node.properties);
        let parsed = parse_block(&text, node.id).unwrap().value;
        assert_eq!(parsed.properties, node.properties);
    }

    #[test]
    fn test_deep_nesting_on_a_small_stack() {
        let depth = 400;
        let mut node = button();
        for _ in 0..depth {
            let mut parent = create_default("USER", WindowId::new()).unwrap();
            parent.children.push(node);
            node = parent;
        }

        let text = std::thread::scope(|s| {
            std::thread::Builder::new()
                .stack_size(64 * 1024)
                .spawn_scoped(s, || serialize_window(&node))
                .unwrap()
                .join()
                .unwrap()
        });
        let windows = text.lines().filter(|l| l.trim() == "WINDOW").count();
        assert_eq!(windows, depth + 1);
        assert!(text.contains(&format!("{}WINDOWTYPE = PUSHBUTTON;", STEP.repeat(depth + 1))));

        let again = parse_block(&text, node.id).unwrap().value;
        assert!(again.structurally_eq(&node));
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let mut root = create_default("USER", WindowId::new()).unwrap();
        root.properties.screen_rect.bottom_right = Point::new(800, 600);
        root.children.push(button());
        root.children
            .push(create_default("COMBOBOX", WindowId::new()).unwrap());
        let mut doc = Document::new();
        doc.metadata.insert(FILE_VERSION.into(), "2".into());
        doc.windows.push(root);

        let first = serialize_document(&doc);
        let reparsed = parse_document(&first, "round.wnd").unwrap().value;
        assert!(reparsed.structurally_eq(&doc));
        assert_eq!(serialize_document(&reparsed), first);
    }
}
