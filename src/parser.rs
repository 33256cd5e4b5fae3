use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::ParserConfig;
use crate::cursor::Cursor;
use crate::directive::{is_block_marker, read_statement, Statement};
use crate::document::{Document, FILE_VERSION};
use crate::error::{Diagnostic, LineRef, Parsed, WndError, WndResult};
use crate::schema::{WindowType, STANDARD_SLOTS};
use crate::validator::{validate_properties, BlockContext};
use crate::window::{
    Attribute, DrawData, Font, PropertySet, ScreenRect, TextColors, WindowId, WindowName,
    WindowNode,
};

/// Directive tags in the only order they may appear inside a window block.
pub const CANONICAL_ORDER: [&str; 18] = [
    "WINDOWTYPE",
    "SCREENRECT",
    "NAME",
    "STATUS",
    "STYLE",
    "SYSTEMCALLBACK",
    "INPUTCALLBACK",
    "TOOLTIPCALLBACK",
    "DRAWCALLBACK",
    "FONT",
    "HEADERTEMPLATE",
    "TOOLTIPTEXT",
    "TOOLTIPDELAY",
    "TEXT",
    "TEXTCOLOR",
    "ENABLEDDRAWDATA",
    "DISABLEDDRAWDATA",
    "HILITEDRAWDATA",
];

/// Floor every other `*DATA` / `*DRAWDATA` group raises the order to.
const TRAILING_RANK: usize = 15;

fn canonical_rank(tag: &str) -> Option<usize> {
    CANONICAL_ORDER.iter().position(|t| *t == tag)
}

// ─── Public parse functions ──────────────────────────────────────────────────

/// Parse a whole document held in memory. `path` is only used in diagnostics.
pub fn parse_document(text: &str, path: &str) -> WndResult<Parsed<Document>> {
    parse_document_with_config(text, path, &ParserConfig::default())
}

pub fn parse_document_with_config(
    text: &str,
    path: &str,
    config: &ParserConfig,
) -> WndResult<Parsed<Document>> {
    let mut cursor = Cursor::new(text, path);
    let mut diagnostics = Vec::new();

    let (metadata, layout) = parse_header(&mut cursor, config, &mut diagnostics)?;
    let windows = parse_forest(&mut cursor, config, None, &mut diagnostics)?;

    log::debug!(
        "parsed {}: {} root windows, {} warnings",
        path,
        windows.len(),
        diagnostics.len()
    );

    Ok(Parsed::new(
        Document {
            metadata,
            layout,
            windows,
        },
        diagnostics,
    ))
}

/// Read and parse a `.wnd` file.
pub fn parse_file(path: impl AsRef<Path>) -> WndResult<Parsed<Document>> {
    parse_file_with_config(path, &ParserConfig::default())
}

pub fn parse_file_with_config(
    path: impl AsRef<Path>,
    config: &ParserConfig,
) -> WndResult<Parsed<Document>> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| WndError::Io {
        path: display.clone(),
        reason: e.to_string(),
    })?;
    parse_document_with_config(&text, &display, config)
}

/// Parse the raw text of one window and give it `id`.
///
/// The text is either a full `WINDOW … END` unit or just its directive lines.
pub fn parse_block(text: &str, id: WindowId) -> WndResult<Parsed<WindowNode>> {
    parse_block_with_config(text, id, "<block>", &ParserConfig::default())
}

pub fn parse_block_with_config(
    text: &str,
    id: WindowId,
    path: &str,
    config: &ParserConfig,
) -> WndResult<Parsed<WindowNode>> {
    let mut cursor = Cursor::new(text, path);
    let mut diagnostics = Vec::new();

    cursor.skip_trivia();
    let bare = !matches!(cursor.peek().map(str::trim), Ok("WINDOW"));
    let mut roots = if bare {
        parse_bare_block(&mut cursor, config, id, &mut diagnostics)?
    } else {
        parse_forest(&mut cursor, config, Some(id), &mut diagnostics)?
    };

    if roots.len() != 1 {
        return Err(WndError::format(
            path,
            LineRef::Line(1),
            text.lines().next().unwrap_or_default(),
            format!("Expected exactly one window block, found {}", roots.len()),
        ));
    }
    Ok(Parsed::new(roots.remove(0), diagnostics))
}

// ─── Metadata and layout block ───────────────────────────────────────────────

type Header = (IndexMap<String, String>, Option<IndexMap<String, String>>);

fn parse_header(
    cursor: &mut Cursor,
    config: &ParserConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> WndResult<Header> {
    let mut metadata = IndexMap::new();
    let mut layout: Option<IndexMap<String, String>> = None;

    loop {
        cursor.skip_trivia();
        let Ok(line) = cursor.peek().map(str::trim) else {
            break;
        };

        if line == "STARTLAYOUTBLOCK" {
            if layout.is_some() {
                return Err(WndError::format(
                    cursor.path(),
                    LineRef::Line(cursor.line_number()),
                    line,
                    "Duplicate STARTLAYOUTBLOCK",
                ));
            }
            layout = Some(parse_layout_block(cursor)?);
            continue;
        }
        if is_block_marker(line) {
            break;
        }

        let stmt = read_statement(cursor)?;
        if metadata.contains_key(&stmt.tag) {
            return Err(stmt.format_error(format!("Duplicate key '{}' in metadata", stmt.tag)));
        }
        metadata.insert(stmt.tag, stmt.value);
    }

    if !metadata.contains_key(FILE_VERSION) {
        let line = LineRef::Line(1);
        if config.require_file_version {
            return Err(WndError::format(cursor.path(), line, "", "Missing FILE_VERSION"));
        }
        let warning = Diagnostic::informational(cursor.path(), line, "", "Missing FILE_VERSION");
        log::warn!("{}", warning);
        diagnostics.push(warning);
    }

    Ok((metadata, layout))
}

fn parse_layout_block(cursor: &mut Cursor) -> WndResult<IndexMap<String, String>> {
    let start = cursor.line_number();
    cursor.advance().ok();
    let mut entries = IndexMap::new();

    loop {
        cursor.skip_trivia();
        let line = match cursor.peek().map(str::trim) {
            Ok("ENDLAYOUTBLOCK") => {
                cursor.advance().ok();
                return Ok(entries);
            }
            Ok(line) if !is_block_marker(line) => line,
            _ => {
                return Err(WndError::format(
                    cursor.path(),
                    LineRef::Line(start),
                    "STARTLAYOUTBLOCK",
                    "ENDLAYOUTBLOCK is missing",
                ))
            }
        };
        log::trace!("layout line {}", line);

        let stmt = read_statement(cursor)?;
        if entries.contains_key(&stmt.tag) {
            return Err(stmt.format_error(format!("Duplicate key '{}' in layout block", stmt.tag)));
        }
        entries.insert(stmt.tag, stmt.value);
    }
}

// ─── Window tree ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildRegion {
    NotOpened,
    Open,
    Closed,
}

/// An open `WINDOW` block.
struct Frame {
    id: WindowId,
    start_line: usize,
    builder: PropertyBuilder,
    children: Vec<WindowNode>,
    region: ChildRegion,
    /// Saw `CHILD`, next marker must be `WINDOW`.
    awaiting_window: bool,
}

impl Frame {
    fn new(id: WindowId, start_line: usize) -> Self {
        Self {
            id,
            start_line,
            builder: PropertyBuilder::default(),
            children: Vec::new(),
            region: ChildRegion::NotOpened,
            awaiting_window: false,
        }
    }

    fn finish(
        self,
        path: &str,
        config: &ParserConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> WndResult<WindowNode> {
        let ctx = BlockContext::new(path, self.start_line);
        let properties = self.builder.build(&ctx)?;
        diagnostics.extend(validate_properties(&properties, &ctx, config)?);

        log::debug!(
            "closed {} '{}' ({} children)",
            properties.window_type,
            properties.name.name,
            self.children.len()
        );

        Ok(WindowNode {
            id: self.id,
            properties,
            children: self.children,
        })
    }
}

fn marker_error(cursor: &Cursor, line: &str, message: &str) -> WndError {
    WndError::format(
        cursor.path(),
        LineRef::Line(cursor.line_number()),
        line,
        message,
    )
}

/// Consume window blocks until end of input. `first_id` names the first top-level window.
fn parse_forest(
    cursor: &mut Cursor,
    config: &ParserConfig,
    mut first_id: Option<WindowId>,
    diagnostics: &mut Vec<Diagnostic>,
) -> WndResult<Vec<WindowNode>> {
    let mut roots = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        cursor.skip_trivia();
        let Ok(raw) = cursor.peek() else {
            break;
        };
        let line = raw.trim();

        match line {
            "WINDOW" => {
                if let Some(frame) = stack.last_mut() {
                    if !frame.awaiting_window {
                        return Err(marker_error(cursor, line, "WINDOW must follow CHILD"));
                    }
                    frame.awaiting_window = false;
                }
                let id = first_id.take().unwrap_or_default();
                stack.push(Frame::new(id, cursor.line_number()));
                cursor.advance().ok();
            }
            "CHILD" => {
                let Some(frame) = stack.last_mut() else {
                    return Err(marker_error(cursor, line, "Unexpected CHILD without a parent window"));
                };
                if frame.awaiting_window {
                    return Err(marker_error(cursor, line, "CHILD must be followed by WINDOW"));
                }
                if frame.region == ChildRegion::Closed {
                    return Err(marker_error(cursor, line, "CHILD after ENDALLCHILDREN"));
                }
                frame.region = ChildRegion::Open;
                frame.awaiting_window = true;
                cursor.advance().ok();
            }
            "ENDALLCHILDREN" => {
                let Some(frame) = stack.last_mut() else {
                    return Err(marker_error(cursor, line, "ENDALLCHILDREN without an open window"));
                };
                if frame.awaiting_window {
                    return Err(marker_error(cursor, line, "CHILD must be followed by WINDOW"));
                }
                if frame.region != ChildRegion::Open || frame.children.is_empty() {
                    return Err(marker_error(cursor, line, "ENDALLCHILDREN found without children"));
                }
                frame.region = ChildRegion::Closed;
                cursor.advance().ok();
            }
            "END" => {
                let Some(frame) = stack.pop() else {
                    return Err(marker_error(
                        cursor,
                        line,
                        "Unexpected END without a corresponding WINDOW",
                    ));
                };
                if frame.awaiting_window {
                    return Err(marker_error(cursor, line, "CHILD must be followed by WINDOW"));
                }
                if frame.region == ChildRegion::Open {
                    return Err(marker_error(cursor, line, "Missing ENDALLCHILDREN before END"));
                }
                cursor.advance().ok();

                let node = frame.finish(cursor.path(), config, diagnostics)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => roots.push(node),
                }
            }
            _ => {
                let Some(frame) = stack.last_mut() else {
                    return Err(marker_error(cursor, line, "Unexpected line encountered"));
                };
                if is_block_marker(line) {
                    return Err(marker_error(cursor, line, "Unexpected line encountered"));
                }
                if frame.awaiting_window {
                    return Err(marker_error(cursor, line, "CHILD must be followed by WINDOW"));
                }
                if frame.region != ChildRegion::NotOpened {
                    return Err(marker_error(
                        cursor,
                        line,
                        "Directives must come before the block's child windows",
                    ));
                }
                let stmt = read_statement(cursor)?;
                frame.builder.apply(&stmt)?;
            }
        }
    }

    if let Some(frame) = stack.last() {
        return Err(WndError::format(
            cursor.path(),
            LineRef::Line(cursor.line_number()),
            "<end of input>",
            format!("Unclosed window (opened at line {})", frame.start_line),
        ));
    }

    Ok(roots)
}

/// Directive lines of a single window with no `WINDOW`/`END` around them.
fn parse_bare_block(
    cursor: &mut Cursor,
    config: &ParserConfig,
    id: WindowId,
    diagnostics: &mut Vec<Diagnostic>,
) -> WndResult<Vec<WindowNode>> {
    let mut frame = Frame::new(id, cursor.line_number());
    loop {
        cursor.skip_trivia();
        let Ok(raw) = cursor.peek() else {
            break;
        };
        let line = raw.trim();
        if is_block_marker(line) {
            return Err(marker_error(
                cursor,
                line,
                "Block markers are not allowed in a bare directive block",
            ));
        }
        let stmt = read_statement(cursor)?;
        frame.builder.apply(&stmt)?;
    }
    Ok(vec![frame.finish(cursor.path(), config, diagnostics)?])
}

// ─── Property accumulation ───────────────────────────────────────────────────

/// Collects directives of one block, enforcing order and uniqueness.
#[derive(Debug, Default)]
struct PropertyBuilder {
    window_type: Option<WindowType>,
    screen_rect: Option<ScreenRect>,
    name: Option<WindowName>,
    status: Option<Vec<String>>,
    style: Option<Vec<String>>,
    system_callback: Option<String>,
    input_callback: Option<String>,
    tooltip_callback: Option<String>,
    draw_callback: Option<String>,
    font: Option<Font>,
    header_template: Option<String>,
    tooltip_text: Option<String>,
    tooltip_delay: Option<i32>,
    text: Option<String>,
    text_color: Option<TextColors>,
    textures: IndexMap<String, DrawData>,
    attributes: IndexMap<String, Vec<Attribute>>,
    seen: Vec<String>,
    /// Highest rank so far and the tag that set it.
    high_water: Option<(usize, String)>,
}

impl PropertyBuilder {
    fn apply(&mut self, stmt: &Statement) -> WndResult<()> {
        let tag = stmt.tag.as_str();
        let rank = match canonical_rank(tag) {
            Some(rank) => rank,
            None if tag.ends_with("DATA") => TRAILING_RANK,
            None => return Err(stmt.format_error(format!("Unknown directive '{}'", tag))),
        };

        if self.seen.iter().any(|t| t == tag) {
            return Err(stmt.format_error(format!("Duplicate tag '{}'", tag)));
        }
        if let Some((high, last)) = &self.high_water {
            // Extra groups are unordered among the trailing section.
            if rank < *high && canonical_rank(tag).is_some() {
                return Err(stmt.format_error(format!(
                    "Tag '{}' appeared out of order. Expected before '{}'",
                    tag, last
                )));
            }
        }
        if self.high_water.as_ref().map_or(true, |(high, _)| rank > *high) {
            self.high_water = Some((rank, tag.to_string()));
        }
        self.seen.push(tag.to_string());

        match tag {
            "WINDOWTYPE" => {
                let window_type = WindowType::from_str(stmt.value.trim()).map_err(|_| {
                    stmt.format_error(format!("Unknown window type '{}'", stmt.value))
                })?;
                self.window_type = Some(window_type);
            }
            "SCREENRECT" => self.screen_rect = Some(stmt.rect()?),
            "NAME" => self.name = Some(WindowName::parse(&stmt.unquoted())),
            "STATUS" => self.status = Some(stmt.flags()?),
            "STYLE" => self.style = Some(stmt.flags()?),
            "SYSTEMCALLBACK" => self.system_callback = Some(stmt.unquoted()),
            "INPUTCALLBACK" => self.input_callback = Some(stmt.unquoted()),
            "TOOLTIPCALLBACK" => self.tooltip_callback = Some(stmt.unquoted()),
            "DRAWCALLBACK" => self.draw_callback = Some(stmt.unquoted()),
            "FONT" => self.font = Some(stmt.font()?),
            "HEADERTEMPLATE" => self.header_template = Some(stmt.unquoted()),
            "TOOLTIPTEXT" => self.tooltip_text = Some(stmt.unquoted()),
            "TOOLTIPDELAY" => self.tooltip_delay = Some(stmt.integer()?),
            "TEXT" => self.text = Some(stmt.unquoted()),
            "TEXTCOLOR" => self.text_color = Some(stmt.text_colors()?),
            _ if tag.ends_with("DRAWDATA") => {
                self.textures.insert(stmt.tag.clone(), stmt.draw_data()?);
            }
            _ => {
                self.attributes.insert(stmt.tag.clone(), stmt.attributes()?);
            }
        }
        Ok(())
    }

    fn build(mut self, ctx: &BlockContext) -> WndResult<PropertySet> {
        let missing = |tag: &str| {
            WndError::format(
                ctx.path,
                LineRef::Block {
                    start: ctx.start_line,
                },
                "WINDOW",
                format!("Missing required directive '{}'", tag),
            )
        };

        if let Some(slot) = STANDARD_SLOTS
            .iter()
            .find(|s| !self.textures.contains_key(**s))
        {
            return Err(missing(*slot));
        }

        // Standard slots first, then the rest in file order.
        let mut textures = IndexMap::with_capacity(self.textures.len());
        for slot in STANDARD_SLOTS {
            if let Some(data) = self.textures.shift_remove(slot) {
                textures.insert(slot.to_string(), data);
            }
        }
        textures.extend(self.textures);

        Ok(PropertySet {
            window_type: self.window_type.ok_or_else(|| missing("WINDOWTYPE"))?,
            screen_rect: self.screen_rect.ok_or_else(|| missing("SCREENRECT"))?,
            name: self.name.ok_or_else(|| missing("NAME"))?,
            status: self.status.ok_or_else(|| missing("STATUS"))?,
            style: self.style.ok_or_else(|| missing("STYLE"))?,
            system_callback: self.system_callback.ok_or_else(|| missing("SYSTEMCALLBACK"))?,
            input_callback: self.input_callback.ok_or_else(|| missing("INPUTCALLBACK"))?,
            tooltip_callback: self.tooltip_callback.ok_or_else(|| missing("TOOLTIPCALLBACK"))?,
            draw_callback: self.draw_callback.ok_or_else(|| missing("DRAWCALLBACK"))?,
            font: self.font.ok_or_else(|| missing("FONT"))?,
            header_template: self.header_template.ok_or_else(|| missing("HEADERTEMPLATE"))?,
            tooltip_text: self.tooltip_text,
            tooltip_delay: self.tooltip_delay,
            text: self.text,
            text_color: self.text_color.ok_or_else(|| missing("TEXTCOLOR"))?,
            textures,
            attributes: self.attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;
    use pretty_assertions::assert_eq;

    const DRAW: &str = "IMAGE: NoImage, COLOR: 255 255 255 0, BORDERCOLOR: 255 255 255 0";

    fn draw(tag: &str) -> String {
        format!("{} = {};", tag, vec![DRAW; 9].join(",\n  "))
    }

    fn body(name: &str) -> String {
        [
            "WINDOWTYPE = USER;".to_string(),
            "SCREENRECT = UPPERLEFT: 0 0,\n BOTTOMRIGHT: 800 600,\n CREATIONRESOLUTION: 800 600;"
                .to_string(),
            format!("NAME = \"Test.wnd:{}\";", name),
            "STATUS = ENABLED;".to_string(),
            "STYLE = USER+MOUSETRACK;".to_string(),
            "SYSTEMCALLBACK = \"[None]\";".to_string(),
            "INPUTCALLBACK = \"[None]\";".to_string(),
            "TOOLTIPCALLBACK = \"[None]\";".to_string(),
            "DRAWCALLBACK = \"[None]\";".to_string(),
            "FONT = NAME: \"Arial\", SIZE: 12, BOLD: 0;".to_string(),
            "HEADERTEMPLATE = \"[NONE]\";".to_string(),
            "TOOLTIPDELAY = -1;".to_string(),
            "TEXTCOLOR = ENABLED: 1 1 1 1, ENABLEDBORDER: 2 2 2 2, DISABLED: 3 3 3 3, \
             DISABLEDBORDER: 4 4 4 4, HILITE: 5 5 5 5, HILITEBORDER: 6 6 6 6;"
                .to_string(),
            draw("ENABLEDDRAWDATA"),
            draw("DISABLEDDRAWDATA"),
            draw("HILITEDRAWDATA"),
        ]
        .join("\n")
    }

    fn window(name: &str) -> String {
        format!("WINDOW\n{}\nEND", body(name))
    }

    fn doc(windows: &str) -> String {
        format!("FILE_VERSION = 2;\n{}\n", windows)
    }

    #[test]
    fn test_single_window() {
        let parsed = parse_document(&doc(&window("Main")), "t.wnd").unwrap();
        assert!(parsed.diagnostics.is_empty());
        let doc = parsed.value;
        assert_eq!(doc.file_version(), Some("2"));
        assert_eq!(doc.windows.len(), 1);

        let props = &doc.windows[0].properties;
        assert_eq!(props.name, WindowName::with_file("Test.wnd", "Main"));
        assert_eq!(props.style, vec!["USER", "MOUSETRACK"]);
        assert_eq!(props.tooltip_delay, Some(-1));
        assert_eq!(props.tooltip_text, None);
        assert_eq!(props.text_color.hilite_border.r, 6);
    }

    #[test]
    fn test_layout_block_and_comments() {
        let text = format!(
            "; header comment\nFILE_VERSION = 2;\nSTARTLAYOUTBLOCK\n  LAYOUTINIT = [None];\n  LAYOUTUPDATE = [None];\nENDLAYOUTBLOCK\n; windows\n{}",
            window("Main")
        );
        let doc = parse_document(&text, "t.wnd").unwrap().value;
        let layout = doc.layout.unwrap();
        assert_eq!(layout.get("LAYOUTINIT").map(String::as_str), Some("[None]"));
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_duplicate_metadata_key() {
        let text = format!("FILE_VERSION = 2;\nFILE_VERSION = 3;\n{}", window("Main"));
        let err = parse_document(&text, "t.wnd").unwrap_err();
        assert!(matches!(err, WndError::Format { line: LineRef::Line(2), .. }));
    }

    #[test]
    fn test_unterminated_layout_block() {
        let text = format!("STARTLAYOUTBLOCK\n  LAYOUTINIT = [None];\n{}", window("Main"));
        let err = parse_document(&text, "t.wnd").unwrap_err();
        assert!(err.to_string().contains("ENDLAYOUTBLOCK is missing"));
    }

    #[test]
    fn test_missing_file_version_is_informational() {
        let parsed = parse_document(&window("Main"), "t.wnd").unwrap();
        assert_eq!(parsed.diagnostics.len(), 1);
        assert_eq!(parsed.diagnostics[0].severity, Severity::Informational);

        let strict = ParserConfig {
            require_file_version: true,
            ..ParserConfig::default()
        };
        assert!(parse_document_with_config(&window("Main"), "t.wnd", &strict).is_err());
    }

    #[test]
    fn test_children_in_order() {
        let text = doc(&format!(
            "WINDOW\n{}\nCHILD\n{}\nCHILD\n{}\nENDALLCHILDREN\nEND",
            body("Parent"),
            window("First"),
            window("Second")
        ));
        let doc = parse_document(&text, "t.wnd").unwrap().value;
        let parent = &doc.windows[0];
        let names: Vec<&str> = parent.children.iter().map(|c| c.display_name()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_unclosed_window_at_end_of_input() {
        let text = doc(&format!("WINDOW\n{}\nCHILD\n{}", body("Parent"), window("Child")));
        let err = parse_document(&text, "t.wnd").unwrap_err();
        assert_eq!(err.severity(), Severity::Fatal);
        assert!(err.to_string().contains("Unclosed window (opened at line 2)"));
    }

    #[test]
    fn test_marker_errors() {
        let cases = [
            ("END\n".to_string(), "Unexpected END"),
            ("CHILD\n".to_string(), "Unexpected CHILD"),
            (
                format!("WINDOW\n{}\nENDALLCHILDREN\nEND", body("A")),
                "ENDALLCHILDREN found without children",
            ),
            (
                format!("WINDOW\n{}\nCHILD\n{}\nEND", body("A"), window("B")),
                "Missing ENDALLCHILDREN",
            ),
            (
                format!("WINDOW\n{}\n{}\nEND", body("A"), window("B")),
                "WINDOW must follow CHILD",
            ),
            (format!("{}\ngarbage = 1;", window("A")), "Unexpected line encountered"),
        ];
        for (text, expected) in cases {
            let err = parse_document(&doc(&text), "t.wnd").unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "expected '{}' in '{}'",
                expected,
                err
            );
        }
    }

    /// 1-based number of the last line whose trimmed text is `needle`.
    fn last_line_of(text: &str, needle: &str) -> usize {
        text.lines().collect::<Vec<_>>().iter().rposition(|l| l.trim() == needle).unwrap() + 1
    }

    #[test]
    fn test_structure_errors_point_at_offending_line() {
        let cases = [
            (
                "STARTLAYOUTBLOCK\nENDLAYOUTBLOCK\nSTARTLAYOUTBLOCK\nENDLAYOUTBLOCK\n".to_string()
                    + &window("A"),
                "STARTLAYOUTBLOCK",
                "Duplicate STARTLAYOUTBLOCK",
            ),
            (
                "STARTLAYOUTBLOCK\n  LAYOUTINIT = [None];\n  LAYOUTINIT = [None];\nENDLAYOUTBLOCK\n"
                    .to_string()
                    + &window("A"),
                "LAYOUTINIT = [None];",
                "Duplicate key 'LAYOUTINIT' in layout block",
            ),
            (
                format!(
                    "WINDOW\n{}\nCHILD\n{}\nENDALLCHILDREN\nCHILD\n{}\nENDALLCHILDREN\nEND",
                    body("A"),
                    window("B"),
                    window("C")
                ),
                "CHILD",
                "CHILD after ENDALLCHILDREN",
            ),
            (
                format!(
                    "WINDOW\n{}\nCHILD\n{}\nTEXT = \"late\";\nENDALLCHILDREN\nEND",
                    body("A"),
                    window("B")
                ),
                "TEXT = \"late\";",
                "Directives must come before the block's child windows",
            ),
            (
                format!("WINDOW\n{}\nCHILD\nEND", body("A")),
                "END",
                "CHILD must be followed by WINDOW",
            ),
            (
                window("A").replacen("WINDOWTYPE = USER;", "WINDOWTYPE = SPINNER;", 1),
                "WINDOWTYPE = SPINNER;",
                "Unknown window type 'SPINNER'",
            ),
            (
                window("A").replacen("STATUS = ENABLED;", "STATUS = ENABLED;\nBOGUS = 1;", 1),
                "BOGUS = 1;",
                "Unknown directive 'BOGUS'",
            ),
        ];

        for (windows, offending, expected) in cases {
            let text = doc(&windows);
            let err = parse_document(&text, "t.wnd").unwrap_err();
            match err {
                WndError::Format { line, message, .. } => {
                    assert_eq!(message, expected);
                    assert_eq!(line, LineRef::Line(last_line_of(&text, offending)), "{}", expected);
                }
                other => panic!("expected a format error for '{}', got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_name_before_windowtype_is_rejected() {
        let text = body("A").replacen("WINDOWTYPE = USER;\n", "", 1).replacen(
            "STATUS = ENABLED;",
            "STATUS = ENABLED;\nWINDOWTYPE = USER;",
            1,
        );
        let err = parse_document(&doc(&format!("WINDOW\n{}\nEND", text)), "t.wnd").unwrap_err();
        match err {
            WndError::Format { line, message, raw_text, .. } => {
                assert!(message.contains("out of order"), "{}", message);
                assert_eq!(raw_text, "WINDOWTYPE = USER;");
                assert!(matches!(line, LineRef::Line(_)));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_extra_data_groups_are_kept() {
        let text = body("A")
            + "\nLISTBOXDATA = LENGTH: 100,\n  COLUMNS: 1;\n"
            + &draw("SLIDERTHUMBENABLEDDRAWDATA");
        let node = parse_block(&format!("WINDOW\n{}\nEND", text), WindowId::new())
            .unwrap()
            .value;
        assert_eq!(node.properties.attribute("LISTBOXDATA", "LENGTH"), Some(100));
        assert!(node.properties.textures.contains_key("SLIDERTHUMBENABLEDDRAWDATA"));
    }

    #[test]
    fn test_trailing_groups_before_textcolor_rejected() {
        let text = body("A").replacen(
            "TEXTCOLOR",
            "LISTBOXDATA = LENGTH: 1;\nTEXTCOLOR",
            1,
        );
        assert!(parse_block(&text, WindowId::new()).is_err());
    }

    #[test]
    fn test_duplicate_directive_rejected() {
        let text = body("A").replacen("STATUS = ENABLED;", "STATUS = ENABLED;\nSTATUS = HIDDEN;", 1);
        let err = parse_block(&text, WindowId::new()).unwrap_err();
        assert!(err.to_string().contains("Duplicate tag 'STATUS'"));
    }

    #[test]
    fn test_missing_required_directive() {
        let text = body("A").replacen("FONT = NAME: \"Arial\", SIZE: 12, BOLD: 0;\n", "", 1);
        let err = parse_block(&text, WindowId::new()).unwrap_err();
        assert!(matches!(err, WndError::Format { line: LineRef::Block { .. }, .. }));
        assert!(err.to_string().contains("'FONT'"));
    }

    #[test]
    fn test_parse_block_assigns_identity() {
        let id = WindowId::new();
        let from_unit = parse_block(&window("A"), id).unwrap().value;
        assert_eq!(from_unit.id, id);

        let from_body = parse_block(&body("A"), id).unwrap().value;
        assert_eq!(from_body.id, id);
        assert_eq!(from_unit.properties, from_body.properties);
    }

    #[test]
    fn test_parse_block_rejects_two_windows() {
        let text = format!("{}\n{}", window("A"), window("B"));
        assert!(parse_block(&text, WindowId::new()).is_err());
    }

    #[test]
    fn test_value_error_aborts_the_file() {
        let text = body("A").replacen("SIZE: 12", "SIZE: 99", 1);
        let err = parse_document(&doc(&format!("WINDOW\n{}\nEND", text)), "t.wnd").unwrap_err();
        assert!(matches!(err, WndError::Value { line: LineRef::Block { start: 2 }, .. }));
    }
}
