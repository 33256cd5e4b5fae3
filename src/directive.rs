//! Logical `TAG = value;` statements and the typed readers for their values.
//!
//! A statement may span several physical lines; lines are trimmed and joined
//! with a single space until the buffer ends with `;`.

use regex::Regex;
use std::sync::OnceLock;

use crate::cursor::Cursor;
use crate::error::{LineRef, WndError, WndResult};
use crate::window::{Attribute, DrawData, DrawEntry, Font, Point, Rgba, ScreenRect, TextColors};

/// Lines that open or close a block and can never continue a statement.
pub const BLOCK_MARKERS: [&str; 6] = [
    "WINDOW",
    "END",
    "CHILD",
    "ENDALLCHILDREN",
    "STARTLAYOUTBLOCK",
    "ENDLAYOUTBLOCK",
];

pub fn is_block_marker(line: &str) -> bool {
    BLOCK_MARKERS.contains(&line)
}

/// One terminated statement, split on its first `=`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement<'a> {
    pub path: &'a str,
    pub tag: String,
    pub value: String,
    /// Line the statement starts on.
    pub line: usize,
    /// The joined physical lines, terminator included.
    pub raw_text: String,
}

/// Read one statement starting at the cursor's current line.
pub fn read_statement<'a>(cursor: &mut Cursor<'a>) -> WndResult<Statement<'a>> {
    let path = cursor.path();
    let start = cursor.line_number();
    let mut buffer = String::new();

    loop {
        let line = match cursor.advance() {
            Ok(line) => line.trim(),
            Err(_) => {
                return Err(WndError::format(
                    path,
                    LineRef::Line(start),
                    buffer,
                    "Missing ';' at the end of the statement",
                ))
            }
        };

        if !buffer.is_empty() && is_block_marker(line) {
            // Leave the marker for the block parser.
            cursor.rewind_one();
            return Err(WndError::format(
                path,
                LineRef::Line(start),
                buffer,
                "Missing ';' at the end of the statement",
            ));
        }

        if line.is_empty() {
            continue;
        }
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(line);

        if buffer.ends_with(';') {
            break;
        }
    }

    let body = &buffer[..buffer.len() - 1];
    let Some((tag, value)) = body.split_once('=') else {
        return Err(WndError::format(
            path,
            LineRef::Line(start),
            buffer.clone(),
            "Expected 'TAG = value;'",
        ));
    };

    let tag = tag.trim();
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(WndError::format(
            path,
            LineRef::Line(start),
            buffer.clone(),
            format!("Invalid tag '{}'", tag),
        ));
    }

    log::trace!("{}:{} read {}", path, start, tag);

    Ok(Statement {
        path,
        tag: tag.to_string(),
        value: value.trim().to_string(),
        line: start,
        raw_text: buffer.clone(),
    })
}

// ─── Typed value readers ─────────────────────────────────────────────────────

impl<'a> Statement<'a> {
    pub fn format_error(&self, message: impl Into<String>) -> WndError {
        WndError::format(self.path, LineRef::Line(self.line), &self.raw_text, message)
    }

    pub fn value_error(&self, message: impl Into<String>) -> WndError {
        WndError::value(self.path, LineRef::Line(self.line), &self.raw_text, message)
    }

    /// Value with one pair of surrounding quotes removed, if present.
    pub fn unquoted(&self) -> String {
        unquote(&self.value).to_string()
    }

    /// `+`-joined flag list, e.g. `ENABLED+IMAGE`.
    pub fn flags(&self) -> WndResult<Vec<String>> {
        let flags: Vec<String> = self
            .value
            .split('+')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        if flags.is_empty() {
            return Err(self.format_error(format!("{} must list at least one flag", self.tag)));
        }
        Ok(flags)
    }

    pub fn integer(&self) -> WndResult<i32> {
        self.value
            .parse()
            .map_err(|_| self.format_error(format!("'{}' is not an integer", self.value)))
    }

    pub fn rect(&self) -> WndResult<ScreenRect> {
        static RECT_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = RECT_REGEX.get_or_init(|| {
            Regex::new(
                r"^UPPERLEFT:\s*(\d+)\s+(\d+)\s*,\s*BOTTOMRIGHT:\s*(\d+)\s+(\d+)\s*,\s*CREATIONRESOLUTION:\s*(\d+)\s+(\d+)$",
            )
            .unwrap()
        });

        let caps = re.captures(&self.value).ok_or_else(|| {
            self.format_error(
                "Expected 'UPPERLEFT: x y, BOTTOMRIGHT: x y, CREATIONRESOLUTION: w h'",
            )
        })?;

        let mut n = [0u32; 6];
        for (i, slot) in n.iter_mut().enumerate() {
            *slot = self.number(&caps[i + 1])?;
        }

        Ok(ScreenRect::new(
            Point::new(n[0], n[1]),
            Point::new(n[2], n[3]),
            Point::new(n[4], n[5]),
        ))
    }

    pub fn font(&self) -> WndResult<Font> {
        static FONT_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = FONT_REGEX.get_or_init(|| {
            Regex::new(r#"^NAME:\s*"(.+)"\s*,\s*SIZE:\s*(\d+)\s*,\s*BOLD:\s*(\d+)$"#).unwrap()
        });

        let caps = re
            .captures(&self.value)
            .ok_or_else(|| self.format_error("Expected 'NAME: \"font\", SIZE: n, BOLD: n'"))?;

        Ok(Font::new(
            &caps[1],
            self.number(&caps[2])?,
            self.number(&caps[3])?,
        ))
    }

    /// The six named colors of `TEXTCOLOR`.
    pub fn text_colors(&self) -> WndResult<TextColors> {
        static COLOR_GROUP_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = COLOR_GROUP_REGEX.get_or_init(|| {
            Regex::new(r"^(\w+):\s*(\d+)\s+(\d+)\s+(\d+)\s+(\d+)$").unwrap()
        });

        let mut found: Vec<(String, Rgba)> = Vec::with_capacity(6);
        for group in self.value.split(',').map(str::trim) {
            let caps = re.captures(group).ok_or_else(|| {
                self.format_error(format!("Malformed color group '{}'", group))
            })?;
            let name = caps[1].to_string();
            if !TextColors::NAMES.contains(&name.as_str()) {
                return Err(self.format_error(format!("Unknown color name '{}'", name)));
            }
            if found.iter().any(|(n, _)| *n == name) {
                return Err(self.format_error(format!("Color '{}' listed twice", name)));
            }
            let color = self.rgba([&caps[2], &caps[3], &caps[4], &caps[5]])?;
            found.push((name, color));
        }

        if found.len() < TextColors::NAMES.len() {
            return Err(self.format_error(format!(
                "Expected {} named colors, found {}",
                TextColors::NAMES.len(),
                found.len()
            )));
        }

        let get = |name: &str| {
            found
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, c)| *c)
                .unwrap_or(Rgba::WHITE)
        };
        Ok(TextColors {
            enabled: get("ENABLED"),
            enabled_border: get("ENABLEDBORDER"),
            disabled: get("DISABLED"),
            disabled_border: get("DISABLEDBORDER"),
            hilite: get("HILITE"),
            hilite_border: get("HILITEBORDER"),
        })
    }

    /// Exactly nine `IMAGE: x, COLOR: r g b a, BORDERCOLOR: r g b a` entries.
    pub fn draw_data(&self) -> WndResult<DrawData> {
        static ENTRY_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = ENTRY_REGEX.get_or_init(|| {
            Regex::new(
                r"IMAGE:\s*([^\s,]+)\s*,\s*COLOR:\s*(\d+)\s+(\d+)\s+(\d+)\s+(\d+)\s*,\s*BORDERCOLOR:\s*(\d+)\s+(\d+)\s+(\d+)\s+(\d+)",
            )
            .unwrap()
        });

        let mut entries = Vec::with_capacity(crate::window::DRAW_DATA_LEN);
        let mut last_end = 0;
        for caps in re.captures_iter(&self.value) {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            self.expect_separator(&self.value[last_end..whole.0])?;
            last_end = whole.1;

            let color = self.rgba([&caps[2], &caps[3], &caps[4], &caps[5]])?;
            let border = self.rgba([&caps[6], &caps[7], &caps[8], &caps[9]])?;
            entries.push(DrawEntry::new(&caps[1], color, border));
        }
        self.expect_separator(&self.value[last_end..])?;

        let found = entries.len();
        DrawData::try_from(entries).map_err(|_| {
            self.format_error(format!(
                "Expected {} draw-data entries, found {}",
                crate::window::DRAW_DATA_LEN,
                found
            ))
        })
    }

    /// Comma-separated `KEY: integer` pairs, order and repeats preserved.
    pub fn attributes(&self) -> WndResult<Vec<Attribute>> {
        static PAIR_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = PAIR_REGEX.get_or_init(|| Regex::new(r"^(\w+):\s*(-?\d+)$").unwrap());

        if self.value.is_empty() {
            return Ok(Vec::new());
        }

        self.value
            .split(',')
            .map(str::trim)
            .map(|pair| {
                let caps = re.captures(pair).ok_or_else(|| {
                    self.format_error(format!("Malformed attribute '{}'", pair))
                })?;
                let value = caps[2].parse::<i32>().map_err(|_| {
                    self.format_error(format!("Attribute value '{}' is out of range", &caps[2]))
                })?;
                Ok(Attribute::new(&caps[1], value))
            })
            .collect()
    }

    fn number(&self, digits: &str) -> WndResult<u32> {
        digits
            .parse()
            .map_err(|_| self.format_error(format!("Number '{}' is out of range", digits)))
    }

    fn rgba(&self, parts: [&str; 4]) -> WndResult<Rgba> {
        let mut c = [0u32; 4];
        for (slot, digits) in c.iter_mut().zip(parts) {
            *slot = self.number(digits)?;
        }
        Rgba::from_components(c).map_err(|bad| {
            self.value_error(format!("Color component {} is outside 0..=255", bad))
        })
    }

    fn expect_separator(&self, between: &str) -> WndResult<()> {
        if between.chars().all(|c| c == ',' || c.is_whitespace()) {
            Ok(())
        } else {
            Err(self.format_error(format!(
                "Malformed draw-data entry near '{}'",
                between.trim()
            )))
        }
    }
}

pub fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;
    use pretty_assertions::assert_eq;

    fn read(text: &str) -> WndResult<Statement<'_>> {
        let mut cursor = Cursor::new(text, "test.wnd");
        read_statement(&mut cursor)
    }

    const NINE: &str = "IMAGE: NoImage, COLOR: 255 255 255 0, BORDERCOLOR: 255 255 255 0";

    fn draw_statement(count: usize) -> String {
        let entries = vec![NINE; count].join(",\n");
        format!("ENABLEDDRAWDATA = {};", entries)
    }

    #[test]
    fn test_single_line_statement() {
        let stmt = read("WINDOWTYPE = PUSHBUTTON;").unwrap();
        assert_eq!(stmt.tag, "WINDOWTYPE");
        assert_eq!(stmt.value, "PUSHBUTTON");
        assert_eq!(stmt.line, 1);
    }

    #[test]
    fn test_statement_spans_lines() {
        let text = "SCREENRECT = UPPERLEFT: 0 0,\n             BOTTOMRIGHT: 800 600,\n             CREATIONRESOLUTION: 800 600;\nNAME = \"x\";";
        let mut cursor = Cursor::new(text, "test.wnd");
        let stmt = read_statement(&mut cursor).unwrap();
        assert_eq!(stmt.tag, "SCREENRECT");
        assert_eq!(cursor.line_number(), 4);

        let rect = stmt.rect().unwrap();
        assert_eq!(rect.bottom_right, Point::new(800, 600));
        assert_eq!(rect.creation_resolution, Point::new(800, 600));
    }

    #[test]
    fn test_missing_terminator_at_end_of_input() {
        let err = read("NAME = \"x\"").unwrap_err();
        assert!(matches!(err, WndError::Format { line: LineRef::Line(1), .. }));
    }

    #[test]
    fn test_missing_terminator_before_marker() {
        let mut cursor = Cursor::new("TEXT = \"abc\"\nEND", "test.wnd");
        let err = read_statement(&mut cursor).unwrap_err();
        assert!(err.to_string().contains("Missing ';'"));
        assert_eq!(cursor.peek(), Ok("END"));
    }

    #[test]
    fn test_statement_without_equals() {
        assert!(read("JUSTATOKEN;").is_err());
    }

    #[test]
    fn test_rect_missing_group() {
        let stmt = read("SCREENRECT = UPPERLEFT: 0 0, BOTTOMRIGHT: 10 10;").unwrap();
        assert!(matches!(stmt.rect(), Err(WndError::Format { .. })));
    }

    #[test]
    fn test_font() {
        let stmt = read("FONT = NAME: \"Times New Roman\", SIZE: 14, BOLD: 0;").unwrap();
        assert_eq!(stmt.font().unwrap(), Font::new("Times New Roman", 14, 0));
    }

    #[test]
    fn test_text_colors() {
        let stmt = read(
            "TEXTCOLOR = ENABLED:  1 2 3 4, ENABLEDBORDER:  255 255 255 255,\n\
             DISABLED: 0 0 0 0, DISABLEDBORDER: 0 0 0 0,\n\
             HILITE:   9 9 9 9, HILITEBORDER:   8 8 8 8;",
        )
        .unwrap();
        let colors = stmt.text_colors().unwrap();
        assert_eq!(colors.enabled, Rgba::new(1, 2, 3, 4));
        assert_eq!(colors.hilite_border, Rgba::new(8, 8, 8, 8));
    }

    #[test]
    fn test_text_colors_needs_six() {
        let stmt = read("TEXTCOLOR = ENABLED: 1 2 3 4, HILITE: 1 1 1 1;").unwrap();
        assert!(matches!(stmt.text_colors(), Err(WndError::Format { .. })));
    }

    #[test]
    fn test_color_component_range() {
        let text = draw_statement(9).replacen("255 255 255 0", "255 255 255 255", 1);
        assert!(read(&text).unwrap().draw_data().is_ok());

        let text = draw_statement(9).replacen("255 255 255 0", "256 255 255 0", 1);
        let err = read(&text).unwrap().draw_data().unwrap_err();
        assert!(matches!(err, WndError::Value { .. }));
        assert_eq!(err.severity(), Severity::Recoverable);
    }

    #[test]
    fn test_draw_data_needs_exactly_nine() {
        let text = draw_statement(9);
        assert_eq!(read(&text).unwrap().draw_data().unwrap().len(), 9);

        for count in [8, 10] {
            let text = draw_statement(count);
            let err = read(&text).unwrap().draw_data().unwrap_err();
            assert!(err.to_string().contains(&format!("found {}", count)));
        }
    }

    #[test]
    fn test_draw_data_rejects_garbage_between_entries() {
        let text = format!("ENABLEDDRAWDATA = {}, oops, {};", NINE, vec![NINE; 8].join(", "));
        let stmt = read(&text).unwrap();
        assert!(matches!(stmt.draw_data(), Err(WndError::Format { .. })));
    }

    #[test]
    fn test_attributes_keep_order_and_repeats() {
        let stmt =
            read("LISTBOXDATA = COLUMNS: 2,\n COLUMNSWIDTH: 30,\n COLUMNSWIDTH: 20;").unwrap();
        let attrs = stmt.attributes().unwrap();
        assert_eq!(
            attrs,
            vec![
                Attribute::new("COLUMNS", 2),
                Attribute::new("COLUMNSWIDTH", 30),
                Attribute::new("COLUMNSWIDTH", 20),
            ]
        );
    }

    #[test]
    fn test_malformed_attribute() {
        let stmt = read("SLIDERDATA = MINVALUE: one;").unwrap();
        assert!(stmt.attributes().is_err());
    }

    #[test]
    fn test_flags_and_quotes() {
        let stmt = read("STATUS = ENABLED+IMAGE;").unwrap();
        assert_eq!(stmt.flags().unwrap(), vec!["ENABLED", "IMAGE"]);

        let stmt = read("SYSTEMCALLBACK = \"[None]\";").unwrap();
        assert_eq!(stmt.unquoted(), "[None]");
    }

    #[test]
    fn test_tooltip_delay_integer() {
        assert_eq!(read("TOOLTIPDELAY = -1;").unwrap().integer().unwrap(), -1);
        assert!(read("TOOLTIPDELAY = soon;").unwrap().integer().is_err());
    }
}
