use crate::config::ParserConfig;
use crate::error::{Diagnostic, LineRef, WndError, WndResult};
use crate::window::{PropertySet, WindowNode};

pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 72;

/// At least one of these must appear in `STATUS`.
pub const VISIBILITY_FLAGS: [&str; 4] = ["ENABLED", "DISABLED", "IMAGE", "HIDDEN"];

pub const KNOWN_STATUS_FLAGS: &[&str] = &[
    "ENABLED",
    "DISABLED",
    "IMAGE",
    "HIDDEN",
    "ACTIVE",
    "TOGGLE",
    "DRAGABLE",
    "ABOVE",
    "BELOW",
    "TABSTOP",
    "NOINPUT",
    "NOFOCUS",
    "BORDER",
    "SMOOTH_TEXT",
    "ONE_LINE",
    "NO_FLUSH",
    "SEE_THRU",
    "RIGHT_CLICK",
    "WRAP_CENTERED",
    "CHECK_LIKE",
    "HOTKEY_TEXT",
    "USE_OVERLAY_STATES",
    "NOT_READY",
    "FLASHING",
    "ALWAYS_COLOR",
    "ON_MOUSE_DOWN",
];

/// Where the block being validated came from.
#[derive(Debug, Clone, Copy)]
pub struct BlockContext<'a> {
    pub path: &'a str,
    /// Line of the block's `WINDOW` marker; 0 for nodes built in memory.
    pub start_line: usize,
}

impl<'a> BlockContext<'a> {
    pub fn new(path: &'a str, start_line: usize) -> Self {
        Self { path, start_line }
    }

    fn line(&self) -> LineRef {
        LineRef::Block {
            start: self.start_line,
        }
    }

    fn error(&self, raw_text: impl Into<String>, message: impl Into<String>) -> WndError {
        WndError::value(self.path, self.line(), raw_text, message)
    }

    fn warning(&self, raw_text: impl Into<String>, message: impl Into<String>) -> Diagnostic {
        Diagnostic::informational(self.path, self.line(), raw_text, message)
    }
}

/// Check one property set. Fatal problems are returned as `Err`, warnings as `Ok`.
pub fn validate_properties(
    props: &PropertySet,
    ctx: &BlockContext,
    config: &ParserConfig,
) -> WndResult<Vec<Diagnostic>> {
    validate_font(props, ctx, config)?;
    validate_status(props, ctx)?;
    validate_rect(props, ctx)?;
    validate_textures(props, ctx)?;
    validate_group_names(props, ctx)?;

    let mut warnings = check_columns(props, ctx);
    if config.warn_unknown_status {
        warnings.extend(check_status_vocabulary(props, ctx));
    }
    Ok(warnings)
}

/// Check a node and every descendant.
pub fn validate_tree(
    node: &WindowNode,
    ctx: &BlockContext,
    config: &ParserConfig,
) -> WndResult<Vec<Diagnostic>> {
    let mut warnings = validate_properties(&node.properties, ctx, config)?;
    for child in &node.children {
        warnings.extend(validate_tree(child, ctx, config)?);
    }
    Ok(warnings)
}

fn validate_font(props: &PropertySet, ctx: &BlockContext, config: &ParserConfig) -> WndResult<()> {
    let font = &props.font;
    let raw = format!(
        "FONT = NAME: \"{}\", SIZE: {}, BOLD: {};",
        font.name, font.size, font.bold
    );

    if !config.is_known_font(&font.name) {
        return Err(ctx.error(raw, format!("Unsupported font '{}'", font.name)));
    }
    if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&font.size) {
        return Err(ctx.error(
            raw,
            format!(
                "Font size {} is outside {}..={}",
                font.size, MIN_FONT_SIZE, MAX_FONT_SIZE
            ),
        ));
    }
    if font.bold > 1 {
        return Err(ctx.error(raw, format!("Font bold must be 0 or 1, got {}", font.bold)));
    }
    Ok(())
}

fn validate_status(props: &PropertySet, ctx: &BlockContext) -> WndResult<()> {
    if VISIBILITY_FLAGS.iter().any(|f| props.has_status(f)) {
        return Ok(());
    }
    Err(ctx.error(
        format!("STATUS = {};", props.status.join("+")),
        format!("STATUS must contain one of {}", VISIBILITY_FLAGS.join(", ")),
    ))
}

fn validate_rect(props: &PropertySet, ctx: &BlockContext) -> WndResult<()> {
    let rect = &props.screen_rect;
    let (ul, br, res) = (rect.upper_left, rect.bottom_right, rect.creation_resolution);
    let raw = format!(
        "SCREENRECT = UPPERLEFT: {} {}, BOTTOMRIGHT: {} {}, CREATIONRESOLUTION: {} {};",
        ul.x, ul.y, br.x, br.y, res.x, res.y
    );

    for (label, point) in [("UPPERLEFT", ul), ("BOTTOMRIGHT", br)] {
        if point.x > res.x || point.y > res.y {
            return Err(ctx.error(
                raw,
                format!(
                    "{} {} {} lies outside the creation resolution {}x{}",
                    label, point.x, point.y, res.x, res.y
                ),
            ));
        }
    }

    if br.x <= ul.x || br.y <= ul.y {
        return Err(ctx.error(raw, "BOTTOMRIGHT must lie below and right of UPPERLEFT"));
    }
    Ok(())
}

fn validate_textures(props: &PropertySet, ctx: &BlockContext) -> WndResult<()> {
    for (slot, data) in &props.textures {
        if !slot.ends_with("DRAWDATA") {
            return Err(ctx.error(slot.as_str(), format!("Texture slot '{}' must end with DRAWDATA", slot)));
        }
        if let Some(index) = data.entries().iter().position(|e| e.image.trim().is_empty()) {
            return Err(ctx.error(
                slot.as_str(),
                format!("Entry {} of {} has no IMAGE", index, slot),
            ));
        }
    }
    Ok(())
}

fn validate_group_names(props: &PropertySet, ctx: &BlockContext) -> WndResult<()> {
    match props
        .attributes
        .keys()
        .find(|g| !g.ends_with("DATA") || g.ends_with("DRAWDATA"))
    {
        Some(group) => Err(ctx.error(
            group.as_str(),
            format!("Attribute group '{}' must end with DATA", group),
        )),
        None => Ok(()),
    }
}

/// `COLUMNS: n` with n > 1 must be followed by exactly n `COLUMNSWIDTH` entries.
fn check_columns(props: &PropertySet, ctx: &BlockContext) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();
    for (group, fields) in &props.attributes {
        let Some(pos) = fields.iter().position(|a| a.key == "COLUMNS") else {
            continue;
        };
        let columns = fields[pos].value;
        if columns <= 1 {
            continue;
        }
        let widths = fields[pos + 1..]
            .iter()
            .filter(|a| a.key == "COLUMNSWIDTH")
            .count();
        if widths != columns as usize {
            let warning = ctx.warning(
                group.as_str(),
                format!(
                    "{} declares COLUMNS: {} but lists {} COLUMNSWIDTH entries",
                    group, columns, widths
                ),
            );
            log::warn!("{}", warning);
            warnings.push(warning);
        }
    }
    warnings
}

fn check_status_vocabulary(props: &PropertySet, ctx: &BlockContext) -> Vec<Diagnostic> {
    props
        .status
        .iter()
        .filter(|flag| !KNOWN_STATUS_FLAGS.contains(&flag.as_str()))
        .map(|flag| {
            let warning = ctx.warning(
                format!("STATUS = {};", props.status.join("+")),
                format!("Unknown status flag '{}'", flag),
            );
            log::warn!("{}", warning);
            warning
        })
        .collect()
}
