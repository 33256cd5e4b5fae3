//! # WND Window Definition Parser
//!
//! Reads, validates and writes the `.wnd` window layout files used by the
//! game's UI. A file holds metadata, an optional layout block and a forest of
//! nested `WINDOW … END` blocks.
//!
//! ## Features
//! - Line-accurate parsing with strict directive order
//! - Value validation (fonts, screen rects, colors, draw data) with severities
//! - Canonical serialization that parses back to the same structure
//! - Default property sets for every built-in control type
//! - Tree editing: move, remove, and re-parse a single window's properties
//!
//! ## Example
//! ```ignore
//! use wnd_core::{parse_document, serialize};
//!
//! let text = std::fs::read_to_string("MainMenu.wnd")?;
//! let parsed = parse_document(&text, "MainMenu.wnd")?;
//! for warning in &parsed.diagnostics {
//!     eprintln!("{}", warning);
//! }
//! let canonical = serialize(&parsed.value);
//! ```
//!
//! ## Example: editing one window
//! ```ignore
//! use wnd_core::{create_default, serializer, ParserConfig, WindowId};
//!
//! let button = create_default("PUSHBUTTON", WindowId::new())?;
//! let id = button.id;
//! doc.windows[0].children.push(button);
//!
//! let edited = serializer::serialize_properties(&doc.find(id).unwrap().properties)
//!     .replace("ENABLED", "DISABLED");
//! doc.replace_properties(id, &edited, &ParserConfig::default())?;
//! ```

pub mod config;
pub mod cursor;
pub mod directive;
pub mod document;
pub mod error;
pub mod parser;
pub mod schema;
pub mod serializer;
pub mod validator;
pub mod window;

// --- Core types ---
pub use config::ParserConfig;
pub use document::Document;
pub use error::{Diagnostic, LineRef, Parsed, Severity, WndError, WndResult};
pub use schema::{ControlSchema, WindowType};
pub use window::{
    Attribute, DrawData, DrawEntry, Font, Point, PropertySet, Rgba, ScreenRect, TextColors,
    WindowId, WindowName, WindowNode,
};

use std::path::Path;

/// Read and parse a `.wnd` file with default settings.
pub fn parse_file(path: impl AsRef<Path>) -> WndResult<Parsed<Document>> {
    parser::parse_file(path)
}

/// Parse document text; `path` only labels diagnostics.
pub fn parse_document(text: &str, path: &str) -> WndResult<Parsed<Document>> {
    parser::parse_document(text, path)
}

/// Parse the text of one window and give the result `id`.
pub fn parse_block(text: &str, id: WindowId) -> WndResult<Parsed<WindowNode>> {
    parser::parse_block(text, id)
}

/// Canonical text of a document.
pub fn serialize(doc: &Document) -> String {
    serializer::serialize_document(doc)
}

/// A fresh control of the named type (`PUSHBUTTON`, `SCROLLLISTBOX`, ...).
pub fn create_default(type_name: &str, id: WindowId) -> WndResult<WindowNode> {
    schema::create_default(type_name, id)
}
