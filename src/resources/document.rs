//! Span index of an Android resource document.
//!
//! The document keeps its original source text and records, for every direct
//! child of the root element, the tag, the `name` attribute and the byte span
//! it occupies. Removing entries cuts those spans out of the source, so
//! comments, formatting and unrelated elements survive untouched.

use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    ops::Range,
    sync::LazyLock,
};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use regex::Regex;

/// Tag of the simple string resource element.
pub const STRING_TAG: &str = "string";

/// Declaration written in front of documents that had none.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const UTF8_BOM: char = '\u{feff}';

/// General entity declaration in an internal DTD subset. Parameter entities
/// (`<!ENTITY % name ...>`) and external entities do not match.
static ENTITY_DECL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([^\s%"'>]+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#).unwrap()
});

/// A well-formedness error with a 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let before = &source.as_bytes()[..offset.min(source.len())];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let column = String::from_utf8_lossy(&before[line_start..]).chars().count() + 1;
        Self::new(message, line, column)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: line {}, column {}",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for SyntaxError {}

/// A direct child element of the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub tag: String,
    pub name: Option<String>,
    /// Byte range of the element in the document source.
    pub span: Range<usize>,
}

impl ResourceEntry {
    /// The key of a `<string name="...">` entry, `None` for anything else.
    pub fn string_key(&self) -> Option<&str> {
        if self.tag == STRING_TAG {
            self.name.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceDocument {
    source: String,
    body_start: usize,
    entries: Vec<ResourceEntry>,
    has_declaration: bool,
}

impl ResourceDocument {
    /// Parse a document, failing if it is not well-formed.
    pub fn parse(source: impl Into<String>) -> Result<Self, SyntaxError> {
        let source = source.into();
        let body_start = if source.starts_with(UTF8_BOM) {
            UTF8_BOM.len_utf8()
        } else {
            0
        };

        let scan = scan(&source[body_start..])?;
        let entries = scan
            .entries
            .into_iter()
            .map(|mut entry| {
                entry.span = entry.span.start + body_start..entry.span.end + body_start;
                entry
            })
            .collect();

        Ok(Self {
            source,
            body_start,
            entries,
            has_declaration: scan.has_declaration,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn has_declaration(&self) -> bool {
        self.has_declaration
    }

    /// Keys of the top-level `<string>` entries, in document order.
    pub fn string_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().filter_map(ResourceEntry::string_key)
    }

    /// Remove every entry matching `predicate`.
    ///
    /// The decision is made for all entries before the source is touched.
    /// Returns the removed entries in document order, with their spans as
    /// they were before removal.
    pub fn remove_entries<F>(&mut self, mut predicate: F) -> Vec<ResourceEntry>
    where
        F: FnMut(&ResourceEntry) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| predicate(entry));

        if removed.is_empty() {
            self.entries = kept;
            return removed;
        }

        let cuts: Vec<Range<usize>> = removed
            .iter()
            .map(|entry| line_extent(&self.source, &entry.span))
            .collect();

        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for cut in &cuts {
            output.push_str(&self.source[cursor..cut.start]);
            cursor = cut.end;
        }
        output.push_str(&self.source[cursor..]);

        self.entries = kept
            .into_iter()
            .map(|mut entry| {
                let shift: usize = cuts
                    .iter()
                    .take_while(|cut| cut.end <= entry.span.start)
                    .map(|cut| cut.len())
                    .sum();
                entry.span = entry.span.start - shift..entry.span.end - shift;
                entry
            })
            .collect();
        self.source = output;

        removed
    }

    /// The text to write back to disk, with an XML declaration guaranteed.
    pub fn to_output(&self) -> Cow<'_, str> {
        if self.has_declaration {
            return Cow::Borrowed(&self.source);
        }
        let (bom, body) = self.source.split_at(self.body_start);
        Cow::Owned(format!("{bom}{XML_DECLARATION}\n{body}"))
    }
}

/// Widen `span` to its whole line when the element sits alone on that line.
fn line_extent(source: &str, span: &Range<usize>) -> Range<usize> {
    let bytes = source.as_bytes();

    let mut start = span.start;
    while start > 0 && matches!(bytes[start - 1], b' ' | b'\t') {
        start -= 1;
    }
    if start > 0 && bytes[start - 1] != b'\n' {
        return span.clone();
    }

    let mut end = span.end;
    while end < bytes.len() && matches!(bytes[end], b' ' | b'\t') {
        end += 1;
    }
    if bytes[end..].starts_with(b"\r\n") {
        end += 2;
    } else if bytes[end..].starts_with(b"\n") {
        end += 1;
    } else if end < bytes.len() {
        // Something else follows on the line: keep the indentation for it.
        return span.start..end;
    }

    start..end
}

struct Scan {
    entries: Vec<ResourceEntry>,
    has_declaration: bool,
}

struct OpenEntry {
    tag: String,
    name: Option<String>,
    start: usize,
}

fn scan(body: &str) -> Result<Scan, SyntaxError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(false);

    let mut entries = Vec::new();
    let mut open: Option<OpenEntry> = None;
    let mut depth = 0usize;
    let mut root_seen = false;
    let mut has_declaration = false;
    let mut entities = Entities::default();

    loop {
        let start = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                let offset = reader.error_position() as usize;
                return Err(SyntaxError::at(body, offset, err.to_string()));
            }
        };
        let end = reader.buffer_position() as usize;

        match event {
            Event::Decl(_) => {
                if start != 0 {
                    return Err(SyntaxError::at(
                        body,
                        start,
                        "XML declaration not at start of document",
                    ));
                }
                has_declaration = true;
            }
            Event::DocType(doctype) => {
                entities = Entities::declared_in(&String::from_utf8_lossy(&doctype));
            }
            Event::Start(element) => {
                let name = name_attribute(&element, &entities)
                    .map_err(|m| SyntaxError::at(body, start, m))?;
                if depth == 0 {
                    enter_root(&mut root_seen, body, start)?;
                } else if depth == 1 {
                    open = Some(OpenEntry {
                        tag: tag_name(&element),
                        name,
                        start,
                    });
                }
                depth += 1;
            }
            Event::Empty(element) => {
                let name = name_attribute(&element, &entities)
                    .map_err(|m| SyntaxError::at(body, start, m))?;
                if depth == 0 {
                    enter_root(&mut root_seen, body, start)?;
                } else if depth == 1 {
                    entries.push(ResourceEntry {
                        tag: tag_name(&element),
                        name,
                        span: start..end,
                    });
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SyntaxError::at(body, start, "unmatched closing tag"))?;
                if depth == 1
                    && let Some(entry) = open.take()
                {
                    entries.push(ResourceEntry {
                        tag: entry.tag,
                        name: entry.name,
                        span: entry.start..end,
                    });
                }
            }
            Event::Text(text) => {
                if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(SyntaxError::at(
                        body,
                        start,
                        "text outside of the root element",
                    ));
                }
                text.unescape_with(|entity| entities.resolve(entity))
                    .map_err(|err| SyntaxError::at(body, start, err.to_string()))?;
            }
            Event::CData(_) if depth == 0 => {
                return Err(SyntaxError::at(
                    body,
                    start,
                    "CDATA outside of the root element",
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(SyntaxError::at(body, body.len(), "unclosed element"));
    }
    if !root_seen {
        return Err(SyntaxError::at(body, body.len(), "no element found"));
    }

    Ok(Scan {
        entries,
        has_declaration,
    })
}

/// Entities declared in the document's internal DTD subset.
#[derive(Debug, Default)]
struct Entities(HashMap<String, String>);

impl Entities {
    fn declared_in(doctype: &str) -> Self {
        let mut declared = HashMap::new();
        for caps in ENTITY_DECL_REGEX.captures_iter(doctype) {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            // The first declaration of an entity is binding.
            declared
                .entry(caps[1].to_string())
                .or_insert_with(|| value.to_string());
        }
        Self(declared)
    }

    fn resolve(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

fn enter_root(root_seen: &mut bool, body: &str, offset: usize) -> Result<(), SyntaxError> {
    if *root_seen {
        return Err(SyntaxError::at(
            body,
            offset,
            "junk after document element",
        ));
    }
    *root_seen = true;
    Ok(())
}

fn tag_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

/// Validate all attributes and return the unescaped `name`, if any.
fn name_attribute(
    element: &BytesStart<'_>,
    entities: &Entities,
) -> Result<Option<String>, String> {
    let mut name = None;
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|err| err.to_string())?;
        let value = attribute
            .unescape_value_with(|entity| entities.resolve(entity))
            .map_err(|err| err.to_string())?;
        if attribute.key.as_ref() == b"name" {
            name = Some(value.into_owned());
        }
    }
    Ok(name)
}
