//! Nested element tree under a single `<JWTClaims>` root.
//!
//! Object members become child elements named after their key, in key order.
//! Array items become `item_1`, `item_2`, ... so nested arrays stay
//! unambiguous. A convertible timestamp claim, at any object depth, keeps its
//! raw value as text and carries the datestamp in a `datestamp` attribute.
//!
//! Keys that are not valid XML names are rewritten by [`element_name`]; the
//! element then carries the untouched key in a `claim` attribute. Characters
//! XML 1.0 cannot carry are replaced with U+FFFD in text and attributes.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};
use std::borrow::Cow;

use super::epoch::EpochOptions;
use super::value::stringify;
use super::Error;
use crate::jwt::ClaimSet;

pub const ROOT_ELEMENT: &str = "JWTClaims";
const DATESTAMP_ATTR: &str = "datestamp";
const ORIGINAL_KEY_ATTR: &str = "claim";

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-' || c == '.'
}

/// Maps an arbitrary key to an element name matching `[A-Za-z_][A-Za-z0-9_.-]*`.
///
/// Every other character (including `:` and all non-ASCII) becomes `_`. A name
/// that does not start with a letter or underscore, or that starts with `xml`
/// in any case, gets a leading `_`.
pub fn element_name(key: &str) -> String {
    let mut name: String = key
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect();

    let needs_prefix = match name.chars().next() {
        None => true,
        Some(first) => !is_name_start(first) || name.to_ascii_lowercase().starts_with("xml"),
    };
    if needs_prefix {
        name.insert(0, '_');
    }
    name
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Replaces characters outside the XML 1.0 `Char` production with U+FFFD.
pub fn xml_text(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(
            s.chars()
                .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

struct XmlRenderer<'a> {
    writer: Writer<Vec<u8>>,
    epoch: &'a EpochOptions,
}

impl XmlRenderer<'_> {
    fn write(&mut self, event: Event<'_>) -> Result<(), Error> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Xml(e.to_string()))
    }

    fn members(&mut self, map: &Map<String, Value>) -> Result<(), Error> {
        for (key, value) in map {
            let datestamp = self.epoch.datestamp(key, value);
            self.element(key, value, datestamp.as_deref())?;
        }
        Ok(())
    }

    fn element(&mut self, key: &str, value: &Value, datestamp: Option<&str>) -> Result<(), Error> {
        let name = element_name(key);
        let mut start = BytesStart::new(name.as_str());
        if name != key {
            start.push_attribute((ORIGINAL_KEY_ATTR, xml_text(key).as_ref()));
        }
        if let Some(datestamp) = datestamp {
            start.push_attribute((DATESTAMP_ATTR, datestamp));
        }
        self.node(start, &name, value)
    }

    fn node(&mut self, start: BytesStart<'_>, name: &str, value: &Value) -> Result<(), Error> {
        self.write(Event::Start(start))?;
        match value {
            Value::Object(map) => self.members(map)?,
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_name = format!("item_{}", index + 1);
                    self.node(BytesStart::new(item_name.as_str()), &item_name, item)?;
                }
            }
            // an empty text event keeps `<n></n>` on one line
            scalar => {
                let text = stringify(scalar);
                self.write(Event::Text(BytesText::new(&xml_text(&text))))?
            }
        }
        self.write(Event::End(BytesEnd::new(name)))
    }
}

pub fn render(claims: &ClaimSet, epoch: &EpochOptions) -> Result<Vec<u8>, Error> {
    let mut renderer = XmlRenderer {
        writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        epoch,
    };

    renderer.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    renderer.write(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
    renderer.members(claims)?;
    renderer.write(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut out = renderer.writer.into_inner();
    out.push(b'\n');
    Ok(out)
}
