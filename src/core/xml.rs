//! XML to JSON value conversion.
//!
//! Produces the dict-style encoding: element names become object keys,
//! nested elements become nested objects, and repeated sibling elements
//! collapse into a JSON array in document order. Attributes are stored
//! under `@`-prefixed keys. Text content of an element that also carries
//! attributes or child elements goes under the `#text` key; an element
//! holding only text becomes a plain string, and an element with no
//! attributes, children, or text becomes `null`. Scalar values stay
//! strings throughout, with no numeric or boolean inference.
//!
//! Key order in the produced maps equals document order, so serializing
//! the value is reproducible byte for byte.

use crate::utils::error::{ConvertError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

/// Key holding the text content of an element that also has attributes
/// or child elements.
pub const TEXT_KEY: &str = "#text";

/// Prefix that keeps attribute keys distinct from child element names.
pub const ATTR_PREFIX: &str = "@";

/// Parses a well-formed XML document into a JSON object whose single
/// top-level key is the root element name.
pub fn xml_to_value(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(malformed("document has more than one root element"));
                }
                let name = element_name(&start);
                let value = parse_element(&mut reader, &start)?;
                root = Some((name, value));
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(malformed("document has more than one root element"));
                }
                root = Some((element_name(&start), empty_element(&start)?));
            }
            Event::Text(_) | Event::CData(_) => {
                // trim_text already dropped whitespace-only nodes
                return Err(malformed("text content outside the root element"));
            }
            Event::Eof => break,
            // Declaration, comments, doctype, processing instructions.
            _ => {}
        }
    }

    let (name, value) = root.ok_or_else(|| malformed("document has no root element"))?;
    let mut top = Map::new();
    top.insert(name, value);
    Ok(Value::Object(top))
}

fn malformed(message: impl Into<String>) -> ConvertError {
    ConvertError::MalformedXml {
        message: message.into(),
    }
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().into_inner()).into_owned()
}

fn collect_attributes(start: &BytesStart, map: &mut Map<String, Value>) -> Result<()> {
    for attr in start.attributes() {
        let attr = attr?;
        let key = format!(
            "{ATTR_PREFIX}{}",
            String::from_utf8_lossy(attr.key.into_inner())
        );
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|e| malformed(e.to_string()))?
            .into_owned();
        map.insert(key, Value::String(value));
    }
    Ok(())
}

/// A self-closing element: `null` when bare, an attribute-only object
/// otherwise.
fn empty_element(start: &BytesStart) -> Result<Value> {
    let mut map = Map::new();
    collect_attributes(start, &mut map)?;
    if map.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(map))
    }
}

fn parse_element(reader: &mut Reader<&[u8]>, start: &BytesStart) -> Result<Value> {
    let mut map = Map::new();
    collect_attributes(start, &mut map)?;
    let has_attributes = !map.is_empty();
    let mut has_children = false;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(child) => {
                has_children = true;
                let name = element_name(&child);
                let value = parse_element(reader, &child)?;
                insert_child(&mut map, name, value);
            }
            Event::Empty(child) => {
                has_children = true;
                let name = element_name(&child);
                let value = empty_element(&child)?;
                insert_child(&mut map, name, value);
            }
            Event::Text(t) => {
                let decoded = t.decode().map_err(|e| malformed(e.to_string()))?;
                let unescaped = quick_xml::escape::unescape(&decoded)
                    .map_err(|e| malformed(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::CData(t) => text.push_str(&String::from_utf8_lossy(&t.into_inner())),
            Event::End(_) => break,
            Event::Eof => {
                return Err(malformed(format!(
                    "unexpected end of document inside <{}>",
                    element_name(start)
                )));
            }
            _ => {}
        }
    }

    if !has_attributes && !has_children {
        return Ok(if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        });
    }

    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text));
    }
    Ok(Value::Object(map))
}

/// Inserts a child value, promoting repeated sibling names to an array
/// anchored at the first occurrence.
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.entry(name) {
        serde_json::map::Entry::Vacant(slot) => {
            slot.insert(value);
        }
        serde_json::map::Entry::Occupied(mut slot) => {
            let existing = slot.get_mut();
            if let Value::Array(items) = existing {
                items.push(value);
            } else {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
}
