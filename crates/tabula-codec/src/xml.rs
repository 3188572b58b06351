//! XML parsing, serialization, cleanup passes and projections.
//!
//! Documents go through [`sanitize`] before parsing: stray `&` characters are
//! the dominant defect in the feeds this engine deals with, and the parser is
//! never handed raw text.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use tabula_model::{Result, Table, TabulaError, XmlChild, XmlDocument, XmlElement};

use crate::json::escape_json;

const ENTITY_NAMES: [&str; 5] = ["amp;", "lt;", "gt;", "quot;", "apos;"];

fn parse_err(err: impl std::fmt::Display) -> TabulaError {
    TabulaError::XmlParse(err.to_string())
}

fn write_err(err: impl std::fmt::Display) -> TabulaError {
    TabulaError::Io(std::io::Error::other(err.to_string()))
}

/// Escape every bare `&` that does not already start one of the five named
/// entities. Idempotent.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, ch) in text.char_indices() {
        if ch == '&' {
            let rest = &text[index + 1..];
            if ENTITY_NAMES.iter().any(|entity| rest.starts_with(entity)) {
                out.push('&');
            } else {
                out.push_str("&amp;");
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Parse sanitized XML text into an element tree.
///
/// Prefixed names and `xmlns` attributes are kept verbatim; whitespace-only
/// text children are retained.
pub fn parse_xml(text: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event().map_err(parse_err)? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                attach(&mut stack, &mut root, element_from_start(&start)?)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| parse_err("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let content = text.decode().map_err(parse_err)?.into_owned();
                push_text(&mut stack, content);
            }
            Event::GeneralRef(ref_) => {
                let content = match ref_.resolve_char_ref().map_err(parse_err)? {
                    Some(ch) => ch.to_string(),
                    None => {
                        let name = ref_.decode().map_err(parse_err)?;
                        quick_xml::escape::resolve_xml_entity(&name)
                            .ok_or_else(|| parse_err(format!("unknown entity &{name};")))?
                            .to_string()
                    }
                };
                push_text(&mut stack, content);
            }
            Event::CData(data) => {
                let content = String::from_utf8_lossy(&data.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlChild::CData(content));
                }
            }
            Event::Comment(comment) => {
                let content = String::from_utf8_lossy(&comment.into_inner()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlChild::Comment(content));
                }
            }
            Event::Eof => break,
            // declarations, processing instructions, doctypes
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(parse_err("unclosed element"));
    }
    root.map(|root| XmlDocument { root })
        .ok_or_else(|| parse_err("document has no root element"))
}

fn push_text(stack: &mut [XmlElement], content: String) {
    if let Some(parent) = stack.last_mut() {
        if let Some(XmlChild::Text(existing)) = parent.children.last_mut() {
            existing.push_str(&content);
        } else {
            parent.children.push(XmlChild::Text(content));
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = XmlElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(parse_err)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(parse_err)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlChild::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(parse_err("multiple root elements")),
    }
}

/// Pretty-print the document: XML declaration plus 4-space indentation.
pub fn serialize_xml(doc: &XmlDocument) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_err)?;
    write_element(&mut writer, &doc.root)?;
    String::from_utf8(writer.into_inner()).map_err(parse_err)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.children.is_empty() {
        writer.write_event(Event::Empty(start)).map_err(write_err)?;
        return Ok(());
    }
    writer.write_event(Event::Start(start)).map_err(write_err)?;
    for child in &element.children {
        match child {
            XmlChild::Element(nested) => write_element(writer, nested)?,
            XmlChild::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_err)?,
            XmlChild::CData(text) => writer
                .write_event(Event::CData(BytesCData::new(text.as_str())))
                .map_err(write_err)?,
            XmlChild::Comment(text) => writer
                .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
                .map_err(write_err)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_err)?;
    Ok(())
}

/// Replace typographic quotes and non-breaking spaces in every element's
/// direct text children: curly double quotes become `"`, curly single quotes
/// become `'`, NBSP becomes a plain space. Idempotent.
pub fn normalize_quotes(doc: &mut XmlDocument) {
    normalize_element(&mut doc.root);
}

fn normalize_element(element: &mut XmlElement) {
    for child in &mut element.children {
        match child {
            XmlChild::Text(text) => {
                *text = text
                    .chars()
                    .map(|ch| match ch {
                        '\u{201C}' | '\u{201D}' => '"',
                        '\u{2018}' | '\u{2019}' => '\'',
                        '\u{A0}' => ' ',
                        other => other,
                    })
                    .collect();
            }
            XmlChild::Element(nested) => normalize_element(nested),
            _ => {}
        }
    }
}

/// Node/value rows describing one element, as shown in the table view.
///
/// Attributes come first as `@name`, then each child in document order:
/// elements by name and direct content (plus their attributes as
/// `child/@name`), non-blank `#text`, `#cdata`, `#comment`. Whitespace-only
/// text is filtered. The document root gets a leading `Document` row.
pub fn display_rows(element: &XmlElement, is_root: bool) -> Table {
    let mut table = Table::new(vec!["Node".to_string(), "Value".to_string()]);
    if is_root {
        table.push_row(vec!["Document".to_string(), element.name.clone()]);
    }
    for (name, value) in &element.attributes {
        table.push_row(vec![format!("@{name}"), value.clone()]);
    }
    for child in &element.children {
        match child {
            XmlChild::Element(nested) => {
                table.push_row(vec![nested.name.clone(), nested.content()]);
                for (name, value) in &nested.attributes {
                    table.push_row(vec![format!("{}/@{name}", nested.name), value.clone()]);
                }
            }
            XmlChild::Text(text) => {
                if !text.trim().is_empty() {
                    table.push_row(vec!["#text".to_string(), text.trim().to_string()]);
                }
            }
            XmlChild::CData(text) => {
                table.push_row(vec!["#cdata".to_string(), text.clone()]);
            }
            XmlChild::Comment(text) => {
                table.push_row(vec!["#comment".to_string(), text.clone()]);
            }
        }
    }
    table
}

/// Compact JSON-like text for an element subtree.
///
/// The shape is `{nodeName, attributes?, content?, children?}` with keys
/// omitted when empty. Deliberately distinct from the JSON serializer: an
/// element's tag, attributes and text all coexist.
pub fn element_to_json_like(element: &XmlElement) -> String {
    let mut json = String::from("{");
    json.push_str("\"nodeName\":\"");
    json.push_str(&escape_json(&element.name));
    json.push('"');

    if !element.attributes.is_empty() {
        json.push_str(",\"attributes\":{");
        for (index, (name, value)) in element.attributes.iter().enumerate() {
            if index > 0 {
                json.push(',');
            }
            json.push('"');
            json.push_str(&escape_json(name));
            json.push_str("\":\"");
            json.push_str(&escape_json(value));
            json.push('"');
        }
        json.push('}');
    }

    let content = element.content();
    if !content.is_empty() {
        json.push_str(",\"content\":\"");
        json.push_str(&escape_json(&content));
        json.push('"');
    }

    let children: Vec<&XmlElement> = element.child_elements().collect();
    if !children.is_empty() {
        json.push_str(",\"children\":[");
        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                json.push(',');
            }
            json.push_str(&element_to_json_like(child));
        }
        json.push(']');
    }

    json.push('}');
    json
}

/// XML view of a table: a `data` root with one `row` element per table row
/// and one element per header holding the cell text. 2-space indentation.
pub fn table_to_xml(table: &Table) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("data")))
        .map_err(write_err)?;
    for (row_index, _) in table.rows.iter().enumerate() {
        writer
            .write_event(Event::Start(BytesStart::new("row")))
            .map_err(write_err)?;
        for (column, header) in table.headers.iter().enumerate() {
            writer
                .write_event(Event::Start(BytesStart::new(header.as_str())))
                .map_err(write_err)?;
            writer
                .write_event(Event::Text(BytesText::new(table.cell(row_index, column))))
                .map_err(write_err)?;
            writer
                .write_event(Event::End(BytesEnd::new(header.as_str())))
                .map_err(write_err)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("row")))
            .map_err(write_err)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("data")))
        .map_err(write_err)?;
    String::from_utf8(writer.into_inner()).map_err(parse_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_escapes_bare_ampersands_only() {
        assert_eq!(sanitize("a & b"), "a &amp; b");
        assert_eq!(sanitize("a &amp; b"), "a &amp; b");
        assert_eq!(sanitize("&lt;&gt;&quot;&apos;"), "&lt;&gt;&quot;&apos;");
        assert_eq!(sanitize("Tom&Jerry"), "Tom&amp;Jerry");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for text in ["a & b", "x&amp;y", "&&", "&ampersand"] {
            let once = sanitize(text);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn parse_keeps_structure_and_whitespace_text() {
        let doc = parse_xml(
            "<library>\n  <book isbn=\"1\"><title>Dune</title><!-- note --><![CDATA[<x>]]></book>\n</library>",
        )
        .unwrap();
        assert_eq!(doc.root.name, "library");
        // whitespace-only text children are retained structurally
        assert!(doc
            .root
            .children
            .iter()
            .any(|child| matches!(child, XmlChild::Text(t) if t.trim().is_empty())));
        let book = doc.find_element("library/book").unwrap();
        assert_eq!(book.attribute("isbn"), Some("1"));
        assert_eq!(book.content(), "<x>");
        assert!(book
            .children
            .iter()
            .any(|child| matches!(child, XmlChild::Comment(c) if c.trim() == "note")));
    }

    #[test]
    fn parse_keeps_prefixed_names() {
        let doc = parse_xml(r#"<ns:root xmlns:ns="urn:x"><ns:item/></ns:root>"#).unwrap();
        assert_eq!(doc.root.name, "ns:root");
        assert_eq!(doc.root.attribute("xmlns:ns"), Some("urn:x"));
        assert_eq!(doc.root.child_elements().next().unwrap().name, "ns:item");
    }

    #[test]
    fn serialize_emits_declaration_and_escapes() {
        let text = sanitize("<note a=\"x & y\">5 &lt; 6 & 7</note>");
        let doc = parse_xml(&text).unwrap();
        let out = serialize_xml(&doc).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(out.contains("&amp;"));
        assert!(out.contains("&lt;"));
    }

    #[test]
    fn normalize_quotes_is_idempotent() {
        let mut doc = parse_xml("<p>\u{201C}hi\u{201D} \u{2018}x\u{2019}\u{A0}end</p>").unwrap();
        normalize_quotes(&mut doc);
        assert_eq!(doc.root.content(), "\"hi\" 'x' end");
        let once = doc.clone();
        normalize_quotes(&mut doc);
        assert_eq!(doc, once);
    }

    #[test]
    fn normalize_quotes_leaves_cdata_alone() {
        let mut doc = parse_xml("<p><![CDATA[\u{201C}raw\u{201D}]]></p>").unwrap();
        normalize_quotes(&mut doc);
        assert_eq!(doc.root.content(), "\u{201C}raw\u{201D}");
    }

    #[test]
    fn display_rows_match_table_view() {
        let doc = parse_xml(
            "<catalog version=\"2\"><book isbn=\"1\">Dune</book>  <!-- c --><![CDATA[d]]>text</catalog>",
        )
        .unwrap();
        let table = display_rows(&doc.root, true);
        assert_eq!(
            table.rows,
            vec![
                vec!["Document".to_string(), "catalog".into()],
                vec!["@version".to_string(), "2".into()],
                vec!["book".to_string(), "Dune".into()],
                vec!["book/@isbn".to_string(), "1".into()],
                vec!["#comment".to_string(), " c ".into()],
                vec!["#cdata".to_string(), "d".into()],
                vec!["#text".to_string(), "text".into()],
            ]
        );
    }

    #[test]
    fn json_like_shape_omits_empty_keys() {
        let doc = parse_xml(r#"<book isbn="1"><title>Dune</title><empty/></book>"#).unwrap();
        let json = element_to_json_like(&doc.root);
        assert_eq!(
            json,
            r#"{"nodeName":"book","attributes":{"isbn":"1"},"children":[{"nodeName":"title","content":"Dune"},{"nodeName":"empty"}]}"#
        );
    }

    #[test]
    fn table_to_xml_wraps_rows() {
        let mut table = Table::new(vec!["id".into(), "name".into()]);
        table.push_row(vec!["1".into(), "A & B".into()]);
        let out = table_to_xml(&table).unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(out.contains("<row>"));
        assert!(out.contains("<name>A &amp; B</name>"));
    }

    #[test]
    fn parse_round_trips_after_serialize() {
        let doc = parse_xml(r#"<a><b k="v">text</b><c/></a>"#).unwrap();
        let serialized = serialize_xml(&doc).unwrap();
        let reparsed = parse_xml(&serialized).unwrap();
        assert_eq!(reparsed.find_element("a/b").unwrap().content(), "text");
        assert_eq!(
            reparsed.find_element("a/b").unwrap().attribute("k"),
            Some("v")
        );
    }
}
