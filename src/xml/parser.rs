//! Descriptor parser
//!
//! Checks well-formedness and builds the [`Document`] tree. Unlike a
//! generic data-binding parser, comments and whitespace-only text runs
//! inside the root are kept as nodes so that serializing an unmodified
//! document preserves the file's existing layout. The XML declaration,
//! processing instructions, and the DOCTYPE are skipped.

use indexmap::IndexMap;

use crate::error::{Error, ErrorKind, Result};
use crate::xml::cursor::Cursor;
use crate::xml::model::{Document, Element, Node};

/// Descriptor parser
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    /// Parse a descriptor document with a single root element
    pub fn parse(&mut self) -> Result<Document> {
        self.skip_misc()?;
        let root = self.parse_element()?;
        self.skip_misc()?;

        if !self.cursor.is_eof() {
            return Err(Error::at(ErrorKind::UnexpectedToken, self.cursor.position()));
        }

        Ok(Document { root })
    }

    /// Skip whitespace, comments, processing instructions, and the
    /// DOCTYPE outside the root element
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current() != Some(b'<') {
                return Ok(());
            }
            match self.cursor.peek(1) {
                Some(b'?') => {
                    self.cursor.advance_by(2);
                    self.skip_until(b"?>")?;
                }
                Some(b'!') => {
                    if self.cursor.peek_bytes(4) == Some(b"<!--") {
                        self.cursor.advance_by(4);
                        self.skip_until(b"-->")?;
                    } else {
                        self.cursor.advance_by(2);
                        self.skip_until(b">")?;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_element(&mut self) -> Result<Element> {
        self.expect_byte(b'<')?;

        if self.cursor.current() == Some(b'/') {
            return Err(Error::at(ErrorKind::UnexpectedToken, self.cursor.position()));
        }

        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        if self.cursor.current() == Some(b'/') {
            self.cursor.advance();
            self.expect_byte(b'>')?;
            return Ok(Element {
                name,
                attributes,
                children: Vec::new(),
            });
        }

        self.expect_byte(b'>')?;

        let mut children = Vec::new();
        loop {
            if self.cursor.is_eof() {
                return Err(Error::at(ErrorKind::UnexpectedEof, self.cursor.position()));
            }

            if self.cursor.current() == Some(b'<') {
                match self.cursor.peek(1) {
                    Some(b'/') => {
                        self.cursor.advance_by(2);
                        let close_name = self.parse_name()?;
                        if close_name != name {
                            return Err(Error::at(
                                ErrorKind::MismatchedTag {
                                    expected: name,
                                    found: close_name,
                                },
                                self.cursor.position(),
                            ));
                        }
                        self.cursor.skip_whitespace();
                        self.expect_byte(b'>')?;
                        break;
                    }
                    Some(b'!') => {
                        if self.cursor.peek_bytes(4) == Some(b"<!--") {
                            children.push(Node::Comment(self.parse_comment()?));
                        } else if self.cursor.peek_bytes(9) == Some(b"<![CDATA[") {
                            children.push(Node::Text(self.parse_cdata()?));
                        } else {
                            self.cursor.advance_by(2);
                            self.skip_until(b">")?;
                        }
                    }
                    Some(b'?') => {
                        self.cursor.advance_by(2);
                        self.skip_until(b"?>")?;
                    }
                    _ => {
                        let child = self.parse_element()?;
                        children.push(Node::Element(child));
                    }
                }
                continue;
            }

            if let Some(text) = self.parse_text()? {
                children.push(Node::Text(text));
            }
        }

        Ok(Element {
            name,
            attributes,
            children,
        })
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attrs = IndexMap::new();

        loop {
            self.cursor.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => {
                    return Err(Error::at(ErrorKind::UnexpectedEof, self.cursor.position()))
                }
            }

            let name = self.parse_name()?;
            self.cursor.skip_whitespace();
            self.expect_byte(b'=')?;
            self.cursor.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attrs.contains_key(&name) {
                return Err(Error::at(
                    ErrorKind::DuplicateAttribute { name },
                    self.cursor.position(),
                ));
            }
            attrs.insert(name, value);
        }

        Ok(attrs)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b'"') => b'"',
            Some(b'\'') => b'\'',
            _ => return Err(Error::at(ErrorKind::UnexpectedToken, self.cursor.position())),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = bytes_to_string(raw, self)?;
                return decode_entities(&text);
            }
            self.cursor.advance();
        }

        Err(Error::at(ErrorKind::UnexpectedEof, self.cursor.position()))
    }

    /// Character data up to the next markup, including pure whitespace
    fn parse_text(&mut self) -> Result<Option<String>> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        if raw.is_empty() {
            return Ok(None);
        }
        let text = bytes_to_string(raw, self)?;
        decode_entities(&text).map(Some)
    }

    /// Comment body, stored verbatim
    fn parse_comment(&mut self) -> Result<String> {
        // cursor at "<!--"
        self.cursor.advance_by(4);
        let start = self.cursor.pos();
        while self.cursor.current().is_some() {
            if self.cursor.peek_bytes(3) == Some(b"-->") {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(3);
                return bytes_to_string(raw, self);
            }
            self.cursor.advance();
        }
        Err(Error::at(ErrorKind::UnexpectedEof, self.cursor.position()))
    }

    /// CDATA body, kept as a plain text node
    fn parse_cdata(&mut self) -> Result<String> {
        // cursor at "<![CDATA["
        self.cursor.advance_by(9);
        let start = self.cursor.pos();
        while self.cursor.current().is_some() {
            if self.cursor.peek_bytes(3) == Some(b"]]>") {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(3);
                return bytes_to_string(raw, self);
            }
            self.cursor.advance();
        }
        Err(Error::at(ErrorKind::UnexpectedEof, self.cursor.position()))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start_pos = self.cursor.position();
        let start = self.cursor.pos();

        let Some(first) = self.cursor.current() else {
            return Err(Error::at(ErrorKind::UnexpectedEof, start_pos));
        };
        if !is_name_start(first) {
            return Err(Error::at(ErrorKind::UnexpectedToken, start_pos));
        }

        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let raw = self.cursor.slice_from(start);
        bytes_to_string(raw, self)
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while self.cursor.current().is_some() {
            if self.cursor.peek_bytes(pattern.len()) == Some(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(Error::at(ErrorKind::UnexpectedEof, self.cursor.position()))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.consume(expected) {
            Ok(())
        } else {
            Err(Error::at(ErrorKind::UnexpectedToken, self.cursor.position()))
        }
    }
}

fn bytes_to_string(bytes: &[u8], parser: &Parser<'_>) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| Error::at(ErrorKind::InvalidUtf8, parser.cursor.position()))
}

const fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

const fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entities(input: &str) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            result.push(ch);
            continue;
        }

        let mut entity = String::new();
        let mut terminated = false;
        for next in chars.by_ref() {
            if next == ';' {
                terminated = true;
                break;
            }
            entity.push(next);
        }
        if !terminated {
            return Err(Error::new(ErrorKind::InvalidEntity { entity }));
        }

        let decoded = match entity.as_str() {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(&entity),
        };

        match decoded {
            Some(ch) => result.push(ch),
            None => return Err(Error::new(ErrorKind::InvalidEntity { entity })),
        }
    }

    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Document> {
        Parser::new(input.as_bytes()).parse()
    }

    #[test]
    fn test_parse_simple_element() -> Result<()> {
        let doc = parse("<web-app></web-app>")?;
        assert_eq!(doc.root.name, "web-app");
        assert!(doc.root.children.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_self_closing_root() -> Result<()> {
        let doc = parse("<web-app/>")?;
        assert_eq!(doc.root.name, "web-app");
        assert!(doc.root.children.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_with_declaration_and_doctype() -> Result<()> {
        let doc = parse(concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE web-app PUBLIC \"-//Sun//DTD Web Application 2.3//EN\" \"web-app_2_3.dtd\">\n",
            "<web-app></web-app>\n",
        ))?;
        assert_eq!(doc.root.name, "web-app");
        Ok(())
    }

    #[test]
    fn test_parse_attributes() -> Result<()> {
        let doc = parse(r#"<web-app version="2.5" id='main'></web-app>"#)?;
        assert_eq!(doc.root.attributes.get("version"), Some(&"2.5".to_string()));
        assert_eq!(doc.root.attributes.get("id"), Some(&"main".to_string()));
        Ok(())
    }

    #[test]
    fn test_parse_preserves_whitespace_text() -> Result<()> {
        let doc = parse("<web-app>\n    <servlet/>\n</web-app>")?;
        assert_eq!(doc.root.children.len(), 3);
        assert!(doc.root.children.first().is_some_and(Node::is_blank_text));
        assert!(doc.root.children.last().is_some_and(Node::is_blank_text));
        Ok(())
    }

    #[test]
    fn test_parse_keeps_comments() -> Result<()> {
        let doc = parse("<web-app><!-- mail host --><env-entry/></web-app>")?;
        match doc.root.children.first() {
            Some(Node::Comment(text)) => assert_eq!(text, " mail host "),
            other => panic!("expected comment node, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_nested_text() -> Result<()> {
        let doc = parse("<web-app><param-name>cache&amp;size</param-name></web-app>")?;
        assert_eq!(
            doc.root.child_text("param-name"),
            Some("cache&size".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_parse_cdata_as_text() -> Result<()> {
        let doc = parse("<web-app><param-value><![CDATA[a < b]]></param-value></web-app>")?;
        assert_eq!(doc.root.child_text("param-value"), Some("a < b".to_string()));
        Ok(())
    }

    #[test]
    fn test_mismatched_tag_is_error() {
        let err = parse("<web-app><servlet></web-app>").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MismatchedTag { .. }));
    }

    #[test]
    fn test_duplicate_attribute_is_error() {
        let err = parse(r#"<web-app id="a" id="b"/>"#).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::DuplicateAttribute { .. }));
    }

    #[test]
    fn test_unterminated_element_is_error() {
        let err = parse("<web-app><servlet>").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_unknown_entity_is_error() {
        let err = parse("<web-app>&bogus;</web-app>").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidEntity { .. }));
    }

    #[test]
    fn test_trailing_garbage_is_error() {
        let err = parse("<web-app/><web-app/>").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnexpectedToken);
    }
}
