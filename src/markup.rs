//! Inline paragraph markup.
//!
//! Paragraph text may carry a small set of tags: `<b>`, `<i>`, `<u>`, `<br/>`,
//! `<font color="#rrggbb" size="n" name="...">` and an optional
//! `<para align="...">` wrapper. Text is parsed with `roxmltree` after loose `&`
//! and `<` characters have been escaped, so authors can write "R&D" or "a < b"
//! without thinking about XML.

use crate::error::{Error, Result};
use crate::model::Alignment;
use crate::style::parse_hex_color;

/// A stretch of text with uniform inline formatting.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<[u8; 3]>,
    pub size: Option<f32>,
    pub font: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Inline {
    Text(Span),
    LineBreak,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Markup {
    pub items: Vec<Inline>,
    /// Alignment requested by a `<para align>` wrapper.
    pub align: Option<Alignment>,
}

impl Markup {
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                Inline::Text(span) => out.push_str(&span.text),
                Inline::LineBreak => out.push('\n'),
            }
        }
        out
    }
}

const XML_ENTITIES: [&str; 5] = ["amp", "lt", "gt", "quot", "apos"];

/// Length in bytes of a well-formed entity reference at the start of `s`.
fn entity_len(s: &str) -> Option<usize> {
    let end = s.get(1..)?.find(';')? + 1;
    let name = &s[1..end];
    let ok = if let Some(num) = name.strip_prefix('#') {
        match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        }
    } else {
        XML_ENTITIES.contains(&name) || name == "nbsp"
    };
    ok.then_some(end + 1)
}

/// Escape `&` and `<` that are not part of an entity or a tag.
fn escape_loose(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        match ch {
            '&' => {
                if let Some(len) = entity_len(rest) {
                    match &rest[..len] {
                        "&nbsp;" => out.push('\u{A0}'),
                        entity => out.push_str(entity),
                    }
                    rest = &rest[len..];
                    continue;
                }
                out.push_str("&amp;");
            }
            '<' => {
                let next = rest[1..].chars().next();
                if matches!(next, Some(c) if c.is_ascii_alphabetic() || c == '/') {
                    out.push('<');
                } else {
                    out.push_str("&lt;");
                }
            }
            c => out.push(c),
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

fn parse_align(value: &str) -> Result<Alignment> {
    match value.trim().to_ascii_lowercase().as_str() {
        "left" => Ok(Alignment::Left),
        "center" | "centre" => Ok(Alignment::Center),
        "right" => Ok(Alignment::Right),
        "justify" => Ok(Alignment::Justify),
        other => Err(Error::Layout(format!("unknown paragraph alignment '{other}'"))),
    }
}

fn parse_color(value: &str) -> Result<[u8; 3]> {
    match value.trim().to_ascii_lowercase().as_str() {
        "black" => Ok([0, 0, 0]),
        "white" => Ok([255, 255, 255]),
        "red" => Ok([255, 0, 0]),
        "blue" => Ok([0, 0, 255]),
        "green" => Ok([0, 128, 0]),
        "gray" | "grey" => Ok([128, 128, 128]),
        _ => parse_hex_color(value)
            .ok_or_else(|| Error::Layout(format!("invalid font color '{value}'"))),
    }
}

fn walk(node: roxmltree::Node, style: &Span, out: &mut Markup) -> Result<()> {
    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text()
                && !text.is_empty()
            {
                out.items.push(Inline::Text(Span {
                    text: text.to_string(),
                    ..style.clone()
                }));
            }
            continue;
        }
        if !child.is_element() {
            continue;
        }
        let mut inner = style.clone();
        match child.tag_name().name() {
            "b" | "strong" => inner.bold = true,
            "i" | "em" => inner.italic = true,
            "u" => inner.underline = true,
            "br" => {
                out.items.push(Inline::LineBreak);
                continue;
            }
            "font" => {
                if let Some(color) = child.attribute("color") {
                    inner.color = Some(parse_color(color)?);
                }
                if let Some(size) = child.attribute("size") {
                    let size: f32 = size
                        .trim()
                        .parse()
                        .map_err(|_| Error::Layout(format!("invalid font size '{size}'")))?;
                    inner.size = Some(size);
                }
                if let Some(name) = child.attribute("name").or(child.attribute("face")) {
                    inner.font = Some(name.to_string());
                }
            }
            "para" => {
                if let Some(align) = child.attribute("align") {
                    out.align = Some(parse_align(align)?);
                }
            }
            other => {
                return Err(Error::Layout(format!("unsupported markup tag <{other}>")));
            }
        }
        walk(child, &inner, out)?;
    }
    Ok(())
}

/// Parse paragraph text into formatted spans.
pub(crate) fn parse(text: &str) -> Result<Markup> {
    if !text.contains(['<', '&']) {
        return Ok(Markup {
            items: vec![Inline::Text(Span {
                text: text.to_string(),
                ..Span::default()
            })],
            align: None,
        });
    }
    let xml = format!("<root>{}</root>", escape_loose(&text.replace("<br>", "<br/>")));
    let doc = roxmltree::Document::parse(&xml)
        .map_err(|e| Error::Layout(format!("malformed paragraph markup: {e}")))?;
    let mut out = Markup::default();
    walk(doc.root_element(), &Span::default(), &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(m: &Markup) -> Vec<&Span> {
        m.items
            .iter()
            .filter_map(|i| match i {
                Inline::Text(s) => Some(s),
                Inline::LineBreak => None,
            })
            .collect()
    }

    #[test]
    fn plain_text_is_one_span() {
        let m = parse("Quarterly review").unwrap();
        assert_eq!(m.plain_text(), "Quarterly review");
        assert_eq!(spans(&m).len(), 1);
    }

    #[test]
    fn nested_formatting() {
        let m = parse("<b>Goal:</b> grow <i>and <u>keep</u></i> clients").unwrap();
        let s = spans(&m);
        assert_eq!(s[0].text, "Goal:");
        assert!(s[0].bold);
        assert!(!s[1].bold);
        assert!(s[2].italic && !s[2].underline);
        assert!(s[3].italic && s[3].underline);
        assert_eq!(m.plain_text(), "Goal: grow and keep clients");
    }

    #[test]
    fn loose_ampersand_and_angle_are_literal() {
        let m = parse("R&D budget < 5% &amp; rising&nbsp;fast").unwrap();
        assert_eq!(m.plain_text(), "R&D budget < 5% & rising\u{A0}fast");
    }

    #[test]
    fn line_breaks_and_font_attributes() {
        let m = parse("one<br/>two<br>three <font color=\"#ea580c\" size=\"9\">note</font>")
            .unwrap();
        assert_eq!(m.plain_text(), "one\ntwo\nthree note");
        let note = spans(&m).into_iter().find(|s| s.text == "note").unwrap();
        assert_eq!(note.color, Some([0xea, 0x58, 0x0c]));
        assert_eq!(note.size, Some(9.0));
    }

    #[test]
    fn para_wrapper_sets_alignment() {
        let m = parse("<para align=\"center\">centred</para>").unwrap();
        assert_eq!(m.align, Some(Alignment::Center));
    }

    #[test]
    fn malformed_markup_fails() {
        assert!(matches!(parse("<b>open"), Err(Error::Layout(_))));
        assert!(matches!(parse("<blink>x</blink>"), Err(Error::Layout(_))));
    }
}
