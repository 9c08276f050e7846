use html_escape::encode_text;

use crate::block::{Block, ItemChild, List, Span};

/// Convert blocks to HTML markup
pub fn blocks_to_html(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        emit_block(block, &mut out);
    }
    out
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, content } => {
            out.push_str(&format!("<h{level}>"));
            spans_to_html(content, out);
            out.push_str(&format!("</h{level}>"));
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            spans_to_html(content, out);
            out.push_str("</p>");
        }
        Block::Blockquote { content } => {
            out.push_str("<blockquote>");
            spans_to_html(content, out);
            out.push_str("</blockquote>");
        }
        Block::List(list) => list_to_html(list, out),
        Block::Table { headers, rows } => table_to_html(headers, rows, out),
    }
}

fn spans_to_html(spans: &[Span], out: &mut String) {
    for span in spans {
        span_to_html(span, out);
    }
}

fn span_to_html(span: &Span, out: &mut String) {
    match span {
        Span::Text(text) => out.push_str(&encode_text(text)),
        Span::Bold(inner) => {
            out.push_str("<strong>");
            spans_to_html(inner, out);
            out.push_str("</strong>");
        }
        Span::Italic(inner) => {
            out.push_str("<em>");
            spans_to_html(inner, out);
            out.push_str("</em>");
        }
        Span::Code(text) => {
            out.push_str("<code>");
            out.push_str(&encode_text(text));
            out.push_str("</code>");
        }
        Span::LineBreak => out.push_str("<br>"),
    }
}

fn list_to_html(list: &List, out: &mut String) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push_str(&format!("<{tag}>"));

    for item in &list.items {
        out.push_str("<li>");
        spans_to_html(&item.content, out);
        for child in &item.nested {
            match child {
                ItemChild::List(nested) => list_to_html(nested, out),
                ItemChild::Paragraph(content) => {
                    out.push_str("<p>");
                    spans_to_html(content, out);
                    out.push_str("</p>");
                }
            }
        }
        out.push_str("</li>");
    }

    out.push_str(&format!("</{tag}>"));
}

fn table_to_html(headers: &[Vec<Span>], rows: &[Vec<Vec<Span>>], out: &mut String) {
    out.push_str("<table><thead><tr>");
    for cell in headers {
        out.push_str("<th>");
        spans_to_html(cell, out);
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");

    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            spans_to_html(cell, out);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }

    out.push_str("</tbody></table>");
}
