use crate::block::Span;

/// Parse a run of text into inline spans.
///
/// Backticks split the text first, so complete pairs become code spans and
/// their contents are never scanned for emphasis. The remaining text gets
/// bold (`**x**`) and then italic (`*x*`) treatment. Markers that do not
/// close are left as literal text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let segments: Vec<&str> = text.split('`').collect();
    // An even segment count means the last backtick has no partner
    let unmatched_tail = segments.len() % 2 == 0;

    for (i, segment) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();
        if i % 2 == 1 && !(is_last && unmatched_tail) {
            spans.push(Span::Code((*segment).to_string()));
        } else if i % 2 == 1 {
            parse_bold(&format!("`{segment}"), &mut spans);
        } else {
            parse_bold(segment, &mut spans);
        }
    }

    merge_text(spans)
}

fn parse_bold(text: &str, spans: &mut Vec<Span>) {
    let mut rest = text;
    let mut literal = String::new();

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        match after_open.find("**") {
            Some(close) if close > 0 => {
                literal.push_str(&rest[..open]);
                parse_italic(&std::mem::take(&mut literal), spans);
                let mut inner = Vec::new();
                parse_italic(&after_open[..close], &mut inner);
                spans.push(Span::Bold(inner));
                rest = &after_open[close + 2..];
            }
            _ => {
                // Unclosed or empty: keep the opener as text and move past it
                literal.push_str(&rest[..open + 2]);
                rest = after_open;
            }
        }
    }

    literal.push_str(rest);
    parse_italic(&literal, spans);
}

fn parse_italic(text: &str, spans: &mut Vec<Span>) {
    let bytes = text.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' || is_star(bytes, i.checked_sub(1)) || is_star(bytes, Some(i + 1)) {
            i += 1;
            continue;
        }
        let Some(offset) = text[i + 1..].find('*') else {
            break;
        };
        let close = i + 1 + offset;
        if close == i + 1 || is_star(bytes, Some(close + 1)) {
            i += 1;
            continue;
        }

        push_text(&text[literal_start..i], spans);
        let mut inner = Vec::new();
        push_text(&text[i + 1..close], &mut inner);
        spans.push(Span::Italic(inner));
        i = close + 1;
        literal_start = i;
    }

    push_text(&text[literal_start..], spans);
}

fn is_star(bytes: &[u8], index: Option<usize>) -> bool {
    index.and_then(|i| bytes.get(i)) == Some(&b'*')
}

/// Push plain text, turning embedded newlines into line breaks.
fn push_text(text: &str, spans: &mut Vec<Span>) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            spans.push(Span::LineBreak);
        }
        if !line.is_empty() {
            spans.push(Span::Text(line.to_string()));
        }
    }
}

fn merge_text(spans: Vec<Span>) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match (merged.last_mut(), span) {
            (Some(Span::Text(prev)), Span::Text(next)) => prev.push_str(&next),
            (_, span) => merged.push(span),
        }
    }
    merged
}
