use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, ItemChild, List, ListItem, Span};
use crate::inline::parse_inline;

/// Indentation width of one list nesting level.
const INDENT_UNIT: usize = 2;

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)([-*]|\d+\.)\s+(.*)$").unwrap());

static TABLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\|?\s*:?-+:?\s*(\|\s*:?-+:?\s*)*\|?$").unwrap()
});

/// Scan normalized notes text into a list of blocks.
///
/// One pass over the lines with a cursor. Quotes and tables consume several
/// lines at once; everything else advances the cursor by one. Input that
/// fits no rule becomes paragraph text.
pub fn parse(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut state = ParseState::default();
    let mut cursor = 0;

    while cursor < lines.len() {
        cursor += process_line(&lines, cursor, &mut state);
    }

    state.flush_paragraph();
    state.close_lists_to(0);
    state.blocks
}

#[derive(Default)]
struct ParseState {
    blocks: Vec<Block>,
    // Plain lines waiting to become a paragraph
    paragraph: Vec<String>,
    // Open lists, outermost first
    list_stack: Vec<List>,
}

impl ParseState {
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let content = parse_inline(&self.paragraph.join(" "));
        self.paragraph.clear();

        // Lists stay open across plain lines, so the text lands inside them
        if let Some(list) = self.list_stack.last_mut() {
            list.attach(ItemChild::Paragraph(content));
        } else {
            self.blocks.push(Block::Paragraph { content });
        }
    }

    fn open_list(&mut self, ordered: bool) {
        self.list_stack.push(List::new(ordered));
    }

    fn close_list(&mut self) {
        let Some(list) = self.list_stack.pop() else {
            return;
        };
        if let Some(parent) = self.list_stack.last_mut() {
            parent.attach(ItemChild::List(list));
        } else {
            self.blocks.push(Block::List(list));
        }
    }

    fn close_lists_to(&mut self, depth: usize) {
        while self.list_stack.len() > depth {
            self.close_list();
        }
    }

    /// Flush and close everything before a block that cannot live in a list.
    fn end_flow(&mut self) {
        self.flush_paragraph();
        self.close_lists_to(0);
    }

    fn push_item(&mut self, level: usize, ordered: bool, content: Vec<Span>) {
        self.close_lists_to(level + 1);

        if self.list_stack.len() == level + 1
            && self.list_stack.last().is_some_and(|list| list.ordered != ordered)
        {
            // A different marker at the same depth starts a new list
            self.close_list();
        }

        while self.list_stack.len() < level {
            self.open_list(false);
        }
        if self.list_stack.len() == level {
            self.open_list(ordered);
        }

        if let Some(list) = self.list_stack.last_mut() {
            list.items.push(ListItem::new(content));
        }
    }
}

/// Handle the line at `cursor` and return how many lines were consumed.
fn process_line(lines: &[&str], cursor: usize, state: &mut ParseState) -> usize {
    let line = lines[cursor];
    let trimmed = line.trim();

    if trimmed.is_empty() {
        state.end_flow();
        return 1;
    }

    if let Some(consumed) = try_table(lines, cursor, state) {
        return consumed;
    }

    if let Some((level, text)) = heading(trimmed) {
        state.end_flow();
        state.blocks.push(Block::Heading {
            level,
            content: parse_inline(text),
        });
        return 1;
    }

    if line.trim_start().starts_with('>') {
        state.end_flow();
        let quoted: Vec<&str> = lines[cursor..]
            .iter()
            .map(|l| l.trim_start())
            .take_while(|l| l.starts_with('>'))
            .map(strip_quote_marker)
            .collect();
        state.blocks.push(Block::Blockquote {
            content: parse_inline(&quoted.join("\n")),
        });
        return quoted.len();
    }

    if let Some(caps) = LIST_ITEM.captures(line) {
        state.flush_paragraph();
        let level = indent_width(&caps[1]) / INDENT_UNIT;
        let ordered = caps[2].ends_with('.');
        state.push_item(level, ordered, parse_inline(caps[3].trim_end()));
        return 1;
    }

    state.paragraph.push(trimmed.to_string());
    1
}

/// `#`, `##` or `###` followed by a space.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, text.trim()))
}

fn strip_quote_marker(line: &str) -> &str {
    let rest = line.strip_prefix('>').unwrap_or(line);
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Tabs count as two columns.
fn indent_width(indent: &str) -> usize {
    indent
        .chars()
        .map(|c| if c == '\t' { INDENT_UNIT } else { 1 })
        .sum()
}

fn try_table(lines: &[&str], cursor: usize, state: &mut ParseState) -> Option<usize> {
    let header = lines[cursor].trim();
    let separator = lines.get(cursor + 1)?.trim();
    if !header.contains('|') || !separator.contains('|') || !TABLE_SEPARATOR.is_match(separator)
    {
        return None;
    }

    state.end_flow();

    let rows: Vec<Vec<Vec<Span>>> = lines[cursor + 2..]
        .iter()
        .map(|l| l.trim())
        .take_while(|l| !l.is_empty() && l.contains('|'))
        .map(split_row)
        .collect();
    let consumed = 2 + rows.len();

    state.blocks.push(Block::Table {
        headers: split_row(header),
        rows,
    });
    Some(consumed)
}

fn split_row(row: &str) -> Vec<Vec<Span>> {
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(|cell| parse_inline(cell.trim())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Vec<Span> {
        vec![Span::Text(s.to_string())]
    }

    fn item(s: &str) -> ListItem {
        ListItem::new(text(s))
    }

    fn item_with(s: &str, nested: Vec<ItemChild>) -> ListItem {
        ListItem {
            content: text(s),
            nested,
        }
    }

    fn list(ordered: bool, items: Vec<ListItem>) -> List {
        List { ordered, items }
    }

    #[test]
    fn consecutive_items_share_a_list() {
        assert_eq!(
            parse("- a\n- b"),
            vec![Block::List(list(false, vec![item("a"), item("b")]))]
        );
    }

    #[test]
    fn nested_list_belongs_to_preceding_item() {
        assert_eq!(
            parse("- a\n  - b\n- c"),
            vec![Block::List(list(
                false,
                vec![
                    item_with("a", vec![ItemChild::List(list(false, vec![item("b")]))]),
                    item("c"),
                ],
            ))]
        );
    }

    #[test]
    fn deep_first_item_opens_empty_parent_items() {
        let empty = |nested| ListItem {
            content: vec![],
            nested,
        };
        assert_eq!(
            parse("    1. deep"),
            vec![Block::List(list(
                false,
                vec![empty(vec![ItemChild::List(list(
                    false,
                    vec![empty(vec![ItemChild::List(list(true, vec![item("deep")]))])],
                ))])],
            ))]
        );
    }

    #[test]
    fn tab_counts_as_one_level() {
        let blocks = parse("- a\n\t- b");
        let Block::List(outer) = &blocks[0] else {
            panic!("expected a list");
        };
        assert_eq!(outer.items.len(), 1);
        assert!(matches!(outer.items[0].nested[..], [ItemChild::List(_)]));
    }

    #[test]
    fn marker_change_starts_new_list() {
        assert_eq!(
            parse("- a\n1. b"),
            vec![
                Block::List(list(false, vec![item("a")])),
                Block::List(list(true, vec![item("b")])),
            ]
        );
    }

    #[test]
    fn paragraph_lines_join_with_space() {
        assert_eq!(
            parse("one\ntwo\n\nthree"),
            vec![
                Block::Paragraph {
                    content: text("one two")
                },
                Block::Paragraph {
                    content: text("three")
                },
            ]
        );
    }

    #[test]
    fn plain_line_after_item_stays_in_list() {
        assert_eq!(
            parse("- a\nmore"),
            vec![Block::List(list(
                false,
                vec![item_with("a", vec![ItemChild::Paragraph(text("more"))])],
            ))]
        );
    }

    #[test]
    fn blockquote_consumes_following_quote_lines() {
        assert_eq!(
            parse("> first\n>second\nafter"),
            vec![
                Block::Blockquote {
                    content: vec![
                        Span::Text("first".to_string()),
                        Span::LineBreak,
                        Span::Text("second".to_string()),
                    ]
                },
                Block::Paragraph {
                    content: text("after")
                },
            ]
        );
    }

    #[test]
    fn quote_marker_strips_one_space_only() {
        assert_eq!(
            parse(">  two spaces\n  > indented"),
            vec![Block::Blockquote {
                content: vec![
                    Span::Text(" two spaces".to_string()),
                    Span::LineBreak,
                    Span::Text("indented".to_string()),
                ]
            }]
        );
    }

    #[test]
    fn heading_levels() {
        assert_eq!(
            parse("### Three\n#### Four\n#NoSpace"),
            vec![
                Block::Heading {
                    level: 3,
                    content: text("Three")
                },
                Block::Paragraph {
                    content: text("#### Four #NoSpace")
                },
            ]
        );
    }

    #[test]
    fn table_body_stops_at_first_line_without_pipe() {
        let blocks = parse("| A | B |\n|:--|--:|\n| 1 | 2 |\n| 3 | 4 |\ntail");
        assert_eq!(
            blocks,
            vec![
                Block::Table {
                    headers: vec![text("A"), text("B")],
                    rows: vec![vec![text("1"), text("2")], vec![text("3"), text("4")]],
                },
                Block::Paragraph {
                    content: text("tail")
                },
            ]
        );
    }

    #[test]
    fn bad_separator_is_not_a_table() {
        assert_eq!(
            parse("a | b\n| x | y |"),
            vec![Block::Paragraph {
                content: text("a | b | x | y |")
            }]
        );
    }

    #[test]
    fn table_closes_open_list() {
        let blocks = parse("- a\n| A |\n|---|\n| 1 |");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::List(_)));
        assert!(matches!(blocks[1], Block::Table { .. }));
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert_eq!(parse(""), vec![]);
        assert_eq!(parse("\n\n  \n"), vec![]);
    }
}
