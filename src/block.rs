/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Code(String),
    LineBreak,
}

/// Content that belongs under a list item, after its own text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChild {
    /// A deeper list opened while the item's list was on the nesting stack
    List(List),
    /// Paragraph text flushed while the list was still open
    Paragraph(Vec<Span>),
}

/// A single list item, which can contain nested content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub content: Vec<Span>,
    pub nested: Vec<ItemChild>,
}

impl ListItem {
    pub fn new(content: Vec<Span>) -> Self {
        Self {
            content,
            nested: Vec::new(),
        }
    }
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn new(ordered: bool) -> Self {
        Self {
            ordered,
            items: Vec::new(),
        }
    }

    /// Attach `child` to the last item, opening an empty item when the list
    /// has none yet (a level skipped by deeper indentation).
    pub fn attach(&mut self, child: ItemChild) {
        if self.items.is_empty() {
            self.items.push(ListItem::new(Vec::new()));
        }
        if let Some(item) = self.items.last_mut() {
            item.nested.push(child);
        }
    }

    /// Number of items in this list and every nested list.
    pub fn item_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| {
                1 + item
                    .nested
                    .iter()
                    .map(|child| match child {
                        ItemChild::List(list) => list.item_count(),
                        ItemChild::Paragraph(_) => 0,
                    })
                    .sum::<usize>()
            })
            .sum()
    }
}

/// Block-level elements scanned from the notes text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        content: Vec<Span>,
    },
    Paragraph {
        content: Vec<Span>,
    },
    Blockquote {
        content: Vec<Span>,
    },
    List(List),
    Table {
        headers: Vec<Vec<Span>>,
        rows: Vec<Vec<Vec<Span>>>,
    },
}
