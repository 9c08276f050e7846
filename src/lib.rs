//! Render model-generated video notes from Markdown to HTML.
//!
//! The renderer is total: any input produces markup, and constructs it does
//! not recognise degrade to paragraph text.
//!
//! ```
//! assert_eq!(notesmd::render("# Title"), "<h1>Title</h1>");
//! ```

mod block;
mod config;
mod error;
mod html;
mod inline;
pub mod library;
mod normalize;
mod parser;

pub use block::{Block, ItemChild, List, ListItem, Span};
pub use config::{Config, LibraryConfig, SectionsConfig};
pub use error::Error;
pub use library::{ContentDepth, LibraryView, Note, NotesArchive, SortKey};

/// Parse notes text into a vector of blocks using default config.
pub fn parse(markdown: &str) -> Vec<Block> {
    parse_with_config(markdown, Config::shared_default())
}

/// Parse notes text into a vector of blocks with custom config.
pub fn parse_with_config(markdown: &str, config: &Config) -> Vec<Block> {
    let normalized = normalize::normalize(markdown, &config.sections.labels);
    parser::parse(&normalized)
}

/// Convert notes text to HTML markup using default config.
pub fn render(markdown: &str) -> String {
    render_with_config(markdown, Config::shared_default())
}

/// Convert notes text to HTML markup with custom config.
pub fn render_with_config(markdown: &str, config: &Config) -> String {
    let blocks = parse_with_config(markdown, config);
    tracing::debug!(
        blocks = blocks.len(),
        list_items = blocks
            .iter()
            .map(|block| match block {
                Block::List(list) => list.item_count(),
                _ => 0,
            })
            .sum::<usize>(),
        "Rendered notes"
    );
    html::blocks_to_html(&blocks)
}
