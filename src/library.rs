//! Saved notes and the library view over them.
//!
//! Notes are persisted by the browser extension as a JSON map keyed by
//! video id. The view state (search query and sort key) is an explicit value
//! and [`LibraryView::project`] is a pure function of it and the notes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;

use crate::error::Error;

const FALLBACK_FILE_NAME: &str = "youtube-notes";

/// Which stored text of a note to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ContentDepth {
    Brief,
    #[default]
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Detailed notes as returned by the model, Markdown.
    pub notes: String,
    #[serde(default)]
    pub brief_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// The text for `depth`, falling back to the detailed notes.
    pub fn text(&self, depth: ContentDepth) -> &str {
        match (depth, &self.brief_notes) {
            (ContentDepth::Brief, Some(brief)) => brief,
            _ => &self.notes,
        }
    }

    fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self.notes.to_lowercase().contains(query)
            || self
                .brief_notes
                .as_deref()
                .is_some_and(|brief| brief.to_lowercase().contains(query))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArchiveFile {
    /// A dump of the extension's local storage
    Storage {
        youtube_video_notes: BTreeMap<String, Note>,
    },
    Bare(BTreeMap<String, Note>),
}

/// All saved notes, keyed by video id.
#[derive(Debug, Default)]
pub struct NotesArchive {
    notes: BTreeMap<String, Note>,
}

impl NotesArchive {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let archive = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), notes = archive.len(), "Loaded notes archive");
        Ok(archive)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let notes = match serde_json::from_str(json)? {
            ArchiveFile::Storage {
                youtube_video_notes,
            } => youtube_video_notes,
            ArchiveFile::Bare(notes) => notes,
        };
        Ok(Self { notes })
    }

    pub fn get(&self, video_id: &str) -> Result<&Note, Error> {
        self.notes
            .get(video_id)
            .ok_or_else(|| Error::NoteNotFound(video_id.to_string()))
    }

    /// Every note, most recently updated first.
    pub fn notes(&self) -> Vec<&Note> {
        LibraryView::default().project(self.notes.values())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Search and sort state of the library listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryView {
    pub query: String,
    pub sort: SortKey,
}

impl LibraryView {
    pub fn new(query: impl Into<String>, sort: SortKey) -> Self {
        Self {
            query: query.into(),
            sort,
        }
    }

    /// Notes matching the query, in sort order.
    pub fn project<'a>(&self, notes: impl IntoIterator<Item = &'a Note>) -> Vec<&'a Note> {
        let query = self.query.trim().to_lowercase();
        let mut visible: Vec<&Note> = notes
            .into_iter()
            .filter(|note| query.is_empty() || note.matches(&query))
            .collect();

        match self.sort {
            SortKey::Newest => visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            SortKey::Oldest => visible.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
            SortKey::Title => visible.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.title.cmp(&b.title))
            }),
        }
        visible
    }
}

/// The first `max_chars` characters of `text`, with `...` when cut short.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Human date relative to `now`: `Today`, `Yesterday`, `3 days ago`, `Mar 4`.
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - date).num_days();
    match days {
        ..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..7 => format!("{days} days ago"),
        _ if date.year() == now.year() => date.format("%b %-d").to_string(),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

/// File name for downloading a note's Markdown.
pub fn download_file_name(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return format!("{FALLBACK_FILE_NAME}.md");
    }
    let safe: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("{safe}.md")
}
