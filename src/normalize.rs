//! Line rewrites applied before the block scan.
//!
//! Models often emit report sections as bold bullets, wrap headings in a
//! bullet, or mix `*` and `-` bullets. These rewrites bring such output back
//! into the shapes the scanner recognises.

use std::sync::LazyLock;

use regex::Regex;

/// Top-level `- **Executive Summary**:` and friends, with the label captured.
static SECTION_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+\*\*([^*]+?):?\*\*:?\s*$").unwrap());

/// A bullet marker directly in front of a heading marker.
static BULLETED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(#{1,3}\s.*)$").unwrap());

/// An asterisk bullet, keeping its indentation.
static ASTERISK_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)\*\s+").unwrap());

/// Rewrite every line of `text` and join the result with `\n`.
pub fn normalize(text: &str, section_labels: &[String]) -> String {
    text.lines()
        .map(|line| normalize_line(line, section_labels))
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_line(line: &str, section_labels: &[String]) -> String {
    if let Some(label) = section_label(line, section_labels) {
        return format!("## {label}");
    }
    if let Some(caps) = BULLETED_HEADING.captures(line) {
        return caps[1].to_string();
    }
    ASTERISK_BULLET.replace(line, "${1}- ").into_owned()
}

/// The configured label named by a bold section bullet, if any.
fn section_label<'a>(line: &str, section_labels: &'a [String]) -> Option<&'a str> {
    let caps = SECTION_BULLET.captures(line)?;
    let candidate = caps[1].trim();
    section_labels
        .iter()
        .find(|label| label.eq_ignore_ascii_case(candidate))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels() -> Vec<String> {
        vec!["Executive Summary".to_string(), "Key Themes".to_string()]
    }

    #[test]
    fn section_bullet_becomes_heading() {
        assert_eq!(
            normalize("- **Executive Summary**:", &labels()),
            "## Executive Summary"
        );
        assert_eq!(normalize("* **key themes:**", &labels()), "## Key Themes");
    }

    #[test]
    fn unknown_bold_bullet_is_kept() {
        assert_eq!(
            normalize("- **Pricing**: cheap", &labels()),
            "- **Pricing**: cheap"
        );
        assert_eq!(normalize("- **Pricing**", &labels()), "- **Pricing**");
        assert_eq!(
            normalize("  - **Key Themes**", &labels()),
            "  - **Key Themes**"
        );
    }

    #[test]
    fn bulleted_heading_is_unwrapped() {
        assert_eq!(normalize("- ## Overview", &labels()), "## Overview");
        assert_eq!(normalize("* ### Detail", &labels()), "### Detail");
    }

    #[test]
    fn asterisk_bullets_become_hyphens() {
        assert_eq!(
            normalize("* one\n  * two\n**bold** line", &labels()),
            "- one\n  - two\n**bold** line"
        );
    }

    #[test]
    fn rewrites_once_per_line() {
        assert_eq!(normalize("* * item", &labels()), "- * item");
    }
}
