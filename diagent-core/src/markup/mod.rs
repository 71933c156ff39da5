//! PlantUML markup extraction
//!
//! LLM replies wrap the diagram in prose or code fences. The renderer only
//! needs the `@startXXX … @endXXX` block, so everything else is discarded.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static MARKUP_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)@start(\w+).*?@end\w+").unwrap_or_else(|e| panic!("invalid markup pattern: {e}"))
});

/// Find the first `@start… @end…` block in `raw`, tags included.
///
/// The match is non-greedy, so with several blocks only the first is returned.
pub fn extract_markup(raw: &str) -> Option<&str> {
    MARKUP_BLOCK.find(raw).map(|m| m.as_str())
}

/// A renderable markup block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupDocument {
    source: String,
}

impl MarkupDocument {
    /// Extract the first markup block from free text
    pub fn parse(raw: &str) -> Option<Self> {
        extract_markup(raw).map(|block| Self {
            source: block.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn into_string(self) -> String {
        self.source
    }

    /// The diagram family named by the start tag, e.g. `uml` or `mindmap`
    pub fn kind(&self) -> &str {
        MARKUP_BLOCK
            .captures(&self.source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or_default()
    }

    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }
}

impl fmt::Display for MarkupDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl AsRef<str> for MarkupDocument {
    fn as_ref(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_block_is_returned_unchanged() {
        let raw = "@startuml\nAlice -> Bob: Hello\n@enduml";
        assert_eq!(extract_markup(raw), Some(raw));
    }

    #[test]
    fn surrounding_prose_and_fences_are_dropped() {
        let raw = "Sure! Here is the diagram:\n```plantuml\n@startuml\nA -> B\n@enduml\n```\nLet me know.";
        assert_eq!(extract_markup(raw), Some("@startuml\nA -> B\n@enduml"));
    }

    #[test]
    fn no_tags_means_not_found() {
        assert_eq!(extract_markup("I cannot draw that, sorry."), None);
        assert_eq!(extract_markup(""), None);
    }

    #[test]
    fn start_without_end_is_not_found() {
        assert_eq!(extract_markup("@startuml\nA -> B\n"), None);
    }

    #[test]
    fn first_of_several_blocks_wins() {
        let raw = "@startuml\nA -> B\n@enduml\ntext\n@startmindmap\n* root\n@endmindmap";
        assert_eq!(extract_markup(raw), Some("@startuml\nA -> B\n@enduml"));
    }

    #[test]
    fn other_diagram_families_are_recognised() {
        let raw = "prefix @startgantt\n[Task1] lasts 5 days\n@endgantt suffix";
        let doc = MarkupDocument::parse(raw).unwrap();
        assert_eq!(doc.as_str(), "@startgantt\n[Task1] lasts 5 days\n@endgantt");
        assert_eq!(doc.kind(), "gantt");
        assert_eq!(doc.line_count(), 3);
    }
}
