//! Memory records, the raw input to the graph engine.
//!
//! Records are owned by the surrounding memory store; the engine only reads
//! them. Title and content are scanned for entities, while kind, tags, and
//! metadata feed the confidence scoring as context hints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// What kind of memory a record captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Conversation,
    Decision,
    Learning,
    Task,
    Note,
    CodeSnippet,
    Meeting,
    Reference,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Conversation => "conversation",
            RecordKind::Decision => "decision",
            RecordKind::Learning => "learning",
            RecordKind::Task => "task",
            RecordKind::Note => "note",
            RecordKind::CodeSnippet => "code_snippet",
            RecordKind::Meeting => "meeting",
            RecordKind::Reference => "reference",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for RecordKind {
    fn default() -> Self {
        RecordKind::Note
    }
}

/// A free-text memory to extract entities from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Identifier assigned by the record layer; opaque to the graph engine.
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub kind: RecordKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

impl MemoryRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            kind: RecordKind::default(),
            tags: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The text the extractor scans: title and content joined by a newline.
    pub fn scan_text(&self) -> String {
        format!("{}\n{}", self.title, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_serializes_snake_case() {
        let json = serde_json::to_string(&RecordKind::CodeSnippet).unwrap();
        assert_eq!(json, "\"code_snippet\"");
    }

    #[test]
    fn kind_defaults_to_note() {
        let record: MemoryRecord =
            serde_json::from_str(r#"{"id":"r1","title":"t","content":"c"}"#).unwrap();
        assert_eq!(record.kind, RecordKind::Note);
        assert!(record.tags.is_empty());
    }

    #[test]
    fn scan_text_joins_title_and_content() {
        let record = MemoryRecord::new("r1", "Weekly sync", "Discussed roadmap");
        assert_eq!(record.scan_text(), "Weekly sync\nDiscussed roadmap");
    }
}
