use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sink for given answers.
///
/// The questionnaire calls this once per question when the user presses Next.
pub trait AnswerLogging {
    /// Record the answer given for the question with the given key.
    fn add_answer(&mut self, key: &str, answer: &str);
}

impl<T: AnswerLogging + ?Sized> AnswerLogging for &mut T {
    fn add_answer(&mut self, key: &str, answer: &str) {
        (**self).add_answer(key, answer);
    }
}

impl<T: AnswerLogging + ?Sized> AnswerLogging for Box<T> {
    fn add_answer(&mut self, key: &str, answer: &str) {
        (**self).add_answer(key, answer);
    }
}

/// A single logged answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedAnswer {
    pub key: String,
    pub answer: String,
    pub answered_at: DateTime<Utc>,
}

/// In-memory answer log, in the order answers were given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerLog {
    entries: Vec<LoggedAnswer>,
}

impl AnswerLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All answers, oldest first.
    pub fn entries(&self) -> &[LoggedAnswer] {
        &self.entries
    }

    /// The latest answer given for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| entry.answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the log as a pretty-printed JSON array.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize answers")
    }

    /// Write the log as JSON, creating parent directories as needed.
    pub fn write_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write answers to {:?}", path))
    }
}

impl AnswerLogging for AnswerLog {
    fn add_answer(&mut self, key: &str, answer: &str) {
        self.entries.push(LoggedAnswer {
            key: key.to_string(),
            answer: answer.to_string(),
            answered_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_latest_answer() {
        let mut log = AnswerLog::new();
        log.add_answer("name", "Alice");
        log.add_answer("mood", "good");
        log.add_answer("name", "Bob");

        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0].answer, "Alice");
        assert_eq!(log.get("name"), Some("Bob"));
        assert_eq!(log.get("missing"), None);
    }

    #[test]
    fn logging_through_mutable_reference() {
        fn log_into(mut sink: impl AnswerLogging) {
            sink.add_answer("k", "v");
        }

        let mut log = AnswerLog::new();
        log_into(&mut log);
        assert_eq!(log.get("k"), Some("v"));
    }

    #[test]
    fn writes_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("answers.json");

        let mut log = AnswerLog::new();
        log.add_answer("name", "Alice");
        log.write_to(&path).unwrap();

        let written: Vec<LoggedAnswer> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].key, "name");
        assert_eq!(written[0].answer, "Alice");
    }
}
