//! Journal entries and the prompt of the day.
//!
//! The prompt is picked with the mod-index strategy
//! ([`crate::selection::select_one_for_date`]), unlike wisdom and learning.
//! There is at most one entry per calendar day; writing again on the same day
//! replaces that day's content.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::selection::select_one_for_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalPrompt {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    /// Prompt shown on the day the entry was written.
    #[serde(default)]
    pub prompt_id: Option<String>,
    pub content: String,
    /// When the entry was first written; its calendar day keys the entry.
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl JournalEntry {
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Journal entries plus the read-only prompt pool.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    prompts: Vec<JournalPrompt>,
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new(prompts: Vec<JournalPrompt>, entries: Vec<JournalEntry>) -> Self {
        Self { prompts, entries }
    }

    pub fn prompts(&self) -> &[JournalPrompt] {
        &self.prompts
    }

    /// Entries in storage order (newest written first).
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Prompt of the day, `seed % prompts.len()`.
    pub fn prompt_for_date(&self, date: NaiveDate) -> Option<JournalPrompt> {
        select_one_for_date(&self.prompts, date)
    }

    /// Write today's entry, replacing its content if one already exists.
    ///
    /// Returns the entry id.
    pub fn write_entry(&mut self, content: &str, now: NaiveDateTime) -> Result<String> {
        let content = validated(content)?;

        if let Some(existing) = self.entries.iter_mut().find(|e| e.day() == now.date()) {
            existing.content = content;
            existing.updated_at = now;
            tracing::debug!(id = %existing.id, "journal entry updated");
            return Ok(existing.id.clone());
        }

        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            prompt_id: self.prompt_for_date(now.date()).map(|p| p.id),
            content,
            date: now,
            created_at: now,
            updated_at: now,
        };
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        tracing::debug!(%id, "journal entry created");
        Ok(id)
    }

    /// Replace an entry's content. Returns false for unknown ids.
    pub fn update_entry(&mut self, id: &str, content: &str, now: NaiveDateTime) -> Result<bool> {
        let content = validated(content)?;
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.content = content;
                entry.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove an entry. Returns false for unknown ids.
    pub fn delete_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn entry(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_for_date(&self, date: NaiveDate) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.day() == date)
    }

    /// Entries whose day falls in `start..=end`, newest first.
    pub fn entries_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&JournalEntry> {
        let mut found: Vec<_> = self
            .entries
            .iter()
            .filter(|e| (start..=end).contains(&e.day()))
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        found
    }

    /// The `limit` most recent entries, newest first.
    pub fn recent_entries(&self, limit: usize) -> Vec<&JournalEntry> {
        let mut all = self.all_entries();
        all.truncate(limit);
        all
    }

    /// Every entry, newest first.
    pub fn all_entries(&self) -> Vec<&JournalEntry> {
        let mut all: Vec<_> = self.entries.iter().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        all
    }
}

fn validated(content: &str) -> Result<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("content".into()).into());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn prompts(n: usize) -> Vec<JournalPrompt> {
        (1..=n)
            .map(|i| JournalPrompt {
                id: i.to_string(),
                text: format!("prompt {i}"),
            })
            .collect()
    }

    #[test]
    fn prompt_uses_mod_index() {
        let journal = Journal::new(prompts(5), Vec::new());
        // 20230615 % 5 == 0 -> first prompt
        let p = journal.prompt_for_date(at(2023, 6, 15, 0).date()).unwrap();
        assert_eq!(p.id, "1");
        // 20230616 % 5 == 1
        let p = journal.prompt_for_date(at(2023, 6, 16, 0).date()).unwrap();
        assert_eq!(p.id, "2");
    }

    #[test]
    fn no_prompts_no_prompt() {
        let journal = Journal::default();
        assert!(journal.prompt_for_date(at(2023, 6, 15, 0).date()).is_none());
    }

    #[test]
    fn same_day_write_replaces_content() {
        let mut journal = Journal::new(prompts(3), Vec::new());
        let first = journal.write_entry("morning", at(2023, 6, 15, 8)).unwrap();
        let second = journal.write_entry("  evening  ", at(2023, 6, 15, 21)).unwrap();
        assert_eq!(first, second);
        assert_eq!(journal.entries().len(), 1);
        let entry = journal.entry(&first).unwrap();
        assert_eq!(entry.content, "evening");
        assert_eq!(entry.created_at, at(2023, 6, 15, 8));
        assert_eq!(entry.updated_at, at(2023, 6, 15, 21));
    }

    #[test]
    fn new_entry_links_prompt_of_the_day() {
        let mut journal = Journal::new(prompts(5), Vec::new());
        let id = journal.write_entry("text", at(2023, 6, 16, 9)).unwrap();
        assert_eq!(journal.entry(&id).unwrap().prompt_id.as_deref(), Some("2"));
    }

    #[test]
    fn empty_content_is_rejected() {
        let mut journal = Journal::default();
        let err = journal.write_entry("   ", at(2023, 6, 15, 8)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyField(_))));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut journal = Journal::default();
        assert!(!journal.update_entry("missing", "x", at(2023, 6, 15, 8)).unwrap());
        assert!(!journal.delete_entry("missing"));
    }

    #[test]
    fn queries_sort_newest_first() {
        let mut journal = Journal::default();
        journal.write_entry("a", at(2023, 6, 13, 8)).unwrap();
        journal.write_entry("c", at(2023, 6, 15, 8)).unwrap();
        journal.write_entry("b", at(2023, 6, 14, 8)).unwrap();

        let all: Vec<_> = journal.all_entries().iter().map(|e| e.content.clone()).collect();
        assert_eq!(all, vec!["c", "b", "a"]);

        let recent: Vec<_> = journal.recent_entries(2).iter().map(|e| e.content.clone()).collect();
        assert_eq!(recent, vec!["c", "b"]);

        let range: Vec<_> = journal
            .entries_in_range(at(2023, 6, 13, 0).date(), at(2023, 6, 14, 0).date())
            .iter()
            .map(|e| e.content.clone())
            .collect();
        assert_eq!(range, vec!["b", "a"]);

        assert_eq!(
            journal.entry_for_date(at(2023, 6, 14, 0).date()).unwrap().content,
            "b"
        );
    }

    #[test]
    fn delete_and_update_by_id() {
        let mut journal = Journal::default();
        let id = journal.write_entry("draft", at(2023, 6, 15, 8)).unwrap();
        assert!(journal.update_entry(&id, "final", at(2023, 6, 15, 9)).unwrap());
        assert_eq!(journal.entry(&id).unwrap().content, "final");
        assert_eq!(journal.entry(&id).unwrap().word_count(), 1);
        assert!(journal.delete_entry(&id));
        assert!(journal.entry(&id).is_none());
    }
}
