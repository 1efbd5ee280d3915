use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use rand::{Rng, distributions::Alphanumeric, thread_rng};
use thiserror::Error;

const ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(generate_id())
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LogBookError {
    #[error("entry index {index} is out of range (log has {len} entries)")]
    OutOfRange { index: usize, len: usize },
    #[error("entry not found: {0}")]
    UnknownEntry(EntryId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: EntryId,
    pub task: String,
    pub hours: f64,
    pub date: NaiveDate,
    pub editing: bool,
}

/// A single field write coming from the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Task(String),
    Hours(String),
    Date(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIssue {
    MissingTask,
    MissingHours,
    HoursNotNumeric,
    MissingDate,
    FutureDate,
}

impl Display for DraftIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            DraftIssue::MissingTask => "task is required",
            DraftIssue::MissingHours => "hours are required",
            DraftIssue::HoursNotNumeric => "hours must be a number",
            DraftIssue::MissingDate => "date is required",
            DraftIssue::FutureDate => "date cannot be in the future",
        };
        f.write_str(message)
    }
}

/// The entry being composed before it is committed. Hours stay as raw text
/// until commit so partially typed numbers are never rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub task: String,
    pub hours: String,
    pub date: Option<NaiveDate>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.task.is_empty() && self.hours.is_empty() && self.date.is_none()
    }

    pub fn issues(&self, today: NaiveDate) -> Vec<DraftIssue> {
        let mut issues = Vec::new();
        if self.task.trim().is_empty() {
            issues.push(DraftIssue::MissingTask);
        }

        if self.hours.trim().is_empty() {
            issues.push(DraftIssue::MissingHours);
        } else if parse_committed_hours(&self.hours).is_none() {
            issues.push(DraftIssue::HoursNotNumeric);
        }

        match self.date {
            None => issues.push(DraftIssue::MissingDate),
            Some(date) if date > today => issues.push(DraftIssue::FutureDate),
            Some(_) => {}
        }

        issues
    }

    pub fn is_committable(&self, today: NaiveDate) -> bool {
        self.issues(today).is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogBook {
    entries: Vec<LogEntry>,
    draft: Draft,
}

impl LogBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: &EntryId) -> Option<&LogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }

    pub fn id_at(&self, index: usize) -> Result<EntryId, LogBookError> {
        self.entries
            .get(index)
            .map(|entry| entry.id.clone())
            .ok_or(LogBookError::OutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn total_hours(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.hours)
            .filter(|hours| hours.is_finite())
            .sum()
    }

    pub fn set_draft_field(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Task(task) => self.draft.task = task,
            FieldUpdate::Hours(hours) => self.draft.hours = hours,
            FieldUpdate::Date(date) => self.draft.date = Some(date),
        }
    }

    /// Appends the draft as a new entry when it is valid for `today`.
    ///
    /// An invalid draft leaves the log and the draft untouched and yields
    /// `None`; callers inspect [`Draft::issues`] for feedback.
    pub fn commit(&mut self, today: NaiveDate) -> Option<EntryId> {
        if !self.draft.is_committable(today) {
            tracing::debug!(issues = ?self.draft.issues(today), "draft rejected");
            return None;
        }

        let hours = parse_committed_hours(&self.draft.hours)?;
        let date = self.draft.date?;
        let draft = std::mem::take(&mut self.draft);
        let id = EntryId::generate();
        self.entries.push(LogEntry {
            id: id.clone(),
            task: draft.task,
            hours,
            date,
            editing: false,
        });

        tracing::info!(entry = %id, hours, %date, "logged entry");
        Some(id)
    }

    pub fn toggle_editing(&mut self, id: &EntryId) -> Result<bool, LogBookError> {
        let entry = self.entry_mut(id)?;
        entry.editing = !entry.editing;
        tracing::debug!(entry = %id, editing = entry.editing, "toggled edit mode");
        Ok(entry.editing)
    }

    pub fn toggle_editing_at(&mut self, index: usize) -> Result<bool, LogBookError> {
        let id = self.id_at(index)?;
        self.toggle_editing(&id)
    }

    /// Overwrites one field of an entry. Hours text that does not parse is
    /// stored as `NaN`; only [`LogBook::commit`] enforces numeric hours.
    pub fn edit_field(&mut self, id: &EntryId, update: FieldUpdate) -> Result<(), LogBookError> {
        let entry = self.entry_mut(id)?;
        match update {
            FieldUpdate::Task(task) => entry.task = task,
            FieldUpdate::Hours(hours) => entry.hours = parse_hours_lenient(&hours),
            FieldUpdate::Date(date) => entry.date = date,
        }
        Ok(())
    }

    pub fn edit_field_at(&mut self, index: usize, update: FieldUpdate) -> Result<(), LogBookError> {
        let id = self.id_at(index)?;
        self.edit_field(&id, update)
    }

    pub fn delete_entry(&mut self, id: &EntryId) -> Result<LogEntry, LogBookError> {
        let index = self
            .position(id)
            .ok_or_else(|| LogBookError::UnknownEntry(id.clone()))?;
        let removed = self.entries.remove(index);
        tracing::info!(entry = %id, index, "deleted entry");
        Ok(removed)
    }

    pub fn delete_entry_at(&mut self, index: usize) -> Result<LogEntry, LogBookError> {
        let id = self.id_at(index)?;
        self.delete_entry(&id)
    }

    fn entry_mut(&mut self, id: &EntryId) -> Result<&mut LogEntry, LogBookError> {
        self.entries
            .iter_mut()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| LogBookError::UnknownEntry(id.clone()))
    }
}

fn parse_committed_hours(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite())
}

fn parse_hours_lenient(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(f64::NAN)
}

pub fn generate_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

pub fn format_hours(hours: f64) -> String {
    if !hours.is_finite() {
        return "n/a hrs".to_string();
    }

    if hours.fract() == 0.0 {
        format!("{hours:.0} hrs")
    } else {
        let text = format!("{hours:.2}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        format!("{text} hrs")
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %d %b %Y").to_string()
}

/// Hours as editable text, the inverse of what `edit_field` parses.
pub fn hours_input_text(hours: f64) -> String {
    if hours.is_finite() {
        hours.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{DraftIssue, FieldUpdate, LogBook, LogBookError, format_hours};

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn book_with(tasks: &[&str]) -> LogBook {
        let mut book = LogBook::new();
        for task in tasks {
            book.set_draft_field(FieldUpdate::Task(task.to_string()));
            book.set_draft_field(FieldUpdate::Hours("1".to_string()));
            book.set_draft_field(FieldUpdate::Date(day(2024, 1, 10)));
            book.commit(day(2024, 1, 10)).expect("commit should succeed");
        }
        book
    }

    fn tasks(book: &LogBook) -> Vec<&str> {
        book.entries().iter().map(|entry| entry.task.as_str()).collect()
    }

    #[test]
    fn commits_valid_draft_and_resets_it() {
        let mut book = LogBook::new();
        book.set_draft_field(FieldUpdate::Task("Write report".to_string()));
        book.set_draft_field(FieldUpdate::Hours("3".to_string()));
        book.set_draft_field(FieldUpdate::Date(day(2024, 1, 10)));

        let id = book.commit(day(2024, 1, 12)).expect("commit should succeed");

        assert_eq!(book.len(), 1);
        let entry = &book.entries()[0];
        assert_eq!(entry.id, id);
        assert_eq!(entry.task, "Write report");
        assert_eq!(entry.hours, 3.0);
        assert_eq!(entry.date, day(2024, 1, 10));
        assert!(!entry.editing);
        assert!(book.draft().is_empty());
    }

    #[test]
    fn rejects_non_numeric_hours_without_touching_state() {
        let mut book = LogBook::new();
        book.set_draft_field(FieldUpdate::Task("Write report".to_string()));
        book.set_draft_field(FieldUpdate::Hours("abc".to_string()));
        book.set_draft_field(FieldUpdate::Date(day(2024, 1, 10)));
        let before = book.draft().clone();

        assert!(book.commit(day(2024, 1, 10)).is_none());
        assert!(book.is_empty());
        assert_eq!(book.draft(), &before);
        assert_eq!(
            book.draft().issues(day(2024, 1, 10)),
            vec![DraftIssue::HoursNotNumeric]
        );
    }

    #[test]
    fn rejects_missing_fields_and_future_dates() {
        let today = day(2024, 1, 10);
        let mut book = LogBook::new();
        assert!(book.commit(today).is_none());
        assert_eq!(
            book.draft().issues(today),
            vec![
                DraftIssue::MissingTask,
                DraftIssue::MissingHours,
                DraftIssue::MissingDate
            ]
        );

        book.set_draft_field(FieldUpdate::Task("   ".to_string()));
        book.set_draft_field(FieldUpdate::Hours("inf".to_string()));
        book.set_draft_field(FieldUpdate::Date(day(2024, 1, 11)));
        assert!(book.commit(today).is_none());
        assert_eq!(
            book.draft().issues(today),
            vec![
                DraftIssue::MissingTask,
                DraftIssue::HoursNotNumeric,
                DraftIssue::FutureDate
            ]
        );
        assert!(book.is_empty());

        book.set_draft_field(FieldUpdate::Task("Review".to_string()));
        book.set_draft_field(FieldUpdate::Hours(" 1.5 ".to_string()));
        book.set_draft_field(FieldUpdate::Date(today));
        assert!(book.commit(today).is_some());
        assert_eq!(book.entries()[0].hours, 1.5);
    }

    #[test]
    fn commit_keeps_task_text_as_typed() {
        let today = day(2024, 1, 10);
        let mut book = LogBook::new();
        book.set_draft_field(FieldUpdate::Task("  Standup notes ".to_string()));
        book.set_draft_field(FieldUpdate::Hours("0.5".to_string()));
        book.set_draft_field(FieldUpdate::Date(today));

        book.commit(today).expect("commit should succeed");
        assert_eq!(book.entries()[0].task, "  Standup notes ");
    }

    #[test]
    fn commits_append_in_order_with_distinct_ids() {
        let book = book_with(&["A", "B", "C"]);
        assert_eq!(tasks(&book), vec!["A", "B", "C"]);
        let ids = book
            .entries()
            .iter()
            .map(|entry| entry.id.clone())
            .collect::<Vec<_>>();
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn delete_shifts_later_entries_down() {
        let mut book = book_with(&["A", "B", "C"]);
        let removed = book.delete_entry_at(0).expect("delete should work");
        assert_eq!(removed.task, "A");
        assert_eq!(tasks(&book), vec!["B", "C"]);

        book.delete_entry_at(0).expect("delete should work");
        assert_eq!(tasks(&book), vec!["C"]);
    }

    #[test]
    fn ids_survive_deletion_of_earlier_entries() {
        let mut book = book_with(&["A", "B", "C"]);
        let c = book.id_at(2).expect("id for C");
        book.delete_entry_at(0).expect("delete should work");

        assert_eq!(book.position(&c), Some(1));
        book.edit_field(&c, FieldUpdate::Task("C2".to_string()))
            .expect("edit should work");
        assert_eq!(tasks(&book), vec!["B", "C2"]);
    }

    #[test]
    fn toggle_editing_is_self_inverse() {
        let mut book = book_with(&["A", "B"]);
        let before = book.entries().to_vec();

        assert!(book.toggle_editing_at(1).expect("toggle should work"));
        assert!(book.entries()[1].editing);
        assert!(!book.entries()[0].editing);
        assert!(!book.toggle_editing_at(1).expect("toggle should work"));

        assert_eq!(book.entries(), before.as_slice());
    }

    #[test]
    fn edit_field_changes_only_the_named_field() {
        let mut book = book_with(&["A", "B"]);
        book.toggle_editing_at(0).expect("toggle should work");
        let before = book.entries().to_vec();

        book.edit_field_at(0, FieldUpdate::Hours("2.25".to_string()))
            .expect("edit should work");

        let entry = &book.entries()[0];
        assert_eq!(entry.hours, 2.25);
        assert_eq!(entry.task, before[0].task);
        assert_eq!(entry.date, before[0].date);
        assert!(entry.editing);
        assert_eq!(book.entries()[1], before[1]);
    }

    #[test]
    fn edit_field_stores_nan_for_non_numeric_hours() {
        let mut book = book_with(&["A"]);
        book.edit_field_at(0, FieldUpdate::Hours("abc".to_string()))
            .expect("edit should work");

        assert!(book.entries()[0].hours.is_nan());
        assert_eq!(format_hours(book.entries()[0].hours), "n/a hrs");
        assert_eq!(book.total_hours(), 0.0);
    }

    #[test]
    fn stale_indices_and_ids_are_reported() {
        let mut book = book_with(&["A"]);
        let id = book.id_at(0).expect("id");
        book.delete_entry(&id).expect("delete should work");

        assert_eq!(
            book.toggle_editing_at(0),
            Err(LogBookError::OutOfRange { index: 0, len: 0 })
        );
        assert_eq!(
            book.edit_field(&id, FieldUpdate::Task("x".to_string())),
            Err(LogBookError::UnknownEntry(id.clone()))
        );
        assert!(matches!(
            book.delete_entry(&id),
            Err(LogBookError::UnknownEntry(_))
        ));
    }

    #[test]
    fn formats_hours_for_display() {
        assert_eq!(format_hours(3.0), "3 hrs");
        assert_eq!(format_hours(1.5), "1.5 hrs");
        assert_eq!(format_hours(0.25), "0.25 hrs");
        assert_eq!(format_hours(f64::INFINITY), "n/a hrs");
    }
}
