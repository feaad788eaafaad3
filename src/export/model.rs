use crate::models::entry::StudyEntry;
use serde::Serialize;

/// Flat row shape shared by every export format.
#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i32,
    pub date: String,
    pub subject: String,
    pub minutes: i64,
    pub source: String,
    pub created_at: String,
}

impl From<&StudyEntry> for EntryExport {
    fn from(e: &StudyEntry) -> Self {
        Self {
            id: e.id,
            date: e.date_str(),
            subject: e.subject.clone(),
            minutes: e.minutes,
            source: e.source.clone(),
            created_at: e.created_at.clone(),
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["id", "date", "subject", "minutes", "source", "created_at"]
}

pub(crate) fn entry_to_row(e: &EntryExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.date.clone(),
        e.subject.clone(),
        e.minutes.to_string(),
        e.source.clone(),
        e.created_at.clone(),
    ]
}

pub(crate) fn entries_to_table(entries: &[EntryExport]) -> Vec<Vec<String>> {
    entries.iter().map(entry_to_row).collect()
}
