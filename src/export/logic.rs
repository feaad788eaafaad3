use crate::db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::{EntryExport, entries_to_table, get_headers};
use crate::ui::messages::warning;

use crate::export::json_csv::{export_csv, export_json};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::utils::date::parse_period;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;

pub struct ExportLogic;

impl ExportLogic {
    /// Export study-log entries to a file.
    ///
    /// - `file`: absolute path of the output file
    /// - `period`: `None`, `"all"`, or an expression like:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `start:end` in any of the above
    /// - `subject`: restrict to one subject
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        period: &Option<String>,
        subject: Option<&str>,
        force: bool,
    ) -> AppResult<()> {
        let expanded = expand_tilde(file);
        let path = expanded.as_path();

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let bounds: Option<(NaiveDate, NaiveDate)> = match period {
            None => None,
            Some(p) if p.eq_ignore_ascii_case("all") => None,
            Some(p) => Some(parse_period(p).map_err(AppError::InvalidDate)?),
        };

        let entries = match bounds {
            None => db::queries::load_all_entries(&pool.conn)?,
            Some((start, end)) => {
                db::queries::load_entries_between(&pool.conn, start, end, subject)?
            }
        };

        let entries: Vec<EntryExport> = entries
            .iter()
            .filter(|e| subject.is_none_or(|s| e.subject == s))
            .map(EntryExport::from)
            .collect();

        if entries.is_empty() {
            warning("No entries found for the selected period.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => export_csv(&entries, path)?,
            ExportFormat::Json => export_json(&entries, path)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(period);
                let mut pdf = PdfManager::new();
                pdf.write_table(&title, &get_headers(), &entries_to_table(&entries));
                pdf.save(path)?;
                notify_export_success("PDF", path);
            }
        }

        db::log::audit(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} entries as {}", entries.len(), format.as_str()),
        )?;

        Ok(())
    }
}

fn build_pdf_title(period: &Option<String>) -> String {
    match period.as_deref() {
        None => "Study log".to_string(),
        Some(p) if p.eq_ignore_ascii_case("all") => "Study log".to_string(),
        Some(p) => format!("Study log for {p}"),
    }
}
