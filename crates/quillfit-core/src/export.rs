//! JSON export of the saved-poem history.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::poem::SavedPoem;

/// `my-poems-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("my-poems-{}.json", date.format("%Y-%m-%d"))
}

/// Write `poems` pretty-printed into `dir`.
///
/// Returns `None` without touching the filesystem when there is nothing to
/// export.
pub fn write_export(poems: &[SavedPoem], dir: &Path, date: NaiveDate) -> Result<Option<PathBuf>> {
    if poems.is_empty() {
        return Ok(None);
    }
    let path = dir.join(export_file_name(date));
    let json = serde_json::to_string_pretty(poems)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), count = poems.len(), "exported saved poems");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poem::PoemKind;
    use chrono::Utc;

    #[test]
    fn file_name_carries_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert_eq!(export_file_name(date), "my-poems-2024-07-09.json");
    }

    #[test]
    fn empty_history_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert!(write_export(&[], dir.path(), date).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn writes_pretty_array() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        let poems = vec![SavedPoem::new(PoemKind::Haiku, "old pond", Utc::now())];
        let path = write_export(&poems, dir.path(), date).unwrap().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  {"));
        let back: Vec<SavedPoem> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, poems);
    }
}
