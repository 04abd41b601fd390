use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::RecordSet;

/// Write `records` as delimited text with a header row.
///
/// The table is written to a hidden sibling file first and renamed over
/// `path` once complete, so a failed save never leaves a truncated target.
pub fn save_csv(records: &RecordSet, path: &Path, delimiter: u8) -> Result<()> {
    let tmp = temp_sibling(path);

    let written = write_to(records, &tmp, delimiter).and_then(|()| {
        std::fs::rename(&tmp, path)
            .with_context(|| format!("moving {} into place", tmp.display()))
    });

    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.context(format!("saving {}", path.display())));
    }

    log::info!("Saved {} rows to {}", records.len(), path.display());
    Ok(())
}

fn write_to(records: &RecordSet, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer
        .write_record(records.columns())
        .context("writing header row")?;
    for (i, row) in records.rows().iter().enumerate() {
        writer
            .write_record(row.values())
            .with_context(|| format!("writing row {}", i + 1))?;
    }
    writer.flush().context("flushing output")?;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| "output".as_ref()));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_file;

    fn output() -> RecordSet {
        RecordSet::new(
            ["Vorname_Name", "Adresse", "PLZ", "Ortsname"],
            vec![
                vec!["Anna Muster".into(), "Hauptstr. 1".into(), "12345".into(), "Berlin".into()],
                vec!["Bob Beispiel".into(), "Weg 2, Hinterhaus".into(), "54321".into(), "".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn writes_header_and_rows_with_comma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_csv(&output(), &path, b',').unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Vorname_Name,Adresse,PLZ,Ortsname"));
        assert_eq!(lines.next(), Some("Anna Muster,Hauptstr. 1,12345,Berlin"));
        assert_eq!(lines.next(), Some("Bob Beispiel,\"Weg 2, Hinterhaus\",54321,"));
        assert!(!dir.path().join(".out.csv.tmp").exists());
    }

    #[test]
    fn semicolon_output_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        save_csv(&output(), &path, b';').unwrap();

        let back = load_file(&path, b';').unwrap();
        assert_eq!(back, output());
    }

    #[test]
    fn unwritable_target_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = save_csv(&output(), &path, b',').unwrap_err();
        assert!(format!("{err:#}").contains("out.csv"));
        assert!(!path.exists());
    }
}
