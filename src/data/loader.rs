use std::path::Path;

use anyhow::{Context, Result};

use super::model::RecordSet;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a delimited text file into a [`RecordSet`].
///
/// The first row names the columns. Every field stays a string. A file with
/// only a header (or nothing at all) loads as an empty table, not an error.
pub fn load_file(path: &Path, delimiter: u8) -> Result<RecordSet> {
    let text = read_as_utf8(path)?;
    let records = parse_delimited(&text, delimiter)
        .with_context(|| format!("parsing {}", path.display()))?;
    log::info!(
        "Read {} rows with columns {:?} from {}",
        records.len(),
        records.columns(),
        path.display()
    );
    Ok(records)
}

/// Load a criteria file. Same format as the data file.
pub fn load_criteria_file(path: &Path, delimiter: u8) -> Result<RecordSet> {
    let criteria = load_file(path, delimiter)?;
    log::info!("Loaded {} criteria rows", criteria.len());
    Ok(criteria)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Read a file as UTF-8, falling back to Windows-1252 for legacy exports.
pub fn read_as_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::warn!(
                "{} is not valid UTF-8, decoding as Windows-1252",
                path.display()
            );
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse delimited text whose first row is the header.
///
/// Blank header cells are named `Unnamed: <index>` so trailing delimiters
/// in exported files do not break loading.
pub fn parse_delimited(text: &str, delimiter: u8) -> Result<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("row {}", row_no + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RecordSet::new(columns, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_semicolon_text_as_strings() {
        let rs = parse_delimited("Vorname;Flur\nAnna;007\nBob;\n", b';').unwrap();
        assert_eq!(rs.columns(), ["Vorname", "Flur"]);
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.get(0, "Flur"), Some("007"));
        assert_eq!(rs.get(1, "Flur"), Some(""));
    }

    #[test]
    fn header_only_is_empty_not_error() {
        let rs = parse_delimited("Vorname;Name\n", b';').unwrap();
        assert!(rs.is_empty());
        assert_eq!(rs.columns().len(), 2);

        let rs = parse_delimited("", b';').unwrap();
        assert!(rs.is_empty());
        assert!(rs.columns().is_empty());
    }

    #[test]
    fn blank_headers_get_placeholder_names() {
        let rs = parse_delimited("Vorname;\nAnna;\n", b';').unwrap();
        assert_eq!(rs.columns(), ["Vorname", "Unnamed: 1"]);
    }

    #[test]
    fn ragged_rows_fail() {
        assert!(parse_delimited("a;b\n1;2;3\n", b';').is_err());
    }

    #[test]
    fn duplicate_headers_fail() {
        let err = parse_delimited("Ort;Ort\n1;2\n", b';').unwrap_err();
        assert!(format!("{err:#}").contains("Duplicate column name 'Ort'"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load_file(&path, b';').unwrap_err();
        assert!(format!("{err:#}").contains("nope.csv"));
    }

    #[test]
    fn windows_1252_files_are_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"Ort\n80331 M\xfcnchen\n").unwrap();
        drop(f);

        let rs = load_file(&path, b';').unwrap();
        assert_eq!(rs.get(0, "Ort"), Some("80331 München"));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, "\u{feff}Vorname\nAnna\n").unwrap();

        let rs = load_criteria_file(&path, b';').unwrap();
        assert_eq!(rs.columns(), ["Vorname"]);
    }
}
