use std::path::{Path, PathBuf};

use mapscout_core::{ListingRecord, COLUMNS};

use crate::persist::{AtomicFileWriter, PersistError};

const SEPARATOR: char = ',';
const UTF8_BOM: &str = "\u{FEFF}";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("refusing to write an empty export")]
    Empty,
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Renders records as CSV: BOM, header row, then one row per record in order.
pub fn render_csv(records: &[ListingRecord]) -> String {
    let mut out = String::from(UTF8_BOM);
    push_row(&mut out, COLUMNS.iter().copied());
    for record in records {
        let row = record.to_row();
        push_row(&mut out, row.iter().map(String::as_str));
    }
    out
}

/// Writes `records` to `{dir}/{filename}` atomically. Empty input is an error
/// rather than an empty file.
pub fn write_records(
    dir: &Path,
    filename: &str,
    records: &[ListingRecord],
) -> Result<PathBuf, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }
    let writer = AtomicFileWriter::new(dir);
    Ok(writer.write(filename, render_csv(records).as_bytes())?)
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            out.push(SEPARATOR);
        }
        if needs_quotes(cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push_str("\r\n");
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains(SEPARATOR) || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

#[cfg(test)]
mod tests {
    use super::needs_quotes;

    #[test]
    fn quoting_rules() {
        assert!(needs_quotes("ул. Баумана, 12"));
        assert!(needs_quotes("\"Blue\" Door"));
        assert!(needs_quotes("line\nbreak"));
        assert!(!needs_quotes("Mon–Fri 09:00-21:00"));
        assert!(!needs_quotes(""));
    }
}
