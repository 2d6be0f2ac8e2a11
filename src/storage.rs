//! Reads and writes the ledger CSV file.
//!
//! The file has a header row followed by one row per record:
//!
//! ```text
//! ID,Tanggal,Kategori,Jumlah,Catatan
//! 1,2024-01-01,Food,50000.0,
//! ```
//!
//! Every write replaces the whole file. Rows are written to a temporary file
//! next to the ledger which is then renamed over it, so a failed write leaves
//! the previous ledger intact.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{Error, Record, RecordDate, RecordId};

/// The column names of the ledger file, in order.
pub const COLUMNS: [&str; 5] = ["ID", "Tanggal", "Kategori", "Jumlah", "Catatan"];

/// A row of the ledger file.
#[derive(Debug, Serialize, Deserialize)]
struct Row {
    #[serde(rename = "ID")]
    id: RecordId,
    #[serde(rename = "Tanggal")]
    date: String,
    #[serde(rename = "Kategori")]
    category: String,
    #[serde(rename = "Jumlah")]
    amount: f64,
    #[serde(rename = "Catatan")]
    note: String,
}

impl From<Row> for Record {
    fn from(row: Row) -> Self {
        Record {
            id: row.id,
            date: RecordDate::new(&row.date),
            category: row.category,
            amount: row.amount,
            note: row.note,
        }
    }
}

impl From<&Record> for Row {
    fn from(record: &Record) -> Self {
        Row {
            id: record.id,
            date: record.date.as_str().to_owned(),
            category: record.category.clone(),
            amount: record.amount,
            note: record.note.clone(),
        }
    }
}

/// Create an empty ledger at `path` if there is no file there yet.
///
/// Returns `true` if a new file was created.
///
/// # Errors
/// Returns [Error::StorageWrite] if the file could not be created.
pub(crate) fn create_if_missing(path: &Path) -> Result<bool, Error> {
    let exists = path.try_exists().map_err(|error| Error::StorageWrite {
        path: path.to_owned(),
        reason: error.to_string(),
    })?;

    if exists {
        return Ok(false);
    }

    write_records(path, &[])?;
    tracing::info!("Created empty ledger at {}", path.display());

    Ok(true)
}

/// Read every record from the ledger at `path`, in file order.
///
/// Dates are not parsed here, see [RecordDate::parse].
///
/// # Errors
/// Returns [Error::StorageRead] if:
/// - the file does not exist or cannot be read,
/// - the header is not exactly [COLUMNS],
/// - a row has the wrong number of fields,
/// - an ID is not a positive integer or an amount is not a number.
pub(crate) fn read_records(path: &Path) -> Result<Vec<Record>, Error> {
    let read_error = |reason: String| Error::StorageRead {
        path: path.to_owned(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| read_error(error.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|error| read_error(error.to_string()))?;

    if headers.iter().ne(COLUMNS) {
        return Err(read_error(format!(
            "expected the columns {} but found {}",
            COLUMNS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut records = Vec::new();

    for row in reader.deserialize::<Row>() {
        let row = row.map_err(|error| read_error(error.to_string()))?;

        if row.id == 0 {
            return Err(read_error(format!(
                "found the ID 0 for the record dated \"{}\", IDs must be positive",
                row.date
            )));
        }

        records.push(Record::from(row));
    }

    tracing::debug!("Read {} records from {}", records.len(), path.display());

    Ok(records)
}

/// Replace the contents of the ledger at `path` with `records`.
///
/// # Errors
/// Returns [Error::StorageWrite] if the temporary file could not be written
/// or could not be moved over the ledger. The ledger is unchanged in that case.
pub(crate) fn write_records(path: &Path, records: &[Record]) -> Result<(), Error> {
    let temp_path = temporary_path(path);

    let result = write_csv(&temp_path, records)
        .and_then(|()| fs::rename(&temp_path, path).map_err(csv::Error::from));

    if let Err(error) = result {
        // The temporary file may not exist if it could not be created.
        let _ = fs::remove_file(&temp_path);

        return Err(Error::StorageWrite {
            path: path.to_owned(),
            reason: error.to_string(),
        });
    }

    tracing::debug!("Wrote {} records to {}", records.len(), path.display());

    Ok(())
}

fn write_csv(path: &Path, records: &[Record]) -> Result<(), csv::Error> {
    // The header is written by hand so that an empty ledger still has one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(COLUMNS)?;

    for record in records {
        writer.serialize(Row::from(record))?;
    }

    writer.flush()?;

    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use time::macros::date;

    use super::{COLUMNS, create_if_missing, read_records, temporary_path, write_records};
    use crate::{Error, Record, RecordDate};

    fn get_test_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    fn is_read_error(result: &Result<Vec<Record>, Error>) -> bool {
        matches!(result, Err(Error::StorageRead { .. }))
    }

    fn create_test_record(id: u64, date: &str, category: &str, amount: f64) -> Record {
        Record {
            id,
            date: RecordDate::new(date),
            category: category.to_owned(),
            amount,
            note: String::new(),
        }
    }

    #[test]
    fn create_if_missing_writes_header_only() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");

        let created = create_if_missing(&path).unwrap();

        assert!(created);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "ID,Tanggal,Kategori,Jumlah,Catatan\n"
        );
        assert_eq!(read_records(&path).unwrap(), vec![]);
    }

    #[test]
    fn create_if_missing_leaves_existing_file_alone() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        let contents = "ID,Tanggal,Kategori,Jumlah,Catatan\n1,2024-01-01,Food,50000.0,\n";
        fs::write(&path, contents).unwrap();

        let created = create_if_missing(&path).unwrap();

        assert!(!created);
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn reads_quoted_and_empty_fields() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(
            &path,
            "ID,Tanggal,Kategori,Jumlah,Catatan\n\
            1,2024-01-01,Food,50000.0,\n\
            2,2024-01-03,Food,20000.0,\"Kopi, susu\"\n\
            3,2024-01-02,,15000.0,Bus\n",
        )
        .unwrap();

        let records = read_records(&path).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], create_test_record(1, "2024-01-01", "Food", 50000.0));
        assert_eq!(records[1].note, "Kopi, susu");
        assert_eq!(records[2].category, "");
        assert_eq!(records[2].note, "Bus");
    }

    #[test]
    fn keeps_malformed_dates_as_text() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(
            &path,
            "ID,Tanggal,Kategori,Jumlah,Catatan\n1,yesterday,Food,500,\n",
        )
        .unwrap();

        let records = read_records(&path).unwrap();

        assert_eq!(records[0].date, RecordDate::new("yesterday"));
    }

    #[test]
    fn read_fails_on_missing_file() {
        let dir = get_test_dir();
        let path = dir.path().join("missing.csv");

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn read_fails_on_empty_file() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(&path, "").unwrap();

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn read_fails_on_missing_column() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(&path, "ID,Tanggal,Kategori,Jumlah\n1,2024-01-01,Food,500\n").unwrap();

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn read_fails_on_extra_column() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(
            &path,
            "ID,Tanggal,Kategori,Jumlah,Catatan,Extra\n1,2024-01-01,Food,500,,x\n",
        )
        .unwrap();

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn read_fails_on_reordered_columns() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(
            &path,
            "Tanggal,ID,Kategori,Jumlah,Catatan\n2024-01-01,1,Food,500,\n",
        )
        .unwrap();

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn read_fails_on_short_row() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(&path, "ID,Tanggal,Kategori,Jumlah,Catatan\n1,2024-01-01,Food\n").unwrap();

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn read_fails_on_non_integer_id() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(
            &path,
            "ID,Tanggal,Kategori,Jumlah,Catatan\none,2024-01-01,Food,500,\n",
        )
        .unwrap();

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn read_fails_on_zero_id() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(
            &path,
            "ID,Tanggal,Kategori,Jumlah,Catatan\n0,2024-01-01,Food,500,\n",
        )
        .unwrap();

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn read_fails_on_non_numeric_amount() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        fs::write(
            &path,
            "ID,Tanggal,Kategori,Jumlah,Catatan\n1,2024-01-01,Food,lots,\n",
        )
        .unwrap();

        assert!(is_read_error(&read_records(&path)));
    }

    #[test]
    fn write_then_read_preserves_records() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        let records = vec![
            create_test_record(1, "2024-01-01", "Food", 50000.0),
            Record {
                note: "Line one\nline \"two\"".to_owned(),
                ..create_test_record(3, "2024-01-02", "", 0.1 + 0.2)
            },
        ];

        write_records(&path, &records).unwrap();

        assert_eq!(read_records(&path).unwrap(), records);
        assert!(!temporary_path(&path).exists());
    }

    #[test]
    fn write_replaces_previous_contents() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");
        write_records(
            &path,
            &[
                create_test_record(1, "2024-01-01", "Food", 1.0),
                create_test_record(2, "2024-01-02", "Food", 2.0),
            ],
        )
        .unwrap();

        write_records(&path, &[create_test_record(2, "2024-01-02", "Food", 2.0)]).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 2);
    }

    #[test]
    fn write_uses_column_names() {
        let dir = get_test_dir();
        let path = dir.path().join("pengeluaran.csv");

        write_records(
            &path,
            &[create_test_record(1, &date!(2024 - 01 - 01).to_string(), "Food", 50000.0)],
        )
        .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some(COLUMNS.join(",").as_str()));
        assert_eq!(lines.next(), Some("1,2024-01-01,Food,50000.0,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn write_fails_when_directory_is_missing() {
        let dir = get_test_dir();
        let path = dir.path().join("missing").join("pengeluaran.csv");

        let result = write_records(&path, &[]);

        assert!(matches!(result, Err(Error::StorageWrite { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn failed_rename_keeps_ledger_and_removes_temporary_file() {
        let dir = get_test_dir();
        // A directory in place of the ledger makes the final rename fail.
        let path = dir.path().join("pengeluaran.csv");
        fs::create_dir(&path).unwrap();

        let result = write_records(&path, &[create_test_record(1, "2024-01-01", "Food", 1.0)]);

        assert!(matches!(result, Err(Error::StorageWrite { .. })));
        assert!(path.is_dir());
        assert!(!temporary_path(&path).exists());
    }
}
