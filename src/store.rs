//! Defines the record store, which owns the records of a ledger file.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::{
    Error, NewRecord, Record, RecordId,
    storage::{create_if_missing, read_records, write_records},
};

/// The records of one ledger file, held in memory for a session.
///
/// Every mutation rewrites the whole file. The store assumes it is the only
/// writer for as long as it is alive, changes made to the file by other
/// programs after [RecordStore::load] are overwritten by the next mutation.
///
/// A mutation is applied to a copy of the records and the copy only replaces
/// the in-memory records once the file has been written, so a failed write
/// leaves both the file and the store as they were.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
    /// The largest ID loaded or assigned by this store, so that an ID freed
    /// by [RecordStore::delete] is not handed out again.
    highest_id: RecordId,
}

impl RecordStore {
    /// Create an empty ledger at `path` if one does not exist yet.
    ///
    /// Safe to call every time the program starts, an existing ledger is
    /// left untouched.
    ///
    /// # Errors
    /// Returns [Error::StorageWrite] if the file could not be created.
    pub fn initialize(path: &Path) -> Result<(), Error> {
        create_if_missing(path).map(|_| ())
    }

    /// Load the ledger at `path` into a new store.
    ///
    /// # Errors
    /// Returns [Error::StorageRead] if the file does not exist, could not be
    /// read, or does not match the ledger schema.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let records = read_records(&path)?;

        let mut highest_id = 0;
        let mut seen_ids = HashSet::new();

        for record in &records {
            if !seen_ids.insert(record.id) {
                tracing::warn!(
                    "The ledger at {} contains the ID {} more than once",
                    path.display(),
                    record.id
                );
            }

            highest_id = highest_id.max(record.id);
        }

        tracing::debug!("Loaded {} records from {}", records.len(), path.display());

        Ok(Self {
            path,
            records,
            highest_id,
        })
    }

    /// Create the ledger at `path` if needed and load it.
    ///
    /// # Errors
    /// Returns the errors of [RecordStore::initialize] and [RecordStore::load].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        Self::initialize(&path)?;
        Self::load(path)
    }

    /// Add a new record to the ledger and save it.
    ///
    /// The record is given the ID one greater than the largest ID this store
    /// has seen, which is `1` for a new ledger.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::InvalidAmount] if the amount is negative, infinite or NaN,
    /// - [Error::IdsExhausted] if there is no ID left to assign,
    /// - [Error::StorageWrite] if the ledger could not be saved.
    ///
    /// The store is unchanged if an error is returned.
    pub fn add(&mut self, new_record: NewRecord) -> Result<Record, Error> {
        let id = self.next_id()?;
        let record = new_record.finalize(id)?;

        let mut records = self.records.clone();
        records.push(record.clone());
        self.persist(&records)?;

        self.records = records;
        self.highest_id = id;

        tracing::info!(
            "Added record {} for {} in \"{}\"",
            record.id,
            record.amount,
            record.category
        );

        Ok(record)
    }

    /// Delete every record with the ID `id` and save the ledger.
    ///
    /// Returns `false` without touching the ledger file if no record has the
    /// ID `id`.
    ///
    /// # Errors
    /// Returns [Error::StorageWrite] if the ledger could not be saved, in which
    /// case the store is unchanged.
    pub fn delete(&mut self, id: RecordId) -> Result<bool, Error> {
        if !self.records.iter().any(|record| record.id == id) {
            tracing::debug!("No record with the ID {id} to delete");
            return Ok(false);
        }

        let records: Vec<Record> = self
            .records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        self.persist(&records)?;

        self.records = records;

        tracing::info!("Deleted record {id}");

        Ok(true)
    }

    /// The records in the order they appear in the ledger file.
    ///
    /// The order is for display only, it has no meaning.
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    /// The first record with the ID `id`.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// The IDs of the records, in the same order as [RecordStore::list].
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|record| record.id).collect()
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The path to the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn next_id(&self) -> Result<RecordId, Error> {
        // `highest_id` is never less than the largest ID in `records`.
        self.highest_id.checked_add(1).ok_or(Error::IdsExhausted)
    }

    fn persist(&self, records: &[Record]) -> Result<(), Error> {
        write_records(&self.path, records).inspect_err(|error| {
            tracing::error!("Could not save the ledger: {error}");
        })
    }
}
