//! Disease repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Bulk-replace the stored dataset from a fresh build.
//! - Read stored records back in identifier order.
//!
//! # Invariants
//! - `replace_all` is atomic: readers see the old or the new dataset.
//! - List projections are re-derived from text on read, never stored.

use crate::db::DbError;
use crate::model::disease::{
    split_comma_list, DiseaseRecord, DiseaseValidationError,
};
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const DISEASE_SELECT_SQL: &str = "SELECT
    id,
    name,
    disease_code,
    symptoms,
    treatments,
    contagious,
    chronic,
    created_at,
    updated_at
FROM diseases";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for dataset persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(DiseaseValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted disease data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DiseaseValidationError> for RepoError {
    fn from(value: DiseaseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the disease table.
pub trait DiseaseRepository {
    /// Clears stored diseases and inserts `records`; returns rows written.
    fn replace_all(&self, records: &[DiseaseRecord]) -> RepoResult<usize>;
    /// All stored records ordered by identifier.
    fn load_all(&self) -> RepoResult<Vec<DiseaseRecord>>;
    /// Number of stored rows.
    fn count(&self) -> RepoResult<usize>;
}

/// SQLite-backed disease repository.
pub struct SqliteDiseaseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDiseaseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DiseaseRepository for SqliteDiseaseRepository<'_> {
    fn replace_all(&self, records: &[DiseaseRecord]) -> RepoResult<usize> {
        for record in records {
            record.validate()?;
        }

        let started_at = Instant::now();
        let tx = self.conn.unchecked_transaction()?;
        let cleared = tx.execute("DELETE FROM diseases;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO diseases (
                    id,
                    name,
                    disease_code,
                    symptoms,
                    treatments,
                    contagious,
                    chronic,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            )?;
            for record in records {
                insert.execute(params![
                    record.id,
                    record.name.as_str(),
                    record.disease_code.as_str(),
                    record.symptoms_text.as_str(),
                    record.treatments_text.as_str(),
                    bool_to_int(record.contagious),
                    bool_to_int(record.chronic),
                    record.created_at,
                    record.updated_at,
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "event=db_import module=repo status=ok cleared={} inserted={} duration_ms={}",
            cleared,
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records.len())
    }

    fn load_all(&self) -> RepoResult<Vec<DiseaseRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DISEASE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_disease_row(row)?);
        }

        Ok(records)
    }

    fn count(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM diseases;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative disease count `{count}`")))
    }
}

fn parse_disease_row(row: &Row<'_>) -> RepoResult<DiseaseRecord> {
    let symptoms_text: String = row.get("symptoms")?;
    let treatments_text: String = row.get("treatments")?;

    let record = DiseaseRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        disease_code: row.get("disease_code")?,
        symptoms: split_comma_list(&symptoms_text),
        treatments: split_comma_list(&treatments_text),
        symptoms_text,
        treatments_text,
        contagious: parse_int_flag(row, "contagious")?,
        chronic: parse_int_flag(row, "chronic")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    record.validate()?;
    Ok(record)
}

fn parse_int_flag(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in diseases.{column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
