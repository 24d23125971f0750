//! SQLite-backed marketplace store
//!
//! Skills and embeddings are stored as JSON text, money and percentages as
//! decimal text, timestamps as unix seconds.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, types::ValueRef, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use talent_core::{
    EmbeddingVector, FreelancerProfile, JobListing, JobStatus, TalentError, TalentResult, UserRole,
};
use tracing::warn;

use super::MarketplaceStore;

const JOB_COLUMNS: &str = "id, client_id, title, description, required_skills, budget_min, \
     budget_max, status, embedding, created_at";

const PROFILE_COLUMNS: &str = "user_id, role, display_name, bio, skills, hourly_rate, \
     experience_years, success_rate, average_rating, total_reviews, embedding";

/// Marketplace store over a single SQLite connection
pub struct SqliteMarketplaceStore {
    conn: Mutex<Connection>,
}

impl SqliteMarketplaceStore {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open<P: AsRef<Path>>(db_path: P) -> TalentResult<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    TalentError::storage(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(db_path).map_err(storage_error)?;
        Self::from_connection(conn)
    }

    /// In-memory store (useful for testing)
    pub fn open_in_memory() -> TalentResult<Self> {
        let conn = Connection::open_in_memory().map_err(storage_error)?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> TalentResult<Self> {
        init_schema(&conn).map_err(storage_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with the locked connection
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> TalentResult<T> {
        let conn = self.conn.lock();
        f(&conn).map_err(storage_error)
    }
}

/// Create tables and indexes if they don't exist
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY,
            client_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            required_skills TEXT NOT NULL DEFAULT '[]',
            budget_min TEXT,
            budget_max TEXT,
            status TEXT NOT NULL DEFAULT 'open',
            embedding TEXT,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_jobs_status_created
        ON jobs(status, created_at);

        CREATE TABLE IF NOT EXISTS profiles (
            user_id INTEGER PRIMARY KEY,
            role TEXT NOT NULL DEFAULT 'freelancer',
            display_name TEXT,
            bio TEXT,
            skills TEXT NOT NULL DEFAULT '[]',
            hourly_rate TEXT,
            experience_years INTEGER,
            success_rate TEXT,
            average_rating TEXT,
            total_reviews INTEGER NOT NULL DEFAULT 0,
            embedding TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_profiles_role
        ON profiles(role);

        CREATE TABLE IF NOT EXISTS applications (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id INTEGER NOT NULL,
            freelancer_id INTEGER NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            UNIQUE(job_id, freelancer_id)
        );

        CREATE INDEX IF NOT EXISTS idx_applications_freelancer
        ON applications(freelancer_id);
        "#,
    )
}

fn storage_error(e: rusqlite::Error) -> TalentError {
    TalentError::storage(e.to_string())
}

/// Decimal column that may hold text, a real or an integer
fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::try_from(f).ok(),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| Decimal::from_str(s.trim()).ok()),
        ValueRef::Blob(_) => None,
    })
}

fn parse_skills(raw: &str, owner: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Malformed skills JSON for {}: {}", owner, e);
        Vec::new()
    })
}

fn parse_embedding(raw: Option<String>, owner: &str) -> Option<EmbeddingVector> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<EmbeddingVector>(&raw) {
        Ok(vector) if !vector.is_empty() => Some(vector),
        Ok(_) => None,
        Err(e) => {
            warn!("Malformed stored embedding for {}: {}", owner, e);
            None
        }
    }
}

fn job_from_row(row: &Row<'_>) -> rusqlite::Result<JobListing> {
    let id: i64 = row.get(0)?;
    let owner = format!("job {}", id);
    let skills: String = row.get(4)?;
    let status: String = row.get(7)?;
    let created_at: i64 = row.get(9)?;

    Ok(JobListing {
        id,
        client_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        required_skills: parse_skills(&skills, &owner),
        budget_min: decimal_column(row, 5)?,
        budget_max: decimal_column(row, 6)?,
        status: JobStatus::parse(&status).unwrap_or_else(|| {
            warn!("Unknown status {:?} for {}", status, owner);
            JobStatus::Cancelled
        }),
        embedding: parse_embedding(row.get(8)?, &owner),
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_else(Utc::now),
    })
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<FreelancerProfile> {
    let user_id: i64 = row.get(0)?;
    let owner = format!("profile {}", user_id);
    let role: String = row.get(1)?;
    let skills: String = row.get(4)?;
    let experience_years: Option<i64> = row.get(6)?;
    let total_reviews: i64 = row.get(9)?;

    Ok(FreelancerProfile {
        user_id,
        role: UserRole::parse(&role).unwrap_or_else(|| {
            warn!("Unknown role {:?} for {}", role, owner);
            UserRole::Client
        }),
        display_name: row.get(2)?,
        bio: row.get(3)?,
        skills: parse_skills(&skills, &owner),
        hourly_rate: decimal_column(row, 5)?,
        experience_years: experience_years.and_then(|y| u32::try_from(y).ok()),
        success_rate: decimal_column(row, 7)?,
        average_rating: decimal_column(row, 8)?,
        total_reviews: u32::try_from(total_reviews.max(0)).unwrap_or(u32::MAX),
        embedding: parse_embedding(row.get(10)?, &owner),
    })
}

fn sql_limit(pool_limit: usize) -> i64 {
    i64::try_from(pool_limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl MarketplaceStore for SqliteMarketplaceStore {
    async fn find_job_by_id(&self, job_id: i64) -> TalentResult<Option<JobListing>> {
        self.with_connection(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM jobs WHERE id = ?1", JOB_COLUMNS),
                params![job_id],
                job_from_row,
            )
            .optional()
        })
    }

    async fn find_open_jobs_excluding(
        &self,
        excluded_job_ids: &[i64],
        pool_limit: usize,
    ) -> TalentResult<Vec<JobListing>> {
        let exclusion = if excluded_job_ids.is_empty() {
            String::new()
        } else {
            let placeholders = vec!["?"; excluded_job_ids.len()].join(", ");
            format!(" AND id NOT IN ({})", placeholders)
        };
        let sql = format!(
            "SELECT {} FROM jobs WHERE status = 'open'{} ORDER BY created_at DESC, id DESC LIMIT ?",
            JOB_COLUMNS, exclusion
        );

        let mut values: Vec<i64> = excluded_job_ids.to_vec();
        values.push(sql_limit(pool_limit));

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(values.iter()), job_from_row)?;
            rows.collect()
        })
    }

    async fn find_freelancer_profiles(
        &self,
        pool_limit: usize,
    ) -> TalentResult<Vec<FreelancerProfile>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM profiles WHERE role = 'freelancer' ORDER BY user_id LIMIT ?1",
                PROFILE_COLUMNS
            ))?;
            let rows = stmt.query_map(params![sql_limit(pool_limit)], profile_from_row)?;
            rows.collect()
        })
    }

    async fn find_freelancer_profile_by_user_id(
        &self,
        user_id: i64,
    ) -> TalentResult<Option<FreelancerProfile>> {
        self.with_connection(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM profiles WHERE user_id = ?1", PROFILE_COLUMNS),
                params![user_id],
                profile_from_row,
            )
            .optional()
        })
    }

    async fn find_applied_job_ids(&self, freelancer_id: i64) -> TalentResult<Vec<i64>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT job_id FROM applications WHERE freelancer_id = ?1 ORDER BY job_id",
            )?;
            let rows = stmt.query_map(params![freelancer_id], |row| row.get(0))?;
            rows.collect()
        })
    }

    async fn find_applicant_ids(&self, job_id: i64) -> TalentResult<Vec<i64>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT freelancer_id FROM applications WHERE job_id = ?1 ORDER BY freelancer_id",
            )?;
            let rows = stmt.query_map(params![job_id], |row| row.get(0))?;
            rows.collect()
        })
    }
}
