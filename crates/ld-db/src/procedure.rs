//! Stored-procedure executor.
//!
//! Procedures are PostgreSQL functions invoked as `SELECT * FROM proc($1..)`
//! with a fixed positional parameter list; caller and procedure must agree
//! on parameter count and order. Result columns are lower-cased so
//! downstream consumers are case-insensitive, and a binary `versionid`
//! column gets a `version_hex` text twin attached so the stamp can
//! round-trip through JSON and back into a binary parameter on the next
//! write.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Postgres, Row, TypeInfo};

use crate::error::{DbError, DbResult};
use ld_core::status::DbStatus;

/// Positional procedure parameter. Every variant carries an `Option` so
/// NULLs stay typed; Postgres needs the parameter type even when the value
/// is absent.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcParam {
    Bool(Option<bool>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Decimal(Option<Decimal>),
    Text(Option<String>),
    Date(Option<NaiveDate>),
    Bytes(Option<Vec<u8>>),
}

impl ProcParam {
    pub fn bool(v: bool) -> Self {
        ProcParam::Bool(Some(v))
    }

    pub fn int(v: i32) -> Self {
        ProcParam::Int(Some(v))
    }

    pub fn bigint(v: i64) -> Self {
        ProcParam::BigInt(Some(v))
    }

    pub fn decimal(v: Decimal) -> Self {
        ProcParam::Decimal(Some(v))
    }

    pub fn text(v: impl Into<String>) -> Self {
        ProcParam::Text(Some(v.into()))
    }

    pub fn opt_text(v: Option<impl Into<String>>) -> Self {
        ProcParam::Text(v.map(Into::into))
    }

    pub fn date(v: NaiveDate) -> Self {
        ProcParam::Date(Some(v))
    }

    pub fn bytes(v: Vec<u8>) -> Self {
        ProcParam::Bytes(Some(v))
    }

    fn bind<'q>(
        &self,
        query: Query<'q, Postgres, PgArguments>,
    ) -> Query<'q, Postgres, PgArguments> {
        match self {
            ProcParam::Bool(v) => query.bind(*v),
            ProcParam::Int(v) => query.bind(*v),
            ProcParam::BigInt(v) => query.bind(*v),
            ProcParam::Decimal(v) => query.bind(*v),
            ProcParam::Text(v) => query.bind(v.clone()),
            ProcParam::Date(v) => query.bind(*v),
            ProcParam::Bytes(v) => query.bind(v.clone()),
        }
    }
}

/// A single result-set value.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcValue {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
}

impl ProcValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ProcValue::Null)
    }
}

/// One result row: lower-cased column name -> value, in column order.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, ProcValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: ProcValue) {
        self.fields.push((name.into().to_lowercase(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ProcValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            ProcValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get_i64(name).and_then(|v| i32::try_from(v).ok())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            ProcValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            ProcValue::Bool(v) => Some(*v),
            // Procedures ported from SQL Server report flags as 0/1.
            ProcValue::Int(v) => Some(*v != 0),
            _ => None,
        }
    }

    pub fn get_decimal(&self, name: &str) -> Option<Decimal> {
        match self.get(name)? {
            ProcValue::Decimal(v) => Some(*v),
            ProcValue::Int(v) => Some(Decimal::from(*v)),
            _ => None,
        }
    }

    pub fn get_date(&self, name: &str) -> Option<NaiveDate> {
        match self.get(name)? {
            ProcValue::Date(v) => Some(*v),
            ProcValue::Timestamp(v) => Some(v.date_naive()),
            _ => None,
        }
    }

    pub fn get_bytes(&self, name: &str) -> Option<&[u8]> {
        match self.get(name)? {
            ProcValue::Bytes(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    fn from_pg_row(row: &PgRow, proc: &'static str) -> DbResult<Self> {
        let mut record = Record::new();
        for (i, column) in row.columns().iter().enumerate() {
            let value = decode_value(row, i, column.type_info().name()).map_err(|e| {
                DbError::Contract {
                    proc,
                    detail: format!("column {}: {e}", column.name()),
                }
            })?;
            record.push(column.name(), value);
        }
        record.attach_version_hex();
        Ok(record)
    }

    /// Attach a `version_hex` text twin next to a binary `versionid`
    /// column, if present and non-empty.
    fn attach_version_hex(&mut self) {
        let encoded = match self.get("versionid") {
            Some(ProcValue::Bytes(bytes)) if !bytes.is_empty() => hex::encode(bytes),
            _ => return,
        };
        self.push("version_hex", ProcValue::Text(encoded));
    }
}

fn decode_value(row: &PgRow, index: usize, type_name: &str) -> Result<ProcValue, sqlx::Error> {
    let value = match type_name {
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)?
            .map_or(ProcValue::Null, ProcValue::Bool),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)?
            .map_or(ProcValue::Null, |v| ProcValue::Int(i64::from(v))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)?
            .map_or(ProcValue::Null, |v| ProcValue::Int(i64::from(v))),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)?
            .map_or(ProcValue::Null, ProcValue::Int),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)?
            .map_or(ProcValue::Null, ProcValue::Decimal),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)?
            .and_then(|v| Decimal::from_f64_retain(f64::from(v)))
            .map_or(ProcValue::Null, ProcValue::Decimal),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)?
            .and_then(Decimal::from_f64_retain)
            .map_or(ProcValue::Null, ProcValue::Decimal),
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)?
            .map_or(ProcValue::Null, ProcValue::Text),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map_or(ProcValue::Null, ProcValue::Date),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map_or(ProcValue::Null, |v| {
                ProcValue::Timestamp(DateTime::from_naive_utc_and_offset(v, Utc))
            }),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map_or(ProcValue::Null, ProcValue::Timestamp),
        "BYTEA" => row
            .try_get::<Option<Vec<u8>>, _>(index)?
            .map_or(ProcValue::Null, ProcValue::Bytes),
        // Unrecognized types degrade to their text form where the driver
        // allows it, NULL otherwise.
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map_or(ProcValue::Null, ProcValue::Text),
    };
    Ok(value)
}

/// Non-query outcome: a generic success envelope when the procedure yields
/// no rows, or its first row reinterpreted as a status envelope.
#[derive(Debug, Clone)]
pub struct StatusEnvelope {
    pub code: i32,
    pub message: String,
    /// The full status row, for procedures that return extra columns
    /// (e.g. `new_id`).
    pub record: Option<Record>,
}

impl StatusEnvelope {
    pub fn success() -> Self {
        Self {
            code: DbStatus::SUCCESS,
            message: DbStatus::Success.message(),
            record: None,
        }
    }

    pub fn is_success(&self) -> bool {
        DbStatus::from_code(self.code).is_success()
    }

    fn from_record(record: Record, proc: &'static str) -> DbResult<Self> {
        let code = record
            .get_i64("code")
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| DbError::Contract {
                proc,
                detail: "status row is missing an integer `code` column".into(),
            })?;
        let message = record
            .get_str("message")
            .map(str::to_owned)
            .unwrap_or_else(|| DbStatus::from_code(code).message());
        Ok(Self {
            code,
            message,
            record: Some(record),
        })
    }
}

/// Scan row groups in order and yield the first non-empty one.
///
/// Wrapper procedures that emulate the legacy multi-result-set behavior
/// (an empty status set followed by a data set) return their groups in
/// declaration order; only the first group with rows is meaningful.
pub fn first_non_empty<T>(groups: Vec<Vec<T>>) -> Vec<T> {
    groups
        .into_iter()
        .find(|group| !group.is_empty())
        .unwrap_or_default()
}

/// Executes stored procedures against the pool. Cheap to clone.
#[derive(Clone)]
pub struct ProcedureExecutor {
    pool: PgPool,
}

impl ProcedureExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Execute a procedure and return every row of its result set.
    pub async fn fetch_rows(
        &self,
        proc: &'static str,
        params: &[ProcParam],
    ) -> DbResult<Vec<Record>> {
        let sql = call_sql(proc, params.len());
        let mut query = sqlx::query(&sql);
        for param in params {
            query = param.bind(query);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|source| DbError::Execute { proc, source })?;

        rows.iter()
            .map(|row| Record::from_pg_row(row, proc))
            .collect()
    }

    /// Execute a procedure and return the first row, if any.
    pub async fn fetch_one(
        &self,
        proc: &'static str,
        params: &[ProcParam],
    ) -> DbResult<Option<Record>> {
        let rows = self.fetch_rows(proc, params).await?;
        Ok(rows.into_iter().next())
    }

    /// Non-query convenience path for mutation procedures.
    pub async fn execute(
        &self,
        proc: &'static str,
        params: &[ProcParam],
    ) -> DbResult<StatusEnvelope> {
        match self.fetch_one(proc, params).await? {
            Some(record) => StatusEnvelope::from_record(record, proc),
            None => Ok(StatusEnvelope::success()),
        }
    }
}

/// `proc` is always one of the compile-time procedure names declared by the
/// repositories; parameters are only ever passed through bind placeholders.
fn call_sql(proc: &str, param_count: usize) -> String {
    let placeholders = (1..=param_count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT * FROM {proc}({placeholders})")
}
