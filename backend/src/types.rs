use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Revelation period of a sura.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevelationType {
    Meccan,
    Medinan,
}

// Custom error for parsing RevelationType from string
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid RevelationType value: {0}")]
pub struct ParseRevelationTypeError(String);

// Implement FromStr to parse strings into RevelationType
impl FromStr for RevelationType {
    type Err = ParseRevelationTypeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Meccan" => Ok(RevelationType::Meccan),
            "Medinan" => Ok(RevelationType::Medinan),
            _ => Err(ParseRevelationTypeError(s.to_string())),
        }
    }
}

impl RevelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevelationType::Meccan => "Meccan",
            RevelationType::Medinan => "Medinan",
        }
    }
}

impl fmt::Display for RevelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical reference descriptor: entity type plus composite key.
///
/// A presentation layer maps these to user-facing locations. The
/// descriptor carries only key fields, never row contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum Reference {
    Sura { number: i32 },
    Aya { sura: i32, number: i32 },
    Translation { id: i32 },
    Root { id: i32 },
    Lemma { id: i32 },
    Word { sura: i32, aya: i32, number: i32 },
}

impl Reference {
    pub fn route(&self) -> &'static str {
        match self {
            Reference::Sura { .. } => "quran_sura",
            Reference::Aya { .. } => "quran_aya",
            Reference::Translation { .. } => "quran_translation",
            Reference::Root { .. } => "quran_root",
            Reference::Lemma { .. } => "quran_lemma",
            Reference::Word { .. } => "quran_word",
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            Reference::Sura { number } => vec![number.to_string()],
            Reference::Aya { sura, number } => {
                vec![sura.to_string(), number.to_string()]
            }
            Reference::Translation { id } => vec![id.to_string()],
            Reference::Root { id } => vec![id.to_string()],
            Reference::Lemma { id } => vec![id.to_string()],
            Reference::Word { sura, aya, number } => {
                vec![sura.to_string(), aya.to_string(), number.to_string()]
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("Can't encode JSON")
    }
}

/// Errors surfaced at the persistence boundary.
///
/// Inserts validate their input before the write reaches SQLite, and
/// database-level constraint failures map back onto the same variants.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("unique constraint violated: {0}")]
    UniquenessViolation(String),

    #[error("required field missing or empty: {0}")]
    RequiredFieldMissing(String),

    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error(transparent)]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for SchemaError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match e {
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                SchemaError::UniquenessViolation(info.message().to_string())
            }
            Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                SchemaError::ForeignKeyViolation(info.message().to_string())
            }
            Error::DatabaseError(DatabaseErrorKind::NotNullViolation, info) => {
                SchemaError::RequiredFieldMissing(info.message().to_string())
            }
            Error::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                SchemaError::InvalidValue {
                    field: "check".to_string(),
                    value: info.message().to_string(),
                }
            }
            other => SchemaError::Database(other),
        }
    }
}
