//! Data model shared by the batchview client
//!
//! A [`Row`] is one client record as returned by the data endpoint. Every field
//! is optional: a missing field is `None`, which is distinct from an empty
//! string and renders as [`PLACEHOLDER`].

use crate::error::{ModelError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rendered in place of a missing field value.
pub const PLACEHOLDER: &str = "-";

// ============================================================================
// Batch identifier
// ============================================================================

/// Opaque identifier the server assigns to one processed upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BatchId(String);

impl BatchId {
    /// Create a batch id, rejecting empty or whitespace-only values
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::EmptyBatchId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BatchId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for BatchId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BatchId> for String {
    fn from(id: BatchId) -> Self {
        id.0
    }
}

impl AsRef<str> for BatchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Upload progress
// ============================================================================

/// Integer percentage of bytes transferred during the init step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UploadProgress(u8);

impl UploadProgress {
    pub const ZERO: Self = Self(0);
    pub const COMPLETE: Self = Self(100);

    /// Round `sent / total` to the nearest whole percent.
    ///
    /// A zero-byte transfer counts as complete, and `sent` beyond `total`
    /// is clamped to 100.
    pub fn from_ratio(sent: u64, total: u64) -> Self {
        if total == 0 || sent >= total {
            return Self::COMPLETE;
        }
        let sent = u128::from(sent);
        let total = u128::from(total);
        let percent = (sent * 100 + total / 2) / total;
        // percent <= 100 because sent < total
        Self(percent as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 == 100
    }
}

impl TryFrom<u32> for UploadProgress {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
            .ok_or(ModelError::ProgressOutOfRange(value))
    }
}

impl fmt::Display for UploadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ============================================================================
// Row
// ============================================================================

/// One client record.
///
/// Wire names follow the data endpoint. Scalar values that are not strings
/// (numbers, booleans) are kept as their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "codigo_cliente", default, deserialize_with = "lenient_string")]
    pub client_code: Option<String>,

    #[serde(rename = "nombre_completo", default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,

    #[serde(rename = "fecha_nacimiento", default, deserialize_with = "lenient_string")]
    pub birth_date: Option<String>,

    #[serde(rename = "direccion", default, deserialize_with = "lenient_string")]
    pub address: Option<String>,

    #[serde(rename = "localidad_cp", default, deserialize_with = "lenient_string")]
    pub locality: Option<String>,

    #[serde(rename = "telefono", default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,

    #[serde(rename = "fecha_alta", default, deserialize_with = "lenient_string")]
    pub registered_at: Option<String>,

    #[serde(rename = "grupo_clientes", default, deserialize_with = "lenient_string")]
    pub client_group: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub batch_id: Option<String>,
}

/// The displayable columns of a [`Row`], in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    ClientCode,
    FullName,
    BirthDate,
    Address,
    Locality,
    Phone,
    Email,
    RegisteredAt,
    ClientGroup,
}

impl RowField {
    pub const ALL: [RowField; 9] = [
        RowField::ClientCode,
        RowField::FullName,
        RowField::BirthDate,
        RowField::Address,
        RowField::Locality,
        RowField::Phone,
        RowField::Email,
        RowField::RegisteredAt,
        RowField::ClientGroup,
    ];

    /// Column header
    pub fn label(self) -> &'static str {
        match self {
            RowField::ClientCode => "Code",
            RowField::FullName => "Name",
            RowField::BirthDate => "Born",
            RowField::Address => "Address",
            RowField::Locality => "Locality",
            RowField::Phone => "Phone",
            RowField::Email => "Email",
            RowField::RegisteredAt => "Registered",
            RowField::ClientGroup => "Group",
        }
    }
}

impl Row {
    pub fn get(&self, field: RowField) -> Option<&str> {
        let value = match field {
            RowField::ClientCode => &self.client_code,
            RowField::FullName => &self.full_name,
            RowField::BirthDate => &self.birth_date,
            RowField::Address => &self.address,
            RowField::Locality => &self.locality,
            RowField::Phone => &self.phone,
            RowField::Email => &self.email,
            RowField::RegisteredAt => &self.registered_at,
            RowField::ClientGroup => &self.client_group,
        };
        value.as_deref()
    }

    /// Field value for display, [`PLACEHOLDER`] when absent
    pub fn display(&self, field: RowField) -> &str {
        self.get(field).unwrap_or(PLACEHOLDER)
    }

    /// All displayable values in [`RowField::ALL`] order
    pub fn cells(&self) -> Vec<String> {
        RowField::ALL
            .iter()
            .map(|f| self.display(*f).to_string())
            .collect()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a scalar field value, got {}",
            other
        ))),
    }
}
