//! Point-of-sale aggregate and its closed enumerations.
//!
//! A [`Pos`] without an identifier has never been persisted. Identifiers and
//! audit timestamps are assigned by storage adapters only; domain code never
//! fabricates them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned POS identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosId(i64);

impl PosId {
    /// Wrap a raw storage identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw storage identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PosId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PosId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a stored enumeration label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} label: {label}")]
pub struct UnknownLabelError {
    kind: &'static str,
    label: String,
}

/// Kind of point of sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosType {
    /// Coffee shop.
    Cafe,
    /// Self-service vending machine.
    VendingMachine,
    /// Bakery selling coffee.
    Bakery,
    /// University cafeteria.
    Cafeteria,
}

impl PosType {
    /// Stable storage label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cafe => "CAFE",
            Self::VendingMachine => "VENDING_MACHINE",
            Self::Bakery => "BAKERY",
            Self::Cafeteria => "CAFETERIA",
        }
    }
}

impl fmt::Display for PosType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosType {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CAFE" => Ok(Self::Cafe),
            "VENDING_MACHINE" => Ok(Self::VendingMachine),
            "BAKERY" => Ok(Self::Bakery),
            "CAFETERIA" => Ok(Self::Cafeteria),
            other => Err(UnknownLabelError {
                kind: "POS type",
                label: other.to_owned(),
            }),
        }
    }
}

/// Campus area a point of sale belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampusType {
    /// Old town campus.
    Altstadt,
    /// Bergheim campus.
    Bergheim,
    /// Im Neuenheimer Feld campus.
    Inf,
}

impl CampusType {
    /// Stable storage label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Altstadt => "ALTSTADT",
            Self::Bergheim => "BERGHEIM",
            Self::Inf => "INF",
        }
    }
}

impl fmt::Display for CampusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampusType {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ALTSTADT" => Ok(Self::Altstadt),
            "BERGHEIM" => Ok(Self::Bergheim),
            "INF" => Ok(Self::Inf),
            other => Err(UnknownLabelError {
                kind: "campus",
                label: other.to_owned(),
            }),
        }
    }
}

/// Point of sale.
///
/// ## Invariants
/// - `name` is unique across all persisted POS; storage enforces this.
/// - `id`, `created_at` and `updated_at` are `None` until storage assigns them.
///
/// # Examples
/// ```
/// use campus_coffee::domain::{CampusType, Pos, PosType};
///
/// let pos = Pos {
///     id: None,
///     name: "Rada Coffee & Rösterei".to_owned(),
///     description: String::new(),
///     pos_type: PosType::Cafe,
///     campus: CampusType::Altstadt,
///     street: "Untere Straße".to_owned(),
///     house_number: "21".to_owned(),
///     postal_code: 69117,
///     city: "Heidelberg".to_owned(),
///     created_at: None,
///     updated_at: None,
/// };
/// assert!(!pos.is_persisted());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pos {
    /// Storage identifier; absent before the first successful create.
    pub id: Option<PosId>,
    /// Display name.
    pub name: String,
    /// Free-text description; empty when the source had none.
    pub description: String,
    /// Kind of point of sale.
    #[serde(rename = "type")]
    pub pos_type: PosType,
    /// Campus the point of sale belongs to.
    pub campus: CampusType,
    /// Street name.
    pub street: String,
    /// House number, kept verbatim (`21a`, `3-5`).
    pub house_number: String,
    /// Postal code.
    pub postal_code: i32,
    /// City name.
    pub city: String,
    /// Creation timestamp assigned by storage.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp assigned by storage.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pos {
    /// Whether storage has assigned an identifier.
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
