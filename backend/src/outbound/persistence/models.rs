//! Internal Diesel row structs for the `pos` table.
//!
//! These types never leave the persistence layer; conversion to and from
//! [`Pos`] happens here so the repository only moves rows around.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::PosRepositoryError;
use crate::domain::{CampusType, Pos, PosId, PosType};

use super::schema::pos;

/// Row struct for reading from the `pos` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PosRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub pos_type: String,
    pub campus: String,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PosRow> for Pos {
    type Error = PosRepositoryError;

    fn try_from(row: PosRow) -> Result<Self, Self::Error> {
        let corrupted = |detail: String| {
            PosRepositoryError::query(format!("corrupted POS row {}: {detail}", row.id))
        };
        let pos_type = PosType::from_str(&row.pos_type).map_err(|err| corrupted(err.to_string()))?;
        let campus = CampusType::from_str(&row.campus).map_err(|err| corrupted(err.to_string()))?;

        Ok(Self {
            id: Some(PosId::new(row.id)),
            name: row.name,
            description: row.description,
            pos_type,
            campus,
            street: row.street,
            house_number: row.house_number,
            postal_code: row.postal_code,
            city: row.city,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Column values shared by inserts and updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = pos)]
pub(crate) struct PosWrite<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub pos_type: &'static str,
    pub campus: &'static str,
    pub street: &'a str,
    pub house_number: &'a str,
    pub postal_code: i32,
    pub city: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> PosWrite<'a> {
    /// Borrow column values from `pos`, stamping `updated_at`.
    pub fn from_domain(pos: &'a Pos, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: &pos.name,
            description: &pos.description,
            pos_type: pos.pos_type.as_str(),
            campus: pos.campus.as_str(),
            street: &pos.street,
            house_number: &pos.house_number,
            postal_code: pos.postal_code,
            city: &pos.city,
            updated_at,
        }
    }
}

/// Insertable row for new records; `created_at` is set once here.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pos)]
pub(crate) struct NewPosRow<'a> {
    #[diesel(embed)]
    pub columns: PosWrite<'a>,
    pub created_at: DateTime<Utc>,
}
