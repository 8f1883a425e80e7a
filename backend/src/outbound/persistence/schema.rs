//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after a migration changes the table.

diesel::table! {
    /// Points of sale.
    ///
    /// `name` carries the `pos_name_key` unique constraint.
    pos (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Display name, unique across all rows.
        name -> Varchar,
        /// Free text, empty when unknown.
        description -> Text,
        /// `PosType` label such as `CAFE`.
        pos_type -> Varchar,
        /// `CampusType` label such as `ALTSTADT`.
        campus -> Varchar,
        /// Street name.
        street -> Varchar,
        /// House number, kept as text for suffixes like `3a`.
        house_number -> Varchar,
        /// Numeric postal code.
        postal_code -> Int4,
        /// City name.
        city -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
