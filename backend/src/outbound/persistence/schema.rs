//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Restaurant documents keyed by restaurant id.
    restaurants (id) {
        id -> Uuid,
        /// Restaurant body without its id, as JSON.
        document -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
