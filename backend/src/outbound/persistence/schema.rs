//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the SQL in `migrations/` exactly; Diesel
//! uses them for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` after changing the
//! migrations.

diesel::table! {
    /// User accounts with credentials and the favorite-id array.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login email, lower-cased, unique.
        email -> Varchar,
        /// Hex-encoded SHA-256 digest of the password.
        password_digest -> Varchar,
        /// Favorite recipe ids; mutated with atomic array operations.
        favorites -> Array<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User-authored recipes.
    recipes (id) {
        /// Primary key: UUID v4 identifier, assigned at creation.
        id -> Uuid,
        /// Display title.
        title -> Varchar,
        /// Ordered ingredient lines.
        ingredients -> Array<Text>,
        /// Ordered preparation steps.
        steps -> Array<Text>,
        /// Lower-cased tags.
        tags -> Array<Text>,
        /// Creating user's id.
        creator_id -> Uuid,
        /// Creation timestamp, immutable across edits.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Singleton usage-counter record.
    app_stats (stat_id) {
        /// Fixed key of the singleton row.
        stat_id -> Varchar,
        /// Number of searches executed.
        search_count -> Int8,
        /// Number of add-to-favorites events.
        favorite_count -> Int8,
    }
}
