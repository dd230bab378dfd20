//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{app_stats, recipes, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_digest: String,
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow {
    pub id: Uuid,
    pub email: String,
    pub password_digest: String,
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the recipes table. Doubles as the insertable
/// form since every column is written at creation.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Changeset for replacing a recipe's editable content. Identity, creator,
/// and creation timestamp are deliberately absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = recipes)]
pub(crate) struct RecipeContentUpdate {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub tags: Vec<String>,
}

/// Row struct for the singleton stats record.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = app_stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StatsRow {
    pub stat_id: String,
    pub search_count: i64,
    pub favorite_count: i64,
}
