//! Recipe aggregate and its invariants.
//!
//! A recipe is created by exactly one user and is mutable and deletable only
//! by that user. The identifier is assigned at creation and never changes;
//! the creation timestamp is likewise immutable across edits.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Stable recipe identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Validate and construct a [`RecipeId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| RecipeValidationError::InvalidId)
    }

    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`RecipeId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecipeId {
    type Err = RecipeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Validation errors raised while building or editing recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// The id string is empty or not a UUID.
    InvalidId,
    /// Title is empty after trimming.
    EmptyTitle,
    /// No ingredients were supplied.
    NoIngredients,
    /// No steps were supplied.
    NoSteps,
    /// A tag is empty after trimming.
    EmptyTag,
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "recipe id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::NoIngredients => write!(f, "at least one ingredient is required"),
            Self::NoSteps => write!(f, "at least one step is required"),
            Self::EmptyTag => write!(f, "tags must not be empty"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Recipe tag, trimmed and stored lower-cased.
///
/// Lower-casing at the boundary keeps tag comparison and frequency counting
/// a plain equality check everywhere else.
///
/// # Examples
/// ```
/// use backend::domain::Tag;
///
/// let tag = Tag::new(" Vegan ").expect("valid");
/// assert_eq!(tag.as_ref(), "vegan");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Validate and construct a [`Tag`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let candidate = raw.as_ref().trim().to_lowercase();
        if candidate.is_empty() {
            Err(RecipeValidationError::EmptyTag)
        } else {
            Ok(Self(candidate))
        }
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

impl TryFrom<String> for Tag {
    type Error = RecipeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user-authored recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Globally unique, immutable identifier.
    pub id: RecipeId,
    /// Display title.
    pub title: String,
    /// Ordered ingredient lines.
    pub ingredients: Vec<String>,
    /// Ordered preparation steps.
    pub steps: Vec<String>,
    /// Lower-cased tags.
    pub tags: Vec<Tag>,
    /// The creating (and only mutating) user.
    pub creator_id: UserId,
    /// Creation timestamp, immutable across edits.
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Materialise a validated draft into a recipe owned by `creator_id`.
    pub fn from_draft(
        id: RecipeId,
        creator_id: UserId,
        created_at: DateTime<Utc>,
        draft: RecipeDraft,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            ingredients: draft.ingredients,
            steps: draft.steps,
            tags: draft.tags,
            creator_id,
            created_at,
        }
    }
}

/// Validated content of a recipe, without identity or ownership.
///
/// Drafts are what create and edit requests carry: the id, creator, and
/// creation timestamp are never client-supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    title: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    tags: Vec<Tag>,
}

impl RecipeDraft {
    /// Validate raw field values into a draft.
    ///
    /// Rules: title non-empty after trimming; at least one non-blank
    /// ingredient and step; tags trimmed, lower-cased, deduplicated, blank
    /// tags rejected.
    pub fn try_new(
        title: impl Into<String>,
        ingredients: Vec<String>,
        steps: Vec<String>,
        tags: Vec<String>,
    ) -> Result<Self, RecipeValidationError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }

        let ingredients: Vec<String> = ingredients
            .into_iter()
            .map(|line| line.trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect();
        if ingredients.is_empty() {
            return Err(RecipeValidationError::NoIngredients);
        }

        let steps: Vec<String> = steps
            .into_iter()
            .map(|line| line.trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect();
        if steps.is_empty() {
            return Err(RecipeValidationError::NoSteps);
        }

        let mut seen = Vec::new();
        for raw in tags {
            let tag = Tag::new(raw)?;
            if !seen.contains(&tag) {
                seen.push(tag);
            }
        }

        Ok(Self {
            title,
            ingredients,
            steps,
            tags: seen,
        })
    }

    /// Draft title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Draft tags.
    pub fn tags(&self) -> &[Tag] {
        self.tags.as_slice()
    }

    /// Apply this draft to an existing recipe, preserving identity,
    /// ownership, and the creation timestamp.
    pub fn apply_to(self, recipe: &Recipe) -> Recipe {
        Recipe::from_draft(recipe.id, recipe.creator_id, recipe.created_at, self)
    }
}

/// Sort orders for recipe listings.
///
/// Mirrors the listing controls: newest first is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeSort {
    /// Creation timestamp descending.
    #[default]
    Newest,
    /// Creation timestamp ascending.
    Oldest,
    /// Title ascending.
    TitleAsc,
    /// Title descending.
    TitleDesc,
}

impl RecipeSort {
    /// Wire name used in query strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::TitleAsc => "az",
            Self::TitleDesc => "za",
        }
    }

    /// Sort a recipe list in place according to this order.
    pub fn apply(self, recipes: &mut [Recipe]) {
        match self {
            Self::Newest => recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            Self::Oldest => recipes.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            Self::TitleAsc => recipes.sort_by(|a, b| a.title.cmp(&b.title)),
            Self::TitleDesc => recipes.sort_by(|a, b| b.title.cmp(&a.title)),
        }
    }
}

/// Error returned when parsing an unknown sort name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRecipeSortError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseRecipeSortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort order: {}", self.input)
    }
}

impl std::error::Error for ParseRecipeSortError {}

impl std::str::FromStr for RecipeSort {
    type Err = ParseRecipeSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "az" => Ok(Self::TitleAsc),
            "za" => Ok(Self::TitleDesc),
            _ => Err(ParseRecipeSortError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Mutation notification published to change-feed subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RecipeEvent {
    /// A recipe was created.
    Added {
        /// The new recipe.
        recipe: Recipe,
    },
    /// A recipe was edited by its creator.
    Modified {
        /// The recipe after the edit.
        recipe: Recipe,
    },
    /// A recipe was deleted.
    Removed {
        /// Identifier of the deleted recipe.
        recipe_id: RecipeId,
    },
}
