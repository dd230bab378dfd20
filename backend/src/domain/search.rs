//! Recipe search and filtering.
//!
//! The filter is a pure function over an in-memory recipe list so it can be
//! unit-tested without touching a repository. Matching rules:
//!
//! - ingredient terms: a recipe matches when at least one term is a
//!   case-insensitive substring of at least one of its ingredients (OR
//!   across terms, OR across ingredients);
//! - tags: a recipe matches when its tag set contains every selected tag
//!   (AND across tags);
//! - output order preserves input order (stable filter, no re-sort).
//!
//! A query with neither terms nor tags is invalid and must be rejected
//! before the filter runs.

use std::fmt;

use super::recipe::{Recipe, Tag};

/// Validation errors raised while building a [`SearchQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchValidationError {
    /// Neither ingredient terms nor tags were supplied.
    EmptyQuery,
    /// A selected tag was blank.
    EmptyTag,
}

impl fmt::Display for SearchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => {
                write!(f, "enter at least one ingredient or select a tag")
            }
            Self::EmptyTag => write!(f, "tags must not be empty"),
        }
    }
}

impl std::error::Error for SearchValidationError {}

/// Validated search input: free-text ingredient terms and selected tags.
///
/// Terms are trimmed, blank entries dropped, and lower-cased once at
/// construction so the per-recipe match is a plain substring test.
///
/// # Examples
/// ```
/// use backend::domain::SearchQuery;
///
/// let query = SearchQuery::try_new(vec!["Chicken".into()], vec![]).expect("valid");
/// assert_eq!(
///     query.ingredient_terms().first().map(String::as_str),
///     Some("chicken"),
/// );
/// assert!(SearchQuery::try_new(vec![], vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
    tags: Vec<Tag>,
}

impl SearchQuery {
    /// Normalise and validate raw search input.
    pub fn try_new(
        ingredient_terms: Vec<String>,
        tags: Vec<String>,
    ) -> Result<Self, SearchValidationError> {
        let terms: Vec<String> = ingredient_terms
            .into_iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        let tags = tags
            .into_iter()
            .map(Tag::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| SearchValidationError::EmptyTag)?;

        if terms.is_empty() && tags.is_empty() {
            return Err(SearchValidationError::EmptyQuery);
        }

        Ok(Self { terms, tags })
    }

    /// Lower-cased ingredient terms.
    pub fn ingredient_terms(&self) -> &[String] {
        self.terms.as_slice()
    }

    /// Selected tags.
    pub fn tags(&self) -> &[Tag] {
        self.tags.as_slice()
    }

    /// Whether a single recipe satisfies this query.
    ///
    /// A recipe with no ingredients never matches a non-empty ingredient
    /// filter.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let ingredient_match = self.terms.is_empty()
            || self.terms.iter().any(|term| {
                recipe
                    .ingredients
                    .iter()
                    .any(|ingredient| ingredient.to_lowercase().contains(term))
            });

        let tag_match = self.tags.iter().all(|tag| recipe.tags.contains(tag));

        ingredient_match && tag_match
    }
}

/// Filter a recipe list, preserving input order.
pub fn filter_recipes(recipes: Vec<Recipe>, query: &SearchQuery) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(|recipe| query.matches(recipe))
        .collect()
}
