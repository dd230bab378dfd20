//! Dashboard aggregation over the recipe corpus.
//!
//! Everything here is recomputed from a full scan on each request; there is
//! no incremental maintenance. The functions are pure so they can be tested
//! against literal recipe lists.

use serde::Serialize;

use super::recipe::{Recipe, Tag};
use super::stats::UsageStats;

/// How many top tags the dashboard reports.
pub const TOP_TAGS_LIMIT: usize = 5;

/// How many of the user's most recent recipes the dashboard reports.
pub const RECENT_RECIPES_LIMIT: usize = 5;

/// A tag and the number of recipes carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    /// The tag.
    pub tag: Tag,
    /// Number of recipes carrying the tag.
    pub count: u64,
}

/// Count tag frequency across `recipes` and return the top `limit` tags by
/// count descending.
///
/// Ties are broken by first-encountered order: the sort is stable over the
/// order in which tags first appear while scanning the list.
///
/// # Examples
/// ```
/// use backend::domain::top_tags;
///
/// assert!(top_tags(&[], 5).is_empty());
/// ```
pub fn top_tags(recipes: &[Recipe], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for recipe in recipes {
        for tag in &recipe.tags {
            match counts.iter_mut().find(|entry| entry.tag == *tag) {
                Some(entry) => entry.count += 1,
                None => counts.push(TagCount {
                    tag: tag.clone(),
                    count: 1,
                }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Per-user dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Global usage counters.
    pub stats: UsageStats,
    /// Number of recipes created by the requesting user.
    pub my_recipe_count: u64,
    /// The requesting user's most recent recipes, newest first.
    pub recent_recipes: Vec<Recipe>,
    /// Most frequent tags across all recipes.
    pub top_tags: Vec<TagCount>,
}
