use anyhow::Result;

use freshkeep_recipe::match_recipes;

/// Recipes whose ingredient list mentions the given ingredient, easiest
/// and fastest first. No match is an empty list, not an error.
#[tracing::instrument]
pub fn recipes(ingredient: &str) -> Result<String> {
    let matched = match_recipes(ingredient);

    Ok(serde_json::to_string_pretty(&matched)?)
}
