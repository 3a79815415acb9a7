use crate::catalog;
use crate::types::Recipe;

/// Fallback keyword groups, tried in order. The first group whose key occurs
/// in the queried ingredient name and yields at least one recipe wins.
const INGREDIENT_KEYWORD_GROUPS: &[(&str, &[&str])] = &[
    ("蔬菜", &["生菜", "白菜", "菠菜", "小白菜"]),
    ("肉", &["牛肉", "猪肉", "鸡肉"]),
    ("奶", &["牛奶", "酸奶"]),
    ("蛋", &["鸡蛋", "鸭蛋"]),
    ("面", &["面条", "意面"]),
    ("果", &["苹果", "香蕉", "橙子"]),
];

/// Recipes recommended for an ingredient, easiest first.
///
/// A recipe matches when one of its ingredients contains the queried name or
/// the queried name contains the ingredient. When that yields nothing the
/// keyword groups above are consulted. An unmatched query returns an empty
/// list rather than an error.
pub fn match_recipes(ingredient_name: &str) -> Vec<&'static Recipe> {
    let mut matched: Vec<&'static Recipe> = catalog::all()
        .iter()
        .filter(|recipe| {
            recipe.ingredients.iter().any(|ingredient| {
                ingredient.contains(ingredient_name) || ingredient_name.contains(ingredient.as_str())
            })
        })
        .collect();

    if matched.is_empty() {
        for (key, keywords) in INGREDIENT_KEYWORD_GROUPS {
            if !ingredient_name.contains(key) {
                continue;
            }
            matched = catalog::all()
                .iter()
                .filter(|recipe| {
                    recipe
                        .ingredients
                        .iter()
                        .any(|ingredient| keywords.iter().any(|k| ingredient.contains(k)))
                })
                .collect();
            if !matched.is_empty() {
                break;
            }
        }
    }

    matched.sort_by_key(|recipe| recipe.difficulty.rank());
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn tomato_matches_every_tomato_recipe() {
        let matched = match_recipes("番茄");
        let matched_names = names(&matched);
        for expected in ["番茄意面", "火腿三明治", "蔬菜沙拉", "番茄鸡蛋汤"] {
            assert!(
                matched_names.contains(&expected.to_string()),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn containment_is_bidirectional() {
        // "小番茄" contains the catalog ingredient "番茄".
        let matched = match_recipes("小番茄");
        assert!(!matched.is_empty());
        assert!(names(&matched).contains(&"番茄意面".to_string()));
    }

    #[test]
    fn keyword_group_fallback_for_generic_meat() {
        // No catalog ingredient is exactly "瘦肉", so the 肉 group kicks in.
        let matched = match_recipes("瘦肉");
        assert_eq!(names(&matched), vec!["土豆炖牛肉"]);
    }

    #[test]
    fn keyword_group_fallback_for_dairy() {
        let matched = match_recipes("鲜奶");
        assert_eq!(names(&matched), vec!["香蕉奶昔"]);
    }

    #[test]
    fn easiest_recipes_sort_first() {
        let matched = match_recipes("土豆");
        let matched_names = names(&matched);
        assert_eq!(matched_names, vec!["醋溜土豆丝", "土豆炖牛肉"]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let matched = match_recipes("番茄");
        let easy_names: Vec<String> = matched
            .iter()
            .filter(|r| r.difficulty.rank() == 1)
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(
            easy_names,
            vec!["番茄意面", "火腿三明治", "蔬菜沙拉", "番茄鸡蛋汤"]
        );
    }

    #[test]
    fn unmatched_ingredient_returns_empty() {
        assert!(match_recipes("榴莲").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        // Every ingredient contains the empty string, so all recipes match.
        assert_eq!(match_recipes("").len(), catalog::all().len());
    }
}
