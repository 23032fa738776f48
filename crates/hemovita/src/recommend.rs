//! Food recommendations for flagged nutrients.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::resolve::NutrientFlag;
use crate::tables::{DietFilter, FoodCatalog};

/// Maximum food suggestions returned per nutrient.
pub const MAX_FOODS_PER_NUTRIENT: usize = 5;

/// A recommended food source as it appears in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPick {
    /// Food name.
    pub name: String,
    /// Typical serving in grams, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_g: Option<f64>,
    /// Broad food group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Selects diet-compatible food sources for flagged nutrients.
#[derive(Debug, Clone, Default)]
pub struct FoodRecommender;

impl FoodRecommender {
    pub fn new() -> Self {
        Self
    }

    /// Recommend foods for every flagged nutrient.
    ///
    /// Every flagged nutrient appears in the output, with an empty list when
    /// nothing in the catalog survives the diet filter, so callers can render
    /// a "no match" entry instead of silently dropping the nutrient.
    pub fn recommend(
        &self,
        flags: &[NutrientFlag],
        catalog: &FoodCatalog,
        diet: Option<DietFilter>,
    ) -> IndexMap<String, Vec<FoodPick>> {
        let mut out = IndexMap::new();

        for flag in flags {
            let mut candidates: Vec<_> = catalog
                .foods_for(&flag.nutrient)
                .iter()
                .filter(|item| item.diet.allowed_under(diet))
                .collect();
            candidates.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.name.cmp(&b.name)));

            let picks = candidates
                .into_iter()
                .take(MAX_FOODS_PER_NUTRIENT)
                .map(|item| FoodPick {
                    name: item.name.clone(),
                    serving_g: item.serving_g,
                    category: item.category.clone(),
                })
                .collect();
            out.insert(flag.nutrient.clone(), picks);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(nutrient: &str) -> NutrientFlag {
        NutrientFlag {
            nutrient: nutrient.to_string(),
            strength: 1,
            markers: Vec::new(),
        }
    }

    #[test]
    fn test_top_n_cap_and_rank_order() {
        let recommender = FoodRecommender::new();
        let catalog = FoodCatalog::builtin();

        let foods = recommender.recommend(&[flag("iron")], &catalog, None);
        let iron = &foods["iron"];
        assert_eq!(iron.len(), MAX_FOODS_PER_NUTRIENT);
        assert_eq!(iron[0].name, "Beef liver");
        assert_eq!(iron[1].name, "Oysters");
    }

    #[test]
    fn test_vegan_filter_excludes_animal_foods() {
        let recommender = FoodRecommender::new();
        let catalog = FoodCatalog::builtin();

        let foods = recommender.recommend(&[flag("iron")], &catalog, Some(DietFilter::Vegan));
        let iron = &foods["iron"];
        assert!(!iron.is_empty());
        assert!(iron.iter().all(|f| f.name != "Beef liver" && f.name != "Oysters"));
        assert_eq!(iron[0].name, "Lentils");
    }

    #[test]
    fn test_empty_result_keeps_nutrient_key() {
        let recommender = FoodRecommender::new();
        let catalog = FoodCatalog::empty();

        let foods = recommender.recommend(&[flag("iron")], &catalog, None);
        assert_eq!(foods.len(), 1);
        assert!(foods["iron"].is_empty());
    }

    #[test]
    fn test_pescatarian_includes_seafood_excludes_meat() {
        let recommender = FoodRecommender::new();
        let catalog = FoodCatalog::builtin();

        let foods =
            recommender.recommend(&[flag("vitamin_B12")], &catalog, Some(DietFilter::Pescatarian));
        let b12 = &foods["vitamin_B12"];
        assert!(b12.iter().any(|f| f.name == "Clams"));
        assert!(b12.iter().all(|f| f.name != "Beef liver"));
    }
}
