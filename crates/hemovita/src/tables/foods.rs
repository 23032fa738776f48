//! Food catalog.
//!
//! A [`FoodCatalog`] maps each nutrient key to a ranked list of food sources
//! tagged with diet compatibility. The built-in catalog is a curated subset of
//! a USDA-derived food list; lab deployments can load their own with
//! [`FoodCatalog::from_csv`].

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{HemovitaError, Result};
use crate::tables::keys::validate_key;

/// Patient diet preference restricting food recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietFilter {
    Vegan,
    Vegetarian,
    Pescatarian,
}

/// Diet class of a catalog entry.
///
/// Tags form an acceptance chain: vegan foods suit every filter, vegetarian
/// foods suit vegetarians and pescatarians, pescatarian foods suit only
/// pescatarians, and omnivore foods suit only unrestricted diets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietTag {
    Vegan,
    Vegetarian,
    Pescatarian,
    Omnivore,
}

impl DietTag {
    /// Whether a food with this tag is allowed under the given filter.
    pub fn allowed_under(&self, filter: Option<DietFilter>) -> bool {
        match filter {
            None => true,
            Some(DietFilter::Vegan) => matches!(self, DietTag::Vegan),
            Some(DietFilter::Vegetarian) => {
                matches!(self, DietTag::Vegan | DietTag::Vegetarian)
            }
            Some(DietFilter::Pescatarian) => {
                matches!(self, DietTag::Vegan | DietTag::Vegetarian | DietTag::Pescatarian)
            }
        }
    }
}

impl std::str::FromStr for DietTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vegan" => Ok(DietTag::Vegan),
            "vegetarian" => Ok(DietTag::Vegetarian),
            "pescatarian" => Ok(DietTag::Pescatarian),
            "omnivore" => Ok(DietTag::Omnivore),
            _ => Err(format!(
                "Unknown diet tag: {}. Use vegan, vegetarian, pescatarian, or omnivore.",
                s
            )),
        }
    }
}

/// A single food catalog entry for one nutrient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food name (e.g. "Beef liver").
    pub name: String,
    /// Typical serving in grams, when known.
    pub serving_g: Option<f64>,
    /// Broad food group (Meat, Legume, Vegetable, ...).
    pub category: Option<String>,
    /// Diet class of this food.
    pub diet: DietTag,
    /// Nutrient-density rank within its nutrient (1 = densest source).
    pub rank: u32,
}

/// Immutable per-nutrient food catalog.
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    by_nutrient: IndexMap<String, Vec<FoodItem>>,
}

impl FoodCatalog {
    /// Create an empty catalog. Mostly useful in tests.
    pub fn empty() -> Self {
        Self {
            by_nutrient: IndexMap::new(),
        }
    }

    /// Built-in curated catalog covering the built-in nutrient set.
    pub fn builtin() -> Self {
        use DietTag::*;

        // (nutrient, food, category, serving_g, diet, rank)
        let rows: &[(&str, &str, &str, f64, DietTag, u32)] = &[
            ("iron", "Beef liver", "Meat", 85.0, Omnivore, 1),
            ("iron", "Oysters", "Seafood", 85.0, Pescatarian, 2),
            ("iron", "Lentils", "Legume", 100.0, Vegan, 3),
            ("iron", "Spinach", "Vegetable", 90.0, Vegan, 4),
            ("iron", "Tofu", "Legume", 126.0, Vegan, 5),
            ("iron", "Dark chocolate", "Confection", 28.0, Vegan, 6),
            ("vitamin_B12", "Clams", "Seafood", 85.0, Pescatarian, 1),
            ("vitamin_B12", "Beef liver", "Meat", 85.0, Omnivore, 2),
            ("vitamin_B12", "Salmon", "Seafood", 85.0, Pescatarian, 3),
            ("vitamin_B12", "Fortified nutritional yeast", "Fortified", 15.0, Vegan, 4),
            ("vitamin_B12", "Eggs", "Dairy & Eggs", 50.0, Vegetarian, 5),
            ("vitamin_B12", "Milk", "Dairy & Eggs", 244.0, Vegetarian, 6),
            ("folate", "Beef liver", "Meat", 85.0, Omnivore, 1),
            ("folate", "Lentils", "Legume", 100.0, Vegan, 2),
            ("folate", "Spinach", "Vegetable", 90.0, Vegan, 3),
            ("folate", "Asparagus", "Vegetable", 90.0, Vegan, 4),
            ("folate", "Avocado", "Fruit", 100.0, Vegan, 5),
            ("vitamin_D", "Cod liver oil", "Seafood", 5.0, Pescatarian, 1),
            ("vitamin_D", "Salmon", "Seafood", 85.0, Pescatarian, 2),
            ("vitamin_D", "Fortified milk", "Dairy & Eggs", 244.0, Vegetarian, 3),
            ("vitamin_D", "Egg yolk", "Dairy & Eggs", 17.0, Vegetarian, 4),
            ("vitamin_D", "UV-exposed mushrooms", "Vegetable", 70.0, Vegan, 5),
            ("vitamin_A", "Beef liver", "Meat", 85.0, Omnivore, 1),
            ("vitamin_A", "Sweet potato", "Vegetable", 130.0, Vegan, 2),
            ("vitamin_A", "Carrots", "Vegetable", 80.0, Vegan, 3),
            ("vitamin_A", "Butternut squash", "Vegetable", 140.0, Vegan, 4),
            ("vitamin_A", "Spinach", "Vegetable", 90.0, Vegan, 5),
            ("vitamin_E", "Wheat germ oil", "Oil", 14.0, Vegan, 1),
            ("vitamin_E", "Sunflower seeds", "Nuts & Seeds", 28.0, Vegan, 2),
            ("vitamin_E", "Almonds", "Nuts & Seeds", 28.0, Vegan, 3),
            ("vitamin_E", "Hazelnuts", "Nuts & Seeds", 28.0, Vegan, 4),
            ("vitamin_E", "Avocado", "Fruit", 100.0, Vegan, 5),
            ("vitamin_C", "Guava", "Fruit", 55.0, Vegan, 1),
            ("vitamin_C", "Red bell pepper", "Vegetable", 92.0, Vegan, 2),
            ("vitamin_C", "Kiwifruit", "Fruit", 69.0, Vegan, 3),
            ("vitamin_C", "Strawberries", "Fruit", 144.0, Vegan, 4),
            ("vitamin_C", "Broccoli", "Vegetable", 91.0, Vegan, 5),
            ("vitamin_B6", "Chickpeas", "Legume", 164.0, Vegan, 1),
            ("vitamin_B6", "Beef liver", "Meat", 85.0, Omnivore, 2),
            ("vitamin_B6", "Tuna", "Seafood", 85.0, Pescatarian, 3),
            ("vitamin_B6", "Potatoes", "Vegetable", 173.0, Vegan, 4),
            ("vitamin_B6", "Banana", "Fruit", 118.0, Vegan, 5),
            ("magnesium", "Pumpkin seeds", "Nuts & Seeds", 28.0, Vegan, 1),
            ("magnesium", "Almonds", "Nuts & Seeds", 28.0, Vegan, 2),
            ("magnesium", "Spinach", "Vegetable", 90.0, Vegan, 3),
            ("magnesium", "Cashews", "Nuts & Seeds", 28.0, Vegan, 4),
            ("magnesium", "Black beans", "Legume", 86.0, Vegan, 5),
            ("calcium", "Yogurt", "Dairy & Eggs", 245.0, Vegetarian, 1),
            ("calcium", "Milk", "Dairy & Eggs", 244.0, Vegetarian, 2),
            ("calcium", "Sardines", "Seafood", 92.0, Pescatarian, 3),
            ("calcium", "Calcium-set tofu", "Legume", 126.0, Vegan, 4),
            ("calcium", "Kale", "Vegetable", 67.0, Vegan, 5),
            ("calcium", "Fortified soy milk", "Fortified", 243.0, Vegan, 6),
            ("zinc", "Oysters", "Seafood", 85.0, Pescatarian, 1),
            ("zinc", "Beef chuck", "Meat", 85.0, Omnivore, 2),
            ("zinc", "Pumpkin seeds", "Nuts & Seeds", 28.0, Vegan, 3),
            ("zinc", "Cashews", "Nuts & Seeds", 28.0, Vegan, 4),
            ("zinc", "Chickpeas", "Legume", 164.0, Vegan, 5),
        ];

        let mut catalog = Self::empty();
        for (nutrient, name, category, serving_g, diet, rank) in rows {
            catalog
                .insert(
                    nutrient,
                    FoodItem {
                        name: name.to_string(),
                        serving_g: Some(*serving_g),
                        category: Some(category.to_string()),
                        diet: *diet,
                        rank: *rank,
                    },
                )
                .expect("built-in food catalog is valid");
        }
        catalog
    }

    /// Load a food catalog from a CSV file.
    ///
    /// Expected header: `nutrient,food,category,serving_g,diet,rank`.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| HemovitaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let mut catalog = Self::empty();
        for record in reader.deserialize() {
            let row: FoodRow = record?;
            let diet: DietTag = row
                .diet
                .parse()
                .map_err(HemovitaError::Config)?;
            catalog.insert(
                &row.nutrient,
                FoodItem {
                    name: row.food,
                    serving_g: row.serving_g,
                    category: row.category.filter(|c| !c.is_empty()),
                    diet,
                    rank: row.rank,
                },
            )?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, nutrient: &str, item: FoodItem) -> Result<()> {
        validate_key("nutrient", nutrient)?;
        if item.name.trim().is_empty() {
            return Err(HemovitaError::Config(format!(
                "food catalog entry for '{}' has an empty name",
                nutrient
            )));
        }
        if let Some(serving) = item.serving_g {
            if !serving.is_finite() || serving <= 0.0 {
                return Err(HemovitaError::Config(format!(
                    "food '{}' has invalid serving size {}",
                    item.name, serving
                )));
            }
        }
        self.by_nutrient
            .entry(nutrient.to_string())
            .or_default()
            .push(item);
        Ok(())
    }

    /// Foods tagged for a nutrient, in catalog order. Empty for unknown keys.
    pub fn foods_for(&self, nutrient: &str) -> &[FoodItem] {
        self.by_nutrient
            .get(nutrient)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate the nutrient keys covered by the catalog, in catalog order.
    pub fn nutrients(&self) -> impl Iterator<Item = &str> {
        self.by_nutrient.keys().map(String::as_str)
    }

    /// Total number of catalog entries.
    pub fn len(&self) -> usize {
        self.by_nutrient.values().map(Vec::len).sum()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.by_nutrient.is_empty()
    }
}

#[derive(Deserialize)]
struct FoodRow {
    nutrient: String,
    food: String,
    category: Option<String>,
    serving_g: Option<f64>,
    diet: String,
    rank: u32,
}
