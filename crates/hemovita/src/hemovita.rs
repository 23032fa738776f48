//! The top-level report engine.

use std::path::Path;

use crate::classify::MarkerClassifier;
use crate::error::Result;
use crate::recommend::FoodRecommender;
use crate::report::{Report, ReportComposer};
use crate::request::ReportRequest;
use crate::resolve::DeficiencyResolver;
use crate::schedule::annotate::InteractionAnnotator;
use crate::schedule::SupplementScheduler;
use crate::tables::{FoodCatalog, InteractionRuleTable, ReferenceRangeTable};

/// Immutable engine configuration: the rule tables the pipeline evaluates
/// against. Built once at startup; table loading is the only fatal failure
/// in the engine.
#[derive(Debug, Clone)]
pub struct HemovitaConfig {
    pub reference: ReferenceRangeTable,
    pub interactions: InteractionRuleTable,
    pub foods: FoodCatalog,
    pub resolver: DeficiencyResolver,
}

impl Default for HemovitaConfig {
    fn default() -> Self {
        Self {
            reference: ReferenceRangeTable::builtin(),
            interactions: InteractionRuleTable::builtin(),
            foods: FoodCatalog::builtin(),
            resolver: DeficiencyResolver::builtin(),
        }
    }
}

impl HemovitaConfig {
    /// Load tables from a directory of CSV files, falling back to the
    /// built-in table for any file that is absent.
    ///
    /// Expected file names: `reference_ranges.csv`, `interactions.csv`,
    /// `foods.csv`. A present-but-malformed file is a fatal error.
    pub fn from_csv_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        let reference_path = dir.join("reference_ranges.csv");
        let reference = if reference_path.exists() {
            ReferenceRangeTable::from_csv(&reference_path)?
        } else {
            ReferenceRangeTable::builtin()
        };

        let interactions_path = dir.join("interactions.csv");
        let interactions = if interactions_path.exists() {
            InteractionRuleTable::from_csv(&interactions_path)?
        } else {
            InteractionRuleTable::builtin()
        };

        let foods_path = dir.join("foods.csv");
        let foods = if foods_path.exists() {
            FoodCatalog::from_csv(&foods_path)?
        } else {
            FoodCatalog::builtin()
        };

        Ok(Self {
            reference,
            interactions,
            foods,
            resolver: DeficiencyResolver::builtin(),
        })
    }
}

/// The report engine: classification, resolution, scheduling, food
/// recommendation, and narrative composition behind one call.
///
/// All state is immutable after construction, so a single instance can be
/// shared across threads (`&self` everywhere, `Send + Sync`). Report
/// generation is a pure function of the request and the configured tables;
/// identical requests always produce byte-identical reports.
#[derive(Debug, Clone)]
pub struct Hemovita {
    config: HemovitaConfig,
    classifier: MarkerClassifier,
    scheduler: SupplementScheduler,
    annotator: InteractionAnnotator,
    recommender: FoodRecommender,
    composer: ReportComposer,
}

impl Default for Hemovita {
    fn default() -> Self {
        Self::new()
    }
}

impl Hemovita {
    /// Create an engine with the built-in tables.
    pub fn new() -> Self {
        Self::with_config(HemovitaConfig::default())
    }

    /// Create an engine with explicit tables.
    pub fn with_config(config: HemovitaConfig) -> Self {
        Self {
            config,
            classifier: MarkerClassifier::new(),
            scheduler: SupplementScheduler::new(),
            annotator: InteractionAnnotator::new(),
            recommender: FoodRecommender::new(),
            composer: ReportComposer::new(),
        }
    }

    /// Get the configured reference range table.
    pub fn reference(&self) -> &ReferenceRangeTable {
        &self.config.reference
    }

    /// Get the configured interaction rule table.
    pub fn interactions(&self) -> &InteractionRuleTable {
        &self.config.interactions
    }

    /// Run the full pipeline for one request.
    ///
    /// Unknown markers, missing values, and empty panels are all handled
    /// in-band (unknown labels, empty sections); this never fails.
    pub fn report(&self, request: &ReportRequest) -> Report {
        let labels = self
            .classifier
            .classify_panel(&self.config.reference, &request.labs);

        let flags = self.config.resolver.resolve(&labels);

        let (plan, trace) = self.scheduler.schedule(&flags, &self.config.interactions);

        let notes = self
            .annotator
            .annotate(&trace, &self.config.interactions, !flags.is_empty());

        let foods = self
            .recommender
            .recommend(&flags, &self.config.foods, request.diet_filter);

        self.composer.compose(
            request,
            &self.config.reference,
            labels,
            plan,
            foods,
            notes,
        )
    }
}
