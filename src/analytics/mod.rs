//! Analytics engine: aggregate statistics and indexes over a loaded dataset.
//!
//! Everything here is a pure function of the full turn list, recomputed on
//! every load. There is no incremental update path — corpora are thousands of
//! triples, not millions, and full recomputation keeps every view consistent.

pub mod cardinality;
pub mod diversity;
pub mod frequency;
pub mod ontology;
pub mod patterns;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::model::SpeakerTurn;
use crate::store::Dataset;

use cardinality::CardinalityReport;
use diversity::RelationDiversity;
use frequency::{EntityTypeInfo, GlobalStats};
use ontology::OntologyAnalytics;
use patterns::StructuralPattern;

/// All derived statistics for a basic-schema dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub global_stats: GlobalStats,
    /// Every entity type, sorted by occurrence count.
    pub entity_types: Vec<EntityTypeInfo>,
    /// Fixed-threshold tiers over distinct-utterance counts. Together the
    /// three tiers partition `entity_types` exactly.
    pub entity_types_high_freq: Vec<EntityTypeInfo>,
    pub entity_types_medium_freq: Vec<EntityTypeInfo>,
    pub entity_types_low_freq: Vec<EntityTypeInfo>,
    /// Every structural pattern, count-descending.
    pub structural_patterns: Vec<StructuralPattern>,
    pub most_frequent_patterns: Vec<StructuralPattern>,
    pub least_frequent_patterns: Vec<StructuralPattern>,
    /// Occurrences of each semantic relation across all extractions.
    pub relation_frequency: BTreeMap<String, usize>,
    pub cardinality: CardinalityReport,
    pub top_diverse_relations: Vec<RelationDiversity>,
    /// Entity name → sorted list of the ≥2 distinct types it was observed
    /// under. Signals extraction inconsistency, not an error.
    pub multi_typed_entities: BTreeMap<String, Vec<String>>,
    pub subject_only_types: Vec<String>,
    pub object_only_types: Vec<String>,
}

/// Analytics for either schema variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetAnalytics {
    Basic(Analytics),
    Ontology(OntologyAnalytics),
}

/// Compute every derived statistic for a basic-schema dataset.
pub fn analyze(turns: &[SpeakerTurn], config: &ReportConfig) -> Analytics {
    let global_stats = frequency::global_stats(turns);
    let entity_types = frequency::entity_type_frequency(turns);
    let (high, medium, low) = frequency::tier_partition(&entity_types);

    let structural_patterns = patterns::structural_patterns(turns);
    let most_frequent_patterns =
        patterns::most_frequent(&structural_patterns, config.pattern_ranking_count);
    let least_frequent_patterns =
        patterns::least_frequent(&structural_patterns, config.pattern_ranking_count);
    let relation_frequency = patterns::relation_frequency(turns);

    let cardinality = cardinality::classify_relations(turns, &relation_frequency);
    let top_diverse_relations =
        diversity::relation_diversity(turns, config.diverse_relation_count);

    let multi_typed_entities = frequency::multi_typed_entities(turns);
    let (subject_only_types, object_only_types) = frequency::exclusive_role_types(turns);

    tracing::debug!(
        entity_types = entity_types.len(),
        patterns = structural_patterns.len(),
        relations = relation_frequency.len(),
        "analytics recomputed"
    );

    Analytics {
        global_stats,
        entity_types,
        entity_types_high_freq: high,
        entity_types_medium_freq: medium,
        entity_types_low_freq: low,
        structural_patterns,
        most_frequent_patterns,
        least_frequent_patterns,
        relation_frequency,
        cardinality,
        top_diverse_relations,
        multi_typed_entities,
        subject_only_types,
        object_only_types,
    }
}

/// Compute analytics for whichever variant the dataset holds.
pub fn analyze_dataset(dataset: &Dataset, config: &ReportConfig) -> DatasetAnalytics {
    match dataset {
        Dataset::Basic(turns) => DatasetAnalytics::Basic(analyze(turns, config)),
        Dataset::Ontology(turns) => DatasetAnalytics::Ontology(ontology::analyze(turns)),
    }
}
