//! Filter engine: composable predicates over extractions.
//!
//! Filters combine by logical AND across categories; within a multi-value
//! category membership is OR. An extraction survives iff it passes every
//! active category; a turn survives iff at least one of its extractions does.
//! Filtering never fails — an empty result is a valid view, not an error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::ontology::{MappingStatus, OntologyExtraction, OntologySpeakerTurn};
use crate::model::{Extraction, SpeakerTurn};
use crate::store::Dataset;

/// Exact triple-shape predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFilter {
    pub subject_type: String,
    pub relation: String,
    pub object_type: String,
}

/// The active filter predicates of one session.
///
/// Every field is optional; `FilterSet::default()` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    /// Match when subject OR object entity type is in the set.
    pub type_filters: HashSet<String>,
    pub pattern_filter: Option<PatternFilter>,
    /// Exact semantic-form match.
    pub relation_filter: Option<String>,
    /// Case-insensitive substring over names, relation forms, and evidence.
    /// Whitespace-only terms are treated as "no filter".
    pub search_term: Option<String>,

    // Ontology-mode categories; inert on basic datasets.
    pub class_filters: HashSet<String>,
    pub property_filters: HashSet<String>,
    pub claim_type_filters: HashSet<String>,
    pub certainty_filters: HashSet<String>,
    pub mapping_status_filter: Option<MappingStatus>,
}

impl FilterSet {
    /// The normalized search needle, if the term is active.
    fn active_search(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether any predicate is active.
    pub fn is_active(&self) -> bool {
        !self.type_filters.is_empty()
            || self.pattern_filter.is_some()
            || self.relation_filter.is_some()
            || self.active_search().is_some()
            || !self.class_filters.is_empty()
            || !self.property_filters.is_empty()
            || !self.claim_type_filters.is_empty()
            || !self.certainty_filters.is_empty()
            || self.mapping_status_filter.is_some()
    }

    /// Evaluate against one basic-schema extraction.
    pub fn matches_extraction(&self, extraction: &Extraction) -> bool {
        if !self.type_filters.is_empty()
            && !self.type_filters.contains(&extraction.subject.entity_type)
            && !self.type_filters.contains(&extraction.object.entity_type)
        {
            return false;
        }
        if let Some(pattern) = &self.pattern_filter {
            if extraction.subject.entity_type != pattern.subject_type
                || extraction.relation.semantic_form != pattern.relation
                || extraction.object.entity_type != pattern.object_type
            {
                return false;
            }
        }
        if let Some(relation) = &self.relation_filter {
            if &extraction.relation.semantic_form != relation {
                return false;
            }
        }
        if let Some(needle) = self.active_search() {
            let hay = [
                &extraction.subject.name,
                &extraction.object.name,
                &extraction.relation.semantic_form,
                &extraction.relation.surface_form,
                &extraction.evidence_text,
            ];
            let hit = hay.iter().any(|h| h.to_lowercase().contains(&needle))
                || extraction
                    .evidence_sources
                    .iter()
                    .any(|s| s.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }

    /// Evaluate against one ontology-mode extraction.
    ///
    /// Type and pattern predicates apply to the display types (mapped class
    /// or mapping status); the mapping-status predicate matches when any of
    /// the three positions carries the selected status.
    pub fn matches_ontology_extraction(&self, extraction: &OntologyExtraction) -> bool {
        let subject_type = extraction.subject.display_type();
        let object_type = extraction.object.display_type();
        let semantic = extraction.relation.semantic_form();

        if !self.type_filters.is_empty()
            && !self.type_filters.contains(&subject_type)
            && !self.type_filters.contains(&object_type)
        {
            return false;
        }
        if let Some(pattern) = &self.pattern_filter {
            if subject_type != pattern.subject_type
                || semantic != pattern.relation
                || object_type != pattern.object_type
            {
                return false;
            }
        }
        if let Some(relation) = &self.relation_filter {
            if semantic != relation {
                return false;
            }
        }
        if !self.class_filters.is_empty() {
            let subject_class = extraction.subject.ontology_mapping.class.as_deref();
            let object_class = extraction.object.ontology_mapping.class.as_deref();
            let hit = subject_class.is_some_and(|c| self.class_filters.contains(c))
                || object_class.is_some_and(|c| self.class_filters.contains(c));
            if !hit {
                return false;
            }
        }
        if !self.property_filters.is_empty() {
            let property = extraction.relation.ontology_mapping.property.as_deref();
            if !property.is_some_and(|p| self.property_filters.contains(p)) {
                return false;
            }
        }
        if !self.claim_type_filters.is_empty()
            && !extraction
                .epistemic_stance
                .claim_type
                .iter()
                .any(|c| self.claim_type_filters.contains(&c.class))
        {
            return false;
        }
        if !self.certainty_filters.is_empty() {
            let level = extraction.epistemic_stance.certainty_level.class.as_deref();
            if !level.is_some_and(|l| self.certainty_filters.contains(l)) {
                return false;
            }
        }
        if let Some(status) = self.mapping_status_filter {
            let hit = extraction.subject.ontology_mapping.mapping_status == status
                || extraction.object.ontology_mapping.mapping_status == status
                || extraction.relation.ontology_mapping.mapping_status == status;
            if !hit {
                return false;
            }
        }
        if let Some(needle) = self.active_search() {
            let class_hay = [
                extraction.subject.ontology_mapping.class.as_deref(),
                extraction.object.ontology_mapping.class.as_deref(),
                extraction.relation.ontology_mapping.property.as_deref(),
            ];
            let hay = [
                extraction.subject.canonical_name.as_str(),
                extraction.object.canonical_name.as_str(),
                extraction.relation.surface_form.as_str(),
                extraction.provenance.evidence_text.as_str(),
            ];
            let hit = hay.iter().any(|h| h.to_lowercase().contains(&needle))
                || class_hay
                    .iter()
                    .flatten()
                    .any(|h| h.to_lowercase().contains(&needle))
                || extraction
                    .provenance
                    .evidence_sentence_ids
                    .iter()
                    .any(|s| s.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Filter basic-schema turns. Turns with no surviving extraction are dropped.
pub fn apply(turns: &[SpeakerTurn], filters: &FilterSet) -> Vec<SpeakerTurn> {
    turns
        .iter()
        .filter_map(|turn| {
            let surviving: Vec<Extraction> = turn
                .extractions
                .iter()
                .filter(|e| filters.matches_extraction(e))
                .cloned()
                .collect();
            if surviving.is_empty() {
                None
            } else {
                let mut kept = turn.clone();
                kept.extractions = surviving;
                Some(kept)
            }
        })
        .collect()
}

/// Filter ontology-mode turns. Same turn-dropping semantics as [`apply`].
pub fn apply_ontology(
    turns: &[OntologySpeakerTurn],
    filters: &FilterSet,
) -> Vec<OntologySpeakerTurn> {
    turns
        .iter()
        .filter_map(|turn| {
            let surviving: Vec<OntologyExtraction> = turn
                .extractions
                .iter()
                .filter(|e| filters.matches_ontology_extraction(e))
                .cloned()
                .collect();
            if surviving.is_empty() {
                None
            } else {
                let mut kept = turn.clone();
                kept.extractions = surviving;
                Some(kept)
            }
        })
        .collect()
}

/// Filter whichever variant the dataset holds, preserving its kind.
pub fn apply_dataset(dataset: &Dataset, filters: &FilterSet) -> Dataset {
    match dataset {
        Dataset::Basic(turns) => Dataset::Basic(apply(turns, filters)),
        Dataset::Ontology(turns) => Dataset::Ontology(apply_ontology(turns, filters)),
    }
}
