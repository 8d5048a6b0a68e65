//! Data model for semantic triple extractions.
//!
//! Two parallel schema variants exist in the wild: the basic shape
//! (entities with free-text types) and the ontology-population shape
//! (entities mapped against a formal ontology, with epistemic metadata).
//! A loaded file is always exactly one of the two — the variant is decided
//! once at load time and carried as a [`DatasetKind`] tag.

pub mod ontology;

use serde::{Deserialize, Serialize};

/// An entity occupying the subject or object position of a triple.
///
/// Identity for graph purposes is the `name` alone; `(name, entity_type)`
/// pairs are tracked separately to surface multi-typed entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub entity_type: String,
}

/// A relation between two entities.
///
/// `semantic_form` is the canonical predicate used for all aggregation and
/// filtering; `surface_form` is provenance only (the literal text span).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub surface_form: String,
    pub semantic_form: String,
}

/// One subject–relation–object fact with its supporting evidence.
///
/// Immutable once loaded. The input files name the entity fields
/// `subject_entity` / `object_entity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    #[serde(rename = "subject_entity")]
    pub subject: Entity,
    pub relation: Relation,
    #[serde(rename = "object_entity")]
    pub object: Entity,
    pub evidence_text: String,
    #[serde(default)]
    pub evidence_sources: Vec<String>,
}

/// One utterance by one interview participant.
///
/// `utterance_order` increases monotonically within an interview but is not
/// globally unique across files; utterance identity is the
/// `(speaker_name, utterance_order)` pair. A turn with zero extractions is
/// valid and contributes no triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerTurn {
    pub speaker_name: String,
    pub role: String,
    pub utterance_order: i32,
    pub extractions: Vec<Extraction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_source_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_interview_id: Option<String>,
}

impl SpeakerTurn {
    /// Utterance identity used by per-utterance aggregation.
    pub fn turn_id(&self) -> (&str, i32) {
        (&self.speaker_name, self.utterance_order)
    }
}

/// Which schema variant a loaded dataset follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Basic,
    Ontology,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Basic => write!(f, "basic"),
            DatasetKind::Ontology => write!(f, "ontology"),
        }
    }
}

/// A fully flattened extraction: one row per triple, with its speaker-turn
/// provenance inlined.
///
/// This is the single canonical flat form consumed by the graph builder and
/// the export adapters, regardless of which schema variant it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripleRow {
    pub subject_name: String,
    pub subject_type: String,
    pub relation_surface: String,
    pub relation_semantic: String,
    pub object_name: String,
    pub object_type: String,
    pub evidence_text: String,
    pub evidence_sources: Vec<String>,
    pub speaker_name: String,
    pub role: String,
    pub utterance_order: i32,
}

impl TripleRow {
    /// Flatten one basic-schema extraction with its turn context.
    pub fn from_extraction(turn: &SpeakerTurn, extraction: &Extraction) -> Self {
        Self {
            subject_name: extraction.subject.name.clone(),
            subject_type: extraction.subject.entity_type.clone(),
            relation_surface: extraction.relation.surface_form.clone(),
            relation_semantic: extraction.relation.semantic_form.clone(),
            object_name: extraction.object.name.clone(),
            object_type: extraction.object.entity_type.clone(),
            evidence_text: extraction.evidence_text.clone(),
            evidence_sources: extraction.evidence_sources.clone(),
            speaker_name: turn.speaker_name.clone(),
            role: turn.role.clone(),
            utterance_order: turn.utterance_order,
        }
    }

    /// Whether the row mentions `needle` (already lowercased) in any of its
    /// searchable fields.
    pub fn matches_search(&self, needle: &str) -> bool {
        let hay = [
            self.subject_name.as_str(),
            self.object_name.as_str(),
            self.relation_semantic.as_str(),
            self.relation_surface.as_str(),
            self.evidence_text.as_str(),
        ];
        hay.iter().any(|h| h.to_lowercase().contains(needle))
            || self
                .evidence_sources
                .iter()
                .any(|s| s.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn_with_one_extraction() -> SpeakerTurn {
        SpeakerTurn {
            speaker_name: "A".into(),
            role: "Interviewer".into(),
            utterance_order: 1,
            extractions: vec![Extraction {
                subject: Entity {
                    name: "X".into(),
                    entity_type: "Person".into(),
                },
                relation: Relation {
                    surface_form: "worked at".into(),
                    semantic_form: "hasEmploymentAt".into(),
                },
                object: Entity {
                    name: "Y".into(),
                    entity_type: "Organisation".into(),
                },
                evidence_text: "X worked at Y for years".into(),
                evidence_sources: vec!["s1".into()],
            }],
            source: None,
            metadata_source_file: None,
            metadata_interview_id: None,
        }
    }

    #[test]
    fn extraction_deserializes_with_renamed_entity_fields() {
        let raw = r#"{
            "subject_entity": {"name": "X", "entity_type": "Person"},
            "relation": {"surface_form": "worked at", "semantic_form": "hasEmploymentAt"},
            "object_entity": {"name": "Y", "entity_type": "Organisation"},
            "evidence_text": "..."
        }"#;
        let extraction: Extraction = serde_json::from_str(raw).unwrap();
        assert_eq!(extraction.subject.name, "X");
        assert_eq!(extraction.object.entity_type, "Organisation");
        assert!(extraction.evidence_sources.is_empty());
    }

    #[test]
    fn triple_row_carries_turn_provenance() {
        let turn = turn_with_one_extraction();
        let row = TripleRow::from_extraction(&turn, &turn.extractions[0]);
        assert_eq!(row.speaker_name, "A");
        assert_eq!(row.utterance_order, 1);
        assert_eq!(row.relation_semantic, "hasEmploymentAt");
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let turn = turn_with_one_extraction();
        let row = TripleRow::from_extraction(&turn, &turn.extractions[0]);
        assert!(row.matches_search("x"));
        assert!(row.matches_search("employmentat"));
        assert!(row.matches_search("worked AT".to_lowercase().as_str()));
        assert!(row.matches_search("s1"));
        assert!(!row.matches_search("nowhere"));
    }
}
