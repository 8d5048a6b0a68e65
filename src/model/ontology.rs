//! Ontology-population schema: extractions whose entities and relations carry
//! mappings against a formal ontology, plus epistemic-stance metadata.
//!
//! This variant is parallel to the basic schema, never mixed with it in one
//! file. Field shapes follow the extraction pipeline's richer output.

use serde::{Deserialize, Serialize};

use super::TripleRow;

/// Whether an entity or relation was linked to a formal ontology term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingStatus {
    Mapped,
    Unmapped,
    Uncertain,
}

impl std::fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingStatus::Mapped => write!(f, "mapped"),
            MappingStatus::Unmapped => write!(f, "unmapped"),
            MappingStatus::Uncertain => write!(f, "uncertain"),
        }
    }
}

/// Link (or attempted link) to an ontology class or property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyMapping {
    pub mapping_status: MappingStatus,
    /// Ontology class, for entity mappings.
    #[serde(default)]
    pub class: Option<String>,
    /// Ontology property, for relation mappings.
    #[serde(default)]
    pub property: Option<String>,
}

/// Entity with its ontology mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyEntity {
    pub canonical_name: String,
    pub ontology_mapping: OntologyMapping,
}

/// Relation with its ontology mapping and negation flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyRelation {
    pub surface_form: String,
    pub ontology_mapping: OntologyMapping,
    #[serde(default)]
    pub is_negated: bool,
}

/// One claim-type classification of an extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimType {
    pub mapping_status: MappingStatus,
    pub class: String,
}

/// Metadata about the nature and certainty of a claim
/// (direct experience vs. hearsay, hedged vs. asserted, and so on).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpistemicStance {
    pub claim_type: Vec<ClaimType>,
    pub certainty_level: OntologyMapping,
    pub temporal_grounding: OntologyMapping,
    #[serde(default)]
    pub attribution_type: Option<String>,
}

/// Free-text justifications for the mapping decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reasons {
    pub sub_obj_classes: String,
    pub relation: String,
    pub epistemic_stance: String,
}

/// Evidence provenance for one extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(default)]
    pub evidence_sentence_ids: Vec<String>,
    pub evidence_text: String,
}

/// A single ontology-mode extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyExtraction {
    pub extraction_id: String,
    pub subject: OntologyEntity,
    pub relation: OntologyRelation,
    pub object: OntologyEntity,
    pub epistemic_stance: EpistemicStance,
    pub reasons: Reasons,
    pub provenance: Provenance,
}

/// Speaker turn containing ontology-mode extractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologySpeakerTurn {
    pub speaker_name: String,
    pub role: String,
    pub utterance_order: i32,
    pub extractions: Vec<OntologyExtraction>,
}

impl OntologySpeakerTurn {
    pub fn turn_id(&self) -> (&str, i32) {
        (&self.speaker_name, self.utterance_order)
    }
}

impl OntologyEntity {
    /// Display type for graph and export views: the mapped class when one
    /// exists, otherwise the mapping status.
    pub fn display_type(&self) -> String {
        match &self.ontology_mapping.class {
            Some(class) if !class.is_empty() => class.clone(),
            _ => self.ontology_mapping.mapping_status.to_string(),
        }
    }
}

impl OntologyRelation {
    /// Canonical predicate: the mapped property when one exists, otherwise
    /// the surface form.
    pub fn semantic_form(&self) -> &str {
        match &self.ontology_mapping.property {
            Some(property) if !property.is_empty() => property,
            _ => &self.surface_form,
        }
    }
}

impl TripleRow {
    /// Flatten one ontology-mode extraction with its turn context.
    pub fn from_ontology_extraction(
        turn: &OntologySpeakerTurn,
        extraction: &OntologyExtraction,
    ) -> Self {
        Self {
            subject_name: extraction.subject.canonical_name.clone(),
            subject_type: extraction.subject.display_type(),
            relation_surface: extraction.relation.surface_form.clone(),
            relation_semantic: extraction.relation.semantic_form().to_string(),
            object_name: extraction.object.canonical_name.clone(),
            object_type: extraction.object.display_type(),
            evidence_text: extraction.provenance.evidence_text.clone(),
            evidence_sources: extraction.provenance.evidence_sentence_ids.clone(),
            speaker_name: turn.speaker_name.clone(),
            role: turn.role.clone(),
            utterance_order: turn.utterance_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(status: MappingStatus, class: Option<&str>) -> OntologyMapping {
        OntologyMapping {
            mapping_status: status,
            class: class.map(String::from),
            property: None,
        }
    }

    #[test]
    fn mapping_status_parses_lowercase() {
        let status: MappingStatus = serde_json::from_str("\"uncertain\"").unwrap();
        assert_eq!(status, MappingStatus::Uncertain);
        assert_eq!(status.to_string(), "uncertain");
    }

    #[test]
    fn display_type_prefers_mapped_class() {
        let entity = OntologyEntity {
            canonical_name: "Turing".into(),
            ontology_mapping: mapping(MappingStatus::Mapped, Some("foaf:Person")),
        };
        assert_eq!(entity.display_type(), "foaf:Person");

        let unmapped = OntologyEntity {
            canonical_name: "the lab".into(),
            ontology_mapping: mapping(MappingStatus::Unmapped, None),
        };
        assert_eq!(unmapped.display_type(), "unmapped");
    }

    #[test]
    fn semantic_form_falls_back_to_surface() {
        let relation = OntologyRelation {
            surface_form: "worked at".into(),
            ontology_mapping: OntologyMapping {
                mapping_status: MappingStatus::Unmapped,
                class: None,
                property: None,
            },
            is_negated: false,
        };
        assert_eq!(relation.semantic_form(), "worked at");
    }
}
