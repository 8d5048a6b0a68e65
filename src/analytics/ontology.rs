//! Analytics for ontology-population datasets: mapping coverage, class and
//! property usage, and epistemic-stance distributions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::ontology::{MappingStatus, OntologySpeakerTurn};

/// Corpus-wide counts for an ontology-mode dataset.
///
/// Mapping-status counters aggregate over subject, object, and relation
/// mappings alike, so each extraction contributes three observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyGlobalStats {
    pub total_extractions: usize,
    pub total_speaker_turns: usize,
    pub unique_ontology_classes: usize,
    pub unique_ontology_properties: usize,
    pub mapped_count: usize,
    pub unmapped_count: usize,
    pub uncertain_count: usize,
}

/// Usage of one ontology class, with the grammatical role(s) it was seen in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyClassInfo {
    pub name: String,
    pub count: usize,
    /// "subject", "object", or "both".
    pub role: String,
}

/// Usage of one ontology property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyPropertyInfo {
    pub name: String,
    pub count: usize,
    pub mapping_status: MappingStatus,
}

/// One bucket of a name → count distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBucket {
    pub name: String,
    pub count: usize,
}

/// All derived statistics for an ontology-mode dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyAnalytics {
    pub global_stats: OntologyGlobalStats,
    pub ontology_classes: Vec<OntologyClassInfo>,
    pub ontology_properties: Vec<OntologyPropertyInfo>,
    pub claim_type_distribution: Vec<DistributionBucket>,
    pub certainty_level_distribution: Vec<DistributionBucket>,
}

/// Compute every derived statistic for an ontology-mode dataset.
pub fn analyze(turns: &[OntologySpeakerTurn]) -> OntologyAnalytics {
    let mut total_extractions = 0;
    let mut mapped_count = 0;
    let mut unmapped_count = 0;
    let mut uncertain_count = 0;

    let mut classes: HashMap<String, (usize, HashSet<&'static str>)> = HashMap::new();
    let mut properties: HashMap<String, (usize, MappingStatus)> = HashMap::new();
    let mut claim_types: HashMap<String, usize> = HashMap::new();
    let mut certainty_levels: HashMap<String, usize> = HashMap::new();

    for turn in turns {
        total_extractions += turn.extractions.len();

        for extraction in &turn.extractions {
            for status in [
                extraction.subject.ontology_mapping.mapping_status,
                extraction.object.ontology_mapping.mapping_status,
                extraction.relation.ontology_mapping.mapping_status,
            ] {
                match status {
                    MappingStatus::Mapped => mapped_count += 1,
                    MappingStatus::Unmapped => unmapped_count += 1,
                    MappingStatus::Uncertain => uncertain_count += 1,
                }
            }

            if let Some(class) = &extraction.subject.ontology_mapping.class {
                let entry = classes.entry(class.clone()).or_insert((0, HashSet::new()));
                entry.0 += 1;
                entry.1.insert("subject");
            }
            if let Some(class) = &extraction.object.ontology_mapping.class {
                let entry = classes.entry(class.clone()).or_insert((0, HashSet::new()));
                entry.0 += 1;
                entry.1.insert("object");
            }

            if let Some(property) = &extraction.relation.ontology_mapping.property {
                let entry = properties.entry(property.clone()).or_insert((
                    0,
                    extraction.relation.ontology_mapping.mapping_status,
                ));
                entry.0 += 1;
            }

            for claim in &extraction.epistemic_stance.claim_type {
                *claim_types.entry(claim.class.clone()).or_insert(0) += 1;
            }
            if let Some(level) = &extraction.epistemic_stance.certainty_level.class {
                *certainty_levels.entry(level.clone()).or_insert(0) += 1;
            }
        }
    }

    let mut ontology_classes: Vec<OntologyClassInfo> = classes
        .into_iter()
        .map(|(name, (count, roles))| {
            let role = if roles.len() > 1 {
                "both".to_string()
            } else {
                roles.into_iter().next().unwrap_or("subject").to_string()
            };
            OntologyClassInfo { name, count, role }
        })
        .collect();
    ontology_classes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    let mut ontology_properties: Vec<OntologyPropertyInfo> = properties
        .into_iter()
        .map(|(name, (count, mapping_status))| OntologyPropertyInfo {
            name,
            count,
            mapping_status,
        })
        .collect();
    ontology_properties.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    let distribution = |map: HashMap<String, usize>| {
        let mut buckets: Vec<DistributionBucket> = map
            .into_iter()
            .map(|(name, count)| DistributionBucket { name, count })
            .collect();
        buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        buckets
    };

    let global_stats = OntologyGlobalStats {
        total_extractions,
        total_speaker_turns: turns.len(),
        unique_ontology_classes: ontology_classes.len(),
        unique_ontology_properties: ontology_properties.len(),
        mapped_count,
        unmapped_count,
        uncertain_count,
    };

    OntologyAnalytics {
        global_stats,
        ontology_classes,
        ontology_properties,
        claim_type_distribution: distribution(claim_types),
        certainty_level_distribution: distribution(certainty_levels),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::ontology::*;

    pub fn mapping(
        status: MappingStatus,
        class: Option<&str>,
        property: Option<&str>,
    ) -> OntologyMapping {
        OntologyMapping {
            mapping_status: status,
            class: class.map(String::from),
            property: property.map(String::from),
        }
    }

    pub fn ontology_extraction(
        id: &str,
        subject: (&str, MappingStatus, Option<&str>),
        relation: (&str, MappingStatus, Option<&str>),
        object: (&str, MappingStatus, Option<&str>),
        claim: &str,
        certainty: &str,
    ) -> OntologyExtraction {
        OntologyExtraction {
            extraction_id: id.into(),
            subject: OntologyEntity {
                canonical_name: subject.0.into(),
                ontology_mapping: mapping(subject.1, subject.2, None),
            },
            relation: OntologyRelation {
                surface_form: relation.0.into(),
                ontology_mapping: mapping(relation.1, None, relation.2),
                is_negated: false,
            },
            object: OntologyEntity {
                canonical_name: object.0.into(),
                ontology_mapping: mapping(object.1, object.2, None),
            },
            epistemic_stance: EpistemicStance {
                claim_type: vec![ClaimType {
                    mapping_status: MappingStatus::Mapped,
                    class: claim.into(),
                }],
                certainty_level: mapping(MappingStatus::Mapped, Some(certainty), None),
                temporal_grounding: mapping(MappingStatus::Uncertain, None, None),
                attribution_type: None,
            },
            reasons: Reasons {
                sub_obj_classes: String::new(),
                relation: String::new(),
                epistemic_stance: String::new(),
            },
            provenance: Provenance {
                evidence_sentence_ids: vec!["s1".into()],
                evidence_text: format!("{} {} {}", subject.0, relation.0, object.0),
            },
        }
    }

    pub fn ontology_turn(
        speaker: &str,
        order: i32,
        extractions: Vec<OntologyExtraction>,
    ) -> OntologySpeakerTurn {
        OntologySpeakerTurn {
            speaker_name: speaker.into(),
            role: "Interviewee".into(),
            utterance_order: order,
            extractions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{ontology_extraction, ontology_turn};
    use super::*;

    fn corpus() -> Vec<OntologySpeakerTurn> {
        vec![ontology_turn(
            "A",
            1,
            vec![
                ontology_extraction(
                    "e1",
                    ("X", MappingStatus::Mapped, Some("foaf:Person")),
                    ("worked at", MappingStatus::Mapped, Some("org:memberOf")),
                    ("Y", MappingStatus::Unmapped, None),
                    "DirectExperience",
                    "High",
                ),
                ontology_extraction(
                    "e2",
                    ("Y", MappingStatus::Mapped, Some("org:Organization")),
                    ("employed", MappingStatus::Uncertain, None),
                    ("X", MappingStatus::Mapped, Some("foaf:Person")),
                    "Hearsay",
                    "Low",
                ),
            ],
        )]
    }

    #[test]
    fn mapping_statuses_count_three_per_extraction() {
        let analytics = analyze(&corpus());
        let stats = analytics.global_stats;
        assert_eq!(
            stats.mapped_count + stats.unmapped_count + stats.uncertain_count,
            6
        );
        assert_eq!(stats.mapped_count, 4);
        assert_eq!(stats.unmapped_count, 1);
        assert_eq!(stats.uncertain_count, 1);
    }

    #[test]
    fn class_roles_merge_to_both() {
        let analytics = analyze(&corpus());
        let person = analytics
            .ontology_classes
            .iter()
            .find(|c| c.name == "foaf:Person")
            .unwrap();
        assert_eq!(person.count, 2);
        assert_eq!(person.role, "both");
    }

    #[test]
    fn distributions_sorted_desc_with_name_tiebreak() {
        let analytics = analyze(&corpus());
        assert_eq!(analytics.claim_type_distribution.len(), 2);
        // Equal counts: name order.
        assert_eq!(analytics.claim_type_distribution[0].name, "DirectExperience");
        assert_eq!(analytics.certainty_level_distribution[0].name, "High");
    }

    #[test]
    fn analyze_is_idempotent() {
        let turns = corpus();
        assert_eq!(analyze(&turns), analyze(&turns));
    }
}
