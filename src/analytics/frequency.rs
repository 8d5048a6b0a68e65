//! Entity-type frequency, tiering, and type-role analysis.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::SpeakerTurn;

/// Corpus-wide counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_extractions: usize,
    pub total_speaker_turns: usize,
    pub unique_entity_types: usize,
    pub unique_entity_names: usize,
    pub unique_relations: usize,
}

/// One entity type with its occurrence and distinct-utterance counts.
///
/// `count` is extraction occurrences (subject and object positions both
/// count); `utterance_count` is the number of distinct speaker turns the
/// type appears in at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTypeInfo {
    pub name: String,
    pub count: usize,
    pub utterance_count: usize,
}

pub fn global_stats(turns: &[SpeakerTurn]) -> GlobalStats {
    let mut entity_types: HashSet<&str> = HashSet::new();
    let mut entity_names: HashSet<&str> = HashSet::new();
    let mut relations: HashSet<&str> = HashSet::new();
    let mut total_extractions = 0;

    for turn in turns {
        total_extractions += turn.extractions.len();
        for extraction in &turn.extractions {
            entity_names.insert(&extraction.subject.name);
            entity_names.insert(&extraction.object.name);
            relations.insert(&extraction.relation.semantic_form);
            if !extraction.subject.entity_type.is_empty() {
                entity_types.insert(&extraction.subject.entity_type);
            }
            if !extraction.object.entity_type.is_empty() {
                entity_types.insert(&extraction.object.entity_type);
            }
        }
    }

    GlobalStats {
        total_extractions,
        total_speaker_turns: turns.len(),
        unique_entity_types: entity_types.len(),
        unique_entity_names: entity_names.len(),
        unique_relations: relations.len(),
    }
}

/// Count occurrences and distinct utterances per entity type.
/// Returns sorted by count desc, name asc on ties.
pub fn entity_type_frequency(turns: &[SpeakerTurn]) -> Vec<EntityTypeInfo> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut utterances: HashMap<String, HashSet<(String, i32)>> = HashMap::new();

    for turn in turns {
        let turn_id = (turn.speaker_name.clone(), turn.utterance_order);
        for extraction in &turn.extractions {
            for entity_type in [
                &extraction.subject.entity_type,
                &extraction.object.entity_type,
            ] {
                if entity_type.is_empty() {
                    continue;
                }
                *counts.entry(entity_type.clone()).or_insert(0) += 1;
                utterances
                    .entry(entity_type.clone())
                    .or_default()
                    .insert(turn_id.clone());
            }
        }
    }

    let mut result: Vec<EntityTypeInfo> = counts
        .into_iter()
        .map(|(name, count)| {
            let utterance_count = utterances.get(&name).map(HashSet::len).unwrap_or(0);
            EntityTypeInfo {
                name,
                count,
                utterance_count,
            }
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    result
}

/// Split entity types into high/medium/low tiers by distinct-utterance count.
///
/// Thresholds are fixed (>3 high, 2–3 medium, <2 low), a deliberate
/// simplification over adaptive binning. Every type lands in exactly one tier.
pub fn tier_partition(
    entity_types: &[EntityTypeInfo],
) -> (
    Vec<EntityTypeInfo>,
    Vec<EntityTypeInfo>,
    Vec<EntityTypeInfo>,
) {
    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();
    for info in entity_types {
        if info.utterance_count > 3 {
            high.push(info.clone());
        } else if info.utterance_count >= 2 {
            medium.push(info.clone());
        } else {
            low.push(info.clone());
        }
    }
    (high, medium, low)
}

/// Entity names observed under two or more distinct types, with the sorted
/// type list for each.
pub fn multi_typed_entities(turns: &[SpeakerTurn]) -> BTreeMap<String, Vec<String>> {
    let mut types_by_name: HashMap<String, HashSet<String>> = HashMap::new();

    for turn in turns {
        for extraction in &turn.extractions {
            for entity in [&extraction.subject, &extraction.object] {
                if entity.entity_type.is_empty() {
                    continue;
                }
                types_by_name
                    .entry(entity.name.clone())
                    .or_default()
                    .insert(entity.entity_type.clone());
            }
        }
    }

    types_by_name
        .into_iter()
        .filter(|(_, types)| types.len() >= 2)
        .map(|(name, types)| {
            let mut sorted: Vec<String> = types.into_iter().collect();
            sorted.sort();
            (name, sorted)
        })
        .collect()
}

/// Entity types appearing exclusively as subject, and exclusively as object.
/// Both lists sorted.
pub fn exclusive_role_types(turns: &[SpeakerTurn]) -> (Vec<String>, Vec<String>) {
    let mut subject_types: HashSet<String> = HashSet::new();
    let mut object_types: HashSet<String> = HashSet::new();

    for turn in turns {
        for extraction in &turn.extractions {
            if !extraction.subject.entity_type.is_empty() {
                subject_types.insert(extraction.subject.entity_type.clone());
            }
            if !extraction.object.entity_type.is_empty() {
                object_types.insert(extraction.object.entity_type.clone());
            }
        }
    }

    let mut subject_only: Vec<String> =
        subject_types.difference(&object_types).cloned().collect();
    let mut object_only: Vec<String> =
        object_types.difference(&subject_types).cloned().collect();
    subject_only.sort();
    object_only.sort();
    (subject_only, object_only)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{extraction, small_corpus, turn};

    #[test]
    fn occurrence_count_differs_from_utterance_count() {
        // Person appears twice in turn 1 and once in turn 2: count 3,
        // utterance_count 2.
        let turns = small_corpus();
        let types = entity_type_frequency(&turns);
        let person = types.iter().find(|t| t.name == "Person").unwrap();
        assert_eq!(person.count, 3);
        assert_eq!(person.utterance_count, 2);
    }

    #[test]
    fn frequency_sorted_desc_with_name_tiebreak() {
        let turns = small_corpus();
        let types = entity_type_frequency(&turns);
        for pair in types.windows(2) {
            assert!(
                pair[0].count > pair[1].count
                    || (pair[0].count == pair[1].count && pair[0].name < pair[1].name)
            );
        }
    }

    #[test]
    fn tier_thresholds_are_fixed() {
        let types = vec![
            EntityTypeInfo {
                name: "High".into(),
                count: 10,
                utterance_count: 4,
            },
            EntityTypeInfo {
                name: "Medium".into(),
                count: 5,
                utterance_count: 2,
            },
            EntityTypeInfo {
                name: "Low".into(),
                count: 1,
                utterance_count: 1,
            },
        ];
        let (high, medium, low) = tier_partition(&types);
        assert_eq!(high.len(), 1);
        assert_eq!(medium.len(), 1);
        assert_eq!(low.len(), 1);
        assert_eq!(high[0].name, "High");
        assert_eq!(medium[0].name, "Medium");
        assert_eq!(low[0].name, "Low");
    }

    #[test]
    fn multi_typed_detection_requires_two_types() {
        let turns = vec![turn(
            "A",
            1,
            vec![
                extraction(("Smalltalk", "Technology"), "rel", ("Y", "Org")),
                extraction(("Smalltalk", "Concept"), "rel", ("Y", "Org")),
            ],
        )];
        let multi = multi_typed_entities(&turns);
        assert_eq!(
            multi.get("Smalltalk"),
            Some(&vec!["Concept".to_string(), "Technology".to_string()])
        );
        assert!(!multi.contains_key("Y"));
    }

    #[test]
    fn exclusive_role_types_split() {
        let turns = small_corpus();
        let (subject_only, object_only) = exclusive_role_types(&turns);
        assert_eq!(subject_only, vec!["Person".to_string()]);
        assert_eq!(
            object_only,
            vec!["Organisation".to_string(), "Technology".to_string()]
        );
    }

    #[test]
    fn empty_entity_type_is_skipped() {
        let turns = vec![turn(
            "A",
            1,
            vec![extraction(("X", ""), "rel", ("Y", "Org"))],
        )];
        let types = entity_type_frequency(&turns);
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "Org");
        // The name still counts toward global uniqueness.
        assert_eq!(global_stats(&turns).unique_entity_names, 2);
    }
}
