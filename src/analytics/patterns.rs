//! Structural pattern analysis: the `(subject_type, relation, object_type)`
//! shape of each triple, independent of specific entity names.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::SpeakerTurn;

/// One structural pattern with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralPattern {
    pub subject_type: String,
    pub relation: String,
    pub object_type: String,
    pub count: usize,
}

impl StructuralPattern {
    fn key(&self) -> (&str, &str, &str) {
        (&self.subject_type, &self.relation, &self.object_type)
    }
}

/// Group extractions by pattern and count occurrences.
///
/// Extractions with an empty subject or object type carry no shape and are
/// skipped. Returns sorted count-desc with a lexicographic key tie-break so
/// repeated runs produce identical output.
pub fn structural_patterns(turns: &[SpeakerTurn]) -> Vec<StructuralPattern> {
    let mut counts: HashMap<(String, String, String), usize> = HashMap::new();

    for turn in turns {
        for extraction in &turn.extractions {
            let subject_type = &extraction.subject.entity_type;
            let object_type = &extraction.object.entity_type;
            if subject_type.is_empty() || object_type.is_empty() {
                continue;
            }
            let key = (
                subject_type.clone(),
                extraction.relation.semantic_form.clone(),
                object_type.clone(),
            );
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut patterns: Vec<StructuralPattern> = counts
        .into_iter()
        .map(|((subject_type, relation, object_type), count)| StructuralPattern {
            subject_type,
            relation,
            object_type,
            count,
        })
        .collect();
    patterns.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key().cmp(&b.key())));
    patterns
}

/// The top `n` patterns of the count-descending ranking.
pub fn most_frequent(patterns: &[StructuralPattern], n: usize) -> Vec<StructuralPattern> {
    patterns.iter().take(n).cloned().collect()
}

/// The top `n` patterns ranked by ascending count, same key tie-break.
pub fn least_frequent(patterns: &[StructuralPattern], n: usize) -> Vec<StructuralPattern> {
    let mut ascending: Vec<StructuralPattern> = patterns.to_vec();
    ascending.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.key().cmp(&b.key())));
    ascending.truncate(n);
    ascending
}

/// Occurrences of each semantic relation across all extractions.
pub fn relation_frequency(turns: &[SpeakerTurn]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for turn in turns {
        for extraction in &turn.extractions {
            *counts
                .entry(extraction.relation.semantic_form.clone())
                .or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{extraction, turn};

    #[test]
    fn same_shape_across_turns_counts_twice() {
        let turns = vec![
            turn(
                "A",
                1,
                vec![extraction(("X", "Person"), "hasEmploymentAt", ("Y", "Organisation"))],
            ),
            turn(
                "B",
                2,
                vec![extraction(("Z", "Person"), "hasEmploymentAt", ("W", "Organisation"))],
            ),
        ];
        let patterns = structural_patterns(&turns);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].count, 2);
        assert_eq!(patterns[0].subject_type, "Person");
    }

    #[test]
    fn ties_break_lexicographically() {
        let turns = vec![turn(
            "A",
            1,
            vec![
                extraction(("X", "B"), "rel", ("Y", "B")),
                extraction(("X", "A"), "rel", ("Y", "A")),
            ],
        )];
        let patterns = structural_patterns(&turns);
        assert_eq!(patterns[0].subject_type, "A");
        assert_eq!(patterns[1].subject_type, "B");
    }

    #[test]
    fn least_frequent_ranks_ascending() {
        let turns = vec![turn(
            "A",
            1,
            vec![
                extraction(("X", "Person"), "common", ("Y", "Org")),
                extraction(("X", "Person"), "common", ("Y", "Org")),
                extraction(("X", "Person"), "rare", ("Y", "Org")),
            ],
        )];
        let patterns = structural_patterns(&turns);
        let least = least_frequent(&patterns, 10);
        assert_eq!(least[0].relation, "rare");
        assert_eq!(least[0].count, 1);
        let most = most_frequent(&patterns, 1);
        assert_eq!(most[0].relation, "common");
    }

    #[test]
    fn truncation_respects_n() {
        let turns = vec![turn(
            "A",
            1,
            vec![
                extraction(("X", "A"), "r1", ("Y", "B")),
                extraction(("X", "A"), "r2", ("Y", "B")),
                extraction(("X", "A"), "r3", ("Y", "B")),
            ],
        )];
        let patterns = structural_patterns(&turns);
        assert_eq!(most_frequent(&patterns, 2).len(), 2);
        assert_eq!(least_frequent(&patterns, 2).len(), 2);
    }

    #[test]
    fn relation_frequency_counts_every_occurrence() {
        let turns = vec![
            turn(
                "A",
                1,
                vec![
                    extraction(("X", "P"), "uses", ("F", "T")),
                    extraction(("Y", "P"), "uses", ("F", "T")),
                ],
            ),
            turn("B", 2, vec![extraction(("Z", "P"), "knows", ("X", "P"))]),
        ];
        let freq = relation_frequency(&turns);
        assert_eq!(freq.get("uses"), Some(&2));
        assert_eq!(freq.get("knows"), Some(&1));
    }
}
