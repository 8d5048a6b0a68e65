//! Domain/range diversity: how many distinct entity types each relation
//! connects on either side.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::SpeakerTurn;

/// Diversity metrics for one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDiversity {
    pub relation: String,
    /// Distinct subject entity types.
    pub domain_size: usize,
    /// Distinct object entity types.
    pub range_size: usize,
    pub total_diversity: usize,
}

/// Compute diversity for every relation and keep the top `k` by total,
/// ties broken by relation name.
pub fn relation_diversity(turns: &[SpeakerTurn], k: usize) -> Vec<RelationDiversity> {
    let mut domain: HashMap<String, HashSet<String>> = HashMap::new();
    let mut range: HashMap<String, HashSet<String>> = HashMap::new();

    for turn in turns {
        for extraction in &turn.extractions {
            let subject_type = &extraction.subject.entity_type;
            let object_type = &extraction.object.entity_type;
            if subject_type.is_empty() || object_type.is_empty() {
                continue;
            }
            let relation = &extraction.relation.semantic_form;
            domain
                .entry(relation.clone())
                .or_default()
                .insert(subject_type.clone());
            range
                .entry(relation.clone())
                .or_default()
                .insert(object_type.clone());
        }
    }

    let relations: HashSet<&String> = domain.keys().chain(range.keys()).collect();
    let mut result: Vec<RelationDiversity> = relations
        .into_iter()
        .map(|relation| {
            let domain_size = domain.get(relation).map(HashSet::len).unwrap_or(0);
            let range_size = range.get(relation).map(HashSet::len).unwrap_or(0);
            RelationDiversity {
                relation: relation.clone(),
                domain_size,
                range_size,
                total_diversity: domain_size + range_size,
            }
        })
        .collect();

    result.sort_by(|a, b| {
        b.total_diversity
            .cmp(&a.total_diversity)
            .then_with(|| a.relation.cmp(&b.relation))
    });
    result.truncate(k);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{extraction, turn};

    #[test]
    fn diversity_counts_distinct_types_per_side() {
        let turns = vec![turn(
            "A",
            1,
            vec![
                extraction(("X", "Person"), "involvedIn", ("P1", "Project")),
                extraction(("Y", "Organisation"), "involvedIn", ("P1", "Project")),
                extraction(("Z", "Person"), "involvedIn", ("E1", "Event")),
            ],
        )];
        let diversity = relation_diversity(&turns, 10);
        assert_eq!(diversity.len(), 1);
        assert_eq!(diversity[0].domain_size, 2);
        assert_eq!(diversity[0].range_size, 2);
        assert_eq!(diversity[0].total_diversity, 4);
    }

    #[test]
    fn top_k_truncates_with_name_tiebreak() {
        let turns = vec![turn(
            "A",
            1,
            vec![
                extraction(("X", "Person"), "b_relation", ("Y", "Org")),
                extraction(("X", "Person"), "a_relation", ("Y", "Org")),
                extraction(("X", "Person"), "c_relation", ("Y", "Org")),
            ],
        )];
        let diversity = relation_diversity(&turns, 2);
        assert_eq!(diversity.len(), 2);
        // All tie at total 2; name order decides.
        assert_eq!(diversity[0].relation, "a_relation");
        assert_eq!(diversity[1].relation, "b_relation");
    }
}
