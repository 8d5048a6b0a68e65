//! Relation cardinality classification over entity names.
//!
//! For each relation the subject→objects and object→subjects mappings are
//! tested functionally: a relation is 1:1 when every observed subject pairs
//! with exactly one object and vice versa, 1:N when some subject fans out
//! while objects stay functional, N:1 the inverse, and N:N otherwise.
//! N:N relations are reported in their own list, never silently dropped.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::SpeakerTurn;

/// Cardinality class of one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationCardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// All relations grouped by cardinality class.
///
/// Each list is sorted by relation frequency descending, relation name on
/// ties, matching the dashboard's cardinality sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardinalityReport {
    pub one_to_one: Vec<String>,
    pub one_to_many: Vec<String>,
    pub many_to_one: Vec<String>,
    pub many_to_many: Vec<String>,
}

/// Classify one relation from its forward and reverse name mappings.
pub fn classify(
    forward: &HashMap<String, HashSet<String>>,
    reverse: &HashMap<String, HashSet<String>>,
) -> RelationCardinality {
    let subject_functional = forward.values().all(|objects| objects.len() == 1);
    let object_functional = reverse.values().all(|subjects| subjects.len() == 1);
    match (subject_functional, object_functional) {
        (true, true) => RelationCardinality::OneToOne,
        (false, true) => RelationCardinality::OneToMany,
        (true, false) => RelationCardinality::ManyToOne,
        (false, false) => RelationCardinality::ManyToMany,
    }
}

/// Classify every relation in the corpus.
pub fn classify_relations(
    turns: &[SpeakerTurn],
    relation_frequency: &BTreeMap<String, usize>,
) -> CardinalityReport {
    // relation → subject name → set of object names, and the reverse.
    let mut forward: HashMap<String, HashMap<String, HashSet<String>>> = HashMap::new();
    let mut reverse: HashMap<String, HashMap<String, HashSet<String>>> = HashMap::new();

    for turn in turns {
        for extraction in &turn.extractions {
            let relation = &extraction.relation.semantic_form;
            forward
                .entry(relation.clone())
                .or_default()
                .entry(extraction.subject.name.clone())
                .or_default()
                .insert(extraction.object.name.clone());
            reverse
                .entry(relation.clone())
                .or_default()
                .entry(extraction.object.name.clone())
                .or_default()
                .insert(extraction.subject.name.clone());
        }
    }

    let mut report = CardinalityReport::default();
    for (relation, fwd) in &forward {
        let rev = &reverse[relation];
        let bucket = match classify(fwd, rev) {
            RelationCardinality::OneToOne => &mut report.one_to_one,
            RelationCardinality::OneToMany => &mut report.one_to_many,
            RelationCardinality::ManyToOne => &mut report.many_to_one,
            RelationCardinality::ManyToMany => &mut report.many_to_many,
        };
        bucket.push(relation.clone());
    }

    let frequency_order = |list: &mut Vec<String>| {
        list.sort_by(|a, b| {
            let fa = relation_frequency.get(a).copied().unwrap_or(0);
            let fb = relation_frequency.get(b).copied().unwrap_or(0);
            fb.cmp(&fa).then_with(|| a.cmp(b))
        });
    };
    frequency_order(&mut report.one_to_one);
    frequency_order(&mut report.one_to_many);
    frequency_order(&mut report.many_to_one);
    frequency_order(&mut report.many_to_many);
    report
}
