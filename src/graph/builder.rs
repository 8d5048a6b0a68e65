//! Aggregating node/edge construction from flattened triple rows.

use std::collections::{BTreeSet, HashMap};

use crate::config::ReportConfig;
use crate::model::TripleRow;

use super::palette;
use super::{EdgeKey, GraphEdge, GraphNode, GraphView};

/// Node sizing parameters: `size = clamp(min, max, min + scale * sqrt(degree))`.
///
/// Square-root scaling keeps hub nodes from blowing up superlinearly; the
/// caps shrink for large graphs to preserve readability.
#[derive(Debug, Clone, Copy)]
struct SizeScale {
    min: f64,
    max: f64,
    scale: f64,
}

impl SizeScale {
    fn for_node_count(node_count: usize, large_graph_threshold: usize) -> Self {
        if node_count > large_graph_threshold {
            Self {
                min: 6.0,
                max: 26.0,
                scale: 2.5,
            }
        } else {
            Self {
                min: 10.0,
                max: 45.0,
                scale: 5.0,
            }
        }
    }

    fn size(&self, degree: usize) -> f64 {
        (self.min + self.scale * (degree as f64).sqrt()).clamp(self.min, self.max)
    }
}

const EDGE_WIDTH_MIN: f64 = 1.0;
const EDGE_WIDTH_MAX: f64 = 6.0;
const EDGE_WIDTH_STEP: f64 = 0.5;

fn edge_width(weight: usize) -> f64 {
    (EDGE_WIDTH_MIN + EDGE_WIDTH_STEP * (weight as f64 - 1.0)).clamp(EDGE_WIDTH_MIN, EDGE_WIDTH_MAX)
}

struct EdgeAccum {
    weight: usize,
    surface_forms: BTreeSet<String>,
    evidence_sample: Vec<String>,
}

/// Build a deduplicated, aggregated graph view from triple rows.
pub fn build(rows: &[TripleRow], config: &ReportConfig) -> GraphView {
    // Nodes keyed by name; first observation fixes the display type.
    let mut order: Vec<String> = Vec::new();
    let mut node_types: HashMap<String, String> = HashMap::new();
    let mut degrees: HashMap<String, usize> = HashMap::new();

    let mut edges: HashMap<EdgeKey, EdgeAccum> = HashMap::new();
    let mut edge_order: Vec<EdgeKey> = Vec::new();

    for row in rows {
        for (name, entity_type) in [
            (&row.subject_name, &row.subject_type),
            (&row.object_name, &row.object_type),
        ] {
            if !node_types.contains_key(name) {
                order.push(name.clone());
                node_types.insert(name.clone(), entity_type.clone());
            }
            *degrees.entry(name.clone()).or_insert(0) += 1;
        }

        let key = EdgeKey {
            subject: row.subject_name.clone(),
            object: row.object_name.clone(),
            relation: row.relation_semantic.clone(),
        };
        let accum = edges.entry(key.clone()).or_insert_with(|| {
            edge_order.push(key);
            EdgeAccum {
                weight: 0,
                surface_forms: BTreeSet::new(),
                evidence_sample: Vec::new(),
            }
        });
        accum.weight += 1;
        if !row.relation_surface.is_empty() {
            accum.surface_forms.insert(row.relation_surface.clone());
        }
        if accum.evidence_sample.len() < config.evidence_sample_size
            && !row.evidence_text.is_empty()
        {
            accum.evidence_sample.push(row.evidence_text.clone());
        }
    }

    let colors = palette::assign(node_types.values().map(String::as_str));
    let sizing = SizeScale::for_node_count(order.len(), config.large_graph_threshold);

    let nodes: Vec<GraphNode> = order
        .into_iter()
        .map(|name| {
            let entity_type = node_types.remove(&name).unwrap_or_default();
            let degree = degrees.get(&name).copied().unwrap_or(0);
            let color = colors
                .get(&entity_type)
                .map(String::clone)
                .unwrap_or_else(|| palette::FALLBACK.to_string());
            GraphNode {
                name,
                entity_type,
                degree,
                size: sizing.size(degree),
                color,
            }
        })
        .collect();

    let edge_views: Vec<GraphEdge> = edge_order
        .into_iter()
        .filter_map(|key| {
            let accum = edges.remove(&key)?;
            Some(GraphEdge {
                width: edge_width(accum.weight),
                subject: key.subject,
                object: key.object,
                relation: key.relation,
                weight: accum.weight,
                surface_forms: accum.surface_forms.into_iter().collect(),
                evidence_sample: accum.evidence_sample,
            })
        })
        .collect();

    tracing::debug!(
        nodes = nodes.len(),
        edges = edge_views.len(),
        "graph view built"
    );

    GraphView {
        nodes,
        edges: edge_views,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(subject: &str, relation: &str, object: &str) -> TripleRow {
        TripleRow {
            subject_name: subject.into(),
            subject_type: "Person".into(),
            relation_surface: format!("{relation} (surface)"),
            relation_semantic: relation.into(),
            object_name: object.into(),
            object_type: "Organisation".into(),
            evidence_text: format!("{subject} {relation} {object}"),
            evidence_sources: vec![],
            speaker_name: "A".into(),
            role: "Interviewee".into(),
            utterance_order: 1,
        }
    }

    #[test]
    fn parallel_edges_aggregate_into_one() {
        let rows = vec![
            row("X", "hasEmploymentAt", "Y"),
            row("X", "hasEmploymentAt", "Y"),
            row("X", "hasEmploymentAt", "Y"),
        ];
        let view = build(&rows, &ReportConfig::default());
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.edges[0].weight, 3);
        assert_eq!(view.nodes.len(), 2);
    }

    #[test]
    fn distinct_relations_stay_separate_edges() {
        let rows = vec![row("X", "worksAt", "Y"), row("X", "founded", "Y")];
        let view = build(&rows, &ReportConfig::default());
        assert_eq!(view.edges.len(), 2);
    }

    #[test]
    fn degree_counts_every_touching_row() {
        let rows = vec![
            row("X", "r", "Y"),
            row("X", "r", "Z"),
            row("W", "r", "X"),
        ];
        let view = build(&rows, &ReportConfig::default());
        let x = view.nodes.iter().find(|n| n.name == "X").unwrap();
        assert_eq!(x.degree, 3);
        let y = view.nodes.iter().find(|n| n.name == "Y").unwrap();
        assert_eq!(y.degree, 1);
        assert!(x.size > y.size);
    }

    #[test]
    fn node_size_is_clamped() {
        let rows: Vec<TripleRow> = (0..200).map(|i| row("Hub", "r", &format!("N{i}"))).collect();
        let view = build(&rows, &ReportConfig::default());
        let hub = view.nodes.iter().find(|n| n.name == "Hub").unwrap();
        assert_eq!(hub.size, 45.0);
    }

    #[test]
    fn evidence_sample_is_bounded() {
        let rows: Vec<TripleRow> = (0..10).map(|_| row("X", "r", "Y")).collect();
        let config = ReportConfig::default();
        let view = build(&rows, &config);
        assert_eq!(view.edges[0].weight, 10);
        assert_eq!(
            view.edges[0].evidence_sample.len(),
            config.evidence_sample_size
        );
    }

    #[test]
    fn surface_forms_union_is_sorted() {
        let mut first = row("X", "r", "Y");
        first.relation_surface = "was with".into();
        let mut second = row("X", "r", "Y");
        second.relation_surface = "joined".into();
        let view = build(&[first, second], &ReportConfig::default());
        assert_eq!(view.edges[0].surface_forms, vec!["joined", "was with"]);
    }

    #[test]
    fn colors_are_stable_across_runs() {
        let rows = vec![row("X", "r", "Y")];
        let a = build(&rows, &ReportConfig::default());
        let b = build(&rows, &ReportConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_rows_build_empty_view() {
        let view = build(&[], &ReportConfig::default());
        assert!(view.is_empty());
    }
}
