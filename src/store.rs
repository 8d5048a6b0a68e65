//! In-memory triple store: atomic, schema-checked loading of extraction files.
//!
//! A load is all-or-nothing. Validation runs in two phases: a structural pass
//! over the raw JSON value that produces precise [`SchemaError`]s with turn
//! indexes, then typed deserialization into the variant the structural probe
//! selected. File I/O lives with the caller; the store only sees text.

use serde_json::Value;

use crate::error::SchemaError;
use crate::model::ontology::OntologySpeakerTurn;
use crate::model::{DatasetKind, SpeakerTurn, TripleRow};

/// A fully loaded dataset, tagged with its schema variant.
///
/// Owns all turn/extraction data for the lifetime of one loaded file.
/// Loading a new file replaces the dataset wholesale; there is no
/// incremental merge.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Basic(Vec<SpeakerTurn>),
    Ontology(Vec<OntologySpeakerTurn>),
}

impl Dataset {
    /// Parse and validate a raw JSON document.
    pub fn load(raw: &str) -> Result<Dataset, SchemaError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| SchemaError::InvalidJson {
            message: e.to_string(),
        })?;

        let turns = value.as_array().ok_or(SchemaError::RootNotArray)?;

        for (turn_index, turn) in turns.iter().enumerate() {
            validate_turn_shape(turn_index, turn)?;
        }

        let kind = probe_kind(turns);
        let dataset = match kind {
            DatasetKind::Basic => {
                let parsed: Vec<SpeakerTurn> =
                    serde_json::from_value(value).map_err(|e| SchemaError::InvalidJson {
                        message: e.to_string(),
                    })?;
                validate_basic_extractions(&parsed)?;
                Dataset::Basic(parsed)
            }
            DatasetKind::Ontology => {
                let parsed: Vec<OntologySpeakerTurn> =
                    serde_json::from_value(value).map_err(|e| SchemaError::InvalidJson {
                        message: e.to_string(),
                    })?;
                validate_ontology_extractions(&parsed)?;
                Dataset::Ontology(parsed)
            }
        };

        tracing::info!(
            kind = %dataset.kind(),
            turns = dataset.turn_count(),
            extractions = dataset.extraction_count(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Which schema variant this dataset follows.
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Basic(_) => DatasetKind::Basic,
            Dataset::Ontology(_) => DatasetKind::Ontology,
        }
    }

    /// Number of speaker turns.
    pub fn turn_count(&self) -> usize {
        match self {
            Dataset::Basic(turns) => turns.len(),
            Dataset::Ontology(turns) => turns.len(),
        }
    }

    /// Total number of extractions across all turns.
    pub fn extraction_count(&self) -> usize {
        match self {
            Dataset::Basic(turns) => turns.iter().map(|t| t.extractions.len()).sum(),
            Dataset::Ontology(turns) => turns.iter().map(|t| t.extractions.len()).sum(),
        }
    }

    /// Flatten every extraction into a [`TripleRow`] with turn provenance.
    pub fn rows(&self) -> Vec<TripleRow> {
        match self {
            Dataset::Basic(turns) => turns
                .iter()
                .flat_map(|turn| {
                    turn.extractions
                        .iter()
                        .map(|e| TripleRow::from_extraction(turn, e))
                })
                .collect(),
            Dataset::Ontology(turns) => turns
                .iter()
                .flat_map(|turn| {
                    turn.extractions
                        .iter()
                        .map(|e| TripleRow::from_ontology_extraction(turn, e))
                })
                .collect(),
        }
    }
}

/// Check one turn for the four required fields and their JSON types.
fn validate_turn_shape(turn_index: usize, turn: &Value) -> Result<(), SchemaError> {
    let obj = turn.as_object().ok_or(SchemaError::WrongType {
        turn_index,
        field: "speaker turn",
        expected: "object",
    })?;

    let require = |field: &'static str| {
        obj.get(field)
            .ok_or(SchemaError::MissingField { turn_index, field })
    };

    if !require("speaker_name")?.is_string() {
        return Err(SchemaError::WrongType {
            turn_index,
            field: "speaker_name",
            expected: "string",
        });
    }
    if !require("role")?.is_string() {
        return Err(SchemaError::WrongType {
            turn_index,
            field: "role",
            expected: "string",
        });
    }
    if !require("utterance_order")?.is_i64() {
        return Err(SchemaError::WrongType {
            turn_index,
            field: "utterance_order",
            expected: "integer",
        });
    }
    if !require("extractions")?.is_array() {
        return Err(SchemaError::WrongType {
            turn_index,
            field: "extractions",
            expected: "array",
        });
    }
    Ok(())
}

/// Decide the schema variant from the first extraction found.
///
/// Ontology-mode extractions carry an `ontology_mapping` block under their
/// subject; the probe runs once here and the result is carried as a tag, so
/// downstream code never re-probes structure.
fn probe_kind(turns: &[Value]) -> DatasetKind {
    for turn in turns {
        if let Some(extraction) = turn
            .get("extractions")
            .and_then(Value::as_array)
            .and_then(|e| e.first())
        {
            let has_mapping = extraction
                .get("subject")
                .and_then(|s| s.get("ontology_mapping"))
                .is_some();
            return if has_mapping {
                DatasetKind::Ontology
            } else {
                DatasetKind::Basic
            };
        }
    }
    DatasetKind::Basic
}

fn validate_basic_extractions(turns: &[SpeakerTurn]) -> Result<(), SchemaError> {
    for (turn_index, turn) in turns.iter().enumerate() {
        for (extraction_index, extraction) in turn.extractions.iter().enumerate() {
            let empty = |field: &'static str| SchemaError::EmptyField {
                turn_index,
                extraction_index,
                field,
            };
            if extraction.subject.name.trim().is_empty() {
                return Err(empty("subject_entity.name"));
            }
            if extraction.object.name.trim().is_empty() {
                return Err(empty("object_entity.name"));
            }
            if extraction.relation.semantic_form.trim().is_empty() {
                return Err(empty("relation.semantic_form"));
            }
        }
    }
    Ok(())
}

fn validate_ontology_extractions(turns: &[OntologySpeakerTurn]) -> Result<(), SchemaError> {
    for (turn_index, turn) in turns.iter().enumerate() {
        for (extraction_index, extraction) in turn.extractions.iter().enumerate() {
            let empty = |field: &'static str| SchemaError::EmptyField {
                turn_index,
                extraction_index,
                field,
            };
            if extraction.subject.canonical_name.trim().is_empty() {
                return Err(empty("subject.canonical_name"));
            }
            if extraction.object.canonical_name.trim().is_empty() {
                return Err(empty("object.canonical_name"));
            }
            if extraction.relation.surface_form.trim().is_empty() {
                return Err(empty("relation.surface_form"));
            }
        }
    }
    Ok(())
}
