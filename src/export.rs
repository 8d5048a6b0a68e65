//! Export adapter: CSV and JSON renditions of analytics and filtered views.
//!
//! Empty inputs surface [`ExportError::NothingToExport`] instead of writing
//! empty files; callers log the condition and no-op, leaving prior state
//! untouched.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analytics::DatasetAnalytics;
use crate::analytics::frequency::EntityTypeInfo;
use crate::analytics::patterns::StructuralPattern;
use crate::error::ExportError;
use crate::model::TripleRow;

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Render the entity-type table as CSV.
pub fn entity_types_csv(entity_types: &[EntityTypeInfo]) -> Result<String, ExportError> {
    if entity_types.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let mut out = String::from("entity_type,count,utterance_count\n");
    for info in entity_types {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_escape(&info.name),
            info.count,
            info.utterance_count
        ));
    }
    Ok(out)
}

/// Render the full structural-pattern list as CSV.
pub fn patterns_csv(patterns: &[StructuralPattern]) -> Result<String, ExportError> {
    if patterns.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    let mut out = String::from("subject_type,relation,object_type,count\n");
    for pattern in patterns {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_escape(&pattern.subject_type),
            csv_escape(&pattern.relation),
            csv_escape(&pattern.object_type),
            pattern.count
        ));
    }
    Ok(out)
}

#[derive(Serialize)]
struct AnalyticsExport<'a> {
    #[serde(rename = "exportedAt")]
    exported_at: String,
    #[serde(flatten)]
    analytics: &'a DatasetAnalytics,
}

#[derive(Serialize)]
struct FilteredViewExport<'a> {
    #[serde(rename = "exportedAt")]
    exported_at: String,
    extraction_count: usize,
    extractions: &'a [TripleRow],
}

fn pretty<T: Serialize>(value: &T) -> Result<String, ExportError> {
    serde_json::to_string_pretty(value).map_err(|e| ExportError::Serialization {
        message: e.to_string(),
    })
}

/// Render the analytics bundle as pretty JSON with an export timestamp.
pub fn analytics_json(analytics: &DatasetAnalytics) -> Result<String, ExportError> {
    pretty(&AnalyticsExport {
        exported_at: chrono::Utc::now().to_rfc3339(),
        analytics,
    })
}

/// Render the current filtered view (flat triple rows) as pretty JSON.
pub fn filtered_view_json(rows: &[TripleRow]) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NothingToExport);
    }
    pretty(&FilteredViewExport {
        exported_at: chrono::Utc::now().to_rfc3339(),
        extraction_count: rows.len(),
        extractions: rows,
    })
}

/// Write an export to disk.
pub fn write_export(path: &Path, content: &str) -> Result<(), ExportError> {
    std::fs::write(path, content).map_err(|source| ExportError::Io { source })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "export written");
    Ok(())
}

/// Build a collision-free output path: `<dir>/<prefix>_<UTC timestamp>.<ext>`.
pub fn timestamped_path(dir: &Path, prefix: &str, ext: &str) -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    dir.join(format!("{prefix}_{stamp}.{ext}"))
}
