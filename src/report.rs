//! Self-contained HTML report rendering.
//!
//! The report is one HTML file: template + embedded JSON payload. The
//! template is either the built-in dashboard or a caller-supplied override;
//! rendering replaces a single data marker, so names in the data can never
//! break the substitution.

use std::borrow::Cow;
use std::path::Path;

use serde::Serialize;

use crate::analytics::DatasetAnalytics;
use crate::error::ReportError;
use crate::graph::GraphView;
use crate::model::{DatasetKind, TripleRow};

/// Marker replaced with the serialized payload.
pub const DATA_PLACEHOLDER: &str = "__TRIPLESCOPE_DATA__";

const BUILTIN_TEMPLATE: &str = include_str!("../templates/report.html");

/// Everything the dashboard template needs, in one serializable bundle.
#[derive(Debug, Serialize)]
pub struct ReportPayload<'a> {
    pub title: &'a str,
    pub generated_at: String,
    pub dataset_kind: DatasetKind,
    pub analytics: &'a DatasetAnalytics,
    pub graph: &'a GraphView,
    pub extractions: &'a [TripleRow],
}

impl<'a> ReportPayload<'a> {
    pub fn new(
        title: &'a str,
        dataset_kind: DatasetKind,
        analytics: &'a DatasetAnalytics,
        graph: &'a GraphView,
        extractions: &'a [TripleRow],
    ) -> Self {
        Self {
            title,
            generated_at: chrono::Utc::now().to_rfc3339(),
            dataset_kind,
            analytics,
            graph,
            extractions,
        }
    }
}

/// Load the template: the built-in dashboard, or an override from disk.
pub fn load_template(path: Option<&Path>) -> Result<Cow<'static, str>, ReportError> {
    match path {
        None => Ok(Cow::Borrowed(BUILTIN_TEMPLATE)),
        Some(path) => {
            let raw =
                std::fs::read_to_string(path).map_err(|source| ReportError::TemplateLoad {
                    path: path.display().to_string(),
                    source,
                })?;
            Ok(Cow::Owned(raw))
        }
    }
}

/// Substitute the payload into the template.
pub fn render(template: &str, payload: &ReportPayload<'_>) -> Result<String, ReportError> {
    if !template.contains(DATA_PLACEHOLDER) {
        return Err(ReportError::MissingPlaceholder);
    }
    // to_string cannot fail here: the payload is plain data with no maps
    // keyed by non-strings.
    let json = serde_json::to_string(payload).unwrap_or_else(|_| "null".into());
    // Escape `</script>` sequences so evidence text cannot close the tag.
    let json = json.replace("</", "<\\/");
    Ok(template.replace(DATA_PLACEHOLDER, &json))
}

/// Write the rendered report to disk.
pub fn write_report(path: &Path, html: &str) -> Result<(), ReportError> {
    std::fs::write(path, html).map_err(|source| ReportError::Io { source })?;
    tracing::info!(path = %path.display(), bytes = html.len(), "report written");
    Ok(())
}
