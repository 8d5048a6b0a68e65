//! Session facade: the single context object owning one loaded dataset,
//! its analytics, and the active filter set.
//!
//! Every operation goes through the session; there is no ambient state.
//! Loads are atomic — a failed load leaves the previous dataset, analytics,
//! and filters untouched. Filtered views and graphs are recomputed on every
//! request rather than cached, which keeps them consistent by construction.

use std::path::Path;

use crate::analytics::{self, DatasetAnalytics};
use crate::config::ReportConfig;
use crate::error::{ExportError, ScopeError, ScopeResult};
use crate::export;
use crate::filter::{self, FilterSet};
use crate::graph::builder;
use crate::graph::expand::{self, NameAdjacency};
use crate::graph::GraphView;
use crate::model::ontology::MappingStatus;
use crate::model::{DatasetKind, TripleRow};
use crate::report::{self, ReportPayload};
use crate::store::Dataset;

/// The result of applying the active filters: the surviving turns (kind
/// preserved) and their flattened rows.
#[derive(Debug, Clone)]
pub struct FilteredView {
    pub dataset: Dataset,
    pub rows: Vec<TripleRow>,
}

impl FilteredView {
    pub fn turn_count(&self) -> usize {
        self.dataset.turn_count()
    }

    pub fn extraction_count(&self) -> usize {
        self.rows.len()
    }
}

/// One analysis session: a loaded dataset plus its derived state.
#[derive(Debug)]
pub struct Session {
    config: ReportConfig,
    dataset: Option<Dataset>,
    analytics: Option<DatasetAnalytics>,
    filters: FilterSet,
}

impl Session {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            dataset: None,
            analytics: None,
            filters: FilterSet::default(),
        }
    }

    /// Load a dataset from a file. Prior state survives any failure.
    pub fn load_file(&mut self, path: &Path) -> ScopeResult<()> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScopeError::ReadInput {
            path: path.display().to_string(),
            source,
        })?;
        self.load_str(&raw)
    }

    /// Load a dataset from raw JSON. Prior state survives any failure.
    ///
    /// A successful load replaces the store and all derived indexes
    /// wholesale and resets the filter set.
    pub fn load_str(&mut self, raw: &str) -> ScopeResult<()> {
        let dataset = Dataset::load(raw)?;
        let analytics = analytics::analyze_dataset(&dataset, &self.config);
        self.dataset = Some(dataset);
        self.analytics = Some(analytics);
        self.filters = FilterSet::default();
        Ok(())
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn analytics(&self) -> Option<&DatasetAnalytics> {
        self.analytics.as_ref()
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Replace the whole filter set.
    pub fn set_filters(&mut self, filters: FilterSet) -> FilteredView {
        self.filters = filters;
        self.filtered_view()
    }

    /// Mutate part of the filter set in place.
    pub fn update_filters(&mut self, update: impl FnOnce(&mut FilterSet)) -> FilteredView {
        update(&mut self.filters);
        self.filtered_view()
    }

    /// Set the mapping-status filter; selecting the active value again
    /// clears it.
    pub fn toggle_mapping_status(&mut self, status: MappingStatus) -> FilteredView {
        if self.filters.mapping_status_filter == Some(status) {
            self.filters.mapping_status_filter = None;
        } else {
            self.filters.mapping_status_filter = Some(status);
        }
        self.filtered_view()
    }

    pub fn clear_filters(&mut self) -> FilteredView {
        self.filters = FilterSet::default();
        self.filtered_view()
    }

    /// Apply the active filters to the loaded dataset.
    ///
    /// With no dataset loaded the view is empty; an empty result is a valid
    /// view, never an error.
    pub fn filtered_view(&self) -> FilteredView {
        let dataset = match &self.dataset {
            Some(dataset) => filter::apply_dataset(dataset, &self.filters),
            None => Dataset::Basic(Vec::new()),
        };
        let rows = dataset.rows();
        FilteredView { dataset, rows }
    }

    /// Build the graph view of the current filtered state, expanded by
    /// `hops` levels of context over the full dataset's adjacency.
    pub fn graph(&self, hops: usize) -> GraphView {
        let filtered_rows = self.filtered_view().rows;
        let rows = if hops == 0 {
            filtered_rows
        } else {
            let all_rows = match &self.dataset {
                Some(dataset) => dataset.rows(),
                None => Vec::new(),
            };
            let adjacency = NameAdjacency::new(&all_rows);
            let expanded = adjacency.expand(&expand::seed_names(&filtered_rows), hops);
            expand::select_rows(&all_rows, &expanded)
        };
        builder::build(&rows, &self.config)
    }

    /// Entity-type frequency table as CSV (basic datasets).
    pub fn export_entity_types_csv(&self) -> Result<String, ExportError> {
        match &self.analytics {
            Some(DatasetAnalytics::Basic(analytics)) => {
                export::entity_types_csv(&analytics.entity_types)
            }
            _ => Err(ExportError::NothingToExport),
        }
    }

    /// Full analytics bundle as pretty JSON.
    pub fn export_analytics_json(&self) -> Result<String, ExportError> {
        match &self.analytics {
            Some(analytics) => export::analytics_json(analytics),
            None => Err(ExportError::NothingToExport),
        }
    }

    /// The current filtered view as pretty JSON.
    pub fn export_filtered_json(&self) -> Result<String, ExportError> {
        export::filtered_view_json(&self.filtered_view().rows)
    }

    /// Render and write the HTML dashboard for the current state.
    pub fn write_report(
        &self,
        output: &Path,
        template_override: Option<&Path>,
        hops: usize,
    ) -> ScopeResult<()> {
        let (dataset, analytics) = match (&self.dataset, &self.analytics) {
            (Some(dataset), Some(analytics)) => (dataset, analytics),
            _ => return Err(ExportError::NothingToExport.into()),
        };
        let view = self.filtered_view();
        let graph = self.graph(hops);
        let template = report::load_template(template_override)?;
        let payload = ReportPayload::new(
            &self.config.report_title,
            dataset.kind(),
            analytics,
            &graph,
            &view.rows,
        );
        let html = report::render(&template, &payload)?;
        report::write_report(output, &html)?;
        Ok(())
    }

    /// Summary of the session state.
    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            kind: self.dataset.as_ref().map(Dataset::kind),
            turn_count: self.dataset.as_ref().map_or(0, Dataset::turn_count),
            extraction_count: self.dataset.as_ref().map_or(0, Dataset::extraction_count),
            filters_active: self.filters.is_active(),
        }
    }
}

/// Summary information about a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionInfo {
    pub kind: Option<DatasetKind>,
    pub turn_count: usize,
    pub extraction_count: usize,
    pub filters_active: bool,
}

impl std::fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "triplescope session")?;
        match self.kind {
            Some(kind) => writeln!(f, "  dataset:      {kind}")?,
            None => writeln!(f, "  dataset:      (none loaded)")?,
        }
        writeln!(f, "  turns:        {}", self.turn_count)?;
        writeln!(f, "  extractions:  {}", self.extraction_count)?;
        writeln!(f, "  filters:      {}", if self.filters_active { "active" } else { "none" })?;
        Ok(())
    }
}
