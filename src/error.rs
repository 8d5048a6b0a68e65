//! Rich diagnostic error types for triplescope.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong in
//! their input data and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for triplescope.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ScopeError {
    #[error("failed to read input file {path}")]
    #[diagnostic(
        code(triplescope::io::read_input),
        help("Check the path passed via `--input`.")
    )]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

/// Malformed input data. Fatal to the load operation; a partially valid file
/// is rejected wholesale and any previously loaded dataset stays intact.
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("root of the input JSON must be an array of speaker turns")]
    #[diagnostic(
        code(triplescope::schema::root_not_array),
        help(
            "The extraction pipeline emits a JSON array at the top level. \
             Check that you are loading the extracted-data file, not a \
             single-turn fragment or a wrapper object."
        )
    )]
    RootNotArray,

    #[error("speaker turn {turn_index} is missing required field `{field}`")]
    #[diagnostic(
        code(triplescope::schema::missing_field),
        help(
            "Every speaker turn must carry `speaker_name`, `role`, \
             `utterance_order`, and `extractions` (which may be empty). \
             Re-run the extraction pipeline or fix the turn by hand."
        )
    )]
    MissingField {
        turn_index: usize,
        field: &'static str,
    },

    #[error("speaker turn {turn_index}: field `{field}` has the wrong type (expected {expected})")]
    #[diagnostic(
        code(triplescope::schema::wrong_type),
        help("Check the field against the extraction schema and correct its JSON type.")
    )]
    WrongType {
        turn_index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("speaker turn {turn_index}: extraction {extraction_index} has an empty `{field}`")]
    #[diagnostic(
        code(triplescope::schema::empty_field),
        help(
            "Subject name, object name, and the relation's semantic form must \
             all be non-empty. Drop the extraction or repair it upstream."
        )
    )]
    EmptyField {
        turn_index: usize,
        extraction_index: usize,
        field: &'static str,
    },

    #[error("failed to parse input JSON: {message}")]
    #[diagnostic(
        code(triplescope::schema::invalid_json),
        help("The file is not valid JSON. Check for truncation or encoding issues.")
    )]
    InvalidJson { message: String },
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Export failures. `NothingToExport` is non-fatal by policy: callers log it
/// and no-op rather than writing an empty file.
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("nothing to export: the current view is empty")]
    #[diagnostic(
        code(triplescope::export::nothing_to_export),
        help(
            "The active filters matched no extractions, or no dataset is \
             loaded. Relax the filters before exporting."
        )
    )]
    NothingToExport,

    #[error("I/O error writing export: {source}")]
    #[diagnostic(
        code(triplescope::export::io),
        help("Check that the output directory exists and is writable.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {message}")]
    #[diagnostic(code(triplescope::export::serde))]
    Serialization { message: String },
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// HTML report generation failures. All fatal to the report operation.
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("failed to load report template from {path}")]
    #[diagnostic(
        code(triplescope::report::template_load),
        help(
            "The template override could not be read. Check the path, or omit \
             `--template` to use the built-in dashboard template."
        )
    )]
    TemplateLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("report template has no data placeholder")]
    #[diagnostic(
        code(triplescope::report::bad_template),
        help(
            "A custom template must contain the `__TRIPLESCOPE_DATA__` marker \
             where the report payload is injected."
        )
    )]
    MissingPlaceholder,

    #[error("I/O error writing report: {source}")]
    #[diagnostic(
        code(triplescope::report::io),
        help("Check that the output directory exists and is writable.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    #[diagnostic(
        code(triplescope::config::read),
        help("Check the path passed via `--config`.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {message}")]
    #[diagnostic(
        code(triplescope::config::parse),
        help("The config must be valid TOML matching the ReportConfig fields.")
    )]
    Parse { message: String },
}

/// Convenience alias for functions returning triplescope results.
pub type ScopeResult<T> = std::result::Result<T, ScopeError>;
