//! # triplescope
//!
//! Analytics, filtering, and graph views for semantic triples extracted from
//! oral-history interview transcripts by an upstream LLM pipeline.
//!
//! ## Architecture
//!
//! - **Triple store** (`store`): atomic, schema-checked loading of extraction
//!   files; basic and ontology-population variants tagged at load time
//! - **Analytics** (`analytics`): entity-type frequency tiers, structural
//!   patterns, relation cardinality, domain/range diversity
//! - **Filter engine** (`filter`): composable AND-of-ORs predicates over
//!   extractions
//! - **Graph builder** (`graph`): aggregated node/edge views with hop
//!   expansion for context discovery
//! - **Exports** (`export`, `report`): CSV/JSON tables and a self-contained
//!   HTML dashboard
//!
//! ## Library usage
//!
//! ```no_run
//! use triplescope::config::ReportConfig;
//! use triplescope::session::Session;
//!
//! let mut session = Session::new(ReportConfig::default());
//! session.load_file(std::path::Path::new("extracted_data.json")).unwrap();
//! let view = session.update_filters(|f| {
//!     f.type_filters.insert("Person".into());
//! });
//! let graph = session.graph(1);
//! println!("{} turns, {} nodes", view.turn_count(), graph.nodes.len());
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod graph;
pub mod model;
pub mod report;
pub mod session;
pub mod store;
