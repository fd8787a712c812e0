// Module graph normalization for Rspack stats
//
// Visual-regression tooling only inspects top-level `modules` entries and
// their `reasons`. Rspack nests modules inside concatenated groups and
// wrapper entries, so this crate flattens the graph and appends synthesized
// top-level records without touching anything the bundler already emitted.

// Shape classification and concatenated-name detection
pub mod classify;

// Depth-first collection of module-like records
pub mod walk;

// Importer name recovery
pub mod reason;

// Raw record -> ModuleRecord
pub mod module;

// Document-level driver
pub mod contract;

// toJson wrapper
pub mod compat;

// Read-only verification of normalized documents
pub mod check;

// Lookups over top-level modules
pub mod query;

pub use check::{ContractReport, Violation, check_contract};
pub use classify::{RecordShape, classify, is_concatenated_module_name};
pub use compat::{
    CompatStats, DEFAULT_STATS_OPTIONS, StatsFn, StatsSource, merge_stats_options,
    with_stats_json_compat,
};
pub use contract::{NormalizeSummary, StatsNormalizer, with_minimal_contract};
pub use module::to_contract_module;
pub use query::{MatchMode, ModuleMatch, dependents_of, find_modules, importers_of};
pub use reason::reason_module_name;
pub use walk::collect_module_entries;
