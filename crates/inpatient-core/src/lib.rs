//! Inpatient Registry Core Library
//!
//! In-memory registration and listing of admitted patients.
//!
//! # Architecture
//!
//! ```text
//! SeedProvider ──load──┐            PatientForm
//!                      │                 │
//!                      │          Intake::submit (validate, sanitize, id)
//!                      │                 │
//!                      ▼                 ▼ add
//!          ┌───────────────────────────────────────┐
//!          │              QueryEngine              │
//!          │  canonical collection (arrival order) │
//!          │  search term, sort directive          │
//!          │  view = sort(filter(collection))      │
//!          └───────────────────┬───────────────────┘
//!                              │
//!                          paginate ──► Page { items, totals, start..end }
//! ```
//!
//! # Core Principle
//!
//! **The view is never patched.** Every change to the collection, the search
//! term or the sort directive rebuilds it from the canonical collection.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, SortDirective, option catalogues)
//! - [`intake`]: Form validation, input sanitising and ID generation
//! - [`query`]: Query engine, view derivation and seed loading
//! - [`pagination`]: Page slicing and page-number windowing
//! - [`seed`]: Seed providers (demo ward, JSON file)
//! - [`config`]: Runtime configuration

pub mod config;
pub mod intake;
pub mod models;
pub mod pagination;
pub mod query;
pub mod seed;

// Re-export commonly used types
pub use config::{ConfigError, RegistryConfig};
pub use intake::{FormErrors, FormField, IdGenerator, Intake, PatientForm};
pub use models::{Patient, SortDirection, SortDirective, SortKey};
pub use pagination::{page_window, paginate, Page};
pub use query::{derive_view, CompletedLoad, LoadError, PendingLoad, QueryEngine};
pub use seed::{DemoSeed, JsonFileSeed, SeedError, SeedProvider};
