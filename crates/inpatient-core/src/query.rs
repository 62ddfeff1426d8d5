//! Query engine over the patient collection.
//!
//! The engine owns the canonical, arrival-ordered collection and a derived
//! view. The view is rebuilt from scratch after every change to the
//! collection, the search term or the sort directive, so it is always
//! `derive_view(collection, term, directive)`.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::RegistryConfig;
use crate::models::{Patient, SortDirective, SortKey};
use crate::pagination::{paginate, Page};
use crate::seed::{SeedError, SeedProvider, SeedResult};

/// Load errors.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("Seed fetch failed: {0}")]
    Seed(Arc<SeedError>),

    #[error("Load was cancelled")]
    Cancelled,

    #[error("Load task aborted: {0}")]
    Aborted(String),

    #[error("Load superseded by a newer request")]
    Superseded,
}

impl From<SeedError> for LoadError {
    fn from(e: SeedError) -> Self {
        LoadError::Seed(Arc::new(e))
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Filter and sort `patients` into a view.
///
/// Keeps records matching `term`, then stable-sorts them by `sort` if one is
/// given. Equal keys keep their arrival order.
pub fn derive_view(patients: &[Patient], term: &str, sort: Option<SortDirective>) -> Vec<Patient> {
    let mut view: Vec<Patient> = patients
        .iter()
        .filter(|patient| patient.matches(term))
        .cloned()
        .collect();

    if let Some(directive) = sort {
        view.sort_by(|a, b| directive.compare(a, b));
    }

    view
}

/// A seed fetch running on the tokio runtime.
#[derive(Debug)]
pub struct PendingLoad {
    generation: u64,
    handle: JoinHandle<SeedResult<Vec<Patient>>>,
}

impl PendingLoad {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Abort the fetch. [`join`](Self::join) then reports `Cancelled`.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the fetch to finish.
    pub async fn join(self) -> CompletedLoad {
        let result = match self.handle.await {
            Ok(fetched) => fetched.map_err(LoadError::from),
            Err(e) if e.is_cancelled() => Err(LoadError::Cancelled),
            Err(e) => Err(LoadError::Aborted(e.to_string())),
        };
        CompletedLoad {
            generation: self.generation,
            result,
        }
    }
}

/// Outcome of a finished seed fetch, ready to hand back to the engine.
#[derive(Debug)]
pub struct CompletedLoad {
    pub generation: u64,
    pub result: LoadResult<Vec<Patient>>,
}

/// Patient collection with search, sort and pagination state.
#[derive(Debug)]
pub struct QueryEngine {
    patients: Vec<Patient>,
    search_term: String,
    sort: Option<SortDirective>,
    view: Vec<Patient>,
    current_page: usize,
    page_size: usize,
    loading: bool,
    load_generation: u64,
    last_load_error: Option<LoadError>,
}

impl QueryEngine {
    /// Create an empty engine: no records, no search term, no sort, page 1.
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            patients: Vec::new(),
            search_term: String::new(),
            sort: None,
            view: Vec::new(),
            current_page: 1,
            page_size: config.page_size(),
            loading: false,
            load_generation: 0,
            last_load_error: None,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetch the seed and replace the collection with it.
    ///
    /// On failure the collection is left untouched. Nothing is retried.
    pub async fn load<P: SeedProvider>(&mut self, provider: &P) -> LoadResult<usize> {
        let generation = self.begin_load();
        let result = provider.fetch().await.map_err(LoadError::from);
        self.finish_load(CompletedLoad { generation, result })
    }

    /// Spawn the seed fetch and mark the engine as loading.
    ///
    /// Must be called from within a tokio runtime. Hand the joined result to
    /// [`finish_load`](Self::finish_load).
    pub fn start_load<P>(&mut self, provider: Arc<P>) -> PendingLoad
    where
        P: SeedProvider + 'static,
    {
        let generation = self.begin_load();
        let handle = tokio::spawn(async move { provider.fetch().await });
        PendingLoad { generation, handle }
    }

    /// Commit a finished load.
    ///
    /// Results from a load that has since been superseded or cancelled are
    /// discarded without touching any state.
    pub fn finish_load(&mut self, completed: CompletedLoad) -> LoadResult<usize> {
        if completed.generation != self.load_generation || !self.loading {
            tracing::warn!(generation = completed.generation, "discarding stale load result");
            return Err(LoadError::Superseded);
        }

        self.loading = false;
        match completed.result {
            Ok(patients) => {
                let count = patients.len();
                self.patients = patients;
                self.last_load_error = None;
                self.recompute();
                tracing::info!(count, "patient list loaded");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "patient list load failed");
                self.last_load_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Give up on the in-flight load, if any.
    ///
    /// Clears the loading flag; a late result is then treated as stale.
    pub fn cancel_load(&mut self) {
        if self.loading {
            self.loading = false;
            self.load_generation += 1;
            self.last_load_error = Some(LoadError::Cancelled);
            tracing::warn!("patient list load cancelled");
        }
    }

    fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.loading = true;
        self.load_generation
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append an already-validated record and refresh the view.
    pub fn add(&mut self, patient: Patient) {
        tracing::debug!(id = %patient.id, "adding patient");
        self.patients.push(patient);
        self.recompute();
    }

    /// Replace the search term and go back to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
        self.recompute();
    }

    /// Replace the sort directive. `None` restores arrival order.
    pub fn set_sort_directive(&mut self, directive: Option<SortDirective>) {
        self.sort = directive;
        self.recompute();
    }

    /// Sort by `key`, flipping direction if it is already the ascending key.
    pub fn toggle_sort(&mut self, key: SortKey) -> SortDirective {
        let directive = SortDirective::toggle(self.sort, key);
        self.set_sort_directive(Some(directive));
        directive
    }

    /// Set the current page verbatim. Out-of-range pages show nothing.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    fn recompute(&mut self) {
        self.view = derive_view(&self.patients, &self.search_term, self.sort);
        tracing::debug!(
            total = self.patients.len(),
            visible = self.view.len(),
            term = %self.search_term,
            sort = ?self.sort,
            "view recomputed"
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Canonical collection in arrival order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Filtered and sorted view.
    pub fn view(&self) -> &[Patient] {
        &self.view
    }

    /// The visible slice of the view for the current page.
    pub fn page(&self) -> Page<'_, Patient> {
        paginate(&self.view, self.current_page, self.page_size)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_directive(&self) -> Option<SortDirective> {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error from the most recent load, cleared by the next successful one.
    pub fn last_load_error(&self) -> Option<&LoadError> {
        self.last_load_error.as_ref()
    }
}
