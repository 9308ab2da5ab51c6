//! Boundary between the engine and whatever produces filter catalogs.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::LoadError;
use crate::wire::{CategoryItem, FiltersResponse};

/// Identifies which filter set a loader should produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterSetKind(String);

impl FilterSetKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared flag a loader polls to abandon work nobody is waiting for.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub type LoadResult = Result<FiltersResponse, LoadError>;

/// Callback handed to a loader. It may be invoked from any thread.
pub type LoadCompletion = Box<dyn FnOnce(LoadResult) + Send + 'static>;

/// Produces filter catalogs asynchronously.
///
/// Implementations must invoke `completion` exactly once, either with the
/// payload or with an error. A cancelled request should complete with
/// [`LoadError::Cancelled`].
pub trait FilterLoader {
    fn load(&self, kind: &FilterSetKind, cancel: CancelToken, completion: LoadCompletion);
}

impl<L: FilterLoader + ?Sized> FilterLoader for &L {
    fn load(&self, kind: &FilterSetKind, cancel: CancelToken, completion: LoadCompletion) {
        (**self).load(kind, cancel, completion);
    }
}

impl<L: FilterLoader + ?Sized> FilterLoader for Box<L> {
    fn load(&self, kind: &FilterSetKind, cancel: CancelToken, completion: LoadCompletion) {
        (**self).load(kind, cancel, completion);
    }
}

impl<L: FilterLoader + ?Sized> FilterLoader for Arc<L> {
    fn load(&self, kind: &FilterSetKind, cancel: CancelToken, completion: LoadCompletion) {
        (**self).load(kind, cancel, completion);
    }
}

/// Supplies the locally defined parameter categories appended after remote filters.
pub trait ParameterSource {
    fn local_parameters(&self) -> Vec<CategoryItem>;
}

impl ParameterSource for Vec<CategoryItem> {
    fn local_parameters(&self) -> Vec<CategoryItem> {
        self.clone()
    }
}

/// Loader answering synchronously from an in-memory payload.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    response: FiltersResponse,
}

impl StaticLoader {
    pub fn new(response: FiltersResponse) -> Self {
        Self { response }
    }
}

impl FilterLoader for StaticLoader {
    fn load(&self, kind: &FilterSetKind, cancel: CancelToken, completion: LoadCompletion) {
        if cancel.is_cancelled() {
            completion(Err(LoadError::Cancelled));
            return;
        }
        log::debug!("serving filter set {kind} from memory");
        completion(Ok(self.response.clone()));
    }
}
