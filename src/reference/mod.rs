use std::{io, sync::Arc};
use thiserror::Error;

mod cached;
mod models;
mod table;
pub use cached::*;
pub use models::*;
pub use table::*;

use crate::{shared::Lookup, store};

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Duplicate {kind} code {code}")]
    DuplicateCode { kind: &'static str, code: String },
}

/// Static route and fleet data, read-only for the lifetime of a run.
pub trait ReferenceData: Send + Sync {
    fn route(&self, code: &str) -> Lookup<Arc<RouteParameters>>;
    fn vehicle_plate(&self, code: &str) -> Lookup<String>;
}

/// Fallible point lookups against a persistent store.
pub trait ReferenceStore: Send + Sync {
    fn route(&self, code: &str) -> Result<Option<RouteParameters>, store::Error>;
    fn vehicle_plate(&self, code: &str) -> Result<Option<String>, store::Error>;
}

impl<T: ReferenceStore + ?Sized> ReferenceStore for Arc<T> {
    fn route(&self, code: &str) -> Result<Option<RouteParameters>, store::Error> {
        (**self).route(code)
    }

    fn vehicle_plate(&self, code: &str) -> Result<Option<String>, store::Error> {
        (**self).vehicle_plate(code)
    }
}
