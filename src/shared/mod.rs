pub mod cache;
pub mod geo;
pub mod time;

pub use cache::*;
pub use geo::*;
pub use time::*;

/// Outcome of a best-effort lookup against an external collaborator.
///
/// `NotFound` and `Unavailable` carry the same meaning for the trip pipeline (the
/// field stays blank). They are kept apart so the boundary can log the difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Unavailable,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Unavailable => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Lookup::Found(_) => "found",
            Lookup::NotFound => "not_found",
            Lookup::Unavailable => "unavailable",
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}
