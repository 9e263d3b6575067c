use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    shared::{Lookup, LookupCache},
    store,
};

/// Resolves a driver's document number from their personnel code.
pub trait IdentityLookup: Send + Sync {
    fn driver_document(&self, personnel_code: &str) -> Lookup<String>;
}

pub trait PersonnelStore: Send + Sync {
    /// `None` when there is no row, or the row has no document.
    fn document_by_code(&self, code: &str) -> Result<Option<String>, store::Error>;
}

impl<T: PersonnelStore + ?Sized> PersonnelStore for Arc<T> {
    fn document_by_code(&self, code: &str) -> Result<Option<String>, store::Error> {
        (**self).document_by_code(code)
    }
}

/// Best-effort, cache-fronted identity resolution.
///
/// Lookups never fail: a missing store or a failing query yields
/// [`Lookup::Unavailable`]. Misses are cached so a code is only queried once,
/// failures are not cached.
pub struct IdentityResolver {
    store: Option<Box<dyn PersonnelStore>>,
    cache: LookupCache<String>,
}

impl IdentityResolver {
    pub fn new<S: PersonnelStore + 'static>(store: S) -> Self {
        Self {
            store: Some(Box::new(store)),
            cache: LookupCache::new(),
        }
    }

    /// Resolver without a backing store, every lookup is unavailable.
    pub fn disconnected() -> Self {
        Self {
            store: None,
            cache: LookupCache::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

impl IdentityLookup for IdentityResolver {
    fn driver_document(&self, personnel_code: &str) -> Lookup<String> {
        let code = personnel_code.trim();
        if let Some(cached) = self.cache.get(code) {
            return cached;
        }

        let Some(store) = self.store.as_deref() else {
            warn!("No personnel store configured, document for {code:?} unavailable");
            return Lookup::Unavailable;
        };

        if code.is_empty() {
            warn!("Empty personnel code");
            self.cache.insert_miss(code);
            return Lookup::NotFound;
        }

        match store.document_by_code(code) {
            Ok(Some(document)) if !document.trim().is_empty() => {
                let document = document.trim().to_string();
                debug!(
                    "Document found for personnel code {code} ({} chars)",
                    document.len()
                );
                self.cache.insert(code, document.clone());
                Lookup::Found(document)
            }
            Ok(_) => {
                debug!("No document for personnel code {code}");
                self.cache.insert_miss(code);
                Lookup::NotFound
            }
            Err(err) => {
                warn!("Document lookup for personnel code {code} failed: {err}");
                Lookup::Unavailable
            }
        }
    }
}

/// Digits-only form of a document, `123.456.789-09` becomes `12345678909`.
pub fn document_digits(document: &str) -> String {
    document.replace(['.', '-'], "")
}

#[test]
fn document_digits_test() {
    assert_eq!(document_digits("123.456.789-09"), "12345678909");
    assert_eq!(document_digits("12345678909"), "12345678909");
    assert_eq!(document_digits(""), "");
}
