use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    reference::{ReferenceData, ReferenceStore, RouteParameters},
    shared::{Lookup, LookupCache},
};

/// Store-backed reference data, fronted by process-wide caches.
///
/// Misses are cached, store failures are not.
pub struct CachedReferenceData<S> {
    store: S,
    routes: LookupCache<Arc<RouteParameters>>,
    plates: LookupCache<String>,
}

impl<S: ReferenceStore> CachedReferenceData<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            routes: LookupCache::new(),
            plates: LookupCache::new(),
        }
    }
}

impl<S: ReferenceStore> ReferenceData for CachedReferenceData<S> {
    fn route(&self, code: &str) -> Lookup<Arc<RouteParameters>> {
        let code = code.trim();
        if let Some(cached) = self.routes.get(code) {
            return cached;
        }
        match self.store.route(code) {
            Ok(Some(route)) => {
                let route = Arc::new(route);
                self.routes.insert(code, route.clone());
                Lookup::Found(route)
            }
            Ok(None) => {
                debug!("Route {code} not found in store");
                self.routes.insert_miss(code);
                Lookup::NotFound
            }
            Err(err) => {
                warn!("Route lookup for {code} unavailable: {err}");
                Lookup::Unavailable
            }
        }
    }

    fn vehicle_plate(&self, code: &str) -> Lookup<String> {
        let code = code.trim();
        if let Some(cached) = self.plates.get(code) {
            return cached;
        }
        match self.store.vehicle_plate(code) {
            Ok(Some(plate)) if !plate.trim().is_empty() => {
                let plate = plate.trim().to_string();
                self.plates.insert(code, plate.clone());
                Lookup::Found(plate)
            }
            Ok(_) => {
                debug!("Vehicle {code} has no plate in store");
                self.plates.insert_miss(code);
                Lookup::NotFound
            }
            Err(err) => {
                warn!("Vehicle lookup for {code} unavailable: {err}");
                Lookup::Unavailable
            }
        }
    }
}
