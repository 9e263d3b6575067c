use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use roleta::{
    identity::{IdentityLookup, IdentityResolver, PersonnelStore},
    shared::Lookup,
    store::{self, Database},
};

/// Counts queries and fails the first `failures` of them.
struct FlakyStore {
    calls: AtomicUsize,
    failures: usize,
}

impl PersonnelStore for FlakyStore {
    fn document_by_code(&self, _code: &str) -> Result<Option<String>, store::Error> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(store::Error::UnsupportedUrl("offline".into()))
        } else {
            Ok(Some("987.654.321-00".into()))
        }
    }
}

fn seeded_database() -> Arc<Database> {
    let database = Database::in_memory().unwrap();
    database.insert_person(951716, Some("123.456.789-09")).unwrap();
    database.insert_person(42, None).unwrap();
    database.insert_person(43, Some("  ")).unwrap();
    Arc::new(database)
}

#[test]
fn found_document_test() {
    let resolver = IdentityResolver::new(seeded_database());
    assert_eq!(
        resolver.driver_document("951716"),
        Lookup::Found("123.456.789-09".to_string())
    );
    assert_eq!(
        resolver.driver_document(" 951716 "),
        Lookup::Found("123.456.789-09".to_string())
    );
    assert_eq!(resolver.cached_entries(), 1);
}

#[test]
fn null_or_blank_document_test() {
    let resolver = IdentityResolver::new(seeded_database());
    assert_eq!(resolver.driver_document("42"), Lookup::NotFound);
    assert_eq!(resolver.driver_document("43"), Lookup::NotFound);
}

#[test]
fn unknown_code_is_cached_test() {
    let database = seeded_database();
    let resolver = IdentityResolver::new(database.clone());
    assert_eq!(resolver.driver_document("1234"), Lookup::NotFound);
    database.insert_person(1234, Some("111.222.333-44")).unwrap();
    assert_eq!(resolver.driver_document("1234"), Lookup::NotFound);
}

#[test]
fn non_numeric_code_test() {
    let resolver = IdentityResolver::new(seeded_database());
    assert_eq!(resolver.driver_document("abc"), Lookup::NotFound);
    assert_eq!(resolver.driver_document(""), Lookup::NotFound);
}

#[test]
fn disconnected_resolver_test() {
    let resolver = IdentityResolver::disconnected();
    assert!(!resolver.is_connected());
    assert_eq!(resolver.driver_document("951716"), Lookup::Unavailable);
    assert_eq!(resolver.cached_entries(), 0);
}

#[test]
fn failures_are_not_cached_test() {
    let store = Arc::new(FlakyStore {
        calls: AtomicUsize::new(0),
        failures: 1,
    });
    let resolver = IdentityResolver::new(store.clone());
    assert_eq!(resolver.driver_document("7"), Lookup::Unavailable);
    assert_eq!(
        resolver.driver_document("7"),
        Lookup::Found("987.654.321-00".to_string())
    );
    assert_eq!(resolver.driver_document("7").label(), "found");
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
}
