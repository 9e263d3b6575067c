use roleta::shared::Lookup;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DriverDto {
    pub code: String,
    pub outcome: &'static str,
    pub document: Option<String>,
    pub document_length: usize,
}

impl DriverDto {
    pub fn from(code: String, lookup: Lookup<String>) -> Self {
        let outcome = lookup.label();
        let document = lookup.found();
        let document_length = document.as_deref().map(str::len).unwrap_or_default();
        Self {
            code,
            outcome,
            document,
            document_length,
        }
    }
}
