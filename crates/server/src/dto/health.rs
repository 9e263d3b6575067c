use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pessoa_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthDto {
    pub fn connected(pessoa_count: u64) -> Self {
        Self {
            status: "connected",
            pessoa_count: Some(pessoa_count),
            error: None,
        }
    }

    pub fn unavailable<S: Into<String>>(error: S) -> Self {
        Self {
            status: "error",
            pessoa_count: None,
            error: Some(error.into()),
        }
    }
}
