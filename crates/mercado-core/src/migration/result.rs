use serde::{Deserialize, Serialize};

/// Outcome of one migration pass.
///
/// Built up by the orchestrator while the pass runs and handed back once
/// the pass ends; it is not touched afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub success: bool,
    pub message: String,
    pub records_updated: usize,
    pub errors: Vec<String>,
}

impl MigrationResult {
    /// A result for a pass that has not finished yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Marks the pass as finished successfully.
    pub fn succeed(&mut self, message: impl Into<String>) {
        self.success = true;
        self.message = message.into();
    }

    /// Marks the pass as aborted by a fatal error.
    ///
    /// The error text lands both in `message` and at the end of `errors`.
    pub fn fail(&mut self, error: impl std::fmt::Display) {
        let text = error.to_string();
        self.success = false;
        self.message = format!("Migration failed: {}", text);
        self.errors.push(text);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
