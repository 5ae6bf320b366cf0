use std::fmt;

use mercado_core::migration::{MigrationPass, MigrationResult};

/// Results of a full run, one entry per pass in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    entries: Vec<(MigrationPass, MigrationResult)>,
}

impl MigrationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pass: MigrationPass, result: MigrationResult) {
        self.entries.push((pass, result));
    }

    pub fn entries(&self) -> &[(MigrationPass, MigrationResult)] {
        &self.entries
    }

    pub fn results(&self) -> impl Iterator<Item = &MigrationResult> {
        self.entries.iter().map(|(_, result)| result)
    }

    pub fn result_for(&self, pass: MigrationPass) -> Option<&MigrationResult> {
        self.entries
            .iter()
            .find(|(p, _)| *p == pass)
            .map(|(_, result)| result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results().all(|r| r.success)
    }

    pub fn total_records_updated(&self) -> usize {
        self.results().map(|r| r.records_updated).sum()
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== MIGRATION RESULTS ===")?;
        for (index, (pass, result)) in self.entries.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Migration {} ({}):", index + 1, pass)?;
            writeln!(f, "  Success: {}", result.success)?;
            writeln!(f, "  Message: {}", result.message)?;
            writeln!(f, "  Records updated: {}", result.records_updated)?;
            if result.has_errors() {
                writeln!(f, "  Errors: {}", result.errors.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(n: usize) -> MigrationResult {
        let mut result = MigrationResult::new();
        result.records_updated = n;
        result.succeed(format!("done {}", n));
        result
    }

    #[test]
    fn test_totals() {
        let mut report = MigrationReport::new();
        report.push(MigrationPass::ClientesToUsers, ok(2));
        report.push(MigrationPass::PedidosToUserId, ok(3));

        assert_eq!(report.len(), 2);
        assert_eq!(report.total_records_updated(), 5);
        assert!(report.all_succeeded());
        assert_eq!(
            report
                .result_for(MigrationPass::PedidosToUserId)
                .map(|r| r.records_updated),
            Some(3)
        );
    }

    #[test]
    fn test_display_lists_errors_only_when_present() {
        let mut failed = MigrationResult::new();
        failed.fail("store offline");

        let mut report = MigrationReport::new();
        report.push(MigrationPass::ClientesToUsers, ok(1));
        report.push(MigrationPass::EnderecosToUserId, failed);

        let text = report.to_string();
        assert!(text.starts_with("=== MIGRATION RESULTS ==="));
        assert!(text.contains("Migration 1 (clientes -> users):"));
        assert!(text.contains("Migration 2 (enderecos -> userId):"));
        assert!(text.contains("  Success: false"));
        assert!(text.contains("  Errors: store offline"));
        assert_eq!(text.matches("Errors:").count(), 1);
        assert!(!report.all_succeeded());
    }
}
