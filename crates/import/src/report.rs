//! Per-row outcomes and the aggregate run report.

use serde::{Deserialize, Serialize};

/// Terminal state of one row. Exactly one per input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Success,
    Error,
    Warning,
}

/// The decision recorded for one input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// 1-based row position in the source file.
    pub row_number: usize,
    pub tax_id: Option<String>,
    pub legal_name: Option<String>,
    pub kind: OutcomeKind,
    pub message: String,
}

impl ImportOutcome {
    pub fn success(row_number: usize, tax_id: Option<String>, legal_name: Option<String>, message: impl Into<String>) -> Self {
        Self::new(row_number, tax_id, legal_name, OutcomeKind::Success, message)
    }

    pub fn error(row_number: usize, tax_id: Option<String>, legal_name: Option<String>, message: impl Into<String>) -> Self {
        Self::new(row_number, tax_id, legal_name, OutcomeKind::Error, message)
    }

    pub fn warning(row_number: usize, tax_id: Option<String>, legal_name: Option<String>, message: impl Into<String>) -> Self {
        Self::new(row_number, tax_id, legal_name, OutcomeKind::Warning, message)
    }

    fn new(
        row_number: usize,
        tax_id: Option<String>,
        legal_name: Option<String>,
        kind: OutcomeKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_number,
            tax_id,
            legal_name,
            kind,
            message: message.into(),
        }
    }
}

/// Aggregate result of one reconciliation run.
///
/// Outcomes are append-only and kept in input order. Counters are maintained
/// by [`ImportReport::push`], so `successes + errors + warnings` always equals
/// the number of outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    success_count: usize,
    error_count: usize,
    warning_count: usize,
    outcomes: Vec<ImportOutcome>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one row's decision, bumping the matching counter.
    pub fn push(&mut self, outcome: ImportOutcome) {
        match outcome.kind {
            OutcomeKind::Success => self.success_count += 1,
            OutcomeKind::Error => self.error_count += 1,
            OutcomeKind::Warning => self.warning_count += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn outcomes(&self) -> &[ImportOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Invariant check: counters agree with the outcome list.
    pub fn is_consistent(&self) -> bool {
        self.success_count + self.error_count + self.warning_count == self.outcomes.len()
    }
}

/// One message tied to a row number (preflight reporting).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMessage {
    pub row_number: usize,
    pub message: String,
}

/// Result of a dry-run validation pass (no lookups, no persistence).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightReport {
    /// Rows that would pass structural and tax-id checks.
    pub valid_count: usize,
    /// Rows that would be rejected outright.
    pub invalid_count: usize,
    pub warnings: Vec<RowMessage>,
    pub errors: Vec<RowMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_counters_consistent() {
        let mut report = ImportReport::new();
        report.push(ImportOutcome::success(2, None, None, "imported successfully"));
        report.push(ImportOutcome::error(3, None, None, "invalid tax id"));
        report.push(ImportOutcome::warning(4, None, None, "already exists - skipped"));
        report.push(ImportOutcome::error(5, None, None, "required fields missing"));

        assert_eq!(report.success_count(), 1);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.len(), 4);
        assert!(report.is_consistent());
    }

    #[test]
    fn outcomes_preserve_insertion_order() {
        let mut report = ImportReport::new();
        for row in 2..=6 {
            report.push(ImportOutcome::success(row, None, None, "ok"));
        }
        let rows: Vec<usize> = report.outcomes().iter().map(|o| o.row_number).collect();
        assert_eq!(rows, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn report_serializes_with_counts_and_rows() {
        let mut report = ImportReport::new();
        report.push(ImportOutcome::success(
            2,
            Some("123456785".to_string()),
            Some("Empresa A".to_string()),
            "imported successfully",
        ));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success_count"], 1);
        assert_eq!(json["outcomes"][0]["row_number"], 2);
        assert_eq!(json["outcomes"][0]["kind"], "success");
    }
}
