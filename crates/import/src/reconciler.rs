//! The bulk import reconciler (row-by-row pipeline).
//!
//! Per-row state machine, each row reaching exactly one terminal outcome:
//!
//! ```text
//! normalized row
//!   -> required fields missing?            error
//!   -> tax id checksum fails?              error
//!   -> (config) registry lookup fails?     warning, row still proceeds
//!   -> (config) duplicate in store?        warning, row skipped
//!   -> insert
//!      -> store rejects?                   error (store detail in message)
//!   -> (config) post-commit hooks          best-effort, never change outcome
//!   -> success
//! ```
//!
//! Rows run sequentially and are fault-isolated: a row's failure is recorded,
//! never thrown past the row boundary. Every collaborator call is bounded by
//! the configured timeout so a single hung call cannot stall the batch.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use contaflow_clients::{ClientContact, NewClient};
use contaflow_core::TenantId;
use contaflow_taxid::Rut;

use crate::config::ImportConfig;
use crate::hooks::{OnboardingTrigger, WelcomeNotifier};
use crate::record::ImportRecord;
use crate::registry::{OfficialRecord, RegistryLookup};
use crate::report::{ImportOutcome, ImportReport, PreflightReport, RowMessage};
use crate::store::ClientStore;

const MSG_IMPORTED: &str = "imported successfully";
const MSG_UNVERIFIED: &str = "could not verify against official registry; imported using file data";
const MSG_NOT_IN_REGISTRY: &str = "not found in official registry; imported using file data";

/// Orchestrates one import run against the injected collaborators.
///
/// The store is required; registry and post-commit hooks are optional and
/// additionally gated by [`ImportConfig`] flags.
pub struct Reconciler<S> {
    store: S,
    registry: Option<Arc<dyn RegistryLookup>>,
    onboarding: Option<Arc<dyn OnboardingTrigger>>,
    notifier: Option<Arc<dyn WelcomeNotifier>>,
}

impl<S: ClientStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: None,
            onboarding: None,
            notifier: None,
        }
    }

    pub fn with_registry(mut self, registry: Arc<dyn RegistryLookup>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_onboarding(mut self, trigger: Arc<dyn OnboardingTrigger>) -> Self {
        self.onboarding = Some(trigger);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn WelcomeNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run the full pipeline over already-parsed rows.
    ///
    /// Guarantees: one outcome per input row, in input order; counters
    /// consistent with the outcome list; no row persisted twice; no row
    /// silently skipped.
    pub async fn reconcile(
        &self,
        tenant_id: TenantId,
        rows: &[ImportRecord],
        config: &ImportConfig,
    ) -> ImportReport {
        info!(%tenant_id, rows = rows.len(), "starting bulk client import");

        let mut report = ImportReport::new();
        for record in rows {
            let outcome = self.process_row(tenant_id, record, config).await;
            debug!(
                row = outcome.row_number,
                kind = ?outcome.kind,
                message = %outcome.message,
                "row processed"
            );
            report.push(outcome);
        }

        info!(
            successes = report.success_count(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "bulk client import finished"
        );
        report
    }

    async fn process_row(
        &self,
        tenant_id: TenantId,
        record: &ImportRecord,
        config: &ImportConfig,
    ) -> ImportOutcome {
        let row = record.row_number;

        let missing = record.missing_required_fields();
        if !missing.is_empty() {
            return ImportOutcome::error(
                row,
                record.tax_id.clone(),
                record.legal_name.clone(),
                format!("required fields missing: {}", missing.join(", ")),
            );
        }
        // The required-field check above guarantees both are present.
        let (Some(raw_tax), Some(legal_name)) =
            (record.tax_id.as_deref(), record.legal_name.as_deref())
        else {
            return ImportOutcome::error(
                row,
                record.tax_id.clone(),
                record.legal_name.clone(),
                "required fields missing: tax id, legal name",
            );
        };

        let Ok(rut) = Rut::parse(raw_tax) else {
            return ImportOutcome::error(
                row,
                Some(raw_tax.to_string()),
                Some(legal_name.to_string()),
                format!("invalid tax id '{}'", raw_tax.trim()),
            );
        };
        let tax_id = Some(rut.as_cleaned().to_string());
        let legal = Some(legal_name.to_string());

        // Advisory corroboration. A failed or empty lookup downgrades the row
        // to a warning; it never blocks the import.
        let mut advisory: Option<&str> = None;
        let mut official: Option<OfficialRecord> = None;
        if config.validate_externally {
            match &self.registry {
                Some(registry) => {
                    match timeout(config.collaborator_timeout, registry.lookup(&rut)).await {
                        Ok(Ok(Some(found))) => official = Some(found),
                        Ok(Ok(None)) => advisory = Some(MSG_NOT_IN_REGISTRY),
                        Ok(Err(err)) => {
                            warn!(row, error = %err, "registry lookup failed");
                            advisory = Some(MSG_UNVERIFIED);
                        }
                        Err(_) => {
                            warn!(row, "registry lookup timed out");
                            advisory = Some(MSG_UNVERIFIED);
                        }
                    }
                }
                None => advisory = Some(MSG_UNVERIFIED),
            }
        }

        if config.skip_duplicates {
            let found = timeout(
                config.collaborator_timeout,
                self.store.find_by_tax_id(tenant_id, &rut),
            )
            .await;
            match found {
                Ok(Ok(Some(_existing))) => {
                    return ImportOutcome::warning(
                        row,
                        tax_id,
                        legal,
                        format!("client {} already exists - skipped", rut.formatted()),
                    );
                }
                Ok(Ok(None)) => {}
                Ok(Err(err)) => {
                    return ImportOutcome::error(
                        row,
                        tax_id,
                        legal,
                        format!("persistence error: {err}"),
                    );
                }
                Err(_) => {
                    return ImportOutcome::error(
                        row,
                        tax_id,
                        legal,
                        "persistence error: duplicate check timed out",
                    );
                }
            }
        }

        let new = build_new_client(tenant_id, record, &rut, legal_name, official, config);
        let inserted = timeout(config.collaborator_timeout, self.store.insert(new)).await;
        let client = match inserted {
            Ok(Ok(client)) => client,
            Ok(Err(err)) => {
                return ImportOutcome::error(
                    row,
                    tax_id,
                    legal,
                    format!("persistence error: {err}"),
                );
            }
            Err(_) => {
                return ImportOutcome::error(row, tax_id, legal, "persistence error: insert timed out");
            }
        };

        self.run_post_commit_hooks(row, &client, config).await;

        match advisory {
            Some(message) => ImportOutcome::warning(row, tax_id, legal, message),
            None => ImportOutcome::success(row, tax_id, legal, MSG_IMPORTED),
        }
    }

    /// Fire the configured side effects, each in its own failure boundary.
    ///
    /// A hook failure (or timeout) is logged and swallowed: the row is already
    /// persisted and its outcome must not change retroactively.
    async fn run_post_commit_hooks(
        &self,
        row: usize,
        client: &contaflow_clients::Client,
        config: &ImportConfig,
    ) {
        if config.auto_onboard {
            if let Some(hook) = &self.onboarding {
                match timeout(config.collaborator_timeout, hook.start(client)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => warn!(row, error = %err, "onboarding hook failed"),
                    Err(_) => warn!(row, "onboarding hook timed out"),
                }
            }
        }
        if config.send_welcome {
            if let Some(hook) = &self.notifier {
                match timeout(config.collaborator_timeout, hook.send_welcome(client)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => warn!(row, error = %err, "welcome notification hook failed"),
                    Err(_) => warn!(row, "welcome notification hook timed out"),
                }
            }
        }
    }
}

fn build_new_client(
    tenant_id: TenantId,
    record: &ImportRecord,
    rut: &Rut,
    legal_name: &str,
    official: Option<OfficialRecord>,
    config: &ImportConfig,
) -> NewClient {
    // Registry data only fills gaps; file data always wins when present.
    let official_activity = official.as_ref().and_then(|o| o.activity.clone());
    let official_address = official.as_ref().and_then(|o| o.address.clone());

    NewClient {
        tenant_id,
        rut: rut.clone(),
        legal_name: legal_name.to_string(),
        trade_name: record.trade_name.clone(),
        contact: ClientContact {
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone().or(official_address),
            locality: record.locality.clone(),
            region: record.region.clone(),
        },
        activity: record.activity.clone().or(official_activity),
        tax_regime: record.tax_regime.clone(),
        tier: config.default_tier,
    }
}

/// Dry-run validation: structural and tax-id checks only.
///
/// No registry lookup, no duplicate check against the store, no persistence.
/// Lets a caller preview problems before committing to a real run. A repeated
/// tax id within the same upload is flagged as a warning (the committed run
/// would catch the second occurrence against the store).
pub fn validate_preflight(rows: &[ImportRecord]) -> PreflightReport {
    let mut report = PreflightReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for record in rows {
        let row_number = record.row_number;

        let missing = record.missing_required_fields();
        if !missing.is_empty() {
            report.invalid_count += 1;
            report.errors.push(RowMessage {
                row_number,
                message: format!("required fields missing: {}", missing.join(", ")),
            });
            continue;
        }

        let raw_tax = record.tax_id.as_deref().unwrap_or_default();
        match Rut::parse(raw_tax) {
            Err(_) => {
                report.invalid_count += 1;
                report.errors.push(RowMessage {
                    row_number,
                    message: format!("invalid tax id '{}'", raw_tax.trim()),
                });
            }
            Ok(rut) => {
                report.valid_count += 1;
                if !seen.insert(rut.as_cleaned().to_string()) {
                    report.warnings.push(RowMessage {
                        row_number,
                        message: format!("tax id {} duplicated within file", rut.formatted()),
                    });
                }
            }
        }
    }

    report
}
