//! Companion export: persisted clients back out as a table.
//!
//! Reverses the import mapping — emits the canonical header set and one row
//! per client, with the tax id in display format. Pure formatting, no IO;
//! writing the bytes (CSV, XLSX) is a collaborator concern.

use contaflow_clients::Client;

use crate::record::ImportField;

/// Canonical export header set, in column order.
///
/// Every header here maps back onto its field via [`crate::match_header`], so
/// an exported table can be re-imported as-is.
pub const EXPORT_HEADERS: [ImportField; 10] = [
    ImportField::TaxId,
    ImportField::LegalName,
    ImportField::TradeName,
    ImportField::Email,
    ImportField::Phone,
    ImportField::Address,
    ImportField::Locality,
    ImportField::Region,
    ImportField::Activity,
    ImportField::TaxRegime,
];

/// Render a header row plus one row per client.
pub fn export_table(clients: &[Client]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = EXPORT_HEADERS
        .iter()
        .map(|f| f.header().to_string())
        .collect();

    let rows = clients
        .iter()
        .map(|client| {
            EXPORT_HEADERS
                .iter()
                .map(|field| cell(client, *field))
                .collect()
        })
        .collect();

    (headers, rows)
}

fn cell(client: &Client, field: ImportField) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    match field {
        ImportField::TaxId => client.rut.formatted(),
        ImportField::LegalName => client.legal_name.clone(),
        ImportField::TradeName => opt(&client.trade_name),
        ImportField::Email => opt(&client.contact.email),
        ImportField::Phone => opt(&client.contact.phone),
        ImportField::Address => opt(&client.contact.address),
        ImportField::Locality => opt(&client.contact.locality),
        ImportField::Region => opt(&client.contact.region),
        ImportField::Activity => opt(&client.activity),
        ImportField::TaxRegime => opt(&client.tax_regime),
    }
}
