//! Header normalization and the typed import row.
//!
//! Uploaded tables carry free-text headers ("Razón Social", "RUT", "Correo",
//! ...). A synonym table maps them — case- and diacritic-insensitively — onto
//! a fixed field set; unrecognized headers pass through verbatim so nothing in
//! the upload is lost for auditing, even though validation ignores them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The fixed logical fields a row can map into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportField {
    TaxId,
    LegalName,
    TradeName,
    Email,
    Phone,
    Address,
    Locality,
    Region,
    Activity,
    TaxRegime,
}

impl ImportField {
    /// Canonical header used when exporting (round-trips through
    /// [`match_header`]).
    pub fn header(&self) -> &'static str {
        match self {
            ImportField::TaxId => "RUT",
            ImportField::LegalName => "Razón Social",
            ImportField::TradeName => "Nombre Fantasía",
            ImportField::Email => "Email",
            ImportField::Phone => "Teléfono",
            ImportField::Address => "Dirección",
            ImportField::Locality => "Comuna",
            ImportField::Region => "Región",
            ImportField::Activity => "Giro",
            ImportField::TaxRegime => "Régimen",
        }
    }
}

/// Lower-case and strip Spanish diacritics so "Razón" and "razon" compare equal.
fn fold_header(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Map a free-text column header onto a logical field, if recognized.
pub fn match_header(raw: &str) -> Option<ImportField> {
    let folded = fold_header(raw);
    let field = match folded.as_str() {
        "rut" | "run" => ImportField::TaxId,
        "razon social" | "nombre" | "empresa" => ImportField::LegalName,
        "nombre fantasia" | "fantasia" => ImportField::TradeName,
        "email" | "correo" => ImportField::Email,
        "telefono" | "fono" => ImportField::Phone,
        "direccion" => ImportField::Address,
        "ciudad" | "comuna" => ImportField::Locality,
        "region" => ImportField::Region,
        "giro" | "actividad" => ImportField::Activity,
        "regimen" => ImportField::TaxRegime,
        _ => return None,
    };
    Some(field)
}

/// One normalized row of an uploaded table.
///
/// Fields are optional at this stage; the pipeline decides what a missing
/// required field means (structural error) rather than this type. Constructed
/// once per source row and consumed by exactly one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// 1-based position in the source file (header row is 1), for user-facing
    /// traceability in the outcome report.
    pub row_number: usize,
    pub tax_id: Option<String>,
    pub legal_name: Option<String>,
    pub trade_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub activity: Option<String>,
    pub tax_regime: Option<String>,
    /// Unrecognized columns, verbatim (audit only; validation ignores these).
    pub extras: BTreeMap<String, String>,
}

impl ImportRecord {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            ..Self::default()
        }
    }

    fn set(&mut self, field: ImportField, value: String) {
        let slot = match field {
            ImportField::TaxId => &mut self.tax_id,
            ImportField::LegalName => &mut self.legal_name,
            ImportField::TradeName => &mut self.trade_name,
            ImportField::Email => &mut self.email,
            ImportField::Phone => &mut self.phone,
            ImportField::Address => &mut self.address,
            ImportField::Locality => &mut self.locality,
            ImportField::Region => &mut self.region,
            ImportField::Activity => &mut self.activity,
            ImportField::TaxRegime => &mut self.tax_regime,
        };
        *slot = Some(value);
    }

    /// Names of required fields this row lacks (empty when importable).
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.tax_id.as_deref().is_none_or(|s| s.trim().is_empty()) {
            missing.push("tax id");
        }
        if self.legal_name.as_deref().is_none_or(|s| s.trim().is_empty()) {
            missing.push("legal name");
        }
        missing
    }
}

/// Turn a header row plus data rows into typed records.
///
/// `rows[0]` in the source file is the header, so data row numbers start at 2.
/// Blank cells become `None`; cell values are trimmed.
pub fn parse_table(headers: &[String], rows: &[Vec<String>]) -> Vec<ImportRecord> {
    let mapped: Vec<(Option<ImportField>, &str)> = headers
        .iter()
        .map(|h| (match_header(h), h.trim()))
        .collect();

    rows.iter()
        .enumerate()
        .map(|(i, cells)| {
            let mut record = ImportRecord::new(i + 2);
            for ((field, header), cell) in mapped.iter().zip(cells.iter()) {
                let value = cell.trim();
                if value.is_empty() {
                    continue;
                }
                match field {
                    Some(field) => record.set(*field, value.to_string()),
                    None => {
                        record.extras.insert(header.to_string(), value.to_string());
                    }
                }
            }
            record
        })
        .collect()
}
