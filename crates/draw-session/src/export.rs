//! Export formatter
//!
//! Flattens the winner ledger into the row matrix spreadsheet consumers expect:
//! a single `name` header, then per catalog tier one label row followed by one
//! row per winner name.

use draw_core::{PrizeTier, WinnerLedger};

/// Label of the single header column
pub const NAME_HEADER: &str = "name";

/// Rows of cell strings
pub type ExportMatrix = Vec<Vec<String>>;

/// Build the export matrix in catalog order, placeholder tier included.
///
/// Ledger entries for types missing from the catalog are not exported.
pub fn build_export_matrix(catalog: &[PrizeTier], ledger: &WinnerLedger) -> ExportMatrix {
    let mut rows = Vec::with_capacity(1 + catalog.len() + ledger.len());
    rows.push(vec![NAME_HEADER.to_string()]);
    for tier in catalog {
        rows.push(vec![tier.text.clone()]);
        rows.extend(
            ledger
                .winners(tier.prize_type)
                .iter()
                .map(|winner| vec![winner.name.clone()]),
        );
    }
    rows
}
