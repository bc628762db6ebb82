//! Plain-text output.

use std::fmt::Write;

use splitledger_core::group::{DashboardSummary, Ledger, LedgerService};
use splitledger_core::settlement::SettlementTransaction;
use splitledger_shared::types::money::format_amount;
use tracing::warn;

const UNKNOWN_NAME: &str = "?";

/// One line per transaction, or `All settled.`.
pub fn settlement(ledger: &Ledger, transactions: &[SettlementTransaction]) -> String {
    if transactions.is_empty() {
        return "All settled.\n".to_string();
    }

    let mut out = String::new();
    for tx in transactions {
        let _ = writeln!(
            out,
            "{} owes {} {}",
            ledger.person_name(&tx.from).unwrap_or(UNKNOWN_NAME),
            ledger.person_name(&tx.to).unwrap_or(UNKNOWN_NAME),
            format_amount(tx.amount)
        );
    }
    out
}

/// Settlements for every group. A group that cannot be settled is reported
/// and skipped.
pub fn all_settlements(ledger: &Ledger) -> String {
    let mut out = String::new();
    for group in &ledger.groups {
        let _ = writeln!(out, "== {} ({}) ==", group.name, group.status);
        match LedgerService::settle_group(ledger, &group.id) {
            Ok(report) => out.push_str(&settlement(ledger, &report.transactions)),
            Err(err) => {
                warn!(group_id = %group.id, code = err.error_code(), error = %err, "Cannot settle group");
                let _ = writeln!(out, "Cannot settle: {err}");
            }
        }
    }
    out
}

/// Dashboard summary.
pub fn summary(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Pending groups: {}", summary.pending_groups);
    let _ = writeln!(out, "People: {}", summary.people);
    let _ = writeln!(out, "Recent groups:");
    for group in &summary.recent_groups {
        let _ = writeln!(
            out,
            "  {} [{}] {} members, {} spent, created {}",
            group.name,
            group.status,
            group.members,
            format_amount(group.total_spent),
            group.created_at.format("%Y-%m-%d")
        );
    }
    out
}
