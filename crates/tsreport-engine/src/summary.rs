//! Summary sheet building

use std::collections::BTreeMap;
use tsreport_core::report::EXISTING_STATUS;
use tsreport_core::{SummaryRow, SummarySheet};

/// Build the summary sheet from the employee totals.
///
/// The grand total is an integer that is truncated after every employee is
/// added, so fractional hours are dropped along the way: 1.5 + 1.5 gives 2,
/// not 3.
pub fn build_summary(totals: &BTreeMap<String, f64>) -> SummarySheet {
    let mut total_hours: i64 = 0;
    let rows = totals
        .iter()
        .map(|(name, hours)| {
            total_hours = (total_hours as f64 + hours) as i64;
            SummaryRow {
                name: name.clone(),
                hours: *hours,
                status: EXISTING_STATUS.to_string(),
            }
        })
        .collect();

    SummarySheet { rows, total_hours }
}
