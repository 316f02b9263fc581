use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::entities::spending::SpendingRecord;
use crate::sources::openprescribing::SpendingRow;

pub(crate) fn from_api_row(row: SpendingRow) -> SpendingRecord {
    SpendingRecord {
        date: row.date,
        organization_name: row.row_name,
        item_count: row.items,
        quantity: row.quantity,
        cost: row.actual_cost,
        organization_id: row.row_id,
    }
}

pub(crate) fn from_api_rows(rows: Vec<SpendingRow>) -> Vec<SpendingRecord> {
    rows.into_iter().map(from_api_row).collect()
}

/// Reduces spending records to the per-date leaders: for each distinct date,
/// every record carrying that date's highest item count, newest date first.
///
/// A single pass keeps each date's running leaders in a map. A strictly
/// higher count replaces a date's bucket, an equal count appends (ties are
/// all kept, in arrival order), a lower count is dropped. Dates are the
/// API's ISO `YYYY-MM-DD` strings, which order correctly as plain strings,
/// so the map key doubles as the output sort key.
pub(crate) fn daily_leaders(records: Vec<SpendingRecord>) -> Vec<SpendingRecord> {
    let mut by_date: BTreeMap<String, Vec<SpendingRecord>> = BTreeMap::new();

    for record in records {
        let leaders = by_date.entry(record.date.clone()).or_default();
        match leaders
            .first()
            .map(|top| record.item_count.cmp(&top.item_count))
        {
            None | Some(Ordering::Greater) => {
                leaders.clear();
                leaders.push(record);
            }
            Some(Ordering::Equal) => leaders.push(record),
            Some(Ordering::Less) => {}
        }
    }

    by_date.into_values().rev().flatten().collect()
}
