use crate::entities::spending::SpendingRecord;

pub(crate) fn spending_line(record: &SpendingRecord) -> String {
    format!(
        "{} {} {}",
        record.date, record.organization_name, record.item_count
    )
}

/// Full stdout payload: the resolved chemical name on the first line, then
/// one line per ranked record.
pub(crate) fn report(name: &str, records: &[SpendingRecord]) -> String {
    let mut out = String::from(name);
    for record in records {
        out.push('\n');
        out.push_str(&spending_line(record));
    }
    out
}
