/// One organisation's prescribing of a chemical on one date.
///
/// `quantity`, `cost`, and `organization_id` ride along from the API
/// unchanged; ranking only looks at `date` and `item_count`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpendingRecord {
    pub date: String,
    pub organization_name: String,
    pub item_count: u64,
    pub quantity: Option<f64>,
    pub cost: Option<f64>,
    pub organization_id: Option<String>,
}
