use super::model::WageRecord;

// ---------------------------------------------------------------------------
// Row predicates
// ---------------------------------------------------------------------------

/// Rows whose career field equals `career`, in dataset order.
/// An unknown career yields an empty result.
pub fn by_career<'a>(records: &'a [WageRecord], career: &str) -> Vec<&'a WageRecord> {
    records.iter().filter(|r| r.career == career).collect()
}

/// Narrow an already filtered view to a single year.
pub fn by_year<'a>(rows: &[&'a WageRecord], year: i32) -> Vec<&'a WageRecord> {
    rows.iter().copied().filter(|r| r.year == year).collect()
}

/// Narrow an already filtered view to a single state.
pub fn by_state<'a>(rows: &[&'a WageRecord], state: &str) -> Vec<&'a WageRecord> {
    rows.iter().copied().filter(|r| r.state == state).collect()
}
