use super::item::{BatchReport, ItemResult};

/// Merge per-item results into a report; order is kept as given
pub fn aggregate(results: Vec<ItemResult>) -> BatchReport {
    let succeeded_count = results.iter().filter(|r| r.success()).count();
    BatchReport {
        total: results.len(),
        succeeded_count,
        results,
    }
}
