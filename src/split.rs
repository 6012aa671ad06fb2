//! Train/test partition by Games year.
//!
//! The source analysis holds out the most recent Games: rows before the
//! threshold year train the model, rows at or after it are predicted.

use crate::data::TeamRecord;

/// The year separating training data from held-out test data.
pub const DEFAULT_SPLIT_YEAR: i32 = 2012;

/// Partitions `rows` into `(train, test)` with `train` strictly before
/// `threshold` and `test` at or after it. Pure and order-preserving:
/// every input row lands in exactly one side, in its original position
/// relative to the other rows of that side.
pub fn split_by_year(rows: &[TeamRecord], threshold: i32) -> (Vec<TeamRecord>, Vec<TeamRecord>) {
    let (train, test): (Vec<TeamRecord>, Vec<TeamRecord>) =
        rows.iter().cloned().partition(|row| row.year < threshold);
    log::info!(
        "Split at year {threshold}: {} training rows, {} test rows",
        train.len(),
        test.len()
    );
    (train, test)
}
