//! Row-select bus trait

/// One-hot, active-low row-select bus
pub trait RowSelect {
    /// Enable `row` and disable every other row
    fn select(&mut self, row: u8);

    /// Disable every row
    fn release_all(&mut self);
}
