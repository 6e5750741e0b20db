//! rinkstats core: domain types and the workbook loader.
//!
//! This crate owns the base tables:
//! - Domain types (matches, player stats, roster entries, registries)
//! - Workbook reading over calamine, one typed table per sheet
//! - Schema contract and validation at the boundary
//! - Row quarantine with a per-sheet load report
//! - Explicit load cache keyed by path and modification time

pub mod data;
pub mod domain;

pub use data::{load_workbook, LoadError, LoadReport, LoadedWorkbook, WorkbookCache};
pub use domain::Dataset;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: loaded data can be shared with a render thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Dataset>();
        require_sync::<domain::Dataset>();
        require_send::<domain::Match>();
        require_sync::<domain::Match>();
        require_send::<domain::PlayerStat>();
        require_sync::<domain::PlayerStat>();
        require_send::<domain::RosterEntry>();
        require_sync::<domain::RosterEntry>();

        require_send::<data::LoadedWorkbook>();
        require_sync::<data::LoadedWorkbook>();
        require_send::<data::WorkbookCache>();
    }
}
