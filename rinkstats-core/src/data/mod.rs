//! Workbook loading and caching

pub mod cache;
pub mod loader;
pub mod parse;
pub mod schema;
pub mod workbook;

use std::path::PathBuf;

pub use cache::WorkbookCache;
pub use loader::{build_dataset, load_workbook, LoadReport, LoadedWorkbook, SheetCount, SkippedRow};
pub use schema::{SchemaError, SchemaProblem};
pub use workbook::{read_workbook, CellValue, RawRow, RawSheet, RawWorkbook};

/// Everything that can stop a workbook from loading.
///
/// Row-level problems never surface here; they are skipped and reported
/// through [`LoadReport`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot stat {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("invalid workbook: {0}")]
    Schema(#[from] SchemaError),
}
