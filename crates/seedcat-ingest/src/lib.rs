pub mod classify;
pub mod content;
pub mod error;
pub mod normalize;
pub mod row;
pub mod sheet;

pub use classify::{classify_category, classify_seasonality};
pub use error::{IngestError, RowRejection};
pub use normalize::{normalize_row, NormalizedBatch, Normalizer};
pub use row::{CellValue, RawRow};
pub use sheet::{read_source, SourceSheet};
