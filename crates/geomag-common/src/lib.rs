//! Common types shared across the geomagnetic model readers and tools.

pub mod error;
pub mod model;
pub mod time;

pub use error::ErrorKind;
pub use model::{Domain, FieldSummary, Model, ModelKind, ModelSummary, SourceName};
pub use time::{decimal_year_to_datetime, TimeSpan};
