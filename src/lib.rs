pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod history;
pub mod render;
pub mod report;
pub mod reshape;
pub mod source;

mod requests;

pub use document::{DayRecord, RawDocument};
pub use error::{Error, Result};
pub use extract::{Extractor, Fact, WatchList};
pub use render::RenderOptions;
pub use report::Report;
pub use reshape::RegionSeries;
pub use source::{CacheSource, DataSource, DocumentSource, RemoteSource};
