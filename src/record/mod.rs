pub mod read;
pub mod types;
pub mod write;

pub use read::read_records;
pub use types::{Record, Value};
pub use write::record_data;
