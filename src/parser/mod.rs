pub mod query_params;
pub mod sort_parser;

pub use query_params::QueryParams;
pub use sort_parser::{SortOrder, SortSpec};
