pub mod analyzer;
pub mod schema;

pub use analyzer::{GeminiAnalyzer, TongueAnalyzer, DEFAULT_MODEL};
pub use schema::{response_schema, ANALYSIS_PROMPT};
