//! Process-wide configuration for the query-resolution core
//!
//! Everything here is loaded once at startup and treated as immutable for
//! the process lifetime: tunable settings (thresholds, timeouts, limits),
//! the keyword tables driving the rule-based intent detector, the bilingual
//! city alias table, and the prompt templates for the generative backend.

pub mod cities;
pub mod keywords;
pub mod prompts;
pub mod settings;

pub use cities::CityAliases;
pub use keywords::KeywordTables;
pub use settings::Settings;
