//! Intent classification
//!
//! Two classifiers cooperate: the generative classifier sends the query to
//! the text backend and parses a JSON verdict; the rule-based classifier is
//! the deterministic fallback it degrades to on timeout, malformed output
//! or an invalid intent label. Neither ever returns an error; every query
//! gets a valid verdict.

pub mod classifier;
pub mod rules;

pub use classifier::GenerativeClassifier;
pub use rules::RuleClassifier;
