//! Query resolution orchestration
//!
//! `QueryResolver` ties the subsystem together: classify the query, then
//! branch per intent. Specific-place lookups resolve against the catalog and
//! generate a short description concurrently; consultations generate a
//! structured answer whose place mentions are resolved and city-grouped;
//! general searches are delegated back to the caller with the extracted
//! filters; non-travel queries get a plain answer. Every generative failure
//! path degrades to something useful, never to an error.

mod consultation;
mod orchestrator;

pub use orchestrator::QueryResolver;
