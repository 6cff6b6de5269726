//! Text normalization and similarity scoring
//!
//! Every matching strategy in the resolver goes through these two modules:
//! `normalize` folds away the accent/case/apostrophe noise that plagues
//! multi-language place names, and `similarity` scores candidate names with
//! two complementary measures so that neither word-order variation nor
//! single-word substrings produce false matches.

pub mod normalize;
pub mod similarity;

pub use normalize::{normalize, significant_words};
pub use similarity::{similarity, string_similarity, word_set_similarity};
