//! Place resolution
//!
//! `EntityResolver` turns a noisy free-text place name into a verified
//! catalog entity (or nothing; a wrong match is worse than no match), and
//! `CityAssembler` resolves the place mentions of a consultation answer into
//! city-grouped, image-backed result lists.

pub mod assembler;
pub mod entity;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::{Assembled, CityAssembler, PlaceMention};
pub use entity::{EntityResolver, ResolveOptions};
