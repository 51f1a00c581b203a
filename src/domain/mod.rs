//! Domain model: element definitions and the particle record.

pub mod elements;
pub mod particle;
