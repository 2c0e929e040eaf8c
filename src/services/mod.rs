// Service module exports

pub mod filter;
pub mod normalizer;
pub mod selection;
