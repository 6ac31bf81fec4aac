//! Image pull statistics core: domain model and the extraction,
//! aggregation and reconciliation services built on it.
pub mod domain;
pub mod services;
