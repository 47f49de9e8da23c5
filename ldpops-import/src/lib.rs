//! Importing LD-derived population boundaries into a region catalog.
//!
//! The pipeline loads the baseline gene boundaries, resolves a durable
//! population identity per (spline, cutoff) pair, expands every boundary
//! through the population's LD spline data, and merges the expanded rows
//! into `region_bound` inside a single transaction.

pub mod catalog;
pub mod importer;
pub mod merge;
pub mod populations;
pub mod store;

pub use importer::run_import;
pub use store::CatalogDb;
