pub mod chrom;
pub mod config;
pub mod models;

pub mod consts {
    /// Reserved population holding the unexpanded gene boundaries.
    pub const BASELINE_POPULATION_ID: i64 = 1;

    /// Region type whose boundaries are eligible for expansion.
    pub const GENE_TYPE: &str = "gene";
}
