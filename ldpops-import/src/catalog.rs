//! Loading the baseline gene boundaries.

use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::Connection;

use ldpops_core::consts::{BASELINE_POPULATION_ID, GENE_TYPE};
use ldpops_core::models::RegionBoundary;

/// Baseline gene boundaries keyed by chromosome ordinal.
pub type RegionCatalog = HashMap<i16, Vec<RegionBoundary>>;

/// Load the unexpanded gene boundaries of the baseline population.
///
/// Rows come back ordered by `(chr, posMin)` and that ordering is kept
/// as-is within each chromosome's list. An empty catalog is not an error;
/// it only means there are no expansion candidates.
pub fn load_gene_boundaries(conn: &Connection) -> Result<RegionCatalog> {
    let mut stmt = conn
        .prepare(
            "SELECT region_bound.region_id, chr, posMin, posMax, region_bound.source_id \
             FROM region_bound \
             INNER JOIN region USING (region_id) \
             INNER JOIN type ON region.type_id = type.type_id \
             WHERE population_id = ?1 AND type = ?2 \
             ORDER BY chr, posMin",
        )
        .context("Couldn't prepare the gene boundary query")?;

    let rows = stmt.query_map(
        rusqlite::params![BASELINE_POPULATION_ID, GENE_TYPE],
        |row| {
            Ok((
                row.get::<_, i16>(1)?,
                RegionBoundary {
                    region_id: row.get(0)?,
                    lower: row.get(2)?,
                    upper: row.get(3)?,
                    source_id: row.get(4)?,
                },
            ))
        },
    )?;

    let mut catalog: RegionCatalog = HashMap::new();
    for row in rows {
        let (chr, boundary) = row.context("Couldn't read a gene boundary row")?;
        catalog.entry(chr).or_default().push(boundary);
    }

    Ok(catalog)
}
