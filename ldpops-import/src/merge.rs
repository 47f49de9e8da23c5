//! Staged, duplicate-safe merge into `region_bound`.

use anyhow::{Context, Result};
use rusqlite::{Connection, Transaction, params};

use ldpops_core::models::ExpandedBoundary;

const SCRATCH_TABLE: &str = "__region_bound_scratch";

/// Stages expanded boundary rows in a run-scoped scratch table, then
/// merges them into `region_bound` with the destination's secondary
/// indexes preserved.
///
/// The controller operates inside a caller-provided transaction: either
/// the whole merged state commits or the prior state stays visible.
/// Indexes are dropped for the duration of the bulk copy and recreated
/// from their snapshotted definitions afterwards.
pub struct MergeController<'tx, 'conn> {
    tx: &'tx Transaction<'conn>,
    indexes: Vec<(String, String)>,
    staged: usize,
}

impl<'tx, 'conn> MergeController<'tx, 'conn> {
    /// Create the scratch table, snapshot the destination's secondary
    /// index definitions, and drop them.
    pub fn begin(tx: &'tx Transaction<'conn>) -> Result<Self> {
        // temp tables outlive a commit on the same connection
        tx.execute(&format!("DROP TABLE IF EXISTS {SCRATCH_TABLE}"), [])?;
        tx.execute(
            &format!(
                "CREATE TEMPORARY TABLE {SCRATCH_TABLE} (\
                 region_id INTEGER NOT NULL, \
                 population_id INTEGER NOT NULL, \
                 chr TINYINT NOT NULL, \
                 posMin BIGINT NOT NULL, \
                 posMax BIGINT NOT NULL, \
                 source_id TINYINT NOT NULL)"
            ),
            [],
        )
        .context("Couldn't create the scratch boundary table")?;

        let mut stmt = tx.prepare(
            "SELECT name, sql FROM sqlite_master \
             WHERE type = 'index' AND tbl_name = 'region_bound' AND sql NOT NULL",
        )?;
        let indexes = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Couldn't snapshot the region_bound indexes")?;
        drop(stmt);

        for (name, _) in &indexes {
            // index names come from sqlite_master, not user input
            tx.execute(&format!("DROP INDEX '{}'", name), [])
                .with_context(|| format!("Couldn't drop index {:?}", name))?;
        }

        Ok(MergeController {
            tx,
            indexes,
            staged: 0,
        })
    }

    /// Stage one expanded boundary row.
    pub fn stage(&mut self, row: &ExpandedBoundary) -> Result<()> {
        let mut stmt = self.tx.prepare_cached(
            "INSERT INTO __region_bound_scratch \
             (region_id, population_id, chr, posMin, posMax, source_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        stmt.execute(params![
            row.region_id,
            row.population_id,
            row.chr,
            row.pos_min,
            row.pos_max,
            row.source_id
        ])?;
        self.staged += 1;
        Ok(())
    }

    /// Number of rows staged so far.
    pub fn staged(&self) -> usize {
        self.staged
    }

    /// Copy the staged rows into `region_bound`, silently ignoring rows
    /// that collide with the destination's uniqueness constraint, then
    /// recreate every snapshotted index from its original definition.
    /// Returns the number of rows actually inserted.
    pub fn merge(self) -> Result<usize> {
        let merged = self
            .tx
            .execute(
                &format!("INSERT OR IGNORE INTO region_bound SELECT * FROM {SCRATCH_TABLE}"),
                [],
            )
            .context("Couldn't merge staged boundaries into region_bound")?;

        for (name, sql) in &self.indexes {
            self.tx
                .execute(sql, [])
                .with_context(|| format!("Couldn't recreate index {:?}", name))?;
        }

        Ok(merged)
    }
}

/// Refresh the planner statistics that downstream annotation queries lean
/// on. Runs after the merge has committed, never before.
pub fn refresh_summaries(conn: &Connection) -> Result<()> {
    conn.execute_batch("ANALYZE region_bound;")
        .context("Couldn't refresh region_bound statistics")
}
