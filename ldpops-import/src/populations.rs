//! Derived population identities.

use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use ldpops_core::models::{Cutoff, PopulationSpline};

/// Resolve or create the durable identity for every (spline, cutoff)
/// pair, keyed by derived population name.
///
/// Runs once per spline before any expansion work so every staged row has
/// a stable foreign key target. An identity that already exists marks a
/// re-import: its previously merged boundary rows are deleted, so repeated
/// runs with the same configuration converge instead of accumulating
/// duplicates.
pub fn resolve_derived_populations(
    conn: &Connection,
    spline: &PopulationSpline,
    cutoffs: &[Cutoff],
) -> Result<HashMap<String, i64>> {
    let mut ids = HashMap::new();

    for cutoff in cutoffs {
        let name = spline.derived_population_name(cutoff);

        let id = match lookup_population(conn, &name)? {
            Some(id) => {
                conn.execute(
                    "DELETE FROM region_bound WHERE population_id = ?1",
                    params![id],
                )
                .with_context(|| format!("Couldn't clear prior import for {:?}", name))?;
                id
            }
            None => {
                conn.execute(
                    "INSERT INTO population (population, ldcomment, description) \
                     VALUES (?1, ?2, ?3)",
                    params![
                        name,
                        cutoff.to_string(),
                        format!(
                            "{} with {} cutoff {}",
                            spline.description,
                            cutoff.kind.tag(),
                            cutoff.value
                        ),
                    ],
                )
                .with_context(|| format!("Couldn't insert population {:?}", name))?;
                // re-query for the id the store actually assigned
                lookup_population(conn, &name)?
                    .with_context(|| format!("Population {:?} missing after insert", name))?
            }
        };

        ids.insert(name, id);
    }

    Ok(ids)
}

fn lookup_population(conn: &Connection, name: &str) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT population_id FROM population WHERE population = ?1",
        params![name],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("Couldn't look up population {:?}", name))
}
