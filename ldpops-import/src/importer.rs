//! The boundary expansion engine and pipeline entry point.

use std::collections::HashMap;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;

use ldpops_core::chrom;
use ldpops_core::chrom::UNKNOWN_CHROM;
use ldpops_core::config::ImportConfig;
use ldpops_core::models::{Cutoff, CutoffKind, ExpandedBoundary, PopulationSpline};
use ldpops_spline::{ChromosomeSpline, LdSplineFile};

use crate::catalog::{RegionCatalog, load_gene_boundaries};
use crate::merge::{MergeController, refresh_summaries};
use crate::populations::resolve_derived_populations;
use crate::store::CatalogDb;

/// Run the full import: expand every baseline gene boundary for every
/// configured (population, cutoff) pair and merge the results into the
/// catalog, replacing any prior import for the same derived populations.
pub fn run_import(db: &mut CatalogDb, config: &ImportConfig) -> Result<()> {
    let catalog = load_gene_boundaries(db.connection())?;

    let tx = db
        .connection()
        .transaction()
        .context("Couldn't start the import transaction")?;

    let mut merge = MergeController::begin(&tx)?;
    for spline in &config.splines {
        import_spline(&tx, &mut merge, spline, &config.cutoffs, &catalog)
            .with_context(|| format!("Import failed for population {:?}", spline.name))?;
    }

    let staged = merge.staged();
    let merged = merge.merge()?;
    tx.commit().context("Couldn't commit the boundary merge")?;

    refresh_summaries(db.connection())?;

    println!("Merged {} of {} staged boundary rows", merged, staged);
    Ok(())
}

/// Expand and stage everything one spline file contributes.
fn import_spline(
    conn: &Connection,
    merge: &mut MergeController<'_, '_>,
    spline: &PopulationSpline,
    cutoffs: &[Cutoff],
    catalog: &RegionCatalog,
) -> Result<()> {
    let population_ids = resolve_derived_populations(conn, spline, cutoffs)?;

    let mut file = LdSplineFile::open(&spline.filename)?;
    let labels = file.chromosomes();

    let pb = ProgressBar::new(labels.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} chromosomes ({msg})")?
            .progress_chars("##-"),
    );
    pb.set_message(spline.name.clone());

    for index in 0..labels.len() {
        let chr_spline = file.chromosome(index)?;
        stage_chromosome(merge, spline, cutoffs, &population_ids, &chr_spline, catalog)?;
        // block dropped here; one chromosome resident at a time
        drop(chr_spline);
        pb.inc(1);
    }

    pb.finish_with_message(format!("{} done", spline.name));
    Ok(())
}

/// Stage the expanded rows for one chromosome across all cutoffs.
fn stage_chromosome(
    merge: &mut MergeController<'_, '_>,
    spline: &PopulationSpline,
    cutoffs: &[Cutoff],
    population_ids: &HashMap<String, i64>,
    chr_spline: &ChromosomeSpline,
    catalog: &RegionCatalog,
) -> Result<()> {
    // labels with no canonical match keep the explicit unknown ordinal;
    // their rows are only emitted if the catalog carries boundaries there
    let ordinal = chrom::normalize(chr_spline.label()).unwrap_or(UNKNOWN_CHROM);

    let boundaries = match catalog.get(&ordinal) {
        Some(boundaries) => boundaries,
        None => return Ok(()),
    };

    for cutoff in cutoffs {
        let name = spline.derived_population_name(cutoff);
        // resolved up front; a miss here means the identity pass was skipped
        let population_id = match population_ids.get(&name) {
            Some(id) => *id,
            None => continue,
        };

        for boundary in boundaries {
            let bounds = match cutoff.kind {
                CutoffKind::DPrime => {
                    chr_spline.expand_by_dprime(boundary.lower, boundary.upper, cutoff.value)
                }
                CutoffKind::RSquared => {
                    chr_spline.expand_by_rsquared(boundary.lower, boundary.upper, cutoff.value)
                }
            };

            // regions with no LD data at this threshold are simply omitted
            let Some((pos_min, pos_max)) = bounds else {
                continue;
            };

            merge.stage(&ExpandedBoundary {
                region_id: boundary.region_id,
                population_id,
                chr: ordinal,
                pos_min,
                pos_max,
                source_id: boundary.source_id,
            })?;
        }
    }

    Ok(())
}
