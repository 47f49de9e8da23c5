use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use anyhow::{Context, Result};
use byteorder::{LittleEndian, ReadBytesExt};

use crate::errors::SplineError;
use crate::{LDSPLINE_MAGIC, LDSPLINE_VERSION};

/// Pairwise LD between a locus and one downstream marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LdPair {
    pub pos: i64,
    pub dprime: f32,
    pub rsquared: f32,
}

/// A marker position with its LD against downstream markers.
///
/// Pairs are forward-only: every `pair.pos` is greater than `pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct Locus {
    pub pos: i64,
    pub pairs: Vec<LdPair>,
}

#[derive(Debug, Clone)]
struct ChromEntry {
    label: String,
    locus_count: u32,
    offset: u64,
}

/// Reader for a binary LD spline file.
///
/// Only the header and chromosome directory are resident. Chromosome
/// blocks are loaded on demand with [`LdSplineFile::chromosome`]; dropping
/// the returned [`ChromosomeSpline`] releases the block, so a caller that
/// processes chromosomes one at a time keeps a single block in memory.
pub struct LdSplineFile {
    reader: BufReader<File>,
    directory: Vec<ChromEntry>,
}

impl LdSplineFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Couldn't open spline file: {:?}", path))?;
        let mut reader = BufReader::new(file);

        let magic = reader.read_u32::<LittleEndian>()?;
        if magic != LDSPLINE_MAGIC {
            return Err(SplineError::BadMagic(path.display().to_string()).into());
        }
        let version = reader.read_u16::<LittleEndian>()?;
        if version != LDSPLINE_VERSION {
            return Err(SplineError::UnsupportedVersion(version).into());
        }

        let chrom_count = reader.read_u16::<LittleEndian>()?;
        let mut directory = Vec::with_capacity(chrom_count as usize);
        for _ in 0..chrom_count {
            let label_len = reader.read_u8()?;
            let mut label = vec![0u8; label_len as usize];
            reader.read_exact(&mut label)?;
            let label = String::from_utf8(label).map_err(|_| SplineError::BadLabel)?;

            let locus_count = reader.read_u32::<LittleEndian>()?;
            let offset = reader.read_u64::<LittleEndian>()?;
            directory.push(ChromEntry {
                label,
                locus_count,
                offset,
            });
        }

        Ok(LdSplineFile { reader, directory })
    }

    /// Chromosome labels exactly as the file reports them, in file order.
    pub fn chromosomes(&self) -> Vec<String> {
        self.directory.iter().map(|entry| entry.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.directory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directory.is_empty()
    }

    /// Load the block for the chromosome at `index` in the directory.
    pub fn chromosome(&mut self, index: usize) -> Result<ChromosomeSpline> {
        let entry = self
            .directory
            .get(index)
            .cloned()
            .ok_or(SplineError::UnknownChromosome(index))?;

        self.reader.seek(SeekFrom::Start(entry.offset))?;

        let mut loci = Vec::with_capacity(entry.locus_count as usize);
        for _ in 0..entry.locus_count {
            let pos = self.reader.read_u32::<LittleEndian>()? as i64;
            let pair_count = self.reader.read_u32::<LittleEndian>()?;

            let mut pairs = Vec::with_capacity(pair_count as usize);
            for _ in 0..pair_count {
                let pos = self.reader.read_u32::<LittleEndian>()? as i64;
                let dprime = self.reader.read_f32::<LittleEndian>()?;
                let rsquared = self.reader.read_f32::<LittleEndian>()?;
                pairs.push(LdPair {
                    pos,
                    dprime,
                    rsquared,
                });
            }

            loci.push(Locus { pos, pairs });
        }

        Ok(ChromosomeSpline {
            label: entry.label,
            loci,
        })
    }
}

/// One chromosome's LD data, resident until dropped.
#[derive(Debug, Clone)]
pub struct ChromosomeSpline {
    label: String,
    loci: Vec<Locus>,
}

impl ChromosomeSpline {
    pub fn new(label: String, loci: Vec<Locus>) -> Self {
        ChromosomeSpline { label, loci }
    }

    /// The chromosome label as the file reports it.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn loci(&self) -> &[Locus] {
        &self.loci
    }

    /// Expand `[lower, upper]` using D-prime at the given threshold.
    pub fn expand_by_dprime(&self, lower: i64, upper: i64, threshold: f64) -> Option<(i64, i64)> {
        self.expand(lower, upper, threshold, |pair| pair.dprime as f64)
    }

    /// Expand `[lower, upper]` using R-squared at the given threshold.
    pub fn expand_by_rsquared(&self, lower: i64, upper: i64, threshold: f64) -> Option<(i64, i64)> {
        self.expand(lower, upper, threshold, |pair| pair.rsquared as f64)
    }

    /// Any stored pair with statistic >= threshold and exactly one endpoint
    /// inside the query interval pulls the matching bound outward to the
    /// other endpoint. `None` when no locus falls inside the interval.
    fn expand<F>(&self, lower: i64, upper: i64, threshold: f64, stat: F) -> Option<(i64, i64)>
    where
        F: Fn(&LdPair) -> f64,
    {
        if !self
            .loci
            .iter()
            .any(|locus| locus.pos >= lower && locus.pos <= upper)
        {
            return None;
        }

        let mut min = lower;
        let mut max = upper;
        for locus in &self.loci {
            // loci ascend and pairs are forward-only: nothing past `upper`
            // can reach back into the interval
            if locus.pos > upper {
                break;
            }
            let source_inside = locus.pos >= lower;

            for pair in &locus.pairs {
                if stat(pair) < threshold {
                    continue;
                }
                if source_inside {
                    if pair.pos > upper {
                        max = max.max(pair.pos);
                    }
                } else if pair.pos >= lower && pair.pos <= upper {
                    min = min.min(locus.pos);
                }
            }
        }

        Some((min, max))
    }
}
