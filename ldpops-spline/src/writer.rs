use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use byteorder::{LittleEndian, WriteBytesExt};

use crate::reader::Locus;
use crate::{LDSPLINE_MAGIC, LDSPLINE_VERSION};

const HEADER_BYTES: u64 = 4 + 2 + 2;
const LOCUS_FIXED_BYTES: u64 = 4 + 4;
const PAIR_BYTES: u64 = 4 + 4 + 4;

/// Builds a binary LD spline file from per-chromosome locus data.
pub struct LdSplineWriter {
    chromosomes: Vec<(String, Vec<Locus>)>,
}

impl Default for LdSplineWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LdSplineWriter {
    pub fn new() -> Self {
        LdSplineWriter {
            chromosomes: Vec::new(),
        }
    }

    /// Queue a chromosome block. Loci must ascend by position and pairs
    /// must be forward-only; the reader's expansion walk relies on both.
    pub fn add_chromosome(&mut self, label: &str, loci: Vec<Locus>) -> Result<&mut Self> {
        if label.is_empty() || label.len() > u8::MAX as usize {
            bail!("Chromosome label must be 1-255 bytes: {:?}", label);
        }
        if loci.windows(2).any(|pair| pair[1].pos <= pair[0].pos) {
            bail!("Loci for {:?} are not sorted by ascending position", label);
        }
        for locus in &loci {
            if locus.pairs.iter().any(|pair| pair.pos <= locus.pos) {
                bail!(
                    "Locus {} on {:?} has a non-forward LD pair",
                    locus.pos,
                    label
                );
            }
        }

        self.chromosomes.push((label.to_string(), loci));
        Ok(self)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if self.chromosomes.len() > u16::MAX as usize {
            bail!("Too many chromosomes for one spline file");
        }

        let file = File::create(path)
            .with_context(|| format!("Couldn't create spline file: {:?}", path))?;
        let mut writer = BufWriter::new(file);

        writer.write_u32::<LittleEndian>(LDSPLINE_MAGIC)?;
        writer.write_u16::<LittleEndian>(LDSPLINE_VERSION)?;
        writer.write_u16::<LittleEndian>(self.chromosomes.len() as u16)?;

        // directory first, with absolute block offsets
        let mut offset = HEADER_BYTES
            + self
                .chromosomes
                .iter()
                .map(|(label, _)| 1 + label.len() as u64 + 4 + 8)
                .sum::<u64>();
        for (label, loci) in &self.chromosomes {
            writer.write_u8(label.len() as u8)?;
            writer.write_all(label.as_bytes())?;
            writer.write_u32::<LittleEndian>(loci.len() as u32)?;
            writer.write_u64::<LittleEndian>(offset)?;
            offset += loci
                .iter()
                .map(|locus| LOCUS_FIXED_BYTES + locus.pairs.len() as u64 * PAIR_BYTES)
                .sum::<u64>();
        }

        for (_, loci) in &self.chromosomes {
            for locus in loci {
                writer.write_u32::<LittleEndian>(locus.pos as u32)?;
                writer.write_u32::<LittleEndian>(locus.pairs.len() as u32)?;
                for pair in &locus.pairs {
                    writer.write_u32::<LittleEndian>(pair.pos as u32)?;
                    writer.write_f32::<LittleEndian>(pair.dprime)?;
                    writer.write_f32::<LittleEndian>(pair.rsquared)?;
                }
            }
        }

        writer
            .flush()
            .with_context(|| format!("Couldn't finish writing spline file: {:?}", path))
    }
}
