//! Binary LD spline files.
//!
//! One file per population. The file holds a chromosome directory followed
//! by per-chromosome blocks of loci, each locus carrying pairwise LD
//! (D-prime and R-squared) against downstream markers. The reader keeps
//! only the directory resident and loads one chromosome block at a time.
//!
//! Layout, little-endian throughout:
//!
//! ```text
//! header:  magic u32, version u16, chrom_count u16
//! dir:     chrom_count x { label_len u8, label bytes, locus_count u32, offset u64 }
//! blocks:  per chromosome, locus_count x locus, ascending position:
//!          pos u32, pair_count u32,
//!          pair_count x { pos u32, dprime f32, rsquared f32 }
//! ```

pub mod errors;
pub mod reader;
pub mod writer;

pub use errors::SplineError;
pub use reader::{ChromosomeSpline, LdPair, LdSplineFile, Locus};
pub use writer::LdSplineWriter;

/// `LDSP`, little-endian.
pub const LDSPLINE_MAGIC: u32 = 0x5053_444C;

pub const LDSPLINE_VERSION: u16 = 1;
