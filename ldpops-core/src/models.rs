use std::fmt::{self, Display};
use std::path::PathBuf;

/// Which LD statistic a cutoff thresholds against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutoffKind {
    RSquared,
    DPrime,
}

impl CutoffKind {
    /// Short tag used in derived population names and comments.
    pub fn tag(&self) -> &'static str {
        match self {
            CutoffKind::RSquared => "RS",
            CutoffKind::DPrime => "DP",
        }
    }
}

/// A single LD strength threshold.
///
/// Duplicates in a configuration are processed redundantly but harmlessly;
/// the merge downstream is duplicate-safe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutoff {
    pub kind: CutoffKind,
    pub value: f64,
}

impl Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.tag(), self.value)
    }
}

/// One physical LD spline dataset named by the configuration file.
#[derive(Debug, Clone)]
pub struct PopulationSpline {
    pub name: String,
    pub description: String,
    pub filename: PathBuf,
}

impl PopulationSpline {
    pub fn new(name: &str, description: String, filename: PathBuf) -> Self {
        PopulationSpline {
            name: name.to_string(),
            description,
            filename,
        }
    }

    /// The durable population name derived from this spline and a cutoff,
    /// e.g. `CEU-RS0.8`. Must be a pure function of its inputs so that
    /// re-imports land on the same identity.
    pub fn derived_population_name(&self, cutoff: &Cutoff) -> String {
        format!("{}-{}{}", self.name, cutoff.kind.tag(), cutoff.value)
    }
}

/// An unexpanded gene boundary from the baseline population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBoundary {
    pub region_id: i64,
    pub lower: i64,
    pub upper: i64,
    pub source_id: i64,
}

/// One expanded boundary staged for the `region_bound` relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandedBoundary {
    pub region_id: i64,
    pub population_id: i64,
    pub chr: i16,
    pub pos_min: i64,
    pub pos_max: i64,
    pub source_id: i64,
}
