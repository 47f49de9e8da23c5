//! Importer configuration: cutoff directives and population spline entries.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{Cutoff, CutoffKind, PopulationSpline};

/// Parsed contents of an importer configuration file.
///
/// ```text
/// rs 0.9 0.8 0.6
/// dp 0.9 0.8 0.6
/// CEU /path/to/ceu.ldspline Descriptive note about CEU population
/// JPT /path/to/jpt.ldspline Descriptive note about the population
/// ```
///
/// `rs`/`dp` lines (case-insensitive) contribute one cutoff per threshold,
/// `#` lines are comments, and every other non-empty line is a population
/// entry: name, spline file, optional free-text description.
#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    pub cutoffs: Vec<Cutoff>,
    pub splines: Vec<PopulationSpline>,
}

impl ImportConfig {
    /// Parse a configuration file.
    ///
    /// Content problems are tolerated per line; only failing to read the
    /// file itself is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Couldn't open configuration file: {:?}", path))?;
        let reader = BufReader::new(file);

        let mut config = ImportConfig::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| {
                format!("There was an error reading line {} of {:?}", index + 1, path)
            })?;
            config.parse_line(&line);
        }

        Ok(config)
    }

    fn parse_line(&mut self, line: &str) {
        let mut tokens = line.split_whitespace();

        let first = match tokens.next() {
            Some(token) => token,
            None => return,
        };
        if first.starts_with('#') {
            return;
        }

        match first.to_lowercase().as_str() {
            "rs" => self.push_cutoffs(CutoffKind::RSquared, tokens),
            "dp" => self.push_cutoffs(CutoffKind::DPrime, tokens),
            _ => {
                let filename = match tokens.next() {
                    Some(filename) => filename,
                    None => {
                        eprintln!("Skipping population line without a spline file: {:?}", line);
                        return;
                    }
                };
                let description = tokens.collect::<Vec<_>>().join(" ");
                self.splines.push(PopulationSpline::new(
                    first,
                    description,
                    PathBuf::from(filename),
                ));
            }
        }
    }

    fn push_cutoffs<'a>(&mut self, kind: CutoffKind, values: impl Iterator<Item = &'a str>) {
        for value in values {
            match value.parse::<f64>() {
                Ok(value) => self.cutoffs.push(Cutoff { kind, value }),
                Err(_) => eprintln!("Skipping unparsable {} threshold: {:?}", kind.tag(), value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[rstest]
    fn test_parse_directives_and_populations() {
        let file = write_config(
            "# cutoffs first\n\
             rs 0.9 0.8\n\
             DP 0.6\n\
             \n\
             CEU /data/ceu.ldspline HapMap CEU panel\n\
             JPT /data/jpt.ldspline\n",
        );

        let config = ImportConfig::from_file(file.path()).unwrap();

        assert_eq!(config.cutoffs.len(), 3);
        assert_eq!(
            config.cutoffs[0],
            Cutoff {
                kind: CutoffKind::RSquared,
                value: 0.9
            }
        );
        assert_eq!(
            config.cutoffs[1],
            Cutoff {
                kind: CutoffKind::RSquared,
                value: 0.8
            }
        );
        assert_eq!(
            config.cutoffs[2],
            Cutoff {
                kind: CutoffKind::DPrime,
                value: 0.6
            }
        );

        assert_eq!(config.splines.len(), 2);
        assert_eq!(config.splines[0].name, "CEU");
        assert_eq!(config.splines[0].filename, PathBuf::from("/data/ceu.ldspline"));
        assert_eq!(config.splines[0].description, "HapMap CEU panel");
        assert_eq!(config.splines[1].name, "JPT");
        assert_eq!(config.splines[1].description, "");
    }

    #[rstest]
    fn test_unparsable_threshold_is_skipped() {
        let file = write_config("rs 0.9 banana 0.5\n");

        let config = ImportConfig::from_file(file.path()).unwrap();

        assert_eq!(config.cutoffs.len(), 2);
        assert_eq!(config.cutoffs[0].value, 0.9);
        assert_eq!(config.cutoffs[1].value, 0.5);
    }

    #[rstest]
    fn test_unrecognized_directive_is_a_population_entry() {
        // "rsq" is not the rs directive; it names a population
        let file = write_config("rsq /data/rsq.ldspline\n");

        let config = ImportConfig::from_file(file.path()).unwrap();

        assert_eq!(config.cutoffs.len(), 0);
        assert_eq!(config.splines.len(), 1);
        assert_eq!(config.splines[0].name, "rsq");
    }

    #[rstest]
    fn test_population_line_without_file_is_skipped() {
        let file = write_config("CEU\n");

        let config = ImportConfig::from_file(file.path()).unwrap();

        assert_eq!(config.splines.len(), 0);
    }

    #[rstest]
    fn test_missing_file_is_an_error() {
        let result = ImportConfig::from_file(Path::new("/no/such/ldpops.cfg"));
        assert!(result.is_err());
    }
}
