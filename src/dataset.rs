//! Loading labeled measurements and test points from text files.
//!
//! Labeled file: a header line, then one `width, height, label` record per
//! line with label `0` (Pichu) or `1` (Pikachu).
//!
//! Test-point file: a header line, then one `<n>. (<width>, <height>)` record
//! per line.
//!
//! Blank lines are skipped in both formats.

use std::fs;
use std::path::{Path, PathBuf};

use pokeclass_helpers::{Category, Sample, SampleError};
use tracing::debug;

/// Errors raised while reading or parsing a data file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input has no lines at all.
    #[error("input is empty, expected a header line")]
    MissingHeader,

    /// A record is malformed. Lines are 1-based and count the header.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A record parsed but holds an invalid value.
    #[error("line {line}: {source}")]
    Sample {
        line: usize,
        #[source]
        source: SampleError,
    },

    /// A sample without a label was given where one is required.
    #[error("sample {index} has no label")]
    Unlabeled { index: usize },
}

/// Labeled samples grouped by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledPools {
    pub pikachus: Vec<Sample>,
    pub pichus: Vec<Sample>,
}

impl LabeledPools {
    /// Every sample as one reference set: Pikachus first, then Pichus.
    pub fn all(&self) -> Vec<Sample> {
        self.pikachus.iter().chain(&self.pichus).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pikachus.len() + self.pichus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Groups samples by label, keeping their relative order within each group.
///
/// # Errors
///
/// Returns `DatasetError::Unlabeled` for the first sample without a label.
pub fn split_by_category<I>(samples: I) -> Result<LabeledPools, DatasetError>
where
    I: IntoIterator<Item = Sample>,
{
    let mut pools = LabeledPools::default();
    for (index, sample) in samples.into_iter().enumerate() {
        match sample.label() {
            Some(Category::Pikachu) => pools.pikachus.push(sample),
            Some(Category::Pichu) => pools.pichus.push(sample),
            None => return Err(DatasetError::Unlabeled { index }),
        }
    }
    Ok(pools)
}

/// Parses the labeled format. Values are trusted and not range-checked.
pub fn parse_labeled(text: &str) -> Result<Vec<Sample>, DatasetError> {
    data_lines(text)?
        .map(|(line, record)| parse_labeled_record(line, record))
        .collect()
}

/// Parses the test-point format into unlabeled, validated samples.
pub fn parse_test_points(text: &str) -> Result<Vec<Sample>, DatasetError> {
    data_lines(text)?
        .map(|(line, record)| parse_test_point(line, record))
        .collect()
}

/// Reads and parses a labeled file, grouped by category.
pub fn load_labeled(path: impl AsRef<Path>) -> Result<LabeledPools, DatasetError> {
    let path = path.as_ref();
    let samples = parse_labeled(&read(path)?)?;
    let pools = split_by_category(samples)?;
    debug!(
        path = %path.display(),
        pikachus = pools.pikachus.len(),
        pichus = pools.pichus.len(),
        "loaded labeled data"
    );
    Ok(pools)
}

/// Reads and parses a test-point file.
pub fn load_test_points(path: impl AsRef<Path>) -> Result<Vec<Sample>, DatasetError> {
    let path = path.as_ref();
    let samples = parse_test_points(&read(path)?)?;
    debug!(path = %path.display(), samples = samples.len(), "loaded test points");
    Ok(samples)
}

fn read(path: &Path) -> Result<String, DatasetError> {
    fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Skips the header, then yields `(line number, trimmed record)` for every
/// non-blank line.
fn data_lines(text: &str) -> Result<impl Iterator<Item = (usize, &str)>, DatasetError> {
    let mut lines = text.lines().enumerate();
    if lines.next().is_none() {
        return Err(DatasetError::MissingHeader);
    }
    Ok(lines
        .map(|(i, record)| (i + 1, record.trim()))
        .filter(|(_, record)| !record.is_empty()))
}

fn parse_labeled_record(line: usize, record: &str) -> Result<Sample, DatasetError> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();
    let [width, height, label] = fields.as_slice() else {
        return Err(DatasetError::Parse {
            line,
            message: format!("expected `width, height, label`, got {record:?}"),
        });
    };

    let width = parse_number(line, "width", width)?;
    let height = parse_number(line, "height", height)?;
    let code: i64 = label.parse().map_err(|_| DatasetError::Parse {
        line,
        message: format!("invalid label {label:?}"),
    })?;
    let category =
        Category::try_from(code).map_err(|source| DatasetError::Sample { line, source })?;

    Ok(Sample::labeled(width, height, category))
}

fn parse_test_point(line: usize, record: &str) -> Result<Sample, DatasetError> {
    let inner = match (record.find('('), record.rfind(')')) {
        (Some(open), Some(close)) if open < close => &record[open + 1..close],
        _ => {
            return Err(DatasetError::Parse {
                line,
                message: format!("expected `(width, height)`, got {record:?}"),
            });
        }
    };

    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [width, height] = fields.as_slice() else {
        return Err(DatasetError::Parse {
            line,
            message: format!("expected two values inside parentheses, got {inner:?}"),
        });
    };

    let width = parse_number(line, "width", width)?;
    let height = parse_number(line, "height", height)?;
    Sample::measured(width, height).map_err(|source| DatasetError::Sample { line, source })
}

fn parse_number(line: usize, name: &str, value: &str) -> Result<f64, DatasetError> {
    value.parse().map_err(|_| DatasetError::Parse {
        line,
        message: format!("invalid {name} {value:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELED: &str = "\
(width (cm), height (cm), label (0-pichu, 1-pikachu))
21.959384499160468, 31.23956701424158, 1
23.01, 28.4, 0

17.5,  23.9 , 1
";

    const TEST_POINTS: &str = "\
Test points:
1. (25, 32)
2. (24.2, 31.5)
3. (22, 34)
4. (20.5, 34)
";

    #[test]
    fn test_parse_labeled() {
        let samples = parse_labeled(LABELED).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].feature_a(), 21.959384499160468);
        assert_eq!(samples[0].label(), Some(Category::Pikachu));
        assert_eq!(samples[1].label(), Some(Category::Pichu));
        assert_eq!(samples[2].feature_b(), 23.9);
    }

    #[test]
    fn test_parse_labeled_header_only() {
        assert!(parse_labeled("header\n").unwrap().is_empty());
        assert!(matches!(parse_labeled(""), Err(DatasetError::MissingHeader)));
    }

    #[test]
    fn test_parse_labeled_reports_line_numbers() {
        let err = parse_labeled("header\n1.0, 2.0, 1\n1.0, two, 0\n").unwrap_err();
        assert!(matches!(err, DatasetError::Parse { line: 3, .. }));
        assert_eq!(err.to_string(), "line 3: invalid height \"two\"");

        let err = parse_labeled("header\n1.0, 2.0\n").unwrap_err();
        assert!(matches!(err, DatasetError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_labeled_rejects_unknown_label() {
        let err = parse_labeled("header\n1.0, 2.0, 2\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Sample {
                line: 2,
                source: SampleError::UnknownCategory { code: 2 }
            }
        ));
    }

    #[test]
    fn test_parse_test_points() {
        let samples = parse_test_points(TEST_POINTS).unwrap();
        let coords: Vec<(f64, f64)> = samples
            .iter()
            .map(|s| (s.feature_a(), s.feature_b()))
            .collect();
        assert_eq!(
            coords,
            vec![(25.0, 32.0), (24.2, 31.5), (22.0, 34.0), (20.5, 34.0)]
        );
        assert!(samples.iter().all(|s| !s.is_labeled()));
    }

    #[test]
    fn test_parse_test_points_errors() {
        let err = parse_test_points("Test points:\n1. 25, 32\n").unwrap_err();
        assert!(matches!(err, DatasetError::Parse { line: 2, .. }));

        let err = parse_test_points("Test points:\n1. (25)\n").unwrap_err();
        assert!(matches!(err, DatasetError::Parse { line: 2, .. }));

        let err = parse_test_points("Test points:\n1. (-1, 32)\n").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Sample {
                line: 2,
                source: SampleError::NegativeFeature { name: "width", .. }
            }
        ));
    }

    #[test]
    fn test_split_by_category_keeps_order() {
        let pools = split_by_category(parse_labeled(LABELED).unwrap()).unwrap();
        assert_eq!(pools.pikachus.len(), 2);
        assert_eq!(pools.pichus.len(), 1);
        assert_eq!(pools.len(), 3);
        assert_eq!(pools.pikachus[1].feature_a(), 17.5);

        let all = pools.all();
        assert_eq!(all[0], pools.pikachus[0]);
        assert_eq!(all[2], pools.pichus[0]);
    }

    #[test]
    fn test_split_by_category_rejects_unlabeled() {
        let samples = vec![
            Sample::labeled(1.0, 1.0, Category::Pichu),
            Sample::new(2.0, 2.0, None),
        ];
        assert!(matches!(
            split_by_category(samples),
            Err(DatasetError::Unlabeled { index: 1 })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_labeled("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert_eq!(err.to_string(), "failed to read does/not/exist.txt");
    }
}
