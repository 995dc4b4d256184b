use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::data_handling::labels::{abbreviate, parse_label};
use crate::error::{PlotError, PlotResult};
use crate::models::{AggregatedTable, Efficiency, SummaryRow};

/// Textual ICE value the upstream tool writes when it could not score a trace.
pub const MISSING_ICE: &str = "None";

/// Classify a raw `ICE` field. `Err` carries the trimmed text for reporting.
pub fn parse_ice(raw: &str) -> Result<Efficiency, String> {
    let value = raw.trim();
    if value == MISSING_ICE {
        return Ok(Efficiency::Absent);
    }
    value
        .parse::<i64>()
        .map(Efficiency::Present)
        .map_err(|_| value.to_string())
}

/// Read every summary file and build sample -> gene -> ICE.
///
/// Rows scored `None` are skipped. Any other non-integer score aborts the
/// whole aggregation.
pub fn aggregate(paths: &[PathBuf], abbreviate_names: bool) -> PlotResult<AggregatedTable> {
    let mut table = AggregatedTable::new();
    for path in paths {
        read_summary(path, abbreviate_names, &mut table)?;
    }
    if table.is_empty() {
        warn!("No scored rows found in {} summary files", paths.len());
    }
    info!("Aggregated ICE scores for {} samples", table.len());
    for (sample, scores) in table.iter() {
        debug!("Sample {}: {} genes", sample, scores.len());
    }
    Ok(table)
}

fn read_summary(path: &Path, abbreviate_names: bool, table: &mut AggregatedTable) -> PlotResult<()> {
    let csv_err = |source| PlotError::Csv { path: path.to_path_buf(), source };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(csv_err)?;

    let mut rows = 0usize;
    let mut skipped = 0usize;
    for record in reader.deserialize::<SummaryRow>() {
        let row = record.map_err(csv_err)?;
        rows += 1;

        let (gene, sample) = parse_label(&row.label).ok_or_else(|| PlotError::MalformedLabel {
            path: path.to_path_buf(),
            label: row.label.clone(),
        })?;
        let gene = if abbreviate_names { abbreviate(&gene) } else { gene };

        match parse_ice(&row.ice) {
            Ok(Efficiency::Present(score)) => {
                if let Some(previous) = table.insert(&sample, gene.clone(), Efficiency::Present(score)) {
                    debug!(
                        "{}: {sample}/{gene} overwritten ({:?} -> {score})",
                        path.display(),
                        previous
                    );
                }
            }
            Ok(Efficiency::Absent) => skipped += 1,
            Err(value) => {
                return Err(PlotError::MalformedScore {
                    path: path.to_path_buf(),
                    label: row.label,
                    value,
                })
            }
        }
    }

    debug!("{}: {} rows, {} without ICE score", path.display(), rows, skipped);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_summary(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn classifies_ice_values() {
        assert_eq!(parse_ice("85"), Ok(Efficiency::Present(85)));
        assert_eq!(parse_ice(" 0 "), Ok(Efficiency::Present(0)));
        assert_eq!(parse_ice("None"), Ok(Efficiency::Absent));
        assert_eq!(parse_ice("85.5"), Err("85.5".to_string()));
        assert_eq!(parse_ice(""), Err(String::new()));
    }

    #[test]
    fn builds_sample_gene_table() {
        let dir = tempdir().unwrap();
        let a = write_summary(
            dir.path(),
            "a.csv",
            "Label,ICE,R Squared\nSPLPDS1-T1-1,85,0.9\nSPLPDS1-T1-2,40,0.8\n",
        );
        let b = write_summary(dir.path(), "b.csv", "Label,ICE\nSPLPDS2-T1-1,90\n");

        let table = aggregate(&[a, b], true).unwrap();
        assert_eq!(table.sample_ids(), vec!["T1-1", "T1-2"]);
        assert_eq!(table.get("T1-1", "PDS1"), Some(Efficiency::Present(85)));
        assert_eq!(table.get("T1-1", "PDS2"), Some(Efficiency::Present(90)));
        assert_eq!(table.get("T1-2", "PDS1"), Some(Efficiency::Present(40)));
    }

    #[test]
    fn abbreviation_can_be_disabled() {
        let dir = tempdir().unwrap();
        let a = write_summary(dir.path(), "a.csv", "Label,ICE\nSPLPDS1-s,85\n");
        let table = aggregate(&[a], false).unwrap();
        assert_eq!(table.get("s", "SPLPDS1"), Some(Efficiency::Present(85)));
        assert_eq!(table.get("s", "PDS1"), None);
    }

    #[test]
    fn later_row_overwrites_earlier_one() {
        let dir = tempdir().unwrap();
        let a = write_summary(dir.path(), "a.csv", "Label,ICE\nSPLg1-s,10\n");
        let b = write_summary(dir.path(), "b.csv", "Label,ICE\ng1-s,70\n");

        let table = aggregate(&[a, b], true).unwrap();
        assert_eq!(table.get("s", "g1"), Some(Efficiency::Present(70)));
        assert_eq!(table.sample("s").unwrap().len(), 1);
    }

    #[test]
    fn none_rows_are_dropped() {
        let dir = tempdir().unwrap();
        let a = write_summary(dir.path(), "a.csv", "Label,ICE\ng1-s1,None\ng1-s2,12\n");

        let table = aggregate(&[a], true).unwrap();
        assert_eq!(table.get("s1", "g1"), None);
        assert!(table.sample("s1").is_none());
        assert_eq!(table.get("s2", "g1"), Some(Efficiency::Present(12)));
    }

    #[test]
    fn empty_summary_contributes_nothing() {
        let dir = tempdir().unwrap();
        let header_only = write_summary(dir.path(), "a.csv", "Label,ICE\n");
        let blank = write_summary(dir.path(), "b.csv", "");

        let table = aggregate(&[header_only, blank], true).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn malformed_score_is_fatal() {
        let dir = tempdir().unwrap();
        let a = write_summary(dir.path(), "a.csv", "Label,ICE\ng1-s1,12\ng1-s2,n/a\n");

        match aggregate(&[a.clone()], true) {
            Err(PlotError::MalformedScore { path, label, value }) => {
                assert_eq!(path, a);
                assert_eq!(label, "g1-s2");
                assert_eq!(value, "n/a");
            }
            other => panic!("expected MalformedScore, got {other:?}"),
        }
    }

    #[test]
    fn label_without_sample_is_fatal() {
        let dir = tempdir().unwrap();
        let a = write_summary(dir.path(), "a.csv", "Label,ICE\ng1,12\n");
        assert!(matches!(
            aggregate(&[a], true),
            Err(PlotError::MalformedLabel { .. })
        ));
    }
}
