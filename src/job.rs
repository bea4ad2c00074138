use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use log::{info, warn};

use crate::config::{Config, DatasetSpec, JobSpec};
use crate::data::{CsvOptions, Table, TableError, read_csv, render_tail};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// A dataset that could not be processed, with the reason.
#[derive(Debug)]
pub struct Failure {
    pub dataset: String,
    pub error: TableError,
}

/// Shape of a dataset after cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Outcome of one job: every dataset ends up in exactly one of the lists.
#[derive(Debug, Default)]
pub struct JobReport {
    pub job: String,
    pub succeeded: Vec<DatasetSummary>,
    pub failures: Vec<Failure>,
}

impl JobReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a whole run over the configured jobs.
#[derive(Debug, Default)]
pub struct RunReport {
    pub jobs: Vec<JobReport>,
    /// Jobs disabled in the config.
    pub skipped: Vec<String>,
}

impl RunReport {
    pub fn failure_count(&self) -> usize {
        self.jobs.iter().map(|j| j.failures.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Process exit status: failure when any dataset failed.
    pub fn exit_code(&self) -> ExitCode {
        if self.has_failures() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    /// All failures of the run, one line each: `job/dataset: Kind: message`.
    pub fn summary(&self) -> String {
        let succeeded: usize = self.jobs.iter().map(|j| j.succeeded.len()).sum();
        let mut out = format!(
            "{} job(s) run, {} skipped: {} dataset(s) ok, {} failed\n",
            self.jobs.len(),
            self.skipped.len(),
            succeeded,
            self.failure_count()
        );
        for job in &self.jobs {
            for failure in &job.failures {
                out.push_str(&format!(
                    "  {}/{}: {}: {}\n",
                    job.job,
                    failure.dataset,
                    failure.error.kind(),
                    failure.error
                ));
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Processing
// ---------------------------------------------------------------------------

/// Load one dataset and apply its column rules.
pub fn prepare_dataset(
    spec: &DatasetSpec,
    base_dir: &Path,
    options: &CsvOptions,
) -> Result<Table, TableError> {
    let mut table = read_csv(&spec.path(base_dir), options)?;
    match &spec.keep {
        Some(keep) => table.select_columns(keep.as_slice())?,
        None => table.drop_columns(spec.drop.as_slice())?,
    };
    Ok(table)
}

/// Run every dataset of `job` in order, writing a preview of each cleaned
/// table to `out`.
///
/// A failing dataset is recorded and the next one is processed. Only a
/// failure to write to `out` aborts the job.
pub fn run_job<W: Write>(job: &JobSpec, config: &Config, out: &mut W) -> io::Result<JobReport> {
    info!("Running job '{}' ({} datasets)", job.name, job.datasets.len());
    let options = config.csv_options();
    let mut report = JobReport {
        job: job.name.clone(),
        ..Default::default()
    };

    for spec in &job.datasets {
        let result = prepare_dataset(spec, &config.base_dir, &options).and_then(|table| {
            let preview = render_tail(&table, config.preview_rows)?;
            Ok((table, preview))
        });

        match result {
            Ok((table, preview)) => {
                writeln!(out, "=== {}/{} ===", job.name, spec.name)?;
                out.write_all(preview.as_bytes())?;
                writeln!(out)?;
                report.succeeded.push(DatasetSummary {
                    name: spec.name.clone(),
                    rows: table.len(),
                    columns: table.column_names().into_iter().map(String::from).collect(),
                });
            }
            Err(error) => {
                warn!("{}/{}: {error}", job.name, spec.name);
                report.failures.push(Failure {
                    dataset: spec.name.clone(),
                    error,
                });
            }
        }
    }

    Ok(report)
}

/// Run all enabled jobs of `config` in order.
pub fn run<W: Write>(config: &Config, out: &mut W) -> io::Result<RunReport> {
    let mut report = RunReport::default();
    for job in &config.jobs {
        if !job.enabled {
            info!("Skipping disabled job '{}'", job.name);
            report.skipped.push(job.name.clone());
            continue;
        }
        report.jobs.push(run_job(job, config, out)?);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(base_dir: PathBuf, jobs: Vec<JobSpec>) -> Config {
        Config {
            base_dir,
            preview_rows: 5,
            delimiter: ",".into(),
            jobs,
        }
    }

    fn job(name: &str, datasets: Vec<DatasetSpec>) -> JobSpec {
        JobSpec {
            name: name.into(),
            enabled: true,
            datasets,
        }
    }

    #[test]
    fn keep_list_selects_columns() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Fielding.csv"),
            "playerID,yearID,stint,teamID,POS,G\nabc01,2001,1,BOS,SS,20\n",
        )
        .unwrap();
        let spec = DatasetSpec {
            keep: Some(vec!["playerID".into(), "yearID".into(), "teamID".into(), "POS".into()]),
            ..DatasetSpec::dropping("Fielding", &[])
        };

        let table = prepare_dataset(&spec, dir.path(), &CsvOptions::default()).unwrap();
        assert_eq!(table.column_names(), vec!["playerID", "yearID", "teamID", "POS"]);
    }

    #[test]
    fn failures_do_not_stop_the_job() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("People.csv"), "playerID,birthYear\nabc01,1980\n").unwrap();
        let conf = config(
            dir.path().to_path_buf(),
            vec![job(
                "players",
                vec![
                    DatasetSpec::dropping("Missing", &[]),
                    DatasetSpec::dropping("People", &["birthYear"]),
                ],
            )],
        );

        let mut out = Vec::new();
        let report = run(&conf, &mut out).unwrap();

        let players = &report.jobs[0];
        assert!(!players.is_success());
        assert_eq!(players.failures[0].dataset, "Missing");
        assert_eq!(players.failures[0].error.kind(), "FileNotFound");
        assert_eq!(players.succeeded[0].columns, vec!["playerID"]);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("=== players/People ==="));
        assert!(!text.contains("players/Missing"));
    }

    #[test]
    fn disabled_jobs_are_skipped() {
        let dir = TempDir::new().unwrap();
        let mut disabled = job("teams", vec![DatasetSpec::dropping("Teams", &[])]);
        disabled.enabled = false;
        let conf = config(dir.path().to_path_buf(), vec![disabled]);

        let mut out = Vec::new();
        let report = run(&conf, &mut out).unwrap();

        assert!(report.jobs.is_empty());
        assert_eq!(report.skipped, vec!["teams"]);
        assert!(!report.has_failures());
        assert!(out.is_empty());
    }

    #[test]
    fn exit_code_reflects_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("People.csv"), "playerID,birthYear\nabc01,1980\n").unwrap();

        let clean = config(
            dir.path().to_path_buf(),
            vec![job("people", vec![DatasetSpec::dropping("People", &["birthYear"])])],
        );
        let report = run(&clean, &mut Vec::new()).unwrap();
        assert_eq!(report.exit_code(), ExitCode::SUCCESS);

        let stale = config(
            dir.path().to_path_buf(),
            vec![job("people", vec![DatasetSpec::dropping("People", &["deathYear"])])],
        );
        let report = run(&stale, &mut Vec::new()).unwrap();
        assert_eq!(report.exit_code(), ExitCode::FAILURE);
    }

    #[test]
    fn summary_lists_every_failure() {
        let report = RunReport {
            jobs: vec![JobReport {
                job: "players".into(),
                succeeded: vec![],
                failures: vec![
                    Failure {
                        dataset: "HallOfFame".into(),
                        error: TableError::MissingColumn {
                            columns: vec!["needed_note".into()],
                        },
                    },
                    Failure {
                        dataset: "stats".into(),
                        error: TableError::FileNotFound {
                            path: PathBuf::from("data/stats.csv"),
                        },
                    },
                ],
            }],
            skipped: vec![],
        };

        let summary = report.summary();
        assert!(summary.starts_with("1 job(s) run, 0 skipped: 0 dataset(s) ok, 2 failed\n"));
        assert!(summary.contains(
            "  players/HallOfFame: MissingColumn: Missing column(s): needed_note\n"
        ));
        assert!(summary.contains("  players/stats: FileNotFound: File not found: data/stats.csv\n"));
    }
}
