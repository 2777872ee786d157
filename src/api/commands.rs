//! Command handlers
//!
//! Thin layer between the CLI and the pipeline: load config, read the
//! source, run the selected stages, write the requested sinks.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use super::cli::{Cli, Commands, OutputArgs, ScorerArgs, SourceArgs};
use crate::logic::config::TriageConfig;
use crate::logic::dataset::{self, read_source, SourceBatch};
use crate::logic::explain::render_report;
use crate::logic::pipeline::{self, PipelineReport, StageSelection};

/// Sink paths for one invocation
#[derive(Debug, Default)]
struct Sinks {
    output: Option<PathBuf>,
    rejected: Option<PathBuf>,
    report: Option<PathBuf>,
    summary: Option<PathBuf>,
    /// Log the first rows when no output path is given
    preview: bool,
    /// Print report / summary to stdout when no path is given
    print_documents: bool,
}

pub fn execute(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Validate { source, output } => {
            let config = load_config(config_path, &source, Some(&output), None)?;
            let sinks = Sinks {
                output: output.output,
                rejected: source.rejected.clone(),
                preview: true,
                ..Default::default()
            };
            triage(&source.input, &config, StageSelection::validate_only(), &sinks)?;
        }
        Commands::Tag { source, output } => {
            let config = load_config(config_path, &source, Some(&output), None)?;
            let sinks = Sinks {
                output: output.output,
                rejected: source.rejected.clone(),
                preview: true,
                ..Default::default()
            };
            triage(&source.input, &config, StageSelection::tag(), &sinks)?;
        }
        Commands::Resolve { source, report } => {
            let config = load_config(config_path, &source, None, None)?;
            let sinks = Sinks {
                rejected: source.rejected.clone(),
                report,
                print_documents: true,
                ..Default::default()
            };
            triage(&source.input, &config, StageSelection::resolve(), &sinks)?;
        }
        Commands::Score {
            source,
            output,
            scorer,
            summary,
        } => {
            let config = load_config(config_path, &source, Some(&output), Some(&scorer))?;
            let sinks = Sinks {
                output: output.output,
                rejected: source.rejected.clone(),
                summary,
                preview: true,
                print_documents: true,
                ..Default::default()
            };
            let report = triage(&source.input, &config, StageSelection::score(), &sinks)?;
            if let Some(e) = report.anomaly_error {
                bail!("anomaly scoring failed: {}", e);
            }
        }
        Commands::Run {
            source,
            output,
            scorer,
            report,
            summary,
        } => {
            let config = load_config(config_path, &source, Some(&output), Some(&scorer))?;
            let sinks = Sinks {
                output: output.output,
                rejected: source.rejected.clone(),
                report,
                summary,
                preview: true,
                print_documents: false,
            };
            triage(&source.input, &config, StageSelection::all(), &sinks)?;
        }
    }

    Ok(())
}

/// File + env config with this invocation's flags on top
fn load_config(
    path: Option<&Path>,
    source: &SourceArgs,
    output: Option<&OutputArgs>,
    scorer: Option<&ScorerArgs>,
) -> Result<TriageConfig> {
    let mut config = TriageConfig::load(path).context("failed to load configuration")?;

    if let Some(scorer) = scorer {
        config.apply_overrides(&scorer.overrides());
    }
    if let Some(format) = output.and_then(|o| o.format) {
        config.output.format = format.into();
    }
    if source.overwrite {
        config.output.overwrite = true;
    }

    config.validate().context("invalid configuration")?;
    log::debug!("Effective config: {:?}", config);
    Ok(config)
}

fn triage(input: &Path, config: &TriageConfig, stages: StageSelection, sinks: &Sinks) -> Result<PipelineReport> {
    let batch = read_source(input).with_context(|| format!("failed to read {}", input.display()))?;
    let source_name = batch.source_name();
    let SourceBatch {
        delimiter,
        columns,
        records,
        ..
    } = batch;

    let report = pipeline::run(records, config, stages)?;
    let overwrite = config.output.overwrite;

    if let Some(target) = &sinks.rejected {
        dataset::write_rejections(target, &report.validation.rejected, overwrite)
            .with_context(|| format!("failed to write rejections to {}", target.display()))?;
    }

    let layout = report.layout(&columns);
    let rows = report.triage_records();
    match &sinks.output {
        Some(_) if stages == StageSelection::validate_only() && report.validation.is_noop() => {
            log::info!("[run {}] Input already valid and normalized, nothing to write", report.run_id);
        }
        Some(target) => {
            dataset::write_records(target, &layout, &rows, config.output.format, delimiter, overwrite)
                .with_context(|| format!("failed to write {}", target.display()))?;
        }
        None if sinks.preview && !rows.is_empty() => {
            log::info!(
                "Preview (first {} row(s)):\n{}",
                config.output.preview_rows,
                dataset::preview(&layout, &rows, config.output.preview_rows)
            );
        }
        None => {}
    }

    if stages.resolution {
        let text = render_report(&source_name, &report.resolutions);
        emit_document(sinks.report.as_deref(), &text, overwrite, sinks.print_documents)?;
    }

    if let Some(summary) = report.anomaly_summary() {
        emit_document(sinks.summary.as_deref(), &summary.render(), overwrite, sinks.print_documents)?;
    }

    Ok(report)
}

fn emit_document(target: Option<&Path>, text: &str, overwrite: bool, print: bool) -> Result<()> {
    match target {
        Some(path) => {
            dataset::write_text(path, text, overwrite)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("Document written to {}", path.display());
        }
        None if print => println!("{}", text),
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    use crate::logic::dataset::{indicator_columns, ANOMALY_COLUMNS};

    const HEADER: &str = "timestamp,origen_IP,destino_IP,hash_archivo,dominio,evento,descripcion";

    const ROWS: [&str; 4] = [
        "15/01/2025 02:10,8.8.8.8,192.168.1.5,,malware.example.com,Acceso no autorizado,Intento",
        "15/01/2025 09:30,10.0.0.4,192.168.1.5,,example.com,Acceso autorizado,ok",
        "16/01/2025 10:00,10.0.0.7,192.168.1.5,,trusted.source.org,Acceso autorizado,ok",
        "17/01/2025 11:15,192.168.1.20,192.168.1.5,,example.com,Acceso autorizado,ok",
    ];

    fn write_input(dir: &Path, rows: &[&str]) -> PathBuf {
        let path = dir.join("eventos.csv");
        let mut body = format!("{HEADER}\n");
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        fs::write(&path, body).unwrap();
        path
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("oneshield-triage").chain(args.iter().copied()))
    }

    #[test]
    fn test_validate_noop_writes_nothing() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &ROWS);
        let output = dir.path().join("validado.csv");

        execute(cli(&[
            "validate",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]))
        .unwrap();

        assert!(!output.exists());
    }

    #[test]
    fn test_validate_with_rejections_writes_output_and_audit() {
        let dir = tempdir().unwrap();
        let mut rows = ROWS.to_vec();
        rows.push("17/01/2025 12:00,999.1.1.1,192.168.1.5,,example.com,Acceso autorizado,ok");
        let input = write_input(dir.path(), &rows);
        let output = dir.path().join("validado.csv");
        let rejected = dir.path().join("rechazados.jsonl");

        execute(cli(&[
            "validate",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--rejected",
            rejected.to_str().unwrap(),
        ]))
        .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 1 + ROWS.len());
        let audit = fs::read_to_string(&rejected).unwrap();
        assert_eq!(audit.lines().count(), 1);
        assert!(audit.contains("999.1.1.1"));
    }

    #[test]
    fn test_run_keeps_indicator_output_when_scoring_fails() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &ROWS);
        let output = dir.path().join("triage.csv");
        let report = dir.path().join("resolucion.txt");

        execute(cli(&[
            "run",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--report",
            report.to_str().unwrap(),
            "--min-samples",
            "10",
        ]))
        .unwrap();

        let written = fs::read_to_string(&output).unwrap();
        let header = written.lines().next().unwrap();
        assert!(header.contains(';'));
        for column in indicator_columns() {
            assert!(header.contains(column), "missing column {column}");
        }
        assert!(!header.contains(ANOMALY_COLUMNS[0]));
        assert_eq!(written.lines().count(), 1 + ROWS.len());

        let text = fs::read_to_string(&report).unwrap();
        assert!(text.starts_with("Resolution of document eventos.csv"));
    }

    #[test]
    fn test_score_fails_on_small_batch() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &ROWS);
        let output = dir.path().join("scored.csv");

        let err = execute(cli(&[
            "score",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--min-samples",
            "10",
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("anomaly scoring failed"));
        assert!(err.to_string().contains("insufficient data"));
    }

    #[test]
    fn test_existing_report_is_not_replaced() {
        let dir = tempdir().unwrap();
        let input = write_input(dir.path(), &ROWS);
        let report = dir.path().join("resolucion.txt");
        fs::write(&report, "previous").unwrap();

        let args = ["resolve", "--input", input.to_str().unwrap(), "--report", report.to_str().unwrap()];
        assert!(execute(cli(&args)).is_err());
        assert_eq!(fs::read_to_string(&report).unwrap(), "previous");

        let mut args = args.to_vec();
        args.push("--overwrite");
        execute(cli(&args)).unwrap();
        assert!(fs::read_to_string(&report).unwrap().starts_with("Resolution of document"));
    }
}
