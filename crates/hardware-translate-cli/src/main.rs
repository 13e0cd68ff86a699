//! hwtranslate - hardware inventory translation CLI
//!
//! ## Commands
//!
//! - `translate`: read machines, validate them and write them in another format
//! - `validate`: read and validate machines, then print a summary

mod config;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hardware_translate::{
    open_reader, open_writer, translate_all, AcceptAll, Catalogue, DefaultMachineValidator,
    Format, MachineValidator, MachineWriter, TranslateSummary,
};
use serde::Serialize;
use tracing::{info, Level};

use crate::config::{resolve_format, TranslateConfig};

#[derive(Parser)]
#[command(name = "hwtranslate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Translate hardware inventory records one machine at a time", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read, validate and write every machine in the input
    Translate {
        /// Input file, or - for stdin
        #[arg(short, long, env = "HWTRANSLATE_INPUT")]
        input: PathBuf,

        /// Output file, or - for stdout
        #[arg(short, long, env = "HWTRANSLATE_OUTPUT", default_value = "-")]
        output: PathBuf,

        /// Input format (csv or jsonl); inferred from the extension if omitted
        #[arg(long, env = "HWTRANSLATE_INPUT_FORMAT")]
        input_format: Option<Format>,

        /// Output format (csv or jsonl); inferred from the extension if omitted
        #[arg(long, env = "HWTRANSLATE_OUTPUT_FORMAT")]
        output_format: Option<Format>,

        /// Write machines without validating them
        #[arg(long)]
        no_validate: bool,
    },

    /// Validate every machine in the input and print a summary
    Validate {
        /// Input file, or - for stdin
        #[arg(short, long, env = "HWTRANSLATE_INPUT")]
        input: PathBuf,

        /// Input format (csv or jsonl); inferred from the extension if omitted
        #[arg(long, env = "HWTRANSLATE_INPUT_FORMAT")]
        input_format: Option<Format>,

        /// Print the summary as JSON
        #[arg(long)]
        json_output: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    hardware_translate::init_tracing(cli.json, level);

    match cli.command {
        Commands::Translate {
            input,
            output,
            input_format,
            output_format,
            no_validate,
        } => {
            let config =
                TranslateConfig::resolve(input, input_format, output, output_format, !no_validate)?;
            cmd_translate(&config).map(|_| ())
        }
        Commands::Validate {
            input,
            input_format,
            json_output,
        } => {
            let format = resolve_format(&input, input_format)?;
            let report = cmd_validate(&input, format)?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report_text(&report));
            }
            Ok(())
        }
    }
}

fn cmd_translate(config: &TranslateConfig) -> Result<TranslateSummary> {
    info!(
        input = %config.input.display(),
        input_format = %config.input_format,
        output = %config.output.display(),
        output_format = %config.output_format,
        validate = config.validate,
        "Translating hardware"
    );

    let reader = open_reader(&config.input, config.input_format)
        .with_context(|| format!("Failed to open input {}", config.input.display()))?;
    let mut writer = open_writer(&config.output, config.output_format)
        .with_context(|| format!("Failed to create output {}", config.output.display()))?;

    let summary = if config.validate {
        run_batch(reader, &mut writer, DefaultMachineValidator::default())?
    } else {
        run_batch(reader, &mut writer, AcceptAll)?
    };
    writer
        .finish()
        .with_context(|| format!("Failed to flush output {}", config.output.display()))?;

    info!(
        batch_id = %summary.batch_id,
        translated = summary.translated,
        duration_ms = summary.duration_ms,
        "Translation complete"
    );
    Ok(summary)
}

fn run_batch<W, V>(
    reader: hardware_translate::DynReader,
    writer: W,
    validator: V,
) -> Result<TranslateSummary>
where
    W: MachineWriter,
    V: MachineValidator,
{
    translate_all(reader, writer, validator).context("Hardware translation failed")
}

/// Summary printed by `validate`.
#[derive(Debug, Serialize)]
struct ValidateReport {
    machines: usize,
    with_bmc: usize,
    /// Machine count per `type` label value
    types: BTreeMap<String, usize>,
}

fn cmd_validate(input: &Path, format: Format) -> Result<ValidateReport> {
    let reader = open_reader(input, format)
        .with_context(|| format!("Failed to open input {}", input.display()))?;

    let mut catalogue = Catalogue::new();
    run_batch(reader, &mut catalogue, DefaultMachineValidator::default())?;

    Ok(ValidateReport {
        machines: catalogue.len(),
        with_bmc: catalogue.iter().filter(|m| m.has_bmc()).count(),
        types: catalogue.label_counts("type"),
    })
}

fn render_report_text(report: &ValidateReport) -> String {
    let mut out = format!(
        "✓ {} machine(s) valid ({} with BMC)",
        report.machines, report.with_bmc
    );
    for (kind, count) in &report.types {
        out.push_str(&format!("\n  type={kind}: {count}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const HARDWARE_CSV: &str = "\
hostname,bmc_ip,bmc_username,bmc_password,mac,ip_address,netmask,gateway,nameservers,labels,disk
cp-1,10.0.1.1,admin,pw,00:00:00:00:00:01,10.0.0.1,255.255.255.0,10.0.0.254,1.1.1.1,type=cp,/dev/sda
wk-1,,,,00:00:00:00:00:02,10.0.0.2,255.255.255.0,10.0.0.254,1.1.1.1,type=worker,/dev/sda
";

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_translate_args() {
        let cli = Cli::try_parse_from([
            "hwtranslate",
            "--verbose",
            "translate",
            "--input",
            "hw.csv",
            "--output-format",
            "csv",
            "--no-validate",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Translate {
                input,
                output,
                input_format,
                output_format,
                no_validate,
            } => {
                assert_eq!(input, PathBuf::from("hw.csv"));
                assert_eq!(output, PathBuf::from("-"));
                assert_eq!(input_format, None);
                assert_eq!(output_format, Some(Format::Csv));
                assert!(no_validate);
            }
            _ => panic!("expected translate"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Cli::try_parse_from([
            "hwtranslate",
            "validate",
            "--input",
            "hw.txt",
            "--input-format",
            "yaml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn translate_csv_to_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hw.csv");
        let output = dir.path().join("hw.jsonl");
        std::fs::write(&input, HARDWARE_CSV).unwrap();

        let config =
            TranslateConfig::resolve(input, None, output.clone(), None, true).unwrap();
        let summary = cmd_translate(&config).unwrap();

        assert_eq!(summary.translated, 2);
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.starts_with("{\"hostname\":\"cp-1\""));
    }

    #[test]
    fn translate_failure_carries_context() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hw.csv");
        let output = dir.path().join("hw.jsonl");
        std::fs::write(&input, HARDWARE_CSV.replace("10.0.0.2,", "10.0.0.1,")).unwrap();

        let config = TranslateConfig::resolve(input, None, output, None, true).unwrap();
        let err = cmd_translate(&config).unwrap_err();

        assert_eq!(err.to_string(), "Hardware translation failed");
        assert!(format!("{err:#}").contains("duplicate ip_address"));
    }

    #[test]
    fn validate_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hw.csv");
        std::fs::write(&input, HARDWARE_CSV).unwrap();

        let report = cmd_validate(&input, Format::Csv).unwrap();

        assert_eq!(report.machines, 2);
        assert_eq!(report.with_bmc, 1);
        assert_eq!(report.types.get("worker"), Some(&1));

        let text = render_report_text(&report);
        assert!(text.starts_with("✓ 2 machine(s) valid (1 with BMC)"));
        assert!(text.contains("type=cp: 1"));
    }
}
