mod input;
mod model;
mod panels;
mod pipeline;
mod report;
mod tracing;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use crate::input::RunInputs;
use crate::input::summary::Sex;
use crate::panels::coverage::coverage_notes;
use crate::panels::loader::Catalog;
use crate::pipeline::{
    stage2_merge, stage3_cards, stage4_escalate, stage5_rows, stage7_report,
};
use crate::report::{ReportData, proxy_screen};

#[derive(Parser)]
#[command(name = "snpreport", version, about = "Genotype interpretation and report generation")]
struct Cli {
    /// Default log level becomes debug
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the HTML and Markdown reports for one sample run
    Run(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Output file stem; reports land at <out>/<base-name>_Report.{html,md}
    #[arg(long)]
    base_name: String,
    /// Directory with the upstream panel-query and verification artifacts
    #[arg(long)]
    run_dir: PathBuf,
    /// Directory with clinical_interpretations.json and snp_reference.csv
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Output directory for the report documents
    #[arg(long, default_value = "reports")]
    out: PathBuf,
    /// Overrides the QC-inferred sex for sex-dependent rules
    #[arg(long, value_enum)]
    sex: Option<SexArg>,
    /// Omit the clinical-trials section even when trial data exists
    #[arg(long)]
    skip_trials: bool,
    /// Append the developer/QC appendix (verification-feed tally)
    #[arg(long)]
    qc_appendix: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Sex {
        match arg {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

fn run_report(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = RunInputs::load(&args.run_dir, &args.data_dir);
    if inputs.verification.is_empty() {
        ::tracing::warn!("verification feed is empty; strand correction is unavailable");
    }
    let catalog = Catalog::load(&args.data_dir.join("snp_reference.csv"))?;
    if catalog.is_empty() {
        ::tracing::warn!("marker catalog is empty; panel tables will have no rows");
    }

    let merged = stage2_merge::run(&inputs, args.sex.map(Sex::from));
    let cards = stage3_cards::build_risk_cards(
        &merged.genotypes,
        &inputs.verification,
        merged.sex,
        merged.apoe.as_ref(),
    );
    let cards = stage4_escalate::escalate(cards, &merged.genotypes, &inputs.verification);
    let tables = stage5_rows::run(&catalog, &merged.genotypes, &inputs.verification, merged.sex);

    let data = ReportData {
        base_name: args.base_name.clone(),
        generated_on: chrono::Local::now().format("%Y-%m-%d").to_string(),
        summary: inputs.summary,
        sex: merged.sex,
        apoe: merged.apoe,
        cards,
        tables,
        coverage: coverage_notes(&merged.genotypes),
        proxy_screen: proxy_screen(&merged.genotypes),
        reverse_complement_rsids: inputs.verification.reverse_complement_rsids(),
        verification_tally: inputs.verification.status_tally(),
        strand_flip_details: inputs.verification.flip_details(),
        trials: inputs.trials,
        research: inputs.research,
        include_trials: !args.skip_trials,
        qc_appendix: args.qc_appendix,
    };

    stage7_report::run(&data, &merged.genotypes, &args.out)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing::init(cli.verbose);
    let result = match &cli.command {
        Command::Run(args) => run_report(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ::tracing::error!(error = %err, "report generation failed");
            ExitCode::FAILURE
        }
    }
}
