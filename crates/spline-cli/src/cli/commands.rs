use super::CliError;
use super::helpers::{convolution_labels, energy_window};
use anyhow::Context;
use spline_core::domain::{EnergyWindow, InteractionCurrent, ModelFilter, SplineRecord};
use spline_core::modules::flux::render_human_summary;
use spline_core::modules::serialization::write_json_report;
use spline_core::modules::sums::DEFAULT_TARGET;
use spline_core::modules::{
    ConvolutionInput, CrossSectionSumModule, CrossSectionSumRequest, FluxConvolutionModule,
    FluxConvolutionRequest, ModuleExecutor, SplineTableModule, SplineTableRequest,
};
use spline_core::parser::read_spline_files;
use std::path::PathBuf;
use tracing::info;

#[derive(clap::Args)]
pub(super) struct WindowArgs {
    /// Lower edge of the energy window (GeV)
    #[arg(short = 'n', long = "min", default_value_t = EnergyWindow::DEFAULT_MIN)]
    min: f64,

    /// Upper edge of the energy window (GeV)
    #[arg(short = 'x', long = "max", default_value_t = EnergyWindow::DEFAULT_MAX)]
    max: f64,
}

impl WindowArgs {
    fn window(&self) -> Result<EnergyWindow, CliError> {
        energy_window(self.min, self.max)
    }
}

#[derive(clap::Args)]
pub(super) struct DescribeArgs {
    /// Spline XML files, comma separated
    #[arg(short = 's', long = "splines", value_delimiter = ',', required = true)]
    splines: Vec<PathBuf>,

    /// Algorithm names to keep, comma separated, or `all`
    #[arg(short = 'm', long = "models", value_delimiter = ',', default_value = "all")]
    models: Vec<String>,

    /// Print one JSON object per spline
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
pub(super) struct TablesArgs {
    /// Spline XML files, comma separated
    #[arg(short = 's', long = "splines", value_delimiter = ',', required = true)]
    splines: Vec<PathBuf>,

    /// Algorithm names to keep, comma separated, or `all`
    #[arg(short = 'm', long = "models", value_delimiter = ',', default_value = "all")]
    models: Vec<String>,

    #[command(flatten)]
    window: WindowArgs,

    /// Directory receiving the tables
    #[arg(short = 'o', long = "output", default_value = ".")]
    output: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct SumArgs {
    /// Spline XML files, comma separated
    #[arg(short = 's', long = "splines", value_delimiter = ',', required = true)]
    splines: Vec<PathBuf>,

    /// Target PDG ion code
    #[arg(short = 't', long = "target", default_value = DEFAULT_TARGET)]
    target: String,

    /// Sum neutral-current splines instead of charged-current ones
    #[arg(long)]
    nc: bool,

    #[command(flatten)]
    window: WindowArgs,

    /// Directory receiving the summed tables
    #[arg(short = 'o', long = "output", default_value = ".")]
    output: PathBuf,
}

#[derive(clap::Args)]
pub(super) struct ConvolveArgs {
    /// Flux histogram files, comma separated
    #[arg(long = "flux", value_delimiter = ',', required = true)]
    flux: Vec<PathBuf>,

    /// Cross-section tables, comma separated, one per flux file
    #[arg(long = "xsec", value_delimiter = ',', required = true)]
    xsec: Vec<PathBuf>,

    /// Labels for the printed results, comma separated
    #[arg(long = "label", value_delimiter = ',')]
    labels: Vec<String>,

    #[command(flatten)]
    window: WindowArgs,

    /// Also write the results as a JSON report
    #[arg(long)]
    report: Option<PathBuf>,
}

pub(super) fn run_describe_command(args: DescribeArgs) -> Result<i32, CliError> {
    let records = read_spline_files(&args.splines, &ModelFilter::from_names(args.models))?;
    for record in &records {
        if args.json {
            let line = serde_json::to_string(&record.description)
                .context("failed to serialize spline description")?;
            println!("{line}");
        } else {
            println!("{}", describe_line(record));
        }
    }
    Ok(0)
}

fn describe_line(record: &SplineRecord) -> String {
    let description = &record.description;
    let fields = description
        .fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} | {} | {} | {} knots",
        description.algorithm,
        description.flavor,
        fields,
        record.knots.len()
    )
}

pub(super) fn run_tables_command(args: TablesArgs) -> Result<i32, CliError> {
    let request = SplineTableRequest {
        spline_files: args.splines,
        models: ModelFilter::from_names(args.models),
        window: args.window.window()?,
        output_dir: args.output,
    };
    let artifacts = SplineTableModule.execute(&request)?;
    for artifact in &artifacts {
        println!("{}", request.output_dir.join(&artifact.relative_path).display());
    }
    Ok(0)
}

pub(super) fn run_sum_command(args: SumArgs) -> Result<i32, CliError> {
    let request = CrossSectionSumRequest {
        spline_files: args.splines,
        target: args.target,
        current: if args.nc {
            InteractionCurrent::Neutral
        } else {
            InteractionCurrent::Charged
        },
        window: args.window.window()?,
        output_dir: args.output,
    };
    let artifacts = CrossSectionSumModule.execute(&request)?;
    for artifact in &artifacts {
        println!("{}", request.output_dir.join(&artifact.relative_path).display());
    }
    Ok(0)
}

pub(super) fn run_convolve_command(args: ConvolveArgs) -> Result<i32, CliError> {
    if args.flux.len() != args.xsec.len() {
        return Err(CliError::Usage(format!(
            "Got {} flux files for {} cross-section files; expected one flux file per table.",
            args.flux.len(),
            args.xsec.len()
        )));
    }
    let labels = convolution_labels(&args.labels, &args.xsec)?;

    let request = FluxConvolutionRequest {
        inputs: labels
            .into_iter()
            .zip(args.flux)
            .zip(args.xsec)
            .map(|((label, flux_path), cross_section_path)| ConvolutionInput {
                label,
                flux_path,
                cross_section_path,
            })
            .collect(),
        window: args.window.window()?,
    };
    let report = FluxConvolutionModule.execute(&request)?;
    println!("{}", render_human_summary(&report));

    if let Some(report_path) = args.report {
        write_json_report(&report_path, &report)?;
        info!(report = %report_path.display(), "wrote convolution report");
        println!("JSON report: {}", report_path.display());
    }
    Ok(0)
}
