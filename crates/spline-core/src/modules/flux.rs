use super::ModuleExecutor;
use crate::common::constants::TABLE_UNIT_LABEL;
use crate::domain::{ComputeResult, EnergyWindow};
use crate::numerics::{FluxHistogram, convolve};
use crate::parser::{read_cross_section_table, read_flux_file};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvolutionInput {
    pub label: String,
    pub flux_path: PathBuf,
    pub cross_section_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FluxConvolutionRequest {
    pub inputs: Vec<ConvolutionInput>,
    pub window: EnergyWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvolutionResult {
    pub label: String,
    pub flux_path: PathBuf,
    pub cross_section_path: PathBuf,
    pub flux_bins: usize,
    pub total_cross_section: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvolutionReport {
    pub energy_min: f64,
    pub energy_max: f64,
    pub unit: &'static str,
    pub results: Vec<ConvolutionResult>,
}

/// Flux-averages tabulated cross sections (already in 10⁻³⁸ cm²) over
/// histogrammed flux spectra.
pub struct FluxConvolutionModule;

impl FluxConvolutionModule {
    pub fn convolve_input(
        &self,
        input: &ConvolutionInput,
        window: EnergyWindow,
    ) -> ComputeResult<ConvolutionResult> {
        let knots = read_cross_section_table(&input.cross_section_path)?;
        let entries = read_flux_file(&input.flux_path)?;
        let flux = FluxHistogram::from_entries(&entries, window)?;
        let total_cross_section = convolve(&knots, &flux)?;

        info!(
            label = %input.label,
            bins = flux.len(),
            total = total_cross_section,
            "convolved flux with cross section"
        );

        Ok(ConvolutionResult {
            label: input.label.clone(),
            flux_path: input.flux_path.clone(),
            cross_section_path: input.cross_section_path.clone(),
            flux_bins: flux.len(),
            total_cross_section,
        })
    }
}

impl ModuleExecutor for FluxConvolutionModule {
    type Request = FluxConvolutionRequest;
    type Output = ConvolutionReport;

    fn execute(&self, request: &FluxConvolutionRequest) -> ComputeResult<ConvolutionReport> {
        let results = request
            .inputs
            .iter()
            .map(|input| self.convolve_input(input, request.window))
            .collect::<ComputeResult<Vec<_>>>()?;

        Ok(ConvolutionReport {
            energy_min: request.window.min,
            energy_max: request.window.max,
            unit: TABLE_UNIT_LABEL,
            results,
        })
    }
}

pub fn render_human_summary(report: &ConvolutionReport) -> String {
    report
        .results
        .iter()
        .map(|result| {
            format!(
                "{} total xsec = {:?} {}",
                result.label, result.total_cross_section, report.unit
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
