use super::ModuleExecutor;
use super::serialization::{
    artifact_file_name, ensure_directory, render_cross_section_table, write_text_artifact,
};
use crate::common::pdg::{CARBON_PDG_CODE, decode_target};
use crate::domain::{
    ComputeArtifact, ComputeResult, EnergyWindow, InteractionCurrent, ModelFilter,
    NeutrinoFlavor, SplineRecord,
};
use crate::numerics::sum_knots;
use crate::parser::read_spline_files;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Flavors summed per target, in output order.
pub const SUMMED_FLAVORS: [NeutrinoFlavor; 4] = [
    NeutrinoFlavor::MuonNeutrino,
    NeutrinoFlavor::MuonAntineutrino,
    NeutrinoFlavor::ElectronNeutrino,
    NeutrinoFlavor::ElectronAntineutrino,
];

pub const DEFAULT_TARGET: &str = CARBON_PDG_CODE;

/// Sums every spline of one target and current, per flavor, into a single
/// table.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionSumRequest {
    pub spline_files: Vec<PathBuf>,
    pub target: String,
    pub current: InteractionCurrent,
    pub window: EnergyWindow,
    pub output_dir: PathBuf,
}

pub struct CrossSectionSumModule;

impl CrossSectionSumModule {
    pub fn select<'a>(
        records: &'a [SplineRecord],
        target: &str,
        current: InteractionCurrent,
        flavor: NeutrinoFlavor,
    ) -> Vec<&'a SplineRecord> {
        records
            .iter()
            .filter(|record| {
                let description = &record.description;
                description.target_code() == Some(target)
                    && description.flavor == flavor
                    && description.current() == Some(current)
            })
            .collect()
    }

    pub fn file_name(flavor: NeutrinoFlavor, current: InteractionCurrent, target: &str) -> String {
        artifact_file_name(&format!(
            "{}_{}_{}.txt",
            flavor,
            current,
            decode_target(target)
        ))
    }
}

impl ModuleExecutor for CrossSectionSumModule {
    type Request = CrossSectionSumRequest;
    type Output = Vec<ComputeArtifact>;

    fn execute(&self, request: &CrossSectionSumRequest) -> ComputeResult<Vec<ComputeArtifact>> {
        let records = read_spline_files(&request.spline_files, &ModelFilter::All)?;
        ensure_directory(&request.output_dir)?;

        let mut artifacts = Vec::new();
        for flavor in SUMMED_FLAVORS {
            let selected = Self::select(&records, &request.target, request.current, flavor);
            debug!(
                flavor = %flavor,
                current = %request.current,
                target = %request.target,
                splines = selected.len(),
                "selected splines for summation"
            );

            let Some(total) = sum_knots(&selected)? else {
                warn!(
                    flavor = %flavor,
                    current = %request.current,
                    target = %request.target,
                    "no splines to sum"
                );
                continue;
            };

            let file_name = Self::file_name(flavor, request.current, &request.target);
            let table = render_cross_section_table(&total, request.window);
            write_text_artifact(&request.output_dir.join(&file_name), &table.content)?;
            info!(artifact = %file_name, rows = table.rows, sum = table.sum, "wrote summed table");
            artifacts.push(ComputeArtifact::new(file_name));
        }

        Ok(artifacts)
    }
}
