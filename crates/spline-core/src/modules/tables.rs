use super::ModuleExecutor;
use super::serialization::{
    artifact_file_name, ensure_directory, render_cross_section_table, write_text_artifact,
};
use crate::domain::{ComputeArtifact, ComputeResult, EnergyWindow, ModelFilter, SplineRecord};
use crate::parser::read_spline_files;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Writes one cross-section table per spline found in the input files.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineTableRequest {
    pub spline_files: Vec<PathBuf>,
    pub models: ModelFilter,
    pub window: EnergyWindow,
    pub output_dir: PathBuf,
}

pub struct SplineTableModule;

impl SplineTableModule {
    pub fn write_tables(
        &self,
        records: &[SplineRecord],
        window: EnergyWindow,
        output_dir: &Path,
    ) -> ComputeResult<Vec<ComputeArtifact>> {
        ensure_directory(output_dir)?;

        let mut artifacts = Vec::with_capacity(records.len());
        for record in records {
            let file_name = artifact_file_name(&format!("{}.txt", record.description.title()?));
            let table = render_cross_section_table(&record.knots, window);
            write_text_artifact(&output_dir.join(&file_name), &table.content)?;
            info!(
                artifact = %file_name,
                rows = table.rows,
                sum = table.sum,
                "wrote spline table"
            );
            artifacts.push(ComputeArtifact::new(file_name));
        }
        Ok(artifacts)
    }
}

impl ModuleExecutor for SplineTableModule {
    type Request = SplineTableRequest;
    type Output = Vec<ComputeArtifact>;

    fn execute(&self, request: &SplineTableRequest) -> ComputeResult<Vec<ComputeArtifact>> {
        let records = read_spline_files(&request.spline_files, &request.models)?;
        if records.is_empty() {
            warn!(
                files = request.spline_files.len(),
                "no splines matched the model selection"
            );
        }
        self.write_tables(&records, request.window, &request.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::{SplineTableModule, SplineTableRequest};
    use crate::domain::{EnergyWindow, ModelFilter, SplineErrorCategory};
    use crate::modules::ModuleExecutor;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SPLINES: &str = r#"<genie_xsec_spline_list version="2.00" uselog="1">
  <spline name="genie::QELCCPXSec/Default/nu:14;tgt:1000060120;proc:Weak[CC],QES;">
    <knot><E>1</E><xsec>2.5704900e-11</xsec></knot>
    <knot><E>2</E><xsec>5.1409800e-11</xsec></knot>
  </spline>
  <spline name="genie::ReinSeghalCOHPiPXSec/Default/nu:-14;tgt:1000010010;proc:Weak[NC],COH;">
    <knot><E>1</E><xsec>0</xsec></knot>
  </spline>
</genie_xsec_spline_list>
"#;

    fn request(temp: &TempDir, models: ModelFilter) -> SplineTableRequest {
        let spline_path = temp.path().join("splines.xml");
        fs::write(&spline_path, SPLINES).expect("fixture should be written");
        SplineTableRequest {
            spline_files: vec![spline_path],
            models,
            window: EnergyWindow::default(),
            output_dir: temp.path().join("tables"),
        }
    }

    #[test]
    fn each_spline_gets_a_titled_table() {
        let temp = TempDir::new().expect("tempdir should be created");
        let artifacts = SplineTableModule
            .execute(&request(&temp, ModelFilter::All))
            .expect("tables should be written");

        let names: Vec<PathBuf> = artifacts
            .iter()
            .map(|artifact| artifact.relative_path.clone())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("QELCCPXSec_Muon_Neutrino_CC_on_Carbon.txt"),
                PathBuf::from("ReinSeghalCOHPiPXSec_Muon_Antineutrino_NC_on_Hydrogen.txt"),
            ]
        );

        let content = fs::read_to_string(
            temp.path()
                .join("tables/QELCCPXSec_Muon_Neutrino_CC_on_Carbon.txt"),
        )
        .expect("table should exist");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("   1.00000:    1.0000"));
        assert!(lines[1].starts_with("   2.00000:    2.0000"));
        assert!(lines[2].starts_with("Erange 0.0 to 2.0 sum = "));
    }

    #[test]
    fn model_filter_limits_written_tables() {
        let temp = TempDir::new().expect("tempdir should be created");
        let artifacts = SplineTableModule
            .execute(&request(
                &temp,
                ModelFilter::from_names(["ReinSeghalCOHPiPXSec"]),
            ))
            .expect("tables should be written");
        assert_eq!(artifacts.len(), 1);
        assert!(
            !temp
                .path()
                .join("tables/QELCCPXSec_Muon_Neutrino_CC_on_Carbon.txt")
                .exists()
        );
    }

    #[test]
    fn spline_without_target_cannot_be_titled() {
        let temp = TempDir::new().expect("tempdir should be created");
        let spline_path = temp.path().join("splines.xml");
        fs::write(
            &spline_path,
            r#"<list><spline name="genie::QELCCPXSec/Default/nu:14;proc:Weak[CC],QES;"><knot><E>1</E><xsec>1</xsec></knot></spline></list>"#,
        )
        .expect("fixture should be written");

        let error = SplineTableModule
            .execute(&SplineTableRequest {
                spline_files: vec![spline_path],
                models: ModelFilter::All,
                window: EnergyWindow::default(),
                output_dir: temp.path().to_path_buf(),
            })
            .expect_err("tgt is required for the file name");
        assert_eq!(error.category(), SplineErrorCategory::InputValidationError);
        assert_eq!(error.placeholder(), "INPUT.SPLINE_FIELD");
    }
}
