use super::CliError;
use spline_core::domain::EnergyWindow;
use std::path::Path;

pub(super) fn energy_window(min: f64, max: f64) -> Result<EnergyWindow, CliError> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(CliError::Usage(format!(
            "Invalid energy window [{}, {}]; expected finite bounds with min <= max.",
            min, max
        )));
    }
    Ok(EnergyWindow::new(min, max))
}

/// Labels default to the cross-section file stem.
pub(super) fn convolution_labels(
    labels: &[String],
    cross_section_files: &[impl AsRef<Path>],
) -> Result<Vec<String>, CliError> {
    if labels.is_empty() {
        return Ok(cross_section_files
            .iter()
            .map(|path| {
                let path = path.as_ref();
                path.file_stem()
                    .unwrap_or(path.as_os_str())
                    .to_string_lossy()
                    .into_owned()
            })
            .collect());
    }
    if labels.len() != cross_section_files.len() {
        return Err(CliError::Usage(format!(
            "Got {} labels for {} cross-section files.",
            labels.len(),
            cross_section_files.len()
        )));
    }
    Ok(labels.to_vec())
}

#[cfg(test)]
mod tests {
    use super::{convolution_labels, energy_window};
    use crate::cli::CliError;
    use std::path::PathBuf;

    #[test]
    fn inverted_window_is_a_usage_error() {
        assert!(matches!(energy_window(5.0, 1.0), Err(CliError::Usage(_))));
        assert!(matches!(
            energy_window(f64::NAN, 1.0),
            Err(CliError::Usage(_))
        ));
        let window = energy_window(0.0, 10.0).expect("window is valid");
        assert_eq!((window.min, window.max), (0.0, 10.0));
    }

    #[test]
    fn labels_fall_back_to_file_stems() {
        let files = [
            PathBuf::from("sums/Muon_Neutrino_CC_Carbon.txt"),
            PathBuf::from("Electron_Neutrino_CC_Carbon.txt"),
        ];
        assert_eq!(
            convolution_labels(&[], &files).expect("labels should resolve"),
            vec!["Muon_Neutrino_CC_Carbon", "Electron_Neutrino_CC_Carbon"]
        );
        assert!(matches!(
            convolution_labels(&["only one".to_string()], &files),
            Err(CliError::Usage(_))
        ));
    }
}
