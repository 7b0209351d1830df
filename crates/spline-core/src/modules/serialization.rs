use crate::common::constants::{TABLE_SCALE, TABLE_UNIT_LABEL, to_scaled_cm2};
use crate::domain::{ComputeResult, EnergyWindow, Knot, SplineError};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

pub fn format_fixed_f64(value: f64, width: usize, precision: usize) -> String {
    format!(
        "{value:>width$.precision$}",
        width = width,
        precision = precision
    )
}

/// Replaces each run of whitespace with a single underscore.
pub fn artifact_file_name(title: &str) -> String {
    WHITESPACE_RUN.replace_all(title, "_").into_owned()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionTable {
    pub content: String,
    pub rows: usize,
    pub sum: f64,
    pub last_energy: f64,
}

/// Renders knots (GeV⁻²) as `<energy>:  <xsec> x 10^(-38) cm2` rows for
/// energies strictly inside `window`, followed by the `Erange` footer.
pub fn render_cross_section_table(knots: &[Knot], window: EnergyWindow) -> CrossSectionTable {
    let mut content = String::new();
    let mut rows = 0;
    let mut sum = 0.0;
    let mut last_energy = 0.0;

    for knot in knots {
        if !window.contains_exclusive(knot.energy) {
            continue;
        }
        let scaled = to_scaled_cm2(knot.cross_section, TABLE_SCALE);
        sum += scaled;
        last_energy = knot.energy;
        rows += 1;
        content.push_str(&format!(
            "{}:  {} {}\n",
            format_fixed_f64(knot.energy, 10, 5),
            format_fixed_f64(scaled, 12, 8),
            TABLE_UNIT_LABEL
        ));
    }

    content.push_str(&format!(
        "Erange {:?} to {:?} sum = {:?} x 10^(-38) cm^2\n",
        window.min, last_energy, sum
    ));

    CrossSectionTable {
        content,
        rows,
        sum,
        last_energy,
    }
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> ComputeResult<()> {
    fs::write(path, normalize_text_artifact(content)).map_err(|source| {
        SplineError::io_system(
            "IO.TABLE_WRITE",
            format!("failed to write '{}': {}", path.display(), source),
        )
    })
}

pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> ComputeResult<()> {
    let rendered = serde_json::to_string_pretty(report).map_err(|source| {
        SplineError::internal(
            "SYS.REPORT_SERIALIZE",
            format!("failed to serialize report: {source}"),
        )
    })?;
    ensure_directory(path.parent().unwrap_or(Path::new("")))?;
    fs::write(path, rendered + "\n").map_err(|source| {
        SplineError::io_system(
            "IO.REPORT_WRITE",
            format!("failed to write report '{}': {}", path.display(), source),
        )
    })
}

pub fn ensure_directory(path: &Path) -> ComputeResult<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|source| {
        SplineError::io_system(
            "IO.OUTPUT_DIRECTORY",
            format!(
                "failed to create output directory '{}': {}",
                path.display(),
                source
            ),
        )
    })
}
