use crate::domain::{FluxEntry, Knot, ParserResult, SplineError};
use std::fs;
use std::path::Path;
use tracing::debug;

const FLUX_HEADER_MARKER: &str = "TH1";

pub fn read_cross_section_table(path: &Path) -> ParserResult<Vec<Knot>> {
    let source = read_source(path, "IO.XSEC_READ", "cross-section table")?;
    let knots = parse_cross_section_table(&source)?;
    debug!(path = %path.display(), knots = knots.len(), "parsed cross-section table");
    Ok(knots)
}

pub fn read_flux_file(path: &Path) -> ParserResult<Vec<FluxEntry>> {
    let source = read_source(path, "IO.FLUX_READ", "flux histogram")?;
    let entries = parse_flux_source(&source)?;
    debug!(path = %path.display(), entries = entries.len(), "parsed flux histogram");
    Ok(entries)
}

/// Reads `<energy>:  <xsec> x 10^(-38) cm2` rows. Lines without `:` (the
/// `Erange ... sum = ...` footer, headers) are ignored.
pub fn parse_cross_section_table(source: &str) -> ParserResult<Vec<Knot>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| line.split_once(':').map(|fields| (index + 1, fields)))
        .map(|(line_number, (energy, rest))| {
            let cross_section = rest.split('x').next().unwrap_or(rest);
            Ok(Knot::new(
                parse_number(energy, "INPUT.XSEC_LINE", "energy", line_number)?,
                parse_number(cross_section, "INPUT.XSEC_LINE", "cross section", line_number)?,
            ))
        })
        .collect()
}

/// Reads a ROOT `TH1` text dump: each row is comma separated `key=value`
/// fields with the bin content first and the lower bin edge second.
pub fn parse_flux_source(source: &str) -> ParserResult<Vec<FluxEntry>> {
    let mut entries = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        if line.contains(FLUX_HEADER_MARKER) || line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let count = flux_field(fields.next(), "count", line_number)?;
        let bin_low = flux_field(fields.next(), "bin low edge", line_number)?;
        entries.push(FluxEntry { count, bin_low });
    }
    Ok(entries)
}

fn flux_field(field: Option<&str>, label: &str, line_number: usize) -> ParserResult<f64> {
    let value = field
        .and_then(|field| field.split('=').nth(1))
        .ok_or_else(|| {
            SplineError::input_validation(
                "INPUT.FLUX_LINE",
                format!("flux line {line_number} has no '{label}' field of the form key=value"),
            )
        })?;
    parse_number(value, "INPUT.FLUX_LINE", label, line_number)
}

fn parse_number(
    text: &str,
    placeholder: &'static str,
    label: &str,
    line_number: usize,
) -> ParserResult<f64> {
    let trimmed = text.trim();
    trimmed.parse::<f64>().map_err(|_| {
        SplineError::input_validation(
            placeholder,
            format!("line {line_number} has non-numeric {label} '{trimmed}'"),
        )
    })
}

fn read_source(path: &Path, placeholder: &'static str, label: &str) -> ParserResult<String> {
    fs::read_to_string(path).map_err(|source| {
        SplineError::io_system(
            placeholder,
            format!("failed to read {} '{}': {}", label, path.display(), source),
        )
    })
}
