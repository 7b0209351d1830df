use super::parse_description;
use crate::domain::{Knot, ModelFilter, ParserResult, SplineError, SplineRecord};
use std::fs;
use std::path::Path;
use tracing::debug;
use xmltree::{Element, XMLNode};

const SPLINE_TAG: &str = "spline";
const KNOT_TAG: &str = "knot";
const ENERGY_TAG: &str = "E";
const XSEC_TAG: &str = "xsec";
const NAME_ATTRIBUTE: &str = "name";

pub fn read_spline_file(path: &Path) -> ParserResult<Vec<SplineRecord>> {
    let source = fs::read_to_string(path).map_err(|source| {
        SplineError::io_system(
            "IO.SPLINE_READ",
            format!("failed to read spline file '{}': {}", path.display(), source),
        )
    })?;
    let records = parse_spline_document(&source).map_err(|error| {
        SplineError::new(
            error.category(),
            error.placeholder(),
            format!("{}: {}", path.display(), error.message()),
        )
    })?;
    debug!(
        path = %path.display(),
        splines = records.len(),
        "parsed spline file"
    );
    Ok(records)
}

/// Reads every file in order, keeping only splines whose algorithm the filter
/// accepts.
pub fn read_spline_files<P: AsRef<Path>>(
    paths: &[P],
    models: &ModelFilter,
) -> ParserResult<Vec<SplineRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(
            read_spline_file(path.as_ref())?
                .into_iter()
                .filter(|record| models.accepts(&record.description.algorithm)),
        );
    }
    Ok(records)
}

/// Parses a GENIE spline list: the root element holds `spline` children,
/// each with a `name` annotation and `knot` children carrying `E` and `xsec`.
pub fn parse_spline_document(source: &str) -> ParserResult<Vec<SplineRecord>> {
    let root = Element::parse(source.as_bytes()).map_err(|error| {
        SplineError::input_validation(
            "INPUT.SPLINE_XML",
            format!("spline document is not well-formed XML: {error}"),
        )
    })?;

    child_elements(&root, SPLINE_TAG)
        .enumerate()
        .map(|(index, spline)| parse_spline(index, spline))
        .collect()
}

fn parse_spline(index: usize, spline: &Element) -> ParserResult<SplineRecord> {
    let name = spline.attributes.get(NAME_ATTRIBUTE).ok_or_else(|| {
        SplineError::input_validation(
            "INPUT.SPLINE_XML",
            format!("spline #{index} has no '{NAME_ATTRIBUTE}' attribute"),
        )
    })?;
    let description = parse_description(name)?;

    let knots = child_elements(spline, KNOT_TAG)
        .enumerate()
        .map(|(knot_index, knot)| {
            Ok(Knot::new(
                knot_value(knot, ENERGY_TAG, name, knot_index)?,
                knot_value(knot, XSEC_TAG, name, knot_index)?,
            ))
        })
        .collect::<ParserResult<Vec<_>>>()?;

    Ok(SplineRecord { description, knots })
}

fn knot_value(knot: &Element, tag: &str, spline_name: &str, knot_index: usize) -> ParserResult<f64> {
    let text = knot
        .get_child(tag)
        .and_then(Element::get_text)
        .ok_or_else(|| {
            SplineError::input_validation(
                "INPUT.KNOT_VALUE",
                format!("knot #{knot_index} of spline '{spline_name}' has no '{tag}' value"),
            )
        })?;

    text.trim().parse::<f64>().map_err(|_| {
        SplineError::input_validation(
            "INPUT.KNOT_VALUE",
            format!(
                "knot #{knot_index} of spline '{spline_name}' has non-numeric '{tag}' value '{}'",
                text.trim()
            ),
        )
    })
}

fn child_elements<'a>(parent: &'a Element, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
    parent.children.iter().filter_map(move |node| match node {
        XMLNode::Element(element) if element.name == tag => Some(element),
        _ => None,
    })
}
