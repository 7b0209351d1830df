pub mod errors;

pub use crate::common::pdg::{InteractionCurrent, NeutrinoFlavor};
pub use errors::{
    ComputeResult, ParserResult, SplineError, SplineErrorCategory, SplineResult,
};

use crate::common::pdg::decode_target;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const TARGET_KEY: &str = "tgt";
pub const PROCESS_KEY: &str = "proc";
pub const HADRON_MULTIPLICITY_KEY: &str = "hmult";

/// Structured form of a spline `name` annotation.
///
/// `algorithm` and `flavor` come from the leading `<alg>/<config>/nu:<pdg>`
/// segment; every later `key:value` segment lands in `fields` in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplineDescription {
    pub algorithm: String,
    pub flavor: NeutrinoFlavor,
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
}

impl SplineDescription {
    pub fn new(algorithm: impl Into<String>, flavor: NeutrinoFlavor) -> Self {
        Self {
            algorithm: algorithm.into(),
            flavor,
            fields: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn target_code(&self) -> Option<&str> {
        self.get(TARGET_KEY)
    }

    pub fn process(&self) -> Option<&str> {
        self.get(PROCESS_KEY)
    }

    pub fn hadron_multiplicity(&self) -> Option<&str> {
        self.get(HADRON_MULTIPLICITY_KEY)
    }

    pub fn current(&self) -> Option<InteractionCurrent> {
        self.process().map(InteractionCurrent::from_process)
    }

    pub fn target_name(&self) -> Option<String> {
        self.target_code().map(decode_target)
    }

    /// `<Algorithm> <Flavor> <Current> on <Target>`, used for table file names.
    pub fn title(&self) -> SplineResult<String> {
        let current = self.current().ok_or_else(|| self.missing_field(PROCESS_KEY))?;
        let target = self
            .target_name()
            .ok_or_else(|| self.missing_field(TARGET_KEY))?;
        Ok(format!(
            "{} {} {} on {}",
            self.algorithm, self.flavor, current, target
        ))
    }

    fn missing_field(&self, key: &str) -> SplineError {
        SplineError::input_validation(
            "INPUT.SPLINE_FIELD",
            format!(
                "spline '{}' ({}) has no '{}' field in its description",
                self.algorithm, self.flavor, key
            ),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Knot {
    pub energy: f64,
    pub cross_section: f64,
}

impl Knot {
    pub const fn new(energy: f64, cross_section: f64) -> Self {
        Self {
            energy,
            cross_section,
        }
    }
}

impl From<(f64, f64)> for Knot {
    fn from((energy, cross_section): (f64, f64)) -> Self {
        Self::new(energy, cross_section)
    }
}

/// One spline from a GENIE XML file; knots stay in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplineRecord {
    pub description: SplineDescription,
    pub knots: Vec<Knot>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyWindow {
    pub min: f64,
    pub max: f64,
}

impl EnergyWindow {
    pub const DEFAULT_MIN: f64 = 0.0;
    pub const DEFAULT_MAX: f64 = 120.0;

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Table writers keep knots strictly inside the window.
    pub fn contains_exclusive(&self, energy: f64) -> bool {
        energy > self.min && energy < self.max
    }

    /// Flux readers keep bin edges on the window boundary.
    pub fn contains_inclusive(&self, energy: f64) -> bool {
        energy >= self.min && energy <= self.max
    }
}

impl Default for EnergyWindow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl ModelFilter {
    pub const ALL_TOKEN: &'static str = "all";

    /// Builds a filter from model names; any `all` entry keeps every model.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() || names.contains(Self::ALL_TOKEN) {
            Self::All
        } else {
            Self::Only(names)
        }
    }

    pub fn accepts(&self, algorithm: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.contains(algorithm),
        }
    }
}

/// One row of a flux histogram dump: raw count and lower bin edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxEntry {
    pub count: f64,
    pub bin_low: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeArtifact {
    pub relative_path: PathBuf,
}

impl ComputeArtifact {
    pub fn new(relative_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
        }
    }
}
