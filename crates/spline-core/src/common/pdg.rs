//! PDG code lookup tables for the neutrino species and target nuclei found in
//! GENIE spline annotations.
//!
//! Unknown codes never fail: flavors fall back to [`NeutrinoFlavor::Unknown`]
//! and targets to a `PDG Ion Code: <code>` label.

use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const HYDROGEN_PDG_CODE: &str = "1000010010";
pub const CARBON_PDG_CODE: &str = "1000060120";
pub const OXYGEN_PDG_CODE: &str = "1000080160";

const ION_NAMES: [(&str, &str); 3] = [
    (HYDROGEN_PDG_CODE, "Hydrogen"),
    (CARBON_PDG_CODE, "Carbon"),
    (OXYGEN_PDG_CODE, "Oxygen"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NeutrinoFlavor {
    #[serde(rename = "Electron Neutrino")]
    ElectronNeutrino,
    #[serde(rename = "Electron Antineutrino")]
    ElectronAntineutrino,
    #[serde(rename = "Muon Neutrino")]
    MuonNeutrino,
    #[serde(rename = "Muon Antineutrino")]
    MuonAntineutrino,
    #[serde(rename = "Tau Neutrino")]
    TauNeutrino,
    #[serde(rename = "Tau Antineutrino")]
    TauAntineutrino,
    Unknown,
}

impl NeutrinoFlavor {
    pub const ALL_KNOWN: [NeutrinoFlavor; 6] = [
        Self::ElectronNeutrino,
        Self::ElectronAntineutrino,
        Self::MuonNeutrino,
        Self::MuonAntineutrino,
        Self::TauNeutrino,
        Self::TauAntineutrino,
    ];

    /// Decodes the lepton PDG code exactly as written in the annotation;
    /// `"+14"` or `" 14"` are not normalized and decode to `Unknown`.
    pub fn from_pdg_code(code: &str) -> Self {
        match code {
            "12" => Self::ElectronNeutrino,
            "-12" => Self::ElectronAntineutrino,
            "14" => Self::MuonNeutrino,
            "-14" => Self::MuonAntineutrino,
            "16" => Self::TauNeutrino,
            "-16" => Self::TauAntineutrino,
            _ => Self::Unknown,
        }
    }

    pub const fn pdg_code(self) -> Option<i32> {
        match self {
            Self::ElectronNeutrino => Some(12),
            Self::ElectronAntineutrino => Some(-12),
            Self::MuonNeutrino => Some(14),
            Self::MuonAntineutrino => Some(-14),
            Self::TauNeutrino => Some(16),
            Self::TauAntineutrino => Some(-16),
            Self::Unknown => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::ElectronNeutrino => "Electron Neutrino",
            Self::ElectronAntineutrino => "Electron Antineutrino",
            Self::MuonNeutrino => "Muon Neutrino",
            Self::MuonAntineutrino => "Muon Antineutrino",
            Self::TauNeutrino => "Tau Neutrino",
            Self::TauAntineutrino => "Tau Antineutrino",
            Self::Unknown => "Unknown",
        }
    }
}

impl Display for NeutrinoFlavor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InteractionCurrent {
    #[serde(rename = "CC")]
    Charged,
    #[serde(rename = "NC")]
    Neutral,
    #[serde(rename = "Unknown Current")]
    Unknown,
}

impl InteractionCurrent {
    /// Classifies a GENIE process tag such as `Weak[CC],COH`.
    ///
    /// `[CC]` is checked first, so a tag carrying both markers is charged
    /// current.
    pub fn from_process(process: &str) -> Self {
        if process.contains("[CC]") {
            Self::Charged
        } else if process.contains("[NC]") {
            Self::Neutral
        } else {
            Self::Unknown
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Charged => "CC",
            Self::Neutral => "NC",
            Self::Unknown => "Unknown Current",
        }
    }
}

impl Display for InteractionCurrent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

pub fn decode_flavor(code: &str) -> &'static str {
    NeutrinoFlavor::from_pdg_code(code).name()
}

pub fn decode_current(process: &str) -> &'static str {
    InteractionCurrent::from_process(process).as_str()
}

pub fn known_target_name(code: &str) -> Option<&'static str> {
    ION_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, name)| *name)
}

pub fn decode_target(code: &str) -> String {
    known_target_name(code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("PDG Ion Code: {code}"))
}
