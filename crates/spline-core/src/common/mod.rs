pub mod constants;
pub mod pdg;
