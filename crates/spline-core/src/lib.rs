//! Readers, decoders, and flux convolution for GENIE neutrino cross-section
//! spline files.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
pub mod parser;
