pub mod flux;
pub mod serialization;
pub mod sums;
pub mod tables;

mod traits;

pub use flux::{
    ConvolutionInput, ConvolutionReport, ConvolutionResult, FluxConvolutionModule,
    FluxConvolutionRequest,
};
pub use sums::{CrossSectionSumModule, CrossSectionSumRequest};
pub use tables::{SplineTableModule, SplineTableRequest};
pub use traits::ModuleExecutor;
