pub mod convolution;
pub mod summation;

pub use convolution::{
    ConvolutionError, FluxBin, FluxHistogram, bisect_cross_section, convolve,
};
pub use summation::sum_knots;
