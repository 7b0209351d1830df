use crate::domain::{EnergyWindow, FluxEntry, Knot, SplineError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvolutionError {
    #[error("cross-section lookup requires at least one knot")]
    NoKnots,
    #[error(
        "flux window [{min}, {max}] retains no weight ({entries} entries inside, normalization sum {sum})"
    )]
    EmptyFluxWindow {
        min: f64,
        max: f64,
        entries: usize,
        sum: f64,
    },
}

impl From<ConvolutionError> for SplineError {
    fn from(error: ConvolutionError) -> Self {
        let placeholder = match error {
            ConvolutionError::NoKnots => "RUN.XSEC_EMPTY",
            ConvolutionError::EmptyFluxWindow { .. } => "RUN.FLUX_WINDOW",
        };
        SplineError::computation(placeholder, error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluxBin {
    pub low: f64,
    pub high: f64,
    pub weight: f64,
}

impl FluxBin {
    pub fn center(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

/// Normalized flux spectrum: bin weights sum to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluxHistogram {
    bins: Vec<FluxBin>,
}

impl FluxHistogram {
    /// Keeps entries whose lower edge lies in `window` (inclusive), pairs each
    /// lower edge with the next one to form a bin, and drops the last entry as
    /// the overflow bin. Retained counts are divided by their sum.
    pub fn from_entries(
        entries: &[FluxEntry],
        window: EnergyWindow,
    ) -> Result<Self, ConvolutionError> {
        let retained: Vec<&FluxEntry> = entries
            .iter()
            .filter(|entry| window.contains_inclusive(entry.bin_low))
            .collect();

        let raw_bins: Vec<(f64, f64, f64)> = retained
            .windows(2)
            .map(|pair| (pair[0].bin_low, pair[1].bin_low, pair[0].count))
            .collect();
        let sum: f64 = raw_bins.iter().map(|(_, _, count)| count).sum();

        if raw_bins.is_empty() || sum == 0.0 {
            return Err(ConvolutionError::EmptyFluxWindow {
                min: window.min,
                max: window.max,
                entries: retained.len(),
                sum,
            });
        }

        let bins = raw_bins
            .into_iter()
            .map(|(low, high, count)| FluxBin {
                low,
                high,
                weight: count / sum,
            })
            .collect();
        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[FluxBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Narrowing search over knots assumed sorted by energy.
///
/// The index range is halved until it is at most one wide or the midpoint
/// energy equals the query, and the midpoint's cross section is returned.
/// This is not a nearest-neighbour lookup: a query between two knots can land
/// on either side depending on where the halving stops.
pub fn bisect_cross_section(energy: f64, knots: &[Knot]) -> Result<f64, ConvolutionError> {
    if knots.is_empty() {
        return Err(ConvolutionError::NoKnots);
    }

    let mut low = 0;
    let mut high = knots.len() - 1;
    let mut mid = (high + low) / 2;
    let mut probe = knots[mid].energy;

    while high - low > 1 {
        if energy > probe {
            low = mid;
        } else if energy < probe {
            high = mid;
        } else {
            break;
        }
        mid = (high + low) / 2;
        probe = knots[mid].energy;
    }

    Ok(knots[mid].cross_section)
}

/// Flux-weighted cross section: sum over bins of weight × the knot value
/// found at the bin center. The result carries the units of `knots`.
pub fn convolve(knots: &[Knot], flux: &FluxHistogram) -> Result<f64, ConvolutionError> {
    flux.bins().iter().try_fold(0.0, |total, bin| {
        Ok(total + bisect_cross_section(bin.center(), knots)? * bin.weight)
    })
}
