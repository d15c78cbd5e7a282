//! Frequency and time-lag grid generation.
//!
//! Characteristic frequencies of a sampling cadence, and the grids that feed
//! the spectral and correlation engines.

mod frequency;
mod offsets;

pub use frequency::{
    delta_t, freq_gen, max_freq, pseudo_nyquist_freq, FrequencyGridConfig, UpperBound,
    DEFAULT_OVERSAMPLING, MAX_GRID_LEN,
};
pub use offsets::{offset_gen, OffsetGridConfig};
