//! Core lightcurve data structures and input validation.

mod light_curve;
pub mod sampling;

pub use light_curve::LightCurve;
pub use sampling::{has_distinct_values, is_sorted, is_uniform, UNIFORM_TOLERANCE};
