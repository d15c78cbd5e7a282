//! Optional data parallelism.
//!
//! With the `parallel` feature the macro below hands an index range to rayon;
//! without it the same call site compiles to a plain serial iterator. Callers
//! that chain adaptors must also import `rayon::iter::ParallelIterator` under
//! the same feature gate.

/// Turn an `IntoIterator` (or rayon `IntoParallelIterator`) into the feature-selected iterator.
macro_rules! iter_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        let iter = rayon::iter::IntoParallelIterator::into_par_iter($expr);
        #[cfg(not(feature = "parallel"))]
        let iter = ::std::iter::IntoIterator::into_iter($expr);
        iter
    }};
}

pub(crate) use iter_maybe_parallel;
