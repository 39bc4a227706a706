//! Extension trait for attaching an estimator to any iterable.

use std::io::Stdout;

use crate::{Estimator, EstimatorBuilder, Sink};

/// Adds `.eta()` to everything that can be iterated.
///
/// ```
/// use etaloop_estimate::{EstimatorBuilder, EtaIteratorExt};
///
/// let quiet = EstimatorBuilder::new().auto_print(false);
/// let last = (0..10).eta_with(quiet).last().map(|(_, report)| report);
/// assert!(last.is_some_and(|report| report.is_complete()));
/// ```
pub trait EtaIteratorExt: IntoIterator + Sized {
    /// Wraps the iterable in an [`Estimator`] with default settings.
    fn eta(self) -> Estimator<Self::IntoIter, Stdout> {
        Estimator::new(self)
    }

    /// Wraps the iterable in an [`Estimator`] configured by `builder`.
    fn eta_with<W: Sink>(self, builder: EstimatorBuilder<W>) -> Estimator<Self::IntoIter, W> {
        builder.build(self)
    }
}

impl<T: IntoIterator> EtaIteratorExt for T {}
