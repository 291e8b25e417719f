pub mod cost;
pub mod distribution;
pub mod ranking;

/// Contract violation at the calculation boundary.
///
/// Raised before any arithmetic happens, so the pure math can never produce
/// NaN or infinite money amounts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    #[display("monthly consumption must be a finite, non-negative amount of energy")]
    Consumption,

    #[display("zone fractions must lie in [0, 1] and sum up to 1")]
    Distribution,
}
