//! Configuration types for the growth detector.

/// Default minimum absolute balance (in quote currency) a token must hold
/// to be considered at all. Suppresses noise from dust balances.
pub const DEFAULT_MIN_BALANCE: f64 = 60.0;

/// Configuration for GrowthDetector.
#[derive(Debug, Clone)]
pub struct GrowthDetectorConfig {
    /// Minimum percentage increase that triggers an alert (inclusive)
    pub min_difference: u32,
    /// Minimum current balance in quote currency; anything below is dust
    pub min_balance: f64,
}
