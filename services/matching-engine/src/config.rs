//! Engine configuration

/// Matching engine policy knobs
///
/// Defaults match the behavior the dashboard expects: self-trading allowed,
/// fifteen aggregated levels per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Permit trades where maker and taker share a user id. When false,
    /// a submission that would cross the submitter's own resting order is
    /// rejected before any mutation.
    pub allow_self_trade: bool,
    /// Default number of aggregated price levels per side in book views.
    pub default_depth: usize,
    /// Capacity of the change-notification broadcast channel.
    pub event_buffer: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_self_trade: true,
            default_depth: 15,
            event_buffer: 1024,
        }
    }
}
