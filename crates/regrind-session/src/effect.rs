//! Side effects the controller asks the facade to perform.

use crate::PlannedAction;

/// One host-facing side effect, decided by the controller and executed by
/// the facade. The controller never touches the host itself, so every
/// decision path can be asserted on as plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Select the session's target playlist (clearing all others) and
    /// start matchmaking, retrying briefly while the host isn't ready.
    BeginQueue,

    /// Cancel matchmaking if a search is running.
    CancelQueue,

    /// Schedule a post-match action after its delay. The executor
    /// re-checks the leave-penalty guard when the delay expires.
    Schedule(PlannedAction),

    /// Load the practice map now (still guard-checked).
    LoadTrainingMap,

    /// Show a toast to the player.
    Notify { title: String, body: String },
}
