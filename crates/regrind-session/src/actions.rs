//! Post-match action planning.
//!
//! After a counted match (that didn't finish the session) the controller
//! dispatches up to three side effects: requeue, load the practice map,
//! exit to the main menu. Each is independently configured, delay-gated,
//! and filtered by the finished match's playlist category. Planning is a
//! pure function; the facade owns actually scheduling and executing.

use std::time::Duration;

use regrind_protocol::{ActionKind, PlaylistCategory, PluginSettings};
use tracing::trace;

/// One action the facade should schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedAction {
    pub kind: ActionKind,
    /// Delay before execution: the configured per-action delay plus the
    /// host's own auto-leave delay when that feature is active.
    pub delay: Duration,
}

/// Decides which post-match actions run for a finished match.
///
/// Rules, per action:
/// - skipped when disabled;
/// - skipped when the match's category hits a bypass flag
///   (casual / private-tournament; an unknown category bypasses nothing);
/// - otherwise scheduled after `delay_secs` plus `auto_leave_delay`.
///
/// Exit and training are mutually exclusive: when exit dispatches,
/// training is withheld for this match end. Requeue is independent and may
/// run alongside either.
pub fn plan_post_match(
    settings: &PluginSettings,
    category: Option<PlaylistCategory>,
    auto_leave_delay: Option<f32>,
) -> Vec<PlannedAction> {
    let extra_secs = auto_leave_delay.unwrap_or(0.0).max(0.0);

    let eligible = |kind: ActionKind| -> Option<PlannedAction> {
        let cfg = settings.action(kind);
        if !cfg.enabled {
            return None;
        }
        match category {
            Some(PlaylistCategory::Casual) if cfg.bypass_casual => {
                trace!(action = %kind, "bypassed for casual playlist");
                return None;
            }
            Some(PlaylistCategory::PrivateTournament)
                if cfg.bypass_private =>
            {
                trace!(action = %kind, "bypassed for private/tournament lobby");
                return None;
            }
            _ => {}
        }
        let delay_secs = cfg.delay_secs.max(0.0) + extra_secs;
        Some(PlannedAction {
            kind,
            delay: Duration::from_secs_f32(delay_secs),
        })
    };

    let mut planned = Vec::new();
    if let Some(requeue) = eligible(ActionKind::Requeue) {
        planned.push(requeue);
    }
    match eligible(ActionKind::Exit) {
        Some(exit) => planned.push(exit),
        None => {
            if let Some(training) = eligible(ActionKind::Training) {
                planned.push(training);
            }
        }
    }
    planned
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use regrind_protocol::ActionSettings;

    fn kinds(planned: &[PlannedAction]) -> Vec<ActionKind> {
        planned.iter().map(|p| p.kind).collect()
    }

    fn all_enabled() -> PluginSettings {
        PluginSettings {
            requeue: ActionSettings::immediate(),
            training: ActionSettings::immediate(),
            exit: ActionSettings::immediate(),
            ..PluginSettings::default()
        }
    }

    #[test]
    fn test_plan_default_settings_requeue_and_training() {
        let planned =
            plan_post_match(&PluginSettings::default(), None, None);
        assert_eq!(
            kinds(&planned),
            vec![ActionKind::Requeue, ActionKind::Training]
        );
    }

    #[test]
    fn test_plan_disabled_actions_are_skipped() {
        let mut settings = PluginSettings::default();
        settings.requeue.enabled = false;
        settings.training.enabled = false;

        assert!(plan_post_match(&settings, None, None).is_empty());
    }

    #[test]
    fn test_plan_exit_suppresses_training() {
        let planned = plan_post_match(&all_enabled(), None, None);
        assert_eq!(
            kinds(&planned),
            vec![ActionKind::Requeue, ActionKind::Exit]
        );
    }

    #[test]
    fn test_plan_bypassed_exit_lets_training_run() {
        let mut settings = all_enabled();
        settings.exit.bypass_casual = true;

        let planned = plan_post_match(
            &settings,
            Some(PlaylistCategory::Casual),
            None,
        );
        assert_eq!(
            kinds(&planned),
            vec![ActionKind::Requeue, ActionKind::Training]
        );
    }

    #[test]
    fn test_plan_casual_bypass_only_hits_casual_matches() {
        let mut settings = PluginSettings::default();
        settings.requeue.bypass_casual = true;

        let casual = plan_post_match(
            &settings,
            Some(PlaylistCategory::Casual),
            None,
        );
        assert_eq!(kinds(&casual), vec![ActionKind::Training]);

        let ranked = plan_post_match(
            &settings,
            Some(PlaylistCategory::Ranked),
            None,
        );
        assert_eq!(
            kinds(&ranked),
            vec![ActionKind::Requeue, ActionKind::Training]
        );
    }

    #[test]
    fn test_plan_private_bypass_hits_private_and_tournament() {
        let mut settings = PluginSettings::default();
        settings.training.bypass_private = true;

        let planned = plan_post_match(
            &settings,
            Some(PlaylistCategory::PrivateTournament),
            None,
        );
        assert_eq!(kinds(&planned), vec![ActionKind::Requeue]);
    }

    #[test]
    fn test_plan_unknown_category_bypasses_nothing() {
        let mut settings = PluginSettings::default();
        settings.requeue.bypass_casual = true;
        settings.requeue.bypass_private = true;

        let planned = plan_post_match(&settings, None, None);
        assert_eq!(
            kinds(&planned),
            vec![ActionKind::Requeue, ActionKind::Training]
        );
    }

    #[test]
    fn test_plan_delay_includes_auto_leave() {
        let mut settings = PluginSettings::default();
        settings.requeue.delay_secs = 2.0;

        let planned = plan_post_match(&settings, None, Some(3.5));
        let requeue = planned
            .iter()
            .find(|p| p.kind == ActionKind::Requeue)
            .unwrap();
        assert_eq!(requeue.delay, Duration::from_secs_f32(5.5));
    }

    #[test]
    fn test_plan_negative_delay_clamps_to_zero() {
        let mut settings = PluginSettings::default();
        settings.requeue.delay_secs = -1.0;

        let planned = plan_post_match(&settings, None, None);
        assert_eq!(planned[0].delay, Duration::ZERO);
    }
}
