//! Periodic self-assessment policy.
//!
//! Every 10th completed interaction triggers an assessment. If at least 50
//! interactions have passed since the last full analysis the user is asked
//! to run a full self-improvement cycle; otherwise a cheap quick assessment
//! runs instead.

/// How often an assessment is considered, in interactions.
pub const ASSESSMENT_INTERVAL: u64 = 10;

/// Interactions since the last full analysis before another one is due.
pub const FULL_ANALYSIS_GAP: u64 = 50;

/// Which assessment path a checkpoint selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    /// Prompt for a full self-improvement cycle.
    Full,
    /// Generate and store a quick assessment.
    Quick,
}

pub struct AssessmentPolicy;

impl AssessmentPolicy {
    /// `None` unless `interaction_count` is a checkpoint.
    pub fn decide(interaction_count: u64, last_analysis_timestamp: u64) -> Option<AssessmentKind> {
        if interaction_count == 0 || interaction_count % ASSESSMENT_INTERVAL != 0 {
            return None;
        }
        if interaction_count.saturating_sub(last_analysis_timestamp) >= FULL_ANALYSIS_GAP {
            Some(AssessmentKind::Full)
        } else {
            Some(AssessmentKind::Quick)
        }
    }
}

/// What a checkpoint produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentOutcome {
    /// A full self-improvement cycle is due; nothing was generated.
    FullAnalysisDue,
    /// Quick assessment text, already stored in memory.
    Quick(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_interactions_without_analysis_selects_full() {
        assert_eq!(AssessmentPolicy::decide(50, 0), Some(AssessmentKind::Full));
    }

    #[test]
    fn twenty_interactions_selects_quick() {
        assert_eq!(AssessmentPolicy::decide(20, 0), Some(AssessmentKind::Quick));
    }

    #[test]
    fn off_checkpoint_does_nothing() {
        assert_eq!(AssessmentPolicy::decide(0, 0), None);
        assert_eq!(AssessmentPolicy::decide(7, 0), None);
        assert_eq!(AssessmentPolicy::decide(51, 0), None);
    }

    #[test]
    fn gap_is_measured_from_last_analysis() {
        assert_eq!(AssessmentPolicy::decide(90, 50), Some(AssessmentKind::Quick));
        assert_eq!(AssessmentPolicy::decide(100, 50), Some(AssessmentKind::Full));
    }

    #[test]
    fn analysis_newer_than_count_is_quick() {
        // An imported memory can carry a timestamp ahead of this session.
        assert_eq!(AssessmentPolicy::decide(10, 400), Some(AssessmentKind::Quick));
    }
}
