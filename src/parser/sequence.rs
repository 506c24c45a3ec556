//! Section sequence validation.
//!
//! Candidates are sorted by numeral and folded left: each one is compared
//! against the last accepted heading and kept only if the step from that
//! heading is a plausible outline transition. A rejected candidate is
//! dropped outright and never becomes the reference for the next one, so
//! a stray `7 Tables` in the middle of section 2 cannot derail the rest of
//! the outline.

use super::{HeadingCandidate, Numeral};

/// How strictly numbering gaps are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// No gap check; only the transition rule applies
    Off,
    /// Reject top-level jumps of more than one (`1 → 3`)
    #[default]
    TopLevel,
    /// Also reject sibling gaps at any depth (`1.1 → 1.3`) and new
    /// levels that do not start at 1 (`1.1 → 1.1.2`)
    AllLevels,
}

/// Why a candidate was dropped by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceRejection {
    /// Numbering jumped by more than one
    LargeGap,
    /// Not a valid step from the previous heading
    InvalidTransition,
}

/// Check if the top-level numeral jumps by more than one.
pub fn is_large_gap(last: &Numeral, current: &Numeral) -> bool {
    current.top() > last.top() && current.top() - last.top() > 1
}

/// Check if `current` may directly follow `last` in an outline.
///
/// `1.1 → 1.2`, `1.1 → 2` and `1.1 → 1.1.1` are valid; going backwards,
/// repeating a numeral, descending two levels at once, or jumping at one
/// depth while numbering a deeper one (`1.1 → 2.1`) are not.
pub fn is_valid_transition(last: &Numeral, current: &Numeral) -> bool {
    let last = last.parts();
    let current = current.parts();

    if current.len() > last.len() + 1 {
        return false;
    }

    for (i, (&l, &c)) in last.iter().zip(current.iter()).enumerate() {
        if c < l {
            return false;
        }
        if c > l {
            return current[i + 1..].iter().all(|&p| p == 0);
        }
    }

    current.len() > last.len()
}

/// Check every depth for increments larger than one, and new levels
/// starting above 1.
fn has_sibling_gap(last: &Numeral, current: &Numeral) -> bool {
    let last = last.parts();
    let current = current.parts();

    for (&l, &c) in last.iter().zip(current.iter()) {
        if c != l {
            return c > l && c - l > 1;
        }
    }

    current.len() > last.len() && current[last.len()] != 1
}

/// Validates heading candidates into a coherent outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceValidator {
    policy: GapPolicy,
}

impl SequenceValidator {
    /// Create a validator with the default gap policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with a specific gap policy.
    pub fn with_policy(policy: GapPolicy) -> Self {
        Self { policy }
    }

    /// The gap policy in use.
    pub fn policy(&self) -> GapPolicy {
        self.policy
    }

    /// Check a single step from `last` to `current`.
    pub fn check(&self, last: &Numeral, current: &Numeral) -> Option<SequenceRejection> {
        let gap = match self.policy {
            GapPolicy::Off => false,
            GapPolicy::TopLevel => is_large_gap(last, current),
            GapPolicy::AllLevels => is_large_gap(last, current) || has_sibling_gap(last, current),
        };
        if gap {
            Some(SequenceRejection::LargeGap)
        } else if !is_valid_transition(last, current) {
            Some(SequenceRejection::InvalidTransition)
        } else {
            None
        }
    }

    /// Sort candidates by numeral and keep the ones forming a valid outline.
    pub fn validate(&self, mut candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
        candidates.sort_by(|a, b| a.numeral.cmp(&b.numeral));

        let total = candidates.len();
        let mut accepted: Vec<HeadingCandidate> = Vec::with_capacity(total);
        for candidate in candidates {
            if let Some(last) = accepted.last() {
                if let Some(reason) = self.check(&last.numeral, &candidate.numeral) {
                    log::debug!(
                        "Dropped heading {:?} after {}: {:?}",
                        candidate.heading_text(),
                        last.numeral,
                        reason
                    );
                    continue;
                }
            }
            accepted.push(candidate);
        }

        log::debug!(
            "SequenceValidator: accepted {} of {} headings",
            accepted.len(),
            total
        );
        accepted
    }
}

/// Validate candidates with the default gap policy.
pub fn validate_sequence(candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
    SequenceValidator::new().validate(candidates)
}
