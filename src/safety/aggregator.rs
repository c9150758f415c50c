//! Result Aggregation
//!
//! Votes over the classified search hits and picks one verdict plus the hit
//! that backs it. Evidence text is always copied from an input candidate.

use serde::Serialize;
use tracing::debug;

use super::{ClassificationResult, SafetyStatus, SearchCandidate};

/// Only the first hits of a result page take part in the vote
pub const MAX_CANDIDATES: usize = 5;

const UNKNOWN_SUMMARY: &str =
    "We could not automatically determine the safety. Please read the snippet below.";

/// Number of candidates classified into each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub safe: usize,
    #[serde(rename = "unsafe")]
    pub unsafe_: usize,
    pub caution: usize,
    pub unknown: usize,
}

impl Signals {
    pub fn record(&mut self, status: SafetyStatus) {
        match status {
            SafetyStatus::Safe => self.safe += 1,
            SafetyStatus::Unsafe => self.unsafe_ += 1,
            SafetyStatus::Caution => self.caution += 1,
            SafetyStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn count(&self, status: SafetyStatus) -> usize {
        match status {
            SafetyStatus::Safe => self.safe,
            SafetyStatus::Unsafe => self.unsafe_,
            SafetyStatus::Caution => self.caution,
            SafetyStatus::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.unsafe_ + self.caution + self.unknown
    }
}

/// Final verdict for a query together with its supporting search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedVerdict {
    pub status: SafetyStatus,
    pub evidence: SearchCandidate,
    pub signals: Signals,
}

impl AggregatedVerdict {
    pub fn summary(&self) -> String {
        match self.status {
            SafetyStatus::Unknown => UNKNOWN_SUMMARY.to_string(),
            status => format!("Based on search results, this appears to be {}.", status),
        }
    }

    pub fn snippet(&self) -> &str {
        &self.evidence.snippet
    }

    /// Title of the winning hit
    pub fn source(&self) -> &str {
        &self.evidence.title
    }

    pub fn link(&self) -> &str {
        &self.evidence.link
    }
}

/// First candidate seen for each decisive status
#[derive(Default)]
struct FirstSeen<'a> {
    safe: Option<&'a SearchCandidate>,
    unsafe_: Option<&'a SearchCandidate>,
    caution: Option<&'a SearchCandidate>,
}

impl<'a> FirstSeen<'a> {
    fn record(&mut self, result: ClassificationResult<'a>) {
        let slot = match result.status {
            SafetyStatus::Safe => &mut self.safe,
            SafetyStatus::Unsafe => &mut self.unsafe_,
            SafetyStatus::Caution => &mut self.caution,
            SafetyStatus::Unknown => return,
        };
        slot.get_or_insert(result.candidate);
    }
}

/// Classify the first [`MAX_CANDIDATES`] hits and select a single verdict.
///
/// Returns `None` when there are no candidates at all. When no hit carries a
/// decisive signal the verdict is `Unknown`, backed by the first candidate.
pub fn aggregate(candidates: &[SearchCandidate], original_query: &str) -> Option<AggregatedVerdict> {
    let first = candidates.first()?;

    let mut signals = Signals::default();
    let mut seen = FirstSeen::default();

    for result in candidates
        .iter()
        .take(MAX_CANDIDATES)
        .map(|candidate| ClassificationResult::of(candidate, original_query))
    {
        signals.record(result.status);
        seen.record(result);
    }

    // A mixed split leaning unsafe is labelled caution but shows the unsafe hit
    let (status, evidence) = match (seen.safe, seen.unsafe_, seen.caution) {
        (Some(safe), Some(danger), _) => {
            if signals.safe >= signals.unsafe_ {
                (SafetyStatus::Safe, safe)
            } else {
                (SafetyStatus::Caution, danger)
            }
        }
        (_, Some(danger), _) => (SafetyStatus::Unsafe, danger),
        (_, None, Some(caution)) => (SafetyStatus::Caution, caution),
        (Some(safe), None, None) => (SafetyStatus::Safe, safe),
        (None, None, None) => (SafetyStatus::Unknown, first),
    };

    debug!(
        safe = signals.safe,
        unsafe_ = signals.unsafe_,
        caution = signals.caution,
        unknown = signals.unknown,
        status = %status,
        "Aggregated search signals"
    );

    Some(AggregatedVerdict {
        status,
        evidence: evidence.clone(),
        signals,
    })
}
