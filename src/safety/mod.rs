//! Food Safety Heuristics
//!
//! The only part of the service that makes a decision. Two pure functions:
//!
//! - [`classify`]: maps one snippet/title text to a [`SafetyStatus`] through an
//!   ordered cascade of substring rules
//! - [`aggregate`]: classifies up to [`MAX_CANDIDATES`] search hits and votes
//!   on a single [`AggregatedVerdict`]
//!
//! ## Pipeline Overview
//!
//! ```text
//! search hits ──► classify(snippet + " " + title, query) ──► Signals tally
//!                                                               │
//!                                                               ▼
//!                                            selection policy + evidence hit
//! ```
//!
//! Neither function touches shared state, so both are safe to call from any
//! number of concurrent requests.

pub mod aggregator;
pub mod classifier;

pub use aggregator::{aggregate, AggregatedVerdict, Signals, MAX_CANDIDATES};
pub use classifier::classify;

use serde::{Deserialize, Serialize};

/// Safety verdict for a food during pregnancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    Unsafe,
    Caution,
    Unknown,
}

impl SafetyStatus {
    /// Headline shown above a verdict
    pub fn label(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "Likely Safe",
            SafetyStatus::Unsafe => "Not Safe",
            SafetyStatus::Caution => "Proceed with Caution",
            SafetyStatus::Unknown => "Unknown Status",
        }
    }
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyStatus::Safe => write!(f, "safe"),
            SafetyStatus::Unsafe => write!(f, "unsafe"),
            SafetyStatus::Caution => write!(f, "caution"),
            SafetyStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// One hit returned by a search provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub link: String,
}

impl SearchCandidate {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }

    /// Text fed to the classifier: snippet first, then title
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.snippet, self.title)
    }
}

/// A candidate paired with the status the classifier gave it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult<'a> {
    pub status: SafetyStatus,
    pub candidate: &'a SearchCandidate,
}

impl<'a> ClassificationResult<'a> {
    pub fn of(candidate: &'a SearchCandidate, original_query: &str) -> Self {
        Self {
            status: classify(&candidate.combined_text(), original_query),
            candidate,
        }
    }
}
