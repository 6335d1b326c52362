/// Analysis stage definitions for tracking one analysis call
///
/// An analysis moves linearly through these stages and only branches off into
/// `Failed`.
use std::fmt;

/// Represents the current stage of a single page analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisStage {
    // ===== Active Stages =====
    /// Nothing has happened yet
    Start,

    /// The page body has been retrieved
    Fetched,

    /// The body has been turned into a document tree
    Parsed,

    /// Extractors and the link classifier have run
    Classified,

    // ===== Terminal Stages =====
    /// The result has been assembled
    Done,

    /// A fetch or parse failure ended the analysis
    Failed,
}

impl AnalysisStage {
    /// Returns true if this is a terminal stage
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns the stage that follows this one on the success path
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::Fetched),
            Self::Fetched => Some(Self::Parsed),
            Self::Parsed => Some(Self::Classified),
            Self::Classified => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    /// Returns true if moving from this stage to `to` is legal
    ///
    /// Every active stage may advance to its successor or fail. Terminal
    /// stages accept no transitions.
    pub fn can_transition_to(&self, to: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == Self::Failed || self.next() == Some(to)
    }

    /// Short lowercase name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Fetched => "fetched",
            Self::Parsed => "parsed",
            Self::Classified => "classified",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
