//! Lifecycle stages of a legislative document.

use serde::{Deserialize, Serialize};

/// Where a document sits in the legislative sequence
/// motion → proposition → committee report → decision → vote.
///
/// The ranking is a fixed table; `Other` ranks after everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Motion = 0,
    Proposition = 1,
    CommitteeReport = 2,
    Decision = 3,
    Vote = 4,
    Other = 5,
}

impl LifecycleStage {
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Classify a document type code. Accepts the store's short codes and
    /// the canonical stage names, case-insensitively.
    pub fn from_doc_type(doc_type: Option<&str>) -> Self {
        let Some(raw) = doc_type else {
            return Self::Other;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "mot" | "motion" => Self::Motion,
            "prop" | "proposition" => Self::Proposition,
            "bet" | "betankande" | "committee_report" => Self::CommitteeReport,
            "rskr" | "decision" => Self::Decision,
            "votering" | "vote" => Self::Vote,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Proposition => "proposition",
            Self::CommitteeReport => "committee_report",
            Self::Decision => "decision",
            Self::Vote => "vote",
            Self::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks() {
        assert_eq!(LifecycleStage::Motion.rank(), 0);
        assert_eq!(LifecycleStage::Proposition.rank(), 1);
        assert_eq!(LifecycleStage::CommitteeReport.rank(), 2);
        assert_eq!(LifecycleStage::Decision.rank(), 3);
        assert_eq!(LifecycleStage::Vote.rank(), 4);
        assert_eq!(LifecycleStage::Other.rank(), 5);
    }

    #[test]
    fn test_from_doc_type() {
        assert_eq!(LifecycleStage::from_doc_type(Some("mot")), LifecycleStage::Motion);
        assert_eq!(LifecycleStage::from_doc_type(Some("PROP")), LifecycleStage::Proposition);
        assert_eq!(LifecycleStage::from_doc_type(Some("bet")), LifecycleStage::CommitteeReport);
        assert_eq!(
            LifecycleStage::from_doc_type(Some("committee_report")),
            LifecycleStage::CommitteeReport
        );
        assert_eq!(LifecycleStage::from_doc_type(Some("rskr")), LifecycleStage::Decision);
        assert_eq!(LifecycleStage::from_doc_type(Some("votering")), LifecycleStage::Vote);
        assert_eq!(LifecycleStage::from_doc_type(Some("ip")), LifecycleStage::Other);
        assert_eq!(LifecycleStage::from_doc_type(None), LifecycleStage::Other);
    }

    #[test]
    fn test_decision_and_vote_stay_distinct() {
        assert!(LifecycleStage::Decision < LifecycleStage::Vote);
        assert_ne!(LifecycleStage::Decision.rank(), LifecycleStage::Vote.rank());
    }
}
