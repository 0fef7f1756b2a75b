//! Relationship facts between documents and persons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed taxonomy of relation kinds.
///
/// Stored and serialized as its snake-case name. Strings outside the four
/// known kinds are kept verbatim in `Other` so that a store carrying newer
/// kinds still round-trips; `Other` never appears in an active filter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationType {
    /// Document cites another document.
    Reference,
    /// Person authored or is otherwise attached to a document.
    PersonInvolved,
    /// Person spoke in the debate on a document.
    Speech,
    /// Person cast a recorded vote on a document.
    Vote,
    Other(String),
}

impl RelationType {
    /// Every kind a query may filter on, in canonical order.
    pub const ALLOWED: [RelationType; 4] = [
        RelationType::Reference,
        RelationType::PersonInvolved,
        RelationType::Speech,
        RelationType::Vote,
    ];

    /// Parse one of the four known kinds. Unknown names yield `None`.
    pub fn parse_known(raw: &str) -> Option<Self> {
        match raw.trim() {
            "reference" => Some(Self::Reference),
            "person_involved" => Some(Self::PersonInvolved),
            "speech" => Some(Self::Speech),
            "vote" => Some(Self::Vote),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Reference => "reference",
            Self::PersonInvolved => "person_involved",
            Self::Speech => "speech",
            Self::Vote => "vote",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for RelationType {
    fn from(raw: String) -> Self {
        Self::parse_known(&raw).unwrap_or(Self::Other(raw))
    }
}

impl From<&str> for RelationType {
    fn from(raw: &str) -> Self {
        Self::parse_known(raw).unwrap_or_else(|| Self::Other(raw.to_string()))
    }
}

impl From<RelationType> for String {
    fn from(rel: RelationType) -> Self {
        match rel {
            RelationType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an edge relative to a focus node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// The edge points into the focus.
    #[serde(rename = "in")]
    Incoming,
    /// The edge points away from the focus.
    #[serde(rename = "out")]
    Outgoing,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Incoming => "in",
            Direction::Outgoing => "out",
        }
    }
}

/// One observed relationship fact as the edge store holds it.
///
/// The meaning of `source_id`, `target_id` and `actor_id` depends on the
/// relation type; see [`RawEdge::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdge {
    pub source_id: Option<String>,
    pub target_id: Option<String>,
    pub relation_type: RelationType,
    pub relation_subtype: Option<String>,
    pub actor_id: Option<String>,
    pub vote_choice: Option<String>,
    pub session_tag: Option<String>,
    pub timestamp: Option<String>,
}

impl RawEdge {
    pub fn new(relation_type: impl Into<RelationType>) -> Self {
        Self {
            source_id: None,
            target_id: None,
            relation_type: relation_type.into(),
            relation_subtype: None,
            actor_id: None,
            vote_choice: None,
            session_tag: None,
            timestamp: None,
        }
    }

    /// Document-to-document citation.
    pub fn reference(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(RelationType::Reference).with_source(source).with_target(target)
    }

    /// A person attached to a document.
    pub fn person_involved(document: impl Into<String>, person: impl Into<String>) -> Self {
        Self::new(RelationType::PersonInvolved).with_source(document).with_actor(person)
    }

    /// A person speaking on a document.
    pub fn speech(person: impl Into<String>, document: impl Into<String>) -> Self {
        Self::new(RelationType::Speech).with_actor(person).with_target(document)
    }

    /// A recorded vote by a person on a document.
    pub fn vote(person: impl Into<String>, document: impl Into<String>) -> Self {
        Self::new(RelationType::Vote).with_actor(person).with_target(document)
    }

    pub fn with_source(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    pub fn with_target(mut self, id: impl Into<String>) -> Self {
        self.target_id = Some(id.into());
        self
    }

    pub fn with_actor(mut self, id: impl Into<String>) -> Self {
        self.actor_id = Some(id.into());
        self
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.relation_subtype = Some(subtype.into());
        self
    }

    pub fn with_vote_choice(mut self, choice: impl Into<String>) -> Self {
        self.vote_choice = Some(choice.into());
        self
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session_tag = Some(session.into());
        self
    }

    pub fn with_timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = Some(ts.into());
        self
    }

    /// True if `id` appears in any of the three endpoint slots.
    pub fn touches(&self, id: &str) -> bool {
        [&self.source_id, &self.target_id, &self.actor_id]
            .into_iter()
            .any(|slot| slot.as_deref() == Some(id))
    }

    /// Resolve the directed `(from, to)` pair for this edge's relation type.
    ///
    /// Returns `None` when either resolved endpoint is missing or empty; such
    /// edges are never surfaced.
    pub fn normalize(&self) -> Option<NormalizedEdge> {
        let (from, to) = match &self.relation_type {
            RelationType::Reference => (&self.source_id, &self.target_id),
            RelationType::PersonInvolved => (&self.source_id, &self.actor_id),
            RelationType::Speech | RelationType::Vote => (&self.actor_id, &self.target_id),
            RelationType::Other(_) => (&self.source_id, &self.target_id),
        };
        let from_id = non_empty(from)?;
        let to_id = non_empty(to)?;

        Some(NormalizedEdge {
            id: format!("{}:{}>{}", self.relation_type, from_id, to_id),
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            relation_type: self.relation_type.clone(),
            relation_subtype: self.relation_subtype.clone(),
            vote_choice: self.vote_choice.clone(),
            session_tag: self.session_tag.clone(),
            timestamp: self.timestamp.clone(),
        })
    }
}

fn non_empty(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().filter(|s| !s.trim().is_empty())
}

/// A relationship with its endpoints resolved into a directed pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEdge {
    /// `"{relation_type}:{from_id}>{to_id}"`. Not unique: two votes by the
    /// same person on the same document share it.
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub relation_type: RelationType,
    pub relation_subtype: Option<String>,
    pub vote_choice: Option<String>,
    pub session_tag: Option<String>,
    pub timestamp: Option<String>,
}

impl NormalizedEdge {
    /// The other end of the edge from the given node, with the direction
    /// of the edge relative to that node.
    pub fn other_end(&self, focus: &str) -> Option<(&str, Direction)> {
        if self.from_id == focus {
            Some((&self.to_id, Direction::Outgoing))
        } else if self.to_id == focus {
            Some((&self.from_id, Direction::Incoming))
        } else {
            None
        }
    }

    /// The document-side endpoints of this edge, given the relation type.
    pub fn document_ends(&self) -> impl Iterator<Item = &str> {
        let (from, to) = match self.relation_type {
            RelationType::Reference | RelationType::Other(_) => (Some(&self.from_id), Some(&self.to_id)),
            RelationType::PersonInvolved => (Some(&self.from_id), None),
            RelationType::Speech | RelationType::Vote => (None, Some(&self.to_id)),
        };
        from.into_iter().chain(to).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_involved_points_document_to_person() {
        let edge = RawEdge::person_involved("D1", "P1").normalize().unwrap();
        assert_eq!(edge.from_id, "D1");
        assert_eq!(edge.to_id, "P1");
        assert_eq!(edge.id, "person_involved:D1>P1");
    }

    #[test]
    fn test_vote_points_person_to_document() {
        let edge = RawEdge::vote("P1", "D1")
            .with_source("IGNORED")
            .with_vote_choice("Ja")
            .normalize()
            .unwrap();
        assert_eq!(edge.from_id, "P1");
        assert_eq!(edge.to_id, "D1");
        assert_eq!(edge.vote_choice.as_deref(), Some("Ja"));
    }

    #[test]
    fn test_speech_and_reference() {
        let speech = RawEdge::speech("P2", "D2").normalize().unwrap();
        assert_eq!((speech.from_id.as_str(), speech.to_id.as_str()), ("P2", "D2"));

        let reference = RawEdge::reference("D1", "D2").normalize().unwrap();
        assert_eq!((reference.from_id.as_str(), reference.to_id.as_str()), ("D1", "D2"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_source_target() {
        let edge = RawEdge::new("amendment")
            .with_source("D1")
            .with_target("D9")
            .with_actor("P1")
            .normalize()
            .unwrap();
        assert_eq!(edge.relation_type, RelationType::Other("amendment".into()));
        assert_eq!((edge.from_id.as_str(), edge.to_id.as_str()), ("D1", "D9"));
    }

    #[test]
    fn test_missing_endpoint_is_dropped() {
        assert!(RawEdge::new(RelationType::Vote).with_target("D1").normalize().is_none());
        assert!(RawEdge::person_involved("D1", "  ").normalize().is_none());
        assert!(RawEdge::reference("", "D2").normalize().is_none());
    }

    #[test]
    fn test_relation_type_serde_is_snake_case_string() {
        let json = serde_json::to_string(&RelationType::PersonInvolved).unwrap();
        assert_eq!(json, "\"person_involved\"");

        let back: RelationType = serde_json::from_str("\"vote\"").unwrap();
        assert_eq!(back, RelationType::Vote);

        let unknown: RelationType = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(unknown, RelationType::Other("bogus".into()));
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(serde_json::to_string(&Direction::Incoming).unwrap(), "\"in\"");
        assert_eq!(serde_json::to_string(&Direction::Outgoing).unwrap(), "\"out\"");
    }

    #[test]
    fn test_document_ends_per_type() {
        let vote = RawEdge::vote("P1", "D1").normalize().unwrap();
        assert_eq!(vote.document_ends().collect::<Vec<_>>(), vec!["D1"]);

        let involved = RawEdge::person_involved("D2", "P1").normalize().unwrap();
        assert_eq!(involved.document_ends().collect::<Vec<_>>(), vec!["D2"]);

        let reference = RawEdge::reference("D3", "D4").normalize().unwrap();
        assert_eq!(reference.document_ends().collect::<Vec<_>>(), vec!["D3", "D4"]);
    }

    #[test]
    fn test_other_end() {
        let edge = RawEdge::reference("D1", "D2").normalize().unwrap();
        assert_eq!(edge.other_end("D1"), Some(("D2", Direction::Outgoing)));
        assert_eq!(edge.other_end("D2"), Some(("D1", Direction::Incoming)));
        assert_eq!(edge.other_end("D3"), None);
    }
}
