//! Nodes of the relationship graph: documents and persons.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::LifecycleStage;

/// Which side of the graph a node lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Person,
}

/// A legislative text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: String,
    pub title: Option<String>,
    /// Raw type code from the store (`mot`, `prop`, `bet`, ...).
    pub doc_type: Option<String>,
    /// Parliamentary session, e.g. `"2023/24"`.
    pub session_tag: Option<String>,
    pub committee: Option<String>,
    pub date: Option<NaiveDate>,
    pub outgoing_count: Option<u64>,
    pub incoming_count: Option<u64>,
}

impl DocumentNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            doc_type: None,
            session_tag: None,
            committee: None,
            date: None,
            outgoing_count: None,
            incoming_count: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session_tag = Some(session.into());
        self
    }

    pub fn with_committee(mut self, committee: impl Into<String>) -> Self {
        self.committee = Some(committee.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_counts(mut self, outgoing: u64, incoming: u64) -> Self {
        self.outgoing_count = Some(outgoing);
        self.incoming_count = Some(incoming);
        self
    }

    pub fn stage(&self) -> LifecycleStage {
        LifecycleStage::from_doc_type(self.doc_type.as_deref())
    }

    /// Title, or the id when the store has none.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// An officeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonNode {
    pub id: String,
    pub display_name: Option<String>,
    pub party: Option<String>,
    pub district: Option<String>,
}

impl PersonNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            party: None,
            district: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_party(mut self, party: impl Into<String>) -> Self {
        self.party = Some(party.into());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

/// A node in a graph result, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Document(DocumentNode),
    Person(PersonNode),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Document(d) => &d.id,
            Node::Person(p) => &p.id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Person(_) => NodeKind::Person,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Node::Document(d) => d.label(),
            Node::Person(p) => p.label(),
        }
    }

    pub fn as_document(&self) -> Option<&DocumentNode> {
        match self {
            Node::Document(d) => Some(d),
            Node::Person(_) => None,
        }
    }

    pub fn as_person(&self) -> Option<&PersonNode> {
        match self {
            Node::Person(p) => Some(p),
            Node::Document(_) => None,
        }
    }
}

impl From<DocumentNode> for Node {
    fn from(doc: DocumentNode) -> Self {
        Node::Document(doc)
    }
}

impl From<PersonNode> for Node {
    fn from(person: PersonNode) -> Self {
        Node::Person(person)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serializes_with_kind_tag() {
        let node = Node::from(
            DocumentNode::new("H901FiU1")
                .with_doc_type("bet")
                .with_date(NaiveDate::from_ymd_opt(2023, 11, 2).unwrap()),
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "document");
        assert_eq!(json["id"], "H901FiU1");
        assert_eq!(json["date"], "2023-11-02");

        let person = serde_json::to_value(Node::from(PersonNode::new("0123"))).unwrap();
        assert_eq!(person["kind"], "person");
    }

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(DocumentNode::new("D1").label(), "D1");
        assert_eq!(DocumentNode::new("D1").with_title("Budget").label(), "Budget");
        assert_eq!(PersonNode::new("P1").with_name("Ada Lovelace").label(), "Ada Lovelace");
    }
}
