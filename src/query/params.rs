//! Lenient request parameters.
//!
//! Every filter has a safe default, so malformed filters are normalized
//! instead of rejected. The focus id has no safe default and is the only
//! parameter that can fail a request.

use chrono::NaiveDate;

use crate::config::QueryLimits;
use crate::model::RelationType;
use crate::storage::{EdgeQuery, RelationSet, Window};
use crate::{Error, Result};

/// A graph request as received, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphRequest {
    pub focus_id: String,
    pub relation_types: Option<Vec<String>>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl GraphRequest {
    pub fn new(focus_id: impl Into<String>) -> Self {
        Self {
            focus_id: focus_id.into(),
            ..Self::default()
        }
    }

    pub fn relation_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relation_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn start(mut self, date: impl Into<String>) -> Self {
        self.start = Some(date.into());
        self
    }

    pub fn end(mut self, date: impl Into<String>) -> Self {
        self.end = Some(date.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Build a request from decoded query-string pairs:
    /// `id`, `relationTypes` (comma-separated), `start`, `end`, `limit`, `offset`.
    ///
    /// Unknown keys are ignored; numbers that do not parse count as absent.
    /// A missing `id` becomes an empty focus id, rejected by [`normalize`](Self::normalize).
    pub fn from_params<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut req = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "id" => req.focus_id = value.to_string(),
                "relationTypes" => {
                    req.relation_types = Some(value.split(',').map(|t| t.trim().to_string()).collect());
                }
                "start" => req.start = Some(value.to_string()),
                "end" => req.end = Some(value.to_string()),
                "limit" => req.limit = value.trim().parse().ok(),
                "offset" => req.offset = value.trim().parse().ok(),
                _ => {}
            }
        }
        req
    }

    /// Validate the focus id and normalize every filter.
    pub fn normalize(&self, limits: &QueryLimits) -> Result<GraphQuery> {
        let focus_id = self.focus_id.trim();
        if focus_id.is_empty() {
            return Err(Error::InvalidArgument("focus id is required".into()));
        }

        Ok(GraphQuery {
            focus_id: focus_id.to_string(),
            relation_types: parse_relation_types(self.relation_types.as_deref()),
            start: self.start.as_deref().and_then(parse_date),
            end: self.end.as_deref().and_then(parse_date),
            limit: clamp_limit(self.limit, limits),
            offset: clamp_offset(self.offset),
        })
    }
}

/// A validated, normalized graph request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQuery {
    pub focus_id: String,
    pub relation_types: RelationSet,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: usize,
    pub offset: usize,
}

impl GraphQuery {
    pub fn edge_query(&self) -> EdgeQuery {
        EdgeQuery {
            touches_id: self.focus_id.clone(),
            relation_types: self.relation_types.clone(),
            start: self.start,
            end: self.end,
        }
    }

    pub fn window(&self) -> Window {
        Window {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Intersect the requested kinds with the allowed set, in canonical order.
/// An empty intersection (or no request) means every allowed kind.
pub fn parse_relation_types<S: AsRef<str>>(requested: Option<&[S]>) -> RelationSet {
    let requested: Vec<RelationType> = requested
        .unwrap_or_default()
        .iter()
        .filter_map(|t| RelationType::parse_known(t.as_ref()))
        .collect();

    let selected: RelationSet = RelationType::ALLOWED
        .iter()
        .filter(|t| requested.contains(*t))
        .cloned()
        .collect();

    if selected.is_empty() {
        RelationType::ALLOWED.iter().cloned().collect()
    } else {
        selected
    }
}

/// Strict `YYYY-MM-DD`; anything else is treated as absent.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let shape_ok = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Non-positive or missing limits take the default; large ones are clamped.
pub fn clamp_limit(raw: Option<i64>, limits: &QueryLimits) -> usize {
    match raw {
        Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX).min(limits.max_limit),
        _ => limits.default_limit,
    }
}

/// Negative or missing offsets become zero.
pub fn clamp_offset(raw: Option<i64>) -> usize {
    raw.and_then(|n| usize::try_from(n).ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_focus_is_invalid() {
        let limits = QueryLimits::default();
        assert!(matches!(
            GraphRequest::new("").normalize(&limits),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            GraphRequest::new("   \t").normalize(&limits),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_focus_is_trimmed() {
        let q = GraphRequest::new("  H901FiU1 ").normalize(&QueryLimits::default()).unwrap();
        assert_eq!(q.focus_id, "H901FiU1");
    }

    #[test]
    fn test_limit_clamping() {
        let limits = QueryLimits::default();
        assert_eq!(clamp_limit(None, &limits), 300);
        assert_eq!(clamp_limit(Some(5000), &limits), 800);
        assert_eq!(clamp_limit(Some(-3), &limits), 300);
        assert_eq!(clamp_limit(Some(0), &limits), 300);
        assert_eq!(clamp_limit(Some(1), &limits), 1);
        assert_eq!(clamp_limit(Some(800), &limits), 800);
    }

    #[test]
    fn test_offset_clamping() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn test_relation_types_fall_back_to_all() {
        let all: RelationSet = RelationType::ALLOWED.iter().cloned().collect();
        assert_eq!(parse_relation_types::<String>(None), all);
        assert_eq!(parse_relation_types(Some(&["bogus"][..])), all);
        let empty: [&str; 0] = [];
        assert_eq!(parse_relation_types(Some(&empty[..])), all);
    }

    #[test]
    fn test_relation_types_intersect_in_canonical_order() {
        let selected = parse_relation_types(Some(&["vote", "bogus", "reference", "vote"][..]));
        assert_eq!(selected.as_slice(), &[RelationType::Reference, RelationType::Vote]);
    }

    #[test]
    fn test_date_parsing_is_strict() {
        assert_eq!(parse_date("2024-03-01"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_date(" 2024-03-01 "), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_date("2024-3-1"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("2024-03-01T00:00:00"), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("+2024-1-01"), None);
        assert_eq!(parse_date("2024-1-010"), None);
        assert_eq!(parse_date("2024/03/01"), None);
    }

    #[test]
    fn test_from_params() {
        let req = GraphRequest::from_params([
            ("id", "H901FiU1"),
            ("relationTypes", "vote, speech"),
            ("start", "2023-09-01"),
            ("end", "not-a-date"),
            ("limit", "abc"),
            ("offset", "20"),
            ("unrelated", "x"),
        ]);
        assert_eq!(req.focus_id, "H901FiU1");
        assert_eq!(req.limit, None);
        assert_eq!(req.offset, Some(20));

        let q = req.normalize(&QueryLimits::default()).unwrap();
        assert_eq!(q.relation_types.as_slice(), &[RelationType::Speech, RelationType::Vote]);
        assert_eq!(q.start, NaiveDate::from_ymd_opt(2023, 9, 1));
        assert_eq!(q.end, None);
        assert_eq!(q.limit, 300);
        assert_eq!(q.offset, 20);
    }

    #[test]
    fn test_from_params_rejects_partial_numbers() {
        let req = GraphRequest::from_params([("id", "X"), ("limit", "12abc"), ("offset", "5.0")]);
        assert_eq!(req.limit, None);
        assert_eq!(req.offset, None);

        let q = req.normalize(&QueryLimits::default()).unwrap();
        assert_eq!((q.limit, q.offset), (300, 0));

        let req = GraphRequest::from_params([("id", "X"), ("limit", " 12 ")]);
        assert_eq!(req.limit, Some(12));
    }

    #[test]
    fn test_from_params_without_id_fails_normalization() {
        let req = GraphRequest::from_params([("limit", "10")]);
        assert!(req.normalize(&QueryLimits::default()).is_err());
    }
}
