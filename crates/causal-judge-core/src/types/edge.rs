//! Typed edge keys and per-edge verdicts.
//!
//! Error maps from both the bootstrap and the knowledge evaluator are keyed
//! by directed edges written `"source->target"`. The raw string form is the
//! wire format of the external evaluator; internally keys are parsed into
//! [`EdgeKey`] and verdicts into [`Verdict`] up front, so downstream code
//! never re-splits strings ad hoc.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::types::Dataset;

/// A directed edge between two named variables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    source: String,
    target: String,
}

impl EdgeKey {
    /// Build an edge key from validated parts.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> CoreResult<Self> {
        let source = source.into();
        let target = target.into();
        if source.is_empty() || target.is_empty() {
            return Err(CoreError::ValidationError {
                field: "edge_key".to_string(),
                message: "source and target must be non-empty".to_string(),
            });
        }
        Ok(Self { source, target })
    }

    /// Name of the cause variable.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the effect variable.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Resolve to matrix coordinates `(target_idx, source_idx)` against a
    /// dataset's column order.
    ///
    /// The returned pair addresses the adjacency cell holding this edge
    /// (row = target, column = source). Fails with
    /// [`CoreError::UnknownColumn`] when either name is absent.
    pub fn resolve(&self, data: &Dataset) -> CoreResult<(usize, usize)> {
        let source_idx = data
            .column_index(&self.source)
            .ok_or_else(|| CoreError::UnknownColumn {
                name: self.source.clone(),
            })?;
        let target_idx = data
            .column_index(&self.target)
            .ok_or_else(|| CoreError::UnknownColumn {
                name: self.target.clone(),
            })?;
        Ok((target_idx, source_idx))
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

impl FromStr for EdgeKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, target) = s.split_once("->").ok_or_else(|| CoreError::ValidationError {
            field: "edge_key".to_string(),
            message: format!("missing '->' separator in {:?}", s),
        })?;
        EdgeKey::new(source.trim(), target.trim())
    }
}

// Edge keys serialize as their "source->target" string form so error maps
// stay plain JSON objects.
impl Serialize for EdgeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EdgeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// A per-edge verdict. Absence from a map means "unmarked".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The edge must be present in the revised graph.
    Forced,
    /// The edge must be absent from the revised graph.
    Forbidden,
}

impl Verdict {
    /// Parse a verdict string, returning `None` for anything unrecognized.
    ///
    /// Matching is exact ("Forced" / "Forbidden"): the external evaluator is
    /// contractually bound to these spellings and anything else is treated
    /// as unmarked, not as an error.
    pub fn parse_lenient(s: &str) -> Option<Verdict> {
        match s {
            "Forced" => Some(Verdict::Forced),
            "Forbidden" => Some(Verdict::Forbidden),
            _ => None,
        }
    }

    /// The wire-format string for this verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Forced => "Forced",
            Verdict::Forbidden => "Forbidden",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated per-edge error map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeAnnotations(BTreeMap<EdgeKey, Verdict>);

impl EdgeAnnotations {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw string pairs as produced by an external evaluator.
    ///
    /// Entries with a malformed key (no `->`) or an unrecognized verdict
    /// string are dropped with a logged warning; both cases are no-ops by
    /// contract, never errors.
    pub fn from_raw<I, K, V>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in raw {
            let edge = match key.as_ref().parse::<EdgeKey>() {
                Ok(edge) => edge,
                Err(err) => {
                    warn!(key = key.as_ref(), %err, "dropping malformed edge key");
                    continue;
                }
            };
            let verdict = match Verdict::parse_lenient(value.as_ref()) {
                Some(verdict) => verdict,
                None => {
                    warn!(
                        key = key.as_ref(),
                        verdict = value.as_ref(),
                        "dropping unrecognized verdict"
                    );
                    continue;
                }
            };
            map.insert(edge, verdict);
        }
        Self(map)
    }

    /// Insert or replace a verdict.
    pub fn insert(&mut self, key: EdgeKey, verdict: Verdict) {
        self.0.insert(key, verdict);
    }

    /// Look up a verdict.
    pub fn get(&self, key: &EdgeKey) -> Option<Verdict> {
        self.0.get(key).copied()
    }

    /// Number of marked edges.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any edge is marked.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over marked edges.
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, Verdict)> {
        self.0.iter().map(|(k, v)| (k, *v))
    }

    /// Merge two maps; on key collision the `overriding` verdict wins.
    ///
    /// Used to combine statistics-sourced and knowledge-sourced maps, with
    /// domain knowledge taking precedence.
    pub fn merge(base: EdgeAnnotations, overriding: EdgeAnnotations) -> EdgeAnnotations {
        let mut merged = base.0;
        for (key, verdict) in overriding.0 {
            merged.insert(key, verdict);
        }
        EdgeAnnotations(merged)
    }

    /// The raw string-map form, for reporting.
    pub fn to_raw(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl FromIterator<(EdgeKey, Verdict)> for EdgeAnnotations {
    fn from_iter<I: IntoIterator<Item = (EdgeKey, Verdict)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn xyz_dataset() -> Dataset {
        Dataset::new(
            vec!["X".to_string(), "Y".to_string(), "Z".to_string()],
            DMatrix::zeros(4, 3),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let key: EdgeKey = "X->Y".parse().unwrap();
        assert_eq!(key.source(), "X");
        assert_eq!(key.target(), "Y");
        assert_eq!(key.to_string(), "X->Y");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let key: EdgeKey = " X -> Y ".parse().unwrap();
        assert_eq!(key.to_string(), "X->Y");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!("XY".parse::<EdgeKey>().is_err());
        assert!("->Y".parse::<EdgeKey>().is_err());
        assert!("X->".parse::<EdgeKey>().is_err());
    }

    #[test]
    fn test_resolve_returns_target_then_source() {
        let data = xyz_dataset();
        let key: EdgeKey = "X->Y".parse().unwrap();
        // X->Y lives at row 1 (target Y), column 0 (source X).
        assert_eq!(key.resolve(&data).unwrap(), (1, 0));
    }

    #[test]
    fn test_resolve_unknown_column() {
        let data = xyz_dataset();
        let key: EdgeKey = "X->W".parse().unwrap();
        match key.resolve(&data) {
            Err(CoreError::UnknownColumn { name }) => assert_eq!(name, "W"),
            other => panic!("expected UnknownColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_verdict_parse_lenient() {
        assert_eq!(Verdict::parse_lenient("Forced"), Some(Verdict::Forced));
        assert_eq!(Verdict::parse_lenient("Forbidden"), Some(Verdict::Forbidden));
        assert_eq!(Verdict::parse_lenient("forced"), None);
        assert_eq!(Verdict::parse_lenient("Suggested"), None);
        assert_eq!(Verdict::parse_lenient(""), None);
    }

    #[test]
    fn test_from_raw_drops_bad_entries() {
        let raw = vec![
            ("X->Y".to_string(), "Forced".to_string()),
            ("Y->Z".to_string(), "Maybe".to_string()), // unrecognized verdict
            ("broken".to_string(), "Forced".to_string()), // malformed key
        ];
        let map = EdgeAnnotations::from_raw(raw);
        assert_eq!(map.len(), 1);
        let key: EdgeKey = "X->Y".parse().unwrap();
        assert_eq!(map.get(&key), Some(Verdict::Forced));
    }

    #[test]
    fn test_merge_overriding_wins() {
        let key: EdgeKey = "A->B".parse().unwrap();
        let mut stat = EdgeAnnotations::new();
        stat.insert(key.clone(), Verdict::Forbidden);
        let mut llm = EdgeAnnotations::new();
        llm.insert(key.clone(), Verdict::Forced);

        let merged = EdgeAnnotations::merge(stat, llm);
        assert_eq!(merged.get(&key), Some(Verdict::Forced));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_serializes_as_string_map() {
        let mut map = EdgeAnnotations::new();
        map.insert("X->Y".parse().unwrap(), Verdict::Forbidden);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["X->Y"], "Forbidden");
    }
}
