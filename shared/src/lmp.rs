//! Program (LMP) records as served by the API and as aggregated for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One stored version of a program, as returned by `GET /api/lmps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmpRecord {
    pub lmp_id: String,
    pub name: String,
    pub source: String,
    /// Seconds since the Unix epoch
    pub created_at: i64,
    /// Number of recorded invocations of this version
    #[serde(default)]
    pub invocations: i64,
    /// lmp_ids of the versions this version calls into
    #[serde(default)]
    pub uses: Vec<String>,
}

impl LmpRecord {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

/// A single version of an aggregated program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmpVersion {
    pub lmp_id: String,
    /// Seconds since the Unix epoch
    pub created_at: i64,
    pub invocations: i64,
    pub source: String,
}

/// A program with all of its versions, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lmp {
    pub name: String,
    /// Source of the latest version
    pub source: String,
    /// Dependencies of the latest version
    pub uses: Vec<String>,
    /// Never empty when produced by [`aggregate_by_name`]
    pub versions: Vec<LmpVersion>,
}

impl Lmp {
    pub fn latest(&self) -> Option<&LmpVersion> {
        self.versions.first()
    }

    pub fn total_invocations(&self) -> i64 {
        self.versions.iter().map(|v| v.invocations).sum()
    }

    pub fn has_version(&self, lmp_id: &str) -> bool {
        self.versions.iter().any(|v| v.lmp_id == lmp_id)
    }
}

/// An observed call between two program versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trace {
    /// lmp_id of the calling version
    pub consumer: String,
    /// lmp_id of the called version
    pub consumed: String,
}

/// Group flat version records into programs.
///
/// Versions are sorted newest first (ties broken by lmp_id), and programs
/// are ordered by their latest version, most recently updated first.
pub fn aggregate_by_name(records: Vec<LmpRecord>) -> Vec<Lmp> {
    let mut grouped: BTreeMap<String, Vec<LmpRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.name.clone()).or_default().push(record);
    }

    let mut lmps: Vec<Lmp> = grouped
        .into_iter()
        .filter_map(|(name, mut records)| {
            records.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| a.lmp_id.cmp(&b.lmp_id))
            });
            let latest = records.first()?;
            let source = latest.source.clone();
            let uses = latest.uses.clone();
            let versions = records
                .into_iter()
                .map(|r| LmpVersion {
                    lmp_id: r.lmp_id,
                    created_at: r.created_at,
                    invocations: r.invocations,
                    source: r.source,
                })
                .collect();
            Some(Lmp {
                name,
                source,
                uses,
                versions,
            })
        })
        .collect();

    lmps.sort_by(|a, b| {
        let a_ts = a.latest().map(|v| v.created_at).unwrap_or(i64::MIN);
        let b_ts = b.latest().map(|v| v.created_at).unwrap_or(i64::MIN);
        b_ts.cmp(&a_ts).then_with(|| a.name.cmp(&b.name))
    });
    lmps
}

/// Keep only traces whose endpoints are both versions of the given programs.
pub fn traces_for(lmps: &[Lmp], traces: Vec<Trace>) -> Vec<Trace> {
    let known: HashSet<&str> = lmps
        .iter()
        .flat_map(|lmp| lmp.versions.iter().map(|v| v.lmp_id.as_str()))
        .collect();

    traces
        .into_iter()
        .filter(|t| known.contains(t.consumer.as_str()) && known.contains(t.consumed.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lmp_id: &str, name: &str, created_at: i64, invocations: i64) -> LmpRecord {
        LmpRecord {
            lmp_id: lmp_id.to_string(),
            name: name.to_string(),
            source: format!("def {}(): ...  # {}", name, lmp_id),
            created_at,
            invocations,
            uses: Vec::new(),
        }
    }

    #[test]
    fn test_aggregate_groups_versions_newest_first() {
        let lmps = aggregate_by_name(vec![
            record("a1", "summarize", 100, 3),
            record("b1", "translate", 150, 1),
            record("a2", "summarize", 200, 5),
        ]);

        assert_eq!(lmps.len(), 2);
        let summarize = &lmps[0];
        assert_eq!(summarize.name, "summarize");
        assert_eq!(summarize.versions.len(), 2);
        assert_eq!(summarize.versions[0].lmp_id, "a2");
        assert_eq!(summarize.versions[1].lmp_id, "a1");
        assert_eq!(summarize.source, "def summarize(): ...  # a2");
        assert_eq!(summarize.total_invocations(), 8);
    }

    #[test]
    fn test_aggregate_orders_programs_by_latest_update() {
        let lmps = aggregate_by_name(vec![
            record("old", "alpha", 10, 0),
            record("new", "beta", 20, 0),
            record("newer", "alpha", 30, 0),
        ]);

        let names: Vec<_> = lmps.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_aggregate_breaks_timestamp_ties_by_id() {
        let lmps = aggregate_by_name(vec![record("zz", "p", 5, 0), record("aa", "p", 5, 0)]);
        assert_eq!(lmps[0].versions[0].lmp_id, "aa");
    }

    #[test]
    fn test_aggregate_takes_uses_from_latest_version() {
        let mut old = record("v1", "chain", 1, 0);
        old.uses = vec!["gone".to_string()];
        let mut new = record("v2", "chain", 2, 0);
        new.uses = vec!["helper".to_string()];

        let lmps = aggregate_by_name(vec![old, new]);
        assert_eq!(lmps[0].uses, vec!["helper".to_string()]);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_by_name(Vec::new()).is_empty());
    }

    #[test]
    fn test_traces_for_drops_unknown_endpoints() {
        let lmps = aggregate_by_name(vec![record("a", "x", 1, 0), record("b", "y", 1, 0)]);
        let traces = vec![
            Trace {
                consumer: "a".to_string(),
                consumed: "b".to_string(),
            },
            Trace {
                consumer: "a".to_string(),
                consumed: "missing".to_string(),
            },
        ];

        let kept = traces_for(&lmps, traces);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].consumed, "b");
    }

    #[test]
    fn test_record_deserializes_without_optional_fields() {
        let json = r#"{"lmp_id":"abc","name":"n","source":"s","created_at":1700000000}"#;
        let parsed: LmpRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.invocations, 0);
        assert!(parsed.uses.is_empty());
        assert_eq!(parsed.created_at_utc().map(|d| d.timestamp()), Some(1_700_000_000));
    }
}
