use crate::{
    classify::RecordWarning,
    link::LinkBuilder,
    problems::model::{ContestProblemRecord, ContestRecord, FeedKind},
};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contest {
    pub id: String,
    pub start_epoch_second: i64,
    pub duration_second: i64,
}

impl Contest {
    pub fn end_epoch_second(&self) -> i64 {
        self.start_epoch_second.saturating_add(self.duration_second)
    }

    pub fn start_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.start_epoch_second, 0).single()
    }
}

/// Index of contests by id and by contest URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContestCatalog {
    contests: HashMap<String, Contest>,
    url_to_id: HashMap<String, String>,
}

impl ContestCatalog {
    /// Build the index from the contests feed.
    ///
    /// Contests with a negative duration or an already seen id are dropped with a warning.
    pub fn new(records: &[ContestRecord], links: &LinkBuilder) -> (Self, Vec<RecordWarning>) {
        let mut catalog = ContestCatalog::default();
        let mut warnings = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let reason = if record.duration_second < 0 {
                Some(format!(
                    "contest {} has negative duration {}",
                    record.id, record.duration_second
                ))
            } else if catalog.contests.contains_key(&record.id) {
                Some(format!("contest {} is duplicated", record.id))
            } else {
                None
            };
            if let Some(reason) = reason {
                warnings.push(RecordWarning::MalformedRecord {
                    feed: FeedKind::Contests,
                    index,
                    reason,
                });
                continue;
            }

            catalog
                .url_to_id
                .insert(links.contest_url(&record.id), record.id.clone());
            catalog.contests.insert(
                record.id.clone(),
                Contest {
                    id: record.id.clone(),
                    start_epoch_second: record.start_epoch_second,
                    duration_second: record.duration_second,
                },
            );
        }

        (catalog, warnings)
    }

    pub fn lookup_by_id(&self, contest_id: &str) -> Option<&Contest> {
        self.contests.get(contest_id)
    }

    pub fn lookup_by_canonical_url(&self, url: &str) -> Option<&str> {
        self.url_to_id.get(url).map(String::as_str)
    }
}

/// contest id -> problem ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemMembership {
    problems: HashMap<String, Vec<String>>,
    pairs: HashSet<(String, String)>,
}

impl ProblemMembership {
    /// Build the index from the contest-problem feed.
    ///
    /// Records pointing at an unknown contest are dropped with a warning.
    /// Duplicate pairs collapse into one.
    pub fn new(
        records: &[ContestProblemRecord],
        catalog: &ContestCatalog,
    ) -> (Self, Vec<RecordWarning>) {
        let mut membership = ProblemMembership::default();
        let mut warnings = Vec::new();

        for (index, record) in records.iter().enumerate() {
            if catalog.lookup_by_id(&record.contest_id).is_none() {
                warnings.push(RecordWarning::LookupMiss {
                    feed: FeedKind::ContestProblems,
                    index,
                    reference: format!("contest {}", record.contest_id),
                });
                continue;
            }

            let pair = (record.contest_id.clone(), record.problem_id.clone());
            if !membership.pairs.insert(pair) {
                continue;
            }
            membership
                .problems
                .entry(record.contest_id.clone())
                .or_default()
                .push(record.problem_id.clone());
        }

        (membership, warnings)
    }

    /// Problems of the contest. Empty for an unknown contest.
    pub fn problems_of(&self, contest_id: &str) -> &[String] {
        self.problems
            .get(contest_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, contest_id: &str, problem_id: &str) -> bool {
        self.pairs
            .contains(&(contest_id.to_string(), problem_id.to_string()))
    }

    pub fn contests(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.problems
            .iter()
            .map(|(contest_id, problems)| (contest_id.as_str(), problems.as_slice()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn contest(id: &str, start: i64, duration: i64) -> ContestRecord {
        ContestRecord {
            id: id.to_string(),
            start_epoch_second: start,
            duration_second: duration,
            title: None,
        }
    }

    fn pair(contest_id: &str, problem_id: &str) -> ContestProblemRecord {
        ContestProblemRecord {
            contest_id: contest_id.to_string(),
            problem_id: problem_id.to_string(),
        }
    }

    #[test]
    fn test_lookup_contest() {
        let links = LinkBuilder::default();
        let (catalog, warnings) =
            ContestCatalog::new(&[contest("abc100", 1000, 6000)], &links);

        assert!(warnings.is_empty());
        let found = catalog.lookup_by_id("abc100").unwrap();
        assert_eq!(found.end_epoch_second(), 7000);
        assert_eq!(
            catalog.lookup_by_canonical_url("https://atcoder.jp/contests/abc100"),
            Some("abc100")
        );
        assert!(catalog.lookup_by_id("abc101").is_none());
        assert!(catalog
            .lookup_by_canonical_url("https://atcoder.jp/contests/abc100/tasks/abc100_a")
            .is_none());
    }

    #[test]
    fn test_malformed_contests_are_dropped() {
        let links = LinkBuilder::default();
        let records = vec![
            contest("abc100", 1000, 6000),
            contest("abc101", 2000, -1),
            contest("abc100", 5000, 6000),
            contest("abc102", 3000, 0),
        ];
        let (catalog, warnings) = ContestCatalog::new(&records, &links);

        assert!(catalog.lookup_by_id("abc101").is_none());
        assert!(catalog.lookup_by_id("abc102").is_some());
        assert_eq!(
            catalog.lookup_by_id("abc100").unwrap().start_epoch_second,
            1000
        );
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            warnings[0],
            RecordWarning::MalformedRecord { index: 1, .. }
        ));
        assert!(matches!(
            warnings[1],
            RecordWarning::MalformedRecord { index: 2, .. }
        ));
    }

    #[test]
    fn test_membership() {
        let links = LinkBuilder::default();
        let (catalog, _) = ContestCatalog::new(&[contest("abc100", 1000, 6000)], &links);
        let records = vec![
            pair("abc100", "abc100_a"),
            pair("abc100", "abc100_b"),
            pair("abc100", "abc100_a"),
            pair("abc999", "abc999_a"),
        ];
        let (membership, warnings) = ProblemMembership::new(&records, &catalog);

        assert_eq!(membership.problems_of("abc100"), ["abc100_a", "abc100_b"]);
        assert!(membership.problems_of("abc999").is_empty());
        assert!(membership.contains("abc100", "abc100_b"));
        assert!(!membership.contains("abc100", "abc100_c"));
        assert_eq!(
            warnings,
            vec![RecordWarning::LookupMiss {
                feed: FeedKind::ContestProblems,
                index: 3,
                reference: String::from("contest abc999"),
            }]
        );
    }
}
