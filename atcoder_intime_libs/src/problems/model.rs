use crate::classify::RecordWarning;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Feeds published by AtCoder Problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Contests,
    ContestProblems,
    Submissions,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeedKind::Contests => write!(f, "contests"),
            FeedKind::ContestProblems => write!(f, "contest-problem"),
            FeedKind::Submissions => write!(f, "submissions"),
        }
    }
}

/// An element of `resources/contests.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestRecord {
    pub id: String,
    pub start_epoch_second: i64,
    pub duration_second: i64,
    #[serde(default)]
    pub title: Option<String>,
}

/// An element of `resources/contest-problem.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestProblemRecord {
    pub contest_id: String,
    pub problem_id: String,
}

/// An element of `atcoder-api/results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub contest_id: String,
    pub problem_id: String,
    pub result: Verdict,
    pub epoch_second: i64,
}

/// Verdict of a submission.
///
/// Only AC versus non-AC matters for classification.
/// The raw string is kept as the final tie-break between representatives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
    OutputLimitExceeded,
    InternalError,
    Other(String),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Accepted => "AC",
            Verdict::WrongAnswer => "WA",
            Verdict::TimeLimitExceeded => "TLE",
            Verdict::MemoryLimitExceeded => "MLE",
            Verdict::RuntimeError => "RE",
            Verdict::CompilationError => "CE",
            Verdict::OutputLimitExceeded => "OLE",
            Verdict::InternalError => "IE",
            Verdict::Other(tag) => tag,
        }
    }
}

impl From<&str> for Verdict {
    fn from(tag: &str) -> Self {
        match tag {
            "AC" => Verdict::Accepted,
            "WA" => Verdict::WrongAnswer,
            "TLE" => Verdict::TimeLimitExceeded,
            "MLE" => Verdict::MemoryLimitExceeded,
            "RE" => Verdict::RuntimeError,
            "CE" => Verdict::CompilationError,
            "OLE" => Verdict::OutputLimitExceeded,
            "IE" => Verdict::InternalError,
            _ => Verdict::Other(tag.to_string()),
        }
    }
}

impl From<String> for Verdict {
    fn from(tag: String) -> Self {
        Verdict::from(tag.as_str())
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        verdict.as_str().to_string()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Records decoded one by one, with warnings for the skipped ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Records<T> {
    pub records: Vec<T>,
    pub warnings: Vec<RecordWarning>,
}

impl<T: DeserializeOwned> Records<T> {
    /// Decode each element of a JSON array separately.
    ///
    /// Records missing a field or with a non-integer instant are dropped with a warning.
    /// One bad record never fails the whole feed.
    pub fn parse(kind: FeedKind, values: Vec<Value>) -> Self {
        let mut records = Vec::with_capacity(values.len());
        let mut warnings = Vec::new();

        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    let warning = RecordWarning::MalformedRecord {
                        feed: kind,
                        index,
                        reason: e.to_string(),
                    };
                    tracing::warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Records { records, warnings }
    }
}
