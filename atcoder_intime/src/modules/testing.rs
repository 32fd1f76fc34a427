use async_trait::async_trait;
use atcoder_intime_libs::{
    problems::model::{
        ContestProblemRecord, ContestRecord, FeedKind, Records, SubmissionRecord,
    },
    ProblemsApi, RetrievalFailure,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

/// Serves fixed feeds without touching the network.
pub struct StaticProblemsApi {
    contests: Vec<Value>,
    contest_problems: Vec<Value>,
    submissions: Vec<Value>,
    failing: Option<FeedKind>,
    delay: Option<Duration>,
}

impl StaticProblemsApi {
    pub fn new() -> Self {
        StaticProblemsApi {
            contests: vec![
                json!({"id": "abc100", "start_epoch_second": 1000, "duration_second": 6000}),
                json!({"id": "abc101", "start_epoch_second": 10000, "duration_second": 6000}),
            ],
            contest_problems: vec![
                json!({"contest_id": "abc100", "problem_id": "abc100_a"}),
                json!({"contest_id": "abc100", "problem_id": "abc100_b"}),
                json!({"contest_id": "abc101", "problem_id": "abc101_a"}),
            ],
            submissions: vec![
                json!({"contest_id": "abc100", "problem_id": "abc100_a", "result": "WA", "epoch_second": 1100}),
                json!({"contest_id": "abc100", "problem_id": "abc100_a", "result": "AC", "epoch_second": 1125}),
                json!({"contest_id": "abc100", "problem_id": "abc100_b", "result": "AC", "epoch_second": 900}),
                json!({"contest_id": "abc101", "problem_id": "abc101_a", "result": "AC", "epoch_second": 20000}),
            ],
            failing: None,
            delay: None,
        }
    }

    pub fn with_broken_submission(mut self) -> Self {
        self.submissions
            .push(json!({"contest_id": "abc101", "problem_id": "abc101_a", "result": "AC"}));
        self
    }

    pub fn failing(mut self, feed: FeedKind) -> Self {
        self.failing = Some(feed);
        self
    }

    /// Every feed takes `delay` to respond, like a large results feed would.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn values(
        &self,
        feed: FeedKind,
        values: &[Value],
    ) -> Result<Vec<Value>, RetrievalFailure> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing == Some(feed) {
            return Err(RetrievalFailure::UnexpectedStatus {
                feed,
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(values.to_vec())
    }
}

#[async_trait]
impl ProblemsApi for StaticProblemsApi {
    async fn fetch_contests(&self) -> Result<Records<ContestRecord>, RetrievalFailure> {
        let feed = FeedKind::Contests;
        Ok(Records::parse(feed, self.values(feed, &self.contests).await?))
    }

    async fn fetch_contest_problems(
        &self,
    ) -> Result<Records<ContestProblemRecord>, RetrievalFailure> {
        let feed = FeedKind::ContestProblems;
        Ok(Records::parse(feed, self.values(feed, &self.contest_problems).await?))
    }

    async fn fetch_submissions(
        &self,
        _user_id: &str,
    ) -> Result<Records<SubmissionRecord>, RetrievalFailure> {
        let feed = FeedKind::Submissions;
        Ok(Records::parse(feed, self.values(feed, &self.submissions).await?))
    }
}
