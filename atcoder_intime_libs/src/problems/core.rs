use crate::problems::model::*;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

type Result<T> = std::result::Result<T, RetrievalFailure>;

#[derive(Debug, Error)]
pub enum RetrievalFailure {
    #[error("failed to build http client")]
    ClientError(#[from] reqwest::Error),
    #[error("failed to request {feed} feed")]
    RequestError {
        feed: FeedKind,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} returned from {feed} feed")]
    UnexpectedStatus { feed: FeedKind, status: StatusCode },
    #[error("invalid AtCoder Problems url given")]
    InvalidUrlError(#[from] url::ParseError),
}

/// Source of the three feeds a classification pass needs.
#[async_trait]
pub trait ProblemsApi {
    async fn fetch_contests(&self) -> Result<Records<ContestRecord>>;
    async fn fetch_contest_problems(&self) -> Result<Records<ContestProblemRecord>>;
    async fn fetch_submissions(&self, user_id: &str) -> Result<Records<SubmissionRecord>>;
}

pub struct ProblemsClient {
    contests_url: Url,
    contest_problems_url: Url,
    results_url: Url,
    client: Client,
}

impl ProblemsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let contests_url = base_url.join("resources/contests.json")?;
        let contest_problems_url = base_url.join("resources/contest-problem.json")?;
        let results_url = base_url.join("atcoder-api/results")?;

        let client = Client::builder().gzip(true).timeout(timeout).build()?;
        Ok(ProblemsClient {
            contests_url,
            contest_problems_url,
            results_url,
            client,
        })
    }

    async fn fetch_values(
        &self,
        feed: FeedKind,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Vec<Value>> {
        tracing::info!("Start to retrieve {} feed from {}", feed, url);
        let res = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| RetrievalFailure::RequestError { feed, source })?;

        if let Err(e) = res.error_for_status_ref() {
            tracing::error!("error response returned from {} feed: {:?}", feed, e);
            return Err(RetrievalFailure::UnexpectedStatus {
                feed,
                status: res.status(),
            });
        }

        let values: Vec<Value> = res
            .json()
            .await
            .map_err(|source| RetrievalFailure::RequestError { feed, source })?;
        tracing::info!("{} records retrieved from {} feed.", values.len(), feed);

        Ok(values)
    }
}

#[async_trait]
impl ProblemsApi for ProblemsClient {
    async fn fetch_contests(&self) -> Result<Records<ContestRecord>> {
        let feed = FeedKind::Contests;
        let values = self.fetch_values(feed, self.contests_url.clone(), &[]).await?;
        Ok(Records::parse(feed, values))
    }

    async fn fetch_contest_problems(&self) -> Result<Records<ContestProblemRecord>> {
        let feed = FeedKind::ContestProblems;
        let values = self
            .fetch_values(feed, self.contest_problems_url.clone(), &[])
            .await?;
        Ok(Records::parse(feed, values))
    }

    async fn fetch_submissions(&self, user_id: &str) -> Result<Records<SubmissionRecord>> {
        let feed = FeedKind::Submissions;
        let values = self
            .fetch_values(feed, self.results_url.clone(), &[("user", user_id)])
            .await?;
        Ok(Records::parse(feed, values))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_create_urls() {
        let client =
            ProblemsClient::new("https://kenkoooo.com/atcoder", Duration::from_secs(10)).unwrap();
        assert_eq!(
            client.contests_url.as_str(),
            "https://kenkoooo.com/atcoder/resources/contests.json"
        );
        assert_eq!(
            client.contest_problems_url.as_str(),
            "https://kenkoooo.com/atcoder/resources/contest-problem.json"
        );
        assert_eq!(
            client.results_url.as_str(),
            "https://kenkoooo.com/atcoder/atcoder-api/results"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = ProblemsClient::new("kenkoooo.com", Duration::from_secs(10));
        assert!(matches!(client, Err(RetrievalFailure::InvalidUrlError(_))));
    }

    /// Normal system test to retrieve the contest list.
    ///
    /// This test accesses the real AtCoder Problems API. Run it explicitly with
    ///
    /// ```ignore
    /// cargo test -- --ignored
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_fetch_contests() {
        let client =
            ProblemsClient::new("https://kenkoooo.com/atcoder", Duration::from_secs(30)).unwrap();
        let contests = client.fetch_contests().await.unwrap();

        assert!(contests
            .records
            .iter()
            .any(|contest| contest.id == "abc001"));
    }

    /// Normal system test to retrieve submissions of a user.
    #[tokio::test]
    #[ignore]
    async fn test_fetch_submissions() {
        let client =
            ProblemsClient::new("https://kenkoooo.com/atcoder", Duration::from_secs(30)).unwrap();
        let submissions = client.fetch_submissions("chokudai").await.unwrap();

        assert!(!submissions.records.is_empty());
    }
}
