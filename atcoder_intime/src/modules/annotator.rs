use atcoder_intime_libs::{Classification, ClassificationEngine, ProblemsApi, RetrievalFailure};

/// Runs one pass from feed retrieval to classification.
///
/// If any of the three feeds fails, the whole pass fails
/// and no partial classification is returned.
pub struct Annotator<A> {
    api: A,
    engine: ClassificationEngine,
}

impl<A: ProblemsApi + Send + Sync> Annotator<A> {
    pub fn new(api: A, engine: ClassificationEngine) -> Self {
        Annotator { api, engine }
    }

    pub async fn annotate(&self, user_id: &str) -> Result<Classification, RetrievalFailure> {
        tracing::info!("Start to retrieve feeds for user {}.", user_id);
        let (contests, contest_problems, submissions) = tokio::try_join!(
            self.api.fetch_contests(),
            self.api.fetch_contest_problems(),
            self.api.fetch_submissions(user_id),
        )
        .map_err(|e| {
            tracing::error!("failed to retrieve feeds for user {}: {}", user_id, e);
            e
        })?;

        let mut classification = self.engine.classify(
            user_id,
            &contests.records,
            &contest_problems.records,
            &submissions.records,
        );

        let mut warnings = contests.warnings;
        warnings.extend(contest_problems.warnings);
        warnings.extend(submissions.warnings);
        warnings.append(&mut classification.warnings);
        classification.warnings = warnings;

        Ok(classification)
    }
}
