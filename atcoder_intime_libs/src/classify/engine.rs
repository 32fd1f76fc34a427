use crate::{
    api::Classification,
    classify::{
        catalog::{ContestCatalog, ProblemMembership},
        dedup::SubmissionDeduplicator,
        timing::{classify_cell, classify_row},
        RecordWarning,
    },
    link::LinkBuilder,
    problems::model::{ContestProblemRecord, ContestRecord, FeedKind, SubmissionRecord},
};

/// Classifies a submission history against contest windows.
///
/// Holds no state between calls, so the same input always gives the same result.
#[derive(Debug, Clone, Default)]
pub struct ClassificationEngine {
    links: LinkBuilder,
}

impl ClassificationEngine {
    pub fn new(links: LinkBuilder) -> Self {
        ClassificationEngine { links }
    }

    pub fn classify(
        &self,
        user_id: &str,
        contests: &[ContestRecord],
        contest_problems: &[ContestProblemRecord],
        submissions: &[SubmissionRecord],
    ) -> Classification {
        let span = tracing::info_span!("classify", user_id);
        let _enter = span.enter();

        let (catalog, mut warnings) = ContestCatalog::new(contests, &self.links);
        let (membership, membership_warnings) = ProblemMembership::new(contest_problems, &catalog);
        warnings.extend(membership_warnings);

        let mut dedup = SubmissionDeduplicator::new(&self.links);
        for (index, submission) in submissions.iter().enumerate() {
            let reference = if catalog.lookup_by_id(&submission.contest_id).is_none() {
                Some(format!("contest {}", submission.contest_id))
            } else if !membership.contains(&submission.contest_id, &submission.problem_id) {
                Some(format!(
                    "problem {}/{}",
                    submission.contest_id, submission.problem_id
                ))
            } else {
                None
            };

            match reference {
                Some(reference) => warnings.push(RecordWarning::LookupMiss {
                    feed: FeedKind::Submissions,
                    index,
                    reference,
                }),
                None => dedup.insert(submission),
            }
        }
        let representatives = dedup.into_representatives();

        let mut classification = Classification {
            user_id: user_id.to_string(),
            ..Default::default()
        };
        for (key, representative) in representatives.iter() {
            if let Some(contest) = catalog.lookup_by_id(&representative.contest_id) {
                classification
                    .cells
                    .insert(key.clone(), classify_cell(representative, contest));
            }
        }
        for (contest_id, problems) in membership.contests() {
            if let Some(contest) = catalog.lookup_by_id(contest_id) {
                classification.rows.insert(
                    contest_id.to_string(),
                    classify_row(contest, problems, &representatives, &self.links),
                );
            }
        }

        for warning in warnings.iter() {
            tracing::warn!("{}", warning);
        }
        tracing::info!(
            "{} cells and {} rows classified for {} ({} in time, {} records skipped).",
            classification.cells.len(),
            classification.rows.len(),
            user_id,
            classification.classified_cells().count(),
            warnings.len()
        );

        classification.catalog = catalog;
        classification.warnings = warnings;
        classification
    }
}
