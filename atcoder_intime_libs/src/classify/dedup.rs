use crate::{link::LinkBuilder, problems::model::SubmissionRecord};
use std::collections::HashMap;

/// Keeps one representative submission per problem.
///
/// Representatives are keyed by problem URL.
pub struct SubmissionDeduplicator<'a> {
    links: &'a LinkBuilder,
    representatives: HashMap<String, SubmissionRecord>,
}

impl<'a> SubmissionDeduplicator<'a> {
    pub fn new(links: &'a LinkBuilder) -> Self {
        SubmissionDeduplicator {
            links,
            representatives: HashMap::new(),
        }
    }

    pub fn insert(&mut self, submission: &SubmissionRecord) {
        let key = self
            .links
            .problem_url(&submission.contest_id, &submission.problem_id);
        match self.representatives.get_mut(&key) {
            Some(representative) => {
                if supersedes(submission, representative) {
                    *representative = submission.clone();
                }
            }
            None => {
                self.representatives.insert(key, submission.clone());
            }
        }
    }

    pub fn into_representatives(self) -> HashMap<String, SubmissionRecord> {
        self.representatives
    }
}

impl<'a> Extend<&'a SubmissionRecord> for SubmissionDeduplicator<'_> {
    fn extend<I: IntoIterator<Item = &'a SubmissionRecord>>(&mut self, iter: I) {
        for submission in iter {
            self.insert(submission);
        }
    }
}

/// Whether `current` replaces the representative `existing`.
///
/// - an AC always beats a non-AC
/// - between two of the same kind the earlier one stays
/// - on the same instant the smaller verdict string wins
fn supersedes(current: &SubmissionRecord, existing: &SubmissionRecord) -> bool {
    match (current.result.is_accepted(), existing.result.is_accepted()) {
        (true, false) => true,
        (false, true) => false,
        _ => {
            (current.epoch_second, current.result.as_str())
                < (existing.epoch_second, existing.result.as_str())
        }
    }
}
