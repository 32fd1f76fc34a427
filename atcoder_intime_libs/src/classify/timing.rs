use crate::{
    api::{Category, ClassificationResult},
    classify::catalog::Contest,
    link::LinkBuilder,
    problems::model::SubmissionRecord,
};
use std::collections::HashMap;

/// A submission exactly at the contest end still counts as in the window.
pub fn is_in_window(submission: &SubmissionRecord, contest: &Contest) -> bool {
    submission.epoch_second <= contest.end_epoch_second()
}

/// A submission before the start is treated as solved by a writer.
pub fn is_before_start(submission: &SubmissionRecord, contest: &Contest) -> bool {
    submission.epoch_second < contest.start_epoch_second
}

/// Classify the cell of a single problem.
pub fn classify_cell(representative: &SubmissionRecord, contest: &Contest) -> ClassificationResult {
    if !is_in_window(representative, contest) {
        return ClassificationResult::unclassified();
    }

    let category = if representative.result.is_accepted() {
        Category::InTime
    } else {
        Category::InTimePenalty
    };
    ClassificationResult::new(
        category,
        is_before_start(representative, contest),
        Some(
            representative
                .epoch_second
                .saturating_sub(contest.start_epoch_second),
        ),
    )
}

/// Classify the row of a whole contest.
///
/// The row is `InTime` only when every problem's representative is within the window.
/// A problem without any submission leaves it unclassified.
pub fn classify_row(
    contest: &Contest,
    problems: &[String],
    representatives: &HashMap<String, SubmissionRecord>,
    links: &LinkBuilder,
) -> ClassificationResult {
    if problems.is_empty() {
        return ClassificationResult::unclassified();
    }

    let mut submissions = Vec::with_capacity(problems.len());
    for problem_id in problems {
        match representatives.get(&links.problem_url(&contest.id, problem_id)) {
            Some(submission) if is_in_window(submission, contest) => submissions.push(submission),
            _ => return ClassificationResult::unclassified(),
        }
    }

    let as_writer = submissions
        .iter()
        .all(|submission| is_before_start(submission, contest));
    ClassificationResult::new(Category::InTime, as_writer, None)
}

/// Format seconds as `m:ss`. Minutes do not wrap at 60.
pub fn format_timespan(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    format!("{}{}:{:02}", sign, seconds / 60, seconds % 60)
}
