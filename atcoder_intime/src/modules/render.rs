use atcoder_intime_libs::{Classification, ClassificationResult, Tag};
use chrono::SecondsFormat;
use itertools::Itertools;
use std::fmt::Write;

/// Label of a tag, named after the user script's CSS classes.
pub fn tag_label(tag: &Tag) -> &'static str {
    match tag {
        Tag::InTime => "intime",
        Tag::InTimeAsWriter => "intime-writer",
        Tag::InTimePenalty => "intime-nonac",
    }
}

fn labels(result: &ClassificationResult) -> String {
    result.tags.iter().map(tag_label).join(",")
}

/// Lists only the rows and cells solved in time.
pub fn render_table(classification: &Classification) -> String {
    let mut out = String::new();

    for (contest_id, result) in classification.classified_rows() {
        let start_at = classification
            .catalog
            .lookup_by_id(contest_id)
            .and_then(|contest| contest.start_at())
            .map(|start_at| start_at.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();
        let _ = writeln!(out, "{:<24} {:<22} {}", contest_id, labels(result), start_at);
    }

    for (problem_url, result) in classification.classified_cells() {
        let _ = writeln!(
            out,
            "{:<64} {:<22} {:>8}",
            problem_url,
            labels(result),
            result.timespan.as_deref().unwrap_or_default()
        );
    }

    out
}

/// Shows the classification of each given link target.
///
/// A link that resolves to neither a problem nor a contest is shown as `-`.
pub fn render_links(classification: &Classification, hrefs: &[String]) -> String {
    let mut out = String::new();

    for href in hrefs {
        match classification.resolve(href) {
            Some(result) if result.is_classified() => {
                let _ = writeln!(
                    out,
                    "{} {} {}",
                    href,
                    labels(result),
                    result.timespan.as_deref().unwrap_or_default()
                );
            }
            Some(_) => {
                let _ = writeln!(out, "{} unclassified", href);
            }
            None => {
                let _ = writeln!(out, "{} -", href);
            }
        }
    }

    out
}
