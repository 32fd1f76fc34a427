use crate::classify::{catalog::ContestCatalog, timing::format_timespan, RecordWarning};
use serde::Serialize;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    InTime,
    InTimePenalty,
    Unclassified,
}

/// Tag handed to the renderer. A cell may carry two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    InTime,
    InTimeAsWriter,
    InTimePenalty,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub as_writer: bool,
    pub tags: Vec<Tag>,
    pub offset: Option<i64>,
    pub timespan: Option<String>,
}

impl ClassificationResult {
    /// An unclassified result carries neither the writer flag nor an offset.
    pub fn new(category: Category, as_writer: bool, offset: Option<i64>) -> Self {
        if category == Category::Unclassified {
            return Self::unclassified();
        }

        let mut tags = vec![match category {
            Category::InTimePenalty => Tag::InTimePenalty,
            _ => Tag::InTime,
        }];
        if as_writer {
            tags.push(Tag::InTimeAsWriter);
        }

        ClassificationResult {
            category,
            as_writer,
            tags,
            offset,
            timespan: offset.map(format_timespan),
        }
    }

    pub fn unclassified() -> Self {
        ClassificationResult {
            category: Category::Unclassified,
            as_writer: false,
            tags: Vec::new(),
            offset: None,
            timespan: None,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.category != Category::Unclassified
    }
}

/// Result of one classification pass.
///
/// Keys are kept in BTreeMaps, so the same input always
/// serializes to the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub user_id: String,
    /// problem URL -> cell
    pub cells: BTreeMap<String, ClassificationResult>,
    /// contest id -> row
    pub rows: BTreeMap<String, ClassificationResult>,
    #[serde(skip)]
    pub catalog: ContestCatalog,
    #[serde(skip)]
    pub warnings: Vec<RecordWarning>,
}

impl Classification {
    /// Look up the result for a link target on the page.
    ///
    /// Falls back to a contest URL when no problem matches.
    pub fn resolve(&self, href: &str) -> Option<&ClassificationResult> {
        self.cells.get(href).or_else(|| {
            self.catalog
                .lookup_by_canonical_url(href)
                .and_then(|contest_id| self.rows.get(contest_id))
        })
    }

    pub fn classified_cells(&self) -> impl Iterator<Item = (&String, &ClassificationResult)> {
        self.cells.iter().filter(|(_, result)| result.is_classified())
    }

    pub fn classified_rows(&self) -> impl Iterator<Item = (&String, &ClassificationResult)> {
        self.rows.iter().filter(|(_, result)| result.is_classified())
    }
}
