use atcoder_intime_libs::Classification;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub stats: ClassifyStats,
    pub result: Option<Classification>,
    pub message: Option<String>,
}

impl ClassifyResponse {
    pub fn new(classification: Classification, time: u32) -> Self {
        Self {
            stats: ClassifyStats {
                time,
                cells: classification.cells.len(),
                rows: classification.rows.len(),
                skipped: classification.warnings.len(),
            },
            result: Some(classification),
            message: None,
        }
    }

    pub fn error(message: impl ToString) -> Self {
        Self {
            stats: ClassifyStats::default(),
            result: None,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct ClassifyStats {
    pub time: u32,
    pub cells: usize,
    pub rows: usize,
    pub skipped: usize,
}
