use url::Url;

/// Builds canonical URLs of AtCoder contest and problem pages.
///
/// Rows and cells on the page are identified by their link target,
/// so feed ids are joined to them through these URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    base: String,
}

impl LinkBuilder {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base)?;
        Ok(LinkBuilder {
            base: base.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/contests/{contest_id}`
    pub fn contest_url(&self, contest_id: &str) -> String {
        format!("{}/contests/{}", self.base, contest_id)
    }

    /// `{base}/contests/{contest_id}/tasks/{problem_id}`
    pub fn problem_url(&self, contest_id: &str, problem_id: &str) -> String {
        format!("{}/tasks/{}", self.contest_url(contest_id), problem_id)
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        LinkBuilder {
            base: String::from("https://atcoder.jp"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_links() {
        let links = LinkBuilder::default();
        assert_eq!(links.contest_url("abc100"), "https://atcoder.jp/contests/abc100");
        assert_eq!(
            links.problem_url("abc100", "abc100_a"),
            "https://atcoder.jp/contests/abc100/tasks/abc100_a"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let links = LinkBuilder::new("https://example.com/mirror/").unwrap();
        assert_eq!(links.base(), "https://example.com/mirror");
        assert_eq!(
            links.contest_url("arc001"),
            "https://example.com/mirror/contests/arc001"
        );
    }

    #[test]
    fn test_invalid_base() {
        assert!(LinkBuilder::new("not a url").is_err());
    }
}
