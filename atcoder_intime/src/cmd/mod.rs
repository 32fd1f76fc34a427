pub mod classify;
pub mod server;
pub mod watch;

use crate::modules::{annotator::Annotator, models::request::validate_user_id};
use anyhow::{Context, Result};
use atcoder_intime_libs::{ClassificationEngine, LinkBuilder, ProblemsClient};
use std::{env, time::Duration};

/// Create an annotator backed by AtCoder Problems, configured from environment variables.
pub fn create_annotator() -> Result<Annotator<ProblemsClient>> {
    let problems_url = env::var("ATCODER_PROBLEMS_URL").unwrap_or_else(|_| {
        tracing::info!("ATCODER_PROBLEMS_URL environment variable is not set. Default value `https://kenkoooo.com/atcoder` will be used.");
        String::from("https://kenkoooo.com/atcoder")
    });
    let atcoder_url = env::var("ATCODER_URL").unwrap_or_else(|_| {
        tracing::info!("ATCODER_URL environment variable is not set. Default value `https://atcoder.jp` will be used.");
        String::from("https://atcoder.jp")
    });
    let timeout = match env::var("FETCH_TIMEOUT_SECONDS") {
        Ok(value) => value.parse::<u64>().with_context(|| {
            let message = format!(
                "FETCH_TIMEOUT_SECONDS must be an integer, but got `{}`",
                value
            );
            tracing::error!(message);
            message
        })?,
        Err(_) => 30,
    };

    let links = LinkBuilder::new(&atcoder_url).with_context(|| {
        let message = format!("invalid ATCODER_URL `{}`", atcoder_url);
        tracing::error!(message);
        message
    })?;
    let client = ProblemsClient::new(&problems_url, Duration::from_secs(timeout))
        .with_context(|| {
            let message = "couldn't create AtCoder Problems client. check the value of ATCODER_PROBLEMS_URL environment variable.";
            tracing::error!(message);
            message
        })?;

    Ok(Annotator::new(client, ClassificationEngine::new(links)))
}

pub fn ensure_user_id(user_id: &str) -> Result<()> {
    if let Err(e) = validate_user_id(user_id) {
        let message = format!("`{}` is not a valid user id: {}", user_id, e);
        tracing::error!(message);
        anyhow::bail!(message)
    }
    Ok(())
}
