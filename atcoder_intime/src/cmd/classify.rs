use crate::{
    cmd::{create_annotator, ensure_user_id},
    modules::render::{render_links, render_table},
};
use anyhow::{Context, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(long)]
    user: String,
    /// Print only the results for these link targets
    #[arg(long)]
    href: Vec<String>,
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ClassifyArgs) -> Result<()> {
    ensure_user_id(&args.user)?;
    let annotator = create_annotator()?;

    let classification = annotator.annotate(&args.user).await.with_context(|| {
        let message = format!("failed to classify submissions of {}", args.user);
        tracing::error!(message);
        message
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
    } else if !args.href.is_empty() {
        print!("{}", render_links(&classification, &args.href));
    } else {
        print!("{}", render_table(&classification));
    }

    Ok(())
}
