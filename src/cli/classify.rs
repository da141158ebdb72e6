use anyhow::Result;
use clap::Args;

use crate::config::Config;
use crate::routes::PageCommand;

#[derive(Args, Clone, Debug)]
pub struct ClassifyArgs {
    /// Page URL to classify
    pub url: String,
}

pub async fn cmd_classify(args: ClassifyArgs, config: &Config) -> Result<()> {
    match config.routes.classify(&args.url) {
        PageCommand::Ignore(reason) => println!("no-op ({})", reason),
        command => println!("{}", command),
    }
    Ok(())
}
