use clap::Subcommand;

use super::classify::ClassifyArgs;
use super::run::RunArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Attach to the browser and act on the current page
    Run(RunArgs),

    /// Show what a run would do on a given URL
    Classify(ClassifyArgs),
}
