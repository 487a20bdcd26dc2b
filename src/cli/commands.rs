use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "alumni-match", about = "Alumni recommendations from declared skills, language and location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch users, fit the vocabulary and store a new model run
    Train,
    /// Recommend alumni for a profile
    Recommend {
        /// JSON object with any of: skills, language, location
        json: String,
        /// Number of alumni to return (defaults to ALUMNI_TOP_N or 3)
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Alumni most similar to an existing alumnus
    Similar {
        /// User id of the alumnus
        user_id: String,
        #[arg(long)]
        top_n: Option<usize>,
    },
    /// Show statistics for the active model
    Stats,
    /// List stored training runs, newest first
    Runs,
}
