use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "codifybot")]
#[command(author, version, about = "Telegram bot for reading Codify programming courses", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Create the database schema and seed courses without starting the bot
    InitDb,

    /// List active courses and whether each one has readable content
    Courses,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
