use clap::{Parser, Subcommand};

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, about = "Shared notes addressed by 4-digit codes")]
pub struct Cli {
    /// Base URL of the notes API.
    #[arg(long, env = "CODENOTE_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum Command {
    /// List the notes you created, most recently modified first.
    List,
    /// Create a new note and print its code.
    New {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Check that a code leads to a note.
    Access { code: String },
    /// Print a note.
    Show { code: String },
    /// Change a note's title and/or content and save it.
    Edit {
        code: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note.
    Delete { code: String },
}
