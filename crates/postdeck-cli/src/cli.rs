use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use postdeck_core::config::DEFAULT_BASE_URL;
use postdeck_core::domain::{CommentId, PostId, UserId};

#[derive(Debug, Parser)]
#[command(name = "postdeck", version, about = "Manage local posts alongside a remote post feed")]
pub struct Cli {
    /// Base URL of the remote posts service
    #[arg(long, env = "POSTDECK_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Directory holding local posts and comments (defaults to the user data dir)
    #[arg(long, env = "POSTDECK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "POSTDECK_TIMEOUT_SECS", default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List your posts followed by community posts
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one post with its author and comments
    Show {
        id: PostId,
        #[arg(long)]
        json: bool,
    },
    /// Create a local post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
    },
    /// Edit a post; omitted fields keep their current value
    Edit {
        id: PostId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a post (local posts are removed from disk, community posts via the API)
    Delete { id: PostId },
    /// Read and write comments
    Comments {
        #[command(subcommand)]
        command: CommentsCommand,
    },
    /// Show a community user
    User { id: UserId },
}

#[derive(Debug, Subcommand)]
pub enum CommentsCommand {
    List {
        post_id: PostId,
    },
    Add {
        post_id: PostId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        body: String,
    },
    Delete {
        post_id: PostId,
        comment_id: CommentId,
    },
}
