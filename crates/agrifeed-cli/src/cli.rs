use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "agrifeed",
    about = "AgriFeed: local farm feed: posts, likes and sessions",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file holding the key-value store
    #[arg(long, global = true, default_value = "agrifeed.json")]
    pub data: PathBuf,

    /// TOML file with feed settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record a local login for a user
    Login(LoginArgs),
    /// Clear the current session
    Logout,
    /// Show who is logged in
    Status,
    /// Compose a post as the logged-in user
    Post(PostArgs),
    /// List stored posts followed by seed posts
    Feed(FeedArgs),
    /// Like a post and save the counter
    Like(LikeArgs),
    /// Show the username -> avatar index
    Avatars,
    /// Interactive session: likes toggle within one activation
    Shell,
}

#[derive(Args)]
pub struct LoginArgs {
    pub username: String,
    /// Avatar URI stored for this user
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct PostArgs {
    pub content: String,
    /// URI of an attached image
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct FeedArgs {
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
    /// Hide the built-in seed posts
    #[arg(long)]
    pub no_seeds: bool,
}

#[derive(Args)]
pub struct LikeArgs {
    pub id: String,
}
