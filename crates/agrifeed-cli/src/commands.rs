use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use agrifeed_feed::{keys, ComposeError, FeedConfig, FeedView, ProfileImageIndex, SessionState};
use agrifeed_store::{FileKvStore, SharedStore};
use agrifeed_types::{ImageRef, PostId};
use anyhow::{bail, Context};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::cli::*;
use crate::output::{print_feed, print_json, print_session, PostRow};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).await?;
    let store: SharedStore = Arc::new(
        FileKvStore::open(&cli.data)
            .await
            .with_context(|| format!("opening store {}", cli.data.display()))?,
    );
    debug!(data = %cli.data.display(), id_strategy = ?config.id_strategy, "store opened");
    let format = cli.format;

    match cli.command {
        Command::Login(args) => cmd_login(&store, args).await,
        Command::Logout => cmd_logout(&store).await,
        Command::Status => cmd_status(&store, format).await,
        Command::Post(args) => cmd_post(store, config, args, format).await,
        Command::Feed(args) => cmd_feed(store, config, args, format).await,
        Command::Like(args) => cmd_like(store, config, args, format).await,
        Command::Avatars => cmd_avatars(store, &config, format).await,
        Command::Shell => cmd_shell(store, config).await,
    }
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<FeedConfig> {
    let Some(path) = path else {
        return Ok(FeedConfig::default());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = FeedConfig::from_toml_str(&raw)?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Stands in for the login screen: records the session keys the feed reads.
async fn cmd_login(store: &SharedStore, args: LoginArgs) -> anyhow::Result<()> {
    let username = args.username.trim();
    if username.is_empty() {
        bail!("username cannot be empty");
    }
    store.set(keys::LOGGED_IN, keys::LOGGED_IN_TRUE).await?;
    store.set(keys::LOGGED_IN_USER, username).await?;
    if let Some(image) = &args.image {
        store.set(&keys::profile_image_key(username), image).await?;
    }
    info!(user = username, "session started");
    println!("{} Logged in as {}", "✓".green().bold(), username.bold());
    Ok(())
}

async fn cmd_logout(store: &SharedStore) -> anyhow::Result<()> {
    SessionState::new(store.clone()).logout().await;
    println!("{} Logged out", "✓".green().bold());
    Ok(())
}

async fn cmd_status(store: &SharedStore, format: OutputFormat) -> anyhow::Result<()> {
    let session = SessionState::new(store.clone()).check_status().await;
    print_session(&session, format)
}

fn compose_error(err: ComposeError) -> anyhow::Error {
    match err {
        ComposeError::NotLoggedIn => {
            anyhow::anyhow!("{err}; run `agrifeed login <username>` first")
        }
        other => other.into(),
    }
}

async fn cmd_post(
    store: SharedStore,
    config: FeedConfig,
    args: PostArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut view = FeedView::composer(store, config);
    view.activate().await;
    let image = args.image.map(ImageRef::Uri);
    let post = view
        .submit(&args.content, image)
        .await
        .map_err(compose_error)?
        .clone();

    match format {
        OutputFormat::Json => print_json(&post),
        OutputFormat::Text => {
            println!("{} Posted {}", "✓".green().bold(), post.id.to_string().yellow());
            Ok(())
        }
    }
}

async fn cmd_feed(
    store: SharedStore,
    mut config: FeedConfig,
    args: FeedArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if args.no_seeds {
        config.show_seed_posts = false;
    }
    let mut view = FeedView::feed(store, config);
    view.activate().await;
    let limit = args.limit.unwrap_or(usize::MAX);
    let rows: Vec<PostRow> = view.entries().iter().take(limit).map(PostRow::from).collect();
    print_feed(&rows, format)
}

async fn cmd_like(
    store: SharedStore,
    config: FeedConfig,
    args: LikeArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let id: PostId = args.id.parse()?;
    let mut view = FeedView::composer(store, config);
    view.activate().await;
    let Some(outcome) = view.toggle_like(&id).await else {
        bail!("no stored post with id {id}");
    };

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "id": outcome.post_id.to_string(),
            "liked": outcome.liked,
            "likes": outcome.like_count,
        })),
        OutputFormat::Text => {
            println!("{} {} now has {} likes", "♥".red().bold(), id.to_string().yellow(), outcome.like_count);
            Ok(())
        }
    }
}

async fn cmd_avatars(store: SharedStore, config: &FeedConfig, format: OutputFormat) -> anyhow::Result<()> {
    let index: BTreeMap<String, String> = ProfileImageIndex::new(store, config.placeholder_image.clone())
        .build()
        .await
        .into_iter()
        .collect();
    if format == OutputFormat::Json {
        return print_json(&index);
    }
    if index.is_empty() {
        println!("No avatars stored.");
    }
    for (user, uri) in &index {
        println!("{}  {}", user.bold(), uri.blue());
    }
    Ok(())
}

const SHELL_HELP: &str = "commands: feed | like <id> | post <text> | refresh | logout | help | quit";

async fn cmd_shell(store: SharedStore, config: FeedConfig) -> anyhow::Result<()> {
    let mut view = FeedView::composer(store, config);
    view.activate().await;
    println!("{}", SHELL_HELP.dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{SHELL_HELP}"),
            "feed" => {
                let rows: Vec<PostRow> = view.entries().iter().map(PostRow::from).collect();
                print_feed(&rows, OutputFormat::Text)?;
            }
            "refresh" => {
                view.refresh().await;
                println!("{} posts loaded", view.posts().len());
            }
            "like" => match rest.trim().parse::<PostId>() {
                Ok(id) => match view.toggle_like(&id).await {
                    Some(o) if o.liked => println!("{} {} ({})", "♥".red().bold(), id, o.like_count),
                    Some(o) => println!("♡ {} ({})", id, o.like_count),
                    None => println!("{} no stored post with id {}", "!".yellow(), id),
                },
                Err(e) => println!("{} {}", "!".yellow(), e),
            },
            "post" => match view.submit(rest, None).await {
                Ok(post) => println!("{} Posted {}", "✓".green().bold(), post.id.to_string().yellow()),
                Err(e) => println!("{} {}", "!".yellow(), e),
            },
            "logout" => {
                view.toggle_session().await;
                println!("{} Logged out", "✓".green().bold());
            }
            other => println!("{} unknown command {:?}; {}", "!".yellow(), other, SHELL_HELP),
        }
    }
    view.deactivate();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrifeed_feed::PostRepository;
    use clap::Parser;

    fn cli(data: &Path, args: &[&str]) -> Cli {
        let mut argv = vec!["agrifeed", "--data", data.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    async fn open(data: &Path) -> SharedStore {
        Arc::new(FileKvStore::open(data).await.unwrap())
    }

    #[tokio::test]
    async fn login_post_like_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");

        run_command(cli(&data, &["login", "amina", "--image", "file:///a.jpg"])).await.unwrap();
        run_command(cli(&data, &["post", "Maize is tasselling"])).await.unwrap();

        let store = open(&data).await;
        let posts = PostRepository::new(store).load().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author_name, "amina");
        assert_eq!(posts[0].author_image.as_deref(), Some("file:///a.jpg"));

        let id = posts[0].id.to_string();
        run_command(cli(&data, &["like", &id])).await.unwrap();
        let posts = PostRepository::new(open(&data).await).load().await;
        assert_eq!(posts[0].like_count, 1);
    }

    #[tokio::test]
    async fn post_requires_login() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        let err = run_command(cli(&data, &["post", "hello"])).await.unwrap_err();
        assert!(err.to_string().contains("agrifeed login"));
    }

    #[tokio::test]
    async fn like_unknown_post_fails() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        assert!(run_command(cli(&data, &["like", "dummy1"])).await.is_err());
    }

    #[tokio::test]
    async fn logout_clears_keys() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        run_command(cli(&data, &["login", "okello", "--image", "x"])).await.unwrap();
        run_command(cli(&data, &["logout"])).await.unwrap();

        let store = open(&data).await;
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn config_file_selects_id_strategy() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        let config = dir.path().join("agrifeed.toml");
        std::fs::write(&config, "id_strategy = \"counter\"\n").unwrap();
        let config = config.to_str().unwrap();

        run_command(cli(&data, &["login", "amina"])).await.unwrap();
        run_command(cli(&data, &["--config", config, "post", "one"])).await.unwrap();
        run_command(cli(&data, &["--config", config, "post", "two"])).await.unwrap();

        let store = open(&data).await;
        assert_eq!(store.get(keys::NEXT_POST_ID).await.unwrap().as_deref(), Some("3"));
        let posts = PostRepository::new(store).load().await;
        assert_eq!(posts[0].id.as_str(), "2");
        assert_eq!(posts[1].id.as_str(), "1");
    }

    #[tokio::test]
    async fn bad_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        let config = dir.path().join("bad.toml");
        std::fs::write(&config, "id_strategy = 5").unwrap();
        let result = run_command(cli(&data, &["--config", config.to_str().unwrap(), "status"])).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn commands_run_under_a_debug_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        let config = dir.path().join("agrifeed.toml");
        std::fs::write(&config, "show_seed_posts = false\n").unwrap();
        let config = config.to_str().unwrap();

        run_command(cli(&data, &["login", "amina"])).await.unwrap();
        run_command(cli(&data, &["--config", config, "post", "hello"])).await.unwrap();
        let posts = PostRepository::new(open(&data).await).load().await;
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn read_only_commands_succeed_on_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("store.json");
        run_command(cli(&data, &["status"])).await.unwrap();
        run_command(cli(&data, &["feed", "--format", "json"])).await.unwrap();
        run_command(cli(&data, &["avatars"])).await.unwrap();
        assert!(!data.exists());
    }
}
