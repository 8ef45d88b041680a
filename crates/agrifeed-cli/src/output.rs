use agrifeed_feed::FeedEntry;
use agrifeed_types::{ImageRef, Session};
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRow {
    pub id: String,
    pub author: String,
    pub author_image: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub likes: i64,
    pub comments: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub seed: bool,
    pub liked: bool,
}

impl From<&FeedEntry<'_>> for PostRow {
    fn from(entry: &FeedEntry<'_>) -> Self {
        let post = entry.post;
        Self {
            id: post.id.to_string(),
            author: post.author_name.clone(),
            author_image: entry.author_image.to_string(),
            content: post.content.clone(),
            image: post.image.as_ref().map(ImageRef::to_string),
            likes: post.like_count,
            comments: post.comment_count,
            source: post.source_label.clone(),
            seed: entry.seed,
            liked: entry.liked,
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_feed(rows: &[PostRow], format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No posts yet.");
        return Ok(());
    }
    for row in rows {
        let heart = if row.liked { "♥".red().bold() } else { "♡".normal() };
        let id = if row.seed {
            row.id.dimmed()
        } else {
            row.id.yellow()
        };
        println!("{}  {}  {}", id, row.author.bold(), row.author_image.dimmed());
        println!("  {}", row.content);
        if let Some(image) = &row.image {
            println!("  {} {}", "image:".cyan(), image);
        }
        let mut counters = format!("  {} {}  💬 {}", heart, row.likes, row.comments);
        if let Some(source) = &row.source {
            counters.push_str(&format!("  ({})", source.italic()));
        }
        println!("{counters}");
    }
    Ok(())
}

pub fn print_session(session: &Session, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        return print_json(session);
    }
    match session.username() {
        Some(user) => {
            println!("Logged in as {}", user.green().bold());
            if let Some(image) = &session.profile_image {
                println!("  Avatar: {}", image.blue());
            }
        }
        None if session.is_active => println!("{} Logged in, but no username is stored", "!".yellow()),
        None => println!("Not logged in."),
    }
    Ok(())
}
