use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use tokio::io::{AsyncBufReadExt, BufReader};
use url::Url;

use podhome::{
    FetchOptions, HomeFeed, PlayerAction, PlayerState, REVALIDATE_SECONDS, ReqwestClient,
    load_home,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static SPARKLES: Emoji<'_, '_> = Emoji("✨ ", "[*] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static PLAY: Emoji<'_, '_> = Emoji("▶️  ", "> ");
static PAUSE: Emoji<'_, '_> = Emoji("⏸️  ", "|| ");
static REPEAT: Emoji<'_, '_> = Emoji("🔁 ", "[loop] ");
static SHUFFLE: Emoji<'_, '_> = Emoji("🔀 ", "[shfl] ");

/// Browse a podcast's episode listing and drive a local player
#[derive(Parser, Debug)]
#[command(name = "podhome")]
#[command(about = "Browse a podcast's episode listing and drive a local player")]
#[command(version)]
struct Args {
    /// Base URL of the episodes API
    #[arg(long, default_value = podhome::episodes::DEFAULT_BASE_URL)]
    api: String,

    /// Maximum number of episodes to request
    #[arg(short, long, default_value = "12")]
    limit: usize,

    /// Refetch and re-render the listing on the revalidation interval
    #[arg(short, long, conflicts_with = "player")]
    watch: bool,

    /// Override the refresh interval in seconds (default: 8 hours)
    #[arg(long, requires = "watch")]
    interval: Option<u64>,

    /// Drive the player interactively from stdin after rendering
    #[arg(short, long)]
    player: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "\n{}{} {}\n",
        MICROPHONE,
        "podhome".bold().magenta(),
        "- Podcast Episode Browser".dimmed()
    );

    let base_url = Url::parse(&args.api).context("Invalid API base URL")?;
    let options = FetchOptions {
        base_url,
        limit: args.limit,
        ..Default::default()
    };

    let client = ReqwestClient::new();

    let feed = fetch_and_render(&client, &options).await?;

    if args.player {
        run_player(feed).await?;
    } else if args.watch {
        let interval = Duration::from_secs(args.interval.unwrap_or(REVALIDATE_SECONDS));
        loop {
            tokio::time::sleep(interval).await;
            fetch_and_render(&client, &options).await?;
        }
    }

    Ok(())
}

async fn fetch_and_render(client: &ReqwestClient, options: &FetchOptions) -> Result<HomeFeed> {
    println!(
        "{SEARCH}Fetching episodes from {}",
        options.base_url.as_str().cyan()
    );

    let feed = load_home(client, options)
        .await
        .context("Failed to load episode listing")?;

    render_home(&feed);
    Ok(feed)
}

fn render_home(feed: &HomeFeed) {
    if feed.is_empty() {
        println!("\n{}", "No episodes published yet.".dimmed());
        return;
    }

    println!("\n{SPARKLES}{}\n", "Latest releases".bold().green());
    for (row, episode) in feed.latest.iter().enumerate() {
        println!(
            "  {:>3}  {}",
            (row + 1).to_string().cyan(),
            episode.title.bold()
        );
        println!(
            "       {} {} {} {}",
            episode.members.dimmed(),
            "•".dimmed(),
            episode.published_at.dimmed(),
            episode.duration_as_string.dimmed()
        );
    }

    if feed.all.is_empty() {
        println!();
        return;
    }

    println!("\n{HEADPHONES}{}\n", "All episodes".bold().green());
    for (row, episode) in feed.all.iter().enumerate() {
        println!(
            "  {:>3}  {:<50} {:<24} {:>9}  {:>9}",
            (feed.latest.len() + row + 1).to_string().cyan(),
            truncate_title(&episode.title, 50),
            truncate_title(&episode.members, 24).dimmed(),
            episode.published_at.dimmed(),
            episode.duration_as_string.dimmed()
        );
    }
    println!();
}

/// Interactive player loop reading commands from stdin
///
/// Row numbers shown in the listing map straight onto the combined queue, so
/// `play 3` starts the third listed episode with the whole page as playlist.
async fn run_player(feed: HomeFeed) -> Result<()> {
    let queue = feed.queue();
    let mut state = PlayerState::new();

    println!(
        "{}",
        "Commands: play <n>, toggle, next, prev, shuffle, loop, stop, clear, status, quit".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");

        match command {
            "" => {}

            "quit" | "exit" | "q" => break,

            "play" => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
                // The reducer trusts the index, so bounds are enforced here
                Some(row) if row >= 1 && row <= queue.len() => {
                    state = state.apply(PlayerAction::PlayList {
                        list: queue.clone(),
                        index: row - 1,
                    });
                    print_now_playing(&state);
                }
                _ => println!(
                    "{}",
                    format!("Expected an episode number between 1 and {}", queue.len()).red()
                ),
            },

            "toggle" | "pause" => {
                state = state.apply(PlayerAction::TogglePlay);
                print_now_playing(&state);
            }

            "next" | "n" => {
                if state.has_next() {
                    state = state.apply(PlayerAction::Next);
                }
                print_now_playing(&state);
            }

            "prev" | "p" => {
                if state.has_previous() {
                    state = state.apply(PlayerAction::Previous);
                }
                print_now_playing(&state);
            }

            "shuffle" => {
                state = state.apply(PlayerAction::ToggleShuffle);
                print_now_playing(&state);
            }

            "loop" => {
                state = state.apply(PlayerAction::ToggleLoop);
                print_now_playing(&state);
            }

            "stop" => {
                state = state.apply(PlayerAction::SetPlaying(false));
                print_now_playing(&state);
            }

            "clear" => {
                state = state.apply(PlayerAction::Clear);
                print_now_playing(&state);
            }

            "status" => print_now_playing(&state),

            other => println!("{}", format!("Unknown command: {other}").red()),
        }

        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("{} ", ">".bold().magenta());
    std::io::stdout().flush().context("Failed to flush stdout")
}

fn print_now_playing(state: &PlayerState) {
    let Some(episode) = state.current_episode() else {
        println!("{}", "Nothing queued.".dimmed());
        return;
    };

    let marker = if state.is_playing { PLAY } else { PAUSE };

    let mut line = format!(
        "{marker}{} [{}/{}] {}",
        episode.title.bold().green(),
        state.current_index + 1,
        state.episode_list.len(),
        episode.duration_as_string.dimmed()
    );

    if state.is_looping {
        line.push_str(&format!(" {REPEAT}"));
    }
    if state.is_shuffling {
        line.push_str(&format!(" {SHUFFLE}"));
    }

    println!("{line}");
}

fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        title.to_string()
    } else {
        let truncated: String = title.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
