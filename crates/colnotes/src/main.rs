use crate::prelude::*;
use clap::Parser;
use colnotes_core::markdown::{FormatOptions, LinkStyle, DEFAULT_SHORTCODE_BASE};

mod changelog;
mod client;
mod config;
mod error;
mod prelude;
mod prompt;
mod status;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Turn a GitHub Projects (classic) column of cards into a Markdown changelog"
)]
pub struct App {
    /// Column URL ending in #column-<id>; prompted for when omitted
    #[clap(long, env = "COLNOTES_COLUMN_URL")]
    url: Option<String>,

    /// Skip the column confirmation prompt
    #[clap(long, short = 'y')]
    yes: bool,

    /// Print the changelog as JSON instead of Markdown
    #[clap(long)]
    json: bool,

    /// Emit well-formed issue links instead of the legacy `...})` form
    #[clap(long)]
    fix_links: bool,

    /// Base URL for D<digits>-code review links
    #[clap(long, env = "COLNOTES_SHORTCODE_BASE", default_value = DEFAULT_SHORTCODE_BASE)]
    shortcode_base: String,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// GitHub API token
    #[clap(long, env = "GHTOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// GitHub API base URL
    #[clap(long, env = "GITHUB_API_URL", global = true)]
    api_base: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "COLNOTES_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

async fn run(app: App) -> Result<()> {
    let config = config::GitHubConfig::resolve(app.global.token, app.global.api_base)?;
    let client = client::GitHubClient::new(&config)?;

    if app.global.verbose {
        status::info(&f!("GitHub API Base: {}", client.api_base()));
    }

    let options = changelog::RunOptions {
        url: app.url,
        yes: app.yes,
        json: app.json,
        format: FormatOptions {
            shortcode_base: app.shortcode_base,
            link_style: if app.fix_links {
                LinkStyle::Fixed
            } else {
                LinkStyle::Legacy
            },
        },
    };

    let mut prompt =
        prompt::Prompt::new(std::io::BufReader::new(std::io::stdin()), std::io::stdout());
    let mut out = anstream::stdout();

    changelog::run(&client, options, &mut prompt, &mut out).await
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    if let Err(err) = run(app).await {
        log::debug!("{err:?}");
        status::error(&err.to_string());
        std::process::exit(1);
    }

    Ok(())
}
