use anyhow::Result;
use clap::Parser;
use keyrelay::config::{self, Config};
use keyrelay::net::{FragmentFetcher, HttpFetcher, OfflineFetcher};
use keyrelay::scenario::{self, Scenario};
use keyrelay::session::Session;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "keyrelay")]
#[command(about = "Replay key events against a scripted host document")]
#[command(version)]
struct Args {
    /// Scenario file (JSON document + key events)
    #[arg(long, short)]
    scenario: PathBuf,

    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Fetch dialog fragments from the configured host instead of failing offline
    #[arg(long)]
    live: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keyrelay=info".parse()?),
        )
        .init();

    let config = config::load(args.config.as_deref())?;
    let scenario = scenario::load(&args.scenario)?;

    if args.live {
        let fetcher = HttpFetcher::new(&config.network)?;
        replay(scenario, fetcher, &config).await
    } else {
        replay(scenario, OfflineFetcher, &config).await
    }
}

async fn replay<F: FragmentFetcher>(scenario: Scenario, fetcher: F, config: &Config) -> Result<()> {
    let mut session = Session::new(scenario.document, fetcher, config);
    println!("platform: {:?}", session.mode());

    let mut handled = 0;
    for (idx, event) in scenario.events.iter().enumerate() {
        let verdict = session.key(event).await;
        if verdict.is_handled() {
            handled += 1;
        }
        println!(
            "#{} {:?} {} {:?} -> {:?}",
            idx + 1,
            event.phase,
            event.code,
            event.modifiers,
            verdict
        );
        for action in session.host_mut().take_actions() {
            println!("    {}", serde_json::to_string(&action)?);
        }
    }

    println!("{} of {} events handled", handled, scenario.events.len());
    Ok(())
}
