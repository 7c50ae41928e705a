use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use ethscope::app::{App, AppOptions, StatusLevel};
use ethscope::config::{self, Overrides, Settings};
use ethscope::infrastructure::{AlchemyProvider, BlockchainProvider, RuntimeBridge};
use ethscope::{logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "ethscope",
    version,
    about = "ethscope: browse Ethereum blocks, accounts and NFTs from the terminal"
)]
struct Args {
    /// Alchemy API key
    #[arg(long, env = "ALCHEMY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Network slug (eth-mainnet, eth-sepolia, eth-holesky, polygon-mainnet,
    /// arb-mainnet, opt-mainnet, base-mainnet)
    #[arg(long)]
    network: Option<String>,

    /// Override the API base URL (e.g. http://127.0.0.1:9000 for a mock)
    #[arg(long)]
    base_url: Option<String>,

    /// Transactions per page (5, 10, 20 or 50)
    #[arg(long)]
    page_size: Option<usize>,

    /// Log file (defaults to the platform data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Args> for Overrides {
    fn from(args: Args) -> Self {
        Overrides {
            api_key: args.api_key,
            network: args.network,
            base_url: args.base_url,
            page_size: args.page_size,
            log_file: args.log_file,
        }
    }
}

fn main() -> Result<()> {
    // .env must be loaded before clap reads env fallbacks
    dotenv::dotenv().ok();
    let args = Args::parse();

    let (file_config, config_warning) = match config::load() {
        Ok(config) => (config, None),
        Err(err) => (config::Config::default(), Some(err)),
    };
    let settings = Settings::resolve(args.into(), file_config)?;

    logging::init_logger(&settings.log_file)?;
    if let Some(err) = config_warning {
        tracing::warn!(error = %err, "ignoring config file");
    }
    tracing::info!(
        network = %settings.network,
        endpoint = %settings.endpoints.display(),
        page_size = settings.page_size,
        "starting ethscope"
    );

    let provider = AlchemyProvider::new(settings.endpoints.clone())
        .context("Failed to create Alchemy provider")?;
    let provider: Arc<dyn BlockchainProvider> = Arc::new(provider);
    let runtime = RuntimeBridge::new(Arc::clone(&provider))?;

    let mut app = App::new(AppOptions {
        page_size: settings.page_size,
        explorer_url: settings.explorer_url.clone(),
        endpoint: provider.endpoint_name(),
    });

    let mut stdout = io::stdout();
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.mount();
    let res = run_app(&mut terminal, app, &runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %format!("{err:#}"), "application error");
        eprintln!("{err:?}");
    }
    tracing::info!("ethscope stopped");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: &RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, runtime)?;
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

/// Forward queued commands to the worker, apply its results and run
/// clipboard requests.
fn pump_background(app: &mut App, runtime: &RuntimeBridge) -> Result<()> {
    for cmd in app.take_commands() {
        tracing::debug!(?cmd, "dispatch");
        runtime.send(cmd)?;
    }
    for event in runtime.poll_events() {
        app.apply_event(event);
    }
    if let Some(text) = app.take_copy_request() {
        handle_copy_to_clipboard(app, text);
    }
    Ok(())
}

fn handle_copy_to_clipboard(app: &mut App, text: String) {
    use arboard::Clipboard;

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(text.as_str()).is_ok() {
                let shown = if text.chars().count() > 40 {
                    format!("{}...", text.chars().take(40).collect::<String>())
                } else {
                    text
                };
                app.set_status(format!("Copied: {shown}"), StatusLevel::Info);
            } else {
                app.set_status("Failed to copy to clipboard", StatusLevel::Error);
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "clipboard unavailable");
            app.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}
