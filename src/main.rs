//! Pagequill - capture, transform, and paste coordination core.
//!
//! Main entry point: a scripted end-to-end run over the simulated browser,
//! plus direct access to the Gemini transform and model listing using the
//! stored settings.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pagequill_config::SettingsStore;
use pagequill_core::page::{NodeKind, PageDom};
use pagequill_core::panel::{AssistMode, Panel, PanelEvent};
use pagequill_protocols::geometry::Point;
use pagequill_protocols::provider::{TextGenerator, Turn};
use pagequill_provider_gemini::GeminiProvider;
use pagequill_runtime::{solid_png, Session, SystemClipboard};

/// Pagequill CLI.
#[derive(Parser)]
#[command(name = "pagequill")]
#[command(about = "Capture, transform, and paste coordination core")]
#[command(version)]
struct Cli {
    /// Settings file path (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted end-to-end flow over the simulated browser (default)
    Simulate {
        /// Copy the captured image to the real system clipboard instead of
        /// the in-memory one
        #[arg(long)]
        system_clipboard: bool,
    },

    /// Transform text through the configured model
    Transform {
        /// Operating mode
        #[arg(long, value_enum, default_value_t = ModeArg::Summarize)]
        mode: ModeArg,

        /// Free-form instruction folded into the prompt
        #[arg(long, default_value = "")]
        instruction: String,

        /// Text to transform; read from stdin when omitted
        text: Option<String>,
    },

    /// Fetch the usable model list and cache it in the settings
    Models,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Summarize,
    Proofread,
    Translate,
    Reply,
    Chat,
}

impl From<ModeArg> for AssistMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Summarize => AssistMode::Summarize,
            ModeArg::Proofread => AssistMode::Proofread,
            ModeArg::Translate => AssistMode::Translate,
            ModeArg::Reply => AssistMode::Reply,
            ModeArg::Chat => AssistMode::Chat,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let store = match cli.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::at_default_path().context("Failed to locate settings")?,
    };

    match cli.command.unwrap_or(Commands::Simulate {
        system_clipboard: false,
    }) {
        Commands::Simulate { system_clipboard } => simulate(&store, system_clipboard).await,
        Commands::Transform {
            mode,
            instruction,
            text,
        } => transform(&store, mode.into(), &instruction, text).await,
        Commands::Models => models(&store).await,
    }
}

fn require_api_key(store: &SettingsStore) -> anyhow::Result<(String, String)> {
    let settings = store.load()?;
    match settings.api_key.clone().filter(|key| !key.is_empty()) {
        Some(key) => Ok((key, settings.model)),
        None => bail!(
            "No API key configured. Add `api_key = \"...\"` to {}",
            store.path().display()
        ),
    }
}

async fn transform(
    store: &SettingsStore,
    mode: AssistMode,
    instruction: &str,
    text: Option<String>,
) -> anyhow::Result<()> {
    let (api_key, model) = require_api_key(store)?;

    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let mut prompt = String::new();
    if !mode.preamble().is_empty() {
        prompt.push_str(mode.preamble());
        prompt.push_str("\n\n");
    }
    if !instruction.is_empty() {
        prompt.push_str(instruction);
        prompt.push_str("\n\n");
    }
    prompt.push_str(&text);

    let provider = GeminiProvider::new(api_key);
    let reply = provider.generate(&model, &[Turn::user(prompt)]).await?;
    println!("{}", reply);
    Ok(())
}

async fn models(store: &SettingsStore) -> anyhow::Result<()> {
    let (api_key, _) = require_api_key(store)?;

    let provider = GeminiProvider::new(api_key);
    let models = provider.list_models().await?;
    for model in &models {
        println!("{}", model);
    }

    let mut settings = store.load()?;
    settings.cached_models = models;
    store.save(&settings)?;
    info!("Cached {} models in {}", settings.cached_models.len(), store.path().display());
    Ok(())
}

fn drain_events(panel: &mut Panel) {
    for event in panel.take_events() {
        match event {
            PanelEvent::Status { text, sticky } => {
                if sticky {
                    info!("status (sticky): {}", text);
                } else {
                    info!("status: {}", text);
                }
            }
            PanelEvent::OpenSettings => info!("panel requests the settings surface"),
        }
    }
}

async fn simulate(store: &SettingsStore, system_clipboard: bool) -> anyhow::Result<()> {
    let settings = store.load().unwrap_or_default();

    let session = Session::start();
    let window = session.open_window();
    let tab = session.open_tab(window, "https://notes.example/draft");
    session
        .browser()
        .set_screenshot(window, solid_png(1280, 720, [245, 245, 245, 255]));

    let agent = session.load_page(tab, PageDom::new());
    let field = agent.add_node(NodeKind::TextArea);
    agent.focus_element(field);
    agent.set_selection_text("hello from the page");

    let mut panel = if system_clipboard {
        session.build_panel_with_clipboard(&settings.model, Arc::new(SystemClipboard::new()))
    } else {
        session.build_panel(&settings.model)
    };
    if let Some(key) = settings.api_key.clone().filter(|key| !key.is_empty()) {
        panel = panel.with_generator(Arc::new(GeminiProvider::new(key)));
        info!("Using Gemini model {}", settings.model);
    } else {
        info!("No API key configured; skipping the AI transform step");
    }

    panel.open().await;
    drain_events(&mut panel);
    info!("Editor: {:?}", panel.editor_text());

    if settings.has_credential() {
        panel.invoke_assist(AssistMode::Summarize, "").await;
        drain_events(&mut panel);
        info!("Result: {:?}", panel.result_text());
        panel.set_editor_text(panel.result_text().to_string());
    }

    panel.paste_editor_text().await;
    drain_events(&mut panel);
    info!("Field now reads: {:?}", agent.value(field));

    let mut notifications = session.bus().notifications();
    panel.begin_capture().await;
    agent.pointer_down(Point::new(100.0, 100.0));
    agent.pointer_move(Point::new(400.0, 300.0));
    agent.pointer_up(Point::new(400.0, 300.0));

    let notification = notifications
        .recv()
        .await
        .context("Capture notification never arrived")?;
    panel.handle_notification(notification).await;
    drain_events(&mut panel);

    let newest = panel.artifacts().first().map(|a| (a.id, a.png.len()));
    if let Some((id, bytes)) = newest {
        info!("Captured {} bytes", bytes);
        panel.copy_artifact(id);
        panel.paste_artifact(id).await;
        drain_events(&mut panel);
    }

    info!("Simulation complete");
    Ok(())
}
