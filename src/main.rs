use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use babel::banner::{BannerInfo, print_banner};
use babel::config::{ClassifierConfig, Provider, ServerConfig};
use babel::consts::{DEFAULT_HOST, DEFAULT_PORT};
use babel::server::{AppState, serve};

#[derive(Parser)]
#[command(name = "babel", version, about = "Tell me a sentence, I'll tell you its language.")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "BABEL_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "BABEL_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Classifier backend
    #[arg(long, env = "BABEL_PROVIDER", value_enum, default_value_t = Provider::HuggingFace)]
    provider: Provider,

    /// Model id (huggingface only)
    #[arg(short, long, env = "BABEL_MODEL")]
    model: Option<String>,

    /// Inference API base URL (huggingface only)
    #[arg(long, env = "BABEL_ENDPOINT")]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let cli = Cli::parse();

    let classifier_config = ClassifierConfig {
        provider: cli.provider,
        model: cli.model,
        endpoint: cli.endpoint,
    };
    if classifier_config.has_ignored_options() {
        warn!("--model and --endpoint are ignored for whatlang provider");
    }
    let server_config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };

    // The classifier must be ready before the listener accepts traffic.
    let classifier = classifier_config.build()?;
    info!(classifier = classifier.name(), "classifier ready");

    print_banner(&BannerInfo {
        classifier: classifier.name(),
        model: classifier_config.model_label(),
        address: &server_config.address(),
    });

    let listener = server_config.bind().await?;
    serve(listener, AppState::new(classifier)).await
}
