use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "pxs")]
#[command(about = "Proxy-shopper proposal tools", long_about = None)]
struct Cli {
    /// Verbose logs on stderr (overrides RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> env -> local...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Quantity selector tools (no network)
    Quantity {
        #[command(subcommand)]
        cmd: QuantityCmd,
    },

    /// Buyer request inspection
    Request {
        #[command(subcommand)]
        cmd: RequestCmd,
    },

    /// Product advanced search
    Search {
        #[arg(long)]
        query: String,

        /// Restrict to one market; all markets when omitted
        #[arg(long)]
        market: Option<i64>,

        /// Layered config paths in merge order
        #[arg(long = "config", required = true, num_args = 1..)]
        config_paths: Vec<String>,
    },

    /// Load a request, search, pick products and submit a proposal
    Propose {
        #[arg(long)]
        request: i64,

        /// Searches run in order; each replaces the previous results
        #[arg(long = "query", required = true)]
        queries: Vec<String>,

        /// PRODUCT_ID=QUANTITY, picked from whichever search lists it
        #[arg(long = "pick", required = true)]
        picks: Vec<String>,

        /// Proxy fee; config default when omitted
        #[arg(long)]
        fee: Option<f64>,

        #[arg(long, default_value = "")]
        note: String,

        #[arg(long = "config", required = true, num_args = 1..)]
        config_paths: Vec<String>,
    },
}

#[derive(Subcommand)]
enum QuantityCmd {
    /// Display form of a number (2.50 -> 2.5)
    Format {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },

    /// Apply one +/- step to a committed value
    Step {
        #[arg(long, allow_hyphen_values = true)]
        value: f64,

        #[arg(long, value_enum)]
        dir: Dir,

        #[command(flatten)]
        bounds: commands::BoundsArgs,
    },

    /// Feed raw keystroke buffers to the widget, then blur
    Edit {
        /// Successive buffer contents, as typed
        #[arg(long = "input", required = true, allow_hyphen_values = true)]
        inputs: Vec<String>,

        /// Committed value before editing; `min` when omitted
        #[arg(long, allow_hyphen_values = true)]
        value: Option<f64>,

        #[command(flatten)]
        bounds: commands::BoundsArgs,
    },
}

#[derive(Subcommand)]
enum RequestCmd {
    Show {
        #[arg(long)]
        id: i64,

        #[arg(long = "config", required = true, num_args = 1..)]
        config_paths: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Dir {
    Up,
    Down,
}

impl From<Dir> for pxs_quantity::StepDirection {
    fn from(d: Dir) -> Self {
        match d {
            Dir::Up => pxs_quantity::StepDirection::Increase,
            Dir::Down => pxs_quantity::StepDirection::Decrease,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present. Silent when absent; production injects env vars.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let loaded = pxs_config::load_layered_yaml(&paths)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Quantity { cmd } => match cmd {
            QuantityCmd::Format { value } => commands::quantity::format(value),
            QuantityCmd::Step { value, dir, bounds } => {
                commands::quantity::step(value, dir.into(), &bounds)?
            }
            QuantityCmd::Edit {
                inputs,
                value,
                bounds,
            } => commands::quantity::edit(&inputs, value, &bounds)?,
        },

        Commands::Request { cmd } => match cmd {
            RequestCmd::Show { id, config_paths } => {
                commands::propose::request_show(id, &config_paths).await?
            }
        },

        Commands::Search {
            query,
            market,
            config_paths,
        } => commands::propose::search(&query, market, &config_paths).await?,

        Commands::Propose {
            request,
            queries,
            picks,
            fee,
            note,
            config_paths,
        } => {
            commands::propose::propose(request, &queries, &picks, fee, &note, &config_paths)
                .await?
        }
    }

    Ok(())
}

// stdout carries key=value output; logs go to stderr.
fn init_tracing(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
