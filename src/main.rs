use clap::Parser;
use ip2as::config::{Overrides, Settings};
use ip2as::output::{NoMatchPolicy, OutputFormat};
use ip2as::processing::DefaultRoute;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Resolve IPv4 addresses to AS numbers by longest-prefix match
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Registry database, one `<address> <mask> <asn>` record per line
    database: PathBuf,

    /// Query list, one IPv4 address per line
    queries: PathBuf,

    /// Output format: text, csv or json [env: IP2AS_FORMAT]
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Unmatched queries: sentinel or skip [env: IP2AS_NO_MATCH]
    #[arg(long)]
    no_match: Option<NoMatchPolicy>,

    /// /0 blocks: match or ignore [env: IP2AS_DEFAULT_ROUTE]
    #[arg(long)]
    default_route: Option<DefaultRoute>,

    /// log4rs config file [env: IP2AS_LOG_CONFIG]
    #[arg(long)]
    log_config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();

    let settings = Settings::from_env_with(Overrides {
        format: args.format,
        no_match: args.no_match,
        default_route: args.default_route,
        log_config: args.log_config,
    })?;

    init_logging(&settings.log_config)?;
    log::info!("#Start main() {:?}", settings);

    let stdout = std::io::stdout();
    ip2as::run(&args.database, &args.queries, &settings, &mut stdout.lock())?;

    Ok(())
}

/// Initialise log4rs from `path`, or log `info` and above to stderr if it does not exist.
fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    if path.exists() {
        log4rs::init_file(path, Default::default())?;
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    log::debug!("log config {} not found, using stderr", path.display());
    Ok(())
}
