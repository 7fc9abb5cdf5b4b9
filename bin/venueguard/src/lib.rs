//! Combine individual logical units to initialise and run a VenueGuard process.
use anyhow::Result;
use clap::Parser;

use venueguard_auth::Rejection;
use venueguard_conf::Conf;

mod cmd;
mod init;

pub use self::cmd::Cli;
pub use self::init::BackendNotFound;
pub use self::init::Backends;
pub use self::init::GenericInit;

/// Exit code for requests that were denied.
pub const EXIT_DENIED: i32 = 2;

/// Exit code for failures other than denied requests or unknown callers.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for callers unknown to the identity provider.
pub const EXIT_LOOKUP: i32 = 3;

/// Initialise the venueguard process and invoke a command implementation.
pub async fn execute(cli: Cli, conf: Conf) -> Result<()> {
    let mut init = GenericInit::configure(conf);
    init.register_default_backends();
    let gate = init
        .validate_backends_conf()?
        .register_metrics()?
        .gate()
        .await?;

    let result = cmd::run(&init.context, &gate, &cli.command).await;
    if cli.print_metrics {
        init.print_metrics()?;
    }
    result
}

/// Process exit code to report the given error with.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match Rejection::classify(error) {
        Rejection::Denied => EXIT_DENIED,
        Rejection::Internal => EXIT_FAILURE,
        Rejection::Lookup => EXIT_LOOKUP,
    }
}

/// Initialise the async runtime for the process and invoke [`execute`].
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let conf = venueguard_conf::load(&cli.config)?;

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(threads) = conf.runtime.worker_threads {
        runtime.worker_threads(threads);
    }
    runtime.build()?.block_on(execute(cli, conf))
}
