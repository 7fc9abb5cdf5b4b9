//! Initialise the process logger from configuration.
use std::io::stderr;
use std::sync::Mutex;

use slog::Discard;
use slog::Drain;
use slog::IgnoreResult;
use slog::Logger;
use slog::Never;
use slog::SendSyncRefUnwindSafeDrain;
use slog::SendSyncUnwindSafeDrain;
use slog_async::Async;
use slog_json::Json;
use slog_term::FullFormat;
use slog_term::PlainDecorator;

use venueguard_conf::LogLevel;
use venueguard_conf::LoggingConf;
use venueguard_conf::LoggingDrain;

/// Create the root [`Logger`] described by the configuration.
///
/// Log records are always sent to standard error so standard output only
/// carries command results.
pub fn logger(conf: &LoggingConf) -> Logger {
    match conf.drain {
        LoggingDrain::Discard => Logger::root(Discard, slog::o!()),
        LoggingDrain::Json => {
            let drain = Mutex::new(Json::default(stderr())).map(IgnoreResult::new);
            finish(conf, drain)
        }
        LoggingDrain::Term => {
            let decorator = PlainDecorator::new(stderr());
            let drain = Mutex::new(FullFormat::new(decorator).build()).map(IgnoreResult::new);
            finish(conf, drain)
        }
    }
}

/// Filter records by level and optionally flush them asynchronously.
fn finish<D>(conf: &LoggingConf, drain: D) -> Logger
where
    D: SendSyncUnwindSafeDrain<Ok = (), Err = Never>,
    D: 'static + SendSyncRefUnwindSafeDrain<Err = Never, Ok = ()>,
{
    let drain = drain.filter_level(level(conf.level)).ignore_res();
    match conf.async_flush {
        true => into_logger(Async::new(drain).build().ignore_res()),
        false => into_logger(drain),
    }
}

fn into_logger<D>(drain: D) -> Logger
where
    D: SendSyncUnwindSafeDrain<Ok = (), Err = Never>,
    D: 'static + SendSyncRefUnwindSafeDrain<Err = Never, Ok = ()>,
{
    Logger::root(drain, slog::o!("version" => env!("CARGO_PKG_VERSION")))
}

fn level(level: LogLevel) -> slog::Level {
    match level {
        LogLevel::Critical => slog::Level::Critical,
        LogLevel::Error => slog::Level::Error,
        LogLevel::Warning => slog::Level::Warning,
        LogLevel::Info => slog::Level::Info,
        LogLevel::Debug => slog::Level::Debug,
    }
}
