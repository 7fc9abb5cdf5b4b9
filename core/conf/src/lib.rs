//! VenueGuard configuration object and helpers.
mod loading;
mod logging;
mod object;
mod runtime;

pub use self::loading::load;
pub use self::loading::Error;
pub use self::logging::LogLevel;
pub use self::logging::LoggingConf;
pub use self::logging::LoggingDrain;
pub use self::object::BackendConf;
pub use self::object::Conf;
pub use self::runtime::RuntimeConf;
