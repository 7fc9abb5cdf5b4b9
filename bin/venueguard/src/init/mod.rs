//! Initialisation logic for VenueGuard processes.
mod backends;
mod generic;
mod logging;

pub use self::backends::BackendNotFound;
pub use self::backends::Backends;
pub use self::generic::GenericInit;
