//! Load configuration from files.
use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

use crate::Conf;

/// Errors handling VenueGuard configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unable to decode configuration from file at the given path.
    #[error("unable to decode configuration from file at '{0}'")]
    // (path,)
    Decode(String),

    /// Unable to read configuration file at the given path.
    #[error("unable to read configuration file at '{0}'")]
    // (path,)
    Open(String),

    /// Configuration file not found at the given path.
    #[error("configuration file not found at '{0}'")]
    // (path,)
    PathNotFound(String),
}

/// Load process configuration from the specified path.
pub fn load(path: &str) -> Result<Conf> {
    if !PathBuf::from(path).exists() {
        let error = Error::PathNotFound(path.to_string());
        let error = anyhow::anyhow!(error);
        return Err(error);
    }

    let file = File::open(path).with_context(|| Error::Open(path.into()))?;
    let conf = serde_yaml::from_reader(file).with_context(|| Error::Decode(path.into()))?;
    Ok(conf)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::load;
    use super::Error;
    use crate::LogLevel;
    use crate::LoggingDrain;

    fn write_conf(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temporary file to be created");
        file.write_all(content.as_bytes())
            .expect("temporary file to be written");
        file
    }

    #[test]
    fn load_full_conf() {
        let file = write_conf(
            r#"
claims:
  backend: static
  callers:
    admin-uid:
      role: siteAdmin
logging:
  drain: term
  level: debug
  async: false
runtime:
  worker_threads: 2
"#,
        );
        let conf = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(conf.claims.backend, "static");
        assert_eq!(
            conf.claims.options,
            serde_json::json!({"callers": {"admin-uid": {"role": "siteAdmin"}}})
        );
        assert_eq!(conf.logging.drain, LoggingDrain::Term);
        assert_eq!(conf.logging.level, LogLevel::Debug);
        assert!(!conf.logging.async_flush);
        assert_eq!(conf.runtime.worker_threads, Some(2));
    }

    #[test]
    fn load_defaults() {
        let file = write_conf("claims:\n  backend: http\n  address: https://idp.example.com\n");
        let conf = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(conf.claims.backend, "http");
        assert_eq!(conf.logging.drain, LoggingDrain::Json);
        assert_eq!(conf.logging.level, LogLevel::Info);
        assert!(conf.logging.async_flush);
        assert_eq!(conf.runtime.worker_threads, None);
    }

    #[test]
    fn missing_file() {
        let error = load("/path/to/nowhere/venueguard.yaml").unwrap_err();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::PathNotFound(_))
        ));
    }

    #[test]
    fn invalid_file() {
        let file = write_conf("logging: []\n");
        let error = load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(error.downcast_ref::<Error>(), Some(Error::Decode(_))));
    }
}
