use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::WikiError;

/// Application configuration, read from a YAML settings file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    /// Directory holding one `<title>.txt` per page plus the HTML templates
    pub doc_root: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Where to copy `view.html`/`edit.html` from when the doc root lacks them
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5004
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, WikiError> {
        log::info!("Loading settings from {:?}", path);
        let content = std::fs::read_to_string(path)
            .map_err(|e| WikiError::Config(format!("failed to open {}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
            .map_err(|e| WikiError::Config(format!("failed to decode {}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Check the settings are usable before any request is served
    pub fn validate(&self) -> Result<(), WikiError> {
        if !self.server.doc_root.is_dir() {
            return Err(WikiError::Config(format!(
                "doc_root {} is not a directory",
                self.server.doc_root.display()
            )));
        }
        Ok(())
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| WikiError::Config(format!("invalid listen address: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_doc_root_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.yaml");
        std::fs::write(&settings, "server:\n  doc_root: \"/Users/someone/Desktop\"").unwrap();

        let config = Config::load(&settings).unwrap();

        assert_eq!(
            config,
            Config {
                server: ServerConfig {
                    doc_root: PathBuf::from("/Users/someone/Desktop"),
                    host: "0.0.0.0".to_string(),
                    port: 5004,
                    template_dir: None,
                }
            }
        );
    }

    #[test]
    fn reads_optional_fields() {
        let config = Config::from_yaml(
            "server:\n  doc_root: wiki\n  host: 127.0.0.1\n  port: 8080\n  template_dir: tpl\n",
        )
        .unwrap();

        assert_eq!(config.server.template_dir, Some(PathBuf::from("tpl")));
        assert_eq!(config.socket_addr().unwrap(), "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, WikiError::Config(_)));
    }

    #[test]
    fn missing_doc_root_is_config_error() {
        let err = Config::from_yaml("server:\n  port: 80\n").unwrap_err();
        assert!(err.to_string().contains("doc_root"));
    }

    #[test]
    fn validate_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::from_yaml("server:\n  doc_root: x\n").unwrap();

        config.server.doc_root = dir.path().to_path_buf();
        assert!(config.validate().is_ok());

        config.server.doc_root = dir.path().join("missing");
        assert!(matches!(config.validate(), Err(WikiError::Config(_))));
    }

    #[test]
    fn bad_host_is_config_error() {
        let config = Config::from_yaml("server:\n  doc_root: x\n  host: \"not a host\"\n").unwrap();
        assert!(matches!(config.socket_addr(), Err(WikiError::Config(_))));
    }
}
