use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub links: LinksConfig,
}

/// Extra attributes written on `<a>` elements after `href`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LinksConfig {
    pub target: Option<String>,
    pub rel: Option<String>,
}

impl LinksConfig {
    /// Configured attributes in render order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("target", self.target.as_deref()), ("rel", self.rel.as_deref())]
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
    }
}

impl Config {
    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file, or return defaults if not found or invalid.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn links_section() {
        let config =
            Config::from_toml("[links]\ntarget = \"_blank\"\nrel = \"noopener\"\n").unwrap();
        assert_eq!(config.links.target.as_deref(), Some("_blank"));
        let attributes: Vec<_> = config.links.attributes().collect();
        assert_eq!(attributes, vec![("target", "_blank"), ("rel", "noopener")]);
    }

    #[test]
    fn partial_links_section() {
        let config = Config::from_toml("[links]\nrel = \"nofollow\"\n").unwrap();
        let attributes: Vec<_> = config.links.attributes().collect();
        assert_eq!(attributes, vec![("rel", "nofollow")]);
    }

    #[test]
    fn invalid_toml() {
        assert!(matches!(
            Config::from_toml("[links\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[links]\nrel = \"nofollow\"").unwrap();
        let config = Config::load(file.path());
        assert_eq!(config.links.rel.as_deref(), Some("nofollow"));
    }

    #[test]
    fn load_invalid_file_falls_back_to_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[links\ntarget = 3").unwrap();
        assert_eq!(Config::load(file.path()), Config::default());
    }

    #[test]
    fn load_missing_file() {
        let config = Config::load(Path::new("/nonexistent/htmlnode/config.toml"));
        assert_eq!(config, Config::default());
    }
}
