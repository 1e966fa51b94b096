//! Site configuration (site.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Result;

/// Site-wide settings the pipeline needs; everything else about the site
/// lives with the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    /// Default attribution for posts without an `author` field
    pub author: String,
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: "Shashikant Kataria".to_string(),
            url: "http://example.com".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "My Blog");
        assert!(!config.author.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Field Notes
author: Test User
url: https://blog.example.com
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Field Notes");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.url, "https://blog.example.com");
        // Unset fields keep their defaults
        assert_eq!(config.description, "");
    }
}
