//! Render settings and the TOML config file.

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Colour roles understood without configuration, rendered with `\textcolor`.
pub const COLOR_ROLES: &[&str] = &["red", "green", "blue", "cyan", "magenta", "yellow", "gray"];

/// Settings passed into every render.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Trace every rendered node.
    pub verbose: bool,
    /// Do not log diagnostics (they are still collected).
    pub quiet: bool,
    /// Extra roles: role name -> macro name (without backslash).
    pub roles: BTreeMap<String, String>,
}

impl RenderConfig {
    /// Wrap `text` in the macro registered for `role`.
    ///
    /// Configured roles shadow the built-in colour roles. Returns `None` for
    /// a role with no rule.
    pub fn apply_role(&self, role: &str, text: &str) -> Option<String> {
        if let Some(command) = self.roles.get(role) {
            return Some(format!("\\{}{{{}}}", command, text));
        }
        if COLOR_ROLES.contains(&role) {
            return Some(format!("\\textcolor{{{}}}{{{}}}", role, text));
        }
        None
    }
}

/// Paths of the three static fragments. Unset entries use built-in text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FragmentPaths {
    pub preamble: Option<PathBuf>,
    pub macros: Option<PathBuf>,
    pub user_macros: Option<PathBuf>,
}

impl FragmentPaths {
    /// Resolve relative paths against `base`.
    pub fn relative_to(self, base: &Path) -> Self {
        let join = |p: Option<PathBuf>| {
            p.map(|p| if p.is_relative() { base.join(p) } else { p })
        };
        Self {
            preamble: join(self.preamble),
            macros: join(self.macros),
            user_macros: join(self.user_macros),
        }
    }
}

/// Contents of a `tex-converter.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
    #[serde(default)]
    pub fragments: FragmentPaths,
    #[serde(default)]
    pub roles: BTreeMap<String, String>,
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input).map_err(ConfigError::Toml)?)
    }

    /// Read a config file. Fragment paths become relative to its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config = Self::from_toml(&text)?;
        if let Some(dir) = path.parent() {
            config.fragments = config.fragments.relative_to(dir);
        }
        Ok(config)
    }

    /// The render settings part of this config.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            verbose: self.verbose,
            quiet: self.quiet,
            roles: self.roles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_config() {
        let input = r#"
verbose = true

[fragments]
preamble = "preamble.tex"

[roles]
highlight = "hl"
"#;
        let config = Config::from_toml(input).unwrap();
        assert!(config.verbose);
        assert!(!config.quiet);
        assert_eq!(config.fragments.preamble, Some(PathBuf::from("preamble.tex")));
        assert_eq!(config.fragments.macros, None);
        assert_eq!(config.roles.get("highlight").map(String::as_str), Some("hl"));
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("verbose = \"yes\"").is_err());
    }

    #[test]
    fn test_relative_fragment_paths() {
        let paths = FragmentPaths {
            preamble: Some(PathBuf::from("preamble.tex")),
            macros: Some(PathBuf::from("/abs/macros.tex")),
            user_macros: None,
        };
        let resolved = paths.relative_to(Path::new("/project"));
        assert_eq!(resolved.preamble, Some(PathBuf::from("/project/preamble.tex")));
        assert_eq!(resolved.macros, Some(PathBuf::from("/abs/macros.tex")));
        assert_eq!(resolved.user_macros, None);
    }

    #[test]
    fn test_apply_role() {
        let mut config = RenderConfig::default();
        assert_eq!(
            config.apply_role("red", "hot").as_deref(),
            Some("\\textcolor{red}{hot}")
        );
        assert_eq!(config.apply_role("sparkle", "wow"), None);

        config.roles.insert("red".to_string(), "alert".to_string());
        assert_eq!(config.apply_role("red", "hot").as_deref(), Some("\\alert{hot}"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex-converter.toml");
        std::fs::write(&path, "quiet = true\n[fragments]\nmacros = \"macros.tex\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.render_config().quiet);
        assert_eq!(config.fragments.macros, Some(dir.path().join("macros.tex")));
    }
}
