//! `.reqstatrc` handling: default arguments and named aliases.
//!
//! The file is INI-like:
//!
//! ```text
//! defaults = --stats -j 4
//!
//! [aliases]
//! weekly = --report weekly --results-dir /srv/reports
//! ```
//!
//! `defaults` is spliced in right after the program name, so anything the
//! user types afterwards overrides it. `-a NAME` expands to the alias value.

use anyhow::{anyhow, bail, Context, Result};
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_FILE_NAME: &str = ".reqstatrc";
const USER_DIR_NAME: &str = "reqstat";
const USER_FILE_NAME: &str = "config.ini";
const MAX_ALIAS_DEPTH: usize = 10;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub defaults: Option<String>,
    pub aliases: HashMap<String, String>,
}

impl ConfigFile {
    /// Walk up from the current directory looking for `.reqstatrc`
    pub fn find_project_config() -> Option<PathBuf> {
        let start = env::current_dir().ok()?;
        Self::find_project_config_from(&start)
    }

    pub fn find_project_config_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// User-level config locations, most preferred first
    pub fn user_config_paths() -> Vec<PathBuf> {
        let home = env::var_os("HOME").map(PathBuf::from);
        let mut paths = Vec::new();

        if let Some(xdg) = env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            paths.push(PathBuf::from(xdg).join(USER_DIR_NAME).join(USER_FILE_NAME));
        }
        if let Some(home) = &home {
            let fallback = home.join(".config").join(USER_DIR_NAME).join(USER_FILE_NAME);
            if !paths.contains(&fallback) {
                paths.push(fallback);
            }
            paths.push(home.join(PROJECT_FILE_NAME));
        }
        paths
    }

    /// Load the first existing user config, then overlay the project config
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::user_config_paths().into_iter().find(|p| p.is_file()) {
            config = config.merged_with(Self::load_from_path(&path)?);
        }
        if let Some(path) = Self::find_project_config() {
            config = config.merged_with(Self::load_from_path(&path)?);
        }

        Ok(config)
    }

    /// An explicit `--config-file` replaces the search entirely
    pub fn load_with_custom_path(custom_path: Option<&str>) -> Result<Self> {
        match custom_path {
            Some(path) => Self::load_from_path(Path::new(path)),
            None => Self::load(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content);
        tracing::debug!(
            path = %path.display(),
            aliases = config.aliases.len(),
            has_defaults = config.defaults.is_some(),
            "loaded config file"
        );
        Ok(config)
    }

    /// Parse the INI text. Unknown keys and sections are ignored.
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();
        let mut section = String::new();

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = name.trim().to_string();
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            match section.as_str() {
                "" if key == "defaults" => config.defaults = Some(value.to_string()),
                "aliases" => {
                    config.aliases.insert(key.to_string(), value.to_string());
                }
                _ => {}
            }
        }

        config
    }

    /// `overlay` wins for `defaults` and for aliases defined in both
    pub fn merged_with(mut self, overlay: Self) -> Self {
        if overlay.defaults.is_some() {
            self.defaults = overlay.defaults;
        }
        self.aliases.extend(overlay.aliases);
        self
    }

    /// Expand alias `name`, following nested `-a` references
    pub fn resolve_alias(&self, name: &str) -> Result<Vec<String>> {
        self.resolve_alias_inner(name, &mut HashSet::new(), 0)
    }

    fn resolve_alias_inner(
        &self,
        name: &str,
        active: &mut HashSet<String>,
        depth: usize,
    ) -> Result<Vec<String>> {
        if depth > MAX_ALIAS_DEPTH {
            bail!("Alias chain too deep: {} levels", depth);
        }
        if !active.insert(name.to_string()) {
            bail!("Circular alias reference: {}", name);
        }

        let value = self
            .aliases
            .get(name)
            .ok_or_else(|| anyhow!("Unknown alias: {}", name))?;
        let words = shell_words::split(value)
            .with_context(|| format!("Invalid alias '{}': failed to parse arguments", name))?;

        let expanded = Self::expand(words, |nested| {
            self.resolve_alias_inner(nested, active, depth + 1)
        })?;

        active.remove(name);
        Ok(expanded)
    }

    /// Replace every `-a NAME` / `--alias NAME` pair using `resolve`
    fn expand<F>(args: Vec<String>, mut resolve: F) -> Result<Vec<String>>
    where
        F: FnMut(&str) -> Result<Vec<String>>,
    {
        let mut out = Vec::with_capacity(args.len());
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            if arg == "-a" || arg == "--alias" {
                match args.next() {
                    Some(name) => out.extend(resolve(&name)?),
                    // Leave a dangling flag for clap to report
                    None => out.push(arg),
                }
            } else {
                out.push(arg);
            }
        }

        Ok(out)
    }

    /// Apply `defaults` after the program name, then expand aliases
    pub fn process_args(&self, args: Vec<String>) -> Result<Vec<String>> {
        let args = match &self.defaults {
            Some(defaults) if !args.is_empty() => {
                let default_args = shell_words::split(defaults)
                    .context("Invalid defaults: failed to parse arguments")?;
                let mut rest = args.into_iter();
                let mut combined: Vec<String> = rest.next().into_iter().collect();
                combined.extend(default_args);
                combined.extend(rest);
                combined
            }
            _ => args,
        };

        Self::expand(args, |name| self.resolve_alias(name))
    }

    /// Render the search locations and the merged settings for `--show-config`
    pub fn describe() -> String {
        let mut out = String::from(
            "Configuration precedence: CLI > project .reqstatrc > user config > defaults\n\n",
        );

        let project = Self::find_project_config();
        let user_paths = Self::user_config_paths();
        let user = user_paths.iter().find(|p| p.is_file());

        match Self::load() {
            Ok(config) => {
                if project.is_none() && user.is_none() {
                    out.push_str("No configuration files found. Using defaults.\n");
                } else {
                    out.push_str("Configuration loaded from:\n");
                    if let Some(path) = &project {
                        out.push_str(&format!("  Project: {}\n", path.display()));
                    }
                    if let Some(path) = user {
                        out.push_str(&format!("  User: {}\n", path.display()));
                    }
                }

                if let Some(defaults) = &config.defaults {
                    out.push_str(&format!("\nActive defaults:\n  defaults = {}\n", defaults));
                }
                if !config.aliases.is_empty() {
                    out.push_str("\nActive aliases:\n");
                    let mut aliases: Vec<_> = config.aliases.iter().collect();
                    aliases.sort();
                    for (name, value) in aliases {
                        out.push_str(&format!("  {} = {}\n", name, value));
                    }
                }
            }
            Err(e) => out.push_str(&format!("Error loading configuration: {:#}\n", e)),
        }

        out.push_str("\nConfiguration search locations (in precedence order):\n");
        match &project {
            Some(path) => out.push_str(&format!("  1. Project: {} (found)\n", path.display())),
            None => out.push_str("  1. Project: .reqstatrc (searched up directory tree, not found)\n"),
        }
        for (i, path) in user_paths.iter().enumerate() {
            let status = if path.is_file() { "found" } else { "not found" };
            out.push_str(&format!("  {}. User: {} ({})\n", i + 2, path.display(), status));
        }

        if project.is_none() && user.is_none() {
            out.push_str("\nExample configuration file (.reqstatrc):\n\n");
            out.push_str("defaults = --stats\n\n");
            out.push_str("[aliases]\n");
            out.push_str("weekly = --report weekly --results-dir reports\n");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn with_aliases(pairs: &[(&str, &str)]) -> ConfigFile {
        ConfigFile {
            defaults: None,
            aliases: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# reqstat settings").unwrap();
        writeln!(file, "defaults = --stats -j 4").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[aliases]").unwrap();
        writeln!(file, "weekly = --report 'weekly summary'").unwrap();
        writeln!(file, "[unknown]").unwrap();
        writeln!(file, "ignored = yes").unwrap();
        file.flush().unwrap();

        let config = ConfigFile::load_from_path(file.path()).unwrap();
        assert_eq!(config.defaults.as_deref(), Some("--stats -j 4"));
        assert_eq!(config.aliases.len(), 1);
        assert_eq!(
            config.aliases.get("weekly").map(String::as_str),
            Some("--report 'weekly summary'")
        );
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = ConfigFile::load_from_path(&dir.path().join("nope.ini")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_resolve_nested_alias() {
        let config = with_aliases(&[
            ("weekly", "--report weekly"),
            ("weekly-stats", "--stats -a weekly"),
        ]);
        assert_eq!(
            config.resolve_alias("weekly-stats").unwrap(),
            strings(&["--stats", "--report", "weekly"])
        );
    }

    #[test]
    fn test_circular_alias_detection() {
        let config = with_aliases(&[("one", "-a two"), ("two", "--alias one")]);
        let err = config.resolve_alias("one").unwrap_err();
        assert!(err.to_string().contains("Circular alias"));
    }

    #[test]
    fn test_unknown_alias() {
        let err = ConfigFile::default().resolve_alias("nope").unwrap_err();
        assert_eq!(err.to_string(), "Unknown alias: nope");
    }

    #[test]
    fn test_alias_used_twice_is_not_circular() {
        let config = with_aliases(&[("s", "--stats"), ("both", "-a s -a s")]);
        assert_eq!(
            config.resolve_alias("both").unwrap(),
            strings(&["--stats", "--stats"])
        );
    }

    #[test]
    fn test_process_args_defaults_then_aliases() {
        let mut config = with_aliases(&[("weekly", "--report weekly")]);
        config.defaults = Some("--stats -j 2".to_string());

        let processed = config
            .process_args(strings(&["reqstat", "-a", "weekly", "logs/", "-j", "8"]))
            .unwrap();
        assert_eq!(
            processed,
            strings(&["reqstat", "--stats", "-j", "2", "--report", "weekly", "logs/", "-j", "8"])
        );
    }

    #[test]
    fn test_process_args_without_config_is_identity() {
        let args = strings(&["reqstat", "a.log", "-a"]);
        assert_eq!(ConfigFile::default().process_args(args.clone()).unwrap(), args);
    }

    #[test]
    fn test_merge_overlay_wins() {
        let user = ConfigFile {
            defaults: Some("--stats".to_string()),
            ..with_aliases(&[("shared", "--user"), ("mine", "--mine")])
        };
        let project = with_aliases(&[("shared", "--project")]);

        let merged = user.merged_with(project);
        assert_eq!(merged.defaults.as_deref(), Some("--stats"));
        assert_eq!(merged.aliases["shared"], "--project");
        assert_eq!(merged.aliases["mine"], "--mine");
    }

    #[test]
    fn test_project_config_found_in_ancestor() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let nested = root.join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        let rc = root.join(PROJECT_FILE_NAME);
        fs::write(&rc, "defaults = --stats\n").unwrap();

        assert_eq!(ConfigFile::find_project_config_from(&nested), Some(rc));
    }

    #[test]
    fn test_user_config_paths_names() {
        for path in ConfigFile::user_config_paths() {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name == USER_FILE_NAME || name == PROJECT_FILE_NAME, "{}", name);
        }
    }
}
