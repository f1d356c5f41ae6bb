use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// All settings that can be placed in a .git-bugtrail.yml config file.
/// Every field is optional — omitted fields fall back to CLI defaults.
/// CLI flags always take precedence over values set here.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BugtrailConfig {
    /// Issue label that marks bug reports (default: "bug").
    pub bug_label: Option<String>,
    /// Tracker-side project slug, e.g. "owner/repo".
    pub project: Option<String>,
    /// Directory holding per-project issue-event snapshots.
    pub cache_dir: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
}

impl BugtrailConfig {
    /// Validates semantic constraints that serde cannot enforce.
    ///
    /// Returns a human-readable error describing exactly what is wrong and
    /// what values are accepted. Called automatically by [`load_config`].
    pub fn validate(&self) -> Result<()> {
        if let Some(fmt) = &self.format {
            match fmt.as_str() {
                "terminal" | "json" => {}
                other => {
                    return Err(Error::Config(format!(
                        "Invalid 'format' value: \"{other}\". \
                         Expected one of: \"terminal\", \"json\""
                    )))
                }
            }
        }

        if let Some(label) = &self.bug_label {
            if label.trim().is_empty() {
                return Err(Error::Config(
                    "Invalid 'bug_label' value: must not be empty \
                     (omit the field to use the default \"bug\")"
                        .to_string(),
                ));
            }
        }

        if let Some(project) = &self.project {
            if project.trim().is_empty() {
                return Err(Error::Config(
                    "Invalid 'project' value: must not be empty \
                     (use e.g. \"owner/repo\")"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Reads, parses, and validates a YAML config file from `path`.
pub fn load_config(path: &Path) -> Result<BugtrailConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read config file '{}': {e}", path.display())))?;
    let cfg: BugtrailConfig = serde_yaml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config file '{}': {e}", path.display())))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Annotated YAML template — printed by `--generate-config`.
pub static TEMPLATE: &str = r#"# git-bugtrail configuration file
# Generated by: git-bugtrail --generate-config
#
# All settings are optional. Omit any field to use the built-in default.
# CLI flags always take precedence over values in this file.
# Save this file as .git-bugtrail.yml in your repository root, then run:
#
#   git-bugtrail --config .git-bugtrail.yml [path]

# ── Issue tracking ─────────────────────────────────────────────────────────────

# Tracker-side project slug used to locate the issue-event snapshot.
# project: "owner/repo"

# Issue label that marks an issue as a bug report.
# bug_label: "bug"

# Directory holding per-project issue-event snapshots
# (<project>_issue_events.json). Defaults to the platform cache directory.
# cache_dir: "~/.cache/git-bugtrail"

# ── Output ─────────────────────────────────────────────────────────────────────

# Output format: terminal, json
# format: "terminal"

# Output file path (json only; terminal always prints).
# output: "bugs.json"
"#;

/// Prints the config template to stdout, or writes it to `output_path` if given.
pub fn print_template(output_path: Option<&Path>) -> Result<()> {
    match output_path {
        Some(path) => std::fs::write(path, TEMPLATE).map_err(|e| {
            Error::Config(format!(
                "Cannot write config template to '{}': {e}",
                path.display()
            ))
        }),
        None => {
            print!("{TEMPLATE}");
            Ok(())
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_is_valid_yaml() {
        let result: std::result::Result<BugtrailConfig, _> = serde_yaml::from_str(TEMPLATE);
        let cfg = result.expect("TEMPLATE must parse as valid BugtrailConfig");
        // All fields are commented out in the template
        assert!(cfg.bug_label.is_none());
        assert!(cfg.project.is_none());
        assert!(cfg.cache_dir.is_none());
        assert!(cfg.format.is_none());
        assert!(cfg.output.is_none());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: std::result::Result<BugtrailConfig, _> =
            serde_yaml::from_str("bug_labell: \"typo\"");
        assert!(result.is_err(), "deny_unknown_fields must catch typos");
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let cfg = BugtrailConfig {
            format: Some("html".to_string()),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_label() {
        let cfg = BugtrailConfig {
            bug_label: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_valid_config_passes() {
        let cfg: BugtrailConfig = serde_yaml::from_str(
            "project: \"owner/repo\"\nbug_label: \"defect\"\nformat: \"json\"",
        )
        .expect("parse");
        cfg.validate().expect("valid config");
        assert_eq!(cfg.bug_label.as_deref(), Some("defect"));
    }
}
