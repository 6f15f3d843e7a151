//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! information to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use std::path::Path;
use tabled::{Table, Tabled};

use crate::framework::{Diagnostics, Severity, Value};
use crate::models::OrganizationModel;
use crate::planner::KNOWN_AFTER_APPLY;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Organization row for table display.
#[derive(Tabled)]
struct OrganizationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Domains")]
    domains: String,
    #[tabled(rename = "Outside Profiles")]
    allow_profiles: String,
    #[tabled(rename = "Updated")]
    updated_at: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a list of organizations.
    #[must_use]
    pub fn format_organizations(&self, organizations: &[OrganizationModel]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(organizations).unwrap_or_default(),
            OutputFormat::Text => {
                if organizations.is_empty() {
                    return String::from("   No organizations found.\n");
                }

                let rows: Vec<OrganizationRow> = organizations
                    .iter()
                    .map(|o| OrganizationRow {
                        id: display(&o.id),
                        name: Self::truncate(&display(&o.name), 30),
                        domains: Self::truncate(&o.domain_names().join(", "), 40),
                        allow_profiles: display_bool(&o.allow_profiles_outside_organization),
                        updated_at: display(&o.updated_at),
                    })
                    .collect();

                let mut output = Table::new(rows).to_string();
                let _ = write!(output, "\n\n{} organizations\n", organizations.len());
                output
            }
        }
    }

    /// Formats a single organization.
    #[must_use]
    pub fn format_organization(&self, organization: &OrganizationModel) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(organization).unwrap_or_default(),
            OutputFormat::Text => {
                let mut output = String::new();
                let _ = write!(output, "\nOrganization: {}\n\n", display(&organization.name).bold());
                let _ = writeln!(output, "   ID: {}", display(&organization.id));
                let _ = writeln!(
                    output,
                    "   Allow profiles outside organization: {}",
                    display_bool(&organization.allow_profiles_outside_organization)
                );
                let _ = writeln!(output, "   Created: {}", display(&organization.created_at));
                let _ = writeln!(output, "   Updated: {}", display(&organization.updated_at));

                if organization.domains.is_empty() {
                    output.push_str("   Domains: none\n");
                } else {
                    output.push_str("   Domains:\n");
                    for domain in &organization.domains {
                        let _ = writeln!(
                            output,
                            "     - {} ({})",
                            display(&domain.domain),
                            display(&domain.id).dimmed()
                        );
                    }
                }

                output
            }
        }
    }

    /// Formats diagnostics.
    #[must_use]
    pub fn format_diagnostics(&self, diagnostics: &Diagnostics) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(diagnostics).unwrap_or_default(),
            OutputFormat::Text => {
                let mut output = String::new();
                for diagnostic in diagnostics {
                    let level = match diagnostic.severity {
                        Severity::Error => "Error:".red().bold(),
                        Severity::Warning => "Warning:".yellow().bold(),
                    };
                    let _ = write!(output, "{level} {}", diagnostic.summary);
                    if let Some(attribute) = &diagnostic.attribute {
                        let _ = write!(output, " (at {})", attribute.cyan());
                    }
                    output.push('\n');
                    if !diagnostic.detail.is_empty() {
                        let _ = writeln!(output, "   {}", diagnostic.detail);
                    }
                }
                output
            }
        }
    }

    /// Formats a successful validation.
    #[must_use]
    pub fn format_validation(&self, endpoint: &str, source: Option<&Path>) -> String {
        let source = source.map_or_else(|| String::from("environment"), |p| p.display().to_string());
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "status": "valid",
                    "endpoint": endpoint,
                    "source": source,
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => format!(
                "{} Configuration is valid\n   Endpoint: {endpoint}\n   Source: {source}\n",
                "✓".green()
            ),
        }
    }

    /// Truncates a string to a maximum number of characters.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
            format!("{kept}...")
        }
    }
}

fn display(value: &Value<String>) -> String {
    match value {
        Value::Known(v) => v.clone(),
        Value::Unknown => KNOWN_AFTER_APPLY.to_string(),
        Value::Null => String::from("-"),
    }
}

fn display_bool(value: &Value<bool>) -> String {
    match value {
        Value::Known(true) => "yes".green().to_string(),
        Value::Known(false) => String::from("no"),
        Value::Unknown => KNOWN_AFTER_APPLY.to_string(),
        Value::Null => String::from("-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Diagnostic;
    use crate::models::DomainModel;

    fn organization() -> OrganizationModel {
        OrganizationModel {
            id: Value::known(String::from("org_1")),
            name: Value::known(String::from("Acme")),
            allow_profiles_outside_organization: Value::known(false),
            domains: vec![DomainModel {
                id: Value::known(String::from("d1")),
                domain: Value::known(String::from("acme.com")),
            }],
            created_at: Value::known(String::from("t0")),
            updated_at: Value::known(String::from("t1")),
        }
    }

    #[test]
    fn test_organizations_table() {
        colored::control::set_override(false);
        let output = OutputFormatter::new(OutputFormat::Text).format_organizations(&[organization()]);
        assert!(output.contains("org_1"));
        assert!(output.contains("acme.com"));
        assert!(output.contains("1 organizations"));
    }

    #[test]
    fn test_organization_json() {
        let output = OutputFormatter::new(OutputFormat::Json).format_organization(&organization());
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["domains"][0]["domain"], "acme.com");
    }

    #[test]
    fn test_diagnostics_text() {
        colored::control::set_override(false);
        let diagnostics: Diagnostics = Diagnostic::error("Missing WorkOS API Secret Key", "set it")
            .with_attribute("api_key")
            .into();
        let output = OutputFormatter::new(OutputFormat::Text).format_diagnostics(&diagnostics);
        assert_eq!(output, "Error: Missing WorkOS API Secret Key (at api_key)\n   set it\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(OutputFormatter::truncate("short", 10), "short");
        assert_eq!(OutputFormatter::truncate("a-very-long-name", 8), "a-ver...");
    }
}
