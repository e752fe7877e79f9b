//! Validation report generation
//!
//! Renders the result of checking a batch of binding strings as TXT or JSON.

use control_binding::{BindingError, ControlBinding};
use serde::Serialize;

/// Outcome of checking one binding string
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub results: Vec<CheckResult>,
}

impl CheckReport {
    /// Check every input string
    pub fn check<'a>(inputs: impl IntoIterator<Item = &'a str>) -> Self {
        let results = inputs
            .into_iter()
            .map(|input| CheckResult::from_parse(input, ControlBinding::parse(input)))
            .collect();
        Self { results }
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            match (&result.canonical, &result.error) {
                (Some(canonical), _) => out.push_str(&format!("✓ {}\n", canonical)),
                (None, Some(error)) => out.push_str(&format!("✗ {}\n", error)),
                (None, None) => {}
            }
        }
        out.push_str(&format!(
            "\n{} checked, {} malformed\n",
            self.results.len(),
            self.failures()
        ));
        out
    }
}

impl CheckResult {
    fn from_parse(input: &str, parsed: Result<ControlBinding, BindingError>) -> Self {
        match parsed {
            Ok(binding) => Self {
                input: input.to_string(),
                canonical: Some(control_binding::codec::render_binding(&binding)),
                error: None,
            },
            Err(e) => Self {
                input: input.to_string(),
                canonical: None,
                error: Some(e.to_string()),
            },
        }
    }
}
