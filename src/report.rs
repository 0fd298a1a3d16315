use std::io::{self, Write};

use serde::Serialize;

const RULE_WIDTH: usize = 60;

/// A rendered-format-agnostic report: inspection logic builds one of these
/// and never prints; the renderers below turn it into text or JSON.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub struct Section {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// A title framed by `=` rules, the tool's page-header style.
    pub fn banner(&mut self, title: impl Into<String>) -> &mut Section {
        let rule = "=".repeat(RULE_WIDTH);
        let section = self.plain();
        section.line(rule.clone());
        section.line(title);
        section.line(rule);
        section
    }

    pub fn section(&mut self, title: impl Into<String>) -> &mut Section {
        self.sections.push(Section {
            title: Some(title.into()),
            lines: Vec::new(),
        });
        self.sections.last_mut().unwrap()
    }

    pub fn plain(&mut self) -> &mut Section {
        self.sections.push(Section {
            title: None,
            lines: Vec::new(),
        });
        self.sections.last_mut().unwrap()
    }

    /// Render as plain text, one blank line between sections.
    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            if let Some(title) = &section.title {
                writeln!(out, "{}", title)?;
            }
            for line in &section.lines {
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }

    /// Render the structured value itself, for the `--json-pretty` flag.
    pub fn render_json(&self, out: &mut dyn Write) -> io::Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        writeln!(out, "{}", text)
    }

    /// All lines flattened, for assertions in tests.
    pub fn flattened(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.title.iter().chain(s.lines.iter()))
            .map(String::as_str)
            .collect()
    }

    pub fn contains_line(&self, needle: &str) -> bool {
        self.flattened().iter().any(|l| l.contains(needle))
    }
}

impl Section {
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    pub fn field(&mut self, label: &str, value: impl std::fmt::Display) -> &mut Self {
        self.lines.push(format!("{}: {}", label, value));
        self
    }
}
