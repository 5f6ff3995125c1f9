//! Wiki Markup Helpers

use std::fmt;

/// Upper-case the first character and lower-case the rest.
///
/// `"IRON SWORD"` and `"iron sword"` both become `"Iron sword"`.
pub fn sentence_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Escape localized body text for wiki output.
pub fn format_body(body: &str) -> String {
    body.replace("$playerName", "[PLAYER]").replace("\\n", "<br>")
}

// ============================================================================
// Template
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Param {
    Positional(String),
    Named(String, String),
}

/// A wiki template call such as `{{shop|Iron sword|120}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    params: Vec<Param>,
    assignment: &'static str,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            assignment: "=",
        }
    }

    /// Append a positional parameter.
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.params.push(Param::Positional(value.to_string()));
        self
    }

    /// Append a `key=value` parameter.
    pub fn named(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push(Param::Named(key.into(), value.to_string()));
        self
    }

    /// Render named parameters as `key = value`.
    pub fn spaced_assignments(mut self) -> Self {
        self.assignment = " = ";
        self
    }

    /// Single-line form: `{{name|a|b|key=value}}`.
    pub fn render(&self) -> String {
        let mut out = format!("{{{{{}", self.name);
        for param in &self.params {
            out.push('|');
            self.push_param(&mut out, param);
        }
        out.push_str("}}");
        out
    }

    /// Block form: the first `inline` parameters share the opening line,
    /// every later one starts a new line, and the call closes with ` }}`.
    pub fn render_block(&self, inline: usize) -> String {
        let mut out = format!("{{{{{}", self.name);
        for (i, param) in self.params.iter().enumerate() {
            if i >= inline {
                out.push('\n');
            }
            out.push('|');
            self.push_param(&mut out, param);
        }
        out.push_str(" }}");
        out
    }

    fn push_param(&self, out: &mut String, param: &Param) {
        match param {
            Param::Positional(value) => out.push_str(value),
            Param::Named(key, value) => {
                out.push_str(key);
                out.push_str(self.assignment);
                out.push_str(value);
            }
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
