//! A fully built auto-editor command.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::ExportFormat;

/// Ordered argument vector for one export, plus where its result lands.
///
/// The first token is the program. Tokens are handed to the OS one by one and
/// never joined into a shell string for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInvocation {
    tokens: Vec<String>,
    format: ExportFormat,
    output_path: PathBuf,
    output_directory: PathBuf,
}

impl CommandInvocation {
    pub(crate) fn new(
        tokens: Vec<String>,
        format: ExportFormat,
        output_path: PathBuf,
        output_directory: PathBuf,
    ) -> Self {
        debug_assert!(!tokens.is_empty(), "invocation needs a program token");
        Self {
            tokens,
            format,
            output_path,
            output_directory,
        }
    }

    /// Program to launch.
    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    /// Arguments after the program.
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    /// The whole argument vector, program first.
    pub fn argv(&self) -> &[String] {
        &self.tokens
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// File the tool is told to write.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Folder that must exist before launching.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// One-line rendering for display and logs. Display only; never executed.
    pub fn preview(&self) -> String {
        self.tokens
            .iter()
            .map(|token| quote_for_display(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.preview())
    }
}

fn quote_for_display(token: &str) -> String {
    // Backslashes are left alone so Windows paths stay readable.
    let needs_quotes = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '$' | '`'));
    if !needs_quotes {
        return token.to_string();
    }
    format!("\"{}\"", token.replace('"', "\\\""))
}

/// Format tokens for pretty display (one option per line).
pub fn format_tokens_pretty(tokens: &[String]) -> String {
    let mut result = String::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = quote_for_display(&tokens[i]);

        let has_value = tokens[i].starts_with("--")
            && i + 1 < tokens.len()
            && !tokens[i + 1].starts_with("--");

        if has_value {
            let value = quote_for_display(&tokens[i + 1]);
            result.push_str(&format!("  {} {} \\\n", token, value));
            i += 2;
        } else if i == 0 {
            result.push_str(&format!("{} \\\n", token));
            i += 1;
        } else {
            result.push_str(&format!("  {} \\\n", token));
            i += 1;
        }
    }

    if result.ends_with(" \\\n") {
        result.truncate(result.len() - 3);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn invocation(list: &[&str]) -> CommandInvocation {
        CommandInvocation::new(
            tokens(list),
            ExportFormat::Premiere,
            PathBuf::from("/out/a.xml"),
            PathBuf::from("/out"),
        )
    }

    #[test]
    fn splits_program_and_args() {
        let inv = invocation(&["auto-editor", "in.mp4", "--export", "premiere"]);
        assert_eq!(inv.program(), "auto-editor");
        assert_eq!(inv.args(), &tokens(&["in.mp4", "--export", "premiere"])[..]);
        assert_eq!(inv.argv().len(), 4);
    }

    #[test]
    fn preview_quotes_paths_with_spaces() {
        let inv = invocation(&["auto-editor", "/videos/a b.mp4", "--margin", "0s"]);
        assert_eq!(inv.preview(), "auto-editor \"/videos/a b.mp4\" --margin 0s");
    }

    #[test]
    fn preview_escapes_embedded_quotes() {
        let inv = invocation(&["auto-editor", "say \"hi\".mp4"]);
        assert_eq!(inv.preview(), "auto-editor \"say \\\"hi\\\".mp4\"");
    }

    #[test]
    fn preview_keeps_windows_paths_readable() {
        let inv = invocation(&["auto-editor", "C:\\Videos\\clip.mp4"]);
        assert_eq!(inv.preview(), "auto-editor C:\\Videos\\clip.mp4");
    }

    #[test]
    fn pretty_format_pairs_options_with_values() {
        let pretty = format_tokens_pretty(&tokens(&[
            "auto-editor",
            "in.mp4",
            "--export",
            "premiere",
            "--output",
            "/out/in.xml",
        ]));
        let lines: Vec<&str> = pretty.lines().collect();
        assert_eq!(lines[0], "auto-editor \\");
        assert_eq!(lines[1], "  in.mp4 \\");
        assert_eq!(lines[2], "  --export premiere \\");
        assert_eq!(lines[3], "  --output /out/in.xml");
    }
}
