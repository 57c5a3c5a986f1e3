//! auto-editor command builder.
//!
//! Turns [`ExportOptions`] into the argument vector auto-editor expects:
//!
//! ```text
//! <tool> <input> --export <format> --edit audio:<loudness>dB --margin <margin>s --output <file>
//! ```
//!
//! Building is total. Missing or malformed values are defaulted rather than
//! rejected; `ExportOptions::validate` is where an empty input is caught.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::config::ToolSettings;
use crate::models::ExportOptions;

use super::invocation::CommandInvocation;

/// Program used when the configured tool is blank.
pub const DEFAULT_TOOL: &str = "auto-editor";

/// File stem used when the input has no usable name.
const FALLBACK_STEM: &str = "output";

/// Builder for auto-editor command-line tokens.
pub struct CommandBuilder<'a> {
    options: &'a ExportOptions,
    tool: &'a ToolSettings,
}

impl<'a> CommandBuilder<'a> {
    /// Create a new builder.
    pub fn new(options: &'a ExportOptions, tool: &'a ToolSettings) -> Self {
        Self { options, tool }
    }

    /// Build the complete invocation.
    pub fn build(&self) -> CommandInvocation {
        let format = self.options.export_format;
        let output_path = output_file_path(
            &self.options.input_path,
            &self.options.output_directory,
            format.extension(),
        );

        let mut tokens = Vec::with_capacity(11 + self.tool.prefix_args.len());

        self.add_program(&mut tokens);

        // Input file, untouched
        tokens.push(self.options.input_path.to_string_lossy().to_string());

        tokens.push("--export".to_string());
        tokens.push(format.as_str().to_string());

        self.add_edit_options(&mut tokens);

        tokens.push("--output".to_string());
        tokens.push(output_path.to_string_lossy().to_string());

        tracing::debug!(
            "auto-editor command for {}: {} tokens, output {}",
            self.options.input_path.display(),
            tokens.len(),
            output_path.display()
        );

        CommandInvocation::new(
            tokens,
            format,
            output_path,
            self.options.output_directory.clone(),
        )
    }

    /// Program plus any fixed prefix (e.g. `python -m auto_editor`).
    fn add_program(&self, tokens: &mut Vec<String>) {
        tokens.push(self.tool.effective_program().to_string());
        tokens.extend(self.tool.prefix_args.iter().cloned());
    }

    /// Loudness and margin.
    fn add_edit_options(&self, tokens: &mut Vec<String>) {
        tokens.push("--edit".to_string());
        tokens.push(format!("audio:{}dB", self.options.effective_loudness()));

        tokens.push("--margin".to_string());
        tokens.push(format!("{}s", self.options.effective_margin()));
    }
}

/// Build an invocation for `options` with the given tool settings.
pub fn build(options: &ExportOptions, tool: &ToolSettings) -> CommandInvocation {
    CommandBuilder::new(options, tool).build()
}

/// Derive `<output_dir>/<input stem><extension>`.
///
/// Both `/` and `\` count as separators in the input so Windows paths resolve
/// the same way on every host. The join reuses the separator style already
/// present in `output_dir`.
pub fn output_file_path(input: &Path, output_dir: &Path, extension: &str) -> PathBuf {
    let input = input.to_string_lossy();
    let base = input.rsplit(['/', '\\']).next().unwrap_or_default();
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    let file_name = format!("{stem}{extension}");

    let dir = output_dir.to_string_lossy();
    if dir.is_empty() {
        return PathBuf::from(file_name);
    }

    let separator = separator_for(&dir);
    let trimmed = dir.trim_end_matches(['/', '\\']);
    PathBuf::from(format!("{trimmed}{separator}{file_name}"))
}

fn separator_for(dir: &str) -> char {
    match (dir.contains('\\'), dir.contains('/')) {
        (true, false) => '\\',
        (false, true) => '/',
        _ => MAIN_SEPARATOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExportFormat;

    fn tool() -> ToolSettings {
        ToolSettings::default()
    }

    fn premiere(input: &str, out: &str) -> ExportOptions {
        ExportOptions::new(input, out).with_format(ExportFormat::Premiere)
    }

    #[test]
    fn builds_full_grammar_in_order() {
        let options = premiere("/videos/talk.mp4", "/out")
            .with_loudness(-19.0)
            .with_margin(0.2);
        let inv = build(&options, &tool());

        assert_eq!(
            inv.argv(),
            &[
                "auto-editor",
                "/videos/talk.mp4",
                "--export",
                "premiere",
                "--edit",
                "audio:-19dB",
                "--margin",
                "0.2s",
                "--output",
                "/out/talk.xml",
            ]
        );
    }

    #[test]
    fn windows_paths_resolve_output_name() {
        let options = premiere("C:\\Videos\\a b.mp4", "C:\\out");
        let inv = build(&options, &tool());

        assert_eq!(inv.args().last().unwrap(), "C:\\out\\a b.xml");
        assert_eq!(inv.output_path(), Path::new("C:\\out\\a b.xml"));
    }

    #[test]
    fn input_with_spaces_and_quotes_is_one_untouched_token() {
        let tricky = "/media/my \"best\" clip's cut.mov";
        let inv = build(&premiere(tricky, "/out"), &tool());

        assert_eq!(inv.args()[0], tricky);
        assert_eq!(inv.argv().iter().filter(|t| t.as_str() == tricky).count(), 1);
        assert_eq!(
            inv.output_path(),
            Path::new("/out/my \"best\" clip's cut.xml")
        );
    }

    #[test]
    fn every_format_gets_its_extension() {
        for format in ExportFormat::ALL {
            let options = ExportOptions::new("/v/clip.mkv", "/out").with_format(format);
            let inv = build(&options, &tool());
            let expected = format!("/out/clip{}", format.extension());
            assert_eq!(inv.output_path(), Path::new(&expected));
            assert_eq!(inv.args()[2], format.as_str());
        }
    }

    #[test]
    fn unknown_format_name_builds_mp4() {
        let format = ExportFormat::from_name("unknown-format");
        let options = ExportOptions::new("/v/clip.mkv", "/out").with_format(format);
        let inv = build(&options, &tool());
        assert!(inv.output_path().to_string_lossy().ends_with(".mp4"));
    }

    #[test]
    fn building_twice_is_identical() {
        let options = premiere("/v/a.mp4", "/out").with_margin(1.5);
        assert_eq!(build(&options, &tool()), build(&options, &tool()));
    }

    #[test]
    fn malformed_numbers_are_defaulted() {
        let options = premiere("/v/a.mp4", "/out")
            .with_loudness(f64::NAN)
            .with_margin(-2.0);
        let inv = build(&options, &tool());
        assert!(inv.argv().contains(&"audio:-19dB".to_string()));
        assert!(inv.argv().contains(&"0s".to_string()));
    }

    #[test]
    fn prefix_args_follow_program() {
        let tool = ToolSettings {
            program: "python3".to_string(),
            prefix_args: vec!["-m".to_string(), "auto_editor".to_string()],
        };
        let inv = build(&premiere("/v/a.mp4", "/out"), &tool);
        assert_eq!(inv.program(), "python3");
        assert_eq!(&inv.args()[..3], &["-m", "auto_editor", "/v/a.mp4"]);
    }

    #[test]
    fn blank_program_uses_default_tool() {
        let tool = ToolSettings {
            program: "  ".to_string(),
            prefix_args: Vec::new(),
        };
        let inv = build(&premiere("/v/a.mp4", "/out"), &tool);
        assert_eq!(inv.program(), DEFAULT_TOOL);
    }

    #[test]
    fn output_name_handles_odd_inputs() {
        let ext = ".xml";
        assert_eq!(
            output_file_path(Path::new("/v/.hidden"), Path::new("/out"), ext),
            PathBuf::from("/out/.hidden.xml")
        );
        assert_eq!(
            output_file_path(Path::new("/v/archive.tar.gz"), Path::new("/out/"), ext),
            PathBuf::from("/out/archive.tar.xml")
        );
        assert_eq!(
            output_file_path(Path::new("/v/"), Path::new("/out"), ext),
            PathBuf::from("/out/output.xml")
        );
        assert_eq!(
            output_file_path(Path::new("clip.mp4"), Path::new(""), ext),
            PathBuf::from("clip.xml")
        );
    }
}
