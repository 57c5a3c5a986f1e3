//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Export target understood by auto-editor's `--export` flag.
///
/// The set is closed. Names that don't match any variant parse to
/// [`ExportFormat::Mp4`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Adobe Premiere Pro XML.
    Premiere,
    /// DaVinci Resolve, FCP7 flavored XML.
    #[serde(rename = "resolve-fcp7")]
    ResolveFcp7,
    /// Final Cut Pro XML.
    FinalCutPro,
    /// DaVinci Resolve XML.
    Resolve,
    /// Shotcut MLT project.
    Shotcut,
    /// auto-editor JSON timeline.
    Json,
    /// Plain text timeline.
    Timeline,
    /// Audio only render.
    Audio,
    /// One file per kept clip.
    ClipSequence,
    /// Rendered video.
    #[default]
    Mp4,
}

impl ExportFormat {
    /// Every format, in the order the format picker shows them.
    pub const ALL: [ExportFormat; 10] = [
        ExportFormat::Premiere,
        ExportFormat::ResolveFcp7,
        ExportFormat::FinalCutPro,
        ExportFormat::Resolve,
        ExportFormat::Shotcut,
        ExportFormat::Json,
        ExportFormat::Timeline,
        ExportFormat::Audio,
        ExportFormat::ClipSequence,
        ExportFormat::Mp4,
    ];

    /// Parse a format name. Unknown names fall back to `Mp4`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    /// Value passed after `--export`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Premiere => "premiere",
            ExportFormat::ResolveFcp7 => "resolve-fcp7",
            ExportFormat::FinalCutPro => "final-cut-pro",
            ExportFormat::Resolve => "resolve",
            ExportFormat::Shotcut => "shotcut",
            ExportFormat::Json => "json",
            ExportFormat::Timeline => "timeline",
            ExportFormat::Audio => "audio",
            ExportFormat::ClipSequence => "clip-sequence",
            ExportFormat::Mp4 => "mp4",
        }
    }

    /// Extension (with leading dot) of the file the tool writes.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Premiere
            | ExportFormat::ResolveFcp7
            | ExportFormat::FinalCutPro
            | ExportFormat::Resolve => ".xml",
            ExportFormat::Shotcut => ".mlt",
            ExportFormat::Json => ".json",
            ExportFormat::Timeline => ".timeline",
            ExportFormat::Audio => ".mp3",
            ExportFormat::ClipSequence => ".clip-sequence",
            ExportFormat::Mp4 => ".mp4",
        }
    }

    /// Human readable label for pickers.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Premiere => "Premiere Pro XML",
            ExportFormat::ResolveFcp7 => "Resolve FCP7 XML",
            ExportFormat::FinalCutPro => "Final Cut Pro XML",
            ExportFormat::Resolve => "DaVinci Resolve XML",
            ExportFormat::Shotcut => "Shotcut MLT",
            ExportFormat::Json => "Auto-Editor JSON",
            ExportFormat::Timeline => "Timeline",
            ExportFormat::Audio => "Audio Only",
            ExportFormat::ClipSequence => "Clip Sequence",
            ExportFormat::Mp4 => "MP4 Video",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of alert shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    InProgress,
    Success,
    Error,
}

impl AlertKind {
    /// Title shown next to the alert icon.
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::InProgress => "Processing...",
            AlertKind::Success => "Success!",
            AlertKind::Error => "Error!",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::InProgress => write!(f, "in-progress"),
            AlertKind::Success => write!(f, "success"),
            AlertKind::Error => write!(f, "error"),
        }
    }
}

/// Which pipe of the child process a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl std::fmt::Display for OutputStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStream::Stdout => write!(f, "stdout"),
            OutputStream::Stderr => write!(f, "stderr"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_name() {
        for format in ExportFormat::ALL {
            assert_eq!(ExportFormat::from_name(format.as_str()), format);
        }
    }

    #[test]
    fn unknown_name_falls_back_to_mp4() {
        assert_eq!(ExportFormat::from_name("unknown-format"), ExportFormat::Mp4);
        assert_eq!(ExportFormat::from_name(""), ExportFormat::Mp4);
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(ExportFormat::from_name(" Premiere "), ExportFormat::Premiere);
        assert_eq!(
            ExportFormat::from_name("FINAL-CUT-PRO"),
            ExportFormat::FinalCutPro
        );
    }

    #[test]
    fn xml_family_shares_extension() {
        for format in [
            ExportFormat::Premiere,
            ExportFormat::ResolveFcp7,
            ExportFormat::FinalCutPro,
            ExportFormat::Resolve,
        ] {
            assert_eq!(format.extension(), ".xml");
        }
        assert_eq!(ExportFormat::Shotcut.extension(), ".mlt");
        assert_eq!(ExportFormat::Audio.extension(), ".mp3");
        assert_eq!(ExportFormat::ClipSequence.extension(), ".clip-sequence");
    }

    #[test]
    fn serde_uses_tool_names() {
        let json = serde_json::to_string(&ExportFormat::ResolveFcp7).unwrap();
        assert_eq!(json, "\"resolve-fcp7\"");
        let parsed: ExportFormat = serde_json::from_str("\"clip-sequence\"").unwrap();
        assert_eq!(parsed, ExportFormat::ClipSequence);
    }

    #[test]
    fn alert_titles() {
        assert_eq!(AlertKind::InProgress.title(), "Processing...");
        assert_eq!(AlertKind::Success.title(), "Success!");
        assert_eq!(AlertKind::Error.title(), "Error!");
    }
}
