use crate::models::FlaggedEvent;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const RULE_LINE_WIDTH: usize = 40;

/// Output handler for suspicious login reports
pub struct OutputHandler {
    format: OutputFormat,
    writer: Option<Box<dyn Write + Send>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
    Jsonl,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            "jsonl" => OutputFormat::Jsonl,
            _ => OutputFormat::Text, // Default
        }
    }

    /// Whether stdout may be shared with progress messages
    pub fn is_human_readable(&self) -> bool {
        matches!(self, OutputFormat::Text)
    }
}

impl OutputHandler {
    /// Create a new output handler, appending to `file_path` or writing to stdout
    pub fn new(format: OutputFormat, file_path: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let writer: Option<Box<dyn Write + Send>> = match file_path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                Some(Box::new(BufWriter::new(file)))
            }
            None => None,
        };

        Ok(OutputHandler { format, writer })
    }

    /// Write the report for a whole detection run
    pub fn write_report(&mut self, events: &[FlaggedEvent]) -> Result<(), Box<dyn std::error::Error>> {
        let output = match &self.format {
            OutputFormat::Text => render_text_report(events),
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(events)?),
            OutputFormat::Jsonl => {
                let mut output = String::new();
                for event in events {
                    output.push_str(&serde_json::to_string(event)?);
                    output.push('\n');
                }
                output
            }
        };
        self.write_output(&output)
    }

    fn write_output(&mut self, data: &str) -> Result<(), Box<dyn std::error::Error>> {
        match &mut self.writer {
            Some(writer) => {
                writer.write_all(data.as_bytes())?;
                writer.flush()?;
            }
            None => {
                let mut stdout = std::io::stdout();
                stdout.write_all(data.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(writer) = &mut self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Render the human-readable report
pub fn render_text_report(events: &[FlaggedEvent]) -> String {
    if events.is_empty() {
        return "No suspicious login events detected.\n".to_string();
    }

    let rule = "-".repeat(RULE_LINE_WIDTH);
    let mut output = String::new();
    output.push_str("Suspicious Login Events Report\n");
    output.push_str(&rule);
    output.push('\n');

    for event in events {
        output.push_str(&format!("Login ID: {}\n", event.login_id));
        output.push_str(&format!("User ID : {}\n", event.user_id));
        output.push_str(&format!("Country : {}\n", event.country));
        output.push_str(&format!("Time    : {}\n", event.timestamp));
        output.push_str("Reasons :\n");
        for reason in &event.reasons {
            output.push_str(&format!("  - {}\n", reason));
        }
        output.push_str(&rule);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_flagged(id: &str, reasons: &[&str]) -> FlaggedEvent {
        FlaggedEvent {
            login_id: id.to_string(),
            user_id: "alice".to_string(),
            country: "FR".to_string(),
            timestamp: "2025-01-01 03:00:00".to_string(),
            reasons: reasons.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("jsonl"), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("xml"), OutputFormat::Text);
    }

    #[test]
    fn test_only_text_is_human_readable() {
        assert!(OutputFormat::Text.is_human_readable());
        assert!(!OutputFormat::Json.is_human_readable());
        assert!(!OutputFormat::Jsonl.is_human_readable());
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render_text_report(&[]), "No suspicious login events detected.\n");
    }

    #[test]
    fn test_text_report_layout() {
        let events = vec![create_flagged("2", &["first", "second"])];
        let rule = "-".repeat(40);
        let expected = format!(
            "Suspicious Login Events Report\n{rule}\n\
             Login ID: 2\n\
             User ID : alice\n\
             Country : FR\n\
             Time    : 2025-01-01 03:00:00\n\
             Reasons :\n  - first\n  - second\n{rule}\n"
        );
        assert_eq!(render_text_report(&events), expected);
    }

    #[test]
    fn test_jsonl_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.jsonl");

        let mut handler = OutputHandler::new(OutputFormat::Jsonl, Some(path.clone())).unwrap();
        handler
            .write_report(&[create_flagged("1", &["a"]), create_flagged("2", &["b"])])
            .unwrap();
        handler.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: FlaggedEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.login_id, "2");
        assert_eq!(parsed.reasons, vec!["b"]);
    }

    #[test]
    fn test_json_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut handler = OutputHandler::new(OutputFormat::Json, Some(path.clone())).unwrap();
        handler.write_report(&[create_flagged("9", &["x"])]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<FlaggedEvent> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, vec![create_flagged("9", &["x"])]);
    }
}
