use merger_core::{AlertSeverity, AppViewModel, FileRowView, DEFAULT_OUTPUT_NAME};

use super::constants::*;

/// Draws the whole screen from the view model; nothing is incremental.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![TITLE.to_string(), RULE.to_string()];

    if let Some(alert) = &view.alert {
        lines.push(format!("[{}] {}", severity_tag(alert.severity), alert.message));
    }

    if view.upload_section_visible {
        lines.push(UPLOAD_PROMPT.to_string());
    }

    if view.files_section_visible {
        lines.push(format!("Files ({})", view.file_count_label));
        lines.extend(view.files.iter().map(file_row));
        match view.hint {
            Some(hint) => lines.push(hint.to_string()),
            None => {
                lines.push(output_name_line(&view.output_name_input));
                let merge = if view.merge_enabled { "[merge]" } else { "(merge)" };
                let clear = if view.loading { "(clear)" } else { "[clear]" };
                lines.push(format!("{merge} {clear}"));
            }
        }
    }

    if view.uploads_in_flight > 0 {
        lines.push(format!("Uploading {}...", view.uploads_in_flight));
    }

    if view.loading {
        lines.push(LOADING_TEXT.to_string());
    }

    if let Some(result) = &view.result {
        lines.push(format!("✓ {}", result.message));
        lines.push(format!("Saved as {}", result.file_name));
        lines.push("[download] [new]".to_string());
    }

    if view.confirm_clear_prompt {
        lines.push(CONFIRM_CLEAR.to_string());
    }

    lines
}

pub fn help() -> Vec<String> {
    HELP.iter().map(|line| line.to_string()).collect()
}

fn file_row(row: &FileRowView) -> String {
    let marker = if row.is_dragging {
        '*'
    } else if row.is_drop_target {
        '>'
    } else {
        ' '
    };
    format!("{marker}{:>3}. {}", row.position_label, row.display_name)
}

fn output_name_line(input: &str) -> String {
    if input.trim().is_empty() {
        format!("Output name: ({DEFAULT_OUTPUT_NAME})")
    } else {
        format!("Output name: {input}")
    }
}

fn severity_tag(severity: AlertSeverity) -> &'static str {
    match severity {
        AlertSeverity::Info => "info",
        AlertSeverity::Success => "ok",
        AlertSeverity::Warning => "warn",
        AlertSeverity::Error => "error",
    }
}
