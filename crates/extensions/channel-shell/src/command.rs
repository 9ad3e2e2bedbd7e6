//! `input` command lines.

use autotap_protocols::Point;

use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    Down,
    Move,
    Up,
}

impl MotionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionAction::Down => "DOWN",
            MotionAction::Move => "MOVE",
            MotionAction::Up => "UP",
        }
    }
}

/// One invocation run after the configured prefix.
#[derive(Debug, Clone, PartialEq)]
pub enum InputCommand {
    Motion { action: MotionAction, at: Point },
    Text(String),
    KeyEvent(i32),
    /// Liveness check.
    Echo,
}

impl InputCommand {
    /// Arguments following the prefix.
    ///
    /// Coordinates are rounded to whole pixels. Text is escaped for the
    /// remote shell that re-parses the line.
    pub fn args(&self) -> Result<Vec<String>, ShellError> {
        let args = match self {
            InputCommand::Motion { action, at } => vec![
                "input".to_string(),
                "motionevent".to_string(),
                action.as_str().to_string(),
                pixel(at.x)?,
                pixel(at.y)?,
            ],
            InputCommand::Text(text) => {
                if text.is_empty() {
                    return Err(ShellError::InvalidInput("empty text".to_string()));
                }
                if text.contains("%s") {
                    return Err(ShellError::InvalidInput(
                        "`input text` cannot type a literal %s".to_string(),
                    ));
                }
                vec!["input".to_string(), "text".to_string(), escape_text(text)]
            }
            InputCommand::KeyEvent(code) => vec![
                "input".to_string(),
                "keyevent".to_string(),
                code.to_string(),
            ],
            InputCommand::Echo => vec!["echo".to_string(), "ok".to_string()],
        };
        Ok(args)
    }
}

fn pixel(value: f32) -> Result<String, ShellError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ShellError::InvalidInput(format!(
            "coordinate {} off screen",
            value
        )));
    }
    Ok((value.round() as i64).to_string())
}

/// `input text` takes `%s` for a space and has no escape for a literal
/// `%s`, so callers reject that sequence first. A lone `%` passes through.
/// Shell metacharacters need a backslash.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => escaped.push_str("%s"),
            '\\' | '\'' | '"' | '&' | '|' | ';' | '<' | '>' | '(' | ')' | '$' | '`' | '*'
            | '?' | '~' | '#' | '!' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
