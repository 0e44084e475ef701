use anyhow::Result;
use crossterm::style::{self, Color, Stylize};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

use crate::issue::{IssueSource, ResolvedIssue};

const WIDTH: usize = 68;

/// Get display width of a string (accounts for wide chars like emojis)
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Render the commit message that is about to be submitted in a styled box
pub fn render_commit_message(message: &str, resolved: &ResolvedIssue) -> Result<()> {
    let issue = resolved.issue_id.as_deref().unwrap_or_default();
    let title = format!(" Commit message for {} ", issue);

    let mut stdout = io::stdout();

    print_border_top(Color::Cyan)?;
    print_title(&title, Color::Cyan)?;
    print_separator(Color::Cyan)?;

    for line in wrap_text(message, WIDTH - 4) {
        print_colored("│", Color::Cyan)?;
        print!("  ");
        print!("{}", line.clone().white().bold());
        print!("{}", " ".repeat((WIDTH - 2).saturating_sub(display_width(&line))));
        print_colored("│", Color::Cyan)?;
        println!();
    }

    print_separator(Color::Cyan)?;
    print_source(&resolved.source, Color::Cyan)?;
    print_border_bottom(Color::Cyan)?;

    stdout.flush()?;
    Ok(())
}

/// Render the source that was searched when no issue id matched
pub fn render_no_issue(resolved: &ResolvedIssue) -> Result<()> {
    let mut stdout = io::stdout();

    print_border_top(Color::Yellow)?;
    print_title(" No Jira issue found ", Color::Yellow)?;
    print_separator(Color::Yellow)?;
    print_source(&resolved.source, Color::Yellow)?;

    let info_text = truncate(
        &format!("  No issue of project {} found", resolved.project),
        WIDTH,
    );
    print_colored("│", Color::Yellow)?;
    print_colored(&info_text, Color::DarkGrey)?;
    print!("{}", " ".repeat(WIDTH.saturating_sub(display_width(&info_text))));
    print_colored("│", Color::Yellow)?;
    println!();

    print_border_bottom(Color::Yellow)?;

    stdout.flush()?;
    Ok(())
}

/// Render a fatal error as a single line
pub fn render_error(message: &str) -> Result<()> {
    print_colored(&format!("[ERROR]: {}", message), Color::Red)?;
    println!();
    io::stdout().flush()?;
    Ok(())
}

pub fn render_info(message: &str) -> Result<()> {
    println!("[INFO]: {}", message);
    Ok(())
}

pub fn render_declined() -> Result<()> {
    print_colored("EXIT without commit", Color::Red)?;
    println!();
    Ok(())
}

fn print_border_top(color: Color) -> Result<()> {
    print_colored(&format!("╭{}╮", "─".repeat(WIDTH)), color)?;
    println!();
    Ok(())
}

fn print_border_bottom(color: Color) -> Result<()> {
    print_colored(&format!("╰{}╯", "─".repeat(WIDTH)), color)?;
    println!();
    Ok(())
}

fn print_separator(color: Color) -> Result<()> {
    print_colored(&format!("├{}┤", "─".repeat(WIDTH)), color)?;
    println!();
    Ok(())
}

fn print_title(title: &str, color: Color) -> Result<()> {
    let title = truncate(title, WIDTH);
    print_colored("│", color)?;
    print_colored(&title, color)?;
    print!("{}", " ".repeat(WIDTH.saturating_sub(display_width(&title))));
    print_colored("│", color)?;
    println!();
    Ok(())
}

fn print_source(source: &IssueSource, color: Color) -> Result<()> {
    let label = match source {
        IssueSource::Branch(_) => "  Branch: ",
        IssueSource::Explicit(_) => "  Issue:  ",
    };
    let text = truncate(source.text(), WIDTH - 12);

    print_colored("│", color)?;
    print_colored(label, Color::DarkGrey)?;
    print!("{}", text.clone().green());
    print!("{}", " ".repeat((WIDTH - 10).saturating_sub(display_width(&text))));
    print_colored("│", color)?;
    println!();
    Ok(())
}

fn print_colored(text: &str, color: Color) -> Result<()> {
    print!("{}", style::style(text).with(color));
    Ok(())
}

fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    // Measure the whole prefix: emoji sequences are wider than their chars summed
    let mut result = String::new();
    for c in s.chars() {
        result.push(c);
        if display_width(&result) + 3 > max_width {
            result.pop();
            break;
        }
    }
    result.push_str("...");
    result
}

/// Wrap into lines of at most `max_width` columns without dropping anything:
/// concatenating the lines gives back `s`. Lines break after whitespace when
/// possible, otherwise in the middle of a word.
fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for c in s.chars() {
        current.push(c);
        if display_width(&current) <= max_width {
            continue;
        }
        current.pop();

        let rest = match current.rfind(char::is_whitespace) {
            Some(idx) => {
                let split = idx + current[idx..].chars().next().map_or(1, char::len_utf8);
                current.split_off(split)
            }
            None => String::new(),
        };
        lines.push(std::mem::replace(&mut current, rest));

        current.push(c);
        if display_width(&current) > max_width {
            current.pop();
            lines.push(std::mem::take(&mut current));
            current.push(c);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}
