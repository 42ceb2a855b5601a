use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use todo_shared::TodoDto;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::datetime::{format_date, format_datetime};
use crate::list::ListOrchestrator;
use crate::notice::{Notice, NoticeKind};

const DESCRIPTION_COLUMN_CHARS: usize = 48;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn write_page<W: Write>(
        &self,
        mut out: W,
        list: &ListOrchestrator,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        if list.items().is_empty() {
            writeln!(out, "No todos ({} filter).", list.status())?;
            return Ok(());
        }

        self.write_todo_table(&mut out, list.items(), now)?;

        if let Some((first, last)) = list.page_range() {
            writeln!(out)?;
            writeln!(
                out,
                "{first}-{last} of {} · page {}/{} · filter {}",
                list.total(),
                list.page_index() + 1,
                list.page_count().max(1),
                list.status()
            )?;
        }
        Ok(())
    }

    pub fn write_todo_table<W: Write>(
        &self,
        out: W,
        todos: &[TodoDto],
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let headers = vec![
            "ID".to_string(),
            "Title".to_string(),
            "Description".to_string(),
            "Status".to_string(),
            "Created".to_string(),
            "Due".to_string(),
        ];

        let mut rows = Vec::with_capacity(todos.len());
        for todo in todos {
            let id = self.paint(&todo.id.to_string(), "33");
            let status = if todo.is_completed {
                self.paint("done", "32")
            } else {
                "pending".to_string()
            };
            let due = format_date(&todo.due_date);
            let due = if todo.is_overdue(now) && !todo.is_completed {
                self.paint(&format!("{due} overdue"), "31")
            } else {
                due
            };

            rows.push(vec![
                id,
                todo.title.clone(),
                truncate(&todo.description, DESCRIPTION_COLUMN_CHARS),
                status,
                format_date(&todo.created_at),
                due,
            ]);
        }

        write_table(out, headers, rows)
    }

    pub fn write_todo_info<W: Write>(&self, mut out: W, todo: &TodoDto, now: DateTime<Utc>) -> anyhow::Result<()> {
        writeln!(out, "id        {}", todo.id)?;
        writeln!(out, "title     {}", todo.title)?;
        writeln!(out, "desc      {}", todo.description)?;
        writeln!(
            out,
            "status    {}",
            if todo.is_completed { "done" } else { "pending" }
        )?;
        writeln!(out, "created   {}", format_datetime(&todo.created_at))?;
        let due = format_datetime(&todo.due_date);
        if todo.is_overdue(now) && !todo.is_completed {
            writeln!(out, "due       {}", self.paint(&format!("{due} (overdue)"), "31"))?;
        } else {
            writeln!(out, "due       {due}")?;
        }
        Ok(())
    }

    /// Notices go to stderr, so colour follows stderr's terminal state.
    pub fn print_notice(&self, notice: &Notice) {
        eprintln!("{}", self.notice_text(notice, io::stderr().is_terminal()));
    }

    fn notice_text(&self, notice: &Notice, terminal: bool) -> String {
        let code = match notice.kind {
            NoticeKind::Success => "32",
            NoticeKind::Failure => "31",
        };
        self.paint_if(&notice.message, code, terminal)
    }

    /// Colour for page and record output, which always goes to stdout.
    fn paint(&self, text: &str, code: &str) -> String {
        self.paint_if(text, code, io::stdout().is_terminal())
    }

    fn paint_if(&self, text: &str, code: &str, terminal: bool) -> String {
        if !self.color || !terminal {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn write_table<W: Write>(mut writer: W, headers: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
