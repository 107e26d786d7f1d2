use console_core::{Alert, AppViewModel, Focus};
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use super::layout::{self, ConsoleLayout};
use super::theme;

const INPUT_PLACEHOLDER: &str = "Paste or type emails separated by commas, spaces or new lines";
const HINTS: [(&str, &str); 5] = [
    ("^R", "Verify"),
    ("^L", "Clear"),
    ("^E", "Export"),
    ("Tab", "Focus"),
    ("^Q", "Quit"),
];

/// Draws one frame. `usage_updated` is the local time of the last stats refresh.
pub fn render(frame: &mut Frame, view: &AppViewModel, usage_updated: Option<&str>) {
    let ConsoleLayout {
        usage,
        input,
        summary,
        results,
        activity,
        status,
    } = layout::compute(frame.area(), view);

    if let Some(area) = usage {
        render_usage(frame, area, view, usage_updated);
    }
    render_input(frame, input, view);
    if let Some(area) = summary {
        render_summary(frame, area, view);
    }
    if let Some(area) = results {
        render_results(frame, area, view);
    }
    if let Some(area) = activity {
        render_activity(frame, area, view);
    }
    render_status(frame, status, view);

    if let Some(message) = &view.loader {
        render_loader(frame, message);
    }
    if let Some(alert) = &view.alert {
        render_alert(frame, alert);
    }
}

fn render_usage(frame: &mut Frame, area: Rect, view: &AppViewModel, updated: Option<&str>) {
    let title = match updated {
        Some(time) => format!(" Credits (updated {time}) "),
        None => " Credits ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(false))
        .title(title);

    let gauge = match &view.usage {
        Some(usage) => Gauge::default()
            .percent(usage.percent)
            .label(format!("{} ({}%)", usage.text, usage.percent)),
        None => Gauge::default().percent(0).label("waiting for usage"),
    };
    frame.render_widget(
        gauge
            .block(block)
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black)),
        area,
    );
}

fn render_input(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let focused = view.focus == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(focused))
        .title(" Emails ");

    if view.input.is_empty() {
        let placeholder = Paragraph::new(Span::styled(INPUT_PLACEHOLDER, theme::muted()))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(placeholder, area);
        return;
    }

    let mut text = view.input.clone();
    if focused {
        text.push('▏');
    }
    let inner = block.inner(area);
    let rows = wrap_input(&text, inner.width as usize);
    // Keep the end of a long paste in view.
    let skip = rows.len().saturating_sub(inner.height as usize);
    let lines: Vec<Line> = rows.into_iter().skip(skip).map(Line::from).collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Hard-wraps input at the pane width so the visible row count is exact.
fn wrap_input(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut used = 0;
        for ch in line.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(ch);
            used += ch_width;
        }
        rows.push(row);
    }
    rows
}

fn render_summary(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let summary = view.summary;
    let mut spans = vec![
        Span::styled("Valid ", theme::status_style("status-valid")),
        Span::raw(summary.valid.to_string()),
        Span::raw("   "),
        Span::styled("Risky ", theme::status_style("status-risky")),
        Span::raw(summary.risky.to_string()),
        Span::raw("   "),
        Span::styled("Invalid ", theme::status_style("status-invalid")),
        Span::raw(summary.invalid.to_string()),
    ];
    if summary.unrecognized > 0 {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("Unrecognized ", theme::muted()));
        spans.push(Span::raw(summary.unrecognized.to_string()));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(false))
        .title(" Summary ");
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_results(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let rows = view.rows.iter().skip(view.results_offset).map(|row| {
        Row::new(vec![
            Cell::from(row.email.as_str()),
            Cell::from(Span::styled(
                row.status.as_str(),
                theme::status_style(&row.status_class),
            )),
            Cell::from(Span::styled(row.details.as_str(), theme::details())),
        ])
    });

    let header = Row::new(vec!["Email", "Status", "Details"]).style(theme::header());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(view.focus == Focus::Results))
        .title(format!(" Results ({}) ", view.rows.len()));

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Length(10),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}

fn render_activity(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let lines: Vec<Line> = view
        .recent
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{:<8}", entry.status),
                    theme::status_style(&entry.status_class),
                ),
                Span::raw(entry.email.as_str()),
                Span::styled(format!("  {}", entry.time), theme::muted()),
            ])
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border(false))
        .title(" Recent activity ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let mut spans = Vec::new();
    for (i, (key, desc)) in HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", theme::muted()));
        }
        spans.push(Span::styled(*key, theme::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::raw(*desc));
    }
    if let Some(message) = &view.status_line {
        spans.push(Span::styled(" │ ", theme::muted()));
        spans.push(Span::styled(message.as_str(), Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_loader(frame: &mut Frame, message: &str) {
    let width = (message.chars().count() as u16).saturating_add(6);
    let area = centered_rect(width, 3, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_alert(frame: &mut Frame, alert: &Alert) {
    let color = theme::alert_color(alert.kind);
    let width = (alert.text.chars().count() as u16)
        .saturating_add(6)
        .clamp(30, 72);
    let area = centered_rect(width, 6, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            " Notice ",
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    let text = vec![
        Line::from(alert.text.as_str()),
        Line::from(""),
        Line::from(Span::styled("Enter to dismiss", theme::muted())),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::{update, AlertKind, AppState, Msg, Status, VerificationResult, VerifyOutcome};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(view: &AppViewModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| render(frame, view, Some("09:30:00")))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn results_table_and_counters_are_drawn() {
        let (state, _) = update(AppState::new(), Msg::InputChanged("a@x.com".to_string()));
        let (state, _) = update(state, Msg::VerifyClicked);
        let (state, _) = update(
            state,
            Msg::VerifyFinished(VerifyOutcome::Completed(vec![
                VerificationResult::new("a@x.com", Status::Valid, "mailbox exists"),
                VerificationResult::new("b@x.com", Status::Error, "timeout"),
            ])),
        );

        let screen = draw(&state.view());
        assert!(screen.contains("Results (2)"));
        assert!(screen.contains("a@x.com"));
        assert!(screen.contains("mailbox exists"));
        assert!(screen.contains("Valid 1"));
        assert!(screen.contains("Invalid 1"));
        assert!(!screen.contains("Unrecognized"));
    }

    #[test]
    fn loader_and_alert_overlay_the_console() {
        let view = AppViewModel {
            usage_panel: true,
            loader: Some("Verifying 3 mailboxes...".to_string()),
            ..AppViewModel::default()
        };
        assert!(draw(&view).contains("Verifying 3 mailboxes..."));

        let view = AppViewModel {
            alert: Some(Alert {
                kind: AlertKind::Quota,
                text: "Trial limit reached.".to_string(),
            }),
            ..AppViewModel::default()
        };
        let screen = draw(&view);
        assert!(screen.contains("Trial limit reached."));
        assert!(screen.contains("Enter to dismiss"));
    }

    #[test]
    fn long_single_line_paste_keeps_its_tail_visible() {
        let pasted = (0..300)
            .map(|i| format!("user{i}@example.com"))
            .collect::<Vec<_>>()
            .join(", ");
        let (state, _) = update(AppState::new(), Msg::InputChanged(pasted));

        let screen = draw(&state.view());
        assert!(screen.contains("user298@example.com"));
        assert!(screen.contains("99@example.com▏"));
        assert!(!screen.contains("user0@example.com"));
    }

    #[test]
    fn wrap_input_splits_rows_at_width() {
        assert_eq!(wrap_input("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(wrap_input("ab\ncd", 5), vec!["ab", "cd"]);
        assert_eq!(wrap_input("", 4), vec![""]);
    }

    #[test]
    fn usage_panel_shows_credits() {
        let (state, _) = update(
            AppState::new(),
            Msg::StatsLoaded(console_core::UsageStats {
                credits_used: 1200,
                credits_total: 4000,
                recent: Vec::new(),
            }),
        );
        let screen = draw(&state.view());
        assert!(screen.contains("1200 / 4000 (30%)"));
        assert!(screen.contains("updated 09:30:00"));
    }
}
