use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, List, ListItem, Paragraph, Wrap};

use crate::charts::{comparison_data, radar_data, RADAR_FULL_MARK};
use crate::output::{format_thousands, score_bar};
use crate::scoring::QuestionKind;
use crate::tui::app::{App, InputMode};

const BRAND: &str = "FAST TRACK";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 16 || area.width < 60 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Hero(3) + Main(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(3), // Hero counters
        Constraint::Fill(1),   // Quiz + live results
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_hero(frame, chunks[1], app);

    let main = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);
    render_quiz(frame, main[0], app);
    render_live_results(frame, main[1], app);

    render_status_bar(frame, chunks[3], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::EmailInput => render_email_popup(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::ScoreBreakdown => render_breakdown_popup(frame, app),
        InputMode::ExitIntent => render_exit_intent_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let left = format!("{}  Business MRI", BRAND);

    let session = &app.session;
    let shown = (session.current_index() + 1).min(session.total_questions());
    let right = format!(
        "{} of {} • {}% Complete",
        shown,
        session.total_questions(),
        session.progress_percent()
    );
    let padding_len = (area.width as usize).saturating_sub(left.len() + right.chars().count());

    let title = Line::from(vec![
        Span::styled(left, theme.title_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_hero(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (execution, industry, roi) = app.counter_values();

    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    let stats = [
        (format!("{}%", execution), "EXECUTION SUCCESS", theme.counter_primary),
        (format!("{}%", industry), "INDUSTRY AVERAGE", theme.counter_muted),
        (format!("{}%", format_thousands(roi)), "PERSONAL EFFICIENCY ROI", theme.counter_highlight),
    ];

    for (column, (value, label, color)) in columns.iter().zip(stats) {
        let text = vec![
            Line::from(Span::styled(value, Style::default().fg(color).bold())),
            Line::from(Span::styled(label, Style::default().fg(theme.muted))),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), *column);
    }
}

fn panel<'a>(title: &'a str, app: &App) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, app.theme.section_style))
        .border_style(Style::default().fg(app.theme.panel_border))
}

fn render_quiz(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = panel(" Business MRI ", app);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.session.show_results {
        render_results_prompt(frame, inner, app);
        return;
    }

    let Some(question) = app.session.current_question().cloned() else {
        return;
    };
    let theme = app.theme.clone();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Section
        Constraint::Length(3), // Prompt (wrapped)
        Constraint::Fill(1),   // Options or slider
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(question.section.clone(), theme.section_style)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(question.text.clone(), Style::default().fg(theme.text).bold()))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    match &question.kind {
        QuestionKind::SingleChoice { options } => {
            let items: Vec<ListItem> = options
                .iter()
                .enumerate()
                .map(|(i, o)| ListItem::new(format!("{}. {}", i + 1, o.label)))
                .collect();
            let list = List::new(items)
                .highlight_style(theme.option_selected)
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, chunks[2], &mut app.option_state);
        }
        QuestionKind::PercentageSlider { .. } => {
            let value = app.session.slider_value;
            let width = (chunks[2].width as usize).saturating_sub(12).max(10);
            let lines = vec![
                Line::from(""),
                Line::from(vec![
                    Span::raw("0% "),
                    Span::styled(score_bar(value, width), Style::default().fg(theme.accent)),
                    Span::raw(" 100%"),
                ]),
                Line::from(""),
                Line::from(Span::styled(format!("{}%", value), Style::default().fg(theme.accent).bold()))
                    .alignment(Alignment::Center),
                Line::from(""),
                Line::from(Span::styled(
                    "←/→ adjust by 5  •  Enter continue",
                    Style::default().fg(theme.muted),
                ))
                .alignment(Alignment::Center),
            ];
            frame.render_widget(Paragraph::new(lines), chunks[2]);
        }
    }
}

fn render_results_prompt(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Analysis Complete", Style::default().fg(theme.text).bold()))
            .alignment(Alignment::Center),
        Line::from(""),
        Line::from("Your business health score and insights are ready.").alignment(Alignment::Center),
        Line::from("Enter your email to see the full analysis.").alignment(Alignment::Center),
        Line::from(""),
    ];

    match app.session.lead() {
        Some(lead) => lines.push(
            Line::from(Span::styled(
                format!("Report reserved for {}", lead.email),
                Style::default().fg(theme.flash_success),
            ))
            .alignment(Alignment::Center),
        ),
        None => lines.push(
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(theme.status_key_color)),
                Span::raw(": get results"),
            ])
            .alignment(Alignment::Center),
        ),
    }

    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            "We protect your data. No spam, ever.",
            Style::default().fg(theme.muted),
        ))
        .alignment(Alignment::Center),
    );

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn labeled_bar(label: &str, value: f64, max: f64, width: usize, color: Color, empty: Color) -> Line<'static> {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    Line::from(vec![
        Span::raw(format!("{:<13} ", label)),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(width.saturating_sub(filled)), Style::default().fg(empty)),
    ])
}

fn render_live_results(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let result = app.session.result();

    let chunks = Layout::vertical([
        Constraint::Length(7), // Score + comparison
        Constraint::Length(7), // Radar
        Constraint::Fill(1),   // Insights / risks / strengths
    ])
    .split(area);

    // Score and benchmark comparison
    let block = panel(" Business Health Score ", app);
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    let bar_width = (inner.width as usize).saturating_sub(20).max(5);
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{}", result.score),
            Style::default().fg(theme.score_color(result.score)).bold(),
        ),
        Span::styled("/100  updates live as you answer", Style::default().fg(theme.muted)),
    ])];
    for point in comparison_data(result) {
        let color = if point.name == "Your Score" {
            theme.score_color(result.score)
        } else {
            theme.muted
        };
        let mut line = labeled_bar(point.name, point.value as f64, 100.0, bar_width, color, theme.bar_empty);
        line.spans.push(Span::raw(format!(" {}", point.value)));
        lines.push(line);
    }
    lines.push(Line::from(Span::styled(
        format!("Industry: {}", result.industry),
        Style::default().fg(theme.muted),
    )));
    frame.render_widget(Paragraph::new(lines), inner);

    // Radar axes as bars
    let block = panel(" Live Business Health ", app);
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let bar_width = (inner.width as usize).saturating_sub(20).max(5);
    let lines: Vec<Line> = radar_data(result.score)
        .into_iter()
        .map(|p| {
            let mut line = labeled_bar(p.subject, p.value, RADAR_FULL_MARK, bar_width, theme.accent, theme.bar_empty);
            line.spans.push(Span::raw(format!(" {:.1}", p.value)));
            line
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);

    // Insights, risks, strengths
    let block = panel(" Live Insights ", app);
    let inner = block.inner(chunks[2]);
    frame.render_widget(block, chunks[2]);

    let mut lines = Vec::new();
    if result.insights.is_empty() {
        lines.push(Line::from(Span::styled(
            "Answer more questions to see personalized insights",
            Style::default().fg(theme.muted).italic(),
        )));
    }
    for insight in &result.insights {
        lines.push(Line::from(vec![
            Span::styled("✓ ", Style::default().fg(theme.strength_color)),
            Span::raw(insight.clone()),
        ]));
    }
    if !result.risks.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Critical Risks",
            Style::default().fg(theme.risk_color).bold(),
        )));
        for risk in &result.risks {
            lines.push(Line::from(Span::styled(
                format!("• {}", risk),
                Style::default().fg(theme.risk_color),
            )));
        }
    }
    if !result.opportunities.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Competitive Strengths",
            Style::default().fg(theme.strength_color).bold(),
        )));
        for opportunity in &result.opportunities {
            lines.push(Line::from(Span::styled(
                format!("• {}", opportunity),
                Style::default().fg(theme.strength_color),
            )));
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Error") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = if app.session.show_results {
            &[
                ("Enter", ":email "),
                ("b", ":breakdown "),
                ("n", ":restart "),
                ("?", ":help "),
                ("q", ":quit"),
            ]
        } else {
            &[
                ("j/k", ":select "),
                ("1-9", ":answer "),
                ("Enter", ":confirm "),
                ("g", ":results "),
                ("b", ":breakdown "),
                ("?", ":help "),
                ("q", ":quit"),
            ]
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup<'a>(title: &'a str, app: &App) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, app.theme.popup_title))
        .border_style(Style::default().fg(app.theme.popup_border))
        .style(Style::default().bg(app.theme.popup_bg))
}

fn render_email_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup(" Get Results ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Input line
        Constraint::Length(1), // Help text
    ])
    .split(inner);

    let input = if app.session.email.is_empty() {
        Line::from(vec![
            Span::styled("your.email@company.com", Style::default().fg(app.theme.muted)),
            Span::raw("|"),
        ])
    } else {
        Line::from(format!("{}|", app.session.email))
    };
    frame.render_widget(Paragraph::new(input), chunks[0]);

    let help = Paragraph::new("Enter: confirm | Esc: cancel")
        .style(Style::default().fg(app.theme.muted));
    frame.render_widget(help, chunks[1]);
}

fn render_exit_intent_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(56, 9, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup(" Wait! You're About to Leave Money on the Table ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key = Style::default().fg(app.theme.status_key_color).bold();
    let lines = vec![
        Line::from("Take 3 minutes to see your business blind spots. Get your competitive position score and 2 specific moves to accelerate growth."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", key),
            Span::raw(": Show Me My Blind Spots   "),
            Span::styled("Esc", key),
            Span::raw(": No Thanks"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let result = app.session.result();
    let height = (result.breakdown.len() as u16) + 6;
    let popup_area = centered_rect_fixed(60, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup(" Score Breakdown ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = result
        .breakdown
        .iter()
        .map(|c| {
            Line::from(vec![
                Span::styled(format!("{:<12}", c.section), app.theme.section_style),
                Span::raw(format!("{:>2}/10  ", c.points)),
                Span::styled(c.description.clone(), Style::default().fg(app.theme.muted)),
            ])
        })
        .collect();

    let (total, max) = result.totals();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{:<12}", "TOTAL"), Style::default().bold()),
        Span::raw(format!("{}/{} = {}", total, max, result.score)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc or b to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 15, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup(" Keyboard Shortcuts ", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key = Style::default().fg(app.theme.status_key_color).bold();
    let rows = [
        ("j / Down      ", "Next option"),
        ("k / Up        ", "Previous option"),
        ("1-9           ", "Answer with option N"),
        ("h/l Left/Right", "Move the percentage slider"),
        ("Enter         ", "Confirm answer / enter email"),
        ("g             ", "Jump to results"),
        ("b             ", "Score breakdown"),
        ("n             ", "Restart quiz"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = rows
        .iter()
        .map(|(k, desc)| Line::from(vec![Span::styled(*k, key), Span::raw(" "), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::HeroCounters;
    use crate::scoring::{default_questions, BenchmarkTable, ScoringConfig};
    use crate::session::QuizSession;
    use crate::tui::theme::ThemeColors;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    fn app() -> App {
        let session =
            QuizSession::new(default_questions(), BenchmarkTable::default(), ScoringConfig::default());
        App::new(session, ThemeColors::dark(), HeroCounters::default(), Duration::from_secs(1))
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_first_question() {
        let mut app = app();
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains("BATTLEFIELD"));
        assert!(screen.contains("Technology/SaaS"));
        assert!(screen.contains("27,000%"));
        assert!(screen.contains("Answer more questions"));
    }

    #[test]
    fn test_draw_tiny_terminal() {
        let mut app = app();
        let screen = render(&mut app, 30, 8);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_draw_results_and_exit_modal() {
        let mut app = app();
        app.choose_numbered(5);
        app.reveal_results();
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains("Analysis Complete"));
        assert!(screen.contains("Industry: finance"));

        app.session.quiz_started = false;
        app.exit_intent_fired();
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains("No Thanks"));
    }
}
