pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{DisableFocusChange, EnableFocusChange, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App, tick_rate_ms: u64) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    // Focus events drive the exit-intent modal; not every terminal reports them
    if let Err(e) = execute!(std::io::stdout(), EnableFocusChange) {
        tracing::warn!("focus reporting unavailable: {}", e);
    }

    let mut events = EventHandler::new(tick_rate_ms);
    app.mount(events.sender());
    tracing::debug!(tick_rate_ms, "tui started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    app.unmount();
    let _ = execute!(std::io::stdout(), DisableFocusChange);

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

async fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle events
        match events.next().await {
            Event::Key(key) => handle_key_event(app, key),
            Event::Tick => app.update_flash(),
            Event::FocusLost => app.focus_lost(),
            Event::FocusGained => app.focus_gained(),
            Event::ExitIntent => app.exit_intent_fired(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl-c quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => match key.code {
            KeyCode::Char('q') => app.should_quit = true,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_option(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_option(),
            KeyCode::Char('h') | KeyCode::Left => app.adjust_slider(false),
            KeyCode::Char('l') | KeyCode::Right => app.adjust_slider(true),

            // Answer
            KeyCode::Enter => app.confirm(),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(n) = c.to_digit(10) {
                    app.choose_numbered(n as usize);
                }
            }

            KeyCode::Char('g') => app.reveal_results(),
            KeyCode::Char('e') => app.start_email_input(),
            KeyCode::Char('n') => app.restart(),
            KeyCode::Char('b') => app.show_score_breakdown(),
            KeyCode::Char('?') => app.show_help(),
            _ => {}
        },
        app::InputMode::EmailInput => match key.code {
            KeyCode::Enter => app.confirm_email_input(),
            KeyCode::Esc => app.cancel_email_input(),
            KeyCode::Backspace => {
                app.session.email.pop();
            }
            KeyCode::Char(c) if !c.is_whitespace() => {
                app.session.email.push(c);
            }
            _ => {}
        },
        app::InputMode::ExitIntent => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => app.accept_exit_intent(),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => app.dismiss_exit_intent(),
            _ => {}
        },
        app::InputMode::ScoreBreakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => app.dismiss_score_breakdown(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
