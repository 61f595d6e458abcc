use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use daybook::{
    app::{AppState, Mode},
    input::{command_mode, dialog_mode, normal_mode},
    storage::config::Config,
    sync::{FetchMessage, SyncEngine},
    ui::theme::Theme,
};
use crate::tui::{
    presentation::ui,
    sample_appointments::add_sample_appointments,
};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_tui(config: &Config, sample: bool) -> Result<(), io::Error> {
    let engine = SyncEngine::new(config)
        .map_err(|e| io::Error::other(e.to_string()))?;

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new()
        .with_theme(theme)
        .with_grid(config.grid.clone(), config.ui.rows_per_hour);
    app.date_format = config.ui.date_format.clone();

    if sample {
        add_sample_appointments(&mut app);
    } else {
        app.request_reload();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let res = run_app(&mut terminal, &mut app, Arc::new(engine), tx, rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    tracing::info!("daybook session ended");
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    engine: Arc<SyncEngine>,
    tx: UnboundedSender<FetchMessage>,
    mut rx: UnboundedReceiver<FetchMessage>,
) -> io::Result<()> {
    loop {
        dispatch_pending_requests(app, &engine, &tx);

        while let Ok(message) = rx.try_recv() {
            app.apply_fetch(message, Local::now());
        }

        terminal.draw(|f| ui(f, app))?;

        if !event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.notice = None;
            if handle_key(key.code, app) {
                return Ok(());
            }
        }
    }
}

// Results arriving after the receiver is dropped are discarded with it.
fn dispatch_pending_requests(
    app: &mut AppState,
    engine: &Arc<SyncEngine>,
    tx: &UnboundedSender<FetchMessage>,
) {
    for (ticket, request) in app.take_pending_requests() {
        tracing::debug!("Dispatching {:?} (generation {})", request, ticket.generation);
        let engine = Arc::clone(engine);
        let tx = tx.clone();
        tokio::spawn(async move {
            let message = engine.run(ticket, request).await;
            if tx.send(message).is_err() {
                tracing::debug!("Dropping {:?} response after shutdown", request);
            }
        });
    }
}

fn handle_key(code: KeyCode, app: &mut AppState) -> bool {
    if app.show_help {
        handle_help_keys(code, app);
        return false;
    }

    match app.mode {
        Mode::Normal => match code {
            KeyCode::Char('q') => true,
            _ => {
                normal_mode::handle_key(code, app);
                false
            }
        },
        Mode::Command => command_mode::handle_key(code, app),
        Mode::Dialog => {
            dialog_mode::handle_key(code, app);
            false
        }
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}
