mod app;
mod config;
mod detail;
mod error;
mod input;
mod store;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::{App, Mode};
use config::Config;
use error::{Error, Result};
use store::TicketStore;

#[derive(Parser, Debug)]
#[command(name = "unidesk", version, about = "Terminal helpdesk for Unidesk tickets")]
struct Cli {
    /// Open this ticket directly (case and separators are ignored)
    #[arg(short, long)]
    ticket: Option<String>,

    /// JSON file with tickets to use instead of the built-in ones
    #[arg(long, value_name = "PATH")]
    tickets: Option<PathBuf>,

    /// Config file (defaults to ~/.config/unidesk/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn init_tracing(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| Error::Logging(format!("{}: {e}", log_path.display())))?;

    let filter = tracing_subscriber::EnvFilter::try_from_env("UNIDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

fn load(cli: &Cli) -> Result<(Config, TicketStore)> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let store = match cli.tickets.as_ref().or(config.tickets_path.as_ref()) {
        Some(path) => TicketStore::from_path(path)?,
        None => TicketStore::builtin(),
    };
    Ok((config, store))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&config::config_dir().join("unidesk.log")) {
        eprintln!("{e}");
    }

    let (config, store) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut app = App::new(config, store);
    if let Some(id) = cli.ticket.as_deref() {
        app.navigate(Some(id));
    }

    if let Err(e) = run(&mut app) {
        tracing::error!(error = %e, "terminal session failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    tracing::info!("session started");

    let result = event_loop(&mut terminal, app);

    io::stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    tracing::info!("session ended");

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(app, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => match app.mode {
                    Mode::TicketDetail | Mode::DetailAddingComment => app.detail_scroll_up(),
                    Mode::Normal => app.move_up(),
                    _ => {}
                },
                MouseEventKind::ScrollDown => match app.mode {
                    Mode::TicketDetail | Mode::DetailAddingComment => app.detail_scroll_down(),
                    Mode::Normal => app.move_down(),
                    _ => {}
                },
                _ => {}
            },
            _ => {}
        }
    }
}

/// Returns true when the viewer asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.mode {
        Mode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_down(),
            KeyCode::Enter => app.open_selected(),
            KeyCode::Char('g') => app.start_goto(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('?') => app.show_legend = !app.show_legend,
            _ => {}
        },
        Mode::Searching => match key.code {
            KeyCode::Esc => app.clear_search(),
            KeyCode::Enter => app.confirm_search(),
            KeyCode::Up => app.move_up(),
            KeyCode::Down => app.move_down(),
            KeyCode::Backspace => app.search_pop(),
            KeyCode::Char(c) => app.search_push(c),
            _ => {}
        },
        Mode::GoTo => match key.code {
            KeyCode::Enter => app.confirm_goto(),
            KeyCode::Esc => app.cancel_goto(),
            KeyCode::Left => app.goto_left(),
            KeyCode::Right => app.goto_right(),
            KeyCode::Backspace => app.goto_backspace(),
            KeyCode::Delete => app.goto_delete(),
            KeyCode::Char(c) => app.goto_insert(c),
            _ => {}
        },
        Mode::TicketDetail if app.assign_prompt_open() => match key.code {
            KeyCode::Char('s') | KeyCode::Char('y') | KeyCode::Enter => {
                app.accept_assignment()
            }
            KeyCode::Char('n') | KeyCode::Esc => app.decline_assignment(),
            _ => {}
        },
        Mode::TicketDetail => match key.code {
            KeyCode::Esc => app.close_detail(),
            KeyCode::Up | KeyCode::Char('k') => app.detail_scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => app.detail_scroll_down(),
            KeyCode::Char('c') => app.start_adding_comment(),
            KeyCode::Char('y') => app.copy_ticket_to_clipboard(),
            KeyCode::Char('?') => app.show_legend = !app.show_legend,
            _ => {}
        },
        Mode::DetailAddingComment => match key.code {
            KeyCode::Enter => app.submit_comment(),
            KeyCode::Esc => app.cancel_comment(),
            code => {
                if let Some(view) = app.view.as_mut() {
                    match code {
                        KeyCode::Left => view.cursor_left(),
                        KeyCode::Right => view.cursor_right(),
                        KeyCode::Home => view.cursor_home(),
                        KeyCode::End => view.cursor_end(),
                        KeyCode::Backspace => view.backspace(),
                        KeyCode::Delete => view.delete(),
                        KeyCode::Char(c) => view.insert_char(c),
                        _ => {}
                    }
                }
            }
        },
    }
    false
}
