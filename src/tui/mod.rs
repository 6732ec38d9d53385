pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::app::{AppContext, Result};
use crate::controller::ViewState;
use crate::store::Subscription;

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let mut updates = ctx.controller.subscribe();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    ctx.controller.refresh();

    loop {
        pull_updates(&mut tui_app, &mut updates);

        terminal.draw(|frame| layout::render(frame, &mut tui_app))?;

        // Row count is only known after the list has been laid out.
        tui_app.check_scroll(&ctx.controller);

        // Crossterm polling blocks; keep it off the runtime's worker threads.
        let event = tokio::task::block_in_place(|| event_handler.next())?;
        match event {
            AppEvent::Key(key) => match tui_app.input_mode {
                InputMode::Search => handle_search_key(&mut tui_app, &ctx, key),
                InputMode::Normal => handle_action(&mut tui_app, &ctx, &key),
            },
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn pull_updates(tui_app: &mut TuiApp, updates: &mut Subscription<ViewState>) {
    if let Some(state) = updates.latest() {
        tui_app.apply_state(state);
    }
}

fn handle_search_key(tui_app: &mut TuiApp, ctx: &AppContext, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let query = tui_app.submit_search();
            tui_app.clear_status();
            ctx.controller.search(&query);
        }
        KeyCode::Esc => tui_app.cancel_search(),
        KeyCode::Backspace => {
            tui_app.search_input.pop();
        }
        KeyCode::Char(c) => tui_app.search_input.push(c),
        _ => {}
    }
}

fn handle_action(tui_app: &mut TuiApp, ctx: &AppContext, key: &KeyEvent) {
    match ctx.config.keybindings.get_action(key) {
        Action::Quit => tui_app.should_quit = true,
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(),
        Action::NextPage => tui_app.next_page(),
        Action::PrevPage => tui_app.prev_page(),
        Action::OpenInBrowser => {
            if let Some(article) = tui_app.selected_article() {
                let url = article.url.clone();
                match open::that(&url) {
                    Ok(()) => tui_app.set_status(format!("Opened {}", url)),
                    Err(e) => tui_app.set_status(format!("Failed to open browser: {}", e)),
                }
            }
        }
        Action::Refresh => {
            tui_app.active_query = None;
            tui_app.search_input.clear();
            tui_app.clear_status();
            ctx.controller.refresh();
        }
        Action::Search => {
            tui_app.clear_status();
            tui_app.start_search();
        }
        Action::LoadMore => {
            if ctx.controller.load_next_page().is_none() {
                debug!("Load more ignored; a load is running or the feed has ended");
            }
        }
        Action::None => {}
    }
}
