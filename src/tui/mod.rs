pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::app::{AppContext, Dashboard, Result};
use crate::config::Config;
use crate::integrations::{mock::seed_items, spawn_crm_sync};
use crate::store::{ContentStore, SaveToggle};
use crate::workflow::TerminalClipboard;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler, TaskEvent};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
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

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (task_tx, mut task_rx) = mpsc::unbounded_channel::<TaskEvent>();

    let sync = spawn_crm_sync(ctx.crm.clone(), ctx.sync_queue_size);
    let mut dashboard = Dashboard::new(ContentStore::new(seed_items(Utc::now())), sync.clone());

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &dashboard, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.search_mode {
                    handle_search_key(&mut tui_app, key);
                } else if dashboard.workflow().is_open() {
                    let action = config.keybindings.get_action(&key);
                    handle_modal_action(action, &mut dashboard, &ctx, &task_tx);
                } else {
                    let action = config.keybindings.get_action(&key);
                    handle_dashboard_action(action, &mut tui_app, &mut dashboard, &ctx, &task_tx);
                }
            }
            AppEvent::Tick => {
                dashboard.tick(Instant::now());
            }
        }

        while let Ok(task_event) = task_rx.try_recv() {
            match task_event {
                TaskEvent::Scraped(outcome) => {
                    dashboard.finish_scrape(outcome, Instant::now());
                }
                TaskEvent::HooksGenerated {
                    ticket,
                    item_id,
                    outcome,
                } => {
                    dashboard.complete_generation(ticket, &item_id, outcome);
                }
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    sync.shutdown().await;
    Ok(())
}

fn handle_search_key(tui_app: &mut TuiApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => tui_app.end_search(),
        KeyCode::Esc => {
            tui_app.clear_search();
            tui_app.end_search();
        }
        KeyCode::Backspace => tui_app.pop_search_char(),
        KeyCode::Char(c) => tui_app.push_search_char(c),
        _ => {}
    }
}

fn handle_modal_action(
    action: Action,
    dashboard: &mut Dashboard,
    ctx: &Arc<AppContext>,
    task_tx: &mpsc::UnboundedSender<TaskEvent>,
) {
    match action {
        Action::MoveUp => dashboard.workflow_mut().select_prev(),
        Action::MoveDown => dashboard.workflow_mut().select_next(),
        Action::Generate => match dashboard.begin_generation() {
            Ok((ticket, item_id)) => {
                let generator = ctx.generator.clone();
                let tx = task_tx.clone();
                tokio::spawn(async move {
                    let outcome = generator.generate(&item_id).await;
                    let _ = tx.send(TaskEvent::HooksGenerated {
                        ticket,
                        item_id,
                        outcome,
                    });
                });
            }
            Err(e) => debug!("Generate ignored: {}", e),
        },
        Action::CopyHook => {
            if let Err(e) = dashboard.copy_selected_hook(&TerminalClipboard, Instant::now()) {
                error!("Copy failed: {}", e);
            }
        }
        Action::Close | Action::Quit => dashboard.workflow_mut().close(),
        _ => {}
    }
}

fn handle_dashboard_action(
    action: Action,
    tui_app: &mut TuiApp,
    dashboard: &mut Dashboard,
    ctx: &Arc<AppContext>,
    task_tx: &mpsc::UnboundedSender<TaskEvent>,
) {
    let (visible, selected_id) = {
        let view = dashboard.view(&tui_app.query);
        let selected = view.items.get(tui_app.item_index).map(|i| i.id.clone());
        (view.items.len(), selected)
    };

    match action {
        Action::Quit => tui_app.should_quit = true,
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(visible),
        Action::NextPage => tui_app.next_page(visible),
        Action::PrevPage => tui_app.prev_page(),
        Action::SwitchTab => {
            tui_app.query.tab = tui_app.query.tab.toggle();
            tui_app.reset_selection();
        }
        Action::Search => {
            tui_app.clear_status();
            tui_app.start_search();
        }
        Action::CycleFilter => {
            tui_app.query.filter = tui_app.query.filter.next();
            tui_app.reset_selection();
        }
        Action::CycleSort => tui_app.sort = tui_app.sort.next(),
        Action::ToggleSave => {
            if let Some(id) = selected_id {
                match dashboard.toggle_save(&id) {
                    SaveToggle::Saved(item) => tui_app.set_status(format!("Saved: {}", item.title)),
                    SaveToggle::Unsaved => tui_app.set_status("Removed from saved".to_string()),
                    SaveToggle::NotFound => {}
                }
            }
        }
        Action::OpenHooks => {
            if let Some(id) = selected_id {
                tui_app.clear_status();
                if let Err(e) = dashboard.open_hooks(&id) {
                    debug!("Open hooks ignored: {}", e);
                }
            }
        }
        Action::Import => {
            if dashboard.begin_scrape() {
                tui_app.clear_status();
                let scraper = ctx.scraper.clone();
                let tx = task_tx.clone();
                tokio::spawn(async move {
                    let outcome = scraper.trigger().await;
                    let _ = tx.send(TaskEvent::Scraped(outcome));
                });
            }
        }
        Action::Generate | Action::CopyHook | Action::Close | Action::None => {}
    }
}
