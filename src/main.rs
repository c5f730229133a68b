use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use lexdr::app::{App, AppScreen};
use lexdr::config::Config;
use lexdr::event::{AppEvent, EventHandler};
use lexdr::logging;
use lexdr::session::summary::format_progress_line;
use lexdr::store::KeyValueStore;
use lexdr::store::json_store::JsonStore;
use lexdr::store::memory::MemoryStore;
use lexdr::store::persistence::Persistence;
use lexdr::ui;
use lexdr::ui::components::confirm_dialog::ConfirmDialog;
use lexdr::ui::components::level_progress::LevelProgressList;
use lexdr::ui::components::notebook_list::NotebookList;
use lexdr::ui::components::question_card::QuestionView;
use lexdr::ui::layout::{AppLayout, pack_hint_lines};
use lexdr::ui::theme::Theme;
use lexdr::vocab::entry::LevelId;
use lexdr::vocab::word_store::WordStore;

#[derive(Parser)]
#[command(name = "lexdr", version, about = "Terminal vocabulary flashcard quiz")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Directory for progress, notebook and log files")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Start practicing this level id right away")]
    level: Option<String>,

    #[arg(long, help = "Keep progress in memory only")]
    ephemeral: bool,

    #[arg(long, help = "Present words in file order")]
    no_shuffle: bool,

    #[arg(short, long, help = "Log at debug level")]
    verbose: bool,

    #[arg(long, help = "Write the current config file and exit")]
    init_config: bool,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }
    if cli.no_shuffle {
        config.shuffle = false;
    }

    if cli.init_config {
        let path = config.save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let data_dir = config.data_dir();
    if let Err(err) = logging::init(&data_dir, cli.verbose) {
        eprintln!("Logging disabled: {err:#}");
    }
    tracing::info!(data_dir = %data_dir.display(), "starting lexdr");
    if let Some(err) = config_err {
        tracing::warn!(%err, "config file unreadable, using defaults");
    }

    let words = WordStore::load(&config.levels, &data_dir).map_err(|err| {
        tracing::error!(%err, "vocabulary load failed");
        anyhow::anyhow!("Failed to load vocabulary data: {err}")
    })?;

    let backend: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonStore::with_base_dir(data_dir.clone())?)
    };

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(
            theme = %config.theme,
            available = ?Theme::available_themes(),
            "unknown theme, using default"
        );
        Theme::default()
    });
    let theme: &'static Theme = Box::leak(Box::new(theme));

    let mut app = App::new(
        config,
        words,
        Persistence::new(backend),
        theme,
        SmallRng::from_entropy(),
    );
    if let Some(level) = cli.level {
        app.start_level(&LevelId::new(level));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(250));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(%err, "exited with error");
    }
    tracing::info!("bye");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize | AppEvent::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Confirmation dialog takes priority
    if app.confirm.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_yes(),
            KeyCode::Char('n') | KeyCode::Esc => app.confirm_no(),
            _ => {}
        }
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Quiz | AppScreen::Review => handle_question_key(app, key),
        AppScreen::Notebook => handle_notebook_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => {
            if let Some(action) = app.menu.selected_action().cloned() {
                app.run_menu_action(action);
            }
        }
        KeyCode::Char(ch) => {
            if let Some(action) = app.menu.action_for_key(ch).cloned() {
                app.run_menu_action(action);
            }
        }
        _ => {}
    }
}

fn handle_question_key(app: &mut App, key: KeyEvent) {
    let answered = app.current_question().is_some_and(|q| q.is_answered());
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char(ch @ '1'..='9') if !answered => {
            let choice = ch as usize - '1' as usize;
            app.submit_answer(choice);
        }
        KeyCode::Char('g') if app.can_mark_guessed() => app.mark_for_review(),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') if answered => app.advance(),
        _ => {}
    }
}

fn handle_notebook_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_menu(),
        KeyCode::Down | KeyCode::Char('j') => app.notebook_next(),
        KeyCode::Up | KeyCode::Char('k') => app.notebook_prev(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_remove(),
        KeyCode::Char('c') => app.request_clear(),
        KeyCode::Char('r') => app.start_review(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app),
        AppScreen::Quiz | AppScreen::Review => render_question(frame, app),
        AppScreen::Notebook => render_notebook(frame, app),
    }

    if let Some(message) = app.confirm_message() {
        frame.render_widget(ConfirmDialog::new(message, app.theme), area);
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " lexdr ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &[&str]) {
    let colors = &app.theme.colors;
    let mut lines: Vec<Line> = Vec::new();
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(colors.warning()),
        )));
    }
    lines.extend(
        pack_hint_lines(hints, area.width as usize)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted())))),
    );
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let header_info = format!(
        " {} | Notebook: {}",
        format_progress_line(app.progress()),
        app.notebook().len()
    );
    render_header(frame, app, layout[0], &header_info);

    let menu_area = ui::layout::centered_rect(50, 90, layout[1]);
    frame.render_widget(&app.menu, menu_area);

    render_footer(
        frame,
        app,
        layout[2],
        &["[1-9] Level", "[r] Review", "[n] Notebook", "[j/k] Move", "[q] Quit"],
    );
}

fn render_question(frame: &mut ratatui::Frame, app: &App) {
    let app_layout = AppLayout::new(frame.area());

    let (title, header_info) = match app.screen {
        AppScreen::Review => {
            let level = app
                .review
                .current_entry()
                .and_then(|e| e.level.as_ref())
                .map(|l| app.words.level_name(l).to_string());
            let title = match level {
                Some(name) => format!("Review ({name})"),
                None => "Review".to_string(),
            };
            (title, format!(" {}", app.notebook().summary()))
        }
        _ => {
            let name = app
                .quiz
                .level()
                .map(|l| app.words.level_name(l).to_string())
                .unwrap_or_default();
            let info = format!(" {name} | resumed at {}", app.quiz.resumed_from());
            (name, info)
        }
    };
    render_header(frame, app, app_layout.header, &header_info);

    if let Some(card) = app.current_question() {
        frame.render_widget(QuestionView::new(card, title, app.theme), app_layout.main);
    }

    if let Some(sidebar) = app_layout.sidebar {
        frame.render_widget(
            LevelProgressList::new(app.progress(), app.notebook().len(), app.theme),
            sidebar,
        );
    }

    let answered = app.current_question().is_some_and(|q| q.is_answered());
    let hints: &[&str] = if !answered {
        &["[1-5] Answer", "[Esc] Menu"]
    } else if app.can_mark_guessed() {
        &["[Enter] Next", "[g] I guessed", "[Esc] Menu"]
    } else {
        &["[Enter] Next", "[Esc] Menu"]
    };
    render_footer(frame, app, app_layout.footer, hints);
}

fn render_notebook(frame: &mut ratatui::Frame, app: &App) {
    let app_layout = AppLayout::new(frame.area());
    let header_info = format!(" Wrong notebook | {}", app.notebook().summary());
    render_header(frame, app, app_layout.header, &header_info);

    let list_area = match app_layout.sidebar {
        Some(sidebar) => {
            frame.render_widget(
                LevelProgressList::new(app.progress(), app.notebook().len(), app.theme),
                sidebar,
            );
            app_layout.main
        }
        None => app_layout.main,
    };
    frame.render_widget(
        NotebookList::new(app.notebook(), &app.words, app.notebook_selected, app.theme),
        list_area,
    );

    render_footer(
        frame,
        app,
        app_layout.footer,
        &["[j/k] Move", "[x] Remove", "[c] Clear", "[r] Review", "[Esc] Menu"],
    );
}
