use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use smart_unit_converter::{
    Category, ConversionEngine, Direction, HistoryLedger, HistoryRecord, DISPLAY_WINDOW,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Category,
    Direction,
    Value,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::Category => Field::Direction,
            Field::Direction => Field::Value,
            Field::Value => Field::Category,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Field::Category => Field::Value,
            Field::Direction => Field::Category,
            Field::Value => Field::Direction,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Field::Category => "Category",
            Field::Direction => "Conversion",
            Field::Value => "Value",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub engine: ConversionEngine,
    pub ledger: HistoryLedger,
    pub focus: Field,
    pub category_state: ListState,
    pub direction_state: ListState,
    pub value_input: String,
    pub status: Option<StatusLine>,
}

impl App {
    pub fn new() -> Self {
        let mut category_state = ListState::default();
        category_state.select(Some(0));

        let mut direction_state = ListState::default();
        direction_state.select(Some(0));

        Self {
            engine: ConversionEngine::new(),
            ledger: HistoryLedger::new(),
            focus: Field::Category,
            category_state,
            direction_state,
            value_input: String::new(),
            status: None,
        }
    }

    pub fn selected_category(&self) -> Category {
        let i = self.category_state.selected().unwrap_or(0);
        Category::ALL[i.min(Category::ALL.len() - 1)]
    }

    pub fn selected_direction(&self) -> Direction {
        let directions = self.selected_category().directions();
        let i = self.direction_state.selected().unwrap_or(0);
        directions[i.min(directions.len() - 1)]
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Field::Category => {
                let len = Category::ALL.len();
                let i = self.category_state.selected().unwrap_or(0);
                self.category_state.select(Some((i + 1) % len));
                // New category owns a different direction set
                self.direction_state.select(Some(0));
            }
            Field::Direction => {
                let len = self.selected_category().directions().len();
                let i = self.direction_state.selected().unwrap_or(0);
                self.direction_state.select(Some((i + 1) % len));
            }
            Field::Value => {}
        }
    }

    pub fn select_previous(&mut self) {
        match self.focus {
            Field::Category => {
                let len = Category::ALL.len();
                let i = self.category_state.selected().unwrap_or(0);
                self.category_state.select(Some((i + len - 1) % len));
                self.direction_state.select(Some(0));
            }
            Field::Direction => {
                let len = self.selected_category().directions().len();
                let i = self.direction_state.selected().unwrap_or(0);
                self.direction_state.select(Some((i + len - 1) % len));
            }
            Field::Value => {}
        }
    }

    pub fn push_input(&mut self, c: char) {
        if self.focus == Field::Value && (c.is_ascii_digit() || c == '.') {
            self.value_input.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        if self.focus == Field::Value {
            self.value_input.pop();
        }
    }

    /// Run the conversion for the current form state. Value validation
    /// happens here, at the caller boundary, not in the engine.
    pub fn convert(&mut self) {
        let value: f64 = match self.value_input.parse() {
            Ok(v) => v,
            Err(_) => {
                self.status = Some(StatusLine {
                    text: "⚠️ Enter a numeric value first.".to_string(),
                    is_error: true,
                });
                return;
            }
        };

        if value <= 0.0 {
            self.status = Some(StatusLine {
                text: "⚠️ Please enter a value greater than 0.".to_string(),
                is_error: true,
            });
            return;
        }

        let category = self.selected_category();
        let direction = self.selected_direction();

        match self.engine.convert(category, direction, value) {
            Ok(result) => {
                let record = HistoryRecord::new(category, direction, value, result);
                self.status = Some(StatusLine {
                    text: format!(
                        "🎯 {:?} converted using {} is: {:.2} ✅",
                        value,
                        direction.label(),
                        result
                    ),
                    is_error: false,
                });
                self.ledger.append(record);
            }
            Err(e) => {
                self.status = Some(StatusLine {
                    text: format!("❌ {}", e),
                    is_error: true,
                });
            }
        }
    }

    pub fn clear_history(&mut self) {
        self.ledger.clear();
        self.status = Some(StatusLine {
            text: "🧹 History cleared!".to_string(),
            is_error: false,
        });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.convert(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_field();
                    } else {
                        app.next_field();
                    }
                }
                KeyCode::BackTab => app.previous_field(),
                KeyCode::Up => app.select_previous(),
                KeyCode::Down => app.select_next(),
                KeyCode::Delete => app.clear_history(),
                KeyCode::Backspace => app.pop_input(),
                KeyCode::Char(c) => app.push_input(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(10), // Form
            Constraint::Min(5),     // History
            Constraint::Length(1),  // Help line
        ])
        .split(f.size());

    render_header(f, chunks[0]);
    render_form(f, chunks[1], app);
    render_history(f, chunks[2], app);
    render_help(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![Span::styled(
        "🔁 Smart Unit Converter",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &mut App) {
    let columns = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(42),
            Constraint::Percentage(30),
        ])
        .split(area);

    // Category list
    let category_items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|c| ListItem::new(c.label()))
        .collect();
    let categories = List::new(category_items)
        .block(
            Block::default()
                .title(Field::Category.title())
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Field::Category)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    f.render_stateful_widget(categories, columns[0], &mut app.category_state);

    // Direction list, constrained to the selected category
    let direction_items: Vec<ListItem> = app
        .selected_category()
        .directions()
        .iter()
        .map(|d| ListItem::new(d.label()))
        .collect();
    let directions = List::new(direction_items)
        .block(
            Block::default()
                .title(Field::Direction.title())
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Field::Direction)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    f.render_stateful_widget(directions, columns[1], &mut app.direction_state);

    // Value input + status
    let right = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(columns[2]);

    let value = Paragraph::new(app.value_input.as_str()).block(
        Block::default()
            .title(Field::Value.title())
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Field::Value)),
    );
    f.render_widget(value, right[0]);

    let (status_text, status_style) = match &app.status {
        Some(s) if s.is_error => (s.text.clone(), Style::default().fg(Color::Red)),
        Some(s) => (s.text.clone(), Style::default().fg(Color::Green)),
        None => (
            "Press Enter to convert".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    let status = Paragraph::new(status_text)
        .style(status_style)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(Block::default().title("Result").borders(Borders::ALL));
    f.render_widget(status, right[1]);
}

fn render_history(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = if app.ledger.is_empty() {
        vec![Line::from(Span::styled(
            "No conversions yet.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.ledger
            .recent_entries(DISPLAY_WINDOW)
            .into_iter()
            .map(|entry| Line::from(format!("• {}", entry)))
            .collect()
    };

    let title = format!("📜 Conversion History ({} total)", app.ledger.len());
    let history = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(history, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "Tab: switch field | ↑/↓: select | Enter: convert | Del: clear history | q: quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
