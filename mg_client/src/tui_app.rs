//! TUI application for the memory game.
//!
//! This module provides a terminal UI using ratatui. The UI loop owns the
//! [`Session`]; roster loading and round resets arrive through
//! [`Session::poll`] on every tick.

use anyhow::Result;
use chrono::{DateTime, Utc};
use memory_game::{
    GameView, Session, SessionUpdate, Transition,
    entities::GameStatus,
    view::{BoardView, CardView, HeaderView},
};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    style::{Style, Stylize},
    symbols::scrollbar,
    text::{Line, Span, Text},
    widgets::{
        Block, Clear, List, ListDirection, ListItem, Padding, Paragraph, Scrollbar,
        ScrollbarOrientation, Wrap, block,
    },
};
use std::time::{Duration, Instant};

mod widgets;

use widgets::ScrollableList;

use crate::logging::{log_performance, log_transition};

const HELP: &str = "\
←  ↑  →  ↓
        Move the selection between cards.
Enter, Space
        Pick the selected card.
1 - 9
        Pick one of the first nine cards by its number.
        Cards 10 and up are picked with the arrows and Enter.
r
        Start a new round right away.
Ctrl+Home, Ctrl+End
        Jump to the oldest or newest history entry.
Tab
        Show or hide this help.
Esc, q
        Quit.

Pick every character exactly once. The cards are shuffled after
each pick; picking a character twice ends the round.
";
const MAX_LOG_RECORDS: usize = 1024;
const POLL_TIMEOUT: Duration = Duration::from_millis(100);
const GRID_COLUMNS: usize = 4;
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

#[derive(Clone)]
enum RecordKind {
    Error,
    Game,
    You,
}

/// A timestamped history entry.
#[derive(Clone)]
struct Record {
    datetime: DateTime<Utc>,
    kind: RecordKind,
    content: String,
}

impl Record {
    fn new(kind: RecordKind, content: String) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content,
        }
    }
}

impl From<Record> for ListItem<'_> {
    fn from(val: Record) -> Self {
        let repr = match val.kind {
            RecordKind::Error => "ERROR".light_red(),
            RecordKind::Game => "GAME".light_yellow(),
            RecordKind::You => "YOU".light_green(),
        };

        let msg = vec![
            format!("[{} ", val.datetime.format("%H:%M:%S")).into(),
            Span::styled(format!("{repr:5}"), repr.style),
            format!("]: {}", val.content).into(),
        ];

        ListItem::new(Line::from(msg))
    }
}

/// What the main loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

fn image_label(url: &str) -> &str {
    url.rsplit('/').find(|part| !part.is_empty()).unwrap_or(url)
}

fn status_line(header: &HeaderView) -> Line<'static> {
    let message = header.message.clone();
    match header.status {
        GameStatus::InProgress => Line::from(message),
        GameStatus::Won => Line::from(message.light_green().bold()),
        GameStatus::GameOver => Line::from(message.light_red().bold()),
    }
}

/// TUI App state
pub struct TuiApp {
    session: Session,
    /// Grid position of the selected card
    cursor: usize,
    /// Whether to display the help menu window
    show_help_menu: bool,
    /// Helps scroll through the help menu window if the terminal is small
    help_handle: ScrollableList,
    /// History of recorded messages
    log_handle: ScrollableList,
    load_started: Instant,
    ticks: usize,
}

impl TuiApp {
    pub fn new(session: Session) -> Self {
        let mut help_handle = ScrollableList::new(MAX_LOG_RECORDS);
        help_handle.push("".into());
        for line in HELP.lines() {
            help_handle.push(line.into());
        }
        help_handle.push("".into());
        help_handle.jump_to_first();

        Self {
            session,
            cursor: 0,
            show_help_menu: false,
            help_handle,
            log_handle: ScrollableList::new(MAX_LOG_RECORDS),
            load_started: Instant::now(),
            ticks: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn add_log(&mut self, kind: RecordKind, content: String) {
        let record = Record::new(kind, content);
        self.log_handle.push(record.into());
    }

    fn card_count(&self) -> usize {
        self.session.state().cards().len()
    }

    /// Pick the card at `position` and record the outcome
    fn pick(&mut self, position: usize) {
        let name = self
            .session
            .state()
            .cards()
            .get(position)
            .map(|card| card.name.clone());
        let round = self.session.state().round();

        match self.session.click_at(position) {
            Ok(transition) => {
                log_transition(round, position, &transition);
                if let Some(name) = name {
                    self.add_log(RecordKind::You, format!("picked {name}"));
                }
                let outcome = match transition {
                    Transition::Advanced { score } => format!("score {score}"),
                    Transition::Won => "You Win".to_string(),
                    Transition::GameOver => "Game is over".to_string(),
                    Transition::Ignored => "wait for the next round".to_string(),
                    Transition::Reset { round } => format!("round {round} started"),
                };
                self.add_log(RecordKind::Game, outcome);
            }
            Err(e) => self.add_log(RecordKind::Error, e.to_string()),
        }
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let count = self.card_count();
        if count == 0 {
            return;
        }
        let step = dx + dy * GRID_COLUMNS as isize;
        let target = self.cursor as isize + step;
        if (0..count as isize).contains(&target) {
            self.cursor = target as usize;
        }
    }

    /// Apply background updates to the UI
    pub fn handle_updates(&mut self) {
        for update in self.session.poll() {
            match &update {
                SessionUpdate::RosterLoaded { .. } => {
                    log_performance(
                        "roster_load",
                        self.load_started.elapsed().as_millis() as u64,
                        None,
                    );
                    self.add_log(RecordKind::Game, update.to_string());
                }
                SessionUpdate::LoadFailed(_) => {
                    self.add_log(RecordKind::Error, update.to_string());
                }
                SessionUpdate::RoundReset { .. } => {
                    self.add_log(RecordKind::Game, update.to_string());
                }
            }
        }
        self.cursor = self.cursor.min(self.card_count().saturating_sub(1));
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyOutcome {
        match modifiers {
            KeyModifiers::CONTROL => match code {
                KeyCode::Home => self.log_handle.jump_to_first(),
                KeyCode::End => self.log_handle.jump_to_last(),
                KeyCode::Char('c') => return KeyOutcome::Quit,
                _ => {}
            },
            KeyModifiers::NONE | KeyModifiers::SHIFT => match code {
                KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
                KeyCode::Tab => self.show_help_menu = !self.show_help_menu,
                KeyCode::Up if self.show_help_menu => self.help_handle.move_up(),
                KeyCode::Down if self.show_help_menu => self.help_handle.move_down(),
                KeyCode::Left => self.move_cursor(-1, 0),
                KeyCode::Right => self.move_cursor(1, 0),
                KeyCode::Up => self.move_cursor(0, -1),
                KeyCode::Down => self.move_cursor(0, 1),
                KeyCode::PageUp => self.log_handle.move_up(),
                KeyCode::PageDown => self.log_handle.move_down(),
                KeyCode::Enter | KeyCode::Char(' ') => self.pick(self.cursor),
                KeyCode::Char(digit @ '1'..='9') => {
                    let position = digit as usize - '1' as usize;
                    self.cursor = position.min(self.card_count().saturating_sub(1));
                    self.pick(position);
                }
                KeyCode::Char('r') => {
                    if self.session.restart().is_some() {
                        self.add_log(RecordKind::You, "restarted".to_string());
                    }
                }
                _ => {}
            },
            _ => {}
        }
        KeyOutcome::Continue
    }

    /// Render the header with status and scores
    fn draw_header(&self, frame: &mut Frame, area: Rect, header: &HeaderView) {
        let scores = Line::from(vec![
            "Best Score : ".into(),
            header.scores.best_score.to_string().bold().white(),
            "   Score : ".into(),
            header.scores.score.to_string().bold().white(),
        ]);
        let text = Text::from(vec![status_line(header), scores]).alignment(Alignment::Center);
        let paragraph = Paragraph::new(text).block(
            Block::bordered()
                .title(format!(" {}  ", header.title).bold())
                .title_alignment(Alignment::Center),
        );
        frame.render_widget(paragraph, area);
    }

    /// Render the loading placeholder
    fn draw_loading(&self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.ticks % SPINNER.len()];
        let [center] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(area);
        let loading = Paragraph::new(format!("Loading characters {spinner}"))
            .alignment(Alignment::Center)
            .block(Block::bordered());
        frame.render_widget(loading, center);
    }

    /// Render a single card
    fn draw_card(&self, frame: &mut Frame, area: Rect, card: &CardView) {
        let mut lines = vec![Line::from(card.name.clone().bold())];
        if let Some(image) = &card.image {
            lines.push(Line::from(image_label(image).to_string().dim()));
        }

        let mut block = Block::bordered()
            .padding(Padding::horizontal(1))
            .title(format!(" {} ", card.position + 1));
        if card.position == self.cursor {
            block = block.border_style(Style::default().light_yellow().bold());
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
    }

    /// Render the card grid
    fn draw_board(&self, frame: &mut Frame, area: Rect, board: &BoardView) {
        let mut grid_area = area;

        if let Some(notice) = &board.notice {
            let [notice_area, rest] =
                Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
            let notice = Paragraph::new(format!("Couldn't load characters: {notice}").light_red())
                .alignment(Alignment::Center);
            frame.render_widget(notice, notice_area);
            grid_area = rest;
        }

        if board.cards.is_empty() {
            return;
        }

        let rows = board.cards.len().div_ceil(GRID_COLUMNS);
        let row_areas = Layout::vertical(vec![Constraint::Fill(1); rows]).split(grid_area);
        for (row_area, row_cards) in row_areas.iter().zip(board.cards.chunks(GRID_COLUMNS)) {
            let col_areas =
                Layout::horizontal(vec![Constraint::Fill(1); GRID_COLUMNS]).split(*row_area);
            for (card_area, card) in col_areas.iter().zip(row_cards) {
                self.draw_card(frame, *card_area, card);
            }
        }
    }

    /// Render the log/history window with scrollbar
    fn draw_log(&mut self, frame: &mut Frame, area: Rect) {
        let log_records = self.log_handle.list_items.clone();
        let log_records = List::new(log_records)
            .direction(ListDirection::BottomToTop)
            .block(block::Block::bordered().title(" history  "));
        frame.render_stateful_widget(log_records, area, &mut self.log_handle.list_state);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.log_handle.scroll_state,
        );
    }

    /// Render the key hints
    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let help_message = vec![
            "press ".into(),
            "Enter".bold().white(),
            " to pick, ".into(),
            "r".bold().white(),
            " to restart, ".into(),
            "Tab".bold().white(),
            " for help, or ".into(),
            "Esc".bold().white(),
            " to exit".into(),
        ];
        frame.render_widget(Paragraph::new(Line::from(help_message)), area);
    }

    /// Render the credit line
    fn draw_footer(&self, frame: &mut Frame, area: Rect, footer: &str) {
        frame.render_widget(
            Paragraph::new(footer.to_string().dim()).alignment(Alignment::Center),
            area,
        );
    }

    /// Render the help menu overlay
    fn draw_help_menu(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Max(24)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(72)]).flex(Flex::Center);
        let [help_menu_area] = vertical.areas(frame.area());
        let [help_menu_area] = horizontal.areas(help_menu_area);
        frame.render_widget(Clear, help_menu_area);

        let help_items = self.help_handle.list_items.clone();
        let help_items = List::new(help_items)
            .direction(ListDirection::BottomToTop)
            .block(block::Block::bordered().title(" keys  "));
        frame.render_stateful_widget(
            help_items,
            help_menu_area,
            &mut self.help_handle.list_state,
        );

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            help_menu_area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.help_handle.scroll_state,
        );
    }

    /// Main draw function - orchestrates rendering of all UI components
    pub fn draw(&mut self, frame: &mut Frame) {
        let window = Layout::vertical([
            Constraint::Length(4), // Header
            Constraint::Min(6),    // Cards
            Constraint::Length(8), // History
            Constraint::Length(1), // Help bar
            Constraint::Length(1), // Footer
        ]);
        let [header_area, board_area, log_area, help_area, footer_area] =
            window.areas(frame.area());

        match self.session.view() {
            GameView::Loading => {
                self.draw_loading(frame, board_area);
            }
            GameView::Board(board) => {
                self.draw_header(frame, header_area, &board.header);
                self.draw_board(frame, board_area, &board);
                self.draw_footer(frame, footer_area, board.footer);
            }
        }
        self.draw_help_bar(frame, help_area);
        self.draw_log(frame, log_area);

        if self.show_help_menu {
            self.draw_help_menu(frame);
        }
    }

    /// Run the TUI application
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            self.ticks = self.ticks.wrapping_add(1);
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_TIMEOUT)?
                && let Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) = event::read()?
                && kind == KeyEventKind::Press
                && self.handle_key(code, modifiers) == KeyOutcome::Quit
            {
                return Ok(());
            }

            self.handle_updates();
            tokio::task::yield_now().await;
        }
    }
}
