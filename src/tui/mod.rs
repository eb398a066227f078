//! TUI interface: ratatui front end for the recommendation session.
//!
//! The App struct holds the session plus view state and drives the event
//! loop. Spin frames advance from the loop via `RecommendationSession::tick`.

pub mod help;
pub mod keybindings;

pub use help::HelpScreen;
pub use keybindings::{map_key, Action};

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use rand::Rng;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::Category;
use crate::select::ExclusionFilter;
use crate::session::{RecommendOutcome, RecommendationSession, SessionState, Ticker};

/// Input poll timeout; short enough for smooth spin frames.
const POLL_INTERVAL_MS: u64 = 10;

/// A one-line message under the result panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

/// The main TUI application state.
pub struct App<R, T> {
    pub session: RecommendationSession<R, T>,
    pub help_screen: HelpScreen,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    map_search_base: String,
}

impl<R: Rng, T: Ticker> App<R, T> {
    pub fn new(session: RecommendationSession<R, T>, map_search_base: impl Into<String>) -> Self {
        Self {
            session,
            help_screen: HelpScreen::new(),
            notice: None,
            should_quit: false,
            map_search_base: map_search_base.into(),
        }
    }

    /// Process an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Recommend => match self.session.recommend() {
                RecommendOutcome::Started => self.notice = None,
                RecommendOutcome::Busy => {}
                RecommendOutcome::NoCandidates => {
                    self.notice = Some(Notice::Warning(
                        "조건에 맞는 메뉴가 없어요. 필터를 조정해 보세요.".to_string(),
                    ));
                }
            },
            Action::LikeResult => {
                if let Some(id) = self.result_id() {
                    let liked = self.session.like(&id);
                    self.notice = Some(Notice::Info(if liked {
                        "좋아요! 다음에 더 자주 추천할게요.".to_string()
                    } else {
                        "좋아요를 취소했어요.".to_string()
                    }));
                }
            }
            Action::DislikeResult => {
                if let Some(id) = self.result_id() {
                    let disliked = self.session.dislike(&id);
                    self.notice = Some(Notice::Info(if disliked {
                        "이 메뉴는 더 이상 추천하지 않을게요.".to_string()
                    } else {
                        "싫어요를 취소했어요.".to_string()
                    }));
                }
            }
            Action::ToggleCategory(idx) => {
                if let Some(&category) = Category::all().get(idx) {
                    if !self.session.toggle_category(category) {
                        self.notice = Some(Notice::Warning(
                            "최소 한 개의 카테고리는 선택해야 해요.".to_string(),
                        ));
                    }
                }
            }
            Action::ToggleNoSpicy => {
                self.session.toggle_filter(ExclusionFilter::NoSpicy);
            }
            Action::ToggleSoupOnly => {
                self.session.toggle_filter(ExclusionFilter::SoupOnly);
            }
            Action::ShowShareText => {
                if let Some(text) = self.session.share_text() {
                    self.notice = Some(Notice::Info(text));
                }
            }
            Action::ShowMapLink => {
                if let Some(url) = self.session.map_search_url(&self.map_search_base) {
                    self.notice = Some(Notice::Info(url));
                }
            }
            Action::ToggleHelp => self.help_screen.toggle(),
            Action::Escape => {
                self.help_screen.hide();
                self.notice = None;
            }
        }
    }

    fn result_id(&self) -> Option<String> {
        self.session.result().map(|item| item.id.clone())
    }

    /// Draw the full UI.
    pub fn draw(&self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Categories + filters
                Constraint::Min(8),    // Result + history
                Constraint::Length(1), // Notice
                Constraint::Length(1), // Status bar
            ])
            .split(size);

        self.draw_selection(frame, chunks[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[1]);
        self.draw_result(frame, middle[0]);
        self.draw_history(frame, middle[1]);

        self.draw_notice(frame, chunks[2]);
        self.draw_status(frame, chunks[3]);

        if self.help_screen.visible {
            self.draw_help(frame, size);
        }
    }

    fn draw_selection(&self, frame: &mut Frame, area: Rect) {
        let selection = self.session.selection();
        let mut categories = vec![Span::raw(" ")];
        for (i, category) in Category::all().iter().enumerate() {
            let on = selection.is_category_selected(*category);
            let style = if on {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mark = if on { "■" } else { "□" };
            categories.push(Span::styled(
                format!("{}{} {}  ", i + 1, mark, category.label()),
                style,
            ));
        }

        let mut filters = vec![Span::raw(" ")];
        for (filter, key) in [(ExclusionFilter::NoSpicy, 'n'), (ExclusionFilter::SoupOnly, 's')] {
            let on = selection.is_filter_active(filter);
            let style = if on {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mark = if on { "✔" } else { "·" };
            filters.push(Span::styled(
                format!("{key}{mark} {}  ", filter.label()),
                style,
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" 오늘 점심 뭐 먹지? ");
        frame.render_widget(
            Paragraph::new(vec![Line::from(categories), Line::from(filters)]).block(block),
            area,
        );
    }

    fn draw_result(&self, frame: &mut Frame, area: Rect) {
        let spinning = self.session.is_spinning();
        let title = if spinning { " 고르는 중… " } else { " 추천 메뉴 " };
        let block = Block::default().borders(Borders::ALL).title(title);

        let lines: Vec<Line> = match self.session.display_menu() {
            None => vec![
                Line::raw(""),
                Line::from(Span::styled(
                    "Enter 를 눌러 메뉴를 추천받으세요",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            Some(item) => {
                let name_style = if spinning {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                };
                let mut lines = vec![
                    Line::raw(""),
                    Line::raw(item.icon.clone()),
                    Line::from(Span::styled(item.name.clone(), name_style)),
                    Line::raw(item.name_en.clone()),
                    Line::raw(item.category.label()),
                ];
                if !spinning {
                    lines.push(Line::raw(""));
                    lines.push(Line::raw(item.description.clone()));
                    let prefs = self.session.preferences();
                    if prefs.is_liked(&item.id) {
                        lines.push(Line::styled("♥ 좋아요", Style::default().fg(Color::Red)));
                    } else if prefs.is_disliked(&item.id) {
                        lines.push(Line::styled(
                            "✕ 싫어요",
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
                lines
            }
        };

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
    }

    fn draw_history(&self, frame: &mut Frame, area: Rect) {
        let prefs = self.session.preferences();
        let items: Vec<ListItem> = prefs
            .history()
            .iter()
            .map(|item| {
                let marker = if prefs.is_liked(&item.id) { " ♥" } else { "" };
                ListItem::new(format!("{} {}{marker}", item.icon, item.name))
            })
            .collect();
        let block = Block::default().borders(Borders::ALL).title(" 최근 추천 ");
        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.notice {
            Some(Notice::Info(text)) => {
                Line::styled(format!(" {text}"), Style::default().fg(Color::Cyan))
            }
            Some(Notice::Warning(text)) => {
                Line::styled(format!(" {text}"), Style::default().fg(Color::Yellow))
            }
            None => Line::raw(""),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let state = match self.session.state() {
            SessionState::Idle => "IDLE",
            SessionState::Selecting => "SPIN",
            SessionState::Settled => "DONE",
        };
        let prefs = self.session.preferences();
        let line = Line::from(vec![
            Span::styled(
                format!(" {state} "),
                Style::default().fg(Color::Black).bg(Color::Green),
            ),
            Span::raw(format!(
                " 후보 {}  ♥ {}  ✕ {}  ",
                self.session.eligible().len(),
                prefs.likes().len(),
                prefs.dislikes().len()
            )),
            Span::styled("? help  q quit", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let width = (area.width * 70 / 100).max(50).min(area.width);
        let height = (area.height * 70 / 100).max(15).min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let overlay = Rect::new(x, y, width, height);

        let block = Block::default()
            .style(Style::default().bg(Color::Black))
            .borders(Borders::ALL)
            .title(" Help — Press ? or Esc to close ");
        let inner = block.inner(overlay);
        frame.render_widget(Clear, overlay);
        frame.render_widget(block, overlay);

        let lines: Vec<Line> = self
            .help_screen
            .lines()
            .iter()
            .take(inner.height as usize)
            .map(|hl| {
                let style = if hl.is_header {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(Span::styled(hl.text.as_str(), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Run the event loop until the user quits.
    pub fn run(
        &mut self,
        terminal: &mut ratatui::Terminal<impl ratatui::backend::Backend>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| self.draw(frame))
                .map_err(|e| io::Error::other(e.to_string()))?;

            if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                if let CrosstermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = map_key(key, self.help_screen.visible) {
                            self.handle_action(action);
                        }
                    }
                }
            }

            self.session.tick();
        }
        Ok(())
    }
}
