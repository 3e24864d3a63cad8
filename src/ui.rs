use crate::model::{build_rows, row_visible, today_row_index, Row};
use crate::storage::ActivityStore;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::ListState;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

pub fn run(store: ActivityStore) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(store);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    store: ActivityStore,
    rows: Vec<Row>,
    visible: Vec<usize>,
    group_by_week: bool,
    filter: String,
    selected: usize,
    offset: usize,
    viewport: usize,
    last_save: Option<Instant>,
    save_failed: bool,
    status: String,
    mode: Mode,
}

enum Mode {
    Normal,
    Filtering,
    Editing {
        row_idx: usize,
        date: NaiveDate,
        field: FieldValue,
    },
    ConfirmClear,
}

#[derive(Clone)]
struct FieldValue {
    value: String,
    cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = prev_grapheme(self.cursor, &self.value);
    }

    fn move_right(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        self.cursor = next_grapheme(self.cursor, &self.value);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_grapheme(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

impl App {
    fn new(store: ActivityStore) -> Self {
        let status = format!(
            "Loaded {} entries from {}",
            store.activities().len(),
            store.location().path.display()
        );
        let mut app = App {
            store,
            rows: Vec::new(),
            visible: Vec::new(),
            group_by_week: false,
            filter: String::new(),
            selected: 0,
            offset: 0,
            viewport: 0,
            last_save: None,
            save_failed: false,
            status,
            mode: Mode::Normal,
        };
        app.rebuild_rows();
        app
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Filtering => self.handle_filter_key(key),
            Mode::Editing { .. } => self.handle_edit_key(key),
            Mode::ConfirmClear => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Up | KeyCode::Char('k') => self.prev_row(),
            KeyCode::Down | KeyCode::Char('j') => self.next_row(),
            KeyCode::Char('e') | KeyCode::Enter => self.begin_edit(),
            KeyCode::Char('/') => {
                self.mode = Mode::Filtering;
                self.status = "Filtering (type to narrow, Enter keep, Esc clear)".into();
            }
            KeyCode::Char('w') => self.toggle_weeks(),
            KeyCode::Char('t') => self.jump_to_today(),
            KeyCode::Char('c') => {
                self.mode = Mode::ConfirmClear;
                self.status = "Clear all activities? (y to confirm, n/Esc to cancel)".into();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc => {
                self.filter.clear();
                self.refresh_visible();
                self.mode = Mode::Normal;
                self.status = "Filter cleared".into();
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.status = if self.filter.is_empty() {
                    "Filter cleared".into()
                } else {
                    format!("Filter kept: {}", self.filter)
                };
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.refresh_visible();
            }
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    self.filter.push(c);
                    self.refresh_visible();
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Result<bool> {
        let mut done = false;
        let mut mode = std::mem::replace(&mut self.mode, Mode::Normal);
        if let Mode::Editing {
            row_idx,
            date,
            field,
        } = &mut mode
        {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    done = true;
                    if let Row::Day { key, note, .. } = &mut self.rows[*row_idx] {
                        let stored = self.store.note(key).to_string();
                        if !self.save_failed {
                            self.status = format!("Done editing {}", key);
                        }
                        *note = stored;
                    }
                }
                KeyCode::Left => field.move_left(),
                KeyCode::Right => field.move_right(),
                KeyCode::Backspace => {
                    field.backspace();
                    self.write_through(*date, &field.value);
                }
                KeyCode::Char(c) => {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        field.insert_char(c);
                        self.write_through(*date, &field.value);
                    }
                }
                _ => {}
            }
        }
        self.mode = if done { Mode::Normal } else { mode };
        Ok(false)
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let removed = self.store.activities().len();
                match self.store.clear() {
                    Ok(()) => {
                        self.last_save = Some(Instant::now());
                        self.save_failed = false;
                        info!("cleared {} plan entries", removed);
                        self.status = format!("Cleared {} entries", removed);
                    }
                    Err(err) => {
                        warn!("clearing plan: {:#}", err);
                        self.save_failed = true;
                        self.status = format!("Clear failed: {}", err);
                    }
                }
                self.rebuild_rows();
                self.mode = Mode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status = "Clear canceled".into();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
        Ok(false)
    }

    fn prev_row(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn next_row(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    fn begin_edit(&mut self) {
        let row_idx = match self.visible.get(self.selected) {
            Some(&idx) => idx,
            None => {
                self.status = "No rows to edit".into();
                return;
            }
        };
        match &self.rows[row_idx] {
            Row::Day {
                date,
                date_label,
                note,
                ..
            } => {
                let label = date_label.clone();
                self.mode = Mode::Editing {
                    row_idx,
                    date: *date,
                    field: FieldValue::new(note),
                };
                self.status = format!("Editing {}", label);
            }
            Row::WeekSeparator { .. } => {
                self.status = "Select a day row to edit".into();
            }
        }
    }

    fn toggle_weeks(&mut self) {
        self.group_by_week = !self.group_by_week;
        self.rebuild_rows();
        self.status = if self.group_by_week {
            "Week separators on".into()
        } else {
            "Week separators off".into()
        };
    }

    fn jump_to_today(&mut self) {
        let shown: Vec<Row> = self
            .visible
            .iter()
            .map(|&idx| self.rows[idx].clone())
            .collect();
        match today_row_index(&shown) {
            Some(pos) => {
                self.selected = pos;
                self.offset = centered_offset(pos, self.viewport, self.visible.len());
                self.status = if shown[pos].is_today() {
                    "Jumped to today".into()
                } else {
                    "Today is not in view, jumped to the first row".into()
                };
            }
            None => {
                self.status = "Nothing to jump to".into();
            }
        }
    }

    // Every editing keystroke writes the whole map through to disk, matching
    // the per-input persistence contract of the store.
    fn write_through(&mut self, date: NaiveDate, text: &str) {
        match self.store.set(date, text) {
            Ok(()) => {
                self.last_save = Some(Instant::now());
                self.save_failed = false;
            }
            Err(err) => {
                warn!("saving note for {}: {:#}", date, err);
                self.save_failed = true;
                self.status = format!("Save failed: {}", err);
            }
        }
    }

    fn rebuild_rows(&mut self) {
        let today = Utc::now().date_naive();
        self.rows = build_rows(
            self.store.range(),
            self.store.activities(),
            self.group_by_week,
            today,
        );
        self.refresh_visible();
    }

    fn refresh_visible(&mut self) {
        self.visible = (0..self.rows.len())
            .filter(|&idx| row_visible(&self.rows[idx], &self.filter, self.group_by_week))
            .collect();
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        self.draw_days(f, layout[1]);
        self.draw_footer(f, layout[2]);

        match &self.mode {
            Mode::ConfirmClear => self.draw_confirm(f),
            Mode::Normal | Mode::Filtering | Mode::Editing { .. } => {}
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let weeks = if self.group_by_week {
            "weeks on"
        } else {
            "weeks off"
        };
        let mut spans = vec![
            Span::styled(
                "dayplan ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("2026", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  •  "),
            Span::styled(
                format!("{}", self.store.location().path.display()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  •  "),
            Span::styled(weeks, Style::default().fg(Color::Magenta)),
        ];
        if let Some(saved) = self.last_save {
            spans.push(Span::raw("  •  "));
            spans.push(Span::styled(
                format!("saved {}", format_elapsed(saved)),
                Style::default().fg(Color::Gray),
            ));
        }
        if self.save_failed {
            spans.push(Span::raw("  •  "));
            spans.push(Span::styled(
                "save failed",
                Style::default().fg(Color::LightRed),
            ));
        }
        if !self.filter.is_empty() {
            spans.push(Span::raw("  •  "));
            spans.push(Span::styled(
                format!("filter \"{}\"", self.filter),
                Style::default().fg(Color::LightYellow),
            ));
        }

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_days(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let day_total = self.rows.iter().filter(|row| row.is_day()).count();
        if self.visible.is_empty() {
            let msg = Paragraph::new("No rows match the filter")
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Days (0 / {})", day_total)),
                );
            f.render_widget(Clear, area);
            f.render_widget(msg, area);
            return;
        }

        let editing: Option<(usize, String)> = match &self.mode {
            Mode::Editing { row_idx, field, .. } => Some((*row_idx, field.with_caret())),
            _ => None,
        };
        let items = self
            .visible
            .iter()
            .map(|&idx| {
                let editing_text = match &editing {
                    Some((edit_idx, text)) if *edit_idx == idx => Some(text.as_str()),
                    _ => None,
                };
                row_item(&self.rows[idx], editing_text)
            })
            .collect::<Vec<_>>();

        let day_visible = self
            .visible
            .iter()
            .filter(|&&idx| self.rows[idx].is_day())
            .count();
        let title = if day_visible == day_total {
            format!("Days ({})", day_total)
        } else {
            format!("Days ({} / {})", day_visible, day_total)
        };

        let viewport = area.height.saturating_sub(2) as usize;
        self.viewport = viewport;
        self.offset = adjust_offset(self.selected, self.offset, viewport, 1, items.len());
        let mut state = ListState::default();
        *state.offset_mut() = self.offset;
        state.select(Some(self.selected));

        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(Color::Rgb(16, 18, 24)));

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::Rgb(38, 42, 54))
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, bottom[0]);

        let detail = Paragraph::new(self.detail_line())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title("Selected"),
            );
        f.render_widget(detail, bottom[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let spans = match &self.mode {
            Mode::Normal => vec![
                Span::styled("↑↓ / j k", Style::default().fg(Color::LightCyan)),
                Span::raw(" move  "),
                Span::styled("e/Enter", Style::default().fg(Color::LightYellow)),
                Span::raw(" edit  "),
                Span::styled("/", Style::default().fg(Color::LightCyan)),
                Span::raw(" filter  "),
                Span::styled("w", Style::default().fg(Color::LightMagenta)),
                Span::raw(" weeks  "),
                Span::styled("t", Style::default().fg(Color::LightGreen)),
                Span::raw(" today  "),
                Span::styled("c", Style::default().fg(Color::LightRed)),
                Span::raw(" clear all  "),
                Span::styled("q", Style::default().fg(Color::LightRed)),
                Span::raw(" quit"),
            ],
            Mode::Filtering => vec![
                Span::raw("type to filter  "),
                Span::styled("Enter", Style::default().fg(Color::LightYellow)),
                Span::raw(" keep  "),
                Span::styled("Esc", Style::default().fg(Color::LightRed)),
                Span::raw(" clear"),
            ],
            Mode::Editing { .. } => vec![
                Span::raw("type to edit (saved as you type)  "),
                Span::styled("←→", Style::default().fg(Color::LightCyan)),
                Span::raw(" cursor  "),
                Span::styled("Enter/Esc", Style::default().fg(Color::LightYellow)),
                Span::raw(" done"),
            ],
            Mode::ConfirmClear => vec![
                Span::styled("y", Style::default().fg(Color::LightRed)),
                Span::raw(" confirm  "),
                Span::styled("n/Esc", Style::default().fg(Color::LightCyan)),
                Span::raw(" cancel"),
            ],
        };
        Line::from(spans)
    }

    fn detail_line(&self) -> Line<'static> {
        let row = self.visible.get(self.selected).map(|&idx| &self.rows[idx]);
        match row {
            Some(Row::Day {
                weekday,
                date_label,
                note,
                is_today,
                ..
            }) => {
                let mut spans = vec![Span::styled(
                    format!("{}, {}", weekday, date_label),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )];
                if *is_today {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        "today",
                        Style::default().fg(Color::LightGreen),
                    ));
                }
                spans.push(Span::raw("  "));
                if note.is_empty() {
                    spans.push(Span::styled(
                        "(no plans)",
                        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                    ));
                } else {
                    spans.push(Span::styled(note.clone(), Style::default().fg(Color::Gray)));
                }
                Line::from(spans)
            }
            Some(Row::WeekSeparator { label }) => {
                Line::from(Span::styled(label.clone(), Style::default().fg(Color::Yellow)))
            }
            None => Line::from("Nothing selected"),
        }
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>) {
        let area = centered_rect(50, 30, f.size());
        let body = vec![
            Line::from(Span::styled(
                "Clear all activities for 2026?",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Clear",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn row_item(row: &Row, editing_text: Option<&str>) -> ListItem<'static> {
    match row {
        Row::WeekSeparator { label } => ListItem::new(Line::from(Span::styled(
            label.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))),
        Row::Day {
            weekday,
            date_label,
            note,
            is_today,
            ..
        } => {
            let mut spans = vec![
                Span::styled(
                    format!("{:<9}", weekday),
                    Style::default().fg(Color::LightCyan),
                ),
                Span::raw("  "),
                Span::styled(date_label.clone(), Style::default().fg(Color::Gray)),
                Span::raw("  "),
            ];
            match editing_text {
                Some(text) => spans.push(Span::styled(
                    text.to_string(),
                    Style::default().fg(Color::Cyan),
                )),
                None if note.is_empty() => {}
                None => spans.push(Span::styled(note.clone(), Style::default().fg(Color::White))),
            }
            let item = ListItem::new(Line::from(spans));
            if *is_today {
                item.style(Style::default().bg(Color::Rgb(24, 48, 32)))
            } else {
                item
            }
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

fn adjust_offset(
    selected: usize,
    current_offset: usize,
    viewport: usize,
    scrolloff: usize,
    len: usize,
) -> usize {
    if viewport == 0 || len == 0 {
        return 0;
    }
    let max_offset = len.saturating_sub(viewport);
    let margin = scrolloff.min(viewport.saturating_sub(1));
    let mut offset = current_offset.min(max_offset);
    if selected < offset.saturating_add(margin) {
        offset = selected.saturating_sub(margin);
    } else {
        let upper = offset
            .saturating_add(viewport.saturating_sub(1))
            .saturating_sub(margin);
        if selected > upper {
            offset = selected.saturating_add(margin + 1).saturating_sub(viewport);
        }
    }
    offset.min(max_offset)
}

fn centered_offset(selected: usize, viewport: usize, len: usize) -> usize {
    if viewport == 0 || len <= viewport {
        return 0;
    }
    selected.saturating_sub(viewport / 2).min(len - viewport)
}

fn prev_grapheme(cursor: usize, text: &str) -> usize {
    if cursor == 0 {
        return 0;
    }
    let mut prev = 0;
    for (idx, _) in text.char_indices() {
        if idx >= cursor {
            break;
        }
        prev = idx;
    }
    prev
}

fn next_grapheme(cursor: usize, text: &str) -> usize {
    for (idx, ch) in text.char_indices() {
        if idx > cursor {
            return idx;
        }
        if idx == cursor {
            return cursor + ch.len_utf8();
        }
    }
    text.len()
}

fn format_elapsed(last: Instant) -> String {
    let secs = last.elapsed().as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_offset_centers_selection_in_viewport() {
        assert_eq!(centered_offset(150, 20, 298), 140);
        assert_eq!(centered_offset(0, 20, 298), 0);
        assert_eq!(centered_offset(297, 20, 298), 278);
        assert_eq!(centered_offset(5, 0, 298), 0);
        assert_eq!(centered_offset(3, 50, 10), 0);
    }

    #[test]
    fn adjust_offset_keeps_selection_in_view() {
        assert_eq!(adjust_offset(0, 0, 10, 1, 100), 0);
        assert_eq!(adjust_offset(50, 0, 10, 1, 100), 42);
        assert_eq!(adjust_offset(41, 42, 10, 1, 100), 40);
        assert_eq!(adjust_offset(99, 0, 10, 1, 100), 90);
        assert_eq!(adjust_offset(5, 0, 0, 1, 100), 0);
        assert_eq!(adjust_offset(0, 0, 10, 1, 0), 0);
    }
}
