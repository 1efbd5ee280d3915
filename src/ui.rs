use std::error::Error;
use std::io;
use std::time::Duration as StdDuration;

use chrono::{Duration, Local, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use crate::domain::{
	format_date, format_hours, hours_input_text, EntryId, FieldUpdate, LogBook, LogBookError, LogEntry,
};
use crate::theme::{ThemeMode, ThemePreference};

pub fn run_dashboard(book: &mut LogBook, theme: &mut ThemePreference) -> Result<(), Box<dyn Error>> {
	enable_raw_mode()?;
	let mut stdout = io::stdout();
	stdout.execute(EnterAlternateScreen)?;
	let backend = CrosstermBackend::new(stdout);
	let mut terminal = Terminal::new(backend)?;

	tracing::info!(theme = %theme.mode(), "dashboard started");
	let palette_listener = theme.subscribe(|mode| tracing::debug!(%mode, "dashboard palette switched"));
	let result = run_event_loop(&mut terminal, book, theme);
	theme.unsubscribe(palette_listener);

	disable_raw_mode()?;
	execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
	terminal.show_cursor()?;

	tracing::info!(entries = book.len(), "dashboard closed");
	result
}

fn run_event_loop(
	terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
	book: &mut LogBook,
	theme: &mut ThemePreference,
) -> Result<(), Box<dyn Error>> {
	let mut app = App::default();

	loop {
		let today = Local::now().date_naive();
		app.clamp_selection(book.len());
		terminal.draw(|frame| draw_dashboard(frame, &app, book, theme.mode(), today))?;

		if event::poll(StdDuration::from_millis(250))? {
			if let CEvent::Key(key) = event::read()? {
				if key.kind != KeyEventKind::Press {
					continue;
				}

				if handle_key(&mut app, key.code, book, theme, today) {
					break;
				}
			}
		}
	}

	Ok(())
}

struct Palette {
	background: Color,
	foreground: Color,
	muted: Color,
	accent: Color,
	focused_border: Color,
	inactive_border: Color,
	highlight: Color,
	error: Color,
}

fn palette(mode: ThemeMode) -> Palette {
	match mode {
		ThemeMode::Light => Palette {
			background: Color::White,
			foreground: Color::Black,
			muted: Color::DarkGray,
			accent: Color::Blue,
			focused_border: Color::Blue,
			inactive_border: Color::Gray,
			highlight: Color::Rgb(225, 228, 235),
			error: Color::Red,
		},
		ThemeMode::Dark => Palette {
			background: Color::Rgb(24, 26, 31),
			foreground: Color::Gray,
			muted: Color::DarkGray,
			accent: Color::Yellow,
			focused_border: Color::Yellow,
			inactive_border: Color::DarkGray,
			highlight: Color::Rgb(42, 45, 52),
			error: Color::LightRed,
		},
	}
}

fn draw_dashboard(frame: &mut Frame, app: &App, book: &LogBook, mode: ThemeMode, today: NaiveDate) {
	let palette = palette(mode);
	frame.render_widget(
		Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
		frame.area(),
	);

	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Length(3),
			Constraint::Length(8),
			Constraint::Min(6),
			Constraint::Length(4),
		])
		.split(frame.area());

	render_header(frame, layout[0], app, mode, &palette);
	render_form_panel(frame, layout[1], app, book, today, &palette);
	render_entries_panel(frame, layout[2], app, book, &palette);
	render_footer(frame, layout[3], app, book, &palette);

	if let InputMode::Select(select) = &app.mode {
		render_select_popup(frame, select, &palette);
	}
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, mode: ThemeMode, palette: &Palette) {
	let button_style = |button: HeaderButton| {
		if app.focus == FocusPane::Header && app.header_button == button {
			Style::default()
				.fg(palette.accent)
				.bg(palette.highlight)
				.add_modifier(Modifier::BOLD)
		} else {
			Style::default().fg(palette.foreground)
		}
	};

	let line = Line::from(vec![
		Span::styled("Hours Logger", Style::default().add_modifier(Modifier::BOLD)),
		Span::raw("    "),
		Span::styled(format!("[ {} ]", mode.toggle_label()), button_style(HeaderButton::Theme)),
		Span::raw(" "),
		Span::styled("[ Sign In ]", button_style(HeaderButton::SignIn)),
	]);

	let block = Block::default()
		.borders(Borders::ALL)
		.border_style(border_style(app.focus == FocusPane::Header, palette));
	frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_form_panel(
	frame: &mut Frame,
	area: Rect,
	app: &App,
	book: &LogBook,
	today: NaiveDate,
	palette: &Palette,
) {
	let draft = book.draft();
	let focused = app.focus == FocusPane::Form;
	let label_style = |field: FormField| {
		if focused && app.form_field == field {
			Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
		} else {
			Style::default().fg(palette.muted)
		}
	};
	let cursor = |field: FormField| if focused && app.form_field == field { "_" } else { "" };

	let date_text = draft
		.date
		.map(format_date)
		.unwrap_or_else(|| "(press -/+ to pick)".to_string());

	let mut lines = vec![
		Line::from(vec![
			Span::styled("Task  ", label_style(FormField::Task)),
			Span::raw(format!("{}{}", draft.task, cursor(FormField::Task))),
		]),
		Line::from(vec![
			Span::styled("Hours ", label_style(FormField::Hours)),
			Span::raw(format!("{}{}", draft.hours, cursor(FormField::Hours))),
		]),
		Line::from(vec![
			Span::styled("Date  ", label_style(FormField::Date)),
			Span::raw(format!("< {date_text} >")),
		]),
		Line::from(Span::styled("[ Add Log ]", label_style(FormField::Submit))),
	];

	let issues = draft.issues(today);
	if !draft.is_empty() && !issues.is_empty() {
		let hint = issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
		lines.push(Line::from(Span::styled(hint, Style::default().fg(palette.error))));
	}

	let block = Block::default()
		.borders(Borders::ALL)
		.title("New entry")
		.border_style(border_style(focused, palette));
	frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_entries_panel(frame: &mut Frame, area: Rect, app: &App, book: &LogBook, palette: &Palette) {
	let mut items = book
		.entries()
		.iter()
		.enumerate()
		.map(|(index, entry)| ListItem::new(render_entry_line(app, index, entry, palette)))
		.collect::<Vec<_>>();

	if items.is_empty() {
		items.push(ListItem::new(Span::styled(
			"(no entries yet)",
			Style::default().fg(palette.muted),
		)));
	}

	let mut state = ListState::default();
	if !book.is_empty() {
		state.select(Some(app.entry_index.min(book.len() - 1)));
	}

	let title = format!(
		"Logged hours | {} entries | total {}",
		book.len(),
		format_hours(book.total_hours())
	);
	let list = List::new(items)
		.block(
			Block::default()
				.borders(Borders::ALL)
				.title(title)
				.border_style(border_style(app.focus == FocusPane::Entries, palette)),
		)
		.highlight_style(Style::default().bg(palette.highlight).add_modifier(Modifier::BOLD));

	frame.render_stateful_widget(list, area, &mut state);
}

fn render_entry_line(app: &App, index: usize, entry: &LogEntry, palette: &Palette) -> Line<'static> {
	let is_selected = app.focus == FocusPane::Entries && index == app.entry_index;
	let field_style = |field: EntryField| {
		if entry.editing && is_selected && app.entry_field == field {
			Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
		} else {
			Style::default()
		}
	};

	let hours_text = if entry.editing && is_selected && app.entry_field == EntryField::Hours {
		format!("{}_ hrs", app.hours_text(entry))
	} else {
		format_hours(entry.hours)
	};

	let mut spans = vec![Span::styled(
		format!("{:>2}. ", index + 1),
		Style::default().fg(palette.muted),
	)];
	if entry.editing {
		spans.push(Span::styled("[editing] ", Style::default().fg(palette.accent)));
	}
	spans.push(Span::styled(entry.task.clone(), field_style(EntryField::Task)));
	spans.push(Span::raw(" | "));
	spans.push(Span::styled(hours_text, field_style(EntryField::Hours)));
	spans.push(Span::raw(" | "));
	spans.push(Span::styled(format_date(entry.date), field_style(EntryField::Date)));

	Line::from(spans)
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, book: &LogBook, palette: &Palette) {
	let hint = match &app.mode {
		InputMode::Select(_) => "j/k or arrows move | Enter choose | Esc cancel",
		InputMode::Normal => match app.focus {
			FocusPane::Header => "Left/Right choose | Enter press | t theme | Tab next pane | q quit",
			FocusPane::Form => {
				"type to fill | Up/Down field | Left/Right or -/+ date | Enter add log | Tab next pane | Esc entries"
			}
			FocusPane::Entries if app.selected_is_editing(book) => {
				"Left/Right field | type to edit | -/+ date | Enter/Esc save | Up/Down move"
			}
			FocusPane::Entries => "j/k move | e/Enter edit | d delete | t theme | Tab next pane | q quit",
		},
	};

	let footer_lines = vec![
		Line::from(hint),
		Line::from(Span::styled(app.status.clone(), Style::default().fg(palette.muted))),
	];
	let footer = Paragraph::new(footer_lines).block(
		Block::default()
			.borders(Borders::ALL)
			.title("Shortcuts")
			.border_style(Style::default().fg(palette.inactive_border)),
	);
	frame.render_widget(footer, area);
}

fn render_select_popup(frame: &mut Frame, select: &SelectState, palette: &Palette) {
	let area = centered_rect(50, 30, frame.area());
	frame.render_widget(Clear, area);

	let items = select
		.options
		.iter()
		.map(|option| ListItem::new(option.label.clone()))
		.collect::<Vec<_>>();

	let list = List::new(items)
		.block(
			Block::default()
				.borders(Borders::ALL)
				.title(select.title.clone())
				.border_style(border_style(true, palette)),
		)
		.style(Style::default().bg(palette.background).fg(palette.foreground))
		.highlight_symbol(">> ")
		.highlight_style(Style::default().bg(palette.highlight));

	let mut state = ListState::default();
	if !select.options.is_empty() {
		state.select(Some(select.selected.min(select.options.len() - 1)));
	}
	frame.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
	let popup_layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Percentage((100 - percent_y) / 2),
			Constraint::Percentage(percent_y),
			Constraint::Percentage((100 - percent_y) / 2),
		])
		.split(area);
	Layout::default()
		.direction(Direction::Horizontal)
		.constraints([
			Constraint::Percentage((100 - percent_x) / 2),
			Constraint::Percentage(percent_x),
			Constraint::Percentage((100 - percent_x) / 2),
		])
		.split(popup_layout[1])[1]
}

fn border_style(focused: bool, palette: &Palette) -> Style {
	if focused {
		Style::default()
			.fg(palette.focused_border)
			.add_modifier(Modifier::BOLD)
	} else {
		Style::default().fg(palette.inactive_border)
	}
}

fn handle_key(
	app: &mut App,
	code: KeyCode,
	book: &mut LogBook,
	theme: &mut ThemePreference,
	today: NaiveDate,
) -> bool {
	if matches!(app.mode, InputMode::Select(_)) {
		return handle_select_key(app, code, book);
	}

	match code {
		KeyCode::Tab => {
			app.focus = app.focus.next();
			app.clear_hours_buffer();
			return false;
		}
		KeyCode::BackTab => {
			app.focus = app.focus.prev();
			app.clear_hours_buffer();
			return false;
		}
		_ => {}
	}

	match app.focus {
		FocusPane::Header => handle_header_key(app, code, theme),
		FocusPane::Form => handle_form_key(app, code, book, today),
		FocusPane::Entries => handle_entries_key(app, code, book, theme, today),
	}
}

fn handle_header_key(app: &mut App, code: KeyCode, theme: &mut ThemePreference) -> bool {
	match code {
		KeyCode::Char('q') | KeyCode::Esc => true,
		KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
			app.header_button = app.header_button.other();
			false
		}
		KeyCode::Enter | KeyCode::Char(' ') => {
			match app.header_button {
				HeaderButton::Theme => toggle_theme(app, theme),
				HeaderButton::SignIn => app.status = "Sign in is not available".to_string(),
			}
			false
		}
		KeyCode::Char('t') => {
			toggle_theme(app, theme);
			false
		}
		_ => false,
	}
}

fn handle_form_key(app: &mut App, code: KeyCode, book: &mut LogBook, today: NaiveDate) -> bool {
	match code {
		KeyCode::Esc => {
			app.focus = FocusPane::Entries;
			return false;
		}
		KeyCode::Up => {
			app.form_field = app.form_field.prev();
			return false;
		}
		KeyCode::Down => {
			app.form_field = app.form_field.next();
			return false;
		}
		KeyCode::Enter => {
			submit_draft(app, book, today);
			return false;
		}
		_ => {}
	}

	match app.form_field {
		FormField::Task => {
			if let Some(next) = apply_text_key(&book.draft().task, code) {
				book.set_draft_field(FieldUpdate::Task(next));
			}
		}
		FormField::Hours => {
			if let Some(next) = apply_text_key(&book.draft().hours, code) {
				book.set_draft_field(FieldUpdate::Hours(next));
			}
		}
		FormField::Date => {
			if let Some(delta) = date_key_delta(code, true) {
				let date = shift_date(book.draft().date, delta, today);
				book.set_draft_field(FieldUpdate::Date(date));
			}
		}
		FormField::Submit => {
			if code == KeyCode::Char(' ') {
				submit_draft(app, book, today);
			}
		}
	}

	false
}

fn handle_entries_key(
	app: &mut App,
	code: KeyCode,
	book: &mut LogBook,
	theme: &mut ThemePreference,
	today: NaiveDate,
) -> bool {
	if let Some(id) = app.selected_editing_id(book) {
		handle_entry_edit_key(app, code, book, &id, today);
		return false;
	}

	match code {
		KeyCode::Char('q') | KeyCode::Esc => true,
		KeyCode::Up | KeyCode::Char('k') => {
			app.move_entry_selection(-1, book.len());
			false
		}
		KeyCode::Down | KeyCode::Char('j') => {
			app.move_entry_selection(1, book.len());
			false
		}
		KeyCode::Enter | KeyCode::Char('e') => {
			match book.toggle_editing_at(app.entry_index) {
				Ok(_) => {
					app.entry_field = EntryField::Task;
					app.status = "Editing entry".to_string();
				}
				Err(err) => report_error(app, err),
			}
			false
		}
		KeyCode::Char('d') => {
			match book.entries().get(app.entry_index) {
				Some(entry) => app.mode = InputMode::Select(build_delete_entry_select(app.entry_index, entry)),
				None => app.status = "No selected entry to delete".to_string(),
			}
			false
		}
		KeyCode::Char('t') => {
			toggle_theme(app, theme);
			false
		}
		_ => false,
	}
}

fn handle_entry_edit_key(app: &mut App, code: KeyCode, book: &mut LogBook, id: &EntryId, today: NaiveDate) {
	match code {
		KeyCode::Enter | KeyCode::Esc => {
			app.clear_hours_buffer();
			match book.toggle_editing(id) {
				Ok(_) => app.status = "Saved entry".to_string(),
				Err(err) => report_error(app, err),
			}
			return;
		}
		KeyCode::Up => {
			app.move_entry_selection(-1, book.len());
			return;
		}
		KeyCode::Down => {
			app.move_entry_selection(1, book.len());
			return;
		}
		KeyCode::Left => {
			app.entry_field = app.entry_field.prev();
			app.clear_hours_buffer();
			return;
		}
		KeyCode::Right => {
			app.entry_field = app.entry_field.next();
			app.clear_hours_buffer();
			return;
		}
		_ => {}
	}

	let Some(entry) = book.entry(id) else {
		report_error(app, LogBookError::UnknownEntry(id.clone()));
		return;
	};

	let index = app.entry_index;
	let update = match app.entry_field {
		EntryField::Task => apply_text_key(&entry.task, code).map(FieldUpdate::Task),
		EntryField::Hours => apply_text_key(&app.hours_text(entry), code).map(|next| {
			app.hours_buffer = Some((id.clone(), next.clone()));
			FieldUpdate::Hours(next)
		}),
		EntryField::Date => date_key_delta(code, false)
			.map(|delta| FieldUpdate::Date(shift_date(Some(entry.date), delta, today))),
	};

	if let Some(update) = update {
		if let Err(err) = book.edit_field_at(index, update) {
			report_error(app, err);
		}
	}
}

fn handle_select_key(app: &mut App, code: KeyCode, book: &mut LogBook) -> bool {
	match code {
		KeyCode::Esc => {
			app.mode = InputMode::Normal;
			app.status = "Selection cancelled".to_string();
		}
		KeyCode::Up | KeyCode::Char('k') => {
			if let InputMode::Select(select) = &mut app.mode {
				select.move_selection(-1);
			}
		}
		KeyCode::Down | KeyCode::Char('j') => {
			if let InputMode::Select(select) = &mut app.mode {
				select.move_selection(1);
			}
		}
		KeyCode::Enter => {
			let select = match std::mem::replace(&mut app.mode, InputMode::Normal) {
				InputMode::Select(select) => select,
				InputMode::Normal => return false,
			};

			match submit_select(select, book) {
				Ok(message) => app.status = message,
				Err(err) => report_error(app, err),
			}
		}
		_ => {}
	}

	false
}

fn submit_select(select: SelectState, book: &mut LogBook) -> Result<String, LogBookError> {
	let choice = select
		.selected_option()
		.map(|option| option.choice)
		.unwrap_or(ConfirmChoice::Cancel);

	match (select.kind, choice) {
		(SelectKind::DeleteEntryConfirm { index, task }, ConfirmChoice::Confirm) => {
			book.delete_entry_at(index)?;
			Ok(format!("Deleted entry: {task}"))
		}
		(SelectKind::DeleteEntryConfirm { .. }, ConfirmChoice::Cancel) => Ok("Delete cancelled".to_string()),
	}
}

fn build_delete_entry_select(index: usize, entry: &LogEntry) -> SelectState {
	let options = vec![
		SelectOption::new("Cancel", ConfirmChoice::Cancel),
		SelectOption::new(format!("Delete '{}'", entry.task), ConfirmChoice::Confirm),
	];

	// The popup is modal, so the index cannot go stale before it closes.
	SelectState::new(
		"Delete entry?",
		SelectKind::DeleteEntryConfirm {
			index,
			task: entry.task.clone(),
		},
		options,
	)
}

fn submit_draft(app: &mut App, book: &mut LogBook, today: NaiveDate) {
	let task = book.draft().task.trim().to_string();
	if book.commit(today).is_some() {
		app.form_field = FormField::Task;
		app.status = format!("Logged: {task}");
		return;
	}

	let issues = book
		.draft()
		.issues(today)
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ");
	app.status = format!("cannot add log: {issues}");
}

fn toggle_theme(app: &mut App, theme: &mut ThemePreference) {
	let mode = theme.toggle();
	app.status = format!("Switched to {mode} theme");
}

fn report_error(app: &mut App, err: LogBookError) {
	tracing::warn!(error = %err, "entry operation failed");
	app.status = format!("error: {err}");
}

fn apply_text_key(current: &str, code: KeyCode) -> Option<String> {
	match code {
		KeyCode::Char(value) => {
			let mut next = current.to_string();
			next.push(value);
			Some(next)
		}
		KeyCode::Backspace => {
			let mut next = current.to_string();
			next.pop()?;
			Some(next)
		}
		_ => None,
	}
}

fn date_key_delta(code: KeyCode, arrows: bool) -> Option<i64> {
	match code {
		KeyCode::Char('-') => Some(-1),
		KeyCode::Char('+') | KeyCode::Char('=') => Some(1),
		KeyCode::Left if arrows => Some(-1),
		KeyCode::Right if arrows => Some(1),
		_ => None,
	}
}

/// Moves a picked date by `delta` days, never past `today`. An unset date
/// starts at `today`.
fn shift_date(current: Option<NaiveDate>, delta: i64, today: NaiveDate) -> NaiveDate {
	match current {
		Some(date) => (date + Duration::days(delta)).min(today),
		None => today,
	}
}

#[derive(Debug, Clone)]
struct SelectState {
	title: String,
	options: Vec<SelectOption>,
	selected: usize,
	kind: SelectKind,
}

impl SelectState {
	fn new(title: impl Into<String>, kind: SelectKind, options: Vec<SelectOption>) -> Self {
		Self {
			title: title.into(),
			options,
			selected: 0,
			kind,
		}
	}

	fn move_selection(&mut self, delta: i32) {
		if self.options.is_empty() {
			self.selected = 0;
			return;
		}

		if delta > 0 {
			self.selected = (self.selected + delta as usize).min(self.options.len() - 1);
		} else {
			self.selected = self.selected.saturating_sub(delta.unsigned_abs() as usize);
		}
	}

	fn selected_option(&self) -> Option<&SelectOption> {
		self.options.get(self.selected)
	}
}

#[derive(Debug, Clone)]
struct SelectOption {
	label: String,
	choice: ConfirmChoice,
}

impl SelectOption {
	fn new(label: impl Into<String>, choice: ConfirmChoice) -> Self {
		Self {
			label: label.into(),
			choice,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
	Cancel,
	Confirm,
}

#[derive(Debug, Clone)]
enum SelectKind {
	DeleteEntryConfirm { index: usize, task: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusPane {
	Header,
	Form,
	Entries,
}

impl FocusPane {
	fn next(self) -> Self {
		match self {
			FocusPane::Header => FocusPane::Form,
			FocusPane::Form => FocusPane::Entries,
			FocusPane::Entries => FocusPane::Header,
		}
	}

	fn prev(self) -> Self {
		match self {
			FocusPane::Header => FocusPane::Entries,
			FocusPane::Form => FocusPane::Header,
			FocusPane::Entries => FocusPane::Form,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderButton {
	Theme,
	SignIn,
}

impl HeaderButton {
	fn other(self) -> Self {
		match self {
			HeaderButton::Theme => HeaderButton::SignIn,
			HeaderButton::SignIn => HeaderButton::Theme,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
	Task,
	Hours,
	Date,
	Submit,
}

impl FormField {
	fn next(self) -> Self {
		match self {
			FormField::Task => FormField::Hours,
			FormField::Hours => FormField::Date,
			FormField::Date => FormField::Submit,
			FormField::Submit => FormField::Task,
		}
	}

	fn prev(self) -> Self {
		match self {
			FormField::Task => FormField::Submit,
			FormField::Hours => FormField::Task,
			FormField::Date => FormField::Hours,
			FormField::Submit => FormField::Date,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryField {
	Task,
	Hours,
	Date,
}

impl EntryField {
	fn next(self) -> Self {
		match self {
			EntryField::Task => EntryField::Hours,
			EntryField::Hours => EntryField::Date,
			EntryField::Date => EntryField::Task,
		}
	}

	fn prev(self) -> Self {
		match self {
			EntryField::Task => EntryField::Date,
			EntryField::Hours => EntryField::Task,
			EntryField::Date => EntryField::Hours,
		}
	}
}

#[derive(Debug, Clone)]
enum InputMode {
	Normal,
	Select(SelectState),
}

#[derive(Debug, Clone)]
struct App {
	focus: FocusPane,
	header_button: HeaderButton,
	form_field: FormField,
	entry_index: usize,
	entry_field: EntryField,
	// Raw hours text while editing, so "1." survives the parse.
	hours_buffer: Option<(EntryId, String)>,
	mode: InputMode,
	status: String,
}

impl Default for App {
	fn default() -> Self {
		Self {
			focus: FocusPane::Form,
			header_button: HeaderButton::Theme,
			form_field: FormField::Task,
			entry_index: 0,
			entry_field: EntryField::Task,
			hours_buffer: None,
			mode: InputMode::Normal,
			status: "Ready".to_string(),
		}
	}
}

impl App {
	fn clamp_selection(&mut self, len: usize) {
		if len == 0 {
			self.entry_index = 0;
		} else {
			self.entry_index = self.entry_index.min(len - 1);
		}
	}

	fn move_entry_selection(&mut self, delta: i32, len: usize) {
		self.clear_hours_buffer();
		if len == 0 {
			self.entry_index = 0;
			return;
		}

		if delta > 0 {
			self.entry_index = (self.entry_index + delta as usize).min(len - 1);
		} else {
			self.entry_index = self.entry_index.saturating_sub(delta.unsigned_abs() as usize);
		}
	}

	fn selected_editing_id(&self, book: &LogBook) -> Option<EntryId> {
		book.entries()
			.get(self.entry_index)
			.filter(|entry| entry.editing)
			.map(|entry| entry.id.clone())
	}

	fn selected_is_editing(&self, book: &LogBook) -> bool {
		self.selected_editing_id(book).is_some()
	}

	fn hours_text(&self, entry: &LogEntry) -> String {
		match &self.hours_buffer {
			Some((id, buffer)) if id == &entry.id => buffer.clone(),
			_ => hours_input_text(entry.hours),
		}
	}

	fn clear_hours_buffer(&mut self) {
		self.hours_buffer = None;
	}
}
