use std::time::Instant;

use anyhow::Result;
use crossterm::event::KeyCode;
use log::{debug, info};
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState as RowSelection, Wrap,
};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{delete_employee, fetch_employees, insert_employee, update_employee};
use crate::models::{Employee, RecordIdentity};
use crate::table::{compute_view, Column, Filter, TableState, View};

use super::forms::{EmployeeField, EmployeeForm, Submission};
use super::helpers::{centered_rect, surface_error, top_right_rect};
use super::overlays::{ConfirmDialog, Notification, Popup, Severity};

/// Footer space reserved for key hints.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the toast in the top-right corner.
const TOAST_WIDTH: u16 = 40;

const DELETE_TITLE: &str = "Are you sure you want to delete this record?";
const DELETE_SUBTITLE: &str = "You can't undo this action";
const SUBMITTED_MESSAGE: &str = "Submitted Successfully";
const PAGE_TITLE: &str = "New Employee";
const PAGE_SUBTITLE: &str = "Form design with validation";
const POPUP_TITLE: &str = "Employee Form";
const DELETED_MESSAGE: &str = "Deleted Successfully";

/// Work the confirm dialog runs once the user says yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteEmployee(i64),
}

/// The employee screen. It owns every piece of UI state; the table engine and
/// the form only ever see what the screen hands them.
pub struct App {
    /// Session store every mutation goes through.
    conn: Connection,
    /// Full record set as last loaded from the store.
    employees: Vec<Employee>,
    /// Sort, filter and paging for the table.
    table: TableState,
    /// Highlighted row within the current page.
    selected: usize,
    /// Search input while it has focus.
    search: Option<String>,
    /// Create/edit form while it is open.
    popup: Popup<EmployeeForm>,
    /// Pending delete waiting for a yes or no.
    confirm: ConfirmDialog<ConfirmAction>,
    /// Toast in the top-right corner.
    notification: Notification,
}

impl App {
    pub fn new(conn: Connection, employees: Vec<Employee>, page_size: usize) -> Self {
        let mut app = Self {
            conn,
            employees,
            table: TableState::new(page_size),
            selected: 0,
            search: None,
            popup: Popup::default(),
            confirm: ConfirmDialog::default(),
            notification: Notification::default(),
        };
        app.refresh_view();
        app
    }

    /// Build the screen from whatever the store currently holds.
    pub fn from_store(conn: Connection, page_size: usize) -> Result<Self> {
        let employees = fetch_employees(&conn)?;
        Ok(Self::new(conn, employees, page_size))
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn popup(&self) -> &Popup<EmployeeForm> {
        &self.popup
    }

    pub fn confirm_dialog(&self) -> &ConfirmDialog<ConfirmAction> {
        &self.confirm
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Advance timers. Called from the event loop on every poll.
    pub fn tick(&mut self, now: Instant) {
        if self.notification.tick(now) {
            debug!("notification expired");
        }
    }

    /// Handle one key press. Returns `true` when the user asked to quit.
    ///
    /// Overlays take the keyboard in stacking order: confirm dialog, then the
    /// form popup, then the search box, then the table.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        if self.confirm.is_open() {
            self.handle_confirm_key(code)?;
            return Ok(false);
        }
        if self.popup.is_open() {
            self.handle_form_key(code)?;
            return Ok(false);
        }
        if self.search.is_some() {
            self.handle_search_key(code);
            return Ok(false);
        }
        self.handle_table_key(code)
    }

    fn handle_table_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                if self.notification.is_open() {
                    self.notification.dismiss();
                } else if self.table.filter().is_some() {
                    self.apply_search(String::new());
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Left | KeyCode::PageUp => {
                if self.table.previous_page() {
                    self.selected = 0;
                    self.refresh_view();
                }
            }
            KeyCode::Right | KeyCode::PageDown => {
                let total = self.current_view().total;
                if self.table.next_page(total) {
                    self.selected = 0;
                    self.refresh_view();
                }
            }
            KeyCode::Char('/') | KeyCode::Char('f') => {
                let query = self
                    .table
                    .filter()
                    .map(|filter| filter.value.clone())
                    .unwrap_or_default();
                self.search = Some(query);
            }
            KeyCode::Char('+') | KeyCode::Char('a') => self.open_create(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.open_edit(),
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            KeyCode::Char('0') => {
                self.table.clear_sort();
                self.refresh_view();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let size = self.table.cycle_page_size();
                self.selected = 0;
                self.refresh_view();
                self.notification
                    .show(format!("Showing {size} rows per page."), Severity::Info);
            }
            KeyCode::Enter => self.open_mail_link(),
            KeyCode::Char(ch) => {
                if let Some(column) = Column::from_shortcut(ch) {
                    let sort = self.table.toggle_sort(column);
                    debug!("sorting by {:?} {:?}", sort.column, sort.direction);
                    self.refresh_view();
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let Some(mut query) = self.search.take() else {
            return;
        };

        match code {
            KeyCode::Esc => {
                self.apply_search(String::new());
                return;
            }
            KeyCode::Enter => return,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Backspace => {
                query.pop();
                self.apply_search(query.clone());
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                query.push(ch);
                self.apply_search(query.clone());
            }
            _ => {}
        }

        self.search = Some(query);
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Result<()> {
        let Some(form) = self.popup.content_mut() else {
            return Ok(());
        };

        match code {
            KeyCode::Esc => {
                self.popup.close();
                debug!("form cancelled");
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Left if form.active() == EmployeeField::Department => {
                form.cycle_department(false)
            }
            KeyCode::Right | KeyCode::Char(' ')
                if form.active() == EmployeeField::Department =>
            {
                form.cycle_department(true)
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if let Some(submission) = form.submit() {
                    self.save_submission(submission);
                }
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_confirm_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => self.confirm.cancel(),
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(action) = self.confirm.confirm() {
                    self.run_confirm_action(action);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Open the popup with a blank form.
    pub fn open_create(&mut self) {
        self.popup.open(POPUP_TITLE, EmployeeForm::create());
    }

    /// Open the popup pre-filled with the highlighted employee.
    pub fn open_edit(&mut self) {
        match self.selected_employee() {
            Some(employee) => {
                self.popup.open(POPUP_TITLE, EmployeeForm::edit(&employee));
            }
            None => self
                .notification
                .show("No employee selected to edit.", Severity::Warning),
        }
    }

    /// Ask for confirmation before deleting the highlighted employee.
    pub fn request_delete(&mut self) {
        match self.selected_employee() {
            Some(employee) => self.confirm.open(
                DELETE_TITLE,
                DELETE_SUBTITLE,
                ConfirmAction::DeleteEmployee(employee.id),
            ),
            None => self
                .notification
                .show("No employee selected to delete.", Severity::Warning),
        }
    }

    /// Persist a submitted form. On success the popup closes, the table is
    /// rebuilt from the store, and only then the toast goes up. A store
    /// failure keeps the form open and reports the cause.
    fn save_submission(&mut self, submission: Submission) {
        match self.write_submission(&submission) {
            Ok(()) => {
                self.popup.close();
                self.notification.show(SUBMITTED_MESSAGE, Severity::Success);
            }
            Err(err) => self
                .notification
                .show(surface_error(&err), Severity::Error),
        }
    }

    fn write_submission(&mut self, submission: &Submission) -> Result<()> {
        match submission.identity {
            RecordIdentity::New => {
                let employee = insert_employee(&self.conn, &submission.draft)?;
                info!("added employee {} ({})", employee.id, employee.full_name);
            }
            RecordIdentity::Existing(id) => {
                if update_employee(&self.conn, id, &submission.draft)? {
                    info!("updated employee {id}");
                }
            }
        }
        self.reload_employees()
    }

    fn run_confirm_action(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteEmployee(id) => match self.delete(id) {
                Ok(()) => self.notification.show(DELETED_MESSAGE, Severity::Error),
                Err(err) => self
                    .notification
                    .show(surface_error(&err), Severity::Error),
            },
        }
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        if delete_employee(&self.conn, id)? {
            info!("deleted employee {id}");
        }
        self.reload_employees()
    }

    fn reload_employees(&mut self) -> Result<()> {
        self.employees = fetch_employees(&self.conn)?;
        self.refresh_view();
        Ok(())
    }

    fn apply_search(&mut self, query: String) {
        self.table.set_filter(Some(Filter::name_search(query)));
        self.selected = 0;
        self.refresh_view();
    }

    /// Re-derive the view so the stored page and the row highlight both point
    /// at something that exists.
    fn refresh_view(&mut self) {
        let len = self.table.view(&self.employees).rows.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn current_view(&self) -> View<'_> {
        compute_view(
            &self.employees,
            self.table.filter(),
            self.table.sort(),
            self.table.page(),
            self.table.page_size(),
        )
    }

    fn selected_employee(&self) -> Option<Employee> {
        self.current_view()
            .rows
            .get(self.selected)
            .map(|employee| (*employee).clone())
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.current_view().rows.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let target = (self.selected as isize).saturating_add(offset);
        self.selected = target.clamp(0, len as isize - 1) as usize;
    }

    fn open_mail_link(&mut self) {
        let Some(employee) = self.selected_employee() else {
            return;
        };
        if employee.email.trim().is_empty() {
            self.notification
                .show("This employee has no email address.", Severity::Warning);
        } else if let Err(err) = open_link(employee.mailto()) {
            self.notification
                .show(format!("Failed to open mail client: {err}"), Severity::Error);
        } else {
            self.notification
                .show(format!("Writing to {}.", employee.full_name), Severity::Info);
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        let view = self.current_view();

        self.draw_header(frame, chunks[0]);
        self.draw_toolbar(frame, chunks[1]);
        self.draw_table(frame, chunks[2], &view);
        self.draw_pagination(frame, chunks[3], &view);
        self.draw_footer(frame, chunks[4]);

        if let Some(form) = self.popup.content() {
            let title = self.popup.title().unwrap_or_default();
            self.draw_form(frame, area, title, form);
        }
        if self.confirm.is_open() {
            self.draw_confirm(frame, area);
        }
        self.draw_notification(frame, area);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                PAGE_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                PAGE_SUBTITLE,
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn draw_toolbar(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(area);

        let query = match &self.search {
            Some(query) => query.as_str(),
            None => self
                .table
                .filter()
                .map(|filter| filter.value.as_str())
                .unwrap_or(""),
        };
        let search_style = if self.search.is_some() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search Employees")
            .border_style(search_style);
        let search = Paragraph::new(query.to_string()).block(block.clone());
        frame.render_widget(search, chunks[0]);

        if self.search.is_some() {
            let inner = block.inner(chunks[0]);
            frame.set_cursor_position((inner.x + query.chars().count() as u16, inner.y));
        }

        let add = Paragraph::new(Line::from(vec![
            Span::styled(
                "[+]",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Add New"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(add, chunks[1]);
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect, view: &View<'_>) {
        let block = Block::default().borders(Borders::ALL);

        if view.rows.is_empty() {
            let text = if self.table.filter().is_some() {
                "No employees match the current search."
            } else {
                "No employees yet. Press '+' to add one."
            };
            let message = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let sort = self.table.sort();
        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut header_cells: Vec<Cell> = Column::ALL
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let arrow = match sort {
                    Some(sort) if sort.column == *column => format!(" {}", sort.direction.arrow()),
                    _ => String::new(),
                };
                Cell::from(format!("{} {}{arrow}", idx + 1, column.label()))
            })
            .collect();
        header_cells.push(Cell::from("Actions"));
        let header = Row::new(header_cells).style(header_style);

        let rows = view.rows.iter().map(|employee| {
            Row::new(vec![
                Cell::from(employee.full_name.clone()),
                Cell::from(employee.email.clone()),
                Cell::from(employee.mobile.clone()),
                Cell::from(employee.department.as_str()),
                Cell::from("[e] [-]"),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(30),
                Constraint::Percentage(17),
                Constraint::Percentage(16),
                Constraint::Percentage(12),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().fg(Color::Yellow))
        .highlight_symbol("> ");

        let mut selection = RowSelection::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut selection);
    }

    fn draw_pagination(&self, frame: &mut Frame, area: Rect, view: &View<'_>) {
        let line = Line::from(vec![
            Span::raw(format!("Rows per page: {}   ", view.page_size)),
            Span::raw(format!("{}   ", view.range_label())),
            Span::raw(format!("Page {}/{}", view.page + 1, view.page_count())),
        ]);
        let paragraph = Paragraph::new(line).alignment(Alignment::Right);
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let paragraph = Paragraph::new(self.footer_instructions()).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = if self.confirm.is_open() {
            &[("[y]", " Confirm   "), ("[n/Esc]", " Cancel")]
        } else if self.popup.is_open() {
            &[
                ("[Tab]", " Next Field   "),
                ("[←→]", " Department   "),
                ("[Enter]", " Submit   "),
                ("[Esc]", " Cancel"),
            ]
        } else if self.search.is_some() {
            &[
                ("[type]", " Filter by name   "),
                ("[Enter]", " Keep   "),
                ("[Esc]", " Clear"),
            ]
        } else {
            &[
                ("[↑↓]", " Select   "),
                ("[←→]", " Page   "),
                ("[1-4]", " Sort   "),
                ("[/]", " Search   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[r]", " Rows   "),
                ("[Enter]", " Email   "),
                ("[q]", " Quit"),
            ]
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(*key, key_style),
                    Span::raw(*label),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &EmployeeForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!("{title}: {}", form.title()))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = Vec::new();
        let mut cursor = None;
        for field in EmployeeField::ALL {
            if field == form.active() {
                let prefix = field.label().len() + 2;
                cursor = Some((prefix + form.value_len(field), lines.len()));
            }
            lines.extend(form.build_lines(field));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to submit • Tab to switch • Esc to cancel",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        if form.active() != EmployeeField::Department {
            if let Some((x, y)) = cursor {
                frame.set_cursor_position((inner.x + x as u16, inner.y + y as u16));
            }
        }
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect) {
        let Some(request) = self.confirm.request() else {
            return;
        };
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Confirm").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(Span::styled(
                request.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(request.subtitle.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_notification(&self, frame: &mut Frame, area: Rect) {
        let Some(toast) = self.notification.current() else {
            return;
        };
        let toast_area = top_right_rect(TOAST_WIDTH, 3, area);
        frame.render_widget(Clear, toast_area);

        let paragraph = Paragraph::new(Span::styled(toast.message.clone(), toast.severity.style()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(toast.severity.style())
                    .title(toast.severity.as_str()),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, toast_area);
    }
}
