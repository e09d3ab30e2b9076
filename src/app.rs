use std::cell::Cell;
use std::collections::BTreeSet;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use crate::catalog::{Catalog, CountryMatch, FilterCriteria, OrganizationRecord};
use crate::map::{cell_to_pixel, MapRenderer, Viewport};
use crate::session::{PaymentMethod, Receipt, Session};

/// Dashboard tabs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Map,
    Themes,
    Donate,
    History,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Map, Tab::Themes, Tab::Donate, Tab::History];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Map => "Carte interactive",
            Tab::Themes => "Par thématique",
            Tab::Donate => "Faire un don",
            Tab::History => "Mes dons",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One-line message shown in the status bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self { level, text: text.into() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    Country,
    Name,
    Domains,
}

impl SearchField {
    fn next(self) -> Self {
        match self {
            SearchField::Country => SearchField::Name,
            SearchField::Name => SearchField::Domains,
            SearchField::Domains => SearchField::Country,
        }
    }

    fn prev(self) -> Self {
        self.next().next()
    }
}

/// Search bar state on the map tab
#[derive(Clone, Debug, Default)]
pub struct SearchForm {
    /// Focused for input
    pub active: bool,
    pub field: SearchField,
    /// Index into the country options; 0 is the no-filter sentinel
    pub country: usize,
    pub name: String,
    /// Cursor over the domain options
    pub domain_cursor: usize,
    pub domains: BTreeSet<String>,
}

impl SearchForm {
    /// Criteria for the current form. Countries come from the derived option
    /// list, so they are matched as exact members.
    pub fn criteria(&self, country_options: &[String]) -> FilterCriteria {
        let country = country_options.get(self.country).map(String::as_str).unwrap_or("");
        FilterCriteria::default()
            .with_country(country, CountryMatch::Member)
            .with_domains(self.domains.iter().cloned())
            .with_name(&self.name)
    }
}

/// Result of the last search
#[derive(Clone, Debug)]
pub struct SearchResults {
    pub criteria: FilterCriteria,
    pub records: Vec<OrganizationRecord>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DonateField {
    #[default]
    Organization,
    Amount,
    Method,
}

impl DonateField {
    fn next(self) -> Self {
        match self {
            DonateField::Organization => DonateField::Amount,
            DonateField::Amount => DonateField::Method,
            DonateField::Method => DonateField::Organization,
        }
    }

    fn prev(self) -> Self {
        self.next().next()
    }
}

/// Donation form state
#[derive(Clone, Debug)]
pub struct DonateForm {
    pub field: DonateField,
    /// Index into the sorted organization names
    pub organization: usize,
    /// Whole euros as typed
    pub amount: String,
    pub method: PaymentMethod,
    pub receipt: Option<Receipt>,
}

impl Default for DonateForm {
    fn default() -> Self {
        Self {
            field: DonateField::default(),
            organization: 0,
            amount: "1".to_string(),
            method: PaymentMethod::default(),
            receipt: None,
        }
    }
}

/// Longest amount accepted from the keyboard
const MAX_AMOUNT_DIGITS: usize = 7;

/// Application state. Input handlers update it; the UI renders from it.
pub struct App {
    pub catalog: Catalog,
    pub session: Session,
    pub map_renderer: MapRenderer,
    pub viewport: Viewport,
    /// Map area of the last frame, for mouse hit-testing
    pub map_area: Cell<Rect>,
    pub tab: Tab,
    pub login_input: String,
    pub search: SearchForm,
    pub results: Option<SearchResults>,
    pub results_scroll: u16,
    /// Selected theme, index into `domain_options`
    pub theme: usize,
    pub theme_scroll: u16,
    pub donate: DonateForm,
    pub history_scroll: u16,
    /// Region under the mouse
    pub hovered: Option<usize>,
    /// Region last clicked
    pub selected_region: Option<usize>,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    dragged: bool,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    pub country_options: Vec<String>,
    pub domain_options: Vec<String>,
    pub organization_names: Vec<String>,
}

impl App {
    pub fn new(catalog: Catalog, map_renderer: MapRenderer) -> Self {
        let country_options = catalog.country_options();
        let domain_options = catalog.domain_options();
        let organization_names = catalog.organization_names();

        Self {
            catalog,
            session: Session::new(),
            map_renderer,
            viewport: Viewport::world(0, 0),
            map_area: Cell::new(Rect::default()),
            tab: Tab::Map,
            login_input: String::new(),
            search: SearchForm::default(),
            results: None,
            results_scroll: 0,
            theme: 0,
            theme_scroll: 0,
            donate: DonateForm::default(),
            history_scroll: 0,
            hovered: None,
            selected_region: None,
            last_mouse: None,
            dragged: false,
            notice: None,
            should_quit: false,
            country_options,
            domain_options,
            organization_names,
        }
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice::new(level, text));
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.notice = None;
    }

    /// Region drawn with the highlight style
    pub fn highlighted_region(&self) -> Option<usize> {
        self.hovered.or(self.selected_region)
    }

    /// Organization currently chosen in the donation form
    pub fn donation_target(&self) -> Option<&OrganizationRecord> {
        self.organization_names
            .get(self.donate.organization)
            .and_then(|name| self.catalog.find(name))
    }

    pub fn selected_theme(&self) -> Option<&str> {
        self.domain_options.get(self.theme).map(String::as_str)
    }

    // ---------------------------
    // Session
    // ---------------------------

    pub fn submit_login(&mut self) {
        match self.session.login(&self.login_input) {
            Ok(user) => {
                let text = format!("Bienvenue {user} 👋");
                self.login_input.clear();
                self.set_tab(Tab::Map);
                self.notify(NoticeLevel::Success, text);
            }
            Err(e) => self.notify(NoticeLevel::Error, e.to_string()),
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.donate.receipt = None;
        self.notify(NoticeLevel::Info, "Déconnecté.");
    }

    // ---------------------------
    // Search
    // ---------------------------

    pub fn run_search(&mut self) {
        let criteria = self.search.criteria(&self.country_options);
        let records: Vec<OrganizationRecord> = self.catalog.search(&criteria).into_iter().cloned().collect();
        debug!(?criteria, found = records.len(), "search");

        self.search.active = false;
        self.results_scroll = 0;
        self.results = Some(SearchResults { criteria, records });
    }

    /// Leave the result list and show the map again
    pub fn close_results(&mut self) {
        self.results = None;
    }

    fn toggle_domain(&mut self) {
        if let Some(domain) = self.domain_options.get(self.search.domain_cursor) {
            if !self.search.domains.remove(domain) {
                self.search.domains.insert(domain.clone());
            }
        }
    }

    // ---------------------------
    // Donation
    // ---------------------------

    pub fn pay(&mut self) {
        let Some(organization) = self.donation_target().cloned() else {
            self.notify(NoticeLevel::Warning, "Aucune association sélectionnée.");
            return;
        };
        let amount = self.donate.amount.parse::<u32>().unwrap_or(0);

        match self.session.donate(&organization, amount, self.donate.method) {
            Ok(receipt) => {
                let text = receipt.message.clone();
                self.donate.receipt = Some(receipt);
                self.notify(NoticeLevel::Success, text);
            }
            Err(e) => {
                self.donate.receipt = None;
                self.notify(NoticeLevel::Error, e.to_string());
            }
        }
    }

    // ---------------------------
    // Map navigation
    // ---------------------------

    /// Match the viewport to the map area of the last frame
    fn sync_viewport(&mut self) {
        let area = self.map_area.get();
        self.viewport.set_cells(area.width, area.height);
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.sync_viewport();
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
    }

    /// Terminal position to a cell of the map area
    fn map_cell(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        let area = self.map_area.get();
        let inside = col >= area.x && col < area.x + area.width && row >= area.y && row < area.y + area.height;
        inside.then(|| (col - area.x, row - area.y))
    }

    fn region_under(&self, col: u16, row: u16) -> Option<usize> {
        let (cx, cy) = self.map_cell(col, row)?;
        self.map_renderer.region_at_cell(&self.viewport, cx as usize, cy as usize)
    }

    /// Select the region at a terminal position, or clear the selection
    pub fn select_at(&mut self, col: u16, row: u16) {
        self.sync_viewport();
        self.selected_region = self.region_under(col, row);
        if let Some(region) = self.selected_region.and_then(|idx| self.map_renderer.region(idx)) {
            debug!(region = %region.name, "region selected");
        }
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    fn map_visible(&self) -> bool {
        self.session.is_logged_in() && self.tab == Tab::Map && self.results.is_none()
    }

    // ---------------------------
    // Input
    // ---------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        if !self.session.is_logged_in() {
            self.handle_login_key(key.code);
            return;
        }
        if self.tab == Tab::Map && self.results.is_none() && self.search.active {
            self.handle_search_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Tab => self.set_tab(self.tab.next()),
            KeyCode::BackTab => self.set_tab(self.tab.prev()),
            KeyCode::F(n @ 1..=4) => self.set_tab(Tab::ALL[n as usize - 1]),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('x') => self.logout(),
            code => match self.tab {
                Tab::Map => self.handle_map_key(code),
                Tab::Themes => self.handle_themes_key(code),
                Tab::Donate => self.handle_donate_key(code),
                Tab::History => self.handle_history_key(code),
            },
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit_login(),
            KeyCode::Esc => self.quit(),
            KeyCode::Backspace => {
                self.login_input.pop();
            }
            KeyCode::Char(c) => self.login_input.push(c),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let field = self.search.field;
        match code {
            KeyCode::Esc => self.search.active = false,
            KeyCode::Enter => self.run_search(),
            KeyCode::Up | KeyCode::BackTab => self.search.field = field.prev(),
            KeyCode::Down | KeyCode::Tab => self.search.field = field.next(),
            KeyCode::Left => match field {
                SearchField::Country => self.search.country = cycle(self.search.country, self.country_options.len(), -1),
                SearchField::Domains => {
                    self.search.domain_cursor = cycle(self.search.domain_cursor, self.domain_options.len(), -1)
                }
                SearchField::Name => {}
            },
            KeyCode::Right => match field {
                SearchField::Country => self.search.country = cycle(self.search.country, self.country_options.len(), 1),
                SearchField::Domains => {
                    self.search.domain_cursor = cycle(self.search.domain_cursor, self.domain_options.len(), 1)
                }
                SearchField::Name => {}
            },
            KeyCode::Backspace if field == SearchField::Name => {
                self.search.name.pop();
            }
            KeyCode::Char(' ') if field == SearchField::Domains => self.toggle_domain(),
            KeyCode::Char(c) if field == SearchField::Name => self.search.name.push(c),
            _ => {}
        }
    }

    fn handle_map_key(&mut self, code: KeyCode) {
        if self.results.is_some() {
            match code {
                KeyCode::Esc | KeyCode::Backspace => self.close_results(),
                KeyCode::Up | KeyCode::Char('k') => self.results_scroll = self.results_scroll.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => self.results_scroll = self.results_scroll.saturating_add(1),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('/') | KeyCode::Char('s') => self.search.active = true,
            KeyCode::Enter => self.run_search(),
            KeyCode::Esc => self.selected_region = None,

            // Pan with hjkl or arrow keys
            KeyCode::Left | KeyCode::Char('h') => self.pan(-10, 0),
            KeyCode::Right | KeyCode::Char('l') => self.pan(10, 0),
            KeyCode::Up | KeyCode::Char('k') => self.pan(0, -6),
            KeyCode::Down | KeyCode::Char('j') => self.pan(0, 6),

            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_in(),
            KeyCode::Char('-') | KeyCode::Char('_') => self.zoom_out(),

            KeyCode::Char('b') => {
                self.map_renderer.settings.show_borders = !self.map_renderer.settings.show_borders;
            }
            KeyCode::Char('f') => {
                self.map_renderer.settings.show_fill = !self.map_renderer.settings.show_fill;
            }
            KeyCode::Char('r') | KeyCode::Char('0') => self.reset_view(),
            _ => {}
        }
    }

    fn handle_themes_key(&mut self, code: KeyCode) {
        let last = self.domain_options.len().saturating_sub(1);
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.theme = self.theme.saturating_sub(1);
                self.theme_scroll = 0;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.theme = (self.theme + 1).min(last);
                self.theme_scroll = 0;
            }
            KeyCode::PageDown => self.theme_scroll = self.theme_scroll.saturating_add(5),
            KeyCode::PageUp => self.theme_scroll = self.theme_scroll.saturating_sub(5),
            _ => {}
        }
    }

    fn handle_donate_key(&mut self, code: KeyCode) {
        let field = self.donate.field;
        match code {
            KeyCode::Up => self.donate.field = field.prev(),
            KeyCode::Down => self.donate.field = field.next(),
            KeyCode::Enter => self.pay(),
            KeyCode::Left | KeyCode::Right => {
                let step = if code == KeyCode::Left { -1 } else { 1 };
                match field {
                    DonateField::Organization => {
                        self.donate.organization = cycle(self.donate.organization, self.organization_names.len(), step);
                        self.donate.receipt = None;
                    }
                    DonateField::Method => {
                        let idx = PaymentMethod::ALL.iter().position(|&m| m == self.donate.method).unwrap_or(0);
                        self.donate.method = PaymentMethod::ALL[cycle(idx, PaymentMethod::ALL.len(), step)];
                    }
                    DonateField::Amount => {}
                }
            }
            KeyCode::Backspace if field == DonateField::Amount => {
                self.donate.amount.pop();
            }
            KeyCode::Char(c) if field == DonateField::Amount && c.is_ascii_digit() => {
                if self.donate.amount.len() < MAX_AMOUNT_DIGITS {
                    self.donate.amount.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.history_scroll = self.history_scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.history_scroll = self.history_scroll.saturating_add(1),
            _ => {}
        }
    }

    /// Mouse: hover highlights, click selects, drag pans, wheel zooms
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.map_visible() {
            return;
        }
        self.sync_viewport();

        match mouse.kind {
            MouseEventKind::Moved => {
                self.hovered = self.region_under(mouse.column, mouse.row);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some((cx, cy)) = self.map_cell(mouse.column, mouse.row) {
                    let (px, py) = cell_to_pixel(cx, cy);
                    if mouse.kind == MouseEventKind::ScrollUp {
                        self.viewport.zoom_in_at(px, py);
                    } else {
                        self.viewport.zoom_out_at(px, py);
                    }
                }
            }
            MouseEventKind::ScrollLeft => self.pan(-15, 0),
            MouseEventKind::ScrollRight => self.pan(15, 0),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.map_cell(mouse.column, mouse.row).is_some() {
                    self.last_mouse = Some((mouse.column, mouse.row));
                    self.dragged = false;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((last_x, last_y)) = self.last_mouse {
                    let dx = last_x as i32 - mouse.column as i32;
                    let dy = last_y as i32 - mouse.row as i32;
                    // Terminal cells are 2x4 Braille pixels
                    self.viewport.pan(dx * 2, dy * 4);
                    self.dragged = true;
                    self.last_mouse = Some((mouse.column, mouse.row));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.last_mouse.take().is_some() && !self.dragged {
                    self.select_at(mouse.column, mouse.row);
                }
                self.dragged = false;
            }
            _ => {}
        }
    }
}

/// Step through `len` options with wrap-around
fn cycle(idx: usize, len: usize, step: i32) -> usize {
    if len == 0 {
        return 0;
    }
    (idx as i64 + step as i64).rem_euclid(len as i64) as usize
}
