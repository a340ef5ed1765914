use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{debug, info};

use crate::models::{Datasets, Selection, TableKind};
use crate::ui::events::{map_key, poll_key, AppAction};
use crate::ui::layout::{ContentPage, DashboardLayout};
use crate::ui::panels::{CandlestickPanel, CompanyTextPanel, PriceLinePanel, TablePanel};
use crate::ui::selector::CompanySelector;
use crate::ui::state::SelectionState;
use crate::ui::view::{PanelId, PanelPayload, ViewManager};
use crate::views::{evaluate_all, DashboardSnapshot};

const TABLE_PANELS: [PanelId; 3] = [PanelId::Quarterly, PanelId::ProfitLoss, PanelId::Shareholding];

fn table_panel(kind: TableKind) -> PanelId {
    match kind {
        TableKind::Quarterly => PanelId::Quarterly,
        TableKind::ProfitLoss => PanelId::ProfitLoss,
        TableKind::Shareholding => PanelId::Shareholding,
    }
}

pub struct DashboardApp {
    data: Arc<Datasets>,
    pub selection: SelectionState,
    pub selector: CompanySelector,
    pub views: ViewManager,
    pub page: ContentPage,
    pub should_quit: bool,
}

impl DashboardApp {
    pub fn new(data: Arc<Datasets>) -> Self {
        let mut views = ViewManager::new();
        views.add_view(PanelId::CompanyText, Box::new(CompanyTextPanel::new(data.clone())));
        for kind in TableKind::ALL {
            views.add_view(table_panel(kind), Box::new(TablePanel::new(data.clone(), kind)));
        }
        views.add_view(PanelId::PriceLine, Box::new(PriceLinePanel::new(data.clone())));
        views.add_view(PanelId::Candlestick, Box::new(CandlestickPanel::new(data.clone())));
        views.set_focus(Some(PanelId::Quarterly));

        Self {
            selector: CompanySelector::new(data.company_names.clone()),
            data,
            selection: SelectionState::new(),
            views,
            page: ContentPage::default(),
            should_quit: false,
        }
    }

    pub fn current(&self) -> &Selection {
        self.selection.current()
    }

    /// Select a company and push the change to every panel
    pub fn select_company(&mut self, name: &str) -> Result<bool> {
        if !self.selection.select(name) {
            return Ok(false);
        }
        self.selector.focus_name(name);
        info!("📈 Selected {}", name);
        self.process_updates()?;
        Ok(true)
    }

    pub fn clear_selection(&mut self) -> Result<bool> {
        if !self.selection.clear() {
            return Ok(false);
        }
        self.process_updates()?;
        Ok(true)
    }

    /// Fan every pending selection update out to the panels
    pub fn process_updates(&mut self) -> Result<usize> {
        let mut delivered = 0;
        for update in self.selection.drain_updates() {
            delivered += self.views.dispatch(&update)?;
        }
        Ok(delivered)
    }

    pub fn handle_action(&mut self, action: AppAction) -> Result<()> {
        debug!("Action: {:?}", action);
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::SelectorNext => self.selector.next(),
            AppAction::SelectorPrevious => self.selector.previous(),
            AppAction::Confirm => {
                if let Some(name) = self.selector.selected_name().map(str::to_string) {
                    self.select_company(&name)?;
                }
            }
            AppAction::StartSearch => self.selector.start_search(),
            AppAction::FilterPush(c) => self.selector.push_char(c),
            AppAction::FilterPop => self.selector.pop_char(),
            AppAction::Clear => {
                if !self.selector.clear_filter() {
                    self.clear_selection()?;
                }
            }
            AppAction::NextPage => self.page = self.page.next(),
            AppAction::PreviousPage => self.page = self.page.previous(),
            AppAction::FocusNext => self.cycle_table_focus(1),
            AppAction::FocusPrevious => self.cycle_table_focus(TABLE_PANELS.len() - 1),
            AppAction::Scroll(key) => {
                if self.page == ContentPage::Tables {
                    self.views.handle_focused_key(key)?;
                }
            }
        }
        Ok(())
    }

    fn cycle_table_focus(&mut self, step: usize) {
        let current = self
            .views
            .focused()
            .and_then(|id| TABLE_PANELS.iter().position(|panel| *panel == id))
            .unwrap_or(0);
        let next = TABLE_PANELS[(current + step) % TABLE_PANELS.len()];
        self.views.set_focus(Some(next));
    }

    /// Payloads for the current selection, straight from the binders
    pub fn snapshot(&self) -> DashboardSnapshot {
        evaluate_all(self.selection.current(), &self.data)
    }

    /// Payloads as the panels currently hold them; `None` if a panel is missing
    pub fn displayed_snapshot(&self) -> Option<DashboardSnapshot> {
        let table = |id: PanelId| match self.views.payload(id) {
            Some(PanelPayload::Table(view)) => Some(view.cloned()),
            _ => None,
        };
        let chart = |id: PanelId| match self.views.payload(id) {
            Some(PanelPayload::Chart(spec)) => Some(spec.clone()),
            _ => None,
        };
        let text = match self.views.payload(PanelId::CompanyText)? {
            PanelPayload::Text(text) => text.clone(),
            _ => return None,
        };

        Some(DashboardSnapshot {
            selection: self.selection.current().clone(),
            text,
            quarterly: table(PanelId::Quarterly)?,
            profit_loss: table(PanelId::ProfitLoss)?,
            shareholding: table(PanelId::Shareholding)?,
            price_line: chart(PanelId::PriceLine)?,
            candlestick: chart(PanelId::Candlestick)?,
        })
    }

    pub fn status_text(&self) -> String {
        match self.views.get_focused_status() {
            Some(focused) if self.page == ContentPage::Tables => {
                format!("{} | {}", self.selection.get_status_text(), focused)
            }
            _ => self.selection.get_status_text(),
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let layout = DashboardLayout::new(f.area());

        layout.render_header(f);
        self.selector
            .render(f, layout.selector, self.selection.current().name());
        self.views.render_view(PanelId::CompanyText, f, layout.company_text);
        layout.render_tab_bar(f, self.page);

        match self.page {
            ContentPage::Tables => {
                for (id, area) in TABLE_PANELS.iter().zip(layout.table_areas()) {
                    self.views.render_view(*id, f, area);
                }
            }
            ContentPage::Price => self.views.render_view(PanelId::PriceLine, f, layout.content),
            ContentPage::Candles => self.views.render_view(PanelId::Candlestick, f, layout.content),
        }

        layout.render_status_bar(f, &self.status_text());
    }
}

/// Run the dashboard until the user quits
pub fn run_app(data: Arc<Datasets>, initial: Option<String>) -> Result<()> {
    let mut app = DashboardApp::new(data);
    if let Some(name) = initial {
        app.select_company(&name)?;
    }

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = loop {
        if let Err(e) = terminal.draw(|f| app.draw(f)) {
            break Err(e.into());
        }

        match poll_key(Duration::from_millis(250)) {
            Ok(Some(key)) => {
                if let Some(action) = map_key(key, app.selector.is_filtering()) {
                    if let Err(e) = app.handle_action(action) {
                        break Err(e);
                    }
                }
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(None) => {}
            Err(e) => break Err(e),
        }
    };

    // Cleanup terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}
