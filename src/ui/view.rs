use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{prelude::Rect, Frame};

use crate::ui::state::StateUpdate;
use crate::views::{ChartSpec, CompanyText, TableView};

/// Identifies one display region of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    CompanyText,
    Quarterly,
    ProfitLoss,
    Shareholding,
    PriceLine,
    Candlestick,
}

/// What a panel is currently showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelPayload<'a> {
    Text(&'a CompanyText),
    Table(Option<&'a TableView>),
    Chart(&'a ChartSpec),
}

/// View contract for every dashboard panel
pub trait View {
    /// Render the view
    fn render(&self, f: &mut Frame, area: Rect);

    /// The payload last produced by the view's binder
    fn payload(&self) -> PanelPayload<'_>;

    /// Get the view status text
    fn get_status(&self) -> String;

    /// Handle view-specific key events
    fn handle_key(&mut self, _key: KeyCode) -> Result<bool> {
        Ok(false) // Default: not handled
    }

    /// Highlight the view as the target of scroll keys
    fn set_focused(&mut self, _focused: bool) {}

    /// Recompute the view's payload after a state change
    fn handle_state_update(&mut self, update: &StateUpdate) -> Result<bool>;
}

/// Holds the panels and fans state updates out to all of them
pub struct ViewManager {
    views: Vec<(PanelId, Box<dyn View>)>,
    focused: Option<PanelId>,
}

impl ViewManager {
    pub fn new() -> Self {
        Self {
            views: Vec::new(),
            focused: None,
        }
    }

    pub fn add_view(&mut self, id: PanelId, view: Box<dyn View>) {
        self.views.push((id, view));
    }

    pub fn get_view(&self, id: PanelId) -> Option<&dyn View> {
        self.views
            .iter()
            .find(|(panel, _)| *panel == id)
            .map(|(_, view)| view.as_ref())
    }

    fn get_view_mut(&mut self, id: PanelId) -> Option<&mut Box<dyn View>> {
        self.views
            .iter_mut()
            .find(|(panel, _)| *panel == id)
            .map(|(_, view)| view)
    }

    pub fn payload(&self, id: PanelId) -> Option<PanelPayload<'_>> {
        self.get_view(id).map(|view| view.payload())
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Deliver an update to every view; returns how many handled it
    pub fn dispatch(&mut self, update: &StateUpdate) -> Result<usize> {
        let mut handled = 0;
        for (_, view) in &mut self.views {
            if view.handle_state_update(update)? {
                handled += 1;
            }
        }
        Ok(handled)
    }

    pub fn render_view(&self, id: PanelId, f: &mut Frame, area: Rect) {
        if let Some(view) = self.get_view(id) {
            view.render(f, area);
        }
    }

    pub fn focused(&self) -> Option<PanelId> {
        self.focused
    }

    pub fn set_focus(&mut self, id: Option<PanelId>) {
        self.focused = id;
        for (panel, view) in &mut self.views {
            view.set_focused(Some(*panel) == id);
        }
    }

    /// Handle key event for the focused view
    pub fn handle_focused_key(&mut self, key: KeyCode) -> Result<bool> {
        match self.focused {
            Some(id) => match self.get_view_mut(id) {
                Some(view) => view.handle_key(key),
                None => Ok(false),
            },
            None => Ok(false),
        }
    }

    pub fn get_focused_status(&self) -> Option<String> {
        self.focused
            .and_then(|id| self.get_view(id))
            .map(|view| view.get_status())
    }
}

impl Default for ViewManager {
    fn default() -> Self {
        Self::new()
    }
}
