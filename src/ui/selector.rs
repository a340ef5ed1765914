use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Company picker: the full name list narrowed by a type-to-search filter
pub struct CompanySelector {
    names: Vec<String>,
    filter: String,
    searching: bool,
    visible: Vec<usize>,
    selected_index: usize,
    matcher: SkimMatcherV2,
}

impl CompanySelector {
    /// `names` are shown in the given order while the filter is empty
    pub fn new(names: Vec<String>) -> Self {
        let visible = (0..names.len()).collect();
        Self {
            names,
            filter: String::new(),
            searching: false,
            visible,
            selected_index: 0,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// True while typed characters belong to the search box
    pub fn is_filtering(&self) -> bool {
        self.searching || !self.filter.is_empty()
    }

    /// Open the search box without typing into it yet
    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn visible_names(&self) -> Vec<&str> {
        self.visible.iter().map(|&i| self.names[i].as_str()).collect()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.visible
            .get(self.selected_index)
            .map(|&i| self.names[i].as_str())
    }

    pub fn push_char(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
    }

    pub fn pop_char(&mut self) {
        if self.filter.pop().is_some() {
            self.refilter();
        }
    }

    /// Close the search box; returns false when it was not open
    pub fn clear_filter(&mut self) -> bool {
        if !self.is_filtering() {
            return false;
        }
        self.searching = false;
        if !self.filter.is_empty() {
            self.filter.clear();
            self.refilter();
        }
        true
    }

    pub fn next(&mut self) {
        if !self.visible.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.visible.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.visible.is_empty() {
            self.selected_index = if self.selected_index == 0 {
                self.visible.len() - 1
            } else {
                self.selected_index - 1
            };
        }
    }

    /// Move the cursor onto `name` if it is currently visible
    pub fn focus_name(&mut self, name: &str) -> bool {
        match self.visible.iter().position(|&i| self.names[i] == name) {
            Some(position) => {
                self.selected_index = position;
                true
            }
            None => false,
        }
    }

    fn refilter(&mut self) {
        if self.filter.is_empty() {
            self.visible = (0..self.names.len()).collect();
        } else {
            let mut scored: Vec<(i64, usize)> = self
                .names
                .iter()
                .enumerate()
                .filter_map(|(i, name)| {
                    self.matcher
                        .fuzzy_match(name, &self.filter)
                        .map(|score| (score, i))
                })
                .collect();
            // best score first, ties keep list order
            scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
            self.visible = scored.into_iter().map(|(_, i)| i).collect();
        }
        self.selected_index = 0;
    }

    pub fn render(&self, f: &mut Frame, area: Rect, active: Option<&str>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let search_text = if self.is_filtering() {
            Line::from(format!("🔍 {}", self.filter))
        } else {
            Line::from(Span::styled(
                "Type or press / to search...",
                Style::default().fg(Color::DarkGray),
            ))
        };
        let search = Paragraph::new(search_text)
            .block(Block::default().borders(Borders::ALL).title("Search"))
            .style(Style::default().fg(if self.is_filtering() {
                Color::Cyan
            } else {
                Color::Gray
            }));
        f.render_widget(search, chunks[0]);

        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&i| {
                let name = self.names[i].as_str();
                let style = if Some(name) == active {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(Span::styled(name.to_string(), style)))
            })
            .collect();

        let title = format!("Companies ({}/{})", self.visible.len(), self.names.len());
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::LightBlue).fg(Color::Black))
            .highlight_symbol("→ ");

        let mut list_state = ListState::default();
        if !self.visible.is_empty() {
            list_state.select(Some(self.selected_index));
        }
        f.render_stateful_widget(list, chunks[1], &mut list_state);
    }
}
