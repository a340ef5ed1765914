use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

pub const DASHBOARD_TITLE: &str = "Nifty 50";
pub const WELCOME_TEXT: &str = "Welcome to the Stock Dashboard! This dashboard provides information about Nifty 50 stocks. Explore the performance of Nifty50 stocks from March 2022 to March 2023.";

/// Lower half of the screen, cycled with Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentPage {
    #[default]
    Tables,
    Price,
    Candles,
}

impl ContentPage {
    pub const ALL: [ContentPage; 3] = [ContentPage::Tables, ContentPage::Price, ContentPage::Candles];

    pub fn title(&self) -> &'static str {
        match self {
            ContentPage::Tables => "Financials",
            ContentPage::Price => "Stock Price",
            ContentPage::Candles => "Candlestick",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ContentPage::Tables => 0,
            ContentPage::Price => 1,
            ContentPage::Candles => 2,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Screen regions for one frame
pub struct DashboardLayout {
    pub header: Rect,
    pub selector: Rect,
    pub company_text: Rect,
    pub tab_bar: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(rows[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(10), // Description and metrics
                Constraint::Length(3),  // Tab bar
                Constraint::Min(0),     // Content
            ])
            .split(columns[1]);

        Self {
            header: rows[0],
            selector: columns[0],
            company_text: right[0],
            tab_bar: right[1],
            content: right[2],
            status_bar: rows[2],
        }
    }

    /// The three financial tables stacked in the content area
    pub fn table_areas(&self) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(self.content);
        [chunks[0], chunks[1], chunks[2]]
    }

    pub fn render_header(&self, f: &mut Frame) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                DASHBOARD_TITLE,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(WELCOME_TEXT),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));

        f.render_widget(header, self.header);
    }

    pub fn render_tab_bar(&self, f: &mut Frame, page: ContentPage) {
        let titles: Vec<&str> = ContentPage::ALL.iter().map(|p| p.title()).collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .select(page.index());

        f.render_widget(tabs, self.tab_bar);
    }

    pub fn render_status_bar(&self, f: &mut Frame, status_text: &str) {
        let status_content = vec![Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" move • ", Style::default().fg(Color::Gray)),
            Span::styled("/", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" search • ", Style::default().fg(Color::Gray)),
            Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(" select • ", Style::default().fg(Color::Gray)),
            Span::styled("Tab", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" switch page • ", Style::default().fg(Color::Gray)),
            Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" scroll • ", Style::default().fg(Color::Gray)),
            Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(" quit  ", Style::default().fg(Color::Gray)),
            Span::styled(status_text.to_string(), Style::default().fg(Color::Cyan)),
        ])];

        let paragraph = Paragraph::new(status_content)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));

        f.render_widget(paragraph, self.status_bar);
    }
}
