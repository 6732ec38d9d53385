use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::controller::FeedStatus;
use crate::domain::Article;
use crate::tui::app::{screen, InputMode, Screen, TuiApp};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;

pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let has_headline = app.state.headline.is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                  // Search bar
            Constraint::Length(if has_headline { 6 } else { 0 }), // Headline
            Constraint::Min(5),                                     // Articles
            Constraint::Length(1),                                  // Status bar
        ])
        .split(frame.area());

    render_search_bar(frame, app, chunks[0]);

    match screen(&app.state) {
        Screen::Loading => {
            app.viewport_rows = 0;
            render_centered(frame, chunks[2], "Loading news...", Style::default().fg(ACCENT));
        }
        Screen::Error(message) => {
            app.viewport_rows = 0;
            let text = format!("{}\n\nPress R to retry", message);
            render_centered(frame, chunks[2], &text, Style::default().fg(Color::Red));
        }
        Screen::Content { .. } => {
            if let Some(headline) = &app.state.headline {
                render_headline(frame, headline, chunks[1]);
            }
            render_articles(frame, app, chunks[2]);
        }
    }

    render_status_bar(frame, app, chunks[3]);
}

fn render_search_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let editing = app.input_mode == InputMode::Search;
    let (text, style) = if editing {
        (format!("{}_", app.search_input), Style::default())
    } else if let Some(query) = &app.active_query {
        (query.clone(), Style::default())
    } else {
        ("Search News...".to_string(), Style::default().fg(MUTED))
    };

    let border = if editing { ACCENT } else { MUTED };
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    frame.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn render_headline(frame: &mut Frame, headline: &Article, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        headline.display_title().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let meta = [headline.byline(), headline.display_published()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" | ");
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(meta, Style::default().fg(Color::Yellow))));
    }
    if let Some(description) = &headline.description {
        lines.push(Line::from(description.clone()));
    }

    let block = Block::default()
        .title(" Headline ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_articles(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.viewport_rows = area.height.saturating_sub(2) as usize;

    let title = match &app.active_query {
        Some(query) => format!(" Results for \"{}\" ({}) ", query, app.state.articles.len()),
        None => format!(" Latest ({}) ", app.state.articles.len()),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    // Errors with nothing listed get the full error screen instead.
    if app.state.articles.is_empty() {
        frame.render_widget(
            Paragraph::new("No articles")
                .style(Style::default().fg(MUTED))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app
        .state
        .articles
        .iter()
        .map(|article| {
            let date = article
                .published_at
                .map(|d| d.format("%d/%m").to_string())
                .unwrap_or_else(|| "     ".to_string());
            let source = article.source_name.as_deref().unwrap_or("");

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", date), Style::default().fg(MUTED)),
                Span::raw(article.display_title().to_string()),
                Span::styled(format!("  {}", source), Style::default().fg(Color::Yellow)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(ACCENT)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let banner = match screen(&app.state) {
        Screen::Content { banner } => banner,
        _ => None,
    };

    let (status, fg) = if app.input_mode == InputMode::Search {
        ("Enter:Search  Esc:Cancel".to_string(), Color::White)
    } else if let Some(error) = banner {
        (format!("{}  (R to refresh)", error), Color::Red)
    } else if let Some(msg) = &app.status_message {
        (msg.clone(), Color::White)
    } else {
        let text = match app.state.status() {
            FeedStatus::Refreshing => "Refreshing...",
            FeedStatus::Searching => "Searching...",
            FeedStatus::Paginating => "Loading more...",
            FeedStatus::EndOfFeed => "End of feed",
            FeedStatus::Error | FeedStatus::Idle => {
                "j/k:Nav  n/p:Page  /:Search  o:Open  R:Refresh  m:More  q:Quit"
            }
        };
        (text.to_string(), Color::White)
    };

    let paragraph = Paragraph::new(status).style(Style::default().fg(fg).bg(MUTED));
    frame.render_widget(paragraph, area);
}

fn render_centered(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED));
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    use crate::controller::ViewState;

    fn draw(app: &mut TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_headline_only_hides_error() {
        let mut app = TuiApp::new();
        app.apply_state(ViewState {
            headline: Some(Article::new("Top story", "https://example.com/top")),
            error_message: Some("HTTP status 503".into()),
            is_end_reached: true,
            ..Default::default()
        });

        let screen = draw(&mut app);
        assert!(screen.contains("Top story"));
        assert!(screen.contains("No articles"));
        assert!(!screen.contains("HTTP status 503"));
    }

    #[test]
    fn test_error_with_nothing_listed_offers_retry() {
        let mut app = TuiApp::new();
        app.apply_state(ViewState {
            error_message: Some("credential not configured".into()),
            is_end_reached: true,
            ..Default::default()
        });

        let screen = draw(&mut app);
        assert!(screen.contains("credential not configured"));
        assert!(screen.contains("Press R to retry"));
    }
}
