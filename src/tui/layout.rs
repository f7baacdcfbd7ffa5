use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::Dashboard;
use crate::config::ColorConfig;
use crate::domain::{ContentItem, SourceType};
use crate::feed::{FeedView, Tab};
use crate::tui::app::TuiApp;

pub fn render(frame: &mut Frame, app: &mut TuiApp, dashboard: &Dashboard, colors: &ColorConfig) {
    let view = dashboard.view(&app.query);
    app.clamp(view.items.len());

    let stats_height = if app.query.tab == Tab::Feed { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header with search
            Constraint::Length(stats_height), // Stats row
            Constraint::Length(1),            // Filter bar
            Constraint::Percentage(45),       // Items
            Constraint::Min(6),               // Preview
            Constraint::Length(1),            // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], colors);
    if stats_height > 0 {
        render_stats(frame, &view, chunks[1], colors);
    }
    render_filter_bar(frame, app, chunks[2], colors);
    render_items_pane(frame, app, &view, chunks[3], colors);
    render_preview_pane(frame, app, &view, chunks[4], colors);
    render_status_bar(frame, app, dashboard, chunks[5], colors);

    if dashboard.workflow().is_open() {
        render_hook_modal(frame, dashboard, colors);
    }
    if let Some(toast) = dashboard.toast() {
        render_toast(frame, toast, chunks[5], colors);
    }
}

fn border_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn source_color(source: SourceType, colors: &ColorConfig) -> ratatui::style::Color {
    match source {
        SourceType::Reddit => colors.reddit_badge,
        SourceType::Newsletter => colors.newsletter_badge,
    }
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let tabs = [Tab::Feed, Tab::Saved]
        .iter()
        .map(|tab| {
            let label = match tab {
                Tab::Feed => " Dashboard ",
                Tab::Saved => " Saved Items ",
            };
            if *tab == app.query.tab {
                Span::styled(
                    label,
                    Style::default()
                        .bg(colors.selection_bg)
                        .fg(colors.selection_fg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(label)
            }
        })
        .collect::<Vec<_>>();

    let mut spans = tabs;
    spans.push(Span::raw("  Search: "));
    let cursor = if app.search_mode { "▏" } else { "" };
    spans.push(Span::styled(
        format!("{}{}", app.query.search, cursor),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let block = Block::default()
        .title(format!(" {} ", app.query.tab.title()))
        .borders(Borders::ALL)
        .border_style(border_style(app.search_mode, colors));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_stats(frame: &mut Frame, view: &FeedView, area: Rect, colors: &ColorConfig) {
    let cells = [
        ("Total Scraped", view.stats.total_projects),
        ("Saved Items", view.stats.saved),
        ("Hooks Created", view.stats.hooks),
        ("Pending Review", view.stats.pending),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((label, value), column) in cells.iter().zip(columns.iter()) {
        let block = Block::default()
            .title(format!(" {} ", label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.inactive_border));
        let paragraph = Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .block(block);
        frame.render_widget(paragraph, *column);
    }
}

fn render_filter_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let line = Line::from(vec![
        Span::raw(" Source: "),
        Span::styled(
            app.query.filter.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Sort by: "),
        Span::styled(app.sort.label(), Style::default().fg(colors.metrics)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_items_pane(
    frame: &mut Frame,
    app: &mut TuiApp,
    view: &FeedView,
    area: Rect,
    colors: &ColorConfig,
) {
    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|item| {
            let marker = if item.is_saved {
                Span::styled("♥ ", Style::default().fg(colors.saved_marker))
            } else {
                Span::raw("  ")
            };
            let badge = Span::styled(
                format!("{:<10} ", item.source_type.label()),
                Style::default().fg(source_color(item.source_type, colors)),
            );
            let date = Span::styled(
                format!("{:<12} ", item.published.display),
                Style::default().fg(colors.metrics),
            );
            let hooks = if item.hooks.is_empty() {
                Span::raw("")
            } else {
                Span::styled(
                    format!(" [{} hooks]", item.hooks.len()),
                    Style::default().fg(colors.hook_type),
                )
            };

            ListItem::new(Line::from(vec![
                marker,
                badge,
                date,
                Span::raw(item.title.clone()),
                hooks,
            ]))
        })
        .collect();

    let title = format!(
        " Items ({}) [{}/{}] ",
        view.items.len(),
        (app.item_index + 1).min(view.items.len()),
        view.items.len()
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(!app.search_mode, colors));

    if items.is_empty() {
        frame.render_widget(Paragraph::new("No items found.").block(block), area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.item_list_state);
}

fn render_preview_pane(
    frame: &mut Frame,
    app: &TuiApp,
    view: &FeedView,
    area: Rect,
    colors: &ColorConfig,
) {
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(border_style(false, colors));

    let content = match view.items.get(app.item_index) {
        Some(item) => item_text(item, colors),
        None => Text::from("No item selected"),
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn item_text<'a>(item: &'a ContentItem, colors: &ColorConfig) -> Text<'a> {
    let mut lines = vec![
        Line::from(Span::styled(
            item.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(item.excerpt.as_str()),
        Line::from(""),
    ];

    let metrics = item.metrics.summary();
    if !metrics.is_empty() {
        lines.push(Line::from(Span::styled(
            metrics,
            Style::default().fg(colors.metrics),
        )));
    }
    if !item.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            item.tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" "),
            Style::default().fg(colors.metrics),
        )));
    }
    if let Some(url) = &item.url {
        lines.push(Line::from(format!("Link: {}", url)));
    }
    if let Some(saved_at) = item.saved_at {
        lines.push(Line::from(Span::styled(
            format!("Saved {}", saved_at.format("%Y-%m-%d %H:%M")),
            Style::default().fg(colors.saved_marker),
        )));
    }

    Text::from(lines)
}

fn render_status_bar(
    frame: &mut Frame,
    app: &TuiApp,
    dashboard: &Dashboard,
    area: Rect,
    colors: &ColorConfig,
) {
    let status = if app.search_mode {
        "Type to search  Enter:Done  Esc:Clear".to_string()
    } else if dashboard.is_scraping() {
        "Scraping...".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if dashboard.workflow().is_open() {
        "g:Generate  j/k:Select  c:Copy  Esc:Close".to_string()
    } else {
        "j/k:Nav  Tab:Saved/Feed  /:Search  f:Source  o:Sort  s:Save  Enter:Hooks  i:Import  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));
    frame.render_widget(paragraph, area);
}

fn render_hook_modal(frame: &mut Frame, dashboard: &Dashboard, colors: &ColorConfig) {
    let workflow = dashboard.workflow();
    let Some(item) = workflow.item() else {
        return;
    };

    let area = centered_rect(80, 70, frame.area());
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .title(" Hook Generator ")
        .borders(Borders::ALL)
        .border_style(border_style(true, colors));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(inner);

    // Source content and trigger
    let mut source = vec![
        Line::from(Span::styled(
            item.source_type.label(),
            Style::default().fg(source_color(item.source_type, colors)),
        )),
        Line::from(Span::styled(
            item.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(item.excerpt.as_str()),
        Line::from(""),
    ];
    source.push(if workflow.is_generating() {
        Line::from(Span::styled(
            "Generating Magic...",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from("[g] Generate Variations")
    });

    let source_block = Block::default()
        .title(" Source Content ")
        .borders(Borders::RIGHT)
        .border_style(border_style(false, colors));
    frame.render_widget(
        Paragraph::new(source)
            .block(source_block)
            .wrap(Wrap { trim: true }),
        columns[0],
    );

    // Results
    let results = workflow.results();
    let title = if results.is_empty() {
        " Ready to Create "
    } else {
        " Generated Variations "
    };
    let results_block = Block::default().title(title);

    if results.is_empty() {
        let hint = if workflow.is_generating() {
            ""
        } else {
            "Press \"g\" to create hooks"
        };
        frame.render_widget(Paragraph::new(hint).block(results_block), columns[1]);
        return;
    }

    let mut lines = Vec::new();
    for (index, hook) in results.iter().enumerate() {
        let selected = index == workflow.selected_index();
        let pointer = if selected { "> " } else { "  " };
        let copied = if workflow.copied_hook() == Some(hook.id.as_str()) {
            Span::styled(" ✓ copied", Style::default().fg(colors.copied))
        } else {
            Span::raw("")
        };

        lines.push(Line::from(vec![
            Span::raw(pointer),
            Span::styled(
                hook.hook_type.label().to_uppercase(),
                Style::default()
                    .fg(colors.hook_type)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} chars", hook.character_count),
                Style::default().fg(colors.metrics),
            ),
            copied,
        ]));

        let text_style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", hook.text),
            text_style,
        )));
        lines.push(Line::from(""));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(results_block)
            .wrap(Wrap { trim: false }),
        columns[1],
    );
}

fn render_toast(frame: &mut Frame, message: &str, status_area: Rect, colors: &ColorConfig) {
    let width = (message.chars().count() as u16 + 4).min(status_area.width);
    let area = Rect {
        x: status_area.right().saturating_sub(width),
        y: status_area.y,
        width,
        height: 1,
    };

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!(" ✓ {}", message))
            .style(Style::default().fg(colors.toast_fg).bg(colors.toast_bg)),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(80, 70, area);
        assert!(rect.x >= 10 && rect.right() <= 90);
        assert!(rect.y >= 7 && rect.bottom() <= 43);
    }
}
