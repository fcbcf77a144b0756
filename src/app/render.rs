//! Rendering helpers for the event loop

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::core::{Engine, ScrollAlign, ScrollRequest};

/// Render a complete frame: the item list and a status line
pub fn render_frame(frame: &mut Frame, engine: &Engine, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    render_items(frame, engine, list_state, chunks[0]);
    render_status(frame, engine, chunks[1]);
}

fn render_items(frame: &mut Frame, engine: &Engine, list_state: &mut ListState, area: Rect) {
    let tree = engine.tree();
    let current = tree.current();

    let items: Vec<ListItem> = engine
        .visible_sequence()
        .iter()
        .filter_map(|id| tree.get(*id).map(|item| (*id, item)))
        .map(|(id, item)| {
            let indent = "  ".repeat(tree.depth(id));
            let icon = match (item.is_container(), item.is_collapsed()) {
                (true, true) => "▸ ",
                (true, false) => "▾ ",
                _ => "  ",
            };
            let mut spans = vec![Span::raw(indent), Span::raw(icon)];

            let mut title_style = Style::default();
            if current == Some(id) {
                title_style = title_style.add_modifier(Modifier::BOLD);
            }
            if engine.is_selected(id) {
                title_style = title_style.fg(Color::Yellow);
            }
            if engine.yanked().contains(&id) {
                title_style = title_style.add_modifier(Modifier::ITALIC);
            }
            spans.push(Span::styled(item.title.clone(), title_style));

            if item.is_leaf() && item.is_pinned() && item.parent().is_none() {
                spans.push(Span::styled(" 📌", Style::default().fg(Color::DarkGray)));
            }
            if let Some(c) = engine.marks().mark_of(id) {
                spans.push(Span::styled(
                    format!(" '{}", c),
                    Style::default().fg(Color::Magenta),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Tabs ");
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    // Highlight while navigating, otherwise follow the current item
    let focus = engine
        .highlight()
        .or_else(|| current.and_then(|id| tree.nearest_visible_index(id)));
    list_state.select(focus);

    frame.render_stateful_widget(list, area, list_state);
}

fn render_status(frame: &mut Frame, engine: &Engine, area: Rect) {
    let status = engine.status();
    let style = if engine.mode().is_active() {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default()
    };
    let text = if status.to_string().is_empty() {
        " ctrl+space: navigate  q: quit".to_string()
    } else {
        format!(" {}", status)
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Adjust the list offset so the requested item sits where asked
pub fn apply_scroll(
    engine: &Engine,
    request: ScrollRequest,
    list_state: &mut ListState,
    viewport_height: usize,
) {
    let Some(index) = engine.tree().nearest_visible_index(request.item) else {
        return;
    };
    let offset = match request.align {
        ScrollAlign::Top => index,
        ScrollAlign::Center => index.saturating_sub(viewport_height / 2),
        ScrollAlign::Bottom => index.saturating_sub(viewport_height.saturating_sub(1)),
    };
    *list_state.offset_mut() = offset;
}
