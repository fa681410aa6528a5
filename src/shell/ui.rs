// Shell rendering - tab bar, feature content, status bar, logs overlay
//
// Called on every frame. The shell draws the chrome; the selected feature
// draws its own root view into the content slot.

use super::app::Shell;
use crate::logging::LogLevel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs},
    Frame,
};

/// Main render function - called on every frame
pub fn draw(f: &mut Frame, shell: &Shell) {
    // Theme background for the entire frame
    let bg_block = Block::default().style(Style::default().bg(shell.theme.bg));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tab bar
            Constraint::Min(3),    // feature content
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], shell);
    render_content(f, chunks[1], shell);
    render_status_bar(f, chunks[2], shell);

    // Logs overlay on top of everything
    if shell.show_logs {
        render_logs_overlay(f, shell);
    }
}

/// Render the tab navigation bar from the registry, in display order
fn render_tab_bar(f: &mut Frame, area: Rect, shell: &Shell) {
    let titles: Vec<String> = shell
        .registry
        .iter()
        .enumerate()
        .map(|(i, feature)| format!(" {}│{} {} ", i + 1, feature.tab_icon(), feature.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(shell.theme.border_style())
                .title(" Wefriendz "),
        )
        .select(shell.effective_index())
        .style(Style::default().fg(shell.theme.fg))
        .highlight_style(shell.theme.tab_highlight());

    f.render_widget(tabs, area);
}

/// Render the selected feature's root view
fn render_content(f: &mut Frame, area: Rect, shell: &Shell) {
    match shell.registry.at(shell.effective_index()) {
        Some(feature) => feature.render(f, area, &shell.theme),
        None => {
            // Degenerate but valid: an empty registry renders an empty shell
            let msg = Paragraph::new("No features registered")
                .style(shell.theme.dim_style())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(shell.theme.border_style()),
                );
            f.render_widget(msg, area);
        }
    }
}

/// Render the status bar: uptime, selection, theme, key hints
fn render_status_bar(f: &mut Frame, area: Rect, shell: &Shell) {
    let selection = shell.selection().unwrap_or("-");
    let status = format!(
        " {} │ tab: {} │ theme: {} │ Tab/←→ switch · 1-{} jump · l logs · t theme · q quit",
        shell.uptime(),
        selection,
        shell.theme_kind.name(),
        shell.registry.len().max(1),
    );

    let bar = Paragraph::new(status).style(shell.theme.dim_style());
    f.render_widget(bar, area);
}

/// Render the system-logs overlay fed by the tracing capture layer
fn render_logs_overlay(f: &mut Frame, shell: &Shell) {
    let area = centered_rect(80, 60, f.area());

    let entries = shell.log_buffer.get_all();
    let height = area.height.saturating_sub(2) as usize;
    // Show the tail that fits the overlay
    let skip = entries.len().saturating_sub(height);

    let items: Vec<ListItem> = entries
        .iter()
        .skip(skip)
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Error => Color::Red,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Info => shell.theme.accent,
                LogLevel::Debug | LogLevel::Trace => shell.theme.dim,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    shell.theme.dim_style(),
                ),
                Span::styled(
                    format!("{:5} ", entry.level.as_str()),
                    Style::default().fg(level_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(shell.theme.fg)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(shell.theme.border_style())
            .title(" System Logs (l to close) ")
            .style(Style::default().bg(shell.theme.bg)),
    );

    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

/// Centered rectangle helper for overlays
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
