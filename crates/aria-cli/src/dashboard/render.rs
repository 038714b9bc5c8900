//! Drawing the dashboard frame.

use aria_core::{display::Hours, Plan, TaskStatus};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::state::{DashboardState, Row};

const HELP: &str = "↑/↓ j/k move · space toggle · s save · q quit";

pub fn draw(frame: &mut Frame<'_>, plan: &Plan, state: &DashboardState) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [tree, details] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body);

    draw_header(frame, header, plan);
    draw_tree(frame, tree, plan, state);
    draw_details(frame, details, plan, state);
    draw_footer(frame, footer, state);
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, plan: &Plan) {
    let total = plan.task_count();
    let done = plan.completed_count();
    let ratio = if total == 0 {
        0.0
    } else {
        done as f64 / total as f64
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" 🎯 {} ", plan.goal),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(format!(
            "{done}/{total} tasks · {} hours",
            Hours(plan.total_hours)
        ));
    frame.render_widget(gauge, area);
}

fn draw_tree(frame: &mut Frame<'_>, area: Rect, plan: &Plan, state: &DashboardState) {
    let items: Vec<ListItem<'_>> = state
        .rows()
        .iter()
        .map(|row| match *row {
            Row::Module(m) => {
                let module = &plan.modules[m];
                ListItem::new(Line::from(Span::styled(
                    format!("📦 {} ({}h)", module.name, Hours(module.estimated_hours)),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )))
            }
            Row::Task(m, t) => {
                let task = &plan.modules[m].tasks[t];
                let color = match task.status {
                    TaskStatus::Completed => Color::Green,
                    TaskStatus::Pending => Color::Gray,
                };
                ListItem::new(Line::from(vec![
                    Span::raw("   "),
                    Span::styled(task.status.icon().to_string(), Style::default().fg(color)),
                    Span::raw(format!(" {}", task.title)),
                ]))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Tasks "))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default().with_selected(Some(state.selected()));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_details(frame: &mut Frame<'_>, area: Rect, plan: &Plan, state: &DashboardState) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    match (state.selected_task(plan), state.selected_row()) {
        (Some(task), _) => {
            lines.push(Line::from(Span::styled(task.title.clone(), label)));
            lines.push(Line::default());
            lines.push(Line::from(format!("Status:   {}", task.status.with_icon())));
            lines.push(Line::from(format!("Priority: {}", task.priority)));
            lines.push(Line::from(format!("Estimate: {}h", Hours(task.estimated_hours))));
            if !task.dependencies.is_empty() {
                lines.push(Line::from(format!("Depends:  {}", task.dependencies.join(", "))));
            }
            if !task.description.is_empty() {
                lines.push(Line::default());
                lines.push(Line::from(task.description.clone()));
            }
            if !task.acceptance_criteria.is_empty() {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled("Acceptance criteria", label)));
                lines.extend(
                    task.acceptance_criteria
                        .iter()
                        .map(|c| Line::from(format!("  • {c}"))),
                );
            }
        }
        (None, Some(Row::Module(m))) => {
            let module = &plan.modules[m];
            let done = module.tasks.iter().filter(|t| t.is_completed()).count();
            lines.push(Line::from(Span::styled(module.name.clone(), label)));
            lines.push(Line::default());
            lines.push(Line::from(format!("Tasks:    {done}/{}", module.tasks.len())));
            lines.push(Line::from(format!("Estimate: {}h", Hours(module.estimated_hours))));
            if !module.description.is_empty() {
                lines.push(Line::default());
                lines.push(Line::from(module.description.clone()));
            }
        }
        _ => lines.push(Line::from("This plan has no modules.")),
    }

    let details = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .wrap(Wrap { trim: false });
    frame.render_widget(details, area);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, state: &DashboardState) {
    let mut spans = vec![Span::styled(HELP, Style::default().fg(Color::DarkGray))];
    if state.dirty {
        spans.push(Span::styled("  [modified]", Style::default().fg(Color::Yellow)));
    }
    if let Some(message) = &state.message {
        spans.push(Span::raw(format!("  {message}")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
