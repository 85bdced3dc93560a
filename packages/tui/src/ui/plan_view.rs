use crate::state::{AppState, Tab};
use archiai_plan::{format_usd, placeholder, ArchitecturePlan, Consideration};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Tabs, Wrap};

/// Render a generated plan: tab bar plus the selected section
pub fn render_with_area(frame: &mut Frame, state: &AppState, plan: &ArchitecturePlan, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let titles: Vec<Line> = Tab::all()
        .into_iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab)))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", plan.project_name)),
        )
        .select(state.current_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let body = chunks[1];
    if state.current_tab == Tab::Cost && !plan.cost_estimation.breakdown.is_empty() {
        render_cost(frame, state, plan, body);
        return;
    }

    let lines = tab_lines(state.current_tab, plan);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", state.current_tab)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));
    frame.render_widget(paragraph, body);
}

/// Text content of a tab
pub fn tab_lines(tab: Tab, plan: &ArchitecturePlan) -> Vec<Line<'_>> {
    match tab {
        Tab::Overview => overview_lines(plan),
        Tab::Diagram => diagram_lines(plan),
        Tab::TechStack => tech_stack_lines(plan),
        Tab::ProsCons => {
            let mut lines = bullet_section("Pros", Color::Green, &plan.pros, "Pros data");
            lines.push(Line::from(""));
            lines.extend(bullet_section("Cons", Color::Red, &plan.cons, "Cons data"));
            lines
        }
        Tab::Considerations => {
            let mut lines = consideration_lines(&plan.scalability, "Scalability Plan", "Scalability plan");
            lines.push(Line::from(""));
            lines.extend(consideration_lines(
                &plan.security,
                "Security Considerations",
                "Security plan",
            ));
            lines
        }
        Tab::Roadmap => roadmap_lines(plan),
        Tab::Cost => vec![muted(placeholder("Cost estimation"))],
        Tab::Prd => prd_lines(plan),
    }
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn muted(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(Color::DarkGray)))
}

fn bullet(text: &str, color: Color) -> Line<'_> {
    Line::from(vec![
        Span::styled("  • ", Style::default().fg(color)),
        Span::raw(text),
    ])
}

fn overview_lines(plan: &ArchitecturePlan) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(Span::styled(
        plan.project_name.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if !plan.project_summary.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            plan.project_summary.as_str(),
            Style::default().add_modifier(Modifier::ITALIC).fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));
    lines.extend(plan.overview.lines().map(Line::from));
    lines
}

fn diagram_lines(plan: &ArchitecturePlan) -> Vec<Line<'_>> {
    if plan.diagram.trim().is_empty() {
        return vec![muted(placeholder("Diagram"))];
    }
    let mut lines = vec![
        muted("Mermaid source (paste into https://mermaid.live to render):"),
        Line::from(""),
    ];
    lines.extend(
        plan.diagram
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Magenta)))),
    );
    lines
}

fn tech_stack_lines(plan: &ArchitecturePlan) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for (label, items) in plan.tech_stack.categories() {
        if items.is_empty() {
            continue;
        }
        lines.push(heading(label));
        lines.extend(items.iter().map(|item| bullet(item, Color::Cyan)));
        lines.push(Line::from(""));
    }
    if lines.is_empty() {
        lines.push(muted(placeholder("Tech stack")));
    }
    lines
}

fn bullet_section<'a>(
    title: &'static str,
    color: Color,
    items: &'a [String],
    subject: &str,
) -> Vec<Line<'a>> {
    let mut lines = vec![heading(title)];
    if items.is_empty() {
        lines.push(muted(placeholder(subject)));
    }
    lines.extend(items.iter().map(|item| bullet(item, color)));
    lines
}

fn consideration_lines<'a>(
    consideration: &'a Consideration,
    fallback_title: &'a str,
    subject: &str,
) -> Vec<Line<'a>> {
    let mut lines = vec![heading(consideration.title().unwrap_or(fallback_title))];
    let points = consideration.points();
    if points.is_empty() {
        lines.push(muted(placeholder(subject)));
    }
    lines.extend(points.into_iter().map(|p| bullet(p, Color::Yellow)));
    lines
}

fn roadmap_lines(plan: &ArchitecturePlan) -> Vec<Line<'_>> {
    if plan.roadmap.is_empty() {
        return vec![muted(placeholder("Roadmap data"))];
    }

    let mut lines = Vec::new();
    for phase in &plan.roadmap {
        let mut header = vec![Span::styled(
            phase.phase.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        let duration = phase.duration.trim();
        if !duration.is_empty() {
            header.push(Span::styled(
                format!("  ({})", duration),
                Style::default().fg(Color::Gray),
            ));
        }
        lines.push(Line::from(header));
        lines.extend(phase.tasks.iter().map(|task| bullet(task, Color::Blue)));
        lines.push(Line::from(""));
    }
    lines
}

fn prd_lines(plan: &ArchitecturePlan) -> Vec<Line<'_>> {
    let prd = &plan.prd;
    if prd.is_empty() {
        return vec![muted(placeholder("PRD"))];
    }

    let mut lines = vec![heading("1. Introduction")];
    lines.extend(prd.introduction.lines().map(Line::from));

    lines.push(Line::from(""));
    lines.push(heading("2. User Personas"));
    if prd.user_personas.is_empty() {
        lines.push(muted(placeholder("User personas")));
    }
    for (i, persona) in prd.user_personas.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("2.{} {}", i + 1, persona.name),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("    {}", persona.description)));
    }

    lines.push(Line::from(""));
    lines.push(heading("3. Features"));
    if prd.features.is_empty() {
        lines.push(muted(placeholder("Features")));
    }
    for (i, feature) in prd.features.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("3.{} {}", i + 1, feature.title),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("    {}", feature.description)));
        lines.extend(feature.user_stories.iter().map(|s| bullet(s, Color::Green)));
    }

    lines.push(Line::from(""));
    lines.push(heading("4. Non-Functional Requirements"));
    if prd.non_functional_requirements.is_empty() {
        lines.push(muted(placeholder("Non-functional requirements")));
    }
    for (i, nfr) in prd.non_functional_requirements.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("4.{} {}: ", i + 1, nfr.kind),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(nfr.details.as_str()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(muted("Press p to export the PRD as Markdown."));
    lines
}

fn render_cost(frame: &mut Frame, state: &AppState, plan: &ArchitecturePlan, area: Rect) {
    let cost = &plan.cost_estimation;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(cost.breakdown.len() as u16 + 4),
            Constraint::Min(6),
        ])
        .split(area);

    let title = if cost.title.trim().is_empty() {
        "Cost Estimation"
    } else {
        cost.title.as_str()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format_usd(cost.total()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("/month estimated total", Style::default().fg(Color::Gray)),
    ])];
    lines.push(Line::from(""));
    for item in &cost.breakdown {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<20}", item.category),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:>12}  ", format_usd(item.cost)),
                Style::default().fg(Color::Green),
            ),
            Span::styled(item.details.as_str(), Style::default().fg(Color::Gray)),
        ]));
    }

    let summary = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .scroll((state.scroll_offset, 0));
    frame.render_widget(summary, chunks[0]);

    let bars: Vec<Bar> = cost
        .breakdown
        .iter()
        .map(|item| {
            Bar::default()
                .value(item.cost.max(0.0).round() as u64)
                .label(Line::from(item.category.as_str()))
                .text_value(format_usd(item.cost))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Monthly breakdown (USD) "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::render_to_string;
    use archiai_plan::{parse_plan, CostItem, RoadmapPhase, TitledPoints};

    const PLAN_JSON: &str = r#"{
        "projectName": "Chat Hub",
        "projectSummary": "Group chat for remote teams.",
        "overview": "A WebSocket gateway fans messages out to subscribers.",
        "techStack": {"frontend": ["React"], "backend": ["Go"], "database": [], "devops": ["Docker"], "messaging": []},
        "pros": ["Low latency"],
        "cons": [],
        "diagram": "graph TD; Client-->Gateway;"
    }"#;

    fn state_with_plan() -> AppState {
        let mut state = AppState::new("gemini-2.5-flash");
        let ticket = state.session.begin("A real-time chat app");
        state.session.complete(ticket, parse_plan(PLAN_JSON));
        state
    }

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_first_tab_shows_overview() {
        let state = state_with_plan();
        let screen = render_to_string(&state, 120, 30);

        assert!(screen.contains("1 Overview"));
        assert!(screen.contains("A WebSocket gateway fans messages out to subscribers."));
    }

    #[test]
    fn test_tech_stack_skips_empty_categories() {
        let state = state_with_plan();
        let plan = state.plan().unwrap();
        let rendered = text(&tab_lines(Tab::TechStack, plan));

        assert!(rendered.contains("Frontend"));
        assert!(rendered.contains("DevOps"));
        assert!(!rendered.contains("Database"));
        assert!(!rendered.contains("Messaging"));
    }

    #[test]
    fn test_missing_sections_render_placeholders() {
        let state = state_with_plan();
        let plan = state.plan().unwrap();

        assert!(text(&tab_lines(Tab::ProsCons, plan)).contains("Cons data not available."));
        assert!(text(&tab_lines(Tab::Roadmap, plan)).contains("Roadmap data not available."));
        assert!(text(&tab_lines(Tab::Cost, plan)).contains("Cost estimation not available."));
        assert!(text(&tab_lines(Tab::Prd, plan)).contains("PRD not available."));
        assert!(text(&tab_lines(Tab::Considerations, plan)).contains("Security plan not available."));
    }

    #[test]
    fn test_considerations_use_titles() {
        let plan = ArchitecturePlan {
            scalability: Consideration::Titled(TitledPoints {
                title: "Scaling Out".into(),
                points: vec!["Stateless gateways".into()],
            }),
            ..Default::default()
        };
        let rendered = text(&tab_lines(Tab::Considerations, &plan));
        assert!(rendered.contains("Scaling Out"));
        assert!(rendered.contains("Stateless gateways"));
        assert!(rendered.contains("Security Considerations"));
    }

    #[test]
    fn test_cost_tab_shows_total_and_chart() {
        let mut plan = ArchitecturePlan {
            project_name: "Chat Hub".into(),
            ..Default::default()
        };
        plan.cost_estimation.breakdown = vec![
            CostItem {
                category: "Compute".into(),
                cost: 1200.0,
                details: "Gateways".into(),
            },
            CostItem {
                category: "Storage".into(),
                cost: 300.0,
                details: "Object storage".into(),
            },
        ];

        let mut state = AppState::new("gemini-2.5-flash");
        let ticket = state.session.begin("chat");
        state.session.complete(ticket, Ok(plan));
        state.select_tab(Tab::Cost);

        let screen = render_to_string(&state, 120, 40);
        assert!(screen.contains("$1,500/month estimated total"));
        assert!(screen.contains("Monthly breakdown (USD)"));
        assert!(screen.contains("Compute"));
    }

    #[test]
    fn test_roadmap_omits_blank_duration() {
        let plan = ArchitecturePlan {
            roadmap: vec![
                RoadmapPhase {
                    phase: "Phase 1: MVP".into(),
                    duration: "6 weeks".into(),
                    tasks: vec!["Gateway".into()],
                },
                RoadmapPhase {
                    phase: "Phase 2: Scale".into(),
                    duration: "  ".into(),
                    tasks: vec![],
                },
            ],
            ..Default::default()
        };
        let rendered = text(&tab_lines(Tab::Roadmap, &plan));

        assert!(rendered.contains("Phase 1: MVP  (6 weeks)"));
        assert!(rendered.contains("Phase 2: Scale\n"));
        assert!(!rendered.contains("()"));
    }
}
