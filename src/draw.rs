use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nfl_slate_api::{
    Game, Player, Position, RiskTag, SlateSnapshot, WeatherIcon, WeatherImpact, format_as_of,
    format_salary,
};

static TABS: &[&str; 3] = &["Slate", "Players", "Game Detail"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
                draw_status_line(f, layout.status, app);
            }

            let mut main = layout.main;
            if app.state.show_logs {
                let [content, logs] =
                    Layout::vertical([Constraint::Fill(1), Constraint::Length(8)]).areas(main);
                main = content;
                draw_logs(f, logs);
            }

            match app.state.active_tab {
                MenuItem::Slate => draw_slate(f, main, app),
                MenuItem::Players => draw_players(f, main, app),
                MenuItem::GameDetail => draw_game_detail(f, main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    main,
                    "Help: q=quit  1=Slate  2=Players  3=Game Detail  j/k=move  Enter=open\n\
                     Players: h/l=position  r=risk filter  s=sort\n\
                     Global: R=reload  f=full screen  \"=logs  ?=close help",
                ),
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Slate => 0,
        MenuItem::Players => 1,
        MenuItem::GameDetail => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }

    let line = if let Some(err) = app.state.last_error.as_deref() {
        Line::from(Span::styled(
            format!(" slate load failed: {err}"),
            Style::default().fg(Color::Red),
        ))
    } else {
        match app.state.slate.snapshot.as_ref() {
            Some(snapshot) => {
                let as_of = snapshot
                    .as_of
                    .map(format_as_of)
                    .unwrap_or_else(|| "unknown".to_string());
                Line::from(Span::styled(
                    format!(" Week {} slate · data as of {as_of}", snapshot.week),
                    Style::default().fg(Color::DarkGray),
                ))
            }
            None => Line::from(Span::styled(
                " waiting for slate data",
                Style::default().fg(Color::DarkGray),
            )),
        }
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

// ---------------------------------------------------------------------------
// Slate tab
// ---------------------------------------------------------------------------

fn draw_slate(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Slate ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(snapshot) = app.state.slate.snapshot.as_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Slate load failed:\n{err}")
        } else {
            "Loading weekly slate...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [header, key_legend, summary, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(format!("NFL Week {} · {} games", snapshot.week, snapshot.games.len())),
        header,
    );
    f.render_widget(
        Paragraph::new("Keys: j/k=move  Enter=game detail  R=reload  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );
    f.render_widget(summary_line(snapshot), summary);

    draw_game_cards(f, content, snapshot, app.state.slate.selected_game);
}

fn summary_line(snapshot: &SlateSnapshot) -> Paragraph<'_> {
    let stats = snapshot.summary_stats();
    let pool_size = snapshot.player_pool.len();
    Paragraph::new(Line::from(vec![
        Span::styled("Games ", Style::default().fg(Color::DarkGray)),
        Span::raw(stats.total_games.to_string()),
        Span::styled("  Weather alerts ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            stats.weather_alerts.to_string(),
            Style::default().fg(if stats.weather_alerts > 0 { Color::Yellow } else { Color::White }),
        ),
        Span::styled("  Avg O/U ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{:.1}", stats.avg_over_under)),
        Span::styled("  Pool ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{pool_size} players")),
    ]))
}

fn draw_game_cards(f: &mut Frame, area: Rect, snapshot: &SlateSnapshot, selected: usize) {
    if area.height == 0 || snapshot.games.is_empty() {
        f.render_widget(
            Paragraph::new("No games on this slate")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }

    const CARD_HEIGHT: u16 = 3;
    let visible = (area.height / CARD_HEIGHT).max(1) as usize;

    // Keep the selected card on screen.
    let first = selected.saturating_sub(visible.saturating_sub(1));

    for (slot, (idx, game)) in snapshot
        .games
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .enumerate()
    {
        let card_area = Rect::new(
            area.x,
            area.y + (slot as u16) * CARD_HEIGHT,
            area.width,
            CARD_HEIGHT.min(area.height - (slot as u16) * CARD_HEIGHT),
        );
        draw_game_card(f, card_area, game, idx == selected);
    }
}

fn draw_game_card(f: &mut Frame, area: Rect, game: &Game, selected: bool) {
    if area.height < 3 {
        return;
    }

    let marker = if selected { ">" } else { " " };
    let marker_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let matchup = game
        .matchup()
        .map(|m| format!("{} @ {}", m.away, m.home))
        .unwrap_or_else(|| game.game_id.clone());

    let mut top = vec![
        Span::styled(format!("{marker} "), marker_style),
        Span::styled(
            format!("{matchup:<12}"),
            Style::default()
                .fg(if selected { Color::Yellow } else { Color::White })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(game.kickoff_label(), Style::default().fg(Color::Gray)),
    ];
    if let Some(vegas) = game.vegas.as_ref() {
        top.push(Span::raw("  "));
        top.push(Span::styled(vegas.spread.clone(), Style::default().fg(Color::Cyan)));
        top.push(Span::styled("  O/U ", Style::default().fg(Color::DarkGray)));
        top.push(Span::raw(vegas.total.clone()));
        top.push(Span::styled(
            format!("  (imp {:.1}/{:.1})", vegas.implied_away, vegas.implied_home),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut bottom = vec![Span::raw("  ")];
    bottom.extend(weather_spans(game));
    bottom.push(Span::styled("  Overs ", Style::default().fg(Color::DarkGray)));
    let pct = game.over_percentage();
    bottom.push(Span::styled(format!("{pct}%"), Style::default().fg(over_pct_color(pct))));
    bottom.push(Span::styled(
        format!("  {} · {}", game.venue, if game.is_dome { "Dome" } else { "Outdoor" }),
        Style::default().fg(Color::DarkGray),
    ));
    if !game.injuries.is_empty() {
        bottom.push(Span::styled(
            format!("  {} inj", game.injuries.len()),
            Style::default().fg(Color::Red),
        ));
    }

    let lines = vec![Line::from(top), Line::from(bottom), Line::from("")];
    f.render_widget(Paragraph::new(lines), area);
}

fn weather_spans(game: &Game) -> Vec<Span<'static>> {
    let impact = game.weather_impact();
    match game.weather.as_ref() {
        Some(w) => {
            let icon = WeatherIcon::for_conditions(&w.conditions);
            vec![
                Span::raw(format!("{} ", icon.glyph())),
                Span::raw(format!(
                    "{} {:.0}°F {:.0}mph ",
                    w.conditions, w.temp_f, w.wind_mph_sustained
                )),
                Span::styled(
                    format!("[{}]", impact.label()),
                    Style::default().fg(impact_color(impact)),
                ),
            ]
        }
        None => vec![Span::styled(
            "no weather report",
            Style::default().fg(Color::DarkGray),
        )],
    }
}

fn impact_color(impact: WeatherImpact) -> Color {
    match impact {
        WeatherImpact::High => Color::Red,
        WeatherImpact::Medium => Color::Yellow,
        WeatherImpact::Low => Color::Green,
        WeatherImpact::None => Color::DarkGray,
    }
}

fn over_pct_color(pct: u8) -> Color {
    if pct >= 60 {
        Color::Green
    } else if pct >= 40 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn risk_color(tag: RiskTag) -> Color {
    match tag {
        RiskTag::Stud => Color::Green,
        RiskTag::Cash => Color::Blue,
        RiskTag::Gpp => Color::Yellow,
        RiskTag::Value => Color::Cyan,
        RiskTag::NotAvailable => Color::DarkGray,
    }
}

// ---------------------------------------------------------------------------
// Players tab
// ---------------------------------------------------------------------------

fn draw_players(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" DFS Player Pool ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(snapshot) = app.state.slate.snapshot.as_ref() else {
        f.render_widget(
            Paragraph::new("No slate loaded yet")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [position_bar, filter_bar, table_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let mut position_spans = Vec::with_capacity(Position::ALL.len() * 2);
    for position in Position::ALL {
        let style = if position == app.state.pool.position {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        position_spans.push(Span::styled(position.label(), style));
        position_spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(position_spans)), position_bar);

    let filter_label = app
        .state
        .pool
        .risk_filter
        .map(|t| t.label())
        .unwrap_or("all");
    f.render_widget(
        Paragraph::new(format!(
            "h/l=position  r=risk [{}]  s=sort [{}]  Enter=detail",
            filter_label,
            app.state.pool.sort.label()
        ))
        .style(Style::default().fg(Color::DarkGray)),
        filter_bar,
    );

    let rows_data = app.state.pool.visible(snapshot);
    if rows_data.is_empty() {
        let msg = if app.state.pool.risk_filter.is_some() {
            "No players match the current risk filter (r to cycle)"
        } else {
            "No players listed at this position"
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            table_area,
        );
        return;
    }

    let header = Row::new(["", "Player", "Team", "Salary", "Risk", "Matchup"])
        .style(Style::default().fg(Color::DarkGray));
    let rows: Vec<Row> = rows_data
        .iter()
        .enumerate()
        .map(|(idx, player)| {
            let selected = idx == app.state.pool.selected_row;
            let marker = if selected { ">" } else { " " };
            let base = if selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Row::new(vec![
                Cell::from(marker).style(Style::default().fg(Color::Yellow)),
                Cell::from(player.name.clone()).style(base),
                Cell::from(player.team.clone()).style(base),
                Cell::from(format_salary(player.dk_salary)).style(base),
                Cell::from(player.risk_tag.label())
                    .style(Style::default().fg(risk_color(player.risk_tag))),
                Cell::from(player.matchup_note.clone().unwrap_or_default())
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(22),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Fill(1),
        ],
    )
    .header(header);
    f.render_widget(table, table_area);

    if app.state.pool.show_detail
        && let Some(player) = app.state.pool.selected_player(snapshot)
    {
        draw_player_popup(f, area, player, app.state.pool.position);
    }
}

fn draw_player_popup(f: &mut Frame, area: Rect, player: &Player, position: Position) {
    let width = area.width.saturating_sub(10).min(60).max(30);
    let height = 10u16.min(area.height.saturating_sub(2));
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    f.render_widget(Clear, popup);
    let block = default_border(Color::Yellow).title(format!(" {} ", player.name));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Team ", Style::default().fg(Color::DarkGray)),
            Span::raw(player.team.clone()),
            Span::styled("  Pos ", Style::default().fg(Color::DarkGray)),
            Span::raw(position.label()),
            Span::styled("  Salary ", Style::default().fg(Color::DarkGray)),
            Span::raw(format_salary(player.dk_salary)),
        ]),
        Line::from(vec![
            Span::styled("Risk ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                player.risk_tag.label(),
                Style::default().fg(risk_color(player.risk_tag)),
            ),
        ]),
        Line::from(""),
    ];
    if let Some(note) = player.recent_role_note.as_deref() {
        lines.push(Line::from(format!("Role: {note}")));
    }
    if let Some(note) = player.matchup_note.as_deref() {
        lines.push(Line::from(format!("Matchup: {note}")));
    }
    if let Some(hint) = player.projection_hint.as_deref() {
        lines.push(Line::from(format!("Projection: {hint}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc/Enter to close",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Game detail tab
// ---------------------------------------------------------------------------

fn draw_game_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Game Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let game = app
        .state
        .slate
        .snapshot
        .as_ref()
        .zip(app.state.game_detail.game_id.as_deref())
        .and_then(|(snapshot, id)| snapshot.game(id));
    let Some(game) = game else {
        f.render_widget(
            Paragraph::new("Select a game on the Slate tab and press Enter")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let matchup = game
        .matchup()
        .map(|m| format!("{} @ {}", m.away, m.home))
        .unwrap_or_else(|| game.game_id.clone());

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        matchup,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!(
        "{} · {} · {}",
        game.kickoff_label(),
        game.venue,
        if game.is_dome { "Dome" } else { "Outdoor" }
    )));
    lines.push(Line::from(""));

    match game.vegas.as_ref() {
        Some(vegas) => {
            lines.push(Line::from(vec![
                Span::styled("Line   ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!(
                    "{}  O/U {}  implied {:.1} / {:.1}",
                    vegas.spread, vegas.total, vegas.implied_away, vegas.implied_home
                )),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "No betting line posted",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let impact = game.weather_impact();
    match game.weather.as_ref() {
        Some(w) => {
            let icon = WeatherIcon::for_conditions(&w.conditions);
            lines.push(Line::from(vec![
                Span::styled("Weather ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!(
                    "{} {} · {:.0}°F · wind {:.0} mph · precip {:.0}% · ",
                    icon.glyph(),
                    w.conditions,
                    w.temp_f,
                    w.wind_mph_sustained,
                    w.precip_chance_pct
                )),
                Span::styled(
                    format!("impact {}", impact.label()),
                    Style::default().fg(impact_color(impact)),
                ),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "No weather report (dome or not yet published)",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(""));

    match game.trends.as_ref().zip(game.matchup()) {
        Some((trends, m)) => {
            lines.push(Line::from(Span::styled(
                "Over/under trends",
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(format!(
                "  {}: {} overs / {} unders",
                m.away, trends.away.overs, trends.away.unders
            )));
            lines.push(Line::from(format!(
                "  {}: {} overs / {} unders",
                m.home, trends.home.overs, trends.home.unders
            )));
            let pct = game.over_percentage();
            lines.push(Line::from(vec![
                Span::raw("  Combined overs rate: "),
                Span::styled(format!("{pct}%"), Style::default().fg(over_pct_color(pct))),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "No over/under trend data",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(""));

    if game.injuries.is_empty() {
        lines.push(Line::from(Span::styled(
            "No injuries reported",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Injury report (j/k scroll)",
            Style::default().fg(Color::Gray),
        )));
        for injury in &game.injuries {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} {} ", injury.team, injury.player),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("[{}] ", injury.status),
                    Style::default().fg(injury_status_color(&injury.status)),
                ),
                Span::styled(injury.note.clone(), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    let offset = app.state.game_detail.scroll_offset as usize;
    let window: Vec<Line> = lines.into_iter().skip(offset).collect();
    f.render_widget(Paragraph::new(window), inner);
}

fn injury_status_color(status: &str) -> Color {
    match status.to_ascii_lowercase().as_str() {
        "out" | "doubtful" => Color::Red,
        "questionable" => Color::Yellow,
        _ => Color::Gray,
    }
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
