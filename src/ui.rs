use crate::app::{App, DonateField, NoticeLevel, SearchField, Tab};
use crate::catalog::OrganizationRecord;
use crate::hdi::{parse_hex, ColorBand, RegionStyle};
use crate::map::{MapLayers, MapRenderer};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table, Tabs, Widget, Wrap},
    Frame,
};

/// Map background behind translucent region fills
const MAP_BACKGROUND: (u8, u8, u8) = (0xf5, 0xf7, 0xfa);

const LEGEND_SOURCE: &str = "Indice de Développement Humain (IDH) — Source : ONU 2023";

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn hex(color: &str) -> Color {
    parse_hex(color).map(rgb).unwrap_or(Color::Reset)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn heading() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(dim())
        .title(Span::styled(format!(" {title} "), heading()))
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    if app.session.is_logged_in() {
        render_dashboard(frame, app);
    } else {
        render_login(frame, app);
    }
}

fn render_login(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 60, 11);
    let block = titled_block("🌍 Bienvenue sur ONG Explorer 2.0");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Intro
            Constraint::Length(3), // Email
            Constraint::Length(2), // Notice
            Constraint::Min(1),    // Help
        ])
        .split(inner);

    let intro = Paragraph::new("Connectez-vous pour explorer les associations et soutenir leurs actions.")
        .wrap(Wrap { trim: true });
    frame.render_widget(intro, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.login_input.as_str()),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]))
    .block(titled_block("Adresse e-mail"));
    frame.render_widget(input, chunks[1]);

    if let Some(line) = notice_line(app) {
        frame.render_widget(Paragraph::new(line), chunks[2]);
    }

    let help = Paragraph::new("Entrée: se connecter  Échap: quitter").style(dim());
    frame.render_widget(help, chunks[3]);
}

fn render_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Tabs
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let user = app.session.user().unwrap_or_default();
    let header = Line::from(vec![
        Span::styled(" 🌍 ONG Explorer 2.0 ", heading()),
        Span::styled("| Connecté : ", dim()),
        Span::styled(user, Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let tabs = Tabs::new(Tab::ALL.iter().enumerate().map(|(i, t)| format!("F{} {}", i + 1, t.title())))
        .select(app.tab.index())
        .style(dim())
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[1]);

    match app.tab {
        Tab::Map => match &app.results {
            Some(_) => render_results(frame, app, chunks[2]),
            None => render_map_tab(frame, app, chunks[2]),
        },
        Tab::Themes => render_themes(frame, app, chunks[2]),
        Tab::Donate => render_donate(frame, app, chunks[2]),
        Tab::History => render_history(frame, app, chunks[2]),
    }

    render_status_bar(frame, app, chunks[3]);
}

// ---------------------------
// Map tab
// ---------------------------

fn render_map_tab(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    render_search_bar(frame, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
        .split(rows[1]);

    render_map(frame, app, columns[0]);
    render_region_panel(frame, app, columns[1]);
    render_legend(frame, rows[2]);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(35), Constraint::Percentage(35)])
        .split(area);

    let form = &app.search;
    let field_block = |title: &'static str, field: SearchField| {
        let focused = form.active && form.field == field;
        let border = if focused { Style::default().fg(Color::Yellow) } else { dim() };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(title, heading()))
    };

    let country = app.country_options.get(form.country).map(String::as_str).unwrap_or("");
    frame.render_widget(
        Paragraph::new(format!("‹ {country} ›")).block(field_block(" 🌍 Pays ", SearchField::Country)),
        columns[0],
    );

    let mut name = vec![Span::raw(form.name.as_str())];
    if form.active && form.field == SearchField::Name {
        name.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(name)).block(field_block(" 🔎 Nom de l'association ", SearchField::Name)),
        columns[1],
    );

    let domains = match app.domain_options.get(form.domain_cursor) {
        Some(domain) => {
            let mark = if form.domains.contains(domain) { "[x]" } else { "[ ]" };
            format!("‹ {mark} {domain} ›  ({} choisi(s))", form.domains.len())
        }
        None => "Aucun domaine".to_string(),
    };
    frame.render_widget(
        Paragraph::new(domains).block(field_block(" 🎯 Domaine ", SearchField::Domains)),
        columns[2],
    );
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Carte interactive");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.map_area.set(inner);

    if !app.map_renderer.has_data() {
        let message = Paragraph::new("Fond de carte indisponible.")
            .style(dim())
            .alignment(Alignment::Center);
        frame.render_widget(message, inner);
        return;
    }

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.set_cells(inner.width, inner.height);

    let highlighted = app.highlighted_region();
    let layers = app
        .map_renderer
        .render(inner.width as usize, inner.height as usize, &viewport, highlighted);

    frame.render_widget(
        MapWidget {
            layers,
            renderer: &app.map_renderer,
            highlighted,
        },
        inner,
    );
}

/// Choropleth cells with Braille borders on top
struct MapWidget<'a> {
    layers: MapLayers,
    renderer: &'a MapRenderer,
    highlighted: Option<usize>,
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = hex(RegionStyle::for_band(ColorBand::Unknown).border_color);
        let highlight_border = hex(RegionStyle::HIGHLIGHT.border_color);

        for row in 0..area.height.min(self.layers.height as u16) {
            for col in 0..area.width.min(self.layers.width as u16) {
                let (c, r) = (col as usize, row as usize);
                let bg = match self.layers.region_at(c, r) {
                    Some(idx) => self.renderer.style_of(idx, self.highlighted).blended_fill(MAP_BACKGROUND),
                    None => MAP_BACKGROUND,
                };

                let cell = &mut buf[(area.x + col, area.y + row)];
                cell.set_char(' ').set_bg(rgb(bg));

                if let Some(ch) = self.layers.highlight.glyph(c, r) {
                    cell.set_char(ch).set_fg(highlight_border);
                } else if let Some(ch) = self.layers.borders.glyph(c, r) {
                    cell.set_char(ch).set_fg(border);
                }
            }
        }
    }
}

fn render_legend(frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for band in ColorBand::LEGEND {
        spans.push(Span::styled("██", Style::default().fg(hex(band.hex()))));
        spans.push(Span::raw(format!(" {}  ", band.label())));
    }

    let legend = Paragraph::new(vec![
        Line::from(spans),
        Line::from(Span::styled(format!(" {LEGEND_SOURCE}"), dim())),
    ]);
    frame.render_widget(legend, area);
}

fn render_region_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Pays");
    let region = app.selected_region.and_then(|idx| app.map_renderer.region(idx));

    let Some(region) = region else {
        let hint = Paragraph::new("Cliquez sur un pays pour afficher ses informations.")
            .style(dim())
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let presence = app.catalog.presence_in(&region.name);
    let index = match region.index {
        Some(value) => format!("{value:.3}"),
        None => "n/d".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(format!("🗺️ {}", region.name), heading())),
        Line::from(vec![
            Span::raw("IDH : "),
            Span::styled(index, Style::default().fg(hex(region.band.hex()))),
            Span::styled(format!("  {}", region.band.label()), dim()),
        ]),
        Line::from(format!("🤝 ONG présentes : {}", presence.len())),
        Line::default(),
    ];

    if presence.is_empty() {
        lines.push(Line::from(Span::styled(
            "Aucune ONG répertoriée pour ce pays.",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        push_presence_group(
            &mut lines,
            "🏠 ONG locales",
            &presence.local,
            "Aucune ONG locale recensée pour ce pays.",
        );
        lines.push(Line::default());
        push_presence_group(
            &mut lines,
            "🌍 ONG internationales",
            &presence.international,
            "Aucune ONG internationale recensée pour ce pays.",
        );
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(panel, area);
}

fn push_presence_group(lines: &mut Vec<Line<'_>>, title: &str, records: &[&OrganizationRecord], empty: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD))));
    if records.is_empty() {
        lines.push(Line::from(Span::styled(empty.to_string(), dim())));
        return;
    }
    for record in records {
        lines.push(Line::from(vec![
            Span::raw(format!("• {}", record.name)),
            Span::styled(format!(" ({})", record.domain), dim()),
        ]));
    }
}

/// Card lines for one organization
fn record_lines(record: &OrganizationRecord) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("🔸 {}", record.name),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("   Domaine : {}", record.domain)),
        Line::from(format!("   Pays : {}", record.country)),
        Line::from(format!("   Interventions : {}", record.intervention_countries().collect::<Vec<_>>().join(", "))),
    ];
    if let Some(site) = &record.website {
        lines.push(Line::from(vec![
            Span::raw("   Site : "),
            Span::styled(site.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    if let Some(url) = &record.donation_url {
        lines.push(Line::from(vec![
            Span::raw("   💝 Faire un don : "),
            Span::styled(url.clone(), Style::default().fg(Color::Blue)),
        ]));
    }
    lines.push(Line::default());
    lines
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let Some(results) = &app.results else {
        return;
    };

    let title = format!("{} ONG trouvées", results.records.len());
    let body: Text = if results.records.is_empty() {
        Text::from(Line::from(Span::styled(
            "Aucune ONG ne correspond à votre recherche.",
            Style::default().fg(Color::Yellow),
        )))
    } else {
        Text::from(results.records.iter().flat_map(record_lines).collect::<Vec<_>>())
    };

    let list = Paragraph::new(body)
        .scroll((app.results_scroll, 0))
        .wrap(Wrap { trim: false })
        .block(titled_block(&title));
    frame.render_widget(list, area);
}

// ---------------------------
// Themes tab
// ---------------------------

fn render_themes(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let domains: Vec<Line> = app
        .domain_options
        .iter()
        .enumerate()
        .map(|(i, domain)| {
            if i == app.theme {
                Line::from(Span::styled(
                    format!("▶ {domain}"),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {domain}"))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(domains).block(titled_block("Domaines")), columns[0]);

    let Some(theme) = app.selected_theme() else {
        let empty = Paragraph::new("Aucun domaine disponible.").style(dim()).block(titled_block("Associations"));
        frame.render_widget(empty, columns[1]);
        return;
    };

    let records: Vec<&OrganizationRecord> = app.catalog.by_domain(theme).collect();
    let title = format!("{} associations dans le domaine {theme}", records.len());
    let lines: Vec<Line> = records.into_iter().flat_map(record_lines).collect();
    let list = Paragraph::new(lines)
        .scroll((app.theme_scroll, 0))
        .wrap(Wrap { trim: false })
        .block(titled_block(&title));
    frame.render_widget(list, columns[1]);
}

// ---------------------------
// Donate tab
// ---------------------------

fn render_donate(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("💳 Faire un don");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.session.is_logged_in() {
        let warning = Paragraph::new("Veuillez vous connecter avant de faire un don.").style(Style::default().fg(Color::Yellow));
        frame.render_widget(warning, inner);
        return;
    }

    let form = &app.donate;
    let field = |label: &'static str, value: String, which: DonateField| {
        let focused = form.field == which;
        let marker = if focused { "▶ " } else { "  " };
        let value_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(label, dim()),
            Span::styled(value, value_style),
        ])
    };

    let organization = app.donation_target();
    let name = organization.map(|o| o.name.clone()).unwrap_or_else(|| "Aucune association".into());

    let mut lines = vec![field("Association : ", format!("‹ {name} ›"), DonateField::Organization)];
    if let Some(org) = organization {
        lines.push(Line::from(Span::styled(format!("     {} · {}", org.domain, org.country), dim())));
    }
    lines.push(field("Montant (€) : ", format!("{}█", form.amount), DonateField::Amount));
    lines.push(field("Moyen de paiement : ", format!("‹ {} ›", form.method), DonateField::Method));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Entrée: Payer", dim())));
    lines.push(Line::default());

    if let Some(receipt) = &form.receipt {
        lines.push(Line::from(Span::styled(receipt.message.clone(), Style::default().fg(Color::Green))));
        match &receipt.donation_url {
            Some(url) => lines.push(Line::from(vec![
                Span::raw("👉 Finaliser le don sur le site officiel : "),
                Span::styled(url.clone(), Style::default().fg(Color::Blue)),
            ])),
            None => lines.push(Line::from(Span::styled(
                "Cette association n’a pas encore de lien de don disponible.",
                Style::default().fg(Color::Yellow),
            ))),
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

// ---------------------------
// History tab
// ---------------------------

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let log = app.session.donations();
    if log.is_empty() {
        let empty = Paragraph::new("Aucun don enregistré.").style(dim()).block(titled_block("📜 Mes dons"));
        frame.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1), Constraint::Length(10)])
        .split(area);

    let header = Row::new(["Utilisateur", "Association", "Pays", "Domaine", "Montant", "Moyen"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let rows = log.entries().iter().skip(app.history_scroll as usize).map(|d| {
        Row::new(vec![
            Cell::from(d.user.clone()),
            Cell::from(d.organization.clone()),
            Cell::from(d.country.clone()),
            Cell::from(d.domain.clone()),
            Cell::from(format!("{} €", d.amount)),
            Cell::from(d.payment_method.label()),
        ])
    });
    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(25),
        Constraint::Percentage(12),
        Constraint::Percentage(18),
        Constraint::Percentage(10),
        Constraint::Percentage(15),
    ];
    let table = Table::new(rows, widths).header(header).block(titled_block("📜 Mes dons"));
    frame.render_widget(table, chunks[0]);

    let total = Line::from(vec![
        Span::styled(" 💰 Total des dons : ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} €", log.total()), Style::default().fg(Color::Green)),
    ]);
    frame.render_widget(Paragraph::new(total), chunks[1]);

    let totals = log.totals_by_domain();
    let bars: Vec<(&str, u64)> = totals.iter().map(|(domain, sum)| (domain.as_str(), *sum)).collect();
    let chart = BarChart::default()
        .block(titled_block("Dons par domaine"))
        .data(bars.as_slice())
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, chunks[2]);
}

// ---------------------------
// Status bar
// ---------------------------

fn notice_line(app: &App) -> Option<Line<'_>> {
    let notice = app.notice.as_ref()?;
    let color = match notice.level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };
    Some(Line::from(Span::styled(format!(" {}", notice.text), Style::default().fg(color))))
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(line) = notice_line(app) {
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let help = match app.tab {
        Tab::Map if app.results.is_some() => " Échap:retour ↑↓:défiler",
        Tab::Map if app.search.active => " ↑↓:champ ←→:choisir Espace:cocher Entrée:rechercher Échap:carte",
        Tab::Map => " /:rechercher hjkl:déplacer +/-:zoom clic:pays b/f:calques r:recentrer",
        Tab::Themes => " ↑↓:domaine PgUp/PgDn:défiler",
        Tab::Donate => " ↑↓:champ ←→:choisir 0-9:montant Entrée:payer",
        Tab::History => " ↑↓:défiler",
    };

    let mut spans = Vec::new();
    if app.tab == Tab::Map && app.results.is_none() {
        let settings = &app.map_renderer.settings;
        spans.extend([
            Span::styled(" Zoom: ", dim()),
            Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
            Span::styled(" | ", dim()),
            Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
            Span::styled(" | ", dim()),
            Span::styled(
                if settings.show_fill { "[F]ond " } else { "[f]ond " },
                Style::default().fg(if settings.show_fill { Color::Green } else { Color::DarkGray }),
            ),
            Span::styled(
                if settings.show_borders { "[B]ordures " } else { "[b]ordures " },
                Style::default().fg(if settings.show_borders { Color::Green } else { Color::DarkGray }),
            ),
        ]);
    }
    spans.push(Span::styled(help, dim()));
    spans.push(Span::styled(" | Tab:onglet x:déconnexion q:quitter", dim()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Rect of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use ratatui::{backend::TestBackend, Terminal};

    const CSV: &str = "\
nom;pays;pays_intervention;domaine;site_web;liens_dons
Action contre la Faim;France;\"Kenya;Uganda\";Santé;https://acf.org;https://acf.org/don
";

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn app() -> App {
        App::new(Catalog::from_reader(CSV.as_bytes()).unwrap(), MapRenderer::default())
    }

    #[test]
    fn test_login_screen() {
        assert!(draw(&app()).contains("Adresse e-mail"));
    }

    #[test]
    fn test_dashboard_records_map_area() {
        let mut app = app();
        app.session.login("ana@ong.org").unwrap();
        let screen = draw(&app);
        assert!(screen.contains("Carte interactive"));
        assert!(app.map_area.get().width > 0);
    }

    #[test]
    fn test_empty_search_message() {
        let mut app = app();
        app.session.login("ana@ong.org").unwrap();
        app.search.name = "zzz".into();
        app.run_search();
        assert!(draw(&app).contains("0 ONG trouvées"));
    }

    #[test]
    fn test_centered() {
        let r = centered(Rect::new(0, 0, 100, 50), 60, 10);
        assert_eq!(r, Rect::new(20, 20, 60, 10));
        let small = centered(Rect::new(0, 0, 10, 5), 60, 10);
        assert_eq!(small, Rect::new(0, 0, 10, 5));
    }
}
