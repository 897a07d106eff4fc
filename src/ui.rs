use crate::models::{DrugStat, MoodEntry, Summary};
use crate::stats::{drug_stats, summarize};
use crate::tracker::{Tab, Tracker, ViewState};
use chrono::NaiveDate;
use std::fmt::Write;

const PLACEHOLDER: &str = "--";

pub fn render_page(tracker: &Tracker, today: NaiveDate) -> String {
    let view = &tracker.view;
    let entries = tracker.store.entries();
    let body = match view.active_tab {
        Tab::Entry => render_entry_tab(view, today),
        Tab::Analytics => render_analytics_tab(entries.len()),
        Tab::Reports => render_reports_tab(entries),
    };

    INDEX_HTML
        .replace("{{TABS}}", &render_tabs(view.active_tab))
        .replace("{{COUNT}}", &entries.len().to_string())
        .replace("{{BODY}}", &body)
}

fn render_tabs(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            let class = if *tab == active { "tab active" } else { "tab" };
            format!(
                r#"<a class="{class}" href="/?tab={slug}" role="tab" aria-selected="{selected}">{title}</a>"#,
                slug = tab.slug(),
                selected = *tab == active,
                title = tab.title(),
            )
        })
        .collect()
}

fn render_entry_tab(view: &ViewState, today: NaiveDate) -> String {
    let form = &view.form;
    let date = if form.date.is_empty() {
        today.to_string()
    } else {
        form.date.clone()
    };

    let mut html = String::new();
    if let Some(flash) = &view.flash {
        let _ = write!(html, r#"<div class="status" data-type="ok">{}</div>"#, escape_html(flash));
    }
    if !view.errors.is_empty() {
        html.push_str(r#"<div class="status" data-type="error">Please fix the highlighted fields.</div>"#);
    }

    html.push_str(r#"<form class="entry-form" method="post" action="/entries" novalidate>"#);
    html.push_str(&input_field(view, "date", "Date", "date", &date, ""));
    html.push_str(&input_field(view, "sleep", "Sleep (hours)", "number", &form.sleep, r#"min="0" max="24" step="0.5""#));
    for (name, label, value) in [
        ("mood", "Mood (1-10)", &form.mood),
        ("stress", "Stress (1-10)", &form.stress),
        ("symptoms", "Symptoms (1-10)", &form.symptoms),
        ("engagement", "Engagement (1-10)", &form.engagement),
    ] {
        html.push_str(&input_field(view, name, label, "number", value, r#"min="1" max="10" step="1""#));
    }
    html.push_str(&input_field(
        view,
        "drugNames",
        "Medications / substances (comma separated)",
        "text",
        &form.drug_names,
        "",
    ));

    let _ = write!(
        html,
        r#"<label class="field wide{invalid}"><span class="label">Notes</span><textarea name="notes" rows="4">{value}</textarea>{error}</label>"#,
        invalid = invalid_class(view, "notes"),
        value = escape_html(&form.notes),
        error = error_hint(view, "notes"),
    );
    html.push_str(r#"<button class="btn-save" type="submit">Save entry</button></form>"#);
    html.push_str(r#"<p class="hint">One entry per day. Saving a date that already has an entry replaces it.</p>"#);
    html
}

fn input_field(view: &ViewState, name: &str, label: &str, kind: &str, value: &str, attrs: &str) -> String {
    format!(
        r#"<label class="field{invalid}"><span class="label">{label}</span><input type="{kind}" name="{name}" value="{value}" {attrs} />{error}</label>"#,
        invalid = invalid_class(view, name),
        value = escape_html(value),
        error = error_hint(view, name),
    )
}

fn invalid_class(view: &ViewState, name: &str) -> &'static str {
    if view.errors.contains_key(name) {
        " invalid"
    } else {
        ""
    }
}

fn error_hint(view: &ViewState, name: &str) -> String {
    view.errors
        .get(name)
        .map(|message| format!(r#"<span class="error">{}</span>"#, escape_html(message)))
        .unwrap_or_default()
}

fn render_analytics_tab(count: usize) -> String {
    if count == 0 {
        return r#"<p class="hint">No entries yet. Charts appear once you log a day.</p>"#.to_string();
    }
    ANALYTICS_HTML.to_string()
}

fn render_reports_tab(entries: &[MoodEntry]) -> String {
    let mut html = render_summary(summarize(entries));
    html.push_str(&render_drug_table(&drug_stats(entries)));
    html.push_str(&render_history(entries));
    html
}

fn render_summary(summary: Option<Summary>) -> String {
    let (mood, sleep, stress) = match summary {
        Some(summary) => (
            format!("{:.1}", summary.avg_mood),
            format!("{:.1}", summary.avg_sleep),
            format!("{:.1}", summary.avg_stress),
        ),
        None => (PLACEHOLDER.into(), PLACEHOLDER.into(), PLACEHOLDER.into()),
    };

    format!(
        r#"<section class="panel">
      <div class="stat"><span class="label">Average mood</span><span id="avg-mood" class="value">{mood}</span></div>
      <div class="stat"><span class="label">Average sleep</span><span id="avg-sleep" class="value">{sleep}</span></div>
      <div class="stat"><span class="label">Average stress</span><span id="avg-stress" class="value">{stress}</span></div>
    </section>"#
    )
}

fn render_drug_table(stats: &[DrugStat]) -> String {
    let mut html = String::from(r#"<section class="report"><h2>Mood by medication</h2>"#);
    if stats.is_empty() {
        html.push_str(r#"<p class="hint">No medications recorded yet.</p></section>"#);
        return html;
    }

    html.push_str("<table><thead><tr><th>Name</th><th>Entries</th><th>Average mood</th></tr></thead><tbody>");
    for stat in stats {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td></tr>",
            escape_html(&stat.name),
            stat.count,
            stat.avg_mood
        );
    }
    html.push_str("</tbody></table></section>");
    html
}

fn render_history(entries: &[MoodEntry]) -> String {
    let mut html = String::from(r#"<section class="report"><h2>History</h2>"#);
    if entries.is_empty() {
        html.push_str(r#"<p class="hint">Nothing logged yet.</p></section>"#);
        return html;
    }

    html.push_str(
        "<table><thead><tr><th>Date</th><th>Mood</th><th>Sleep</th><th>Stress</th><th>Symptoms</th><th>Engagement</th><th>Medications</th><th>Notes</th></tr></thead><tbody>",
    );
    for entry in entries {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.date,
            entry.mood,
            entry.sleep,
            entry.stress,
            entry.symptoms,
            entry.engagement,
            escape_html(&entry.drug_names),
            escape_html(&entry.notes),
        );
    }
    html.push_str("</tbody></table></section>");
    html
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const ANALYTICS_HTML: &str = r#"<section class="chart-area">
      <div class="chart-header">
        <div>
          <h2>Last 30 entries</h2>
          <p class="subtitle">Mood, stress and engagement on a 1-10 scale.</p>
        </div>
        <div class="legend">
          <span class="key mood">Mood</span>
          <span class="key stress">Stress</span>
          <span class="key engagement">Engagement</span>
        </div>
      </div>
      <div class="chart-card">
        <svg id="line-chart" viewBox="0 0 600 260" aria-label="Mood chart" role="img"></svg>
      </div>
      <div class="chart-header">
        <div>
          <h2>Sleep</h2>
          <p class="subtitle">Hours per night.</p>
        </div>
      </div>
      <div class="chart-card">
        <svg id="bar-chart" viewBox="0 0 600 220" aria-label="Sleep chart" role="img"></svg>
      </div>
      <div class="status" id="status"></div>
    </section>
    <script>
      const lineChart = document.getElementById('line-chart');
      const barChart = document.getElementById('bar-chart');
      const statusEl = document.getElementById('status');

      const width = 600;
      const paddingX = 44;
      const paddingY = 34;
      const top = 20;

      const xLabels = (points, x, height) => {
        const every = Math.ceil(points.length / 10);
        return points
          .map((point, index) => index % every === 0
            ? `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${point.label}</text>`
            : '')
          .join('');
      };

      const grid = (height, min, max, ticks, y) => {
        let out = '';
        for (let i = 0; i <= ticks; i += 1) {
          const value = min + ((max - min) * i) / ticks;
          out += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
          out += `<text class="chart-label" x="${paddingX - 10}" y="${y(value) + 4}" text-anchor="end">${value}</text>`;
        }
        return out;
      };

      const renderLines = (points) => {
        const height = 260;
        const min = 0;
        const max = 10;
        const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
        const x = (index) => paddingX + index * xStep;
        const y = (value) => height - paddingY - ((value - min) * (height - top - paddingY)) / (max - min);

        const line = (key) => {
          const d = points
            .map((point, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(point[key]).toFixed(2)}`)
            .join(' ');
          const dots = points
            .map((point, index) => `<circle class="chart-point ${key}" cx="${x(index)}" cy="${y(point[key])}" r="3" />`)
            .join('');
          return `<path class="chart-line ${key}" d="${d}" />${dots}`;
        };

        lineChart.innerHTML = `
          ${grid(height, min, max, 5, y)}
          ${line('mood')}
          ${line('stress')}
          ${line('engagement')}
          ${xLabels(points, x, height)}
        `;
      };

      const renderBars = (points) => {
        const height = 220;
        const max = Math.max(12, ...points.map((point) => point.sleep));
        const slot = (width - paddingX * 2) / points.length;
        const barWidth = Math.max(4, slot * 0.6);
        const x = (index) => paddingX + slot * index + slot / 2;
        const y = (value) => height - paddingY - (value * (height - top - paddingY)) / max;

        const bars = points
          .map((point, index) => `<rect class="chart-bar" x="${(x(index) - barWidth / 2).toFixed(2)}" y="${y(point.sleep).toFixed(2)}" width="${barWidth.toFixed(2)}" height="${(y(0) - y(point.sleep)).toFixed(2)}" rx="3" />`)
          .join('');

        barChart.innerHTML = `
          ${grid(height, 0, max, 4, y)}
          ${bars}
          ${xLabels(points, x, height)}
        `;
      };

      fetch('/api/stats')
        .then((res) => {
          if (!res.ok) {
            throw new Error('Unable to load stats');
          }
          return res.json();
        })
        .then((stats) => {
          renderLines(stats.recent);
          renderBars(stats.recent);
        })
        .catch((err) => {
          statusEl.textContent = err.message;
          statusEl.dataset.type = 'error';
        });
    </script>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Tracker</title>
  <style>
    :root {
      --bg-1: #eef3f0;
      --bg-2: #cfe3da;
      --ink: #24302b;
      --accent: #3f8f6b;
      --accent-2: #2f4858;
      --stress: #d9694a;
      --engagement: #6a5acd;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4efe9 60%, #f4f7f5 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: end;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 8px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #6b645d;
      text-decoration: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .entry-form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .field {
      display: grid;
      gap: 6px;
    }

    .field.wide {
      grid-column: 1 / -1;
    }

    .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b857d;
    }

    input, textarea {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
    }

    .field.invalid input, .field.invalid textarea {
      border-color: #c63b2b;
    }

    .error {
      color: #c63b2b;
      font-size: 0.85rem;
    }

    .btn-save {
      grid-column: 1 / -1;
      justify-self: start;
      border: none;
      border-radius: 999px;
      padding: 14px 28px;
      font-size: 1rem;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
      box-shadow: 0 10px 24px rgba(63, 143, 107, 0.3);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 16px;
      overflow: hidden;
    }

    th, td {
      text-align: left;
      padding: 10px 12px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
      font-size: 0.92rem;
    }

    .chart-area {
      display: grid;
      gap: 16px;
    }

    .chart-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .legend {
      display: flex;
      gap: 12px;
      font-size: 0.85rem;
    }

    .key::before {
      content: "";
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      margin-right: 6px;
      background: currentColor;
    }

    .key.mood { color: var(--accent); }
    .key.stress { color: var(--stress); }
    .key.engagement { color: var(--engagement); }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    svg {
      width: 100%;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke-width: 2.5;
    }

    .chart-line.mood, .chart-point.mood { stroke: var(--accent); }
    .chart-line.stress, .chart-point.stress { stroke: var(--stress); }
    .chart-line.engagement, .chart-point.engagement { stroke: var(--engagement); }

    .chart-point {
      fill: white;
      stroke-width: 2;
    }

    .chart-bar {
      fill: var(--accent-2);
      opacity: 0.8;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f6a65;
      font-size: 0.9rem;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 20px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Mood Tracker</h1>
        <p class="subtitle">{{COUNT}} days logged. Everything stays on this machine.</p>
      </div>
      <nav class="tabs" role="tablist">{{TABS}}</nav>
    </header>

    {{BODY}}
  </main>
</body>
</html>
"#;
