use crate::model::DashboardData;

/// Render a self-contained HTML dashboard (data embedded as JSON).
///
/// Important: we avoid `format!()` because the HTML contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_html_dashboard(data: &DashboardData) -> anyhow::Result<String> {
    // `</` inside a <script> would end it early.
    let json = serde_json::to_string(data)?.replace("</", "<\\/");

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Object allocations</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  .filters { display: flex; gap: 8px; padding: 12px 16px; }
  .filters input { flex: 1; padding: 6px 8px; border: 1px solid #ddd; border-radius: 6px; }
  .main { padding: 0 16px 16px; }

  table { border-collapse: collapse; width: 100%; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: left; font-size: 14px; font-weight: normal; }
  thead th { position: sticky; top: 0; background: white; border-bottom: 1px solid #ddd; cursor: pointer; font-weight: bold; }
  thead th.sorted-asc::after { content: " \25B4"; }
  thead th.sorted-desc::after { content: " \25BE"; }
  tbody tr { cursor: pointer; }
  tbody tr:hover { background: #f3f3f3; }
  .num { text-align: right; font-variant-numeric: tabular-nums; }

  #chart-dialog { display: none; position: fixed; top: 10%; left: 15%; width: 70%; background: white;
                  border: 1px solid #ccc; border-radius: 8px; box-shadow: 0 4px 24px rgba(0,0,0,.2); padding: 16px; }
  #chart-dialog > span { position: absolute; right: 12px; top: 8px; cursor: pointer; font-size: 18px; }
  #chart-title { margin: 0 0 8px; font-size: 16px; }
  .muted { color: #777; font-size: 12px; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>

<div class="filters" id="filters"></div>

<div class="main">
  <table id="main-table">
    <thead><tr id="main-head"></tr></thead>
    <tbody id="main-body"></tbody>
  </table>
</div>

<div id="chart-dialog">
  <span title="close">&times;</span>
  <h3 id="chart-title"></h3>
  <canvas id="chart-canvas" width="900" height="360"></canvas>
  <div id="chart-empty" class="muted" style="display:none;">no data</div>
</div>

<script>
// Embedded dashboard data (JSON object literal)
const DATA = __DATA__;

const state = {
  order: DATA.rows.map((_, i) => i),
  visible: DATA.rows.map(() => true),
  sortColumn: null,
  sortDesc: false,
  chart: null
};

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function renderSummary() {
  const t = DATA.totals;
  document.getElementById("summary").innerHTML = `
    <span class="pill">rows: <b>${t.rows}</b></span>
    <span class="pill">snapshots: <b>${t.snapshots}</b></span>
    <span class="pill">types: <b>${t.types}</b></span>
    <span class="pill">series: <b>${t.series}</b></span>
  `;
}

function renderFilters() {
  const el = document.getElementById("filters");
  for (const f of DATA.filters) {
    const input = document.createElement("input");
    input.id = f.id;
    input.placeholder = f.placeholder;
    input.setAttribute("list", f.id + "-options");
    input.addEventListener("input", applyFilters);
    const options = document.createElement("datalist");
    options.id = f.id + "-options";
    for (const value of f.suggestions) {
      const option = document.createElement("option");
      option.value = value;
      options.appendChild(option);
    }
    el.appendChild(input);
    el.appendChild(options);
  }
}

// Every filter input must be a substring of its column (case-sensitive).
function applyFilters() {
  const spec = DATA.filters.map(f => [f.column, document.getElementById(f.id).value || ""]);
  DATA.rows.forEach((row, i) => {
    state.visible[i] = spec.every(([col, needle]) => row[col].indexOf(needle) !== -1);
  });
  renderBody();
}

function sortValue(row, col) {
  if (!DATA.columns[col].numeric) return row[col];
  const v = parseInt(row[col], DATA.radix);
  return Number.isNaN(v) ? null : v;
}

function sortBy(col) {
  state.sortDesc = state.sortColumn === col ? !state.sortDesc : false;
  state.sortColumn = col;
  state.order.sort((a, b) => {
    const x = sortValue(DATA.rows[a], col);
    const y = sortValue(DATA.rows[b], col);
    if (x === null || y === null) return (x === null) - (y === null);
    const c = x < y ? -1 : (x > y ? 1 : 0);
    return state.sortDesc ? -c : c;
  });
  renderHead();
  renderBody();
}

function renderHead() {
  const head = document.getElementById("main-head");
  head.innerHTML = "";
  for (const c of DATA.columns) {
    const th = document.createElement("th");
    th.textContent = c.title;
    if (c.numeric) th.className = "num";
    if (state.sortColumn === c.index) th.classList.add(state.sortDesc ? "sorted-desc" : "sorted-asc");
    th.onclick = () => sortBy(c.index);
    head.appendChild(th);
  }
}

function renderBody() {
  const body = document.getElementById("main-body");
  body.innerHTML = "";
  for (const i of state.order) {
    if (!state.visible[i]) continue;
    const row = DATA.rows[i];
    const tr = document.createElement("tr");
    tr.innerHTML = row
      .map((cell, col) => `<th class="${DATA.columns[col].numeric ? "num" : ""}">${escapeHtml(cell)}</th>`)
      .join("");
    tr.onclick = () => showSeries(row[1], row[3]);
    body.appendChild(tr);
  }
}

// One chart at a time: the previous one is destroyed before the next is drawn.
function replaceChart(chart) {
  if (state.chart !== null) destroyChart(state.chart);
  state.chart = createChart(chart);
}

function createChart(chart) {
  const canvas = document.getElementById("chart-canvas");
  const ctx = canvas.getContext("2d");
  document.getElementById("chart-title").textContent = chart.title;
  document.getElementById("chart-empty").style.display = chart.values.length ? "none" : "";

  const pad = 48;
  const w = canvas.width - pad * 2;
  const h = canvas.height - pad * 2;
  const max = Math.max(1, ...chart.values.map(v => v === null ? 0 : v));
  const slot = chart.values.length ? w / chart.values.length : w;

  ctx.strokeStyle = "#999";
  ctx.beginPath();
  ctx.moveTo(pad, pad);
  ctx.lineTo(pad, pad + h);
  ctx.lineTo(pad + w, pad + h);
  ctx.stroke();

  ctx.save();
  ctx.translate(14, pad + h / 2);
  ctx.rotate(-Math.PI / 2);
  ctx.textAlign = "center";
  ctx.fillStyle = "#333";
  ctx.fillText(chart.style.y_axis_label, 0, 0);
  ctx.restore();

  ctx.textAlign = "right";
  ctx.fillText(String(max), pad - 4, pad + 4);
  ctx.fillText("0", pad - 4, pad + h);

  chart.values.forEach((v, i) => {
    if (v === null) return;
    const bh = (v / max) * h;
    const x = pad + i * slot + slot * 0.15;
    ctx.fillStyle = chart.style.background_color;
    ctx.fillRect(x, pad + h - bh, slot * 0.7, bh);
    ctx.lineWidth = chart.style.border_width;
    ctx.strokeStyle = "#b8860b";
    ctx.strokeRect(x, pad + h - bh, slot * 0.7, bh);
  });

  ctx.fillStyle = "#333";
  ctx.textAlign = "center";
  const every = Math.max(1, Math.ceil(chart.labels.length / 12));
  chart.labels.forEach((label, i) => {
    if (i % every) return;
    ctx.fillText(label, pad + i * slot + slot / 2, pad + h + 16);
  });

  return { canvas, ctx };
}

function destroyChart(handle) {
  handle.ctx.clearRect(0, 0, handle.canvas.width, handle.canvas.height);
}

function parseCount(text) {
  const v = parseInt(text, 10);
  return Number.isNaN(v) ? null : v;
}

// Rebuilt from the rows on every click, in the table's current order.
function extractSeries(typeName, allocSize) {
  const labels = [];
  const values = [];
  for (const i of state.order) {
    const row = DATA.rows[i];
    if (row[1] === typeName && row[3] === allocSize) {
      const snapshot = parseInt(row[0], 10);
      labels.push("Snapshot " + snapshot + "(" + snapshot * 100 + "ms)");
      values.push(parseCount(row[4]));
    }
  }
  return {
    title: typeName + " (size:" + allocSize + ")",
    labels,
    values,
    style: DATA.chart_style
  };
}

function showSeries(typeName, allocSize) {
  replaceChart(extractSeries(typeName, allocSize));
  document.getElementById("chart-dialog").style.display = "block";
}

document.querySelector("#chart-dialog > span").onclick = () => {
  document.getElementById("chart-dialog").style.display = "none";
};

renderSummary();
renderFilters();
renderHead();
renderBody();
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DashboardConfig, build_dashboard_data};
    use crate::table::Row;

    fn row(cells: [&str; 7]) -> Row {
        Row::from_cells(cells.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn embeds_rows_without_precomputed_series() {
        let rows = vec![
            row(["0", "Foo", "8", "8", "5", "5", "alloc_foo"]),
            row(["1", "Foo", "8", "8", "9", "9", "alloc_foo"]),
        ];
        let html = render_html_dashboard(&build_dashboard_data(&rows, &DashboardConfig::default()))
            .unwrap();
        assert!(!html.contains("__DATA__"));
        assert!(html.contains(r#"["0","Foo","8","8","5","5","alloc_foo"]"#));
        assert!(html.contains(r#""radix":10"#));
        assert!(html.contains(r#""y_axis_label":"Allocations""#));

        // The chart is extracted from the rows on click, never shipped prebuilt.
        assert!(!html.contains(r#""series":["#));
        assert!(!html.contains("Snapshot 0(0ms)"));
        assert!(html.contains("for (const i of state.order)"));
    }

    #[test]
    fn filter_inputs_get_suggestion_lists() {
        let rows = vec![row(["0", "Foo", "8", "8", "5", "5", "alloc_foo"])];
        let html = render_html_dashboard(&build_dashboard_data(&rows, &DashboardConfig::default()))
            .unwrap();
        assert!(html.contains(r#""suggestions":["Foo"]"#));
        assert!(html.contains(r#""suggestions":["alloc_foo"]"#));
        assert!(html.contains(r#"document.createElement("datalist")"#));
    }

    #[test]
    fn script_close_tag_in_data_is_escaped() {
        let rows = vec![row(["0", "</script><b>", "8", "8", "1", "1", ""])];
        let html = render_html_dashboard(&build_dashboard_data(&rows, &DashboardConfig::default()))
            .unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains(r#"<\/script><b>"#));
    }
}
