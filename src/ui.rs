pub fn render_index(user_id: &str) -> String {
    INDEX_HTML.replace("{{USER_ID}}", user_id)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Health Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f2f6f5;
      --bg-2: #cfe6df;
      --ink: #24302d;
      --accent: #1f8a70;
      --accent-2: #2f4858;
      --success: #2d7a4b;
      --warning: #b07d12;
      --danger: #c63b2b;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4f0ea 60%, #f4f7f2 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5c6b66;
      font-size: 1rem;
    }

    .identity-bar {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 12px;
      background: white;
      border: 1px solid rgba(47, 72, 88, 0.08);
      border-radius: 18px;
      padding: 12px 16px;
      font-size: 0.9rem;
    }

    .identity-bar code {
      background: rgba(31, 138, 112, 0.08);
      border-radius: 8px;
      padding: 4px 8px;
    }

    .upstream-dot {
      width: 10px;
      height: 10px;
      border-radius: 50%;
      background: #9aa7a2;
      display: inline-block;
    }

    .upstream-dot[data-state="ok"] {
      background: var(--success);
    }

    .upstream-dot[data-state="degraded"] {
      background: var(--danger);
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
      align-content: start;
    }

    .card h3 {
      margin: 0;
      font-size: 1.1rem;
    }

    .card form {
      display: grid;
      gap: 10px;
    }

    .field {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
    }

    .field input,
    .field select {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
      padding: 8px 10px;
      font-size: 0.95rem;
      font-family: inherit;
    }

    .field-row {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 8px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      font-family: inherit;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    button:disabled {
      opacity: 0.45;
      cursor: default;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(31, 138, 112, 0.3);
    }

    .btn-quiet {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .result {
      border-radius: 12px;
      padding: 12px;
      font-size: 0.9rem;
      display: none;
    }

    .result.visible {
      display: block;
    }

    .result .value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    .result-success {
      background: rgba(45, 122, 75, 0.1);
      color: var(--success);
    }

    .result-warning {
      background: rgba(176, 125, 18, 0.12);
      color: var(--warning);
    }

    .result-danger {
      background: rgba(198, 59, 43, 0.1);
      color: var(--danger);
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

    .chart-header h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      font-weight: 600;
      color: #6b645d;
      box-shadow: none;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    #chart {
      width: 100%;
      height: 260px;
      display: block;
    }

    #chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 3;
    }

    .chart-line-alt {
      fill: none;
      stroke: var(--accent-2);
      stroke-width: 3;
    }

    .chart-point {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-point-alt {
      fill: white;
      stroke: var(--accent-2);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #7a746d;
      font-size: 11px;
    }

    .chart-metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b958f;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .history {
      display: grid;
      gap: 12px;
    }

    .history-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .history-header h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .history-item {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 8px;
      background: white;
      border: 1px solid rgba(47, 72, 88, 0.08);
      border-radius: 14px;
      padding: 10px 14px;
      font-size: 0.9rem;
    }

    .history-item .meta {
      color: #77837d;
      font-size: 0.8rem;
    }

    .history-empty {
      color: #77837d;
      font-size: 0.95rem;
      padding: 12px 4px;
    }

    .pager {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 6px;
    }

    .pager .page {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
      padding: 8px 12px;
    }

    .pager .page.active {
      background: var(--accent);
      color: white;
    }

    .pager .gap {
      color: #8b958f;
      padding: 0 4px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .status[data-type="ok"] {
      color: var(--success);
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Health Tracker</h1>
        <p class="subtitle">BMI, daily calories and blood pressure, with history and trends.</p>
      </div>
      <span><span id="upstream-dot" class="upstream-dot"></span> <span id="upstream-text">checking service</span></span>
    </header>

    <div class="identity-bar">
      <span>Profile</span>
      <code id="identity-token">{{USER_ID}}</code>
      <button class="btn-quiet" id="reset-identity" type="button">Reset</button>
      <button class="btn-quiet" id="logout" type="button">Log out</button>
    </div>

    <div class="status" id="status"></div>

    <section class="cards">
      <div class="card">
        <h3>Body mass index</h3>
        <form id="bmi-form">
          <div class="field-row">
            <label class="field">Weight, kg
              <input name="weight" type="number" step="0.1" min="0" placeholder="70" />
            </label>
            <label class="field">Height, cm
              <input name="height" type="number" step="0.1" min="0" placeholder="175" />
            </label>
          </div>

          <button class="btn-primary" type="submit">Calculate BMI</button>
        </form>
        <div id="bmi-result" class="result"></div>
      </div>

      <div class="card">
        <h3>Daily calories</h3>
        <form id="calories-form">
          <div class="field-row">
            <label class="field">Age
              <input name="age" type="number" step="1" min="0" placeholder="25" />
            </label>
            <label class="field">Gender
              <select name="gender">
                <option value="">--</option>
                <option value="m">Male</option>
                <option value="f">Female</option>
              </select>
            </label>
          </div>
          <div class="field-row">
            <label class="field">Weight, kg
              <input name="weight" type="number" step="0.1" min="0" placeholder="70" />
            </label>
            <label class="field">Height, cm
              <input name="height" type="number" step="0.1" min="0" placeholder="175" />
            </label>
          </div>
          <label class="field">Activity
            <select name="activity">
              <option value="1.2">Sedentary</option>
              <option value="1.375">Light (1-3 days/week)</option>
              <option value="1.55" selected>Moderate (3-5 days/week)</option>
              <option value="1.725">High (6-7 days/week)</option>
              <option value="1.9">Extreme (twice daily)</option>
            </select>
          </label>

          <button class="btn-primary" type="submit">Calculate calories</button>
        </form>
        <div id="calories-result" class="result"></div>
      </div>

      <div class="card">
        <h3>Blood pressure</h3>
        <form id="pressure-form">
          <div class="field-row">
            <label class="field">Systolic
              <input name="systolic" type="number" step="1" min="0" placeholder="120" />
            </label>
            <label class="field">Diastolic
              <input name="diastolic" type="number" step="1" min="0" placeholder="80" />
            </label>
          </div>

          <button class="btn-primary" type="submit">Classify</button>
        </form>
        <div id="pressure-result" class="result"></div>
      </div>
    </section>

    <section class="chart-area">
      <div class="chart-header">
        <div>
          <h2 id="chart-title">BMI trend</h2>
          <p id="chart-subtitle" class="subtitle">Saved readings, oldest to newest.</p>
        </div>
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-tab="bmi" role="tab" aria-selected="true">BMI</button>
          <button class="tab" type="button" data-tab="calories" role="tab" aria-selected="false">Calories</button>
          <button class="tab" type="button" data-tab="pressure" role="tab" aria-selected="false">Pressure</button>
        </div>
      </div>
      <div class="chart-card">
        <svg id="chart" viewBox="0 0 600 260" aria-label="Trend chart" role="img"></svg>
      </div>
      <div class="chart-metrics">
        <div class="stat">
          <span class="label" id="metric-1-label">Latest</span>
          <span class="value" id="metric-1-value">--</span>
        </div>
        <div class="stat">
          <span class="label" id="metric-2-label">Average</span>
          <span class="value" id="metric-2-value">--</span>
        </div>
        <div class="stat">
          <span class="label" id="metric-3-label">Readings</span>
          <span class="value" id="metric-3-value">0</span>
        </div>
      </div>
    </section>

    <section class="history">
      <div class="history-header">
        <h2>History</h2>
        <label class="field">Filter
          <select id="history-filter">
            <option value="">All types</option>
            <option value="imt">BMI</option>
            <option value="calories">Calories</option>
            <option value="blood_pressure">Blood pressure</option>
          </select>
        </label>
      </div>
      <div id="history-list"></div>
      <div class="pager" id="pager"></div>
      <p class="subtitle" id="stats-line"></p>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');
    const chartTitleEl = document.getElementById('chart-title');
    const historyListEl = document.getElementById('history-list');
    const pagerEl = document.getElementById('pager');
    const statsLineEl = document.getElementById('stats-line');
    const identityEl = document.getElementById('identity-token');
    const filterEl = document.getElementById('history-filter');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    const typeLabels = {
      imt: 'BMI',
      calories: 'Calories',
      blood_pressure: 'Blood pressure'
    };

    let trendData = null;
    let activeTab = 'bmi';
    let historyOffset = 0;
    let statusTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (statusTimer) {
        clearTimeout(statusTimer);
        statusTimer = null;
      }
      if (type === 'ok') {
        statusTimer = setTimeout(() => setStatus('', ''), 1800);
      }
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || ('Request failed (' + res.status + ')'));
      }
      return res.json();
    };

    const num = (form, name) => {
      const raw = form.elements[name].value.trim();
      if (raw === '') {
        return null;
      }
      const value = Number(raw);
      return Number.isFinite(value) ? value : null;
    };

    const showResult = (el, severity, html) => {
      el.className = 'result visible result-' + severity;
      el.innerHTML = html;
    };

    // -- Charts (single and dual series line rendering) --

    const formatAxisValue = (value) => {
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const chartScales = (allValues, count) => {
      const width = 600;
      const height = 260;
      const paddingX = 44;
      const paddingY = 34;
      const top = 24;

      let min = Math.min(...allValues);
      let max = Math.max(...allValues);
      if (min === max) {
        min -= 1;
        max += 1;
      }
      const range = max - min;
      const xStep = count > 1 ? (width - paddingX * 2) / (count - 1) : 0;
      const scaleY = (height - top - paddingY) / range;
      return {
        width,
        height,
        paddingX,
        paddingY,
        min,
        range,
        x: (index) => paddingX + index * xStep,
        y: (value) => height - paddingY - (value - min) * scaleY
      };
    };

    const gridLines = (s) => {
      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = s.min + (s.range * i) / ticks;
        const yPos = s.y(value);
        grid += '<line class="chart-grid" x1="' + s.paddingX + '" y1="' + yPos +
          '" x2="' + (s.width - s.paddingX) + '" y2="' + yPos + '" />';
        grid += '<text class="chart-label" x="' + (s.paddingX - 10) + '" y="' + (yPos + 4) +
          '" text-anchor="end">' + formatAxisValue(value) + '</text>';
      }
      return grid;
    };

    const xLabels = (s, labels) => {
      const every = labels.length > 8 ? 2 : 1;
      return labels.map((label, index) => {
        if (index % every !== 0) {
          return '';
        }
        return '<text class="chart-label" x="' + s.x(index) + '" y="' +
          (s.height - s.paddingY + 18) + '" text-anchor="middle">' + label + '</text>';
      }).join('');
    };

    const linePath = (s, values) => values
      .map((value, index) => (index === 0 ? 'M ' : 'L ') + s.x(index).toFixed(2) + ' ' + s.y(value).toFixed(2))
      .join(' ');

    const circleRow = (s, values, cls) => values
      .map((value, index) => '<circle class="' + cls + '" cx="' + s.x(index) + '" cy="' + s.y(value) + '" r="4" />')
      .join('');

    const renderEmptyChart = () => {
      chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No readings yet</text>';
    };

    const renderLineChart = (points) => {
      if (!points.length) {
        renderEmptyChart();
        return;
      }
      const values = points.map((p) => p.value);
      const s = chartScales(values, points.length);
      chartEl.innerHTML = gridLines(s) +
        '<path class="chart-line" d="' + linePath(s, values) + '" />' +
        circleRow(s, values, 'chart-point') +
        xLabels(s, points.map((p) => p.date));
    };

    const renderDualChart = (points) => {
      if (!points.length) {
        renderEmptyChart();
        return;
      }
      const systolic = points.map((p) => p.systolic);
      const diastolic = points.map((p) => p.diastolic);
      const s = chartScales(systolic.concat(diastolic), points.length);
      chartEl.innerHTML = gridLines(s) +
        '<path class="chart-line" d="' + linePath(s, systolic) + '" />' +
        '<path class="chart-line-alt" d="' + linePath(s, diastolic) + '" />' +
        circleRow(s, systolic, 'chart-point') +
        circleRow(s, diastolic, 'chart-point-alt') +
        xLabels(s, points.map((p) => p.date));
    };

    const setMetrics = (latest, average, count) => {
      document.getElementById('metric-1-value').textContent = latest;
      document.getElementById('metric-2-value').textContent = average;
      document.getElementById('metric-3-value').textContent = count;
    };

    const averageOf = (values) => {
      if (!values.length) {
        return '--';
      }
      const avg = values.reduce((acc, v) => acc + v, 0) / values.length;
      return formatAxisValue(avg);
    };

    const renderActiveTab = () => {
      if (!trendData) {
        return;
      }
      if (activeTab === 'calories') {
        chartTitleEl.textContent = 'Calorie trend';
        const points = trendData.calories;
        renderLineChart(points);
        const values = points.map((p) => p.value);
        setMetrics(values.length ? values[values.length - 1] : '--', averageOf(values), values.length);
      } else if (activeTab === 'pressure') {
        chartTitleEl.textContent = 'Blood pressure trend';
        const points = trendData.pressure;
        renderDualChart(points);
        const last = points[points.length - 1];
        setMetrics(last ? last.systolic + '/' + last.diastolic : '--',
          averageOf(points.map((p) => p.systolic)), points.length);
      } else {
        chartTitleEl.textContent = 'BMI trend';
        const points = trendData.bmi;
        renderLineChart(points);
        const values = points.map((p) => p.value);
        setMetrics(values.length ? values[values.length - 1] : '--', averageOf(values), values.length);
      }
    };

    const setActiveTab = (tab) => {
      activeTab = tab;
      tabs.forEach((button) => {
        const isActive = button.dataset.tab === tab;
        button.classList.toggle('active', isActive);
        button.setAttribute('aria-selected', String(isActive));
      });
      renderActiveTab();
    };

    // -- History --

    const historyQuery = (offset) => {
      const params = new URLSearchParams({ offset: String(offset) });
      if (filterEl.value) {
        params.set('calc_type', filterEl.value);
      }
      return params.toString();
    };

    const renderHistory = (view) => {
      if (view.stale) {
        return;
      }
      historyOffset = view.pagination.offset;

      if (!view.records.length) {
        historyListEl.innerHTML = '<p class="history-empty">Nothing saved yet.</p>';
      } else {
        historyListEl.innerHTML = view.records.map((record) => {
          const label = typeLabels[record.calc_type] || record.calc_type;
          const when = (record.created_at || '').slice(0, 16).replace('T', ' ');
          const note = record.interpretation || '';
          return '<div class="history-item">' +
            '<span><strong>' + label + '</strong> ' + record.result +
            ' <span class="meta">' + note + '</span></span>' +
            '<span class="meta">' + when + '</span>' +
            '<button class="btn-quiet" data-delete="' + record.id + '" type="button">Delete</button>' +
            '</div>';
        }).join('');
      }

      const p = view.pagination;
      let controls = '';
      controls += '<button class="btn-quiet" id="pager-prev" type="button"' +
        (p.prev_enabled ? '' : ' disabled') + '>Prev</button>';
      controls += p.items.map((item) => {
        if (item.kind === 'ellipsis') {
          return '<span class="gap">&hellip;</span>';
        }
        return '<button class="page' + (item.current ? ' active' : '') +
          '" data-page="' + item.number + '" type="button">' + item.number + '</button>';
      }).join('');
      controls += '<button class="btn-quiet" id="pager-next" type="button"' +
        (p.next_enabled ? '' : ' disabled') + '>Next</button>';
      pagerEl.innerHTML = controls;

      pagerEl.querySelectorAll('[data-page]').forEach((button) => {
        button.addEventListener('click', () => {
          const page = Number(button.dataset.page);
          loadHistory((page - 1) * p.limit).catch((err) => setStatus(err.message, 'error'));
        });
      });
      const prev = document.getElementById('pager-prev');
      const next = document.getElementById('pager-next');
      if (p.prev_enabled) {
        prev.addEventListener('click', () => {
          loadHistory(Math.max(0, historyOffset - p.limit)).catch((err) => setStatus(err.message, 'error'));
        });
      }
      if (p.next_enabled) {
        next.addEventListener('click', () => {
          loadHistory(historyOffset + p.limit).catch((err) => setStatus(err.message, 'error'));
        });
      }
      historyListEl.querySelectorAll('[data-delete]').forEach((button) => {
        button.addEventListener('click', () => {
          deleteRecord(Number(button.dataset.delete)).catch((err) => setStatus(err.message, 'error'));
        });
      });
    };

    const loadHistory = async (offset) => {
      const view = await request('/api/history?' + historyQuery(offset));
      renderHistory(view);
    };

    const deleteRecord = async (id) => {
      if (!confirm('Delete this record?')) {
        return;
      }
      const view = await request('/api/history/' + id + '?' + historyQuery(historyOffset), {
        method: 'DELETE'
      });
      renderHistory(view);
      loadTrends().catch(() => {});
      loadStats().catch(() => {});
      setStatus('Record deleted', 'ok');
    };

    const loadTrends = async () => {
      trendData = await request('/api/trends');
      renderActiveTab();
    };

    const loadStats = async () => {
      const reply = await request('/api/stats');
      const stats = reply.stats || {};
      const total = stats.total || 0;
      const byType = stats.by_type || {};
      const parts = Object.keys(byType).map((key) => {
        const label = typeLabels[key] || key;
        return label + ' ' + byType[key].count;
      });
      statsLineEl.textContent = total
        ? total + ' saved calculations' + (parts.length ? ' (' + parts.join(', ') + ')' : '')
        : '';
    };

    const loadHealth = async () => {
      const dot = document.getElementById('upstream-dot');
      const text = document.getElementById('upstream-text');
      try {
        const view = await request('/api/health');
        dot.dataset.state = view.status;
        text.textContent = view.status === 'ok' ? 'service online' : 'service degraded';
      } catch (err) {
        dot.dataset.state = 'degraded';
        text.textContent = 'service unreachable';
      }
    };

    const refreshAll = () => {
      loadHistory(historyOffset).catch((err) => setStatus(err.message, 'error'));
      loadTrends().catch((err) => setStatus(err.message, 'error'));
      loadStats().catch(() => {});
    };

    // -- Calculators --

    const submitCalc = async (url, payload, render) => {
      setStatus('Saving...', '');
      const data = await request(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      });
      render(data.reading);
      setStatus('Saved', 'ok');
      refreshAll();
    };

    document.getElementById('bmi-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = event.target;
      submitCalc('/api/calc/imt', {
        weight: num(form, 'weight'),
        height: num(form, 'height')
      }, (reading) => {
        showResult(document.getElementById('bmi-result'), reading.severity,
          '<span class="value">' + reading.value + '</span><br />' + reading.category);
      }).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('calories-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = event.target;
      const gender = form.elements.gender.value || null;
      submitCalc('/api/calc/calories', {
        age: num(form, 'age'),
        weight: num(form, 'weight'),
        height: num(form, 'height'),
        gender: gender,
        activity: num(form, 'activity')
      }, (reading) => {
        showResult(document.getElementById('calories-result'), reading.severity,
          '<span class="value">' + reading.tdee_kcal + ' kcal/day</span><br />' +
          reading.activity_label +
          '<br /><span class="meta">BMR ' + reading.bmr + ' kcal, water ' + reading.water_liters +
          ' l/day, ideal weight ' + reading.ideal_weight_kg + ' &plusmn; ' +
          reading.ideal_weight_margin_kg + ' kg</span>');
      }).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('pressure-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = event.target;
      submitCalc('/api/calc/blood-pressure', {
        systolic: num(form, 'systolic'),
        diastolic: num(form, 'diastolic')
      }, (reading) => {
        showResult(document.getElementById('pressure-result'), reading.severity,
          '<span class="value">' + reading.systolic + '/' + reading.diastolic + '</span><br />' +
          reading.category + '<br /><span class="meta">' + reading.advice + '</span>');
      }).catch((err) => setStatus(err.message, 'error'));
    });

    // -- Identity --

    document.getElementById('reset-identity').addEventListener('click', () => {
      if (!confirm('Reset your profile? Saved history stays on the server but will no longer be linked to you.')) {
        return;
      }
      request('/api/identity/reset', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ confirm: true })
      }).then((view) => {
        identityEl.textContent = view.user_id;
        historyOffset = 0;
        setStatus('Profile reset', 'ok');
        refreshAll();
      }).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('logout').addEventListener('click', () => {
      request('/api/identity/logout', { method: 'POST' }).then((view) => {
        identityEl.textContent = view.user_id;
        historyOffset = 0;
        setStatus('Logged out', 'ok');
        refreshAll();
      }).catch((err) => setStatus(err.message, 'error'));
    });

    filterEl.addEventListener('change', () => {
      historyOffset = 0;
      loadHistory(0).catch((err) => setStatus(err.message, 'error'));
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });

    refreshAll();
    loadHealth();
  </script>
</body>
</html>
"##;
