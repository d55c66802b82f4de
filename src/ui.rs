use crate::kpi::{calc_ticket, revenue_mix};
use crate::models::{
    AggregateResult, KpiDisplay, Scenario, ScenarioResponse, SummaryDisplay, SummaryResponse,
};

/// Placeholder for an average no response contributed to.
pub const PLACEHOLDER: &str = "—";

pub fn format_mxn(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("${} MXN", value.round()),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{}%", value.round()),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn summary_display(aggregate: &AggregateResult) -> SummaryDisplay {
    SummaryDisplay {
        n: aggregate.n,
        psm: format_mxn(aggregate.psm_avg),
        attach: format_percent(aggregate.attach_avg),
        otc: format_mxn(aggregate.otc_avg),
    }
}

pub fn scenario_response(scenario: Scenario) -> ScenarioResponse {
    let ticket = calc_ticket(scenario.price);
    let mix = revenue_mix(scenario.price, scenario.attach);
    let kpis = KpiDisplay {
        price: format!("${} MXN", scenario.price),
        attach: format!("{}%", scenario.attach),
        ticket: format!("${}–${}", ticket.low, ticket.high),
        stacked_columns: format!("{}% {}%", mix.consult_display, mix.otc_display),
        legend_consult: format!("Consulta ~{}%", mix.consult_display),
        legend_otc: format!("OTC ~{}%", mix.otc_display),
    };

    ScenarioResponse {
        scenario,
        ticket,
        mix,
        kpis,
    }
}

pub fn render_index(summary: &SummaryResponse) -> String {
    let kpis = &summary.applied.kpis;
    INDEX_HTML
        .replace("{{SUM_N}}", &summary.display.n.to_string())
        .replace("{{SUM_PSM}}", &summary.display.psm)
        .replace("{{SUM_ATTACH}}", &summary.display.attach)
        .replace("{{SUM_OTC}}", &summary.display.otc)
        .replace("{{KPI_PRICE}}", &kpis.price)
        .replace("{{KPI_ATTACH}}", &kpis.attach)
        .replace("{{KPI_TICKET}}", &kpis.ticket)
        .replace("{{STACKED}}", &kpis.stacked_columns)
        .replace("{{LEGEND_CONSULT}}", &kpis.legend_consult)
        .replace("{{LEGEND_OTC}}", &kpis.legend_otc)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Reporte de precio y mezcla de ingresos</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef1f8;
      --bg-2: #c9d3f5;
      --ink: #23252b;
      --consult: rgba(99, 102, 241, 0.65);
      --otc: rgba(20, 184, 166, 0.55);
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4e9f7 60%, #f3f5fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.5rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
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

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stacked {
      display: grid;
      height: 28px;
      border-radius: 999px;
      overflow: hidden;
    }

    .stacked .consult {
      background: var(--consult);
    }

    .stacked .otc {
      background: var(--otc);
    }

    .legend {
      display: flex;
      gap: 18px;
      margin-top: 10px;
      font-size: 0.95rem;
    }

    .legend-dot {
      display: inline-block;
      width: 10px;
      height: 10px;
      border-radius: 50%;
      margin-right: 6px;
    }

    details {
      background: white;
      border-radius: 18px;
      padding: 14px 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      margin-bottom: 12px;
    }

    summary {
      cursor: pointer;
      font-weight: 600;
    }

    form {
      display: grid;
      gap: 14px;
      margin-top: 14px;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.95rem;
    }

    input, select {
      font: inherit;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
    }

    .drivers {
      list-style: none;
      padding: 0;
      margin: 14px 0 0;
      display: grid;
      gap: 12px;
    }

    .range-badge {
      display: inline-block;
      min-width: 2ch;
      margin-left: 6px;
      padding: 2px 8px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
      font-weight: 600;
      text-align: center;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button.ghost {
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    .status {
      font-size: 0.95rem;
      color: #c63b2b;
      min-height: 1.2em;
    }

    @media print {
      button, .status {
        display: none;
      }
    }
  </style>
</head>
<body>
  <main class="app" id="reportRoot">
    <header>
      <h1>Precio de consulta y mezcla de ingresos</h1>
      <button id="printBtn" class="ghost" type="button">Imprimir</button>
    </header>

    <section id="reportSurveySummary">
      <h2>Resumen de encuestas</h2>
      <div class="panel">
        <div class="stat"><span class="label">Respuestas</span><span id="rSumN" class="value">{{SUM_N}}</span></div>
        <div class="stat"><span class="label">Precio PSM promedio</span><span id="rSumPSM" class="value">{{SUM_PSM}}</span></div>
        <div class="stat"><span class="label">Attach OTC</span><span id="rSumAttach" class="value">{{SUM_ATTACH}}</span></div>
        <div class="stat"><span class="label">Gasto OTC</span><span id="rSumOTC" class="value">{{SUM_OTC}}</span></div>
      </div>
    </section>

    <section>
      <h2>KPIs del escenario</h2>
      <div class="panel">
        <div class="stat"><span class="label">Precio consulta</span><span id="metricPSMValue" class="value">{{KPI_PRICE}}</span></div>
        <div class="stat"><span class="label">Attach rate</span><span id="metricAttach" class="value">{{KPI_ATTACH}}</span></div>
        <div class="stat"><span class="label">Ticket estimado</span><span id="metricTicket" class="value">{{KPI_TICKET}}</span></div>
      </div>
    </section>

    <section>
      <h2>Mezcla de ingresos</h2>
      <div id="stackedMix" class="stacked" style="grid-template-columns: {{STACKED}}">
        <div class="consult"></div>
        <div class="otc"></div>
      </div>
      <div class="legend">
        <span id="legendConsult"><i class="legend-dot" style="background: var(--consult)"></i>{{LEGEND_CONSULT}}</span>
        <span id="legendOTC"><i class="legend-dot" style="background: var(--otc)"></i>{{LEGEND_OTC}}</span>
      </div>
    </section>

    <section class="accordion">
      <header>
        <h2>Encuesta</h2>
        <button id="questionToggleAll" class="ghost" type="button">Expandir todo</button>
      </header>
      <form id="surveyForm" method="post" action="/survey">
        <details>
          <summary>Sensibilidad al precio</summary>
          <label>¿A qué precio la consulta te parece barata? (MXN)
            <input name="psm_barato" type="number" min="0" step="1" required />
          </label>
          <label>¿A qué precio la consulta te parece cara? (MXN)
            <input name="psm_caro" type="number" min="0" step="1" required />
          </label>
        </details>
        <details>
          <summary>Compra en mostrador</summary>
          <label>¿Compras productos OTC al salir de la consulta?
            <select name="otc_frecuencia" required>
              <option value="">Selecciona…</option>
              <option>Sí, casi siempre</option>
              <option>A veces</option>
              <option>Rara vez</option>
              <option>Nunca</option>
            </select>
          </label>
          <label>¿Cuánto gastas en esos productos? (MXN)
            <input name="otc_gasto" type="number" min="0" step="1" required />
          </label>
        </details>
        <details>
          <summary>¿Qué pesa al elegir dónde consultar? (0–10)</summary>
          <ul class="drivers">
            <li>
              <label>Precio de la consulta <span class="range-badge" data-for="drv_precio">5</span>
                <input name="drv_precio" type="range" min="0" max="10" step="1" value="5" />
              </label>
            </li>
            <li>
              <label>Cercanía a casa o trabajo <span class="range-badge" data-for="drv_cercania">5</span>
                <input name="drv_cercania" type="range" min="0" max="10" step="1" value="5" />
              </label>
            </li>
            <li>
              <label>Tiempo de espera <span class="range-badge" data-for="drv_espera">5</span>
                <input name="drv_espera" type="range" min="0" max="10" step="1" value="5" />
              </label>
            </li>
            <li>
              <label>Confianza en el médico <span class="range-badge" data-for="drv_confianza">5</span>
                <input name="drv_confianza" type="range" min="0" max="10" step="1" value="5" />
              </label>
            </li>
            <li>
              <label>Surtido de la farmacia <span class="range-badge" data-for="drv_surtido">5</span>
                <input name="drv_surtido" type="range" min="0" max="10" step="1" value="5" />
              </label>
            </li>
          </ul>
        </details>
        <button id="saveSurveyBtn" type="submit">Guardar respuesta</button>
      </form>
      <div class="status" id="status"></div>
    </section>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);
    const form = $('surveyForm');
    const saveBtn = $('saveSurveyBtn');
    const toggleBtn = $('questionToggleAll');
    const details = Array.from(document.querySelectorAll('.accordion details'));

    const legend = (color, text) =>
      `<i class="legend-dot" style="background: var(${color})"></i>${text}`;

    const applySummary = (data) => {
      $('rSumN').textContent = data.display.n;
      $('rSumPSM').textContent = data.display.psm;
      $('rSumAttach').textContent = data.display.attach;
      $('rSumOTC').textContent = data.display.otc;
      $('metricPSMValue').textContent = data.kpis.price;
      $('metricAttach').textContent = data.kpis.attach;
      $('metricTicket').textContent = data.kpis.ticket;
      $('stackedMix').style.gridTemplateColumns = data.kpis.stackedColumns;
      $('legendConsult').innerHTML = legend('--consult', data.kpis.legendConsult);
      $('legendOTC').innerHTML = legend('--otc', data.kpis.legendOtc);
    };

    const setAll = (open) => {
      details.forEach((item) => { item.open = open; });
      toggleBtn.textContent = open ? 'Colapsar todo' : 'Expandir todo';
    };

    toggleBtn.textContent = details.some((item) => !item.open) ? 'Expandir todo' : 'Colapsar todo';
    toggleBtn.addEventListener('click', () => setAll(details.some((item) => !item.open)));

    $('printBtn').addEventListener('click', () => window.print());

    form.querySelectorAll('input[type="range"][name^="drv_"]').forEach((range) => {
      const name = range.getAttribute('name');
      const container = range.closest('li') || range.parentElement || form;
      const badge = container.querySelector(`.range-badge[data-for="${name}"]`) ||
        container.querySelector('.range-badge');
      if (!badge) {
        return;
      }
      const sync = () => { badge.textContent = range.value; };
      sync();
      range.addEventListener('input', sync);
      range.addEventListener('change', sync);
    });

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      if (!form.reportValidity()) {
        return;
      }
      const fields = {};
      new FormData(form).forEach((value, key) => { fields[key] = String(value); });
      try {
        const res = await fetch('/api/surveys', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(fields)
        });
        if (!res.ok) {
          throw new Error((await res.text()) || 'No se pudo guardar');
        }
        applySummary(await res.json());
        $('status').textContent = '';
        saveBtn.textContent = 'Guardado ✓';
        setTimeout(() => { saveBtn.textContent = 'Guardar respuesta'; }, 1500);
      } catch (err) {
        $('status').textContent = err.message;
      }
    });
  </script>
</body>
</html>
"#;
