//! HTML rendering for the calculator page.

use ixepred_common::IxepredError;
use ixepred_model::interpretation::format_percent;
use ixepred_model::metadata::{EndpointDetail, EndpointSummary};
use ixepred_model::patient::{
    Bounds, AGE_BOUNDS, BMI_BOUNDS, DURATION_BOUNDS, PASI_BOUNDS, PRIOR_BIOLOGICS_BOUNDS,
};
use ixepred_model::{Endpoint, PatientInput, Prediction, Sex, TransparencyPanel, YesNo};

/// Stylesheet inlined into every page
pub const STYLE_CSS: &str = include_str!("../templates/style.css");

const TITLE: &str = "Calculadora predictiva Ixekizumab (semana 16)";
const DISCLAIMER: &str = "Herramienta de apoyo a la decisión clínica. \
    Modelo entrenado con datos observacionales. No sustituye al juicio clínico.";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn shell(title: &str, body: &str) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
    <style>{}</style>
</head>
<body>
<main class="main-content">
{}
</main>
</body>
</html>"#, title, STYLE_CSS, body)
}

/// Full calculator page: form, optional results, transparency panel.
pub fn calculator_page(
    input: &PatientInput,
    prediction: Option<&Prediction>,
    panel: &TransparencyPanel,
) -> String {
    let results = prediction.map(result_html).unwrap_or_default();

    let body = format!(r#"
    <div class="page-header">
        <h1 class="page-title">{}</h1>
        <p class="caption">{}</p>
    </div>
    {}
    {}
    <hr>
    {}"#,
        TITLE, DISCLAIMER, form_html(input), results, transparency_html(panel));

    shell(TITLE, &body)
}

pub fn error_page(err: &IxepredError) -> String {
    let body = format!(r#"
    <div class="page-header">
        <h1 class="page-title">{}</h1>
    </div>
    <div class="alert alert-danger">
        <strong>No se pudo completar el cálculo.</strong>
        <pre class="error-detail">{}</pre>
    </div>
    <a href="/" class="btn btn-outline">Volver</a>"#, TITLE, escape_html(&err.to_string()));

    shell(TITLE, &body)
}

// ── Form ──────────────────────────────────────────────────────────────────────

fn number_field(name: &str, label: &str, bounds: Bounds, step: &str, value: f64) -> String {
    format!(r#"
        <div class="field">
            <label class="form-label" for="{name}">{label}</label>
            <input type="number" id="{name}" name="{name}" class="form-control"
                min="{}" max="{}" step="{step}" value="{value}" required>
        </div>"#, bounds.min, bounds.max)
}

fn select_field(name: &str, label: &str, options: &[&str], selected: &str) -> String {
    let options_html: String = options.iter().map(|opt| {
        let sel = if *opt == selected { " selected" } else { "" };
        format!(r#"<option value="{opt}"{sel}>{opt}</option>"#)
    }).collect();

    format!(r#"
        <div class="field">
            <label class="form-label" for="{name}">{label}</label>
            <select id="{name}" name="{name}" class="form-select">{options_html}</select>
        </div>"#)
}

pub fn form_html(input: &PatientInput) -> String {
    let sexes: Vec<&str> = Sex::ALL.iter().map(Sex::as_str).collect();
    let yes_no: Vec<&str> = YesNo::ALL.iter().map(YesNo::as_str).collect();
    let endpoints: Vec<&str> = Endpoint::ALL.iter().map(Endpoint::as_str).collect();

    let fields = [
        number_field("pasi", "PASI basal", PASI_BOUNDS, "0.1", input.pasi),
        number_field("age", "Edad", AGE_BOUNDS, "1", input.age),
        number_field("bmi", "IMC", BMI_BOUNDS, "0.1", input.bmi),
        select_field("sex", "Sexo", &sexes, input.sex.as_str()),
        select_field("arthritis", "Artritis psoriásica", &yes_no, input.arthritis.as_str()),
        number_field("duration_years", "Años con psoriasis", DURATION_BOUNDS, "1", input.duration_years),
        number_field("prior_biologics", "Nº biológicos previos", PRIOR_BIOLOGICS_BOUNDS, "1", input.prior_biologics),
        select_field("endpoint", "Objetivo", &endpoints, input.endpoint.as_str()),
    ].concat();

    format!(r#"
    <div class="card">
        <form method="POST" action="/predict" class="calculator-form">
            <div class="grid-2">{}</div>
            <button type="submit" class="btn btn-primary">Calcular probabilidad</button>
        </form>
    </div>"#, fields)
}

// ── Results ───────────────────────────────────────────────────────────────────

fn metric_card(label: &str, value: &str) -> String {
    format!(r#"
        <div class="metric-card">
            <div class="metric-label">{}</div>
            <div class="metric-value">{}</div>
        </div>"#, escape_html(label), escape_html(value))
}

pub fn result_html(prediction: &Prediction) -> String {
    let banner = prediction.banner();
    let cards: String = Endpoint::ALL
        .iter()
        .map(|&endpoint| metric_card(endpoint.metric_label(), &format_percent(prediction.probability(endpoint))))
        .collect();
    format!(r#"
    <hr>
    <section class="results">
        <div class="grid-2">{}</div>
        <div class="alert {}">{}</div>
    </section>"#,
        cards, banner.level.css_class(), banner.message)
}

// ── Transparency panel ────────────────────────────────────────────────────────

fn endpoint_html(summary: &EndpointSummary) -> String {
    let name = escape_html(&summary.name);
    match &summary.detail {
        EndpointDetail::Legacy { path, notice } => format!(r#"
        <div class="endpoint">
            <p><strong>{}</strong></p>
            <p class="caption">Archivo del modelo: {}</p>
            <div class="alert alert-info">{}</div>
        </div>"#, name, escape_html(path), notice),
        EndpointDetail::Metrics(m) => format!(r#"
        <div class="endpoint">
            <p><strong>{}</strong></p>
            <div class="grid-4">{}{}{}{}</div>
        </div>"#,
            name,
            metric_card("N", &m.n),
            metric_card("Eventos", &m.pos),
            metric_card("AUC", &m.auc),
            metric_card("Brier", &m.brier)),
    }
}

pub fn transparency_html(panel: &TransparencyPanel) -> String {
    let content = match panel {
        TransparencyPanel::MissingMetadata { warning } => format!(
            r#"<div class="alert alert-warning">{}</div>"#, warning
        ),
        TransparencyPanel::Unreadable { error } => format!(
            r#"<div class="alert alert-danger">No se pudo leer metadata.json: {}</div>"#, escape_html(error)
        ),
        TransparencyPanel::Loaded { features, endpoints } => {
            let endpoints_html: String = endpoints.iter().map(endpoint_html).collect();
            format!(r#"
        <h3>Variables incluidas</h3>
        <p>{}</p>
        <h3>Rendimiento interno</h3>
        {}
        <p class="caption">AUC: discriminación. Brier: calibración (menor es mejor).</p>"#,
                escape_html(features), endpoints_html)
        }
    };

    format!(r#"
    <details class="card transparency">
        <summary>Transparencia del modelo</summary>
        <p>Modelo entrenado con datos observacionales de práctica clínica real.
           Se muestran variables utilizadas y métricas internas del modelo.</p>
        {}
        <p class="caption">Herramienta de apoyo a la decisión clínica. No sustituye el juicio clínico.</p>
    </details>"#, content)
}
