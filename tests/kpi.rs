use survey_report::config::AppConfig;
use survey_report::handlers::summarize;
use survey_report::kpi::{apply_aggregate, calc_ticket, revenue_mix};
use survey_report::models::{AggregateResult, Scenario, ScenarioInputs, TicketBand};
use survey_report::ui::{format_mxn, format_percent, scenario_response};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn ticket_band_uses_fixed_offsets() {
    assert_eq!(calc_ticket(78.0), TicketBand { low: 113, high: 133 });
    assert_eq!(calc_ticket(80.4), TicketBand { low: 115, high: 135 });
}

#[test]
fn revenue_mix_for_default_scenario() {
    let mix = revenue_mix(78.0, 57.0);
    assert!(close(mix.otc, 25.65));
    assert!(close(mix.consult, 78.0));
    assert!(close(mix.consult_share, 78.0 / 103.65 * 100.0));
    assert!(close(mix.consult_share + mix.otc_share, 100.0));
    assert_eq!(mix.consult_display, 75);
    assert_eq!(mix.otc_display, 25);
}

#[test]
fn revenue_mix_clamps_attach_and_handles_zero_total() {
    let over = revenue_mix(78.0, 250.0);
    assert!(close(over.otc, 45.0));

    let empty = revenue_mix(0.0, 0.0);
    assert_eq!(empty.consult_share, 100.0);
    assert_eq!(empty.otc_share, 0.0);
    assert_eq!(empty.consult_display, 100);
    assert_eq!(empty.otc_display, 0);
}

#[test]
fn displayed_shares_are_rounded_independently() {
    let exact = revenue_mix(67.5, 50.0);
    assert!(close(exact.consult_share, 75.0));
    assert_eq!(exact.consult_display + exact.otc_display, 100);

    let split = revenue_mix(75.0, 100.0);
    assert!(close(split.consult_share, 62.5));
    assert!(close(split.otc_share, 37.5));
    assert_eq!(split.consult_display, 63);
    assert_eq!(split.otc_display, 38);
    assert_eq!(split.consult_display + split.otc_display, 101);
}

#[test]
fn scenario_inputs_default_and_clamp() {
    assert_eq!(
        ScenarioInputs::default().resolve(),
        Scenario { price: 78.0, attach: 57.0 }
    );
    assert_eq!(
        ScenarioInputs { price: Some(999.0), attach: Some(-3.0) }.resolve(),
        Scenario { price: 120.0, attach: 0.0 }
    );
    assert_eq!(
        ScenarioInputs { price: Some(10.0), attach: Some(f64::NAN) }.resolve(),
        Scenario { price: 50.0, attach: 57.0 }
    );
    assert_eq!(
        ScenarioInputs { price: Some(0.0), attach: Some(0.0) }.resolve(),
        Scenario { price: 50.0, attach: 0.0 }
    );
}

#[test]
fn clamped_price_drives_every_kpi() {
    let response = scenario_response(ScenarioInputs { price: Some(999.0), attach: None }.resolve());
    assert_eq!(response.scenario.price, 120.0);
    assert_eq!(response.ticket, TicketBand { low: 155, high: 175 });
    assert_eq!(response.kpis.price, "$120 MXN");
    assert_eq!(response.kpis.ticket, "$155–$175");
}

#[test]
fn aggregate_overrides_static_inputs_per_field() {
    let inputs = ScenarioInputs { price: Some(90.0), attach: Some(40.0) };

    let none = AggregateResult { n: 2, ..Default::default() };
    assert_eq!(apply_aggregate(&inputs, &none), Scenario { price: 90.0, attach: 40.0 });

    let price_only = AggregateResult { n: 1, psm_avg: Some(84.6), ..Default::default() };
    assert_eq!(
        apply_aggregate(&inputs, &price_only),
        Scenario { price: 85.0, attach: 40.0 }
    );

    let attach_only = AggregateResult { n: 1, attach_avg: Some(0.0), ..Default::default() };
    assert_eq!(
        apply_aggregate(&ScenarioInputs::default(), &attach_only),
        Scenario { price: 78.0, attach: 0.0 }
    );

    let extreme = AggregateResult { n: 1, psm_avg: Some(300.0), attach_avg: Some(80.0), otc_avg: None };
    assert_eq!(
        apply_aggregate(&inputs, &extreme),
        Scenario { price: 120.0, attach: 80.0 }
    );
}

#[test]
fn summary_uses_dash_for_missing_averages() {
    let summary = summarize(&ScenarioInputs::default(), AggregateResult::default());
    assert_eq!(summary.display.n, 0);
    assert_eq!(summary.display.psm, "—");
    assert_eq!(summary.display.attach, "—");
    assert_eq!(summary.display.otc, "—");
    assert_eq!(summary.applied.kpis.price, "$78 MXN");
    assert_eq!(summary.applied.kpis.attach, "57%");
    assert_eq!(summary.applied.kpis.stacked_columns, "75% 25%");
    assert_eq!(summary.applied.kpis.legend_consult, "Consulta ~75%");
    assert_eq!(summary.applied.kpis.legend_otc, "OTC ~25%");
}

#[test]
fn display_formats_round_to_whole_units() {
    assert_eq!(format_mxn(Some(80.4)), "$80 MXN");
    assert_eq!(format_mxn(Some(49.5)), "$50 MXN");
    assert_eq!(format_percent(Some(56.6)), "57%");
    assert_eq!(format_percent(None), "—");
}

#[test]
fn config_reads_lookup_with_fallbacks() {
    let config = AppConfig::from_lookup(|key| match key {
        "PORT" => Some("not-a-port".to_string()),
        "APP_DATA_PATH" => Some("/tmp/surveys.json".to_string()),
        "REPORT_PRICE" => Some("95".to_string()),
        "REPORT_ATTACH" => Some("abc".to_string()),
        _ => None,
    });
    assert_eq!(config.port, 8080);
    assert_eq!(config.data_path, std::path::PathBuf::from("/tmp/surveys.json"));
    assert_eq!(config.scenario, ScenarioInputs { price: Some(95.0), attach: None });

    let defaults = AppConfig::from_lookup(|_| None);
    assert_eq!(
        defaults.data_path,
        std::path::PathBuf::from("data/mktfarma_surveys_v1.json")
    );
}
