use glossviz_wasm::viz::{
    AnalyzerSettings, Catalog, Config, SettingSpec, SettingValue, ANALYZER_BARS,
    ANALYZER_FFT_SIZE, ANALYZER_SMOOTHING, BARS_MAX, FFT_SIZE_MAX, SENSITIVITY_DEFAULT,
    SENSITIVITY_MAX, SENSITIVITY_MIN, SMOOTHING_MAX,
};
use glossviz_wasm::VizError;

fn config() -> Config {
    Catalog::builtin().default_config()
}

#[test]
fn starts_from_declared_defaults() {
    let config = config();
    assert_eq!(config.sensitivity(), SENSITIVITY_DEFAULT);

    let waveform = config.preset("waveform");
    assert_eq!(waveform.preset_id(), "waveform");
    assert_eq!(waveform.number("lineWidth"), 2.0);
    assert_eq!(waveform.text("color"), "#00ff9d");

    let title = config.preset("titleCard");
    assert!(title.flag("glow"));
    assert!(!title.flag("showBackdrop"));
    assert_eq!(title.text("font"), "display");
}

#[test]
fn ranges_are_clamped_at_the_boundary() {
    let mut config = config();
    let stored = config
        .set("gradientBars", "barCount", SettingValue::Number(1e9))
        .unwrap();
    assert_eq!(stored, SettingValue::Number(256.0));
    assert_eq!(config.preset("gradientBars").number("barCount"), 256.0);

    config
        .set("gradientBars", "barCount", SettingValue::Number(-3.0))
        .unwrap();
    assert_eq!(config.preset("gradientBars").number("barCount"), 16.0);
}

#[test]
fn numeric_text_is_parsed_and_garbage_rejected() {
    let mut config = config();
    assert_eq!(
        config
            .set("sphere", "sphereSize", SettingValue::Text(" 120 ".into()))
            .unwrap(),
        SettingValue::Number(120.0)
    );
    let err = config
        .set("sphere", "sphereSize", SettingValue::Text("big".into()))
        .unwrap_err();
    assert!(matches!(err, VizError::ConfigOutOfRange { .. }));
    assert_eq!(config.preset("sphere").number("sphereSize"), 120.0);
}

#[test]
fn non_finite_numbers_are_rejected() {
    let mut config = config();
    assert!(config
        .set("waveform", "lineWidth", SettingValue::Number(f64::NAN))
        .is_err());
    assert!(config.set_sensitivity(f64::INFINITY).is_err());
    assert_eq!(config.preset("waveform").number("lineWidth"), 2.0);
}

#[test]
fn sensitivity_is_clamped() {
    let mut config = config();
    assert_eq!(config.set_sensitivity(100.0).unwrap(), SENSITIVITY_MAX);
    assert_eq!(config.set_sensitivity(0.0).unwrap(), SENSITIVITY_MIN);
}

#[test]
fn select_options_are_validated() {
    let mut config = config();
    config
        .set("geometryPulse", "shape", SettingValue::Text("hexagon".into()))
        .unwrap();
    let err = config
        .set("geometryPulse", "shape", SettingValue::Text("circle".into()))
        .unwrap_err();
    assert!(matches!(err, VizError::InvalidOption { .. }));
    assert_eq!(config.preset("geometryPulse").text("shape"), "hexagon");
}

#[test]
fn colors_are_normalized() {
    let mut config = config();
    let stored = config
        .set("circular", "color", SettingValue::Text("#F0A".into()))
        .unwrap();
    assert_eq!(stored, SettingValue::Text("#ff00aa".into()));
    assert!(config
        .set("circular", "color", SettingValue::Text("red".into()))
        .is_err());
}

#[test]
fn unknown_targets_are_reported() {
    let mut config = config();
    assert!(matches!(
        config.set("nope", "x", SettingValue::Flag(true)),
        Err(VizError::UnknownPreset(_))
    ));
    assert!(matches!(
        config.set("waveform", "nope", SettingValue::Flag(true)),
        Err(VizError::UnknownSetting { .. })
    ));
    assert!(matches!(
        config.set("waveform", "lineWidth", SettingValue::Flag(true)),
        Err(VizError::ConfigOutOfRange { .. })
    ));
}

#[test]
fn reset_restores_defaults_for_one_preset() {
    let mut config = config();
    config.set("waveform", "lineWidth", SettingValue::Number(9.0)).unwrap();
    config.set("sphere", "sphereSize", SettingValue::Number(60.0)).unwrap();

    config.reset("waveform").unwrap();
    assert_eq!(config.preset("waveform").number("lineWidth"), 2.0);
    assert_eq!(config.preset("sphere").number("sphereSize"), 60.0);
}

#[test]
fn json_round_trip_preserves_edits() {
    let mut config = config();
    config.set_sensitivity(2.5).unwrap();
    config
        .set("titleCard", "label", SettingValue::Text("hello".into()))
        .unwrap();
    let json = config.to_json().unwrap();

    let mut restored = Catalog::builtin().default_config();
    restored.merge_json(&json).unwrap();
    assert_eq!(restored.sensitivity(), 2.5);
    assert_eq!(restored.preset("titleCard").text("label"), "hello");
}

#[test]
fn json_merge_clamps_and_skips_bad_entries() {
    let mut config = config();
    let json = r#"{
        "master": {"sensitivity": 42},
        "settings": {
            "starburst": {"rayCount": 100000, "baseColor": "not a color"},
            "ghost": {"x": 1},
            "waveform": {"unknown": true}
        }
    }"#;
    config.merge_json(json).unwrap();

    assert_eq!(config.sensitivity(), SENSITIVITY_MAX);
    assert_eq!(config.preset("starburst").number("rayCount"), 512.0);
    assert_eq!(config.preset("starburst").text("baseColor"), "#00ff9d");
}

#[test]
fn partial_json_keeps_defaults() {
    let mut config = config();
    config.merge_json("{}").unwrap();
    assert_eq!(config.sensitivity(), SENSITIVITY_DEFAULT);
    assert!(matches!(config.merge_json("[1,2"), Err(VizError::Dataset(_))));
}

#[test]
fn standalone_declarations() {
    static SPECS: [SettingSpec; 2] = [
        SettingSpec::checkbox("on", "On", false),
        SettingSpec::text("name", "Name", "x"),
    ];
    let mut config = Config::new([("solo", &SPECS[..])]);
    config.set("solo", "on", SettingValue::Flag(true)).unwrap();
    assert!(config.preset("solo").flag("on"));
    assert_eq!(config.preset("solo").text("name"), "x");
    assert_eq!(config.preset("missing").number("anything"), 0.0);
}

#[test]
fn analyzer_edits_snap_to_usable_values() {
    let mut config = config();
    assert_eq!(config.analyzer(), AnalyzerSettings::default());

    assert_eq!(config.set_analyzer_value(ANALYZER_FFT_SIZE, 100.0).unwrap(), 128.0);
    assert_eq!(config.set_analyzer_value(ANALYZER_FFT_SIZE, 1e9).unwrap(), FFT_SIZE_MAX as f64);
    assert_eq!(config.set_analyzer_value(ANALYZER_FFT_SIZE, -4.0).unwrap(), 32.0);
    assert_eq!(config.set_analyzer_value(ANALYZER_BARS, 0.0).unwrap(), 1.0);
    assert_eq!(config.set_analyzer_value(ANALYZER_BARS, 5000.0).unwrap(), BARS_MAX as f64);
    assert_eq!(config.set_analyzer_value(ANALYZER_SMOOTHING, 1.5).unwrap(), SMOOTHING_MAX);

    assert!(matches!(
        config.set_analyzer_value(ANALYZER_SMOOTHING, f64::NAN),
        Err(VizError::ConfigOutOfRange { .. })
    ));
    assert!(matches!(
        config.set_analyzer_value("analyzer.gain", 1.0),
        Err(VizError::UnknownSetting { .. })
    ));
    assert_eq!(config.analyzer().smoothing, SMOOTHING_MAX);
}

#[test]
fn analyzer_settings_persist_with_the_config() {
    let mut config = config();
    config.set_analyzer_value(ANALYZER_FFT_SIZE, 4096.0).unwrap();
    config.set_analyzer_value(ANALYZER_BARS, 64.0).unwrap();
    let json = config.to_json().unwrap();

    let mut restored = Catalog::builtin().default_config();
    restored.merge_json(&json).unwrap();
    assert_eq!(restored.analyzer().fft_size, 4096);
    assert_eq!(restored.analyzer().bars, 64);

    // Older saves carry no analyzer block; stored values are clamped.
    let mut old = Catalog::builtin().default_config();
    old.merge_json(r#"{"master": {"sensitivity": 2}}"#).unwrap();
    assert_eq!(old.analyzer(), AnalyzerSettings::default());

    let mut odd = Catalog::builtin().default_config();
    odd.merge_json(r#"{"master": {"analyzer": {"fftSize": 3000, "bars": 0}}}"#)
        .unwrap();
    assert_eq!(odd.sensitivity(), SENSITIVITY_DEFAULT);
    assert_eq!(odd.analyzer().fft_size, 4096);
    assert_eq!(odd.analyzer().bars, 1);
    assert_eq!(odd.analyzer().smoothing, 0.8);
}
