use std::collections::HashMap;

use scatterview::{
    ColorScheme, ConfigError, Dataset, Point, Rgba, ScatterConfig, ZoomBounds, DEFAULT_PALETTE,
};

#[test]
fn defaults() {
    let cfg = ScatterConfig::default();
    assert_eq!(cfg.points.size_px, 4.0);
    assert_eq!(cfg.points.opacity, 0.8);
    assert_eq!(cfg.zoom, ZoomBounds { min: 0.9, max: 80.0 });
    assert_eq!(cfg.hover.radius_px, 6.0);
    assert_eq!(cfg.color_scheme, ColorScheme::Light);
    assert!(cfg.features.axes && cfg.features.legend && cfg.features.tooltip);
    assert!(cfg.validate().is_ok());
}

#[test]
fn validate_rejects_bad_values() {
    let mut cfg = ScatterConfig::default();
    cfg.zoom = ZoomBounds { min: 0.0, max: 2.0 };
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

    let mut cfg = ScatterConfig::default();
    cfg.hover.radius_px = f64::NAN;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

    let mut cfg = ScatterConfig::default();
    cfg.margins.left = -1.0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn partial_json_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.json");
    std::fs::write(
        &path,
        r#"{ "title": "Outcomes", "points": { "size_px": 6.0 }, "color_scheme": "Nord" }"#,
    )
    .unwrap();

    let cfg = ScatterConfig::load_json(&path).unwrap();
    assert_eq!(cfg.title, "Outcomes");
    assert_eq!(cfg.points.size_px, 6.0);
    assert_eq!(cfg.points.opacity, 0.8);
    assert_eq!(cfg.color_scheme, ColorScheme::Nord);
    assert_eq!(cfg.zoom, ZoomBounds::default());
}

#[test]
fn save_then_load_keeps_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.json");
    let mut cfg = ScatterConfig::default();
    cfg.hover.radius_px = 12.0;
    cfg.category_colors
        .insert("dismissed".into(), Rgba::rgb(1, 2, 3));
    cfg.save_json(&path).unwrap();
    assert_eq!(ScatterConfig::load_json(&path).unwrap(), cfg);
}

#[test]
fn invalid_json_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");

    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        ScatterConfig::load_json(&path),
        Err(ConfigError::Json(_))
    ));

    std::fs::write(&path, r#"{ "zoom": { "min": 4.0, "max": 2.0 } }"#).unwrap();
    assert!(matches!(
        ScatterConfig::load_json(&path),
        Err(ConfigError::Invalid(_))
    ));

    assert!(matches!(
        ScatterConfig::load_json(dir.path().join("missing.json")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn color_table_uses_palette_and_overrides() {
    let ds = Dataset::new(vec![
        Point::new(0.0, 0.0, "unresolved"),
        Point::new(1.0, 1.0, "paid_full"),
        Point::new(2.0, 2.0, "dismissed"),
    ]);

    let cfg = ScatterConfig::default();
    assert_eq!(cfg.effective_palette(), DEFAULT_PALETTE.to_vec());
    let table = cfg.color_table(&ds);
    assert_eq!(table.color_of("unresolved"), Some(DEFAULT_PALETTE[0]));
    assert_eq!(table.color_of("dismissed"), Some(DEFAULT_PALETTE[2]));

    let mut cfg = ScatterConfig::default();
    cfg.palette = vec![Rgba::rgb(10, 10, 10), Rgba::rgb(20, 20, 20)];
    cfg.category_colors = HashMap::from([("paid_full".to_string(), Rgba::rgb(0, 200, 0))]);
    let table = cfg.color_table(&ds);
    assert_eq!(table.color_of("unresolved"), Some(Rgba::rgb(10, 10, 10)));
    assert_eq!(table.color_of("paid_full"), Some(Rgba::rgb(0, 200, 0)));
    // the override does not use up a palette slot
    assert_eq!(table.color_of("dismissed"), Some(Rgba::rgb(20, 20, 20)));

    let colors = table.color_buffer(&ds);
    assert_eq!(colors.len(), 3);
    assert_eq!(colors[1], Rgba::rgb(0, 200, 0));
}
