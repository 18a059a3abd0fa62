use std::collections::HashSet;

use glossviz_wasm::viz::{
    presets, AssetHandle, Assets, Catalog, Control, ImageHandle, Op, Recorder, SettingValue,
    VisualizerSession, FALLBACK_FONT, SENSITIVITY_MAX, SENSITIVITY_MIN,
};

const BINS: usize = 300;

fn render_frames(session: &mut VisualizerSession, surface: &mut Recorder, audio: &[u8]) {
    for frame in 0..3 {
        session.render(surface, audio, frame as f64 / 60.0);
    }
}

fn assert_finite(surface: &Recorder, what: &str) {
    if let Some(op) = surface.ops.iter().find(|op| !op.numbers().iter().all(|n| n.is_finite())) {
        panic!("{what}: non-finite op {op:?}");
    }
}

#[test]
fn catalog_has_unique_ids_in_display_order() {
    let catalog = Catalog::builtin();
    let ids: Vec<&str> = catalog.presets().iter().map(|p| p.id).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();

    assert_eq!(ids.len(), presets::ALL.len());
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids.first(), Some(&"waveform"));
    assert!(ids.contains(&"vaporwaveDrive"));
    assert!(ids.contains(&"titleCard"));
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut catalog = Catalog::builtin();
    assert!(catalog.register(presets::WAVEFORM).is_err());
    assert_eq!(catalog.presets().len(), presets::ALL.len());
}

#[test]
fn setting_declarations_are_consistent() {
    for preset in presets::ALL {
        let mut seen = HashSet::new();
        for spec in preset.settings {
            assert!(seen.insert(spec.id), "{}: duplicate setting {}", preset.id, spec.id);
            match spec.control {
                Control::Range { min, max, step, default } => {
                    assert!(min <= default && default <= max, "{}.{}", preset.id, spec.id);
                    assert!(step > 0.0, "{}.{}", preset.id, spec.id);
                }
                Control::Select { options, default } => {
                    assert!(options.contains(&default), "{}.{}", preset.id, spec.id);
                }
                _ => {}
            }
        }
    }
}

#[test]
fn every_range_extreme_renders_finite_geometry() {
    let silent = vec![0u8; BINS];
    let loud = vec![255u8; BINS];

    for preset in presets::ALL {
        for spec in preset.settings {
            let Control::Range { min, max, .. } = spec.control else {
                continue;
            };
            for value in [min, max] {
                for sensitivity in [SENSITIVITY_MIN, SENSITIVITY_MAX] {
                    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
                    session.config_mut().set_sensitivity(sensitivity).unwrap();
                    session
                        .config_mut()
                        .set(preset.id, spec.id, SettingValue::Number(value))
                        .unwrap();
                    session.activate(preset.id).unwrap();

                    for audio in [&silent, &loud] {
                        let mut surface = Recorder::new(800.0, 600.0);
                        render_frames(&mut session, &mut surface, audio);
                        assert!(!surface.ops.is_empty(), "{} drew nothing", preset.id);
                        assert_finite(
                            &surface,
                            &format!("{}.{}={value} sens={sensitivity}", preset.id, spec.id),
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn empty_audio_and_degenerate_surfaces_stay_finite() {
    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
    for preset in presets::ALL {
        session.activate(preset.id).unwrap();
        for (w, h) in [(0.0, 0.0), (1.0, 1.0), (1920.0, 1080.0)] {
            let mut surface = Recorder::new(w, h);
            render_frames(&mut session, &mut surface, &[]);
            assert_finite(&surface, &format!("{} at {w}x{h}", preset.id));
        }
    }
}

#[test]
fn edits_apply_on_the_next_frame() {
    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
    session.activate("waveform").unwrap();

    let mut surface = Recorder::new(100.0, 100.0);
    session.render(&mut surface, &[128; 4], 0.0);
    assert!(surface.take().contains(&Op::LineWidth(2.0)));

    session
        .config_mut()
        .set("waveform", "lineWidth", SettingValue::Number(7.0))
        .unwrap();
    session.render(&mut surface, &[128; 4], 0.0);
    assert!(surface.take().contains(&Op::LineWidth(7.0)));
}

#[test]
fn sensitivity_scales_reactive_geometry() {
    let radius_of_ring = |sensitivity: f64| {
        let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
        session.config_mut().set_sensitivity(sensitivity).unwrap();
        session.activate("waveRings").unwrap();
        let mut surface = Recorder::new(400.0, 400.0);
        session.render(&mut surface, &[255; BINS], 0.0);
        surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Arc(_, _, r, _, _) => Some(*r),
                _ => None,
            })
            .fold(0.0, f64::max)
    };
    assert!(radius_of_ring(2.0) > radius_of_ring(1.0));
}

#[test]
fn switching_presets_resets_their_state() {
    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
    let loud = [255u8; BINS];

    let blob_points = |surface: &Recorder| -> Vec<Op> {
        surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::MoveTo(..) | Op::QuadraticCurveTo(..)))
            .cloned()
            .collect()
    };

    session.activate("liquid").unwrap();
    let mut first = Recorder::new(400.0, 400.0);
    session.render(&mut first, &loud, 0.0);

    // Let the blob settle toward the loud target.
    let mut settled = Recorder::new(400.0, 400.0);
    for _ in 0..10 {
        settled.take();
        session.render(&mut settled, &loud, 0.0);
    }
    assert_ne!(blob_points(&first), blob_points(&settled));

    session.activate("circular").unwrap();
    session.activate("liquid").unwrap();
    let mut again = Recorder::new(400.0, 400.0);
    session.render(&mut again, &loud, 0.0);
    assert_eq!(blob_points(&first), blob_points(&again));
}

#[test]
fn unknown_preset_leaves_active_one_alone() {
    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
    session.activate("sphere").unwrap();
    assert!(session.activate("nope").is_err());
    assert_eq!(session.active_id(), Some("sphere"));

    session.deactivate();
    let mut surface = Recorder::new(10.0, 10.0);
    session.render(&mut surface, &[1, 2, 3], 0.0);
    assert!(surface.ops.is_empty());
}

#[test]
fn title_card_falls_back_without_assets() {
    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
    session
        .config_mut()
        .set("titleCard", "showBackdrop", SettingValue::Flag(true))
        .unwrap();
    session.activate("titleCard").unwrap();

    let mut surface = Recorder::new(640.0, 360.0);
    session.render(&mut surface, &[0; BINS], 0.0);

    assert!(!surface.ops.iter().any(|op| matches!(op, Op::DrawImage(..))));
    assert!(surface
        .ops
        .iter()
        .any(|op| matches!(op, Op::Font(font) if font.ends_with(FALLBACK_FONT))));
    assert!(surface
        .ops
        .iter()
        .any(|op| matches!(op, Op::FillText(text, ..) if text == "microviz")));
}

#[test]
fn title_card_uses_loaded_assets() {
    let mut assets = Assets::new();
    assets.insert("display", AssetHandle::Font("display".into()));
    assets.insert("backdrop", AssetHandle::Image(ImageHandle(7)));

    let mut session = VisualizerSession::new(Catalog::builtin(), assets);
    session
        .config_mut()
        .set("titleCard", "showBackdrop", SettingValue::Flag(true))
        .unwrap();
    session.activate("titleCard").unwrap();

    let mut surface = Recorder::new(640.0, 360.0);
    session.render(&mut surface, &[0; BINS], 0.0);

    assert!(surface
        .ops
        .contains(&Op::DrawImage(ImageHandle(7), 0.0, 0.0, 640.0, 360.0)));
    assert!(surface
        .ops
        .iter()
        .any(|op| matches!(op, Op::Font(font) if font.ends_with(" display"))));
}

#[test]
fn gravity_vortex_follows_particle_count() {
    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
    session.activate("gravityVortex").unwrap();

    let arcs = |session: &mut VisualizerSession| {
        let mut surface = Recorder::new(500.0, 500.0);
        session.render(&mut surface, &[64; BINS], 0.0);
        surface.ops.iter().filter(|op| matches!(op, Op::Arc(..))).count()
    };

    assert_eq!(arcs(&mut session), 1000);
    session
        .config_mut()
        .set("gravityVortex", "particleCount", SettingValue::Number(50.0))
        .unwrap();
    assert_eq!(arcs(&mut session), 50);
}
