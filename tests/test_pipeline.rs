mod common;

use common::*;
use image::Rgb;
use pesoscan::ColorSampler;
use std::io::Write;

fn pipeline() -> ClassificationPipeline {
    ClassificationPipeline::new(PipelineConfig::default()).unwrap()
}

#[test]
fn green_banknote_is_20000() {
    let img = banknote_image(400, 300, 380, 280, Rgb([0, 250, 10]));

    let outcome = pipeline().run(&img).unwrap();
    let classification = outcome.classification().expect("classified");
    assert_eq!(classification.kind, ObjectKind::Banknote);
    assert_eq!(classification.denomination, 20000);
    assert_eq!(classification.diameter_mm, None);
}

#[test]
fn silver_coin_of_22mm_is_200() {
    // 56px radius at 5px/mm is 22.4mm
    let img = coin_image(240, 56, SILVER);

    let outcome = pipeline().run(&img).unwrap();
    let classification = outcome.classification().expect("classified");
    assert_eq!(classification.kind, ObjectKind::Coin);
    assert_eq!(classification.denomination, 200);
    assert!(classification.diameter_mm.is_some());
}

#[test]
fn radius_54_maps_to_200_peso_coin() {
    let pipeline = pipeline();
    let m = pipeline
        .classifier()
        .classify(&Detection::Coin { pixel_radius: 54.0 }, Color::new(140, 140, 140))
        .unwrap();
    assert_eq!(m.denomination, 200);
}

#[test]
fn blank_photo_is_unrecognized() {
    let outcome = pipeline().run(&blank_image(200, 150)).unwrap();
    assert_eq!(outcome, Outcome::Unrecognized);
    assert_eq!(
        outcome.reason(),
        Some("could not determine whether the object is a coin or banknote")
    );
}

#[test]
fn max_distance_turns_weak_match_into_no_match() {
    let mut config = PipelineConfig::default();
    config.matching.max_distance = Some(1.0);
    let pipeline = ClassificationPipeline::new(config).unwrap();

    let outcome = pipeline.run(&coin_image(240, 56, SILVER)).unwrap();
    assert!(
        matches!(outcome, Outcome::NoMatch { kind: ObjectKind::Coin, .. }),
        "{:?}",
        outcome
    );
    assert_eq!(outcome.reason(), Some("could not determine the denomination"));
}

#[test]
fn sequential_and_parallel_runs_agree() {
    let img = banknote_image(400, 300, 380, 280, Rgb([200, 0, 200]));
    let parallel = pipeline().run(&img).unwrap();
    let sequential = pipeline().with_parallel(false).run(&img).unwrap();
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.denomination(), Some(50000));
}

#[test]
fn uniform_photo_samples_its_color() {
    let sampler = ColorSampler::default();
    for (w, h) in [(5, 3), (64, 48), (301, 17)] {
        let color = sampler.sample(&uniform_image(w, h, Rgb([12, 180, 240])));
        assert!(color.r.abs_diff(12) <= 1, "{}x{}: {}", w, h, color);
        assert!(color.g.abs_diff(180) <= 1, "{}x{}: {}", w, h, color);
        assert!(color.b.abs_diff(240) <= 1, "{}x{}: {}", w, h, color);
    }
}

#[test]
fn config_file_overrides_scale() -> anyhow::Result<()> {
    // At 2.5px/mm a 56px radius is 44.8mm, far past every coin; the
    // 1000 peso coin is the largest and wins on diameter.
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    write!(file, r#"{{"matching": {{"pixels_per_mm": 2.5}}}}"#)?;

    let config = PipelineConfig::from_json_file(file.path())?;
    assert_eq!(config.matching.pixels_per_mm, 2.5);

    let outcome = ClassificationPipeline::new(config)?.run(&coin_image(240, 56, SILVER))?;
    assert_eq!(outcome.denomination(), Some(1000));
    Ok(())
}

#[test]
fn missing_config_file_is_reported() {
    let err = PipelineConfig::from_json_file(std::path::Path::new("/nonexistent/pesoscan.json"))
        .unwrap_err();
    assert!(matches!(err, pesoscan::ClassifyError::ConfigLoad { .. }));
}
