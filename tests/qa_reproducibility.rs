#![allow(clippy::unwrap_used)]

use advecta::prelude::*;

fn preset_history(scheme: Scheme) -> History {
    let config = AdvectConfig::preset(scheme);
    Integrator::from_config(&config).unwrap().run().unwrap()
}

// H0: Repeated runs of the same configuration differ
// Falsification: Run each preset 10 times; compare serialized histories bitwise
#[test]
fn h0_1_repeated_runs_are_bitwise_identical() {
    for scheme in Scheme::ALL {
        let reference = serde_json::to_string(&preset_history(scheme)).unwrap();
        for _ in 0..10 {
            let again = serde_json::to_string(&preset_history(scheme)).unwrap();
            assert_eq!(reference, again, "{scheme} diverged between runs");
        }
    }
}

// H0: A history loses information when archived
// Falsification: Archive, write, read back and restore; compare with the recorded run
#[test]
fn h0_2_archive_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();

    for scheme in Scheme::ALL {
        let config = AdvectConfig::preset(scheme);
        let integrator = Integrator::from_config(&config).unwrap();
        let history = integrator.run().unwrap();

        let archive = HistoryArchive::create(&history, integrator.grid(), scheme, 3).unwrap();
        let path = dir.path().join(format!("{}.adva", scheme.name()));
        archive.save(&path).unwrap();

        let (restored, x) = HistoryArchive::load(&path).unwrap().restore().unwrap();
        assert_eq!(restored, history);
        assert_eq!(x, integrator.grid().x());
    }
}

// H0: A corrupted archive is accepted
// Falsification: Flip one byte of the compressed payload; restore must fail
#[test]
fn h0_3_corrupted_archive_is_rejected() {
    let config = AdvectConfig::preset(Scheme::LaxFriedrichs);
    let integrator = Integrator::from_config(&config).unwrap();
    let history = integrator.run().unwrap();

    let mut archive =
        HistoryArchive::create(&history, integrator.grid(), Scheme::LaxFriedrichs, 3).unwrap();
    let mid = archive.data.len() / 2;
    archive.data[mid] = archive.data[mid].wrapping_add(1);

    assert!(matches!(
        archive.restore(),
        Err(AdvectError::ArchiveIntegrity)
    ));
}

// H0: The config file path and the programmatic path disagree
// Falsification: Run a preset written to YAML and the same preset built in code
#[test]
fn h0_4_yaml_and_builder_runs_agree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("downwind.yaml");
    let preset = AdvectConfig::preset(Scheme::Downwind);
    std::fs::write(&path, preset.to_yaml().unwrap()).unwrap();

    let from_file = Integrator::from_config(&AdvectConfig::load(&path).unwrap())
        .unwrap()
        .run()
        .unwrap();

    let built = AdvectConfig::builder()
        .scheme(Scheme::Downwind)
        .wave_speed(-2.0)
        .build();
    let from_builder = Integrator::from_config(&built).unwrap().run().unwrap();

    assert_eq!(from_file, from_builder);
}
