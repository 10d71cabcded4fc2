//! Configuration resolution as the binary sees it

use std::collections::HashMap;
use std::sync::Arc;

use number_trainer::config::Overrides;
use number_trainer::config::file::parse_config;
use number_trainer::generator::SET_SIZE;
use number_trainer::{
    Config, Error, GroupedDigits, RngSource, SilentVoice, SpeechBackend, Trainer,
    TrainerSettings, speech,
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[tokio::test(start_paused = true)]
async fn test_board_size_ignores_count_settings() {
    let fc = parse_config("count = 8\n").unwrap();
    let config = Config::from_sources(fc, env_from(&[("NUMTRAIN_COUNT", "2")])).unwrap();

    let mut trainer = Trainer::new(
        RngSource::seeded(5),
        TrainerSettings::from(&config),
        Arc::new(SilentVoice),
        Arc::new(GroupedDigits),
    );
    assert_eq!(trainer.board().len(), SET_SIZE);
    assert_eq!(trainer.items().len(), SET_SIZE);

    for _ in 0..10 {
        trainer.regenerate();
        assert_eq!(trainer.board().len(), SET_SIZE);
        assert_eq!(trainer.board().revealed(), &[false; SET_SIZE]);
    }
}

#[test]
fn test_cli_backend_override_skips_remote_key() {
    let mut config = Config::resolve(
        parse_config("[speech]\nbackend = \"remote\"\n").unwrap(),
        env_from(&[]),
    );
    config.apply(Overrides {
        speech: Some(SpeechBackend::Silent),
        ..Overrides::default()
    });

    config.validate().unwrap();
    assert!(speech::from_config(&config.speech).is_ok());
}

#[test]
fn test_remote_without_key_loads_but_cannot_speak() {
    // `generate` only needs the resolved config; `drill` and `say` build the sink
    let config = Config::from_sources(
        parse_config("").unwrap(),
        env_from(&[("NUMTRAIN_SPEECH_BACKEND", "remote")]),
    )
    .unwrap();
    assert_eq!(config.speech.backend, SpeechBackend::Remote);

    let err = speech::from_config(&config.speech).err().unwrap();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_cli_language_replaces_invalid_env_language() {
    let mut config = Config::resolve(
        parse_config("").unwrap(),
        env_from(&[("NUMTRAIN_LANGUAGE", " ")]),
    );
    assert!(config.validate().is_err());

    config.apply(Overrides {
        language: Some("ja-JP".to_string()),
        ..Overrides::default()
    });
    config.validate().unwrap();
    assert_eq!(TrainerSettings::from(&config).language, "ja-JP");
}
