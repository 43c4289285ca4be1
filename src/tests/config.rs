use crate::config::Config;
use crate::errors::ConfigError;
use crate::search_query::Conjunction;
use crate::storage::{BackendLocal, StorageManager};

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Fresh start: no files → default config.yaml created
#[test]
fn test_empty_start() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    let config = Config::load_with(base_path).unwrap();

    assert!(store.exists("config.yaml"));
    assert!(config.stop_words.is_empty());
    assert_eq!(config.default_conjunction, Conjunction::And);
    assert!(config.stop_words().unwrap().is_empty());
}

/// Inline words and the stop-word file are merged
#[test]
fn test_stop_words_from_config_and_file() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    store
        .write("stop.txt", b"# english\nthe\nOf\n\n")
        .unwrap();
    let config_content = "stop_words:\n- A\n- an\nstop_words_file: stop.txt\ndefault_conjunction: or\n";
    store.write("config.yaml", config_content.as_bytes()).unwrap();

    let config = Config::load_with(base_path).unwrap();
    assert_eq!(config.default_conjunction, Conjunction::Or);

    let stop_words = config.stop_words().unwrap();
    assert_eq!(stop_words.sorted(), vec!["a", "an", "of", "the"]);

    let converter = config.converter().unwrap();
    assert_eq!(
        converter.convert("the cat of an owl"),
        "FORMSOF(INFLECTIONAL, cat) OR FORMSOF(INFLECTIONAL, owl)"
    );
}

#[test]
fn test_missing_stop_word_file() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();
    store
        .write("config.yaml", b"stop_words_file: missing.txt\n")
        .unwrap();

    let config = Config::load_with(base_path).unwrap();
    assert!(matches!(config.stop_words(), Err(ConfigError::IO(_))));
}

#[test]
fn test_empty_stop_word_rejected() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();
    store
        .write("config.yaml", b"stop_words:\n- the\n- '  '\n")
        .unwrap();

    assert!(matches!(
        Config::load_with(base_path),
        Err(ConfigError::EmptyStopWord(2))
    ));
}

#[test]
fn test_malformed_config() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();
    store
        .write("config.yaml", b"default_conjunction: sometimes\n")
        .unwrap();

    assert!(matches!(
        Config::load_with(base_path),
        Err(ConfigError::Yaml(_))
    ));
}

/// A second load does not rewrite the upgraded file
#[test]
fn test_config_no_resave_after_upgrade() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    store.write("config.yaml", b"stop_words: [the]\n").unwrap();

    let _config = Config::load_with(base_path).unwrap();
    let after = String::from_utf8(store.read("config.yaml").unwrap()).unwrap();
    assert!(after.contains("default_conjunction: and"));

    let _config2 = Config::load_with(base_path).unwrap();
    let after2 = String::from_utf8(store.read("config.yaml").unwrap()).unwrap();
    assert_eq!(after, after2, "second load should not trigger another resave");
}

/// Command-line overrides layer on top of the configured converter
#[test]
fn test_converter_overrides() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();
    store.write("config.yaml", b"stop_words: [the]\n").unwrap();

    let config = Config::load_with(base_path).unwrap();
    let converter = config
        .converter()
        .unwrap()
        .with_stop_words(["cat"])
        .with_default_conjunction(Conjunction::Or);

    assert_eq!(converter.stop_words().sorted(), vec!["cat", "the"]);
    assert_eq!(converter.default_conjunction(), Conjunction::Or);
    assert_eq!(
        converter.convert("the cat sat mat"),
        "FORMSOF(INFLECTIONAL, sat) OR FORMSOF(INFLECTIONAL, mat)"
    );
}

/// save → reload keeps edits
#[test]
fn test_config_roundtrip_save() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();

    let mut config = Config::load_with(base_path).unwrap();
    config.stop_words.push("Rust".to_string());
    config.default_conjunction = Conjunction::Near;
    config.save().unwrap();

    let reloaded = Config::load_with(base_path).unwrap();
    assert_eq!(reloaded.stop_words, vec!["Rust".to_string()]);
    assert_eq!(reloaded.default_conjunction, Conjunction::Near);
    assert!(reloaded.stop_words().unwrap().contains("rust"));
}
