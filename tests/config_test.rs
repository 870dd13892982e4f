//! Integration tests for Settings loading with an explicit config file.
//!
//! These tests run without a global config (temp directories only), so the
//! explicit file is layered directly over the compiled defaults.

use std::fs;

use tempfile::TempDir;

use tagtree::config::{Settings, SettingsError};
use tagtree::TagRules;

#[test]
fn given_no_config_when_load_then_uses_default_rules() {
    let settings = Settings::load(None).expect("load defaults");
    assert_eq!(settings.rules().paragraph_label, TagRules::default().paragraph_label);
}

#[test]
fn given_explicit_config_with_list_labels_when_load_then_unions_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tagtree.toml");
    fs::write(
        &path,
        r#"
[remove]
list_labels = ["dl", "!ol"]
paragraph_label = "para"

[add]
rescan_remainder = true
trailing_punctuation = "!,"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(path.as_path())).expect("load settings");
    let rules = settings.rules();

    assert_eq!(rules.list_labels, vec!["ul".to_string(), "dl".to_string()]);
    assert_eq!(rules.paragraph_label, "para");
    assert!(rules.rescan_remainder);
    assert!(rules.is_trailing_punctuation(','));
    assert!(!rules.is_trailing_punctuation('.'));
    assert_eq!(rules.bold_label, "bold");
}

#[test]
fn given_missing_config_file_when_load_then_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        Settings::load(Some(path.as_path())),
        Err(SettingsError::NotFound(p)) if p == path
    ));
}

#[test]
fn given_invalid_toml_when_load_then_reports_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[remove\nlist_labels = 3").unwrap();
    let err = Settings::load(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("broken.toml"), "{err}");
}

#[test]
fn given_configured_rules_when_parsing_then_tree_uses_them() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tagtree.toml");
    fs::write(&path, "[bold]\nlabel = \"strong\"\n").unwrap();
    let settings = Settings::load(Some(path.as_path())).unwrap();

    let mut tree = tagtree::MarkupParser::new()
        .with_rules(settings.rules())
        .parse_str("<html>\n<body>\n<table>\n<tr>\n<td>\nx\n</td>\n</tr>\n</table>\n</body>\n</html>\n")
        .unwrap();
    tree.bold_row(1).unwrap();
    assert_eq!(tree.count_label("strong"), 1);
}
