/*!
 * Unit tests for application configuration
 */

use anyhow::Result;
use std::fs::File;
use std::io::BufReader;

use sptcheck::app_config::{Config, LogLevel};
use sptcheck::validation::OptionalRule;

use crate::common;

#[test]
fn test_loadConfig_fromJsonFile_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "spt_dir": "scripts",
            "blueprint_dir": "blueprints",
            "result_dir": "out",
            "validation": {
                "structural": true,
                "symbol": false,
                "optional_rules": ["dash_pairing"]
            },
            "log_level": "debug"
        }"#,
    )?;

    let reader = BufReader::new(File::open(path)?);
    let config: Config = serde_json::from_reader(reader)?;

    assert_eq!(config.spt_dir, "scripts");
    assert_eq!(config.result_dir, "out");
    assert!(!config.validation.symbol);
    assert_eq!(config.log_level, LogLevel::Debug);

    let toggles = config.validation.toggles();
    assert!(toggles.structural);
    assert!(!toggles.symbol);
    assert!(toggles.is_enabled(OptionalRule::DashPairing));
    assert!(!toggles.is_enabled(OptionalRule::EllipsisPairs));
    Ok(())
}

#[test]
fn test_serializeDefaultConfig_shouldRoundTrip() -> Result<()> {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config)?;
    let reparsed: Config = serde_json::from_str(&json)?;

    assert_eq!(reparsed.spt_dir, config.spt_dir);
    assert_eq!(reparsed.blueprint_dir, config.blueprint_dir);
    assert_eq!(reparsed.log_level, LogLevel::Info);
    assert!(reparsed.validation.optional_rules.is_empty());
    Ok(())
}

#[test]
fn test_validate_withDefaultConfig_shouldPass() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_withBlankBlueprintDir_shouldFail() {
    let mut config = Config::default();
    config.blueprint_dir = "  ".to_string();
    assert!(config.validate().is_err());
}
