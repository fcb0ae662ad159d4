/*!
 * Integration tests for patch application, backup handling and recovery.
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use sptcheck::app_config::Config;
use sptcheck::app_controller::Controller;
use sptcheck::file_utils::FileManager;

use crate::common;

fn write_patch(config: &Config, name: &str, content: &str) -> Result<()> {
    common::create_test_file(Path::new(&config.result_dir), name, content)?;
    Ok(())
}

#[test]
fn test_runApply_withMatchingEntry_shouldRewriteLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let content = common::script_content(&[("002", "なに！？", "なに！？")]);
    let target = common::create_test_file(config.spt_dir.as_ref(), "day1.spt.txt", &content)?;

    write_patch(
        &config,
        "patch.day1.spt.txt",
        "# FILE: day1.spt.txt\n\
         # ID: 002\n\
         # ERR: question mark must precede exclamation mark and both must be full-width\n\
         ●002● なに？！\n\n",
    )?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run_apply()?;

    assert_eq!(summary.documents, 1);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.missing, 0);

    let lines = FileManager::read_lines(&target)?;
    assert_eq!(lines, vec!["○002○ なに！？", "●002● なに？！"]);
    assert!(!FileManager::backup_path(&target).exists());
    Ok(())
}

#[test]
fn test_runApply_withOriginalRoleEntry_shouldRewriteOriginalLine() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let content = common::script_content(&[("002", "古い原文。", "訳文。")]);
    let target = common::create_test_file(config.spt_dir.as_ref(), "day1.spt.txt", &content)?;

    write_patch(
        &config,
        "patch.day1.spt.txt",
        "# FILE: day1.spt.txt\n\
         # ID: 002\n\
         # ERR: original line differs from blueprint\n\
         ○002○ 直した原文。\n\n",
    )?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run_apply()?;

    assert_eq!(summary.updated, 1);
    let lines = FileManager::read_lines(&target)?;
    assert_eq!(lines, vec!["○002○ 直した原文。", "●002● 訳文。"]);
    Ok(())
}

#[test]
fn test_runApply_withUnknownAnchor_shouldCountMissingAndKeepFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let content = common::script_content(&[("002", "原文。", "訳文。")]);
    let target = common::create_test_file(config.spt_dir.as_ref(), "day1.spt.txt", &content)?;
    let before = FileManager::read_to_string(&target)?;

    write_patch(
        &config,
        "patch.day1.spt.txt",
        "# FILE: day1.spt.txt\n# ID: 999\n●999● 迷子の行。\n\n",
    )?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run_apply()?;

    assert_eq!(summary.updated, 0);
    assert_eq!(summary.missing, 1);
    assert_eq!(summary.missing_ids, vec!["999".to_string()]);
    assert_eq!(FileManager::read_to_string(&target)?, before);
    assert!(!FileManager::backup_path(&target).exists());
    Ok(())
}

#[test]
fn test_runApply_twice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let content = common::script_content(&[("002", "なに！？", "なに！？")]);
    let target = common::create_test_file(config.spt_dir.as_ref(), "day1.spt.txt", &content)?;

    write_patch(
        &config,
        "patch.day1.spt.txt",
        "# FILE: day1.spt.txt\n# ID: 002\n●002● なに？！\n\n",
    )?;

    let controller = Controller::with_config(config)?;
    assert_eq!(controller.run_apply()?.updated, 1);

    let second = controller.run_apply()?;
    assert_eq!(second.updated, 0);
    assert_eq!(second.missing, 0);
    assert!(!FileManager::backup_path(&target).exists());
    Ok(())
}

#[test]
fn test_runApply_withStaleBackup_shouldApplyAndClearIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let content = common::script_content(&[("002", "なに！？", "なに！？")]);
    let target = common::create_test_file(config.spt_dir.as_ref(), "day1.spt.txt", &content)?;
    // leftover backup from an earlier interrupted write
    common::create_test_file(Path::new(&config.spt_dir), "day1.spt.txt.bak", "古い退避内容\n")?;

    write_patch(
        &config,
        "patch.day1.spt.txt",
        "# FILE: day1.spt.txt\n# ID: 002\n●002● なに？！\n\n",
    )?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run_apply()?;

    assert_eq!(summary.updated, 1);
    let lines = FileManager::read_lines(&target)?;
    assert_eq!(lines, vec!["○002○ なに！？", "●002● なに？！"]);
    assert!(!FileManager::backup_path(&target).exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_runApply_withUnwritableTarget_shouldRestoreContentAndFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let content = common::script_content(&[("002", "原文。", "訳文。")]);
    let target = common::create_test_file(config.spt_dir.as_ref(), "day1.spt.txt", &content)?;

    let mut permissions = fs::metadata(&target)?.permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&target, permissions)?;
    if fs::write(&target, content.as_bytes()).is_ok() {
        // permission bits are not enforced here (e.g. running as root)
        return Ok(());
    }

    write_patch(
        &config,
        "patch.day1.spt.txt",
        "# FILE: day1.spt.txt\n# ID: 002\n●002● 差し替え。\n\n",
    )?;

    let controller = Controller::with_config(config)?;
    assert!(controller.run_apply().is_err());

    assert_eq!(FileManager::read_to_string(&target)?, content);
    assert!(!FileManager::backup_path(&target).exists());
    Ok(())
}

#[test]
fn test_runApply_withMissingTargetFile_shouldCountAllEntriesMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    write_patch(
        &config,
        "patch.ghost.spt.txt",
        "# FILE: ghost.spt.txt\n# ID: 001\n●001● 行。\n\n",
    )?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run_apply()?;

    assert_eq!(summary.updated, 0);
    assert_eq!(summary.missing, 1);
    Ok(())
}

#[test]
fn test_runApply_withNoPatchFiles_shouldReturnEmptySummary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run_apply()?;

    assert_eq!(summary.documents, 0);
    assert_eq!(summary.updated, 0);
    Ok(())
}

#[test]
fn test_runRestore_withLeftoverBackup_shouldPutContentBack() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let spt_dir = Path::new(&config.spt_dir);
    let target = common::create_test_file(spt_dir, "day1.spt.txt", "壊れた途中状態\n")?;
    common::create_test_file(spt_dir, "day1.spt.txt.bak", "○001○ 無事な内容。\n●001● 無事な内容。\n")?;

    let controller = Controller::with_config(config)?;
    let restored = controller.run_restore()?;

    assert_eq!(restored, 1);
    assert_eq!(
        FileManager::read_lines(&target)?,
        vec!["○001○ 無事な内容。", "●001● 無事な内容。"]
    );
    assert!(!FileManager::backup_path(&target).exists());
    Ok(())
}

#[test]
fn test_runRestore_withNoBackups_shouldReturnZero() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;
    common::create_test_file(
        Path::new(&config.spt_dir),
        "day1.spt.txt",
        "○001○ 本文。\n●001● 本文。\n",
    )?;

    let controller = Controller::with_config(config)?;
    assert_eq!(controller.run_restore()?, 0);
    Ok(())
}

#[test]
fn test_runRestore_withDoubleBackupSuffix_shouldRestoreOneLevel() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let spt_dir = Path::new(&config.spt_dir).to_path_buf();
    let target = common::create_test_file(&spt_dir, "day1.spt.txt", "現在の内容\n")?;
    common::create_test_file(&spt_dir, "day1.spt.txt.bak.bak", "二世代前の内容\n")?;

    let controller = Controller::with_config(config)?;
    let restored = controller.run_restore()?;

    assert_eq!(restored, 1);
    assert_eq!(FileManager::read_to_string(&target)?, "現在の内容\n");
    assert_eq!(
        FileManager::read_to_string(spt_dir.join("day1.spt.txt.bak"))?,
        "二世代前の内容\n"
    );
    assert!(!spt_dir.join("day1.spt.txt.bak.bak").exists());
    Ok(())
}

#[test]
fn test_runApply_withDuplicateAnchorKeys_shouldRewriteFirstOccurrence() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::workspace_config(temp_dir.path())?;

    let content = "○002○ 原文。\n●002● 一回目。\n●002● 二回目。\n";
    let target = common::create_test_file(config.spt_dir.as_ref(), "day1.spt.txt", content)?;

    write_patch(
        &config,
        "patch.day1.spt.txt",
        "# FILE: day1.spt.txt\n# ID: 002\n●002● 差し替え。\n\n",
    )?;

    let controller = Controller::with_config(config)?;
    let summary = controller.run_apply()?;

    assert_eq!(summary.updated, 1);
    let lines = fs::read_to_string(&target)?;
    assert_eq!(lines, "○002○ 原文。\n●002● 差し替え。\n●002● 二回目。\n");
    Ok(())
}
