/*!
 * Unit tests for file utility functions
 */

use anyhow::Result;
use sptcheck::file_utils::FileManager;

use crate::common;

#[test]
fn test_findSptFiles_withNestedDirectories_shouldKeyByRelativePath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();

    common::create_test_file(root, "day1.spt.txt", "○001○ 本文。\n")?;
    common::create_test_file(root, "scenario/day2.spt.txt", "○002○ 本文。\n")?;
    common::create_test_file(root, "notes.txt", "not a script\n")?;

    let files = FileManager::find_spt_files(root)?;

    assert_eq!(files.len(), 2);
    assert!(files.contains_key("day1.spt.txt"));
    assert!(files.contains_key("scenario/day2.spt.txt"));
    Ok(())
}

#[test]
fn test_findSptFiles_withEmptyDirectory_shouldReturnEmptyMap() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let files = FileManager::find_spt_files(temp_dir.path())?;
    assert!(files.is_empty());
    Ok(())
}

#[test]
fn test_writeLines_shouldRoundTripThroughReadLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out.spt.txt");
    let lines = vec!["○001○ 一行目。".to_string(), "●001● 一行目。".to_string()];

    FileManager::write_lines(&path, &lines)?;

    let content = FileManager::read_to_string(&path)?;
    assert!(content.ends_with('\n'));
    assert_eq!(FileManager::read_lines(&path)?, lines);
    Ok(())
}

#[test]
fn test_writeToFile_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a/b/out.txt");

    FileManager::write_to_file(&path, "content")?;

    assert!(FileManager::file_exists(&path));
    Ok(())
}

#[test]
fn test_copyFile_withMissingSource_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let from = temp_dir.path().join("missing.txt");
    let to = temp_dir.path().join("copy.txt");

    assert!(FileManager::copy_file(&from, &to).is_err());
    Ok(())
}

#[test]
fn test_backupPath_shouldAppendBakToFileName() {
    let backup = FileManager::backup_path("spt/day1.spt.txt");
    assert_eq!(backup.file_name().unwrap(), "day1.spt.txt.bak");
    assert_eq!(backup.parent().unwrap(), std::path::Path::new("spt"));
}
