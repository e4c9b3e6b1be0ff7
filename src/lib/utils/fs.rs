use std::{
    fs::{self, DirBuilder, File},
    io::BufReader,
    path::Path,
};

use color_eyre::{eyre::Context, Result};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ScaffoldError;

pub fn create_directory(path_create: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .create(path_create)
        .with_context(|| format!("Could not create directory {path_create:?}"))
}

/// Fails with [`ScaffoldError::TargetNotAvailable`] if something that could be
/// overwritten already lives at `project_root`. A missing path or an empty directory
/// are both fine
pub fn check_project_root_available(project_root: &Path) -> Result<()> {
    if !project_root.exists() {
        // if it doesn't exist, there is nothing that would be overwritten
        return Ok(());
    }

    if !is_empty_directory(project_root)? {
        return Err(ScaffoldError::TargetNotAvailable {
            path: project_root.to_path_buf(),
        }
        .into());
    }

    Ok(())
}

pub fn is_empty_directory(path: &Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }

    let is_empty = path
        .read_dir()
        .with_context(|| format!("Directory {path:?} is not readable"))?
        .next()
        .is_none();

    Ok(is_empty)
}

/// Reads and deserializes the JSON document at `path`
pub fn load_and_deserialize<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Could not open {path:?}"))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not deserialize the JSON document {path:?}"))
}

/// Writes `object` to `path` as two spaces indented JSON ending with a new line
pub fn serialize_object_to_file<T: Serialize + ?Sized>(path: &Path, object: &T) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(object)
        .with_context(|| format!("Could not serialize the data for {path:?}"))?;
    contents.push('\n');

    fs::write(path, contents).with_context(|| format!("Could not write to file {path:?}"))
}

#[cfg(test)]
mod tests {
    use color_eyre::Result;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_create_if_root_not_empty() -> Result<()> {
        let temp = tempdir()?;

        let project_path = temp.path().join("example");
        std::fs::create_dir(&project_path)?;
        assert!(check_project_root_available(&project_path).is_ok());

        std::fs::File::create(project_path.join("dummy.txt"))?;
        let err = check_project_root_available(&project_path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::TargetNotAvailable { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_a_file_is_never_an_available_root() -> Result<()> {
        let temp = tempdir()?;
        let file = temp.path().join("taken");
        std::fs::write(&file, b"")?;

        assert!(!is_empty_directory(&file)?);
        assert!(check_project_root_available(&file).is_err());

        Ok(())
    }
}
