//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Crewpost;

/// Remove the public directory
pub fn run(crewpost: &Crewpost) -> Result<()> {
    if crewpost.public_dir.exists() {
        fs::remove_dir_all(&crewpost.public_dir)?;
        tracing::info!("Deleted: {:?}", crewpost.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        let crewpost = Crewpost::new(dir.path()).unwrap();
        fs::create_dir_all(crewpost.public_dir.join("blog")).unwrap();

        run(&crewpost).unwrap();
        assert!(!crewpost.public_dir.exists());

        // Nothing to remove is not an error
        run(&crewpost).unwrap();
    }
}
