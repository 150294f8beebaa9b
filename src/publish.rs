//! Full update run: clone the wiki, copy media, write the pages.

use crate::cli_help::HelpSource;
use crate::config::WikiConfig;
use crate::error::{Result, WikiError};
use crate::git::VersionControl;
use crate::pipeline::Pipeline;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy every file under `src` into `dest`, keeping relative paths.
/// Contents are copied byte for byte.
pub fn copy_dir(src: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            WikiError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| WikiError::io(parent, e))?;
        }
        fs::copy(entry.path(), &target).map_err(|e| WikiError::io(&target, e))?;
        copied += 1;
    }
    Ok(copied)
}

/// Clone the wiki into the output directory, copy media, generate pages.
pub fn update_wiki(
    config: &WikiConfig,
    vcs: &dyn VersionControl,
    help: &dyn HelpSource,
) -> Result<Vec<PathBuf>> {
    let out = &config.out_dir;
    fs::create_dir_all(out).map_err(|e| WikiError::io(out, e))?;

    tracing::info!("Cloning {} into {}", config.clone_url, out.display());
    vcs.clone_no_checkout(&config.clone_url, out)?;

    let media = out.join("media");
    let copied = copy_dir(&config.media_dir, &media)?;
    tracing::info!("Copied {} media files", copied);

    Pipeline::new(config, vcs, help).run()
}
