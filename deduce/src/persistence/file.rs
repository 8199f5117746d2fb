use super::SessionSnapshot;
use crate::error::DeduceResult;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Snapshot file on disk. Writes replace the whole file atomically.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry. A missing file is an empty snapshot.
    pub fn load(&self) -> DeduceResult<Vec<SessionSnapshot>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, sessions: &[SessionSnapshot]) -> DeduceResult<()> {
        let content = serde_json::to_string_pretty(sessions)?;
        atomic_write(&self.path, content.as_bytes())
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

/// Temp file in the target's directory, synced, then renamed over the target.
fn atomic_write(path: &Path, data: &[u8]) -> DeduceResult<()> {
    let tmp_name = format!(".{}.tmp", uuid::Uuid::new_v4());
    let tmp = match parent_dir(path) {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.join(tmp_name)
        }
        None => PathBuf::from(tmp_name),
    };
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(data)?;
        f.sync_all()?;
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    // Flush the directory entry where the platform allows it.
    if let Some(dir) = parent_dir(path) {
        if let Ok(dir_file) = fs::File::open(dir) {
            let _ = dir_file.sync_all();
        }
    }
    Ok(())
}
