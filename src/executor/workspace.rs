use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{DebugError, Result};

/// Hidden directory, next to the source file, that holds assembler input
/// and output for debug runs.
pub const ASSEMBLING_DIR: &str = ".rv-debugger/assembling";

pub const SOURCE_EXTENSION: &str = "asm";

/// File locations derived from the source being debugged.
#[derive(Debug, Clone)]
pub struct Workspace {
    source: PathBuf,
    assembling: PathBuf,
}

impl Workspace {
    pub fn for_source(source: &Path) -> Self {
        let dir = source.parent().unwrap_or_else(|| Path::new("."));
        Self {
            source: source.to_path_buf(),
            assembling: dir.join(ASSEMBLING_DIR),
        }
    }

    pub fn assembling_dir(&self) -> &Path {
        &self.assembling
    }

    /// `temp_<file name>` inside the assembling directory.
    pub fn instrumented_path(&self) -> PathBuf {
        let name = self
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "source.asm".to_string());
        self.assembling.join(format!("temp_{}", name))
    }

    pub fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.assembling)
    }

    /// Write the instrumented program for the assembler and return its path.
    pub fn write_instrumented(&self, text: &str) -> io::Result<PathBuf> {
        self.prepare()?;
        let path = self.instrumented_path();
        fs::write(&path, text)?;
        debug!("wrote instrumented source to {}", path.display());
        Ok(path)
    }
}

/// `name` with `.asm` appended unless it already ends in it.
pub fn ensure_asm_extension(name: &str) -> String {
    if name.ends_with(".asm") {
        name.to_string()
    } else {
        format!("{}.{}", name, SOURCE_EXTENSION)
    }
}

/// Save-as target: `.asm` is appended only when the file name carries no
/// extension at all.
pub fn with_default_extension(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.ends_with(".asm") || name.contains('.') {
        path.to_path_buf()
    } else {
        path.with_file_name(format!("{}.{}", name, SOURCE_EXTENSION))
    }
}

/// Create an empty source file named `name` in `dir`.
pub fn create_source_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DebugError::Command("file name is empty".to_string()));
    }
    let path = dir.join(ensure_asm_extension(name));
    fs::write(&path, "")?;
    Ok(path)
}
