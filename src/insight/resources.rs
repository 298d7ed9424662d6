//! Resource stores templates are read from

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read-only store of named byte resources
pub trait ResourceStore: Send + Sync {
    /// Reads the resource at `path` (`/`-separated, relative).
    ///
    /// A missing resource is reported with [`io::ErrorKind::NotFound`].
    fn open(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Short description for logs
    fn describe(&self) -> String;
}

macro_rules! embedded {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../../resources/", $path)))),*]
    };
}

static BUILTIN: &[(&str, &str)] = embedded![
    "insight/twoInputs/ins1.json",
    "insight/twoInputs/ins2.json",
    "insight/twoInputs/ins3.json",
    "insight/twoInputs/ins4.json",
    "insight/twoInputs/ins5.json",
    "insight/twoInputs/ins6.json",
    "insight/twoInputs/ins7.json",
    "insight/twoInputs/ins8.json",
    "insight/twoInputs/ins9.json",
    "insight/twoInputs/ins10.json",
    "insight/simple/not.json",
    "insight/simple/driver.json",
    "insight/simple/mux.json",
    "insight/simple/dff.json",
];

/// Templates compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedResources {
    files: &'static [(&'static str, &'static str)],
}

impl EmbeddedResources {
    /// The templates shipped with this crate
    pub fn builtin() -> Self {
        Self { files: BUILTIN }
    }

    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        self.files.iter().map(|(path, _)| *path)
    }
}

impl ResourceStore for EmbeddedResources {
    fn open(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .iter()
            .find(|(name, _)| *name == path)
            .map(|(_, content)| content.as_bytes().to_vec())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no embedded resource '{}'", path)))
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}

/// Templates read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path);
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("resource path '{}' leaves the resource directory", path),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl ResourceStore for DirectoryResources {
    fn open(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path)?)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
