use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Failure to fetch a text resource.
#[derive(Debug)]
pub enum LoadError {
    /// The resource could not be read from disk.
    Io {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The server answered with a non-2xx status.
    Status {
        /// Path that was requested.
        path: String,
        /// HTTP status code.
        status: u16,
    },
    /// The server was unreachable or the transfer failed.
    Network {
        /// Path that was requested.
        path: String,
        /// Transport error description.
        message: String,
    },
    /// The resource was fetched but its content is malformed.
    Malformed {
        /// Path (or description) of the offending resource.
        path: String,
        /// What was wrong with it.
        message: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not load {path}: {source}")
            }
            Self::Status { path, status } => {
                write!(f, "could not load {path}: HTTP status {status}")
            }
            Self::Network { path, message } => {
                write!(f, "could not load {path}: {message}")
            }
            Self::Malformed { path, message } => {
                write!(f, "malformed resource {path}: {message}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Fetches a text resource by path.
///
/// Implementations never retry; the caller decides what to do with a
/// failure.
pub trait ResourceLoader {
    /// Return the full text of the resource at `path`.
    fn load_text(&self, path: &str) -> Result<String, LoadError>;
}

/// Loads resources from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    /// Resolve resource paths relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLoader for FsLoader {
    fn load_text(&self, path: &str) -> Result<String, LoadError> {
        let full = self.root.join(path);
        log::info!("Loading {}", full.display());
        std::fs::read_to_string(&full).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })
    }
}

/// Serves resources from an in-memory map. Missing paths answer 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, String>,
}

impl MemoryLoader {
    /// Create an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a resource.
    #[must_use]
    pub fn with(mut self, path: &str, text: &str) -> Self {
        let _ = self.entries.insert(path.to_owned(), text.to_owned());
        self
    }
}

impl ResourceLoader for MemoryLoader {
    fn load_text(&self, path: &str) -> Result<String, LoadError> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::Status {
                path: path.to_owned(),
                status: 404,
            })
    }
}

/// Fetches resources over HTTP(S) relative to a base URL.
#[cfg(feature = "http")]
pub struct HttpLoader {
    base_url: String,
    agent: ureq::Agent,
}

#[cfg(feature = "http")]
impl HttpLoader {
    /// Resolve resource paths against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(feature = "http")]
impl ResourceLoader for HttpLoader {
    fn load_text(&self, path: &str) -> Result<String, LoadError> {
        let url = self.url_for(path);
        log::info!("Fetching {url}");
        let mut response =
            self.agent.get(&url).call().map_err(|e| match e {
                ureq::Error::StatusCode(status) => LoadError::Status {
                    path: path.to_owned(),
                    status,
                },
                other => LoadError::Network {
                    path: path.to_owned(),
                    message: other.to_string(),
                },
            })?;
        if !response.status().is_success() {
            return Err(LoadError::Status {
                path: path.to_owned(),
                status: response.status().as_u16(),
            });
        }
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| LoadError::Network {
                path: path.to_owned(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_loader_serves_and_misses() {
        let loader = MemoryLoader::new().with("a.txt", "1,2,3");
        assert_eq!(loader.load_text("a.txt").unwrap(), "1,2,3");
        assert!(matches!(
            loader.load_text("b.txt"),
            Err(LoadError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn fs_loader_reports_missing_file_with_path() {
        let loader = FsLoader::new(std::env::temp_dir());
        let err = loader
            .load_text("femview-definitely-missing/welding_sim.triangles")
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("welding_sim.triangles"));
    }

    #[test]
    fn fs_loader_reads_relative_to_root() {
        let dir = std::env::temp_dir().join("femview-fs-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("model.indices"), "0,1,2").unwrap();
        let loader = FsLoader::new(&dir);
        assert_eq!(loader.load_text("model.indices").unwrap(), "0,1,2");
    }
}
