//! Directory-listing construction
//!
//! Turns the raw entry set returned by the remote server into the text
//! response: directories and files partitioned, independently sorted, and
//! joined with the host/path header.

use async_trait::async_trait;

use crate::error::Result;

/// A single entry from a remote directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
        }
    }
}

/// Source of remote directory listings
///
/// The HTTP handlers talk to this trait rather than the SFTP client
/// directly, so router tests can substitute a stub.
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    /// List the entries of one remote directory
    async fn list(&self, path: &str) -> Result<Vec<DirEntry>>;
}

/// Normalize a route-captured path into an absolute remote path
///
/// Route parameters do not start with "/"; an absent parameter normalizes
/// to the root path.
pub fn normalize_path(raw: &str) -> String {
    format!("/{}", raw.trim_start_matches('/'))
}

/// Partitioned and sorted directory listing
///
/// Directories exclude the "." and ".." pseudo-entries. Both name lists are
/// sorted ascending with ordinal (byte-wise) comparison. Immutable after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    directories: Vec<String>,
    files: Vec<String>,
}

impl DirectoryListing {
    /// Build a listing from the raw remote entry set
    pub fn from_entries(entries: Vec<DirEntry>) -> Self {
        let mut directories = Vec::new();
        let mut files = Vec::new();

        for entry in entries {
            if entry.is_dir {
                if entry.name != "." && entry.name != ".." {
                    directories.push(entry.name);
                }
            } else {
                files.push(entry.name);
            }
        }

        directories.sort_unstable();
        files.sort_unstable();

        Self { directories, files }
    }

    /// Sorted subdirectory names
    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    /// Sorted file names
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Compose the response text
    ///
    /// Line 1 is the host concatenated with the listed path, then a blank
    /// line, the directory names each suffixed with "/" (marking them as
    /// containers), a blank line, and the file names.
    pub fn render(&self, host: &str, path: &str) -> String {
        let dir_section = self
            .directories
            .iter()
            .map(|name| format!("{name}/"))
            .collect::<Vec<_>>()
            .join("\n");
        let file_section = self.files.join("\n");

        format!("{host}{path}\n\n{dir_section}\n\n{file_section}")
    }
}
