//! Filesystem asset store.
//!
//! # Responsibility
//! - Validate uploads against a size/extension policy before any write.
//! - Generate collision-free file names without shared counters.
//! - Persist and remove blobs under one root directory.
//!
//! # Invariants
//! - `validate` performs no I/O.
//! - `save` creates the root idempotently; "already exists" is not an error.
//! - `delete` is best-effort and idempotent; a missing file never
//!   propagates as an error.
//! - Stored paths are relative to the root so a static-file responder can
//!   resolve them by name.

use crate::model::upload::UploadedFile;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Extensions accepted for entity images, matching the upload policy of the
/// inbound boundary.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

const MAX_IMAGE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const NAME_SUFFIX_CHARS: usize = 8;

/// Validation policy applied before any blob write.
#[derive(Debug, Clone, Copy)]
pub struct AssetPolicy {
    /// Allowed lowercase extensions, compared case-insensitively.
    pub allowed_extensions: &'static [&'static str],
    pub max_size_bytes: u64,
}

impl AssetPolicy {
    /// Image policy used by product and user uploads.
    pub const fn images() -> Self {
        Self {
            allowed_extensions: IMAGE_EXTENSIONS,
            max_size_bytes: MAX_IMAGE_SIZE_BYTES,
        }
    }
}

impl Default for AssetPolicy {
    fn default() -> Self {
        Self::images()
    }
}

/// Errors from asset validation and persistence.
#[derive(Debug)]
pub enum AssetError {
    /// Upload content is empty or unreadable.
    EmptyFile,
    /// Original filename carries no usable extension.
    MissingExtension { filename: String },
    /// Extension is not in the policy allow-list.
    UnsupportedExtension { extension: String },
    /// Content exceeds the policy maximum.
    FileTooLarge {
        size_bytes: u64,
        max_size_bytes: u64,
    },
    /// Underlying filesystem failure while writing.
    Io { path: PathBuf, source: io::Error },
}

impl AssetError {
    /// Returns whether this error is a policy rejection (client-facing)
    /// rather than an I/O failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

impl Display for AssetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFile => write!(f, "uploaded file is empty or unreadable"),
            Self::MissingExtension { filename } => {
                write!(f, "file `{filename}` has no extension")
            }
            Self::UnsupportedExtension { extension } => {
                write!(f, "extension `{extension}` is not allowed")
            }
            Self::FileTooLarge {
                size_bytes,
                max_size_bytes,
            } => write!(
                f,
                "file of {size_bytes} bytes exceeds maximum of {max_size_bytes} bytes"
            ),
            Self::Io { path, source } => {
                write!(f, "asset I/O failure at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for AssetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Path-addressed blob storage under one root directory.
pub struct AssetStore {
    root: PathBuf,
    policy: AssetPolicy,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>, policy: AssetPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Checks one upload against the store policy.
    ///
    /// # Invariants
    /// - Performs no I/O; must be called before any write.
    pub fn validate(&self, file: &UploadedFile) -> Result<(), AssetError> {
        if file.content.is_empty() {
            return Err(AssetError::EmptyFile);
        }

        let extension =
            file_extension(&file.filename).ok_or_else(|| AssetError::MissingExtension {
                filename: file.filename.clone(),
            })?;
        if !self
            .policy
            .allowed_extensions
            .iter()
            .any(|allowed| *allowed == extension)
        {
            return Err(AssetError::UnsupportedExtension { extension });
        }

        let size_bytes = file.content.len() as u64;
        if size_bytes > self.policy.max_size_bytes {
            return Err(AssetError::FileTooLarge {
                size_bytes,
                max_size_bytes: self.policy.max_size_bytes,
            });
        }

        Ok(())
    }

    /// Produces a storage name from a high-resolution timestamp, a random
    /// suffix and the original extension.
    ///
    /// Practical uniqueness holds under concurrent callers without any
    /// shared counter.
    pub fn generate_name(original_name: &str) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or(0);
        let random = Uuid::new_v4().simple().to_string();
        let suffix = &random[..NAME_SUFFIX_CHARS];

        match file_extension(original_name) {
            Some(extension) => format!("{timestamp}_{suffix}.{extension}"),
            None => format!("{timestamp}_{suffix}"),
        }
    }

    /// Writes the blob under `root/name` and returns the relative path used
    /// as the entity's asset reference.
    ///
    /// Partial writes are not rolled back here; callers must not have
    /// committed a referencing row yet.
    pub fn save(&self, file: &UploadedFile, name: &str) -> Result<String, AssetError> {
        std::fs::create_dir_all(&self.root).map_err(|source| AssetError::Io {
            path: self.root.clone(),
            source,
        })?;

        let full_path = self.root.join(name);
        std::fs::write(&full_path, &file.content).map_err(|source| AssetError::Io {
            path: full_path.clone(),
            source,
        })?;

        info!(
            "event=asset_save module=asset status=ok path={} size_bytes={}",
            full_path.display(),
            file.content.len()
        );
        Ok(name.to_string())
    }

    /// Best-effort removal of a previously stored blob.
    ///
    /// Missing files are ignored so cleanup calls stay idempotent and safe
    /// to issue speculatively; other failures are logged and swallowed.
    pub fn delete(&self, path: &str) {
        if path.is_empty() {
            return;
        }

        let full_path = self.root.join(path);
        match std::fs::remove_file(&full_path) {
            Ok(()) => info!(
                "event=asset_delete module=asset status=ok path={}",
                full_path.display()
            ),
            Err(err) if err.kind() == io::ErrorKind::NotFound => info!(
                "event=asset_delete module=asset status=skip reason=missing path={}",
                full_path.display()
            ),
            Err(err) => warn!(
                "event=asset_delete module=asset status=error path={} error={}",
                full_path.display(),
                err
            ),
        }
    }
}

/// Extracts the lowercase extension from the last `.`-delimited segment.
pub(crate) fn file_extension(name: &str) -> Option<String> {
    let (_, extension) = name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}
