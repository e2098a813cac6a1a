//! Content-hashed image publishing.
//!
//! Images are fingerprinted with MD5 and copied to the output tree as
//! `<stem>.<hash12><ext>`, so identical bytes always get the same URL.

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use md5::{Digest, Md5};

use crate::storage::Storage;

use super::paths::hashed_file_name;

/// Read size used while hashing.
pub const CHUNK_SIZE: usize = 64 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Image referenced but not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to publish image {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// MD5 of everything `reader` yields, as lowercase hex.
pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// An image copied to its hashed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedAsset {
    /// Full path of the copy
    pub destination: PathBuf,
    /// Hashed path relative to the output images root
    pub public_path: PathBuf,
}

/// Hashes images under `source_root` and copies them under `dest_root`.
///
/// Each source image is hashed and copied at most once per publisher.
pub struct AssetPublisher<'a, S: Storage> {
    storage: &'a S,
    source_root: PathBuf,
    dest_root: PathBuf,
    published: HashMap<PathBuf, PublishedAsset>,
}

impl<'a, S: Storage> AssetPublisher<'a, S> {
    pub fn new(storage: &'a S, source_root: PathBuf, dest_root: PathBuf) -> Self {
        Self {
            storage,
            source_root,
            dest_root,
            published: HashMap::new(),
        }
    }

    /// Number of distinct images copied so far.
    pub fn count(&self) -> usize {
        self.published.len()
    }

    /// Publish the image at `relative` (relative to the source root).
    ///
    /// Paths that are absolute or climb out with `..` never resolve.
    pub fn publish(&mut self, relative: &Path) -> Result<PublishedAsset, AssetError> {
        if let Some(asset) = self.published.get(relative) {
            return Ok(asset.clone());
        }

        if !is_plain_relative(relative) {
            return Err(AssetError::NotFound {
                path: relative.to_path_buf(),
            });
        }

        let source = self.source_root.join(relative);
        if !self.storage.is_file(&source) {
            return Err(AssetError::NotFound { path: source });
        }

        let reader = match self.storage.open(&source) {
            Ok(reader) => reader,
            Err(_) => return Err(AssetError::NotFound { path: source }),
        };

        let io_err = |source_err: io::Error| AssetError::Io {
            path: source.clone(),
            source: source_err,
        };

        let hash = hash_reader(reader).map_err(io_err)?;
        let public_path = hashed_file_name(relative, &hash);
        let asset = PublishedAsset {
            destination: self.dest_root.join(&public_path),
            public_path,
        };

        println!("Copying {} to {}", source.display(), asset.destination.display());
        self.storage.copy(&source, &asset.destination).map_err(io_err)?;

        self.published.insert(relative.to_path_buf(), asset.clone());
        Ok(asset)
    }
}

/// Only normal components: no root, prefix, `.` or `..`.
fn is_plain_relative(path: &Path) -> bool {
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn test_hash_known_value() {
        assert_eq!(hash_reader(&b""[..]).unwrap(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(hash_reader(&b"abc"[..]).unwrap(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_hash_spans_chunks() {
        let big = vec![7u8; CHUNK_SIZE * 2 + 17];
        let mut whole = Md5::new();
        whole.update(&big);
        assert_eq!(hash_reader(&big[..]).unwrap(), format!("{:x}", whole.finalize()));
    }

    #[test]
    fn test_one_byte_changes_hash() {
        let a = hash_reader(&b"image bytes"[..]).unwrap();
        let b = hash_reader(&b"image bytez"[..]).unwrap();
        assert_ne!(&a[..12], &b[..12]);
    }

    #[test]
    fn test_publish_copies_to_hashed_name() {
        let storage = MemoryStorage::new();
        storage.insert("/img/home/photo.png", "abc");

        let mut publisher =
            AssetPublisher::new(&storage, PathBuf::from("/img"), PathBuf::from("/out/img"));
        let asset = publisher.publish(Path::new("home/photo.png")).unwrap();

        assert_eq!(asset.public_path, PathBuf::from("home/photo.900150983cd2.png"));
        assert_eq!(
            asset.destination,
            PathBuf::from("/out/img/home/photo.900150983cd2.png")
        );
        assert_eq!(storage.get(&asset.destination).unwrap(), b"abc");
    }

    #[test]
    fn test_same_bytes_same_name() {
        let storage = MemoryStorage::new();
        storage.insert("/img/a/photo.png", "same");
        storage.insert("/img/b/photo.png", "same");

        let mut publisher =
            AssetPublisher::new(&storage, PathBuf::from("/img"), PathBuf::from("/out"));
        let a = publisher.publish(Path::new("a/photo.png")).unwrap();
        let b = publisher.publish(Path::new("b/photo.png")).unwrap();
        assert_eq!(a.public_path.file_name(), b.public_path.file_name());
    }

    #[test]
    fn test_publish_is_memoized() {
        let storage = MemoryStorage::new();
        storage.insert("/img/photo.png", "abc");

        let mut publisher =
            AssetPublisher::new(&storage, PathBuf::from("/img"), PathBuf::from("/out"));
        let first = publisher.publish(Path::new("photo.png")).unwrap();
        let second = publisher.publish(Path::new("photo.png")).unwrap();
        assert_eq!(first, second);
        assert_eq!(publisher.count(), 1);
    }

    #[test]
    fn test_missing_image() {
        let storage = MemoryStorage::new();
        let mut publisher =
            AssetPublisher::new(&storage, PathBuf::from("/img"), PathBuf::from("/out"));
        let err = publisher.publish(Path::new("missing.png")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn test_absolute_image_path_is_rejected() {
        let storage = MemoryStorage::new();
        storage.insert("/tmp/outside/a.png", "abc");

        let mut publisher =
            AssetPublisher::new(&storage, PathBuf::from("/img"), PathBuf::from("/out"));
        let err = publisher.publish(Path::new("/tmp/outside/a.png")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
        assert!(err.to_string().contains("/tmp/outside/a.png"));
        assert_eq!(storage.paths(), vec![PathBuf::from("/tmp/outside/a.png")]);
    }

    #[test]
    fn test_parent_dir_image_path_is_rejected() {
        let storage = MemoryStorage::new();
        storage.insert("/outside/a.png", "abc");

        let mut publisher =
            AssetPublisher::new(&storage, PathBuf::from("/site/img"), PathBuf::from("/site/out"));
        for path in ["../../outside/a.png", "home/../../../outside/a.png", "./a.png"] {
            let err = publisher.publish(Path::new(path)).unwrap_err();
            assert!(matches!(err, AssetError::NotFound { .. }));
            assert!(err.to_string().contains(path));
        }
        assert_eq!(storage.paths(), vec![PathBuf::from("/outside/a.png")]);
        assert_eq!(publisher.count(), 0);
    }

    #[test]
    fn test_unreadable_image_is_not_found() {
        let storage = MemoryStorage::new();
        storage.insert("/img/locked.png", "abc");
        storage.deny_read("/img/locked.png");

        let mut publisher =
            AssetPublisher::new(&storage, PathBuf::from("/img"), PathBuf::from("/out"));
        let err = publisher.publish(Path::new("locked.png")).unwrap_err();
        assert!(matches!(err, AssetError::NotFound { .. }));
        assert!(err.to_string().contains("locked.png"));
        assert!(storage.get("/out/locked.900150983cd2.png").is_none());
    }
}
