//! Output directory layout for a dataset root.

use std::path::{Path, PathBuf};

use crate::Result;

/// Formats the image file name for a 1-based entry index.
///
/// Indices are zero-padded to four digits; wider indices keep all their
/// digits.
pub fn image_file_name(index: usize) -> String {
    format!("{:04}.jpg", index)
}

/// Paths under one dataset output root.
///
/// ```text
/// <root>/images/<label>/0001.jpg
/// <root>/urls/<label>.csv
/// ```
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    root: PathBuf,
}

impl DatasetLayout {
    /// Creates a layout rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the dataset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding all per-label image directories.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Image directory for one label.
    pub fn label_dir(&self, label: &str) -> PathBuf {
        self.images_dir().join(label)
    }

    /// Directory holding the CSV audit files.
    pub fn urls_dir(&self) -> PathBuf {
        self.root.join("urls")
    }

    /// CSV audit file path for one label.
    pub fn csv_path(&self, label: &str) -> PathBuf {
        self.urls_dir().join(format!("{}.csv", label))
    }

    /// Creates the image and CSV directories for a label.
    ///
    /// Directories that already exist are left alone, so re-running a batch
    /// over the same root works.
    pub fn prepare(&self, label: &str) -> Result<()> {
        std::fs::create_dir_all(self.label_dir(label))?;
        std::fs::create_dir_all(self.urls_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_name_zero_pads() {
        assert_eq!(image_file_name(1), "0001.jpg");
        assert_eq!(image_file_name(42), "0042.jpg");
        assert_eq!(image_file_name(9999), "9999.jpg");
    }

    #[test]
    fn test_image_file_name_wide_index() {
        assert_eq!(image_file_name(12345), "12345.jpg");
    }

    #[test]
    fn test_layout_paths() {
        let layout = DatasetLayout::new("/data/dogs");
        assert_eq!(layout.root(), Path::new("/data/dogs"));
        assert_eq!(layout.images_dir(), PathBuf::from("/data/dogs/images"));
        assert_eq!(
            layout.label_dir("shiba_inu"),
            PathBuf::from("/data/dogs/images/shiba_inu")
        );
        assert_eq!(layout.urls_dir(), PathBuf::from("/data/dogs/urls"));
        assert_eq!(
            layout.csv_path("shiba_inu"),
            PathBuf::from("/data/dogs/urls/shiba_inu.csv")
        );
    }

    #[test]
    fn test_prepare_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DatasetLayout::new(tmp.path());

        layout.prepare("corgi").unwrap();
        assert!(layout.label_dir("corgi").is_dir());
        assert!(layout.urls_dir().is_dir());
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = DatasetLayout::new(tmp.path());

        layout.prepare("corgi").unwrap();
        layout.prepare("corgi").unwrap();
        assert!(layout.label_dir("corgi").is_dir());
    }
}
