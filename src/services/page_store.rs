use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};

use crate::errors::WikiError;
use crate::types::{Page, Title};

/// Extension given to every page file under the document root
pub const PAGE_EXTENSION: &str = "txt";

/// File-backed page storage: one `<title>.txt` per page under `root`.
///
/// Nothing is cached and nothing is locked. Every load goes to disk, and
/// concurrent saves of one title race with last-writer-wins.
#[derive(Clone, Debug)]
pub struct PageStore {
    root: Arc<PathBuf>,
}

impl PageStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root: Arc::new(root) }
    }

    /// Path of the file backing `title`
    pub fn page_path(&self, title: &Title) -> PathBuf {
        self.root.join(format!("{}.{}", title, PAGE_EXTENSION))
    }

    /// Load a page. Any read failure is reported as `NotFound`.
    pub fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.page_path(title);
        info!("Loading page from {:?}", path);
        match fs::read(&path) {
            Ok(body) => Ok(Page::new(title.clone(), body)),
            Err(e) => {
                warn!("Could not load page from {:?}: {}", path, e);
                Err(WikiError::NotFound)
            }
        }
    }

    /// Write a page, replacing whatever the file held before.
    ///
    /// Not atomic: a failure part-way through can leave a truncated file.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.page_path(&page.title);
        info!("Writing page to {:?}", path);
        write_page_file(&path, &page.body).map_err(|e| {
            warn!("Could not write page to {:?}: {}", path, e);
            WikiError::Write(e)
        })
    }
}

fn write_page_file(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(body)
}
