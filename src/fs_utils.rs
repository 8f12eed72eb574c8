use std::fs;
use std::io;
use std::path::Path;

/// Report whether `path` exists.
///
/// Errors other than "not found" (permissions, broken mounts) are logged and
/// reported as non-existence; callers only need a yes/no answer.
pub fn exists(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            log::warn!("Reporting {:?} does not exist: {}", path, e);
            false
        }
    }
}

/// Read a whole file into a string
pub fn read_to_string(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Copy `source` over `destination`, returning the number of bytes copied
pub fn copy_file(source: &Path, destination: &Path) -> io::Result<u64> {
    log::debug!("Copying {:?} to {:?}", source, destination);
    fs::copy(source, destination)
}
