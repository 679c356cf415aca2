use std::path::Path;

use keyframe_common::utils::fsutils;
use walkdir::WalkDir;

use crate::error::{ErrContext, Result};

/// The name with every `/` replaced by `_`, or None if there was nothing to replace.
pub fn sanitized_name(name: &str) -> Option<String> {
    name.contains('/').then(|| name.replace('/', "_"))
}

/// Renames every file under `root` whose name still contains a slash. Returns how many
/// were renamed. A missing root is not an error, there is simply nothing to do.
pub fn sanitize_tree(root: &Path) -> Result<usize> {
    if !root.is_dir() {
        log::debug!("Nothing to sanitize, {} is not a directory", root.display());
        return Ok(0);
    }

    let mut renames = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.context(|| root.display())?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(new_name) = entry.file_name().to_str().and_then(sanitized_name) else {
            continue;
        };
        renames.push((entry.path().to_owned(), entry.path().with_file_name(new_name)));
    }

    for (from, to) in &renames {
        log::info!("Renaming {} to {}", from.display(), to.display());
        fsutils::rename_no_clobber(from, to).context(|| from.display())?;
    }

    Ok(renames.len())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn replaces_slashes() {
        assert_eq!(Some("a_b_c.jpg".to_string()), sanitized_name("a/b/c.jpg"));
        assert_eq!(None, sanitized_name("a_b_c.jpg"));
    }

    #[test]
    fn idempotent() {
        let once = sanitized_name("x/y.jpg").unwrap();
        assert_eq!(None, sanitized_name(&once));
    }

    #[test]
    fn clean_tree_is_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("sub").join("a_start_00_00_01.000.jpg"), "")
            .unwrap();

        assert_eq!(0, sanitize_tree(tmp.path()).unwrap());
        assert_eq!(0, sanitize_tree(tmp.path()).unwrap());
        assert!(tmp.path().join("sub").join("a_start_00_00_01.000.jpg").is_file());
    }

    #[test]
    fn missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(0, sanitize_tree(&tmp.path().join("nope")).unwrap());
    }
}
