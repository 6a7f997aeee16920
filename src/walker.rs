/*!
 * Directory traversal with subtree pruning
 *
 * Each directory is classified before its children are listed, so an excluded
 * directory is never opened. Listing happens one level at a time through
 * `walkdir` with `min_depth(1)`/`max_depth(1)`.
 */

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::classifier::classify;
use crate::error::{Result, ScanError};
use crate::rules::RuleSet;
use crate::types::Entry;
use crate::utils::slash_label;

/// Walks a project tree under a fixed rule set
pub struct TreeWalker<'a> {
    root: PathBuf,
    rules: &'a RuleSet,
}

impl<'a> TreeWalker<'a> {
    /// Create a walker for `root`
    pub fn new(root: impl Into<PathBuf>, rules: &'a RuleSet) -> Self {
        Self {
            root: root.into(),
            rules,
        }
    }

    /// Start a fresh traversal.
    ///
    /// Fails when the root is missing, not a directory, or cannot be listed.
    /// Problems further down are logged and the affected directory is treated
    /// as empty.
    pub fn walk(&self) -> Result<Walk<'a>> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut walk = Walk {
            rules: self.rules,
            pending: Vec::new(),
        };
        let children = list_children(&self.root, Path::new(""), 0, self.rules).map_err(
            |source| ScanError::Walk {
                path: self.root.clone(),
                source,
            },
        )?;
        walk.push_children(children);
        log::debug!("Walking {}", self.root.display());
        Ok(walk)
    }
}

/// Lazy depth-first sequence of non-excluded entries.
///
/// Per directory: the directory itself, then its files sorted by name, then
/// each subdirectory (sorted by name) with its subtree.
pub struct Walk<'a> {
    rules: &'a RuleSet,
    /// LIFO; directories still need their children listed when popped
    pending: Vec<Entry>,
}

struct Children {
    files: Vec<Entry>,
    dirs: Vec<Entry>,
}

impl Walk<'_> {
    fn push_children(&mut self, children: Children) {
        self.pending.extend(children.dirs.into_iter().rev());
        self.pending.extend(children.files.into_iter().rev());
    }
}

impl Iterator for Walk<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        let entry = self.pending.pop()?;
        if entry.is_dir {
            match list_children(&entry.path, &entry.relative_path, entry.depth, self.rules) {
                Ok(children) => self.push_children(children),
                Err(e) => log::warn!(
                    "Error listing directory {}: {}",
                    entry.path.display(),
                    e
                ),
            }
        }
        Some(entry)
    }
}

/// List and classify the direct children of one directory, dropping excluded
/// ones. Sorted by file name.
fn list_children(
    abs_dir: &Path,
    rel_dir: &Path,
    depth: usize,
    rules: &RuleSet,
) -> std::result::Result<Children, walkdir::Error> {
    let mut children = Children {
        files: Vec::new(),
        dirs: Vec::new(),
    };

    let listing = WalkDir::new(abs_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for result in listing {
        let dent = match result {
            Ok(dent) => dent,
            // The directory itself could not be read
            Err(e) if e.depth() == 0 => return Err(e),
            Err(e) => {
                log::warn!("Error reading entry in {}: {}", abs_dir.display(), e);
                continue;
            }
        };

        let file_type = dent.file_type();
        if file_type.is_symlink()
            && fs::metadata(dent.path()).map(|m| m.is_dir()).unwrap_or(false)
        {
            log::debug!("Not following directory symlink {}", dent.path().display());
            continue;
        }

        let is_dir = file_type.is_dir();
        let relative_path = rel_dir.join(dent.file_name());
        let category = classify(&slash_label(&relative_path), is_dir, rules);
        log::trace!("{} -> {}", relative_path.display(), category);

        if !category.is_listed() {
            continue;
        }

        let entry = Entry {
            path: dent.path().to_path_buf(),
            relative_path,
            depth: depth + 1,
            is_dir,
            category,
        };
        if is_dir {
            children.dirs.push(entry);
        } else {
            children.files.push(entry);
        }
    }

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use crate::rules::RuleSettings;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    fn labels(walker: &TreeWalker<'_>) -> Vec<String> {
        walker
            .walk()
            .unwrap()
            .map(|e| {
                if e.is_dir {
                    format!("{}/", e.label())
                } else {
                    e.label()
                }
            })
            .collect()
    }

    #[test]
    fn test_emission_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b_dir/inner")).unwrap();
        fs::create_dir(root.join("a_dir")).unwrap();
        for name in ["z.txt", "a.txt", "b_dir/m.rs", "b_dir/inner/x.rs", "a_dir/k.rs"] {
            File::create(root.join(name)).unwrap();
        }
        let rules = RuleSet::default();

        assert_eq!(
            labels(&TreeWalker::new(root, &rules)),
            vec![
                "a.txt",
                "z.txt",
                "a_dir/",
                "a_dir/k.rs",
                "b_dir/",
                "b_dir/m.rs",
                "b_dir/inner/",
                "b_dir/inner/x.rs",
            ]
        );
    }

    #[test]
    fn test_excluded_directory_is_pruned() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("node_modules/pkg/src")).unwrap();
        let mut file = File::create(root.join("node_modules/pkg/src/index.js")).unwrap();
        writeln!(file, "module.exports = 1;").unwrap();
        File::create(root.join("index.js")).unwrap();
        let rules = RuleSet::default();

        let entries: Vec<Entry> = TreeWalker::new(root, &rules).walk().unwrap().collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label(), "index.js");
        assert_eq!(entries[0].depth, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_excluded_directory_is_never_opened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        let locked = root.join("build");
        fs::create_dir(&locked).unwrap();
        File::create(locked.join("out.txt")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        File::create(root.join("main.c")).unwrap();
        let rules = RuleSet::default();

        // Privileged users read through mode 0o000, which would prove nothing
        let enforced = fs::read_dir(&locked).is_err();
        let result: Vec<String> = labels(&TreeWalker::new(root, &rules));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if !enforced {
            return;
        }
        assert_eq!(result, vec!["main.c"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_nested_directory_is_listed_empty() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        let locked = root.join("private");
        fs::create_dir(&locked).unwrap();
        File::create(locked.join("secret.rs")).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let rules = RuleSet::default();

        let enforced = fs::read_dir(&locked).is_err();
        let result: Vec<String> = labels(&TreeWalker::new(root, &rules));

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if !enforced {
            return;
        }
        assert_eq!(result, vec!["private/"]);
    }

    #[test]
    fn test_path_only_entries_are_listed() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        File::create(root.join("README.md")).unwrap();
        File::create(root.join("lib.rs")).unwrap();
        let rules = RuleSet::default();

        let entries: Vec<Entry> = TreeWalker::new(root, &rules).walk().unwrap().collect();
        let categories: Vec<(String, Category)> =
            entries.iter().map(|e| (e.label(), e.category)).collect();

        assert_eq!(
            categories,
            vec![
                ("README.md".to_string(), Category::PathOnly),
                ("lib.rs".to_string(), Category::Full),
            ]
        );
    }

    #[test]
    fn test_prefix_rule_prunes_nested_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/generated/deep")).unwrap();
        File::create(root.join("src/generated/deep/api.rs")).unwrap();
        File::create(root.join("src/lib.rs")).unwrap();
        let settings = RuleSettings {
            ignore_paths: vec!["src/generated".into()],
            ..RuleSettings::default()
        };
        let rules = RuleSet::from_settings(&settings);

        assert_eq!(
            labels(&TreeWalker::new(root, &rules)),
            vec!["src/", "src/lib.rs"]
        );
    }

    #[test]
    fn test_walk_is_restartable() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("one.rs")).unwrap();
        let rules = RuleSet::default();
        let walker = TreeWalker::new(dir.path(), &rules);

        let first: Vec<Entry> = walker.walk().unwrap().collect();
        let second: Vec<Entry> = walker.walk().unwrap().collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempdir().unwrap();
        let rules = RuleSet::default();
        let walker = TreeWalker::new(dir.path().join("nope"), &rules);

        assert!(matches!(walker.walk(), Err(ScanError::RootNotFound(_))));
    }

    #[test]
    fn test_file_root_fails() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        File::create(&file).unwrap();
        let rules = RuleSet::default();

        assert!(matches!(
            TreeWalker::new(&file, &rules).walk(),
            Err(ScanError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let dir = tempdir().unwrap();
        let rules = RuleSet::default();

        assert_eq!(TreeWalker::new(dir.path(), &rules).walk().unwrap().count(), 0);
    }
}
