/// Path resolution: walk a slash-delimited path through the directory tree.
///
/// The walk starts at the root for absolute paths and at the caller's cursor
/// otherwise. Empty components are dropped, so `a//b/` is `a/b`. "." stays
/// put and ".." follows the directory's parent entry (the root is its own
/// parent). A directory is entered only if it grants read and execute.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::block_dev::{BlockDev, Disk};
use crate::consts::{BlockId, MAX_BLOCKS, PARENT_SLOT, ROOT_BLOCK};
use crate::dir::{DirBlock, EntryType, Located};
use crate::error::{FsError, Result};

/// Outcome of resolving a path. Every variant says exactly how far the walk
/// got, so callers never hold a handle to something that was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResult {
    /// The whole path names a directory the walk entered. `entry` is its
    /// record when the last step was a name match, `None` for root, "." and "..".
    Dir { block: BlockId, entry: Option<Located> },
    /// The whole path names an existing entry the walk cannot enter: a file,
    /// or a directory without read+execute.
    Entry { located: Located },
    /// Everything but the last component resolved; `name` is not in `parent`.
    Vacant { parent: BlockId, name: String },
    /// The walk stopped on `component` before the end of the path.
    Unreachable { block: BlockId, component: String, cause: FsError },
}

impl PathResult {
    /// Directory block the walk ended in.
    pub fn block(&self) -> BlockId {
        match self {
            PathResult::Dir { block, .. } => *block,
            PathResult::Entry { located } => located.dir,
            PathResult::Vacant { parent, .. } => *parent,
            PathResult::Unreachable { block, .. } => *block,
        }
    }

    /// Whether every component resolved to something that exists.
    pub fn found(&self) -> bool {
        matches!(self, PathResult::Dir { .. } | PathResult::Entry { .. })
    }

    /// The entry the last component matched, if any.
    pub fn terminal(&self) -> Option<&Located> {
        match self {
            PathResult::Dir { entry, .. } => entry.as_ref(),
            PathResult::Entry { located } => Some(located),
            _ => None,
        }
    }

    pub fn stopped_on_non_dir(&self) -> bool {
        match self {
            PathResult::Entry { located } => located.entry.kind == EntryType::File,
            PathResult::Unreachable { cause, .. } => *cause == FsError::WrongType,
            _ => false,
        }
    }
}

pub fn is_absolute(path: &str) -> bool { path.starts_with('/') }

pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|c| !c.is_empty())
}

/// Final component of a path, if it has one.
pub fn base_name(path: &str) -> Option<&str> { components(path).last() }

pub fn resolve<D: BlockDev>(disk: &mut Disk<D>, cwd: BlockId, path: &str) -> Result<PathResult> {
    let parts: Vec<&str> = components(path).collect();
    let mut block = if is_absolute(path) { ROOT_BLOCK } else { cwd };
    let mut entry = None;

    for (i, &part) in parts.iter().enumerate() {
        let last = i + 1 == parts.len();
        match part {
            "." => entry = None,
            ".." => {
                block = parent_of(disk, block)?;
                entry = None;
            }
            name => {
                let dir = DirBlock::load(disk, block)?;
                let Some((slot, found)) = dir.find(name) else {
                    if last {
                        return Ok(PathResult::Vacant { parent: block, name: name.to_string() });
                    }
                    return Ok(PathResult::Unreachable {
                        block, component: name.to_string(), cause: FsError::NotFound,
                    });
                };
                let located = Located { dir: block, slot, entry: found };
                if found.is_dir() && found.rights.can_traverse() {
                    block = found.first_blk;
                    entry = Some(located);
                } else if last {
                    return Ok(PathResult::Entry { located });
                } else {
                    let cause = if found.is_dir() { FsError::PermissionDenied } else { FsError::WrongType };
                    return Ok(PathResult::Unreachable { block, component: name.to_string(), cause });
                }
            }
        }
    }
    Ok(PathResult::Dir { block, entry })
}

/// Parent directory block; the root is its own parent.
pub fn parent_of<D: BlockDev>(disk: &mut Disk<D>, block: BlockId) -> Result<BlockId> {
    if block == ROOT_BLOCK { return Ok(ROOT_BLOCK); }
    let dir = DirBlock::load(disk, block)?;
    match dir.entry(PARENT_SLOT) {
        Some(e) if e.name() == ".." => Ok(e.first_blk),
        _ => {
            log::warn!("path: directory at block {} has no parent entry", block);
            Err(FsError::Corrupt)
        }
    }
}

/// Whether `block` is `ancestor` or lies somewhere below it.
pub fn is_within<D: BlockDev>(disk: &mut Disk<D>, block: BlockId, ancestor: BlockId) -> Result<bool> {
    let mut cur = block;
    for _ in 0..MAX_BLOCKS {
        if cur == ancestor { return Ok(true); }
        if cur == ROOT_BLOCK { return Ok(false); }
        cur = parent_of(disk, cur)?;
    }
    Err(FsError::Corrupt)
}

/// Names from the root down to `block`, found by climbing ".." links and
/// looking each directory up in its parent.
pub fn absolute_path<D: BlockDev>(disk: &mut Disk<D>, block: BlockId) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut cur = block;
    while cur != ROOT_BLOCK {
        if names.len() >= MAX_BLOCKS { return Err(FsError::Corrupt); }
        let parent = parent_of(disk, cur)?;
        let dir = DirBlock::load(disk, parent)?;
        let name = dir.entries()
            .map(|(_, e)| e)
            .find(|e| e.is_dir() && e.first_blk == cur && e.name() != "." && e.name() != "..")
            .ok_or(FsError::Corrupt)?;
        names.push(name.name().to_string());
        cur = parent;
    }
    names.reverse();
    Ok(names)
}

// ─── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;
    use super::*;
    use crate::block_dev::MemDisk;
    use crate::dir::{AccessRights, DirEntry};

    /// Root with `docs/` (block 2, holding `readme` at block 4), `locked/`
    /// (block 3, no execute) and a file `top` at block 5.
    fn tree() -> Disk<MemDisk> {
        let mut disk = Disk::new(MemDisk::new(8));
        let mut root = DirBlock::empty(ROOT_BLOCK);
        root.insert(&DirEntry::new("docs", EntryType::Dir, 0, 2, AccessRights::RWX).unwrap()).unwrap();
        root.insert(&DirEntry::new("locked", EntryType::Dir, 0, 3, AccessRights::RW).unwrap()).unwrap();
        root.insert(&DirEntry::new("top", EntryType::File, 3, 5, AccessRights::RW).unwrap()).unwrap();
        root.store(&mut disk).unwrap();

        let mut docs = DirBlock::new_directory(2, ROOT_BLOCK, AccessRights::RWX, AccessRights::RWX).unwrap();
        docs.insert(&DirEntry::new("readme", EntryType::File, 9, 4, AccessRights::RW).unwrap()).unwrap();
        docs.store(&mut disk).unwrap();

        DirBlock::new_directory(3, ROOT_BLOCK, AccessRights::RW, AccessRights::RWX).unwrap()
            .store(&mut disk).unwrap();
        disk
    }

    #[test]
    fn components_drop_empty_segments() {
        assert_eq!(components("/a//b/").collect::<vec::Vec<_>>(), ["a", "b"]);
        assert_eq!(components("/").count(), 0);
        assert_eq!(base_name("x/y/z"), Some("z"));
        assert_eq!(base_name("/"), None);
    }

    #[test]
    fn root_and_empty_paths() {
        let mut disk = tree();
        assert_eq!(resolve(&mut disk, ROOT_BLOCK, "/").unwrap(),
                   PathResult::Dir { block: ROOT_BLOCK, entry: None });
        assert_eq!(resolve(&mut disk, 2, "").unwrap(), PathResult::Dir { block: 2, entry: None });
    }

    #[test]
    fn resolves_directory_with_entry() {
        let mut disk = tree();
        let r = resolve(&mut disk, ROOT_BLOCK, "/docs").unwrap();
        assert_eq!(r.block(), 2);
        assert!(r.found());
        let t = r.terminal().unwrap();
        assert_eq!((t.dir, t.slot, t.entry.name()), (ROOT_BLOCK, 0, "docs"));
    }

    #[test]
    fn resolves_file_in_subdirectory() {
        let mut disk = tree();
        let r = resolve(&mut disk, ROOT_BLOCK, "docs/readme").unwrap();
        assert!(r.found());
        assert!(r.stopped_on_non_dir());
        assert_eq!(r.terminal().unwrap().entry.size, 9);
        assert_eq!(r.block(), 2);
    }

    #[test]
    fn relative_to_cursor_and_dot_dot() {
        let mut disk = tree();
        let r = resolve(&mut disk, 2, "readme").unwrap();
        assert!(matches!(r, PathResult::Entry { .. }));
        let r = resolve(&mut disk, 2, "../top").unwrap();
        assert_eq!(r.terminal().unwrap().entry.first_blk, 5);
        assert_eq!(resolve(&mut disk, 2, "./..").unwrap(),
                   PathResult::Dir { block: ROOT_BLOCK, entry: None });
    }

    #[test]
    fn dot_dot_at_root_stays_at_root() {
        let mut disk = tree();
        assert_eq!(resolve(&mut disk, ROOT_BLOCK, "/../..").unwrap().block(), ROOT_BLOCK);
        let r = resolve(&mut disk, ROOT_BLOCK, "../docs/./readme").unwrap();
        assert_eq!(r.terminal().unwrap().entry.name(), "readme");
    }

    #[test]
    fn missing_last_component_is_vacant() {
        let mut disk = tree();
        assert_eq!(resolve(&mut disk, ROOT_BLOCK, "/docs/new.txt").unwrap(),
                   PathResult::Vacant { parent: 2, name: "new.txt".into() });
    }

    #[test]
    fn missing_middle_component_is_not_found() {
        let mut disk = tree();
        let r = resolve(&mut disk, ROOT_BLOCK, "/nope/x").unwrap();
        assert!(matches!(r, PathResult::Unreachable { cause: FsError::NotFound, .. }));
        assert!(!r.found());
    }

    #[test]
    fn file_in_the_middle_is_wrong_type() {
        let mut disk = tree();
        let r = resolve(&mut disk, ROOT_BLOCK, "/top/x").unwrap();
        assert!(matches!(r, PathResult::Unreachable { cause: FsError::WrongType, .. }));
        assert!(r.stopped_on_non_dir());
    }

    #[test]
    fn untraversable_directory() {
        let mut disk = tree();
        let r = resolve(&mut disk, ROOT_BLOCK, "/locked").unwrap();
        let PathResult::Entry { located } = r else { panic!("expected an entry") };
        assert!(located.entry.is_dir());
        let r = resolve(&mut disk, ROOT_BLOCK, "/locked/x").unwrap();
        assert!(matches!(r, PathResult::Unreachable { cause: FsError::PermissionDenied, .. }));
    }

    #[test]
    fn ancestry_and_absolute_path() {
        let mut disk = tree();
        assert!(is_within(&mut disk, 2, ROOT_BLOCK).unwrap());
        assert!(is_within(&mut disk, 2, 2).unwrap());
        assert!(!is_within(&mut disk, ROOT_BLOCK, 2).unwrap());
        assert!(!is_within(&mut disk, 3, 2).unwrap());
        assert_eq!(absolute_path(&mut disk, 2).unwrap(), ["docs"]);
        assert!(absolute_path(&mut disk, ROOT_BLOCK).unwrap().is_empty());
    }
}
