/// The file system: FAT, directory tables and the session cursor tied together
/// into the user-facing operations.
///
/// Every operation resolves its paths, re-checks type and permission bits on
/// what it found, and only then writes. Allocation persists in the order data
/// blocks, FAT block, directory block; release persists the directory block
/// first. A crash between two writes can leak blocks but never leaves an entry
/// pointing at a free chain.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::block_dev::{BlockDev, Disk};
use crate::consts::*;
use crate::dir::{check_name, AccessRights, DirBlock, DirEntry, EntryType, Located};
use crate::error::{FsError, Result};
use crate::fat::Fat;
use crate::path::{self, PathResult};

// ─── Public types ──────────────────────────────────────────────────────────────

/// Working directory of a session: the block and the names leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    block: BlockId,
    stack: Vec<String>,
}

impl Cursor {
    pub fn root() -> Self { Self { block: ROOT_BLOCK, stack: Vec::new() } }

    pub fn block(&self) -> BlockId { self.block }

    pub fn components(&self) -> &[String] { &self.stack }

    pub fn path(&self) -> String {
        if self.stack.is_empty() { return "/".to_string(); }
        self.stack.iter().fold(String::new(), |mut acc, name| {
            acc.push('/');
            acc.push_str(name);
            acc
        })
    }

    /// Replay the components of a successful `cd` onto the name stack.
    fn walk(&mut self, path: &str) {
        if path::is_absolute(path) { self.stack.clear(); }
        for part in path::components(path) {
            match part {
                "." => {}
                ".." => { self.stack.pop(); }
                name => self.stack.push(name.to_string()),
            }
        }
    }
}

/// One row of `ls`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name:   String,
    pub kind:   EntryType,
    pub rights: AccessRights,
    pub size:   u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeStats {
    pub block_size:   usize,
    pub total_blocks: usize,
    pub free_blocks:  usize,
}

pub struct FileSystem<D> {
    disk: Disk<D>,
    fat:  Fat,
    cwd:  Cursor,
}

fn blocks_for(size: usize) -> usize { size.div_ceil(BLOCK_SIZE).max(1) }

fn require(rights: AccessRights, needed: AccessRights) -> Result<()> {
    if rights.contains(needed) { Ok(()) } else { Err(FsError::PermissionDenied) }
}

// ─── Implementation ────────────────────────────────────────────────────────────

impl<D: BlockDev> FileSystem<D> {
    /// Wipe the device and lay down an empty volume.
    pub fn format(dev: D) -> Result<Self> {
        let disk = Disk::new(dev);
        let blocks = disk.blocks();
        let mut fs = Self { disk, fat: Fat::new(blocks.max(MIN_BLOCKS)), cwd: Cursor::root() };
        fs.reformat()?;
        Ok(fs)
    }

    /// Open a volume that was formatted earlier.
    pub fn mount(dev: D) -> Result<Self> {
        let mut disk = Disk::new(dev);
        if disk.blocks() < MIN_BLOCKS {
            return Err(FsError::InvalidArgument("device is too small for a volume"));
        }
        let image = disk.read(FAT_BLOCK)?;
        let fat = Fat::decode(&image, disk.blocks())?;
        log::info!("mount: {} blocks, {} free", fat.len(), fat.free_count());
        Ok(Self { disk, fat, cwd: Cursor::root() })
    }

    /// Zero every block, then write an empty root and a fresh FAT.
    pub fn reformat(&mut self) -> Result<()> {
        let blocks = self.disk.blocks();
        if blocks < MIN_BLOCKS {
            return Err(FsError::InvalidArgument("device is too small for a volume"));
        }
        for blk in 0..blocks {
            self.disk.zero(blk as BlockId)?;
        }
        self.fat = Fat::new(blocks);
        DirBlock::empty(ROOT_BLOCK).store(&mut self.disk)?;
        self.persist_fat()?;
        self.cwd = Cursor::root();
        log::info!("format: {} blocks of {} bytes", blocks, BLOCK_SIZE);
        Ok(())
    }

    pub fn fat(&self) -> &Fat { &self.fat }

    pub fn cursor(&self) -> &Cursor { &self.cwd }

    pub fn device(&self) -> &D { self.disk.device() }

    pub fn into_device(self) -> D { self.disk.into_inner() }

    pub fn resolve(&mut self, path: &str) -> Result<PathResult> {
        path::resolve(&mut self.disk, self.cwd.block, path)
    }

    pub fn stat(&self) -> VolumeStats {
        VolumeStats {
            block_size:   BLOCK_SIZE,
            total_blocks: self.fat.len(),
            free_blocks:  self.fat.free_count(),
        }
    }

    // ─── Operations ────────────────────────────────────────────────────────────

    /// Create a file from `lines`, read up to the first empty line. Each line
    /// is stored followed by `\n`. The stream is only pulled once the target
    /// name has been validated.
    pub fn create<I>(&mut self, path: &str, lines: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let (parent, name) = self.vacant(path)?;
        let mut dir = DirBlock::load(&mut self.disk, parent)?;
        if dir.free_slot().is_none() { return Err(FsError::OutOfSpace); }

        let mut content = String::new();
        for line in lines {
            let line = line.as_ref();
            if line.is_empty() { break; }
            content.push_str(line);
            content.push('\n');
        }
        self.store_file(&mut dir, &name, content.as_bytes(), AccessRights::RW)?;
        log::debug!("create {}: {} bytes", path, content.len());
        Ok(())
    }

    /// Raw contents of every block in the file's chain, padding included.
    pub fn cat(&mut self, path: &str) -> Result<Vec<u8>> {
        let file = self.file(path)?;
        require(file.entry.rights, AccessRights::READ)?;
        let chain = self.fat.chain(file.entry.first_blk)?;
        let mut out = Vec::with_capacity(chain.len() * BLOCK_SIZE);
        for blk in chain {
            out.extend_from_slice(&self.disk.read(blk)?);
        }
        Ok(out)
    }

    /// File contents truncated to the recorded size.
    pub fn read_file(&mut self, path: &str) -> Result<Vec<u8>> {
        let file = self.file(path)?;
        require(file.entry.rights, AccessRights::READ)?;
        self.content(&file.entry)
    }

    /// Entries of the working directory.
    pub fn ls(&mut self) -> Result<Vec<Listing>> {
        let dir = DirBlock::load(&mut self.disk, self.cwd.block)?;
        Ok(dir.list()
            .map(|e| Listing { name: e.name().to_string(), kind: e.kind, rights: e.rights, size: e.size })
            .collect())
    }

    /// Copy a file to a new name, or into an existing directory under its own name.
    pub fn cp(&mut self, src: &str, dst: &str) -> Result<()> {
        if src == dst {
            return Err(FsError::InvalidArgument("source and destination are the same"));
        }
        let source = self.file(src)?;
        require(source.entry.rights, AccessRights::READ)?;

        let (target, name) = self.destination(dst, &source)?;
        let mut dir = DirBlock::load(&mut self.disk, target)?;
        if let Some((slot, _)) = dir.find(&name) {
            if target == source.dir && slot == source.slot {
                return Err(FsError::InvalidArgument("source and destination are the same"));
            }
            return Err(FsError::AlreadyExists);
        }
        let content = self.content(&source.entry)?;
        self.store_file(&mut dir, &name, &content, source.entry.rights)?;
        log::debug!("cp {} -> {}: {} bytes", src, dst, content.len());
        Ok(())
    }

    /// Rename in place, or relocate the entry into another directory. The data
    /// blocks never move.
    pub fn mv(&mut self, src: &str, dst: &str) -> Result<()> {
        if src == dst {
            return Err(FsError::InvalidArgument("source and destination are the same"));
        }
        let source = match self.resolve(src)? {
            PathResult::Entry { located } | PathResult::Dir { entry: Some(located), .. } => located,
            PathResult::Dir { entry: None, .. } =>
                return Err(FsError::InvalidArgument("cannot move the root, '.' or '..'")),
            PathResult::Vacant { .. } => return Err(FsError::NotFound),
            PathResult::Unreachable { cause, .. } => return Err(cause),
        };
        require(source.entry.rights, AccessRights::READ)?;

        let (target, name) = self.destination(dst, &source)?;
        let moving_dir = source.entry.is_dir();
        if moving_dir && path::is_within(&mut self.disk, target, source.entry.first_blk)? {
            return Err(FsError::InvalidArgument("cannot move a directory into itself"));
        }

        let mut entry = source.entry;
        entry.set_name(&name)?;
        if target == source.dir {
            let mut dir = DirBlock::load(&mut self.disk, target)?;
            match dir.find(&name) {
                Some((slot, _)) if slot == source.slot =>
                    return Err(FsError::InvalidArgument("source and destination are the same")),
                Some(_) => return Err(FsError::AlreadyExists),
                None => {}
            }
            dir.set(source.slot, &entry);
            dir.store(&mut self.disk)?;
        } else {
            let mut dir = DirBlock::load(&mut self.disk, target)?;
            if dir.find(&name).is_some() { return Err(FsError::AlreadyExists); }
            let slot = dir.free_slot().ok_or(FsError::OutOfSpace)?;
            if moving_dir {
                let rights = self.dir_rights(target)?;
                let mut moved = DirBlock::load(&mut self.disk, entry.first_blk)?;
                moved.set(PARENT_SLOT, &DirEntry::new("..", EntryType::Dir, 0, target, rights)?);
                moved.store(&mut self.disk)?;
            }
            dir.set(slot, &entry);
            dir.store(&mut self.disk)?;
            let mut origin = DirBlock::load(&mut self.disk, source.dir)?;
            origin.remove(source.slot);
            origin.store(&mut self.disk)?;
        }
        if moving_dir {
            self.cwd.stack = path::absolute_path(&mut self.disk, self.cwd.block)?;
        }
        log::debug!("mv {} -> {}", src, dst);
        Ok(())
    }

    /// Delete a file and return its blocks to the free pool.
    pub fn rm(&mut self, path: &str) -> Result<()> {
        let file = match self.resolve(path)? {
            PathResult::Entry { located } if !located.entry.is_dir() => located,
            PathResult::Entry { .. } | PathResult::Dir { .. } =>
                return Err(FsError::InvalidArgument("removing directories is not supported")),
            PathResult::Vacant { .. } => return Err(FsError::NotFound),
            PathResult::Unreachable { cause, .. } => return Err(cause),
        };
        require(file.entry.rights, AccessRights::READ | AccessRights::WRITE)?;
        let chain = self.fat.chain(file.entry.first_blk)?;

        let mut dir = DirBlock::load(&mut self.disk, file.dir)?;
        dir.remove(file.slot);
        dir.store(&mut self.disk)?;
        for &blk in &chain {
            self.disk.zero(blk)?;
        }
        self.fat.release(file.entry.first_blk)?;
        self.persist_fat()?;
        log::debug!("rm {}: released {} blocks", path, chain.len());
        Ok(())
    }

    /// Append the contents of `src` to `dst`, creating `dst` if it is missing.
    pub fn append(&mut self, src: &str, dst: &str) -> Result<()> {
        let source = self.file(src)?;
        require(source.entry.rights, AccessRights::READ)?;
        let extra = self.content(&source.entry)?;

        match self.resolve(dst)? {
            PathResult::Vacant { parent, name } => {
                check_name(&name)?;
                let mut dir = DirBlock::load(&mut self.disk, parent)?;
                self.store_file(&mut dir, &name, &extra, AccessRights::RW)?;
            }
            PathResult::Entry { located } if !located.entry.is_dir() => {
                require(located.entry.rights, AccessRights::READ | AccessRights::WRITE)?;
                self.extend_file(located, &extra)?;
            }
            PathResult::Entry { .. } | PathResult::Dir { .. } => return Err(FsError::WrongType),
            PathResult::Unreachable { cause, .. } => return Err(cause),
        }
        log::debug!("append {} -> {}: {} bytes", src, dst, extra.len());
        Ok(())
    }

    /// Create a directory holding "." and "..", with its parent's rights.
    pub fn mkdir(&mut self, path: &str) -> Result<()> {
        let (parent, name) = self.vacant(path)?;
        let mut dir = DirBlock::load(&mut self.disk, parent)?;
        let slot = dir.free_slot().ok_or(FsError::OutOfSpace)?;
        let blk = *self.fat.allocate(1).first().ok_or(FsError::OutOfSpace)?;

        let rights = self.dir_rights(parent)?;
        let entry = DirEntry::new(&name, EntryType::Dir, 0, blk, rights)?;
        DirBlock::new_directory(blk, parent, rights, rights)?.store(&mut self.disk)?;
        self.fat.link(&[blk]);
        self.persist_fat()?;
        dir.set(slot, &entry);
        dir.store(&mut self.disk)?;
        log::debug!("mkdir {}: block {}", path, blk);
        Ok(())
    }

    pub fn cd(&mut self, path: &str) -> Result<()> {
        let block = match self.resolve(path)? {
            PathResult::Dir { block, .. } => block,
            PathResult::Entry { located } if located.entry.is_dir() => return Err(FsError::PermissionDenied),
            PathResult::Entry { .. } => return Err(FsError::WrongType),
            PathResult::Vacant { .. } => return Err(FsError::NotFound),
            PathResult::Unreachable { cause, .. } => return Err(cause),
        };
        self.cwd.walk(path);
        self.cwd.block = block;
        log::debug!("cd {}: now at {} (block {})", path, self.cwd.path(), block);
        Ok(())
    }

    pub fn pwd(&self) -> String { self.cwd.path() }

    /// Replace a file's rights with the octal digit `rights`.
    pub fn chmod(&mut self, rights: &str, path: &str) -> Result<()> {
        let rights = AccessRights::from_octal(rights)?;
        let file = self.file(path)?;
        let mut entry = file.entry;
        entry.rights = rights;
        let mut dir = DirBlock::load(&mut self.disk, file.dir)?;
        dir.set(file.slot, &entry);
        dir.store(&mut self.disk)?;
        log::debug!("chmod {} {}", rights, path);
        Ok(())
    }

    // ─── Private helpers ───────────────────────────────────────────────────────

    /// Parent block and name for something about to be created at `path`.
    fn vacant(&mut self, path: &str) -> Result<(BlockId, String)> {
        match self.resolve(path)? {
            PathResult::Vacant { parent, name } => {
                check_name(&name)?;
                Ok((parent, name))
            }
            PathResult::Dir { .. } | PathResult::Entry { .. } => Err(FsError::AlreadyExists),
            PathResult::Unreachable { cause, .. } => Err(cause),
        }
    }

    /// An existing regular file.
    fn file(&mut self, path: &str) -> Result<Located> {
        match self.resolve(path)? {
            PathResult::Entry { located } if !located.entry.is_dir() => Ok(located),
            PathResult::Entry { .. } | PathResult::Dir { .. } => Err(FsError::WrongType),
            PathResult::Vacant { .. } => Err(FsError::NotFound),
            PathResult::Unreachable { cause, .. } => Err(cause),
        }
    }

    /// Where `cp`/`mv` put `source`: a fresh name, or its own name inside an
    /// existing directory.
    fn destination(&mut self, dst: &str, source: &Located) -> Result<(BlockId, String)> {
        match self.resolve(dst)? {
            PathResult::Vacant { parent, name } => {
                check_name(&name)?;
                Ok((parent, name))
            }
            PathResult::Dir { block, .. } => Ok((block, source.entry.name().to_string())),
            PathResult::Entry { located } if located.dir == source.dir && located.slot == source.slot =>
                Err(FsError::InvalidArgument("source and destination are the same")),
            PathResult::Entry { located } if located.entry.is_dir() => Err(FsError::PermissionDenied),
            PathResult::Entry { .. } => Err(FsError::AlreadyExists),
            PathResult::Unreachable { cause, .. } => Err(cause),
        }
    }

    /// Rights of a directory: the root is always `rwx`, others carry them on ".".
    fn dir_rights(&mut self, block: BlockId) -> Result<AccessRights> {
        if block == ROOT_BLOCK { return Ok(AccessRights::RWX); }
        let dir = DirBlock::load(&mut self.disk, block)?;
        match dir.entry(SELF_SLOT) {
            Some(e) if e.name() == "." => Ok(e.rights),
            _ => Err(FsError::Corrupt),
        }
    }

    fn content(&mut self, entry: &DirEntry) -> Result<Vec<u8>> {
        let size = entry.size as usize;
        let mut out = Vec::with_capacity(size);
        for blk in self.fat.chain(entry.first_blk)? {
            if out.len() >= size { break; }
            let data = self.disk.read(blk)?;
            let take = (size - out.len()).min(BLOCK_SIZE);
            out.extend_from_slice(&data[..take]);
        }
        if out.len() < size {
            log::warn!("fs: chain at block {} is shorter than its size", entry.first_blk);
            return Err(FsError::Corrupt);
        }
        Ok(out)
    }

    /// Write `content` as a new file entry in `dir`. Nothing is written unless
    /// both the blocks and a directory slot are available.
    fn store_file(&mut self, dir: &mut DirBlock, name: &str, content: &[u8],
                  rights: AccessRights) -> Result<()> {
        let size = u32::try_from(content.len()).map_err(|_| FsError::OutOfSpace)?;
        let needed = blocks_for(content.len());
        let blocks = self.fat.allocate(needed);
        if blocks.len() < needed {
            log::debug!("fs: need {} blocks, {} free", needed, blocks.len());
            return Err(FsError::OutOfSpace);
        }
        let slot = dir.free_slot().ok_or(FsError::OutOfSpace)?;
        let entry = DirEntry::new(name, EntryType::File, size, blocks[0], rights)?;

        self.write_at(&blocks, 0, content)?;
        self.fat.link(&blocks);
        self.persist_fat()?;
        dir.set(slot, &entry);
        dir.store(&mut self.disk)
    }

    /// Grow a file: fill the tail of its last block, then chain new blocks.
    fn extend_file(&mut self, file: Located, extra: &[u8]) -> Result<()> {
        let old = file.entry.size as usize;
        let new_size = old + extra.len();
        let size = u32::try_from(new_size).map_err(|_| FsError::OutOfSpace)?;
        let chain = self.fat.chain(file.entry.first_blk)?;
        let needed = blocks_for(new_size).saturating_sub(chain.len());
        let fresh = self.fat.allocate(needed);
        if fresh.len() < needed { return Err(FsError::OutOfSpace); }

        let mut blocks = chain.clone();
        blocks.extend_from_slice(&fresh);
        self.write_at(&blocks, old, extra)?;
        if let Some(&tail) = chain.last() {
            self.fat.extend(tail, &fresh);
        }
        self.persist_fat()?;

        let mut entry = file.entry;
        entry.size = size;
        let mut dir = DirBlock::load(&mut self.disk, file.dir)?;
        dir.set(file.slot, &entry);
        dir.store(&mut self.disk)
    }

    /// Write `data` at byte `offset` of the file laid out over `blocks`.
    /// Blocks the data does not reach are left alone unless `offset` is 0, in
    /// which case every block is written so fresh chains start zero-padded.
    fn write_at(&mut self, blocks: &[BlockId], offset: usize, data: &[u8]) -> Result<()> {
        let mut pos = offset;
        let end = offset + data.len();
        let first = offset / BLOCK_SIZE;
        let last = if offset == 0 { blocks.len() } else { end.div_ceil(BLOCK_SIZE) };
        for (i, &blk) in blocks.iter().enumerate().take(last).skip(first) {
            let start = i * BLOCK_SIZE;
            let mut buf = if pos > start && pos < start + BLOCK_SIZE {
                self.disk.read(blk)?
            } else {
                [0u8; BLOCK_SIZE]
            };
            let from = pos.max(start).min(end);
            let to = end.min(start + BLOCK_SIZE);
            if from < to {
                buf[from - start..to - start].copy_from_slice(&data[from - offset..to - offset]);
                pos = to;
            }
            self.disk.write(blk, &buf)?;
        }
        Ok(())
    }

    fn persist_fat(&mut self) -> Result<()> {
        let image = self.fat.encode();
        self.disk.write(FAT_BLOCK, &image)
    }
}

// ─── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;
    use super::*;
    use crate::block_dev::MemDisk;

    fn fresh(blocks: usize) -> FileSystem<MemDisk> {
        FileSystem::format(MemDisk::new(blocks)).unwrap()
    }

    // ── cursor ───────────────────────────────────────────────────────────────

    #[test]
    fn cursor_path_rendering() {
        let mut c = Cursor::root();
        assert_eq!(c.path(), "/");
        c.walk("a/b");
        assert_eq!(c.path(), "/a/b");
        c.walk("../c/.");
        assert_eq!(c.path(), "/a/c");
        c.walk("/x");
        assert_eq!(c.path(), "/x");
        c.walk("../..");
        assert_eq!(c.path(), "/");
    }

    // ── block math ───────────────────────────────────────────────────────────

    #[test]
    fn empty_file_still_owns_a_block() {
        assert_eq!(blocks_for(0), 1);
        assert_eq!(blocks_for(1), 1);
        assert_eq!(blocks_for(BLOCK_SIZE), 1);
        assert_eq!(blocks_for(BLOCK_SIZE + 1), 2);
    }

    // ── write_at ─────────────────────────────────────────────────────────────

    #[test]
    fn write_at_offset_preserves_existing_bytes() {
        let mut fs = fresh(8);
        fs.write_at(&[2], 0, b"abc").unwrap();
        fs.write_at(&[2, 3], 3, &[b'z'; BLOCK_SIZE]).unwrap();
        let first = fs.disk.read(2).unwrap();
        let second = fs.disk.read(3).unwrap();
        assert_eq!(&first[..4], b"abcz");
        assert_eq!(first[BLOCK_SIZE - 1], b'z');
        assert_eq!(&second[..3], b"zzz");
        assert_eq!(second[3], 0);
    }

    #[test]
    fn write_at_block_boundary_starts_fresh_block() {
        let mut fs = fresh(8);
        fs.write_at(&[2], 0, &[1u8; BLOCK_SIZE]).unwrap();
        fs.disk.write(3, &[9u8; BLOCK_SIZE]).unwrap();
        fs.write_at(&[2, 3], BLOCK_SIZE, b"tail").unwrap();
        assert_eq!(fs.disk.read(2).unwrap(), [1u8; BLOCK_SIZE]);
        let second = fs.disk.read(3).unwrap();
        assert_eq!(&second[..4], b"tail");
        assert!(second[4..].iter().all(|&b| b == 0));
    }

    // ── format / mount ───────────────────────────────────────────────────────

    #[test]
    fn format_then_mount_sees_same_fat() {
        let mut fs = fresh(32);
        fs.create("/a", ["x"]).unwrap();
        let snapshot = fs.fat().clone();
        let fs = FileSystem::mount(fs.into_device()).unwrap();
        assert_eq!(fs.fat(), &snapshot);
    }

    #[test]
    fn tiny_device_is_rejected() {
        assert!(matches!(FileSystem::format(MemDisk::new(2)), Err(FsError::InvalidArgument(_))));
        assert!(matches!(FileSystem::mount(MemDisk::new(2)), Err(FsError::InvalidArgument(_))));
    }

    #[test]
    fn mount_blank_device_is_corrupt() {
        assert!(matches!(FileSystem::mount(MemDisk::new(16)), Err(FsError::Corrupt)));
    }

    #[test]
    fn reformat_clears_everything() {
        let mut fs = fresh(16);
        fs.mkdir("d").unwrap();
        fs.cd("d").unwrap();
        fs.create("f", ["data"]).unwrap();
        fs.reformat().unwrap();
        assert_eq!(fs.pwd(), "/");
        assert!(fs.ls().unwrap().is_empty());
        assert_eq!(fs.stat().free_blocks, 14);
        assert!(fs.device().0[2 * BLOCK_SIZE..].iter().all(|&b| b == 0));
    }

    // ── directory rights ─────────────────────────────────────────────────────

    #[test]
    fn mkdir_inherits_parent_rights() {
        let mut fs = fresh(16);
        fs.mkdir("/d").unwrap();
        let d = fs.resolve("/d").unwrap();
        let blk = d.block();
        assert_eq!(d.terminal().unwrap().entry.rights, AccessRights::RWX);
        assert_eq!(fs.dir_rights(blk).unwrap(), AccessRights::RWX);
    }

    #[test]
    fn ls_rows_carry_type_rights_and_size() {
        let mut fs = fresh(16);
        fs.create("a.txt", ["hello"]).unwrap();
        fs.mkdir("sub").unwrap();
        let rows: Vec<Listing> = fs.ls().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Listing { name: "a.txt".into(), kind: EntryType::File,
                                      rights: AccessRights::RW, size: 6 });
        assert_eq!(rows[1].kind, EntryType::Dir);
        assert_eq!(rows[1].size, 0);
    }
}
