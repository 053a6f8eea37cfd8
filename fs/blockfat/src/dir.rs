/// Directory entries and the one-block directory table.
///
/// A directory is exactly one block holding `DIR_CAPACITY` packed 64-byte
/// records. Records are decoded into `DirEntry` values and encoded back
/// explicitly; the block buffer is never reinterpreted in place.

use core::fmt;

use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::block_dev::{Block, BlockDev, Disk};
use crate::consts::*;
use crate::error::{FsError, Result};

// ─── Record layout ─────────────────────────────────────────────────────────────

const NAME_OFF:   usize = 0;
const SIZE_OFF:   usize = NAME_FIELD_LEN;
const FIRST_OFF:  usize = SIZE_OFF + 4;
const TYPE_OFF:   usize = FIRST_OFF + 2;
const RIGHTS_OFF: usize = TYPE_OFF + 1;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum EntryType {
    File = 0,
    Dir  = 1,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AccessRights: u8 {
        const EXECUTE = 0x01;
        const WRITE   = 0x02;
        const READ    = 0x04;
    }
}

impl AccessRights {
    pub const RW:  Self = Self::READ.union(Self::WRITE);
    pub const RWX: Self = Self::all();

    /// Parse a single octal digit `0`–`7`.
    pub fn from_octal(digit: &str) -> Result<Self> {
        match digit.as_bytes() {
            [d @ b'0'..=b'7'] => Ok(Self::from_bits_truncate(d - b'0')),
            _ => Err(FsError::InvalidArgument("access rights must be an octal digit 0-7")),
        }
    }

    /// Read and execute are both needed to enter a directory.
    pub fn can_traverse(self) -> bool { self.contains(Self::READ | Self::EXECUTE) }
}

impl fmt::Display for AccessRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |flag, c| if self.contains(flag) { c } else { '-' };
        write!(f, "{}{}{}",
               bit(Self::READ, 'r'), bit(Self::WRITE, 'w'), bit(Self::EXECUTE, 'x'))
    }
}

// ─── Directory entry ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    name:          [u8; NAME_FIELD_LEN],
    pub size:      u32,
    pub first_blk: BlockId,
    pub kind:      EntryType,
    pub rights:    AccessRights,
}

impl DirEntry {
    pub fn new(name: &str, kind: EntryType, size: u32, first_blk: BlockId,
               rights: AccessRights) -> Result<Self> {
        let mut entry = Self { name: [0; NAME_FIELD_LEN], size, first_blk, kind, rights };
        entry.set_name(name)?;
        Ok(entry)
    }

    pub fn name(&self) -> &str {
        let len = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_FIELD_LEN);
        core::str::from_utf8(&self.name[..len]).unwrap_or("")
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        check_name(name)?;
        self.name = [0; NAME_FIELD_LEN];
        self.name[..name.len()].copy_from_slice(name.as_bytes());
        Ok(())
    }

    pub fn is_dir(&self) -> bool { self.kind == EntryType::Dir }

    /// Decode one 64-byte record; `None` for a free slot or an unreadable record.
    fn decode(raw: &[u8]) -> Option<Self> {
        if raw[NAME_OFF] == 0 { return None; }
        let mut name = [0u8; NAME_FIELD_LEN];
        name.copy_from_slice(&raw[NAME_OFF..NAME_OFF + NAME_FIELD_LEN]);
        // The last name byte is always the terminator.
        name[NAME_FIELD_LEN - 1] = 0;
        let kind = match EntryType::try_from(raw[TYPE_OFF]) {
            Ok(kind) => kind,
            Err(_) => {
                log::warn!("dir: entry with unknown type {:#04x} ignored", raw[TYPE_OFF]);
                return None;
            }
        };
        Some(Self {
            name,
            size:      u32::from_le_bytes([raw[SIZE_OFF], raw[SIZE_OFF + 1],
                                           raw[SIZE_OFF + 2], raw[SIZE_OFF + 3]]),
            first_blk: u16::from_le_bytes([raw[FIRST_OFF], raw[FIRST_OFF + 1]]),
            kind,
            rights:    AccessRights::from_bits_truncate(raw[RIGHTS_OFF]),
        })
    }

    fn encode(&self, raw: &mut [u8]) {
        raw[NAME_OFF..NAME_OFF + NAME_FIELD_LEN].copy_from_slice(&self.name);
        raw[SIZE_OFF..SIZE_OFF + 4].copy_from_slice(&self.size.to_le_bytes());
        raw[FIRST_OFF..FIRST_OFF + 2].copy_from_slice(&self.first_blk.to_le_bytes());
        raw[TYPE_OFF] = self.kind.into();
        raw[RIGHTS_OFF] = self.rights.bits();
    }
}

/// Names are 1..=55 bytes, without `/` or NUL.
pub fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FsError::InvalidArgument("empty name"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(FsError::InvalidArgument("name longer than 55 bytes"));
    }
    if name.bytes().any(|b| b == b'/' || b == 0) {
        return Err(FsError::InvalidArgument("name contains '/' or NUL"));
    }
    Ok(())
}

/// An entry together with where it lives: directory block and slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub dir:   BlockId,
    pub slot:  usize,
    pub entry: DirEntry,
}

// ─── Directory block ───────────────────────────────────────────────────────────

pub struct DirBlock {
    blk:  BlockId,
    data: Block,
}

impl DirBlock {
    /// An empty table, as the root is after `format`.
    pub fn empty(blk: BlockId) -> Self {
        Self { blk, data: [0; BLOCK_SIZE] }
    }

    /// A fresh subdirectory holding only "." and "..".
    pub fn new_directory(blk: BlockId, parent: BlockId, rights: AccessRights,
                         parent_rights: AccessRights) -> Result<Self> {
        let mut dir = Self::empty(blk);
        dir.set(SELF_SLOT, &DirEntry::new(".", EntryType::Dir, 0, blk, rights)?);
        dir.set(PARENT_SLOT, &DirEntry::new("..", EntryType::Dir, 0, parent, parent_rights)?);
        Ok(dir)
    }

    pub fn load<D: BlockDev>(disk: &mut Disk<D>, blk: BlockId) -> Result<Self> {
        Ok(Self { blk, data: disk.read(blk)? })
    }

    pub fn store<D: BlockDev>(&self, disk: &mut Disk<D>) -> Result<()> {
        disk.write(self.blk, &self.data)
    }

    pub fn block(&self) -> BlockId { self.blk }

    fn raw(&self, slot: usize) -> &[u8] {
        &self.data[slot * DIR_ENTRY_SIZE..(slot + 1) * DIR_ENTRY_SIZE]
    }

    fn raw_mut(&mut self, slot: usize) -> &mut [u8] {
        &mut self.data[slot * DIR_ENTRY_SIZE..(slot + 1) * DIR_ENTRY_SIZE]
    }

    pub fn entry(&self, slot: usize) -> Option<DirEntry> {
        if slot >= DIR_CAPACITY { return None; }
        DirEntry::decode(self.raw(slot))
    }

    /// Every occupied slot, synthetic entries included.
    pub fn entries(&self) -> impl Iterator<Item = (usize, DirEntry)> + '_ {
        (0..DIR_CAPACITY).filter_map(move |slot| self.entry(slot).map(|e| (slot, e)))
    }

    /// Exact, case-sensitive lookup.
    pub fn find(&self, name: &str) -> Option<(usize, DirEntry)> {
        self.entries().find(|(_, e)| e.name() == name)
    }

    pub fn free_slot(&self) -> Option<usize> {
        (0..DIR_CAPACITY).find(|&slot| self.raw(slot)[NAME_OFF] == 0)
    }

    pub fn insert(&mut self, entry: &DirEntry) -> Result<usize> {
        let slot = self.free_slot().ok_or(FsError::OutOfSpace)?;
        self.set(slot, entry);
        Ok(slot)
    }

    pub fn set(&mut self, slot: usize, entry: &DirEntry) {
        entry.encode(self.raw_mut(slot));
    }

    pub fn remove(&mut self, slot: usize) {
        self.raw_mut(slot).fill(0);
    }

    /// Entries shown to users: no synthetic entries, nothing pointing at the
    /// reserved root/FAT blocks.
    pub fn list(&self) -> impl Iterator<Item = DirEntry> + '_ {
        self.entries()
            .map(|(_, e)| e)
            .filter(|e| e.first_blk != ROOT_BLOCK && e.first_blk != FAT_BLOCK)
            .filter(|e| e.name() != "." && e.name() != "..")
    }
}

// ─── Unit tests ────────────────────────────────────────────────────────────────
