/// File Allocation Table: one `u16` per block, mirrored to `FAT_BLOCK`.
///
/// An entry is `FAT_FREE`, `FAT_EOF`, or the index of the next block in a
/// chain. The table itself never touches the device; callers allocate, write
/// their data, link, and then persist the encoded image.

use alloc::vec;
use alloc::vec::Vec;

use crate::block_dev::Block;
use crate::consts::{BlockId, BLOCK_SIZE, FAT_BLOCK, FAT_ENTRY_SIZE, FAT_EOF, FAT_FREE, ROOT_BLOCK};
use crate::error::{FsError, Result};

/// First block a free-block search may return.
const FIRST_DATA_BLOCK: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fat {
    entries: Vec<u16>,
}

impl Fat {
    /// Table of a freshly formatted volume: everything free except the reserved
    /// blocks. The table always covers at least the two reserved blocks.
    pub fn new(blocks: usize) -> Self {
        let mut entries = vec![FAT_FREE; blocks.max(FIRST_DATA_BLOCK)];
        entries[ROOT_BLOCK as usize] = FAT_EOF;
        entries[FAT_BLOCK as usize] = FAT_EOF;
        Self { entries }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn entries(&self) -> &[u16] { &self.entries }

    pub fn get(&self, blk: BlockId) -> Option<u16> { self.entries.get(blk as usize).copied() }

    pub fn is_free(&self, blk: BlockId) -> bool { self.get(blk) == Some(FAT_FREE) }

    pub fn free_count(&self) -> usize {
        self.entries[FIRST_DATA_BLOCK..].iter().filter(|&&e| e == FAT_FREE).count()
    }

    /// First-fit search for up to `n` free blocks in ascending order.
    ///
    /// Nothing is marked; a result shorter than `n` means the volume cannot
    /// hold the request and the caller must abort before writing anything.
    pub fn allocate(&self, n: usize) -> Vec<BlockId> {
        let found: Vec<BlockId> = self.entries
            .iter()
            .enumerate()
            .skip(FIRST_DATA_BLOCK)
            .filter(|(_, e)| **e == FAT_FREE)
            .map(|(i, _)| i as BlockId)
            .take(n)
            .collect();
        log::trace!("fat: allocate({}) found {:?}", n, found);
        found
    }

    /// Link `blocks` into one chain terminated by `FAT_EOF`.
    pub fn link(&mut self, blocks: &[BlockId]) {
        for pair in blocks.windows(2) {
            self.entries[pair[0] as usize] = pair[1];
        }
        if let Some(&last) = blocks.last() {
            self.entries[last as usize] = FAT_EOF;
        }
    }

    /// Link `blocks` and hang them off the current tail of a chain.
    pub fn extend(&mut self, tail: BlockId, blocks: &[BlockId]) {
        if let Some(&first) = blocks.first() {
            self.link(blocks);
            self.entries[tail as usize] = first;
        }
    }

    /// Walk the chain starting at `head`.
    ///
    /// A chain longer than the table, a link out of range, or a link into a
    /// free block means the table is corrupt.
    pub fn chain(&self, head: BlockId) -> Result<Vec<BlockId>> {
        let mut blocks = Vec::new();
        let mut cur = head;
        loop {
            let next = match self.get(cur) {
                Some(FAT_FREE) | None => return Err(FsError::Corrupt),
                Some(next) => next,
            };
            blocks.push(cur);
            if blocks.len() > self.entries.len() {
                log::warn!("fat: cycle in chain starting at block {}", head);
                return Err(FsError::Corrupt);
            }
            if next == FAT_EOF { return Ok(blocks); }
            cur = next;
        }
    }

    /// Return every block of the chain at `head` to the free pool.
    /// The caller is responsible for zeroing the returned data blocks.
    pub fn release(&mut self, head: BlockId) -> Result<Vec<BlockId>> {
        let blocks = self.chain(head)?;
        if blocks.iter().any(|&b| (b as usize) < FIRST_DATA_BLOCK) {
            return Err(FsError::Corrupt);
        }
        for &b in &blocks {
            self.entries[b as usize] = FAT_FREE;
        }
        log::trace!("fat: released {:?}", blocks);
        Ok(blocks)
    }

    // ─── On-disk image ─────────────────────────────────────────────────────────

    pub fn encode(&self) -> Block {
        let mut image = [0u8; BLOCK_SIZE];
        for (i, e) in self.entries.iter().enumerate() {
            let off = i * FAT_ENTRY_SIZE;
            image[off..off + FAT_ENTRY_SIZE].copy_from_slice(&e.to_le_bytes());
        }
        image
    }

    /// Parse the image stored in `FAT_BLOCK` for a volume of `blocks` blocks.
    pub fn decode(image: &Block, blocks: usize) -> Result<Self> {
        if blocks * FAT_ENTRY_SIZE > BLOCK_SIZE || blocks < FIRST_DATA_BLOCK {
            return Err(FsError::Corrupt);
        }
        let entries: Vec<u16> = image[..blocks * FAT_ENTRY_SIZE]
            .chunks_exact(FAT_ENTRY_SIZE)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        if entries[ROOT_BLOCK as usize] != FAT_EOF || entries[FAT_BLOCK as usize] != FAT_EOF {
            log::warn!("fat: reserved entries are not end-of-chain, volume is not formatted");
            return Err(FsError::Corrupt);
        }
        if entries.iter().any(|&e| e != FAT_EOF && e as usize >= blocks) {
            log::warn!("fat: link out of range");
            return Err(FsError::Corrupt);
        }
        Ok(Self { entries })
    }
}

// ─── Unit tests ────────────────────────────────────────────────────────────────
