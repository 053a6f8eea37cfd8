/// Block device abstraction and the checked adapter the engine talks to.
///
/// The device only ever sees whole-block reads and writes. `Disk` turns the
/// device's boolean status into `FsError::Io` and clamps the visible volume to
/// `MAX_BLOCKS`, so the rest of the crate never deals with raw device quirks.

use alloc::vec;
use alloc::vec::Vec;

use crate::consts::{BlockId, BLOCK_SIZE, MAX_BLOCKS};
use crate::error::{FsError, Result};

pub type Block = [u8; BLOCK_SIZE];

// ─── Device trait ──────────────────────────────────────────────────────────────

pub trait BlockDev {
    fn read(&mut self, blk: BlockId, buf: &mut Block) -> bool;
    fn write(&mut self, blk: BlockId, buf: &Block) -> bool;
    fn block_count(&self) -> usize;
}

// ─── Checked adapter ───────────────────────────────────────────────────────────

pub struct Disk<D> {
    dev:    D,
    blocks: usize,
}

impl<D: BlockDev> Disk<D> {
    pub fn new(dev: D) -> Self {
        let blocks = dev.block_count().min(MAX_BLOCKS);
        Self { dev, blocks }
    }

    /// Number of blocks the file system may address.
    pub fn blocks(&self) -> usize { self.blocks }

    pub fn device(&self) -> &D { &self.dev }

    pub fn into_inner(self) -> D { self.dev }

    pub fn read_into(&mut self, blk: BlockId, buf: &mut Block) -> Result<()> {
        if blk as usize >= self.blocks || !self.dev.read(blk, buf) {
            log::warn!("disk: read of block {} failed", blk);
            return Err(FsError::Io { block: blk });
        }
        Ok(())
    }

    pub fn read(&mut self, blk: BlockId) -> Result<Block> {
        let mut buf = [0u8; BLOCK_SIZE];
        self.read_into(blk, &mut buf)?;
        Ok(buf)
    }

    pub fn write(&mut self, blk: BlockId, buf: &Block) -> Result<()> {
        if blk as usize >= self.blocks || !self.dev.write(blk, buf) {
            log::warn!("disk: write of block {} failed", blk);
            return Err(FsError::Io { block: blk });
        }
        Ok(())
    }

    pub fn zero(&mut self, blk: BlockId) -> Result<()> {
        self.write(blk, &[0u8; BLOCK_SIZE])
    }
}

// ─── In-memory device ──────────────────────────────────────────────────────────

/// A volume backed by a `Vec<u8>`; used by tests and by `fsh` without an image.
pub struct MemDisk(pub Vec<u8>);

impl MemDisk {
    pub fn new(blocks: usize) -> Self {
        MemDisk(vec![0u8; blocks * BLOCK_SIZE])
    }
}

impl BlockDev for MemDisk {
    fn read(&mut self, blk: BlockId, buf: &mut Block) -> bool {
        let off = blk as usize * BLOCK_SIZE;
        if off + BLOCK_SIZE > self.0.len() { return false; }
        buf.copy_from_slice(&self.0[off..off + BLOCK_SIZE]);
        true
    }
    fn write(&mut self, blk: BlockId, buf: &Block) -> bool {
        let off = blk as usize * BLOCK_SIZE;
        if off + BLOCK_SIZE > self.0.len() { return false; }
        self.0[off..off + BLOCK_SIZE].copy_from_slice(buf);
        true
    }
    fn block_count(&self) -> usize { self.0.len() / BLOCK_SIZE }
}

// ─── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_disk_reports_block_count() {
        assert_eq!(MemDisk::new(16).block_count(), 16);
    }

    #[test]
    fn write_then_read_block() {
        let mut disk = Disk::new(MemDisk::new(4));
        let mut blk = [0u8; BLOCK_SIZE];
        blk[0] = 0xAB;
        blk[BLOCK_SIZE - 1] = 0xCD;
        disk.write(2, &blk).unwrap();
        assert_eq!(disk.read(2).unwrap(), blk);
        assert_eq!(disk.read(1).unwrap(), [0u8; BLOCK_SIZE]);
    }

    #[test]
    fn out_of_range_is_io_error() {
        let mut disk = Disk::new(MemDisk::new(4));
        assert_eq!(disk.read(4), Err(FsError::Io { block: 4 }));
        assert_eq!(disk.zero(9), Err(FsError::Io { block: 9 }));
    }

    #[test]
    fn large_device_is_clamped() {
        let disk = Disk::new(MemDisk::new(MAX_BLOCKS + 8));
        assert_eq!(disk.blocks(), MAX_BLOCKS);
    }

    #[test]
    fn zero_clears_block() {
        let mut disk = Disk::new(MemDisk::new(4));
        disk.write(3, &[0xFF; BLOCK_SIZE]).unwrap();
        disk.zero(3).unwrap();
        assert!(disk.read(3).unwrap().iter().all(|&b| b == 0));
    }
}
