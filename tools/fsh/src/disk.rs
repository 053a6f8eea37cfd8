use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use blockfat::{BlockDev, BlockId, BLOCK_SIZE};

/// A volume image on the host file system, addressed in whole blocks.
pub struct FileDisk {
    file:   File,
    blocks: usize,
}

impl FileDisk {
    /// Open `path`, creating it when missing. A `blocks` count resizes the
    /// image. Shrinking is refused unless the image is about to be formatted.
    pub fn open(path: &Path, blocks: Option<usize>, format: bool) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).create(true).truncate(false).open(path)?;
        if let Some(n) = blocks {
            let len = file.metadata()?.len();
            let want = (n * BLOCK_SIZE) as u64;
            if want < len && !format {
                return Err(io::Error::new(io::ErrorKind::InvalidInput, format!(
                    "refusing to shrink {} from {} to {} blocks without --format",
                    path.display(), len / BLOCK_SIZE as u64, n)));
            }
            file.set_len(want)?;
        }
        let blocks = file.metadata()?.len() as usize / BLOCK_SIZE;
        log::info!("disk: {} opened with {} blocks", path.display(), blocks);
        Ok(Self { file, blocks })
    }

    fn seek_to(&mut self, blk: BlockId) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(blk as u64 * BLOCK_SIZE as u64)).map(|_| ())
    }
}

impl BlockDev for FileDisk {
    fn read(&mut self, blk: BlockId, buf: &mut [u8; BLOCK_SIZE]) -> bool {
        if blk as usize >= self.blocks { return false; }
        match self.seek_to(blk).and_then(|_| self.file.read_exact(buf)) {
            Ok(()) => true,
            Err(e) => {
                log::error!("disk: read of block {} failed: {}", blk, e);
                false
            }
        }
    }

    fn write(&mut self, blk: BlockId, buf: &[u8; BLOCK_SIZE]) -> bool {
        if blk as usize >= self.blocks { return false; }
        match self.seek_to(blk).and_then(|_| self.file.write_all(buf)) {
            Ok(()) => true,
            Err(e) => {
                log::error!("disk: write of block {} failed: {}", blk, e);
                false
            }
        }
    }

    fn block_count(&self) -> usize { self.blocks }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("fsh-{}-{}.img", name, std::process::id()))
    }

    #[test]
    fn image_is_sized_in_blocks() {
        let path = scratch("size");
        let disk = FileDisk::open(&path, Some(8), false).unwrap();
        assert_eq!(disk.block_count(), 8);
        drop(disk);
        assert_eq!(FileDisk::open(&path, None, false).unwrap().block_count(), 8);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn blocks_persist_across_reopen() {
        let path = scratch("persist");
        let mut disk = FileDisk::open(&path, Some(4), false).unwrap();
        assert!(disk.write(3, &[0x5A; BLOCK_SIZE]));
        drop(disk);
        let mut disk = FileDisk::open(&path, None, false).unwrap();
        let mut buf = [0u8; BLOCK_SIZE];
        assert!(disk.read(3, &mut buf));
        assert_eq!(buf, [0x5A; BLOCK_SIZE]);
        assert!(!disk.read(4, &mut buf));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn formatted_image_mounts_again() {
        let path = scratch("mount");
        let mut fs = blockfat::FileSystem::format(FileDisk::open(&path, Some(16), true).unwrap()).unwrap();
        fs.create("note", ["kept"]).unwrap();
        drop(fs);
        let mut fs = blockfat::FileSystem::mount(FileDisk::open(&path, None, false).unwrap()).unwrap();
        assert_eq!(fs.read_file("note").unwrap(), b"kept\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn shrinking_needs_format() {
        let path = scratch("shrink");
        drop(FileDisk::open(&path, Some(8), false).unwrap());
        let err = FileDisk::open(&path, Some(4), false).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(FileDisk::open(&path, None, false).unwrap().block_count(), 8);
        assert_eq!(FileDisk::open(&path, Some(12), false).unwrap().block_count(), 12);
        assert_eq!(FileDisk::open(&path, Some(4), true).unwrap().block_count(), 4);
        std::fs::remove_file(&path).unwrap();
    }
}
