// Library crate root. No_std outside of `cargo test`; the engine only needs `alloc`.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod block_dev;
pub mod consts;
pub mod dir;
pub mod error;
pub mod fat;
pub mod fs;
pub mod path;

pub use block_dev::{Block, BlockDev, Disk, MemDisk};
pub use consts::*;
pub use dir::{AccessRights, DirBlock, DirEntry, EntryType, Located};
pub use error::{FsError, Result};
pub use fat::Fat;
pub use fs::{Cursor, FileSystem, Listing, VolumeStats};
pub use path::PathResult;
