/// Index of a block on the volume. FAT links are stored with the same width.
pub type BlockId = u16;

// Geometry
pub const BLOCK_SIZE: usize = 4096;
pub const MAX_BLOCKS: usize = 2048;
/// Root, FAT, and at least one data block.
pub const MIN_BLOCKS: usize = 3;

// Reserved blocks
pub const ROOT_BLOCK: BlockId = 0;
pub const FAT_BLOCK:  BlockId = 1;

// FAT entry values
pub const FAT_FREE: u16 = 0;
pub const FAT_EOF:  u16 = 0xFFFF;
pub const FAT_ENTRY_SIZE: usize = 2;

// Directory entry layout
pub const DIR_ENTRY_SIZE: usize = 64;
pub const NAME_FIELD_LEN: usize = 56;
pub const MAX_NAME_LEN:   usize = NAME_FIELD_LEN - 1;
pub const DIR_CAPACITY:   usize = BLOCK_SIZE / DIR_ENTRY_SIZE;

// Fixed slots of the synthetic entries in every non-root directory
pub const SELF_SLOT:   usize = 0;
pub const PARENT_SLOT: usize = 1;

// The whole FAT must fit in its reserved block.
const _: () = assert!(MAX_BLOCKS * FAT_ENTRY_SIZE <= BLOCK_SIZE);
// FAT_EOF must never collide with a real block index.
const _: () = assert!(MAX_BLOCKS <= FAT_EOF as usize);
const _: () = assert!(NAME_FIELD_LEN + 4 + 2 + 1 + 1 == DIR_ENTRY_SIZE);
