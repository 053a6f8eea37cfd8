use thiserror::Error;

use crate::consts::BlockId;

/// Every way an operation on the volume can fail.
///
/// Operations validate before they touch the device, so any variant except
/// `Io` leaves the volume exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FsError {
    #[error("no such file or directory")]
    NotFound,
    #[error("file or directory already exists")]
    AlreadyExists,
    #[error("wrong entry type for this operation")]
    WrongType,
    #[error("permission denied")]
    PermissionDenied,
    #[error("not enough free blocks or directory slots")]
    OutOfSpace,
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("device I/O failed on block {block}")]
    Io { block: BlockId },
    #[error("the file system structure is corrupt")]
    Corrupt,
}

pub type Result<T> = core::result::Result<T, FsError>;
