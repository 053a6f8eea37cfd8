mod command;
mod disk;
mod logger;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use blockfat::{BlockDev, FileSystem, FsError, MemDisk, MAX_BLOCKS};
use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

use crate::command::{Command, HELP};
use crate::disk::FileDisk;

#[derive(Parser, Debug)]
#[command(name = "fsh", version, about = "Interactive shell over a FAT block volume")]
struct Args {
    /// Volume image on the host; without one the volume lives in memory.
    #[arg(long, env = "FSH_IMAGE")]
    image: Option<PathBuf>,

    /// Volume size in blocks (resizes an image, shrinking only with --format).
    #[arg(long)]
    blocks: Option<usize>,

    /// Format the image before starting the shell.
    #[arg(long)]
    format: bool,

    /// off, error, warn, info, debug or trace.
    #[arg(long, env = "FSH_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Error, Debug)]
enum ShellError {
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

enum Flow {
    Continue,
    Quit,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let Ok(level) = args.log_level.parse::<LevelFilter>() else {
        eprintln!("error: unknown log level '{}'", args.log_level);
        return ExitCode::from(2);
    };
    if let Err(e) = logger::init(level) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let result = match &args.image {
        Some(path) => open_image(path, &args)
            .and_then(|fs| run(fs, stdin.lock(), io::stdout().lock(), prompt)),
        None => FileSystem::format(MemDisk::new(args.blocks.unwrap_or(MAX_BLOCKS)))
            .map_err(ShellError::from)
            .and_then(|fs| run(fs, stdin.lock(), io::stdout().lock(), prompt)),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn open_image(path: &std::path::Path, args: &Args) -> Result<FileSystem<FileDisk>, ShellError> {
    let disk = FileDisk::open(path, args.blocks, args.format)?;
    if args.format {
        return Ok(FileSystem::format(disk)?);
    }
    FileSystem::mount(disk).map_err(|e| {
        if e == FsError::Corrupt {
            log::error!("fsh: {} is not a formatted volume, start with --format", path.display());
        }
        e.into()
    })
}

/// Read commands from `input` until it ends or `quit`. File system errors are
/// reported on `out` and the session goes on.
fn run<D: BlockDev>(mut fs: FileSystem<D>, input: impl BufRead, mut out: impl Write,
                    prompt: bool) -> Result<(), ShellError> {
    let mut lines = input.lines().map_while(Result::ok);
    loop {
        if prompt {
            write!(out, "fsh:{}> ", fs.pwd())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else { break };
        let cmd = match command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };
        match execute(&mut fs, cmd, &mut lines, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(ShellError::Fs(e)) => writeln!(out, "error: {e}")?,
            Err(e) => return Err(e),
        }
    }
    out.flush()?;
    Ok(())
}

fn execute<D: BlockDev>(fs: &mut FileSystem<D>, cmd: Command<'_>,
                        lines: &mut impl Iterator<Item = String>,
                        out: &mut impl Write) -> Result<Flow, ShellError> {
    match cmd {
        Command::Format => fs.reformat()?,
        Command::Create(path) => {
            // The content block is consumed even when create rejects the name.
            let content: Vec<String> = lines.by_ref().take_while(|l| !l.is_empty()).collect();
            fs.create(path, &content)?;
        }
        Command::Cat(path) => {
            out.write_all(&fs.cat(path)?)?;
            writeln!(out)?;
        }
        Command::Ls => {
            writeln!(out, "name\ttype\taccessrights\tsize")?;
            for row in fs.ls()? {
                let (kind, size) = match row.kind {
                    blockfat::EntryType::Dir => ("dir", "-".to_string()),
                    blockfat::EntryType::File => ("file", row.size.to_string()),
                };
                writeln!(out, "{}\t{}\t{}\t{}", row.name, kind, row.rights, size)?;
            }
        }
        Command::Cp(src, dst) => fs.cp(src, dst)?,
        Command::Mv(src, dst) => fs.mv(src, dst)?,
        Command::Rm(path) => fs.rm(path)?,
        Command::Append(src, dst) => fs.append(src, dst)?,
        Command::Mkdir(path) => fs.mkdir(path)?,
        Command::Cd(path) => fs.cd(path)?,
        Command::Pwd => writeln!(out, "{}", fs.pwd())?,
        Command::Chmod(rights, path) => fs.chmod(rights, path)?,
        Command::Stat => {
            let stat = fs.stat();
            writeln!(out, "block size: {} bytes", stat.block_size)?;
            writeln!(out, "blocks:     {} total, {} free", stat.total_blocks, stat.free_blocks)?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str) -> String {
        let fs = FileSystem::format(MemDisk::new(32)).unwrap();
        let mut out = Vec::new();
        run(fs, script.as_bytes(), &mut out, false).unwrap();
        String::from_utf8_lossy(&out).replace('\0', "")
    }

    #[test]
    fn create_reads_lines_until_blank() {
        let out = session("create a\nhello\nworld\n\ncat a\n");
        assert_eq!(out, "hello\nworld\n\n");
    }

    #[test]
    fn ls_lists_files_and_directories() {
        let out = session("create a\nhi\n\nmkdir d\nls\n");
        assert_eq!(out, "name\ttype\taccessrights\tsize\na\tfile\trw-\t3\nd\tdir\trwx\t-\n");
    }

    #[test]
    fn cd_and_pwd() {
        assert_eq!(session("mkdir d\ncd d\npwd\ncd ..\npwd\n"), "/d\n/\n");
    }

    #[test]
    fn errors_are_reported_and_session_continues() {
        let out = session("cat missing\nbogus\ncp a\npwd\n");
        assert_eq!(out, "error: no such file or directory\n\
                         error: unknown command 'bogus', try 'help'\n\
                         error: usage: cp <src> <dst>\n/\n");
    }

    #[test]
    fn rejected_create_skips_its_content() {
        let out = session("create a\nx\n\ncreate a\nmkdir oops\nrm a\n\nls\n");
        assert_eq!(out, "error: file or directory already exists\n\
                         name\ttype\taccessrights\tsize\na\tfile\trw-\t2\n");
    }

    #[test]
    fn create_with_bad_name_skips_its_content() {
        let name = "n".repeat(60);
        let out = session(&format!("create {name}\npwd\n\npwd\n"));
        assert_eq!(out, "error: invalid argument: name longer than 55 bytes\n/\n");
    }

    #[test]
    fn quit_stops_reading() {
        assert_eq!(session("pwd\nquit\npwd\n"), "/\n");
    }

    #[test]
    fn stat_reports_free_blocks() {
        let out = session("create a\nx\n\nstat\n");
        assert!(out.contains("32 total, 29 free"), "{out}");
    }
}
