use thiserror::Error;

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Format,
    Create(&'a str),
    Cat(&'a str),
    Ls,
    Cp(&'a str, &'a str),
    Mv(&'a str, &'a str),
    Rm(&'a str),
    Append(&'a str, &'a str),
    Mkdir(&'a str),
    Cd(&'a str),
    Pwd,
    Chmod(&'a str, &'a str),
    Stat,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
format                 erase the volume
create <file>          create <file> from the following lines, ended by an empty line
cat <file>             print <file> with its block padding
ls                     list the working directory
cp <src> <dst>         copy a file
mv <src> <dst>         rename or move a file or directory
rm <file>              delete a file
append <src> <dst>     append <src> to the end of <dst>
mkdir <dir>            create a directory
cd <dir>               change the working directory
pwd                    print the working directory
chmod <rights> <file>  set rights as one octal digit (4 read, 2 write, 1 execute)
stat                   show volume usage
help                   show this text
quit                   leave the shell";

fn usage(cmd: &str) -> Option<&'static str> {
    Some(match cmd {
        "format" => "format",
        "create" => "create <file>",
        "cat" => "cat <file>",
        "ls" => "ls",
        "cp" => "cp <src> <dst>",
        "mv" => "mv <src> <dst>",
        "rm" => "rm <file>",
        "append" => "append <src> <dst>",
        "mkdir" => "mkdir <dir>",
        "cd" => "cd <dir>",
        "pwd" => "pwd",
        "chmod" => "chmod <rights> <file>",
        "stat" => "stat",
        "quit" | "exit" => "quit",
        _ => return None,
    })
}

/// Parse a line; blank input yields `None`.
pub fn parse(line: &str) -> Result<Option<Command<'_>>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&cmd, args)) = words.split_first() else { return Ok(None) };

    let cmd = match (cmd, args) {
        ("format", &[]) => Command::Format,
        ("create", &[p]) => Command::Create(p),
        ("cat", &[p]) => Command::Cat(p),
        ("ls", &[]) => Command::Ls,
        ("cp", &[s, d]) => Command::Cp(s, d),
        ("mv", &[s, d]) => Command::Mv(s, d),
        ("rm", &[p]) => Command::Rm(p),
        ("append", &[s, d]) => Command::Append(s, d),
        ("mkdir", &[p]) => Command::Mkdir(p),
        ("cd", &[p]) => Command::Cd(p),
        ("pwd", &[]) => Command::Pwd,
        ("chmod", &[r, p]) => Command::Chmod(r, p),
        ("stat", &[]) => Command::Stat,
        ("help", _) => Command::Help,
        ("quit" | "exit", &[]) => Command::Quit,
        (other, _) => return Err(match usage(other) {
            Some(text) => CommandError::Usage(text),
            None => CommandError::Unknown(other.to_string()),
        }),
    };
    Ok(Some(cmd))
}
