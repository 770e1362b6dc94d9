mod infer;

pub use infer::table_format as infer_table_format;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Read, Stdin, StdoutLock, Write};
use std::path::Path;

use anyhow::{Context, Result};

pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn stdout_is_tty() -> bool {
    io::stdout().is_terminal()
}

/// A buffered dataset source: a file or stdin.
pub enum Source {
    File(BufReader<File>),
    Stdin(BufReader<Stdin>),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::File(r) => r.read(buf),
            Source::Stdin(r) => r.read(buf),
        }
    }
}

impl BufRead for Source {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Source::File(r) => r.fill_buf(),
            Source::Stdin(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Source::File(r) => r.consume(amt),
            Source::Stdin(r) => r.consume(amt),
        }
    }
}

pub fn open_input(path: Option<&Path>) -> Result<Source> {
    let Some(path) = path else {
        return Ok(Source::Stdin(BufReader::new(io::stdin())));
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open input dataset: {}", path.display()))?;
    Ok(Source::File(BufReader::new(file)))
}

/// A buffered dataset sink: a file or locked stdout.
pub enum Sink {
    File(BufWriter<File>),
    Stdout(BufWriter<StdoutLock<'static>>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(w) => w.write(buf),
            Sink::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(w) => w.flush(),
            Sink::Stdout(w) => w.flush(),
        }
    }
}

pub fn create_output(path: Option<&Path>) -> Result<Sink> {
    let Some(path) = path else {
        return Ok(Sink::Stdout(BufWriter::new(io::stdout().lock())));
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create output dataset: {}", path.display()))?;
    Ok(Sink::File(BufWriter::new(file)))
}
