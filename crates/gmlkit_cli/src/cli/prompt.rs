//! Interactive path input.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub const C_PROMPT_SOURCE: &str = "Enter the path to the main folder (source): ";
pub const C_PROMPT_OUTPUT: &str = "Enter the path to the output directory (destination): ";

/// Print `prompt`, read one line and trim it. End of input reads as "".
pub fn prompt_line<R, W>(reader: &mut R, writer: &mut W, prompt: &str) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "{prompt}")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Use the argument when given, otherwise ask for it.
pub fn resolve_path<R, W>(
    arg_path: Option<&Path>,
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> io::Result<Option<PathBuf>>
where
    R: BufRead,
    W: Write,
{
    let path = match arg_path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(prompt_line(reader, writer, prompt)?),
    };
    if path.as_os_str().is_empty() {
        return Ok(None);
    }
    Ok(Some(path))
}
