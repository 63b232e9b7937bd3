use std::fs;
use std::io;
use std::path::Path;

/// Reads a line-oriented list file: text from `#` on is a comment, lines
/// are trimmed, empty lines are dropped, and the remaining lines keep
/// their original order.
///
/// `None` or a nonexistent file yields an empty list rather than an
/// error; other I/O failures propagate.
pub fn load_file(path: Option<&Path>) -> io::Result<Vec<String>> {
    let path = match path {
        Some(path) => path,
        None => return Ok(Vec::new()),
    };
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };
    Ok(text
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
