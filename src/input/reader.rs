use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

pub struct InputReader;

impl InputReader {
    pub fn read(file_path: Option<&Path>) -> Result<String> {
        file_path.map_or_else(Self::read_stdin, Self::read_file)
    }

    /// Collects the texts to translate.
    ///
    /// Inline arguments win over the file or stdin. With `lines`, every
    /// non-blank line is a separate text; otherwise the whole input is one
    /// text without its trailing newline.
    pub fn texts(inline: &[String], file_path: Option<&Path>, lines: bool) -> Result<Vec<String>> {
        if !inline.is_empty() {
            return Ok(inline.to_vec());
        }

        let input = Self::read(file_path)?;
        let texts = split_input(&input, lines);
        if texts.is_empty() {
            bail!("Input is empty");
        }
        Ok(texts)
    }

    fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(
                "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                 Consider splitting the file into smaller parts.",
                size as f64 / 1024.0 / 1024.0
            );
        }

        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];
        let mut stdin = io::stdin().lock();

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(
                    "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                     Consider splitting the input into smaller parts.",
                    buffer.len() as f64 / 1024.0 / 1024.0
                );
            }
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}

fn split_input(input: &str, lines: bool) -> Vec<String> {
    if lines {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    } else {
        let text = input.trim_end_matches(['\n', '\r']);
        if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Hello, World!").unwrap();

        let content = InputReader::read(Some(temp_file.path())).unwrap();
        assert_eq!(content.trim(), "Hello, World!");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = InputReader::read(Some(Path::new("/nonexistent/path/to/file.txt")));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large_file.txt");

        let large_content = "x".repeat(MAX_INPUT_SIZE + 1);
        fs::write(&file_path, &large_content).unwrap();

        let result = InputReader::read(Some(&file_path));
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }

    #[test]
    fn test_inline_texts_win() {
        let inline = vec!["Hello".to_string(), "World".to_string()];
        let texts = InputReader::texts(&inline, Some(Path::new("/nonexistent")), true).unwrap();
        assert_eq!(texts, inline);
    }

    #[test]
    fn test_file_as_single_text() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "Line 1\nLine 2\n").unwrap();

        let texts = InputReader::texts(&[], Some(temp_file.path()), false).unwrap();
        assert_eq!(texts, vec!["Line 1\nLine 2"]);
    }

    #[test]
    fn test_file_split_into_lines() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "Hello\n\n  \nこんにちは\n").unwrap();

        let texts = InputReader::texts(&[], Some(temp_file.path()), true).unwrap();
        assert_eq!(texts, vec!["Hello", "こんにちは"]);
    }

    #[test]
    fn test_blank_file_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "\n  \n").unwrap();

        let result = InputReader::texts(&[], Some(temp_file.path()), false);
        assert!(result.unwrap_err().to_string().contains("empty"));
    }
}
