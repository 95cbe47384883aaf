// qnorm_io
// Copyright (C) 2021  Artois University and CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//
// Contributors:
//   *   CRIL - initial API and implementation

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};

const NORMALIZED_EXTENSION: &str = ".n.qdimacs";
const RENAMED_EXTENSIONS: [&str; 2] = [".qdimacs", ".qaiger"];

/// Lists the files of a directory whose names match a pattern.
///
/// The pattern follows the shell conventions: `*` matches any sequence of characters and `?` matches a single character.
/// Subdirectories are not explored. The files are returned sorted by name.
///
/// # Arguments
///
/// * `dir` - the directory
/// * `pattern` - the file name pattern, like `*.qdimacs`
pub fn list_input_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let regex = pattern_to_regex(pattern)?;
    let mut files = vec![];
    let entries =
        fs::read_dir(dir).with_context(|| format!("while listing directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("while listing directory {}", dir.display()))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| regex.is_match(n))
            .unwrap_or(false);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn pattern_to_regex(pattern: &str) -> Result<Regex> {
    let mut regex = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            _ => regex.push_str(&regex::escape(&c.to_string())),
        }
    }
    regex.push('$');
    Regex::new(&regex).with_context(|| format!(r#"invalid file pattern "{}""#, pattern))
}

/// Returns the path of the normalized version of a file.
///
/// The file is placed in the destination directory; the extensions `.qdimacs` and `.qaiger` are replaced by `.n.qdimacs`.
///
/// # Example
///
/// ```
/// # use qnorm_io::normalized_file_name;
/// # use std::path::{Path, PathBuf};
/// assert_eq!(
///     PathBuf::from("out/f.n.qdimacs"),
///     normalized_file_name(Path::new("out"), Path::new("in/f.qaiger")).unwrap()
/// );
/// ```
pub fn normalized_file_name(dest_dir: &Path, input: &Path) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("cannot get the file name of {}", input.display()))?;
    let new_name = RENAMED_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(*ext))
        .map(|stem| format!("{}{}", stem, NORMALIZED_EXTENSION))
        .unwrap_or_else(|| file_name.to_string());
    Ok(dest_dir.join(new_name))
}
