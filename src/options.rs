//! Turning command-line tokens into a [`ResolvedConfig`].
//!
//! Tokens are consumed left to right, and the first rule that matches
//! wins:
//!
//! 1. `-o PATH` or `--output PATH` sets the output file.
//! 2. `-d PATH` or `--default PATH` sets the default source image.
//! 3. A size override, `-N[,M...] PATH`, sets the source image for each of
//!    the listed icon sizes.  A token is a size override when it is a dash
//!    followed by one or more groups of ASCII digits separated by commas,
//!    such as `-16` or `-16,32`.  Each group must name a supported size.
//! 4. Any other token is taken as the default source image.
//!
//! Every option may be given at most once; a size listed in two overrides
//! is an error, as is a second default or output path.

use crate::error::{Error, Result};
use crate::iconsize::IconSize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

//===========================================================================//

/// The role a path plays in an `iconify` run.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OptionKey {
    /// The source image for every size without an override.
    Default,
    /// The ICO file to write.
    Output,
    /// The source image for one particular icon size.
    Specific(IconSize),
}

//===========================================================================//

/// The paths an `iconify` run reads from and writes to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResolvedConfig {
    paths: BTreeMap<OptionKey, PathBuf>,
}

impl ResolvedConfig {
    /// Returns the path bound to `key`, if any.
    pub fn get(&self, key: OptionKey) -> Option<&Path> {
        self.paths.get(&key).map(PathBuf::as_path)
    }

    /// Returns every binding, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &Path)> {
        self.paths.iter().map(|(&key, path)| (key, path.as_path()))
    }

    /// Returns true if no option was given.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns the default source image.
    pub fn default_path(&self) -> Result<&Path> {
        self.get(OptionKey::Default).ok_or_else(|| {
            Error::Usage("No default image given (use -d PATH)".to_string())
        })
    }

    /// Returns the ICO file to write: the `--output` path if one was given,
    /// otherwise the default image path with an `.ico` extension.
    pub fn output_path(&self) -> Result<PathBuf> {
        match self.get(OptionKey::Output) {
            Some(path) => Ok(path.to_path_buf()),
            None => Ok(self.default_path()?.with_extension("ico")),
        }
    }

    /// Returns the source image for `size`: its override if one was given,
    /// otherwise the default image.
    pub fn source_for(&self, size: IconSize) -> Result<&Path> {
        match self.get(OptionKey::Specific(size)) {
            Some(path) => Ok(path),
            None => self.default_path(),
        }
    }

    fn bind(&mut self, key: OptionKey, path: &str) -> Result<()> {
        if self.paths.contains_key(&key) {
            let message = match key {
                OptionKey::Default => {
                    "Default image given more than once".to_string()
                }
                OptionKey::Output => {
                    "Output path given more than once".to_string()
                }
                OptionKey::Specific(size) => {
                    format!("Size {} given more than once", size)
                }
            };
            return Err(Error::Argument(message));
        }
        self.paths.insert(key, PathBuf::from(path));
        Ok(())
    }
}

//===========================================================================//

/// Resolves command-line tokens (not including the program name) into a
/// configuration.  Does not check whether any of the paths exist.
pub fn resolve<I, S>(tokens: I) -> Result<ResolvedConfig>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<S> = tokens.into_iter().collect();
    let mut config = ResolvedConfig::default();
    let mut index = 0;
    while index < tokens.len() {
        let token = tokens[index].as_ref();
        index += 1;
        let key = match token {
            "-o" | "--output" => Some(KeyOrSizes::Key(OptionKey::Output)),
            "-d" | "--default" => Some(KeyOrSizes::Key(OptionKey::Default)),
            _ => size_list(token).map(KeyOrSizes::Sizes),
        };
        let key = match key {
            Some(key) => key,
            None => {
                config.bind(OptionKey::Default, token)?;
                continue;
            }
        };
        let path = match tokens.get(index) {
            Some(path) => path.as_ref(),
            None => {
                return Err(Error::Argument(format!(
                    "Missing path after {}",
                    token
                )));
            }
        };
        index += 1;
        match key {
            KeyOrSizes::Key(key) => config.bind(key, path)?,
            KeyOrSizes::Sizes(list) => {
                for size in parse_sizes(list)? {
                    config.bind(OptionKey::Specific(size), path)?;
                }
            }
        }
    }
    Ok(config)
}

enum KeyOrSizes<'a> {
    Key(OptionKey),
    Sizes(&'a str),
}

// Returns the comma-separated body of a size override token, or `None` if
// the token isn't one.
fn size_list(token: &str) -> Option<&str> {
    let body = token.strip_prefix('-')?;
    if body.split(',').all(is_digit_group) {
        Some(body)
    } else {
        None
    }
}

fn is_digit_group(group: &str) -> bool {
    !group.is_empty() && group.bytes().all(|byte| byte.is_ascii_digit())
}

fn parse_sizes(list: &str) -> Result<Vec<IconSize>> {
    let mut sizes = Vec::new();
    let mut seen = BTreeSet::new();
    for component in list.split(',') {
        let size = component
            .parse::<u32>()
            .ok()
            .and_then(IconSize::from_pixels)
            .ok_or_else(|| {
                Error::Argument(format!(
                    "Unsupported icon size: {} (supported sizes are \
                     16, 32, 48, and 256)",
                    component
                ))
            })?;
        if !seen.insert(size) {
            return Err(Error::Argument(format!(
                "Size {} given more than once",
                size
            )));
        }
        sizes.push(size);
    }
    Ok(sizes)
}

//===========================================================================//


//===========================================================================//
