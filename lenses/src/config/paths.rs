// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Where configuration files are looked for and saved.

use std::path::{Path, PathBuf};

/// File name searched for in every directory.
pub const CONFIG_FILE_NAME: &str = "lensesctl.yml";

/// Directory below `$HOME` holding the user configuration.
pub const HOME_CONFIG_DIR: &str = ".lenses";

/// Optional dotenv file consulted for the context override.
pub const DOTENV_FILE_NAME: &str = ".env";

/// Directories probed when no `--config` is given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPaths {
    /// Current working directory
    pub cwd: Option<PathBuf>,
    /// Directory containing the running executable
    pub exe_dir: Option<PathBuf>,
    /// User home directory
    pub home: Option<PathBuf>,
}

impl SearchPaths {
    /// Search paths of the running process.
    pub fn from_env() -> Self {
        Self {
            cwd: std::env::current_dir().ok(),
            exe_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            home: std::env::var_os("HOME")
                .filter(|home| !home.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Candidate files in order of precedence (highest first):
    /// 1. `./lensesctl.yml`
    /// 2. `<exe dir>/lensesctl.yml`
    /// 3. `~/.lenses/lensesctl.yml`
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(ref cwd) = self.cwd {
            paths.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(ref exe_dir) = self.exe_dir {
            paths.push(exe_dir.join(CONFIG_FILE_NAME));
        }
        if let Some(path) = self.home_config() {
            paths.push(path);
        }

        paths
    }

    /// First candidate that exists.
    pub fn find(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|path| path.is_file())
    }

    /// `~/.lenses/lensesctl.yml`, the default save location.
    pub fn home_config(&self) -> Option<PathBuf> {
        self.home
            .as_ref()
            .map(|home| home.join(HOME_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// `./.env`
    pub fn dotenv(&self) -> Option<PathBuf> {
        self.cwd.as_ref().map(|cwd| cwd.join(DOTENV_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn paths_in(root: &Path) -> SearchPaths {
        SearchPaths {
            cwd: Some(root.join("cwd")),
            exe_dir: Some(root.join("bin")),
            home: Some(root.join("home")),
        }
    }

    #[test]
    fn test_candidates_order() {
        let paths = paths_in(Path::new("/r")).candidates();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/r/cwd/lensesctl.yml"),
                PathBuf::from("/r/bin/lensesctl.yml"),
                PathBuf::from("/r/home/.lenses/lensesctl.yml"),
            ]
        );
    }

    #[test]
    fn test_candidates_skip_unknown_dirs() {
        let paths = SearchPaths {
            home: Some(PathBuf::from("/home/u")),
            ..SearchPaths::default()
        };
        assert_eq!(
            paths.candidates(),
            vec![PathBuf::from("/home/u/.lenses/lensesctl.yml")]
        );
        assert!(SearchPaths::default().candidates().is_empty());
        assert!(SearchPaths::default().home_config().is_none());
    }

    #[test]
    fn test_find_first_existing() {
        let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
        let paths = paths_in(tmpdir.path());
        assert!(paths.find().is_none());

        let home_file = paths.home_config().unwrap(); //#[allow_ci]
        fs::create_dir_all(home_file.parent().unwrap()).unwrap(); //#[allow_ci]
        fs::write(&home_file, "contexts: {}\n").unwrap(); //#[allow_ci]
        assert_eq!(paths.find(), Some(home_file));

        let exe_file = tmpdir.path().join("bin").join(CONFIG_FILE_NAME);
        fs::create_dir_all(exe_file.parent().unwrap()).unwrap(); //#[allow_ci]
        fs::write(&exe_file, "contexts: {}\n").unwrap(); //#[allow_ci]
        assert_eq!(paths.find(), Some(exe_file));

        let cwd_file = tmpdir.path().join("cwd").join(CONFIG_FILE_NAME);
        fs::create_dir_all(cwd_file.parent().unwrap()).unwrap(); //#[allow_ci]
        fs::write(&cwd_file, "contexts: {}\n").unwrap(); //#[allow_ci]
        assert_eq!(paths.find(), Some(cwd_file));
    }

    #[test]
    fn test_dotenv_in_cwd() {
        let paths = paths_in(Path::new("/r"));
        assert_eq!(paths.dotenv(), Some(PathBuf::from("/r/cwd/.env")));
    }
}
