use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";
pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// Environment variable naming the artifact directory.
pub const MODEL_PATH_ENV: &str = "MODEL_PATH";

/// Location of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub config: PathBuf,
    pub weights: PathBuf,
    pub vectorizer: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir<P: AsRef<Path>>(path: P) -> Self {
        let mut dir = PathBuf::from(path.as_ref());

        dir.push(CONFIG_FILE);
        let config = dir.clone();
        dir.pop();

        dir.push(WEIGHTS_FILE);
        let weights = dir.clone();
        dir.pop();

        dir.push(VECTORIZER_FILE);
        let vectorizer = dir;

        Self {
            config,
            weights,
            vectorizer,
        }
    }

    /// Uses `dir` when given, otherwise the directory holding the running
    /// executable.
    pub fn resolve(dir: Option<PathBuf>) -> std::io::Result<Self> {
        match dir {
            Some(dir) => Ok(Self::in_dir(dir)),
            None => {
                let exe = std::env::current_exe()?;
                let parent = exe.parent().ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("{} has no parent directory", exe.display()),
                    )
                })?;
                Ok(Self::in_dir(parent))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_names_under_dir() {
        let paths = ArtifactPaths::in_dir("/opt/ocasion");
        assert_eq!(paths.config, Path::new("/opt/ocasion/config.json"));
        assert_eq!(paths.weights, Path::new("/opt/ocasion/model.safetensors"));
        assert_eq!(paths.vectorizer, Path::new("/opt/ocasion/vectorizer.json"));
    }

    #[test]
    fn explicit_dir_wins() {
        let paths = ArtifactPaths::resolve(Some(PathBuf::from("models"))).unwrap();
        assert_eq!(paths, ArtifactPaths::in_dir("models"));
    }

    #[test]
    fn defaults_to_executable_dir() {
        let exe = std::env::current_exe().unwrap();
        let paths = ArtifactPaths::resolve(None).unwrap();
        assert_eq!(paths, ArtifactPaths::in_dir(exe.parent().unwrap()));
    }
}
