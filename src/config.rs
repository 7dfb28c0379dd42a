use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Batch conversion settings, loaded from a JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BatchConfig {
    pub jobs: Vec<Job>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Job {
    pub input: String, // Glob pattern, relative to the config file
    pub output_dir: PathBuf,
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub manifest: bool,
}

/// Destinations of the three artifacts for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub palette: PathBuf,
    pub patterns: PathBuf,
    pub name_table: PathBuf,
}

impl OutputPaths {
    pub fn for_stem(dir: &Path, stem: &str) -> Self {
        OutputPaths {
            palette: dir.join(format!("{stem}.pal")),
            patterns: dir.join(format!("{stem}.pat")),
            name_table: dir.join(format!("{stem}.nam")),
        }
    }
}

impl Job {
    pub fn input_pattern(&self, base_dir: &Path) -> String {
        if Path::new(&self.input).is_absolute() {
            self.input.clone()
        } else {
            format!("{}/{}", base_dir.display(), self.input)
        }
    }

    pub fn output_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_defaults() {
        let config: BatchConfig =
            serde_json::from_str(r#"{"jobs": [{"input": "gfx/*.png", "output_dir": "build"}]}"#)
                .unwrap();
        let job = &config.jobs[0];
        assert!(!job.preview);
        assert!(!job.manifest);
        assert_eq!(job.input_pattern(Path::new("assets")), "assets/gfx/*.png");
        assert_eq!(job.output_dir(Path::new("assets")), PathBuf::from("assets/build"));
    }

    #[test]
    fn output_names_follow_stem() {
        let paths = OutputPaths::for_stem(Path::new("out"), "title");
        assert_eq!(paths.palette, PathBuf::from("out/title.pal"));
        assert_eq!(paths.patterns, PathBuf::from("out/title.pat"));
        assert_eq!(paths.name_table, PathBuf::from("out/title.nam"));
    }
}
