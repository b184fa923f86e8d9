//! `<script> <argument...>` target convention shared by script probes.

use std::path::{Component, Path, PathBuf};

use netcheck_core::ProbeError;

/// A script target resolved against the scripts directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTarget {
    /// Existing script file.
    pub path: PathBuf,
    /// Remaining target fields joined with single spaces.
    pub argument: String,
}

impl ScriptTarget {
    /// Split `raw` and locate its script under `scripts_dir`.
    ///
    /// The file name gets `.<extension>` appended unless it already ends
    /// with it (compared case-insensitively). Shape problems are reported
    /// before the filesystem is touched.
    pub fn parse(
        raw: &str,
        language: &'static str,
        extension: &'static str,
        scripts_dir: &Path,
    ) -> Result<Self, ProbeError> {
        let mut fields = raw.split_whitespace();
        let (Some(name), Some(first_arg)) = (fields.next(), fields.next()) else {
            return Err(ProbeError::MalformedTarget {
                language,
                extension,
                target: raw.to_string(),
            });
        };

        let argument = std::iter::once(first_arg)
            .chain(fields)
            .collect::<Vec<_>>()
            .join(" ");

        let suffix = format!(".{extension}");
        let file_name = if name.to_ascii_lowercase().ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{name}{suffix}")
        };

        let relative = Path::new(&file_name);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(ProbeError::ScriptOutsideDir {
                language,
                name: name.to_string(),
            });
        }

        let path = scripts_dir.join(relative);
        if !path.is_file() {
            return Err(ProbeError::ScriptNotFound { path });
        }

        Ok(Self { path, argument })
    }
}
