use std::{fs, path::Path};

use crate::error::AnalysisError;

/// Ordered list of sample names: the signal first, then the backgrounds.
///
/// The text form holds one name per line. Lines are trimmed; blank lines and
/// lines starting with `#` or `//` are ignored.
///
/// ```text
/// // signal first
/// ttH
/// ttbar
/// # dropped for now: ttZ
/// diboson
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleManifest {
    names: Vec<String>,
}

impl SampleManifest {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn parse(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("//"))
            .map(str::to_owned)
            .collect();
        Self { names }
    }

    pub fn read<P>(path: P) -> Result<Self, AnalysisError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        let manifest = Self::parse(&text);
        tracing::debug!(path = %path.display(), samples = manifest.len(), "read sample manifest");
        Ok(manifest)
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn signal(&self) -> Result<&str, AnalysisError> {
        self.names
            .first()
            .map(String::as_str)
            .ok_or(AnalysisError::EmptyManifest)
    }

    #[must_use]
    pub fn backgrounds(&self) -> &[String] {
        self.names.get(1..).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let manifest = SampleManifest::parse(
            "// signal first\n  ttH  \n\nttbar\r\n# ttZ\n   // wjets\ndiboson\n",
        );
        assert_eq!(manifest.names(), ["ttH", "ttbar", "diboson"]);
        assert_eq!(manifest.signal().unwrap(), "ttH");
        assert_eq!(manifest.backgrounds(), ["ttbar", "diboson"]);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = SampleManifest::parse("# nothing here\n\n");
        assert!(manifest.is_empty());
        assert!(manifest.backgrounds().is_empty());
        assert!(matches!(manifest.signal(), Err(AnalysisError::EmptyManifest)));
    }

    #[test]
    fn test_signal_only() {
        let manifest = SampleManifest::parse("signal");
        assert_eq!(manifest.signal().unwrap(), "signal");
        assert!(manifest.backgrounds().is_empty());
    }

    #[test]
    fn test_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.txt");
        fs::write(&path, "sig\nbkg\n").unwrap();
        let manifest = SampleManifest::read(&path).unwrap();
        assert_eq!(manifest.len(), 2);

        assert!(matches!(
            SampleManifest::read(dir.path().join("missing.txt")),
            Err(AnalysisError::Io { .. })
        ));
    }
}
