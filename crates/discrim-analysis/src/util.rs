use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::Path,
};

use crate::error::AnalysisError;

/// Read and deserialize a JSON file
///
/// # Arguments
///
/// * `file_kind` - Human-readable kind of file, used in error messages
/// * `path` - Path to the JSON file
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] if the file cannot be opened and
/// [`AnalysisError::Json`] if it cannot be parsed
pub(crate) fn read_json_file<T, P>(file_kind: &'static str, path: P) -> Result<T, AnalysisError>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).map_err(|source| AnalysisError::Json {
        kind: file_kind,
        path: path.to_path_buf(),
        source,
    })?;

    Ok(value)
}

/// Serialize `value` as pretty-printed JSON into a new file
pub(crate) fn write_json_file<T, P>(path: P, value: &T) -> Result<(), AnalysisError>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AnalysisError::io(path, io::Error::from(e)))?;
    writeln!(writer).map_err(|e| AnalysisError::io(path, e))?;
    writer.flush().map_err(|e| AnalysisError::io(path, e))?;
    Ok(())
}
