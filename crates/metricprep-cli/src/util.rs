use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

/// Output path argument that selects stdout.
pub(crate) const STDOUT_PATH: &str = "-";

/// Writes `value` as pretty JSON plus a trailing newline to `path`, or to
/// stdout when `path` is [`STDOUT_PATH`].
pub(crate) fn write_json<T>(value: &T, path: &Path) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    let (mut writer, target): (Box<dyn Write>, _) = if path == Path::new(STDOUT_PATH) {
        (Box::new(io::stdout().lock()), "stdout".to_owned())
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        (Box::new(BufWriter::new(file)), path.display().to_string())
    };

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush {target}"))?;
    Ok(())
}

/// Reads and deserializes a JSON file; `kind` names the file in errors.
pub(crate) fn read_json_file<T>(kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file =
        File::open(path).with_context(|| format!("Failed to open {kind} {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {kind} {}", path.display()))
}
