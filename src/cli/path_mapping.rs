use std::path::{Path, PathBuf};

/// Map the `--output` argument onto the archive path to write.
/// No output, or an existing directory, gets `default_name` inside it; a
/// file path without an extension gets `.jar`.
pub fn resolve_output_path(output: Option<&Path>, default_name: &str) -> PathBuf {
    match output {
        None => PathBuf::from(default_name),
        Some(dir) if dir.is_dir() => dir.join(default_name),
        Some(file) => {
            let mut out = file.to_path_buf();
            if out.extension().is_none() {
                out.set_extension("jar");
            }
            out
        }
    }
}
