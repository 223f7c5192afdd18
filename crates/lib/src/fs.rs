use camino::{Utf8Path, Utf8PathBuf};

pub const POST_EXTENSIONS: &[&str] = &["md", "mdx"];

pub fn is_post_path(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| POST_EXTENSIONS.contains(&ext))
}

/// Post files directly inside `dir`, sorted by path. Subdirectories are not
/// descended into.
pub fn post_paths(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, std::io::Error> {
    let mut paths = dir
        .read_dir_utf8()?
        .filter_map(|entry| {
            entry
                .map(|entry| {
                    let path = entry.path();
                    (path.is_file() && is_post_path(path)).then(|| path.to_path_buf())
                })
                .transpose()
        })
        .collect::<Result<Vec<_>, _>>()?;

    paths.sort();

    Ok(paths)
}
