pub mod listing;

pub use listing::long_listing_line;

/// Canonical lexical form of a virtual path: no `.`/`..` segments, no empty
/// segments, no leading or trailing `/`. A `..` at the root is discarded, so
/// the result can never climb above the first kept segment.
pub fn normalize(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                kept.pop();
            }
            other => kept.push(other),
        }
    }
    kept.join("/")
}

/// Maps a client-visible path onto the host filesystem. An absolute virtual
/// path is rooted at the user's home; a relative one at the working
/// directory; an empty one names the working directory itself. Because
/// `normalize` drops any `..` that would escape, the result always stays
/// under `/<native_home>/`.
pub fn resolve(native_home: &str, working_dir: &str, virtual_path: &str) -> String {
    if virtual_path.is_empty() {
        return format!("/{}/{}", native_home, working_dir);
    }

    let combined = if virtual_path.starts_with('/') {
        normalize(virtual_path)
    } else {
        normalize(&format!("{}/{}", working_dir, virtual_path))
    };

    format!("/{}/{}", native_home, combined)
}

pub async fn is_directory(path: &str) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

pub async fn is_regular_file(path: &str) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize("a/b//c"), "a/b/c");
        assert_eq!(normalize("////"), "");
        assert_eq!(normalize("b/c/"), "b/c");
    }

    #[test]
    fn normalize_never_escapes_the_root() {
        assert_eq!(normalize("/.."), "");
        assert_eq!(normalize("../../.."), "");
        assert_eq!(normalize("//../../a/../b/./c/"), "b/c");
        assert_eq!(normalize("a/../../b"), "b");
    }

    #[test]
    fn normalize_drops_dot_segments() {
        assert_eq!(normalize("./a/./b/."), "a/b");
        assert_eq!(normalize("."), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in [
            "a/b//c",
            "/..",
            "//../../a/../b/./c/",
            "",
            "x",
            "a/b/../../../z",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn normalized_output_has_no_special_segments() {
        for input in ["../a/..//./b", "a//..//..", "/x/../y/z/.."] {
            let out = normalize(input);
            assert!(!out.starts_with('/'));
            assert!(!out.contains("//"));
            assert!(out.split('/').all(|s| s != "." && s != ".."));
        }
    }

    #[test]
    fn resolve_stays_under_the_native_home() {
        for vpath in [
            "",
            "sub",
            "/etc",
            "../../etc",
            "../../../../root",
            "a/../../../b",
            "/..",
        ] {
            let host = resolve("srv/alice", "sub", vpath);
            assert!(
                host.starts_with("/srv/alice/"),
                "{vpath:?} resolved outside the home: {host}"
            );
        }
    }

    #[test]
    fn resolve_empty_input_names_the_working_dir() {
        assert_eq!(resolve("srv/alice", "sub", ""), "/srv/alice/sub");
        assert_eq!(resolve("srv/alice", "", ""), "/srv/alice/");
    }

    #[test]
    fn resolve_absolute_input_ignores_the_working_dir() {
        assert_eq!(resolve("srv/alice", "sub", "/data/x"), "/srv/alice/data/x");
    }

    #[tokio::test]
    async fn probes_distinguish_files_from_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("probe.txt");
        std::fs::write(&file, b"x").unwrap();

        assert!(is_directory(dir.path().to_str().unwrap()).await);
        assert!(!is_regular_file(dir.path().to_str().unwrap()).await);
        assert!(is_regular_file(file.to_str().unwrap()).await);
        assert!(!is_directory(file.to_str().unwrap()).await);
        assert!(!is_directory("/no/such/path/here").await);
    }
}
