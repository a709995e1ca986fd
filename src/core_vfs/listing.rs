use chrono::{Local, LocalResult, TimeZone};
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

/// One line of a POSIX-style long listing: `mode nlink size mtime name`,
/// TAB-separated, without the trailing line ending.
pub fn long_listing_line(meta: &Metadata, name: &str) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        mode_string(meta),
        meta.nlink(),
        meta.len(),
        format_mtime(meta.mtime()),
        name
    )
}

/// 10-character `[d-]rwxrwxrwx` string from the file type and the three
/// permission triples.
fn mode_string(meta: &Metadata) -> String {
    let mode = meta.mode();
    let mut out = String::with_capacity(10);
    out.push(if meta.is_dir() { 'd' } else { '-' });
    for (bit, ch) in [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ] {
        out.push(if mode & bit != 0 { ch } else { '-' });
    }
    out
}

fn format_mtime(secs: i64) -> String {
    match Local.timestamp_opt(secs, 0) {
        LocalResult::Single(t) => t.format("%b %d %H:%M").to_string(),
        _ => String::from("Jan 01 00:00"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_has_five_tab_separated_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listed.bin");
        std::fs::write(&path, vec![0u8; 1234]).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        let line = long_listing_line(&meta, "listed.bin");
        let fields: Vec<&str> = line.split('\t').collect();

        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].len(), 10);
        assert!(fields[0].starts_with('-'));
        assert_eq!(fields[2], "1234");
        assert_eq!(fields[4], "listed.bin");
    }

    #[test]
    fn directories_are_marked_with_d() {
        let dir = tempfile::tempdir().unwrap();
        let meta = std::fs::metadata(dir.path()).unwrap();
        let line = long_listing_line(&meta, "somedir");
        assert!(line.starts_with('d'));
    }

    #[test]
    fn mode_bits_map_to_rwx_triples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modes");
        std::fs::write(&path, b"").unwrap();

        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o754)).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        let line = long_listing_line(&meta, "modes");
        assert!(line.starts_with("-rwxr-xr--"));
    }

    #[test]
    fn mtime_renders_month_day_time() {
        let rendered = format_mtime(0);
        // "%b %d %H:%M" in local time; exact value depends on the zone
        assert_eq!(rendered.len(), "Jan 01 00:00".len());
        assert_eq!(rendered.as_bytes()[3], b' ');
        assert_eq!(rendered.as_bytes()[6], b' ');
        assert_eq!(rendered.as_bytes()[9], b':');
    }
}
