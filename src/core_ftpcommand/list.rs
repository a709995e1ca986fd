use crate::core_ftpcommand::utils::send_over_data_channel;
use crate::core_net::NetError;
use crate::core_vfs::long_listing_line;
use crate::session::Session;
use log::debug;

/// Handles the LIST command.
///
/// For a directory the listing holds one line per entry; for an existing
/// non-directory path a single line describing the path itself; for anything
/// else it is empty. The buffered listing is then shipped over the data
/// channel in the current transfer mode.
pub async fn handle_list_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    let native_path = session.resolve_virtual(arg);
    debug!("LIST {:?}", native_path);

    let listing = build_listing(&native_path).await;
    send_over_data_channel(
        session,
        "Here come the directory listing",
        "Directory listing sent OK",
        listing.as_bytes(),
    )
    .await
}

async fn build_listing(native_path: &str) -> String {
    let mut listing = String::new();

    match tokio::fs::read_dir(native_path).await {
        Ok(mut entries) => {
            while let Ok(Some(entry)) = entries.next_entry().await {
                let name = entry.file_name().to_string_lossy().into_owned();
                if let Ok(meta) = entry.metadata().await {
                    listing.push_str(&long_listing_line(&meta, &name));
                    listing.push_str("\r\n");
                }
            }
        }
        Err(_) => {
            if let Ok(meta) = tokio::fs::metadata(native_path).await {
                let name = native_path.rsplit('/').next().unwrap_or(native_path);
                listing.push_str(&long_listing_line(&meta, name));
                listing.push_str("\r\n");
            }
        }
    }

    listing
}

#[cfg(test)]
mod tests {
    use super::build_listing;

    #[tokio::test]
    async fn directory_listing_has_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"aa").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"bbb").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let listing = build_listing(dir.path().to_str().unwrap()).await;
        let lines: Vec<&str> = listing.split("\r\n").filter(|l| !l.is_empty()).collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().any(|l| l.ends_with("a.txt")));
        assert!(lines.iter().any(|l| l.ends_with("sub") && l.starts_with('d')));
    }

    #[tokio::test]
    async fn plain_file_lists_itself() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("only.bin");
        std::fs::write(&path, b"12345").unwrap();

        let listing = build_listing(path.to_str().unwrap()).await;
        let lines: Vec<&str> = listing.split("\r\n").filter(|l| !l.is_empty()).collect();

        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("only.bin"));
        assert!(lines[0].contains("\t5\t"));
    }

    #[tokio::test]
    async fn missing_path_lists_nothing() {
        assert!(build_listing("/no/such/dir").await.is_empty());
    }
}
