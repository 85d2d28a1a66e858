/// Playlist building from plan attachments
use pco_client::Attachment;
use pco_core::Song;
use tracing::warn;

/// Turn streamable attachments into playlist songs
///
/// The title is the attachment's file name; the url is its `open` action,
/// resolved to a stream URL only when the song is played. Attachments
/// without a self link cannot be opened and are skipped.
pub fn build_playlist(attachments: &[Attachment]) -> Vec<Song> {
    attachments
        .iter()
        .filter_map(|attachment| match attachment.open_url() {
            Some(url) => Some(Song::new(attachment.filename.clone(), url)),
            None => {
                warn!(attachment_id = %attachment.id, "Attachment has no self link, skipping");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(id: &str, filename: &str, self_link: Option<&str>) -> Attachment {
        Attachment {
            id: id.to_string(),
            filename: filename.to_string(),
            web_streamable: true,
            content_type: Some("audio/mpeg".to_string()),
            self_link: self_link.map(str::to_string),
        }
    }

    #[test]
    fn test_build_playlist() {
        let songs = build_playlist(&[
            attachment("1", "Amazing Grace.mp3", Some("https://api.example.com/attachments/1")),
            attachment("2", "Oceans.mp3", Some("https://api.example.com/attachments/2/")),
        ]);

        assert_eq!(
            songs,
            vec![
                Song::new("Amazing Grace.mp3", "https://api.example.com/attachments/1/open"),
                Song::new("Oceans.mp3", "https://api.example.com/attachments/2/open"),
            ]
        );
    }

    #[test]
    fn test_skips_attachments_without_self_link() {
        let songs = build_playlist(&[
            attachment("1", "Amazing Grace.mp3", None),
            attachment("2", "Oceans.mp3", Some("https://api.example.com/attachments/2")),
        ]);

        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Oceans.mp3");
    }
}
