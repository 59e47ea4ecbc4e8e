// src/utils/img_url.rs

use chrono::Utc;

/// Builds the storage path for an uploaded question image.
///
/// Each recognized topic maps to a fixed prefix; the path embeds the
/// creation timestamp in milliseconds plus the original filename.
/// Unrecognized topics yield `None` and the upload is dropped.
pub fn generate_img_url(topic: &str, filename: &str) -> Option<String> {
    let prefix = match topic {
        "Makanan" => "foods/",
        "Ikon" => "icons/",
        "Wisata" => "tourisms/",
        _ => return None,
    };

    Some(format!(
        "{}{}-{}",
        prefix,
        Utc::now().timestamp_millis(),
        filename
    ))
}
