use anyhow::{Context, Result};
use reqwest::Client;

#[cfg(test)]
#[path = "avatar_tests.rs"]
mod tests;

/// Edge length, in pixels, of the avatar on the profile card.
pub const AVATAR_SIZE: u32 = 192;

/// Decoded RGBA8 image data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarPixels {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Downloads an avatar and decodes it into `size`×`size` RGBA pixels.
pub async fn download_avatar(client: &Client, url: &str, size: u32) -> Result<AvatarPixels> {
    let bytes = client
        .get(sized_url(url, size))
        .send()
        .await
        .context("Failed to request avatar")?
        .error_for_status()
        .context("Avatar request was rejected")?
        .bytes()
        .await
        .context("Failed to read avatar body")?;

    decode_avatar(&bytes, size)
}

/// Asks the avatar CDN for a specific size.
fn sized_url(url: &str, size: u32) -> String {
    if url.contains('?') {
        format!("{url}&s={size}")
    } else {
        format!("{url}?s={size}")
    }
}

fn decode_avatar(bytes: &[u8], size: u32) -> Result<AvatarPixels> {
    let image = image::load_from_memory(bytes).context("Failed to decode avatar image")?;

    // The CDN sometimes ignores the size hint, so resize regardless.
    let rgba = image.thumbnail_exact(size, size).to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(AvatarPixels {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}
