use std::time::Duration;

use async_trait::async_trait;

use crate::domain::listing::errors::ImageError;
use crate::domain::listing::models::ImageUrl;
use crate::domain::listing::ports::ImageInspector;

/// Bytes needed to recognise every supported signature.
const SNIFF_LEN: usize = 16;

/// Image inspector that fetches the URL and sniffs the leading bytes.
pub struct HttpImageInspector {
    client: reqwest::Client,
    max_size_bytes: u64,
}

impl HttpImageInspector {
    pub fn new(timeout: Duration, max_size_bytes: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            max_size_bytes,
        })
    }
}

#[async_trait]
impl ImageInspector for HttpImageInspector {
    async fn inspect(&self, url: &ImageUrl) -> Result<(), ImageError> {
        let mut response = self
            .client
            .get(url.as_url().clone())
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(url = %url.as_str(), error = %e, "Image fetch failed");
                ImageError::Unreachable
            })?;

        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            tracing::debug!(url = %url.as_str(), status = %status, "Image fetch rejected");
            return Err(ImageError::Unreachable);
        }

        if let Some(length) = response.content_length() {
            if length > self.max_size_bytes {
                return Err(ImageError::TooLarge {
                    max_bytes: self.max_size_bytes,
                });
            }
        }

        let mut head = Vec::with_capacity(SNIFF_LEN);
        while head.len() < SNIFF_LEN {
            match response.chunk().await {
                Ok(Some(chunk)) => head.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(_) => return Err(ImageError::Unreachable),
            }
        }

        if is_image(&head) {
            Ok(())
        } else {
            Err(ImageError::NotAnImage)
        }
    }
}

/// Match the leading bytes against known image signatures.
pub fn is_image(head: &[u8]) -> bool {
    const SIGNATURES: &[&[u8]] = &[
        b"\x89PNG\r\n\x1a\n",
        b"\xff\xd8\xff",
        b"GIF87a",
        b"GIF89a",
        b"BM",
        b"\x00\x00\x01\x00",
        b"\x00\x00\x02\x00",
        b"II*\x00",
        b"MM\x00*",
    ];

    if head.len() >= 12 && &head[0..4] == b"RIFF" && &head[8..12] == b"WEBP" {
        return true;
    }

    SIGNATURES.iter().any(|signature| head.starts_with(signature))
}
