use rand::Rng;

use crate::domain::{Clock, ImageSink, StoredImage, UploadError};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 6;

// A single file part pulled out of the multipart body.
pub struct ImageUpload {
    pub original_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

// Validates an uploaded card image and stores it under a generated name.
pub struct UploadImageUseCase<C, K> {
    pub clock: C,
    pub sink: K,
    // Public URL prefix the stored file is reachable under.
    pub public_prefix: String,
}

impl<C, K> UploadImageUseCase<C, K>
where
    C: Clock,
    K: ImageSink,
{
    pub async fn execute(&self, upload: Option<ImageUpload>) -> Result<StoredImage, UploadError> {
        let upload = upload.ok_or(UploadError::MissingFile)?;

        let content_type = upload.content_type.as_deref().unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(UploadError::NotAnImage);
        }
        if upload.bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge {
                limit_bytes: MAX_IMAGE_BYTES,
            });
        }

        let extension = extension_for(upload.original_name.as_deref(), content_type);
        let file_name = generated_file_name(self.clock.now_epoch_millis(), &extension);

        self.sink
            .write(&file_name, &upload.bytes)
            .await
            .map_err(UploadError::StorageFailure)?;

        let public_path = format!("{}/{}", self.public_prefix.trim_end_matches('/'), file_name);
        Ok(StoredImage {
            file_name,
            public_path,
        })
    }
}

// `siyer<millis>_<suffix>.<ext>`
fn generated_file_name(millis: u64, extension: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_CHARS[rng.random_range(0..SUFFIX_CHARS.len())]))
        .collect();
    format!("siyer{millis}_{suffix}.{extension}")
}

// Prefer the uploaded file's extension, then the mime subtype.
fn extension_for(original_name: Option<&str>, content_type: &str) -> String {
    let from_name = original_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext);
    let from_mime = content_type
        .strip_prefix("image/")
        .map(|subtype| subtype.split(['+', ';']).next().unwrap_or(subtype));

    from_name
        .into_iter()
        .chain(from_mime)
        .map(str::trim)
        .find(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".to_string())
}
