use crate::error::ShareError;

use models::StorageReference;

use percent_encoding::percent_decode_str;
use url::Url;

/// Take the storage reference from the last non-empty path segment of `url`.
///
/// Query and fragment are ignored; a trailing slash is tolerated. The segment
/// is percent-decoded so that [`long_url`] encodes it exactly once.
#[track_caller]
pub fn reference_from_url(url: &str) -> Result<StorageReference, ShareError> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|e| ShareError::validation(format!("Invalid share URL '{trimmed}': {e}")))?;

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
        .ok_or_else(|| {
            ShareError::validation(format!("Share URL '{trimmed}' has no storage reference"))
        })?;

    let decoded = percent_decode_str(segment).decode_utf8().map_err(|e| {
        ShareError::validation(format!("Share URL '{trimmed}' has a malformed reference: {e}"))
    })?;

    Ok(StorageReference::new(decoded.into_owned())?)
}

/// `{base}/{reference}`: the long-form URL that points at one stored blob.
#[track_caller]
pub fn long_url(base: &Url, reference: &StorageReference) -> Result<Url, ShareError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ShareError::validation(format!("Storage base URL '{base}' cannot have a path")))?
        .pop_if_empty()
        .push(reference.as_str());
    Ok(url)
}
