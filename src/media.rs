use anyhow::Context;
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::state::AppState;

pub struct UploadItem {
    pub body: Bytes,
    pub content_type: String,
}

const PRESIGN_TTL_SECS: u64 = 30 * 60;

/// Store an uploaded image under a fresh unique key and return the key.
/// Keys are namespaced by purpose and owner so nothing ever collides.
pub async fn store_image(
    st: &AppState,
    prefix: &str,
    owner: Uuid,
    item: UploadItem,
) -> anyhow::Result<String> {
    let id = Uuid::new_v4();
    let ext = ext_from_mime(&item.content_type).unwrap_or("bin");
    let key = format!("{}/{}/{}.{}", prefix, owner, id, ext);
    st.storage
        .put_object(&key, item.body, &item.content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;
    Ok(key)
}

pub async fn presign(st: &AppState, key: &str) -> anyhow::Result<String> {
    st.storage
        .presign_get(key, PRESIGN_TTL_SECS)
        .await
        .with_context(|| format!("presign url for {}", key))
}

/// Best-effort removal of a stored image. The owning row is already gone by
/// the time this runs, so failures are logged rather than surfaced.
pub async fn delete_image(st: &AppState, key: &str) {
    if let Err(e) = st.storage.delete_object(key).await {
        warn!(error = %e, key, "failed to delete stored image");
    }
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("image/heic"), Some("heic"));
        assert_eq!(ext_from_mime("application/octet-stream"), None);
    }

    #[tokio::test]
    async fn store_image_builds_namespaced_keys() {
        let state = AppState::fake();
        let owner = Uuid::new_v4();
        let key = store_image(
            &state,
            "posts",
            owner,
            UploadItem {
                body: Bytes::from_static(b"fake-jpeg"),
                content_type: "image/jpeg".into(),
            },
        )
        .await
        .unwrap();
        assert!(key.starts_with(&format!("posts/{}/", owner)));
        assert!(key.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn presign_points_at_the_key() {
        let state = AppState::fake();
        let url = presign(&state, "posts/a/b.jpg").await.unwrap();
        assert!(url.contains("posts/a/b.jpg"));
    }
}
