//! Read-modify-write demo
//!
//! Appends a character to a KV value and to an object, writing both back.
//! The read and the write are separate calls: two concurrent requests can
//! read the same value and one append is lost.

use edge_demos_sdk::prelude::*;

pub const KV_KEY: &str = "foo";
pub const KV_SUFFIX: &str = "r";
pub const OBJECT_KEY: &str = "foo";
pub const OBJECT_DEFAULT: &str = "ba";
pub const OBJECT_SUFFIX: &str = "r";

pub async fn handle(env: &Env, _req: Request) -> Result<Response, HandlerError> {
    let kv = env.require_kv()?;
    let bucket = env.require_bucket()?;

    let kv_value = kv.get(KV_KEY).await?.unwrap_or_default();
    kv.put(KV_KEY, format!("{}{}", kv_value, KV_SUFFIX)).await?;

    let mut object_value = match bucket.get(OBJECT_KEY).await? {
        Some(object) => object.text(),
        None => OBJECT_DEFAULT.to_string(),
    };
    object_value.push_str(OBJECT_SUFFIX);
    bucket
        .put(OBJECT_KEY, Bytes::from(object_value.clone()), HttpMetadata::default())
        .await?;

    Ok(Response::text(200, format!("{} / {}", kv_value, object_value)))
}

edge_demos_sdk::entry_point!(entry => handle);
