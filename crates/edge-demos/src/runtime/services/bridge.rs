//! Bridge between gateway service handles and SDK binding traits
//!
//! Workers see `KvNamespace` and `Bucket` trait objects; these impls forward
//! each call to the matching service actor.

use bytes::Bytes;

use edge_demos_sdk::services::{Bucket, HttpMetadata, KvNamespace, ServiceFuture, StoredObject};

use super::kv::KvStore;
use super::storage::ObjectStore;

impl KvNamespace for KvStore {
    fn get<'a>(&'a self, key: &'a str) -> ServiceFuture<'a, Option<String>> {
        Box::pin(KvStore::get(self, key))
    }

    fn put<'a>(&'a self, key: &'a str, value: String) -> ServiceFuture<'a, ()> {
        Box::pin(KvStore::put(self, key, value))
    }
}

impl Bucket for ObjectStore {
    fn get<'a>(&'a self, key: &'a str) -> ServiceFuture<'a, Option<StoredObject>> {
        Box::pin(ObjectStore::get(self, key))
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Bytes,
        metadata: HttpMetadata,
    ) -> ServiceFuture<'a, ()> {
        Box::pin(ObjectStore::put(self, key, body, metadata))
    }

    fn delete<'a>(&'a self, key: &'a str) -> ServiceFuture<'a, ()> {
        Box::pin(ObjectStore::delete(self, key))
    }
}
