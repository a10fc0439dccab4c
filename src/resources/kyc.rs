//! A user's KYC documents.

use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::json;

use super::Pagination;
use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

user_facade! {
    /// KYC document endpoints under `/api/v1/mangopay/users/{user_id}/kyc/documents`.
    Kyc => ["kyc", "documents"]
}

impl<T: Transport, S: Sleeper> Kyc<T, S> {
    /// Creates an empty document of the given type.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, document: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[], Some(document), RequestOptions::new())
            .await
    }

    /// Fetches a document.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, document_id: &str) -> Result<R> {
        self.resource.get(&[document_id], RequestOptions::new()).await
    }

    /// Lists the user's documents.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list<R: DeserializeOwned>(&self, pagination: &Pagination) -> Result<R> {
        self.resource
            .get(&[], pagination.apply(RequestOptions::new()))
            .await
    }

    /// Uploads one page, given as base64-encoded file content.
    ///
    /// Whatever the server answers is discarded.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_page(&self, document_id: &str, file_base64: &str) -> Result<()> {
        let _: IgnoredAny = self
            .resource
            .post(
                &[document_id, "pages"],
                Some(&json!({"File": file_base64})),
                RequestOptions::new(),
            )
            .await?;
        Ok(())
    }

    /// Asks for the document to be validated.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn submit<R: DeserializeOwned>(&self, document_id: &str) -> Result<R> {
        self.resource
            .put(&[document_id], &json!({"Status": "VALIDATION_ASKED"}))
            .await
    }
}
