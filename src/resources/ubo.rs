//! Ultimate beneficial owner declarations of a legal user.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::{NO_BODY, RequestOptions};
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

user_facade! {
    /// UBO declaration endpoints under
    /// `/api/v1/mangopay/users/{user_id}/kyc/ubodeclarations`.
    Ubo => ["kyc", "ubodeclarations"]
}

impl<T: Transport, S: Sleeper> Ubo<T, S> {
    /// Opens a new declaration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_declaration<R: DeserializeOwned>(&self) -> Result<R> {
        self.resource.post(&[], NO_BODY, RequestOptions::new()).await
    }

    /// Fetches a declaration with its owners.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_declaration<R: DeserializeOwned>(&self, declaration_id: &str) -> Result<R> {
        self.resource
            .get(&[declaration_id], RequestOptions::new())
            .await
    }

    /// Adds an owner to a declaration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_ubo<R, B>(&self, declaration_id: &str, ubo: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[declaration_id, "ubos"], Some(ubo), RequestOptions::new())
            .await
    }

    /// Updates an owner of a declaration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update_ubo<R, B>(
        &self,
        declaration_id: &str,
        ubo_id: &str,
        changes: &B,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .put(&[declaration_id, "ubos", ubo_id], changes)
            .await
    }

    /// Asks for the declaration to be validated.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn submit<R: DeserializeOwned>(&self, declaration_id: &str) -> Result<R> {
        self.resource
            .put(&[declaration_id], &json!({"Status": "VALIDATION_ASKED"}))
            .await
    }
}
