//! Payout recipients registered under strong customer authentication.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Pagination;
use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

user_facade! {
    /// Recipient endpoints under `/api/v1/mangopay/users/{user_id}/recipients`.
    ScaRecipients => ["recipients"]
}

impl<T: Transport, S: Sleeper> ScaRecipients<T, S> {
    /// Registers a recipient.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, recipient: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[], Some(recipient), RequestOptions::new())
            .await
    }

    /// Fetches a recipient.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, recipient_id: &str) -> Result<R> {
        self.resource.get(&[recipient_id], RequestOptions::new()).await
    }

    /// Lists the user's recipients.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list<R: DeserializeOwned>(&self, pagination: &Pagination) -> Result<R> {
        self.resource
            .get(&[], pagination.apply(RequestOptions::new()))
            .await
    }

    /// Fetches the fields required for a payout method.
    ///
    /// The schema query (payout method, recipient type, currency, country)
    /// goes in `options` as query parameters.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn schema<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.resource.get(&["schema"], options).await
    }
}
