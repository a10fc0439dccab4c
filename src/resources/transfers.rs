//! Wallet-to-wallet transfers.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Transfer endpoints under `/api/v1/mangopay/transfers`.
    Transfers => "/api/v1/mangopay/transfers"
}

impl<T: Transport, S: Sleeper> Transfers<T, S> {
    /// Creates a transfer.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, transfer: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&[], transfer).await
    }

    /// Creates a transfer requiring strong customer authentication.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_sca<R, B>(&self, transfer: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["sca"], transfer).await
    }

    /// Fetches a transfer.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, transfer_id: &str) -> Result<R> {
        self.resource.get(&[transfer_id], RequestOptions::new()).await
    }

    /// Fetches an SCA transfer.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_sca<R: DeserializeOwned>(&self, transfer_id: &str) -> Result<R> {
        self.resource
            .get(&["sca", transfer_id], RequestOptions::new())
            .await
    }

    /// Refunds a transfer.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn refund<R, B>(&self, transfer_id: &str, refund: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&[transfer_id, "refund"], refund).await
    }

    async fn post<R, B>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(segments, Some(body), RequestOptions::new())
            .await
    }
}
