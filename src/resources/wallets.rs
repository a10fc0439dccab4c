//! Wallets.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Pagination;
use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Wallet endpoints under `/api/v1/mangopay/wallets`.
    Wallets => "/api/v1/mangopay/wallets"
}

impl<T: Transport, S: Sleeper> Wallets<T, S> {
    /// Creates a wallet.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, wallet: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[], Some(wallet), RequestOptions::new())
            .await
    }

    /// Fetches a wallet.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, wallet_id: &str) -> Result<R> {
        self.resource.get(&[wallet_id], RequestOptions::new()).await
    }

    /// Updates a wallet.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update<R, B>(&self, wallet_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&[wallet_id], changes).await
    }

    /// Lists the wallet's transactions.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn transactions<R: DeserializeOwned>(
        &self,
        wallet_id: &str,
        pagination: &Pagination,
    ) -> Result<R> {
        self.resource
            .get(
                &[wallet_id, "transactions"],
                pagination.apply(RequestOptions::new()),
            )
            .await
    }
}
