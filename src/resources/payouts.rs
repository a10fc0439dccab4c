//! Payouts to bank accounts.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Payout endpoints under `/api/v1/mangopay/payouts`.
    Payouts => "/api/v1/mangopay/payouts"
}

impl<T: Transport, S: Sleeper> Payouts<T, S> {
    /// Creates a payout.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, payout: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[], Some(payout), RequestOptions::new())
            .await
    }

    /// Fetches a payout.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, payout_id: &str) -> Result<R> {
        self.resource.get(&[payout_id], RequestOptions::new()).await
    }
}
