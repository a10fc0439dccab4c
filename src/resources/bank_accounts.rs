//! A user's bank accounts.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::Pagination;
use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

user_facade! {
    /// Bank account endpoints under `/api/v1/mangopay/users/{user_id}/bankaccounts`.
    BankAccounts => ["bankaccounts"]
}

impl<T: Transport, S: Sleeper> BankAccounts<T, S> {
    /// Registers an IBAN account.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_iban<R, B>(&self, account: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.create("iban", account).await
    }

    /// Registers a UK account (sort code and account number).
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_gb<R, B>(&self, account: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.create("gb", account).await
    }

    /// Registers a US account (ABA routing number).
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_us<R, B>(&self, account: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.create("us", account).await
    }

    /// Registers a Canadian account.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_ca<R, B>(&self, account: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.create("ca", account).await
    }

    /// Registers an account of any other country (BIC and account number).
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_other<R, B>(&self, account: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.create("other", account).await
    }

    /// Fetches one of the user's accounts.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, account_id: &str) -> Result<R> {
        self.resource.get(&[account_id], RequestOptions::new()).await
    }

    /// Lists the user's accounts.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list<R: DeserializeOwned>(&self, pagination: &Pagination) -> Result<R> {
        self.resource
            .get(&[], pagination.apply(RequestOptions::new()))
            .await
    }

    /// Deactivates an account. Deactivation cannot be undone.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn deactivate<R: DeserializeOwned>(&self, account_id: &str) -> Result<R> {
        self.resource
            .put(&[account_id], &json!({"Active": false}))
            .await
    }

    async fn create<R, B>(&self, kind: &str, account: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[kind], Some(account), RequestOptions::new())
            .await
    }
}
