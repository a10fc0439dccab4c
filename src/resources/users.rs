//! Natural and legal users.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Pagination;
use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// User endpoints under `/api/v1/mangopay/users`.
    Users => "/api/v1/mangopay/users"
}

impl<T: Transport, S: Sleeper> Users<T, S> {
    /// Creates a natural user.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_natural<R, B>(&self, user: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&["natural"], Some(user), RequestOptions::new())
            .await
    }

    /// Creates a legal user.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_legal<R, B>(&self, user: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&["legal"], Some(user), RequestOptions::new())
            .await
    }

    /// Fetches a user of either type.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, user_id: &str) -> Result<R> {
        self.resource.get(&[user_id], RequestOptions::new()).await
    }

    /// Fetches a natural user.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_natural<R: DeserializeOwned>(&self, user_id: &str) -> Result<R> {
        self.resource
            .get(&["natural", user_id], RequestOptions::new())
            .await
    }

    /// Fetches a legal user.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_legal<R: DeserializeOwned>(&self, user_id: &str) -> Result<R> {
        self.resource
            .get(&["legal", user_id], RequestOptions::new())
            .await
    }

    /// Updates a natural user.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update_natural<R, B>(&self, user_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&["natural", user_id], changes).await
    }

    /// Updates a legal user.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update_legal<R, B>(&self, user_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&["legal", user_id], changes).await
    }

    /// Lists the user's wallets.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn wallets<R: DeserializeOwned>(
        &self,
        user_id: &str,
        pagination: &Pagination,
    ) -> Result<R> {
        self.list(user_id, "wallets", pagination).await
    }

    /// Lists the user's cards.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn cards<R: DeserializeOwned>(
        &self,
        user_id: &str,
        pagination: &Pagination,
    ) -> Result<R> {
        self.list(user_id, "cards", pagination).await
    }

    /// Lists the user's bank accounts.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn bank_accounts<R: DeserializeOwned>(
        &self,
        user_id: &str,
        pagination: &Pagination,
    ) -> Result<R> {
        self.list(user_id, "bankaccounts", pagination).await
    }

    /// Lists the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn transactions<R: DeserializeOwned>(
        &self,
        user_id: &str,
        pagination: &Pagination,
    ) -> Result<R> {
        self.list(user_id, "transactions", pagination).await
    }

    async fn list<R: DeserializeOwned>(
        &self,
        user_id: &str,
        collection: &str,
        pagination: &Pagination,
    ) -> Result<R> {
        self.resource
            .get(&[user_id, collection], pagination.apply(RequestOptions::new()))
            .await
    }
}
