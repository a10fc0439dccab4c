//! Card registrations, registered cards and preauthorizations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::Pagination;
use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Card registration endpoints under `/api/v1/mangopay/cardRegistrations`.
    CardRegistrations => "/api/v1/mangopay/cardRegistrations"
}

facade! {
    /// Registered card endpoints under `/api/v1/mangopay/cards`.
    Cards => "/api/v1/mangopay/cards"
}

facade! {
    /// Preauthorization endpoints under `/api/v1/mangopay/preauthorizations`.
    Preauthorizations => "/api/v1/mangopay/preauthorizations"
}

impl<T: Transport, S: Sleeper> CardRegistrations<T, S> {
    /// Starts a card registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, registration: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[], Some(registration), RequestOptions::new())
            .await
    }

    /// Fetches a card registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, registration_id: &str) -> Result<R> {
        self.resource
            .get(&[registration_id], RequestOptions::new())
            .await
    }

    /// Completes a registration with the tokenized card data.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update<R, B>(&self, registration_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&[registration_id], changes).await
    }
}

impl<T: Transport, S: Sleeper> Cards<T, S> {
    /// Fetches a card.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, card_id: &str) -> Result<R> {
        self.resource.get(&[card_id], RequestOptions::new()).await
    }

    /// Deactivates a card. Deactivation cannot be undone.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn deactivate<R: DeserializeOwned>(&self, card_id: &str) -> Result<R> {
        // Upstream route spelling.
        self.resource
            .post(
                &[card_id, "desactivate"],
                Some(&json!({"Active": false})),
                RequestOptions::new(),
            )
            .await
    }

    /// Lists the preauthorizations made with a card.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn preauthorizations<R: DeserializeOwned>(
        &self,
        card_id: &str,
        pagination: &Pagination,
    ) -> Result<R> {
        self.resource
            .get(
                &[card_id, "preauthorizations"],
                pagination.apply(RequestOptions::new()),
            )
            .await
    }
}

impl<T: Transport, S: Sleeper> Preauthorizations<T, S> {
    /// Creates a preauthorization.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, preauthorization: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[], Some(preauthorization), RequestOptions::new())
            .await
    }

    /// Fetches a preauthorization.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, preauthorization_id: &str) -> Result<R> {
        self.resource
            .get(&[preauthorization_id], RequestOptions::new())
            .await
    }

    /// Updates a preauthorization.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update<R, B>(&self, preauthorization_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&[preauthorization_id], changes).await
    }

    /// Cancels a preauthorization (`PaymentStatus: CANCELED`).
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn cancel<R: DeserializeOwned>(&self, preauthorization_id: &str) -> Result<R> {
        self.update(preauthorization_id, &json!({"PaymentStatus": "CANCELED"}))
            .await
    }
}
