//! Pay-ins, refunds and recurring pay-in registrations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Pay-in endpoints under `/api/v1/mangopay/payins`.
    Payins => "/api/v1/mangopay/payins"
}

impl<T: Transport, S: Sleeper> Payins<T, S> {
    /// Creates a card direct pay-in.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, payin: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&[], payin).await
    }

    /// Fetches a pay-in.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, payin_id: &str) -> Result<R> {
        self.resource.get(&[payin_id], RequestOptions::new()).await
    }

    /// Refunds a pay-in, fully or partially.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn refund<R, B>(&self, payin_id: &str, refund: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&[payin_id, "refund"], refund).await
    }

    /// Creates a recurring pay-in registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_recurring_payment<R, B>(&self, registration: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["createRecurringPayment"], registration).await
    }

    /// Fetches a recurring pay-in registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn view_recurring_payment<R: DeserializeOwned>(
        &self,
        registration_id: &str,
    ) -> Result<R> {
        self.resource
            .get(
                &["viewRecurringPayment", registration_id],
                RequestOptions::new(),
            )
            .await
    }

    /// Creates the first, customer-initiated pay-in of a registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_recurring_cit<R, B>(&self, payin: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["createRecurringPayInRegistrationCIT"], payin)
            .await
    }

    /// Creates a subsequent, merchant-initiated pay-in of a registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_recurring_mit<R, B>(&self, payin: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["createRecurringPayInRegistrationMIT"], payin)
            .await
    }

    /// Updates a recurring pay-in registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update_recurring_payment<R, B>(
        &self,
        registration_id: &str,
        changes: &B,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .put(&["updateRecurringPayin", registration_id], changes)
            .await
    }

    /// Ends a recurring pay-in registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn end_recurring_payment<R: DeserializeOwned>(
        &self,
        registration_id: &str,
    ) -> Result<R> {
        self.update_recurring_payment(registration_id, &json!({ "Status": "ENDED" }))
            .await
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
