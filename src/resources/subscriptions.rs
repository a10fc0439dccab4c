//! Recurring subscriptions managed by the FAM backend.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::{NO_BODY, RequestOptions};
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Subscription endpoints under `/api/v1/mangopay/recurring-subscriptions`.
    Subscriptions => "/api/v1/mangopay/recurring-subscriptions"
}

impl<T: Transport, S: Sleeper> Subscriptions<T, S> {
    /// Registers a subscription on top of a recurring pay-in registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn register<R, B>(&self, subscription: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[], Some(subscription), RequestOptions::new())
            .await
    }

    /// Fetches a subscription.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, subscription_id: &str) -> Result<R> {
        self.resource
            .get(&[subscription_id], RequestOptions::new())
            .await
    }

    /// Lists subscriptions; filters and pagination travel in `options`.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.resource.get(&[], options).await
    }

    /// Updates a subscription.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update<R, B>(&self, subscription_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&[subscription_id], changes).await
    }

    /// Re-reads the subscription state from the payment provider.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn sync<R: DeserializeOwned>(&self, subscription_id: &str) -> Result<R> {
        self.action(subscription_id, "sync").await
    }

    /// Cancels a subscription at the end of its current period.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn cancel<R: DeserializeOwned>(&self, subscription_id: &str) -> Result<R> {
        self.action(subscription_id, "cancel").await
    }

    /// Ends a subscription immediately.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn end<R: DeserializeOwned>(&self, subscription_id: &str) -> Result<R> {
        self.action(subscription_id, "end").await
    }

    /// Resumes scheduled payment processing.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn enable<R: DeserializeOwned>(&self, subscription_id: &str) -> Result<R> {
        self.update(subscription_id, &json!({ "processingEnabled": true }))
            .await
    }

    /// Pauses scheduled payment processing.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn disable<R: DeserializeOwned>(&self, subscription_id: &str) -> Result<R> {
        self.update(subscription_id, &json!({ "processingEnabled": false }))
            .await
    }

    /// Turns on webhook notifications for the subscription.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn enable_webhooks<R: DeserializeOwned>(&self, subscription_id: &str) -> Result<R> {
        self.update(subscription_id, &json!({ "webhookNotificationEnabled": true }))
            .await
    }

    /// Turns off webhook notifications for the subscription.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn disable_webhooks<R: DeserializeOwned>(&self, subscription_id: &str) -> Result<R> {
        self.update(subscription_id, &json!({ "webhookNotificationEnabled": false }))
            .await
    }

    /// Lists the subscriptions of one MangoPay user.
    ///
    /// An empty `subscription_type` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list_by_mangopay_user<R: DeserializeOwned>(
        &self,
        mangopay_user_id: &str,
        subscription_type: Option<&str>,
        active_only: Option<bool>,
    ) -> Result<R> {
        let mut options = RequestOptions::new();
        if let Some(kind) = subscription_type.filter(|kind| !kind.is_empty()) {
            options = options.with_param("subscriptionType", kind);
        }
        if let Some(active_only) = active_only {
            options = options.with_param("activeOnly", active_only);
        }

        self.resource.get(&["user", mangopay_user_id], options).await
    }

    /// Updates the subscription attached to a recurring registration.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update_by_registration_id<R, B>(
        &self,
        registration_id: &str,
        changes: &B,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .put(&["by-registration", registration_id], changes)
            .await
    }

    /// Attaches catalogue products to a subscription.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn link_products<R, B>(&self, subscription_id: &str, products: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(
                &[subscription_id, "link-products"],
                Some(products),
                RequestOptions::new(),
            )
            .await
    }

    async fn action<R: DeserializeOwned>(&self, subscription_id: &str, action: &str) -> Result<R> {
        self.resource
            .post(&[subscription_id, action], NO_BODY, RequestOptions::new())
            .await
    }
}
