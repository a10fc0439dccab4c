//! Subscription bundles: several subscriptions billed together.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Bundle endpoints under `/api/v1/mangopay/bundles`.
    Bundles => "/api/v1/mangopay/bundles"
}

/// Billing cadence used when pricing a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    /// Billed every month.
    Monthly,
    /// Billed every year.
    Yearly,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Selection<'a> {
    subscription_ids: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    mangopay_user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing_period: Option<BillingPeriod>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MembershipChange<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    add_subscription_ids: Option<&'a [&'a str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remove_subscription_ids: Option<&'a [&'a str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
}

impl<T: Transport, S: Sleeper> Bundles<T, S> {
    /// Lists bundles; filters and pagination travel in `options`.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.resource.get(&[], options).await
    }

    /// Fetches a bundle.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, bundle_id: &str) -> Result<R> {
        self.resource.get(&[bundle_id], RequestOptions::new()).await
    }

    /// Fetches a bundle by its public code.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_by_code<R: DeserializeOwned>(&self, code: &str) -> Result<R> {
        self.resource
            .get(&["code", code], RequestOptions::new())
            .await
    }

    /// Checks that the subscriptions can be bundled for the user.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn validate<R: DeserializeOwned>(
        &self,
        subscription_ids: &[&str],
        mangopay_user_id: &str,
    ) -> Result<R> {
        let selection = Selection {
            subscription_ids,
            mangopay_user_id: Some(mangopay_user_id),
            billing_period: None,
        };
        self.post(&["validate"], &selection).await
    }

    /// Quotes the bundled price of the subscriptions.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn price<R: DeserializeOwned>(
        &self,
        subscription_ids: &[&str],
        mangopay_user_id: Option<&str>,
        billing_period: Option<BillingPeriod>,
    ) -> Result<R> {
        let selection = Selection {
            subscription_ids,
            mangopay_user_id,
            billing_period,
        };
        self.post(&["price"], &selection).await
    }

    /// Creates a bundle from existing subscriptions.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_from_subscriptions<R, B>(&self, bundle: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&[], bundle).await
    }

    /// Subscribes a user to a bundle offer.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn subscribe<R, B>(&self, subscription: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["subscribe"], subscription).await
    }

    /// Updates a bundle.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update<R, B>(&self, bundle_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&[bundle_id], changes).await
    }

    /// Adds subscriptions to a bundle, optionally repricing it.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn add_subscriptions<R: DeserializeOwned>(
        &self,
        bundle_id: &str,
        subscription_ids: &[&str],
        amount: Option<i64>,
    ) -> Result<R> {
        let change = MembershipChange {
            add_subscription_ids: Some(subscription_ids),
            remove_subscription_ids: None,
            amount,
        };
        self.update(bundle_id, &change).await
    }

    /// Removes subscriptions from a bundle, optionally repricing it.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn remove_subscriptions<R: DeserializeOwned>(
        &self,
        bundle_id: &str,
        subscription_ids: &[&str],
        amount: Option<i64>,
    ) -> Result<R> {
        let change = MembershipChange {
            add_subscription_ids: None,
            remove_subscription_ids: Some(subscription_ids),
            amount,
        };
        self.update(bundle_id, &change).await
    }

    /// Dissolves a bundle; its subscriptions continue on their own.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn dissolve<R: DeserializeOwned>(&self, bundle_id: &str) -> Result<R> {
        self.resource.delete(&[bundle_id]).await
    }

    /// Lists the bundles of one MangoPay user.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list_by_mangopay_user<R: DeserializeOwned>(
        &self,
        mangopay_user_id: &str,
    ) -> Result<R> {
        self.list(RequestOptions::new().with_param("mangopayUserId", mangopay_user_id))
            .await
    }

    /// Makes a bundle offer available.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn activate<R: DeserializeOwned>(&self, bundle_id: &str) -> Result<R> {
        self.update(bundle_id, &json!({ "isActive": true })).await
    }

    /// Withdraws a bundle offer.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn deactivate<R: DeserializeOwned>(&self, bundle_id: &str) -> Result<R> {
        self.update(bundle_id, &json!({ "isActive": false })).await
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
