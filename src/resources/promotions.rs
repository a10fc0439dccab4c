//! Coupons and promotion codes.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::RequestOptions;
use crate::error::Result;
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Promotion endpoints under `/api/v1/promotions`.
    Promotions => "/api/v1/promotions"
}

impl<T: Transport, S: Sleeper> Promotions<T, S> {
    /// Creates a coupon.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_coupon<R, B>(&self, coupon: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["coupons"], coupon).await
    }

    /// Fetches a coupon.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_coupon<R: DeserializeOwned>(&self, coupon_id: &str) -> Result<R> {
        self.resource
            .get(&["coupons", coupon_id], RequestOptions::new())
            .await
    }

    /// Lists coupons; filters and pagination travel in `options`.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list_coupons<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.resource.get(&["coupons"], options).await
    }

    /// Updates a coupon.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update_coupon<R, B>(&self, coupon_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&["coupons", coupon_id], changes).await
    }

    /// Deletes a coupon.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn delete_coupon<R: DeserializeOwned>(&self, coupon_id: &str) -> Result<R> {
        self.resource.delete(&["coupons", coupon_id]).await
    }

    /// Redemption statistics across all coupons.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn coupon_stats<R: DeserializeOwned>(&self) -> Result<R> {
        self.resource
            .get(&["coupons", "stats"], RequestOptions::new())
            .await
    }

    /// Creates a promotion code for a coupon.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create_code<R, B>(&self, code: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["codes"], code).await
    }

    /// Fetches a promotion code by id.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_code<R: DeserializeOwned>(&self, code_id: &str) -> Result<R> {
        self.resource
            .get(&["codes", code_id], RequestOptions::new())
            .await
    }

    /// Lists promotion codes; filters and pagination travel in `options`.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list_codes<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.resource.get(&["codes"], options).await
    }

    /// Updates a promotion code.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update_code<R, B>(&self, code_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&["codes", code_id], changes).await
    }

    /// Deletes a promotion code.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn delete_code<R: DeserializeOwned>(&self, code_id: &str) -> Result<R> {
        self.resource.delete(&["codes", code_id]).await
    }

    /// Checks a code against a purchase and quotes the discount.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn validate_code<R, B>(&self, request: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["codes", "validate"], request).await
    }

    /// Generates a batch of codes for a coupon.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn generate_codes<R, B>(&self, request: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(&["codes", "generate"], request).await
    }

    /// Looks a promotion code up by its customer-facing text.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn find_by_code<R: DeserializeOwned>(&self, code: &str) -> Result<R> {
        self.resource
            .get(&["codes", "by-code", code], RequestOptions::new())
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
