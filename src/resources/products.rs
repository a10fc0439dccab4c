//! Product catalogue.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::RequestOptions;
use crate::error::{ErrorKind, Result};
use crate::time::Sleeper;
use crate::transport::Transport;

facade! {
    /// Product endpoints under `/api/v1/mangopay/products`.
    Products => "/api/v1/mangopay/products"
}

impl<T: Transport, S: Sleeper> Products<T, S> {
    /// Lists products; filters and pagination travel in `options`.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn list<R: DeserializeOwned>(&self, options: RequestOptions) -> Result<R> {
        self.resource.get(&[], options).await
    }

    /// Fetches a product.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get<R: DeserializeOwned>(&self, product_id: &str) -> Result<R> {
        self.resource.get(&[product_id], RequestOptions::new()).await
    }

    /// Fetches a product by the caller's own identifier.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_by_external_id<R: DeserializeOwned>(&self, external_id: &str) -> Result<R> {
        self.resource
            .get(&["external", external_id], RequestOptions::new())
            .await
    }

    /// Fetches a product by name.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn get_by_name<R: DeserializeOwned>(&self, name: &str) -> Result<R> {
        self.resource
            .get(&["name", name], RequestOptions::new())
            .await
    }

    /// Like [`Products::get_by_external_id`], but `Ok(None)` when no such
    /// product exists.
    ///
    /// # Errors
    ///
    /// Every error except [`NotFound`](ErrorKind::NotFound) is returned.
    pub async fn find_by_external_id<R: DeserializeOwned>(
        &self,
        external_id: &str,
    ) -> Result<Option<R>> {
        found(self.get_by_external_id(external_id).await)
    }

    /// Like [`Products::get_by_name`], but `Ok(None)` when no such product
    /// exists.
    ///
    /// # Errors
    ///
    /// Every error except [`NotFound`](ErrorKind::NotFound) is returned.
    pub async fn find_by_name<R: DeserializeOwned>(&self, name: &str) -> Result<Option<R>> {
        found(self.get_by_name(name).await)
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn create<R, B>(&self, product: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource
            .post(&[], Some(product), RequestOptions::new())
            .await
    }

    /// Updates a product.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn update<R, B>(&self, product_id: &str, changes: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&[product_id], changes).await
    }

    /// Creates or replaces the product with this external identifier.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn upsert_by_external_id<R, B>(&self, external_id: &str, product: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&["external", external_id], product).await
    }

    /// Creates or replaces the product with this name.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn upsert_by_name<R, B>(&self, name: &str, product: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.resource.put(&["name", name], product).await
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn remove<R: DeserializeOwned>(&self, product_id: &str) -> Result<R> {
        self.resource.delete(&[product_id]).await
    }

    /// Makes a product available for new subscriptions.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn activate<R: DeserializeOwned>(&self, product_id: &str) -> Result<R> {
        self.update(product_id, &json!({ "isActive": true })).await
    }

    /// Withdraws a product from new subscriptions.
    ///
    /// # Errors
    ///
    /// Returns the request engine's [`Error`](crate::Error) on failure.
    pub async fn deactivate<R: DeserializeOwned>(&self, product_id: &str) -> Result<R> {
        self.update(product_id, &json!({ "isActive": false })).await
    }
}

fn found<R>(result: Result<R>) -> Result<Option<R>> {
    match result {
        Ok(product) => Ok(Some(product)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
