//! Typed facades over the FAM API.
//!
//! Each facade binds the shared [`HttpClient`](crate::client::HttpClient) to
//! one base path and names the endpoints below it. Methods are generic over
//! the response type; pass `serde_json::Value` when no typed model is at
//! hand:
//!
//! ```no_run
//! # async fn example(fam: fam_sdk::Fam) -> fam_sdk::Result<()> {
//! use serde_json::Value;
//!
//! let wallet: Value = fam.wallets().get("w_123").await?;
//! # Ok(())
//! # }
//! ```

/// Declares a facade struct wrapping a [`Resource`] bound to `$base`.
macro_rules! facade {
    ($(#[$meta:meta])* $name:ident => $base:literal) => {
        $(#[$meta])*
        pub struct $name<
            T = $crate::transport::ReqwestTransport,
            S = $crate::time::TokioSleeper,
        > {
            resource: $crate::resources::Resource<T, S>,
        }

        impl<T, S> $name<T, S> {
            /// Base path of every endpoint of this facade.
            pub const BASE_PATH: &'static str = $base;

            /// Binds the facade to a shared client.
            #[must_use]
            pub const fn new(client: $crate::client::HttpClient<T, S>) -> Self {
                Self {
                    resource: $crate::resources::Resource::new(client, $base),
                }
            }

            /// The underlying resource.
            #[must_use]
            pub const fn resource(&self) -> &$crate::resources::Resource<T, S> {
                &self.resource
            }
        }

        impl<T, S> Clone for $name<T, S> {
            fn clone(&self) -> Self {
                Self {
                    resource: self.resource.clone(),
                }
            }
        }

        impl<T, S> ::std::fmt::Debug for $name<T, S> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("base_path", &$base)
                    .finish_non_exhaustive()
            }
        }
    };
}

/// Declares a facade over a collection owned by one MangoPay user, found at
/// `/api/v1/mangopay/users/{user_id}/$segment...`.
macro_rules! user_facade {
    ($(#[$meta:meta])* $name:ident => [$($segment:literal),+]) => {
        $(#[$meta])*
        pub struct $name<
            T = $crate::transport::ReqwestTransport,
            S = $crate::time::TokioSleeper,
        > {
            resource: $crate::resources::Resource<T, S>,
        }

        impl<T, S> $name<T, S> {
            /// Binds the facade to a shared client and to `user_id`'s collection.
            #[must_use]
            pub fn new(client: $crate::client::HttpClient<T, S>, user_id: &str) -> Self {
                Self {
                    resource: $crate::resources::Resource::nested(
                        client,
                        $crate::resources::USERS_PATH,
                        &[user_id, $($segment),+],
                    ),
                }
            }

            /// The underlying resource.
            #[must_use]
            pub const fn resource(&self) -> &$crate::resources::Resource<T, S> {
                &self.resource
            }
        }

        impl<T, S> Clone for $name<T, S> {
            fn clone(&self) -> Self {
                Self {
                    resource: self.resource.clone(),
                }
            }
        }

        impl<T, S> ::std::fmt::Debug for $name<T, S> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("base_path", &self.resource.base_path())
                    .finish_non_exhaustive()
            }
        }
    };
}

/// Base path of the MangoPay users collection.
pub(crate) const USERS_PATH: &str = "/api/v1/mangopay/users";

mod bank_accounts;
mod base;
mod bundles;
mod cards;
mod kyc;
mod payins;
mod payouts;
mod portal;
mod products;
mod promotions;
mod recipients;
mod subscriptions;
mod transfers;
mod ubo;
mod users;
mod wallets;

#[cfg(test)]
mod mod_tests;

pub use bank_accounts::BankAccounts;
pub use base::{Pagination, Resource, SortOrder};
pub use bundles::{BillingPeriod, Bundles};
pub use cards::{CardRegistrations, Cards, Preauthorizations};
pub use kyc::Kyc;
pub use payins::Payins;
pub use payouts::Payouts;
pub use portal::{PORTAL_SESSION_HEADER, Portal};
pub use products::Products;
pub use promotions::Promotions;
pub use recipients::ScaRecipients;
pub use subscriptions::Subscriptions;
pub use transfers::Transfers;
pub use ubo::Ubo;
pub use users::Users;
pub use wallets::Wallets;
