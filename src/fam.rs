//! The top-level client.

use std::fmt;

use crate::client::{ClientOptions, HttpClient};
use crate::resources::{
    BankAccounts, Bundles, CardRegistrations, Cards, Kyc, Payins, Payouts, Portal,
    Preauthorizations, Products, Promotions, ScaRecipients, Subscriptions, Transfers, Ubo, Users,
    Wallets,
};
use crate::time::TokioSleeper;
use crate::transport::ReqwestTransport;

/// Entry point of the SDK: one shared [`HttpClient`] behind every facade.
///
/// All facades share the client, so [`Fam::set_token`] takes effect for
/// every subsequent call, whichever facade issues it.
///
/// # Example
///
/// ```no_run
/// use fam_sdk::Fam;
/// use fam_sdk::client::ClientOptions;
///
/// # async fn example() -> fam_sdk::Result<()> {
/// let fam = Fam::new(ClientOptions::new("https://api.fam.example")?);
/// fam.set_token("jwt");
///
/// let user: serde_json::Value = fam.users().get("u_42").await?;
/// # Ok(())
/// # }
/// ```
pub struct Fam<T = ReqwestTransport, S = TokioSleeper> {
    client: HttpClient<T, S>,
    users: Users<T, S>,
    wallets: Wallets<T, S>,
    payins: Payins<T, S>,
    payouts: Payouts<T, S>,
    transfers: Transfers<T, S>,
    cards: Cards<T, S>,
    card_registrations: CardRegistrations<T, S>,
    preauthorizations: Preauthorizations<T, S>,
    subscriptions: Subscriptions<T, S>,
    bundles: Bundles<T, S>,
    products: Products<T, S>,
    promotions: Promotions<T, S>,
    portal: Portal<T, S>,
}

impl Fam {
    /// Creates a client backed by a default [`ReqwestTransport`].
    #[must_use]
    pub fn new(options: ClientOptions) -> Self {
        Self::from_client(HttpClient::new(options))
    }
}

impl<T, S> Fam<T, S> {
    /// Wraps an existing request engine.
    #[must_use]
    pub fn from_client(client: HttpClient<T, S>) -> Self {
        Self {
            users: Users::new(client.clone()),
            wallets: Wallets::new(client.clone()),
            payins: Payins::new(client.clone()),
            payouts: Payouts::new(client.clone()),
            transfers: Transfers::new(client.clone()),
            cards: Cards::new(client.clone()),
            card_registrations: CardRegistrations::new(client.clone()),
            preauthorizations: Preauthorizations::new(client.clone()),
            subscriptions: Subscriptions::new(client.clone()),
            bundles: Bundles::new(client.clone()),
            products: Products::new(client.clone()),
            promotions: Promotions::new(client.clone()),
            portal: Portal::new(client.clone()),
            client,
        }
    }

    /// The shared request engine, for endpoints without a facade.
    #[must_use]
    pub const fn client(&self) -> &HttpClient<T, S> {
        &self.client
    }

    /// Sets the bearer token for all later requests.
    pub fn set_token(&self, token: impl Into<String>) {
        self.client.set_token(token);
    }

    /// Removes the bearer token.
    pub fn clear_token(&self) {
        self.client.clear_token();
    }

    /// MangoPay users.
    #[must_use]
    pub const fn users(&self) -> &Users<T, S> {
        &self.users
    }

    /// MangoPay wallets.
    #[must_use]
    pub const fn wallets(&self) -> &Wallets<T, S> {
        &self.wallets
    }

    /// MangoPay pay-ins and recurring registrations.
    #[must_use]
    pub const fn payins(&self) -> &Payins<T, S> {
        &self.payins
    }

    /// MangoPay payouts.
    #[must_use]
    pub const fn payouts(&self) -> &Payouts<T, S> {
        &self.payouts
    }

    /// MangoPay transfers.
    #[must_use]
    pub const fn transfers(&self) -> &Transfers<T, S> {
        &self.transfers
    }

    /// MangoPay registered cards.
    #[must_use]
    pub const fn cards(&self) -> &Cards<T, S> {
        &self.cards
    }

    /// MangoPay card registrations.
    #[must_use]
    pub const fn card_registrations(&self) -> &CardRegistrations<T, S> {
        &self.card_registrations
    }

    /// MangoPay preauthorizations.
    #[must_use]
    pub const fn preauthorizations(&self) -> &Preauthorizations<T, S> {
        &self.preauthorizations
    }

    /// Bank accounts of one user.
    #[must_use]
    pub fn bank_accounts(&self, user_id: &str) -> BankAccounts<T, S> {
        BankAccounts::new(self.client.clone(), user_id)
    }

    /// KYC documents of one user.
    #[must_use]
    pub fn kyc(&self, user_id: &str) -> Kyc<T, S> {
        Kyc::new(self.client.clone(), user_id)
    }

    /// UBO declarations of one legal user.
    #[must_use]
    pub fn ubo(&self, user_id: &str) -> Ubo<T, S> {
        Ubo::new(self.client.clone(), user_id)
    }

    /// SCA payout recipients of one user.
    #[must_use]
    pub fn sca_recipients(&self, user_id: &str) -> ScaRecipients<T, S> {
        ScaRecipients::new(self.client.clone(), user_id)
    }

    /// Recurring subscriptions.
    #[must_use]
    pub const fn subscriptions(&self) -> &Subscriptions<T, S> {
        &self.subscriptions
    }

    /// Subscription bundles.
    #[must_use]
    pub const fn bundles(&self) -> &Bundles<T, S> {
        &self.bundles
    }

    /// Product catalogue.
    #[must_use]
    pub const fn products(&self) -> &Products<T, S> {
        &self.products
    }

    /// Coupons and promotion codes.
    #[must_use]
    pub const fn promotions(&self) -> &Promotions<T, S> {
        &self.promotions
    }

    /// Customer portal sessions.
    #[must_use]
    pub const fn portal(&self) -> &Portal<T, S> {
        &self.portal
    }
}

impl<T, S> Clone for Fam<T, S> {
    fn clone(&self) -> Self {
        Self::from_client(self.client.clone())
    }
}

impl<T, S> fmt::Debug for Fam<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fam").field("client", &self.client).finish_non_exhaustive()
    }
}

impl<T, S> From<HttpClient<T, S>> for Fam<T, S> {
    fn from(client: HttpClient<T, S>) -> Self {
        Self::from_client(client)
    }
}
