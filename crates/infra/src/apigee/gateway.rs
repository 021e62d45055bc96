//! Management API implementation of the core ports

use std::sync::Arc;

use apigate_core::{CredentialGateway, ProductCatalog};
use apigate_domain::{
    ApiGateError, App, ClientConfig, Credential, Developer, Product, RemoteOutcome, Result,
};
use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use super::client::ApiClient;
use super::models::{
    AddProductsRequest, ApigeeApp, ApigeeCredential, ApigeeDeveloper, ApigeeProduct,
    ApigeeProductList,
};
use super::{paths, translate};
use crate::auth::{AccessTokenProvider, MetadataTokenProvider, StaticTokenProvider};

/// Gateway over the management REST API
///
/// Built once from an immutable [`ClientConfig`]. When the configuration
/// names no organisation, it is looked up through the token provider on
/// first use and reused afterwards.
pub struct ApigeeGateway {
    client: ApiClient,
    auth: Arc<dyn AccessTokenProvider>,
    organization: OnceCell<String>,
}

impl ApigeeGateway {
    /// Create a gateway using `auth` for bearer tokens
    ///
    /// # Errors
    ///
    /// Returns `ApiGateError::Config` if the HTTP client cannot be built
    pub fn new(config: ClientConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let client = ApiClient::new(&config, auth.clone())?;

        let organization = match config.organization.filter(|org| !org.trim().is_empty()) {
            Some(org) => OnceCell::new_with(Some(org)),
            None => OnceCell::new(),
        };

        Ok(Self { client, auth, organization })
    }

    /// Create a gateway choosing the token provider from `config`: the
    /// configured token when present, the metadata server otherwise.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let auth: Arc<dyn AccessTokenProvider> = match config.token.as_deref() {
            Some(token) => Arc::new(StaticTokenProvider::new(token)?),
            None => Arc::new(MetadataTokenProvider::new()?),
        };
        Self::new(config, auth)
    }

    /// Organisation all requests are addressed to.
    ///
    /// # Errors
    ///
    /// Returns `ApiGateError::Config` if neither the configuration nor the
    /// token provider names one
    pub async fn organization(&self) -> Result<&str> {
        let org = self
            .organization
            .get_or_try_init(|| async {
                let project = self.auth.project_id().await?;
                let org = project.ok_or_else(|| {
                    ApiGateError::Config(
                        "no organization configured and none could be resolved".into(),
                    )
                })?;
                info!(organization = %org, "Resolved organization from token provider");
                Ok::<_, ApiGateError>(org)
            })
            .await?;
        Ok(org.as_str())
    }

    #[instrument(skip(self))]
    pub async fn get_developer(&self, email: &str) -> Result<Developer> {
        let org = self.organization().await?;
        let vendor: ApigeeDeveloper = self.client.get(&paths::developer(org, email)).await?;
        Ok(translate::developer_from_vendor(vendor))
    }

    #[instrument(skip(self))]
    pub async fn get_app(&self, owner: &str, app: &str) -> Result<App> {
        let org = self.organization().await?;
        let vendor: ApigeeApp = self.client.get(&paths::app(org, owner, app)).await?;
        Ok(translate::app_from_vendor(vendor))
    }
}

#[async_trait]
impl CredentialGateway for ApigeeGateway {
    #[instrument(skip(self))]
    async fn get_credential(&self, owner: &str, app: &str, key: &str) -> Result<Credential> {
        let org = self.organization().await?;
        let vendor: ApigeeCredential =
            self.client.get(&paths::credential(org, owner, app, key)).await?;
        Ok(translate::credential_from_vendor(vendor))
    }

    #[instrument(skip(self))]
    async fn remove_product(
        &self,
        owner: &str,
        app: &str,
        key: &str,
        product: &str,
    ) -> Result<()> {
        let org = self.organization().await?;
        self.client.delete(&paths::credential_product(org, owner, app, key, product)).await?;
        debug!("Product detached");
        Ok(())
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    async fn set_products(
        &self,
        owner: &str,
        app: &str,
        key: &str,
        products: &[String],
    ) -> Result<RemoteOutcome<Credential>> {
        let org = self.organization().await?;
        let body = AddProductsRequest { api_products: products };
        let outcome: RemoteOutcome<ApigeeCredential> =
            self.client.post(&paths::credential(org, owner, app, key), &body).await?;
        Ok(outcome.map(translate::credential_from_vendor))
    }
}

#[async_trait]
impl ProductCatalog for ApigeeGateway {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>> {
        let org = self.organization().await?;
        let list: ApigeeProductList = self.client.get(&paths::products(org)).await?;
        debug!(count = list.api_product.len(), "Fetched product catalog");
        Ok(list.api_product.into_iter().map(translate::product_from_vendor).collect())
    }

    #[instrument(skip(self))]
    async fn get_product(&self, name: &str) -> Result<Product> {
        let org = self.organization().await?;
        let vendor: ApigeeProduct = self.client.get(&paths::product(org, name)).await?;
        Ok(translate::product_from_vendor(vendor))
    }
}
