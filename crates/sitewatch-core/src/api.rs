// ── Backend seam ──
//
// `WebsiteApi` is the only way the monitor controllers and the dashboard
// talk to the backend. `GraphqlClient` is the production implementation;
// tests substitute a scripted in-memory fake.

use std::future::Future;

use sitewatch_api::{CreateWebsiteVars, GraphqlClient};

use crate::error::CoreError;
use crate::model::{NewWebsite, Report, StatusSample, Website, WebsiteId};

/// The seven remote operations plus the liveness ping.
pub trait WebsiteApi: Send + Sync + 'static {
    /// Plain GET against the service root; any HTTP answer means awake.
    fn ping(&self) -> impl Future<Output = Result<u16, CoreError>> + Send;

    fn list_websites(&self) -> impl Future<Output = Result<Vec<Website>, CoreError>> + Send;

    fn check_status(
        &self,
        id: &WebsiteId,
    ) -> impl Future<Output = Result<StatusSample, CoreError>> + Send;

    fn create_website(
        &self,
        website: &NewWebsite,
    ) -> impl Future<Output = Result<Website, CoreError>> + Send;

    /// The server's verdict; `false` means nothing was deleted.
    fn delete_website(&self, id: &WebsiteId)
    -> impl Future<Output = Result<bool, CoreError>> + Send;

    /// The immediate check the server ran, if any.
    fn start_monitoring(
        &self,
        id: &WebsiteId,
    ) -> impl Future<Output = Result<Option<StatusSample>, CoreError>> + Send;

    fn stop_monitoring(
        &self,
        id: &WebsiteId,
    ) -> impl Future<Output = Result<Website, CoreError>> + Send;

    fn get_report(&self, id: &WebsiteId) -> impl Future<Output = Result<Report, CoreError>> + Send;
}

impl WebsiteApi for GraphqlClient {
    async fn ping(&self) -> Result<u16, CoreError> {
        Ok(GraphqlClient::ping(self).await?)
    }

    async fn list_websites(&self) -> Result<Vec<Website>, CoreError> {
        let nodes = self.get_websites().await?;
        Ok(nodes.into_iter().map(Website::from).collect())
    }

    async fn check_status(&self, id: &WebsiteId) -> Result<StatusSample, CoreError> {
        Ok(GraphqlClient::check_status(self, id.as_str()).await?.into())
    }

    async fn create_website(&self, website: &NewWebsite) -> Result<Website, CoreError> {
        let vars = CreateWebsiteVars {
            url: &website.url,
            email: website.email.as_deref(),
            title: website.title.as_deref(),
        };
        Ok(GraphqlClient::create_website(self, &vars).await?.into())
    }

    async fn delete_website(&self, id: &WebsiteId) -> Result<bool, CoreError> {
        Ok(GraphqlClient::delete_website(self, id.as_str()).await?)
    }

    async fn start_monitoring(&self, id: &WebsiteId) -> Result<Option<StatusSample>, CoreError> {
        let check = GraphqlClient::start_monitoring(self, id.as_str()).await?;
        Ok(check.map(StatusSample::from))
    }

    async fn stop_monitoring(&self, id: &WebsiteId) -> Result<Website, CoreError> {
        Ok(GraphqlClient::stop_monitoring(self, id.as_str()).await?.into())
    }

    async fn get_report(&self, id: &WebsiteId) -> Result<Report, CoreError> {
        Ok(GraphqlClient::get_report(self, id.as_str()).await?.into())
    }
}
