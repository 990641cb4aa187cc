//! HTTP client for the StatusPage.io management API

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use statuspage_api::{
    Component, ComponentUpdate, Envelope, Incident, IncidentFilter, MetricProvider, NewComponent,
    NewIncident, NewSubscriber, Page, PageUpdate, Subscriber,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Client for the StatusPage.io management API
///
/// Holds only the API key (inside the underlying `reqwest::Client`) and the
/// base URL, so it is cheap to clone and safe to share between tasks. Every
/// method is a single request; dropping the returned future cancels it.
#[derive(Debug, Clone)]
pub struct StatusPageClient {
    client: Client,
    base_url: Url,
}

impl StatusPageClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the API key cannot be
    /// sent as a header.
    ///
    /// # Example
    /// ```no_run
    /// use statuspage_client::{ClientConfig, StatusPageClient};
    ///
    /// let client = StatusPageClient::new(ClientConfig::new("my-api-key"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.parsed_base_url()?;

        let mut auth = HeaderValue::from_str(&format!("OAuth {}", config.api_key))
            .map_err(|_| ClientError::Config("API key contains invalid characters".into()))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .https_only(config.https_only)
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Create a new client with a custom `reqwest::Client`
    ///
    /// The given client is used as-is, so it must already carry the
    /// `Authorization` header.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        let base_url = ClientConfig::new("")
            .with_base_url(base_url.as_ref())
            .allow_http()
            .parsed_base_url()?;
        Ok(Self { client, base_url })
    }

    /// Base URL all paths are resolved against
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL from a path relative to the base URL
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Send a request and decode a JSON response body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|source| {
            warn!(error = %source, "response did not match the expected schema");
            ClientError::Deserialization { source, body }
        })
    }

    /// Send a request and return the raw body of a successful response
    async fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "request failed");
            return Err(ClientError::from_response(status, body));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "request succeeded");
        Ok(body)
    }

    /// Perform a GET request and deserialize the response
    #[instrument(skip(self), level = "debug")]
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        self.send(self.client.get(url)).await
    }

    /// Perform a POST request with JSON body
    #[instrument(skip(self, body), level = "debug")]
    async fn post<T: DeserializeOwned>(&self, path: &str, body: impl Serialize) -> Result<T> {
        let url = self.url(path)?;
        self.send(self.client.post(url).json(&body)).await
    }

    /// Perform a PATCH request with JSON body
    #[instrument(skip(self, body), level = "debug")]
    async fn patch<T: DeserializeOwned>(&self, path: &str, body: impl Serialize) -> Result<T> {
        let url = self.url(path)?;
        self.send(self.client.patch(url).json(&body)).await
    }

    /// Perform a DELETE request, discarding whatever the service echoes back
    #[instrument(skip(self), level = "debug")]
    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path)?;
        self.execute(self.client.delete(url)).await.map(drop)
    }

    // Page endpoints

    /// Get a page profile
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    ///
    /// # Example
    /// ```no_run
    /// # use statuspage_client::{ClientConfig, StatusPageClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = StatusPageClient::new(ClientConfig::new("my-api-key"))?;
    /// let page = client.get_page_profile("kctbh9vrtdwd").await?;
    /// println!("{}", page.name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_page_profile(&self, page_id: &str) -> Result<Page> {
        self.get(&format!("pages/{}", segment(page_id)?)).await
    }

    /// Write back a page profile, usually one obtained from
    /// [`get_page_profile`](Self::get_page_profile) and then edited
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// update.
    ///
    /// # Example
    /// ```no_run
    /// # use statuspage_client::{ClientConfig, StatusPageClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = StatusPageClient::new(ClientConfig::new("my-api-key"))?;
    /// let mut page = client.get_page_profile("kctbh9vrtdwd").await?;
    /// page.name = "Acme Status".into();
    /// let page = client.update_page_profile(&page).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_page_profile(&self, page: &Page) -> Result<Page> {
        self.update_page(&page.id, &PageUpdate::from(page)).await
    }

    /// Apply a partial page update
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// update.
    pub async fn update_page(&self, page_id: &str, update: &PageUpdate) -> Result<Page> {
        self.patch(&format!("pages/{}", segment(page_id)?), Envelope::page(update))
            .await
    }

    // Component endpoints

    /// List the components of a page, in the order the service returns them
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn get_components(&self, page_id: &str) -> Result<Vec<Component>> {
        self.get(&format!("pages/{}/components", segment(page_id)?))
            .await
    }

    /// Get a single component
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn get_component(&self, page_id: &str, component_id: &str) -> Result<Component> {
        self.get(&format!(
            "pages/{}/components/{}",
            segment(page_id)?,
            segment(component_id)?
        ))
        .await
    }

    /// Create a component with just a name
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// component.
    ///
    /// # Example
    /// ```no_run
    /// # use statuspage_client::{ClientConfig, StatusPageClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = StatusPageClient::new(ClientConfig::new("my-api-key"))?;
    /// let component = client.create_component("kctbh9vrtdwd", "Database").await?;
    /// client.delete_component("kctbh9vrtdwd", &component.id).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_component(&self, page_id: &str, name: &str) -> Result<Component> {
        self.create_component_with(page_id, &NewComponent::new(name))
            .await
    }

    /// Create a component with the given fields
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// component.
    pub async fn create_component_with(
        &self,
        page_id: &str,
        component: &NewComponent,
    ) -> Result<Component> {
        self.post(
            &format!("pages/{}/components", segment(page_id)?),
            Envelope::new_component(component),
        )
        .await
    }

    /// Write back an edited component
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// update.
    ///
    /// # Example
    /// ```no_run
    /// # use statuspage_client::{ClientConfig, StatusPageClient};
    /// # use statuspage_api::ComponentStatus;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = StatusPageClient::new(ClientConfig::new("my-api-key"))?;
    /// let mut component = client.get_component("kctbh9vrtdwd", "b13yz5g2cw10").await?;
    /// component.status = ComponentStatus::PartialOutage;
    /// let component = client.update_component("kctbh9vrtdwd", &component).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_component(&self, page_id: &str, component: &Component) -> Result<Component> {
        self.patch(
            &format!(
                "pages/{}/components/{}",
                segment(page_id)?,
                segment(&component.id)?
            ),
            Envelope::component(&ComponentUpdate::from(component)),
        )
        .await
    }

    /// Delete a component
    ///
    /// Deleting an already deleted component fails with
    /// [`ClientError::NotFound`].
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn delete_component(&self, page_id: &str, component_id: &str) -> Result<()> {
        self.delete(&format!(
            "pages/{}/components/{}",
            segment(page_id)?,
            segment(component_id)?
        ))
        .await
    }

    // Incident endpoints

    /// List the incidents of a page matching a filter
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn list_incidents(
        &self,
        page_id: &str,
        filter: IncidentFilter,
    ) -> Result<Vec<Incident>> {
        self.get(&format!("pages/{}/{}", segment(page_id)?, filter.path()))
            .await
    }

    /// List every incident of a page
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn get_all_incidents(&self, page_id: &str) -> Result<Vec<Incident>> {
        self.list_incidents(page_id, IncidentFilter::All).await
    }

    /// List incidents that are not resolved yet
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn get_unresolved_incidents(&self, page_id: &str) -> Result<Vec<Incident>> {
        self.list_incidents(page_id, IncidentFilter::Unresolved)
            .await
    }

    /// List scheduled maintenances
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn get_scheduled_incidents(&self, page_id: &str) -> Result<Vec<Incident>> {
        self.list_incidents(page_id, IncidentFilter::Scheduled)
            .await
    }

    /// Open a realtime incident in the `investigating` state
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// incident.
    pub async fn create_realtime_incident(&self, page_id: &str, name: &str) -> Result<Incident> {
        self.create_incident(page_id, &NewIncident::realtime(name))
            .await
    }

    /// Open an incident with the given fields
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// incident.
    pub async fn create_incident(&self, page_id: &str, incident: &NewIncident) -> Result<Incident> {
        self.post(
            &format!("pages/{}/incidents", segment(page_id)?),
            Envelope::incident(incident),
        )
        .await
    }

    /// Delete an incident
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn delete_incident(&self, page_id: &str, incident_id: &str) -> Result<()> {
        self.delete(&format!(
            "pages/{}/incidents/{}",
            segment(page_id)?,
            segment(incident_id)?
        ))
        .await
    }

    // Subscriber endpoints

    /// List the subscribers of a page
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn get_subscribers(&self, page_id: &str) -> Result<Vec<Subscriber>> {
        self.get(&format!("pages/{}/subscribers", segment(page_id)?))
            .await
    }

    /// Subscribe an email address to a page
    ///
    /// The service sends a confirmation email unless told otherwise.
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// subscriber.
    pub async fn create_email_subscriber(&self, page_id: &str, email: &str) -> Result<Subscriber> {
        self.create_subscriber(page_id, &NewSubscriber::email(email))
            .await
    }

    /// Subscribe a phone number to a page for SMS notifications
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// subscriber.
    pub async fn create_phone_subscriber(
        &self,
        page_id: &str,
        phone_number: &str,
        phone_country: &str,
    ) -> Result<Subscriber> {
        self.create_subscriber(page_id, &NewSubscriber::phone(phone_number, phone_country))
            .await
    }

    /// Register a subscriber with the given fields
    ///
    /// # Errors
    /// Returns an error if the request fails or the service rejects the
    /// subscriber.
    pub async fn create_subscriber(
        &self,
        page_id: &str,
        subscriber: &NewSubscriber,
    ) -> Result<Subscriber> {
        self.post(
            &format!("pages/{}/subscribers", segment(page_id)?),
            Envelope::subscriber(subscriber),
        )
        .await
    }

    /// Unsubscribe a subscriber
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn delete_subscriber(&self, page_id: &str, subscriber_id: &str) -> Result<()> {
        self.delete(&format!(
            "pages/{}/subscribers/{}",
            segment(page_id)?,
            segment(subscriber_id)?
        ))
        .await
    }

    // Metrics provider endpoints

    /// List the metrics providers available to the account
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn get_metric_providers(&self) -> Result<Vec<MetricProvider>> {
        self.get("metrics_providers").await
    }

    /// List the metrics providers configured on a page
    ///
    /// # Errors
    /// Returns an error if the request fails or the service returns an error.
    pub async fn get_metric_providers_for_page(&self, page_id: &str) -> Result<Vec<MetricProvider>> {
        self.get(&format!("pages/{}/metrics_providers", segment(page_id)?))
            .await
    }
}

/// Check that an identifier can be spliced into a path as one segment
///
/// `Url::join` resolves dot segments and reads `\` as `/`, so those are
/// rejected along with anything that would end or escape the path.
fn segment(id: &str) -> Result<&str> {
    if id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '?', '#', '%'])
        || id.chars().any(char::is_control)
        || id.trim() != id
    {
        return Err(ClientError::InvalidId(id.to_string()));
    }
    Ok(id)
}
