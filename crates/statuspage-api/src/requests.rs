//! Request bodies for the API
//!
//! The service expects every write to be wrapped in an envelope named after
//! the resource (`{"component": {...}}`); [`Envelope`] takes care of that.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::{Component, Page};
use crate::status::{ComponentStatus, IncidentImpact, IncidentStatus};

/// Wraps a request body in its resource envelope
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a, T> {
    resource: &'static str,
    body: &'a T,
}

impl<'a> Envelope<'a, PageUpdate> {
    #[must_use]
    pub fn page(body: &'a PageUpdate) -> Self {
        Self { resource: "page", body }
    }
}

impl<'a> Envelope<'a, ComponentUpdate> {
    #[must_use]
    pub fn component(body: &'a ComponentUpdate) -> Self {
        Self { resource: "component", body }
    }
}

impl<'a> Envelope<'a, NewComponent> {
    #[must_use]
    pub fn new_component(body: &'a NewComponent) -> Self {
        Self { resource: "component", body }
    }
}

impl<'a> Envelope<'a, NewIncident> {
    #[must_use]
    pub fn incident(body: &'a NewIncident) -> Self {
        Self { resource: "incident", body }
    }
}

impl<'a> Envelope<'a, NewSubscriber> {
    #[must_use]
    pub fn subscriber(body: &'a NewSubscriber) -> Self {
        Self { resource: "subscriber", body }
    }
}

impl<T: Serialize> Serialize for Envelope<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.resource, self.body)?;
        map.end()
    }
}

/// Editable page profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_from_search: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_page_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_incident_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_email_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sms_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rss_atom_feeds: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_webhook_subscribers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_email_footer: Option<String>,
}

impl From<&Page> for PageUpdate {
    fn from(page: &Page) -> Self {
        Self {
            name: Some(page.name.clone()),
            page_description: page.page_description.clone(),
            headline: page.headline.clone(),
            branding: page.branding.clone(),
            subdomain: page.subdomain.clone(),
            domain: page.domain.clone(),
            url: page.url.clone(),
            support_url: page.support_url.clone(),
            time_zone: page.time_zone.clone(),
            hidden_from_search: page.hidden_from_search,
            allow_page_subscribers: page.allow_page_subscribers,
            allow_incident_subscribers: page.allow_incident_subscribers,
            allow_email_subscribers: page.allow_email_subscribers,
            allow_sms_subscribers: page.allow_sms_subscribers,
            allow_rss_atom_feeds: page.allow_rss_atom_feeds,
            allow_webhook_subscribers: page.allow_webhook_subscribers,
            notifications_from_email: page.notifications_from_email.clone(),
            notifications_email_footer: page.notifications_email_footer.clone(),
        }
    }
}

/// Fields for creating a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComponent {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showcase: Option<bool>,
}

impl NewComponent {
    /// A component with only a name; the service fills in the rest
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            status: None,
            group_id: None,
            showcase: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ComponentStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Editable component fields
///
/// `status` is left out of the body when it is not a status the service
/// accepts, so an unrecognized state is never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComponentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showcase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_show_if_degraded: Option<bool>,
}

impl From<&Component> for ComponentUpdate {
    fn from(component: &Component) -> Self {
        Self {
            name: component.name.clone(),
            status: Some(component.status).filter(|s| *s != ComponentStatus::Unknown),
            description: component.description.clone(),
            group_id: component.group_id.clone(),
            showcase: component.showcase,
            only_show_if_degraded: component.only_show_if_degraded,
        }
    }
}

/// Fields for opening an incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncident {
    pub name: String,
    pub status: IncidentStatus,
    /// First update message shown on the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_override: Option<IncidentImpact>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub component_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_notifications: Option<bool>,
}

impl NewIncident {
    /// A realtime incident that starts out as `investigating`
    pub fn realtime(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: IncidentStatus::Investigating,
            body: None,
            impact_override: None,
            component_ids: Vec::new(),
            deliver_notifications: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_impact(mut self, impact: IncidentImpact) -> Self {
        self.impact_override = Some(impact);
        self
    }

    /// Attach an affected component (repeatable)
    #[must_use]
    pub fn with_component(mut self, component_id: impl Into<String>) -> Self {
        self.component_ids.push(component_id.into());
        self
    }

    #[must_use]
    pub fn deliver_notifications(mut self, deliver: bool) -> Self {
        self.deliver_notifications = Some(deliver);
        self
    }
}

/// Fields for registering a subscriber
///
/// Exactly one channel is set; use [`NewSubscriber::email`] or
/// [`NewSubscriber::phone`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubscriber {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_confirmation_notification: Option<bool>,
}

impl NewSubscriber {
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone_number: None,
            phone_country: None,
            skip_confirmation_notification: None,
        }
    }

    /// SMS subscriber; `country` is the ISO 3166-1 alpha-2 code
    pub fn phone(number: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            email: None,
            phone_number: Some(number.into()),
            phone_country: Some(country.into()),
            skip_confirmation_notification: None,
        }
    }

    #[must_use]
    pub fn skip_confirmation(mut self) -> Self {
        self.skip_confirmation_notification = Some(true);
        self
    }
}

/// Subset of a page's incidents to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncidentFilter {
    #[default]
    All,
    /// Everything not yet resolved
    Unresolved,
    /// Scheduled maintenances
    Scheduled,
    /// Scheduled maintenances that have not started
    Upcoming,
    /// Maintenances currently in progress
    ActiveMaintenance,
}

impl IncidentFilter {
    /// Path below `/pages/{page_id}/`
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::All => "incidents",
            Self::Unresolved => "incidents/unresolved",
            Self::Scheduled => "incidents/scheduled",
            Self::Upcoming => "incidents/upcoming",
            Self::ActiveMaintenance => "incidents/active_maintenance",
        }
    }
}

impl std::str::FromStr for IncidentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "all" => Ok(Self::All),
            "unresolved" => Ok(Self::Unresolved),
            "scheduled" => Ok(Self::Scheduled),
            "upcoming" => Ok(Self::Upcoming),
            "active_maintenance" | "active" => Ok(Self::ActiveMaintenance),
            other => Err(format!("unknown incident filter: {other}")),
        }
    }
}
