//! Resource records returned by the API
//!
//! Field sets follow the service's published schema. Anything the service may
//! omit or null out is an `Option`; unknown fields are ignored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{ComponentStatus, IncidentImpact, IncidentStatus};

/// A status page profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub page_description: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub branding: Option<String>,
    #[serde(default)]
    pub subdomain: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub support_url: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub hidden_from_search: Option<bool>,
    #[serde(default)]
    pub allow_page_subscribers: Option<bool>,
    #[serde(default)]
    pub allow_incident_subscribers: Option<bool>,
    #[serde(default)]
    pub allow_email_subscribers: Option<bool>,
    #[serde(default)]
    pub allow_sms_subscribers: Option<bool>,
    #[serde(default)]
    pub allow_rss_atom_feeds: Option<bool>,
    #[serde(default)]
    pub allow_webhook_subscribers: Option<bool>,
    #[serde(default)]
    pub notifications_from_email: Option<String>,
    #[serde(default)]
    pub notifications_email_footer: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub viewers_must_be_team_members: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A monitored sub-system of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: ComponentStatus,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    /// True when this component is a group of other components
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub showcase: Option<bool>,
    #[serde(default)]
    pub only_show_if_degraded: Option<bool>,
    #[serde(default)]
    pub automation_email: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A reported event affecting one or more components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub name: String,
    pub status: IncidentStatus,
    #[serde(default)]
    pub impact: Option<IncidentImpact>,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub shortlink: Option<String>,
    #[serde(default)]
    pub incident_updates: Vec<IncidentUpdate>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub monitoring_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry in an incident's update timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    pub id: String,
    pub status: IncidentStatus,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub incident_id: Option<String>,
    #[serde(default)]
    pub display_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A contact registered for notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    /// Delivery mode reported by the service (`email`, `sms`, `webhook`, ...)
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub phone_country: Option<String>,
    #[serde(default)]
    pub display_phone_number: Option<String>,
    #[serde(default)]
    pub skip_confirmation_notification: Option<bool>,
    #[serde(default)]
    pub quarantined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub purge_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Contact channel of a subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberContact<'a> {
    Email(&'a str),
    Phone { number: &'a str, country: &'a str },
    Webhook(&'a str),
}

impl Subscriber {
    /// The channel notifications are delivered on, if the service reported one
    #[must_use]
    pub fn contact(&self) -> Option<SubscriberContact<'_>> {
        if let Some(email) = self.email.as_deref() {
            return Some(SubscriberContact::Email(email));
        }
        if let Some(number) = self.phone_number.as_deref() {
            return Some(SubscriberContact::Phone {
                number,
                country: self.phone_country.as_deref().unwrap_or_default(),
            });
        }
        self.endpoint.as_deref().map(SubscriberContact::Webhook)
    }
}

/// A third-party metrics integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricProvider {
    pub id: String,
    /// Integration kind, e.g. `Pingdom`, `Datadog`, `NewRelic`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub metric_base_uri: Option<String>,
    #[serde(default)]
    pub last_revalidated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
