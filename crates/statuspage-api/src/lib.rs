//! statuspage-api: StatusPage.io wire models
//!
//! Typed records for the resources exposed by the StatusPage.io management
//! API, plus the request bodies the client sends. Everything here mirrors the
//! service's JSON schema; no validation happens on this side.

pub mod models;
pub mod requests;
pub mod status;

pub use models::{
    Component, Incident, IncidentUpdate, MetricProvider, Page, Subscriber, SubscriberContact,
};
pub use requests::{
    ComponentUpdate, Envelope, IncidentFilter, NewComponent, NewIncident, NewSubscriber, PageUpdate,
};
pub use status::{ComponentStatus, IncidentImpact, IncidentStatus};
