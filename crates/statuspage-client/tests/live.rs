//! Integration suite against the real StatusPage.io API
//!
//! Every test is ignored by default. Run with
//! `cargo test -p statuspage-client --test live -- --ignored` after exporting:
//!
//! - `STATUSPAGE_API_KEY`
//! - `STATUSPAGE_PAGE_ID`
//! - `STATUSPAGE_TEST_EMAIL`, `STATUSPAGE_TEST_PHONE`,
//!   `STATUSPAGE_TEST_COUNTRY` (subscriber tests only)
//! - `STATUSPAGE_EXPECTED_PROVIDERS` (optional, defaults to 5)
//!
//! Tests skip themselves when the credentials are missing. The service does
//! not promise read-after-write consistency, so list checks poll for a
//! bounded time instead of asserting immediately.

use std::future::Future;
use std::time::Duration;

use statuspage_api::{Component, ComponentStatus, IncidentStatus};
use statuspage_client::{ClientConfig, StatusPageClient};

struct Fixture {
    client: StatusPageClient,
    page_id: String,
}

fn fixture() -> Option<Fixture> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let (Ok(api_key), Ok(page_id)) = (
        std::env::var("STATUSPAGE_API_KEY"),
        std::env::var("STATUSPAGE_PAGE_ID"),
    ) else {
        eprintln!("STATUSPAGE_API_KEY / STATUSPAGE_PAGE_ID not set, skipping");
        return None;
    };

    let client = StatusPageClient::new(ClientConfig::new(api_key)).ok()?;
    Some(Fixture { client, page_id })
}

/// Poll `check` until it returns true, for at most ~10 seconds
async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..10 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    false
}

fn count_named(components: &[Component], name: &str) -> usize {
    components.iter().filter(|c| c.name == name).count()
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn get_page_returns_valid_page() {
    let Some(fx) = fixture() else { return };

    let page = fx.client.get_page_profile(&fx.page_id).await.unwrap();

    assert_eq!(page.id, fx.page_id);
    assert!(!page.name.is_empty());
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn update_page_returns_updated_page() {
    let Some(fx) = fixture() else { return };

    let mut page = fx.client.get_page_profile(&fx.page_id).await.unwrap();
    let original_name = page.name.clone();

    page.name = format!("{original_name} - test");
    let mut updated = fx.client.update_page_profile(&page).await.unwrap();
    assert_eq!(updated.name, format!("{original_name} - test"));

    updated.name = original_name.clone();
    let restored = fx.client.update_page_profile(&updated).await.unwrap();
    assert_eq!(restored.name, original_name);
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn get_components_returns_at_least_one() {
    let Some(fx) = fixture() else { return };

    let components = fx.client.get_components(&fx.page_id).await.unwrap();
    assert!(!components.is_empty());
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn update_component_returns_updated_component() {
    let Some(fx) = fixture() else { return };

    let components = fx.client.get_components(&fx.page_id).await.unwrap();
    let mut component = components
        .into_iter()
        .find(|c| !c.group)
        .expect("page has no components");
    let original_name = component.name.clone();
    let original_status = component.status;

    component.name = format!("{original_name} - Test");
    component.status = ComponentStatus::PartialOutage;
    let mut updated = fx
        .client
        .update_component(&fx.page_id, &component)
        .await
        .unwrap();
    assert_eq!(updated.name, format!("{original_name} - Test"));
    assert_eq!(updated.status, ComponentStatus::PartialOutage);

    let refetched = fx
        .client
        .get_component(&fx.page_id, &updated.id)
        .await
        .unwrap();
    assert_eq!(refetched.name, updated.name);
    assert_eq!(refetched.status, ComponentStatus::PartialOutage);

    updated.name = original_name;
    updated.status = original_status;
    fx.client
        .update_component(&fx.page_id, &updated)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn create_component_appears_once_then_disappears() {
    let Some(fx) = fixture() else { return };
    let name = format!("UnitTest{}", uuid::Uuid::new_v4());

    let existing = fx.client.get_components(&fx.page_id).await.unwrap();
    assert_eq!(count_named(&existing, &name), 0);

    let component = fx
        .client
        .create_component(&fx.page_id, &name)
        .await
        .unwrap();
    assert_eq!(component.name, name);

    let (client, page_id, name_ref) = (&fx.client, fx.page_id.as_str(), name.as_str());
    let visible = eventually(move || async move {
        let components = client.get_components(page_id).await.unwrap();
        count_named(&components, name_ref) == 1
    })
    .await;
    assert!(visible, "created component never showed up exactly once");

    fx.client
        .delete_component(&fx.page_id, &component.id)
        .await
        .unwrap();

    let gone = eventually(move || async move {
        let components = client.get_components(page_id).await.unwrap();
        count_named(&components, name_ref) == 0
    })
    .await;
    assert!(gone, "deleted component is still listed");

    let err = fx
        .client
        .delete_component(&fx.page_id, &component.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn get_all_incidents_returns_at_least_one() {
    let Some(fx) = fixture() else { return };

    let incidents = fx.client.get_all_incidents(&fx.page_id).await.unwrap();
    assert!(!incidents.is_empty());
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn unresolved_incidents_are_not_resolved() {
    let Some(fx) = fixture() else { return };

    let incidents = fx
        .client
        .get_unresolved_incidents(&fx.page_id)
        .await
        .unwrap();
    assert!(incidents.iter().all(|i| i.status != IncidentStatus::Resolved));
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn scheduled_incidents_are_scheduled() {
    let Some(fx) = fixture() else { return };

    let incidents = fx
        .client
        .get_scheduled_incidents(&fx.page_id)
        .await
        .unwrap();
    assert!(incidents.iter().all(|i| i.status == IncidentStatus::Scheduled));
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn create_realtime_incident_then_delete() {
    let Some(fx) = fixture() else { return };

    let incident = fx
        .client
        .create_realtime_incident(&fx.page_id, "Test Incident")
        .await
        .unwrap();
    assert_eq!(incident.name, "Test Incident");

    fx.client
        .delete_incident(&fx.page_id, &incident.id)
        .await
        .unwrap();

    let (client, page_id, incident_id) = (&fx.client, fx.page_id.as_str(), incident.id.as_str());
    let gone = eventually(move || async move {
        let incidents = client.get_all_incidents(page_id).await.unwrap();
        incidents.iter().all(|i| i.id != incident_id)
    })
    .await;
    assert!(gone, "deleted incident is still listed");
}

#[tokio::test]
#[ignore = "trial pages cannot add subscribers who are not team members"]
async fn get_subscribers_returns_at_least_one() {
    let Some(fx) = fixture() else { return };
    let Ok(email) = std::env::var("STATUSPAGE_TEST_EMAIL") else {
        return;
    };

    let subscriber = fx
        .client
        .create_email_subscriber(&fx.page_id, &email)
        .await
        .unwrap();

    let subscribers = fx.client.get_subscribers(&fx.page_id).await.unwrap();
    assert!(!subscribers.is_empty());

    fx.client
        .delete_subscriber(&fx.page_id, &subscriber.id)
        .await
        .unwrap();
}

// Sends a real email and SMS
#[tokio::test]
#[ignore = "trial pages cannot add subscribers who are not team members"]
async fn create_subscribers() {
    let Some(fx) = fixture() else { return };
    let (Ok(email), Ok(phone), Ok(country)) = (
        std::env::var("STATUSPAGE_TEST_EMAIL"),
        std::env::var("STATUSPAGE_TEST_PHONE"),
        std::env::var("STATUSPAGE_TEST_COUNTRY"),
    ) else {
        return;
    };

    let by_email = fx
        .client
        .create_email_subscriber(&fx.page_id, &email)
        .await
        .unwrap();
    let by_phone = fx
        .client
        .create_phone_subscriber(&fx.page_id, &phone, &country)
        .await
        .unwrap();

    fx.client
        .delete_subscriber(&fx.page_id, &by_email.id)
        .await
        .unwrap();
    fx.client
        .delete_subscriber(&fx.page_id, &by_phone.id)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn metric_providers_match_account_tier() {
    let Some(fx) = fixture() else { return };
    let expected: usize = std::env::var("STATUSPAGE_EXPECTED_PROVIDERS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);

    let providers = fx.client.get_metric_providers().await.unwrap();
    assert_eq!(providers.len(), expected);
}

#[tokio::test]
#[ignore = "hits the live StatusPage.io API"]
async fn metric_providers_for_page() {
    let Some(fx) = fixture() else { return };

    let providers = fx
        .client
        .get_metric_providers_for_page(&fx.page_id)
        .await
        .unwrap();
    assert!(!providers.is_empty());
}
