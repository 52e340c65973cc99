//! Loader state-machine properties: dedup, waiter fan-out, idempotent
//! remount, teardown suppression and failure isolation.

#![cfg(test)]

use crate::support::{settle, Fixture, RecordingCapability};
use shared_types::{GuestDescriptor, GuestId, LoadState, Locator, ResolveError, ResourceKey};

fn descriptor(id: &str) -> GuestDescriptor {
    GuestDescriptor::new(id, format!("http://localhost:8002/{id}/index.js"))
}

#[tokio::test]
async fn duplicate_requests_share_one_injection() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    fixture.resolver.hold(&descriptor.main_resource);

    let first = fixture.container("first_root");
    let second = fixture.container("second_root");
    let _h1 = fixture.loader.request_mount(&descriptor, first);
    let _h2 = fixture.loader.request_mount(&descriptor, second);
    settle().await;

    assert_eq!(fixture.resolver.fetch_count(&descriptor.main_resource), 1);
    assert_eq!(fixture.page.resource_count(), 1);
    assert!(fixture
        .page
        .has_resource(&ResourceKey::main(&descriptor.id)));
    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Pending);
}

#[tokio::test]
async fn waiter_fanout_serves_every_requester() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    let capability = RecordingCapability::new();
    fixture.resolver.hold(&descriptor.main_resource);
    fixture.register_on_evaluate(&descriptor.main_resource, &descriptor.id, capability.clone());

    let first = fixture.container("first_root");
    let second = fixture.container("second_root");
    let _h1 = fixture.loader.request_mount(&descriptor, first.clone());
    let _h2 = fixture.loader.request_mount(&descriptor, second.clone());

    fixture.resolver.release(&descriptor.main_resource, Ok(()));
    settle().await;

    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Ready);
    assert_eq!(capability.mounts(), vec![first, second]);
}

#[tokio::test]
async fn ready_remount_skips_injection() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    let capability = RecordingCapability::new();
    fixture.register_on_evaluate(&descriptor.main_resource, &descriptor.id, capability.clone());

    let first = fixture.container("first_root");
    let _h1 = fixture.loader.request_mount(&descriptor, first);
    settle().await;
    assert_eq!(capability.mount_count(), 1);

    // Placeholder re-mounts without a fresh network load.
    let second = fixture.container("second_root");
    let _h2 = fixture.loader.request_mount(&descriptor, second.clone());

    assert_eq!(capability.mount_count(), 2);
    assert_eq!(capability.mounts()[1], second);
    assert_eq!(fixture.resolver.fetch_count(&descriptor.main_resource), 1);
    assert_eq!(fixture.page.resource_count(), 1);
}

#[tokio::test]
async fn teardown_suppresses_late_mount() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    let capability = RecordingCapability::new();
    fixture.resolver.hold(&descriptor.main_resource);
    fixture.register_on_evaluate(&descriptor.main_resource, &descriptor.id, capability.clone());

    let container = fixture.container("react_guest_root");
    let handle = fixture.loader.request_mount(&descriptor, container);
    fixture.loader.request_unmount(&handle);

    fixture.resolver.release(&descriptor.main_resource, Ok(()));
    settle().await;

    // The load itself settled, but the torn-down attempt's effect did not
    // apply.
    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Ready);
    assert_eq!(capability.mount_count(), 0);
}

#[tokio::test]
async fn unmount_invokes_registered_capability() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    let capability = RecordingCapability::new();
    fixture.register_on_evaluate(&descriptor.main_resource, &descriptor.id, capability.clone());

    let container = fixture.container("react_guest_root");
    let handle = fixture.loader.request_mount(&descriptor, container);
    settle().await;
    assert_eq!(capability.mount_count(), 1);

    fixture.loader.request_unmount(&handle);
    assert_eq!(capability.unmount_count(), 1);
    // Ready is kept; the resource and capability are reusable.
    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Ready);
}

#[tokio::test]
async fn support_resources_are_fire_and_forget() {
    let fixture = Fixture::new();
    let descriptor = descriptor("angular_guest").with_support(vec![
        Locator::new("http://localhost:8003/polyfills.js"),
        Locator::new("http://localhost:8003/zone.js"),
    ]);
    let capability = RecordingCapability::new();
    fixture.register_on_evaluate(&descriptor.main_resource, &descriptor.id, capability.clone());

    // Support resources never complete; the guest must still mount.
    for support in &descriptor.support_resources {
        fixture.resolver.hold(support);
    }

    let container = fixture.container("angular_guest_root");
    let _handle = fixture.loader.request_mount(&descriptor, container);
    settle().await;

    assert_eq!(capability.mount_count(), 1);
    assert_eq!(fixture.page.resource_count(), 3);
    assert!(fixture
        .page
        .has_resource(&ResourceKey::support(&descriptor.id, 1)));
    assert!(fixture
        .page
        .has_resource(&ResourceKey::support(&descriptor.id, 2)));
}

#[tokio::test]
async fn missing_container_aborts_without_panic() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    let capability = RecordingCapability::new();
    fixture.register_on_evaluate(&descriptor.main_resource, &descriptor.id, capability.clone());

    // Container never exposed on the page.
    let _handle = fixture
        .loader
        .request_mount(&descriptor, shared_types::ContainerId::new("nowhere_root"));
    settle().await;

    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Ready);
    assert_eq!(capability.mount_count(), 0);
}

#[tokio::test]
async fn guest_that_never_registers_is_a_logged_noop() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    // No on_evaluate: the guest loads but registers nothing.

    let container = fixture.container("react_guest_root");
    let _handle = fixture.loader.request_mount(&descriptor, container);
    settle().await;

    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Ready);
    assert!(!fixture.registry.is_registered(&descriptor.id));
}

#[tokio::test]
async fn failed_load_is_errored_and_never_retried() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    fixture.resolver.fail(
        &descriptor.main_resource,
        ResolveError::Unreachable(descriptor.main_resource.clone()),
    );

    let container = fixture.container("react_guest_root");
    let _h1 = fixture.loader.request_mount(&descriptor, container.clone());
    settle().await;
    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Errored);

    // A later attempt observes the error; no second injection happens.
    let _h2 = fixture.loader.request_mount(&descriptor, container);
    settle().await;
    assert_eq!(fixture.resolver.fetch_count(&descriptor.main_resource), 1);
    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Errored);
}

#[tokio::test]
async fn errored_waiters_are_drained_not_mounted() {
    let fixture = Fixture::new();
    let descriptor = descriptor("react_guest");
    let capability = RecordingCapability::new();
    fixture.resolver.hold(&descriptor.main_resource);
    fixture.register_on_evaluate(&descriptor.main_resource, &descriptor.id, capability.clone());

    let first = fixture.container("first_root");
    let second = fixture.container("second_root");
    let _h1 = fixture.loader.request_mount(&descriptor, first);
    let _h2 = fixture.loader.request_mount(&descriptor, second);

    fixture.resolver.release(
        &descriptor.main_resource,
        Err(ResolveError::Unreachable(descriptor.main_resource.clone())),
    );
    settle().await;

    assert_eq!(fixture.loader.load_state(&descriptor.id), LoadState::Errored);
    assert_eq!(capability.mount_count(), 0);
}

#[tokio::test]
async fn independent_guests_load_independently() {
    let fixture = Fixture::new();
    let react = descriptor("react_guest");
    let angular = descriptor("angular_guest");
    let react_capability = RecordingCapability::new();
    fixture.register_on_evaluate(&react.main_resource, &react.id, react_capability.clone());
    fixture.resolver.fail(
        &angular.main_resource,
        ResolveError::Unreachable(angular.main_resource.clone()),
    );

    let _h1 = fixture
        .loader
        .request_mount(&react, fixture.container("react_guest_root"));
    let _h2 = fixture
        .loader
        .request_mount(&angular, fixture.container("angular_guest_root"));
    settle().await;

    assert_eq!(fixture.loader.load_state(&react.id), LoadState::Ready);
    assert_eq!(fixture.loader.load_state(&angular.id), LoadState::Errored);
    assert_eq!(react_capability.mount_count(), 1);
    assert_eq!(
        fixture.loader.load_state(&GuestId::new("never_requested")),
        LoadState::Unrequested
    );
}
