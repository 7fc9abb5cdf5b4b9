use anyhow::Result;

use venueguard_context::Context;

use super::Audit;
use super::AuditCheck;
use super::AuditDecision;
use super::AuthorizationDecision;
use super::AuthorizationGate;
use super::DenyReason;
use crate::claims::ClaimsFixture;
use crate::claims::FixtureFailure;
use crate::CallerClaims;
use crate::InternalError;
use crate::LookupError;
use crate::PermissionDenied;
use crate::Role;

fn gate(fixture: &ClaimsFixture) -> AuthorizationGate {
    AuthorizationGate::from(fixture.claims())
}

fn denied_reason(result: Result<AuthorizationDecision>) -> DenyReason {
    let error = result.expect_err("request should be denied");
    error
        .downcast_ref::<PermissionDenied>()
        .expect("error should be PermissionDenied")
        .reason()
        .clone()
}

#[tokio::test]
async fn allow_equal_or_higher_rank() {
    let fixture = ClaimsFixture::default();
    let gate = gate(&fixture);
    let context = Context::fixture();
    for held in Role::ALL {
        fixture.insert("uid", CallerClaims::with_role(held.as_str()));
        for required in Role::ALL.into_iter().filter(|required| *required <= held) {
            let decision = gate
                .check_minimum_role(&context, "uid", Some(required))
                .await
                .expect("request should be authorised");
            assert!(decision.is_allowed());
        }
    }
}

#[tokio::test]
async fn deny_lower_rank() {
    let fixture = ClaimsFixture::default();
    let gate = gate(&fixture);
    let context = Context::fixture();
    for held in Role::ALL {
        fixture.insert("uid", CallerClaims::with_role(held.as_str()));
        for required in Role::ALL.into_iter().filter(|required| *required > held) {
            let result = gate.check_minimum_role(&context, "uid", Some(required)).await;
            assert_eq!(
                denied_reason(result),
                DenyReason::InsufficientRole { required }
            );
        }
    }
}

#[tokio::test]
async fn deny_without_role() {
    let fixture = ClaimsFixture::default();
    fixture.insert("uid", CallerClaims::default().venue("venue-A"));
    let gate = gate(&fixture);
    let context = Context::fixture();

    let mut required = vec![None];
    required.extend(Role::ALL.into_iter().map(Some));
    for required in required {
        let result = gate.check_minimum_role(&context, "uid", required).await;
        let reason = denied_reason(result);
        assert_eq!(reason, DenyReason::NoRole);
        assert_eq!(reason.to_string(), "no role assigned");
    }
}

#[tokio::test]
async fn deny_unknown_role() {
    let fixture = ClaimsFixture::default();
    fixture.insert("uid", CallerClaims::with_role("superAdmin"));
    let gate = gate(&fixture);
    let context = Context::fixture();
    for required in Role::ALL {
        let result = gate.check_minimum_role(&context, "uid", Some(required)).await;
        assert!(result.unwrap_err().is::<PermissionDenied>());
    }
}

#[tokio::test]
async fn require_site_admin_by_default() {
    let fixture = ClaimsFixture::default();
    fixture
        .insert("site", CallerClaims::with_role("siteAdmin"))
        .insert("venue", CallerClaims::with_role("venueAdmin").venue("venue-A"));
    let gate = gate(&fixture);
    let context = Context::fixture();

    gate.check_minimum_role(&context, "site", None)
        .await
        .expect("request should be authorised");
    let error = gate
        .check_minimum_role(&context, "venue", None)
        .await
        .unwrap_err();
    assert!(error.to_string().contains("siteAdmin"));
}

#[tokio::test]
async fn unknown_caller_is_lookup_error() {
    let fixture = ClaimsFixture::default();
    let gate = gate(&fixture);
    let context = Context::fixture();
    let error = gate
        .check_minimum_role(&context, "missing", Some(Role::SubAdmin))
        .await
        .unwrap_err();
    let lookup = error.downcast_ref::<LookupError>().unwrap();
    assert_eq!(lookup.caller(), "missing");
}

#[tokio::test]
async fn empty_caller_skips_provider() {
    let fixture = ClaimsFixture::default();
    fixture.insert("", CallerClaims::with_role("siteAdmin"));
    let gate = gate(&fixture);
    let context = Context::fixture();
    let error = gate
        .check_minimum_role(&context, "", None)
        .await
        .unwrap_err();
    assert!(error.is::<LookupError>());
    assert_eq!(fixture.lookups(), 0);
}

#[tokio::test]
async fn provider_failure_is_internal_error() {
    let fixture = ClaimsFixture::default();
    fixture
        .insert("uid", CallerClaims::with_role("siteAdmin"))
        .fail_with("connection reset by peer");
    let gate = gate(&fixture);
    let context = Context::fixture();
    let error = gate
        .check_minimum_role(&context, "uid", Some(Role::SubAdmin))
        .await
        .unwrap_err();
    assert!(error.is::<InternalError>());
    assert!(error.downcast_ref::<FixtureFailure>().is_none());
    assert_eq!(error.to_string(), "failed to verify permissions");
    assert_eq!(error.chain().count(), 1);
}

#[tokio::test]
async fn claims_fetched_for_every_check() {
    let fixture = ClaimsFixture::default();
    fixture.insert("uid", CallerClaims::with_role("venueAdmin"));
    let gate = gate(&fixture);
    let context = Context::fixture();

    gate.check_minimum_role(&context, "uid", Some(Role::VenueAdmin))
        .await
        .unwrap();
    assert_eq!(fixture.lookups(), 1);

    // Role changes at the provider are visible to the next check.
    fixture.insert("uid", CallerClaims::with_role("subAdmin"));
    let result = gate
        .check_minimum_role(&context, "uid", Some(Role::VenueAdmin))
        .await;
    assert!(result.unwrap_err().is::<PermissionDenied>());
    assert_eq!(fixture.lookups(), 2);
}

#[tokio::test]
async fn venue_scope_site_admin_any_venue() {
    let fixture = ClaimsFixture::default();
    fixture.insert("uid", CallerClaims::with_role("siteAdmin"));
    let gate = gate(&fixture);
    let context = Context::fixture();
    for venue in ["venue-A", "venue-B"] {
        gate.check_venue_scope(&context, "uid", Some(Role::VenueAdmin), venue)
            .await
            .expect("request should be authorised");
    }
}

#[tokio::test]
async fn venue_scope_own_venue() {
    let fixture = ClaimsFixture::default();
    fixture.insert("uid", CallerClaims::with_role("venueAdmin").venue("venue-A"));
    let gate = gate(&fixture);
    let context = Context::fixture();

    gate.check_venue_scope(&context, "uid", Some(Role::VenueAdmin), "venue-A")
        .await
        .expect("request should be authorised");
    let result = gate
        .check_venue_scope(&context, "uid", Some(Role::VenueAdmin), "venue-B")
        .await;
    assert_eq!(
        denied_reason(result),
        DenyReason::VenueMismatch {
            venue: "venue-B".into()
        }
    );
    assert_eq!(fixture.lookups(), 2);
}

#[tokio::test]
async fn venue_scope_checks_role_first() {
    let fixture = ClaimsFixture::default();
    fixture.insert("uid", CallerClaims::with_role("subAdmin").venue("venue-A"));
    let gate = gate(&fixture);
    let context = Context::fixture();
    let result = gate
        .check_venue_scope(&context, "uid", Some(Role::VenueAdmin), "venue-A")
        .await;
    assert_eq!(
        denied_reason(result),
        DenyReason::InsufficientRole {
            required: Role::VenueAdmin
        }
    );
}

#[tokio::test]
async fn claims_returned_unchanged() {
    let fixture = ClaimsFixture::default();
    let claims = CallerClaims::with_role("owner").venue("venue-A");
    fixture.insert("uid", claims.clone());
    let gate = gate(&fixture);
    let actual = gate.claims(&Context::fixture(), "uid").await.unwrap();
    assert_eq!(actual, claims);
}

#[test]
fn audit_record_payload() {
    let result = Ok(AuthorizationDecision::allow());
    let audit =
        Audit::new(AuditCheck::VenueScope, "uid", Role::VenueAdmin, &result).venue("venue-A");
    assert_eq!(
        serde_json::to_value(audit).unwrap(),
        serde_json::json!({
            "caller": "uid",
            "check": "venue_scope",
            "decision": "Allow",
            "required_role": "venueAdmin",
            "venue": "venue-A",
        })
    );
}

#[test]
fn audit_decisions() {
    let allowed = Ok(AuthorizationDecision::allow());
    assert_eq!(AuditDecision::from(&allowed), AuditDecision::Allow);

    let denied = AuthorizationDecision::deny(DenyReason::NoRole).ensure();
    assert_eq!(AuditDecision::from(&denied), AuditDecision::Deny);

    let failed: Result<AuthorizationDecision> = Err(anyhow::anyhow!(InternalError));
    assert_eq!(AuditDecision::from(&failed), AuditDecision::Error);
}
