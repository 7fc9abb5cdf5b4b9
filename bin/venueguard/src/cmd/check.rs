//! Run authorization checks against the configured claims provider.
use anyhow::Result;
use serde::Serialize;

use venueguard_auth::evaluate_venue_access;
use venueguard_auth::AuthorizationDecision;
use venueguard_auth::AuthorizationGate;
use venueguard_auth::PermissionDenied;
use venueguard_context::Context;

use super::CallerArgs;
use super::CheckRoleArgs;
use super::CheckScopeArgs;
use super::CheckVenueArgs;

/// Print the claims of a caller.
pub async fn claims(context: &Context, gate: &AuthorizationGate, args: &CallerArgs) -> Result<()> {
    let claims = gate.claims(context, &args.caller).await?;
    print(&claims)
}

/// Verify a caller holds at least the given role.
pub async fn role(context: &Context, gate: &AuthorizationGate, args: &CheckRoleArgs) -> Result<()> {
    let result = gate
        .check_minimum_role(context, &args.caller, args.role)
        .await;
    report(result)
}

/// Verify a caller holds at least the given role and can access a venue.
pub async fn scope(
    context: &Context,
    gate: &AuthorizationGate,
    args: &CheckScopeArgs,
) -> Result<()> {
    let result = gate
        .check_venue_scope(context, &args.caller, args.role, &args.venue)
        .await;
    report(result)
}

/// Verify a caller can access a venue.
///
/// The decision is printed in both cases, denials are then reported as errors
/// to set the process exit code.
pub async fn venue(
    context: &Context,
    gate: &AuthorizationGate,
    args: &CheckVenueArgs,
) -> Result<()> {
    let claims = gate.claims(context, &args.caller).await?;
    let decision = evaluate_venue_access(&claims, &args.venue);
    slog::debug!(
        context.logger,
        "Venue access evaluated";
        "caller" => &args.caller,
        "venue" => &args.venue,
        "allowed" => decision.is_allowed(),
    );
    print(&decision)?;
    decision.ensure()?;
    Ok(())
}

/// Print the outcome of a failing check, including denials.
fn report(result: Result<AuthorizationDecision>) -> Result<()> {
    match result {
        Ok(decision) => print(&decision),
        Err(error) => {
            if let Some(denied) = error.downcast_ref::<PermissionDenied>() {
                print(&AuthorizationDecision::deny(denied.reason().clone()))?;
            }
            Err(error)
        }
    }
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use venueguard_auth::access::DenyReason;
    use venueguard_auth::claims::ClaimsFixture;
    use venueguard_auth::AuthorizationDecision;
    use venueguard_auth::AuthorizationGate;
    use venueguard_auth::CallerClaims;
    use venueguard_auth::InternalError;
    use venueguard_auth::LookupError;
    use venueguard_auth::PermissionDenied;
    use venueguard_context::Context;

    use super::report;
    use crate::cmd::CheckVenueArgs;
    use crate::cmd::Command;

    fn gate() -> AuthorizationGate {
        let fixture = ClaimsFixture::default();
        fixture.insert(
            "venue-uid",
            CallerClaims::with_role("venueAdmin").venue("venue-A"),
        );
        AuthorizationGate::from(fixture.claims())
    }

    fn venue_args(caller: &str, venue: &str) -> CheckVenueArgs {
        CheckVenueArgs {
            caller: caller.to_string(),
            venue: venue.to_string(),
        }
    }

    #[tokio::test]
    async fn venue_allowed() {
        let args = venue_args("venue-uid", "venue-A");
        super::venue(&Context::fixture(), &gate(), &args)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn venue_mismatch_is_denied() {
        let args = venue_args("venue-uid", "venue-B");
        let error = super::venue(&Context::fixture(), &gate(), &args)
            .await
            .unwrap_err();
        assert!(error.is::<PermissionDenied>());
        assert_eq!(crate::exit_code(&error), crate::EXIT_DENIED);
    }

    #[tokio::test]
    async fn venue_unknown_caller() {
        let args = venue_args("nobody", "venue-A");
        let error = super::venue(&Context::fixture(), &gate(), &args)
            .await
            .unwrap_err();
        assert!(error.is::<LookupError>());
        assert_eq!(crate::exit_code(&error), crate::EXIT_LOOKUP);
    }

    #[tokio::test]
    async fn run_check_venue_command() {
        let command = Command::CheckVenue(venue_args("venue-uid", "venue-B"));
        let error = crate::cmd::run(&Context::fixture(), &gate(), &command)
            .await
            .unwrap_err();
        assert!(error.is::<PermissionDenied>());
        assert_eq!(crate::exit_code(&error), crate::EXIT_DENIED);

        let command = Command::CheckVenue(venue_args("venue-uid", "venue-A"));
        crate::cmd::run(&Context::fixture(), &gate(), &command)
            .await
            .unwrap();
    }

    #[test]
    fn report_allowed() {
        report(Ok(AuthorizationDecision::allow())).unwrap();
    }

    #[test]
    fn report_keeps_errors() {
        let denied = AuthorizationDecision::deny(DenyReason::NoRole).ensure();
        let error = report(denied).unwrap_err();
        assert!(error.is::<PermissionDenied>());

        let error = report(Err(anyhow::anyhow!(InternalError))).unwrap_err();
        assert!(error.is::<InternalError>());
    }
}
