use std::io::Write;
use tracing::{debug, instrument};

use crate::api_client::ControlPlane;
use crate::errors::AppsResult;
use crate::models::{OrgKind, Organization};
use crate::prompt::{PromptError, Prompter};

/// Outcome of resolving the target organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgSelection {
    Resolved(Organization),
    /// The user aborted the selection prompt
    Cancelled,
    Failed(String),
}

/// Find the organization to act on.
///
/// A slug must match one of the caller's organizations exactly. Without a
/// slug (or with an empty one) a lone personal organization is picked
/// automatically, otherwise the user chooses from a list.
#[instrument(skip(client, prompter, out))]
pub async fn select_organization(
    client: &dyn ControlPlane,
    prompter: &dyn Prompter,
    out: &mut dyn Write,
    slug: Option<&str>,
) -> AppsResult<OrgSelection> {
    let slug = slug.filter(|slug| !slug.is_empty());

    let mut orgs = match client.list_organizations().await {
        Ok(orgs) => orgs,
        Err(e) => return Ok(OrgSelection::Failed(format!("Error fetching organizations: {}", e))),
    };

    if let Some(slug) = slug {
        return Ok(match orgs.into_iter().find(|org| org.slug == slug) {
            Some(org) => OrgSelection::Resolved(org),
            None => OrgSelection::Failed(format!("organization {:?} not found", slug)),
        });
    }

    if orgs.is_empty() {
        return Ok(OrgSelection::Failed(
            "no organizations available to this account".to_string(),
        ));
    }

    if orgs.len() == 1 && orgs[0].kind == OrgKind::Personal {
        let org = orgs.remove(0);
        writeln!(
            out,
            "Automatically selected {} organization: {}",
            org.kind, org.name
        )?;
        return Ok(OrgSelection::Resolved(org));
    }

    orgs.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.slug.cmp(&b.slug)));
    let items: Vec<String> = orgs
        .iter()
        .map(|org| format!("{} ({})", org.slug, org.name))
        .collect();

    match prompter.select("Select organization:", &items) {
        Ok(index) => match orgs.into_iter().nth(index) {
            Some(org) => {
                debug!("Selected organization {}", org.slug);
                Ok(OrgSelection::Resolved(org))
            }
            None => Ok(OrgSelection::Failed(format!(
                "selection {} is out of range",
                index
            ))),
        },
        Err(PromptError::Interrupted) => Ok(OrgSelection::Cancelled),
        Err(e) => Ok(OrgSelection::Failed(e.to_string())),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::test_utils::{org, Answer, MockControlPlane, ScriptedPrompter};

    fn orgs() -> Vec<Organization> {
        vec![
            org("acme", OrgKind::Shared),
            org("me", OrgKind::Personal),
            org("beta", OrgKind::Shared),
        ]
    }

    #[tokio::test]
    async fn test_slug_match_needs_no_prompt() {
        let client = MockControlPlane::new().with_orgs(orgs());
        let prompter = ScriptedPrompter::new(vec![]);
        let mut out = Vec::new();

        let selection = select_organization(&client, &prompter, &mut out, Some("beta"))
            .await
            .unwrap();

        assert_eq!(selection, OrgSelection::Resolved(org("beta", OrgKind::Shared)));
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_slug_fails() {
        let client = MockControlPlane::new().with_orgs(orgs());
        let prompter = ScriptedPrompter::new(vec![]);
        let mut out = Vec::new();

        let selection = select_organization(&client, &prompter, &mut out, Some("nope"))
            .await
            .unwrap();

        assert!(matches!(selection, OrgSelection::Failed(reason) if reason.contains("nope")));
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_empty_slug_prompts() {
        let client = MockControlPlane::new().with_orgs(orgs());
        let prompter = ScriptedPrompter::new(vec![Answer::Select(2)]);
        let mut out = Vec::new();

        let selection = select_organization(&client, &prompter, &mut out, Some(""))
            .await
            .unwrap();

        assert_eq!(selection, OrgSelection::Resolved(org("beta", OrgKind::Shared)));
        assert_eq!(prompter.asked(), vec!["Select organization:".to_string()]);
    }

    #[tokio::test]
    async fn test_single_personal_org_is_automatic() {
        let client = MockControlPlane::new().with_orgs(vec![org("me", OrgKind::Personal)]);
        let prompter = ScriptedPrompter::new(vec![]);
        let mut out = Vec::new();

        let selection = select_organization(&client, &prompter, &mut out, None)
            .await
            .unwrap();

        assert_eq!(selection, OrgSelection::Resolved(org("me", OrgKind::Personal)));
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Automatically selected personal organization"));
    }

    #[tokio::test]
    async fn test_prompt_lists_personal_first() {
        let client = MockControlPlane::new().with_orgs(orgs());
        let prompter = ScriptedPrompter::new(vec![Answer::Select(0)]);
        let mut out = Vec::new();

        let selection = select_organization(&client, &prompter, &mut out, None)
            .await
            .unwrap();

        assert_eq!(selection, OrgSelection::Resolved(org("me", OrgKind::Personal)));
        assert_eq!(
            prompter.last_items(),
            vec![
                "me (Me Org)".to_string(),
                "acme (Acme Org)".to_string(),
                "beta (Beta Org)".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_interrupted_prompt_is_cancelled() {
        let client = MockControlPlane::new().with_orgs(orgs());
        let prompter = ScriptedPrompter::new(vec![Answer::Interrupt]);
        let mut out = Vec::new();

        let selection = select_organization(&client, &prompter, &mut out, None)
            .await
            .unwrap();

        assert_eq!(selection, OrgSelection::Cancelled);
    }

    #[tokio::test]
    async fn test_listing_failure_fails() {
        let client = MockControlPlane::new().failing_orgs();
        let prompter = ScriptedPrompter::new(vec![]);
        let mut out = Vec::new();

        let selection = select_organization(&client, &prompter, &mut out, Some("acme"))
            .await
            .unwrap();

        assert!(matches!(selection, OrgSelection::Failed(_)));
    }
}
