//! Property-based tests using proptest
//!
//! These tests verify the persisted identity format and the request path
//! construction using randomized inputs.

use proptest::prelude::*;
use vercel_project_domain::vercel::project_domain::{
    domain_path, domains_path, with_team, CreateProjectDomain, ProjectDomainId,
};

/// Project ids as the API hands them out
fn arb_project_id() -> impl Strategy<Value = String> {
    prop_oneof!["prj_[A-Za-z0-9]{8,24}", "[a-z][a-z0-9-]{0,30}"]
}

/// Domain names, including multi-level subdomains
fn arb_domain_name() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z0-9][a-z0-9-]{0,10}", 1..4),
        prop_oneof!["com", "dev", "io", "app"],
    )
        .prop_map(|(labels, tld)| format!("{}.{}", labels.join("."), tld))
}

proptest! {
    /// parse(format(project, name)) == (project, name)
    #[test]
    fn identity_roundtrip(project_id in arb_project_id(), name in arb_domain_name()) {
        let id = ProjectDomainId::new(project_id.clone(), name.clone()).unwrap();
        let parsed: ProjectDomainId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed.project_id(), project_id.as_str());
        prop_assert_eq!(parsed.name(), name.as_str());
    }

    /// Names containing colons survive because only the first colon splits
    #[test]
    fn identity_roundtrip_with_colons_in_name(
        project_id in arb_project_id(),
        name in "[a-z0-9:.]{1,30}"
    ) {
        let id = ProjectDomainId::new(project_id.clone(), name.clone()).unwrap();
        let parsed: ProjectDomainId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// The first segment of the string form is always the project id
    #[test]
    fn identity_first_segment_is_project(project_id in arb_project_id(), name in arb_domain_name()) {
        let id = ProjectDomainId::new(project_id.clone(), name).unwrap().to_string();
        prop_assert_eq!(id.split(':').next(), Some(project_id.as_str()));
    }

    /// Project ids containing the separator are refused
    #[test]
    fn colon_in_project_id_is_rejected(
        head in "[a-z0-9_]{1,10}",
        tail in "[a-z0-9_]{1,10}",
        name in arb_domain_name()
    ) {
        let project_id = format!("{}:{}", head, tail);
        prop_assert!(ProjectDomainId::new(project_id, name).is_err());
    }

    /// Team scope adds exactly one query separator
    #[test]
    fn team_query_added_once(
        project_id in arb_project_id(),
        name in arb_domain_name(),
        team in "team_[A-Za-z0-9]{1,20}"
    ) {
        for path in [domains_path(&project_id), domain_path(&project_id, &name)] {
            let scoped = with_team(path.clone(), Some(team.as_str()));
            prop_assert_eq!(scoped.matches('?').count(), 1);
            prop_assert_eq!(scoped, format!("{}?teamId={}", path, team));
        }
    }

    /// Without a team the path carries no query at all
    #[test]
    fn no_team_no_query(project_id in arb_project_id(), name in arb_domain_name()) {
        let path = with_team(domain_path(&project_id, &name), None);
        prop_assert!(!path.contains('?'));
        prop_assert!(path.starts_with("/v8/projects/"));
        let suffix = format!("/domains/{}", name);
        prop_assert!(path.ends_with(&suffix));
    }

    /// A create payload built from a name alone never carries optional keys
    #[test]
    fn create_with_name_only_has_one_key(name in arb_domain_name()) {
        let body = serde_json::to_value(CreateProjectDomain::new(name.clone())).unwrap();
        let object = body.as_object().unwrap();
        prop_assert_eq!(object.len(), 1);
        prop_assert_eq!(object["name"].as_str(), Some(name.as_str()));
    }
}
