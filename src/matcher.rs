//! Membership matching against access-control entries

use crate::types::{AclEntry, AclOperation, AclPermission, GroupName};
use std::collections::HashSet;

/// Decide whether an account's group memberships satisfy a set of entries
/// for the requested operation.
///
/// A pure function of its inputs at the instant of evaluation:
///
/// 1. Only entries whose operation equals the requested one count.
/// 2. An entry matches when the group it names is in `account_groups`.
/// 3. True iff at least one Allow entry matches and no Deny entry matches.
///
/// Everything else is false: empty entry set, membership in none of the
/// allowed groups, deny overriding allow. There is no wildcard-allow
/// bypass and no superuser.
pub fn decide(
    account_groups: &HashSet<GroupName>,
    entries: &HashSet<AclEntry>,
    operation: AclOperation,
) -> bool {
    let mut allowed = false;

    for entry in entries.iter().filter(|e| e.operation == operation) {
        if !account_groups.contains(entry.principal.as_str()) {
            continue;
        }
        match entry.permission {
            // A matching deny settles the decision immediately.
            AclPermission::Deny => return false,
            AclPermission::Allow => allowed = true,
        }
    }

    allowed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(names: &[&str]) -> HashSet<GroupName> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_member_of_allowed_group() {
        let entries = [AclEntry::allow("ktACons", AclOperation::Read)].into();
        assert!(decide(&groups(&["ktACons"]), &entries, AclOperation::Read));
    }

    #[test]
    fn test_non_member_is_denied() {
        let entries = [AclEntry::allow("ktACons", AclOperation::Read)].into();
        assert!(!decide(&groups(&["ktAProd"]), &entries, AclOperation::Read));
    }

    #[test]
    fn test_empty_entries_default_deny() {
        let entries = HashSet::new();
        assert!(!decide(&groups(&["ktACons"]), &entries, AclOperation::Read));
    }

    #[test]
    fn test_empty_membership_default_deny() {
        let entries = [AclEntry::allow("ktACons", AclOperation::Read)].into();
        assert!(!decide(&HashSet::new(), &entries, AclOperation::Read));
    }

    #[test]
    fn test_two_allowed_groups_or_together() {
        let entries: HashSet<AclEntry> = [
            AclEntry::allow("ktACons", AclOperation::Describe),
            AclEntry::allow("ktAProd", AclOperation::Describe),
        ]
        .into();

        assert!(decide(&groups(&["ktACons"]), &entries, AclOperation::Describe));
        assert!(decide(&groups(&["ktAProd"]), &entries, AclOperation::Describe));
        assert!(!decide(&groups(&["ktBOther"]), &entries, AclOperation::Describe));
    }

    #[test]
    fn test_operation_must_match_exactly() {
        let entries = [AclEntry::allow("ktACons", AclOperation::Read)].into();
        assert!(!decide(&groups(&["ktACons"]), &entries, AclOperation::Write));

        // All is a distinct literal, not a wildcard
        let entries = [AclEntry::allow("ktACons", AclOperation::All)].into();
        assert!(!decide(&groups(&["ktACons"]), &entries, AclOperation::Read));
        assert!(decide(&groups(&["ktACons"]), &entries, AclOperation::All));
    }

    #[test]
    fn test_matching_deny_overrides_allow() {
        let entries: HashSet<AclEntry> = [
            AclEntry::allow("ktACons", AclOperation::Read),
            AclEntry::deny("ktBanned", AclOperation::Read),
        ]
        .into();

        // member of both the allowed and the denied group
        assert!(!decide(
            &groups(&["ktACons", "ktBanned"]),
            &entries,
            AclOperation::Read
        ));
        // deny entry for a group the account is not in does nothing
        assert!(decide(&groups(&["ktACons"]), &entries, AclOperation::Read));
    }

    #[test]
    fn test_deny_alone_never_allows() {
        let entries = [AclEntry::deny("ktACons", AclOperation::Read)].into();
        assert!(!decide(&groups(&["ktACons"]), &entries, AclOperation::Read));
        assert!(!decide(&groups(&["ktAProd"]), &entries, AclOperation::Read));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let account_groups = groups(&["ktACons"]);
        let entries: HashSet<AclEntry> = [AclEntry::allow("ktACons", AclOperation::Read)].into();

        let before_groups = account_groups.clone();
        let before_entries = entries.clone();

        decide(&account_groups, &entries, AclOperation::Read);

        assert_eq!(account_groups, before_groups);
        assert_eq!(entries, before_entries);
    }
}
