//! Ancestry walks over declared type hierarchies.
//!
//! Hierarchies are explicit metadata, not language inheritance: each
//! [`TypeIdentity`] lists the ancestors it is-a, and those ancestors may list
//! further ancestors. The walk is a small graph traversal with a visited set,
//! so diamonds deduplicate and arbitrary input terminates.

use std::collections::HashSet;

use missive_core::{BuildError, TypeIdentity};

use crate::registry::Registry;

/// Collect every middleware identity registered against `message_type` or
/// any of its ancestors, direct or transitive.
///
/// Returns an unordered, deduplicated set of identity keys; the caller
/// sequences it against the global execution order. A middleware bound both
/// to a type and to one of its ancestors appears once.
pub(crate) fn inherited_middleware(
    registry: &Registry,
    message_type: &TypeIdentity,
) -> HashSet<String> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut found: HashSet<String> = HashSet::new();
    let mut pending: Vec<&TypeIdentity> = vec![message_type];

    while let Some(current) = pending.pop() {
        if !visited.insert(current.key()) {
            continue;
        }
        for middleware in registry.middleware_for(current.key()) {
            found.insert(middleware.key().to_owned());
        }
        pending.extend(current.parents());
    }

    found
}

/// Fail if the ancestry reachable from `root` revisits a key along one path.
pub(crate) fn ensure_acyclic(root: &TypeIdentity) -> Result<(), BuildError> {
    fn visit<'a>(identity: &'a TypeIdentity, trail: &mut Vec<&'a str>) -> Result<(), BuildError> {
        if trail.contains(&identity.key()) {
            return Err(BuildError::CyclicHierarchy {
                key: identity.key().to_owned(),
            });
        }
        trail.push(identity.key());
        for parent in identity.parents() {
            visit(parent, trail)?;
        }
        trail.pop();
        Ok(())
    }

    visit(root, &mut Vec::new())
}
