//! Pure planning for credential reconciliation
//!
//! Nothing here touches the network. The reconciler calls
//! [`plan_reconciliation`] between the fetch and the first mutation, and
//! callers may use it to preview a reconciliation.

use std::collections::{HashMap, HashSet};

use apigate_domain::{Credential, ProductLink};

/// Remote mutations needed to move a credential to a desired product set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconciliationPlan {
    /// Products attached remotely but absent from the desired set, in
    /// remote order
    pub to_remove: Vec<String>,
    /// Desired links, de-duplicated by name
    pub desired: Vec<ProductLink>,
}

impl ReconciliationPlan {
    /// Names for the additive call, in desired order.
    pub fn desired_names(&self) -> Vec<String> {
        self.desired.iter().map(|link| link.name.clone()).collect()
    }

    pub fn requires_removals(&self) -> bool {
        !self.to_remove.is_empty()
    }
}

/// Collapse links sharing a name.
///
/// Each name keeps the position of its first occurrence and the metadata of
/// its last occurrence.
pub fn dedup_links(links: &[ProductLink]) -> Vec<ProductLink> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(links.len());
    let mut unique: Vec<ProductLink> = Vec::with_capacity(links.len());

    for link in links {
        match index.get(link.name.as_str()) {
            Some(&position) => unique[position] = link.clone(),
            None => {
                index.insert(link.name.as_str(), unique.len());
                unique.push(link.clone());
            }
        }
    }

    unique
}

/// Diff `current` against `desired` by product name.
pub fn plan_reconciliation(current: &Credential, desired: &Credential) -> ReconciliationPlan {
    let desired = dedup_links(&desired.products);
    let wanted: HashSet<&str> = desired.iter().map(|link| link.name.as_str()).collect();

    let mut seen = HashSet::new();
    let to_remove = current
        .product_names()
        .filter(|name| !wanted.contains(name))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect();

    ReconciliationPlan { to_remove, desired }
}
