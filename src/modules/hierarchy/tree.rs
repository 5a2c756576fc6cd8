//! Membership tree builder.
//!
//! Converts a flat member list with manager back-pointers into a display
//! forest. Manager pointers are plain data with no referential guarantee:
//! a pointer can be missing, dangle, reference the member itself, or form a
//! cycle. The builder normalizes all of those instead of trusting the data,
//! and the recursive materialization keeps a visited guard so inconsistent
//! input can never loop or render a member twice.
//!
//! The forest is rebuilt in full from the current member list on every
//! request; there is no incremental update.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::roles::catalog::COMPANY_ADMIN_LEVEL;

/// A member as the tree builder sees it: identity, resolved level, and the
/// raw manager pointer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamMember {
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub level: u8,
    pub manager_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberNode {
    #[serde(flatten)]
    pub member: TeamMember,
    pub children: Vec<MemberNode>,
}

/// The built forest: `roots` are the entry points the viewer starts from,
/// `unassigned` are members with no resolvable manager that represent a
/// data-quality gap from a Company Admin's vantage.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamForest {
    pub roots: Vec<MemberNode>,
    pub unassigned: Vec<MemberNode>,
}

/// Build the display forest for `viewer`.
///
/// A manager pointer that is absent, self-referencing, or not present in the
/// member list is treated as "no manager" and makes the member a root.
/// Manager cycles are broken deterministically at their most senior member,
/// which then also surfaces as a root; the affected company data is flagged
/// in the log.
///
/// Root classification depends on the viewer: level-1 roots are always shown
/// as main roots; a non-Company viewer additionally gets their own unmanaged
/// node as a main root (it is a valid entry point into their subtree), while
/// the unassigned bucket is only populated for a Company-level viewer.
pub fn build_forest(members: Vec<TeamMember>, viewer_id: Uuid, viewer_level: u8) -> TeamForest {
    let ids: HashSet<Uuid> = members.iter().map(|m| m.user_id).collect();

    // Normalize manager pointers, then break cycles before attaching.
    let mut effective_manager: HashMap<Uuid, Option<Uuid>> = members
        .iter()
        .map(|m| {
            let manager = match m.manager_id {
                Some(mid) if mid != m.user_id && ids.contains(&mid) => Some(mid),
                Some(mid) if mid == m.user_id => {
                    tracing::warn!(member_id = %m.user_id, "member is their own manager; treating as unmanaged");
                    None
                }
                _ => None,
            };
            (m.user_id, manager)
        })
        .collect();

    for breaker in find_cycle_breakers(&effective_manager, &members) {
        tracing::warn!(member_id = %breaker, "manager cycle detected; treating member as unmanaged");
        effective_manager.insert(breaker, None);
    }

    let mut root_members = Vec::new();
    let mut children_of: HashMap<Uuid, Vec<TeamMember>> = HashMap::new();
    for member in members {
        match effective_manager.get(&member.user_id).copied().flatten() {
            Some(manager_id) => children_of.entry(manager_id).or_default().push(member),
            None => root_members.push(member),
        }
    }

    let mut visited = HashSet::new();
    let mut roots = Vec::new();
    let mut unassigned = Vec::new();
    root_members.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.full_name.cmp(&b.full_name)));

    for member in root_members {
        let is_main = member.level == COMPANY_ADMIN_LEVEL
            || (viewer_level > COMPANY_ADMIN_LEVEL && member.user_id == viewer_id);
        let node = materialize(member, &mut children_of, &mut visited);
        if is_main {
            roots.push(node);
        } else if viewer_level == COMPANY_ADMIN_LEVEL {
            unassigned.push(node);
        }
        // Other viewers do not see unmanaged members outside their subtree.
    }

    TeamForest { roots, unassigned }
}

fn materialize(
    member: TeamMember,
    children_of: &mut HashMap<Uuid, Vec<TeamMember>>,
    visited: &mut HashSet<Uuid>,
) -> MemberNode {
    visited.insert(member.user_id);
    let children = children_of.remove(&member.user_id).unwrap_or_default();
    let mut nodes = Vec::with_capacity(children.len());
    for child in children {
        if visited.contains(&child.user_id) {
            // Cycle breaking guarantees this cannot happen; guard anyway so
            // inconsistent data degrades to a skipped duplicate, not a loop.
            tracing::warn!(member_id = %child.user_id, "member already rendered on this tree; skipping duplicate");
            continue;
        }
        nodes.push(materialize(child, children_of, visited));
    }
    MemberNode {
        member,
        children: nodes,
    }
}

/// Detect cycles in the manager graph and pick one member per cycle to
/// detach. Every member has at most one outgoing edge, so each member's
/// manager chain either terminates at a root or enters exactly one cycle.
/// The breaker is the cycle's most senior member (lowest level, ties broken
/// by id for determinism).
fn find_cycle_breakers(
    effective_manager: &HashMap<Uuid, Option<Uuid>>,
    members: &[TeamMember],
) -> Vec<Uuid> {
    const UNVISITED: u8 = 0;
    const IN_PROGRESS: u8 = 1;
    const DONE: u8 = 2;

    let level_of: HashMap<Uuid, u8> = members.iter().map(|m| (m.user_id, m.level)).collect();
    let mut state: HashMap<Uuid, u8> = members.iter().map(|m| (m.user_id, UNVISITED)).collect();
    let mut breakers = Vec::new();

    for start in members.iter().map(|m| m.user_id) {
        if state[&start] != UNVISITED {
            continue;
        }

        let mut path = Vec::new();
        let mut current = start;
        loop {
            state.insert(current, IN_PROGRESS);
            path.push(current);

            match effective_manager.get(&current).copied().flatten() {
                Some(next) if state[&next] == IN_PROGRESS => {
                    // Found a cycle: it runs from `next` to the end of `path`.
                    let cycle_start = path.iter().position(|id| *id == next).unwrap_or(0);
                    let breaker = path[cycle_start..]
                        .iter()
                        .copied()
                        .min_by_key(|id| (level_of.get(id).copied().unwrap_or(u8::MAX), *id))
                        .unwrap_or(next);
                    breakers.push(breaker);
                    break;
                }
                Some(next) if state[&next] == UNVISITED => {
                    current = next;
                }
                _ => break, // reached a root or an already-settled chain
            }
        }

        for id in path {
            state.insert(id, DONE);
        }
    }

    breakers
}
