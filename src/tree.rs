//! Route tree walking and lookup.
//!
//! Given any coordinator as a starting point, the walker expands
//! `current_routes()` recursively into a branch/leaf tree of [`Route`]s and
//! offers lookup (by id, by tag, typed), a generic fold, and a diagnostic
//! printer. The walk is re-run on demand and never cached; it always executes
//! on the same serialized context as tree mutations, so it cannot race a
//! push or a pop.

use crate::component::Component;
use crate::coordinator::Coordinator;
use crate::id::CoordinatorId;

/// Why a structural edge exists. Diagnostic only; carries no behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The walk's starting point.
    Root,
    /// A stack's edge to its root sequence.
    StackRoot,
    /// A sequence's edge to a child in its back-stack.
    Push,
    /// A modal sheet presentation.
    Sheet,
    /// A fullscreen modal presentation.
    Fullscreen,
    /// A composite screen's edge to embedded substructure.
    Subview,
    /// An application-defined edge kind.
    Custom(String),
}

impl Transition {
    /// Short uppercase name used by the tree printer.
    pub fn name(&self) -> &str {
        match self {
            Transition::Root => "ROOT",
            Transition::StackRoot => "STACK_ROOT",
            Transition::Push => "PUSH",
            Transition::Sheet => "SHEET",
            Transition::Fullscreen => "FULLSCREEN",
            Transition::Subview => "SUBVIEW",
            Transition::Custom(name) => name,
        }
    }
}

/// One structural edge from a coordinator to a child.
#[derive(Debug, Clone)]
pub struct Route {
    pub coordinator: Coordinator,
    pub transition: Transition,
}

/// A node of the expanded route tree.
#[derive(Debug, Clone)]
pub enum TreeNode {
    Branch { route: Route, children: Vec<TreeNode> },
    Leaf { route: Route },
}

impl TreeNode {
    pub fn route(&self) -> &Route {
        match self {
            TreeNode::Branch { route, .. } => route,
            TreeNode::Leaf { route } => route,
        }
    }
}

/// Expand the full route tree from a starting coordinator.
pub fn tree(from: &Coordinator) -> TreeNode {
    expand(Route {
        coordinator: from.clone(),
        transition: Transition::Root,
    })
}

/// The flattened route list, in depth-first display order.
pub fn flat_tree(from: &Coordinator) -> Vec<Route> {
    let mut routes = Vec::new();
    flatten(&tree(from), &mut routes);
    routes
}

/// First route whose coordinator has the given identity.
pub fn find_route(from: &Coordinator, navigation_id: CoordinatorId) -> Option<Route> {
    flat_tree(from)
        .into_iter()
        .find(|route| route.coordinator.navigation_id() == navigation_id)
}

/// First route whose coordinator carries the given tag, in tree order.
pub fn find_route_by_tag(from: &Coordinator, tag: &str) -> Option<Route> {
    flat_tree(from)
        .into_iter()
        .find(|route| route.coordinator.tag() == tag)
}

/// Every route whose coordinator carries the given tag, in tree order.
pub fn find_all_routes_by_tag(from: &Coordinator, tag: &str) -> Vec<Route> {
    flat_tree(from)
        .into_iter()
        .filter(|route| route.coordinator.tag() == tag)
        .collect()
}

/// First coordinator with the given identity.
pub fn find_coordinator(from: &Coordinator, navigation_id: CoordinatorId) -> Option<Coordinator> {
    find_route(from, navigation_id).map(|route| route.coordinator)
}

/// First coordinator carrying the given tag, in tree order.
pub fn find_coordinator_by_tag(from: &Coordinator, tag: &str) -> Option<Coordinator> {
    find_route_by_tag(from, tag).map(|route| route.coordinator)
}

/// Every coordinator carrying the given tag, in tree order.
pub fn find_all_coordinators_by_tag(from: &Coordinator, tag: &str) -> Vec<Coordinator> {
    find_all_routes_by_tag(from, tag)
        .into_iter()
        .map(|route| route.coordinator)
        .collect()
}

/// First screen coordinator carrying the given tag.
pub fn find_screen_by_tag(
    from: &Coordinator,
    tag: &str,
) -> Option<crate::coordinator::screen::ScreenCoordinator> {
    flat_tree(from).into_iter().find_map(|route| {
        route
            .coordinator
            .as_screen()
            .filter(|screen| screen.tag() == tag)
            .cloned()
    })
}

/// First screen coordinator with the given identity.
pub fn find_screen_by_id(
    from: &Coordinator,
    navigation_id: CoordinatorId,
) -> Option<crate::coordinator::screen::ScreenCoordinator> {
    flat_tree(from).into_iter().find_map(|route| {
        route
            .coordinator
            .as_screen()
            .filter(|screen| screen.navigation_id() == navigation_id)
            .cloned()
    })
}

/// First sequence coordinator carrying the given tag.
pub fn find_sequence_by_tag(
    from: &Coordinator,
    tag: &str,
) -> Option<crate::coordinator::sequence::SequenceCoordinator> {
    flat_tree(from).into_iter().find_map(|route| {
        route
            .coordinator
            .as_sequence()
            .filter(|sequence| sequence.tag() == tag)
            .cloned()
    })
}

/// First sequence coordinator with the given identity.
pub fn find_sequence_by_id(
    from: &Coordinator,
    navigation_id: CoordinatorId,
) -> Option<crate::coordinator::sequence::SequenceCoordinator> {
    flat_tree(from).into_iter().find_map(|route| {
        route
            .coordinator
            .as_sequence()
            .filter(|sequence| sequence.navigation_id() == navigation_id)
            .cloned()
    })
}

/// First stack coordinator carrying the given tag.
pub fn find_stack_by_tag(
    from: &Coordinator,
    tag: &str,
) -> Option<crate::coordinator::stack::StackCoordinator> {
    flat_tree(from).into_iter().find_map(|route| {
        route
            .coordinator
            .as_stack()
            .filter(|stack| stack.tag() == tag)
            .cloned()
    })
}

/// First stack coordinator with the given identity.
pub fn find_stack_by_id(
    from: &Coordinator,
    navigation_id: CoordinatorId,
) -> Option<crate::coordinator::stack::StackCoordinator> {
    flat_tree(from).into_iter().find_map(|route| {
        route
            .coordinator
            .as_stack()
            .filter(|stack| stack.navigation_id() == navigation_id)
            .cloned()
    })
}

/// Depth-first fold over the branch/leaf shape.
pub fn reduce<T, F>(node: &TreeNode, initial: T, next: &mut F) -> T
where
    F: FnMut(T, &TreeNode) -> T,
{
    match node {
        TreeNode::Branch { children, .. } => {
            let mut result = next(initial, node);
            for child in children {
                result = reduce(child, result, next);
            }
            result
        }
        TreeNode::Leaf { .. } => next(initial, node),
    }
}

/// Render the tree for diagnostics, one line: `label: [child, child]`.
pub fn format_tree<F>(from: &Coordinator, label: &mut F) -> String
where
    F: FnMut(&TreeNode) -> String,
{
    format_node(&tree(from), label)
}

fn format_node<F>(node: &TreeNode, label: &mut F) -> String
where
    F: FnMut(&TreeNode) -> String,
{
    match node {
        TreeNode::Branch { children, .. } => {
            let mut text = label(node);
            for (index, child) in children.iter().enumerate() {
                if index == 0 {
                    text.push_str(": [");
                }
                text.push_str(&format_node(child, label));
                if index < children.len() - 1 {
                    text.push_str(", ");
                } else {
                    text.push(']');
                }
            }
            text
        }
        TreeNode::Leaf { .. } => label(node),
    }
}

fn expand(route: Route) -> TreeNode {
    let children: Vec<TreeNode> = route
        .coordinator
        .current_routes()
        .into_iter()
        .map(expand)
        .collect();
    if children.is_empty() {
        TreeNode::Leaf { route }
    } else {
        TreeNode::Branch { route, children }
    }
}

fn flatten(node: &TreeNode, out: &mut Vec<Route>) {
    match node {
        TreeNode::Branch { route, children } => {
            out.push(route.clone());
            for child in children {
                flatten(child, out);
            }
        }
        TreeNode::Leaf { route } => out.push(route.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::screen::ScreenCoordinator;
    use crate::coordinator::sequence::SequenceCoordinator;
    use crate::coordinator::stack::StackCoordinator;

    fn sample_stack() -> (StackCoordinator, ScreenCoordinator, ScreenCoordinator) {
        let first = ScreenCoordinator::new();
        first.set_tag("first");
        let second = ScreenCoordinator::new();
        second.set_tag("second");
        let sequence = SequenceCoordinator::from_screens(vec![first.clone(), second.clone()]);
        let stack = StackCoordinator::with_sequence(sequence);
        (stack, first, second)
    }

    #[test]
    fn flat_tree_lists_routes_in_display_order() {
        let (stack, first, second) = sample_stack();
        let routes = flat_tree(&Coordinator::from(stack.clone()));

        let ids: Vec<_> = routes
            .iter()
            .map(|route| route.coordinator.navigation_id())
            .collect();
        assert_eq!(ids.len(), 4); // stack, sequence, two screens
        assert_eq!(ids[0], stack.navigation_id());
        assert_eq!(ids[2], first.navigation_id());
        assert_eq!(ids[3], second.navigation_id());
        assert_eq!(routes[0].transition, Transition::Root);
        assert_eq!(routes[1].transition, Transition::StackRoot);
        assert_eq!(routes[2].transition, Transition::Push);
    }

    #[test]
    fn finds_by_tag_and_id() {
        let (stack, first, second) = sample_stack();
        let root = Coordinator::from(stack);

        let found = find_screen_by_tag(&root, "second").expect("tagged screen");
        assert_eq!(found.navigation_id(), second.navigation_id());
        assert!(find_screen_by_tag(&root, "missing").is_none());

        let by_id = find_coordinator(&root, first.navigation_id()).expect("screen by id");
        assert_eq!(by_id.navigation_id(), first.navigation_id());
    }

    #[test]
    fn duplicate_tags_resolve_to_first_in_tree_order() {
        let (stack, first, second) = sample_stack();
        first.set_tag("dup");
        second.set_tag("dup");
        let root = Coordinator::from(stack);

        let found = find_coordinator_by_tag(&root, "dup").expect("first duplicate");
        assert_eq!(found.navigation_id(), first.navigation_id());
        assert_eq!(find_all_coordinators_by_tag(&root, "dup").len(), 2);
    }

    #[test]
    fn reduce_visits_every_node_once() {
        let (stack, _, _) = sample_stack();
        let root = tree(&Coordinator::from(stack));
        let count = reduce(&root, 0usize, &mut |total, _| total + 1);
        assert_eq!(count, 4);
    }

    #[test]
    fn format_tree_renders_branches_with_brackets() {
        let (stack, _, _) = sample_stack();
        let rendered = format_tree(&Coordinator::from(stack), &mut |node| {
            node.route().transition.name().to_string()
        });
        assert_eq!(rendered, "ROOT: [STACK_ROOT: [PUSH, PUSH]]");
    }
}
