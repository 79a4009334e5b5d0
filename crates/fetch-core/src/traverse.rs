//! Depth-first counting over an element tree.
//!
//! The walk is generic over [`Element`], so it runs on the parsed HTML tree
//! ([`ego_tree::NodeRef`] over [`scraper::Node`]) as well as on any synthetic tree.

use ego_tree::NodeRef;
use scraper::Node;

/// A node in an element tree.
///
/// Non-element nodes (document, text, comments) have no tag name and no
/// attributes but may still have children.
pub trait Element<'a>: Copy {
    /// Tag name for element nodes, `None` otherwise.
    fn tag_name(self) -> Option<&'a str>;

    /// Attributes as `(name, value)` pairs in document order.
    fn attributes(self) -> impl Iterator<Item = (&'a str, &'a str)>;

    /// Child nodes in document order.
    fn child_nodes(self) -> impl Iterator<Item = Self>;
}

impl<'a> Element<'a> for NodeRef<'a, Node> {
    fn tag_name(self) -> Option<&'a str> {
        self.value().as_element().map(scraper::node::Element::name)
    }

    fn attributes(self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.value()
            .as_element()
            .into_iter()
            .flat_map(scraper::node::Element::attrs)
    }

    fn child_nodes(self) -> impl Iterator<Item = Self> {
        NodeRef::children(&self)
    }
}

/// Which nodes count: elements named `tag_name` that carry `attribute_name`.
///
/// The attribute value is never inspected, so an empty value still counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    /// Tag name to match.
    pub tag_name: &'static str,
    /// Attribute that must be present.
    pub attribute_name: &'static str,
}

impl Predicate {
    /// `<a>` elements with an `href`.
    pub const LINKS: Self = Self::new("a", "href");

    /// `<img>` elements with a `src`.
    pub const IMAGES: Self = Self::new("img", "src");

    /// Create a predicate.
    #[must_use]
    pub const fn new(tag_name: &'static str, attribute_name: &'static str) -> Self {
        Self {
            tag_name,
            attribute_name,
        }
    }

    /// True if `node` counts. A node counts at most once, however many
    /// times the attribute appears on it.
    pub fn matches<'a, E: Element<'a>>(&self, node: E) -> bool {
        if node.tag_name() != Some(self.tag_name) {
            return false;
        }
        match node
            .attributes()
            .find(|(name, _)| *name == self.attribute_name)
        {
            Some((_, value)) => {
                tracing::debug!("{}: {value}", self.tag_name);
                true
            }
            None => false,
        }
    }
}

/// Count the nodes under and including `node` that satisfy `predicate`.
///
/// Pre-order, depth-first; children are visited whether or not their parent
/// matched. Recursion depth equals tree depth.
pub fn count<'a, E: Element<'a>>(node: E, predicate: &Predicate) -> usize {
    let own = usize::from(predicate.matches(node));
    node.child_nodes()
        .fold(own, |total, child| total + count(child, predicate))
}
