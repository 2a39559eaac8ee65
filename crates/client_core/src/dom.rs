//! Headless model of the page the form controller drives.

use crate::typing::TextSlot;

pub const DARK_CLASS: &str = "dark";
pub const HIDDEN_CLASS: &str = "hidden";
pub const REVEAL_CLASS: &str = "scroll-reveal";
pub const VISIBLE_CLASS: &str = "visible";
pub const DROP_HIGHLIGHT_CLASSES: [&str; 4] = ["ring", "ring-blue-400", "bg-blue-100", "dark:bg-blue-800"];

/// Distance from the bottom of the viewport an element must clear to be revealed.
pub const REVEAL_MARGIN_PX: f64 = 40.0;
/// Scroll offset past which the scroll-to-top control shows.
pub const SCROLL_TOP_THRESHOLD_PX: f64 = 200.0;

/// Ordered set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut list = Self::new();
        for class in classes {
            list.add(class);
        }
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            height: 800.0,
        }
    }
}

/// A page element tagged with the reveal class.
#[derive(Debug, Clone, PartialEq)]
pub struct Revealable {
    pub name: String,
    /// Distance of the element's top edge from the top of the document.
    pub document_top: f64,
    pub classes: ClassList,
}

impl Revealable {
    pub fn new(name: impl Into<String>, document_top: f64) -> Self {
        Self {
            name: name.into(),
            document_top,
            classes: ClassList::from_classes([REVEAL_CLASS]),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.classes.contains(VISIBLE_CLASS)
    }

    pub fn reset(&mut self) {
        self.classes.remove(VISIBLE_CLASS);
    }
}

/// Addresses one text container of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub pass: u64,
    pub card: usize,
    pub item: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    Paragraph(TextSlot),
    List(Vec<TextSlot>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub index: u32,
    pub title: String,
    pub body: CardBody,
}

impl Card {
    pub fn slots(&self) -> &[TextSlot] {
        match &self.body {
            CardBody::Paragraph(slot) => std::slice::from_ref(slot),
            CardBody::List(items) => items,
        }
    }

    fn slot_mut(&mut self, item: usize) -> Option<&mut TextSlot> {
        match &mut self.body {
            CardBody::Paragraph(slot) if item == 0 => Some(slot),
            CardBody::Paragraph(_) => None,
            CardBody::List(items) => items.get_mut(item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNode {
    Notice(String),
    Card(Card),
}

/// Contents of the output container.
///
/// Every clear starts a new render pass, so slot ids handed out earlier stop
/// resolving and their timers fall through as no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSection {
    pass: u64,
    nodes: Vec<OutputNode>,
}

impl OutputSection {
    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn nodes(&self) -> &[OutputNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.pass += 1;
        self.nodes.clear();
    }

    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.clear();
        self.nodes.push(OutputNode::Notice(message.into()));
    }

    /// Appends a card and returns its position among the nodes.
    pub fn append_card(&mut self, card: Card) -> usize {
        self.nodes.push(OutputNode::Card(card));
        self.nodes.len() - 1
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.nodes.iter().filter_map(|node| match node {
            OutputNode::Card(card) => Some(card),
            OutputNode::Notice(_) => None,
        })
    }

    pub fn notice(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            OutputNode::Notice(message) => Some(message.as_str()),
            OutputNode::Card(_) => None,
        })
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut TextSlot> {
        if id.pass != self.pass {
            return None;
        }
        match self.nodes.get_mut(id.card)? {
            OutputNode::Card(card) => card.slot_mut(id.item),
            OutputNode::Notice(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_class_list() {
        let mut classes = ClassList::from_classes(["font-sans"]);
        let original = classes.clone();
        assert!(classes.toggle(DARK_CLASS));
        assert!(!classes.toggle(DARK_CLASS));
        assert_eq!(classes, original);
    }

    #[test]
    fn add_is_idempotent() {
        let mut classes = ClassList::new();
        classes.add(VISIBLE_CLASS);
        classes.add(VISIBLE_CLASS);
        assert_eq!(classes.iter().count(), 1);
    }

    #[test]
    fn slots_from_a_cleared_pass_do_not_resolve() {
        let mut output = OutputSection::default();
        let card = output.append_card(Card {
            index: 0,
            title: "Title".into(),
            body: CardBody::Paragraph(TextSlot::pending("T")),
        });
        let id = SlotId {
            pass: output.pass(),
            card,
            item: 0,
        };
        assert!(output.slot_mut(id).is_some());

        output.clear();
        assert!(output.slot_mut(id).is_none());
    }
}
