//! In-memory DOM used to drive the selection rules without a browser.

#![allow(dead_code)]

use folio_interact::ElementProbe;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    parent: Option<usize>,
    text: String,
    color: Option<String>,
    background: Option<String>,
    cursor: Option<String>,
    inline_cursor: Option<String>,
    background_image: bool,
    onclick: bool,
}

#[derive(Debug, Clone)]
pub struct FixtureDom {
    nodes: Rc<RefCell<Vec<Node>>>,
}

/// Handle to one fixture node. Builder methods mutate the node in place.
#[derive(Debug, Clone)]
pub struct El {
    nodes: Rc<RefCell<Vec<Node>>>,
    index: usize,
}

impl FixtureDom {
    /// `<html><body></body></html>`, both transparent.
    pub fn new() -> Self {
        let nodes = vec![
            Node {
                tag: "HTML".into(),
                ..Default::default()
            },
            Node {
                tag: "BODY".into(),
                parent: Some(0),
                ..Default::default()
            },
        ];
        Self {
            nodes: Rc::new(RefCell::new(nodes)),
        }
    }

    pub fn body(&self) -> El {
        El {
            nodes: self.nodes.clone(),
            index: 1,
        }
    }

    pub fn add(&self, parent: &El, tag: &str) -> El {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node {
            tag: tag.to_ascii_uppercase(),
            parent: Some(parent.index),
            ..Default::default()
        });
        El {
            nodes: self.nodes.clone(),
            index: nodes.len() - 1,
        }
    }
}

impl El {
    fn edit(self, f: impl FnOnce(&mut Node)) -> Self {
        f(&mut self.nodes.borrow_mut()[self.index]);
        self
    }

    fn read<T>(&self, f: impl FnOnce(&Node) -> T) -> T {
        f(&self.nodes.borrow()[self.index])
    }

    pub fn class(self, class: &str) -> Self {
        self.edit(|n| n.classes.push(class.into()))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.edit(|n| n.id = Some(id.into()))
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.edit(|n| n.attrs.push((name.into(), value.into())))
    }

    pub fn text(self, text: &str) -> Self {
        self.edit(|n| n.text = text.into())
    }

    pub fn color(self, css: &str) -> Self {
        self.edit(|n| n.color = Some(css.into()))
    }

    pub fn background(self, css: &str) -> Self {
        self.edit(|n| n.background = Some(css.into()))
    }

    pub fn cursor(self, css: &str) -> Self {
        self.edit(|n| n.cursor = Some(css.into()))
    }

    pub fn inline_cursor(self, css: &str) -> Self {
        self.edit(|n| n.inline_cursor = Some(css.into()))
    }

    pub fn background_image(self) -> Self {
        self.edit(|n| n.background_image = true)
    }

    pub fn onclick(self) -> Self {
        self.edit(|n| n.onclick = true)
    }
}

impl ElementProbe for El {
    fn tag_name(&self) -> String {
        self.read(|n| n.tag.clone())
    }

    fn id(&self) -> Option<String> {
        self.read(|n| n.id.clone())
    }

    fn has_class(&self, class: &str) -> bool {
        self.read(|n| n.classes.iter().any(|c| c == class))
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.read(|n| {
            n.attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        })
    }

    fn parent(&self) -> Option<Self> {
        self.read(|n| n.parent).map(|index| El {
            nodes: self.nodes.clone(),
            index,
        })
    }

    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(el) = current {
            if el.index == self.index {
                return true;
            }
            current = el.parent();
        }
        false
    }

    fn has_text(&self) -> bool {
        // textContent includes descendants
        let nodes = self.nodes.borrow();
        let mut stack = vec![self.index];
        while let Some(i) = stack.pop() {
            if !nodes[i].text.trim().is_empty() {
                return true;
            }
            stack.extend((0..nodes.len()).filter(|&c| nodes[c].parent == Some(i)));
        }
        false
    }

    fn computed_color(&self) -> Option<String> {
        self.read(|n| n.color.clone())
    }

    fn computed_background(&self) -> Option<String> {
        Some(self.read(|n| n.background.clone()).unwrap_or_else(|| "rgba(0, 0, 0, 0)".into()))
    }

    fn computed_cursor(&self) -> Option<String> {
        Some(self.read(|n| n.cursor.clone()).unwrap_or_else(|| "auto".into()))
    }

    fn inline_cursor(&self) -> Option<String> {
        self.read(|n| n.inline_cursor.clone())
    }

    fn has_background_image(&self) -> bool {
        self.read(|n| n.background_image)
    }

    fn has_click_handler(&self) -> bool {
        self.read(|n| n.onclick)
    }
}
