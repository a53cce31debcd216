//! Per-node wrap buffers.

use primeseek_core::{Term, WrapTemplate};

/// A node term together with the wraps that open before it and close
/// after it.
///
/// Buffers are kept in assignment order. When rendered, the most recently
/// added prefix is outermost (leftmost) and the most recently added suffix
/// is outermost (rightmost), so the wrap assigned last encloses the others.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSlot {
    /// The term in this slot.
    pub base: Term,
    /// Wraps opening before the term, oldest first.
    pub left_wrap_buffer: Vec<WrapTemplate>,
    /// Wraps closing after the term, oldest first.
    pub right_wrap_buffer: Vec<WrapTemplate>,
}

impl NodeSlot {
    /// A bare slot.
    #[must_use]
    pub fn new(base: Term) -> Self {
        Self {
            base,
            left_wrap_buffer: Vec::new(),
            right_wrap_buffer: Vec::new(),
        }
    }

    /// Records a wrap opening before this node.
    pub fn open(&mut self, template: WrapTemplate) {
        self.left_wrap_buffer.push(template);
    }

    /// Records a wrap closing after this node.
    pub fn close(&mut self, template: WrapTemplate) {
        self.right_wrap_buffer.push(template);
    }

    /// Prefixes in rendered order (newest first).
    pub fn prefixes(&self) -> impl Iterator<Item = WrapTemplate> + '_ {
        self.left_wrap_buffer.iter().rev().copied()
    }

    /// Suffixes in rendered order (oldest first).
    pub fn suffixes(&self) -> impl Iterator<Item = WrapTemplate> + '_ {
        self.right_wrap_buffer.iter().copied()
    }

    /// `reverse(left) ++ base ++ right`
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = String::new();
        self.render_into(&mut text);
        text
    }

    /// Appends the rendered slot to `out`.
    pub fn render_into(&self, out: &mut String) {
        for template in self.prefixes() {
            out.push_str(template.prefix());
        }
        out.push_str(self.base.text());
        for template in self.suffixes() {
            out.push_str(template.suffix());
        }
    }
}
