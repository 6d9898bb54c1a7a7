//! Outline renderer.

const INDENT: &str = "    ";
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// A node of an indented text outline.
///
/// ```
/// use wirescope::report::TreeNode;
///
/// let mut root = TreeNode::new("root");
/// root.child("a").child("a1");
/// root.child("b");
/// assert_eq!(
///     root.render(),
///     "    root\n    ├── a\n    │   └── a1\n    └── b\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    name: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child and return it for further nesting
    pub fn child(&mut self, name: impl Into<String>) -> &mut TreeNode {
        self.children.push(TreeNode::new(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    pub fn render_into(&self, out: &mut String) {
        out.push_str(INDENT);
        out.push_str(&self.name);
        out.push('\n');
        self.render_children(out, INDENT);
    }

    fn render_children(&self, out: &mut String, prefix: &str) {
        for (i, child) in self.children.iter().enumerate() {
            let last = i + 1 == self.children.len();
            out.push_str(prefix);
            out.push_str(if last { LAST_BRANCH } else { BRANCH });
            out.push_str(&child.name);
            out.push('\n');

            let nested = format!("{}{}", prefix, if last { SPACE } else { PIPE });
            child.render_children(out, &nested);
        }
    }
}
