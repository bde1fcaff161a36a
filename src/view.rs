use crate::convert::to_layout_with_limit;
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::render::{render, ExpandState, ExpansionMap, RenderedTree};
use crate::{AstNode, NodeId, RenderConfig, RuletreeError, TreeLayoutNode};

/// What [`TreeView::refresh`] did with the previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reload {
    /// Same AST as before; expand/collapse state kept.
    Unchanged,
    /// Different AST (or none); derived state rebuilt from scratch.
    Replaced,
}

/// Stateful view of a single rule tree.
///
/// Holds the layout derived from the last loaded AST and the expand/collapse
/// state for it. Loading an AST discards both. Each view is
/// independent; hosts showing several trees keep one view per tree.
///
/// # Example
///
/// ```
/// use ruletree::{operand, NodeId, TreeView};
///
/// let ast = operand("age").gt(30_i64).and(operand("department").eq("Sales"));
/// let mut view = TreeView::new();
/// view.load(Some(&ast)).unwrap();
/// view.toggle(NodeId::ROOT).unwrap();
/// assert_eq!(view.render().nodes().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeView {
    config: RenderConfig,
    layout: Option<TreeLayoutNode>,
    source: Option<Fingerprint>,
    expansion: ExpansionMap,
}

impl TreeView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace the displayed AST.
    ///
    /// Every load starts from scratch: the layout is rebuilt and all nodes
    /// are expanded again, even when the new AST equals the old one. Use
    /// [`TreeView::refresh`] to keep the expand/collapse state across an
    /// identical re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`RuletreeError::Structure`] if the AST is too deep and
    /// [`RuletreeError::Fingerprint`] if it cannot be encoded. Either way the
    /// view is left empty and renders the no-data state.
    pub fn load(&mut self, ast: Option<&AstNode>) -> Result<(), RuletreeError> {
        self.clear();
        let Some(ast) = ast else {
            return Ok(());
        };

        let (layout, source) = snapshot(ast, self.config.max_depth())?;
        tracing::debug!(%source, "loaded rule tree");
        self.layout = layout;
        self.source = Some(source);
        Ok(())
    }

    /// Like [`TreeView::load`], but keeps the expand/collapse state when the
    /// new AST is structurally identical to the one on display.
    ///
    /// # Errors
    ///
    /// Same as [`TreeView::load`]; on error the view is left empty.
    pub fn refresh(&mut self, ast: Option<&AstNode>) -> Result<Reload, RuletreeError> {
        let Some(ast) = ast else {
            let had_tree = self.layout.is_some();
            self.clear();
            return Ok(if had_tree { Reload::Replaced } else { Reload::Unchanged });
        };

        let (layout, source) = match snapshot(ast, self.config.max_depth()) {
            Ok(loaded) => loaded,
            Err(err) => {
                self.clear();
                return Err(err);
            }
        };
        if self.source == Some(source) {
            return Ok(Reload::Unchanged);
        }

        tracing::debug!(%source, "refreshed with a different rule tree");
        self.layout = layout;
        self.source = Some(source);
        self.expansion.reset();
        Ok(Reload::Replaced)
    }

    /// Flip a node between expanded and collapsed.
    ///
    /// # Errors
    ///
    /// Returns [`RuletreeError::Toggle`] if the node is a leaf or unknown,
    /// including when nothing is loaded.
    pub fn toggle(&mut self, id: NodeId) -> Result<ExpandState, RuletreeError> {
        let layout = self
            .layout
            .as_ref()
            .ok_or(crate::ToggleError::UnknownNode { id })?;
        Ok(self.expansion.toggle(layout, id)?)
    }

    #[must_use]
    pub fn render(&self) -> RenderedTree {
        render(self.layout.as_ref(), &self.expansion, &self.config)
    }

    #[must_use]
    pub fn layout(&self) -> Option<&TreeLayoutNode> {
        self.layout.as_ref()
    }

    #[must_use]
    pub fn expansion(&self) -> &ExpansionMap {
        &self.expansion
    }

    #[must_use]
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.source
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn clear(&mut self) {
        self.layout = None;
        self.source = None;
        self.expansion.reset();
    }
}

fn snapshot(
    ast: &AstNode,
    max_depth: usize,
) -> Result<(Option<TreeLayoutNode>, Fingerprint), RuletreeError> {
    let layout = to_layout_with_limit(Some(ast), max_depth)?;
    Ok((layout, fingerprint(ast)?))
}
