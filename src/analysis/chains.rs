//! Binding chain resolution.
//!
//! A chain starts at an outermost link (a declaration with a target whose key
//! is no other link's target) and follows targets through the merged index
//! until a declaration without target is reached. Links missing from the
//! index are looked up in the live container, so bindings removed by
//! filtering still complete their chain.
//!
//! Links on a cycle without an outside entry have no outermost link; each
//! such cycle is reported once, starting from its smallest key.

use crate::analysis::index::BindingIndex;
use crate::container::ContainerView;
use crate::model::{BindingDeclaration, DeclarationKind};
use crate::spi::ModelParser;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use wirescope_core::BindingKey;

const END_PADDING: &str = "       ";

/// How one chain step resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HopKind {
    Linked,
    Converted,
    Provided,
}

impl HopKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HopKind::Linked => "linked",
            HopKind::Converted => "converted",
            HopKind::Provided => "provided",
        }
    }
}

/// One step: the hop kind and the rendered key (or provider) it leads to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainHop {
    pub kind: HopKind,
    pub to: String,
}

/// Why the walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainEnd {
    /// Reached a declaration without target
    Complete,
    /// Link target bound neither in the index nor in the container
    Removed,
    /// Link target already visited on this chain
    Cycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingChain {
    pub root: BindingKey,
    pub hops: Vec<ChainHop>,
    pub end: ChainEnd,
}

impl BindingChain {
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

/// `Root --[linked]--> Next --[provided]--> Provider`, with `*CHAIN REMOVED`
/// or `*CHAIN CYCLE` appended when the walk did not complete.
impl fmt::Display for BindingChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root.render())?;
        for hop in &self.hops {
            write!(f, " --[{}]--> {}", hop.kind.as_str(), hop.to)?;
        }
        match self.end {
            ChainEnd::Complete => Ok(()),
            ChainEnd::Removed => write!(f, "{}*CHAIN REMOVED", END_PADDING),
            ChainEnd::Cycle => write!(f, "{}*CHAIN CYCLE", END_PADDING),
        }
    }
}

pub struct ChainResolver<'c> {
    index: &'c BindingIndex,
    container: &'c dyn ContainerView,
    parser: ModelParser<'c>,
}

impl<'c> ChainResolver<'c> {
    pub fn new(index: &'c BindingIndex, container: &'c dyn ContainerView) -> Self {
        Self {
            index,
            container,
            parser: ModelParser::new(container),
        }
    }

    /// Outermost links: declarations with a target that no other link targets.
    pub fn roots(&self) -> Vec<&'c BindingDeclaration> {
        let index = self.index;
        let targets: HashSet<&BindingKey> = index.values().filter_map(|d| d.target()).collect();
        index
            .values()
            .filter(|d| d.target().is_some())
            .filter(|d| !d.key().is_some_and(|k| targets.contains(k)))
            .collect()
    }

    /// Walk one chain starting at `root`
    pub fn resolve(&self, root: &BindingDeclaration) -> Option<BindingChain> {
        self.walk(root).map(|(chain, _)| chain)
    }

    /// The chain and every key it passed through
    fn walk(&self, root: &BindingDeclaration) -> Option<(BindingChain, HashSet<BindingKey>)> {
        let root_key = root.key()?.clone();
        let mut visited: HashSet<BindingKey> = HashSet::new();
        visited.insert(root_key.clone());

        let mut hops = Vec::new();
        let mut current: Cow<'_, BindingDeclaration> = Cow::Borrowed(root);
        let end = loop {
            let Some(link) = current.target().cloned() else {
                if let Some(ref provided) = current.provided_by {
                    hops.push(ChainHop {
                        kind: HopKind::Provided,
                        to: provided.clone(),
                    });
                }
                break ChainEnd::Complete;
            };

            let kind = if current.kind() == DeclarationKind::ConvertedConstant {
                HopKind::Converted
            } else {
                HopKind::Linked
            };
            hops.push(ChainHop {
                kind,
                to: link.render(),
            });
            if !visited.insert(link.clone()) {
                break ChainEnd::Cycle;
            }

            match self.index.get(&link) {
                Some(next) => current = Cow::Borrowed(next),
                // the index may miss filtered bindings: ask the container
                None => match self.container.existing_binding(&link) {
                    Some(binding) => match self.parser.parse_binding(&binding) {
                        Some(next) => current = Cow::Owned(next),
                        None => break ChainEnd::Complete,
                    },
                    None => break ChainEnd::Removed,
                },
            }
        };

        let chain = BindingChain {
            root: root_key,
            hops,
            end,
        };
        Some((chain, visited))
    }

    /// Chains of links no walk has passed through yet. Every link has a single
    /// target, so these can only be members of closed cycles.
    fn unreached_cycles(&self, covered: &mut HashSet<BindingKey>) -> Vec<BindingChain> {
        let mut links: Vec<&BindingDeclaration> = self
            .index
            .values()
            .filter(|d| d.target().is_some())
            .filter(|d| d.key().is_some_and(|k| !covered.contains(k)))
            .collect();
        links.sort_by(|a, b| a.key().cmp(&b.key()));

        let mut res = Vec::new();
        for link in links {
            if link.key().is_some_and(|k| covered.contains(k)) {
                continue;
            }
            if let Some((chain, visited)) = self.walk(link) {
                covered.extend(visited);
                res.push(chain);
            }
        }
        res
    }

    /// All chains, ordered by rendered line
    pub fn resolve_all(&self) -> Vec<BindingChain> {
        let mut covered = HashSet::new();
        let mut found = Vec::new();
        for root in self.roots() {
            if let Some((chain, visited)) = self.walk(root) {
                covered.extend(visited);
                found.push(chain);
            }
        }
        found.extend(self.unreached_cycles(&mut covered));

        let mut chains: Vec<(String, BindingChain)> = found
            .into_iter()
            .map(|chain| (chain.to_string(), chain))
            .collect();
        chains.sort_by(|a, b| a.0.cmp(&b.0));
        tracing::debug!(chains = chains.len(), "Resolved binding chains");
        chains.into_iter().map(|(_, chain)| chain).collect()
    }

    /// Rendered chain lines, sorted
    pub fn lines(&self) -> Vec<String> {
        self.resolve_all().iter().map(ToString::to_string).collect()
    }
}
