//! Node arena of the allocation network
//!
//! Nodes are dense matrix indices in the fixed order
//!
//! ```text
//! [Source] [Applicant x A] [ProviderMaster x P] [ProviderSubQuota x P] [Category x C] [Sink]
//! ```
//!
//! so `N = A + 2P + C + 2`. A lookup table from [`NodeKey`] to index is built once.
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Role of a node. The payload is the position in the applicant, provider or category list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Source,
    Applicant(usize),
    ProviderMaster(usize),
    ProviderSubQuota(usize),
    Category(usize),
    Sink,
}

/// Identity of a node in the lookup table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Source,
    Applicant(String),
    Provider(String),
    SubQuota(String),
    Category(String),
    Sink,
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            NodeKey::Source => write!(f, "source"),
            NodeKey::Applicant(id) => write!(f, "applicant <{}>", id),
            NodeKey::Provider(id) => write!(f, "provider <{}>", id),
            NodeKey::SubQuota(id) => write!(f, "provider <{}> sub-quota", id),
            NodeKey::Category(name) => write!(f, "category <{}>", name),
            NodeKey::Sink => write!(f, "sink"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub key: NodeKey,
}

impl Node {
    /// identifier of the applicant/provider/category, or "source"/"sink"
    pub fn name(&self) -> &str {
        match &self.key {
            NodeKey::Source => "source",
            NodeKey::Sink => "sink",
            NodeKey::Applicant(id)
            | NodeKey::Provider(id)
            | NodeKey::SubQuota(id)
            | NodeKey::Category(id) => id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NodeTable {
    nodes: Vec<Node>,
    index: HashMap<NodeKey, usize>,
    n_applicants: usize,
    n_providers: usize,
    n_categories: usize,
}

impl NodeTable {
    ///
    /// Build the table from the identifiers of each group.
    ///
    /// Fails with `NodeCollision` when an identifier appears twice within a group.
    ///
    pub fn new<A, P, C>(applicants: A, providers: P, categories: C) -> Result<NodeTable>
    where
        A: ExactSizeIterator<Item = String>,
        P: ExactSizeIterator<Item = String> + Clone,
        C: ExactSizeIterator<Item = String>,
    {
        let n_applicants = applicants.len();
        let n_providers = providers.len();
        let n_categories = categories.len();
        let mut table = NodeTable {
            nodes: Vec::with_capacity(n_applicants + 2 * n_providers + n_categories + 2),
            index: HashMap::new(),
            n_applicants,
            n_providers,
            n_categories,
        };

        table.push(NodeKind::Source, NodeKey::Source)?;
        for (i, id) in applicants.enumerate() {
            table.push(NodeKind::Applicant(i), NodeKey::Applicant(id))?;
        }
        for (j, id) in providers.clone().enumerate() {
            table.push(NodeKind::ProviderMaster(j), NodeKey::Provider(id))?;
        }
        for (j, id) in providers.enumerate() {
            table.push(NodeKind::ProviderSubQuota(j), NodeKey::SubQuota(id))?;
        }
        for (k, name) in categories.enumerate() {
            table.push(NodeKind::Category(k), NodeKey::Category(name))?;
        }
        table.push(NodeKind::Sink, NodeKey::Sink)?;

        Ok(table)
    }

    fn push(&mut self, kind: NodeKind, key: NodeKey) -> Result<usize> {
        let idx = self.nodes.len();
        if self.index.contains_key(&key) {
            tracing::error!("collision in node creation: {}", key);
            return Err(Error::NodeCollision(key.to_string()));
        }
        debug_assert_eq!(self.position(kind), idx);
        self.index.insert(key.clone(), idx);
        self.nodes.push(Node { kind, key });
        Ok(idx)
    }

    /// matrix index of a node kind, computed from the fixed layout
    fn position(&self, kind: NodeKind) -> usize {
        let (a, p, c) = (self.n_applicants, self.n_providers, self.n_categories);
        match kind {
            NodeKind::Source => 0,
            NodeKind::Applicant(i) => 1 + i,
            NodeKind::ProviderMaster(j) => 1 + a + j,
            NodeKind::ProviderSubQuota(j) => 1 + a + p + j,
            NodeKind::Category(k) => 1 + a + 2 * p + k,
            NodeKind::Sink => 1 + a + 2 * p + c,
        }
    }

    /// total number of nodes `N`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn n_applicants(&self) -> usize {
        self.n_applicants
    }
    pub fn n_providers(&self) -> usize {
        self.n_providers
    }
    pub fn n_categories(&self) -> usize {
        self.n_categories
    }

    pub fn source(&self) -> usize {
        self.position(NodeKind::Source)
    }
    pub fn sink(&self) -> usize {
        self.position(NodeKind::Sink)
    }
    pub fn applicant(&self, i: usize) -> usize {
        assert!(i < self.n_applicants);
        self.position(NodeKind::Applicant(i))
    }
    pub fn provider(&self, j: usize) -> usize {
        assert!(j < self.n_providers);
        self.position(NodeKind::ProviderMaster(j))
    }
    pub fn sub_quota(&self, j: usize) -> usize {
        assert!(j < self.n_providers);
        self.position(NodeKind::ProviderSubQuota(j))
    }
    pub fn category(&self, k: usize) -> usize {
        assert!(k < self.n_categories);
        self.position(NodeKind::Category(k))
    }

    /// indices of all applicant nodes
    pub fn applicants(&self) -> std::ops::Range<usize> {
        1..1 + self.n_applicants
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }
    pub fn kind(&self, idx: usize) -> NodeKind {
        self.nodes[idx].kind
    }
    pub fn name(&self, idx: usize) -> &str {
        self.nodes[idx].name()
    }

    /// index of the node with `key`
    pub fn lookup(&self, key: &NodeKey) -> Option<usize> {
        self.index.get(key).copied()
    }
    /// index of the node with `key`, failing with `MissingNode` when it does not exist
    pub fn get(&self, key: &NodeKey) -> Result<usize> {
        self.lookup(key).ok_or_else(|| {
            tracing::error!("failed to find node {}", key);
            Error::MissingNode(key.to_string())
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes.iter().enumerate()
    }
}
