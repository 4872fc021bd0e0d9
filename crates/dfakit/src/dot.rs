use std::fmt;

use petgraph::{
    dot::{Config, Dot},
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::dfa::Dfa;

#[derive(Debug, Clone)]
pub enum DotNode {
    // invisible node whose only edge points at the start state
    Start,
    State { label: String, accepting: bool },
}

impl fmt::Display for DotNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DotNode::Start => Ok(()),
            DotNode::State { label, .. } => write!(f, "{}", label),
        }
    }
}

pub type DfaGraph = DiGraph<DotNode, String>;

/// One node per state plus the start marker, one edge per (state, symbol).
/// Node `i + 1` is state `i` of `dfa`; node 0 is the start marker.
pub fn to_graph(dfa: &Dfa) -> DfaGraph {
    let mut graph = DfaGraph::with_capacity(
        dfa.states.len() + 1,
        dfa.states.len() * dfa.alphabet.len() + 1,
    );

    let start = graph.add_node(DotNode::Start);
    let nodes: Vec<NodeIndex> = dfa
        .states
        .iter()
        .map(|x| {
            graph.add_node(DotNode::State {
                label: x.id.to_string(),
                accepting: x.accepting,
            })
        })
        .collect();

    graph.add_edge(start, nodes[dfa.initial_state.index()], String::new());
    for (i, state) in dfa.states.iter().enumerate() {
        for (symbol, next) in dfa.alphabet.iter().zip(&state.transitions) {
            graph.add_edge(nodes[i], nodes[next.index()], symbol.to_string());
        }
    }

    graph
}

// DOT quoted string; only `"` and `\` need escaping
fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

pub fn to_dot(dfa: &Dfa) -> String {
    let graph = to_graph(dfa);
    let edge_attributes = |_: &DfaGraph, edge: petgraph::graph::EdgeReference<'_, String>| {
        format!("label = {}", quoted(edge.weight()))
    };
    let node_attributes = |_: &DfaGraph, (_, node): (NodeIndex, &DotNode)| match node {
        DotNode::Start => "shape = point".to_string(),
        DotNode::State { label, accepting } => format!(
            "label = {} shape = {}",
            quoted(label),
            if *accepting { "doublecircle" } else { "circle" }
        ),
    };

    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::NodeNoLabel, Config::EdgeNoLabel],
        &edge_attributes,
        &node_attributes,
    );
    format!("{}", dot)
}
