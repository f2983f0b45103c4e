use crate::node::Arena;
use crate::types::{NodeId, Side};

/// Debug dump of one side's tree shape by slot index.
pub(crate) fn print<S: Side, L, R>(arena: &Arena<L, R>, node: Option<NodeId>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let link = arena.link::<S>(i);
            let left = print::<S, L, R>(arena, link.l, &format!("{}  ", tab));
            let right = print::<S, L, R>(arena, link.r, &format!("{}  ", tab));
            format!("Node({i})\n{tab}L={left}\n{tab}R={right}")
        }
    }
}
