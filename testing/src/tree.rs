use ec_core::{Node, RawFields, fields};

/// Root-first linear tree `{prefix}-0 ..= {prefix}-{len - 1}`.
///
/// Every node has `parent_id` and a `|`-delimited `path` consistent with its
/// position and carries `inherit = true`. Callers set messages and other
/// fields on the nodes they care about.
pub fn linear_tree(prefix: &str, len: usize) -> Vec<Node> {
    let ids: Vec<String> = (0..len).map(|i| format!("{}-{}", prefix, i)).collect();

    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let mut node =
                Node::new(id.clone()).with_fields(RawFields::new().with(fields::INHERIT, true));
            if i > 0 {
                node = node
                    .with_parent_id(ids[i - 1].clone())
                    .with_path(format!("|{}|", ids[..i].join("|")));
            }
            node
        })
        .collect()
}

/// Sets a custom field on the node with `id`.
pub fn set_field(
    nodes: &mut [Node],
    id: &str,
    name: &str,
    value: impl Into<serde_json::Value>
) {
    if let Some(node) = nodes.iter_mut().find(|node| node.id == id) {
        node.fields.insert(name, value);
    }
}
