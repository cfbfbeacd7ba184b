use crate::*;
use std::collections::HashMap;

/// Label name to program position, filled by the first pass.
pub type LabelMap<'i> = HashMap<&'i str, usize>;

pub fn define_label<'i>(
    labels: &mut LabelMap<'i>,
    span: Span<'i>,
    position: usize,
) -> Result<()> {
    let name = span.as_str();
    if labels.insert(name, position).is_some() {
        return Err(new_parser_error(
            span,
            format!("Redefinition of label: {}", name),
        ));
    }
    Ok(())
}
