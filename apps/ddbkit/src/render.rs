//! Plain-text rendering of shape trees.

use ddbkit_shape::{Location, Shape, ShapeKind, ShapeResult};

/// Render `shape` and its children, one line per shape, indented by depth.
///
/// Each line reads `label: type`, followed by the shared shape it extends,
/// its location when not the body, its wire name when that differs from the
/// label, and whether the parent requires it. A shape that extends one of its
/// own ancestors, or sits at `max_depth`, is printed without its children and
/// marked with `...`.
pub fn render(shape: &Shape, label: &str, max_depth: usize) -> ShapeResult<String> {
    let mut renderer = Renderer {
        out: String::new(),
        max_depth,
        ancestors: vec![label.to_owned()],
    };
    renderer.shape(shape, label, false, 0)?;
    Ok(renderer.out)
}

struct Renderer {
    out: String,
    max_depth: usize,
    ancestors: Vec<String>,
}

impl Renderer {
    fn shape(
        &mut self,
        shape: &Shape,
        label: &str,
        required: bool,
        depth: usize,
    ) -> ShapeResult<()> {
        let attributes = shape.attributes();
        let mut line = format!("{}{label}: {}", "  ".repeat(depth), shape.shape_type());

        if let Some(reference) = &attributes.reference {
            line.push_str(&format!(" -> {reference}"));
        }
        if let Some(format) = shape.timestamp_format() {
            line.push_str(&format!(" ({})", format.as_str()));
        }
        if shape.location() != Location::Body {
            line.push_str(&format!(" [{}]", shape.location().as_str()));
        }
        if let Some(name) = shape.name().filter(|name| *name != label) {
            line.push_str(&format!(" as {name}"));
        }
        if required {
            line.push_str(" *");
        }

        let recursive = attributes
            .reference
            .as_ref()
            .is_some_and(|reference| self.ancestors.contains(reference));
        if shape.is_composite() && (recursive || depth >= self.max_depth) {
            line.push_str(" ...");
        }
        self.out.push_str(&line);
        self.out.push('\n');
        if recursive || depth >= self.max_depth {
            return Ok(());
        }

        let pushed = match &attributes.reference {
            Some(reference) => {
                self.ancestors.push(reference.clone());
                true
            }
            None => false,
        };
        match shape.kind() {
            ShapeKind::Structure(structure) => {
                for (name, member) in structure.members()? {
                    self.shape(&member, name, structure.is_required(name), depth + 1)?;
                }
            }
            ShapeKind::List(list) => {
                if let Some(member) = list.member()? {
                    self.shape(&member, "member", false, depth + 1)?;
                }
            }
            ShapeKind::Map(map) => {
                self.shape(&*map.key()?, "key", false, depth + 1)?;
                self.shape(&*map.value()?, "value", false, depth + 1)?;
            }
            _ => {}
        }
        if pushed {
            self.ancestors.pop();
        }
        Ok(())
    }
}
