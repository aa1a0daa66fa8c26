//! Tree diff computation for --output-diff

use tessera_core::Result;
use tessera_tree::{save_tree_string, CoordSpace, Tree};

/// How far ahead to look for a matching line before calling it a change
const LOOKAHEAD: usize = 3;

/// Line diff of the pretty-printed JSON of two trees
pub fn compute_tree_diff<A: CoordSpace, B: CoordSpace>(
    before: &Tree<A>,
    after: &Tree<B>,
) -> Result<String> {
    let before = save_tree_string(before)?;
    let after = save_tree_string(after)?;
    Ok(compute_text_diff(&before, &after))
}

/// Line-by-line diff with a short lookahead to resynchronise
pub fn compute_text_diff(before: &str, after: &str) -> String {
    let before_lines: Vec<&str> = before.lines().collect();
    let after_lines: Vec<&str> = after.lines().collect();

    let mut output = String::new();
    let (mut bi, mut ai) = (0, 0);

    loop {
        match (before_lines.get(bi), after_lines.get(ai)) {
            (Some(b), Some(a)) if b == a => {
                output.push_str(&format!("  {}\n", b));
                bi += 1;
                ai += 1;
            }
            (Some(b), Some(a)) => {
                let inserted = after_lines[ai..]
                    .iter()
                    .take(LOOKAHEAD + 1)
                    .position(|line| line == b);
                if let Some(offset) = inserted {
                    for line in &after_lines[ai..ai + offset] {
                        output.push_str(&format!("+ {}\n", line));
                    }
                    ai += offset;
                    continue;
                }

                let removed = before_lines[bi..]
                    .iter()
                    .take(LOOKAHEAD + 1)
                    .position(|line| line == a);
                if let Some(offset) = removed {
                    for line in &before_lines[bi..bi + offset] {
                        output.push_str(&format!("- {}\n", line));
                    }
                    bi += offset;
                    continue;
                }

                output.push_str(&format!("- {}\n", b));
                output.push_str(&format!("+ {}\n", a));
                bi += 1;
                ai += 1;
            }
            (Some(b), None) => {
                output.push_str(&format!("- {}\n", b));
                bi += 1;
            }
            (None, Some(a)) => {
                output.push_str(&format!("+ {}\n", a));
                ai += 1;
            }
            (None, None) => break,
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::Rect;
    use tessera_tree::{Node, NodeType, Role};

    #[test]
    fn test_identical() {
        let text = "{\n  \"id\": \"a\"\n}\n";
        let diff = compute_text_diff(text, text);
        assert!(!diff.contains("+ "));
        assert!(!diff.contains("- "));
    }

    #[test]
    fn test_inserted_lines() {
        let diff = compute_text_diff("a\nc\n", "a\nb\nc\n");
        assert_eq!(diff, "  a\n+ b\n  c\n");
    }

    #[test]
    fn test_removed_lines() {
        let diff = compute_text_diff("a\nb\nc\n", "a\nc\n");
        assert_eq!(diff, "  a\n- b\n  c\n");
    }

    #[test]
    fn test_changed_line() {
        let diff = compute_text_diff("a\nx\nc\n", "a\ny\nc\n");
        assert_eq!(diff, "  a\n- x\n+ y\n  c\n");
    }

    #[test]
    fn test_tree_role_change_shows_up() {
        let before = Tree::relative(Node::new("n", Role::BACKGROUND, NodeType::Svg, Rect::new(0.0, 0.0, 1.0, 1.0)));
        let mut after = before.clone();
        after.root_mut().role = Role::DECORATION;
        let diff = compute_tree_diff(&before, &after).unwrap();
        assert!(diff.contains("-   \"role\": \"Role.Element.Background\","));
        assert!(diff.contains("+   \"role\": \"Role.Element.Decoration\","));
    }
}
