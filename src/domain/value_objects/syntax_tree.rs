//! Syntax tree used by the structural concatenation builder
//!
//! The packager does not understand any source dialect. A `TreeCodec`
//! turns text into a flat list of top-level statements and back; the
//! builder only splices statement lists into wrapper templates.

/// Placeholder statement replaced by wrapped content
pub const CONTENT_PLACEHOLDER: &str = "$CONTENT$";

/// Top-level statements of one parsed unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    statements: Vec<String>,
}

impl SyntaxTree {
    pub fn new(statements: Vec<String>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn statements_mut(&mut self) -> &mut Vec<String> {
        &mut self.statements
    }

    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Append every statement of `other`
    pub fn extend(&mut self, other: SyntaxTree) {
        self.statements.extend(other.statements);
    }

    /// Replace each placeholder statement of `self` (the wrapper) with `content`.
    ///
    /// A placeholder is a statement that reads `$CONTENT$`, optionally
    /// followed by `;`, surrounded by any whitespace.
    pub fn wrap(self, content: SyntaxTree) -> SyntaxTree {
        let mut out = Vec::with_capacity(self.statements.len() + content.statements.len());
        for statement in self.statements {
            if is_placeholder(&statement) {
                out.extend(content.statements.iter().cloned());
            } else {
                out.push(statement);
            }
        }
        SyntaxTree::new(out)
    }
}

fn is_placeholder(statement: &str) -> bool {
    let trimmed = statement.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
    trimmed == CONTENT_PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(lines: &[&str]) -> SyntaxTree {
        SyntaxTree::new(lines.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn wrap_splices_content() {
        let wrapper = tree(&["(function () {", "  $CONTENT$;", "})();"]);
        let wrapped = wrapper.wrap(tree(&["a();", "b();"]));
        assert_eq!(wrapped.statements(), &["(function () {", "a();", "b();", "})();"]);
    }

    #[test]
    fn identity_wrapper_keeps_content() {
        let wrapped = tree(&["$CONTENT$"]).wrap(tree(&["x"]));
        assert_eq!(wrapped, tree(&["x"]));
    }

    #[test]
    fn wrapper_without_placeholder_drops_content() {
        let wrapped = tree(&["header();"]).wrap(tree(&["x"]));
        assert_eq!(wrapped, tree(&["header();"]));
    }
}
