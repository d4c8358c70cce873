// Input contexts - restrict which actions are evaluated

use super::InputError;

/// Separator between an action's context and its leaf name
pub const CONTEXT_SEPARATOR: char = '.';

/// The context part of an action name (`"Console"` for `"Console.Copy"`)
///
/// Names without a separator are their own context.
pub fn context_of(action_name: &str) -> &str {
    action_name
        .split(CONTEXT_SEPARATOR)
        .next()
        .unwrap_or(action_name)
}

/// Last-in-first-out stack of active input contexts
///
/// Only the top context matters: while the stack is non-empty, only actions
/// whose context equals the top are evaluated.
#[derive(Debug, Clone, Default)]
pub struct InputContextStack {
    stack: Vec<String>,
}

impl InputContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, context: impl Into<String>) {
        self.stack.push(context.into());
    }

    /// Remove the most recently pushed context
    pub fn pop(&mut self) -> Result<String, InputError> {
        self.stack.pop().ok_or(InputError::ContextStackUnderflow)
    }

    pub fn top(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// Check whether an action is live under the current context
    pub fn allows(&self, action_name: &str) -> bool {
        match self.top() {
            None => true,
            Some(top) => top.is_empty() || context_of(action_name) == top,
        }
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_of() {
        assert_eq!(context_of("ConsoleAction.Copy"), "ConsoleAction");
        assert_eq!(context_of("Menu"), "Menu");
        assert_eq!(context_of("A.B.C"), "A");
    }

    #[test]
    fn test_empty_stack_allows_everything() {
        let stack = InputContextStack::new();
        assert!(stack.allows("A.Jump"));
        assert!(stack.allows("B.Fire"));
        assert!(stack.allows("Loose"));
    }

    #[test]
    fn test_top_context_filters() {
        let mut stack = InputContextStack::new();
        stack.push("A");

        assert!(stack.allows("A.Jump"));
        assert!(!stack.allows("B.Fire"));
        assert!(!stack.allows("AB.Fire"));
    }

    #[test]
    fn test_context_match_is_first_segment_only() {
        let mut stack = InputContextStack::new();
        stack.push("A.Sub");

        // "A.Sub.Jump" has context "A", not "A.Sub"
        assert!(!stack.allows("A.Sub.Jump"));
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = InputContextStack::new();
        stack.push("A");
        stack.push("B");
        assert_eq!(stack.top(), Some("B"));

        assert_eq!(stack.pop().unwrap(), "B");
        assert_eq!(stack.top(), Some("A"));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_pop_empty_is_error() {
        let mut stack = InputContextStack::new();
        assert!(matches!(stack.pop(), Err(InputError::ContextStackUnderflow)));
    }

    #[test]
    fn test_empty_context_name_allows_everything() {
        let mut stack = InputContextStack::new();
        stack.push("");
        assert!(stack.allows("A.Jump"));
    }
}
