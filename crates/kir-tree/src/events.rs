//! Event Handler References
//!
//! Components carry ordered (event-kind, handler) pairs. A handler is one
//! of: a legacy string id into the logic table, a bytecode function id, or
//! an embedded source snippet with captured-variable metadata.

/// Event kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
    Submit,
    Focus,
    Blur,
    Hover,
    KeyDown,
    KeyUp,
    /// Plugin-defined event, identified by name
    Custom(String),
}

impl EventKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "click" => Self::Click,
            "change" => Self::Change,
            "submit" => Self::Submit,
            "focus" => Self::Focus,
            "blur" => Self::Blur,
            "hover" => Self::Hover,
            "keydown" => Self::KeyDown,
            "keyup" => Self::KeyUp,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::Change => "change",
            Self::Submit => "submit",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Hover => "hover",
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::Custom(name) => name,
        }
    }
}

/// Embedded handler source with closure metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerSource {
    pub language: String,
    pub code: String,
    pub file: Option<String>,
    pub line: u32,
    /// Names of variables captured from the enclosing scope
    pub closure_vars: Vec<String>,
}

/// Reference to the code that handles an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerRef {
    /// Legacy string id into the document's logic table
    Logic(String),
    /// Compiled bytecode function id
    Bytecode(u32),
    /// Embedded source snippet
    Source(HandlerSource),
}

/// One (event, handler) pair on a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBinding {
    pub kind: EventKind,
    pub handler: HandlerRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::from_name("click"), EventKind::Click);
        assert_eq!(EventKind::Click.name(), "click");
        let custom = EventKind::from_name("drag_end");
        assert_eq!(custom, EventKind::Custom("drag_end".to_string()));
        assert_eq!(custom.name(), "drag_end");
    }
}
