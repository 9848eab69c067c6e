//! Per-call request context.
//!
//! Every service call receives its own [`RequestContext`]; its id is
//! recorded on the tracing span wrapping the call so all log lines of one
//! request can be correlated. Nothing about a request is kept in shared
//! state.

use uuid::Uuid;

/// Identifies one inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestContext {
    pub request_id: Uuid,
}

impl RequestContext {
    /// Creates a context with a fresh random id.
    pub fn new() -> Self {
        RequestContext {
            request_id: Uuid::new_v4(),
        }
    }

    /// Reuses an id handed over by the transport (e.g. a request header).
    pub fn with_id(request_id: Uuid) -> Self {
        RequestContext { request_id }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        RequestContext::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_context_gets_its_own_id() {
        assert_ne!(RequestContext::new(), RequestContext::new());

        let id = Uuid::new_v4();
        assert_eq!(RequestContext::with_id(id).request_id, id);
    }
}
